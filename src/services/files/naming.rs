//! 本地文件名冲突探测

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::{HWSystemError, Result};

static DIRECTORY_LOCKS: Lazy<DashMap<PathBuf, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

/// 同一目录的探测和创建串行执行
pub fn directory_lock(dir: &Path) -> Arc<Mutex<()>> {
    DIRECTORY_LOCKS
        .entry(dir.to_path_buf())
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// 第 n 个候选名：`report.pdf` -> `report-n.pdf`，第 0 个为原名
pub fn candidate_name(name: &str, attempt: u64) -> String {
    if attempt == 0 {
        return name.to_string();
    }

    let path = Path::new(name);
    match (
        path.file_stem().and_then(|s| s.to_str()),
        path.extension().and_then(|s| s.to_str()),
    ) {
        (Some(stem), Some(ext)) => format!("{stem}-{attempt}.{ext}"),
        _ => format!("{name}-{attempt}"),
    }
}

/// 从原名开始逐个尝试，返回第一个磁盘上不存在的名字及其路径
///
/// 悬空的符号链接也算已占用。调用方需持有目录锁。
pub async fn probe_free_name(dir: &Path, name: &str) -> Result<(String, PathBuf)> {
    let mut attempt: u64 = 0;
    loop {
        let candidate = candidate_name(name, attempt);
        let path = dir.join(&candidate);

        match tokio::fs::symlink_metadata(&path).await {
            Ok(_) => attempt += 1,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok((candidate, path)),
            Err(e) => {
                return Err(HWSystemError::file_operation(format!(
                    "检查路径 {} 失败: {e}",
                    path.display()
                )));
            }
        }
    }
}
