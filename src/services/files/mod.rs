//! 文件持久化
//!
//! 本地文件写入上传目录并登记记录，远程文件只登记链接。

pub mod naming;
pub mod save;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncRead;

use crate::config::UploadConfig;
use crate::errors::{HWSystemError, Result};
use crate::models::files::entities::File;
use crate::storage::Storage;
use crate::utils::Clock;

/// 文件内容来源
pub enum FileSource<'a> {
    /// 本地字节流，写入托管目录
    Local(&'a mut (dyn AsyncRead + Unpin + Send)),
    /// 外部链接
    Remote(&'a str),
}

pub struct FileService {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    upload_dir: PathBuf,
    max_size: u64,
}

impl FileService {
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>, upload: &UploadConfig) -> Self {
        Self {
            storage,
            clock,
            upload_dir: PathBuf::from(&upload.dir),
            max_size: upload.max_size,
        }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    // 保存文件
    pub async fn save_file(
        &self,
        name: &str,
        uploader_id: i64,
        source: FileSource<'_>,
    ) -> Result<File> {
        save::save_file(self, name, uploader_id, source).await
    }

    // 获取文件记录
    pub async fn get_file(&self, file_id: i64) -> Result<File> {
        self.storage
            .get_file_by_id(file_id)
            .await?
            .ok_or_else(|| HWSystemError::not_found(format!("文件不存在: {file_id}")))
    }
}
