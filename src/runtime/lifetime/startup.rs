use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::{HWSystemError, Result};
use crate::services::{FileService, SubmissionService, UserService, UserSubmissionService};
use crate::storage::Storage;
use crate::utils::{Clock, SystemClock};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub submissions: Arc<SubmissionService>,
    pub user_submissions: Arc<UserSubmissionService>,
    pub files: Arc<FileService>,
    pub users: Arc<UserService>,
}

/// 确保上传目录存在
async fn ensure_upload_dir(dir: &str) -> Result<()> {
    if !Path::new(dir).exists() {
        warn!("Upload directory {} does not exist, creating it", dir);
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| HWSystemError::file_operation(format!("创建上传目录失败: {e}")))?;
    }
    Ok(())
}

/// 准备服务器启动的上下文
/// 包括存储、上传目录和各业务服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    ensure_upload_dir(&config.upload.dir).await?;
    info!(
        "Local files stored under {} (max {} bytes)",
        config.upload.dir, config.upload.max_size
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    Ok(StartupContext {
        submissions: Arc::new(SubmissionService::new(storage.clone(), clock.clone())),
        user_submissions: Arc::new(UserSubmissionService::new(storage.clone(), clock.clone())),
        files: Arc::new(FileService::new(
            storage.clone(),
            clock.clone(),
            &config.upload,
        )),
        users: Arc::new(UserService::new(storage.clone())),
        storage,
    })
}
