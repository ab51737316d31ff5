//! 文件存储操作

use std::path::Path;

use super::SeaOrmStorage;
use super::constraint::insert_error;
use super::transaction::finish;
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{HWSystemError, Result};
use crate::models::files::entities::{File, NewFile};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

impl SeaOrmStorage {
    /// 登记本地文件并写入磁盘
    ///
    /// 先插入记录再写字节，全部成功后才提交；任何一步失败都回滚事务并删除已写入的部分文件。
    /// 磁盘文件以独占方式创建，目标路径已存在时直接失败而不会覆盖。
    pub async fn create_local_file_impl(
        &self,
        file: NewFile,
        content: &mut (dyn AsyncRead + Unpin + Send),
        max_size: u64,
    ) -> Result<File> {
        let path = Path::new(&file.location).to_path_buf();
        let mut created_on_disk = false;

        let txn = self.begin().await?;

        let result: Result<File> = async {
            let model = ActiveModel {
                name: Set(file.name.clone()),
                location: Set(file.location.clone()),
                is_local: Set(true),
                file_size: Set(0),
                uploader_id: Set(file.uploader_id),
                uploaded_at: Set(file.uploaded_at.timestamp()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| insert_error("创建文件记录", e))?;

            let mut disk_file = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
                .map_err(|e| {
                    HWSystemError::file_operation(format!("创建文件 {} 失败: {e}", path.display()))
                })?;
            created_on_disk = true;

            let written = copy_with_limit(content, &mut disk_file, max_size).await?;
            disk_file
                .sync_all()
                .await
                .map_err(|e| HWSystemError::file_operation(format!("同步文件失败: {e}")))?;

            let mut model: ActiveModel = model.into();
            model.file_size = Set(written as i64);
            let model = model
                .update(&txn)
                .await
                .map_err(|e| HWSystemError::database_operation(format!("更新文件大小失败: {e}")))?;

            Ok(model.into_file())
        }
        .await;

        let outcome = finish(txn, result).await;

        if outcome.is_err()
            && created_on_disk
            && let Err(e) = tokio::fs::remove_file(&path).await
        {
            warn!("清理未提交的文件 {} 失败: {e}", path.display());
        }

        let stored = outcome?;
        info!(
            "本地文件 {} 已保存到 {} ({} 字节)",
            stored.id, stored.location, stored.file_size
        );
        Ok(stored)
    }

    /// 登记远程链接文件，不涉及磁盘
    pub async fn create_remote_file_impl(&self, file: NewFile) -> Result<File> {
        let model = ActiveModel {
            name: Set(file.name),
            location: Set(file.location),
            is_local: Set(false),
            file_size: Set(0),
            uploader_id: Set(file.uploader_id),
            uploaded_at: Set(file.uploaded_at.timestamp()),
            ..Default::default()
        };

        let txn = self.begin().await?;
        let result = model
            .insert(&txn)
            .await
            .map(|m| m.into_file())
            .map_err(|e| insert_error("创建链接文件", e));
        let stored = finish(txn, result).await?;

        info!("链接文件 {} 已登记: {}", stored.id, stored.location);
        Ok(stored)
    }

    /// 通过 ID 获取文件
    pub async fn get_file_by_id_impl(&self, file_id: i64) -> Result<Option<File>> {
        let result = Files::find_by_id(file_id)
            .one(&self.db)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}

/// 完整拷贝内容，超过 max_size 字节即失败
async fn copy_with_limit<R, W>(reader: &mut R, writer: &mut W, max_size: u64) -> Result<u64>
where
    R: AsyncRead + Unpin + Send + ?Sized,
    W: AsyncWrite + Unpin + Send + ?Sized,
{
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total: u64 = 0;

    loop {
        let n = reader
            .read(&mut buffer)
            .await
            .map_err(|e| HWSystemError::file_operation(format!("读取上传内容失败: {e}")))?;
        if n == 0 {
            break;
        }

        total += n as u64;
        if total > max_size {
            return Err(HWSystemError::validation(format!(
                "文件大小超出限制 ({max_size} 字节)"
            )));
        }

        writer
            .write_all(&buffer[..n])
            .await
            .map_err(|e| HWSystemError::file_operation(format!("写入文件失败: {e}")))?;
    }

    writer
        .flush()
        .await
        .map_err(|e| HWSystemError::file_operation(format!("写入文件失败: {e}")))?;

    Ok(total)
}
