//! 用户清理存储操作

use super::SeaOrmStorage;
use super::transaction::{finish, rollback};
use crate::entity::files::{Column as FileColumn, Entity as Files};
use crate::entity::notifications::{Column as NotificationColumn, Entity as Notifications};
use crate::entity::user_courses::{Column as UserCourseColumn, Entity as UserCourses};
use crate::entity::user_submissions::{Column as UserSubmissionColumn, Entity as UserSubmissions};
use crate::entity::users::Entity as Users;
use crate::errors::{HWSystemError, Result};
use crate::models::files::entities::File;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};
use tracing::{error, info};

impl SeaOrmStorage {
    /// 删除用户及其关联数据
    ///
    /// 在同一个事务里依次删除用户提交、上传的文件、通知、课程成员关系和用户本身。
    /// 任何一步失败立即回滚，不再执行后续步骤。论坛内容不在此删除。
    pub async fn purge_user_impl(&self, user_id: i64) -> Result<Vec<File>> {
        let txn = self.begin().await?;

        let exists = Users::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("查询用户失败: {e}")));
        match exists {
            Ok(Some(_)) => {}
            Ok(None) => {
                let err = HWSystemError::not_found(format!("用户不存在: {user_id}"));
                return Err(rollback(txn, err).await);
            }
            Err(e) => return Err(rollback(txn, e).await),
        }

        let files = match purge_steps(&txn, user_id).await {
            Ok(files) => files,
            Err(e) => {
                error!("删除用户 {} 失败: {}", user_id, e);
                return Err(rollback(txn, e).await);
            }
        };

        let files = finish(txn, Ok(files)).await?;
        info!("用户 {} 已删除，清理文件 {} 个", user_id, files.len());
        Ok(files)
    }
}

async fn purge_steps(txn: &DatabaseTransaction, user_id: i64) -> Result<Vec<File>> {
    // 1. 用户提交
    let result = UserSubmissions::delete_many()
        .filter(UserSubmissionColumn::SubmitterId.eq(user_id))
        .exec(txn)
        .await
        .map_err(|e| HWSystemError::database_operation(format!("删除用户提交失败: {e}")))?;
    info!("用户 {}: 删除用户提交 {} 条", user_id, result.rows_affected);

    // 2. 上传的文件，先记下来供调用方清理磁盘
    let files: Vec<File> = Files::find()
        .filter(FileColumn::UploaderId.eq(user_id))
        .all(txn)
        .await
        .map_err(|e| HWSystemError::database_operation(format!("查询用户文件失败: {e}")))?
        .into_iter()
        .map(|m| m.into_file())
        .collect();
    Files::delete_many()
        .filter(FileColumn::UploaderId.eq(user_id))
        .exec(txn)
        .await
        .map_err(|e| HWSystemError::database_operation(format!("删除用户文件失败: {e}")))?;
    info!("用户 {}: 删除文件 {} 个", user_id, files.len());

    // 3. 通知
    let result = Notifications::delete_many()
        .filter(NotificationColumn::UserId.eq(user_id))
        .exec(txn)
        .await
        .map_err(|e| HWSystemError::database_operation(format!("删除用户通知失败: {e}")))?;
    info!("用户 {}: 删除通知 {} 条", user_id, result.rows_affected);

    // 4. 课程成员关系
    let result = UserCourses::delete_many()
        .filter(UserCourseColumn::UserId.eq(user_id))
        .exec(txn)
        .await
        .map_err(|e| HWSystemError::database_operation(format!("删除课程成员关系失败: {e}")))?;
    info!("用户 {}: 删除课程成员关系 {} 条", user_id, result.rows_affected);

    // 5. 用户本身
    Users::delete_by_id(user_id)
        .exec(txn)
        .await
        .map_err(|e| HWSystemError::database_operation(format!("删除用户失败: {e}")))?;

    Ok(files)
}
