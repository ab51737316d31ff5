use std::sync::Arc;

use tokio::io::AsyncRead;

use crate::models::{
    files::entities::{File, NewFile},
    submissions::entities::{NewSubmission, Submission, SubmissionChanges},
    user_submissions::entities::{NewUserSubmission, UserSubmission},
};

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层接口
///
/// 每个写方法都是一个独立的数据库事务：要么全部生效，要么回滚。
/// 回滚本身失败时返回 `FatalTransaction`。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 提交项管理方法
    // 创建提交项
    async fn create_submission(&self, submission: NewSubmission) -> Result<i64>;
    // 通过ID获取提交项
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出课程下的提交项
    async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<Submission>>;
    // 整体替换提交项的可变字段
    async fn update_submission(&self, submission_id: i64, changes: SubmissionChanges)
    -> Result<i64>;
    // 删除提交项
    async fn delete_submission(&self, submission_id: i64) -> Result<i64>;

    /// 用户提交管理方法
    // 创建用户提交
    async fn create_user_submission(&self, user_submission: NewUserSubmission) -> Result<i64>;
    // 通过ID获取用户提交
    async fn get_user_submission_by_id(&self, id: i64) -> Result<Option<UserSubmission>>;
    // 列出某提交项下的用户提交
    async fn list_user_submissions(&self, submission_id: i64) -> Result<Vec<UserSubmission>>;
    // 修改用户提交的显示名称
    async fn rename_user_submission(&self, id: i64, name: Option<String>) -> Result<i64>;
    // 删除用户提交
    async fn delete_user_submission(&self, id: i64) -> Result<i64>;

    /// 提交附件关联方法
    // 关联文件
    async fn attach_submission_file(&self, submission_id: i64, file_id: i64) -> Result<i64>;
    // 解除关联
    async fn detach_submission_file(&self, submission_id: i64, file_id: i64) -> Result<()>;
    // 列出提交项的附件
    async fn list_submission_files(&self, submission_id: i64) -> Result<Vec<File>>;

    /// 文件管理方法
    // 登记本地文件并写入磁盘，location 必须是尚不存在的路径
    async fn create_local_file(
        &self,
        file: NewFile,
        content: &mut (dyn AsyncRead + Unpin + Send),
        max_size: u64,
    ) -> Result<File>;
    // 登记远程链接文件
    async fn create_remote_file(&self, file: NewFile) -> Result<File>;
    // 通过ID获取文件
    async fn get_file_by_id(&self, file_id: i64) -> Result<Option<File>>;

    /// 用户管理方法
    // 删除用户及其提交、文件、通知、课程成员关系，返回被删除的文件记录
    async fn purge_user(&self, user_id: i64) -> Result<Vec<File>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
