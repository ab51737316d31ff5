pub mod create;
pub mod delete;
pub mod files;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::files::entities::File;
use crate::models::user_submissions::entities::UserSubmission;
use crate::models::user_submissions::requests::{
    CreateUserSubmissionRequest, UpdateUserSubmissionRequest,
};
use crate::storage::Storage;
use crate::utils::Clock;

pub struct UserSubmissionService {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl UserSubmissionService {
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    // 创建用户提交
    pub async fn create_user_submission(&self, req: CreateUserSubmissionRequest) -> Result<i64> {
        create::create_user_submission(self, req).await
    }

    // 修改显示名称
    pub async fn update_user_submission(
        &self,
        id: i64,
        req: UpdateUserSubmissionRequest,
    ) -> Result<i64> {
        update::update_user_submission(self, id, req).await
    }

    // 删除用户提交
    pub async fn delete_user_submission(&self, id: i64) -> Result<i64> {
        delete::delete_user_submission(self, id).await
    }

    // 列出某提交项下的用户提交
    pub async fn list_user_submissions(&self, submission_id: i64) -> Result<Vec<UserSubmission>> {
        self.storage.list_user_submissions(submission_id).await
    }

    // 关联附件
    pub async fn attach_file(&self, submission_id: i64, file_id: i64) -> Result<i64> {
        files::attach_file(self, submission_id, file_id).await
    }

    // 解除附件关联
    pub async fn detach_file(&self, submission_id: i64, file_id: i64) -> Result<()> {
        files::detach_file(self, submission_id, file_id).await
    }

    // 列出附件
    pub async fn list_files(&self, submission_id: i64) -> Result<Vec<File>> {
        files::list_files(self, submission_id).await
    }
}
