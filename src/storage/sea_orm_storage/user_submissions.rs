//! 用户提交与附件关联存储操作

use super::SeaOrmStorage;
use super::constraint::insert_error;
use super::transaction::finish;
use crate::entity::files::{Column as FileColumn, Entity as Files};
use crate::entity::submission_files::{
    ActiveModel as SubmissionFileActiveModel, Column as SubmissionFileColumn,
    Entity as SubmissionFiles,
};
use crate::entity::user_submissions::{ActiveModel, Column, Entity as UserSubmissions};
use crate::errors::{HWSystemError, Result};
use crate::models::{
    files::entities::File,
    user_submissions::entities::{NewUserSubmission, UserSubmission},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

impl SeaOrmStorage {
    /// 创建用户提交
    pub async fn create_user_submission_impl(
        &self,
        user_submission: NewUserSubmission,
    ) -> Result<i64> {
        let model = ActiveModel {
            name: Set(user_submission.name),
            submitter_id: Set(user_submission.submitter_id),
            submission_id: Set(user_submission.submission_id),
            ignores_submission_deadline: Set(user_submission.ignores_submission_deadline),
            submission_time: Set(user_submission.submission_time.timestamp()),
            ..Default::default()
        };

        let txn = self.begin().await?;
        let result = model
            .insert(&txn)
            .await
            .map(|m| m.id)
            .map_err(|e| insert_error("创建用户提交", e));
        let id = finish(txn, result).await?;

        info!(
            "用户 {} 的提交 {} 已创建",
            user_submission.submitter_id, id
        );
        Ok(id)
    }

    /// 通过 ID 获取用户提交
    pub async fn get_user_submission_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<UserSubmission>> {
        let result = UserSubmissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("查询用户提交失败: {e}")))?;

        Ok(result.map(|m| m.into_user_submission()))
    }

    /// 列出某提交项下的用户提交
    pub async fn list_user_submissions_impl(
        &self,
        submission_id: i64,
    ) -> Result<Vec<UserSubmission>> {
        let results = UserSubmissions::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .order_by_asc(Column::SubmissionTime)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("查询用户提交列表失败: {e}")))?;

        Ok(results
            .into_iter()
            .map(|m| m.into_user_submission())
            .collect())
    }

    /// 修改用户提交的显示名称，不重新校验截止时间
    pub async fn rename_user_submission_impl(&self, id: i64, name: Option<String>) -> Result<i64> {
        let txn = self.begin().await?;

        let result: Result<i64> = async {
            let existing = UserSubmissions::find_by_id(id)
                .one(&txn)
                .await
                .map_err(|e| HWSystemError::database_operation(format!("查询用户提交失败: {e}")))?
                .ok_or_else(|| HWSystemError::not_found(format!("用户提交不存在: {id}")))?;

            let mut model: ActiveModel = existing.into();
            model.name = Set(name);
            model
                .update(&txn)
                .await
                .map_err(|e| HWSystemError::database_operation(format!("更新用户提交失败: {e}")))?;

            Ok(id)
        }
        .await;

        finish(txn, result).await
    }

    /// 删除用户提交
    pub async fn delete_user_submission_impl(&self, id: i64) -> Result<i64> {
        if self.get_user_submission_by_id_impl(id).await?.is_none() {
            return Err(HWSystemError::not_found(format!("用户提交不存在: {id}")));
        }

        let txn = self.begin().await?;
        let result = UserSubmissions::delete_by_id(id)
            .exec(&txn)
            .await
            .map(|_| id)
            .map_err(|e| HWSystemError::database_operation(format!("删除用户提交失败: {e}")));
        let id = finish(txn, result).await?;

        info!("用户提交 {} 已删除", id);
        Ok(id)
    }

    /// 关联附件，外键是唯一的存在性校验
    pub async fn attach_submission_file_impl(
        &self,
        submission_id: i64,
        file_id: i64,
    ) -> Result<i64> {
        let model = SubmissionFileActiveModel {
            submission_id: Set(submission_id),
            file_id: Set(file_id),
            ..Default::default()
        };

        let txn = self.begin().await?;
        let result = model
            .insert(&txn)
            .await
            .map(|m| m.id)
            .map_err(|e| insert_error("创建附件关联", e));

        finish(txn, result).await
    }

    /// 解除附件关联
    pub async fn detach_submission_file_impl(
        &self,
        submission_id: i64,
        file_id: i64,
    ) -> Result<()> {
        let txn = self.begin().await?;
        let result = SubmissionFiles::delete_many()
            .filter(SubmissionFileColumn::SubmissionId.eq(submission_id))
            .filter(SubmissionFileColumn::FileId.eq(file_id))
            .exec(&txn)
            .await
            .map(|_| ())
            .map_err(|e| HWSystemError::database_operation(format!("删除附件关联失败: {e}")));

        finish(txn, result).await
    }

    /// 列出提交项的附件
    pub async fn list_submission_files_impl(&self, submission_id: i64) -> Result<Vec<File>> {
        let file_ids: Vec<i64> = SubmissionFiles::find()
            .filter(SubmissionFileColumn::SubmissionId.eq(submission_id))
            .all(&self.db)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("查询提交附件失败: {e}")))?
            .into_iter()
            .map(|m| m.file_id)
            .collect();

        if file_ids.is_empty() {
            return Ok(vec![]);
        }

        let files = Files::find()
            .filter(FileColumn::Id.is_in(file_ids))
            .order_by_asc(FileColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("查询文件信息失败: {e}")))?;

        Ok(files.into_iter().map(|m| m.into_file()).collect())
    }
}
