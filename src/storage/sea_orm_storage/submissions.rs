//! 提交项存储操作

use super::SeaOrmStorage;
use super::constraint::{delete_error, insert_error};
use super::transaction::finish;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{HWSystemError, Result};
use crate::models::submissions::entities::{NewSubmission, Submission, SubmissionChanges};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

impl SeaOrmStorage {
    /// 创建提交项
    pub async fn create_submission_impl(&self, submission: NewSubmission) -> Result<i64> {
        let now = submission.created_at.timestamp();

        let model = ActiveModel {
            course_id: Set(submission.course_id),
            name: Set(submission.name),
            deadline: Set(submission.window.deadline.map(|d| d.timestamp())),
            visible_from: Set(submission.window.visible_from.timestamp()),
            max_file_size: Set(submission.max_file_size),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.begin().await?;
        let result = model
            .insert(&txn)
            .await
            .map(|m| m.id)
            .map_err(|e| insert_error("创建提交项", e));
        let id = finish(txn, result).await?;

        info!("提交项 {} 已创建", id);
        Ok(id)
    }

    /// 通过 ID 获取提交项
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("查询提交项失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 列出课程下的提交项
    pub async fn list_course_submissions_impl(&self, course_id: i64) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::VisibleFrom)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("查询提交项列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 更新提交项（在事务内读取并整体替换可变字段）
    pub async fn update_submission_impl(
        &self,
        submission_id: i64,
        changes: SubmissionChanges,
    ) -> Result<i64> {
        let txn = self.begin().await?;

        let result: Result<i64> = async {
            let existing = Submissions::find_by_id(submission_id)
                .one(&txn)
                .await
                .map_err(|e| HWSystemError::database_operation(format!("查询提交项失败: {e}")))?
                .ok_or_else(|| {
                    HWSystemError::not_found(format!("提交项不存在: {submission_id}"))
                })?;

            let mut model: ActiveModel = existing.into();
            model.name = Set(changes.name);
            model.deadline = Set(changes.window.deadline.map(|d| d.timestamp()));
            model.visible_from = Set(changes.window.visible_from.timestamp());
            model.max_file_size = Set(changes.max_file_size);
            model.updated_at = Set(changes.updated_at.timestamp());

            model
                .update(&txn)
                .await
                .map_err(|e| HWSystemError::database_operation(format!("更新提交项失败: {e}")))?;

            Ok(submission_id)
        }
        .await;

        let id = finish(txn, result).await?;
        info!("提交项 {} 已更新", id);
        Ok(id)
    }

    /// 删除提交项
    ///
    /// 不会级联删除附件关联，仍有附件时由外键约束拒绝。
    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<i64> {
        if self.get_submission_by_id_impl(submission_id).await?.is_none() {
            return Err(HWSystemError::not_found(format!(
                "提交项不存在: {submission_id}"
            )));
        }

        let txn = self.begin().await?;
        let result = Submissions::delete_by_id(submission_id)
            .exec(&txn)
            .await
            .map(|_| submission_id)
            .map_err(|e| delete_error("删除提交项", e));
        let id = finish(txn, result).await?;

        info!("提交项 {} 已删除", id);
        Ok(id)
    }
}
