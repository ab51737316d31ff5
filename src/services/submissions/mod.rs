//! 提交项生命周期
//!
//! 校验在开启事务之前完成，写操作由存储层包在事务里。

pub mod create;
pub mod delete;
pub mod detail;
pub mod update;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::errors::{HWSystemError, Result};
use crate::models::submissions::entities::{Submission, SubmissionWindow};
use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateSubmissionRequest};
use crate::storage::Storage;
use crate::utils::{Clock, parse_timestamp};

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// 创建提交项
    pub async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<i64> {
        create::create_submission(self, req).await
    }

    /// 编辑提交项
    pub async fn update_submission(
        &self,
        submission_id: i64,
        req: UpdateSubmissionRequest,
    ) -> Result<i64> {
        update::update_submission(self, submission_id, req).await
    }

    /// 删除提交项
    pub async fn delete_submission(&self, submission_id: i64) -> Result<i64> {
        delete::delete_submission(self, submission_id).await
    }

    /// 获取提交项详情
    pub async fn get_submission(&self, submission_id: i64) -> Result<Submission> {
        detail::get_submission(self, submission_id).await
    }

    /// 列出课程下的提交项
    pub async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<Submission>> {
        detail::list_course_submissions(self, course_id).await
    }
}

/// 校验提交项字段并解析时间窗口
///
/// 顺序固定：名称、可见时间、截止时间、附件大小。名称为空时不会解析任何时间。
pub fn validate_submission_fields(
    name: &str,
    deadline: &str,
    max_file_size: i64,
    visible_from: &str,
    now: DateTime<Utc>,
) -> Result<SubmissionWindow> {
    if name.is_empty() {
        return Err(HWSystemError::validation("提交项名称不能为空"));
    }

    let visible_from = parse_timestamp(visible_from)?;
    if visible_from < now {
        return Err(HWSystemError::validation("可见时间不能早于当前时间"));
    }

    let deadline = if deadline.is_empty() {
        None
    } else {
        let deadline = parse_timestamp(deadline)?;
        if deadline < now {
            return Err(HWSystemError::validation("截止时间不能早于当前时间"));
        }
        if deadline < visible_from {
            return Err(HWSystemError::validation("截止时间不能早于可见时间"));
        }
        Some(deadline)
    };

    if max_file_size < 0 {
        return Err(HWSystemError::validation("附件大小上限不能为负数"));
    }

    Ok(SubmissionWindow {
        deadline,
        visible_from,
    })
}
