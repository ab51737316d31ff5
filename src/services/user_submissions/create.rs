use tracing::{debug, warn};

use super::UserSubmissionService;
use crate::errors::{HWSystemError, Result};
use crate::models::user_submissions::entities::{NewUserSubmission, display_name};
use crate::models::user_submissions::requests::CreateUserSubmissionRequest;

pub async fn create_user_submission(
    service: &UserSubmissionService,
    req: CreateUserSubmissionRequest,
) -> Result<i64> {
    let now = service.clock.now();

    if !req.ignores_submission_deadline {
        let submission = service
            .storage
            .get_submission_by_id(req.submission_id)
            .await?
            .ok_or_else(|| {
                HWSystemError::not_found(format!("提交项不存在: {}", req.submission_id))
            })?;

        if let Some(deadline) = submission.deadline
            && deadline < now
        {
            warn!(
                "用户 {} 提交被拒绝，提交项 {} 已于 {} 截止",
                req.submitter_id, req.submission_id, deadline
            );
            return Err(HWSystemError::deadline_passed(format!(
                "提交项 {} 已截止",
                req.submission_id
            )));
        }
    } else {
        debug!(
            "用户 {} 的提交豁免截止时间检查: 提交项 {}",
            req.submitter_id, req.submission_id
        );
    }

    service
        .storage
        .create_user_submission(NewUserSubmission {
            name: display_name(&req.name),
            submitter_id: req.submitter_id,
            submission_id: req.submission_id,
            ignores_submission_deadline: req.ignores_submission_deadline,
            submission_time: now,
        })
        .await
}
