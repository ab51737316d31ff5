use super::SubmissionService;
use crate::errors::{HWSystemError, Result};
use crate::models::submissions::entities::Submission;

pub async fn get_submission(service: &SubmissionService, submission_id: i64) -> Result<Submission> {
    service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| HWSystemError::not_found(format!("提交项不存在: {submission_id}")))
}

pub async fn list_course_submissions(
    service: &SubmissionService,
    course_id: i64,
) -> Result<Vec<Submission>> {
    service.storage.list_course_submissions(course_id).await
}
