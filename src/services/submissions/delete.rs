use super::SubmissionService;
use crate::errors::Result;

pub async fn delete_submission(service: &SubmissionService, submission_id: i64) -> Result<i64> {
    service.storage.delete_submission(submission_id).await
}
