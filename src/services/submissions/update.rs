use tracing::debug;

use super::{SubmissionService, validate_submission_fields};
use crate::errors::Result;
use crate::models::submissions::entities::SubmissionChanges;
use crate::models::submissions::requests::UpdateSubmissionRequest;

pub async fn update_submission(
    service: &SubmissionService,
    submission_id: i64,
    req: UpdateSubmissionRequest,
) -> Result<i64> {
    let now = service.clock.now();
    let window = validate_submission_fields(
        &req.name,
        &req.deadline,
        req.max_file_size,
        &req.visible_from,
        now,
    )?;

    debug!("更新提交项 {}", submission_id);

    service
        .storage
        .update_submission(
            submission_id,
            SubmissionChanges {
                name: req.name,
                window,
                max_file_size: req.max_file_size,
                updated_at: now,
            },
        )
        .await
}
