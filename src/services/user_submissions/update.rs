use super::UserSubmissionService;
use crate::errors::Result;
use crate::models::user_submissions::entities::display_name;
use crate::models::user_submissions::requests::UpdateUserSubmissionRequest;

/// 只改名称，与截止时间无关
pub async fn update_user_submission(
    service: &UserSubmissionService,
    id: i64,
    req: UpdateUserSubmissionRequest,
) -> Result<i64> {
    service
        .storage
        .rename_user_submission(id, display_name(&req.name))
        .await
}
