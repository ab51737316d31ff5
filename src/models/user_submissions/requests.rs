use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserSubmissionRequest {
    #[serde(default)]
    pub name: String,
    pub submitter_id: i64,
    pub submission_id: i64,
    #[serde(default)]
    pub ignores_submission_deadline: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserSubmissionRequest {
    #[serde(default)]
    pub name: String,
}
