use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSubmission {
    pub id: i64,
    // 显示名称，None 表示未设置
    pub name: Option<String>,
    pub submitter_id: i64,
    pub submission_id: i64,
    // 是否豁免提交项的截止时间
    pub ignores_submission_deadline: bool,
    pub submission_time: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUserSubmission {
    pub name: Option<String>,
    pub submitter_id: i64,
    pub submission_id: i64,
    pub ignores_submission_deadline: bool,
    pub submission_time: DateTime<Utc>,
}

/// 空字符串与未设置同义
pub fn display_name(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
