use serde::Deserialize;

/// 创建提交项请求，时间字段为 RFC 3339 字符串
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub name: String,
    // 空字符串表示不设截止时间
    #[serde(default)]
    pub deadline: String,
    pub course_id: i64,
    pub max_file_size: i64,
    pub visible_from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSubmissionRequest {
    pub name: String,
    #[serde(default)]
    pub deadline: String,
    pub max_file_size: i64,
    pub visible_from: String,
}
