use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    // 唯一 ID
    pub id: i64,
    // 所属课程 ID
    pub course_id: i64,
    // 提交项名称
    pub name: String,
    // 截止时间，None 表示不设截止
    pub deadline: Option<DateTime<Utc>>,
    // 对学生可见的起始时间
    pub visible_from: DateTime<Utc>,
    // 单个附件的最大字节数
    pub max_file_size: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 校验通过后的提交项时间窗口
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionWindow {
    pub deadline: Option<DateTime<Utc>>,
    pub visible_from: DateTime<Utc>,
}

/// 写入存储层的新提交项
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub course_id: i64,
    pub name: String,
    pub window: SubmissionWindow,
    pub max_file_size: i64,
    pub created_at: DateTime<Utc>,
}

/// 编辑提交项时整体替换的四个字段
#[derive(Debug, Clone)]
pub struct SubmissionChanges {
    pub name: String,
    pub window: SubmissionWindow,
    pub max_file_size: i64,
    pub updated_at: DateTime<Utc>,
}
