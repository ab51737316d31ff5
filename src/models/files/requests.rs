use serde::Deserialize;

/// 登记外部链接文件
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFileLinkRequest {
    pub name: String,
    pub uri: String,
    pub uploader_id: i64,
}
