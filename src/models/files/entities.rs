use serde::{Deserialize, Serialize};

// 文件存放位置
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileLocality {
    Local,  // 本地托管存储
    Remote, // 外部链接
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    // 文件 ID
    pub id: i64,
    // 显示名称（本地文件冲突时带数字后缀）
    pub name: String,
    // 本地绝对路径或远程 URI
    pub location: String,
    pub locality: FileLocality,
    // 文件大小（以字节为单位），远程文件为 0
    pub file_size: i64,
    // 上传者 ID
    pub uploader_id: i64,
    // 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl File {
    pub fn is_local(&self) -> bool {
        self.locality == FileLocality::Local
    }
}

#[derive(Debug, Clone)]
pub struct NewFile {
    pub name: String,
    pub location: String,
    pub uploader_id: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
