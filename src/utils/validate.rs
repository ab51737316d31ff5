use url::Url;

use crate::errors::{HWSystemError, Result};

/// 校验本地文件名：只能是单个路径分量
pub fn validate_file_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("File name must not be empty");
    }
    if name == "." || name == ".." {
        return Err("File name must not be a relative directory reference");
    }
    if name.contains(['/', '\\', '\0']) {
        return Err("File name must not contain path separators or NUL");
    }
    Ok(())
}

/// 校验远程链接必须是格式正确的绝对 URI
pub fn validate_remote_uri(uri: &str) -> Result<Url> {
    Url::parse(uri).map_err(|e| HWSystemError::invalid_uri(format!("无效的链接 '{uri}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_file_names() {
        assert!(validate_file_name("report.pdf").is_ok());
        assert!(validate_file_name("archive.tar.gz").is_ok());
        assert!(validate_file_name(".hidden").is_ok());
        assert!(validate_file_name("作业 1.docx").is_ok());
    }

    #[test]
    fn test_invalid_file_names() {
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name(".").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("../etc/passwd").is_err());
        assert!(validate_file_name("dir\\file.txt").is_err());
    }

    #[test]
    fn test_remote_uri() {
        assert!(validate_remote_uri("https://example.com/slides.pdf").is_ok());
        assert!(validate_remote_uri("ftp://files.example.com/a.zip").is_ok());

        let err = validate_remote_uri("slides.pdf").unwrap_err();
        assert_eq!(err.code(), "E009");
        assert!(validate_remote_uri("").is_err());
        assert!(validate_remote_uri("http://").is_err());
    }
}
