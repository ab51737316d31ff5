use chrono::{DateTime, Utc};

use crate::errors::{HWSystemError, Result};

/// 解析边界上传入的 RFC 3339 时间戳
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| HWSystemError::date_parse(format!("无效的时间格式 '{input}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utc_and_offset() {
        let utc = parse_timestamp("2030-01-01T00:00:00Z").unwrap();
        let offset = parse_timestamp("2030-01-01T08:00:00+08:00").unwrap();
        assert_eq!(utc, offset);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "",
            "2030-01-01",
            "tomorrow",
            "2030-13-01T00:00:00Z",
            " 2030-01-01T00:00:00Z ",
        ] {
            let err = parse_timestamp(input).unwrap_err();
            assert_eq!(err.code(), "E007", "input: {input}");
        }
    }
}
