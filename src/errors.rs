//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_hwsystem_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum HWSystemError {
            $($variant(String),)*
        }

        impl HWSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(HWSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(HWSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(HWSystemError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl HWSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        HWSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_hwsystem_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    DateParse("E007", "Date Parse Error"),
    DeadlinePassed("E008", "Deadline Passed"),
    InvalidUri("E009", "Invalid URI"),
    FatalTransaction("E010", "Fatal Transaction Error"),
    Conflict("E011", "Conflict"),
}

impl HWSystemError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 写入失败且回滚也失败，存储状态未知，调用方不得重试
    pub fn is_fatal(&self) -> bool {
        matches!(self, HWSystemError::FatalTransaction(_))
    }
}

impl fmt::Display for HWSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for HWSystemError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for HWSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        HWSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for HWSystemError {
    fn from(err: std::io::Error) -> Self {
        HWSystemError::FileOperation(err.to_string())
    }
}

impl From<chrono::ParseError> for HWSystemError {
    fn from(err: chrono::ParseError) -> Self {
        HWSystemError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HWSystemError>;
