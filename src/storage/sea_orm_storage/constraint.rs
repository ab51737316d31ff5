//! 约束冲突到业务错误的映射
//!
//! 外键和唯一索引的拒绝是调用方可以修正的错误，不应当作服务端故障。

use sea_orm::{DbErr, SqlErr};

use crate::errors::HWSystemError;

/// 插入失败：外键指向不存在的记录为校验错误，唯一索引重复为冲突
pub(crate) fn insert_error(action: &str, err: DbErr) -> HWSystemError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            HWSystemError::validation(format!("{action}失败，引用的记录不存在: {detail}"))
        }
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            HWSystemError::conflict(format!("{action}失败，记录已存在: {detail}"))
        }
        _ => HWSystemError::database_operation(format!("{action}失败: {err}")),
    }
}

/// 删除失败：仍被其他记录引用时为冲突
pub(crate) fn delete_error(action: &str, err: DbErr) -> HWSystemError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            HWSystemError::conflict(format!("{action}失败，仍被其他记录引用: {detail}"))
        }
        _ => HWSystemError::database_operation(format!("{action}失败: {err}")),
    }
}
