//! 事务收尾

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::{error, warn};

use super::SeaOrmStorage;
use crate::errors::{HWSystemError, Result};

impl SeaOrmStorage {
    /// 开启事务
    pub(crate) async fn begin(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin()
            .await
            .map_err(|e| HWSystemError::database_operation(format!("开启事务失败: {e}")))
    }
}

/// 成功则提交，失败则回滚并原样返回错误
pub(crate) async fn finish<T>(txn: DatabaseTransaction, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            txn.commit()
                .await
                .map_err(|e| HWSystemError::database_operation(format!("提交事务失败: {e}")))?;
            Ok(value)
        }
        Err(err) => Err(rollback(txn, err).await),
    }
}

/// 回滚事务；回滚失败时两个错误合并为 FatalTransaction
pub(crate) async fn rollback(txn: DatabaseTransaction, err: HWSystemError) -> HWSystemError {
    match txn.rollback().await {
        Ok(()) => {
            warn!("事务已回滚: {}", err);
            err
        }
        Err(rollback_err) => {
            let fatal = HWSystemError::fatal_transaction(format!(
                "{}; 回滚失败: {rollback_err}",
                err.format_simple()
            ));
            error!("{}", fatal);
            fatal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::prelude::{CourseActiveModel, Courses};
    use crate::test_support::memory_storage;
    use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, Set};

    async fn insert_course(txn: &DatabaseTransaction, name: &str) {
        CourseActiveModel {
            name: Set(name.to_string()),
            created_at: Set(0),
            ..Default::default()
        }
        .insert(txn)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_finish_commits_or_rolls_back() {
        let storage = memory_storage().await;

        let txn = storage.begin().await.unwrap();
        insert_course(&txn, "Discarded").await;
        let err = finish::<()>(txn, Err(HWSystemError::validation("bad input")))
            .await
            .unwrap_err();
        assert_eq!(err, HWSystemError::validation("bad input"));
        assert_eq!(Courses::find().count(storage.connection()).await.unwrap(), 0);

        let txn = storage.begin().await.unwrap();
        insert_course(&txn, "Kept").await;
        finish(txn, Ok(())).await.unwrap();
        assert_eq!(Courses::find().count(storage.connection()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_rollback_is_fatal() {
        let storage = memory_storage().await;

        // 事务已在 SQLite 侧结束，再次回滚必然失败
        let txn = storage.begin().await.unwrap();
        txn.execute_unprepared("ROLLBACK").await.unwrap();

        let err = rollback(txn, HWSystemError::database_operation("insert failed")).await;
        assert!(err.is_fatal());
        assert!(err.message().contains("insert failed"));
    }
}
