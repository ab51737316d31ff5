//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod constraint;
mod files;
mod submissions;
mod transaction;
mod user_submissions;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{HWSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| HWSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 底层连接，供需要直接访问实体的代码使用
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// SQLite 专用连接（WAL + pragma 优化，开启外键约束）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| HWSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存数据库每个连接各自独立，只能用单连接
        let max_connections = if in_memory { 1 } else { config.pool_size };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(300))
            })
            .max_lifetime(if in_memory {
                None
            } else {
                Some(Duration::from_secs(1800))
            })
            .connect_with(opt)
            .await
            .map_err(|e| HWSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| HWSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(HWSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    files::entities::{File, NewFile},
    submissions::entities::{NewSubmission, Submission, SubmissionChanges},
    user_submissions::entities::{NewUserSubmission, UserSubmission},
};
use crate::storage::Storage;
use async_trait::async_trait;
use tokio::io::AsyncRead;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 提交项模块
    async fn create_submission(&self, submission: NewSubmission) -> Result<i64> {
        self.create_submission_impl(submission).await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<Submission>> {
        self.list_course_submissions_impl(course_id).await
    }

    async fn update_submission(
        &self,
        submission_id: i64,
        changes: SubmissionChanges,
    ) -> Result<i64> {
        self.update_submission_impl(submission_id, changes).await
    }

    async fn delete_submission(&self, submission_id: i64) -> Result<i64> {
        self.delete_submission_impl(submission_id).await
    }

    // 用户提交模块
    async fn create_user_submission(&self, user_submission: NewUserSubmission) -> Result<i64> {
        self.create_user_submission_impl(user_submission).await
    }

    async fn get_user_submission_by_id(&self, id: i64) -> Result<Option<UserSubmission>> {
        self.get_user_submission_by_id_impl(id).await
    }

    async fn list_user_submissions(&self, submission_id: i64) -> Result<Vec<UserSubmission>> {
        self.list_user_submissions_impl(submission_id).await
    }

    async fn rename_user_submission(&self, id: i64, name: Option<String>) -> Result<i64> {
        self.rename_user_submission_impl(id, name).await
    }

    async fn delete_user_submission(&self, id: i64) -> Result<i64> {
        self.delete_user_submission_impl(id).await
    }

    // 附件关联模块
    async fn attach_submission_file(&self, submission_id: i64, file_id: i64) -> Result<i64> {
        self.attach_submission_file_impl(submission_id, file_id)
            .await
    }

    async fn detach_submission_file(&self, submission_id: i64, file_id: i64) -> Result<()> {
        self.detach_submission_file_impl(submission_id, file_id)
            .await
    }

    async fn list_submission_files(&self, submission_id: i64) -> Result<Vec<File>> {
        self.list_submission_files_impl(submission_id).await
    }

    // 文件模块
    async fn create_local_file(
        &self,
        file: NewFile,
        content: &mut (dyn AsyncRead + Unpin + Send),
        max_size: u64,
    ) -> Result<File> {
        self.create_local_file_impl(file, content, max_size).await
    }

    async fn create_remote_file(&self, file: NewFile) -> Result<File> {
        self.create_remote_file_impl(file).await
    }

    async fn get_file_by_id(&self, file_id: i64) -> Result<Option<File>> {
        self.get_file_by_id_impl(file_id).await
    }

    // 用户模块
    async fn purge_user(&self, user_id: i64) -> Result<Vec<File>> {
        self.purge_user_impl(user_id).await
    }
}
