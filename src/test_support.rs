//! 测试辅助：每个测试一个独立的内存 SQLite 存储

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, Set};

use crate::config::DatabaseConfig;
use crate::entity::prelude::{
    CourseActiveModel, NotificationActiveModel, UserActiveModel, UserCourseActiveModel,
};
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::ManualClock;

pub(crate) const NOW: &str = "2026-01-01T00:00:00Z";

pub(crate) fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid test timestamp")
        .with_timezone(&Utc)
}

pub(crate) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(at(NOW)))
}

pub(crate) async fn memory_storage() -> Arc<SeaOrmStorage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    Arc::new(
        SeaOrmStorage::connect(&config)
            .await
            .expect("in-memory storage"),
    )
}

pub(crate) async fn seed_user(storage: &SeaOrmStorage, username: &str) -> i64 {
    UserActiveModel {
        username: Set(username.to_string()),
        display_name: Set(None),
        created_at: Set(at(NOW).timestamp()),
        ..Default::default()
    }
    .insert(storage.connection())
    .await
    .expect("seed user")
    .id
}

pub(crate) async fn seed_course(storage: &SeaOrmStorage, name: &str) -> i64 {
    CourseActiveModel {
        name: Set(name.to_string()),
        created_at: Set(at(NOW).timestamp()),
        ..Default::default()
    }
    .insert(storage.connection())
    .await
    .expect("seed course")
    .id
}

pub(crate) async fn seed_membership(storage: &SeaOrmStorage, user_id: i64, course_id: i64) -> i64 {
    UserCourseActiveModel {
        user_id: Set(user_id),
        course_id: Set(course_id),
        role: Set("student".to_string()),
        joined_at: Set(at(NOW).timestamp()),
        ..Default::default()
    }
    .insert(storage.connection())
    .await
    .expect("seed membership")
    .id
}

pub(crate) async fn seed_notification(storage: &SeaOrmStorage, user_id: i64) -> i64 {
    NotificationActiveModel {
        user_id: Set(user_id),
        title: Set("作业已批改".to_string()),
        content: Set(None),
        is_read: Set(false),
        created_at: Set(at(NOW).timestamp()),
        ..Default::default()
    }
    .insert(storage.connection())
    .await
    .expect("seed notification")
    .id
}
