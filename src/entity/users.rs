//! 用户实体
//!
//! 账户管理不在本服务内，这里只保留清理账户和外键所需的字段。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_courses::Entity")]
    UserCourses,
    #[sea_orm(has_many = "super::user_submissions::Entity")]
    UserSubmissions,
    #[sea_orm(has_many = "super::files::Entity")]
    Files,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::user_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserCourses.def()
    }
}

impl Related<super::user_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSubmissions.def()
    }
}

impl Related<super::files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
