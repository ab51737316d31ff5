//! 提交项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub deadline: Option<i64>,
    pub visible_from: i64,
    pub max_file_size: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::user_submissions::Entity")]
    UserSubmissions,
    #[sea_orm(has_many = "super::submission_files::Entity")]
    SubmissionFiles,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserSubmissions.def()
    }
}

impl Related<super::submission_files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubmissionFiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::Submission;
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            course_id: self.course_id,
            name: self.name,
            deadline: self
                .deadline
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            visible_from: DateTime::<Utc>::from_timestamp(self.visible_from, 0)
                .unwrap_or_default(),
            max_file_size: self.max_file_size,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
