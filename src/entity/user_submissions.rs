//! 用户提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Option<String>,
    pub submitter_id: i64,
    pub submission_id: i64,
    pub ignores_submission_deadline: bool,
    pub submission_time: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SubmitterId",
        to = "super::users::Column::Id"
    )]
    Submitter,
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submitter.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user_submission(
        self,
    ) -> crate::models::user_submissions::entities::UserSubmission {
        use crate::models::user_submissions::entities::UserSubmission;
        use chrono::{DateTime, Utc};

        UserSubmission {
            id: self.id,
            name: self.name,
            submitter_id: self.submitter_id,
            submission_id: self.submission_id,
            ignores_submission_deadline: self.ignores_submission_deadline,
            submission_time: DateTime::<Utc>::from_timestamp(self.submission_time, 0)
                .unwrap_or_default(),
        }
    }
}
