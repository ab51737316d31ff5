//! 文件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub location: String,
    pub is_local: bool,
    pub file_size: i64,
    pub uploader_id: i64,
    pub uploaded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploaderId",
        to = "super::users::Column::Id"
    )]
    Uploader,
    #[sea_orm(has_many = "super::submission_files::Entity")]
    SubmissionFiles,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
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
    pub fn into_file(self) -> crate::models::files::entities::File {
        use crate::models::files::entities::{File, FileLocality};
        use chrono::{DateTime, Utc};

        File {
            id: self.id,
            name: self.name,
            location: self.location,
            locality: if self.is_local {
                FileLocality::Local
            } else {
                FileLocality::Remote
            },
            file_size: self.file_size,
            uploader_id: self.uploader_id,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
        }
    }
}
