//! 提交项附件关联
//!
//! 写入前不检查提交项和文件是否存在，由外键约束兜底。

use tracing::debug;

use super::UserSubmissionService;
use crate::errors::Result;
use crate::models::files::entities::File;

pub async fn attach_file(
    service: &UserSubmissionService,
    submission_id: i64,
    file_id: i64,
) -> Result<i64> {
    debug!("关联文件 {} 到提交项 {}", file_id, submission_id);
    service
        .storage
        .attach_submission_file(submission_id, file_id)
        .await
}

pub async fn detach_file(
    service: &UserSubmissionService,
    submission_id: i64,
    file_id: i64,
) -> Result<()> {
    debug!("解除文件 {} 与提交项 {} 的关联", file_id, submission_id);
    service
        .storage
        .detach_submission_file(submission_id, file_id)
        .await
}

pub async fn list_files(service: &UserSubmissionService, submission_id: i64) -> Result<Vec<File>> {
    service.storage.list_submission_files(submission_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::files::entities::NewFile;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::services::SubmissionService;
    use crate::storage::Storage;
    use crate::test_support::{NOW, at, clock, memory_storage, seed_course, seed_user};

    #[tokio::test]
    async fn test_attach_list_detach() {
        let storage = memory_storage().await;
        let course_id = seed_course(&storage, "Graphics").await;
        let instructor = seed_user(&storage, "grace").await;

        let submissions = SubmissionService::new(storage.clone(), clock());
        let submission_id = submissions
            .create_submission(CreateSubmissionRequest {
                name: "Assignment".to_string(),
                deadline: String::new(),
                course_id,
                max_file_size: 0,
                visible_from: NOW.to_string(),
            })
            .await
            .unwrap();

        let file = storage
            .create_remote_file(NewFile {
                name: "handout".to_string(),
                location: "https://example.com/handout.pdf".to_string(),
                uploader_id: instructor,
                uploaded_at: at(NOW),
            })
            .await
            .unwrap();

        let service = UserSubmissionService::new(storage.clone(), clock());
        service.attach_file(submission_id, file.id).await.unwrap();

        let files = service.list_files(submission_id).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].id, file.id);

        // 重复关联违反唯一索引
        assert_eq!(
            service.attach_file(submission_id, file.id).await.unwrap_err().code(),
            "E011"
        );

        // 有附件时不能删除提交项
        assert_eq!(
            submissions.delete_submission(submission_id).await.unwrap_err().code(),
            "E011"
        );

        service.detach_file(submission_id, file.id).await.unwrap();
        assert!(service.list_files(submission_id).await.unwrap().is_empty());
        assert_eq!(submissions.delete_submission(submission_id).await.unwrap(), submission_id);
    }

    #[tokio::test]
    async fn test_attach_unknown_file() {
        let storage = memory_storage().await;
        let course_id = seed_course(&storage, "Graphics").await;
        let submission_id = SubmissionService::new(storage.clone(), clock())
            .create_submission(CreateSubmissionRequest {
                name: "Assignment".to_string(),
                deadline: String::new(),
                course_id,
                max_file_size: 0,
                visible_from: NOW.to_string(),
            })
            .await
            .unwrap();

        let service = UserSubmissionService::new(storage.clone(), clock());
        let err = service.attach_file(submission_id, 999).await.unwrap_err();
        assert_eq!(err.code(), "E005");

        let err = service.attach_file(999, 999).await.unwrap_err();
        assert_eq!(err.code(), "E005");
    }
}
