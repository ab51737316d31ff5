use tracing::debug;

use super::{SubmissionService, validate_submission_fields};
use crate::errors::Result;
use crate::models::submissions::entities::NewSubmission;
use crate::models::submissions::requests::CreateSubmissionRequest;

pub async fn create_submission(
    service: &SubmissionService,
    req: CreateSubmissionRequest,
) -> Result<i64> {
    let now = service.clock.now();
    let window = validate_submission_fields(
        &req.name,
        &req.deadline,
        req.max_file_size,
        &req.visible_from,
        now,
    )?;

    debug!("创建课程 {} 的提交项 {}", req.course_id, req.name);

    service
        .storage
        .create_submission(NewSubmission {
            course_id: req.course_id,
            name: req.name,
            window,
            max_file_size: req.max_file_size,
            created_at: now,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, clock, memory_storage, seed_course};

    fn request(course_id: i64, deadline: &str) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            name: "HW1".to_string(),
            deadline: deadline.to_string(),
            course_id,
            max_file_size: 1_048_576,
            visible_from: "2030-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_without_deadline() {
        let storage = memory_storage().await;
        let course_id = seed_course(&storage, "Algorithms").await;
        let service = SubmissionService::new(storage.clone(), clock());

        let id = service.create_submission(request(course_id, "")).await.unwrap();
        assert!(id > 0);

        let stored = service.get_submission(id).await.unwrap();
        assert_eq!(stored.name, "HW1");
        assert_eq!(stored.course_id, course_id);
        assert_eq!(stored.deadline, None);
        assert_eq!(stored.visible_from, at("2030-01-01T00:00:00Z"));
        assert_eq!(stored.max_file_size, 1_048_576);
    }

    #[tokio::test]
    async fn test_create_with_deadline() {
        let storage = memory_storage().await;
        let course_id = seed_course(&storage, "Algorithms").await;
        let service = SubmissionService::new(storage.clone(), clock());

        let id = service
            .create_submission(request(course_id, "2030-02-01T12:00:00Z"))
            .await
            .unwrap();

        let stored = service.get_submission(id).await.unwrap();
        assert_eq!(stored.deadline, Some(at("2030-02-01T12:00:00Z")));
    }

    #[tokio::test]
    async fn test_past_deadline_writes_nothing() {
        let storage = memory_storage().await;
        let course_id = seed_course(&storage, "Algorithms").await;
        let service = SubmissionService::new(storage.clone(), clock());

        let err = service
            .create_submission(request(course_id, "2020-01-01T00:00:00Z"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");

        let listed = service.list_course_submissions(course_id).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_course_is_rejected_by_store() {
        let storage = memory_storage().await;
        let service = SubmissionService::new(storage.clone(), clock());

        let err = service.create_submission(request(404, "")).await.unwrap_err();
        assert_eq!(err.code(), "E005");
    }
}
