use super::UserSubmissionService;
use crate::errors::Result;

pub async fn delete_user_submission(service: &UserSubmissionService, id: i64) -> Result<i64> {
    service.storage.delete_user_submission(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::models::user_submissions::requests::CreateUserSubmissionRequest;
    use crate::services::SubmissionService;
    use crate::test_support::{NOW, clock, memory_storage, seed_course, seed_user};

    #[tokio::test]
    async fn test_delete_user_submission() {
        let storage = memory_storage().await;
        let course_id = seed_course(&storage, "OS").await;
        let student = seed_user(&storage, "frank").await;

        let submission_id = SubmissionService::new(storage.clone(), clock())
            .create_submission(CreateSubmissionRequest {
                name: "Lab 2".to_string(),
                deadline: String::new(),
                course_id,
                max_file_size: 0,
                visible_from: NOW.to_string(),
            })
            .await
            .unwrap();

        let service = UserSubmissionService::new(storage.clone(), clock());
        let id = service
            .create_user_submission(CreateUserSubmissionRequest {
                name: String::new(),
                submitter_id: student,
                submission_id,
                ignores_submission_deadline: false,
            })
            .await
            .unwrap();

        assert_eq!(service.delete_user_submission(id).await.unwrap(), id);
        assert!(service.list_user_submissions(submission_id).await.unwrap().is_empty());
        assert_eq!(service.delete_user_submission(id).await.unwrap_err().code(), "E006");
    }
}
