use tracing::{info, warn};

use super::UserService;
use crate::errors::Result;

/// 数据库事务提交后再清理磁盘，清理失败只记录日志
pub async fn delete_user(service: &UserService, user_id: i64) -> Result<()> {
    let files = service.storage.purge_user(user_id).await?;

    let mut removed = 0usize;
    for file in files.iter().filter(|f| f.is_local()) {
        match tokio::fs::remove_file(&file.location).await {
            Ok(()) => removed += 1,
            Err(e) => warn!("删除用户 {} 的文件 {} 失败: {e}", user_id, file.location),
        }
    }

    info!("用户 {} 的本地文件已清理 {} 个", user_id, removed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;
    use crate::entity::prelude::{Notifications, UserCourses, Users};
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::models::user_submissions::requests::CreateUserSubmissionRequest;
    use crate::services::{FileService, SubmissionService, UserSubmissionService};
    use crate::services::files::FileSource;
    use crate::storage::Storage;
    use crate::test_support::{
        NOW, clock, memory_storage, seed_course, seed_membership, seed_notification, seed_user,
    };
    use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_purge_removes_everything_owned_by_user() {
        let dir = tempfile::tempdir().unwrap();
        let storage = memory_storage().await;
        let clock = clock();

        let course_id = seed_course(&storage, "Distributed Systems").await;
        let student = seed_user(&storage, "heidi").await;
        let other = seed_user(&storage, "ivan").await;
        seed_membership(&storage, student, course_id).await;
        seed_membership(&storage, other, course_id).await;
        seed_notification(&storage, student).await;
        seed_notification(&storage, other).await;

        let submission_id = SubmissionService::new(storage.clone(), clock.clone())
            .create_submission(CreateSubmissionRequest {
                name: "Raft".to_string(),
                deadline: String::new(),
                course_id,
                max_file_size: 0,
                visible_from: NOW.to_string(),
            })
            .await
            .unwrap();

        let user_submissions = UserSubmissionService::new(storage.clone(), clock.clone());
        for submitter_id in [student, other] {
            user_submissions
                .create_user_submission(CreateUserSubmissionRequest {
                    name: String::new(),
                    submitter_id,
                    submission_id,
                    ignores_submission_deadline: false,
                })
                .await
                .unwrap();
        }

        let files = FileService::new(
            storage.clone(),
            clock.clone(),
            &UploadConfig {
                dir: dir.path().to_string_lossy().into_owned(),
                max_size: 1024,
            },
        );
        let mut content: &[u8] = b"log entries";
        let local = files
            .save_file("raft.txt", student, FileSource::Local(&mut content))
            .await
            .unwrap();
        let remote = files
            .save_file("paper", student, FileSource::Remote("https://raft.github.io/raft.pdf"))
            .await
            .unwrap();
        let mut content: &[u8] = b"other";
        let kept = files
            .save_file("mine.txt", other, FileSource::Local(&mut content))
            .await
            .unwrap();
        user_submissions.attach_file(submission_id, local.id).await.unwrap();

        let service = UserService::new(storage.clone());
        service.delete_user(student).await.unwrap();

        let db = storage.connection();
        assert!(Users::find_by_id(student).one(db).await.unwrap().is_none());
        assert!(Users::find_by_id(other).one(db).await.unwrap().is_some());
        assert_eq!(Notifications::find().count(db).await.unwrap(), 1);
        assert_eq!(UserCourses::find().count(db).await.unwrap(), 1);

        let remaining = user_submissions.list_user_submissions(submission_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].submitter_id, other);

        assert!(storage.get_file_by_id(local.id).await.unwrap().is_none());
        assert!(storage.get_file_by_id(remote.id).await.unwrap().is_none());
        assert!(storage.get_file_by_id(kept.id).await.unwrap().is_some());
        assert!(user_submissions.list_files(submission_id).await.unwrap().is_empty());

        assert!(!std::path::Path::new(&local.location).exists());
        assert!(std::path::Path::new(&kept.location).exists());
    }

    #[tokio::test]
    async fn test_purge_missing_user() {
        let storage = memory_storage().await;
        let service = UserService::new(storage.clone());

        let err = service.delete_user(77).await.unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_missing_bytes_do_not_fail_purge() {
        let dir = tempfile::tempdir().unwrap();
        let storage = memory_storage().await;
        let student = seed_user(&storage, "judy").await;

        let files = FileService::new(
            storage.clone(),
            clock(),
            &UploadConfig {
                dir: dir.path().to_string_lossy().into_owned(),
                max_size: 1024,
            },
        );
        let mut content: &[u8] = b"bytes";
        let local = files
            .save_file("gone.txt", student, FileSource::Local(&mut content))
            .await
            .unwrap();
        std::fs::remove_file(&local.location).unwrap();

        UserService::new(storage.clone()).delete_user(student).await.unwrap();
        assert!(storage.get_file_by_id(local.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_step_rolls_back_whole_purge() {
        let dir = tempfile::tempdir().unwrap();
        let storage = memory_storage().await;
        let clock = clock();

        let course_id = seed_course(&storage, "Compilers").await;
        let student = seed_user(&storage, "liam").await;
        seed_membership(&storage, student, course_id).await;
        seed_notification(&storage, student).await;

        let submission_id = SubmissionService::new(storage.clone(), clock.clone())
            .create_submission(CreateSubmissionRequest {
                name: "Parser".to_string(),
                deadline: String::new(),
                course_id,
                max_file_size: 0,
                visible_from: NOW.to_string(),
            })
            .await
            .unwrap();
        let user_submissions = UserSubmissionService::new(storage.clone(), clock.clone());
        user_submissions
            .create_user_submission(CreateUserSubmissionRequest {
                name: String::new(),
                submitter_id: student,
                submission_id,
                ignores_submission_deadline: false,
            })
            .await
            .unwrap();

        let files = FileService::new(
            storage.clone(),
            clock.clone(),
            &UploadConfig {
                dir: dir.path().to_string_lossy().into_owned(),
                max_size: 1024,
            },
        );
        let mut content: &[u8] = b"grammar";
        let local = files
            .save_file("parser.y", student, FileSource::Local(&mut content))
            .await
            .unwrap();

        // 第四步删除课程成员关系时失败，前三步已执行
        storage
            .connection()
            .execute_unprepared(
                "CREATE TRIGGER block_membership_delete BEFORE DELETE ON user_courses \
                 BEGIN SELECT RAISE(ABORT, 'membership locked'); END;",
            )
            .await
            .unwrap();

        let err = UserService::new(storage.clone())
            .delete_user(student)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
        assert!(!err.is_fatal());

        let db = storage.connection();
        assert!(Users::find_by_id(student).one(db).await.unwrap().is_some());
        assert_eq!(Notifications::find().count(db).await.unwrap(), 1);
        assert_eq!(UserCourses::find().count(db).await.unwrap(), 1);
        assert_eq!(
            user_submissions.list_user_submissions(submission_id).await.unwrap().len(),
            1
        );
        assert!(storage.get_file_by_id(local.id).await.unwrap().is_some());
        assert_eq!(std::fs::read(&local.location).unwrap(), b"grammar");
    }
}
