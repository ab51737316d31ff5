use tracing::debug;

use super::naming::{directory_lock, probe_free_name};
use super::{FileService, FileSource};
use crate::errors::{HWSystemError, Result};
use crate::models::files::entities::{File, NewFile};
use crate::utils::{validate_file_name, validate_remote_uri};

pub async fn save_file(
    service: &FileService,
    name: &str,
    uploader_id: i64,
    source: FileSource<'_>,
) -> Result<File> {
    match source {
        FileSource::Local(content) => save_local(service, name, uploader_id, content).await,
        FileSource::Remote(uri) => save_remote(service, name, uploader_id, uri).await,
    }
}

async fn save_local(
    service: &FileService,
    name: &str,
    uploader_id: i64,
    content: &mut (dyn tokio::io::AsyncRead + Unpin + Send),
) -> Result<File> {
    validate_file_name(name).map_err(HWSystemError::validation)?;

    tokio::fs::create_dir_all(&service.upload_dir)
        .await
        .map_err(|e| HWSystemError::file_operation(format!("创建上传目录失败: {e}")))?;
    let dir = tokio::fs::canonicalize(&service.upload_dir)
        .await
        .map_err(|e| HWSystemError::file_operation(format!("解析上传目录失败: {e}")))?;

    // 探测到写入完成前一直持有目录锁
    let lock = directory_lock(&dir);
    let _guard = lock.lock().await;

    let (stored_name, path) = probe_free_name(&dir, name).await?;
    let location = path
        .to_str()
        .ok_or_else(|| {
            HWSystemError::file_operation(format!("路径不是有效的 UTF-8: {}", path.display()))
        })?
        .to_string();

    if stored_name != name {
        debug!("文件名 {} 已被占用，改用 {}", name, stored_name);
    }

    service
        .storage
        .create_local_file(
            NewFile {
                name: stored_name,
                location,
                uploader_id,
                uploaded_at: service.clock.now(),
            },
            content,
            service.max_size,
        )
        .await
}

async fn save_remote(
    service: &FileService,
    name: &str,
    uploader_id: i64,
    uri: &str,
) -> Result<File> {
    if name.is_empty() {
        return Err(HWSystemError::validation("文件名不能为空"));
    }
    validate_remote_uri(uri)?;

    service
        .storage
        .create_remote_file(NewFile {
            name: name.to_string(),
            location: uri.to_string(),
            uploader_id,
            uploaded_at: service.clock.now(),
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;
    use crate::models::files::entities::FileLocality;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::test_support::{NOW, at, clock, memory_storage, seed_user};
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn setup(max_size: u64) -> (TempDir, Arc<SeaOrmStorage>, FileService, i64) {
        let dir = tempfile::tempdir().unwrap();
        let storage = memory_storage().await;
        let uploader = seed_user(&storage, "uploader").await;
        let service = FileService::new(
            storage.clone(),
            clock(),
            &UploadConfig {
                dir: dir.path().join("uploads").to_string_lossy().into_owned(),
                max_size,
            },
        );
        (dir, storage, service, uploader)
    }

    async fn save_bytes(
        service: &FileService,
        name: &str,
        uploader: i64,
        bytes: &[u8],
    ) -> Result<File> {
        let mut content: &[u8] = bytes;
        service
            .save_file(name, uploader, FileSource::Local(&mut content))
            .await
    }

    #[tokio::test]
    async fn test_colliding_names_get_suffixes() {
        let (dir, _storage, service, uploader) = setup(1024).await;
        let upload_dir = dir.path().join("uploads");

        let first = save_bytes(&service, "report.pdf", uploader, b"first").await.unwrap();
        let second = save_bytes(&service, "report.pdf", uploader, b"second").await.unwrap();
        let third = save_bytes(&service, "report.pdf", uploader, b"third").await.unwrap();

        assert_eq!(first.name, "report.pdf");
        assert_eq!(second.name, "report-1.pdf");
        assert_eq!(third.name, "report-2.pdf");

        let canonical = upload_dir.canonicalize().unwrap();
        assert_eq!(second.location, canonical.join("report-1.pdf").to_str().unwrap());
        assert!(second.is_local());
        assert_eq!(second.file_size, 6);
        assert_eq!(second.uploaded_at, at(NOW));

        assert_eq!(std::fs::read(&first.location).unwrap(), b"first");
        assert_eq!(std::fs::read(&second.location).unwrap(), b"second");
        assert_eq!(std::fs::read(&third.location).unwrap(), b"third");

        let fetched = service.get_file(second.id).await.unwrap();
        assert_eq!(fetched.location, second.location);
    }

    #[tokio::test]
    async fn test_untracked_file_on_disk_is_not_overwritten() {
        let (dir, _storage, service, uploader) = setup(1024).await;
        let upload_dir = dir.path().join("uploads");
        std::fs::create_dir_all(&upload_dir).unwrap();
        std::fs::write(upload_dir.join("notes.txt"), b"keep me").unwrap();

        let saved = save_bytes(&service, "notes.txt", uploader, b"new").await.unwrap();
        assert_eq!(saved.name, "notes-1.txt");
        assert_eq!(std::fs::read(upload_dir.join("notes.txt")).unwrap(), b"keep me");
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_distinct_paths() {
        let (_dir, _storage, service, uploader) = setup(1024).await;

        let (a, b) = tokio::join!(
            save_bytes(&service, "essay.docx", uploader, b"a"),
            save_bytes(&service, "essay.docx", uploader, b"b"),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.location, b.location);

        let mut names = vec![a.name, b.name];
        names.sort();
        assert_eq!(names, vec!["essay-1.docx", "essay.docx"]);
    }

    #[tokio::test]
    async fn test_oversized_upload_leaves_nothing_behind() {
        let (dir, storage, service, uploader) = setup(4).await;

        let err = save_bytes(&service, "big.bin", uploader, b"0123456789").await.unwrap_err();
        assert_eq!(err.code(), "E005");

        let upload_dir = dir.path().join("uploads");
        assert_eq!(std::fs::read_dir(&upload_dir).unwrap().count(), 0);
        assert!(storage.get_file_by_id_impl(1).await.unwrap().is_none());

        // 失败后同名文件仍可使用原名
        let ok = save_bytes(&service, "big.bin", uploader, b"0123").await.unwrap();
        assert_eq!(ok.name, "big.bin");
        assert_eq!(ok.file_size, 4);
    }

    #[tokio::test]
    async fn test_unknown_uploader_rolls_back() {
        let (dir, _storage, service, _uploader) = setup(1024).await;

        let err = save_bytes(&service, "orphan.txt", 9999, b"data").await.unwrap_err();
        assert_eq!(err.code(), "E005");
        assert!(!dir.path().join("uploads").join("orphan.txt").exists());
    }

    #[tokio::test]
    async fn test_rejects_path_like_names() {
        let (_dir, _storage, service, uploader) = setup(1024).await;

        for name in ["", ".", "..", "../escape.txt", "nested/file.txt"] {
            let err = save_bytes(&service, name, uploader, b"x").await.unwrap_err();
            assert_eq!(err.code(), "E005", "name {name:?}");
        }
    }

    #[tokio::test]
    async fn test_remote_link() {
        let (dir, _storage, service, uploader) = setup(1024).await;

        let saved = service
            .save_file(
                "slides",
                uploader,
                FileSource::Remote("https://example.com/slides.pdf"),
            )
            .await
            .unwrap();
        assert_eq!(saved.locality, FileLocality::Remote);
        assert_eq!(saved.location, "https://example.com/slides.pdf");
        assert_eq!(saved.file_size, 0);

        let fetched = service.get_file(saved.id).await.unwrap();
        assert_eq!(fetched.name, "slides");
        assert!(!fetched.is_local());

        // 远程文件不触碰磁盘
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_remote_link_validation() {
        let (_dir, _storage, service, uploader) = setup(1024).await;

        let err = service
            .save_file("slides", uploader, FileSource::Remote("not a uri"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E009");

        let err = service
            .save_file("", uploader, FileSource::Remote("https://example.com/a"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");
    }

    #[tokio::test]
    async fn test_get_missing_file() {
        let (_dir, _storage, service, _uploader) = setup(1024).await;
        assert_eq!(service.get_file(42).await.unwrap_err().code(), "E006");
    }
}
