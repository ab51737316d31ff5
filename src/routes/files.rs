use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};
use futures_util::TryStreamExt;

use super::error_response;
use crate::models::files::requests::CreateFileLinkRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::FileService;
use crate::services::files::FileSource;

/// 上传本地文件
///
/// multipart 字段：`file`（文件内容，文件名取自 filename）和 `uploader_id`。
pub async fn handle_upload(
    service: web::Data<FileService>,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let max_size = usize::try_from(service.max_size()).unwrap_or(usize::MAX);

    let mut file_name: Option<String> = None;
    let mut content: Vec<u8> = Vec::new();
    let mut uploader_id: Option<i64> = None;

    while let Some(mut field) = payload.try_next().await? {
        let (name, filename) = {
            let content_disposition = field.content_disposition();
            (
                content_disposition
                    .and_then(|cd| cd.get_name())
                    .unwrap_or_default()
                    .to_string(),
                content_disposition
                    .and_then(|cd| cd.get_filename())
                    .map(|s| s.to_string()),
            )
        };

        match name.as_str() {
            "file" => {
                if file_name.is_some() {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "Only one file can be uploaded at a time",
                    )));
                }
                file_name = Some(filename.unwrap_or_default());

                while let Some(chunk) = field.try_next().await? {
                    if content.len() + chunk.len() > max_size {
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileSizeExceeded,
                            "File size exceeds the limit",
                        )));
                    }
                    content.extend_from_slice(&chunk);
                }
            }
            "uploader_id" => {
                let mut raw: Vec<u8> = Vec::new();
                while let Some(chunk) = field.try_next().await? {
                    raw.extend_from_slice(&chunk);
                }
                uploader_id = std::str::from_utf8(&raw)
                    .ok()
                    .and_then(|s| s.trim().parse::<i64>().ok());
                if uploader_id.is_none() {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "uploader_id must be an integer",
                    )));
                }
            }
            // 其余字段忽略
            _ => {
                while field.try_next().await?.is_some() {}
            }
        }
    }

    let Some(file_name) = file_name else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };
    let Some(uploader_id) = uploader_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "uploader_id is required",
        )));
    };

    let mut reader: &[u8] = &content;
    match service
        .save_file(&file_name, uploader_id, FileSource::Local(&mut reader))
        .await
    {
        Ok(file) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            file,
            "File uploaded successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// 登记远程链接
pub async fn create_link(
    service: web::Data<FileService>,
    req: web::Json<CreateFileLinkRequest>,
) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    match service
        .save_file(&req.name, req.uploader_id, FileSource::Remote(&req.uri))
        .await
    {
        Ok(file) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            file,
            "File link created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_file(
    service: web::Data<FileService>,
    file_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.get_file(file_id.into_inner()).await {
        Ok(file) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            file,
            "File retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .route("/upload", web::post().to(handle_upload))
            .route("/link", web::post().to(create_link))
            .route("/{id}", web::get().to(get_file)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;
    use crate::test_support::{clock, memory_storage, seed_user};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    const BOUNDARY: &str = "lms-test-boundary";

    fn multipart_body(uploader_id: i64, filename: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"uploader_id\"\r\n\r\n\
             {uploader_id}\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --{BOUNDARY}--\r\n"
        )
    }

    #[actix_web::test]
    async fn test_upload_and_link() {
        let dir = tempfile::tempdir().unwrap();
        let storage = memory_storage().await;
        let uploader = seed_user(&storage, "oscar").await;
        let service = web::Data::new(FileService::new(
            storage.clone(),
            clock(),
            &UploadConfig {
                dir: dir.path().to_string_lossy().into_owned(),
                max_size: 16,
            },
        ));

        let app = test::init_service(
            App::new()
                .app_data(service.clone())
                .configure(configure_file_routes),
        )
        .await;

        let upload = |content: &str| {
            test::TestRequest::post()
                .uri("/api/v1/files/upload")
                .insert_header((
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                ))
                .set_payload(multipart_body(uploader, "report.pdf", content))
                .to_request()
        };

        let body: Value = test::call_and_read_body_json(&app, upload("v1")).await;
        assert_eq!(body["data"]["name"], "report.pdf");
        assert_eq!(body["data"]["locality"], "local");
        assert_eq!(body["data"]["file_size"], 2);

        let body: Value = test::call_and_read_body_json(&app, upload("v2")).await;
        assert_eq!(body["data"]["name"], "report-1.pdf");
        let id = body["data"]["id"].as_i64().unwrap();

        let resp = test::call_service(&app, upload("this is far too long")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/files/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["name"], "report-1.pdf");

        let req = test::TestRequest::post()
            .uri("/api/v1/files/link")
            .set_json(json!({ "name": "syllabus", "uri": "::not a uri", "uploader_id": uploader }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );

        let req = test::TestRequest::post()
            .uri("/api/v1/files/link")
            .set_json(json!({
                "name": "syllabus",
                "uri": "https://example.com/syllabus.pdf",
                "uploader_id": uploader
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["locality"], "remote");
        assert_eq!(body["data"]["location"], "https://example.com/syllabus.pdf");
    }
}
