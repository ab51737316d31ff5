use actix_web::{HttpResponse, Result as ActixResult, web};

use super::error_response;
use crate::models::user_submissions::requests::{
    CreateUserSubmissionRequest, UpdateUserSubmissionRequest,
};
use crate::models::{ApiResponse, IdResponse};
use crate::services::UserSubmissionService;

pub async fn create_user_submission(
    service: web::Data<UserSubmissionService>,
    req: web::Json<CreateUserSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    match service.create_user_submission(req.into_inner()).await {
        Ok(id) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            IdResponse { id },
            "User submission created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_user_submission(
    service: web::Data<UserSubmissionService>,
    id: web::Path<i64>,
    req: web::Json<UpdateUserSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .update_user_submission(id.into_inner(), req.into_inner())
        .await
    {
        Ok(id) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            IdResponse { id },
            "User submission updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_user_submission(
    service: web::Data<UserSubmissionService>,
    id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.delete_user_submission(id.into_inner()).await {
        Ok(id) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            IdResponse { id },
            "User submission deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_user_submissions(
    service: web::Data<UserSubmissionService>,
    submission_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.list_user_submissions(submission_id.into_inner()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "User submissions retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_files(
    service: web::Data<UserSubmissionService>,
    submission_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.list_files(submission_id.into_inner()).await {
        Ok(files) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            files,
            "Submission files retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn attach_file(
    service: web::Data<UserSubmissionService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (submission_id, file_id) = path.into_inner();
    match service.attach_file(submission_id, file_id).await {
        Ok(id) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            IdResponse { id },
            "File attached successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn detach_file(
    service: web::Data<UserSubmissionService>,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (submission_id, file_id) = path.into_inner();
    match service.detach_file(submission_id, file_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "File detached successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由，按提交项查询的接口挂在 /api/v1/submissions 下
pub fn configure_user_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/user-submissions")
            .route("", web::post().to(create_user_submission))
            .route("/{id}", web::put().to(update_user_submission))
            .route("/{id}", web::delete().to(delete_user_submission)),
    );
}
