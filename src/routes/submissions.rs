use actix_web::{HttpResponse, Result as ActixResult, web};

use super::error_response;
use super::user_submissions;
use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateSubmissionRequest};
use crate::models::{ApiResponse, IdResponse};
use crate::services::SubmissionService;

pub async fn create_submission(
    service: web::Data<SubmissionService>,
    req: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    match service.create_submission(req.into_inner()).await {
        Ok(id) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            IdResponse { id },
            "Submission created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn get_submission(
    service: web::Data<SubmissionService>,
    submission_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.get_submission(submission_id.into_inner()).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            "Submission retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_submission(
    service: web::Data<SubmissionService>,
    submission_id: web::Path<i64>,
    req: web::Json<UpdateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .update_submission(submission_id.into_inner(), req.into_inner())
        .await
    {
        Ok(id) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            IdResponse { id },
            "Submission updated successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_submission(
    service: web::Data<SubmissionService>,
    submission_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.delete_submission(submission_id.into_inner()).await {
        Ok(id) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            IdResponse { id },
            "Submission deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn list_course_submissions(
    service: web::Data<SubmissionService>,
    course_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.list_course_submissions(course_id.into_inner()).await {
        Ok(submissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submissions,
            "Submissions retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .route("", web::post().to(create_submission))
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}", web::put().to(update_submission))
            .route("/{id}", web::delete().to(delete_submission))
            .route(
                "/{id}/user-submissions",
                web::get().to(user_submissions::list_user_submissions),
            )
            .route("/{id}/files", web::get().to(user_submissions::list_files))
            .route(
                "/{id}/files/{file_id}",
                web::post().to(user_submissions::attach_file),
            )
            .route(
                "/{id}/files/{file_id}",
                web::delete().to(user_submissions::detach_file),
            ),
    )
    .service(
        web::scope("/api/v1/courses")
            .route("/{course_id}/submissions", web::get().to(list_course_submissions)),
    );
}
