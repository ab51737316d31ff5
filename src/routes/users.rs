use actix_web::{HttpResponse, Result as ActixResult, web};

use super::error_response;
use crate::models::ApiResponse;
use crate::services::UserService;

pub async fn delete_user(
    service: web::Data<UserService>,
    user_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.delete_user(user_id.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "User deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/users").route("/{id}", web::delete().to(delete_user)));
}
