pub mod files;

pub mod submissions;

pub mod user_submissions;

pub mod users;

pub use files::configure_file_routes;
pub use submissions::configure_submissions_routes;
pub use user_submissions::configure_user_submissions_routes;
pub use users::configure_user_routes;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use tracing::{error, warn};

use crate::errors::HWSystemError;
use crate::models::{ApiResponse, ErrorCode};

/// 业务错误到 HTTP 响应的映射
pub fn error_response(err: &HWSystemError) -> HttpResponse {
    match err {
        HWSystemError::Validation(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg.as_str())),
        HWSystemError::DateParse(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::DateParseFailed, msg.as_str())),
        HWSystemError::InvalidUri(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidUri, msg.as_str())),
        HWSystemError::NotFound(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, msg.as_str())),
        HWSystemError::Conflict(msg) => HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::Conflict, msg.as_str())),
        HWSystemError::DeadlinePassed(msg) => HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::DeadlinePassed, msg.as_str())),
        HWSystemError::FatalTransaction(msg) => {
            error!("{}", err.format_simple());
            HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::FatalTransaction, msg.as_str()))
        }
        _ => {
            warn!("{}", err.format_simple());
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                err.message(),
            ))
        }
    }
}

/// JSON 请求体解析失败时返回统一格式
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid JSON payload: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
