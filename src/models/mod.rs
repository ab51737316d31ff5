pub mod common;
pub mod files;
pub mod submissions;
pub mod user_submissions;

pub use common::{ApiResponse, ErrorCode, IdResponse};
