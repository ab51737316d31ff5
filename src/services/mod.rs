pub mod files;
pub mod submissions;
pub mod user_submissions;
pub mod users;

pub use files::FileService;
pub use submissions::SubmissionService;
pub use user_submissions::UserSubmissionService;
pub use users::UserService;
