//! 预导入模块，方便使用

pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::files::{ActiveModel as FileActiveModel, Entity as Files, Model as FileModel};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::submission_files::{
    ActiveModel as SubmissionFileActiveModel, Entity as SubmissionFiles,
    Model as SubmissionFileModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::user_courses::{
    ActiveModel as UserCourseActiveModel, Entity as UserCourses, Model as UserCourseModel,
};
pub use super::user_submissions::{
    ActiveModel as UserSubmissionActiveModel, Entity as UserSubmissions,
    Model as UserSubmissionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
