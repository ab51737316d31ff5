/// 业务错误码，随 ApiResponse 返回给客户端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    DateParseFailed = 1002,
    InvalidUri = 1003,
    FileUploadFailed = 1004,
    FileNotFound = 1005,
    FileSizeExceeded = 1006,

    // 资源错误 2xxx
    NotFound = 2000,
    Conflict = 2001,

    // 业务规则 3xxx
    DeadlinePassed = 3000,

    // 服务端错误 5xxx
    InternalServerError = 5000,
    FatalTransaction = 5001,
}
