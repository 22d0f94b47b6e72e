use serde::Serialize;

// 统一错误响应结构
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: u16,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
    pub timestamp: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(field: Option<&str>, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.map(str::to_string),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

// 便捷构造函数
impl ErrorResponse {
    pub fn error(code: u16, message: &str, errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            code,
            message: message.to_string(),
            errors,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self::error(400, "Validation failed", errors)
    }

    pub fn bad_request(message: &str, code: &str, field: Option<&str>) -> Self {
        Self::error(400, message, vec![ErrorDetail::new(field, code, message)])
    }

    pub fn not_found(message: &str) -> Self {
        Self::error(
            404,
            message,
            vec![ErrorDetail::new(None, error_codes::NOT_FOUND, message)],
        )
    }

    pub fn internal_error(message: &str) -> Self {
        Self::error(
            500,
            message,
            vec![ErrorDetail::new(None, error_codes::INTERNAL_ERROR, message)],
        )
    }
}

// 业务错误码常量
pub mod error_codes {
    // 请求相关
    pub const INVALID_JSON: &str = "INVALID_JSON";
    pub const INVALID_PATH: &str = "INVALID_PATH";
    pub const INVALID_QUERY: &str = "INVALID_QUERY";
    pub const REQUIRED: &str = "REQUIRED";
    pub const INVALID_REFERENCE: &str = "INVALID_REFERENCE";
    pub const NOT_FOUND: &str = "NOT_FOUND";

    // 选课相关
    pub const ENROLLMENT_CAP_EXCEEDED: &str = "ENROLLMENT_CAP_EXCEEDED";

    // 系统相关
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
