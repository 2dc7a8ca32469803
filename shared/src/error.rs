use lambda_http::http::StatusCode;
use thiserror::Error;

pub const ERROR_FAILED_TO_FETCH_RECORD: &str = "Failed to fetch record";
pub const ERROR_COULD_NOT_PUT_ITEM: &str = "Could not put item";
pub const ERROR_COULD_NOT_DELETE_ITEM: &str = "Could not delete item";
pub const ERROR_INVALID_USER_DATA: &str = "Invalid user data";
pub const ERROR_INVALID_EMAIL: &str = "Invalid email";
pub const ERROR_MISSING_EMAIL: &str = "Missing email query parameter";

/// Everything a single request can fail with. The `Display` text is what the
/// caller sees; store details ride along for logging only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(&'static str),

    #[error("User already exists")]
    AlreadyExists,

    #[error("User does not exist")]
    NotFound,

    #[error("{message}")]
    StoreUnavailable {
        message: &'static str,
        detail: String,
    },

    #[error("Failed to unmarshal record")]
    Decode(String),

    #[error("Could not marshal item")]
    Encode(String),

    #[error("method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn store(message: &'static str, detail: impl std::fmt::Display) -> Self {
        ApiError::StoreUnavailable {
            message,
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::AlreadyExists => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Decode(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}
