use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed fallback shown when the server gives no usable error message.
pub const GENERIC_ERROR_MESSAGE: &str = "Terjadi kesalahan, coba lagi.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Internal,
}

impl ErrorCode {
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => ErrorCode::Unauthorized,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            400 | 422 => ErrorCode::Validation,
            429 => ErrorCode::RateLimited,
            _ => ErrorCode::Internal,
        }
    }
}

/// Tagged server-side failure. The API reports failures as a JSON body of
/// the shape `{ "errors": <string or structured value> }`; callers get the
/// decoded message plus a status-derived code instead of poking optional
/// fields.
#[derive(Debug, Clone, Error)]
#[error("{code:?}: {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiException {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Builds an exception from an HTTP status and raw response body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        Self::new(ErrorCode::from_http_status(status), error_body_message(body))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Option<serde_json::Value>,
}

fn error_body_message(body: &[u8]) -> String {
    let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) else {
        return GENERIC_ERROR_MESSAGE.to_string();
    };
    match parsed.errors {
        Some(serde_json::Value::String(message)) if !message.is_empty() => message,
        Some(value @ (serde_json::Value::Array(_) | serde_json::Value::Object(_))) => {
            value.to_string()
        }
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}
