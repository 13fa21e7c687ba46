use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use shared_models::error::AppError;

/// Used when the upstream body carries nothing we can show to the user.
pub const GENERIC_FAILURE_MESSAGE: &str = "The request could not be completed. Please try again.";

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiClientError {
    /// Classifies a non-success upstream response.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = extract_error_message(body)
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());

        match status.as_u16() {
            401 => ApiClientError::Unauthorized(message),
            403 => ApiClientError::Forbidden(message),
            404 => ApiClientError::NotFound(message),
            _ => ApiClientError::Rejected { status, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiClientError::NotFound(_))
    }

    /// Message suitable for a user notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiClientError::Unauthorized(msg)
            | ApiClientError::Forbidden(msg)
            | ApiClientError::NotFound(msg) => msg.clone(),
            ApiClientError::Rejected { message, .. } => message.clone(),
            ApiClientError::Transport(_) | ApiClientError::Decode(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Pulls the human readable message out of an error body.
///
/// Looks at `message`, then `detail` (plain string or a list of validation
/// errors carrying `msg`), then `error`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let non_empty = |v: &Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(msg) = value.get("message").and_then(non_empty) {
        return Some(msg);
    }

    match value.get("detail") {
        Some(Value::String(_)) => {
            if let Some(msg) = value.get("detail").and_then(non_empty) {
                return Some(msg);
            }
        }
        Some(Value::Array(items)) => {
            if let Some(msg) = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(non_empty))
                .next()
            {
                return Some(msg);
            }
        }
        _ => {}
    }

    value.get("error").and_then(non_empty)
}

impl From<ApiClientError> for AppError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Unauthorized(msg) => AppError::Auth(msg),
            ApiClientError::Forbidden(msg) => AppError::Forbidden(msg),
            ApiClientError::NotFound(msg) => AppError::NotFound(msg),
            ApiClientError::Rejected { status, message } => match status.as_u16() {
                409 => AppError::Conflict(message),
                400 | 422 => AppError::ValidationError(message),
                _ => AppError::ExternalService(message),
            },
            ApiClientError::Transport(e) => AppError::ExternalService(e.to_string()),
            ApiClientError::Decode(e) => AppError::ExternalService(e.to_string()),
        }
    }
}
