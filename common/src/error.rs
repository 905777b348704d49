//! Error taxonomy shared by every REST call the console makes.

use thiserror::Error;

use crate::model::page::ErrorResponse;
use crate::validation::FieldErrors;

pub type ApiResult<T> = Result<T, ApiError>;

/// Message shown when a 403 wipes the selection state.
pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to access this data.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    #[error("You do not have permission to access this data.")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Please correct the highlighted fields")]
    Validation(FieldErrors),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Builds the error for a non-2xx response. `body` is the raw response
    /// text; when it is a backend `ErrorResponse` its `message` is used.
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            _ => {
                let message = extract_message(body)
                    .unwrap_or_else(|| format!("Request failed with status {}", status));
                if status == 404 {
                    ApiError::NotFound(message)
                } else {
                    ApiError::Status { status, message }
                }
            }
        }
    }

    /// 401 and 403 both invalidate the session.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) if !err.message.is_empty() => Some(err.message),
        Ok(err) if !err.error.is_empty() => Some(err.error),
        Ok(_) => None,
        Err(_) if body.starts_with('{') || body.starts_with('<') => None,
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_invalidate_session() {
        assert!(ApiError::from_response(401, "").is_session_invalid());
        assert!(ApiError::from_response(403, "").is_session_invalid());
        assert!(!ApiError::from_response(500, "").is_session_invalid());
    }

    #[test]
    fn backend_error_body_message_is_used() {
        let body = r#"{"status":409,"error":"Conflict","message":"Client code already exists","timestamp":"2024-01-01T00:00:00Z"}"#;
        assert_eq!(
            ApiError::from_response(409, body),
            ApiError::Status {
                status: 409,
                message: "Client code already exists".to_string()
            }
        );
    }

    #[test]
    fn plain_text_body_is_kept_and_html_is_not() {
        assert_eq!(
            ApiError::from_response(502, "upstream down").to_string(),
            "upstream down"
        );
        assert_eq!(
            ApiError::from_response(502, "<html>Bad gateway</html>").to_string(),
            "Request failed with status 502"
        );
    }

    #[test]
    fn not_found_keeps_status() {
        assert_eq!(ApiError::from_response(404, "").status(), Some(404));
    }
}
