use thiserror::Error;

/// Failure of one API call, already classified for the UI.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthorized,

    #[error("Session expired")]
    SessionExpired,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {}", .0.as_deref().unwrap_or("-"))]
    Conflict(Option<String>),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("server error"))]
    Server { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

pub const CONFLICT_MESSAGE: &str =
    "The operation conflicts with the current state (for example, insufficient stock).";

impl ApiError {
    /// Classify a non-success response. 401 is mapped to `Unauthorized`;
    /// the refresh flow decides whether that becomes `SessionExpired`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);
        match status {
            400 | 422 => ApiError::Validation(
                message.unwrap_or_else(|| "The request was rejected".to_string()),
            ),
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            409 => ApiError::Conflict(message),
            _ => ApiError::Server { status, message },
        }
    }

    /// Text for the toast notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized | ApiError::SessionExpired => {
                "Session expired, please sign in again.".to_string()
            }
            ApiError::Forbidden => {
                "You do not have permission to perform this action.".to_string()
            }
            ApiError::NotFound => "The requested record was not found.".to_string(),
            ApiError::Conflict(None) => CONFLICT_MESSAGE.to_string(),
            ApiError::Conflict(Some(detail)) => format!("{} {}", CONFLICT_MESSAGE, detail),
            ApiError::Validation(message) => message.clone(),
            ApiError::Network(_) => "Cannot reach the server.".to_string(),
            ApiError::Server { .. } | ApiError::Decode(_) | ApiError::Serialize(_) => {
                "Server error".to_string()
            }
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::SessionExpired)
    }
}

/// Pulls `message` (or `error`, `detail`) out of a JSON error body.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_keeps_server_detail() {
        let err = ApiError::from_status(409, r#"{"message": "Only 3 units of BOLT-M8 available"}"#);
        assert_eq!(
            err,
            ApiError::Conflict(Some("Only 3 units of BOLT-M8 available".into()))
        );
        assert!(err.user_message().starts_with(CONFLICT_MESSAGE));
        assert!(err.user_message().ends_with("available"));
    }

    #[test]
    fn conflict_without_body_is_generic() {
        let err = ApiError::from_status(409, "");
        assert_eq!(err.user_message(), CONFLICT_MESSAGE);
    }

    #[test]
    fn everything_else_is_server_error() {
        assert_eq!(ApiError::from_status(500, "oops").user_message(), "Server error");
        assert_eq!(ApiError::from_status(502, "").user_message(), "Server error");
        assert_eq!(ApiError::Decode("eof".into()).user_message(), "Server error");
    }

    #[test]
    fn status_classification() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, ""), ApiError::Forbidden);
        assert_eq!(ApiError::from_status(404, ""), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(422, r#"{"error": "sku already exists"}"#),
            ApiError::Validation("sku already exists".into())
        );
        assert!(ApiError::SessionExpired.is_auth_failure());
    }
}
