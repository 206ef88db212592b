/// Error handling types for calls to the Atlas REST API
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    // Network errors: DNS, refused connections, timeouts
    Transport { details: String },

    // Non-2xx responses; the body's `{message, code?}` when it had one
    Status {
        status: u16,
        message: String,
        code: Option<String>,
    },

    // 2xx responses whose body was not the expected JSON
    Malformed { details: String },

    // Input rejected before any request was made
    Validation { field: &'static str, details: String },

    // No API base URL configured
    NotConfigured,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Error body shape the API uses for every non-2xx response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub code: Option<String>,
}

impl ApiError {
    pub fn validation(field: &'static str, details: impl Into<String>) -> Self {
        ApiError::Validation {
            field,
            details: details.into(),
        }
    }

    /// Best-effort message for showing to a person.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport { .. } => {
                "Could not reach the Atlas API. Check your connection and try again.".to_string()
            }
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Status { status, .. } => format!("Request failed: {status}"),
            ApiError::Malformed { .. } => "The Atlas API sent an unexpected response.".to_string(),
            ApiError::Validation { details, .. } => details.clone(),
            ApiError::NotConfigured => {
                "No Atlas API URL configured (set ATLAS_API_URL or pass --api-url).".to_string()
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401, .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport { details } => write!(f, "Transport error: {details}"),
            ApiError::Status {
                status,
                message,
                code: Some(code),
            } => write!(f, "API error {status} ({code}): {message}"),
            ApiError::Status {
                status,
                message,
                code: None,
            } => write!(f, "API error {status}: {message}"),
            ApiError::Malformed { details } => write!(f, "Malformed API response: {details}"),
            ApiError::Validation { field, details } => {
                write!(f, "Invalid {field}: {details}")
            }
            ApiError::NotConfigured => write!(f, "API base URL is not configured"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Malformed {
                details: err.to_string(),
            }
        } else {
            ApiError::Transport {
                details: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::Status {
            status: 422,
            message: "Email already registered".to_string(),
            code: Some("EMAIL_TAKEN".to_string()),
        };
        assert_eq!(err.user_message(), "Email already registered");
        assert_eq!(err.to_string(), "API error 422 (EMAIL_TAKEN): Email already registered");
    }

    #[test]
    fn test_user_message_falls_back_to_status() {
        let err = ApiError::Status {
            status: 502,
            message: "  ".to_string(),
            code: None,
        };
        assert_eq!(err.user_message(), "Request failed: 502");
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = ApiError::Status {
            status: 401,
            message: "Session expired".to_string(),
            code: None,
        };
        assert!(err.is_unauthorized());
        assert!(!ApiError::NotConfigured.is_unauthorized());
    }
}
