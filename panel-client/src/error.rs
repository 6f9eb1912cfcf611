//! Client error types

use shared::error::{AppError, ErrorCategory, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (no usable token, or rejected after the retry)
    #[error("Authentication required")]
    Unauthorized,

    /// Token refresh failed; the session has been cleared
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Structured error body from the backend
    #[error("API error {code} ({status}): {message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file error (uploads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected locally before any request was sent
    #[error(transparent)]
    Domain(#[from] AppError),
}

impl ClientError {
    /// Error code best describing this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::SessionExpired => ErrorCode::SessionExpired,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Api { code, .. } => *code,
            Self::Internal(_) | Self::Io(_) => ErrorCode::InternalError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Domain(e) => e.code,
        }
    }

    /// True when the user has to log in (again)
    pub fn requires_login(&self) -> bool {
        match self {
            Self::Unauthorized | Self::SessionExpired => true,
            Self::Api { code, .. } => code.category() == ErrorCategory::Auth,
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ClientError::SessionExpired.code(), ErrorCode::SessionExpired);
        assert_eq!(
            ClientError::Domain(AppError::new(ErrorCode::CountIncomplete)).code(),
            ErrorCode::CountIncomplete
        );
        assert_eq!(
            ClientError::Api {
                status: 404,
                code: ErrorCode::WarehouseNotFound,
                message: "x".into()
            }
            .code(),
            ErrorCode::WarehouseNotFound
        );
    }

    #[test]
    fn test_requires_login() {
        assert!(ClientError::Unauthorized.requires_login());
        assert!(ClientError::SessionExpired.requires_login());
        assert!(
            ClientError::Api {
                status: 401,
                code: ErrorCode::TokenExpired,
                message: "expired".into()
            }
            .requires_login()
        );
        assert!(!ClientError::NotFound("x".into()).requires_login());
    }

    #[test]
    fn test_domain_display_is_transparent() {
        let err = ClientError::from(AppError::new(ErrorCode::WarehouseNameRequired));
        assert_eq!(err.to_string(), "Warehouse name is required");
    }
}
