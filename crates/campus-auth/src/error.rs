//! Error types for session authorization
//!
//! This module defines the errors a portal request can hit between reading
//! the session and passing the permission guard.

use campus_rbac::{Permission, RbacError};
use thiserror::Error;

/// Authorization error types.
///
/// Denied permissions carry the permission for logging, but the rendered
/// message stays generic so responses never reveal the policy.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Session has expired
    #[error("Session has expired")]
    SessionExpired,

    /// Session claims are malformed
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Session is missing a required claim
    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    /// No usable identity or membership
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The active role does not hold the permission
    #[error("Forbidden: not authorized")]
    Forbidden {
        /// Permission that was required
        permission: Permission,
    },

    /// The active membership names a role the portal does not define
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authorization operations.
pub type AuthResult<T> = Result<T, AuthError>;

impl From<RbacError> for AuthError {
    fn from(err: RbacError) -> Self {
        AuthError::ConfigError(err.to_string())
    }
}

impl AuthError {
    /// Check if this error should be logged at error level.
    ///
    /// Expired sessions and denied permissions are routine.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AuthError::Internal(_) | AuthError::ConfigError(_))
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::SessionExpired
            | AuthError::InvalidSession(_)
            | AuthError::MissingClaim(_)
            | AuthError::Unauthorized(_) => 401,

            AuthError::Forbidden { .. } | AuthError::UnknownRole(_) => 403,

            AuthError::ConfigError(_) | AuthError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::SessionExpired => "SESSION_EXPIRED",
            AuthError::InvalidSession(_) => "INVALID_SESSION",
            AuthError::MissingClaim(_) => "MISSING_CLAIM",
            AuthError::Unauthorized(_) => "UNAUTHORIZED",
            AuthError::Forbidden { .. } => "FORBIDDEN",
            AuthError::UnknownRole(_) => "UNKNOWN_ROLE",
            AuthError::ConfigError(_) => "CONFIG_ERROR",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_rbac::{Action, ResourceKind};

    #[test]
    fn test_forbidden_message_is_generic() {
        let err = AuthError::Forbidden {
            permission: Permission::new(ResourceKind::Fee, Action::Update),
        };
        assert_eq!(err.to_string(), "Forbidden: not authorized");
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::SessionExpired.status_code(), 401);
        assert_eq!(AuthError::UnknownRole("janitor".into()).status_code(), 403);
        assert_eq!(AuthError::Internal("boom".into()).status_code(), 500);
        assert!(AuthError::ConfigError("bad".into()).is_server_error());
    }

    #[test]
    fn test_rbac_errors_are_configuration_errors() {
        let err: AuthError = RbacError::EmptyStatement(ResourceKind::Fee).into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
