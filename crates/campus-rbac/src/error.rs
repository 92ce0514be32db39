//! Error types for access-control configuration
//!
//! Every error here is raised while the statement registry and role table
//! are being assembled at startup. Authorization checks themselves never
//! fail; they answer `false`.

use thiserror::Error;

use crate::actions::Action;
use crate::resources::ResourceKind;

/// A role grant that references an action the statement registry does not
/// allow for that resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("role '{role}' grants '{resource}:{action}', which is not a registered statement")]
pub struct InvalidGrantError {
    /// Role being defined
    pub role: String,
    /// Resource kind of the offending grant
    pub resource: ResourceKind,
    /// Action of the offending grant
    pub action: Action,
}

/// Access-control configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RbacError {
    /// A resource kind was registered twice with different action sets
    #[error("resource '{resource}' already registered with actions [{existing}], refusing [{requested}]")]
    ConflictingStatement {
        /// Resource kind registered twice
        resource: ResourceKind,
        /// Actions already registered, comma separated
        existing: String,
        /// Actions requested by the second registration, comma separated
        requested: String,
    },

    /// A resource kind was registered with no actions
    #[error("resource '{0}' registered with an empty action set")]
    EmptyStatement(ResourceKind),

    /// A role grant is not covered by the statement registry
    #[error(transparent)]
    InvalidGrant(#[from] InvalidGrantError),
}

/// Result type for access-control configuration.
pub type RbacResult<T> = Result<T, RbacError>;

impl RbacError {
    /// Configuration errors are fatal at startup; every variant qualifies.
    pub fn is_configuration_error(&self) -> bool {
        true
    }

    /// Get error code for startup diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::ConflictingStatement { .. } => "CONFLICTING_STATEMENT",
            RbacError::EmptyStatement(_) => "EMPTY_STATEMENT",
            RbacError::InvalidGrant(_) => "INVALID_GRANT",
        }
    }
}
