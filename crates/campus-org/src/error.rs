//! Error types for tenancy operations

use campus_rbac::{Permission, UniversityRole};
use thiserror::Error;
use uuid::Uuid;

/// Tenancy error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrgError {
    /// Entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (university, membership, ...)
        entity: &'static str,
        /// Requested identifier
        id: Uuid,
    },

    /// Active role does not hold the required permission
    #[error("not authorized: role '{role}' lacks '{permission}'")]
    Forbidden {
        /// Role that was checked
        role: UniversityRole,
        /// Permission that was required
        permission: Permission,
    },

    /// Only registrars and above may create universities
    #[error("role '{0}' may not create universities")]
    CreationNotAllowed(UniversityRole),

    /// User has no membership in the university
    #[error("user {user_id} is not a member of university {university_id}")]
    NotAMember {
        /// User ID
        user_id: Uuid,
        /// University ID
        university_id: Uuid,
    },

    /// The session has no active university
    #[error("no active university membership in session")]
    NoActiveMembership,

    /// Member profile does not fit the role
    #[error("role '{role}' requires a {expected} profile")]
    ProfileMismatch {
        /// Role on the membership
        role: UniversityRole,
        /// Profile kind the role requires
        expected: &'static str,
    },

    /// A configured limit was hit
    #[error("{what} limit of {limit} reached")]
    LimitReached {
        /// Limited quantity
        what: &'static str,
        /// Configured limit
        limit: u32,
    },

    /// A unique value is already taken
    #[error("duplicate {field}: {value}")]
    Duplicate {
        /// Field name
        field: &'static str,
        /// Conflicting value
        value: String,
    },

    /// Admission offer is no longer pending
    #[error("admission offer {0} is not pending")]
    OfferNotPending(Uuid),

    /// Accepting user is not the offer's recipient
    #[error("admission offer {0} was not issued to this user")]
    NotRecipient(Uuid),

    /// Admission offer has expired
    #[error("admission offer {0} has expired")]
    OfferExpired(Uuid),

    /// A required schema field is missing
    #[error("{model}: missing required field '{field}'")]
    MissingField {
        /// Domain model name
        model: &'static str,
        /// Field name
        field: &'static str,
    },

    /// A schema field has the wrong type
    #[error("{model}: field '{field}' must be a {expected}")]
    FieldType {
        /// Domain model name
        model: &'static str,
        /// Field name
        field: String,
        /// Expected type name
        expected: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for tenancy operations.
pub type OrgResult<T> = Result<T, OrgError>;

impl OrgError {
    /// Check if this error is a denied authorization.
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            OrgError::Forbidden { .. }
                | OrgError::CreationNotAllowed(_)
                | OrgError::NotRecipient(_)
        )
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            OrgError::NotFound { .. } => 404,
            OrgError::Forbidden { .. } | OrgError::CreationNotAllowed(_) => 403,
            OrgError::NotAMember { .. } | OrgError::NotRecipient(_) => 403,
            OrgError::NoActiveMembership => 401,
            OrgError::ProfileMismatch { .. }
            | OrgError::MissingField { .. }
            | OrgError::FieldType { .. } => 422,
            OrgError::LimitReached { .. } | OrgError::Duplicate { .. } => 409,
            OrgError::OfferNotPending(_) => 409,
            OrgError::OfferExpired(_) => 410,
            OrgError::Config(_) => 500,
        }
    }
}
