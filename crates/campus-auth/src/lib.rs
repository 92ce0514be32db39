//! # Campus Authorization
//!
//! This crate turns the session the portal receives from its auth
//! collaborator into authorization decisions.
//!
//! ## Overview
//!
//! The campus-auth crate handles:
//! - **Claims**: The session payload with per-university role names
//! - **Guards**: Permission checks against the active membership
//! - **Routes**: Which portal pages a session may open
//!
//! Token issuance and identity providers stay with the collaborator; this
//! crate only reads what it hands over.
//!
//! ## Usage
//!
//! ```rust
//! use campus_auth::{PermissionGuard, SessionClaims};
//! use campus_rbac::{Action, ResourceKind, UniversityRole};
//! use uuid::Uuid;
//!
//! let guard = PermissionGuard::university().unwrap();
//! let uni = Uuid::now_v7();
//! let claims = SessionClaims::new(Uuid::now_v7(), "ta@tu.edu", chrono::Duration::hours(1))
//!     .with_membership(uni, UniversityRole::Ta)
//!     .with_active_university(uni);
//!
//! assert!(guard.authorize(&claims, ResourceKind::Attendance, Action::Create).is_ok());
//! assert!(guard.authorize(&claims, ResourceKind::Grade, Action::Update).is_err());
//! ```
//!
//! ## Integration
//!
//! This crate builds on:
//! - `campus-rbac`: Access-control tables and the `can` check
//! - `campus-org`: Session context and memberships

pub mod claims;
pub mod error;
pub mod guard;
pub mod routes;

// Re-export main types
pub use claims::SessionClaims;
pub use error::{AuthError, AuthResult};
pub use guard::PermissionGuard;
pub use routes::{PortalRoute, RouteAccess};
