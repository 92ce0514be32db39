//! # Campus RBAC (Role-Based Access Control)
//!
//! This crate provides the permission model of the university portal:
//! which actions exist on which resource kinds, which roles hold which of
//! those permissions, and the check that route guards and API handlers run
//! before acting.
//!
//! ## Overview
//!
//! - **Resource kinds**: course, grade, attendance, fee, library, ... plus
//!   the tenancy kinds (organization, member, invitation, team)
//! - **Actions**: create, read, update, delete, cancel, approve
//! - **Statements**: the legal actions for each resource kind
//! - **Roles**: flat bundles of statement grants (no inheritance)
//! - **Access control**: the frozen statement + role tables and `can()`
//!
//! ## Architecture
//!
//! ```text
//! StatementRegistry ─→ AccessControlBuilder::define_role ─→ AccessControl::can
//!   course: [create, read, update, delete]     professor: course:[read]
//! ```
//!
//! Misconfiguration (a grant outside the statement table, a conflicting
//! statement) is an error while building. `can()` never fails; unknown
//! roles, kinds, and actions answer `false`.
//!
//! ## Usage
//!
//! ```rust
//! use campus_rbac::{AccessControl, Action, ResourceKind, UniversityRole};
//!
//! // Built once at bootstrap, then shared
//! let access = AccessControl::university().unwrap();
//!
//! assert!(access.can("professor", ResourceKind::Grade, Action::Update));
//! assert!(!access.can("student", ResourceKind::Grade, Action::Create));
//! assert!(access.can_role(UniversityRole::Bursar, ResourceKind::Fee, Action::Read));
//! assert!(!access.can("nonexistentRole", ResourceKind::Course, Action::Read));
//! ```

pub mod access;
pub mod actions;
pub mod error;
pub mod permissions;
pub mod resources;
pub mod roles;
pub mod statements;
pub mod university;

// Re-export main types for convenience
pub use access::{AccessControl, AccessControlBuilder};
pub use actions::Action;
pub use error::{InvalidGrantError, RbacError, RbacResult};
pub use permissions::{Permission, PermissionSet};
pub use resources::{ResourceKind, ResourceScope};
pub use roles::{Grants, Role, UniversityRole};
pub use statements::StatementRegistry;
