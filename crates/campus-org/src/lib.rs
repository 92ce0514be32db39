//! # Campus Tenancy
//!
//! This crate provides multi-tenant university management for the campus
//! portal.
//!
//! ## Overview
//!
//! The campus-org crate handles:
//! - **Universities**: Top-level tenants with faculty and programme data
//! - **Course groups**: Sections of courses within a university
//! - **Memberships**: User enrollment with a per-university role
//! - **Admission offers**: Invitations that become memberships
//! - **Context**: Session context for university switching
//! - **Schema**: Mapping from the auth collaborator's generic tenancy model
//!
//! ## Architecture
//!
//! ```text
//! User
//!   ├─ Membership (role, profile) ─→ University
//!   │                                   ├─ CourseGroup
//!   │                                   └─ AdmissionOffer ─→ Membership
//!   └─ SessionContext (active university)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use campus_org::{MemberProfile, NewUniversity, TenancyConfig, UniversityDirectory};
//! use campus_rbac::{AccessControl, UniversityRole};
//! use uuid::Uuid;
//!
//! let access = Arc::new(AccessControl::university().unwrap());
//! let mut directory = UniversityDirectory::new(access, TenancyConfig::default());
//!
//! let registrar = Uuid::now_v7();
//! let uni = directory
//!     .create_university(registrar, Some(UniversityRole::Registrar), "Registrar", NewUniversity::new("Test University", "TU"))
//!     .unwrap()
//!     .id;
//!
//! let mut session = directory.session_for(registrar);
//! session.switch_university(uni).unwrap();
//!
//! let offer = directory
//!     .issue_offer(&session, "student@tu.edu", UniversityRole::Student, "BSc Computer Science")
//!     .unwrap()
//!     .id;
//! let student = Uuid::now_v7();
//! directory
//!     .accept_offer(offer, student, "student@tu.edu", "Amal", MemberProfile::default_for(UniversityRole::Student), None)
//!     .unwrap();
//! assert_eq!(directory.session_for(student).role_in(uni), Some(UniversityRole::Student));
//! ```

pub mod admission;
pub mod config;
pub mod context;
pub mod course_group;
pub mod directory;
pub mod error;
pub mod membership;
pub mod schema;
pub mod university;

pub use admission::{AdmissionOffer, OfferStatus};
pub use config::TenancyConfig;
pub use context::{ActiveMembership, SessionContext};
pub use course_group::CourseGroup;
pub use directory::UniversityDirectory;
pub use error::{OrgError, OrgResult};
pub use membership::{AcademicRecord, MemberProfile, Membership, ProfileKind, StaffRecord};
pub use schema::{AdditionalField, FieldType, ModelMapping, SchemaMapping, TenancyModel};
pub use university::{DegreeType, NewUniversity, University};
