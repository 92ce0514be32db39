//! Roles and grants
//!
//! A role is a named, flat bundle of permissions. Roles do not inherit from
//! each other; every role lists its grants explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::Action;
use crate::permissions::{Permission, PermissionSet};
use crate::resources::ResourceKind;

/// Grants used to define a role: a mapping of resource kind to a subset of
/// that kind's legal actions.
///
/// # Examples
///
/// ```
/// use campus_rbac::{Action, Grants, ResourceKind};
///
/// let grants = Grants::new()
///     .allow(ResourceKind::Grade, [Action::Read])
///     .allow(ResourceKind::Course, [Action::Read]);
/// assert_eq!(grants.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grants {
    permissions: PermissionSet,
}

impl Grants {
    /// Create an empty set of grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `actions` on `kind`. Repeated grants collapse.
    pub fn allow<I>(mut self, kind: ResourceKind, actions: I) -> Self
    where
        I: IntoIterator<Item = Action>,
    {
        self.permissions
            .add_all(actions.into_iter().map(|action| Permission::new(kind, action)));
        self
    }

    /// Number of distinct `(kind, action)` pairs.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if no grants were made.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Iterate over the granted permissions.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    pub(crate) fn into_permissions(self) -> PermissionSet {
        self.permissions
    }
}

impl FromIterator<Permission> for Grants {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

/// A named bundle of validated permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    name: String,
    permissions: PermissionSet,
}

impl Role {
    pub(crate) fn new(name: String, permissions: PermissionSet) -> Self {
        Self { name, permissions }
    }

    /// Role name as stored on membership records.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Permissions granted to this role.
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Check whether this role holds `action` on `kind`.
    pub fn allows(&self, kind: ResourceKind, action: Action) -> bool {
        self.permissions.has(&Permission::new(kind, action))
    }
}

/// Built-in university roles.
///
/// Serialized names match the role strings stored on membership records
/// (`superAdmin`, `registrar`, `hod`, ...).
///
/// # Examples
///
/// ```
/// use campus_rbac::UniversityRole;
///
/// assert_eq!(UniversityRole::parse("superAdmin"), Some(UniversityRole::SuperAdmin));
/// assert_eq!(UniversityRole::Hod.display_name(), "Head of Department");
/// assert!(UniversityRole::Registrar.can_create_university());
/// assert!(!UniversityRole::Professor.can_create_university());
/// ```
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "camelCase")]
pub enum UniversityRole {
    /// Platform-wide administrator
    SuperAdmin,
    /// Registrar's office
    Registrar,
    /// Dean of a faculty
    Dean,
    /// Head of department
    Hod,
    /// Teaching faculty
    Professor,
    /// Teaching assistant
    Ta,
    /// Enrolled student
    Student,
    /// Parent or guardian of a student
    Parent,
    /// Finance office
    Bursar,
    /// Library staff
    Librarian,
}

impl UniversityRole {
    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "superAdmin",
            Self::Registrar => "registrar",
            Self::Dean => "dean",
            Self::Hod => "hod",
            Self::Professor => "professor",
            Self::Ta => "ta",
            Self::Student => "student",
            Self::Parent => "parent",
            Self::Bursar => "bursar",
            Self::Librarian => "librarian",
        }
    }

    /// Parse role from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "superadmin" | "super_admin" => Some(Self::SuperAdmin),
            "registrar" => Some(Self::Registrar),
            "dean" => Some(Self::Dean),
            "hod" => Some(Self::Hod),
            "professor" => Some(Self::Professor),
            "ta" => Some(Self::Ta),
            "student" => Some(Self::Student),
            "parent" => Some(Self::Parent),
            "bursar" => Some(Self::Bursar),
            "librarian" => Some(Self::Librarian),
            _ => None,
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Registrar => "Registrar",
            Self::Dean => "Dean",
            Self::Hod => "Head of Department",
            Self::Professor => "Professor",
            Self::Ta => "Teaching Assistant",
            Self::Student => "Student",
            Self::Parent => "Parent",
            Self::Bursar => "Bursar",
            Self::Librarian => "Librarian",
        }
    }

    /// Get all built-in roles.
    pub fn all() -> Vec<Self> {
        vec![
            Self::SuperAdmin,
            Self::Registrar,
            Self::Dean,
            Self::Hod,
            Self::Professor,
            Self::Ta,
            Self::Student,
            Self::Parent,
            Self::Bursar,
            Self::Librarian,
        ]
    }

    /// Enrolled learners carry academic records.
    pub fn is_learner(&self) -> bool {
        matches!(self, Self::Student)
    }

    /// Guardians carry neither academic nor employment records.
    pub fn is_guardian(&self) -> bool {
        matches!(self, Self::Parent)
    }

    /// Staff carry employment records.
    pub fn is_staff(&self) -> bool {
        !self.is_learner() && !self.is_guardian()
    }

    /// Only registrars and above may create universities.
    pub fn can_create_university(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Registrar | Self::Dean)
    }
}

impl fmt::Display for UniversityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
