//! # Permissions
//!
//! Core permission types and sets for the RBAC system.
//! A permission combines a resource kind with an action.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::actions::Action;
use crate::resources::ResourceKind;

/// A permission is a combination of resource kind and action.
///
/// # Example
///
/// ```
/// use campus_rbac::permissions::Permission;
/// use campus_rbac::resources::ResourceKind;
/// use campus_rbac::actions::Action;
///
/// let perm = Permission::new(ResourceKind::Course, Action::Read);
/// assert_eq!(perm.to_string(), "course:read");
/// assert_eq!(Permission::parse("course:read"), Some(perm));
/// ```
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Permission {
    /// The resource kind this permission applies to.
    pub resource: ResourceKind,
    /// The action allowed on the resource.
    pub action: Action,
}

impl Permission {
    /// Create a new permission.
    pub fn new(resource: ResourceKind, action: Action) -> Self {
        Self { resource, action }
    }

    /// Parse from string (e.g., "course:read").
    ///
    /// # Returns
    ///
    /// `Some(Permission)` if both halves parse, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        let (resource, action) = s.split_once(':')?;
        Some(Self {
            resource: ResourceKind::parse(resource)?,
            action: Action::parse(action)?,
        })
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource.as_str(), self.action.as_str())
    }
}

/// A set of permissions granted to a role.
///
/// Adding a permission twice leaves the set unchanged, so duplicate grants
/// collapse to one.
///
/// # Example
///
/// ```
/// use campus_rbac::permissions::{Permission, PermissionSet};
/// use campus_rbac::resources::ResourceKind;
/// use campus_rbac::actions::Action;
///
/// let mut set = PermissionSet::new();
/// set.add(Permission::new(ResourceKind::Grade, Action::Read));
/// set.add(Permission::new(ResourceKind::Grade, Action::Read));
///
/// assert!(set.has(&Permission::new(ResourceKind::Grade, Action::Read)));
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    permissions: BTreeSet<Permission>,
}

impl PermissionSet {
    /// Create a new empty permission set.
    pub fn new() -> Self {
        Self {
            permissions: BTreeSet::new(),
        }
    }

    /// Add a permission to the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was not already present
    pub fn add(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Add multiple permissions to the set.
    pub fn add_all<I>(&mut self, permissions: I)
    where
        I: IntoIterator<Item = Permission>,
    {
        self.permissions.extend(permissions);
    }

    /// Remove a permission from the set.
    ///
    /// # Returns
    ///
    /// `true` if the permission was present, `false` otherwise
    pub fn remove(&mut self, permission: &Permission) -> bool {
        self.permissions.remove(permission)
    }

    /// Check if the set contains a permission.
    ///
    /// Matching is exact: no action implies another.
    pub fn has(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }

    /// Iterate over the permissions in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter()
    }

    /// Get the actions granted on one resource kind.
    pub fn for_resource(&self, resource: ResourceKind) -> Vec<Action> {
        self.permissions
            .iter()
            .filter(|p| p.resource == resource)
            .map(|p| p.action)
            .collect()
    }

    /// Merge another permission set into this one.
    pub fn merge(&mut self, other: &PermissionSet) {
        self.permissions.extend(other.permissions.iter().copied());
    }

    /// Create from a list of permission strings, skipping any that do not parse.
    ///
    /// ```
    /// use campus_rbac::permissions::PermissionSet;
    ///
    /// let set = PermissionSet::from_strings(&["grade:read", "course:read", "nope"]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn from_strings(perms: &[&str]) -> Self {
        perms.iter().filter_map(|p| Permission::parse(p)).collect()
    }

    /// Get the count of permissions.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Check if this set contains all permissions from another set.
    pub fn contains_all(&self, other: &PermissionSet) -> bool {
        other.permissions.is_subset(&self.permissions)
    }

    /// Check if this set contains any permission from another set.
    pub fn contains_any(&self, other: &PermissionSet) -> bool {
        !self.permissions.is_disjoint(&other.permissions)
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = std::collections::btree_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}
