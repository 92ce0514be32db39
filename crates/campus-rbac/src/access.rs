//! # Access Control
//!
//! The immutable statement registry + role table pair that answers
//! "can role R perform action A on kind K". Assemble it once at bootstrap
//! with [`AccessControlBuilder`] and hand it to consumers by reference or
//! `Arc`.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::actions::Action;
use crate::error::{InvalidGrantError, RbacResult};
use crate::permissions::{Permission, PermissionSet};
use crate::resources::ResourceKind;
use crate::roles::{Grants, Role, UniversityRole};
use crate::statements::StatementRegistry;

/// Builder that validates role definitions against a statement registry.
///
/// # Example
///
/// ```
/// use campus_rbac::{AccessControlBuilder, Action, Grants, ResourceKind, StatementRegistry};
///
/// let mut statements = StatementRegistry::new();
/// statements
///     .register(
///         ResourceKind::Course,
///         [Action::Create, Action::Read, Action::Update, Action::Delete],
///     )
///     .unwrap();
///
/// let mut builder = AccessControlBuilder::new(statements);
/// builder
///     .define_role("professor", Grants::new().allow(ResourceKind::Course, [Action::Read]))
///     .unwrap();
/// let access = builder.build();
///
/// assert!(access.can("professor", ResourceKind::Course, Action::Read));
/// assert!(!access.can("professor", ResourceKind::Course, Action::Delete));
/// assert!(!access.can("nonexistentRole", ResourceKind::Course, Action::Read));
/// ```
#[derive(Debug, Clone)]
pub struct AccessControlBuilder {
    statements: StatementRegistry,
    roles: BTreeMap<String, Role>,
}

impl AccessControlBuilder {
    /// Start building from a populated statement registry.
    pub fn new(statements: StatementRegistry) -> Self {
        Self {
            statements,
            roles: BTreeMap::new(),
        }
    }

    /// Define a role from its grants.
    ///
    /// Every grant must be a registered statement. On failure nothing is
    /// registered. Defining an existing name replaces the previous role.
    ///
    /// # Errors
    ///
    /// [`crate::RbacError::InvalidGrant`] for the first grant not found in
    /// the statement registry.
    pub fn define_role(&mut self, name: impl Into<String>, grants: Grants) -> RbacResult<&Role> {
        let name = name.into();

        if let Some(invalid) = grants
            .iter()
            .find(|p| !self.statements.is_valid_action(p.resource, p.action))
        {
            return Err(InvalidGrantError {
                role: name,
                resource: invalid.resource,
                action: invalid.action,
            }
            .into());
        }

        let role = Role::new(name.clone(), grants.into_permissions());
        match self.roles.get(&name) {
            Some(previous) if previous.permissions() != role.permissions() => {
                tracing::warn!(
                    role = %name,
                    previous = previous.permissions().len(),
                    replacement = role.permissions().len(),
                    "Role redefined with different grants"
                );
            }
            Some(_) => {}
            None => {
                tracing::debug!(role = %name, grants = role.permissions().len(), "Role defined");
            }
        }

        self.roles.insert(name.clone(), role);
        Ok(&self.roles[&name])
    }

    /// Define one of the built-in university roles.
    pub fn define_university_role(
        &mut self,
        role: UniversityRole,
        grants: Grants,
    ) -> RbacResult<&Role> {
        self.define_role(role.as_str(), grants)
    }

    /// Statement registry backing this builder.
    pub fn statements(&self) -> &StatementRegistry {
        &self.statements
    }

    /// Freeze the tables.
    pub fn build(self) -> AccessControl {
        AccessControl {
            statements: self.statements,
            roles: self.roles,
        }
    }
}

/// Frozen statement registry and role table.
///
/// Every check is a pure lookup and fails closed: unknown roles, kinds, or
/// actions answer `false`.
#[derive(Debug, Clone, Serialize)]
pub struct AccessControl {
    statements: StatementRegistry,
    roles: BTreeMap<String, Role>,
}

impl AccessControl {
    /// Check whether `role` may perform `action` on `kind`.
    pub fn can(&self, role: &str, kind: ResourceKind, action: Action) -> bool {
        self.roles
            .get(role)
            .is_some_and(|r| r.allows(kind, action))
    }

    /// Typed variant of [`AccessControl::can`] for built-in roles.
    pub fn can_role(&self, role: UniversityRole, kind: ResourceKind, action: Action) -> bool {
        self.can(role.as_str(), kind, action)
    }

    /// Check against raw strings, e.g. from a route handler.
    ///
    /// Kind and action strings that do not parse answer `false`.
    ///
    /// ```
    /// let access = campus_rbac::AccessControl::university().unwrap();
    /// assert!(access.can_str("student", "grade", "read"));
    /// assert!(!access.can_str("student", "grade", "create"));
    /// assert!(!access.can_str("student", "spaceship", "read"));
    /// ```
    pub fn can_str(&self, role: &str, kind: &str, action: &str) -> bool {
        match (ResourceKind::parse(kind), Action::parse(action)) {
            (Some(kind), Some(action)) => self.can(role, kind, action),
            _ => false,
        }
    }

    /// Check a combined permission.
    pub fn has_permission(&self, role: &str, permission: &Permission) -> bool {
        self.can(role, permission.resource, permission.action)
    }

    /// Look up a role by name.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// Check whether a role name is defined.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Iterate over defined roles in name order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// Permissions held by a role; empty for unknown roles.
    pub fn permissions_for(&self, role: &str) -> PermissionSet {
        self.roles
            .get(role)
            .map(|r| r.permissions().clone())
            .unwrap_or_default()
    }

    /// Statement registry backing these roles.
    pub fn statements(&self) -> &StatementRegistry {
        &self.statements
    }

    /// Check whether the statement registry allows `action` on `kind`.
    pub fn is_valid_action(&self, kind: ResourceKind, action: Action) -> bool {
        self.statements.is_valid_action(kind, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RbacError;

    fn registry() -> StatementRegistry {
        let mut statements = StatementRegistry::new();
        statements
            .register(
                ResourceKind::Course,
                [Action::Create, Action::Read, Action::Update, Action::Delete],
            )
            .unwrap();
        statements
            .register(ResourceKind::Grade, [Action::Create, Action::Read, Action::Update])
            .unwrap();
        statements
            .register(ResourceKind::Fee, [Action::Create, Action::Read, Action::Update])
            .unwrap();
        statements
    }

    #[test]
    fn test_define_role_and_check() {
        let mut builder = AccessControlBuilder::new(registry());
        builder
            .define_role("professor", Grants::new().allow(ResourceKind::Course, [Action::Read]))
            .unwrap();
        let access = builder.build();

        assert!(access.can("professor", ResourceKind::Course, Action::Read));
        assert!(!access.can("professor", ResourceKind::Course, Action::Delete));
    }

    #[test]
    fn test_student_cannot_create_grades() {
        let mut builder = AccessControlBuilder::new(registry());
        builder
            .define_university_role(
                UniversityRole::Student,
                Grants::new().allow(ResourceKind::Grade, [Action::Read]),
            )
            .unwrap();
        let access = builder.build();

        assert!(access.can_role(UniversityRole::Student, ResourceKind::Grade, Action::Read));
        assert!(!access.can_role(UniversityRole::Student, ResourceKind::Grade, Action::Create));
    }

    #[test]
    fn test_unknown_role_fails_closed() {
        let access = AccessControlBuilder::new(registry()).build();
        assert!(!access.can("nonexistentRole", ResourceKind::Course, Action::Read));
        assert!(access.permissions_for("nonexistentRole").is_empty());
    }

    #[test]
    fn test_invalid_grant_is_rejected_and_not_registered() {
        let mut builder = AccessControlBuilder::new(registry());
        let err = builder
            .define_role(
                "bursar",
                Grants::new()
                    .allow(ResourceKind::Fee, [Action::Read])
                    .allow(ResourceKind::Fee, [Action::Approve]),
            )
            .unwrap_err();

        assert_eq!(
            err,
            RbacError::InvalidGrant(InvalidGrantError {
                role: "bursar".to_string(),
                resource: ResourceKind::Fee,
                action: Action::Approve,
            })
        );

        let access = builder.build();
        assert!(!access.has_role("bursar"));
        assert!(!access.can("bursar", ResourceKind::Fee, Action::Read));
    }

    #[test]
    fn test_grant_on_unregistered_kind_is_rejected() {
        let mut builder = AccessControlBuilder::new(registry());
        let result = builder.define_role(
            "librarian",
            Grants::new().allow(ResourceKind::Library, [Action::Read]),
        );
        assert!(matches!(result, Err(RbacError::InvalidGrant(_))));
    }

    #[test]
    fn test_redefinition_with_same_grants_is_idempotent() {
        let grants = Grants::new().allow(ResourceKind::Course, [Action::Read]);
        let mut builder = AccessControlBuilder::new(registry());
        builder.define_role("ta", grants.clone()).unwrap();
        let before = builder.clone().build();
        builder.define_role("ta", grants).unwrap();
        let after = builder.build();

        for kind in ResourceKind::all() {
            for action in Action::all() {
                assert_eq!(before.can("ta", kind, action), after.can("ta", kind, action));
            }
        }
    }

    #[test]
    fn test_redefinition_overwrites() {
        let mut builder = AccessControlBuilder::new(registry());
        builder
            .define_role("hod", Grants::new().allow(ResourceKind::Course, [Action::Read]))
            .unwrap();
        builder
            .define_role("hod", Grants::new().allow(ResourceKind::Grade, [Action::Update]))
            .unwrap();
        let access = builder.build();

        assert!(!access.can("hod", ResourceKind::Course, Action::Read));
        assert!(access.can("hod", ResourceKind::Grade, Action::Update));
        assert_eq!(access.roles().count(), 1);
    }

    #[test]
    fn test_can_str_fails_closed_on_garbage() {
        let mut builder = AccessControlBuilder::new(registry());
        builder
            .define_role("professor", Grants::new().allow(ResourceKind::Course, [Action::Read]))
            .unwrap();
        let access = builder.build();

        assert!(access.can_str("professor", "courses", "view"));
        assert!(!access.can_str("professor", "course", "teleport"));
        assert!(!access.can_str("professor", "", ""));
    }

    #[test]
    fn test_has_permission() {
        let mut builder = AccessControlBuilder::new(registry());
        builder
            .define_role("bursar", Grants::new().allow(ResourceKind::Fee, [Action::Update]))
            .unwrap();
        let access = builder.build();

        let perm = Permission::parse("fee:update").unwrap();
        assert!(access.has_permission("bursar", &perm));
        assert!(!access.has_permission("student", &perm));
    }
}
