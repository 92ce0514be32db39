//! Session context for university switching
//!
//! This module provides the SessionContext type that tracks which
//! university a user is currently working in. Authorization always uses the
//! role of the active membership; the user has no global role.

use campus_rbac::{AccessControl, Action, Permission, ResourceKind, UniversityRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{OrgError, OrgResult};
use crate::membership::Membership;

const MAX_RECENT_UNIVERSITIES: usize = 10;

/// The membership a session is acting through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMembership {
    /// University ID
    pub university_id: Uuid,
    /// Role held in that university
    pub role: UniversityRole,
}

/// A user's current working context.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use campus_org::SessionContext;
/// use campus_rbac::{AccessControl, Action, ResourceKind, UniversityRole};
///
/// let access = AccessControl::university().unwrap();
/// let uni = Uuid::now_v7();
///
/// let mut ctx = SessionContext::new(Uuid::now_v7());
/// ctx.add_membership(uni, UniversityRole::Student);
/// assert!(!ctx.can(&access, ResourceKind::Grade, Action::Read)); // nothing active yet
///
/// ctx.switch_university(uni).unwrap();
/// assert!(ctx.can(&access, ResourceKind::Grade, Action::Read));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// User ID
    pub user_id: Uuid,

    /// Roles per university the user belongs to
    #[serde(default)]
    pub memberships: HashMap<Uuid, UniversityRole>,

    /// Currently selected university
    pub active_university_id: Option<Uuid>,

    /// Recently accessed universities (most recent first)
    #[serde(default)]
    pub recent_universities: Vec<Uuid>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl SessionContext {
    /// Creates a context with no memberships.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            memberships: HashMap::new(),
            active_university_id: None,
            recent_universities: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Build a context from membership records, skipping inactive ones
    /// and memberships of other users.
    pub fn from_memberships<'a, I>(user_id: Uuid, memberships: I) -> Self
    where
        I: IntoIterator<Item = &'a Membership>,
    {
        let mut ctx = Self::new(user_id);
        for membership in memberships {
            if membership.is_active && membership.user_id == user_id {
                ctx.add_membership(membership.university_id, membership.role);
            }
        }
        ctx
    }

    /// Record the role held in a university.
    pub fn add_membership(&mut self, university_id: Uuid, role: UniversityRole) {
        self.memberships.insert(university_id, role);
        self.updated_at = Utc::now();
    }

    /// Drop a membership; clears the active university if it was this one.
    pub fn remove_membership(&mut self, university_id: Uuid) {
        self.memberships.remove(&university_id);
        if self.active_university_id == Some(university_id) {
            self.active_university_id = None;
        }
        self.recent_universities.retain(|id| *id != university_id);
        self.updated_at = Utc::now();
    }

    /// Switch to a university the user belongs to.
    ///
    /// # Errors
    ///
    /// [`OrgError::NotAMember`] if the user has no membership there; the
    /// active university is left unchanged.
    pub fn switch_university(&mut self, university_id: Uuid) -> OrgResult<()> {
        if !self.memberships.contains_key(&university_id) {
            return Err(OrgError::NotAMember {
                user_id: self.user_id,
                university_id,
            });
        }
        self.active_university_id = Some(university_id);
        self.recent_universities.retain(|id| *id != university_id);
        self.recent_universities.insert(0, university_id);
        self.recent_universities.truncate(MAX_RECENT_UNIVERSITIES);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Clear the active university.
    pub fn clear(&mut self) {
        self.active_university_id = None;
        self.updated_at = Utc::now();
    }

    /// The membership currently in effect.
    pub fn active(&self) -> Option<ActiveMembership> {
        let university_id = self.active_university_id?;
        let role = *self.memberships.get(&university_id)?;
        Some(ActiveMembership {
            university_id,
            role,
        })
    }

    /// Role in the active university.
    pub fn active_role(&self) -> Option<UniversityRole> {
        self.active().map(|a| a.role)
    }

    /// Role in a specific university.
    pub fn role_in(&self, university_id: Uuid) -> Option<UniversityRole> {
        self.memberships.get(&university_id).copied()
    }

    /// Check a permission against the active membership. Fails closed
    /// when no university is active.
    pub fn can(&self, access: &AccessControl, kind: ResourceKind, action: Action) -> bool {
        self.active_role()
            .is_some_and(|role| access.can_role(role, kind, action))
    }

    /// Require a permission on the active membership.
    ///
    /// # Errors
    ///
    /// - [`OrgError::NoActiveMembership`] if no university is active
    /// - [`OrgError::Forbidden`] if the role lacks the permission
    pub fn require(
        &self,
        access: &AccessControl,
        kind: ResourceKind,
        action: Action,
    ) -> OrgResult<ActiveMembership> {
        let active = self.active().ok_or(OrgError::NoActiveMembership)?;
        if access.can_role(active.role, kind, action) {
            Ok(active)
        } else {
            Err(OrgError::Forbidden {
                role: active.role,
                permission: Permission::new(kind, action),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::MemberProfile;

    fn access() -> AccessControl {
        AccessControl::university().unwrap()
    }

    #[test]
    fn test_no_active_membership_fails_closed() {
        let ctx = SessionContext::new(Uuid::now_v7());
        assert!(ctx.active().is_none());
        assert!(!ctx.can(&access(), ResourceKind::Course, Action::Read));
        assert_eq!(
            ctx.require(&access(), ResourceKind::Course, Action::Read),
            Err(OrgError::NoActiveMembership)
        );
    }

    #[test]
    fn test_role_differs_per_university() {
        let uni_a = Uuid::now_v7();
        let uni_b = Uuid::now_v7();
        let mut ctx = SessionContext::new(Uuid::now_v7());
        ctx.add_membership(uni_a, UniversityRole::Professor);
        ctx.add_membership(uni_b, UniversityRole::Student);

        ctx.switch_university(uni_a).unwrap();
        assert!(ctx.can(&access(), ResourceKind::Grade, Action::Update));

        ctx.switch_university(uni_b).unwrap();
        assert!(!ctx.can(&access(), ResourceKind::Grade, Action::Update));
        assert!(ctx.can(&access(), ResourceKind::Grade, Action::Read));
        assert_eq!(ctx.recent_universities, vec![uni_b, uni_a]);
    }

    #[test]
    fn test_switch_to_foreign_university_fails() {
        let mut ctx = SessionContext::new(Uuid::now_v7());
        let uni = Uuid::now_v7();
        ctx.add_membership(uni, UniversityRole::Dean);
        ctx.switch_university(uni).unwrap();

        let foreign = Uuid::now_v7();
        let err = ctx.switch_university(foreign).unwrap_err();
        assert!(matches!(err, OrgError::NotAMember { .. }));
        assert_eq!(ctx.active_university_id, Some(uni));
    }

    #[test]
    fn test_require_reports_missing_permission() {
        let uni = Uuid::now_v7();
        let mut ctx = SessionContext::new(Uuid::now_v7());
        ctx.add_membership(uni, UniversityRole::Ta);
        ctx.switch_university(uni).unwrap();

        let err = ctx
            .require(&access(), ResourceKind::Grade, Action::Update)
            .unwrap_err();
        assert_eq!(
            err,
            OrgError::Forbidden {
                role: UniversityRole::Ta,
                permission: Permission::new(ResourceKind::Grade, Action::Update),
            }
        );
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_remove_active_membership_clears_context() {
        let uni = Uuid::now_v7();
        let mut ctx = SessionContext::new(Uuid::now_v7());
        ctx.add_membership(uni, UniversityRole::Registrar);
        ctx.switch_university(uni).unwrap();

        ctx.remove_membership(uni);
        assert!(ctx.active().is_none());
        assert!(ctx.recent_universities.is_empty());
    }

    #[test]
    fn test_from_memberships_skips_inactive() {
        let user = Uuid::now_v7();
        let active = Membership::new(
            Uuid::now_v7(),
            user,
            UniversityRole::Librarian,
            "Nora",
            MemberProfile::default_for(UniversityRole::Librarian),
        )
        .unwrap();
        let mut inactive = Membership::new(
            Uuid::now_v7(),
            user,
            UniversityRole::Bursar,
            "Nora",
            MemberProfile::default_for(UniversityRole::Bursar),
        )
        .unwrap();
        inactive.deactivate();

        let ctx = SessionContext::from_memberships(user, [&active, &inactive]);
        assert_eq!(ctx.memberships.len(), 1);
        assert_eq!(
            ctx.role_in(active.university_id),
            Some(UniversityRole::Librarian)
        );
    }

    #[test]
    fn test_recent_universities_limit() {
        let mut ctx = SessionContext::new(Uuid::now_v7());
        for _ in 0..15 {
            let uni = Uuid::now_v7();
            ctx.add_membership(uni, UniversityRole::Student);
            ctx.switch_university(uni).unwrap();
        }
        assert_eq!(ctx.recent_universities.len(), MAX_RECENT_UNIVERSITIES);
    }
}
