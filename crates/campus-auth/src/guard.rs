//! Permission guard
//!
//! Checks a session's active membership against the shared access-control
//! tables. `check` never errors and answers `false` for anything it cannot
//! resolve; `authorize` explains the refusal.

use campus_rbac::{AccessControl, Action, Permission, ResourceKind, UniversityRole};
use std::sync::Arc;
use tracing::debug;

use crate::claims::SessionClaims;
use crate::error::{AuthError, AuthResult};
use crate::routes::{PortalRoute, RouteAccess};

/// Guard shared across request handlers.
///
/// # Example
///
/// ```rust
/// use campus_auth::{PermissionGuard, PortalRoute, SessionClaims};
/// use campus_rbac::{Action, ResourceKind, UniversityRole};
/// use uuid::Uuid;
///
/// let guard = PermissionGuard::university().unwrap();
/// let uni = Uuid::now_v7();
/// let claims = SessionClaims::new(Uuid::now_v7(), "lib@tu.edu", chrono::Duration::hours(1))
///     .with_membership(uni, UniversityRole::Librarian)
///     .with_active_university(uni);
///
/// assert!(guard.check(&claims, ResourceKind::Library, Action::Delete));
/// assert!(!guard.check(&claims, ResourceKind::Grade, Action::Read));
/// assert_eq!(
///     guard.visible_routes(&claims),
///     vec![PortalRoute::Dashboard, PortalRoute::Library, PortalRoute::Chat]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PermissionGuard {
    access: Arc<AccessControl>,
}

impl PermissionGuard {
    /// Creates a guard over shared access-control tables.
    pub fn new(access: Arc<AccessControl>) -> Self {
        Self { access }
    }

    /// Creates a guard over the built-in university tables.
    pub fn university() -> AuthResult<Self> {
        Ok(Self::new(Arc::new(AccessControl::university()?)))
    }

    /// The underlying access control.
    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    /// Check a permission. Expired or malformed sessions, unknown roles and
    /// sessions without an active university all answer `false`.
    pub fn check(&self, claims: &SessionClaims, kind: ResourceKind, action: Action) -> bool {
        self.authorize(claims, kind, action).is_ok()
    }

    /// Require a permission.
    ///
    /// # Errors
    ///
    /// - [`AuthError::SessionExpired`] for an expired session
    /// - [`AuthError::Unauthorized`] when no university is active
    /// - [`AuthError::UnknownRole`] when the active role is not a portal role
    /// - [`AuthError::Forbidden`] when the role lacks the permission
    pub fn authorize(
        &self,
        claims: &SessionClaims,
        kind: ResourceKind,
        action: Action,
    ) -> AuthResult<()> {
        let permission = Permission::new(kind, action);
        let result = self.evaluate(claims, permission);
        if let Err(err) = &result {
            debug!(
                sub = %claims.sub,
                session_id = %claims.session_id,
                permission = %permission,
                reason = err.error_code(),
                "Permission denied"
            );
        }
        result
    }

    /// Check whether the session may open a route.
    pub fn can_access_route(&self, claims: &SessionClaims, route: PortalRoute) -> bool {
        match route.access() {
            RouteAccess::Permission(permission) => {
                self.check(claims, permission.resource, permission.action)
            }
            // Open routes still need a live session with an active membership
            RouteAccess::Member => self.evaluate_session(claims).is_ok(),
            RouteAccess::AnyAction(kind) => self.evaluate_session(claims).is_ok_and(|role| {
                Action::all()
                    .into_iter()
                    .any(|action| self.access.can_role(role, kind, action))
            }),
        }
    }

    /// Routes the session may open, in sidebar order.
    pub fn visible_routes(&self, claims: &SessionClaims) -> Vec<PortalRoute> {
        PortalRoute::all()
            .into_iter()
            .filter(|route| self.can_access_route(claims, *route))
            .collect()
    }

    fn evaluate(&self, claims: &SessionClaims, permission: Permission) -> AuthResult<()> {
        let role = self.evaluate_session(claims)?;
        if self
            .access
            .can_role(role, permission.resource, permission.action)
        {
            Ok(())
        } else {
            Err(AuthError::Forbidden { permission })
        }
    }

    fn evaluate_session(&self, claims: &SessionClaims) -> AuthResult<UniversityRole> {
        if claims.is_expired() {
            return Err(AuthError::SessionExpired);
        }
        let university = claims
            .active_university
            .ok_or_else(|| AuthError::Unauthorized("no active university".to_string()))?;
        let name = claims.role_name_in(university).ok_or_else(|| {
            AuthError::Unauthorized("not a member of the active university".to_string())
        })?;
        let ctx = claims.to_context()?;
        ctx.active_role()
            .ok_or_else(|| AuthError::UnknownRole(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn guard() -> PermissionGuard {
        PermissionGuard::university().unwrap()
    }

    fn claims_for(role: UniversityRole) -> SessionClaims {
        let uni = Uuid::now_v7();
        SessionClaims::new(Uuid::now_v7(), "user@tu.edu", Duration::hours(1))
            .with_membership(uni, role)
            .with_active_university(uni)
    }

    #[test]
    fn test_authorize_grants_and_denies() {
        let guard = guard();
        let claims = claims_for(UniversityRole::Professor);

        assert!(guard
            .authorize(&claims, ResourceKind::Grade, Action::Update)
            .is_ok());
        let err = guard
            .authorize(&claims, ResourceKind::Fee, Action::Read)
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert!(matches!(
            err,
            AuthError::Forbidden { permission } if permission.resource == ResourceKind::Fee
        ));
    }

    #[test]
    fn test_expired_session_is_unauthorized() {
        let guard = guard();
        let mut claims = claims_for(UniversityRole::SuperAdmin);
        claims.exp = Utc::now().timestamp() - 1;

        assert!(!guard.check(&claims, ResourceKind::Course, Action::Read));
        assert!(matches!(
            guard.authorize(&claims, ResourceKind::Course, Action::Read),
            Err(AuthError::SessionExpired)
        ));
        assert!(guard.visible_routes(&claims).is_empty());
    }

    #[test]
    fn test_no_active_university() {
        let guard = guard();
        let mut claims = claims_for(UniversityRole::Registrar);
        claims.active_university = None;

        let err = guard
            .authorize(&claims, ResourceKind::Member, Action::Create)
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_unknown_role_never_authorizes() {
        let guard = guard();
        let uni = Uuid::now_v7();
        let mut claims = SessionClaims::new(Uuid::now_v7(), "x@tu.edu", Duration::hours(1))
            .with_active_university(uni);
        claims.memberships.insert(uni.to_string(), "admin".to_string());

        for kind in ResourceKind::all() {
            for action in Action::all() {
                assert!(!guard.check(&claims, kind, action));
            }
        }
        assert!(matches!(
            guard.authorize(&claims, ResourceKind::Course, Action::Read),
            Err(AuthError::UnknownRole(role)) if role == "admin"
        ));
        assert!(!guard.can_access_route(&claims, PortalRoute::Dashboard));
    }

    #[test]
    fn test_role_spelling_must_match_exactly() {
        let guard = guard();
        let uni = Uuid::now_v7();
        for raw in ["SUPERADMIN", "super_admin", " Student "] {
            let mut claims = SessionClaims::new(Uuid::now_v7(), "x@tu.edu", Duration::hours(1))
                .with_active_university(uni);
            claims.memberships.insert(uni.to_string(), raw.to_string());

            assert!(!guard.access().can(raw, ResourceKind::Grade, Action::Read));
            assert!(!guard.check(&claims, ResourceKind::Grade, Action::Read));
            assert!(matches!(
                guard.authorize(&claims, ResourceKind::Grade, Action::Read),
                Err(AuthError::UnknownRole(role)) if role == raw
            ));
            assert!(guard.visible_routes(&claims).is_empty());
        }
    }

    #[test]
    fn test_course_pages_open_for_course_managers() {
        let guard = guard();
        for role in [UniversityRole::Registrar, UniversityRole::Dean, UniversityRole::Hod] {
            let claims = claims_for(role);
            assert!(!guard.check(&claims, ResourceKind::Course, Action::Read));
            for route in [PortalRoute::Courses, PortalRoute::Calendar, PortalRoute::Assignments] {
                assert!(guard.can_access_route(&claims, route), "{role:?} {route}");
            }
        }
        assert_eq!(
            guard.visible_routes(&claims_for(UniversityRole::Registrar)),
            vec![
                PortalRoute::Dashboard,
                PortalRoute::Courses,
                PortalRoute::Calendar,
                PortalRoute::Grades,
                PortalRoute::Assignments,
                PortalRoute::Attendance,
                PortalRoute::Chat,
            ]
        );
    }

    #[test]
    fn test_visible_routes_per_role() {
        let guard = guard();

        let student = guard.visible_routes(&claims_for(UniversityRole::Student));
        assert_eq!(student.len(), 7);
        assert!(!student.contains(&PortalRoute::Library));
        assert_eq!(
            guard.visible_routes(&claims_for(UniversityRole::SuperAdmin)),
            PortalRoute::all().to_vec()
        );
        assert_eq!(
            guard.visible_routes(&claims_for(UniversityRole::Parent)),
            vec![
                PortalRoute::Dashboard,
                PortalRoute::Grades,
                PortalRoute::Attendance,
                PortalRoute::Chat,
            ]
        );
        assert_eq!(
            guard.visible_routes(&claims_for(UniversityRole::Bursar)),
            vec![PortalRoute::Dashboard, PortalRoute::Chat]
        );
    }
}
