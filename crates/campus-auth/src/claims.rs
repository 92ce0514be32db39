//! Session claims
//!
//! This module defines the session payload the portal receives from its
//! auth collaborator. Role names arrive as strings and are only turned
//! into [`UniversityRole`]s when a [`SessionContext`] is built; a string
//! the portal does not define never becomes a role.

use campus_org::SessionContext;
use campus_rbac::UniversityRole;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Claims carried by a portal session.
///
/// # Example
///
/// ```rust
/// use campus_auth::SessionClaims;
/// use campus_rbac::UniversityRole;
/// use uuid::Uuid;
///
/// let uni = Uuid::now_v7();
/// let claims = SessionClaims::new(Uuid::now_v7(), "dean@tu.edu", chrono::Duration::hours(8))
///     .with_membership(uni, UniversityRole::Dean)
///     .with_active_university(uni);
///
/// assert_eq!(claims.active_role(), Some(UniversityRole::Dean));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,

    /// User email
    pub email: String,

    /// User display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Session ID
    pub session_id: String,

    /// Currently selected university
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_university: Option<Uuid>,

    /// Memberships (university ID → role name)
    #[serde(default)]
    pub memberships: HashMap<String, String>,
}

impl SessionClaims {
    /// Create claims for a user with no memberships.
    pub fn new(user_id: Uuid, email: impl Into<String>, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.into(),
            name: None,
            iat: now.timestamp(),
            exp: (now + duration).timestamp(),
            session_id: Uuid::now_v7().to_string(),
            active_university: None,
            memberships: HashMap::new(),
        }
    }

    /// Create claims mirroring a session context.
    pub fn from_context(ctx: &SessionContext, email: impl Into<String>, duration: Duration) -> Self {
        let mut claims = Self::new(ctx.user_id, email, duration);
        for (university_id, role) in &ctx.memberships {
            claims = claims.with_membership(*university_id, *role);
        }
        claims.active_university = ctx.active_university_id;
        claims
    }

    /// Get the user ID as UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Check if the session is expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get expiration as DateTime.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_default()
    }

    /// Raw role name held in a university.
    pub fn role_name_in(&self, university_id: Uuid) -> Option<&str> {
        self.memberships
            .get(&university_id.to_string())
            .map(String::as_str)
    }

    /// Role held in a university, if it is a portal role.
    ///
    /// The name must match the stored spelling exactly, the same way
    /// [`AccessControl::can`](campus_rbac::AccessControl::can) matches it.
    pub fn role_in(&self, university_id: Uuid) -> Option<UniversityRole> {
        self.role_name_in(university_id).and_then(stored_role)
    }

    /// Role in the active university.
    pub fn active_role(&self) -> Option<UniversityRole> {
        self.active_university.and_then(|id| self.role_in(id))
    }

    /// Add a membership.
    pub fn with_membership(mut self, university_id: Uuid, role: UniversityRole) -> Self {
        self.memberships
            .insert(university_id.to_string(), role.as_str().to_string());
        self
    }

    /// Set the active university.
    pub fn with_active_university(mut self, university_id: Uuid) -> Self {
        self.active_university = Some(university_id);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build a session context.
    ///
    /// Memberships with malformed university IDs or unknown role names are
    /// dropped. An active university without a surviving membership leaves
    /// the context with nothing active.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingClaim`] if `sub` or `session_id` is empty
    /// - [`AuthError::InvalidSession`] if `sub` is not a user ID
    pub fn to_context(&self) -> AuthResult<SessionContext> {
        if self.sub.is_empty() {
            return Err(AuthError::MissingClaim("sub".to_string()));
        }
        if self.session_id.is_empty() {
            return Err(AuthError::MissingClaim("session_id".to_string()));
        }
        let user_id = self
            .user_id()
            .ok_or_else(|| AuthError::InvalidSession("subject is not a user id".to_string()))?;

        let mut ctx = SessionContext::new(user_id);
        for (university, role) in &self.memberships {
            let parsed = Uuid::parse_str(university)
                .ok()
                .zip(stored_role(role));
            match parsed {
                Some((university_id, role)) => ctx.add_membership(university_id, role),
                None => tracing::debug!(
                    university = %university,
                    role = %role,
                    "Dropping unrecognized membership claim"
                ),
            }
        }

        if let Some(active) = self.active_university {
            if ctx.switch_university(active).is_err() {
                tracing::debug!(
                    university = %active,
                    "Active university has no recognized membership"
                );
            }
        }
        Ok(ctx)
    }
}

/// Role whose stored name is exactly `raw`.
fn stored_role(raw: &str) -> Option<UniversityRole> {
    UniversityRole::all()
        .into_iter()
        .find(|role| role.as_str() == raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::now_v7();
        let claims = SessionClaims::new(user_id, "test@example.com", Duration::hours(1));

        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.email, "test@example.com");
        assert!(!claims.is_expired());
        assert!(claims.active_role().is_none());
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = SessionClaims::new(Uuid::now_v7(), "test@example.com", Duration::hours(1));
        claims.exp = Utc::now().timestamp() - 3600;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_unknown_role_is_dropped() {
        let uni = Uuid::now_v7();
        let mut claims = SessionClaims::new(Uuid::now_v7(), "x@tu.edu", Duration::hours(1))
            .with_active_university(uni);
        claims
            .memberships
            .insert(uni.to_string(), "janitor".to_string());

        assert_eq!(claims.role_name_in(uni), Some("janitor"));
        assert!(claims.role_in(uni).is_none());

        let ctx = claims.to_context().unwrap();
        assert!(ctx.memberships.is_empty());
        assert!(ctx.active().is_none());
    }

    #[test]
    fn test_to_context_activates_university() {
        let uni = Uuid::now_v7();
        let other = Uuid::now_v7();
        let claims = SessionClaims::new(Uuid::now_v7(), "x@tu.edu", Duration::hours(1))
            .with_membership(uni, UniversityRole::Hod)
            .with_membership(other, UniversityRole::Parent)
            .with_active_university(uni);

        let ctx = claims.to_context().unwrap();
        assert_eq!(ctx.active_role(), Some(UniversityRole::Hod));
        assert_eq!(ctx.role_in(other), Some(UniversityRole::Parent));
    }

    #[test]
    fn test_role_names_use_stored_spelling() {
        let uni = Uuid::now_v7();
        let claims = SessionClaims::new(Uuid::now_v7(), "a@tu.edu", Duration::hours(1))
            .with_membership(uni, UniversityRole::SuperAdmin);
        assert_eq!(claims.role_name_in(uni), Some("superAdmin"));
    }

    #[test]
    fn test_role_spelling_variants_are_dropped() {
        let uni = Uuid::now_v7();
        for raw in ["SUPERADMIN", "super_admin", "superadmin", " student ", "Student"] {
            let mut claims = SessionClaims::new(Uuid::now_v7(), "x@tu.edu", Duration::hours(1))
                .with_active_university(uni);
            claims.memberships.insert(uni.to_string(), raw.to_string());

            assert!(claims.role_in(uni).is_none(), "{raw} should not resolve");
            let ctx = claims.to_context().unwrap();
            assert!(ctx.memberships.is_empty(), "{raw} should be dropped");
            assert!(ctx.active().is_none());
        }
    }

    #[test]
    fn test_active_university_without_membership_stays_inactive() {
        let member_of = Uuid::now_v7();
        let elsewhere = Uuid::now_v7();
        let claims = SessionClaims::new(Uuid::now_v7(), "x@tu.edu", Duration::hours(1))
            .with_membership(member_of, UniversityRole::Student)
            .with_active_university(elsewhere);

        let ctx = claims.to_context().unwrap();
        assert!(ctx.active().is_none());
        assert_eq!(ctx.role_in(member_of), Some(UniversityRole::Student));
    }

    #[test]
    fn test_malformed_subject() {
        let mut claims = SessionClaims::new(Uuid::now_v7(), "a@tu.edu", Duration::hours(1));
        claims.sub = "not-a-uuid".to_string();
        assert!(matches!(claims.to_context(), Err(AuthError::InvalidSession(_))));

        claims.sub.clear();
        assert!(matches!(claims.to_context(), Err(AuthError::MissingClaim(_))));
    }

    #[test]
    fn test_parse_collaborator_payload() {
        let user = Uuid::now_v7();
        let uni = Uuid::now_v7();
        let payload = serde_json::json!({
            "sub": user.to_string(),
            "email": "prof@tu.edu",
            "iat": 1_700_000_000,
            "exp": 4_100_000_000i64,
            "session_id": "sess-1",
            "active_university": uni.to_string(),
            "memberships": { uni.to_string(): "professor" }
        });

        let claims: SessionClaims = serde_json::from_value(payload).unwrap();
        assert_eq!(claims.user_id(), Some(user));
        assert!(claims.name.is_none());
        assert_eq!(claims.active_role(), Some(UniversityRole::Professor));
    }

    #[test]
    fn test_from_context_round_trip() {
        let uni = Uuid::now_v7();
        let mut ctx = SessionContext::new(Uuid::now_v7());
        ctx.add_membership(uni, UniversityRole::Bursar);
        ctx.switch_university(uni).unwrap();

        let claims = SessionClaims::from_context(&ctx, "b@tu.edu", Duration::minutes(30));
        assert_eq!(claims.active_role(), Some(UniversityRole::Bursar));
        assert_eq!(claims.to_context().unwrap().active(), ctx.active());
    }
}
