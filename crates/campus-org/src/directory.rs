//! In-memory university directory
//!
//! Holds universities, course groups, memberships and admission offers, and
//! runs every mutating operation through the injected access control. The
//! acting user's permissions always come from the membership active in their
//! [`SessionContext`].

use campus_rbac::{AccessControl, Action, ResourceKind, UniversityRole};
use chrono::Duration;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::admission::{AdmissionOffer, OfferStatus};
use crate::config::TenancyConfig;
use crate::context::{ActiveMembership, SessionContext};
use crate::course_group::CourseGroup;
use crate::error::{OrgError, OrgResult};
use crate::membership::{MemberProfile, Membership};
use crate::university::{NewUniversity, University};

/// Directory of universities and everything they own.
#[derive(Debug)]
pub struct UniversityDirectory {
    access: Arc<AccessControl>,
    config: TenancyConfig,
    universities: HashMap<Uuid, University>,
    course_groups: HashMap<Uuid, CourseGroup>,
    memberships: HashMap<Uuid, Membership>,
    offers: HashMap<Uuid, AdmissionOffer>,
}

impl UniversityDirectory {
    /// Creates an empty directory.
    pub fn new(access: Arc<AccessControl>, config: TenancyConfig) -> Self {
        Self {
            access,
            config,
            universities: HashMap::new(),
            course_groups: HashMap::new(),
            memberships: HashMap::new(),
            offers: HashMap::new(),
        }
    }

    /// Access control used for every check.
    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    /// Tenancy configuration.
    pub fn config(&self) -> &TenancyConfig {
        &self.config
    }

    /// Create a university.
    ///
    /// `actor_role` is the creator's role elsewhere on the platform, if any.
    /// Creation is allowed for roles that may create universities, or for
    /// anyone when the configuration opens it up. The creator is enrolled
    /// with the configured creator role.
    ///
    /// # Errors
    ///
    /// - [`OrgError::CreationNotAllowed`] if the actor may not create
    /// - [`OrgError::Duplicate`] if the code is taken
    pub fn create_university(
        &mut self,
        actor_id: Uuid,
        actor_role: Option<UniversityRole>,
        creator_name: &str,
        request: NewUniversity,
    ) -> OrgResult<&University> {
        let allowed = self.config.allow_user_to_create_university
            || actor_role.is_some_and(|role| role.can_create_university());
        if !allowed {
            // A user without any role is reported as a student-level actor
            return Err(OrgError::CreationNotAllowed(
                actor_role.unwrap_or(UniversityRole::Student),
            ));
        }

        if self.university_by_code(&request.code).is_some() {
            return Err(OrgError::Duplicate {
                field: "code",
                value: request.code,
            });
        }

        let university = University::from_request(request, actor_id);
        let creator_role = self.config.creator_role;
        let membership = Membership::new(
            university.id,
            actor_id,
            creator_role,
            creator_name,
            MemberProfile::default_for(creator_role),
        )?;

        info!(
            university_id = %university.id,
            code = %university.code,
            created_by = %actor_id,
            creator_role = %creator_role,
            "University created"
        );

        let id = university.id;
        self.memberships.insert(membership.id, membership);
        Ok(&*self.universities.entry(id).or_insert(university))
    }

    /// Add a course group to the active university.
    ///
    /// Gated on `course:create`; no built-in role holds the generic
    /// `team:create`.
    ///
    /// # Errors
    ///
    /// - authorization errors from [`Self::authorize`]
    /// - [`OrgError::LimitReached`] at `maximum_course_groups`
    pub fn add_course_group(
        &mut self,
        session: &SessionContext,
        group: CourseGroup,
    ) -> OrgResult<&CourseGroup> {
        let active = self.authorize(session, ResourceKind::Course, Action::Create)?;
        if group.university_id != active.university_id {
            return Err(OrgError::NotAMember {
                user_id: session.user_id,
                university_id: group.university_id,
            });
        }

        let count = self.course_groups_in(active.university_id).count();
        if count >= self.config.maximum_course_groups as usize {
            return Err(OrgError::LimitReached {
                what: "course group",
                limit: self.config.maximum_course_groups,
            });
        }

        debug!(
            university_id = %active.university_id,
            course_code = %group.course_code,
            "Course group added"
        );
        let id = group.id;
        Ok(&*self.course_groups.entry(id).or_insert(group))
    }

    /// Issue an admission offer from the active university.
    ///
    /// # Errors
    ///
    /// - authorization errors from [`Self::authorize`]
    /// - [`OrgError::Duplicate`] if the email already has a pending offer
    pub fn issue_offer(
        &mut self,
        session: &SessionContext,
        email: &str,
        intended_role: UniversityRole,
        programme: &str,
    ) -> OrgResult<&AdmissionOffer> {
        let active = self.authorize(session, ResourceKind::Invitation, Action::Create)?;
        let email = email.trim().to_lowercase();

        let pending = self.offers.values().any(|o| {
            o.university_id == active.university_id
                && o.status == OfferStatus::Pending
                && !o.is_expired()
                && o.email == email
        });
        if pending {
            return Err(OrgError::Duplicate {
                field: "email",
                value: email,
            });
        }

        let validity = Duration::days(i64::from(self.config.offer_validity_days));
        let offer = AdmissionOffer::new(
            active.university_id,
            email,
            intended_role,
            programme,
            session.user_id,
            validity,
        );

        info!(
            offer_id = %offer.id,
            university_id = %offer.university_id,
            email = %offer.email,
            intended_role = %intended_role,
            "Admission offer sent"
        );
        let id = offer.id;
        Ok(&*self.offers.entry(id).or_insert(offer))
    }

    /// Cancel a pending admission offer of the active university.
    pub fn cancel_offer(&mut self, session: &SessionContext, offer_id: Uuid) -> OrgResult<()> {
        let active = self.authorize(session, ResourceKind::Invitation, Action::Cancel)?;
        let offer = self
            .offers
            .get_mut(&offer_id)
            .filter(|o| o.university_id == active.university_id)
            .ok_or(OrgError::NotFound {
                entity: "admission offer",
                id: offer_id,
            })?;
        offer.cancel()?;
        debug!(offer_id = %offer_id, "Admission offer canceled");
        Ok(())
    }

    /// Accept an admission offer, enrolling the user with the offer's role.
    ///
    /// `email` is the accepting user's verified address; it must match the
    /// address the offer was issued to.
    ///
    /// # Errors
    ///
    /// - [`OrgError::NotFound`] for an unknown offer
    /// - [`OrgError::NotRecipient`] if `email` is not the offer's address
    /// - [`OrgError::LimitReached`] at `membership_limit`
    /// - [`OrgError::Duplicate`] if the user is already enrolled or the
    ///   university number is taken
    /// - offer state and profile errors from [`AdmissionOffer::accept`]
    pub fn accept_offer(
        &mut self,
        offer_id: Uuid,
        user_id: Uuid,
        email: &str,
        full_name: &str,
        profile: MemberProfile,
        university_number: Option<&str>,
    ) -> OrgResult<&Membership> {
        let offer = self.offers.get(&offer_id).ok_or(OrgError::NotFound {
            entity: "admission offer",
            id: offer_id,
        })?;
        if !offer.is_addressed_to(email) {
            return Err(OrgError::NotRecipient(offer_id));
        }
        let university_id = offer.university_id;

        let members: Vec<&Membership> = self.members(university_id).collect();
        if members.len() >= self.config.membership_limit as usize {
            return Err(OrgError::LimitReached {
                what: "membership",
                limit: self.config.membership_limit,
            });
        }
        if members.iter().any(|m| m.user_id == user_id) {
            return Err(OrgError::Duplicate {
                field: "user_id",
                value: user_id.to_string(),
            });
        }
        if let Some(number) = university_number {
            if members
                .iter()
                .any(|m| m.university_number.as_deref() == Some(number))
            {
                return Err(OrgError::Duplicate {
                    field: "university_number",
                    value: number.to_string(),
                });
            }
        }

        let offer = self.offers.get_mut(&offer_id).ok_or(OrgError::NotFound {
            entity: "admission offer",
            id: offer_id,
        })?;
        let mut membership = offer.accept(user_id, full_name, profile)?;
        if let Some(number) = university_number {
            membership = membership.with_university_number(number);
        }

        info!(
            offer_id = %offer_id,
            university_id = %university_id,
            user_id = %user_id,
            role = %membership.role,
            "Admission offer accepted"
        );
        let id = membership.id;
        Ok(&*self.memberships.entry(id).or_insert(membership))
    }

    /// Change a member's role in the active university.
    pub fn change_member_role(
        &mut self,
        session: &SessionContext,
        membership_id: Uuid,
        role: UniversityRole,
        profile: MemberProfile,
    ) -> OrgResult<&Membership> {
        let active = self.authorize(session, ResourceKind::Member, Action::Update)?;
        let membership = self.member_mut(active.university_id, membership_id)?;
        let previous = membership.role;
        membership.change_role(role, profile)?;
        info!(
            membership_id = %membership_id,
            from = %previous,
            to = %role,
            "Member role changed"
        );
        Ok(&*membership)
    }

    /// Remove a member from the active university. The membership is
    /// deactivated, not deleted.
    pub fn remove_member(&mut self, session: &SessionContext, membership_id: Uuid) -> OrgResult<()> {
        let active = self.authorize(session, ResourceKind::Member, Action::Delete)?;
        let membership = self.member_mut(active.university_id, membership_id)?;
        membership.deactivate();
        info!(
            membership_id = %membership_id,
            university_id = %active.university_id,
            "Member removed"
        );
        Ok(())
    }

    /// Check a session against the directory.
    ///
    /// The session's active role must grant the permission, and the
    /// directory must still hold a matching active membership. A stale
    /// session (removed member, changed role) is rejected.
    pub fn authorize(
        &self,
        session: &SessionContext,
        kind: ResourceKind,
        action: Action,
    ) -> OrgResult<ActiveMembership> {
        let active = session.require(&self.access, kind, action)?;
        let current = self
            .members(active.university_id)
            .any(|m| m.user_id == session.user_id && m.role == active.role);
        if !current {
            return Err(OrgError::NotAMember {
                user_id: session.user_id,
                university_id: active.university_id,
            });
        }
        Ok(active)
    }

    /// Active memberships of a user across universities.
    pub fn memberships_for_user(&self, user_id: Uuid) -> Vec<&Membership> {
        self.memberships
            .values()
            .filter(|m| m.is_active && m.user_id == user_id)
            .collect()
    }

    /// Build a session context for a user from their active memberships.
    pub fn session_for(&self, user_id: Uuid) -> SessionContext {
        SessionContext::from_memberships(user_id, self.memberships_for_user(user_id))
    }

    /// Get a university by ID.
    pub fn university(&self, id: Uuid) -> Option<&University> {
        self.universities.get(&id)
    }

    /// Get a university by code (case-insensitive).
    pub fn university_by_code(&self, code: &str) -> Option<&University> {
        self.universities
            .values()
            .find(|u| u.code.eq_ignore_ascii_case(code))
    }

    /// Get a membership by ID.
    pub fn membership(&self, id: Uuid) -> Option<&Membership> {
        self.memberships.get(&id)
    }

    /// Get an admission offer by ID.
    pub fn offer(&self, id: Uuid) -> Option<&AdmissionOffer> {
        self.offers.get(&id)
    }

    /// Active members of a university.
    pub fn members(&self, university_id: Uuid) -> impl Iterator<Item = &Membership> {
        self.memberships
            .values()
            .filter(move |m| m.is_active && m.university_id == university_id)
    }

    /// Course groups of a university.
    pub fn course_groups_in(&self, university_id: Uuid) -> impl Iterator<Item = &CourseGroup> {
        self.course_groups
            .values()
            .filter(move |g| g.university_id == university_id)
    }

    fn member_mut(&mut self, university_id: Uuid, membership_id: Uuid) -> OrgResult<&mut Membership> {
        self.memberships
            .get_mut(&membership_id)
            .filter(|m| m.is_active && m.university_id == university_id)
            .ok_or(OrgError::NotFound {
                entity: "membership",
                id: membership_id,
            })
    }
}
