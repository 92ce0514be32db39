//! Admission offers
//!
//! An admission offer invites someone (by email) to join a university with
//! a given role. Accepting it creates the membership, which carries the
//! role fixed on the offer.

use campus_rbac::UniversityRole;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OrgError, OrgResult};
use crate::membership::{MemberProfile, Membership};

/// Lifecycle of an admission offer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Waiting for a response
    Pending,
    /// Accepted; a membership exists
    Accepted,
    /// Declined by the recipient
    Rejected,
    /// Withdrawn by the university
    Canceled,
    /// Validity window passed
    Expired,
}

impl OfferStatus {
    /// Check if the offer can no longer change.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// An admission offer to join a university.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionOffer {
    /// Unique identifier
    pub id: Uuid,

    /// University making the offer
    pub university_id: Uuid,

    /// Recipient email
    pub email: String,

    /// Role the membership will carry
    pub intended_role: UniversityRole,

    /// Programme offered
    pub programme: String,

    /// Admission type (e.g. "regular", "transfer")
    pub admission_type: Option<String>,

    /// Current status
    pub status: OfferStatus,

    /// User who issued the offer
    pub issued_by: Uuid,

    /// When the offer was issued
    pub created_at: DateTime<Utc>,

    /// When the offer stops being valid
    pub expires_at: DateTime<Utc>,
}

impl AdmissionOffer {
    /// Creates a pending offer valid for `validity`.
    pub fn new(
        university_id: Uuid,
        email: impl Into<String>,
        intended_role: UniversityRole,
        programme: impl Into<String>,
        issued_by: Uuid,
        validity: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            university_id,
            email: email.into(),
            intended_role,
            programme: programme.into(),
            admission_type: None,
            status: OfferStatus::Pending,
            issued_by,
            created_at: now,
            expires_at: now + validity,
        }
    }

    /// Set the admission type.
    pub fn with_admission_type(mut self, admission_type: impl Into<String>) -> Self {
        self.admission_type = Some(admission_type.into());
        self
    }

    /// Check whether the offer was issued to `email` (case-insensitive).
    pub fn is_addressed_to(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    /// Check whether the validity window has passed.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Move a pending offer past its window to `Expired`.
    ///
    /// # Returns
    ///
    /// `true` if the status changed
    pub fn expire_if_due(&mut self) -> bool {
        if self.status == OfferStatus::Pending && self.is_expired() {
            self.status = OfferStatus::Expired;
            true
        } else {
            false
        }
    }

    /// Accept the offer and create the membership.
    ///
    /// # Errors
    ///
    /// - [`OrgError::OfferExpired`] if the window has passed
    /// - [`OrgError::OfferNotPending`] if the offer was already settled
    /// - [`OrgError::ProfileMismatch`] if `profile` does not fit the role
    pub fn accept(
        &mut self,
        user_id: Uuid,
        full_name: impl Into<String>,
        profile: MemberProfile,
    ) -> OrgResult<Membership> {
        self.ensure_pending()?;
        let membership = Membership::new(
            self.university_id,
            user_id,
            self.intended_role,
            full_name,
            profile,
        )?
        .with_inviter(self.issued_by);
        self.status = OfferStatus::Accepted;
        Ok(membership)
    }

    /// Decline the offer.
    pub fn reject(&mut self) -> OrgResult<()> {
        self.ensure_pending()?;
        self.status = OfferStatus::Rejected;
        Ok(())
    }

    /// Withdraw the offer.
    pub fn cancel(&mut self) -> OrgResult<()> {
        if self.status != OfferStatus::Pending {
            return Err(OrgError::OfferNotPending(self.id));
        }
        self.status = OfferStatus::Canceled;
        Ok(())
    }

    fn ensure_pending(&mut self) -> OrgResult<()> {
        if self.expire_if_due() || self.status == OfferStatus::Expired {
            return Err(OrgError::OfferExpired(self.id));
        }
        if self.status != OfferStatus::Pending {
            return Err(OrgError::OfferNotPending(self.id));
        }
        Ok(())
    }
}
