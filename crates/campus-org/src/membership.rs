//! Membership domain models
//!
//! A membership enrolls a user in a university with a role and the domain
//! attributes that role carries. Students carry academic records, staff
//! carry employment records, parents carry neither.

use campus_rbac::UniversityRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OrgError, OrgResult};

/// Which attribute set a role requires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// Academic record (students)
    Academic,
    /// Employment record (staff)
    Staff,
    /// No domain record (parents)
    Guardian,
}

impl ProfileKind {
    /// Profile kind required by a role.
    pub fn for_role(role: UniversityRole) -> Self {
        if role.is_learner() {
            Self::Academic
        } else if role.is_guardian() {
            Self::Guardian
        } else {
            Self::Staff
        }
    }

    /// Get string representation of the profile kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Staff => "staff",
            Self::Guardian => "guardian",
        }
    }
}

/// Academic attributes of a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    /// Year of admission
    pub admission_year: Option<u32>,
    /// Current semester number
    pub current_semester: Option<u32>,
    /// Cumulative grade point average
    pub cgpa: Option<f64>,
}

/// Employment attributes of a staff member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffRecord {
    /// Employee number
    pub employee_no: Option<String>,
    /// Academic rank (e.g. "Associate Professor")
    pub academic_rank: Option<String>,
}

/// Role-dependent attributes of a membership. The variants are mutually
/// exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberProfile {
    /// Student attributes
    Academic(AcademicRecord),
    /// Staff attributes
    Staff(StaffRecord),
    /// Parent; no extra attributes
    Guardian,
}

impl MemberProfile {
    /// Kind of this profile.
    pub fn kind(&self) -> ProfileKind {
        match self {
            Self::Academic(_) => ProfileKind::Academic,
            Self::Staff(_) => ProfileKind::Staff,
            Self::Guardian => ProfileKind::Guardian,
        }
    }

    /// Empty profile of the kind a role requires.
    pub fn default_for(role: UniversityRole) -> Self {
        match ProfileKind::for_role(role) {
            ProfileKind::Academic => Self::Academic(AcademicRecord::default()),
            ProfileKind::Staff => Self::Staff(StaffRecord::default()),
            ProfileKind::Guardian => Self::Guardian,
        }
    }

    /// Check this profile against a role.
    pub fn check_role(&self, role: UniversityRole) -> OrgResult<()> {
        let expected = ProfileKind::for_role(role);
        if self.kind() == expected {
            Ok(())
        } else {
            Err(OrgError::ProfileMismatch {
                role,
                expected: expected.as_str(),
            })
        }
    }
}

/// A user's enrollment in a university.
///
/// The role lives here, not on the user: the same user may hold different
/// roles in different universities.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use campus_org::{Membership, MemberProfile};
/// use campus_rbac::UniversityRole;
///
/// let membership = Membership::new(
///     Uuid::now_v7(),
///     Uuid::now_v7(),
///     UniversityRole::Professor,
///     "Dr. Layla Hassan",
///     MemberProfile::default_for(UniversityRole::Professor),
/// )
/// .unwrap();
/// assert!(membership.is_active);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// Unique membership ID
    pub id: Uuid,

    /// University ID
    pub university_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the university
    pub role: UniversityRole,

    /// Full legal name
    pub full_name: String,

    /// University-issued ID number, unique per university
    pub university_number: Option<String>,

    /// National ID
    pub national_id: Option<String>,

    /// Role-dependent attributes
    pub profile: MemberProfile,

    /// When the user joined
    pub joined_at: DateTime<Utc>,

    /// Who issued the admission offer (if applicable)
    pub invited_by: Option<Uuid>,

    /// Whether the membership is active
    pub is_active: bool,
}

impl Membership {
    /// Creates a new active membership.
    ///
    /// # Errors
    ///
    /// [`OrgError::ProfileMismatch`] if `profile` does not fit `role`.
    pub fn new(
        university_id: Uuid,
        user_id: Uuid,
        role: UniversityRole,
        full_name: impl Into<String>,
        profile: MemberProfile,
    ) -> OrgResult<Self> {
        profile.check_role(role)?;
        Ok(Self {
            id: Uuid::now_v7(),
            university_id,
            user_id,
            role,
            full_name: full_name.into(),
            university_number: None,
            national_id: None,
            profile,
            joined_at: Utc::now(),
            invited_by: None,
            is_active: true,
        })
    }

    /// Set who issued the admission offer.
    pub fn with_inviter(mut self, inviter_id: Uuid) -> Self {
        self.invited_by = Some(inviter_id);
        self
    }

    /// Set the university-issued ID number.
    pub fn with_university_number(mut self, number: impl Into<String>) -> Self {
        self.university_number = Some(number.into());
        self
    }

    /// Set the national ID.
    pub fn with_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.national_id = Some(national_id.into());
        self
    }

    /// Change the role. The profile is replaced in the same step so the
    /// membership never holds attributes of the wrong kind.
    ///
    /// # Errors
    ///
    /// [`OrgError::ProfileMismatch`] if `profile` does not fit `role`; the
    /// membership is left unchanged.
    pub fn change_role(&mut self, role: UniversityRole, profile: MemberProfile) -> OrgResult<()> {
        profile.check_role(role)?;
        self.role = role;
        self.profile = profile;
        Ok(())
    }

    /// Deactivate the membership.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
