//! # Resource Kinds
//!
//! Defines every category of protectable object in the university portal.
//! Kinds are grouped by scope: tenancy plumbing shared with the auth
//! collaborator, academic records, and campus services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope that a resource kind belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceScope {
    /// Tenancy resources managed through the auth collaborator.
    Tenancy,
    /// Academic structure and student records.
    Academic,
    /// Campus services (finance, library).
    Services,
}

impl ResourceScope {
    /// Get the string representation of the scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceScope::Tenancy => "tenancy",
            ResourceScope::Academic => "academic",
            ResourceScope::Services => "services",
        }
    }

    /// Parse scope from string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tenancy" => Some(ResourceScope::Tenancy),
            "academic" => Some(ResourceScope::Academic),
            "services" | "service" => Some(ResourceScope::Services),
            _ => None,
        }
    }
}

/// Resource kinds that can have permissions assigned.
///
/// - **Tenancy**: Organization (university), Member (enrolled user),
///   Invitation (admission offer), CourseGroup (team)
/// - **Academic**: Course, Grade, Attendance, Transcript, Programme,
///   Department, Faculty
/// - **Services**: Fee, Library
///
/// Wire names follow the auth collaborator's vocabulary, so `CourseGroup`
/// serializes as `team`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    // Tenancy
    /// A university tenant.
    Organization,
    /// An enrolled user (membership) within a university.
    Member,
    /// An admission offer to join a university.
    Invitation,
    /// A course group within a university.
    #[serde(rename = "team")]
    CourseGroup,

    // Academic
    /// Course catalog entries.
    Course,
    /// Grade records.
    Grade,
    /// Attendance records.
    Attendance,
    /// Academic transcripts.
    Transcript,
    /// Degree programmes.
    Programme,
    /// Academic departments.
    Department,
    /// Faculties.
    Faculty,

    // Services
    /// Tuition and fee records.
    Fee,
    /// Library holdings and loans.
    Library,
}

impl ResourceKind {
    /// Get the string representation of the resource kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Organization => "organization",
            ResourceKind::Member => "member",
            ResourceKind::Invitation => "invitation",
            ResourceKind::CourseGroup => "team",
            ResourceKind::Course => "course",
            ResourceKind::Grade => "grade",
            ResourceKind::Attendance => "attendance",
            ResourceKind::Transcript => "transcript",
            ResourceKind::Programme => "programme",
            ResourceKind::Department => "department",
            ResourceKind::Faculty => "faculty",
            ResourceKind::Fee => "fee",
            ResourceKind::Library => "library",
        }
    }

    /// Parse resource kind from string representation.
    ///
    /// Accepts the wire name, plurals, and the university vocabulary for
    /// tenancy kinds.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_rbac::resources::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::parse("course"), Some(ResourceKind::Course));
    /// assert_eq!(ResourceKind::parse("university"), Some(ResourceKind::Organization));
    /// assert_eq!(ResourceKind::parse("course_group"), Some(ResourceKind::CourseGroup));
    /// assert_eq!(ResourceKind::parse("cafeteria"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "organization" | "organizations" | "org" | "university" | "universities" => {
                Some(ResourceKind::Organization)
            }
            "member" | "members" | "enrolled_user" | "user" | "users" => {
                Some(ResourceKind::Member)
            }
            "invitation" | "invitations" | "admission_offer" | "admission_offers" => {
                Some(ResourceKind::Invitation)
            }
            "team" | "teams" | "course_group" | "course_groups" => {
                Some(ResourceKind::CourseGroup)
            }
            "course" | "courses" => Some(ResourceKind::Course),
            "grade" | "grades" => Some(ResourceKind::Grade),
            "attendance" => Some(ResourceKind::Attendance),
            "transcript" | "transcripts" => Some(ResourceKind::Transcript),
            "programme" | "programmes" | "program" | "programs" => {
                Some(ResourceKind::Programme)
            }
            "department" | "departments" | "dept" => Some(ResourceKind::Department),
            "faculty" | "faculties" => Some(ResourceKind::Faculty),
            "fee" | "fees" => Some(ResourceKind::Fee),
            "library" => Some(ResourceKind::Library),
            _ => None,
        }
    }

    /// Get the scope this resource kind belongs to.
    pub fn scope(&self) -> ResourceScope {
        match self {
            ResourceKind::Organization
            | ResourceKind::Member
            | ResourceKind::Invitation
            | ResourceKind::CourseGroup => ResourceScope::Tenancy,

            ResourceKind::Course
            | ResourceKind::Grade
            | ResourceKind::Attendance
            | ResourceKind::Transcript
            | ResourceKind::Programme
            | ResourceKind::Department
            | ResourceKind::Faculty => ResourceScope::Academic,

            ResourceKind::Fee | ResourceKind::Library => ResourceScope::Services,
        }
    }

    /// Get all resource kinds.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceKind::Organization,
            ResourceKind::Member,
            ResourceKind::Invitation,
            ResourceKind::CourseGroup,
            ResourceKind::Course,
            ResourceKind::Grade,
            ResourceKind::Attendance,
            ResourceKind::Transcript,
            ResourceKind::Programme,
            ResourceKind::Department,
            ResourceKind::Faculty,
            ResourceKind::Fee,
            ResourceKind::Library,
        ]
    }

    /// Get all resource kinds in a scope.
    pub fn for_scope(scope: ResourceScope) -> Vec<Self> {
        Self::all()
            .into_iter()
            .filter(|kind| kind.scope() == scope)
            .collect()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
