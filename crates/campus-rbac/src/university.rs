//! University policy tables
//!
//! The statement table and the ten built-in role bundles used by the
//! portal. Built once at bootstrap; a grant that drifts from the statement
//! table fails here instead of at check time.

use crate::access::{AccessControl, AccessControlBuilder};
use crate::actions::Action::{self, Cancel, Create, Delete, Read, Update};
use crate::error::RbacResult;
use crate::resources::ResourceKind::{self, *};
use crate::roles::{Grants, UniversityRole};
use crate::statements::StatementRegistry;

const STATEMENTS: &[(ResourceKind, &[Action])] = &[
    // Tenancy, extended so the super admin can create universities
    (Organization, &[Create, Update, Delete]),
    (Member, &[Create, Update, Delete]),
    (Invitation, &[Create, Cancel]),
    (CourseGroup, &[Create, Update, Delete]),
    // Academic
    (Course, &[Create, Read, Update, Delete]),
    (Grade, &[Create, Read, Update]),
    (Attendance, &[Create, Read, Update]),
    (Transcript, &[Create, Read, Update]),
    (Programme, &[Create, Read, Update, Delete]),
    (Department, &[Create, Read, Update, Delete]),
    (Faculty, &[Create, Read, Update, Delete]),
    // Services
    (Fee, &[Create, Read, Update]),
    (Library, &[Create, Read, Update, Delete]),
];

/// Build the university statement registry.
pub fn statements() -> RbacResult<StatementRegistry> {
    let mut registry = StatementRegistry::new();
    for (kind, actions) in STATEMENTS {
        registry.register(*kind, actions.iter().copied())?;
    }
    Ok(registry)
}

/// Grants for a built-in role.
pub fn grants_for(role: UniversityRole) -> Grants {
    let table: &[(ResourceKind, &[Action])] = match role {
        UniversityRole::SuperAdmin => &[
            (Organization, &[Create, Update, Delete]),
            (Member, &[Create, Update, Delete]),
            (Invitation, &[Create, Cancel]),
            (Course, &[Create, Read, Update, Delete]),
            (Grade, &[Create, Read, Update]),
            (Attendance, &[Create, Read, Update]),
            (Transcript, &[Read, Create, Update]),
            (Fee, &[Create, Read, Update]),
            (Library, &[Create, Read, Update, Delete]),
            (Programme, &[Create, Read, Update, Delete]),
            (Department, &[Create, Read, Update, Delete]),
            (Faculty, &[Create, Read, Update, Delete]),
        ],
        UniversityRole::Registrar => &[
            (Organization, &[Update]),
            (Member, &[Create, Update, Delete]),
            (Invitation, &[Create, Cancel]),
            (Course, &[Create, Update]),
            (Grade, &[Read]),
            (Attendance, &[Read]),
            (Transcript, &[Read]),
            (Fee, &[Create, Read, Update]),
            (Programme, &[Create, Read, Update]),
            (Department, &[Read]),
            (Faculty, &[Read]),
        ],
        UniversityRole::Dean => &[
            (Member, &[Create, Update]),
            (Course, &[Create, Update]),
            (Grade, &[Read]),
            (Attendance, &[Read]),
            (Transcript, &[Read]),
            (Programme, &[Create, Read, Update]),
            (Department, &[Read]),
            (Faculty, &[Read]),
        ],
        UniversityRole::Hod => &[
            (Course, &[Create, Update]),
            (Grade, &[Read, Update]),
            (Attendance, &[Read, Update]),
            (Programme, &[Read]),
            (Department, &[Read]),
        ],
        UniversityRole::Professor => &[
            (Grade, &[Create, Read, Update]),
            (Attendance, &[Create, Read, Update]),
            (Course, &[Read]),
        ],
        UniversityRole::Ta => &[
            (Grade, &[Create, Read]),
            (Attendance, &[Create, Read]),
            (Course, &[Read]),
        ],
        UniversityRole::Student => &[
            (Grade, &[Read]),
            (Attendance, &[Read]),
            (Transcript, &[Read]),
            (Course, &[Read]),
        ],
        UniversityRole::Parent => &[
            (Grade, &[Read]),
            (Attendance, &[Read]),
            (Transcript, &[Read]),
        ],
        UniversityRole::Bursar => &[(Fee, &[Create, Read, Update])],
        UniversityRole::Librarian => &[(Library, &[Create, Read, Update, Delete])],
    };

    table.iter().fold(Grants::new(), |grants, (kind, actions)| {
        grants.allow(*kind, actions.iter().copied())
    })
}

/// Build the full university access-control tables.
///
/// # Errors
///
/// Any statement conflict or grant outside the statement table. Callers
/// should treat this as fatal at startup.
pub fn access_control() -> RbacResult<AccessControl> {
    let mut builder = AccessControlBuilder::new(statements()?);
    for role in UniversityRole::all() {
        builder.define_university_role(role, grants_for(role))?;
    }
    Ok(builder.build())
}

impl AccessControl {
    /// Shortcut for [`access_control`].
    pub fn university() -> RbacResult<Self> {
        access_control()
    }
}
