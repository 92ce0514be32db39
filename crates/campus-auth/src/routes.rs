//! Portal navigation routes and the access each one needs.

use campus_rbac::{Action, Permission, ResourceKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level portal page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PortalRoute {
    /// Landing page
    Dashboard,
    /// Course catalogue and materials
    Courses,
    /// Academic calendar
    Calendar,
    /// Grade book
    Grades,
    /// Coursework
    Assignments,
    /// Attendance records
    Attendance,
    /// Library catalogue
    Library,
    /// Assistant chat
    Chat,
}

/// What a session must hold to open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Any active member
    Member,
    /// Exactly this permission
    Permission(Permission),
    /// At least one action on this kind
    AnyAction(ResourceKind),
}

impl PortalRoute {
    /// Get all routes in sidebar order.
    pub fn all() -> [Self; 8] {
        [
            Self::Dashboard,
            Self::Courses,
            Self::Calendar,
            Self::Grades,
            Self::Assignments,
            Self::Attendance,
            Self::Library,
            Self::Chat,
        ]
    }

    /// Path of the route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Courses => "/courses",
            Self::Calendar => "/calendar",
            Self::Grades => "/grades",
            Self::Assignments => "/assignments",
            Self::Attendance => "/attendance",
            Self::Library => "/library",
            Self::Chat => "/chat",
        }
    }

    /// Sidebar title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Courses => "Courses",
            Self::Calendar => "Calendar",
            Self::Grades => "Grades",
            Self::Assignments => "Assignments",
            Self::Attendance => "Attendance",
            Self::Library => "Library",
            Self::Chat => "Chat",
        }
    }

    /// Access needed to open the route.
    ///
    /// Course pages open for anyone acting on courses, so roles that
    /// create or update courses without reading them still reach them.
    pub fn access(&self) -> RouteAccess {
        let (kind, action) = match self {
            Self::Dashboard | Self::Chat => return RouteAccess::Member,
            Self::Courses | Self::Calendar | Self::Assignments => {
                return RouteAccess::AnyAction(ResourceKind::Course)
            }
            Self::Grades => (ResourceKind::Grade, Action::Read),
            Self::Attendance => (ResourceKind::Attendance, Action::Read),
            Self::Library => (ResourceKind::Library, Action::Read),
        };
        RouteAccess::Permission(Permission::new(kind, action))
    }

    /// Resolve a request path, including nested paths like `/chat/42`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let path = path.trim_end_matches('/');
        Self::all().into_iter().find(|route| {
            path.strip_prefix(route.path())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

impl fmt::Display for PortalRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(PortalRoute::from_path("/grades"), Some(PortalRoute::Grades));
        assert_eq!(PortalRoute::from_path("/courses/"), Some(PortalRoute::Courses));
        assert_eq!(PortalRoute::from_path("/chat/new"), Some(PortalRoute::Chat));
        assert_eq!(PortalRoute::from_path("/library?q=rust"), Some(PortalRoute::Library));
        assert_eq!(PortalRoute::from_path("/gradesheet"), None);
        assert_eq!(PortalRoute::from_path("/admin"), None);
    }

    #[test]
    fn test_route_access() {
        assert_eq!(PortalRoute::Dashboard.access(), RouteAccess::Member);
        assert_eq!(PortalRoute::Chat.access(), RouteAccess::Member);
        for route in [PortalRoute::Courses, PortalRoute::Calendar, PortalRoute::Assignments] {
            assert_eq!(route.access(), RouteAccess::AnyAction(ResourceKind::Course));
        }
        assert_eq!(
            PortalRoute::Grades.access(),
            RouteAccess::Permission(Permission::new(ResourceKind::Grade, Action::Read))
        );
        match PortalRoute::Library.access() {
            RouteAccess::Permission(p) => assert_eq!(p.to_string(), "library:read"),
            other => panic!("unexpected access {other:?}"),
        }
    }

    #[test]
    fn test_paths_round_trip() {
        for route in PortalRoute::all() {
            assert_eq!(PortalRoute::from_path(route.path()), Some(route));
        }
    }
}
