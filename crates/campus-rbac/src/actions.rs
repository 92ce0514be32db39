//! # Actions
//!
//! Defines the verbs that can be granted on resources. The set of verbs is
//! wider than what any single resource kind accepts; the statement registry
//! decides which verbs are legal for which kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions that can be performed on resources.
///
/// - **Create**: Create new resource instances
/// - **Read**: View resource data
/// - **Update**: Modify existing resource data
/// - **Delete**: Remove resource instances
/// - **Cancel**: Withdraw a pending resource (e.g. an admission offer)
/// - **Approve**: Sign off a pending change
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create new resource.
    Create,

    /// Read/view resource.
    Read,

    /// Update existing resource.
    Update,

    /// Delete resource.
    ///
    /// Grants permission to permanently remove resources.
    Delete,

    /// Cancel a pending resource.
    Cancel,

    /// Approve pending changes.
    Approve,
}

impl Action {
    /// Get the string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Cancel => "cancel",
            Action::Approve => "approve",
        }
    }

    /// Parse action from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports aliases)
    ///
    /// # Returns
    ///
    /// `Some(Action)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use campus_rbac::actions::Action;
    ///
    /// assert_eq!(Action::parse("read"), Some(Action::Read));
    /// assert_eq!(Action::parse("view"), Some(Action::Read)); // Alias
    /// assert_eq!(Action::parse("revoke"), Some(Action::Cancel)); // Alias
    /// assert_eq!(Action::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "create" | "add" | "new" => Some(Action::Create),
            "read" | "view" | "get" => Some(Action::Read),
            "update" | "edit" | "write" | "modify" | "put" | "patch" => Some(Action::Update),
            "delete" | "remove" | "destroy" => Some(Action::Delete),
            "cancel" | "revoke" | "withdraw" => Some(Action::Cancel),
            "approve" | "accept" => Some(Action::Approve),
            _ => None,
        }
    }

    /// Get all actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::Create,
            Action::Read,
            Action::Update,
            Action::Delete,
            Action::Cancel,
            Action::Approve,
        ]
    }

    /// Check if this is a read-only action.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Action::Read)
    }

    /// Check if this action modifies data.
    ///
    /// Route guards use this to decide whether a denied check hides a
    /// control or only disables it.
    pub fn is_write(&self) -> bool {
        !self.is_read_only()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(Action::parse("read"), Some(Action::Read));
        assert_eq!(Action::parse("view"), Some(Action::Read));
        assert_eq!(Action::parse("GET"), Some(Action::Read));

        assert_eq!(Action::parse("create"), Some(Action::Create));
        assert_eq!(Action::parse("add"), Some(Action::Create));

        assert_eq!(Action::parse("update"), Some(Action::Update));
        assert_eq!(Action::parse("edit"), Some(Action::Update));
        assert_eq!(Action::parse("patch"), Some(Action::Update));

        assert_eq!(Action::parse("delete"), Some(Action::Delete));
        assert_eq!(Action::parse("remove"), Some(Action::Delete));

        assert_eq!(Action::parse("cancel"), Some(Action::Cancel));
        assert_eq!(Action::parse(" approve "), Some(Action::Approve));

        assert_eq!(Action::parse("invalid"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_action_as_str_round_trips_through_parse() {
        for action in Action::all() {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_read_and_write_are_disjoint() {
        assert!(Action::Read.is_read_only());
        assert!(!Action::Read.is_write());
        assert!(Action::Create.is_write());
        assert!(Action::Cancel.is_write());
        assert!(!Action::Delete.is_read_only());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Action::Approve).unwrap();
        assert_eq!(json, "\"approve\"");
    }

    #[test]
    fn test_all_actions_count() {
        assert_eq!(Action::all().len(), 6);
    }
}
