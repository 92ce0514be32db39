//! # Statement Registry
//!
//! Single source of truth for which actions are legal on which resource
//! kind. Roles may only grant `(kind, action)` pairs found here.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::actions::Action;
use crate::error::{RbacError, RbacResult};
use crate::resources::ResourceKind;

/// Registry of legal actions per resource kind.
///
/// # Example
///
/// ```
/// use campus_rbac::{Action, ResourceKind, StatementRegistry};
///
/// let mut registry = StatementRegistry::new();
/// registry
///     .register(ResourceKind::Course, [Action::Create, Action::Read])
///     .unwrap();
///
/// assert!(registry.is_valid_action(ResourceKind::Course, Action::Read));
/// assert!(!registry.is_valid_action(ResourceKind::Course, Action::Delete));
/// assert!(!registry.is_valid_action(ResourceKind::Fee, Action::Read));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatementRegistry {
    statements: BTreeMap<ResourceKind, BTreeSet<Action>>,
}

impl StatementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            statements: BTreeMap::new(),
        }
    }

    /// Register the legal actions for a resource kind.
    ///
    /// Registering the same set again is a no-op. Registering a different
    /// set for a kind that is already present fails with
    /// [`RbacError::ConflictingStatement`]; statements are never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// - [`RbacError::EmptyStatement`] if `actions` is empty
    /// - [`RbacError::ConflictingStatement`] on a conflicting re-registration
    pub fn register<I>(&mut self, kind: ResourceKind, actions: I) -> RbacResult<()>
    where
        I: IntoIterator<Item = Action>,
    {
        let requested: BTreeSet<Action> = actions.into_iter().collect();
        if requested.is_empty() {
            return Err(RbacError::EmptyStatement(kind));
        }

        match self.statements.get(&kind) {
            Some(existing) if *existing == requested => Ok(()),
            Some(existing) => Err(RbacError::ConflictingStatement {
                resource: kind,
                existing: join_actions(existing),
                requested: join_actions(&requested),
            }),
            None => {
                self.statements.insert(kind, requested);
                Ok(())
            }
        }
    }

    /// Check whether `action` is legal on `kind`.
    ///
    /// Returns `false` for kinds that were never registered.
    pub fn is_valid_action(&self, kind: ResourceKind, action: Action) -> bool {
        self.statements
            .get(&kind)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Get the legal actions for a kind.
    pub fn actions_for(&self, kind: ResourceKind) -> Option<&BTreeSet<Action>> {
        self.statements.get(&kind)
    }

    /// Check whether a kind has been registered.
    pub fn contains(&self, kind: ResourceKind) -> bool {
        self.statements.contains_key(&kind)
    }

    /// Iterate over registered kinds and their actions.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &BTreeSet<Action>)> {
        self.statements.iter().map(|(kind, actions)| (*kind, actions))
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

fn join_actions(actions: &BTreeSet<Action>) -> String {
    actions
        .iter()
        .map(Action::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
