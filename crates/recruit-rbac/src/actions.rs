//! # Actions
//!
//! Defines the actions a role can be granted on a subject.
//! Actions are the second half of a `"subject.action"` permission string.

use serde::{Deserialize, Serialize};

/// Actions that can be performed on subjects.
///
/// - **Manage**: Full control, implies every other action on its subject
/// - **Read**: View subject data
/// - **Create**: Create new subject instances
/// - **Update**: Modify existing subject data
/// - **Delete**: Remove subject instances
/// - **Approve**: Approve pending items (e.g. move an application forward)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Manage subject.
    ///
    /// Superset action: a `manage` grant satisfies any action on the same subject.
    Manage,

    /// Read/view subject.
    Read,

    /// Create new subject instances.
    Create,

    /// Update existing subject instances.
    Update,

    /// Delete subject instances.
    Delete,

    /// Approve pending items.
    ///
    /// Used by recruiters to advance candidate applications.
    Approve,
}

impl Action {
    /// Number of actions, used to size the capability bitset.
    pub const COUNT: usize = 6;

    /// Get the string representation of the action.
    ///
    /// # Returns
    ///
    /// A static string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Manage => "manage",
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Approve => "approve",
        }
    }

    /// Parse an action token.
    ///
    /// Tokens are matched verbatim: permission strings carry actions exactly as
    /// configured, so `"Create"` or `"write"` are not actions.
    ///
    /// # Example
    ///
    /// ```
    /// use recruit_rbac::actions::Action;
    ///
    /// assert_eq!(Action::parse("create"), Some(Action::Create));
    /// assert_eq!(Action::parse("Create"), None);
    /// assert_eq!(Action::parse("write"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manage" => Some(Action::Manage),
            "read" => Some(Action::Read),
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "approve" => Some(Action::Approve),
            _ => None,
        }
    }

    /// Get all actions in declaration order.
    pub fn all() -> [Self; Self::COUNT] {
        [
            Action::Manage,
            Action::Read,
            Action::Create,
            Action::Update,
            Action::Delete,
            Action::Approve,
        ]
    }

    /// Position of the action in [`Action::all`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Check if this action implies another action.
    ///
    /// Only `Manage` implies anything beyond itself.
    ///
    /// # Example
    ///
    /// ```
    /// use recruit_rbac::actions::Action;
    ///
    /// assert!(Action::Manage.implies(Action::Delete));
    /// assert!(Action::Read.implies(Action::Read));
    /// assert!(!Action::Update.implies(Action::Read));
    /// ```
    pub fn implies(&self, other: Action) -> bool {
        *self == Action::Manage || *self == other
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
