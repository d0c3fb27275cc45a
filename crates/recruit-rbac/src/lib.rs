//! # Recruit RBAC
//!
//! Capability model and permission-string parsing for the recruitment portal.
//!
//! ## Overview
//!
//! The recruit-rbac crate handles:
//! - **Actions**: `manage`, `read`, `create`, `update`, `delete`, `approve`
//! - **Subjects**: `dashboard`, `Job`, `Application`, `User` and the `all` wildcard
//! - **Capabilities**: Action + Subject pairs, held in a bitset per role
//! - **Roles**: `admin`, `recruiter`, `applicant` and their capability sets
//! - **Permission strings**: `"subject.action"` parsing, lenient or strict
//!
//! ## Architecture
//!
//! ```text
//! Role ──derive_capabilities──▶ CapabilitySet
//!                                    ▲
//! "job.create" ──parse_permission──▶ PermissionRequest ──is_granted_by──┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use recruit_rbac::{check_permission, ParseMode, Role};
//!
//! let caps = Role::Recruiter.capabilities();
//!
//! assert!(check_permission(&caps, Some("job.create"), ParseMode::Lenient));
//! assert!(!check_permission(&caps, Some("user.read"), ParseMode::Lenient));
//!
//! // No permission means no restriction
//! assert!(check_permission(&caps, None, ParseMode::Lenient));
//! ```
//!
//! ## Implications
//!
//! - `manage` on a subject implies every action on it
//! - a grant on `all` applies to every subject
//! - `manage all` (admin) satisfies every check, even unknown actions

pub mod actions;
pub mod capabilities;
pub mod error;
pub mod permissions;
pub mod roles;
pub mod subjects;

// Re-export main types for convenience
pub use actions::Action;
pub use capabilities::{Capability, CapabilitySet, Rule};
pub use error::{AccessError, AccessResult};
pub use permissions::{
    check_permission, parse_permission, parse_permission_strict, ActionToken, ParseMode,
    PermissionRequest,
};
pub use roles::{derive_capabilities, Role};
pub use subjects::Subject;
