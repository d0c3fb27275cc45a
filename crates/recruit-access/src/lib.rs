//! # Recruit Access
//!
//! Session-scoped access evaluation for the recruitment portal.
//!
//! ## Overview
//!
//! The recruit-access crate handles:
//! - **Menus**: Static navigation trees and permission filtering
//! - **Evaluator**: Role → capabilities → permission checks → filtered menu
//! - **Sessions**: The authenticated user and role an evaluator serves
//! - **Guards**: Element gates and route checks for the rendering layer
//! - **Config**: Parse mode and menu source, loaded from the environment
//!
//! ## Architecture
//!
//! ```text
//! SessionContext ─┐
//!                 ├─▶ AccessEvaluator ──▶ is_allowed / can
//! static menu ────┘         │
//!                           ├──▶ filtered_menus (memoised)
//!                           └──▶ Gate / RouteGuard
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use recruit_access::{AccessEvaluator, MenuNode, SessionContext};
//!
//! let menu: Arc<[MenuNode]> = Arc::from(vec![
//!     MenuNode::new("dashboard", "Dashboard", "/dashboard").with_permission("dashboard.read"),
//!     MenuNode::new("jobs", "Jobs", "/jobs")
//!         .with_permission("job.read")
//!         .with_children(vec![
//!             MenuNode::new("create-job", "Create Job", "/jobs/new").with_permission("job.create"),
//!         ]),
//!     MenuNode::new("users", "Users", "/users").with_permission("user.read"),
//! ]);
//!
//! let session = SessionContext::from_claims(Uuid::now_v7(), Some("recruiter"));
//! let access = AccessEvaluator::from_session(Some(&session), Arc::clone(&menu)).unwrap();
//!
//! let ids: Vec<&str> = access.filtered_menus().iter().map(|m| m.id.as_str()).collect();
//! assert_eq!(ids, ["dashboard", "jobs"]);
//! ```
//!
//! ## Fail-open permissions
//!
//! By default a permission string that is not `subject.action` shaped grants
//! access, matching existing menu data. Set [`ParseMode::Strict`] (or
//! `RECRUIT_ACL_STRICT=1`) to deny such strings and validate menus at load.
//!
//! [`ParseMode::Strict`]: recruit_rbac::ParseMode::Strict

pub mod config;
pub mod evaluator;
pub mod guard;
pub mod menu;
pub mod session;

// Re-export main types for convenience
pub use config::{AccessConfig, ConfigError};
pub use evaluator::AccessEvaluator;
pub use guard::{Gate, GateOutcome, RouteGuard, RouteStatus};
pub use menu::{default_menus_for, filter_menu, MenuNode, MenuShape};
pub use session::SessionContext;
