//! Element gates and route guards
//!
//! Small decision helpers for the rendering layer: whether a guarded element
//! shows its content, its fallback, or nothing, and whether the current route
//! may be opened.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluator::AccessEvaluator;
use crate::menu::find_by_href;

/// What a gated element should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    /// Permission granted: render the guarded content.
    Render,
    /// Permission denied: render the fallback content.
    Fallback,
    /// Permission denied: render nothing.
    Hidden,
}

/// Permission gate around a piece of UI.
///
/// Denied gates are hidden unless [`show_fallback`](Self::show_fallback) is
/// set.
///
/// # Examples
///
/// ```
/// use recruit_access::{AccessEvaluator, Gate, GateOutcome, MenuNode};
/// use recruit_rbac::Role;
///
/// let access = AccessEvaluator::new(Role::Applicant, Vec::<MenuNode>::new());
///
/// assert_eq!(Gate::new(Some("application.create")).evaluate(&access), GateOutcome::Render);
/// assert_eq!(Gate::new(Some("job.delete")).evaluate(&access), GateOutcome::Hidden);
/// assert_eq!(
///     Gate::new(Some("job.delete")).show_fallback().evaluate(&access),
///     GateOutcome::Fallback
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate<'a> {
    permission: Option<&'a str>,
    hide: bool,
}

impl<'a> Gate<'a> {
    /// Creates a gate requiring `permission` (`None` means unrestricted).
    pub fn new(permission: Option<&'a str>) -> Self {
        Self { permission, hide: true }
    }

    /// Render the fallback instead of nothing when denied.
    pub fn show_fallback(mut self) -> Self {
        self.hide = false;
        self
    }

    /// Decide what to render for the given evaluator.
    pub fn evaluate(&self, access: &AccessEvaluator) -> GateOutcome {
        if access.is_allowed(self.permission) {
            GateOutcome::Render
        } else if self.hide {
            GateOutcome::Hidden
        } else {
            GateOutcome::Fallback
        }
    }
}

/// Outcome of a route check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// No route to check yet.
    Checking,
    /// The route may be opened.
    Allowed,
    /// The route must not be opened.
    Denied,
}

impl RouteStatus {
    /// Check if the route was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, RouteStatus::Denied)
    }
}

/// Route guard for page-level access.
///
/// A route's requirement is, in order:
/// 1. the explicit permission given with [`with_permission`](Self::with_permission),
/// 2. the permission of the static menu entry whose `href` is the route,
/// 3. otherwise `manage all`: pages unknown to the menu are admin-only.
///
/// # Examples
///
/// ```
/// use recruit_access::{AccessEvaluator, MenuNode, RouteGuard, RouteStatus};
/// use recruit_rbac::Role;
///
/// let menu = vec![MenuNode::new("jobs", "Jobs", "/jobs").with_permission("job.read")];
/// let access = AccessEvaluator::new(Role::Applicant, menu);
///
/// assert_eq!(RouteGuard::new(&access).check(None), RouteStatus::Checking);
/// assert_eq!(RouteGuard::new(&access).check(Some("/jobs")), RouteStatus::Allowed);
/// assert_eq!(RouteGuard::new(&access).check(Some("/settings")), RouteStatus::Denied);
/// ```
#[derive(Debug, Clone)]
pub struct RouteGuard<'a> {
    access: &'a AccessEvaluator,
    permission: Option<&'a str>,
}

impl<'a> RouteGuard<'a> {
    /// Creates a guard backed by an evaluator.
    pub fn new(access: &'a AccessEvaluator) -> Self {
        Self {
            access,
            permission: None,
        }
    }

    /// Require an explicit permission instead of the menu's.
    pub fn with_permission(mut self, permission: &'a str) -> Self {
        self.permission = Some(permission);
        self
    }

    /// Check a route.
    pub fn check(&self, path: Option<&str>) -> RouteStatus {
        let Some(path) = path else {
            return RouteStatus::Checking;
        };

        let allowed = match self.permission {
            Some(permission) => self.access.is_allowed(Some(permission)),
            None => match find_by_href(self.access.static_menu(), path) {
                Some(node) => self.access.is_allowed(node.permission.as_deref()),
                None => self.access.capabilities().is_universal(),
            },
        };

        let status = if allowed {
            RouteStatus::Allowed
        } else {
            RouteStatus::Denied
        };
        debug!(path, status = ?status, role = %self.access.role(), "Route checked");
        status
    }

    /// Check a route and call `on_denied` if it was denied.
    ///
    /// The callback does not fire while the status is still
    /// [`RouteStatus::Checking`].
    pub fn check_or_else<F>(&self, path: Option<&str>, on_denied: F) -> RouteStatus
    where
        F: FnOnce(),
    {
        let status = self.check(path);
        if status.is_denied() {
            on_denied();
        }
        status
    }
}
