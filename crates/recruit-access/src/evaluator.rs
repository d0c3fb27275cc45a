//! Per-session access evaluator
//!
//! Binds a role to its capability set and a static menu tree. Build one per
//! session and pass it to whatever renders navigation or guards routes.

use std::sync::{Arc, OnceLock};

use tracing::{debug, trace};

use recruit_rbac::{
    check_permission, AccessError, AccessResult, Action, CapabilitySet, ParseMode, Role, Rule,
    Subject,
};

use crate::menu::{filter_menu, MenuNode};
use crate::session::SessionContext;

/// Access evaluator for one `(role, static menu)` pair.
///
/// Cloning is cheap and clones share the memoised menu.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use recruit_access::{AccessEvaluator, MenuNode};
/// use recruit_rbac::Role;
///
/// let menu: Arc<[MenuNode]> = Arc::from(vec![
///     MenuNode::new("dashboard", "Dashboard", "/dashboard").with_permission("dashboard.read"),
///     MenuNode::new("users", "Users", "/users").with_permission("user.read"),
/// ]);
///
/// let access = AccessEvaluator::new(Role::Recruiter, menu);
/// assert!(access.is_allowed(Some("job.create")));
/// assert!(!access.is_allowed(Some("user.read")));
/// assert_eq!(access.filtered_menus().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    role: Role,
    capabilities: CapabilitySet,
    mode: ParseMode,
    static_menu: Arc<[MenuNode]>,
    filtered: Arc<OnceLock<Vec<MenuNode>>>,
}

impl AccessEvaluator {
    /// Creates an evaluator with lenient permission parsing.
    pub fn new(role: Role, static_menu: impl Into<Arc<[MenuNode]>>) -> Self {
        let capabilities = role.capabilities();
        debug!(role = %role, capabilities = capabilities.len(), "Access evaluator created");
        Self {
            role,
            capabilities,
            mode: ParseMode::Lenient,
            static_menu: static_menu.into(),
            filtered: Arc::new(OnceLock::new()),
        }
    }

    /// Creates an evaluator for the current session.
    ///
    /// # Errors
    ///
    /// [`AccessError::MissingSession`] when no session is available. That is
    /// a wiring bug in the caller, not a user-facing condition.
    pub fn from_session(
        session: Option<&SessionContext>,
        static_menu: impl Into<Arc<[MenuNode]>>,
    ) -> AccessResult<Self> {
        let session = session.ok_or(AccessError::MissingSession)?;
        Ok(Self::new(session.role, static_menu))
    }

    /// Switches the permission parsing mode.
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        if self.mode != mode {
            self.mode = mode;
            self.filtered = Arc::new(OnceLock::new());
        }
        self
    }

    /// Returns an evaluator for `role` and `static_menu`.
    ///
    /// When both are unchanged (same role, same menu allocation) this is a
    /// clone of `self` and keeps the memoised menu.
    pub fn refresh(&self, role: Role, static_menu: &Arc<[MenuNode]>) -> Self {
        if self.role == role && Arc::ptr_eq(&self.static_menu, static_menu) {
            return self.clone();
        }
        Self::new(role, Arc::clone(static_menu)).with_mode(self.mode)
    }

    /// The role this evaluator was built for.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The permission parsing mode in use.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// The capability set derived from the role.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// The unfiltered menu this evaluator was built with.
    pub fn static_menu(&self) -> &[MenuNode] {
        &self.static_menu
    }

    /// Rules for the role, as served to clients.
    pub fn rules(&self) -> Vec<Rule> {
        self.capabilities.rules()
    }

    /// Check a permission string.
    ///
    /// `None` and empty strings are always allowed. Never panics; see
    /// [`ParseMode`] for how malformed strings are treated.
    pub fn is_allowed(&self, permission: Option<&str>) -> bool {
        let allowed = check_permission(&self.capabilities, permission, self.mode);
        if !allowed {
            trace!(role = %self.role, permission = ?permission, "Permission denied");
        }
        allowed
    }

    /// Check a typed `(action, subject)` pair directly.
    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.capabilities.allows(action, subject)
    }

    /// Borrow [`is_allowed`](Self::is_allowed) as a plain checker function.
    pub fn checker(&self) -> impl Fn(Option<&str>) -> bool + '_ {
        move |permission| self.is_allowed(permission)
    }

    /// The static menu filtered for this role, computed on first access.
    pub fn filtered_menus(&self) -> &[MenuNode] {
        self.filtered
            .get_or_init(|| filter_menu(&self.static_menu, self.checker()))
    }

    /// Filter an arbitrary menu tree for this role. Not memoised.
    pub fn filter(&self, nodes: &[MenuNode]) -> Vec<MenuNode> {
        filter_menu(nodes, self.checker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn menu() -> Arc<[MenuNode]> {
        Arc::from(vec![
            MenuNode::new("dashboard", "Dashboard", "/dashboard").with_permission("dashboard.read"),
            MenuNode::new("users", "Users", "/users").with_permission("user.read"),
        ])
    }

    #[test]
    fn test_unrestricted_is_allowed_for_every_role() {
        for role in Role::all() {
            let access = AccessEvaluator::new(role, menu());
            assert!(access.is_allowed(None));
            assert!(access.is_allowed(Some("")));
            assert!(access.is_allowed(Some("not-a-permission-string")));
        }
    }

    #[test]
    fn test_strict_mode_denies_malformed() {
        let access = AccessEvaluator::new(Role::Recruiter, menu()).with_mode(ParseMode::Strict);
        assert!(!access.is_allowed(Some("not-a-permission-string")));
        assert!(!access.is_allowed(Some("report.read")));
        assert!(access.is_allowed(Some("job.read")));
        assert!(access.is_allowed(None));
    }

    #[test]
    fn test_admin_can_do_anything() {
        let access = AccessEvaluator::new(Role::Admin, menu());
        assert!(access.is_allowed(Some("user.delete")));
        assert!(access.is_allowed(Some("job.archive")));
        assert!(access.can(Action::Approve, Subject::User));
        assert_eq!(access.filtered_menus().len(), 2);
    }

    #[test]
    fn test_can_matches_capabilities() {
        let access = AccessEvaluator::new(Role::Applicant, menu());
        assert!(access.can(Action::Create, Subject::Application));
        assert!(!access.can(Action::Delete, Subject::Job));
    }

    #[test]
    fn test_filtered_menus_is_memoised() {
        let access = AccessEvaluator::new(Role::Applicant, menu());
        let first = access.filtered_menus().as_ptr();
        let second = access.filtered_menus().as_ptr();
        assert_eq!(first, second);

        let clone = access.clone();
        assert_eq!(clone.filtered_menus().as_ptr(), first);
    }

    #[test]
    fn test_refresh_reuses_cache_only_when_unchanged() {
        let static_menu = menu();
        let access = AccessEvaluator::new(Role::Recruiter, Arc::clone(&static_menu));
        let cached = access.filtered_menus().as_ptr();

        let same = access.refresh(Role::Recruiter, &static_menu);
        assert_eq!(same.filtered_menus().as_ptr(), cached);

        let other_role = access.refresh(Role::Admin, &static_menu);
        assert_eq!(other_role.role(), Role::Admin);
        assert_eq!(other_role.filtered_menus().len(), 2);

        let other_menu = access.refresh(Role::Recruiter, &menu());
        assert_ne!(other_menu.filtered_menus().as_ptr(), cached);
    }

    #[test]
    fn test_refresh_keeps_mode() {
        let static_menu = menu();
        let access = AccessEvaluator::new(Role::Recruiter, Arc::clone(&static_menu))
            .with_mode(ParseMode::Strict);
        assert_eq!(access.refresh(Role::Admin, &static_menu).mode(), ParseMode::Strict);
    }

    #[test]
    fn test_from_session() {
        let session = SessionContext::new(Uuid::now_v7(), Role::Admin);
        let access = AccessEvaluator::from_session(Some(&session), menu()).unwrap();
        assert_eq!(access.role(), Role::Admin);

        let err = AccessEvaluator::from_session(None, menu()).unwrap_err();
        assert_eq!(err, AccessError::MissingSession);
    }

    #[test]
    fn test_rules_export() {
        let access = AccessEvaluator::new(Role::Admin, menu());
        let json = serde_json::to_value(access.rules()).unwrap();
        assert_eq!(json, serde_json::json!([{ "action": "manage", "subject": "all" }]));
    }

    #[test]
    fn test_filter_other_tree() {
        let access = AccessEvaluator::new(Role::Applicant, menu());
        let other = vec![
            MenuNode::new("apply", "Apply", "/apply").with_permission("application.create"),
            MenuNode::new("post", "Post Job", "/post").with_permission("job.create"),
        ];

        let filtered = access.filter(&other);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "apply");
        assert_eq!(access.filtered_menus().len(), 1);
    }

    #[test]
    fn test_evaluator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AccessEvaluator>();
    }
}
