//! Session context for access evaluation
//!
//! Authentication happens elsewhere. Once a user is known, their id and role
//! claim are captured here and handed to [`AccessEvaluator`](crate::AccessEvaluator).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recruit_rbac::Role;

/// The authenticated user an evaluator works for.
///
/// The role is fixed for the session's lifetime; a role change means a new
/// session and a new evaluator.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use recruit_access::SessionContext;
/// use recruit_rbac::Role;
///
/// let ctx = SessionContext::from_claims(Uuid::now_v7(), Some("recruiter"));
/// assert_eq!(ctx.role, Role::Recruiter);
///
/// let ctx = SessionContext::from_claims(Uuid::now_v7(), None);
/// assert_eq!(ctx.role, Role::Applicant);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// User ID
    pub user_id: Uuid,

    /// Role held for this session
    pub role: Role,

    /// When the session context was created
    pub established_at: DateTime<Utc>,
}

impl SessionContext {
    /// Creates a session context for a user with a known role.
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            role,
            established_at: Utc::now(),
        }
    }

    /// Creates a session context from a raw role claim.
    ///
    /// A missing or unrecognised claim resolves to [`Role::Applicant`].
    pub fn from_claims(user_id: Uuid, role: Option<&str>) -> Self {
        Self::new(user_id, Role::from_session_value(role))
    }

    /// Check whether this session belongs to an administrator.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_claims() {
        let user_id = Uuid::now_v7();
        let ctx = SessionContext::from_claims(user_id, Some("admin"));
        assert_eq!(ctx.user_id, user_id);
        assert_eq!(ctx.role, Role::Admin);
        assert!(ctx.is_admin());
    }

    #[test]
    fn test_uppercase_admin_claim_is_applicant() {
        let ctx = SessionContext::from_claims(Uuid::now_v7(), Some("ADMIN"));
        assert_eq!(ctx.role, Role::Applicant);
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_unknown_claim_is_applicant() {
        let ctx = SessionContext::from_claims(Uuid::now_v7(), Some("hiring_manager"));
        assert_eq!(ctx.role, Role::Applicant);
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_session_deserializes_unknown_role_leniently() {
        let user_id = Uuid::now_v7();
        let json = serde_json::json!({
            "user_id": user_id,
            "role": "contractor",
            "established_at": "2026-01-05T10:00:00Z"
        });
        let ctx: SessionContext = serde_json::from_value(json).unwrap();
        assert_eq!(ctx.role, Role::Applicant);
        assert_eq!(ctx.user_id, user_id);
    }
}
