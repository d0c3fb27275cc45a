//! Portal roles and the capabilities they carry
//!
//! Every user of the portal holds exactly one role for the lifetime of a
//! session. The role alone determines the capability set.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::actions::Action;
use crate::capabilities::{Capability, CapabilitySet};
use crate::subjects::Subject;

/// User role within the recruitment portal.
///
/// # Permission Model
///
/// - **Admin**: `manage all`, nothing else needed
/// - **Recruiter**: publishes and maintains jobs, reviews and approves applications
/// - **Applicant**: browses jobs, submits and edits their own applications
///
/// # Examples
///
/// ```
/// use recruit_rbac::{Action, Role, Subject};
///
/// let caps = Role::Recruiter.capabilities();
/// assert!(caps.allows(Action::Create, Subject::Job));
/// assert!(!caps.allows(Action::Read, Subject::User));
/// ```
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Portal administrator
    Admin,

    /// Recruiter managing job postings
    Recruiter,

    /// Candidate applying to jobs
    Applicant,
}

/// Grants shared by every non-admin role.
const BASE_GRANTS: &[(Action, Subject)] = &[
    (Action::Read, Subject::Dashboard),
    (Action::Read, Subject::Job),
];

const RECRUITER_GRANTS: &[(Action, Subject)] = &[
    (Action::Create, Subject::Job),
    (Action::Read, Subject::Application),
    (Action::Approve, Subject::Application),
    (Action::Update, Subject::Job),
    (Action::Delete, Subject::Job),
];

const APPLICANT_GRANTS: &[(Action, Subject)] = &[
    (Action::Create, Subject::Application),
    (Action::Read, Subject::Application),
    (Action::Update, Subject::Application),
];

impl Role {
    /// Parse role from its canonical token.
    ///
    /// Tokens are matched exactly; `"ADMIN"` is not a role.
    ///
    /// # Examples
    ///
    /// ```
    /// use recruit_rbac::Role;
    ///
    /// assert_eq!(Role::parse("admin"), Some(Role::Admin));
    /// assert_eq!(Role::parse("RECRUITER"), None);
    /// assert_eq!(Role::parse("owner"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "recruiter" => Some(Self::Recruiter),
            "applicant" => Some(Self::Applicant),
            _ => None,
        }
    }

    /// Resolve the role claimed by a session.
    ///
    /// Missing or unrecognised roles fall back to [`Role::Applicant`], the
    /// smallest capability set. This never fails: a malformed session must not
    /// break permission checks.
    ///
    /// ```
    /// use recruit_rbac::Role;
    ///
    /// assert_eq!(Role::from_session_value(Some("recruiter")), Role::Recruiter);
    /// assert_eq!(Role::from_session_value(Some("superuser")), Role::Applicant);
    /// assert_eq!(Role::from_session_value(None), Role::Applicant);
    /// ```
    pub fn from_session_value(value: Option<&str>) -> Self {
        match value {
            Some(raw) => Self::parse(raw).unwrap_or_else(|| {
                warn!(role = raw, "Unrecognized role, falling back to applicant");
                Self::Applicant
            }),
            None => Self::Applicant,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Recruiter => "recruiter",
            Self::Applicant => "applicant",
        }
    }

    /// Check if this role has admin privileges.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Derive the capability set for this role.
    pub fn capabilities(&self) -> CapabilitySet {
        derive_capabilities(*self)
    }

    /// Get all roles.
    pub fn all() -> [Self; 3] {
        [Self::Admin, Self::Recruiter, Self::Applicant]
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Applicant
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    /// Deserializes leniently, with the same fallback as [`Role::from_session_value`].
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_session_value(raw.as_deref()))
    }
}

/// Derive the capability set for a role.
///
/// Pure and deterministic. `Admin` gets `manage all` and returns early since
/// it already subsumes everything; other roles get the shared base grants plus
/// their own.
///
/// # Examples
///
/// ```
/// use recruit_rbac::{derive_capabilities, Action, Role, Subject};
///
/// let admin = derive_capabilities(Role::Admin);
/// assert!(admin.is_universal());
/// assert_eq!(admin.len(), 1);
///
/// let applicant = derive_capabilities(Role::Applicant);
/// assert!(applicant.allows(Action::Create, Subject::Application));
/// assert!(!applicant.allows(Action::Delete, Subject::Job));
/// ```
pub fn derive_capabilities(role: Role) -> CapabilitySet {
    if role.is_admin() {
        debug!(role = %role, "Derived universal capability set");
        return CapabilitySet::universal();
    }

    let extra = match role {
        Role::Recruiter => RECRUITER_GRANTS,
        Role::Applicant => APPLICANT_GRANTS,
        Role::Admin => &[],
    };

    let set: CapabilitySet = BASE_GRANTS
        .iter()
        .chain(extra)
        .map(|&(action, subject)| Capability::new(action, subject))
        .collect();

    debug!(role = %role, capabilities = set.len(), "Derived capability set");
    set
}
