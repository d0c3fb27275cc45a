//! # Permission strings
//!
//! Parses `"subject.action"` strings attached to menu entries and page
//! elements into typed requests.
//!
//! Two parsers are provided:
//!
//! - [`parse_permission`] keeps the portal's historical leniency. Empty or
//!   dot-less strings mean "no restriction" (fail-open), unknown subjects map
//!   to the wildcard, and unknown actions are carried through and denied at
//!   check time (fail-closed).
//! - [`parse_permission_strict`] rejects anything that is not a known
//!   `subject.action` pair. Use it to validate configuration at load time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

use crate::actions::Action;
use crate::capabilities::CapabilitySet;
use crate::error::{AccessError, AccessResult};
use crate::subjects::Subject;

/// Action half of a permission string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionToken {
    /// A known action.
    Known(Action),
    /// A token naming no action. Only the universal capability grants it.
    Unrecognized(String),
}

impl ActionToken {
    /// Classify a verbatim action token.
    pub fn from_token(s: &str) -> Self {
        match Action::parse(s) {
            Some(action) => ActionToken::Known(action),
            None => ActionToken::Unrecognized(s.to_string()),
        }
    }

    /// Get the known action, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            ActionToken::Known(action) => Some(*action),
            ActionToken::Unrecognized(_) => None,
        }
    }

    /// Get the token text.
    pub fn as_str(&self) -> &str {
        match self {
            ActionToken::Known(action) => action.as_str(),
            ActionToken::Unrecognized(raw) => raw,
        }
    }
}

/// A parsed permission requirement: the capability a caller must hold.
///
/// # Example
///
/// ```
/// use recruit_rbac::{Action, PermissionRequest, Subject};
///
/// let req: PermissionRequest = "job.create".parse().unwrap();
/// assert_eq!(req.subject, Subject::Job);
/// assert_eq!(req.action(), Some(Action::Create));
/// assert_eq!(req.to_string(), "job.create");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionRequest {
    /// The subject the action applies to.
    pub subject: Subject,
    /// The requested action.
    pub action: ActionToken,
}

impl PermissionRequest {
    /// Create a request for a known action.
    pub fn new(subject: Subject, action: Action) -> Self {
        Self {
            subject,
            action: ActionToken::Known(action),
        }
    }

    /// Get the requested action when it is a known one.
    pub fn action(&self) -> Option<Action> {
        self.action.action()
    }

    /// Check the request against a capability set.
    ///
    /// The universal capability grants every request, including ones with an
    /// unrecognised action. Otherwise an unrecognised action is denied.
    pub fn is_granted_by(&self, capabilities: &CapabilitySet) -> bool {
        if capabilities.is_universal() {
            return true;
        }
        match self.action() {
            Some(action) => capabilities.allows(action, self.subject),
            None => false,
        }
    }
}

impl std::fmt::Display for PermissionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.subject.token(), self.action.as_str())
    }
}

impl FromStr for PermissionRequest {
    type Err = AccessError;

    /// Parses strictly; an empty string is an error here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_permission_strict(Some(s))?
            .ok_or_else(|| AccessError::MalformedPermission(s.to_string()))
    }
}

/// How permission strings are interpreted at check time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Malformed strings grant access, unknown subjects become the wildcard.
    #[default]
    Lenient,
    /// Anything the strict parser rejects is denied.
    Strict,
}

/// Split into subject and action segments.
///
/// The action is the segment between the first and second `.`; anything after
/// a second `.` is ignored. Both segments must be non-empty.
fn split_permission(s: &str) -> Option<(&str, &str)> {
    let (subject, rest) = s.split_once('.')?;
    let action = rest.split('.').next().unwrap_or_default();
    if subject.is_empty() || action.is_empty() {
        return None;
    }
    Some((subject, action))
}

/// Parse a permission string leniently.
///
/// # Returns
///
/// - `None` for a missing or empty string: no permission is required.
/// - `None` for a string without a `subject.action` shape. This is a
///   deliberate fail-open kept for compatibility with existing menu data.
/// - `Some(request)` otherwise. Unknown subjects map to [`Subject::All`];
///   the action is kept verbatim.
///
/// # Example
///
/// ```
/// use recruit_rbac::{parse_permission, Action, Subject};
///
/// assert!(parse_permission(None).is_none());
/// assert!(parse_permission(Some("not-a-permission")).is_none());
///
/// let req = parse_permission(Some("Application.approve")).unwrap();
/// assert_eq!(req.subject, Subject::Application);
/// assert_eq!(req.action(), Some(Action::Approve));
///
/// let req = parse_permission(Some("interview.read")).unwrap();
/// assert_eq!(req.subject, Subject::All);
/// ```
pub fn parse_permission(s: Option<&str>) -> Option<PermissionRequest> {
    let raw = s.filter(|raw| !raw.is_empty())?;
    let Some((subject, action)) = split_permission(raw) else {
        warn!(permission = raw, "Malformed permission string treated as unrestricted");
        return None;
    };

    Some(PermissionRequest {
        subject: Subject::from_token(subject),
        action: ActionToken::from_token(action),
    })
}

/// Parse a permission string strictly.
///
/// A missing or empty string is still `Ok(None)` ("no restriction"). Every
/// other string must be a known subject and a known action.
///
/// # Errors
///
/// [`AccessError::MalformedPermission`], [`AccessError::UnknownSubject`] or
/// [`AccessError::UnknownAction`].
///
/// # Example
///
/// ```
/// use recruit_rbac::{parse_permission_strict, AccessError};
///
/// assert!(parse_permission_strict(Some("job.create")).unwrap().is_some());
/// assert!(matches!(
///     parse_permission_strict(Some("jobcreate")),
///     Err(AccessError::MalformedPermission(_))
/// ));
/// assert!(matches!(
///     parse_permission_strict(Some("interview.read")),
///     Err(AccessError::UnknownSubject { .. })
/// ));
/// ```
pub fn parse_permission_strict(s: Option<&str>) -> AccessResult<Option<PermissionRequest>> {
    let Some(raw) = s.filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    let (subject_token, action_token) =
        split_permission(raw).ok_or_else(|| AccessError::MalformedPermission(raw.to_string()))?;

    let subject = Subject::parse(subject_token).ok_or_else(|| AccessError::UnknownSubject {
        permission: raw.to_string(),
        subject: subject_token.to_string(),
    })?;
    let action = Action::parse(action_token).ok_or_else(|| AccessError::UnknownAction {
        permission: raw.to_string(),
        action: action_token.to_string(),
    })?;

    Ok(Some(PermissionRequest::new(subject, action)))
}

/// Check a permission string against a capability set.
///
/// A string that requires nothing is always allowed. In
/// [`ParseMode::Strict`], a string the strict parser rejects is denied.
pub fn check_permission(capabilities: &CapabilitySet, s: Option<&str>, mode: ParseMode) -> bool {
    let request = match mode {
        ParseMode::Lenient => parse_permission(s),
        ParseMode::Strict => match parse_permission_strict(s) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "Rejected permission string in strict mode");
                return false;
            }
        },
    };

    match request {
        Some(request) => request.is_granted_by(capabilities),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;

    #[test]
    fn test_missing_or_empty_is_unrestricted() {
        assert_eq!(parse_permission(None), None);
        assert_eq!(parse_permission(Some("")), None);
        assert_eq!(parse_permission_strict(None), Ok(None));
        assert_eq!(parse_permission_strict(Some("")), Ok(None));
    }

    #[test]
    fn test_malformed_is_unrestricted_when_lenient() {
        assert_eq!(parse_permission(Some("jobs")), None);
        assert_eq!(parse_permission(Some(".read")), None);
        assert_eq!(parse_permission(Some("job.")), None);
        assert_eq!(parse_permission(Some(".")), None);
        assert_eq!(parse_permission(Some("job..read")), None);
    }

    #[test]
    fn test_action_is_second_segment() {
        let req = parse_permission(Some("job.read.extra")).unwrap();
        assert_eq!(req, PermissionRequest::new(Subject::Job, Action::Read));

        let req = parse_permission(Some("job.create.")).unwrap();
        assert_eq!(req, PermissionRequest::new(Subject::Job, Action::Create));

        let recruiter = Role::Recruiter.capabilities();
        assert!(check_permission(&recruiter, Some("job.read.extra"), ParseMode::Lenient));
        assert!(check_permission(&recruiter, Some("job.create."), ParseMode::Lenient));
        assert!(check_permission(&recruiter, Some("job..read"), ParseMode::Lenient));
        assert!(!check_permission(&recruiter, Some("job..read"), ParseMode::Strict));
    }

    #[test]
    fn test_subject_mapping() {
        let cases = [
            ("job.read", Subject::Job),
            ("JOB.read", Subject::Job),
            ("application.read", Subject::Application),
            ("user.read", Subject::User),
            ("Dashboard.read", Subject::Dashboard),
            ("all.read", Subject::All),
            ("report.read", Subject::All),
        ];
        for (raw, subject) in cases {
            assert_eq!(parse_permission(Some(raw)).unwrap().subject, subject, "{raw}");
        }
    }

    #[test]
    fn test_action_is_taken_verbatim() {
        let req = parse_permission(Some("job.Create")).unwrap();
        assert_eq!(req.action, ActionToken::Unrecognized("Create".into()));
        assert!(!req.is_granted_by(&Role::Recruiter.capabilities()));
        assert!(req.is_granted_by(&Role::Admin.capabilities()));
    }

    #[test]
    fn test_unknown_subject_only_matches_wildcard_grants() {
        let req = parse_permission(Some("report.read")).unwrap();
        assert!(!req.is_granted_by(&Role::Recruiter.capabilities()));
        assert!(!req.is_granted_by(&Role::Applicant.capabilities()));
        assert!(req.is_granted_by(&Role::Admin.capabilities()));
    }

    #[test]
    fn test_strict_errors() {
        assert_eq!(
            parse_permission_strict(Some("job")),
            Err(AccessError::MalformedPermission("job".into()))
        );
        assert_eq!(
            parse_permission_strict(Some("job.list")),
            Err(AccessError::UnknownAction {
                permission: "job.list".into(),
                action: "list".into(),
            })
        );
        assert_eq!(
            parse_permission_strict(Some("team.read")),
            Err(AccessError::UnknownSubject {
                permission: "team.read".into(),
                subject: "team".into(),
            })
        );
        assert_eq!(
            parse_permission_strict(Some("all.manage")),
            Ok(Some(PermissionRequest::new(Subject::All, Action::Manage)))
        );
    }

    #[test]
    fn test_check_permission_modes() {
        let recruiter = Role::Recruiter.capabilities();

        assert!(check_permission(&recruiter, Some("garbage"), ParseMode::Lenient));
        assert!(!check_permission(&recruiter, Some("garbage"), ParseMode::Strict));

        assert!(check_permission(&recruiter, None, ParseMode::Strict));
        assert!(check_permission(&recruiter, Some("job.create"), ParseMode::Strict));
        assert!(!check_permission(&recruiter, Some("user.read"), ParseMode::Lenient));
    }

    #[test]
    fn test_from_str_and_display() {
        let req: PermissionRequest = "application.approve".parse().unwrap();
        assert_eq!(req, PermissionRequest::new(Subject::Application, Action::Approve));
        assert_eq!(req.to_string(), "application.approve");

        assert!("".parse::<PermissionRequest>().is_err());
        assert!("job.nope".parse::<PermissionRequest>().is_err());
    }
}
