//! # Subjects
//!
//! Defines the subjects of the recruitment portal that permissions are granted on.
//! `All` is the wildcard subject used by the universal `manage all` grant.

use serde::{Deserialize, Serialize};

/// Subjects that can have capabilities attached.
///
/// Serialized names follow the portal's rule format: page-level subjects are
/// lowercase (`dashboard`, `all`), entity subjects are capitalized
/// (`Job`, `Application`, `User`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subject {
    /// The dashboard landing page.
    #[serde(rename = "dashboard")]
    Dashboard,
    /// Job postings.
    #[serde(rename = "Job")]
    Job,
    /// Candidate applications to jobs.
    #[serde(rename = "Application")]
    Application,
    /// User accounts.
    #[serde(rename = "User")]
    User,
    /// Wildcard subject.
    #[serde(rename = "all")]
    All,
}

impl Subject {
    /// Number of subjects, used to size the capability bitset.
    pub const COUNT: usize = 5;

    /// Get the rule-format name of the subject.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Dashboard => "dashboard",
            Subject::Job => "Job",
            Subject::Application => "Application",
            Subject::User => "User",
            Subject::All => "all",
        }
    }

    /// Get the lowercase token used in permission strings.
    pub fn token(&self) -> &'static str {
        match self {
            Subject::Dashboard => "dashboard",
            Subject::Job => "job",
            Subject::Application => "application",
            Subject::User => "user",
            Subject::All => "all",
        }
    }

    /// Parse a permission-string subject token.
    ///
    /// Matching is case-insensitive. Returns `None` for tokens that name no
    /// subject; see [`Subject::from_token`] for the wildcard fallback.
    ///
    /// # Example
    ///
    /// ```
    /// use recruit_rbac::subjects::Subject;
    ///
    /// assert_eq!(Subject::parse("job"), Some(Subject::Job));
    /// assert_eq!(Subject::parse("APPLICATION"), Some(Subject::Application));
    /// assert_eq!(Subject::parse("candidates"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dashboard" => Some(Subject::Dashboard),
            "job" => Some(Subject::Job),
            "application" => Some(Subject::Application),
            "user" => Some(Subject::User),
            "all" => Some(Subject::All),
            _ => None,
        }
    }

    /// Map a subject token, sending anything unrecognised to the wildcard.
    ///
    /// The wildcard only matches grants on `all`, so an unknown subject is
    /// never a blanket allow.
    ///
    /// ```
    /// use recruit_rbac::subjects::Subject;
    ///
    /// assert_eq!(Subject::from_token("Dashboard"), Subject::Dashboard);
    /// assert_eq!(Subject::from_token("interview"), Subject::All);
    /// ```
    pub fn from_token(s: &str) -> Self {
        Self::parse(s).unwrap_or(Subject::All)
    }

    /// Get all subjects in declaration order.
    pub fn all() -> [Self; Self::COUNT] {
        [
            Subject::Dashboard,
            Subject::Job,
            Subject::Application,
            Subject::User,
            Subject::All,
        ]
    }

    /// Position of the subject in [`Subject::all`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Check if a grant on this subject covers `other`.
    pub fn covers(&self, other: Subject) -> bool {
        *self == Subject::All || *self == other
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
