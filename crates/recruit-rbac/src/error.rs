//! Error types for access-control operations
//!
//! Only strict parsing and evaluator wiring produce errors. Lenient parsing,
//! unknown roles and unknown subjects degrade to documented defaults instead.

use thiserror::Error;

/// Access-control error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Permission string is not of the form `subject.action`
    #[error("Malformed permission string: {0:?}")]
    MalformedPermission(String),

    /// Subject token names no known subject
    #[error("Unknown subject {subject:?} in permission {permission:?}")]
    UnknownSubject {
        /// The full permission string.
        permission: String,
        /// The offending subject token.
        subject: String,
    },

    /// Action token names no known action
    #[error("Unknown action {action:?} in permission {permission:?}")]
    UnknownAction {
        /// The full permission string.
        permission: String,
        /// The offending action token.
        action: String,
    },

    /// Evaluator was constructed without a session context
    #[error("Access evaluator requires a session context")]
    MissingSession,

    /// A menu node carries an invalid permission
    #[error("Invalid permission on menu node {node_id:?}: {source}")]
    InvalidMenu {
        /// Id of the node carrying the permission.
        node_id: String,
        /// Underlying parse error.
        #[source]
        source: Box<AccessError>,
    },
}

/// Result type for access-control operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Check if this error indicates an integration bug rather than bad input.
    pub fn is_wiring_error(&self) -> bool {
        matches!(self, AccessError::MissingSession)
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::MalformedPermission(_) => "MALFORMED_PERMISSION",
            AccessError::UnknownSubject { .. } => "UNKNOWN_SUBJECT",
            AccessError::UnknownAction { .. } => "UNKNOWN_ACTION",
            AccessError::MissingSession => "MISSING_SESSION",
            AccessError::InvalidMenu { .. } => "INVALID_MENU",
        }
    }
}
