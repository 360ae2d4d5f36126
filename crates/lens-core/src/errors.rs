//! Cross-cutting error types for Nutrilens.
//!
//! [`ServiceError`] is what every collaborator (nutrition store, prediction
//! service, ingredient analysis service) reports. Workflow-level errors are
//! defined in `lens-workflow`, where collaborator failures are mapped onto
//! the user-facing taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while building core value objects.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A nutrition record was not a JSON object.
    #[error("Invalid nutrition record: expected a JSON object, found {found}")]
    InvalidRecord { found: &'static str },
}

/// Failure reported by a remote collaborator.
///
/// The variants keep apart a request that never completed, a service that
/// answered with a structured error payload, and a service that answered
/// with something that does not match the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request could not complete (connection, TLS, non-success status
    /// without a structured body).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a structured error payload.
    #[error("{message}")]
    Reported {
        message: String,
        /// Raw model or upstream output, for diagnostics.
        raw_response: Option<String>,
    },

    /// The response body did not match the expected wire shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// No response arrived before the deadline.
    #[error("request timed out after {millis}ms")]
    Timeout { millis: u64 },
}

impl ServiceError {
    /// Timeout after waiting `after`, kept at millisecond precision.
    #[must_use]
    pub fn timeout(after: Duration) -> Self {
        Self::Timeout {
            millis: u64::try_from(after.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Whether the service itself reported the error.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Reported { .. })
    }
}
