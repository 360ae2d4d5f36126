//! Workflow error types.
//!
//! Every failure a controller can reach carries one of the [`ErrorKind`]s
//! below and the message text of the underlying collaborator failure.

use lens_core::errors::ServiceError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error taxonomy shared by both workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoDataAvailable,
    FetchFailed,
    PredictionFailed,
    NoImageSelected,
    AnalysisFailed,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoDataAvailable => "no_data_available",
            Self::FetchFailed => "fetch_failed",
            Self::PredictionFailed => "prediction_failed",
            Self::NoImageSelected => "no_image_selected",
            Self::AnalysisFailed => "analysis_failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one nutrition risk run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NutritionError {
    /// The store returned no records.
    #[error("No nutrition data available. Please add some food items first.")]
    NoDataAvailable,

    /// Retrieving records failed.
    #[error("Failed to fetch nutrition data: {source}")]
    FetchFailed { source: ServiceError },

    /// The prediction service failed.
    #[error("Failed to get disease predictions: {source}")]
    PredictionFailed { source: ServiceError },
}

impl NutritionError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoDataAvailable => ErrorKind::NoDataAvailable,
            Self::FetchFailed { .. } => ErrorKind::FetchFailed,
            Self::PredictionFailed { .. } => ErrorKind::PredictionFailed,
        }
    }

    /// The collaborator failure behind this error, if any.
    #[must_use]
    pub const fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::NoDataAvailable => None,
            Self::FetchFailed { source } | Self::PredictionFailed { source } => Some(source),
        }
    }

    /// Whether a service answered with a body of the wrong shape.
    #[must_use]
    pub const fn is_malformed_response(&self) -> bool {
        matches!(
            self.service_error(),
            Some(ServiceError::MalformedResponse(_))
        )
    }
}

/// Why an ingredient analysis failed.
///
/// A structured payload reported by the service is kept apart from a request
/// that never produced a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisFailure {
    /// The service reported an error.
    #[error("{}", reported_text(.message, .raw_response.as_deref()))]
    Reported {
        message: String,
        raw_response: Option<String>,
    },

    /// The request did not complete.
    #[error("Failed to analyze ingredients: {0}")]
    Transport(String),

    /// The service answered with something that is not an analysis result.
    #[error("Failed to analyze ingredients: malformed response: {0}")]
    Malformed(String),
}

fn reported_text(message: &str, raw_response: Option<&str>) -> String {
    match raw_response {
        Some(raw) if !raw.trim().is_empty() => format!("{message}\nRaw response: {raw}"),
        _ => message.to_string(),
    }
}

impl From<ServiceError> for AnalysisFailure {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Reported {
                message,
                raw_response,
            } => Self::Reported {
                message,
                raw_response,
            },
            ServiceError::MalformedResponse(detail) => Self::Malformed(detail),
            other @ (ServiceError::Transport(_) | ServiceError::Timeout { .. }) => {
                Self::Transport(other.to_string())
            }
        }
    }
}

/// Failure of an ingredient analysis action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// `analyze` was requested with no image selected. No transition happens.
    #[error("Please upload an image first")]
    NoImageSelected,

    #[error(transparent)]
    AnalysisFailed(#[from] AnalysisFailure),
}

impl AnalysisError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoImageSelected => ErrorKind::NoImageSelected,
            Self::AnalysisFailed(_) => ErrorKind::AnalysisFailed,
        }
    }

    /// Whether the service itself reported the failure.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::AnalysisFailed(AnalysisFailure::Reported { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nutrition_error_kinds_and_messages() {
        assert_eq!(
            NutritionError::NoDataAvailable.kind(),
            ErrorKind::NoDataAvailable
        );

        let err = NutritionError::FetchFailed {
            source: ServiceError::Transport("connection refused".into()),
        };
        assert_eq!(err.kind(), ErrorKind::FetchFailed);
        assert_eq!(
            err.to_string(),
            "Failed to fetch nutrition data: connection refused"
        );
        assert!(!err.is_malformed_response());

        let err = NutritionError::PredictionFailed {
            source: ServiceError::MalformedResponse("missing field `predictions`".into()),
        };
        assert_eq!(err.kind().as_str(), "prediction_failed");
        assert!(err.is_malformed_response());
    }

    #[test]
    fn reported_failure_includes_raw_response() {
        let failure = AnalysisFailure::from(ServiceError::Reported {
            message: "Failed to parse analysis".into(),
            raw_response: Some("I see a label".into()),
        });
        assert_eq!(
            failure.to_string(),
            "Failed to parse analysis\nRaw response: I see a label"
        );

        let err = AnalysisError::from(failure);
        assert!(err.is_reported());
        assert_eq!(err.kind(), ErrorKind::AnalysisFailed);
    }

    #[test]
    fn reported_failure_without_raw_response() {
        let failure = AnalysisFailure::Reported {
            message: "No text found".into(),
            raw_response: None,
        };
        assert_eq!(failure.to_string(), "No text found");
    }

    #[test]
    fn generic_failures_are_distinguishable() {
        let transport = AnalysisFailure::from(ServiceError::Timeout { millis: 30_000 });
        assert_eq!(
            transport.to_string(),
            "Failed to analyze ingredients: request timed out after 30000ms"
        );
        let malformed = AnalysisFailure::from(ServiceError::MalformedResponse("bad".into()));
        assert!(matches!(malformed, AnalysisFailure::Malformed(_)));
        assert!(!AnalysisError::from(malformed).is_reported());
    }

    #[test]
    fn no_image_selected() {
        let err = AnalysisError::NoImageSelected;
        assert_eq!(err.kind(), ErrorKind::NoImageSelected);
        assert_eq!(err.to_string(), "Please upload an image first");
    }

    #[test]
    fn no_data_message_asks_for_food_items() {
        let err = NutritionError::NoDataAvailable;
        assert_eq!(err.kind(), ErrorKind::NoDataAvailable);
        assert_eq!(
            err.to_string(),
            "No nutrition data available. Please add some food items first."
        );
    }
}
