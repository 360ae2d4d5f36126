//! Client error types.

use lens_core::errors::ServiceError;
use thiserror::Error;

/// Errors that can occur when talking to the Nutrilens services.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service returned a non-success status without a structured body.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The service answered with a structured `{"error": ...}` payload.
    #[error("service error ({status}): {message}")]
    Service {
        status: u16,
        message: String,
        raw_response: Option<String>,
    },

    /// The body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The service returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Service {
                message,
                raw_response,
                ..
            } => Self::Reported {
                message,
                raw_response,
            },
            ClientError::Malformed(detail) => Self::MalformedResponse(detail),
            other @ (ClientError::Http(_)
            | ClientError::Api { .. }
            | ClientError::RateLimited { .. }) => Self::Transport(other.to_string()),
        }
    }
}
