//! # lens-client
//!
//! HTTP clients for the three Nutrilens services:
//! - the nutrition store (`GET` latest records)
//! - the disease risk prediction service (`POST` a flattened profile)
//! - the ingredient analysis service (`POST` a label image as multipart)
//!
//! [`ServiceClient`] implements the collaborator traits from
//! `lens_core::collaborators`, so workflows never see HTTP details.

pub mod ingredients;
pub mod nutrition;
pub mod predict;

mod error;
mod http;
mod services;

pub use error::ClientError;

use std::time::Duration;

use lens_config::ServiceConfig;

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client bound to one set of service endpoints.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    service: ServiceConfig,
}

impl ServiceClient {
    /// Create a client for the endpoints in `service`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(service: &ServiceConfig, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(service.user_agent.as_str())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            service: service.clone(),
        })
    }

    /// Endpoint configuration this client talks to.
    #[must_use]
    pub const fn service(&self) -> &ServiceConfig {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let client = ServiceClient::new(&ServiceConfig::default(), Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.service().predict_url(),
            "http://localhost:8000/predict"
        );
    }
}
