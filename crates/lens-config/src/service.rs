//! Remote service endpoints.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_base_url() -> String {
    String::from("http://localhost:8000")
}

fn default_nutrition_path() -> String {
    String::from("/getnutrition")
}

fn default_predict_path() -> String {
    String::from("/predict")
}

fn default_analyze_path() -> String {
    String::from("/analyze-ingredients")
}

fn default_user_agent() -> String {
    format!("nutrilens/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL shared by all three services (e.g., `http://localhost:8000`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the nutrition store's "latest records" endpoint.
    #[serde(default = "default_nutrition_path")]
    pub nutrition_path: String,

    /// Path of the disease risk prediction endpoint.
    #[serde(default = "default_predict_path")]
    pub predict_path: String,

    /// Path of the ingredient analysis endpoint.
    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            nutrition_path: default_nutrition_path(),
            predict_path: default_predict_path(),
            analyze_path: default_analyze_path(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServiceConfig {
    /// Join `path` onto the base URL with exactly one slash between them.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub fn nutrition_url(&self) -> String {
        self.endpoint(&self.nutrition_path)
    }

    #[must_use]
    pub fn predict_url(&self) -> String {
        self.endpoint(&self.predict_path)
    }

    #[must_use]
    pub fn analyze_url(&self) -> String {
        self.endpoint(&self.analyze_path)
    }

    /// Check that the base URL is an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming `service.base_url`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| {
                ConfigError::invalid("service.base_url", format!("'{url}' is not an http(s) URL"))
            })?;
        if rest.trim_matches('/').is_empty() {
            return Err(ConfigError::invalid("service.base_url", "missing host"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_services() {
        let config = ServiceConfig::default();
        assert_eq!(config.nutrition_url(), "http://localhost:8000/getnutrition");
        assert_eq!(config.predict_url(), "http://localhost:8000/predict");
        assert_eq!(
            config.analyze_url(),
            "http://localhost:8000/analyze-ingredients"
        );
        assert!(config.user_agent.starts_with("nutrilens/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let config = ServiceConfig {
            base_url: "https://api.example.com/".into(),
            ..ServiceConfig::default()
        };
        assert_eq!(config.endpoint("predict"), "https://api.example.com/predict");
        assert_eq!(config.endpoint("/predict"), "https://api.example.com/predict");
    }

    #[test]
    fn rejects_non_http_urls() {
        for url in ["ftp://example.com", "localhost:8000", "http://", ""] {
            let config = ServiceConfig {
                base_url: url.into(),
                ..ServiceConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("service.base_url"), "{url}");
        }
    }
}
