//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default upload limit: 10 MiB.
const fn default_max_image_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_accepted_image_types() -> Vec<String> {
    ["image/png", "image/jpeg", "image/jpg"]
        .map(String::from)
        .to_vec()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Largest image the CLI will upload for ingredient analysis.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// MIME types accepted for ingredient analysis.
    #[serde(default = "default_accepted_image_types")]
    pub accepted_image_types: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            accepted_image_types: default_accepted_image_types(),
        }
    }
}

impl GeneralConfig {
    /// Whether `content_type` is an accepted image type. Case-insensitive.
    #[must_use]
    pub fn accepts(&self, content_type: &str) -> bool {
        self.accepted_image_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(content_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.max_image_bytes, 10_485_760);
        assert_eq!(
            config.accepted_image_types,
            vec!["image/png", "image/jpeg", "image/jpg"]
        );
    }

    #[test]
    fn content_type_match_ignores_case() {
        let config = GeneralConfig::default();
        assert!(config.accepts("IMAGE/PNG"));
        assert!(config.accepts("image/jpeg"));
        assert!(!config.accepts("image/gif"));
    }
}
