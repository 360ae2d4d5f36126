//! # lens-config
//!
//! Layered configuration loading for Nutrilens using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`NUTRILENS_*` prefix, `__` as separator)
//! 2. Project-level `.nutrilens/config.toml`
//! 3. User-level `~/.config/nutrilens/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `NUTRILENS_SERVICE__BASE_URL` -> `service.base_url` and
//! `NUTRILENS_WORKFLOW__REQUEST_TIMEOUT_SECS` -> `workflow.request_timeout_secs`.
//!
//! # Usage
//!
//! ```no_run
//! use lens_config::LensConfig;
//!
//! let config = LensConfig::load_with_dotenv().expect("config");
//! println!("predict endpoint: {}", config.service.predict_url());
//! ```

mod error;
mod general;
mod service;
mod workflow;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use service::ServiceConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "NUTRILENS_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LensConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl LensConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if the merged values are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load defaults, then the TOML file at `path`, then the environment.
    /// The standard user and project files are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`], plus [`ConfigError::MissingFile`] if `path`
    /// does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer more providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".nutrilens/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check every section for invalid values.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.validate()?;
        self.workflow.validate()
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nutrilens").join("config.toml"))
    }
}
