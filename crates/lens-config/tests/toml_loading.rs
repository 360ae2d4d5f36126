//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use lens_config::{ConfigError, LensConfig};
use pretty_assertions::assert_eq;

#[test]
fn loads_service_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[service]
base_url = "https://nutrition.example.com"
predict_path = "/v2/predict"
user_agent = "kiosk/1.0"
"#,
        )?;

        let config: LensConfig = Figment::from(Serialized::defaults(LensConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.service.base_url, "https://nutrition.example.com");
        assert_eq!(
            config.service.predict_url(),
            "https://nutrition.example.com/v2/predict"
        );
        assert_eq!(config.service.nutrition_path, "/getnutrition");
        assert_eq!(config.service.user_agent, "kiosk/1.0");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_default_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".nutrilens")?;
        jail.create_file(
            ".nutrilens/config.toml",
            r#"
[workflow]
request_timeout_secs = 5

[general]
max_image_bytes = 2048
accepted_image_types = ["image/png"]
"#,
        )?;

        let config = LensConfig::load().expect("config loads");
        assert_eq!(config.workflow.request_timeout_secs, 5);
        assert_eq!(config.general.max_image_bytes, 2048);
        assert!(!config.general.accepts("image/jpeg"));
        Ok(())
    });
}

#[test]
fn load_from_explicit_path() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[service]
base_url = "http://10.0.0.7:9000"
"#,
        )?;

        let config = LensConfig::load_from(std::path::Path::new("custom.toml"))
            .expect("config loads");
        assert_eq!(config.service.analyze_url(), "http://10.0.0.7:9000/analyze-ingredients");
        Ok(())
    });
}

#[test]
fn load_from_missing_file_fails() {
    Jail::expect_with(|_jail| {
        let err = LensConfig::load_from(std::path::Path::new("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
        assert_eq!(err.to_string(), "Config file not found: absent.toml");
        Ok(())
    });
}

#[test]
fn invalid_base_url_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_dir(".nutrilens")?;
        jail.create_file(
            ".nutrilens/config.toml",
            r#"
[service]
base_url = "localhost:8000"
"#,
        )?;

        let err = LensConfig::load().unwrap_err();
        assert!(err.to_string().contains("service.base_url"));
        Ok(())
    });
}

#[test]
fn malformed_toml_surfaces_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("broken.toml", "[service\nbase_url = ")?;
        let err = LensConfig::load_from(std::path::Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
