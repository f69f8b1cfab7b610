//! SaltGuard clinical triage library
//!
//! Turns prediction-service output into risk tiers, cohort counts and
//! plain-language explanations, and exposes them over HTTP.

pub mod api;
pub mod core;
pub mod error;
pub mod models;

pub use crate::error::{Result, SaltguardError};

/// Application configuration
pub mod config {
    use serde::Deserialize;
    use url::Url;

    #[derive(Debug, Clone, Deserialize)]
    pub struct Config {
        pub server: ServerConfig,
        pub prediction: PredictionConfig,
        pub logging: LoggingConfig,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ServerConfig {
        pub host: String,
        pub port: u16,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PredictionConfig {
        pub base_url: String,
        pub timeout_secs: u64,
    }

    impl PredictionConfig {
        /// `{base_url}/predict`, tolerating a trailing slash or a path prefix.
        pub fn endpoint(&self) -> Result<Url, url::ParseError> {
            let base = format!("{}/", self.base_url.trim_end_matches('/'));
            Url::parse(&base)?.join("predict")
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum LogFormat {
        Pretty,
        Json,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct LoggingConfig {
        pub format: LogFormat,
    }

    /// Load configuration from file
    pub fn load_config() -> Result<Config, config::ConfigError> {
        let env = std::env::var("SALTGUARD_ENV").unwrap_or_else(|_| "development".into());
        build(&env, "config")
    }

    fn build(env: &str, dir: &str) -> Result<Config, config::ConfigError> {
        let settings = config::Config::builder()
            // Built-in defaults so the service starts without a config directory
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("prediction.base_url", "http://127.0.0.1:8000")?
            .set_default("prediction.timeout_secs", 10_i64)?
            .set_default("logging.format", "pretty")?
            // Shared settings, then environment-specific overrides
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, env)).required(false))
            // e.g. SALTGUARD__PREDICTION__BASE_URL
            .add_source(config::Environment::with_prefix("SALTGUARD").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::fs;

        #[test]
        fn defaults_apply_without_files() {
            let config = build("test", "does-not-exist").unwrap();
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.prediction.timeout_secs, 10);
            assert_eq!(config.logging.format, LogFormat::Pretty);
        }

        #[test]
        fn environment_file_overrides_default_file() {
            let dir = tempfile::tempdir().unwrap();
            fs::write(
                dir.path().join("default.toml"),
                "[server]\nport = 9000\n\n[prediction]\ntimeout_secs = 30\n",
            )
            .unwrap();
            fs::write(dir.path().join("staging.toml"), "[server]\nport = 9100\n").unwrap();

            let config = build("staging", dir.path().to_str().unwrap()).unwrap();
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.prediction.timeout_secs, 30);
            assert_eq!(config.server.host, "127.0.0.1");
        }

        #[test]
        fn environment_variable_overrides_files() {
            let dir = tempfile::tempdir().unwrap();
            fs::write(
                dir.path().join("default.toml"),
                "[prediction]\nbase_url = \"http://from-file:8000\"\n",
            )
            .unwrap();

            std::env::set_var("SALTGUARD__PREDICTION__BASE_URL", "http://from-env:9000");
            let config = build("test", dir.path().to_str().unwrap());
            std::env::remove_var("SALTGUARD__PREDICTION__BASE_URL");

            assert_eq!(config.unwrap().prediction.base_url, "http://from-env:9000");
        }

        #[test]
        fn endpoint_appends_predict() {
            let mut prediction = PredictionConfig {
                base_url: "http://ml.internal:8000".to_string(),
                timeout_secs: 10,
            };
            assert_eq!(prediction.endpoint().unwrap().as_str(), "http://ml.internal:8000/predict");

            prediction.base_url = "https://ml.internal/v2/".to_string();
            assert_eq!(prediction.endpoint().unwrap().as_str(), "https://ml.internal/v2/predict");
        }

        #[test]
        fn endpoint_rejects_garbage() {
            let prediction = PredictionConfig {
                base_url: "not a url".to_string(),
                timeout_secs: 10,
            };
            assert!(prediction.endpoint().is_err());
        }
    }
}
