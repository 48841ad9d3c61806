use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::auth::AuthScheme;
use crate::error::ConfigError;

/// Top-level client configuration, usually loaded from `config/{env}.yaml`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider endpoint and credentials
#[derive(Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Supplier website URL; requests go to `{base_url}/api/{route}`
    pub base_url: String,
    pub username: String,
    pub api_key: String,
    #[serde(default)]
    pub auth_scheme: AuthScheme,
    /// Whole-request timeout. `None` waits for the provider indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("auth_scheme", &self.auth_scheme)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// What to do when a file order names an upload that is not on disk
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingUploadPolicy {
    /// Fail with `MissingUploadFile` before any request is sent
    #[default]
    Reject,
    /// Send the order with a null `device` field
    SubmitNull,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadsConfig {
    pub dir: PathBuf,
    #[serde(default)]
    pub missing_file: MissingUploadPolicy,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            missing_file: MissingUploadPolicy::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "reseller-client.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        Self::from_file(&format!("config/{}.yaml", env))
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let yaml = r#"
provider:
  base_url: "https://supplier.example"
  username: "reseller"
  api_key: "secret"
"#;

        let config = ClientConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.provider.base_url, "https://supplier.example");
        assert_eq!(config.provider.auth_scheme, AuthScheme::HmacSha256);
        assert_eq!(config.provider.timeout_secs, None);
        assert_eq!(config.uploads.dir, PathBuf::from("uploads"));
        assert_eq!(config.uploads.missing_file, MissingUploadPolicy::Reject);
        assert_eq!(config.logging.rotation, "daily");
    }

    #[test]
    fn test_client_config_full() {
        let yaml = r#"
provider:
  base_url: "https://supplier.example"
  username: "reseller"
  api_key: "secret"
  auth_scheme: bcrypt
  timeout_secs: 30
uploads:
  dir: "/var/lib/reseller/uploads"
  missing_file: submit_null
logging:
  log_level: "debug"
  log_dir: "/tmp/logs"
  log_file: "client.log"
  use_json: true
  rotation: "hourly"
"#;

        let config = ClientConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.provider.auth_scheme, AuthScheme::Bcrypt);
        assert_eq!(config.provider.timeout_secs, Some(30));
        assert_eq!(config.uploads.missing_file, MissingUploadPolicy::SubmitNull);
        assert!(config.logging.use_json);
    }

    #[test]
    fn test_missing_provider_section_is_rejected() {
        let result = ClientConfig::from_yaml("uploads:\n  dir: uploads\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig {
            base_url: "https://supplier.example".to_string(),
            username: "reseller".to_string(),
            api_key: "top-secret-key".to_string(),
            auth_scheme: AuthScheme::HmacSha256,
            timeout_secs: None,
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_sample_config_parses() {
        let config = ClientConfig::from_yaml(include_str!("../config/dev.yaml")).unwrap();
        assert!(!config.provider.username.is_empty());
    }
}
