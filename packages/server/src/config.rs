use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid identity header name: {0:?}")]
    InvalidHeader(String),
}

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub host: String,
    pub http_port: u16,

    /// Email suffixes allowed through the auth gate (e.g. "@hunger.ai")
    pub allowed_email_domains: Vec<String>,

    /// Request header carrying the signed-in user's email
    pub identity_header: String,

    /// Where unauthenticated page requests are redirected
    pub sign_in_url: String,

    /// Per-stage upload timeout
    pub upload_timeout_secs: u64,

    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Fs,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    pub kind: StorageKind,

    /// Directory objects are written to (fs backend)
    pub root: PathBuf,

    /// Base of the minted object URLs
    pub public_base_url: String,

    /// Prepended to the uploaded file name to form the object key
    pub key_prefix: String,

    pub presign_expiry_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            http_port: 3030,
            allowed_email_domains: vec![
                "@hunger.ai".to_string(),
                "@hotcakeapp.com".to_string(),
                "@method.im".to_string(),
            ],
            identity_header: "x-forwarded-email".to_string(),
            sign_in_url: "/api/auth/signin".to_string(),
            upload_timeout_secs: 30,
            storage: StorageConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::Fs,
            root: PathBuf::from(".folio/uploads"),
            public_base_url: "http://127.0.0.1:3030/uploads".to_string(),
            key_prefix: "from_editor/".to_string(),
            presign_expiry_secs: 3600,
        }
    }
}

impl Config {
    /// Load `folio.config.json` from a directory
    pub fn load(cwd: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_file(cwd.as_ref().join(DEFAULT_CONFIG_NAME))
    }

    /// Load a specific config file. A missing file yields the defaults.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "httpPort": 4000,
            "allowedEmailDomains": ["@example.com"],
            "storage": { "kind": "memory", "keyPrefix": "covers/" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.http_port, 4000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.allowed_email_domains, vec!["@example.com"]);
        assert_eq!(config.storage.kind, StorageKind::Memory);
        assert_eq!(config.storage.key_prefix, "covers/");
        assert_eq!(config.storage.presign_expiry_secs, 3600);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.addr(), "127.0.0.1:3030");
        assert_eq!(config.allowed_email_domains.len(), 3);
        assert_eq!(config.storage.key_prefix, "from_editor/");
        assert_eq!(config.upload_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
