//! Configuration Management
//!
//! Gateway connection settings: the validated [`HostConfig`] every request is
//! built from, and the persisted [`ProviderSettings`] file it is resolved from.

use crate::gateway::error::{GatewayError, GatewayResult};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Transport schemes the gateway accepts
pub const TRANSPORTS: &[&str] = &["http", "https"];

/// Connection settings for a BlueCat Gateway
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    pub host: String,
    pub port: String,
    pub transport: String,
    pub username: String,
    pub password: String,
    pub api_version: String,
    /// The password is stored base64-encoded and must be decoded before login
    #[serde(default)]
    pub encrypt_password: bool,
}

impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("transport", &self.transport)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("encrypt_password", &self.encrypt_password)
            .finish()
    }
}

impl HostConfig {
    /// Check the settings and normalize the transport to lowercase.
    ///
    /// Runs before any network call so a bad host block never reaches the wire.
    pub fn validate(mut self) -> GatewayResult<Self> {
        for (field, value) in [
            ("server", &self.host),
            ("port", &self.port),
            ("username", &self.username),
            ("api_version", &self.api_version),
        ] {
            if value.trim().is_empty() {
                return Err(GatewayError::Config(format!("{field} must not be empty")));
            }
        }

        self.port.trim().parse::<u16>().map_err(|_| {
            GatewayError::Config(format!("port '{}' is not a valid TCP port", self.port))
        })?;

        let transport = self.transport.trim().to_ascii_lowercase();
        if !TRANSPORTS.contains(&transport.as_str()) {
            return Err(GatewayError::Config(format!(
                "transport must be one of {:?}, got '{}'",
                TRANSPORTS, self.transport
            )));
        }
        self.transport = transport;

        Ok(self)
    }

    /// `{transport}://{host}:{port}`
    pub fn origin(&self) -> String {
        format!("{}://{}:{}", self.transport, self.host, self.port)
    }

    /// `{transport}://{host}:{port}/api/{api_version}`
    pub fn base_url(&self) -> String {
        format!("{}/api/{}", self.origin(), self.api_version)
    }
}

/// Provider block as stored on disk; every field may be overridden from the CLI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderSettings {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub transport: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub encrypt_password: Option<bool>,
}

impl ProviderSettings {
    /// Default settings file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bluecat-gss").join("provider.json"))
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to disk. The password is never written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Overlay values from `other` that are set
    pub fn merge(mut self, other: ProviderSettings) -> Self {
        self.server = other.server.or(self.server);
        self.port = other.port.or(self.port);
        self.transport = other.transport.or(self.transport);
        self.username = other.username.or(self.username);
        self.password = other.password.or(self.password);
        self.api_version = other.api_version.or(self.api_version);
        self.encrypt_password = other.encrypt_password.or(self.encrypt_password);
        self
    }

    /// Produce a validated host configuration
    pub fn resolve(self) -> GatewayResult<HostConfig> {
        fn required(value: Option<String>, name: &str) -> GatewayResult<String> {
            value.ok_or_else(|| GatewayError::Config(format!("missing required setting '{name}'")))
        }

        HostConfig {
            host: required(self.server, "server")?,
            port: required(self.port, "port")?,
            transport: required(self.transport, "transport")?,
            username: required(self.username, "username")?,
            password: required(self.password, "password")?,
            api_version: required(self.api_version, "api_version")?,
            encrypt_password: self.encrypt_password.unwrap_or(false),
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostConfig {
        HostConfig {
            host: "gw.example.com".into(),
            port: "5000".into(),
            transport: "HTTPS".into(),
            username: "admin".into(),
            password: "secret".into(),
            api_version: "v1".into(),
            encrypt_password: false,
        }
    }

    #[test]
    fn test_validate_normalizes_transport() {
        let config = host().validate().unwrap();
        assert_eq!(config.transport, "https");
        assert_eq!(config.base_url(), "https://gw.example.com:5000/api/v1");
    }

    #[test]
    fn test_validate_rejects_blank_host_and_port() {
        let mut config = host();
        config.host = "  ".into();
        assert!(matches!(config.validate(), Err(GatewayError::Config(_))));

        let mut config = host();
        config.port = String::new();
        assert!(matches!(config.validate(), Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_port_and_transport() {
        let mut config = host();
        config.port = "http".into();
        assert!(config.validate().is_err());

        let mut config = host();
        config.transport = "ftp".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", host());
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_resolve_reports_missing_setting() {
        let settings = ProviderSettings {
            server: Some("gw".into()),
            ..Default::default()
        };
        let err = settings.resolve().unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = ProviderSettings {
            server: Some("file-host".into()),
            port: Some("80".into()),
            ..Default::default()
        };
        let cli = ProviderSettings {
            server: Some("cli-host".into()),
            ..Default::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.server.as_deref(), Some("cli-host"));
        assert_eq!(merged.port.as_deref(), Some("80"));
    }

    #[test]
    fn test_save_never_writes_password() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("provider.json");
        let settings = ProviderSettings {
            server: Some("gw".into()),
            password: Some("hunter2".into()),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("hunter2"));
        let loaded = ProviderSettings::load_from(&path).unwrap();
        assert_eq!(loaded.server.as_deref(), Some("gw"));
        assert!(loaded.password.is_none());
    }
}
