//! Configuration management

use crate::config_error;
use crate::error::CrmResult;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level dashboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dev_mode: false,
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// How route admission relates to the navigation menu's role allow-lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardPolicy {
    /// Any authenticated role reaches any protected view; menu filtering is cosmetic
    #[default]
    SessionOnly,
    /// Protected views enforce the same role allow-list as the menu
    RoleScoped,
}

impl std::fmt::Display for GuardPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardPolicy::SessionOnly => write!(f, "session_only"),
            GuardPolicy::RoleScoped => write!(f, "role_scoped"),
        }
    }
}

impl std::str::FromStr for GuardPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "session_only" => Ok(GuardPolicy::SessionOnly),
            "role_scoped" => Ok(GuardPolicy::RoleScoped),
            _ => Err(format!("Unknown guard policy: {}", s)),
        }
    }
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Artificial delay applied to login, password reset and settings saves
    pub simulated_latency_ms: u64,
    pub guard_policy: GuardPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 1000,
            guard_policy: GuardPolicy::SessionOnly,
        }
    }
}

impl AuthConfig {
    /// Configuration with no artificial latency, used by tests and benchmarks
    pub fn instant() -> Self {
        Self {
            simulated_latency_ms: 0,
            ..Self::default()
        }
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

/// Where the remembered session lives between restarts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding key-value files; `~` expands to the home directory
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: "~/.crm-dash/data".to_string(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~` expanded
    pub fn resolved_data_dir(&self) -> PathBuf {
        if let Some(rest) = self.data_dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(&self.data_dir)
    }
}

impl CrmConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CrmResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error!("Failed to read config file", "config", e))?;

        let config: CrmConfig = toml::from_str(&content)
            .map_err(|e| config_error!("Failed to parse config", "config", e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CrmResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| config_error!("Failed to serialize config", "config", e))?;

        std::fs::write(path, content)
            .map_err(|e| config_error!("Failed to write config", "config", e))?;

        Ok(())
    }

    /// Apply `CRM_*` environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("CRM_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("CRM_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(dev) = std::env::var("CRM_DEV_MODE")
            .ok()
            .and_then(|d| d.parse().ok())
        {
            self.server.dev_mode = dev;
        }
        if let Ok(data_dir) = std::env::var("CRM_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CrmResult<()> {
        if self.server.port == 0 {
            return Err(config_error!("Server port must be positive", "config"));
        }

        if self.server.host.trim().is_empty() {
            return Err(config_error!("Server host must not be empty", "config"));
        }

        if self.storage.backend == StorageBackend::File && self.storage.data_dir.trim().is_empty()
        {
            return Err(config_error!(
                "storage.data_dir is required for the file backend",
                "config"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CrmError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = CrmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.address(), "127.0.0.1:8080");
        assert_eq!(config.auth.simulated_latency(), Duration::from_millis(1000));
        assert_eq!(config.auth.guard_policy, GuardPolicy::SessionOnly);
    }

    #[test]
    fn test_shipped_config_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../crm.toml");
        let config = CrmConfig::from_file(path).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.auth.simulated_latency_ms, 1000);
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CrmConfig = toml::from_str(
            r#"
            [auth]
            guard_policy = "role_scoped"

            [storage]
            backend = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.auth.guard_policy, GuardPolicy::RoleScoped);
        assert_eq!(config.auth.simulated_latency_ms, 1000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crm.toml");

        let mut config = CrmConfig::default();
        config.server.port = 9191;
        config.auth = AuthConfig::instant();
        config.save_to_file(&path).unwrap();

        let loaded = CrmConfig::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 9191);
        assert_eq!(loaded.auth.simulated_latency_ms, 0);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        match CrmConfig::from_file(&path) {
            Err(CrmError::Config {
                message,
                source,
                context,
            }) => {
                assert_eq!(message, "Failed to parse config");
                assert!(source.is_some());
                assert_eq!(context.component, "config");
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = CrmConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_data_dir_for_file_backend() {
        let mut config = CrmConfig::default();
        config.storage.data_dir = "  ".to_string();
        assert!(config.validate().is_err());

        config.storage.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_resolved_data_dir_plain_path() {
        let storage = StorageConfig {
            backend: StorageBackend::File,
            data_dir: "/var/lib/crm".to_string(),
        };
        assert_eq!(storage.resolved_data_dir(), PathBuf::from("/var/lib/crm"));
    }

    #[test]
    fn test_guard_policy_from_str() {
        assert_eq!(
            "ROLE_SCOPED".parse::<GuardPolicy>().unwrap(),
            GuardPolicy::RoleScoped
        );
        assert!("strict".parse::<GuardPolicy>().is_err());
        assert_eq!(GuardPolicy::SessionOnly.to_string(), "session_only");
    }
}
