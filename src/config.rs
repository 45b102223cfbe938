use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HubConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub ingest: IngestConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

/// Which [`TimelineRepository`](crate::external::TimelineRepository) backs the hub.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-lifetime timeline, lost on restart.
    Memory,
    /// Durable SQLite file at `storage.db_path`.
    Sqlite,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(format!("unknown storage backend: {s}")),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IngestConfig {
    /// Capacity of the ingest notification channel; slow subscribers lag past this.
    pub notify_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4321,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_hub_dir()
            .join("timeline.db")
            .to_string_lossy()
            .into_owned();
        Self {
            backend: StorageBackend::Memory,
            db_path,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { notify_capacity: 64 }
    }
}

/// Returns `~/.signal-hub/`, or `./.signal-hub/` when no home directory is known.
pub fn default_hub_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".signal-hub")
}

/// Returns the default config file path: `~/.signal-hub/config.toml`
pub fn default_config_path() -> PathBuf {
    default_hub_dir().join("config.toml")
}

impl HubConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            HubConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides (SIGNAL_HUB_DB, SIGNAL_HUB_BACKEND,
    /// SIGNAL_HUB_LOG_LEVEL, SIGNAL_HUB_PORT).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("SIGNAL_HUB_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("SIGNAL_HUB_BACKEND") {
            self.storage.backend = val.parse().map_err(anyhow::Error::msg)?;
        }
        if let Ok(val) = std::env::var("SIGNAL_HUB_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("SIGNAL_HUB_PORT") {
            self.server.port = val
                .parse()
                .with_context(|| format!("invalid SIGNAL_HUB_PORT: {val}"))?;
        }
        Ok(())
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HubConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4321);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.ingest.notify_capacity, 64);
        assert!(config.storage.db_path.ends_with("timeline.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
log_level = "debug"
port = 9000

[storage]
backend = "sqlite"
db_path = "/tmp/test.db"
"#;
        let config: HubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.db_path, "/tmp/test.db");
        // defaults still apply for unset fields
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.ingest.notify_capacity, 64);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let result: Result<HubConfig, _> = toml::from_str("[storage]\nbackend = \"redis\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = HubConfig::default();
        std::env::set_var("SIGNAL_HUB_DB", "/tmp/override.db");
        std::env::set_var("SIGNAL_HUB_BACKEND", "sqlite");
        std::env::set_var("SIGNAL_HUB_LOG_LEVEL", "trace");
        std::env::set_var("SIGNAL_HUB_PORT", "8088");

        config.apply_env_overrides().unwrap();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.server.log_level, "trace");
        assert_eq!(config.server.port, 8088);

        // Clean up
        std::env::remove_var("SIGNAL_HUB_DB");
        std::env::remove_var("SIGNAL_HUB_BACKEND");
        std::env::remove_var("SIGNAL_HUB_LOG_LEVEL");
        std::env::remove_var("SIGNAL_HUB_PORT");
    }

    #[test]
    fn tilde_expands_to_home() {
        let expanded = expand_tilde("~/hub/timeline.db");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("hub/timeline.db"));
        }
        assert_eq!(expand_tilde("/abs/path.db"), PathBuf::from("/abs/path.db"));
    }
}
