//! Configuration management for Arcade Hub
//!
//! Handles where favorites and history are stored, which catalog is loaded,
//! the history bound and logging. TOML-based config files, with a user file
//! layered over the system file.

mod sections;

pub use sections::{CatalogConfig, HistoryConfig, LoggingConfig, StorageBackend, StorageConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/etc/arcade-hub";
pub const USER_CONFIG_DIR: &str = ".arcade-hub";

/// Main Arcade Hub configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HubConfig {
    /// Fixed seed for random game picks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HubConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// The user file overrides individual keys of the system file; defaults
    /// fill in anything neither sets.
    pub fn load_default() -> Result<Self, ConfigError> {
        let system_config = Path::new(CONFIG_DIR).join("config.toml");
        let user_config = user_config_path();
        Self::load_layered(&system_config, &user_config)
    }

    /// Merge `overlay` over `base`; either file may be missing
    pub fn load_layered(base: &Path, overlay: &Path) -> Result<Self, ConfigError> {
        let mut merged: Option<toml::Value> = None;

        for path in [base, overlay] {
            if !path.exists() {
                continue;
            }
            let contents = std::fs::read_to_string(path)?;
            let value: toml::Value = toml::from_str(&contents)?;
            match merged.as_mut() {
                Some(current) => merge_toml(current, value),
                None => merged = Some(value),
            }
            tracing::debug!("Read configuration layer {}", path.display());
        }

        let Some(merged) = merged else {
            tracing::warn!("No configuration file found, using defaults");
            return Ok(Self::default());
        };

        let config: Self = merged.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 {
            return Err(ConfigError::Invalid(
                "history.capacity must be at least 1".to_string(),
            ));
        }
        if self.storage.backend == StorageBackend::Sqlite
            && self.storage.path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid(
                "storage.path is required for the sqlite backend".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Save to default user configuration location
    pub fn save_default(&self) -> Result<(), ConfigError> {
        self.save(&user_config_path())
    }
}

/// Per-user directory holding config and state
pub fn user_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(USER_CONFIG_DIR)
}

fn user_config_path() -> PathBuf {
    user_dir().join("config.toml")
}

/// Helper function to merge TOML values
pub fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(&key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key, value);
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.history.capacity, 4);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert!(config.catalog.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = HubConfig {
            random_seed: Some(9),
            ..HubConfig::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: HubConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound(PathBuf::from("/etc/arcade-hub/config.toml"));
        assert!(format!("{}", err).contains("not found"));

        let err = ConfigError::Invalid("test error".to_string());
        assert!(format!("{}", err).contains("Invalid"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
random_seed = 3

[storage]
backend = "memory"

[history]
capacity = 6
"#;
        write!(temp_file, "{}", config_content).unwrap();

        let config = HubConfig::load(temp_file.path()).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.history.capacity, 6);
        assert_eq!(config.random_seed, Some(3));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_missing_file() {
        let err = HubConfig::load(Path::new("/nonexistent/arcade-hub.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[history]\ncapacity = 0\n").unwrap();

        let err = HubConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_save_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let config = HubConfig::default();

        config.save(&path).unwrap();

        // Verify the file was written and can be read back
        let loaded = HubConfig::load(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_layered_user_overrides_system() {
        let temp_dir = TempDir::new().unwrap();
        let system = temp_dir.path().join("system.toml");
        let user = temp_dir.path().join("user.toml");

        std::fs::write(
            &system,
            "[storage]\nbackend = \"sqlite\"\npath = \"/var/lib/arcade-hub/state.db\"\n\n[history]\ncapacity = 8\n",
        )
        .unwrap();
        std::fs::write(&user, "[history]\ncapacity = 2\n").unwrap();

        let config = HubConfig::load_layered(&system, &user).unwrap();
        assert_eq!(config.history.capacity, 2);
        assert_eq!(
            config.storage.path,
            PathBuf::from("/var/lib/arcade-hub/state.db")
        );
    }

    #[test]
    fn test_layered_without_files_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = HubConfig::load_layered(
            &temp_dir.path().join("a.toml"),
            &temp_dir.path().join("b.toml"),
        )
        .unwrap();
        assert_eq!(config, HubConfig::default());
    }

    #[test]
    fn test_merge_toml_tables() {
        let base_table = toml::toml! {
            [history]
            capacity = 4

            [logging]
            level = "warn"
        };
        let mut base = toml::Value::Table(base_table);

        let overlay_table = toml::toml! {
            [logging]
            level = "debug"
        };
        let overlay = toml::Value::Table(overlay_table);

        merge_toml(&mut base, overlay);

        let table = base.as_table().unwrap();
        let logging = table.get("logging").unwrap().as_table().unwrap();
        assert_eq!(logging.get("level").unwrap().as_str(), Some("debug"));
        let history = table.get("history").unwrap().as_table().unwrap();
        assert_eq!(history.get("capacity").unwrap().as_integer(), Some(4));
    }

    #[test]
    fn test_merge_toml_replaces_non_tables() {
        let mut base = toml::Value::Integer(42);
        let overlay = toml::Value::Integer(100);

        merge_toml(&mut base, overlay);

        assert_eq!(base.as_integer(), Some(100));
    }
}
