//! # Scanner Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Load Order (later overrides earlier)                    │
//! │                                                                         │
//! │  1. Defaults          sound on, platform data dir, persistent store    │
//! │  2. config.toml       --config FILE, or the platform config dir        │
//! │  3. Environment       SERIALGUARD_DB_PATH, SERIALGUARD_SOUND           │
//! │  4. Command line      --db, --quiet, --ephemeral                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # config.toml
//! database_path = "/var/lib/serialguard/pallet.db"
//! sound_enabled = true
//! ephemeral = false
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Environment variable overriding the database file.
pub const ENV_DB_PATH: &str = "SERIALGUARD_DB_PATH";

/// Environment variable toggling cue sounds.
pub const ENV_SOUND: &str = "SERIALGUARD_SOUND";

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Database file name inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "serialguard.db";

/// Scanner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// SQLite file holding the current pallet.
    /// `None` means the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Play cues on duplicate and added scans.
    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    /// Keep the session in memory only (nothing survives exit).
    #[serde(default)]
    pub ephemeral: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            sound_enabled: true,
            ephemeral: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` that does not exist is an error. A missing
    /// file at the default location just means defaults.
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::ConfigLoadFailed(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }

        if let Some(sound) = lookup(ENV_SOUND) {
            match parse_switch(&sound) {
                Some(enabled) => self.sound_enabled = enabled,
                None => warn!(value = %sound, "Unknown {} value in environment", ENV_SOUND),
            }
        }
    }

    /// Applies command-line flags. Flags only ever switch things on/off
    /// relative to the loaded config; absent flags change nothing.
    pub fn apply_cli_overrides(&mut self, db: Option<PathBuf>, quiet: bool, ephemeral: bool) {
        if let Some(path) = db {
            self.database_path = Some(path);
        }
        if quiet {
            self.sound_enabled = false;
        }
        if ephemeral {
            self.ephemeral = true;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(path) = &self.database_path {
            if path.as_os_str().is_empty() {
                return Err(AppError::InvalidConfig(
                    "database_path must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    /// Resolves the database file, creating its directory if needed.
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        let path = match &self.database_path {
            Some(path) => path.clone(),
            None => Self::project_dirs()
                .ok_or(AppError::NoDataDir)?
                .data_dir()
                .join(DATABASE_FILE_NAME),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(path)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "serialguard", "serialguard")
    }
}

/// Parses on/off style values.
fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.sound_enabled);
        assert!(!config.ephemeral);
        assert_eq!(config.database_path, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("ephemeral = true").unwrap();
        assert!(config.ephemeral);
        assert!(config.sound_enabled);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database_path = \"/tmp/p.db\"\nsound_enabled = false\n").unwrap();

        let mut config = AppConfig::from_file(&path).unwrap();
        config.apply_env_overrides(env(&[]));

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/p.db")));
        assert!(!config.sound_enabled);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = AppConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, AppError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_bad_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sound_enabled = \"loud\"").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(AppError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[(ENV_DB_PATH, "/data/x.db"), (ENV_SOUND, "off")]));

        assert_eq!(config.database_path, Some(PathBuf::from("/data/x.db")));
        assert!(!config.sound_enabled);

        config.apply_env_overrides(env(&[(ENV_SOUND, "maybe")]));
        assert!(!config.sound_enabled);
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(env(&[(ENV_DB_PATH, "/env.db")]));
        config.apply_cli_overrides(Some(PathBuf::from("/cli.db")), true, true);

        assert_eq!(config.database_path, Some(PathBuf::from("/cli.db")));
        assert!(!config.sound_enabled);
        assert!(config.ephemeral);
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let config = AppConfig {
            database_path: Some(PathBuf::new()),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_resolve_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("pallet.db");
        let config = AppConfig {
            database_path: Some(target.clone()),
            ..AppConfig::default()
        };

        assert_eq!(config.resolve_database_path().unwrap(), target);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch(" ON "), Some(true));
        assert_eq!(parse_switch("0"), Some(false));
        assert_eq!(parse_switch("loud"), None);
    }
}
