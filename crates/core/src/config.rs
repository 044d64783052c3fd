//! Application configuration.
//!
//! Values come from `<config_dir>/railres/config.toml`, overridden by
//! `RAILRES_*` environment variables (`RAILRES_LOG_LEVEL`, `RAILRES_LOG_DIR`,
//! `RAILRES_TIMETABLE`).

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Directory under the platform config root holding `config.toml`.
pub const CONFIG_DIR: &str = "railres";

const DEFAULT_CONFIG: &str = r#"# railres configuration

# Log verbosity when RUST_LOG is unset (error, warn, info, debug, trace).
log_level = "info"

# Directory receiving railres.log. Defaults to the platform data directory.
# log_dir = "/var/log/railres"

# JSON timetable replacing the built-in demo days and trains.
# timetable = "/etc/railres/timetable.json"
"#;

/// Runtime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory receiving the log file.
    pub log_dir: PathBuf,
    /// Default tracing filter directive.
    pub log_level: String,
    /// Optional timetable file; the built-in sample is used when unset.
    #[serde(default)]
    pub timetable: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration from `path`, tolerating a missing file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default("log_level", "info")?
            .set_default("log_dir", default_log_dir().to_string_lossy().into_owned())?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("RAILRES"))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Path of the user's config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("config.toml")
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join("logs")
}

/// Write the commented default config if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

fn ensure_default_config_at(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "Default config written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_file_parses() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("railres").join("config.toml");
        ensure_default_config_at(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert!(config.timetable.is_none());
        assert!(config.log_dir.ends_with("logs"));
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n")?;
        ensure_default_config_at(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "log_level = \"debug\"\n");
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "log_dir = \"/tmp/railres-logs\"\ntimetable = \"/tmp/timetable.json\"\n",
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.log_dir, PathBuf::from("/tmp/railres-logs"));
        assert_eq!(config.timetable, Some(PathBuf::from("/tmp/timetable.json")));
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"debug\"\n")?;

        std::env::set_var("RAILRES_LOG_LEVEL", "trace");
        let loaded = AppConfig::load_from(&path);
        std::env::remove_var("RAILRES_LOG_LEVEL");

        assert_eq!(loaded?.log_level, "trace");
        Ok(())
    }

    #[test]
    fn missing_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert!(config.log_dir.ends_with("logs"));
        Ok(())
    }
}
