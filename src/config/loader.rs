// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ShellMatchersError};
use crate::snapshot::SnapshotUpdate;

/// Environment variable overriding `[snapshot].update`.
pub const UPDATE_ENV_VAR: &str = "SHELL_MATCHERS_UPDATE";

/// Load a configuration file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for a
/// checked configuration.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file, validate it, then apply environment overrides.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let mut config = ConfigFile::try_from(raw_config)?;
    apply_env_overrides(&mut config, std::env::var(UPDATE_ENV_VAR).ok().as_deref())?;
    Ok(config)
}

/// Like [`load_and_validate`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if path.exists() {
        return load_and_validate(path);
    }

    debug!(path = %path.display(), "no config file found; using defaults");
    let mut config = ConfigFile::default();
    apply_env_overrides(&mut config, std::env::var(UPDATE_ENV_VAR).ok().as_deref())?;
    Ok(config)
}

/// Apply the value of [`UPDATE_ENV_VAR`], if set.
pub fn apply_env_overrides(config: &mut ConfigFile, update: Option<&str>) -> Result<()> {
    if let Some(raw) = update {
        config.snapshot.update = raw
            .parse::<SnapshotUpdate>()
            .map_err(|e| ShellMatchersError::ConfigError(format!("{UPDATE_ENV_VAR}: {e}")))?;
    }
    Ok(())
}

/// `ShellMatchers.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("ShellMatchers.toml")
}
