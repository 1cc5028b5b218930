// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ShellMatchersError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ShellMatchersError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.host, raw.runner, raw.snapshot))
    }
}

pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_host(cfg)?;
    validate_runner(cfg)?;
    validate_snapshot(cfg)?;
    Ok(())
}

fn validate_host(cfg: &RawConfigFile) -> Result<()> {
    if cfg.host.version.trim().is_empty() {
        return Err(ShellMatchersError::ConfigError(
            "[host].version must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_runner(cfg: &RawConfigFile) -> Result<()> {
    if cfg.runner.timeout_ms == Some(0) {
        return Err(ShellMatchersError::ConfigError(
            "[runner].timeout_ms must be >= 1 (got 0); omit it to disable the timeout".to_string(),
        ));
    }
    Ok(())
}

fn validate_snapshot(cfg: &RawConfigFile) -> Result<()> {
    if cfg.snapshot.dir.as_os_str().is_empty() {
        return Err(ShellMatchersError::ConfigError(
            "[snapshot].dir must not be empty".to_string(),
        ));
    }
    Ok(())
}
