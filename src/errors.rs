// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! A failing expectation is *not* an error: matchers report it through
//! `MatcherResult::pass`. Errors are reserved for things that stop an
//! assertion from being evaluated at all.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellMatchersError {
    /// Host too old, matchers not installed, or an invalid config file.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The process could not be spawned or awaited.
    #[error("Execution error: {0:#}")]
    ExecutionError(anyhow::Error),

    #[error("Process `{command}` did not exit within {after_ms}ms")]
    Timeout { command: String, after_ms: u64 },

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Invalid pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ShellMatchersError>;
