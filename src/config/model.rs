// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::snapshot::SnapshotUpdate;

/// Version the built-in `Expect` host reports unless configured otherwise.
pub const DEFAULT_HOST_VERSION: &str = "23.0.0";

/// Raw configuration as read from `ShellMatchers.toml`.
///
/// ```toml
/// [host]
/// version = "23.0.0"
///
/// [runner]
/// timeout_ms = 5000
///
/// [snapshot]
/// dir = "tests/__snapshots__"
/// update = "new"
/// ```
///
/// Every section is optional. Use [`ConfigFile`] (via `TryFrom`) for a
/// validated configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub host: HostSection,

    #[serde(default)]
    pub runner: RunnerSection,

    #[serde(default)]
    pub snapshot: SnapshotSection,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub host: HostSection,
    pub runner: RunnerSection,
    pub snapshot: SnapshotSection,
}

impl ConfigFile {
    /// Construct without validation. Prefer `ConfigFile::try_from`.
    pub(crate) fn new_unchecked(
        host: HostSection,
        runner: RunnerSection,
        snapshot: SnapshotSection,
    ) -> Self {
        Self {
            host,
            runner,
            snapshot,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.host, raw.runner, raw.snapshot)
    }
}

/// `[host]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HostSection {
    /// Version the built-in host reports to the registration guard.
    #[serde(default = "default_host_version")]
    pub version: String,
}

fn default_host_version() -> String {
    DEFAULT_HOST_VERSION.to_string()
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            version: default_host_version(),
        }
    }
}

/// `[runner]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerSection {
    /// Kill spawned processes after this many milliseconds. No limit if unset.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// `[snapshot]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotSection {
    /// Directory holding one snapshot file per test.
    #[serde(default = "default_snapshot_dir")]
    pub dir: PathBuf,

    /// `"new"` (default), `"all"` or `"none"`.
    #[serde(default)]
    pub update: SnapshotUpdate,
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("__snapshots__")
}

impl Default for SnapshotSection {
    fn default() -> Self {
        Self {
            dir: default_snapshot_dir(),
            update: SnapshotUpdate::default(),
        }
    }
}
