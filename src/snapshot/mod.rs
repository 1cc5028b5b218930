// src/snapshot/mod.rs

//! Snapshot persistence for the snapshot matchers.
//!
//! - [`file`] stores one JSON file per test under a directory.
//! - [`memory`] keeps snapshots in memory, for tests of code that uses the
//!   snapshot matchers.

pub mod file;
pub mod memory;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::Result;

pub use file::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

/// When a store may write snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotUpdate {
    /// Write snapshots that do not exist yet; never overwrite.
    #[default]
    New,
    /// Overwrite mismatching snapshots.
    All,
    /// Never write; a missing snapshot fails.
    None,
}

impl FromStr for SnapshotUpdate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(SnapshotUpdate::New),
            "all" => Ok(SnapshotUpdate::All),
            "none" => Ok(SnapshotUpdate::None),
            other => Err(format!(
                "invalid snapshot update mode: {other} (expected \"new\", \"all\" or \"none\")"
            )),
        }
    }
}

/// Identifies one snapshot: the n-th use of a matcher within a test.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    pub test: String,
    pub matcher: &'static str,
    /// 1-based.
    pub index: usize,
}

impl SnapshotKey {
    /// Key within the test's snapshot file.
    pub fn entry_name(&self) -> String {
        format!("{} {}", self.matcher, self.index)
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.test, self.entry_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotOutcome {
    Matched,
    Written,
    Mismatch { stored: serde_json::Value },
    /// No snapshot exists and the update mode forbids writing one.
    Missing,
}

impl SnapshotOutcome {
    pub fn pass(&self) -> bool {
        matches!(self, SnapshotOutcome::Matched | SnapshotOutcome::Written)
    }
}

pub trait SnapshotStore: Send + Sync {
    /// Compare `value` to the stored snapshot for `key`, writing it when the
    /// update mode allows.
    fn check(&self, key: &SnapshotKey, value: &serde_json::Value) -> Result<SnapshotOutcome>;
}

/// Shared decision table for stores.
///
/// Returns the outcome and whether `value` should be persisted.
pub(crate) fn decide(
    stored: Option<&serde_json::Value>,
    value: &serde_json::Value,
    update: SnapshotUpdate,
) -> (SnapshotOutcome, bool) {
    match (stored, update) {
        (Some(stored), _) if stored == value => (SnapshotOutcome::Matched, false),
        (Some(_), SnapshotUpdate::All) => (SnapshotOutcome::Written, true),
        (Some(stored), _) => (
            SnapshotOutcome::Mismatch {
                stored: stored.clone(),
            },
            false,
        ),
        (None, SnapshotUpdate::None) => (SnapshotOutcome::Missing, false),
        (None, _) => (SnapshotOutcome::Written, true),
    }
}
