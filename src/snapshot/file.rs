// src/snapshot/file.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Map;
use tracing::{debug, info};

use crate::config::SnapshotSection;
use crate::errors::{Result, ShellMatchersError};

use super::{SnapshotKey, SnapshotOutcome, SnapshotStore, SnapshotUpdate, decide};

/// Snapshots on disk: `<dir>/<test>.snap.json`, a JSON object keyed by
/// `"<matcher> <index>"`.
#[derive(Debug)]
pub struct FileSnapshotStore {
    dir: PathBuf,
    update: SnapshotUpdate,
    // Serialises read-modify-write of snapshot files within this process.
    lock: Mutex<()>,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, update: SnapshotUpdate) -> Self {
        Self {
            dir: dir.into(),
            update,
            lock: Mutex::new(()),
        }
    }

    pub fn from_config(snapshot: &SnapshotSection) -> Self {
        Self::new(snapshot.dir.clone(), snapshot.update)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the snapshots of `test`: `<dir>/<escaped test>.snap.json`.
    pub fn file_for(&self, test: &str) -> PathBuf {
        self.dir.join(format!("{}.snap.json", escape_test_name(test)))
    }

    fn read_file(path: &Path) -> Result<Map<String, serde_json::Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let contents = fs::read_to_string(path)?;
        match serde_json::from_str(&contents)? {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(ShellMatchersError::SnapshotError(format!(
                "snapshot file {} is not a JSON object",
                path.display()
            ))),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn check(&self, key: &SnapshotKey, value: &serde_json::Value) -> Result<SnapshotOutcome> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ShellMatchersError::SnapshotError("snapshot lock poisoned".to_string()))?;

        let path = self.file_for(&key.test);
        let mut entries = Self::read_file(&path)?;
        let entry = key.entry_name();

        let (outcome, write) = decide(entries.get(&entry), value, self.update);
        debug!(snapshot = %key, ?outcome, "checked snapshot");

        if write {
            entries.insert(entry, value.clone());
            fs::create_dir_all(&self.dir)?;
            let mut contents = serde_json::to_string_pretty(&serde_json::Value::Object(entries))?;
            contents.push('\n');
            fs::write(&path, contents)?;
            info!(snapshot = %key, path = %path.display(), "wrote snapshot");
        }

        Ok(outcome)
    }
}

/// Percent-escape everything outside `[A-Za-z0-9_-]`, byte by byte, so
/// distinct test names never share a file.
fn escape_test_name(test: &str) -> String {
    let mut out = String::with_capacity(test.len());
    for byte in test.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
