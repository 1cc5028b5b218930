// src/snapshot/memory.rs

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::Result;

use super::{SnapshotKey, SnapshotOutcome, SnapshotStore, SnapshotUpdate, decide};

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    update: SnapshotUpdate,
    entries: Mutex<HashMap<SnapshotKey, serde_json::Value>>,
}

impl MemorySnapshotStore {
    pub fn new(update: SnapshotUpdate) -> Self {
        Self {
            update,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Seed a stored snapshot.
    pub fn insert(&self, key: SnapshotKey, value: serde_json::Value) {
        self.entries().insert(key, value);
    }

    pub fn get(&self, key: &SnapshotKey) -> Option<serde_json::Value> {
        self.entries().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Entries are whole values, so a panic elsewhere cannot leave one torn.
    fn entries(&self) -> MutexGuard<'_, HashMap<SnapshotKey, serde_json::Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn check(&self, key: &SnapshotKey, value: &serde_json::Value) -> Result<SnapshotOutcome> {
        let mut entries = self.entries();

        let (outcome, write) = decide(entries.get(key), value, self.update);
        if write {
            entries.insert(key.clone(), value.clone());
        }
        Ok(outcome)
    }
}
