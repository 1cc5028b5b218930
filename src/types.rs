// src/types.rs

//! Received-side data: the record a spawned process produces and the
//! strictly typed values partial-shape comparison reads out of it.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one spawned process.
///
/// `signal` is empty when the process exited on its own; `code` is `-1`
/// when it was terminated by a signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub code: i32,
    pub signal: String,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessResult {
    /// Field names in the order they are printed and snapshotted.
    pub const FIELDS: [&'static str; 4] = ["code", "signal", "stdout", "stderr"];

    pub fn new(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            signal: String::new(),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn with_signal(mut self, signal: impl Into<String>) -> Self {
        self.signal = signal.into();
        self
    }
}

/// A scalar read from a received record.
///
/// Equality is type-sensitive: `Int(0)` never equals `Str("0")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Value {
    /// Text form used when a pattern is tested against a non-string value.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::Str(s) => Cow::Borrowed(s.as_str()),
            Value::Int(n) => Cow::Owned(n.to_string()),
            Value::Bool(b) => Cow::Owned(b.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Named-field view over a received record.
pub trait Fields {
    /// The value of `name`, or `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<Value>;

    /// All fields in their natural order.
    fn entries(&self) -> Vec<(String, Value)>;
}

impl Fields for ProcessResult {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "code" => Some(Value::from(self.code)),
            "signal" => Some(Value::from(self.signal.as_str())),
            "stdout" => Some(Value::from(self.stdout.as_str())),
            "stderr" => Some(Value::from(self.stderr.as_str())),
            _ => None,
        }
    }

    fn entries(&self) -> Vec<(String, Value)> {
        Self::FIELDS
            .iter()
            .filter_map(|name| self.field(name).map(|v| (name.to_string(), v)))
            .collect()
    }
}

/// An arbitrary ordered record, for comparing against shapes that are not
/// a full `ProcessResult` (missing fields, extra fields).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Re-inserting a name replaces the value in place.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Fields for Record {
    fn field(&self, name: &str) -> Option<Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn entries(&self) -> Vec<(String, Value)> {
        self.entries.clone()
    }
}

impl From<&ProcessResult> for Record {
    fn from(result: &ProcessResult) -> Self {
        Self {
            entries: result.entries(),
        }
    }
}
