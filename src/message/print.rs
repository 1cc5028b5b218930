// src/message/print.rs

//! Printable values and the host's printing contract.

use serde_json::{Map, Number};

use crate::types::{Fields, ProcessResult, Value};

/// A value as it appears in a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintValue {
    Int(i64),
    Str(String),
    Bool(bool),
    /// A pattern, carrying its source for `Debug` only. Printed as `{}`.
    Pattern(String),
    Object(Vec<(String, PrintValue)>),
    Json(serde_json::Value),
}

impl PrintValue {
    /// JSON form used for rendering. Patterns become an empty object, the
    /// same way the reporting convention this output follows prints regular
    /// expressions, so existing expected-output fixtures keep matching.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PrintValue::Int(n) => serde_json::Value::Number(Number::from(*n)),
            PrintValue::Str(s) => serde_json::Value::String(s.clone()),
            PrintValue::Bool(b) => serde_json::Value::Bool(*b),
            PrintValue::Pattern(_) => serde_json::Value::Object(Map::new()),
            PrintValue::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            PrintValue::Json(v) => v.clone(),
        }
    }

    /// Compact single-line rendering.
    pub fn render(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<&Value> for PrintValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Int(n) => PrintValue::Int(*n),
            Value::Str(s) => PrintValue::Str(s.clone()),
            Value::Bool(b) => PrintValue::Bool(*b),
        }
    }
}

impl From<&ProcessResult> for PrintValue {
    fn from(result: &ProcessResult) -> Self {
        PrintValue::Object(
            result
                .entries()
                .iter()
                .map(|(k, v)| (k.clone(), PrintValue::from(v)))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for PrintValue {
    fn from(value: serde_json::Value) -> Self {
        PrintValue::Json(value)
    }
}

/// Printing helpers supplied by the assertion host.
pub trait MatcherUtils: Send + Sync {
    fn matcher_hint(&self, hint: &str) -> String;
    fn print_expected(&self, value: &PrintValue) -> String;
    fn print_received(&self, value: &PrintValue) -> String;
}

/// Uncoloured built-in utilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainUtils;

impl MatcherUtils for PlainUtils {
    fn matcher_hint(&self, hint: &str) -> String {
        format!("expect(received){hint}(expected)")
    }

    fn print_expected(&self, value: &PrintValue) -> String {
        value.render()
    }

    fn print_received(&self, value: &PrintValue) -> String {
        value.render()
    }
}
