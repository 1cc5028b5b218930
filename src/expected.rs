// src/expected.rs

//! Caller-side expectations.
//!
//! An [`ExpectedSpec`] is built explicitly (`ExpectedSpec::exit_code(0)`,
//! `ExpectedSpec::stdout_matching(re)`, ...) or through the `From` impls, so
//! the comparator dispatches on a closed enum instead of guessing from the
//! value it was handed.

use regex::Regex;

use crate::message::PrintValue;
use crate::types::Value;

/// How a single field of a partial shape is checked.
#[derive(Debug, Clone)]
pub enum FieldExpectation {
    /// Strict, type-sensitive equality.
    Exact(Value),
    /// The pattern must find a match in the received value's text.
    Pattern(Regex),
}

impl FieldExpectation {
    pub fn matches(&self, received: &Value) -> bool {
        match self {
            FieldExpectation::Exact(expected) => expected == received,
            FieldExpectation::Pattern(re) => re.is_match(&received.as_text()),
        }
    }

    pub fn to_print_value(&self) -> PrintValue {
        match self {
            FieldExpectation::Exact(v) => PrintValue::from(v),
            FieldExpectation::Pattern(re) => PrintValue::Pattern(re.as_str().to_string()),
        }
    }
}

impl From<Regex> for FieldExpectation {
    fn from(re: Regex) -> Self {
        FieldExpectation::Pattern(re)
    }
}

impl From<Value> for FieldExpectation {
    fn from(v: Value) -> Self {
        FieldExpectation::Exact(v)
    }
}

impl From<i32> for FieldExpectation {
    fn from(n: i32) -> Self {
        FieldExpectation::Exact(Value::from(n))
    }
}

impl From<&str> for FieldExpectation {
    fn from(s: &str) -> Self {
        FieldExpectation::Exact(Value::from(s))
    }
}

impl From<String> for FieldExpectation {
    fn from(s: String) -> Self {
        FieldExpectation::Exact(Value::from(s))
    }
}

impl From<bool> for FieldExpectation {
    fn from(b: bool) -> Self {
        FieldExpectation::Exact(Value::from(b))
    }
}

/// A partial expectation over named fields.
///
/// Only listed fields are checked. Keys keep their insertion order, which is
/// also the order mismatches are reported in.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: Vec<(String, FieldExpectation)>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect `name` to satisfy `expectation`. Re-adding a name replaces its
    /// expectation but keeps its original position.
    pub fn field(mut self, name: impl Into<String>, expectation: impl Into<FieldExpectation>) -> Self {
        let name = name.into();
        let expectation = expectation.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = expectation,
            None => self.fields.push((name, expectation)),
        }
        self
    }

    pub fn code(self, code: i32) -> Self {
        self.field("code", code)
    }

    pub fn signal(self, signal: impl Into<String>) -> Self {
        self.field("signal", signal.into())
    }

    pub fn stdout(self, stdout: impl Into<String>) -> Self {
        self.field("stdout", stdout.into())
    }

    pub fn stdout_matching(self, pattern: Regex) -> Self {
        self.field("stdout", pattern)
    }

    pub fn stderr(self, stderr: impl Into<String>) -> Self {
        self.field("stderr", stderr.into())
    }

    pub fn stderr_matching(self, pattern: Regex) -> Self {
        self.field("stderr", pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldExpectation)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_print_value(&self) -> PrintValue {
        PrintValue::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_print_value()))
                .collect(),
        )
    }
}

/// What the caller expects of a spawned process.
#[derive(Debug, Clone)]
pub enum ExpectedSpec {
    ExitCode(i32),
    StdoutExact(String),
    StdoutPattern(Regex),
    PartialShape(Shape),
}

/// Coarse kind of an expectation, used to phrase diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    Number,
    String,
    Pattern,
    Object,
}

impl ExpectedSpec {
    pub fn exit_code(code: i32) -> Self {
        ExpectedSpec::ExitCode(code)
    }

    pub fn stdout(stdout: impl Into<String>) -> Self {
        ExpectedSpec::StdoutExact(stdout.into())
    }

    pub fn stdout_matching(pattern: Regex) -> Self {
        ExpectedSpec::StdoutPattern(pattern)
    }

    pub fn shape(shape: Shape) -> Self {
        ExpectedSpec::PartialShape(shape)
    }

    pub fn kind(&self) -> ExpectedKind {
        match self {
            ExpectedSpec::ExitCode(_) => ExpectedKind::Number,
            ExpectedSpec::StdoutExact(_) => ExpectedKind::String,
            ExpectedSpec::StdoutPattern(_) => ExpectedKind::Pattern,
            ExpectedSpec::PartialShape(_) => ExpectedKind::Object,
        }
    }

    pub fn to_print_value(&self) -> PrintValue {
        match self {
            ExpectedSpec::ExitCode(code) => PrintValue::Int(i64::from(*code)),
            ExpectedSpec::StdoutExact(s) => PrintValue::Str(s.clone()),
            ExpectedSpec::StdoutPattern(re) => PrintValue::Pattern(re.as_str().to_string()),
            ExpectedSpec::PartialShape(shape) => shape.to_print_value(),
        }
    }
}

impl From<i32> for ExpectedSpec {
    fn from(code: i32) -> Self {
        ExpectedSpec::ExitCode(code)
    }
}

impl From<&str> for ExpectedSpec {
    fn from(s: &str) -> Self {
        ExpectedSpec::StdoutExact(s.to_string())
    }
}

impl From<String> for ExpectedSpec {
    fn from(s: String) -> Self {
        ExpectedSpec::StdoutExact(s)
    }
}

impl From<Regex> for ExpectedSpec {
    fn from(re: Regex) -> Self {
        ExpectedSpec::StdoutPattern(re)
    }
}

impl From<Shape> for ExpectedSpec {
    fn from(shape: Shape) -> Self {
        ExpectedSpec::PartialShape(shape)
    }
}
