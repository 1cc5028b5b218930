// src/compare.rs

//! The comparison policy: does a received process result satisfy an
//! expectation, and which fields disagreed.

use crate::expected::{ExpectedSpec, Shape};
use crate::message::PrintValue;
use crate::types::{Fields, ProcessResult};

/// The single field a scalar expectation inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectedField {
    ExitCode,
    Stdout,
}

impl InspectedField {
    /// Label used in diagnostics ("Expected exit code to be:").
    pub fn label(self) -> &'static str {
        match self {
            InspectedField::ExitCode => "exit code",
            InspectedField::Stdout => "stdout",
        }
    }

    /// Name of the `ProcessResult` field this projects to.
    pub fn field_name(self) -> &'static str {
        match self {
            InspectedField::ExitCode => "code",
            InspectedField::Stdout => "stdout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonOutcome {
    pub pass: bool,
    /// Failing field names, in the expectation's key order. Empty on pass.
    pub mismatched_fields: Vec<String>,
    /// Set for scalar expectations; `None` for partial shapes.
    pub inspected: Option<InspectedField>,
}

impl ComparisonOutcome {
    fn scalar(inspected: InspectedField, pass: bool) -> Self {
        let mismatched_fields = if pass {
            Vec::new()
        } else {
            vec![inspected.field_name().to_string()]
        };
        Self {
            pass,
            mismatched_fields,
            inspected: Some(inspected),
        }
    }

    fn shape(mismatched_fields: Vec<String>) -> Self {
        Self {
            pass: mismatched_fields.is_empty(),
            mismatched_fields,
            inspected: None,
        }
    }
}

/// Decides whether a received result satisfies an expectation.
///
/// Matchers take this as a parameter so tests can observe or replace it.
pub trait Comparator: Send + Sync {
    fn compare(&self, expected: &ExpectedSpec, received: &ProcessResult) -> ComparisonOutcome;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparator;

impl Comparator for DefaultComparator {
    fn compare(&self, expected: &ExpectedSpec, received: &ProcessResult) -> ComparisonOutcome {
        match expected {
            ExpectedSpec::StdoutPattern(re) => {
                ComparisonOutcome::scalar(InspectedField::Stdout, re.is_match(&received.stdout))
            }
            ExpectedSpec::ExitCode(code) => {
                ComparisonOutcome::scalar(InspectedField::ExitCode, *code == received.code)
            }
            ExpectedSpec::StdoutExact(stdout) => {
                ComparisonOutcome::scalar(InspectedField::Stdout, *stdout == received.stdout)
            }
            ExpectedSpec::PartialShape(shape) => {
                ComparisonOutcome::shape(non_matching_fields(shape, received))
            }
        }
    }
}

/// Compare with the default policy.
pub fn compare(expected: &ExpectedSpec, received: &ProcessResult) -> ComparisonOutcome {
    DefaultComparator.compare(expected, received)
}

/// Names of the shape's fields that `received` fails, in shape order.
///
/// A field fails when `received` lacks it or its expectation does not hold.
/// Fields of `received` the shape does not mention are ignored.
pub fn non_matching_fields<F>(shape: &Shape, received: &F) -> Vec<String>
where
    F: Fields + ?Sized,
{
    shape
        .iter()
        .filter(|(name, expectation)| match received.field(name) {
            Some(value) => !expectation.matches(&value),
            None => true,
        })
        .map(|(name, _)| name.to_string())
        .collect()
}

/// The part of `received` that was compared: the projected field for scalar
/// expectations, the whole record for shapes.
pub fn received_view(outcome: &ComparisonOutcome, received: &ProcessResult) -> PrintValue {
    match outcome.inspected {
        Some(InspectedField::ExitCode) => PrintValue::Int(i64::from(received.code)),
        Some(InspectedField::Stdout) => PrintValue::Str(received.stdout.clone()),
        None => PrintValue::from(received),
    }
}
