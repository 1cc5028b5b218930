//! Spies and stand-ins for the comparator, message builder and host utils.

use std::sync::{Arc, Mutex};

use shell_matchers::compare::{Comparator, ComparisonOutcome, DefaultComparator};
use shell_matchers::expected::ExpectedSpec;
use shell_matchers::message::{
    DefaultMessageBuilder, MatcherUtils, Message, MessageBuilder, MessageContext, PrintValue,
};
use shell_matchers::types::ProcessResult;

/// Utils that tag each piece, so tests can see exactly what the builder
/// asked the host to print:
///
/// - `matcher_hint(x)` → `MATCHER HINT: x`
/// - `print_expected(v)` → `EXPECTED: <json>`
/// - `print_received(v)` → `RECEIVED: <json>`
#[derive(Debug, Default)]
pub struct RecordingUtils {
    calls: Mutex<Vec<String>>,
}

impl RecordingUtils {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Calls in order, e.g. `["matcher_hint", "print_expected", ...]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

impl MatcherUtils for RecordingUtils {
    fn matcher_hint(&self, hint: &str) -> String {
        self.record("matcher_hint");
        format!("MATCHER HINT: {hint}")
    }

    fn print_expected(&self, value: &PrintValue) -> String {
        self.record("print_expected");
        format!("EXPECTED: {}", value.render())
    }

    fn print_received(&self, value: &PrintValue) -> String {
        self.record("print_received");
        format!("RECEIVED: {}", value.render())
    }
}

/// Comparator that records its inputs and then either delegates to the
/// default policy or returns a forced outcome.
///
/// Clones share the call log, so keep one clone to inspect after handing the
/// other to `Matchers::with_parts`.
#[derive(Clone, Default)]
pub struct SpyComparator {
    forced: Option<ComparisonOutcome>,
    calls: Arc<Mutex<Vec<(ExpectedSpec, ProcessResult)>>>,
}

impl SpyComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forcing(outcome: ComparisonOutcome) -> Self {
        Self {
            forced: Some(outcome),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(ExpectedSpec, ProcessResult)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Comparator for SpyComparator {
    fn compare(&self, expected: &ExpectedSpec, received: &ProcessResult) -> ComparisonOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((expected.clone(), received.clone()));
        match &self.forced {
            Some(outcome) => outcome.clone(),
            None => DefaultComparator.compare(expected, received),
        }
    }
}

/// Message builder that records the contexts it was given and delegates.
/// Clones share the record.
#[derive(Clone, Default)]
pub struct SpyMessageBuilder {
    contexts: Arc<Mutex<Vec<MessageContext>>>,
}

impl SpyMessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contexts(&self) -> Vec<MessageContext> {
        self.contexts.lock().unwrap().clone()
    }
}

impl MessageBuilder for SpyMessageBuilder {
    fn build(&self, ctx: MessageContext, utils: Arc<dyn MatcherUtils>) -> Message {
        self.contexts.lock().unwrap().push(ctx.clone());
        DefaultMessageBuilder.build(ctx, utils)
    }
}
