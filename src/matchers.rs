// src/matchers.rs

//! The matcher set: spawn the invocation, compare, build the message.
//!
//! [`Matchers`] is generic over the runner, the comparator and the message
//! builder so tests can substitute any of them. [`MatcherSet`] erases those
//! types for installation into a host.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::compare::{Comparator, DefaultComparator, InspectedField, received_view};
use crate::errors::{Result, ShellMatchersError};
use crate::exec::{Invocation, ProcessRunner};
use crate::expected::ExpectedSpec;
use crate::message::{
    DefaultMessageBuilder, MatcherUtils, Message, MessageBuilder, MessageContext, PlainUtils,
    PrintValue, snapshot_message,
};
use crate::snapshot::{MemorySnapshotStore, SnapshotKey, SnapshotOutcome, SnapshotStore};
use crate::types::ProcessResult;

pub const TO_HAVE_MATCHING_SPAWN_OUTPUT: &str = "toHaveMatchingSpawnOutput";
pub const TO_HAVE_SPAWN_OUTPUT_MATCHING_SNAPSHOT: &str = "toHaveSpawnOutputMatchingSnapshot";
pub const TO_HAVE_STDOUT_MATCHING_SNAPSHOT: &str = "toHaveStdoutMatchingSnapshot";
pub const TO_HAVE_STDERR_MATCHING_SNAPSHOT: &str = "toHaveStderrMatchingSnapshot";

/// Names under which the matchers are registered with a host.
pub const MATCHER_NAMES: [&str; 4] = [
    TO_HAVE_MATCHING_SPAWN_OUTPUT,
    TO_HAVE_SPAWN_OUTPUT_MATCHING_SNAPSHOT,
    TO_HAVE_STDOUT_MATCHING_SNAPSHOT,
    TO_HAVE_STDERR_MATCHING_SNAPSHOT,
];

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What the host passes to a matcher at call time.
#[derive(Clone)]
pub struct MatcherContext {
    /// The assertion was declared negated (`.not`).
    pub is_not: bool,
    pub utils: Arc<dyn MatcherUtils>,
    /// Needed by the snapshot matchers to key their snapshots.
    pub test_name: Option<String>,
}

impl MatcherContext {
    pub fn new(is_not: bool) -> Self {
        Self {
            is_not,
            utils: Arc::new(PlainUtils),
            test_name: None,
        }
    }

    pub fn with_utils(mut self, utils: Arc<dyn MatcherUtils>) -> Self {
        self.utils = utils;
        self
    }

    pub fn for_test(mut self, name: impl Into<String>) -> Self {
        self.test_name = Some(name.into());
        self
    }
}

impl Default for MatcherContext {
    fn default() -> Self {
        Self::new(false)
    }
}

/// `pass` is the raw comparison result; the host negates it for `.not`.
#[derive(Debug)]
pub struct MatcherResult {
    pub pass: bool,
    pub message: Message,
}

impl MatcherResult {
    pub fn message(&self) -> &str {
        self.message.text()
    }
}

/// Object-safe view of the four matchers, as installed into a host.
pub trait SpawnMatchers: Send + Sync {
    fn to_have_matching_spawn_output<'a>(
        &'a self,
        ctx: &'a MatcherContext,
        invocation: &'a Invocation,
        expected: &'a ExpectedSpec,
    ) -> BoxFuture<'a, Result<MatcherResult>>;

    fn to_have_spawn_output_matching_snapshot<'a>(
        &'a self,
        ctx: &'a MatcherContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<MatcherResult>>;

    fn to_have_stdout_matching_snapshot<'a>(
        &'a self,
        ctx: &'a MatcherContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<MatcherResult>>;

    fn to_have_stderr_matching_snapshot<'a>(
        &'a self,
        ctx: &'a MatcherContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<MatcherResult>>;
}

pub struct Matchers<R, C = DefaultComparator, M = DefaultMessageBuilder> {
    runner: R,
    comparator: C,
    messages: M,
    snapshots: Arc<dyn SnapshotStore>,
    // Per (test, matcher) call counters for snapshot keys.
    snapshot_counters: Mutex<HashMap<(String, &'static str), usize>>,
}

impl<R: ProcessRunner> Matchers<R> {
    /// Matchers with the default comparator, message builder and an
    /// in-memory snapshot store.
    pub fn new(runner: R) -> Self {
        Self::with_parts(runner, DefaultComparator, DefaultMessageBuilder)
    }
}

impl<R, C, M> Matchers<R, C, M>
where
    R: ProcessRunner,
    C: Comparator,
    M: MessageBuilder,
{
    pub fn with_parts(runner: R, comparator: C, messages: M) -> Self {
        Self {
            runner,
            comparator,
            messages,
            snapshots: Arc::new(MemorySnapshotStore::default()),
            snapshot_counters: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_snapshot_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.snapshots = store;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Compare an already obtained result and build its message.
    pub fn compare_expected_to_received(
        &self,
        ctx: &MatcherContext,
        expected: &ExpectedSpec,
        received: &ProcessResult,
    ) -> MatcherResult {
        let outcome = self.comparator.compare(expected, received);
        debug!(
            pass = outcome.pass,
            mismatched = ?outcome.mismatched_fields,
            is_not = ctx.is_not,
            "compared expected to received"
        );

        let message = self.messages.build(
            MessageContext {
                field_label: outcome.inspected.map(InspectedField::label),
                expected: expected.to_print_value(),
                received: received_view(&outcome, received),
                pass: outcome.pass,
                kind: expected.kind(),
            },
            Arc::clone(&ctx.utils),
        );

        MatcherResult {
            pass: outcome.pass,
            message,
        }
    }

    /// Check `value` against the next snapshot of `matcher` in the test.
    pub fn match_snapshot(
        &self,
        ctx: &MatcherContext,
        matcher: &'static str,
        value: serde_json::Value,
    ) -> Result<MatcherResult> {
        // A negated snapshot has nothing to store or compare against.
        if ctx.is_not {
            return Err(ShellMatchersError::SnapshotError(format!(
                "{matcher} cannot be used with .not"
            )));
        }

        let test = ctx.test_name.clone().ok_or_else(|| {
            ShellMatchersError::SnapshotError(format!(
                "{matcher} needs a test name; set MatcherContext::test_name"
            ))
        })?;

        let index = {
            let mut counters = self.snapshot_counters.lock().map_err(|_| {
                ShellMatchersError::SnapshotError("snapshot counter lock poisoned".to_string())
            })?;
            let counter = counters.entry((test.clone(), matcher)).or_insert(0);
            *counter += 1;
            *counter
        };

        let key = SnapshotKey {
            test,
            matcher,
            index,
        };
        let outcome = self.snapshots.check(&key, &value)?;
        debug!(snapshot = %key, ?outcome, "snapshot matcher");

        let pass = outcome.pass();
        let stored = match outcome {
            SnapshotOutcome::Matched | SnapshotOutcome::Written => Some(PrintValue::from(value.clone())),
            SnapshotOutcome::Mismatch { stored } => Some(PrintValue::from(stored)),
            SnapshotOutcome::Missing => None,
        };

        Ok(MatcherResult {
            pass,
            message: snapshot_message(
                &key.to_string(),
                stored,
                PrintValue::from(value),
                pass,
                Arc::clone(&ctx.utils),
            ),
        })
    }
}

impl<R, C, M> SpawnMatchers for Matchers<R, C, M>
where
    R: ProcessRunner,
    C: Comparator,
    M: MessageBuilder,
{
    fn to_have_matching_spawn_output<'a>(
        &'a self,
        ctx: &'a MatcherContext,
        invocation: &'a Invocation,
        expected: &'a ExpectedSpec,
    ) -> BoxFuture<'a, Result<MatcherResult>> {
        Box::pin(async move {
            let received = self.runner.spawn(invocation).await?;
            Ok(self.compare_expected_to_received(ctx, expected, &received))
        })
    }

    fn to_have_spawn_output_matching_snapshot<'a>(
        &'a self,
        ctx: &'a MatcherContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<MatcherResult>> {
        Box::pin(async move {
            let received = self.runner.spawn(invocation).await?;
            let value = serde_json::to_value(&received)?;
            self.match_snapshot(ctx, TO_HAVE_SPAWN_OUTPUT_MATCHING_SNAPSHOT, value)
        })
    }

    fn to_have_stdout_matching_snapshot<'a>(
        &'a self,
        ctx: &'a MatcherContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<MatcherResult>> {
        Box::pin(async move {
            let received = self.runner.spawn(invocation).await?;
            let value = serde_json::Value::String(received.stdout);
            self.match_snapshot(ctx, TO_HAVE_STDOUT_MATCHING_SNAPSHOT, value)
        })
    }

    fn to_have_stderr_matching_snapshot<'a>(
        &'a self,
        ctx: &'a MatcherContext,
        invocation: &'a Invocation,
    ) -> BoxFuture<'a, Result<MatcherResult>> {
        Box::pin(async move {
            let received = self.runner.spawn(invocation).await?;
            let value = serde_json::Value::String(received.stderr);
            self.match_snapshot(ctx, TO_HAVE_STDERR_MATCHING_SNAPSHOT, value)
        })
    }
}

/// Type-erased matchers ready to be installed into a host.
#[derive(Clone)]
pub struct MatcherSet {
    matchers: Arc<dyn SpawnMatchers>,
}

impl MatcherSet {
    pub fn new(matchers: impl SpawnMatchers + 'static) -> Self {
        Self {
            matchers: Arc::new(matchers),
        }
    }

    pub fn names(&self) -> &'static [&'static str] {
        &MATCHER_NAMES
    }

    pub fn matchers(&self) -> &dyn SpawnMatchers {
        self.matchers.as_ref()
    }
}
