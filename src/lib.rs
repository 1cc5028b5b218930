// src/lib.rs

//! Assertions on spawned processes.
//!
//! ```no_run
//! # async fn demo() -> shell_matchers::errors::Result<()> {
//! use regex::Regex;
//! use shell_matchers::{
//!     Expect, Invocation, MatcherSet, Matchers, Shape, TokioRunner, extend_with_shell_matchers,
//! };
//!
//! let mut host = Expect::new("23.0.0");
//! extend_with_shell_matchers(&mut host, MatcherSet::new(Matchers::new(TokioRunner::new())))?;
//!
//! let hello = Invocation::new("sh").arg("./hello-world.sh");
//! let expected = Shape::new()
//!     .code(0)
//!     .stdout_matching(Regex::new("^Hello World")?)
//!     .stderr("");
//! host.expect(hello).to_have_matching_spawn_output(expected).await?.assert();
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod compare;
pub mod config;
pub mod errors;
pub mod exec;
pub mod expected;
pub mod host;
pub mod logging;
pub mod matchers;
pub mod message;
pub mod snapshot;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use regex::Regex;
use tracing::debug;

pub use crate::compare::{
    Comparator, ComparisonOutcome, DefaultComparator, InspectedField, compare,
    non_matching_fields,
};
pub use crate::exec::{Invocation, MockCalls, MockCommand, ProcessRunner, TokioRunner};
pub use crate::expected::{ExpectedKind, ExpectedSpec, FieldExpectation, Shape};
pub use crate::host::{Expect, MatcherHost, Verdict, extend_with_shell_matchers};
pub use crate::matchers::{MATCHER_NAMES, MatcherContext, MatcherResult, MatcherSet, Matchers};
pub use crate::message::{DefaultMessageBuilder, MatcherUtils, Message, MessageBuilder, PlainUtils};
pub use crate::types::{Fields, ProcessResult, Record, Value};

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::snapshot::FileSnapshotStore;

/// Entry point used by `main.rs`.
///
/// Returns whether the assertion passed; the message is printed to stderr
/// when it did not.
pub async fn run(args: CliArgs) -> Result<bool> {
    let cfg = load_or_default(&args.config)?;
    let expected = expectation_from_args(&args)?;

    let (command, rest) = args
        .command
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("no command given"))?;
    let invocation = Invocation::new(command.clone()).args(rest.iter().cloned());

    let matchers = Matchers::new(TokioRunner::from_config(&cfg.runner))
        .with_snapshot_store(Arc::new(FileSnapshotStore::from_config(&cfg.snapshot)));

    let mut host = Expect::from_config(&cfg);
    extend_with_shell_matchers(&mut host, MatcherSet::new(matchers))?;

    let mut assertion = host.expect(invocation);
    if args.not {
        assertion = assertion.not();
    }

    let verdict = assertion.to_have_matching_spawn_output(expected).await?;
    debug!(passed = verdict.passed, "assertion finished");

    if !verdict.passed {
        eprintln!("{}", verdict.message);
    }
    Ok(verdict.passed)
}

/// Build the expectation described by the CLI flags.
///
/// A lone `--code`, `--stdout` or `--stdout-matches` gives the scalar form
/// (and its field-specific message); anything else is a partial shape in
/// `code`, `signal`, `stdout`, `stderr` order.
pub fn expectation_from_args(args: &CliArgs) -> crate::errors::Result<ExpectedSpec> {
    let stdout_pattern = args.stdout_matches.as_deref().map(Regex::new).transpose()?;
    let stderr_pattern = args.stderr_matches.as_deref().map(Regex::new).transpose()?;

    let given = [
        args.code.is_some(),
        args.signal.is_some(),
        args.stdout.is_some() || stdout_pattern.is_some(),
        args.stderr.is_some() || stderr_pattern.is_some(),
    ]
    .iter()
    .filter(|set| **set)
    .count();

    if given == 0 {
        return Err(errors::ShellMatchersError::ConfigError(
            "nothing to check: pass at least one of --code, --signal, --stdout, \
             --stdout-matches, --stderr, --stderr-matches"
                .to_string(),
        ));
    }

    if given == 1 {
        if let Some(code) = args.code {
            return Ok(ExpectedSpec::exit_code(code));
        }
        if let Some(stdout) = &args.stdout {
            return Ok(ExpectedSpec::stdout(stdout.clone()));
        }
        if let Some(pattern) = &stdout_pattern {
            return Ok(ExpectedSpec::stdout_matching(pattern.clone()));
        }
    }

    let mut shape = Shape::new();
    if let Some(code) = args.code {
        shape = shape.code(code);
    }
    if let Some(signal) = &args.signal {
        shape = shape.signal(signal.clone());
    }
    if let Some(stdout) = &args.stdout {
        shape = shape.stdout(stdout.clone());
    }
    if let Some(pattern) = stdout_pattern {
        shape = shape.stdout_matching(pattern);
    }
    if let Some(stderr) = &args.stderr {
        shape = shape.stderr(stderr.clone());
    }
    if let Some(pattern) = stderr_pattern {
        shape = shape.stderr_matching(pattern);
    }
    Ok(ExpectedSpec::shape(shape))
}
