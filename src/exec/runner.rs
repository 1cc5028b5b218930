// src/exec/runner.rs

//! Pluggable process runner abstraction.
//!
//! Matchers talk to a `ProcessRunner` instead of spawning processes
//! themselves. Production code uses [`TokioRunner`](super::TokioRunner);
//! tests can provide an implementation that returns canned results and
//! records which invocations it was asked to run.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::errors::Result;
use crate::types::ProcessResult;

use super::mocks::MockCommand;

/// A command line plus spawn options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub options: SpawnOptions,
}

/// Environment, working directory and mocked commands for one spawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOptions {
    /// Variables added on top of the inherited environment.
    pub env: BTreeMap<String, String>,
    /// Commands to intercept, keyed by the name the process looks up on `PATH`.
    pub mocks: BTreeMap<String, MockCommand>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.env.insert(key.into(), value.into());
        self
    }

    pub fn mock(mut self, name: impl Into<String>, mock: MockCommand) -> Self {
        self.options.mocks.insert(name.into(), mock);
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Trait abstracting how an invocation becomes a `ProcessResult`.
pub trait ProcessRunner: Send + Sync {
    /// Run the invocation to completion.
    ///
    /// Errors (spawn failure, timeout) are returned as-is; matchers propagate
    /// them to the caller without turning them into a failed comparison.
    fn spawn<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + 'a>>;
}
