// src/exec/tokio_runner.rs

//! Default runner: spawns the invocation with `tokio::process::Command` and
//! collects its exit status and full output.

use std::ffi::OsString;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::RunnerSection;
use crate::errors::{Result, ShellMatchersError};
use crate::types::ProcessResult;

use super::mocks::{MockCalls, MockDir};
use super::runner::{Invocation, ProcessRunner};

#[derive(Debug, Clone, Default)]
pub struct TokioRunner {
    timeout: Option<Duration>,
}

impl TokioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the process and fail with `Timeout` if it runs longer than `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn from_config(runner: &RunnerSection) -> Self {
        Self {
            timeout: runner.timeout_ms.map(Duration::from_millis),
        }
    }

    /// Run the invocation and also return the calls its mocks received.
    pub async fn spawn_with_calls(&self, invocation: &Invocation) -> Result<(ProcessResult, MockCalls)> {
        let mocks = if invocation.options.mocks.is_empty() {
            None
        } else {
            Some(MockDir::install(&invocation.options.mocks)?)
        };

        let result = self.run(invocation, mocks.as_ref()).await?;

        let calls = match &mocks {
            Some(dir) => dir.calls()?,
            None => MockCalls::default(),
        };
        Ok((result, calls))
    }

    async fn run(&self, invocation: &Invocation, mocks: Option<&MockDir>) -> Result<ProcessResult> {
        info!(
            cmd = %invocation,
            mocks = invocation.options.mocks.len(),
            "spawning process"
        );

        let mut cmd = Command::new(&invocation.command);
        cmd.args(&invocation.args)
            .envs(&invocation.options.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(cwd) = &invocation.options.cwd {
            cmd.current_dir(cwd);
        }

        if let Some(dir) = mocks {
            let base = invocation
                .options
                .env
                .get("PATH")
                .map(OsString::from)
                .or_else(|| std::env::var_os("PATH"));
            cmd.env("PATH", prepend_path(dir.path(), base)?);
        }

        let child = cmd
            .spawn()
            .with_context(|| format!("spawning process `{invocation}`"))
            .map_err(ShellMatchersError::ExecutionError)?;

        let waiting = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, waiting).await {
                Ok(output) => output,
                Err(_) => {
                    // Dropping the future drops the child, which kills it.
                    let after_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                    warn!(cmd = %invocation, timeout_ms = after_ms, "process timed out");
                    return Err(ShellMatchersError::Timeout {
                        command: invocation.to_string(),
                        after_ms,
                    });
                }
            },
            None => waiting.await,
        }
        .with_context(|| format!("waiting for process `{invocation}`"))
        .map_err(ShellMatchersError::ExecutionError)?;

        let result = ProcessResult {
            code: output.status.code().unwrap_or(-1),
            signal: signal_name(&output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        info!(
            cmd = %invocation,
            exit_code = result.code,
            signal = %result.signal,
            "process exited"
        );
        debug!(stdout = %result.stdout, stderr = %result.stderr, "captured output");

        Ok(result)
    }
}

impl ProcessRunner for TokioRunner {
    fn spawn<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + 'a>> {
        Box::pin(async move {
            let (result, _calls) = self.spawn_with_calls(invocation).await?;
            Ok(result)
        })
    }
}

fn prepend_path(dir: &Path, base: Option<OsString>) -> Result<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(base) = base {
        paths.extend(std::env::split_paths(&base));
    }
    std::env::join_paths(paths)
        .context("building PATH for command mocks")
        .map_err(ShellMatchersError::ExecutionError)
}

#[cfg(unix)]
fn signal_name(status: &ExitStatus) -> String {
    use nix::sys::signal::Signal;
    use std::os::unix::process::ExitStatusExt;

    match status.signal() {
        Some(raw) => match Signal::try_from(raw) {
            Ok(sig) => sig.as_str().to_string(),
            Err(_) => format!("SIG{raw}"),
        },
        None => String::new(),
    }
}

#[cfg(not(unix))]
fn signal_name(_status: &ExitStatus) -> String {
    String::new()
}
