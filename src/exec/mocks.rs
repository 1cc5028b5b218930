// src/exec/mocks.rs

//! Command interception through `PATH` shims.
//!
//! Each mocked command becomes a small executable script in a private
//! temporary directory that is prepended to the child's `PATH`. The script
//! appends its argument vector to a per-command call log, then prints the
//! canned stdout/stderr and exits with the canned code. Call logs use ASCII
//! unit separators (0x1f) after each argument and a record separator (0x1e)
//! after each call, so arguments may contain spaces and newlines.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::errors::{Result, ShellMatchersError};

const ARG_SEPARATOR: char = '\u{1f}';
const CALL_SEPARATOR: char = '\u{1e}';

/// Canned response of an intercepted command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockCommand {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl MockCommand {
    /// Exit 0 with no output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit 0 printing `stdout`.
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }
}

/// Argument vectors each mocked command was invoked with, in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockCalls {
    calls: BTreeMap<String, Vec<Vec<String>>>,
}

impl MockCalls {
    pub fn calls(&self, name: &str) -> &[Vec<String>] {
        self.calls.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls(name).len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.calls.keys().map(String::as_str)
    }
}

/// Installed shims for one spawn. Removed from disk on drop.
#[derive(Debug)]
pub struct MockDir {
    dir: TempDir,
    names: Vec<String>,
}

impl MockDir {
    /// Write one shim per mock. Fails on platforms without `sh`.
    pub fn install(mocks: &BTreeMap<String, MockCommand>) -> Result<Self> {
        if !cfg!(unix) {
            return Err(ShellMatchersError::ConfigError(
                "command mocks are only supported on unix".to_string(),
            ));
        }

        let dir = tempfile::Builder::new().prefix("shell-matchers-mocks").tempdir()?;
        std::fs::create_dir(dir.path().join(".data"))?;

        for (name, mock) in mocks {
            validate_mock_name(name)?;
            write_shim(dir.path(), name, mock)?;
            debug!(mock = %name, dir = %dir.path().display(), "installed command mock");
        }

        Ok(Self {
            dir,
            names: mocks.keys().cloned().collect(),
        })
    }

    /// Directory to prepend to `PATH`.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Read back every mock's call log.
    pub fn calls(&self) -> Result<MockCalls> {
        let mut calls = BTreeMap::new();
        for name in &self.names {
            let log = log_path(self.dir.path(), name);
            let raw = match std::fs::read(&log) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
                Err(e) => return Err(e.into()),
            };
            calls.insert(name.clone(), parse_call_log(&raw));
        }
        Ok(MockCalls { calls })
    }
}

fn validate_mock_name(name: &str) -> Result<()> {
    if name.is_empty() || name.starts_with('.') || name.contains('/') || name.contains('\\') {
        return Err(ShellMatchersError::ConfigError(format!(
            "invalid mock command name '{name}'"
        )));
    }
    Ok(())
}

fn data_path(dir: &Path, name: &str, ext: &str) -> PathBuf {
    dir.join(".data").join(format!("{name}.{ext}"))
}

fn log_path(dir: &Path, name: &str) -> PathBuf {
    data_path(dir, name, "calls")
}

fn write_shim(dir: &Path, name: &str, mock: &MockCommand) -> Result<()> {
    let stdout_path = data_path(dir, name, "stdout");
    let stderr_path = data_path(dir, name, "stderr");
    std::fs::write(&stdout_path, &mock.stdout)?;
    std::fs::write(&stderr_path, &mock.stderr)?;

    let script = format!(
        "#!/bin/sh\n\
         {{ if [ \"$#\" -gt 0 ]; then printf '%s\\037' \"$@\"; fi; printf '\\036'; }} >> {log}\n\
         cat {stdout}\n\
         cat {stderr} >&2\n\
         exit {code}\n",
        log = shell_quote(&log_path(dir, name)),
        stdout = shell_quote(&stdout_path),
        stderr = shell_quote(&stderr_path),
        code = mock.code,
    );

    let shim = dir.join(name);
    std::fs::write(&shim, script)?;
    make_executable(&shim)?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

fn shell_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

fn parse_call_log(raw: &str) -> Vec<Vec<String>> {
    let mut records: Vec<&str> = raw.split(CALL_SEPARATOR).collect();
    // Every call is terminated by a separator, so the last piece is empty.
    records.pop();
    records
        .into_iter()
        .map(|record| {
            let mut args: Vec<String> = record.split(ARG_SEPARATOR).map(str::to_string).collect();
            args.pop();
            args
        })
        .collect()
}
