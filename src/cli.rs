// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `shell-matchers`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shell-matchers",
    version,
    about = "Spawn a command and check its exit code, signal and output.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). Defaults apply if it does not exist.
    #[arg(long, value_name = "PATH", default_value = "ShellMatchers.toml")]
    pub config: String,

    /// Expected exit code.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub code: Option<i32>,

    /// Expected terminating signal name (e.g. SIGTERM); empty for none.
    #[arg(long, value_name = "NAME")]
    pub signal: Option<String>,

    /// Exact expected stdout.
    #[arg(long, value_name = "TEXT", conflicts_with = "stdout_matches")]
    pub stdout: Option<String>,

    /// Regular expression stdout must match.
    #[arg(long, value_name = "REGEX")]
    pub stdout_matches: Option<String>,

    /// Exact expected stderr.
    #[arg(long, value_name = "TEXT", conflicts_with = "stderr_matches")]
    pub stderr: Option<String>,

    /// Regular expression stderr must match.
    #[arg(long, value_name = "REGEX")]
    pub stderr_matches: Option<String>,

    /// Negate the expectation.
    #[arg(long)]
    pub not: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SHELL_MATCHERS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Command to run, followed by its arguments.
    #[arg(required = true, trailing_var_arg = true, num_args = 1.., value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
