// tests/cli_expectation.rs

use clap::Parser;

use shell_matchers::cli::{CliArgs, LogLevel};
use shell_matchers::errors::ShellMatchersError;
use shell_matchers::expected::ExpectedSpec;
use shell_matchers::expectation_from_args;
use shell_matchers::logging::resolve_level;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("shell-matchers").chain(args.iter().copied())).unwrap()
}

fn field_names(spec: &ExpectedSpec) -> Vec<String> {
    match spec {
        ExpectedSpec::PartialShape(shape) => shape.iter().map(|(k, _)| k.to_string()).collect(),
        other => panic!("expected a shape, got {other:?}"),
    }
}

#[test]
fn command_and_its_arguments_are_kept_verbatim() {
    let args = parse(&["--code", "0", "sh", "-c", "exit 0"]);
    assert_eq!(args.command, vec!["sh", "-c", "exit 0"]);
    assert_eq!(args.config, "ShellMatchers.toml");
    assert!(!args.not);
}

#[test]
fn a_command_is_required() {
    assert!(CliArgs::try_parse_from(["shell-matchers", "--code", "0"]).is_err());
}

#[test]
fn stdout_flags_conflict() {
    let res = CliArgs::try_parse_from([
        "shell-matchers",
        "--stdout",
        "x",
        "--stdout-matches",
        "x",
        "true",
    ]);
    assert!(res.is_err());
}

#[test]
fn no_expectation_flags_is_an_error() {
    let err = expectation_from_args(&parse(&["true"])).unwrap_err();
    assert!(matches!(err, ShellMatchersError::ConfigError(_)));
}

#[test]
fn lone_flags_give_scalar_expectations() {
    let spec = expectation_from_args(&parse(&["--code", "-1", "true"])).unwrap();
    assert!(matches!(spec, ExpectedSpec::ExitCode(-1)));

    let spec = expectation_from_args(&parse(&["--stdout", "hi\n", "true"])).unwrap();
    assert!(matches!(spec, ExpectedSpec::StdoutExact(ref s) if s == "hi\n"));

    let spec = expectation_from_args(&parse(&["--stdout-matches", "^Hello", "true"])).unwrap();
    assert!(matches!(spec, ExpectedSpec::StdoutPattern(ref re) if re.as_str() == "^Hello"));
}

#[test]
fn lone_stderr_or_signal_still_builds_a_shape() {
    let spec = expectation_from_args(&parse(&["--stderr", "", "true"])).unwrap();
    assert_eq!(field_names(&spec), vec!["stderr"]);

    let spec = expectation_from_args(&parse(&["--signal", "SIGTERM", "true"])).unwrap();
    assert_eq!(field_names(&spec), vec!["signal"]);
}

#[test]
fn combined_flags_build_a_shape_in_field_order() {
    let spec = expectation_from_args(&parse(&[
        "--stderr-matches",
        "warn",
        "--stdout",
        "ok\n",
        "--code",
        "0",
        "true",
    ]))
    .unwrap();
    assert_eq!(field_names(&spec), vec!["code", "stdout", "stderr"]);
}

#[test]
fn invalid_patterns_are_reported() {
    let err = expectation_from_args(&parse(&["--stdout-matches", "(", "true"])).unwrap_err();
    assert!(matches!(err, ShellMatchersError::PatternError(_)));
}

#[test]
fn log_level_resolution() {
    assert_eq!(resolve_level(None, None), tracing::Level::INFO);
    assert_eq!(resolve_level(None, Some("debug")), tracing::Level::DEBUG);
    assert_eq!(resolve_level(None, Some("garbage")), tracing::Level::INFO);
    assert_eq!(
        resolve_level(Some(LogLevel::Trace), Some("error")),
        tracing::Level::TRACE
    );
}

#[test]
fn test_tracing_reads_the_crate_log_variable() {
    assert_eq!(shell_matchers::logging::LOG_ENV_VAR, "SHELL_MATCHERS_LOG");
    // Repeated initialisation is harmless.
    shell_matchers_test_utils::init_tracing();
    shell_matchers_test_utils::init_tracing();
}
