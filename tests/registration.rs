// tests/registration.rs

mod common;
use crate::common::{hello_world, init_tracing};

use shell_matchers::errors::ShellMatchersError;
use shell_matchers::host::{MatcherHost, supports_async_matchers};
use shell_matchers::matchers::MATCHER_NAMES;
use shell_matchers::{Expect, Invocation, MatcherSet, Matchers, extend_with_shell_matchers};
use shell_matchers_test_utils::fake_runner::FakeRunner;
use shell_matchers_test_utils::spies::RecordingUtils;
use shell_matchers_test_utils::with_timeout;

/// Host that reports an arbitrary version and remembers what it was given.
#[derive(Default)]
struct StubHost {
    version: Option<String>,
    installed: Vec<&'static str>,
}

impl StubHost {
    fn reporting(version: Option<&str>) -> Self {
        Self {
            version: version.map(str::to_string),
            installed: Vec::new(),
        }
    }
}

impl MatcherHost for StubHost {
    fn version(&self) -> Option<String> {
        self.version.clone()
    }

    fn extend(&mut self, matchers: MatcherSet) {
        self.installed.extend_from_slice(matchers.names());
    }
}

fn hello_matchers() -> MatcherSet {
    MatcherSet::new(Matchers::new(FakeRunner::returning(hello_world())))
}

fn assert_refused(version: Option<&str>) {
    let mut host = StubHost::reporting(version);
    let err = extend_with_shell_matchers(&mut host, hello_matchers()).unwrap_err();
    match err {
        ShellMatchersError::ConfigError(msg) => {
            assert_eq!(msg, "shell-matchers requires host framework version >= 23")
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
    assert!(host.installed.is_empty(), "nothing is installed on failure");
}

#[test]
fn missing_version_is_refused() {
    assert_refused(None);
}

#[test]
fn old_versions_are_refused() {
    assert_refused(Some("22.00.99"));
    assert_refused(Some("9.1.0"));
    assert_refused(Some("not-a-version"));
    assert_refused(Some(""));
}

#[test]
fn supported_versions_install_all_matchers() {
    for version in ["23.00.00", "23.0.0", "29.7.0", "100.0.0"] {
        let mut host = StubHost::reporting(Some(version));
        extend_with_shell_matchers(&mut host, hello_matchers()).unwrap();
        assert_eq!(host.installed, MATCHER_NAMES.to_vec(), "version {version}");
    }
}

#[test]
fn only_the_major_component_counts() {
    assert!(supports_async_matchers(Some("23")));
    assert!(supports_async_matchers(Some(" 24.1.2 ")));
    assert!(!supports_async_matchers(Some("22.99.99")));
    assert!(!supports_async_matchers(Some("v23.0.0")));
}

#[tokio::test]
async fn expect_without_matchers_is_an_error() {
    init_tracing();
    let host = Expect::new("23.0.0");
    assert!(!host.is_extended());

    let err = host
        .expect(Invocation::new("sh"))
        .to_have_matching_spawn_output(0)
        .await
        .unwrap_err();
    assert!(matches!(err, ShellMatchersError::ConfigError(_)));
}

#[tokio::test]
async fn old_expect_host_stays_empty() {
    init_tracing();
    let mut host = Expect::new("22.0.0");
    assert!(extend_with_shell_matchers(&mut host, hello_matchers()).is_err());
    assert!(!host.is_extended());
}

#[tokio::test]
async fn verdict_applies_negation() {
    init_tracing();
    let mut host = Expect::new("23.0.0").with_utils(RecordingUtils::new());
    extend_with_shell_matchers(&mut host, hello_matchers()).unwrap();
    assert!(host.is_extended());

    let hello = Invocation::new("sh").arg("./hello-world.sh");

    let verdict = with_timeout(host.expect(hello.clone()).to_have_matching_spawn_output(0))
        .await
        .unwrap();
    assert!(verdict.passed);
    verdict.assert();

    let verdict = with_timeout(host.expect(hello.clone()).not().to_have_matching_spawn_output(0))
        .await
        .unwrap();
    assert!(!verdict.passed);
    assert!(verdict.message.text().contains("Expected exit code not to be:"));

    let verdict = with_timeout(host.expect(hello).not().to_have_matching_spawn_output(1))
        .await
        .unwrap();
    assert!(verdict.passed);
}

#[tokio::test]
#[should_panic(expected = "Expected exit code to be:")]
async fn failed_verdict_panics_with_its_message() {
    let mut host = Expect::new("23.0.0");
    extend_with_shell_matchers(&mut host, hello_matchers()).unwrap();
    host.expect(Invocation::new("sh"))
        .to_have_matching_spawn_output(2)
        .await
        .unwrap()
        .assert();
}

#[tokio::test]
async fn expect_host_runs_snapshot_matchers_for_a_test() {
    init_tracing();
    let mut host = Expect::new("23.0.0").for_test("snapshot via host");
    extend_with_shell_matchers(&mut host, hello_matchers()).unwrap();

    let verdict = with_timeout(
        host.expect(Invocation::new("sh"))
            .to_have_spawn_output_matching_snapshot(),
    )
    .await
    .unwrap();
    assert!(verdict.passed);
}

#[tokio::test]
async fn negated_snapshot_through_the_host_is_an_error() {
    init_tracing();
    let mut host = Expect::new("23.0.0").for_test("neg");
    extend_with_shell_matchers(&mut host, hello_matchers()).unwrap();

    let err = with_timeout(
        host.expect(Invocation::new("sh"))
            .not()
            .to_have_stdout_matching_snapshot(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ShellMatchersError::SnapshotError(_)));
}
