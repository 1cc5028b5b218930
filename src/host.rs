// src/host.rs

//! Registration of the matchers with an assertion host, and the built-in
//! [`Expect`] host.
//!
//! Registration is explicit: [`extend_with_shell_matchers`] checks the
//! host's version and hands it a [`MatcherSet`]. Nothing is global.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ConfigFile;
use crate::errors::{Result, ShellMatchersError};
use crate::exec::Invocation;
use crate::expected::ExpectedSpec;
use crate::matchers::{MatcherContext, MatcherResult, MatcherSet};
use crate::message::{MatcherUtils, Message, PlainUtils};

/// Hosts older than this major version cannot run async matchers.
pub const MIN_HOST_MAJOR: u64 = 23;

/// An assertion framework the matchers can be installed into.
pub trait MatcherHost {
    /// The host's version string (`"23.0.0"`), if it can report one.
    fn version(&self) -> Option<String>;

    fn extend(&mut self, matchers: MatcherSet);
}

/// Whether `version`'s major component is at least [`MIN_HOST_MAJOR`].
///
/// Missing or unparsable versions are unsupported.
pub fn supports_async_matchers(version: Option<&str>) -> bool {
    version
        .and_then(|v| v.trim().split('.').next())
        .and_then(|major| major.parse::<u64>().ok())
        .is_some_and(|major| major >= MIN_HOST_MAJOR)
}

/// Install `matchers` into `host`, refusing hosts that are too old.
///
/// On failure nothing is installed.
pub fn extend_with_shell_matchers<H>(host: &mut H, matchers: MatcherSet) -> Result<()>
where
    H: MatcherHost + ?Sized,
{
    let version = host.version();
    if !supports_async_matchers(version.as_deref()) {
        debug!(?version, "refusing to register shell matchers");
        return Err(ShellMatchersError::ConfigError(format!(
            "shell-matchers requires host framework version >= {MIN_HOST_MAJOR}"
        )));
    }

    info!(?version, names = ?matchers.names(), "registering shell matchers");
    host.extend(matchers);
    Ok(())
}

/// Built-in host: `expect(invocation).not().to_have_matching_spawn_output(0)`.
pub struct Expect {
    version: String,
    installed: Option<MatcherSet>,
    utils: Arc<dyn MatcherUtils>,
    test_name: Option<String>,
}

impl Expect {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            installed: None,
            utils: Arc::new(PlainUtils),
            test_name: None,
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.host.version.clone())
    }

    pub fn with_utils(mut self, utils: Arc<dyn MatcherUtils>) -> Self {
        self.utils = utils;
        self
    }

    /// Name snapshots after `name`.
    pub fn for_test(mut self, name: impl Into<String>) -> Self {
        self.test_name = Some(name.into());
        self
    }

    pub fn is_extended(&self) -> bool {
        self.installed.is_some()
    }

    pub fn expect(&self, invocation: Invocation) -> SpawnAssertion<'_> {
        SpawnAssertion {
            host: self,
            invocation,
            is_not: false,
        }
    }

    fn matchers(&self) -> Result<&MatcherSet> {
        self.installed.as_ref().ok_or_else(|| {
            ShellMatchersError::ConfigError(
                "shell matchers are not installed; call extend_with_shell_matchers first"
                    .to_string(),
            )
        })
    }

    fn context(&self, is_not: bool) -> MatcherContext {
        MatcherContext {
            is_not,
            utils: Arc::clone(&self.utils),
            test_name: self.test_name.clone(),
        }
    }
}

impl MatcherHost for Expect {
    fn version(&self) -> Option<String> {
        Some(self.version.clone())
    }

    fn extend(&mut self, matchers: MatcherSet) {
        self.installed = Some(matchers);
    }
}

/// The host's final word on one assertion.
#[derive(Debug)]
pub struct Verdict {
    /// `pass`, negated if the assertion was declared with `.not()`.
    pub passed: bool,
    pub message: Message,
}

impl Verdict {
    fn new(result: MatcherResult, is_not: bool) -> Self {
        Self {
            passed: result.pass != is_not,
            message: result.message,
        }
    }

    /// Panic with the message if the assertion failed.
    pub fn assert(self) {
        if !self.passed {
            panic!("{}", self.message);
        }
    }
}

pub struct SpawnAssertion<'a> {
    host: &'a Expect,
    invocation: Invocation,
    is_not: bool,
}

impl SpawnAssertion<'_> {
    pub fn not(mut self) -> Self {
        self.is_not = !self.is_not;
        self
    }

    pub async fn to_have_matching_spawn_output(
        &self,
        expected: impl Into<ExpectedSpec>,
    ) -> Result<Verdict> {
        let expected = expected.into();
        let ctx = self.host.context(self.is_not);
        let result = self
            .host
            .matchers()?
            .matchers()
            .to_have_matching_spawn_output(&ctx, &self.invocation, &expected)
            .await?;
        Ok(Verdict::new(result, self.is_not))
    }

    pub async fn to_have_spawn_output_matching_snapshot(&self) -> Result<Verdict> {
        let ctx = self.host.context(self.is_not);
        let result = self
            .host
            .matchers()?
            .matchers()
            .to_have_spawn_output_matching_snapshot(&ctx, &self.invocation)
            .await?;
        Ok(Verdict::new(result, self.is_not))
    }

    pub async fn to_have_stdout_matching_snapshot(&self) -> Result<Verdict> {
        let ctx = self.host.context(self.is_not);
        let result = self
            .host
            .matchers()?
            .matchers()
            .to_have_stdout_matching_snapshot(&ctx, &self.invocation)
            .await?;
        Ok(Verdict::new(result, self.is_not))
    }

    pub async fn to_have_stderr_matching_snapshot(&self) -> Result<Verdict> {
        let ctx = self.host.context(self.is_not);
        let result = self
            .host
            .matchers()?
            .matchers()
            .to_have_stderr_matching_snapshot(&ctx, &self.invocation)
            .await?;
        Ok(Verdict::new(result, self.is_not))
    }
}
