use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use shell_matchers::errors::{Result, ShellMatchersError};
use shell_matchers::exec::{Invocation, ProcessRunner};
use shell_matchers::types::ProcessResult;

/// A fake runner that:
/// - records which invocations were "spawned"
/// - returns a canned `ProcessResult` (or a canned spawn failure).
#[derive(Clone)]
pub struct FakeRunner {
    response: std::result::Result<ProcessResult, String>,
    spawned: Arc<Mutex<Vec<Invocation>>>,
}

impl FakeRunner {
    pub fn returning(result: ProcessResult) -> Self {
        Self {
            response: Ok(result),
            spawned: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every spawn fails with an `ExecutionError` carrying `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(reason.to_string()),
            spawned: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded invocations.
    pub fn spawned(&self) -> Arc<Mutex<Vec<Invocation>>> {
        Arc::clone(&self.spawned)
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.lock().unwrap().len()
    }
}

impl ProcessRunner for FakeRunner {
    fn spawn<'a>(
        &'a self,
        invocation: &'a Invocation,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + 'a>> {
        Box::pin(async move {
            self.spawned.lock().unwrap().push(invocation.clone());
            match &self.response {
                Ok(result) => Ok(result.clone()),
                Err(reason) => Err(ShellMatchersError::ExecutionError(anyhow::anyhow!(
                    "{reason}"
                ))),
            }
        })
    }
}
