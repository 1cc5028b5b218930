use shell_matchers::types::ProcessResult;

/// Builder for `ProcessResult` to simplify test setup.
///
/// Starts from a clean exit: code 0, no signal, empty output.
#[derive(Debug, Clone, Default)]
pub struct ProcessResultBuilder {
    result: ProcessResult,
}

impl ProcessResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: i32) -> Self {
        self.result.code = code;
        self
    }

    pub fn signal(mut self, signal: &str) -> Self {
        self.result.signal = signal.to_string();
        self
    }

    pub fn stdout(mut self, stdout: &str) -> Self {
        self.result.stdout = stdout.to_string();
        self
    }

    pub fn stderr(mut self, stderr: &str) -> Self {
        self.result.stderr = stderr.to_string();
        self
    }

    pub fn build(self) -> ProcessResult {
        self.result
    }
}

/// What `sh hello-world.sh` produces.
pub fn hello_world() -> ProcessResult {
    ProcessResultBuilder::new().stdout("Hello World\n").build()
}
