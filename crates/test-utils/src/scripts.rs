use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary directory of shell scripts for end-to-end tests.
pub struct ScriptDir {
    dir: TempDir,
}

impl ScriptDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("creating script dir"),
        }
    }

    /// Write `body` to `<dir>/<name>` and return its path as a string, ready
    /// to pass to `sh`.
    pub fn script(&self, name: &str, body: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, body).expect("writing script");
        path.display().to_string()
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}

impl Default for ScriptDir {
    fn default() -> Self {
        Self::new()
    }
}

pub const HELLO_WORLD: &str = "echo 'Hello World'\n";

pub const EXIT_0: &str = "exit 0\n";

/// Prints `$TO_STDOUT` and `$TO_STDERR`, then exits with `$1` (default 0).
pub const INPUT_OUTPUT: &str = "echo \"$TO_STDOUT\"\necho \"$TO_STDERR\" >&2\nexit \"${1:-0}\"\n";

pub const LS_GREP_FROG: &str = "ls | grep frog\n";

pub const MKDIR_TODAY: &str = "mkdir \"$(date +%m-%d-%Y)\"\n";

pub const MV: &str = "mv \"$1\" /target/dir\n";
