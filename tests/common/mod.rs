#![allow(dead_code)]

pub use shell_matchers_test_utils::builders::{ProcessResultBuilder, hello_world};
pub use shell_matchers_test_utils::init_tracing;

use regex::Regex;

/// Compile a pattern in a test; panics on a bad literal.
pub fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}
