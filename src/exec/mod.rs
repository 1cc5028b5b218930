// src/exec/mod.rs

//! Process execution layer.
//!
//! This module turns an [`Invocation`] into a [`ProcessResult`](crate::types::ProcessResult).
//!
//! - [`runner`] defines the `ProcessRunner` trait and the invocation model.
//!   Matchers only depend on the trait, so tests can swap in a fake.
//! - [`tokio_runner`] is the production runner built on `tokio::process`.
//! - [`mocks`] installs `PATH` shims for intercepted commands and reads back
//!   the calls they received.

pub mod mocks;
pub mod runner;
pub mod tokio_runner;

pub use mocks::{MockCalls, MockCommand, MockDir};
pub use runner::{Invocation, ProcessRunner, SpawnOptions};
pub use tokio_runner::TokioRunner;
