// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - `model.rs` defines the TOML-backed data model.
//! - `loader.rs` reads a config file and applies environment overrides.
//! - `validate.rs` turns a `RawConfigFile` into a checked `ConfigFile`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    UPDATE_ENV_VAR, apply_env_overrides, default_config_path, load_and_validate, load_from_path,
    load_or_default,
};
pub use model::{
    ConfigFile, DEFAULT_HOST_VERSION, HostSection, RawConfigFile, RunnerSection, SnapshotSection,
};
pub use validate::validate_config;
