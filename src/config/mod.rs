//! Configuration model for stubkit.
//!
//! This module defines the `StubConfig` struct that tunes how builders
//! materialize members. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), sensible defaults for optional fields, and validation
//! of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::StubConfig;
pub use types::DEFAULT_DEFERRED_HOOK;
