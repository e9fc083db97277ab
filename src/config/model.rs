//! StubConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration shared by every stub built through a sandbox.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StubConfig {
    /// How many levels of nested plain objects are stubbed recursively.
    /// Deeper plain objects are kept by reference.
    #[serde(default = "default_nested_depth")]
    pub nested_depth: usize,

    /// Identity-sensitive member names that are never auto-materialized.
    #[serde(default = "default_deferred_hooks")]
    pub deferred_hooks: Vec<String>,

    /// Whether object stubs lazily materialize spies for names the instance
    /// does not define. When false such reads yield absence.
    #[serde(default)]
    pub lazy_object_members: bool,

    /// Warn when an interface stub materializes a name its contract does not
    /// declare (contracts with no declared members are exempt).
    #[serde(default)]
    pub strict_contracts: bool,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            nested_depth: default_nested_depth(),
            deferred_hooks: default_deferred_hooks(),
            lazy_object_members: false,
            strict_contracts: false,
        }
    }
}
