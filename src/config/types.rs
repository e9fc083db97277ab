//! Configuration constants and defaults for stubkit.

/// Conventional member name an await-like resolver probes for.
pub const DEFAULT_DEFERRED_HOOK: &str = "then";

// Default value functions for serde
pub(crate) fn default_nested_depth() -> usize {
    1
}
pub(crate) fn default_deferred_hooks() -> Vec<String> {
    vec![DEFAULT_DEFERRED_HOOK.to_string()]
}
