//! Reading and checking a `StubConfig`, plus the lookups builders use.

use super::model::StubConfig;
use crate::error::{Result, StubError};
use std::collections::BTreeSet;
use std::path::Path;

impl StubConfig {
    /// Read a shared test-suite config, e.g. a `stubkit.yaml` checked in
    /// next to the tests, and validate it.
    ///
    /// # Errors
    ///
    /// * `StubError::Config` - the file cannot be read, is not valid YAML, or
    ///   names an empty or duplicate deferred hook
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StubError::Config(format!("cannot read stub config '{}': {}", path.display(), e))
        })?;

        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), ?config, "loaded stub config");
        Ok(config)
    }

    /// Parse and validate an inline config. Omitted fields take their
    /// defaults, so `"nested_depth: 2"` alone is a complete config.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: StubConfig = serde_yaml::from_str(yaml)
            .map_err(|e| StubError::Config(format!("invalid stub config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Render every field, defaults included, e.g. to seed a config file.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| StubError::Config(format!("cannot render stub config: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `deferred_hooks` entries must be non-empty
    /// - `deferred_hooks` entries must be unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for hook in &self.deferred_hooks {
            if hook.trim().is_empty() {
                return Err(StubError::Config(
                    "config validation failed: deferred_hooks entries must be non-empty"
                        .to_string(),
                ));
            }
            if !seen.insert(hook.as_str()) {
                return Err(StubError::Config(format!(
                    "config validation failed: duplicate deferred_hooks entry '{}'",
                    hook
                )));
            }
        }

        Ok(())
    }

    /// Whether `name` is an identity-sensitive member name.
    pub fn is_deferred_hook(&self, name: &str) -> bool {
        self.deferred_hooks.iter().any(|hook| hook == name)
    }
}
