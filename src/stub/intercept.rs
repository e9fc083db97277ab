//! Member interception: the single resolution path for stub member reads.
//!
//! Resolution order for a member `name`:
//! 1. identity-sensitive name (see `StubConfig::deferred_hooks`) without an
//!    explicit override: absent, never materialized
//! 2. explicit override
//! 3. previously materialized entry
//! 4. per the stub's member policy: a new default spy, stored for every later
//!    read, or absence
//!
//! Reads never fail; absence is a valid answer.

use super::types::{Contract, MemberPolicy, Stub, StubCore};
use crate::value::Value;

impl<C: Contract> Stub<C> {
    /// Resolve member `name`.
    pub fn get(&self, name: &str) -> Value {
        self.core.resolve(name)
    }
}

impl StubCore {
    pub(crate) fn resolve(&self, name: &str) -> Value {
        let config = self.sandbox.config();

        if let Some(entry) = self.overrides.get(name) {
            return entry.value();
        }

        if config.is_deferred_hook(name) {
            tracing::trace!(stub = %self.label, member = name, "identity-sensitive member left absent");
            return Value::Absent;
        }

        if let Some(existing) = self.members.borrow().get(name) {
            return existing.clone();
        }

        match self.policy {
            MemberPolicy::Absent => Value::Absent,
            MemberPolicy::Lazy => self.materialize(name),
        }
    }

    fn materialize(&self, name: &str) -> Value {
        let config = self.sandbox.config();
        if config.strict_contracts && !self.declared.is_empty() && !self.declared.contains(&name) {
            tracing::warn!(
                stub = %self.label,
                member = name,
                "materializing a member the contract does not declare"
            );
        }

        let spy = self
            .sandbox
            .stub_named(format!("{}.{}", self.label, name));
        let value = Value::Spy(spy);
        self.members
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        tracing::trace!(stub = %self.label, member = name, "materialized lazy spy");

        value
    }
}
