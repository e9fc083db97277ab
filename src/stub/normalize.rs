//! Override normalization.
//!
//! Overrides are classified once, at construction time:
//! - functions become spies (spies supplied by the caller are kept as-is)
//! - plain objects become nested stubs, while the depth budget lasts
//! - everything else is stored verbatim

use super::builders::nested_interface;
use super::types::Stub;
use crate::error::Result;
use crate::sandbox::Sandbox;
use crate::spy::Spy;
use crate::value::{Function, ObjectRef, Value};
use std::collections::BTreeMap;

/// Caller-supplied member values that pre-seed a stub.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: BTreeMap<String, Value>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enumerable own members of `obj` as overrides.
    pub fn from_object(obj: &ObjectRef) -> Self {
        obj.keys()
            .into_iter()
            .map(|name| {
                let value = obj.get(&name);
                (name, value)
            })
            .collect()
    }

    /// Add an override of any kind.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add a function override.
    pub fn with_fn<F>(self, name: &str, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        let body = Function::new(name, body);
        self.with(name, body)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A normalized override.
#[derive(Debug, Clone)]
pub enum OverrideEntry {
    /// A function wrapped into a spy, or a caller-supplied spy.
    Function(Spy),
    /// A value stored verbatim.
    Data(Value),
    /// A plain object stubbed recursively.
    Nested(Stub),
}

impl OverrideEntry {
    /// The value the interceptor hands out for this entry.
    pub fn value(&self) -> Value {
        match self {
            OverrideEntry::Function(spy) => Value::Spy(spy.clone()),
            OverrideEntry::Data(value) => value.clone(),
            OverrideEntry::Nested(stub) => Value::Stub(stub.clone()),
        }
    }
}

/// Classify every override once.
///
/// * `label` - Prefix for spy and nested stub names
/// * `depth` - How many more levels of plain objects may be stubbed
/// * `receiver` - Receiver pinned onto wrapped functions (object stubs)
pub(crate) fn normalize(
    sandbox: &Sandbox,
    label: &str,
    overrides: Overrides,
    depth: usize,
    receiver: Option<&ObjectRef>,
) -> BTreeMap<String, OverrideEntry> {
    overrides
        .entries
        .into_iter()
        .map(|(name, value)| {
            let member_label = format!("{}.{}", label, name);
            let entry = match value {
                Value::Spy(spy) => OverrideEntry::Function(spy),
                Value::Function(body) => {
                    let spy = sandbox.fake(member_label, body);
                    if let Some(receiver) = receiver {
                        spy.bind(receiver);
                    }
                    OverrideEntry::Function(spy)
                }
                Value::Object(obj) if obj.is_plain() && depth > 0 => {
                    OverrideEntry::Nested(nested_interface(sandbox, member_label, &obj, depth - 1))
                }
                other => OverrideEntry::Data(other),
            };
            (name, entry)
        })
        .collect()
}
