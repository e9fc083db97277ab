//! Conversions into `Value` and to/from JSON.

use super::function::Function;
use super::object::ObjectRef;
use super::types::Value;
use crate::deferred::Deferred;
use crate::spy::Spy;
use crate::stub::{Contract, Stub};
use serde_json::{Map, Number};

/// Nesting limit for JSON rendering; deeper (or cyclic) graphs are cut off.
const MAX_JSON_DEPTH: usize = 32;

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or_default()
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Spy> for Value {
    fn from(spy: Spy) -> Self {
        Value::Spy(spy)
    }
}

impl<C: Contract> From<Stub<C>> for Value {
    fn from(stub: Stub<C>) -> Self {
        Value::Stub(stub.erase())
    }
}

impl From<Deferred> for Value {
    fn from(d: Deferred) -> Self {
        Value::Deferred(d)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        Value::from_json(json)
    }
}

impl Value {
    /// Build a value from JSON. JSON objects become plain objects.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let obj = ObjectRef::plain();
                for (name, value) in map {
                    obj.set(name.clone(), Value::from_json(value));
                }
                Value::Object(obj)
            }
        }
    }

    /// Render the data portion of this value as JSON.
    ///
    /// Returns `None` for behavior values (functions, spies, stubs, deferred
    /// values); inside objects and lists such members are skipped. Absent
    /// renders as `null`.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        self.to_json_at(0)
    }

    fn to_json_at(&self, depth: usize) -> Option<serde_json::Value> {
        if depth > MAX_JSON_DEPTH {
            return None;
        }

        match self {
            Value::Absent | Value::Null => Some(serde_json::Value::Null),
            Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Value::Number(n) => Some(number_to_json(*n)),
            Value::String(s) => Some(serde_json::Value::String(s.clone())),
            Value::List(items) => Some(serde_json::Value::Array(
                items
                    .iter()
                    .filter_map(|item| item.to_json_at(depth + 1))
                    .collect(),
            )),
            Value::Object(obj) => {
                let mut map = Map::new();
                for name in obj.keys() {
                    if let Some(json) = obj.get(&name).to_json_at(depth + 1) {
                        map.insert(name, json);
                    }
                }
                Some(serde_json::Value::Object(map))
            }
            Value::Function(_) | Value::Spy(_) | Value::Stub(_) | Value::Deferred(_) => None,
        }
    }
}

/// Whole numbers render as JSON integers; NaN and infinities as `null`.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
