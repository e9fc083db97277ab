//! The `Value` enum and its dispatch helpers.

use super::function::Function;
use super::object::ObjectRef;
use crate::deferred::Deferred;
use crate::error::{Result, StubError};
use crate::spy::Spy;
use crate::stub::Stub;
use std::fmt;

/// A dynamically-typed value seen by stubs and spies.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value. Default result of a spy with no configured behavior.
    #[default]
    Absent,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    /// Shared object (compared by identity).
    Object(ObjectRef),
    /// Native callable (compared by identity).
    Function(Function),
    /// Call-tracking wrapper (compared by identity).
    Spy(Spy),
    /// Test double (compared by identity).
    Stub(Stub),
    /// Opaque settled future (compared by identity).
    Deferred(Deferred),
}

impl Value {
    /// Short type label, used by matchers and diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Spy(_) => "spy",
            Value::Stub(_) => "stub",
            Value::Deferred(_) => "deferred",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Whether calling this value can succeed.
    pub fn is_callable(&self) -> bool {
        match self {
            Value::Function(_) | Value::Spy(_) => true,
            Value::Stub(stub) => stub.is_callable(),
            _ => false,
        }
    }

    /// Whether this is an object with no behavior of its own
    /// (plain kind and no delegation link).
    pub fn is_plain_object(&self) -> bool {
        matches!(self, Value::Object(obj) if obj.is_plain())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_spy(&self) -> Option<&Spy> {
        match self {
            Value::Spy(spy) => Some(spy),
            _ => None,
        }
    }

    pub fn as_stub(&self) -> Option<&Stub> {
        match self {
            Value::Stub(stub) => Some(stub),
            _ => None,
        }
    }

    pub fn as_deferred(&self) -> Option<&Deferred> {
        match self {
            Value::Deferred(d) => Some(d),
            _ => None,
        }
    }

    /// Read a member. Objects search their delegation chain, stubs resolve
    /// through their member interceptor; everything else has no members.
    pub fn get(&self, name: &str) -> Value {
        match self {
            Value::Object(obj) => obj.get(name),
            Value::Stub(stub) => stub.get(name),
            _ => Value::Absent,
        }
    }

    /// Invoke this value with an explicit receiver.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        match self {
            Value::Function(f) => f.call(this, args),
            Value::Spy(spy) => spy.invoke(this, args),
            Value::Stub(stub) => stub.invoke_with(this, args),
            other => Err(StubError::NotCallable {
                what: format!("{} value", other.type_name()),
            }),
        }
    }

    /// Read member `name` and call it with this value as the receiver.
    pub fn call_member(&self, name: &str, args: &[Value]) -> Result<Value> {
        let member = self.get(name);
        if member.is_absent() {
            return Err(StubError::NotCallable {
                what: format!("member '{}'", name),
            });
        }
        member.call(self, args)
    }

    /// Diagnostic rendering: strings quoted, data objects as JSON.
    pub fn describe(&self) -> String {
        match self {
            Value::String(s) => format!("{:?}", s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::describe).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Object(_) => match self.to_json() {
                Some(json) => json.to_string(),
                None => self.to_string(),
            },
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Spy(a), Value::Spy(b)) => a.ptr_eq(b),
            (Value::Stub(a), Value::Stub(b)) => a.ptr_eq(b),
            (Value::Deferred(a), Value::Deferred(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// String coercion, e.g. `format!("normal:{}", value)`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "absent"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(","))
            }
            Value::Object(obj) => write!(f, "[object {}]", obj.kind()),
            Value::Function(func) => write!(f, "[function {}]", func.name()),
            Value::Spy(spy) => write!(f, "[spy {}]", spy.name()),
            Value::Stub(stub) => write!(f, "[stub {}]", stub.label()),
            Value::Deferred(_) => write!(f, "[deferred]"),
        }
    }
}
