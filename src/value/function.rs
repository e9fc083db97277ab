//! Native callables.

use super::types::Value;
use crate::error::Result;
use std::fmt;
use std::rc::Rc;

type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value>;

/// A native function receiving the receiver (`this`) and the call arguments.
///
/// Cloning a `Function` shares the underlying closure.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    body: Rc<NativeFn>,
}

impl Function {
    /// Create a named function.
    pub fn new<F>(name: impl AsRef<str>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Self {
            name: Rc::from(name.as_ref()),
            body: Rc::new(body),
        }
    }

    /// Create an unnamed function.
    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Self::new("anonymous", body)
    }

    /// A function that ignores its arguments and returns `value`.
    pub fn returning(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new("constant", move |_, _| Ok(value.clone()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function. Errors propagate unmodified.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        (self.body)(this, args)
    }

    /// Whether both handles share the same closure.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}
