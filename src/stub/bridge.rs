//! Identity bridge: hand a stub to code that expects the original shape.

use super::types::{Contract, Stub};
use crate::value::Value;

/// The stub itself as a [`Value`], for code written against the original
/// object. No wrapper is allocated: the value shares the stub's identity, so
/// repeated calls return equal handles.
pub fn from_stub<C: Contract>(stub: &Stub<C>) -> Value {
    Value::Stub(stub.erase())
}
