//! Deferred values and await-like resolution.
//!
//! The stub engine treats deferred values opaquely: a spy configured with
//! `resolves`/`rejects` simply returns a [`Deferred`]. [`settle`] plays the
//! part of a surrounding resolution mechanism:
//!
//! - a `Deferred` settles to its fulfilled value (recursively) or fails with
//!   [`StubError::Rejected`]
//! - any value exposing a callable `then` member is assimilated by calling
//!   `then(resolve, reject)`
//! - everything else settles to itself
//!
//! Stubs answer absence for `then` unless it was explicitly overridden, so a
//! stub passed through `settle` comes back as the same stub.

use crate::config::DEFAULT_DEFERRED_HOOK;
use crate::error::{Result, StubError};
use crate::value::{Function, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Bound on nested thenable assimilation.
const MAX_ASSIMILATION_DEPTH: usize = 32;

/// Final state of a deferred value.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Fulfilled(Value),
    Rejected(Value),
}

/// An already-settled future-like value.
#[derive(Clone)]
pub struct Deferred(Rc<Settlement>);

impl Deferred {
    pub fn fulfilled(value: impl Into<Value>) -> Self {
        Self(Rc::new(Settlement::Fulfilled(value.into())))
    }

    pub fn rejected(reason: impl Into<Value>) -> Self {
        Self(Rc::new(Settlement::Rejected(reason.into())))
    }

    pub fn settlement(&self) -> &Settlement {
        &self.0
    }

    pub fn ptr_eq(&self, other: &Deferred) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deferred({:?})", self.0)
    }
}

/// Resolve `value` the way an awaiting caller would.
pub fn settle(value: &Value) -> Result<Value> {
    settle_at(value, 0)
}

fn settle_at(value: &Value, depth: usize) -> Result<Value> {
    if depth > MAX_ASSIMILATION_DEPTH {
        return Err(StubError::Unsettled);
    }

    if let Value::Deferred(deferred) = value {
        return match deferred.settlement() {
            Settlement::Fulfilled(inner) => settle_at(inner, depth + 1),
            Settlement::Rejected(reason) => Err(StubError::Rejected(reason.clone())),
        };
    }

    let then = value.get(DEFAULT_DEFERRED_HOOK);
    if !then.is_callable() {
        return Ok(value.clone());
    }

    let slot: Rc<RefCell<Option<Settlement>>> = Rc::new(RefCell::new(None));
    let resolve = settlement_callback("resolve", &slot, Settlement::Fulfilled);
    let reject = settlement_callback("reject", &slot, Settlement::Rejected);

    let outcome = then.call(value, &[resolve.into(), reject.into()]);
    let settled = slot.borrow_mut().take();

    match (settled, outcome) {
        (Some(Settlement::Fulfilled(inner)), _) => settle_at(&inner, depth + 1),
        (Some(Settlement::Rejected(reason)), _) => Err(StubError::Rejected(reason)),
        (None, Err(err)) => Err(err),
        (None, Ok(_)) => Err(StubError::Unsettled),
    }
}

/// First call wins; later calls are ignored.
fn settlement_callback(
    name: &str,
    slot: &Rc<RefCell<Option<Settlement>>>,
    settle_as: fn(Value) -> Settlement,
) -> Function {
    let slot = Rc::clone(slot);
    Function::new(name, move |_, args| {
        let mut current = slot.borrow_mut();
        if current.is_none() {
            *current = Some(settle_as(args.first().cloned().unwrap_or_default()));
        }
        Ok(Value::Absent)
    })
}
