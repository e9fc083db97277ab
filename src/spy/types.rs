//! Core types for spy behaviors and call history.

use crate::value::{Function, ObjectRef, Value, WeakObjectRef};

/// How a spy answers a call.
#[derive(Debug, Clone, Default)]
pub enum Behavior {
    /// Return absence.
    #[default]
    Default,
    /// Return a fixed value.
    Returns(Value),
    /// Raise a fixed value.
    Throws(Value),
    /// Delegate to a fake implementation.
    Fake(Function),
    /// Delegate to the original member.
    CallThrough,
}

/// What a recorded call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Returned(Value),
    /// The raised value; errors that carry no value are recorded by message.
    Threw(Value),
}

/// A single recorded invocation.
#[derive(Debug, Clone)]
pub struct CallRecord {
    /// The receiver the behavior ran with.
    pub this: Value,
    pub args: Vec<Value>,
    pub outcome: Outcome,
    /// Global, monotonically increasing call number (for call ordering).
    pub sequence: u64,
}

impl CallRecord {
    pub fn returned(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Returned(value) => Some(value),
            Outcome::Threw(_) => None,
        }
    }

    pub fn threw(&self) -> bool {
        matches!(self.outcome, Outcome::Threw(_))
    }

    /// Whether the first `expected.len()` arguments equal `expected`.
    pub fn called_with(&self, expected: &[Value]) -> bool {
        self.args.len() >= expected.len() && self.args.iter().zip(expected).all(|(a, e)| a == e)
    }

    pub fn called_with_exactly(&self, expected: &[Value]) -> bool {
        self.args == expected
    }

    pub(crate) fn describe(&self) -> String {
        let args: Vec<String> = self.args.iter().map(Value::describe).collect();
        let outcome = match &self.outcome {
            Outcome::Returned(value) => format!("=> {}", value.describe()),
            Outcome::Threw(value) => format!("!! {}", value.describe()),
        };
        format!("({}) {}", args.join(", "), outcome)
    }
}

/// A member written over in place, and what it displaced.
#[derive(Debug, Clone)]
pub(crate) struct Installation {
    pub owner: WeakObjectRef,
    pub member: String,
    /// The owner's own value before installation; `None` if it was inherited.
    pub previous_own: Option<Value>,
    /// Visibility of the nearest definition, kept by the replacement.
    pub hidden: bool,
}

impl Installation {
    /// Record the current state of `owner[member]` before replacing it.
    pub(crate) fn capture(owner: &ObjectRef, member: &str) -> Self {
        Self {
            owner: owner.downgrade(),
            member: member.to_string(),
            previous_own: owner.get_own(member),
            hidden: owner.is_hidden_member(member),
        }
    }

    /// Write `value` over the member.
    pub(crate) fn apply(&self, value: Value) {
        if let Some(owner) = self.owner.upgrade() {
            owner.set_with_visibility(&self.member, value, self.hidden);
        }
    }

    /// Put back the displaced value, but only while `installed` is still the
    /// owner's own value. Returns whether the member was reverted.
    pub(crate) fn revert(&self, installed: &Value) -> bool {
        let Some(owner) = self.owner.upgrade() else {
            return false;
        };
        if owner.get_own(&self.member).as_ref() != Some(installed) {
            return false;
        }

        match &self.previous_own {
            Some(previous) => owner.set_with_visibility(&self.member, previous.clone(), self.hidden),
            None => {
                owner.remove(&self.member);
            }
        }
        true
    }
}
