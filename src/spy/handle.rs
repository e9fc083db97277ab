//! The `Spy` handle: invocation, configuration and call-history queries.

use super::matcher::Matcher;
use super::types::{Behavior, CallRecord, Installation, Outcome};
use crate::deferred::Deferred;
use crate::error::{Result, StubError};
use crate::value::{Function, ObjectRef, Value, WeakObjectRef};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static CALL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_sequence() -> u64 {
    CALL_SEQUENCE.fetch_add(1, Ordering::Relaxed)
}

struct SpyState {
    calls: Vec<CallRecord>,
    /// Calls started, including ones still running; keys `per_call`.
    invocations: usize,
    behavior: Behavior,
    /// Behavior the spy was created with; `reset_behavior` returns to it.
    initial: Behavior,
    per_call: BTreeMap<usize, Behavior>,
    original: Option<Value>,
    /// Fixed receiver; overrides whatever `this` the caller passes while
    /// the object is alive.
    receiver: Option<WeakObjectRef>,
    installation: Option<Installation>,
    active: bool,
}

struct SpyCore {
    name: String,
    state: RefCell<SpyState>,
}

/// Shared handle to a call-tracking wrapper. Clones alias the same spy.
#[derive(Clone)]
pub struct Spy(Rc<SpyCore>);

impl Spy {
    fn with_behavior(name: impl Into<String>, behavior: Behavior, original: Option<Value>) -> Self {
        Self(Rc::new(SpyCore {
            name: name.into(),
            state: RefCell::new(SpyState {
                calls: Vec::new(),
                invocations: 0,
                behavior: behavior.clone(),
                initial: behavior,
                per_call: BTreeMap::new(),
                original,
                receiver: None,
                installation: None,
                active: true,
            }),
        }))
    }

    /// A spy that returns absence until configured.
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self::with_behavior(name, Behavior::Default, None)
    }

    /// A spy that records calls and delegates to `original`.
    pub(crate) fn call_through(name: impl Into<String>, original: Value) -> Self {
        Self::with_behavior(name, Behavior::CallThrough, Some(original))
    }

    /// A spy whose behavior is the fake `body`.
    pub(crate) fn faking(name: impl Into<String>, body: Function) -> Self {
        Self::with_behavior(name, Behavior::Fake(body), None)
    }

    /// Pin the receiver every behavior runs with.
    pub(crate) fn bind(&self, receiver: &ObjectRef) {
        self.0.state.borrow_mut().receiver = Some(receiver.downgrade());
    }

    pub(crate) fn attach(&self, installation: Installation) {
        self.0.state.borrow_mut().installation = Some(installation);
    }

    /// Whether the spy currently replaces some object member.
    pub(crate) fn is_installed(&self) -> bool {
        self.0.state.borrow().installation.is_some()
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Invoke the spy. Errors raised by the behavior propagate unmodified.
    pub fn invoke(&self, this: &Value, args: &[Value]) -> Result<Value> {
        let (behavior, receiver, original) = {
            let mut state = self.0.state.borrow_mut();
            let receiver = state
                .receiver
                .as_ref()
                .and_then(WeakObjectRef::upgrade)
                .map(Value::Object)
                .unwrap_or_else(|| this.clone());

            if !state.active {
                let original = state.original.clone();
                drop(state);
                return match original {
                    Some(original) => original.call(&receiver, args),
                    None => Ok(Value::Absent),
                };
            }

            let index = state.invocations;
            state.invocations += 1;
            let behavior = state
                .per_call
                .get(&index)
                .cloned()
                .unwrap_or_else(|| state.behavior.clone());
            (behavior, receiver, state.original.clone())
        };

        let sequence = next_sequence();
        let result = match behavior {
            Behavior::Default => Ok(Value::Absent),
            Behavior::Returns(value) => Ok(value),
            Behavior::Throws(value) => Err(StubError::Thrown(value)),
            Behavior::Fake(body) => body.call(&receiver, args),
            Behavior::CallThrough => match &original {
                Some(original) => original.call(&receiver, args),
                None => Ok(Value::Absent),
            },
        };

        let outcome = match &result {
            Ok(value) => Outcome::Returned(value.clone()),
            Err(StubError::Thrown(value)) => Outcome::Threw(value.clone()),
            Err(err) => Outcome::Threw(Value::String(err.to_string())),
        };

        let mut state = self.0.state.borrow_mut();
        state.calls.push(CallRecord {
            this: receiver,
            args: args.to_vec(),
            outcome,
            sequence,
        });
        tracing::trace!(spy = %self.0.name, calls = state.calls.len(), "spy invoked");

        result
    }

    // =========================================================================
    // Behavior configuration
    // =========================================================================

    fn set_behavior(&self, behavior: Behavior) -> &Self {
        self.0.state.borrow_mut().behavior = behavior;
        self
    }

    pub fn returns(&self, value: impl Into<Value>) -> &Self {
        self.set_behavior(Behavior::Returns(value.into()))
    }

    /// Return a fulfilled deferred value.
    pub fn resolves(&self, value: impl Into<Value>) -> &Self {
        self.set_behavior(Behavior::Returns(Deferred::fulfilled(value).into()))
    }

    /// Return a rejected deferred value.
    pub fn rejects(&self, reason: impl Into<Value>) -> &Self {
        self.set_behavior(Behavior::Returns(Deferred::rejected(reason).into()))
    }

    pub fn throws(&self, value: impl Into<Value>) -> &Self {
        self.set_behavior(Behavior::Throws(value.into()))
    }

    pub fn calls_fake<F>(&self, body: F) -> &Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        let body = Function::new(&self.0.name, body);
        self.set_behavior(Behavior::Fake(body))
    }

    /// Delegate to the original member (absence if there is none).
    pub fn calls_through(&self) -> &Self {
        self.set_behavior(Behavior::CallThrough)
    }

    /// Configure the behavior of the `index`-th call (zero-based).
    pub fn on_call(&self, index: usize) -> OnCall<'_> {
        OnCall { spy: self, index }
    }

    pub fn reset_history(&self) {
        let mut state = self.0.state.borrow_mut();
        state.calls.clear();
        state.invocations = 0;
    }

    pub fn reset_behavior(&self) {
        let mut state = self.0.state.borrow_mut();
        state.behavior = state.initial.clone();
        state.per_call.clear();
    }

    pub fn reset(&self) {
        self.reset_history();
        self.reset_behavior();
    }

    /// Deactivate the spy and put back the member it replaced, if any.
    /// Restoring twice is a no-op.
    pub fn restore(&self) {
        let installation = {
            let mut state = self.0.state.borrow_mut();
            if !state.active {
                return;
            }
            state.active = false;
            state.installation.take()
        };

        let Some(installation) = installation else {
            return;
        };

        if !installation.revert(&Value::Spy(self.clone())) {
            tracing::debug!(
                spy = %self.0.name,
                member = %installation.member,
                "member no longer holds this spy; leaving it in place"
            );
            return;
        }
        tracing::debug!(spy = %self.0.name, member = %installation.member, "restored member");
    }

    // =========================================================================
    // Call history
    // =========================================================================

    pub fn is_active(&self) -> bool {
        self.0.state.borrow().active
    }

    /// The value this spy delegates to when calling through.
    pub fn original(&self) -> Option<Value> {
        self.0.state.borrow().original.clone()
    }

    pub fn call_count(&self) -> usize {
        self.0.state.borrow().calls.len()
    }

    pub fn called(&self) -> bool {
        self.call_count() > 0
    }

    pub fn not_called(&self) -> bool {
        self.call_count() == 0
    }

    pub fn called_once(&self) -> bool {
        self.call_count() == 1
    }

    pub fn called_twice(&self) -> bool {
        self.call_count() == 2
    }

    pub fn called_thrice(&self) -> bool {
        self.call_count() == 3
    }

    /// Snapshot of every recorded call, oldest first.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.0.state.borrow().calls.clone()
    }

    pub fn get_call(&self, index: usize) -> Option<CallRecord> {
        self.0.state.borrow().calls.get(index).cloned()
    }

    pub fn first_call(&self) -> Option<CallRecord> {
        self.get_call(0)
    }

    pub fn last_call(&self) -> Option<CallRecord> {
        self.0.state.borrow().calls.last().cloned()
    }

    /// Whether any call started with the `expected` arguments.
    pub fn called_with(&self, expected: &[Value]) -> bool {
        self.0
            .state
            .borrow()
            .calls
            .iter()
            .any(|call| call.called_with(expected))
    }

    /// Whether any call had exactly the `expected` arguments.
    pub fn called_with_exactly(&self, expected: &[Value]) -> bool {
        self.0
            .state
            .borrow()
            .calls
            .iter()
            .any(|call| call.called_with_exactly(expected))
    }

    /// Whether the spy was called and every call started with `expected`.
    pub fn always_called_with(&self, expected: &[Value]) -> bool {
        let state = self.0.state.borrow();
        !state.calls.is_empty() && state.calls.iter().all(|call| call.called_with(expected))
    }

    /// Whether any call's leading arguments satisfy `matchers`.
    pub fn called_with_match(&self, matchers: &[Matcher]) -> bool {
        self.0.state.borrow().calls.iter().any(|call| {
            matchers.iter().enumerate().all(|(i, matcher)| {
                matcher.matches(call.args.get(i).unwrap_or(&Value::Absent))
            })
        })
    }

    /// Whether this spy's first call happened before `other`'s last call.
    pub fn called_before(&self, other: &Spy) -> bool {
        match (self.first_call(), other.last_call()) {
            (Some(mine), Some(theirs)) => mine.sequence < theirs.sequence,
            _ => false,
        }
    }

    /// Whether this spy's last call happened after `other`'s first call.
    pub fn called_after(&self, other: &Spy) -> bool {
        match (self.last_call(), other.first_call()) {
            (Some(mine), Some(theirs)) => mine.sequence > theirs.sequence,
            _ => false,
        }
    }

    /// Human-readable call list for assertion messages.
    pub fn format_calls(&self) -> String {
        let state = self.0.state.borrow();
        if state.calls.is_empty() {
            return format!("    {} was never called\n", self.0.name);
        }

        state
            .calls
            .iter()
            .map(|call| format!("    {}{}\n", self.0.name, call.describe()))
            .collect()
    }

    /// Whether both handles share the same spy.
    pub fn ptr_eq(&self, other: &Spy) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Spy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.state.try_borrow() {
            Ok(state) => f
                .debug_struct("Spy")
                .field("name", &self.0.name)
                .field("calls", &state.calls.len())
                .field("active", &state.active)
                .finish(),
            Err(_) => write!(f, "Spy({})", self.0.name),
        }
    }
}

/// Per-call behavior configuration returned by [`Spy::on_call`].
pub struct OnCall<'a> {
    spy: &'a Spy,
    index: usize,
}

impl<'a> OnCall<'a> {
    fn set(self, behavior: Behavior) -> &'a Spy {
        self.spy
            .0
            .state
            .borrow_mut()
            .per_call
            .insert(self.index, behavior);
        self.spy
    }

    pub fn returns(self, value: impl Into<Value>) -> &'a Spy {
        self.set(Behavior::Returns(value.into()))
    }

    pub fn resolves(self, value: impl Into<Value>) -> &'a Spy {
        self.set(Behavior::Returns(Deferred::fulfilled(value).into()))
    }

    pub fn rejects(self, reason: impl Into<Value>) -> &'a Spy {
        self.set(Behavior::Returns(Deferred::rejected(reason).into()))
    }

    pub fn throws(self, value: impl Into<Value>) -> &'a Spy {
        self.set(Behavior::Throws(value.into()))
    }

    pub fn calls_fake<F>(self, body: F) -> &'a Spy
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        let body = Function::new(self.spy.name(), body);
        self.set(Behavior::Fake(body))
    }
}
