//! Core stub types: contracts, the stub handle and its shared core.

use super::normalize::OverrideEntry;
use crate::error::{Result, StubError};
use crate::sandbox::Sandbox;
use crate::spy::Spy;
use crate::value::{ObjectRef, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

/// A caller-declared shape that a stub stands in for.
///
/// Only used for typing and diagnostics: the engine materializes whatever
/// member name is actually accessed.
///
/// ```
/// use stubkit::Contract;
///
/// struct Repository;
///
/// impl Contract for Repository {
///     const NAME: &'static str = "Repository";
///     const MEMBERS: &'static [&'static str] = &["find", "save"];
/// }
/// ```
pub trait Contract: 'static {
    const NAME: &'static str;
    const MEMBERS: &'static [&'static str] = &[];
}

/// The untyped contract. `Value::Stub` holds stubs of this contract.
#[derive(Debug)]
pub enum Dynamic {}

impl Contract for Dynamic {
    const NAME: &'static str = "Dynamic";
}

/// What a stub was built from.
pub(crate) enum StubKind {
    Interface,
    Object(ObjectRef),
    /// The invocation spy of a callable stub.
    Callable(Spy),
}

/// What the interceptor does for a name nothing has supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MemberPolicy {
    /// Materialize a default spy and keep it.
    Lazy,
    /// Answer absence.
    Absent,
}

pub(crate) struct StubCore {
    pub(crate) kind: StubKind,
    /// Prefix for member spy names, e.g. `Repository` or `Service.config`.
    pub(crate) label: String,
    pub(crate) declared: &'static [&'static str],
    pub(crate) overrides: BTreeMap<String, OverrideEntry>,
    pub(crate) members: RefCell<BTreeMap<String, Value>>,
    pub(crate) policy: MemberPolicy,
    pub(crate) sandbox: Sandbox,
}

/// A test double. Clones (and [`Stub::erase`]/[`Stub::retype`]) share the
/// same identity and member table.
pub struct Stub<C: Contract = Dynamic> {
    pub(crate) core: Rc<StubCore>,
    contract: PhantomData<fn() -> C>,
}

impl<C: Contract> Clone for Stub<C> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            contract: PhantomData,
        }
    }
}

impl<C: Contract> Stub<C> {
    pub(crate) fn from_core(core: StubCore) -> Self {
        Self {
            core: Rc::new(core),
            contract: PhantomData,
        }
    }

    /// The same stub viewed through the untyped contract.
    pub fn erase(&self) -> Stub {
        self.retype()
    }

    /// The same stub viewed through another contract.
    pub fn retype<D: Contract>(&self) -> Stub<D> {
        Stub {
            core: Rc::clone(&self.core),
            contract: PhantomData,
        }
    }

    /// Whether both handles refer to the same stub.
    pub fn ptr_eq<D: Contract>(&self, other: &Stub<D>) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    /// Name used for diagnostics and member spy names.
    pub fn label(&self) -> &str {
        &self.core.label
    }

    /// Members declared by the contract the stub was built for.
    pub fn declared_members(&self) -> &'static [&'static str] {
        self.core.declared
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.core.sandbox
    }

    /// The seed instance of an object stub.
    pub fn instance(&self) -> Option<ObjectRef> {
        match &self.core.kind {
            StubKind::Object(instance) => Some(instance.clone()),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.core.kind, StubKind::Callable(_))
    }

    /// The spy tracking invocations of a callable stub.
    pub fn invocation(&self) -> Option<Spy> {
        match &self.core.kind {
            StubKind::Callable(spy) => Some(spy.clone()),
            _ => None,
        }
    }

    /// Invoke a callable stub.
    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        self.invoke_with(&Value::Absent, args)
    }

    /// Invoke a callable stub with an explicit receiver.
    pub fn invoke_with(&self, this: &Value, args: &[Value]) -> Result<Value> {
        match &self.core.kind {
            StubKind::Callable(spy) => spy.invoke(this, args),
            _ => Err(StubError::NotCallable {
                what: format!("stub '{}'", self.core.label),
            }),
        }
    }

    /// Resolve member `name` and call it with the stub as receiver.
    pub fn call_member(&self, name: &str, args: &[Value]) -> Result<Value> {
        Value::Stub(self.erase()).call_member(name, args)
    }

    /// Resolve member `name` and return it if it is a spy.
    pub fn spy(&self, name: &str) -> Option<Spy> {
        self.get(name).as_spy().cloned()
    }

    /// Resolve member `name` and return it if it is a nested stub.
    pub fn nested(&self, name: &str) -> Option<Stub> {
        self.get(name).as_stub().cloned()
    }

    pub fn has_override(&self, name: &str) -> bool {
        self.core.overrides.contains_key(name)
    }

    /// Names currently held in the materialized-members table.
    pub fn materialized(&self) -> Vec<String> {
        self.core.members.borrow().keys().cloned().collect()
    }
}

impl<C: Contract> fmt::Debug for Stub<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.core.kind {
            StubKind::Interface => "interface",
            StubKind::Object(_) => "object",
            StubKind::Callable(_) => "callable",
        };
        f.debug_struct("Stub")
            .field("label", &self.core.label)
            .field("kind", &kind)
            .field("overrides", &self.core.overrides.keys().collect::<Vec<_>>())
            .field(
                "members",
                &self.core.members.try_borrow().map(|m| m.len()).ok(),
            )
            .finish()
    }
}
