//! Stub builders: interface, object and callable stubs.

use super::normalize::{Overrides, normalize};
use super::types::{Contract, Dynamic, MemberPolicy, Stub, StubCore, StubKind};
use crate::sandbox::Sandbox;
use crate::value::{Function, ObjectRef, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Label for callable stubs and their invocation spy.
const CALLABLE_LABEL: &str = "Callable";

/// Options for [`stub_object_with`].
#[derive(Debug, Clone, Default)]
pub struct ObjectStubOptions {
    include_hidden: BTreeSet<String>,
    include_all_hidden: bool,
    nested_depth: Option<usize>,
}

impl ObjectStubOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also stub the hidden member `name` (found on the instance or its chain).
    pub fn include_hidden(mut self, name: impl Into<String>) -> Self {
        self.include_hidden.insert(name.into());
        self
    }

    /// Stub every hidden member.
    pub fn include_all_hidden(mut self) -> Self {
        self.include_all_hidden = true;
        self
    }

    /// Override `StubConfig::nested_depth` for this stub.
    pub fn nested_depth(mut self, depth: usize) -> Self {
        self.nested_depth = Some(depth);
        self
    }

    fn includes_hidden(&self, name: &str) -> bool {
        self.include_all_hidden || self.include_hidden.contains(name)
    }
}

/// Build a stub for a contract with no backing instance.
///
/// Every member that is not overridden is materialized as a default spy on
/// first access.
pub fn stub_interface<C: Contract>(sandbox: &Sandbox, overrides: Overrides) -> Stub<C> {
    let depth = sandbox.config().nested_depth;
    let overrides = normalize(sandbox, C::NAME, overrides, depth, None);
    tracing::debug!(contract = C::NAME, overrides = overrides.len(), "built interface stub");

    Stub::from_core(StubCore {
        kind: StubKind::Interface,
        label: C::NAME.to_string(),
        declared: C::MEMBERS,
        overrides,
        members: RefCell::new(BTreeMap::new()),
        policy: MemberPolicy::Lazy,
        sandbox: sandbox.clone(),
    })
}

/// Stub for a plain object found in overrides: its members become the
/// nested stub's overrides.
pub(crate) fn nested_interface(
    sandbox: &Sandbox,
    label: String,
    obj: &ObjectRef,
    depth: usize,
) -> Stub {
    let overrides = normalize(sandbox, &label, Overrides::from_object(obj), depth, None);

    Stub::from_core(StubCore {
        kind: StubKind::Interface,
        label,
        declared: Dynamic::MEMBERS,
        overrides,
        members: RefCell::new(BTreeMap::new()),
        policy: MemberPolicy::Lazy,
        sandbox: sandbox.clone(),
    })
}

/// Build a stub from a concrete instance with default options.
pub fn stub_object<C: Contract>(
    sandbox: &Sandbox,
    instance: &ObjectRef,
    overrides: Overrides,
) -> Stub<C> {
    stub_object_with(sandbox, instance, overrides, ObjectStubOptions::default())
}

/// Build a stub from a concrete instance.
///
/// Members are replaced in place on the instance until the sandbox is
/// restored, so the instance's own methods see them through `this`:
/// function members found on the instance or its delegation chain become
/// spies that call through to the original, and explicit overrides are
/// written over the originals. Wrapped functions always run with the
/// instance as receiver. Data members are copied by reference. Plain-object
/// members are stubbed recursively while the nested depth lasts; other
/// objects are copied by reference.
pub fn stub_object_with<C: Contract>(
    sandbox: &Sandbox,
    instance: &ObjectRef,
    overrides: Overrides,
    options: ObjectStubOptions,
) -> Stub<C> {
    let depth = options
        .nested_depth
        .unwrap_or(sandbox.config().nested_depth);
    let core = object_core(
        sandbox,
        C::NAME.to_string(),
        C::MEMBERS,
        instance,
        overrides,
        &options,
        depth,
    );
    Stub::from_core(core)
}

fn object_core(
    sandbox: &Sandbox,
    label: String,
    declared: &'static [&'static str],
    instance: &ObjectRef,
    overrides: Overrides,
    options: &ObjectStubOptions,
    depth: usize,
) -> StubCore {
    let config = sandbox.config();
    let overrides = normalize(sandbox, &label, overrides, depth, Some(instance));
    let originals = instance.members(|name| options.includes_hidden(name));

    for (name, entry) in &overrides {
        sandbox.install(instance, name, entry.value());
    }

    let mut members = BTreeMap::new();
    for (name, value) in originals {
        if overrides.contains_key(&name) {
            continue;
        }
        if config.is_deferred_hook(&name) {
            tracing::trace!(stub = %label, member = %name, "skipping identity-sensitive member");
            continue;
        }

        let member_label = format!("{}.{}", label, name);
        let member = if matches!(value, Value::Function(_) | Value::Spy(_)) {
            let spy = sandbox.call_through(member_label, value);
            spy.bind(instance);
            sandbox.install(instance, &name, Value::Spy(spy.clone()));
            Value::Spy(spy)
        } else if let Value::Object(nested) = &value
            && nested.is_plain()
            && depth > 0
        {
            let nested = object_core(
                sandbox,
                member_label,
                Dynamic::MEMBERS,
                nested,
                Overrides::new(),
                &ObjectStubOptions::default(),
                depth - 1,
            );
            Value::Stub(Stub::from_core(nested))
        } else {
            value
        };
        members.insert(name, member);
    }

    let policy = if config.lazy_object_members {
        MemberPolicy::Lazy
    } else {
        MemberPolicy::Absent
    };
    tracing::debug!(
        stub = %label,
        members = members.len(),
        overrides = overrides.len(),
        "built object stub"
    );

    StubCore {
        kind: StubKind::Object(instance.clone()),
        label,
        declared,
        overrides,
        members: RefCell::new(members),
        policy,
        sandbox: sandbox.clone(),
    }
}

/// Build a callable stub.
///
/// Invoking the stub is tracked by its own spy (see [`Stub::invocation`]),
/// which runs `fake` when given and otherwise returns absence. Named members
/// resolve like an interface stub's and keep independent histories.
pub fn stub_callable(sandbox: &Sandbox, overrides: Overrides, fake: Option<Function>) -> Stub {
    let invocation = match fake {
        Some(body) => sandbox.fake(CALLABLE_LABEL, body),
        None => sandbox.stub_named(CALLABLE_LABEL),
    };
    let depth = sandbox.config().nested_depth;
    let overrides = normalize(sandbox, CALLABLE_LABEL, overrides, depth, None);
    tracing::debug!(overrides = overrides.len(), "built callable stub");

    Stub::from_core(StubCore {
        kind: StubKind::Callable(invocation),
        label: CALLABLE_LABEL.to_string(),
        declared: Dynamic::MEMBERS,
        overrides,
        members: RefCell::new(BTreeMap::new()),
        policy: MemberPolicy::Lazy,
        sandbox: sandbox.clone(),
    })
}
