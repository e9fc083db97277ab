//! Shared objects with a delegation chain.

use super::function::Function;
use super::types::Value;
use crate::error::{Result, StubError};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::{Rc, Weak};

/// What an object is, which decides whether builders recurse into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    /// A plain record of members.
    Plain,
    /// An instance of a named class; its behavior lives on its prototype.
    Instance(String),
    /// A built-in shaped value (dates, buffers, maps...). Never stubbed
    /// recursively.
    Builtin(String),
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Plain => write!(f, "Object"),
            ObjectKind::Instance(class) => write!(f, "{}", class),
            ObjectKind::Builtin(name) => write!(f, "{}", name),
        }
    }
}

/// Object storage: members, hidden member names and the delegation link.
#[derive(Debug)]
pub struct Object {
    pub kind: ObjectKind,
    pub properties: BTreeMap<String, Value>,
    /// Members that exist but are not enumerated (non-public behavior).
    pub hidden: BTreeSet<String>,
    pub prototype: Option<ObjectRef>,
}

impl Object {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            properties: BTreeMap::new(),
            hidden: BTreeSet::new(),
            prototype: None,
        }
    }
}

/// Shared handle to an [`Object`]. Clones alias the same object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    pub fn new(kind: ObjectKind) -> Self {
        Self(Rc::new(RefCell::new(Object::new(kind))))
    }

    /// A new empty plain object.
    pub fn plain() -> Self {
        Self::new(ObjectKind::Plain)
    }

    /// A new instance of `class` delegating to `prototype`.
    pub fn instance_of(class: impl Into<String>, prototype: &ObjectRef) -> Self {
        let obj = Self::new(ObjectKind::Instance(class.into()));
        obj.0.borrow_mut().prototype = Some(prototype.clone());
        obj
    }

    /// A new built-in shaped object.
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::new(ObjectKind::Builtin(name.into()))
    }

    /// Builder form of [`ObjectRef::set`].
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder form installing a public method.
    pub fn with_method<F>(self, name: &str, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        self.set(name, Function::new(name, body));
        self
    }

    /// Builder form installing a hidden method.
    pub fn with_hidden_method<F>(self, name: &str, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        self.set_hidden(name, Function::new(name, body));
        self
    }

    pub fn kind(&self) -> ObjectKind {
        self.0.borrow().kind.clone()
    }

    /// Plain kind with no delegation link.
    pub fn is_plain(&self) -> bool {
        let obj = self.0.borrow();
        obj.kind == ObjectKind::Plain && obj.prototype.is_none()
    }

    pub fn prototype(&self) -> Option<ObjectRef> {
        self.0.borrow().prototype.clone()
    }

    /// Replace the delegation link. Links that would form a cycle are refused.
    pub fn set_prototype(&self, prototype: Option<ObjectRef>) -> Result<()> {
        if let Some(proto) = &prototype
            && proto.chain().iter().any(|link| link.ptr_eq(self))
        {
            return Err(StubError::Config(
                "prototype assignment would create a delegation cycle".to_string(),
            ));
        }
        self.0.borrow_mut().prototype = prototype;
        Ok(())
    }

    /// Set an own member, keeping its hidden flag if it already had one.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.borrow_mut().properties.insert(name.into(), value.into());
    }

    /// Set an own member that is not enumerated.
    pub fn set_hidden(&self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let mut obj = self.0.borrow_mut();
        obj.hidden.insert(name.clone());
        obj.properties.insert(name, value.into());
    }

    pub(crate) fn set_with_visibility(&self, name: &str, value: Value, hidden: bool) {
        if hidden {
            self.set_hidden(name, value);
        } else {
            let mut obj = self.0.borrow_mut();
            obj.hidden.remove(name);
            obj.properties.insert(name.to_string(), value);
        }
    }

    /// Remove an own member.
    pub fn remove(&self, name: &str) -> Option<Value> {
        let mut obj = self.0.borrow_mut();
        obj.hidden.remove(name);
        obj.properties.remove(name)
    }

    pub fn get_own(&self, name: &str) -> Option<Value> {
        self.0.borrow().properties.get(name).cloned()
    }

    pub fn has_own(&self, name: &str) -> bool {
        self.0.borrow().properties.contains_key(name)
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.0.borrow().hidden.contains(name)
    }

    /// Visibility of the nearest definition of `name` on the chain.
    pub fn is_hidden_member(&self, name: &str) -> bool {
        self.chain()
            .into_iter()
            .find(|link| link.has_own(name))
            .is_some_and(|link| link.is_hidden(name))
    }

    /// Find a member on this object or its delegation chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.chain()
            .into_iter()
            .find_map(|link| link.get_own(name))
    }

    /// Read a member, searching the delegation chain. Missing members are absent.
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).unwrap_or_default()
    }

    /// Enumerable own member names, in order.
    pub fn keys(&self) -> Vec<String> {
        let obj = self.0.borrow();
        obj.properties
            .keys()
            .filter(|name| !obj.hidden.contains(*name))
            .cloned()
            .collect()
    }

    /// Members reachable on this object and its delegation chain; the nearest
    /// definition of a name wins. Hidden members are listed only when
    /// `include_hidden` accepts their name.
    pub fn members(&self, include_hidden: impl Fn(&str) -> bool) -> Vec<(String, Value)> {
        let mut seen = BTreeSet::new();
        let mut members = Vec::new();

        for link in self.chain() {
            let obj = link.0.borrow();
            for (name, value) in &obj.properties {
                if obj.hidden.contains(name) && !include_hidden(name) {
                    continue;
                }
                if seen.insert(name.clone()) {
                    members.push((name.clone(), value.clone()));
                }
            }
        }

        members
    }

    /// Call the method `name` found on the chain with this object as receiver.
    pub fn call_method(&self, name: &str, args: &[Value]) -> Result<Value> {
        Value::Object(self.clone()).call_member(name, args)
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// A handle that does not keep the object alive.
    pub(crate) fn downgrade(&self) -> WeakObjectRef {
        WeakObjectRef(Rc::downgrade(&self.0))
    }

    /// This object followed by each prototype, stopping at the first repeat.
    fn chain(&self) -> Vec<ObjectRef> {
        let mut links: Vec<ObjectRef> = Vec::new();
        let mut current = Some(self.clone());

        while let Some(link) = current {
            if links.iter().any(|seen| seen.ptr_eq(&link)) {
                break;
            }
            current = link.prototype();
            links.push(link);
        }

        links
    }
}

/// Non-owning handle to an object. Spies hold their owner and receiver this
/// way, since the object in turn holds the spy.
#[derive(Clone)]
pub(crate) struct WeakObjectRef(Weak<RefCell<Object>>);

impl WeakObjectRef {
    pub(crate) fn upgrade(&self) -> Option<ObjectRef> {
        self.0.upgrade().map(ObjectRef)
    }
}

impl fmt::Debug for WeakObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(obj) => write!(f, "Weak({:?})", obj),
            None => write!(f, "Weak(<dropped>)"),
        }
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(obj) => f
                .debug_struct("ObjectRef")
                .field("kind", &obj.kind)
                .field("members", &obj.properties.keys().collect::<Vec<_>>())
                .field("has_prototype", &obj.prototype.is_some())
                .finish(),
            Err(_) => write!(f, "ObjectRef(<borrowed>)"),
        }
    }
}
