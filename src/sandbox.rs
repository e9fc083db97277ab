//! Sandbox: an owning scope for spies and in-place member writes.
//!
//! Every spy created by the stub builders and the method facade is registered
//! with the sandbox passed to them, and so is every member they write onto a
//! real object. `restore()` deactivates and reverts all of them, newest first,
//! so stacked installations unwind in order. Restoring an already-restored
//! sandbox does nothing.
//!
//! Installed spies refer to their owner object weakly, so an object holding a
//! spy is still freed when the sandbox is dropped without `restore()`. The
//! object then keeps the spy in place for as long as it lives.

use crate::config::StubConfig;
use crate::error::Result;
use crate::spy::{Installation, Spy};
use crate::value::{Function, ObjectRef, Value};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Something `restore()` has to undo.
enum Owned {
    Spy(Spy),
    /// A member written onto an object by a value that is not a fresh spy.
    Member {
        installation: Installation,
        value: Value,
    },
}

struct SandboxCore {
    config: StubConfig,
    owned: RefCell<Vec<Owned>>,
    restored: Cell<bool>,
}

/// Shared handle to a sandbox. Clones alias the same sandbox.
#[derive(Clone)]
pub struct Sandbox(Rc<SandboxCore>);

impl Sandbox {
    /// A sandbox using the default [`StubConfig`].
    pub fn new() -> Self {
        Self::from_config(StubConfig::default())
    }

    /// A sandbox using `config`, after validating it.
    pub fn with_config(config: StubConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: StubConfig) -> Self {
        Self(Rc::new(SandboxCore {
            config,
            owned: RefCell::new(Vec::new()),
            restored: Cell::new(false),
        }))
    }

    pub fn config(&self) -> &StubConfig {
        &self.0.config
    }

    /// An anonymous spy that records calls and returns absence.
    pub fn spy(&self) -> Spy {
        self.register(Spy::new("spy"))
    }

    /// A spy that records calls and delegates to `original`.
    pub fn spy_fn(&self, original: Function) -> Spy {
        let name = original.name().to_string();
        self.register(Spy::call_through(name, original.into()))
    }

    /// A stub spy that returns absence until configured.
    pub fn stub(&self) -> Spy {
        self.stub_named("stub")
    }

    pub fn stub_named(&self, name: impl Into<String>) -> Spy {
        self.register(Spy::new(name))
    }

    /// A spy whose behavior is the fake `body`.
    pub(crate) fn fake(&self, name: impl Into<String>, body: Function) -> Spy {
        self.register(Spy::faking(name, body))
    }

    /// A call-through spy around an existing member value.
    pub(crate) fn call_through(&self, name: impl Into<String>, original: Value) -> Spy {
        self.register(Spy::call_through(name, original))
    }

    pub(crate) fn register(&self, spy: Spy) -> Spy {
        self.push(Owned::Spy(spy.clone()));
        spy
    }

    /// Write `value` over `owner[name]` until `restore()`.
    ///
    /// A spy not installed anywhere yet records the installation itself, so
    /// `Spy::restore` reverts it too. Any other value is reverted by the
    /// sandbox.
    pub(crate) fn install(&self, owner: &ObjectRef, name: &str, value: Value) {
        let installation = Installation::capture(owner, name);
        installation.apply(value.clone());
        tracing::trace!(member = name, hidden = installation.hidden, "installed member in place");

        match value {
            Value::Spy(spy) if !spy.is_installed() => spy.attach(installation),
            value => self.push(Owned::Member {
                installation,
                value,
            }),
        }
    }

    fn push(&self, owned: Owned) {
        self.0.restored.set(false);
        self.0.owned.borrow_mut().push(owned);
    }

    /// Number of spies awaiting restoration.
    pub fn spy_count(&self) -> usize {
        self.0
            .owned
            .borrow()
            .iter()
            .filter(|owned| matches!(owned, Owned::Spy(_)))
            .count()
    }

    /// Whether `restore()` ran and no spy was registered since.
    pub fn is_restored(&self) -> bool {
        self.0.restored.get()
    }

    /// Deactivate and revert every owned spy.
    pub fn restore(&self) {
        if self.0.restored.get() {
            return;
        }

        let owned = std::mem::take(&mut *self.0.owned.borrow_mut());
        let count = owned.len();
        for entry in owned.iter().rev() {
            match entry {
                Owned::Spy(spy) => spy.restore(),
                Owned::Member {
                    installation,
                    value,
                } => {
                    installation.revert(value);
                }
            }
        }

        self.0.restored.set(true);
        tracing::debug!(entries = count, "sandbox restored");
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sandbox")
            .field("owned", &self.0.owned.try_borrow().map(|o| o.len()).ok())
            .field("restored", &self.0.restored.get())
            .finish()
    }
}
