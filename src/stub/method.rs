//! Method spy facade: replace or observe one named member of an object.
//!
//! The owner may be an instance or a shared method table (a prototype). The
//! member is addressed by name, so hidden members that no public surface
//! exposes can be replaced too: every instance delegating to the table then
//! observes the spy.

use crate::error::{Result, StubError};
use crate::sandbox::Sandbox;
use crate::spy::Spy;
use crate::value::{ObjectRef, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Answer absence until configured.
    Replace,
    /// Record, then delegate to the original.
    Observe,
}

/// Replace `owner[name]` with a fresh spy returning absence until configured.
///
/// # Errors
///
/// * `StubError::NoSuchMember` - `name` is not found on the owner or its chain
/// * `StubError::AlreadyWrapped` - the member is already an active spy
pub fn stub_method(sandbox: &Sandbox, owner: &ObjectRef, name: &str) -> Result<Spy> {
    install(sandbox, owner, name, Mode::Replace)
}

/// Wrap `owner[name]` in a spy that records calls and delegates to the
/// original implementation.
///
/// # Errors
///
/// * `StubError::NoSuchMember` - `name` is not found on the owner or its chain
/// * `StubError::NotCallable` - the member is not a function
/// * `StubError::AlreadyWrapped` - the member is already an active spy
pub fn spy_method(sandbox: &Sandbox, owner: &ObjectRef, name: &str) -> Result<Spy> {
    install(sandbox, owner, name, Mode::Observe)
}

fn install(sandbox: &Sandbox, owner: &ObjectRef, name: &str, mode: Mode) -> Result<Spy> {
    let current = owner.lookup(name).ok_or_else(|| StubError::NoSuchMember {
        member: name.to_string(),
    })?;

    if let Value::Spy(existing) = &current
        && existing.is_active()
    {
        return Err(StubError::AlreadyWrapped {
            member: name.to_string(),
        });
    }

    let spy = match mode {
        Mode::Replace => sandbox.stub_named(name),
        Mode::Observe => {
            if !current.is_callable() {
                return Err(StubError::NotCallable {
                    what: format!("member '{}' ({})", name, current.type_name()),
                });
            }
            sandbox.call_through(name, current)
        }
    };

    sandbox.install(owner, name, Value::Spy(spy.clone()));
    tracing::debug!(member = name, ?mode, "installed method spy");

    Ok(spy)
}
