//! Spy engine for stubkit.
//!
//! A [`Spy`] is an invocable wrapper that records every call made through it
//! and answers with a configurable behavior:
//!
//! - `Default`: return absence
//! - `Returns` / `Throws`: a fixed result or raised value
//! - `Fake`: delegate to a caller-supplied function
//! - `CallThrough`: delegate to the original member it replaced
//!
//! Per-call behaviors (`on_call(n)`) take priority over the general behavior.
//!
//! # Restoration
//!
//! A spy installed over an object member remembers the owner's previous own
//! value. `restore()` puts it back (or removes the shadowing member when the
//! original was inherited) and deactivates the spy: a restored spy no longer
//! records calls, and only call-through spies keep delegating.

mod handle;
mod matcher;
mod types;


// Re-export public API
pub use handle::{OnCall, Spy};
pub use matcher::Matcher;
pub use types::{Behavior, CallRecord, Outcome};
pub(crate) use types::Installation;
