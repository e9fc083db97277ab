//! Dynamic value model for stubkit.
//!
//! Stubs operate on dynamically-shaped values rather than concrete Rust types:
//!
//! - [`Value`]: absent, null, booleans, numbers, strings, lists, and the
//!   reference-valued variants (objects, functions, spies, stubs, deferred values)
//! - [`ObjectRef`]: a shared property table with an optional delegation link
//!   (its prototype) and a set of hidden member names that are not enumerated
//! - [`Function`]: a native callable receiving `(this, args)`
//!
//! # Equality
//!
//! Data variants compare by value. Reference variants compare by identity, so
//! two reads that return "the same" spy or stub are `==` only when they share
//! the same allocation.

mod convert;
mod function;
mod object;
mod types;


// Re-export public API
pub use function::Function;
pub use object::{Object, ObjectKind, ObjectRef};
pub(crate) use object::WeakObjectRef;
pub use types::Value;
