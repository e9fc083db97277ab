//! Stub construction and member interception.
//!
//! Builders:
//! - [`stub_interface`]: no instance; every member is materialized lazily
//! - [`stub_object`] / [`stub_object_with`]: wraps a concrete instance
//! - [`stub_callable`]: an invocable stub that also carries named members
//!
//! Facade and bridge:
//! - [`stub_method`] / [`spy_method`]: replace or observe one named member
//! - [`from_stub`]: the stub as a [`Value`](crate::value::Value), same identity
//!
//! All member reads go through [`Stub::get`], which applies override
//! precedence, idempotent materialization and the identity-sensitive name
//! exclusion.

mod bridge;
mod builders;
mod intercept;
mod method;
mod normalize;
mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use bridge::from_stub;
pub use builders::{ObjectStubOptions, stub_callable, stub_interface, stub_object, stub_object_with};
pub use method::{spy_method, stub_method};
pub use normalize::{OverrideEntry, Overrides};
pub use types::{Contract, Dynamic, Stub};
