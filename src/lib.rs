//! Stubkit: automatic stubs and spies over dynamically-shaped values.
//!
//! A stub stands in for a contract, a concrete instance, or a callable.
//! Member reads go through a single interceptor that hands out overrides
//! first, then previously materialized members, and otherwise creates a
//! recording spy on demand. Spies are owned by a [`Sandbox`] that reverts
//! every installation on `restore()`.
//!
//! ```
//! use stubkit::{Contract, Overrides, Sandbox, Value, stub_interface};
//!
//! struct Repository;
//!
//! impl Contract for Repository {
//!     const NAME: &'static str = "Repository";
//!     const MEMBERS: &'static [&'static str] = &["find", "save"];
//! }
//!
//! let sandbox = Sandbox::new();
//! let repo = stub_interface::<Repository>(&sandbox, Overrides::new());
//!
//! repo.spy("find").unwrap().returns("row");
//! assert_eq!(repo.call_member("find", &[1.into()]).unwrap(), Value::from("row"));
//! assert!(repo.spy("find").unwrap().called_with(&[1.into()]));
//!
//! sandbox.restore();
//! ```

pub mod assert;
pub mod config;
pub mod deferred;
pub mod error;
pub mod sandbox;
pub mod spy;
pub mod stub;
pub mod value;

#[cfg(test)]
mod test_support;

pub use config::StubConfig;
pub use deferred::{Deferred, Settlement, settle};
pub use error::{Result, StubError};
pub use sandbox::Sandbox;
pub use spy::{Matcher, Spy};
pub use stub::{
    Contract, Dynamic, ObjectStubOptions, Overrides, Stub, from_stub, spy_method, stub_callable,
    stub_interface, stub_method, stub_object, stub_object_with,
};
pub use value::{Function, ObjectKind, ObjectRef, Value};
