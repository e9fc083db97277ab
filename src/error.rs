//! Error types for stubkit.
//!
//! Uses thiserror for derive macros. The member-resolution path never fails;
//! these variants cover misuse of the method facade, calls on values that
//! cannot be invoked, and errors raised by fakes or configured behaviors.

use crate::value::Value;
use thiserror::Error;

/// Main error type for stubkit operations.
#[derive(Error, Debug)]
pub enum StubError {
    /// A spy configured with `throws`, or a fake, raised a value.
    #[error("thrown: {0}")]
    Thrown(Value),

    /// A deferred value settled as rejected.
    #[error("deferred value rejected with {0}")]
    Rejected(Value),

    /// A thenable never called either of its settlement callbacks.
    #[error("thenable never settled")]
    Unsettled,

    /// Attempted to call something that is not callable.
    #[error("{what} is not callable")]
    NotCallable { what: String },

    /// The named member does not exist on the owner or its delegation chain.
    #[error("cannot wrap non-existent member '{member}'")]
    NoSuchMember { member: String },

    /// The named member is already an active spy.
    #[error("member '{member}' is already wrapped")]
    AlreadyWrapped { member: String },

    /// Invalid configuration or matcher.
    #[error("{0}")]
    Config(String),

    /// Arbitrary error raised from a fake implementation.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StubError {
    /// Stable snake_case label for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            StubError::Thrown(_) => "thrown",
            StubError::Rejected(_) => "rejected",
            StubError::Unsettled => "unsettled",
            StubError::NotCallable { .. } => "not_callable",
            StubError::NoSuchMember { .. } => "no_such_member",
            StubError::AlreadyWrapped { .. } => "already_wrapped",
            StubError::Config(_) => "config",
            StubError::Other(_) => "other",
        }
    }

    /// Shorthand for raising a value from inside a fake.
    pub fn thrown(value: impl Into<Value>) -> Self {
        StubError::Thrown(value.into())
    }
}

/// Result type alias for stubkit operations.
pub type Result<T> = std::result::Result<T, StubError>;
