//! Argument matchers for `called_with_match`.

use crate::error::{Result, StubError};
use crate::value::Value;
use regex::Regex;
use std::fmt;
use std::rc::Rc;

/// A predicate over one call argument.
#[derive(Clone)]
pub enum Matcher {
    /// Matches anything, including absence.
    Any,
    /// Matches a value equal to this one.
    Eq(Value),
    /// Matches values whose `type_name()` equals this label.
    TypeOf(&'static str),
    /// Matches string values the regex finds a match in.
    Regex(Regex),
    /// Matches values the predicate accepts.
    Predicate(Rc<dyn Fn(&Value) -> bool>),
}

impl Matcher {
    /// Compile a regex matcher.
    ///
    /// # Returns
    ///
    /// * `Err(StubError::Config)` - If the pattern fails to compile
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Matcher::Regex)
            .map_err(|e| StubError::Config(format!("invalid matcher regex '{}': {}", pattern, e)))
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        Matcher::Predicate(Rc::new(f))
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Matcher::Any => true,
            Matcher::Eq(expected) => value == expected,
            Matcher::TypeOf(name) => value.type_name() == *name,
            Matcher::Regex(regex) => value.as_str().is_some_and(|s| regex.is_match(s)),
            Matcher::Predicate(f) => f(value),
        }
    }
}

impl From<Value> for Matcher {
    fn from(value: Value) -> Self {
        Matcher::Eq(value)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Any => write!(f, "Any"),
            Matcher::Eq(value) => write!(f, "Eq({})", value.describe()),
            Matcher::TypeOf(name) => write!(f, "TypeOf({})", name),
            Matcher::Regex(regex) => write!(f, "Regex({})", regex.as_str()),
            Matcher::Predicate(_) => write!(f, "Predicate"),
        }
    }
}
