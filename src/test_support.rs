use crate::stub::Contract;
use crate::value::{ObjectRef, Value};

/// A contract with no declared members.
pub(crate) struct Empty;

impl Contract for Empty {
    const NAME: &'static str = "Empty";
}

pub(crate) struct Repository;

impl Contract for Repository {
    const NAME: &'static str = "Repository";
    const MEMBERS: &'static [&'static str] = &["find", "save"];
}

pub(crate) struct Sample;

impl Contract for Sample {
    const NAME: &'static str = "Sample";
    const MEMBERS: &'static [&'static str] = &["normalMethod", "property", "count"];
}

/// An instance of `Sample`:
///
/// ```text
/// property     = { value: true }      (plain object)
/// count        = 3
/// created      = Date                 (built-in)
/// normalMethod = "normal:" + this.property.value   (on the prototype)
/// ```
pub(crate) fn sample_instance() -> ObjectRef {
    let prototype = ObjectRef::plain().with_method("normalMethod", |this, _| {
        Ok(format!("normal:{}", this.get("property").get("value")).into())
    });

    ObjectRef::instance_of("Sample", &prototype)
        .with("property", ObjectRef::plain().with("value", true))
        .with("count", 3)
        .with("created", ObjectRef::builtin("Date"))
}

/// A shared method table whose public `lookup` delegates to the hidden
/// `hidden` method (which returns "12345").
pub(crate) fn service_table() -> ObjectRef {
    ObjectRef::plain()
        .with_method("lookup", |this, args| this.call_member("hidden", args))
        .with_hidden_method("hidden", |_, _| Ok(Value::from("12345")))
}

pub(crate) fn service_instance(table: &ObjectRef) -> ObjectRef {
    ObjectRef::instance_of("Service", table).with("region", "eu")
}

/// An instance whose public `outer` calls `inner` through its receiver:
/// `outer() = "outer:" + this.inner()`, `inner() = "real"`.
pub(crate) fn layered_instance() -> ObjectRef {
    let prototype = ObjectRef::plain()
        .with_method("outer", |this, args| {
            Ok(format!("outer:{}", this.call_member("inner", args)?).into())
        })
        .with_method("inner", |_, _| Ok(Value::from("real")));

    ObjectRef::instance_of("Layered", &prototype)
}
