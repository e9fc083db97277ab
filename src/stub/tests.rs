//! Tests for stub construction and member interception.

use super::*;
use crate::config::StubConfig;
use crate::deferred::settle;
use crate::error::StubError;
use crate::sandbox::Sandbox;
use crate::test_support::{
    Empty, Repository, Sample, layered_instance, sample_instance, service_instance, service_table,
};
use crate::value::{Function, ObjectRef, Value};

// =========================================================================
// Helper functions
// =========================================================================

fn sandbox_with(config: StubConfig) -> Sandbox {
    Sandbox::with_config(config).unwrap()
}

fn text(value: &str) -> Value {
    Value::from(value)
}

// =========================================================================
// Member interception
// =========================================================================

#[test]
fn test_materialization_is_idempotent() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Repository>(&sandbox, Overrides::new());

    let first = stub.get("find");
    let second = stub.get("find");
    assert!(first.as_spy().is_some());
    assert_eq!(first, second);

    stub.call_member("find", &[1.into()]).unwrap();
    stub.call_member("find", &[2.into()]).unwrap();

    let spy = stub.spy("find").unwrap();
    assert!(spy.called_twice());
    assert!(spy.called_with(&[2.into()]));
    assert_eq!(stub.materialized(), vec!["find".to_string()]);
}

#[test]
fn test_materialized_spies_are_named_after_the_member() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Repository>(&sandbox, Overrides::new());

    assert_eq!(stub.spy("save").unwrap().name(), "Repository.save");
}

#[test]
fn test_override_takes_precedence_over_materialization() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Repository>(
        &sandbox,
        Overrides::new().with_fn("find", |_, args| Ok(format!("found {}", args[0]).into())),
    );

    assert!(stub.has_override("find"));
    let result = stub.call_member("find", &[7.into()]).unwrap();
    assert_eq!(result, text("found 7"));

    // Still the same override spy, and nothing was materialized for it
    let spy = stub.spy("find").unwrap();
    assert!(spy.called_once());
    assert_eq!(stub.get("find"), Value::Spy(spy));
    assert!(stub.materialized().is_empty());
}

#[test]
fn test_supplied_spy_is_kept() {
    let sandbox = Sandbox::new();
    let save = sandbox.stub_named("save");
    save.returns(true);

    let stub = stub_interface::<Repository>(&sandbox, Overrides::new().with("save", save.clone()));

    assert!(stub.spy("save").unwrap().ptr_eq(&save));
    assert_eq!(stub.call_member("save", &[]).unwrap(), Value::from(true));
    assert!(save.called_once());
}

#[test]
fn test_data_override_is_stored_verbatim() {
    let sandbox = Sandbox::new();
    let handle = ObjectRef::builtin("Socket");
    let stub = stub_interface::<Empty>(
        &sandbox,
        Overrides::new()
            .with("limit", 10)
            .with("name", "repo")
            .with("socket", handle.clone()),
    );

    assert_eq!(stub.get("limit"), Value::from(10));
    assert_eq!(stub.get("name"), text("repo"));
    assert_eq!(stub.get("socket"), Value::Object(handle));
    assert!(matches!(
        stub.call_member("limit", &[]),
        Err(StubError::NotCallable { .. })
    ));
}

#[test]
fn test_nested_override_is_stubbed_recursively() {
    let sandbox = Sandbox::new();
    let settings = ObjectRef::plain()
        .with("retries", 3)
        .with_method("reload", |_, _| Ok(Value::from("reloaded")));
    let stub = stub_interface::<Empty>(&sandbox, Overrides::new().with("settings", settings));

    let nested = stub.nested("settings").expect("nested stub");
    assert_eq!(nested.label(), "Empty.settings");
    assert_eq!(nested.get("retries"), Value::from(3));
    assert_eq!(nested.call_member("reload", &[]).unwrap(), text("reloaded"));
    assert!(nested.spy("reload").unwrap().called_once());

    // Unknown names on the nested stub materialize lazily as well
    assert!(nested.get("flush").as_spy().is_some());

    // The nested stub is stable across reads
    assert!(stub.nested("settings").unwrap().ptr_eq(&nested));
}

#[test]
fn test_nested_overrides_stop_at_configured_depth() {
    let sandbox = Sandbox::new();
    let inner = ObjectRef::plain().with("level", 2);
    let outer = ObjectRef::plain().with("inner", inner.clone());
    let stub = stub_interface::<Empty>(&sandbox, Overrides::new().with("outer", outer));

    let nested = stub.nested("outer").unwrap();
    assert_eq!(nested.get("inner"), Value::Object(inner));

    let flat = sandbox_with(StubConfig {
        nested_depth: 0,
        ..Default::default()
    });
    let settings = ObjectRef::plain().with("retries", 3);
    let stub = stub_interface::<Empty>(&flat, Overrides::new().with("settings", settings.clone()));
    assert_eq!(stub.get("settings"), Value::Object(settings));
}

#[test]
fn test_zero_member_contract_materializes_any_name() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Empty>(&sandbox, Overrides::new());
    assert!(stub.declared_members().is_empty());

    let result = stub.call_member("m", &[text("x")]).unwrap();

    assert_eq!(result, Value::Absent);
    let m = stub.spy("m").unwrap();
    assert!(m.called_once());
    assert!(m.called_with(&[text("x")]));
}

#[test]
fn test_strict_contracts_still_materialize_undeclared_members() {
    let sandbox = sandbox_with(StubConfig {
        strict_contracts: true,
        ..Default::default()
    });
    let stub = stub_interface::<Repository>(&sandbox, Overrides::new());

    assert!(stub.get("purge").as_spy().is_some());
    assert_eq!(stub.declared_members(), &["find", "save"]);
}

#[test]
fn test_member_spies_are_restored_with_the_sandbox() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Repository>(
        &sandbox,
        Overrides::new().with_fn("find", |_, _| Ok(Value::Null)),
    );
    let save = stub.spy("save").unwrap();
    let find = stub.spy("find").unwrap();

    sandbox.restore();

    assert!(!save.is_active());
    assert!(!find.is_active());
}

// =========================================================================
// Deferred-value non-collision
// =========================================================================

#[test]
fn test_interface_stub_is_not_mistaken_for_a_deferred_value() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Repository>(&sandbox, Overrides::new());

    assert_eq!(stub.get("then"), Value::Absent);
    assert!(stub.materialized().is_empty());

    let settled = settle(&from_stub(&stub)).unwrap();
    assert!(settled.as_stub().unwrap().ptr_eq(&stub));
}

#[test]
fn test_deferred_vocabulary_members_do_not_make_a_stub_thenable() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Empty>(&sandbox, Overrides::new());

    // `catch` and `finally` are ordinary members and get materialized
    assert!(stub.get("catch").as_spy().is_some());
    assert!(stub.get("finally").as_spy().is_some());

    let settled = settle(&from_stub(&stub)).unwrap();
    assert!(settled.as_stub().unwrap().ptr_eq(&stub));
    assert!(stub.spy("catch").unwrap().not_called());
}

#[test]
fn test_explicit_then_override_makes_a_stub_thenable() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Empty>(
        &sandbox,
        Overrides::new().with_fn("then", |_, args| {
            args[0].call(&Value::Absent, &[Value::from("resolved")])
        }),
    );

    assert_eq!(settle(&from_stub(&stub)).unwrap(), text("resolved"));
    assert!(stub.spy("then").unwrap().called_once());
}

#[test]
fn test_configured_deferred_hooks_are_suppressed() {
    let sandbox = sandbox_with(StubConfig {
        deferred_hooks: vec!["then".to_string(), "subscribe".to_string()],
        ..Default::default()
    });
    let stub = stub_interface::<Empty>(&sandbox, Overrides::new());

    assert_eq!(stub.get("subscribe"), Value::Absent);
    assert!(stub.materialized().is_empty());
}

#[test]
fn test_object_stub_is_not_mistaken_for_a_deferred_value() {
    let sandbox = Sandbox::new();
    let instance = sample_instance().with_method("then", |_, args| {
        args[0].call(&Value::Absent, &[Value::from("instance")])
    });
    let stub = stub_object::<Sample>(&sandbox, &instance, Overrides::new());

    assert_eq!(stub.get("then"), Value::Absent);
    let settled = settle(&from_stub(&stub)).unwrap();
    assert!(settled.as_stub().unwrap().ptr_eq(&stub));
}

#[test]
fn test_resolves_passes_deferred_through_opaquely() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Repository>(&sandbox, Overrides::new());
    stub.spy("find").unwrap().resolves("row");

    let result = stub.call_member("find", &[]).unwrap();
    assert!(result.as_deferred().is_some());
    assert_eq!(settle(&result).unwrap(), text("row"));
}

// =========================================================================
// Callable stubs
// =========================================================================

#[test]
fn test_callable_stub_with_members() {
    let sandbox = Sandbox::new();
    let stub = stub_callable(
        &sandbox,
        Overrides::new().with_fn("foo", |_, _| Ok(Value::from("ret2"))),
        Some(Function::new("impl", |_, _| Ok(Value::from("ret1")))),
    );

    assert_eq!(stub.invoke(&[]).unwrap(), text("ret1"));
    assert_eq!(stub.call_member("foo", &[]).unwrap(), text("ret2"));

    assert!(stub.invocation().unwrap().called_once());
    assert!(stub.spy("foo").unwrap().called_once());
}

#[test]
fn test_callable_histories_are_independent() {
    let sandbox = Sandbox::new();
    let stub = stub_callable(&sandbox, Overrides::new(), None);

    stub.invoke(&[1.into()]).unwrap();
    stub.invoke(&[2.into()]).unwrap();
    stub.call_member("bar", &[]).unwrap();

    let invocation = stub.invocation().unwrap();
    assert!(invocation.called_twice());
    assert!(stub.spy("bar").unwrap().called_once());
    assert!(invocation.called_with(&[2.into()]));
}

#[test]
fn test_callable_results_are_configured_independently() {
    let sandbox = Sandbox::new();
    let stub = stub_callable(&sandbox, Overrides::new(), None);

    assert_eq!(stub.invoke(&[]).unwrap(), Value::Absent);

    stub.invocation().unwrap().returns("called");
    stub.spy("member").unwrap().returns("member");

    assert_eq!(stub.invoke(&[]).unwrap(), text("called"));
    assert_eq!(stub.call_member("member", &[]).unwrap(), text("member"));
}

#[test]
fn test_callable_stub_is_callable_as_a_value() {
    let sandbox = Sandbox::new();
    let stub = stub_callable(&sandbox, Overrides::new(), Some(Function::returning(5)));

    let value = from_stub(&stub);
    assert!(value.is_callable());
    assert_eq!(value.call(&Value::Absent, &[]).unwrap(), Value::from(5));
    assert_eq!(value.get("then"), Value::Absent);
}

#[test]
fn test_non_callable_stub_cannot_be_invoked() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Repository>(&sandbox, Overrides::new());

    assert!(!stub.is_callable());
    assert!(stub.invocation().is_none());
    let err = stub.invoke(&[]).unwrap_err();
    assert!(matches!(err, StubError::NotCallable { .. }));
}

#[test]
fn test_callable_fake_errors_propagate() {
    let sandbox = Sandbox::new();
    let stub = stub_callable(
        &sandbox,
        Overrides::new(),
        Some(Function::anonymous(|_, _| Err(StubError::thrown("fail")))),
    );

    let err = stub.invoke(&[]).unwrap_err();
    assert!(matches!(err, StubError::Thrown(ref v) if *v == text("fail")));
    assert!(stub.invocation().unwrap().last_call().unwrap().threw());
}

// =========================================================================
// Object stubs
// =========================================================================

#[test]
fn test_object_stub_calls_through_with_instance_state() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();
    let stub = stub_object::<Sample>(&sandbox, &instance, Overrides::new());

    assert_eq!(stub.call_member("normalMethod", &[]).unwrap(), text("normal:true"));
    assert!(stub.spy("normalMethod").unwrap().called_once());
}

#[test]
fn test_object_stub_override_observes_live_instance_state() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();
    let stub = stub_object::<Sample>(
        &sandbox,
        &instance,
        Overrides::new().with_fn("normalMethod", |this, _| {
            Ok(format!("override:{}", this.get("property").get("value")).into())
        }),
    );

    assert_eq!(stub.call_member("normalMethod", &[]).unwrap(), text("override:true"));

    // Mutate the instance after the stub was built
    let property = instance.get("property");
    property.as_object().unwrap().set("value", false);

    assert_eq!(stub.call_member("normalMethod", &[]).unwrap(), text("override:false"));
    assert!(stub.spy("normalMethod").unwrap().called_twice());
}

#[test]
fn test_object_stub_override_is_seen_by_sibling_methods() {
    let sandbox = Sandbox::new();
    let instance = layered_instance();
    let stub = stub_object::<Empty>(
        &sandbox,
        &instance,
        Overrides::new().with_fn("inner", |_, _| Ok(Value::from("override"))),
    );

    assert_eq!(stub.call_member("outer", &[]).unwrap(), text("outer:override"));
    assert_eq!(instance.call_method("outer", &[]).unwrap(), text("outer:override"));

    let inner = stub.spy("inner").unwrap();
    assert!(inner.called_twice());
    assert!(stub.spy("outer").unwrap().called_twice());

    sandbox.restore();
    assert_eq!(instance.call_method("outer", &[]).unwrap(), text("outer:real"));
    assert!(inner.called_twice());
}

#[test]
fn test_object_stub_auto_spies_record_calls_made_through_this() {
    let sandbox = Sandbox::new();
    let instance = layered_instance();
    let stub = stub_object::<Empty>(&sandbox, &instance, Overrides::new());

    assert_eq!(stub.call_member("outer", &[1.into()]).unwrap(), text("outer:real"));

    let inner = stub.spy("inner").unwrap();
    assert!(inner.called_once());
    assert!(inner.called_with(&[1.into()]));
    assert!(stub.spy("outer").unwrap().called_before(&inner));
}

#[test]
fn test_object_stub_installation_keeps_other_instances_intact() {
    let sandbox = Sandbox::new();
    let instance = layered_instance();
    let prototype = instance.prototype().unwrap();
    let sibling = ObjectRef::instance_of("Layered", &prototype);

    stub_object::<Empty>(
        &sandbox,
        &instance,
        Overrides::new().with_fn("inner", |_, _| Ok(Value::from("override"))),
    );

    assert_eq!(sibling.call_method("outer", &[]).unwrap(), text("outer:real"));
    assert!(prototype.get("inner").as_function().is_some());
}

#[test]
fn test_object_stub_keeps_hidden_members_hidden() {
    let sandbox = Sandbox::new();
    let table = service_table();
    let instance = service_instance(&table);

    stub_object_with::<Empty>(
        &sandbox,
        &instance,
        Overrides::new(),
        ObjectStubOptions::new().include_hidden("hidden"),
    );

    assert!(instance.has_own("hidden"));
    assert!(instance.is_hidden("hidden"));
    assert!(!instance.keys().contains(&"hidden".to_string()));

    sandbox.restore();
    assert!(!instance.has_own("hidden"));
}

#[test]
fn test_object_stub_does_not_keep_instance_alive() {
    let sandbox = Sandbox::new();
    let instance = layered_instance();
    let stub = stub_object::<Empty>(&sandbox, &instance, Overrides::new());
    let inner = stub.spy("inner").unwrap();
    drop(stub);
    drop(instance);

    // The receiver is gone, so the caller's receiver is used instead
    let this = ObjectRef::plain();
    assert_eq!(inner.invoke(&Value::Object(this.clone()), &[]).unwrap(), text("real"));
    assert_eq!(inner.last_call().unwrap().this, Value::Object(this));

    sandbox.restore();
    assert!(!inner.is_active());
}

#[test]
fn test_object_stub_spy_receiver_is_the_instance() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();
    let stub = stub_object::<Sample>(&sandbox, &instance, Overrides::new());

    stub.call_member("normalMethod", &[]).unwrap();

    let call = stub.spy("normalMethod").unwrap().first_call().unwrap();
    assert_eq!(call.this, Value::Object(instance));
}

#[test]
fn test_object_stub_copies_data_by_reference() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();
    let stub = stub_object::<Sample>(&sandbox, &instance, Overrides::new());

    assert_eq!(stub.get("count"), Value::from(3));

    // Built-in shaped values are not stubbed, just shared
    let created = stub.get("created");
    assert_eq!(created, instance.get("created"));
    assert!(created.as_object().is_some());
}

#[test]
fn test_object_stub_stubs_plain_members_one_level() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();
    let stub = stub_object::<Sample>(&sandbox, &instance, Overrides::new());

    let property = stub.nested("property").expect("nested stub");
    assert_eq!(property.get("value"), Value::from(true));
    assert!(property.instance().unwrap().ptr_eq(instance.get("property").as_object().unwrap()));
}

#[test]
fn test_object_stub_nested_depth_option() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();
    let stub = stub_object_with::<Sample>(
        &sandbox,
        &instance,
        Overrides::new(),
        ObjectStubOptions::new().nested_depth(0),
    );

    assert_eq!(stub.get("property"), instance.get("property"));
}

#[test]
fn test_object_stub_unknown_member_is_absent_by_default() {
    let sandbox = Sandbox::new();
    let stub = stub_object::<Sample>(&sandbox, &sample_instance(), Overrides::new());

    assert_eq!(stub.get("missing"), Value::Absent);
    assert!(!stub.materialized().contains(&"missing".to_string()));
}

#[test]
fn test_object_stub_lazy_members_when_configured() {
    let sandbox = sandbox_with(StubConfig {
        lazy_object_members: true,
        ..Default::default()
    });
    let stub = stub_object::<Sample>(&sandbox, &sample_instance(), Overrides::new());

    let missing = stub.get("missing");
    assert!(missing.as_spy().is_some());
    assert_eq!(stub.get("missing"), missing);
}

#[test]
fn test_object_stub_hidden_members_require_naming() {
    let sandbox = Sandbox::new();
    let table = service_table();
    let instance = service_instance(&table);

    let stub = stub_object::<Empty>(&sandbox, &instance, Overrides::new());
    assert_eq!(stub.get("hidden"), Value::Absent);
    assert!(stub.spy("lookup").is_some());
    assert_eq!(stub.get("region"), text("eu"));

    let stub = stub_object_with::<Empty>(
        &sandbox,
        &instance,
        Overrides::new(),
        ObjectStubOptions::new().include_hidden("hidden"),
    );
    assert_eq!(stub.call_member("hidden", &[]).unwrap(), text("12345"));
    assert!(stub.spy("hidden").unwrap().called_once());

    let stub = stub_object_with::<Empty>(
        &sandbox,
        &instance,
        Overrides::new(),
        ObjectStubOptions::new().include_all_hidden(),
    );
    assert!(stub.spy("hidden").is_some());
}

#[test]
fn test_object_stub_data_override_is_written_in_place() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();
    let stub = stub_object::<Sample>(
        &sandbox,
        &instance,
        Overrides::new().with("count", 99),
    );

    assert_eq!(stub.get("count"), Value::from(99));
    assert_eq!(instance.get("count"), Value::from(99));

    sandbox.restore();
    assert_eq!(instance.get("count"), Value::from(3));
}

#[test]
fn test_object_stub_spies_are_restored_with_the_sandbox() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();
    let stub = stub_object::<Sample>(&sandbox, &instance, Overrides::new());
    let spy = stub.spy("normalMethod").unwrap();
    assert!(instance.has_own("normalMethod"));

    sandbox.restore();

    assert!(!spy.is_active());
    assert!(!instance.has_own("normalMethod"));
    assert!(instance.get("normalMethod").as_function().is_some());
    // A restored call-through spy still runs the original, unrecorded
    assert_eq!(stub.call_member("normalMethod", &[]).unwrap(), text("normal:true"));
    assert!(spy.not_called());
}

// =========================================================================
// Method spy facade
// =========================================================================

#[test]
fn test_stub_method_on_shared_table_hidden_member() {
    let sandbox = Sandbox::new();
    let table = service_table();
    let instance = service_instance(&table);

    let hidden = stub_method(&sandbox, &table, "hidden").unwrap();
    hidden.returns("45678");

    assert_eq!(instance.call_method("lookup", &[]).unwrap(), text("45678"));
    assert!(hidden.called_once());
    assert!(table.is_hidden("hidden"));

    sandbox.restore();
    assert_eq!(instance.call_method("lookup", &[]).unwrap(), text("12345"));
    assert!(table.is_hidden("hidden"));
    assert!(table.get_own("hidden").unwrap().as_function().is_some());
}

#[test]
fn test_stub_method_defaults_to_absent() {
    let sandbox = Sandbox::new();
    let table = service_table();

    let spy = stub_method(&sandbox, &table, "lookup").unwrap();
    let instance = service_instance(&table);

    assert_eq!(instance.call_method("lookup", &["k".into()]).unwrap(), Value::Absent);
    assert!(spy.called_with(&["k".into()]));
}

#[test]
fn test_spy_method_preserves_behavior() {
    let sandbox = Sandbox::new();
    let table = service_table();
    let instance = service_instance(&table);

    let spy = spy_method(&sandbox, &table, "hidden").unwrap();

    assert_eq!(instance.call_method("lookup", &[]).unwrap(), text("12345"));
    assert!(spy.called_once());
    assert_eq!(spy.first_call().unwrap().this, Value::Object(instance));
}

#[test]
fn test_stub_method_on_inherited_member_shadows_then_unshadows() {
    let sandbox = Sandbox::new();
    let table = service_table();
    let instance = service_instance(&table);

    let spy = stub_method(&sandbox, &instance, "lookup").unwrap();
    spy.returns("own");
    assert!(instance.has_own("lookup"));
    assert_eq!(instance.call_method("lookup", &[]).unwrap(), text("own"));

    // Other instances sharing the table are unaffected
    let other = service_instance(&table);
    assert_eq!(other.call_method("lookup", &[]).unwrap(), text("12345"));

    sandbox.restore();
    assert!(!instance.has_own("lookup"));
    assert_eq!(instance.call_method("lookup", &[]).unwrap(), text("12345"));
}

#[test]
fn test_method_facade_errors() {
    let sandbox = Sandbox::new();
    let table = service_table();
    let instance = service_instance(&table);

    let err = stub_method(&sandbox, &table, "nope").unwrap_err();
    assert!(matches!(err, StubError::NoSuchMember { ref member } if member == "nope"));

    let err = spy_method(&sandbox, &instance, "region").unwrap_err();
    assert!(matches!(err, StubError::NotCallable { .. }));

    stub_method(&sandbox, &table, "hidden").unwrap();
    let err = spy_method(&sandbox, &table, "hidden").unwrap_err();
    assert!(matches!(err, StubError::AlreadyWrapped { .. }));

    // Once restored the member can be wrapped again
    sandbox.restore();
    assert!(spy_method(&sandbox, &table, "hidden").is_ok());
}

#[test]
fn test_stub_method_can_replace_data_members() {
    let sandbox = Sandbox::new();
    let instance = service_instance(&service_table());

    let spy = stub_method(&sandbox, &instance, "region").unwrap();
    spy.returns("us");
    assert_eq!(instance.call_method("region", &[]).unwrap(), text("us"));

    sandbox.restore();
    assert_eq!(instance.get("region"), text("eu"));
}

// =========================================================================
// Identity
// =========================================================================

#[test]
fn test_stub_identity_is_stable() {
    let sandbox = Sandbox::new();
    let stub = stub_interface::<Repository>(&sandbox, Overrides::new());

    let erased = stub.erase();
    let retyped = erased.retype::<Repository>();

    assert!(erased.ptr_eq(&stub));
    assert!(retyped.ptr_eq(&stub));
    assert_eq!(retyped.label(), "Repository");
    assert_eq!(erased.get("find"), stub.get("find"));
    assert_eq!(Value::from(stub.clone()), from_stub(&stub));
}

#[test]
fn test_separate_constructions_do_not_share_identity() {
    let sandbox = Sandbox::new();
    let instance = sample_instance();

    let a = stub_object::<Sample>(&sandbox, &instance, Overrides::new());
    let b = stub_object::<Sample>(&sandbox, &instance, Overrides::new());

    assert!(!a.ptr_eq(&b));
    assert_ne!(a.get("normalMethod"), b.get("normalMethod"));
}
