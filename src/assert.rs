//! Panicking assertions over spies.
//!
//! Failure messages list every recorded call, e.g.:
//!
//! ```text
//! expected Repository.save to be called once but it was called 2 times
//!     Repository.save("a") => absent
//!     Repository.save("b") => absent
//! ```

use crate::spy::Spy;
use crate::value::Value;

#[track_caller]
pub fn assert_called(spy: &Spy) {
    if spy.not_called() {
        panic!("expected {} to be called\n{}", spy.name(), spy.format_calls());
    }
}

#[track_caller]
pub fn assert_not_called(spy: &Spy) {
    if spy.called() {
        panic!(
            "expected {} not to be called but it was called {} times\n{}",
            spy.name(),
            spy.call_count(),
            spy.format_calls()
        );
    }
}

#[track_caller]
pub fn assert_called_once(spy: &Spy) {
    assert_call_count(spy, 1);
}

#[track_caller]
pub fn assert_call_count(spy: &Spy, expected: usize) {
    let actual = spy.call_count();
    if actual != expected {
        let wanted = match expected {
            1 => "once".to_string(),
            2 => "twice".to_string(),
            n => format!("{} times", n),
        };
        panic!(
            "expected {} to be called {} but it was called {} times\n{}",
            spy.name(),
            wanted,
            actual,
            spy.format_calls()
        );
    }
}

/// Passes when some call started with `expected`.
#[track_caller]
pub fn assert_called_with(spy: &Spy, expected: &[Value]) {
    if !spy.called_with(expected) {
        let args: Vec<String> = expected.iter().map(Value::describe).collect();
        panic!(
            "expected {} to be called with ({})\n{}",
            spy.name(),
            args.join(", "),
            spy.format_calls()
        );
    }
}
