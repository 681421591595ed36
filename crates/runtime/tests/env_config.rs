//! `InvokerConfig::from_env` against the real process environment.
//!
//! Everything runs in a single test so no other test observes the variable
//! while it is set.

use std::time::Duration;

use pretty_assertions::assert_eq;
use relay_runtime::{InvokerConfig, TIMEOUT_ENV};

fn set(value: &str) {
    unsafe { std::env::set_var(TIMEOUT_ENV, value) };
}

#[test]
fn from_env_reads_default_timeout() {
    assert_eq!(TIMEOUT_ENV, "RELAY_INVOKE_TIMEOUT_MS");

    unsafe { std::env::remove_var(TIMEOUT_ENV) };
    assert_eq!(InvokerConfig::from_env().default_timeout, None);

    set("1500");
    assert_eq!(
        InvokerConfig::from_env().default_timeout,
        Some(Duration::from_millis(1500))
    );

    set(" 250 ");
    assert_eq!(
        InvokerConfig::from_env().default_timeout,
        Some(Duration::from_millis(250))
    );

    // zero means unbounded
    set("0");
    assert_eq!(InvokerConfig::from_env().default_timeout, None);

    // invalid values are ignored
    set("soon");
    assert_eq!(InvokerConfig::from_env(), InvokerConfig::default());

    unsafe { std::env::remove_var(TIMEOUT_ENV) };
}
