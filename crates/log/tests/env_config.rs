//! `Config::from_env` against the real process environment.
//!
//! Everything runs in a single test so no other test observes the variables
//! while they are set.

use pretty_assertions::assert_eq;
use relay_log::{Config, Format};

const VARS: [&str; 8] = [
    "RELAY_LOG",
    "RUST_LOG",
    "RELAY_LOG_FORMAT",
    "RELAY_LOG_COLORS",
    "RELAY_LOG_SOURCE",
    "RELAY_SERVICE",
    "RELAY_ENV",
    "RELAY_VERSION",
];

fn clear() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

fn set(var: &str, value: &str) {
    unsafe { std::env::set_var(var, value) };
}

#[test]
fn from_env_reads_level_format_and_fields() {
    clear();
    let config = Config::from_env();
    assert_eq!(config.level, "info");
    assert_eq!(config.format, Format::Compact);
    assert!(config.display.colors);
    assert!(config.fields.is_empty());

    // RUST_LOG is the fallback
    set("RUST_LOG", "warn");
    assert_eq!(Config::from_env().level, "warn");

    // RELAY_LOG wins over RUST_LOG
    set("RELAY_LOG", "relay=debug,info");
    assert_eq!(Config::from_env().level, "relay=debug,info");

    for (raw, expected) in [
        ("json", Format::Json),
        ("PRETTY", Format::Pretty),
        ("compact", Format::Compact),
        ("bogus", Format::Compact),
    ] {
        set("RELAY_LOG_FORMAT", raw);
        assert_eq!(Config::from_env().format, expected, "RELAY_LOG_FORMAT={raw}");
    }

    set("RELAY_LOG_COLORS", "off");
    set("RELAY_LOG_SOURCE", "yes");
    set("RELAY_SERVICE", "relay-host");
    let config = Config::from_env();
    assert!(!config.display.colors);
    assert!(config.display.source);
    assert_eq!(config.fields.service.as_deref(), Some("relay-host"));
    assert!(!config.fields.is_empty());

    clear();
}
