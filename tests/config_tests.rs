use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use oddsmith::config::Config;
use oddsmith::error::{ConfigError, Error};
use rust_decimal_macros::dec;

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("oddsmith-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn full_config_parses() {
    let toml = r#"
[network]
listen_addr = "0.0.0.0:9000"

[simulator]
tick_seconds = 3

[seed]
demo_balance = 2500
fixtures = false

[logging]
level = "debug"
format = "json"
"#;

    let path = write_temp_config(toml);
    let config = Config::load(&path).expect("config should parse");
    let _ = fs::remove_file(&path);

    assert_eq!(config.network.listen_addr, "0.0.0.0:9000");
    assert_eq!(config.simulator.tick_seconds, 3);
    assert_eq!(config.seed.demo_balance, dec!(2500));
    assert!(!config.seed.fixtures);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn config_rejects_a_zero_tick_interval() {
    let toml = r#"
[simulator]
tick_seconds = 0
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "tick_seconds",
            ..
        }))
    ));
}

#[test]
fn config_rejects_an_empty_listen_addr() {
    let toml = r#"
[network]
listen_addr = ""
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField {
            field: "listen_addr",
        }))
    ));
}

#[test]
fn config_rejects_a_negative_demo_balance() {
    let toml = r#"
[seed]
demo_balance = -5
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "demo_balance",
            ..
        }))
    ));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let mut missing = std::env::temp_dir();
    missing.push("oddsmith-config-test-definitely-missing.toml");

    let config = Config::load_or_default(&missing).expect("defaults should apply");
    assert_eq!(config.simulator.tick_seconds, 5);

    assert!(matches!(
        Config::load(&missing),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
