mod common;

use common::temp_config;
use widget_rts::config::{Config, ConfigError, RuntimeConfig, UiConfig};
use widget_rts::update::Diagnostics;

/// Test that Config::default() produces the documented values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.runtime.redundant_update_warnings);
    assert!(!config.runtime.replace_warnings);
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.ui.app, "counter");
    assert!(!config.ui.outline);
    assert!(config.validate().is_ok());
}

/// Test that Config::config_path() returns a path ending with the expected filename.
#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("widget-rts/config.toml"));
}

/// Runtime settings map onto updater diagnostics.
#[test]
fn test_runtime_config_maps_to_diagnostics() {
    let runtime = RuntimeConfig {
        redundant_update_warnings: false,
        replace_warnings: true,
    };
    assert_eq!(
        runtime.diagnostics(),
        Diagnostics {
            redundant_updates: false,
            replacements: true,
        }
    );
    assert_eq!(RuntimeConfig::default().diagnostics(), Diagnostics::default());
}

/// Missing sections and keys fall back to defaults.
#[test]
fn test_load_partial_file() {
    let (_dir, path) = temp_config(
        r#"
[ui]
app = "panel"
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.ui.app, "panel");
    assert_eq!(config.ui.tick_rate_ms, 250);
    assert_eq!(config.runtime, RuntimeConfig::default());
}

/// Test loading a complete file.
#[test]
fn test_load_full_file() {
    let (_dir, path) = temp_config(
        r#"
[runtime]
redundant_update_warnings = false
replace_warnings = true

[ui]
tick_rate_ms = 100
app = "converter"
outline = true
"#,
    );
    let config = Config::load_from(&path).unwrap();
    assert_eq!(
        config,
        Config {
            runtime: RuntimeConfig {
                redundant_update_warnings: false,
                replace_warnings: true,
            },
            ui: UiConfig {
                tick_rate_ms: 100,
                app: "converter".to_string(),
                outline: true,
            },
        }
    );
}

/// Test that an unknown application name fails validation.
#[test]
fn test_unknown_app_rejected() {
    let (_dir, path) = temp_config("[ui]\napp = \"tetris\"\n");
    let err = Config::load_from(&path).unwrap_err();
    match err {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("tetris"));
            assert!(message.contains("counter, converter, panel"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

/// Test that the tick rate is bounded.
#[test]
fn test_tick_rate_bounds() {
    for (tick, ok) in [(15, false), (16, true), (5000, true), (5001, false)] {
        let mut config = Config::default();
        config.ui.tick_rate_ms = tick;
        assert_eq!(config.validate().is_ok(), ok, "tick_rate_ms = {tick}");
    }
}

/// Test that malformed TOML is reported as a parse error.
#[test]
fn test_malformed_toml() {
    let (_dir, path) = temp_config("[ui\napp = ");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

/// Test that a missing file is reported as a read error.
#[test]
fn test_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ReadError { .. })
    ));
}

/// The TOML rendering loads back to the same configuration.
#[test]
fn test_to_toml_reloads() {
    let mut config = Config::default();
    config.ui.outline = true;
    let (_dir, path) = temp_config(&config.to_toml().unwrap());
    assert_eq!(Config::load_from(&path).unwrap(), config);
}
