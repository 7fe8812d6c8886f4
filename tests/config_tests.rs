//! Integration tests for relay configuration loading and validation.

use std::collections::HashMap;
use std::fs;

use tempfile::TempDir;

use appstate_relay::config::{
    ConfigError, DiagnosticsMode, LifecyclePhase, LogLevel, RelayConfig, ScriptConfig,
};

#[test]
fn test_yaml_with_all_fields() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
diagnostics_mode: production
log_level: debug
soft_report_capacity: 8
initial_phase: before_resume
script:
  name: watcher
  script_path: /usr/local/bin/watcher
  args: ["--json"]
  env_vars:
    WATCHER_MODE: quiet
"#,
    )
    .expect("Failed to write config");

    let config = RelayConfig::load_from(&path).expect("config should load");

    assert_eq!(config.diagnostics_mode, DiagnosticsMode::Production);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.soft_report_capacity, 8);
    assert_eq!(config.initial_phase, LifecyclePhase::BeforeResume);

    let script = config.active_script().expect("script should be active");
    assert_eq!(script.name, "watcher");
    assert!(script.enabled, "enabled defaults to true");
    assert_eq!(script.args, vec!["--json".to_string()]);
    assert_eq!(
        script.env_vars.get("WATCHER_MODE").map(String::as_str),
        Some("quiet")
    );
}

#[test]
fn test_empty_yaml_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    fs::write(&path, "{}\n").expect("Failed to write config");

    let config = RelayConfig::load_from(&path).expect("config should load");
    assert_eq!(config, RelayConfig::default());
    assert_eq!(config.initial_phase, LifecyclePhase::Resumed);
    assert_eq!(config.soft_report_capacity, 64);
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    fs::write(&path, "diagnostics_mode: sometimes\n").expect("Failed to write config");

    assert!(matches!(
        RelayConfig::load_from(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_empty_script_path_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    fs::write(&path, "script:\n  name: broken\n  script_path: \"  \"\n")
        .expect("Failed to write config");

    assert!(matches!(
        RelayConfig::load_from(&path),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_save_then_load_preserves_script() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("config.yaml");

    let config = RelayConfig {
        diagnostics_mode: DiagnosticsMode::Development,
        script: Some(ScriptConfig {
            name: "observer".to_string(),
            enabled: true,
            script_path: "observer.py".to_string(),
            args: vec!["-v".to_string()],
            env_vars: HashMap::new(),
        }),
        ..RelayConfig::default()
    };
    config.save_to(&path).expect("save should succeed");

    let loaded = RelayConfig::load_from(&path).expect("load should succeed");
    assert_eq!(loaded, config);
}

#[test]
fn test_python_script_runs_through_python3() {
    let script = ScriptConfig {
        name: "observer".to_string(),
        enabled: true,
        script_path: "observer.py".to_string(),
        args: vec!["-v".to_string()],
        env_vars: HashMap::new(),
    };
    let (command, args) = script.command_line();
    assert_eq!(command, "python3");
    assert_eq!(args, vec!["observer.py".to_string(), "-v".to_string()]);
}
