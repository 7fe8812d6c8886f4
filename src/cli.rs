//! Command-line interface for appstate-relay.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{DiagnosticsMode, LifecyclePhase, LogLevel, ScriptConfig};

/// appstate-relay - relay host lifecycle and focus changes to a subscriber script
///
/// Host notifications are read from stdin, one per line:
/// `resume`, `pause`, `destroy`, `focus <true|false>`.
#[derive(Parser, Debug)]
#[command(name = "appstate-relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/appstate-relay/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Host lifecycle phase at startup
    #[arg(long, value_enum)]
    pub phase: Option<PhaseArg>,

    /// How dropped events are diagnosed
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Debug log level
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Milliseconds to wait for late subscriber commands after stdin closes
    #[arg(long, default_value_t = 100)]
    pub linger_ms: u64,

    /// Subscriber script (overrides the configured one)
    #[arg(value_name = "SCRIPT")]
    pub script: Option<String>,

    /// Arguments passed to the subscriber script
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub script_args: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PhaseArg {
    BeforeCreate,
    BeforeResume,
    Resumed,
}

impl From<PhaseArg> for LifecyclePhase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::BeforeCreate => LifecyclePhase::BeforeCreate,
            PhaseArg::BeforeResume => LifecyclePhase::BeforeResume,
            PhaseArg::Resumed => LifecyclePhase::Resumed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Development,
    Production,
}

impl From<ModeArg> for DiagnosticsMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Development => DiagnosticsMode::Development,
            ModeArg::Production => DiagnosticsMode::Production,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => LogLevel::Off,
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

/// Runtime options passed from CLI to the relay
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub phase: Option<LifecyclePhase>,
    pub diagnostics_mode: Option<DiagnosticsMode>,
    pub log_level: Option<LogLevel>,
    pub linger_ms: u64,
    pub script: Option<ScriptConfig>,
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        let script = cli.script.map(|script_path| ScriptConfig {
            name: script_path.clone(),
            enabled: true,
            script_path,
            args: cli.script_args,
            env_vars: HashMap::new(),
        });
        Self {
            config_path: cli.config,
            phase: cli.phase.map(Into::into),
            diagnostics_mode: cli.mode.map(Into::into),
            log_level: cli.log_level.map(Into::into),
            linger_ms: cli.linger_ms,
            script,
        }
    }
}

/// Parse process arguments
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_with_trailing_args() {
        let cli = Cli::parse_from([
            "appstate-relay",
            "--phase",
            "before-resume",
            "--mode",
            "production",
            "watcher.py",
            "fast",
            "x",
        ]);
        let options = RuntimeOptions::from(cli);
        assert_eq!(options.phase, Some(LifecyclePhase::BeforeResume));
        assert_eq!(options.diagnostics_mode, Some(DiagnosticsMode::Production));
        let script = options.script.expect("script should be set");
        assert_eq!(script.script_path, "watcher.py");
        assert_eq!(script.args, vec!["fast".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_defaults_without_flags() {
        let options = RuntimeOptions::from(Cli::parse_from(["appstate-relay"]));
        assert!(options.script.is_none());
        assert!(options.phase.is_none());
        assert_eq!(options.linger_ms, 100);
    }
}
