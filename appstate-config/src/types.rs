use serde::{Deserialize, Serialize};

/// How dropped events are diagnosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsMode {
    /// Log every dropped event at error level.
    Development,
    /// File a non-fatal soft report for every dropped event.
    Production,
}

impl DiagnosticsMode {
    /// Display name for CLI/log output
    pub fn display_name(&self) -> &'static str {
        match self {
            DiagnosticsMode::Development => "development",
            DiagnosticsMode::Production => "production",
        }
    }
}

impl Default for DiagnosticsMode {
    fn default() -> Self {
        crate::defaults::diagnostics_mode()
    }
}

/// Host-defined lifecycle phase, sampled once to seed the initial app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    /// The host has not created its primary activity yet
    BeforeCreate,
    /// Created but not in the foreground
    BeforeResume,
    /// In the foreground and receiving input
    #[default]
    Resumed,
}

/// Log level for the debug log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
