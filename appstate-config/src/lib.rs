//! Configuration system for appstate-relay.
//!
//! This crate provides configuration loading, saving, and default values
//! for the relay host. It includes:
//!
//! - Diagnostics mode and log level selection
//! - The host lifecycle phase used to seed the initial app state
//! - Subscriber script configuration

pub mod config;
pub mod defaults;
pub mod error;
pub mod scripting;
mod types;

pub use config::RelayConfig;
pub use error::ConfigError;
pub use scripting::ScriptConfig;
pub use types::{DiagnosticsMode, LifecyclePhase, LogLevel};
