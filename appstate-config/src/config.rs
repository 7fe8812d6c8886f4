//! Relay configuration: loading, saving, validation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scripting::ScriptConfig;
use crate::types::{DiagnosticsMode, LifecyclePhase, LogLevel};

/// Top-level configuration for the relay host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    /// How dropped events are diagnosed
    #[serde(default = "crate::defaults::diagnostics_mode")]
    pub diagnostics_mode: DiagnosticsMode,

    /// Debug log level (overridden by `--log-level` and `RUST_LOG`)
    #[serde(default)]
    pub log_level: LogLevel,

    /// Number of soft reports retained in production mode
    #[serde(default = "crate::defaults::soft_report_capacity")]
    pub soft_report_capacity: usize,

    /// Host lifecycle phase reported at startup
    #[serde(default)]
    pub initial_phase: LifecyclePhase,

    /// Subscriber script, if any
    #[serde(default)]
    pub script: Option<ScriptConfig>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            diagnostics_mode: crate::defaults::diagnostics_mode(),
            log_level: LogLevel::default(),
            soft_report_capacity: crate::defaults::soft_report_capacity(),
            initial_phase: LifecyclePhase::default(),
            script: None,
        }
    }
}

impl RelayConfig {
    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults; nothing is written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Config path: {:?}", path);

        if !path.exists() {
            log::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: RelayConfig = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.soft_report_capacity == 0 {
            return Err(ConfigError::Validation(
                "soft_report_capacity must be at least 1".to_string(),
            ));
        }
        if let Some(script) = &self.script
            && script.script_path.trim().is_empty()
        {
            return Err(ConfigError::Validation(format!(
                "script '{}' has an empty script_path",
                script.name
            )));
        }
        Ok(())
    }

    /// The enabled subscriber script, if one is configured.
    pub fn active_script(&self) -> Option<&ScriptConfig> {
        self.script.as_ref().filter(|s| s.enabled)
    }

    /// Get the configuration directory (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("appstate-relay")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("appstate-relay")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.yaml");

        let config = RelayConfig::load_from(&path).expect("load should succeed");
        assert_eq!(config, RelayConfig::default());
        assert!(!path.exists(), "load must not create the file");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = RelayConfig {
            soft_report_capacity: 0,
            ..RelayConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_disabled_script_is_not_active() {
        let config = RelayConfig {
            script: Some(ScriptConfig {
                name: "watcher".to_string(),
                enabled: false,
                script_path: "watcher.py".to_string(),
                args: Vec::new(),
                env_vars: Default::default(),
            }),
            ..RelayConfig::default()
        };
        assert!(config.active_script().is_none());
    }
}
