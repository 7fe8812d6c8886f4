//! Configuration for the subscriber script that receives app state events.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for an external subscriber script speaking the JSON-lines protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptConfig {
    /// Human-readable name for this script
    pub name: String,

    /// Whether this script is enabled (default: true)
    #[serde(default = "crate::defaults::bool_true")]
    pub enabled: bool,

    /// Path to the script executable
    pub script_path: String,

    /// Arguments to pass to the script
    #[serde(default)]
    pub args: Vec<String>,

    /// Additional environment variables to set for the script process
    #[serde(default)]
    pub env_vars: HashMap<String, String>,
}

impl ScriptConfig {
    /// Resolve the command and argument list used to spawn the script.
    ///
    /// `.py` scripts run through `python3` with the script path prepended to the args.
    pub fn command_line(&self) -> (String, Vec<String>) {
        if self.script_path.ends_with(".py") {
            let mut args = Vec::with_capacity(self.args.len() + 1);
            args.push(self.script_path.clone());
            args.extend(self.args.iter().cloned());
            ("python3".to_string(), args)
        } else {
            (self.script_path.clone(), self.args.clone())
        }
    }
}
