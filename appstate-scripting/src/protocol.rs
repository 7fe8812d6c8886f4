//! JSON protocol types for communication between the host and a subscriber script.
//!
//! Scripts read [`ScriptMessage`] objects from stdin (one JSON object per line) and write
//! [`ScriptCommand`] objects to stdout (one JSON object per line).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message sent from the host to a subscriber script (via stdin).
///
/// Tagged with `type` so scripts can dispatch on a single field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptMessage {
    /// Module constants, sent once before any event.
    Constants {
        /// Name of the module exposing the constants (e.g., "AppState").
        module: String,
        /// Constant name to value.
        constants: Map<String, Value>,
    },

    /// A named event pushed by the host.
    Event {
        /// Event name (e.g., "appStateDidChange").
        name: String,
        /// Event payload, passed through unchanged.
        payload: Value,
    },

    /// Reply to a request, delivered to one of the two continuation slots.
    Callback {
        /// Identifier copied from the originating [`ScriptCommand`].
        request_id: u64,
        /// Which continuation the reply targets.
        slot: CallbackSlot,
        /// Arguments for the continuation.
        args: Vec<Value>,
    },
}

impl ScriptMessage {
    /// Build an event message.
    pub fn event(name: impl Into<String>, payload: Value) -> Self {
        Self::Event {
            name: name.into(),
            payload,
        }
    }
}

/// Continuation slot targeted by a [`ScriptMessage::Callback`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CallbackSlot {
    Success,
    Error,
}

/// A command sent from a subscriber script to the host (via stdout).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// Ask for the current app state snapshot.
    GetCurrentAppState {
        /// Identifier echoed back in the callback.
        request_id: u64,
    },

    /// Log a message through the host logger.
    Log {
        /// Log level (e.g., "info", "warn", "error", "debug").
        level: String,
        /// Log message.
        message: String,
    },
}
