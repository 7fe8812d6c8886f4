//! Typed errors for script subprocess communication.

use thiserror::Error;

/// Failures talking to a script subprocess.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The subprocess could not be started.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A standard stream could not be captured after spawning.
    #[error("failed to capture {0}")]
    Capture(&'static str),

    /// The stdin writer was already closed.
    #[error("stdin writer is not available")]
    StdinClosed,

    /// A message could not be serialized to JSON.
    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing or flushing stdin failed.
    #[error("failed to write to stdin: {0}")]
    Write(#[from] std::io::Error),
}
