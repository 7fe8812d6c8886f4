//! Subscriber transport for appstate-relay.
//!
//! Provides the JSON-lines protocol spoken with an embedded script subscriber
//! and the subprocess wrapper that carries it.

pub mod error;
pub mod process;
pub mod protocol;

pub use error::ScriptError;
pub use process::ScriptProcess;
pub use protocol::{CallbackSlot, ScriptCommand, ScriptMessage};
