//! Script subprocess channel.
//!
//! [`ScriptEventChannel`] adapts a [`ScriptProcess`] to [`EventChannel`]: it is
//! connected while the child is running with its stdin open.

use parking_lot::Mutex;
use serde_json::{Map, Value};

pub use appstate_scripting::{error, process, protocol};
use appstate_scripting::{CallbackSlot, ScriptCommand, ScriptError, ScriptMessage, ScriptProcess};

use crate::appstate::{ChannelError, EventChannel};
use crate::config::ScriptConfig;

pub struct ScriptEventChannel {
    process: Mutex<ScriptProcess>,
}

impl ScriptEventChannel {
    pub fn new(process: ScriptProcess) -> Self {
        Self {
            process: Mutex::new(process),
        }
    }

    /// Spawn the subscriber described by `config`.
    pub fn spawn(config: &ScriptConfig) -> Result<Self, ScriptError> {
        let (command, args) = config.command_line();
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        log::info!("starting subscriber '{}'", config.name);
        let process = ScriptProcess::spawn(&command, &arg_refs, &config.env_vars)?;
        Ok(Self::new(process))
    }

    /// Send the module constants. Called once, before any event.
    pub fn send_constants(
        &self,
        module: &str,
        constants: Map<String, Value>,
    ) -> Result<(), ScriptError> {
        self.process.lock().send(&ScriptMessage::Constants {
            module: module.to_string(),
            constants,
        })
    }

    /// Answer a request on one of its two continuation slots.
    pub fn send_callback(
        &self,
        request_id: u64,
        slot: CallbackSlot,
        args: Vec<Value>,
    ) -> Result<(), ScriptError> {
        self.process.lock().send(&ScriptMessage::Callback {
            request_id,
            slot,
            args,
        })
    }

    pub fn read_commands(&self) -> Vec<ScriptCommand> {
        self.process.lock().read_commands()
    }

    pub fn read_errors(&self) -> Vec<String> {
        self.process.lock().read_errors()
    }

    pub fn stop(&self) {
        self.process.lock().stop();
    }
}

impl EventChannel for ScriptEventChannel {
    fn is_connected(&self) -> bool {
        let mut process = self.process.lock();
        process.has_stdin() && process.is_running()
    }

    fn emit(&self, event_name: &str, payload: Value) -> Result<(), ChannelError> {
        self.process
            .lock()
            .send(&ScriptMessage::event(event_name, payload))
            .map_err(|e| match e {
                ScriptError::StdinClosed => ChannelError::Disconnected,
                other => ChannelError::Transport(other.to_string()),
            })
    }
}
