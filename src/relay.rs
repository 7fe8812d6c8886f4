//! Drives an [`AppStateModule`] from a stream of host notifications and answers
//! subscriber requests.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::appstate::AppStateModule;
use crate::host::HostNotification;
use crate::scripting::ScriptEventChannel;
use crate::scripting::protocol::{CallbackSlot, ScriptCommand};

/// How often subscriber commands are drained while waiting on host input.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Counters reported when the input stream ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub notifications: usize,
    pub rejected_lines: usize,
    pub commands: usize,
}

pub struct Relay {
    module: AppStateModule,
    script: Option<Arc<ScriptEventChannel>>,
}

impl Relay {
    /// `script` is the same subscriber the module's channel pushes to, if any.
    pub fn new(module: AppStateModule, script: Option<Arc<ScriptEventChannel>>) -> Self {
        Self { module, script }
    }

    pub fn module(&self) -> &AppStateModule {
        &self.module
    }

    /// Hand the subscriber its constants before any event can be dispatched.
    pub fn announce(&self) {
        let Some(script) = &self.script else {
            return;
        };
        let constants = self.module.query().constants();
        if let Err(e) = script.send_constants(self.module.name(), constants) {
            log::warn!("failed to send constants to subscriber: {}", e);
        }
    }

    /// Read notifications until EOF, then wait `linger` for late subscriber commands.
    ///
    /// Input is read on its own thread so subscriber requests are answered while
    /// the host is idle.
    pub fn run<R>(&self, input: R, linger: Duration) -> anyhow::Result<RelayStats>
    where
        R: BufRead + Send + 'static,
    {
        let mut stats = RelayStats::default();

        let (tx, rx) = mpsc::channel::<io::Result<String>>();
        thread::Builder::new()
            .name("host-input".to_string())
            .spawn(move || {
                for line in input.lines() {
                    let failed = line.is_err();
                    if tx.send(line).is_err() || failed {
                        break;
                    }
                }
            })?;

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => self.handle_line(&line?, &mut stats),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            stats.commands += self.pump_commands();
        }

        if self.script.is_some() && !linger.is_zero() {
            let deadline = Instant::now() + linger;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                thread::sleep(POLL_INTERVAL.min(remaining));
                stats.commands += self.pump_commands();
            }
        }

        Ok(stats)
    }

    fn handle_line(&self, line: &str, stats: &mut RelayStats) {
        match HostNotification::parse_line(line) {
            Ok(Some(notification)) => {
                log::debug!("host notification: {:?}", notification);
                notification.dispatch(&self.module);
                stats.notifications += 1;
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("ignoring input line {:?}: {}", line, e);
                stats.rejected_lines += 1;
            }
        }
    }

    /// Drain and answer pending subscriber commands. Returns how many were handled.
    pub fn pump_commands(&self) -> usize {
        let Some(script) = &self.script else {
            return 0;
        };

        for line in script.read_errors() {
            log::warn!("subscriber stderr: {}", line);
        }

        let commands = script.read_commands();
        for command in &commands {
            self.handle_command(script, command);
        }
        commands.len()
    }

    fn handle_command(&self, script: &ScriptEventChannel, command: &ScriptCommand) {
        match command {
            ScriptCommand::GetCurrentAppState { request_id } => {
                let request_id = *request_id;
                self.module.query().get_current_app_state(
                    |snapshot| {
                        reply(
                            script,
                            request_id,
                            CallbackSlot::Success,
                            snapshot.to_value(),
                        )
                    },
                    |error| {
                        reply(
                            script,
                            request_id,
                            CallbackSlot::Error,
                            Value::String(error.to_string()),
                        )
                    },
                );
            }
            ScriptCommand::Log { level, message } => match level.as_str() {
                "error" => log::error!("subscriber: {}", message),
                "warn" => log::warn!("subscriber: {}", message),
                "debug" => log::debug!("subscriber: {}", message),
                "trace" => log::trace!("subscriber: {}", message),
                _ => log::info!("subscriber: {}", message),
            },
        }
    }

    /// Stop the subscriber, if any. Emits nothing.
    pub fn shutdown(&self) {
        if let Some(script) = &self.script {
            script.stop();
        }
    }
}

fn reply(script: &ScriptEventChannel, request_id: u64, slot: CallbackSlot, arg: Value) {
    if let Err(e) = script.send_callback(request_id, slot, vec![arg]) {
        log::warn!("failed to answer request {}: {}", request_id, e);
    }
}
