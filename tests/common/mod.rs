//! Shared integration test helpers for appstate-relay.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#![allow(dead_code)]` attribute suppresses warnings when only a subset of
//! helpers are used per file.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde_json::Value;

use appstate_relay::appstate::diagnostics::DroppedEvent;
use appstate_relay::appstate::{AppStateModule, ChannelError, DiagnosticSink, EventChannel};
use appstate_relay::config::LifecyclePhase;

/// In-memory channel recording every accepted push.
#[derive(Default)]
pub struct RecordingChannel {
    disconnected: AtomicBool,
    failing: AtomicBool,
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingChannel {
    pub fn connected() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_connected(&self, connected: bool) {
        self.disconnected.store(!connected, Ordering::SeqCst);
    }

    /// Make `emit` fail with a transport error while still reporting connected.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().clone()
    }

    pub fn take_events(&self) -> Vec<(String, Value)> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventChannel for RecordingChannel {
    fn is_connected(&self) -> bool {
        !self.disconnected.load(Ordering::SeqCst)
    }

    fn emit(&self, event_name: &str, payload: Value) -> Result<(), ChannelError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ChannelError::Transport("pipe closed".to_string()));
        }
        self.events.lock().push((event_name.to_string(), payload));
        Ok(())
    }
}

/// Sink recording every dropped event.
#[derive(Default)]
pub struct RecordingSink {
    dropped: Mutex<Vec<DroppedEvent>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn dropped(&self) -> Vec<DroppedEvent> {
        self.dropped.lock().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, dropped: &DroppedEvent) {
        self.dropped.lock().push(dropped.clone());
    }
}

/// Module wired to a connected recording channel and a recording sink.
pub fn module_with_phase(
    phase: LifecyclePhase,
) -> (AppStateModule, Arc<RecordingChannel>, Arc<RecordingSink>) {
    let channel = RecordingChannel::connected();
    let sink = RecordingSink::new();
    let module = AppStateModule::new(&phase, channel.clone(), sink.clone());
    (module, channel, sink)
}
