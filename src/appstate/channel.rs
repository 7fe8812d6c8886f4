//! Relay channel seam and the liveness guard in front of it.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::diagnostics::{DiagnosticSink, DropReason, DroppedEvent};
use super::state::AppStateEvent;

/// Errors a channel may return from [`EventChannel::emit`].
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("subscriber channel is disconnected")]
    Disconnected,
    #[error("transport error: {0}")]
    Transport(String),
}

/// Cross-boundary transport delivering named events to the subscriber.
pub trait EventChannel: Send + Sync {
    /// Whether a push right now would reach a live subscriber.
    fn is_connected(&self) -> bool;

    /// Push one event synchronously.
    fn emit(&self, event_name: &str, payload: Value) -> Result<(), ChannelError>;
}

/// A channel with no subscriber behind it. Every push is dropped.
#[derive(Debug, Default)]
pub struct NullChannel;

impl EventChannel for NullChannel {
    fn is_connected(&self) -> bool {
        false
    }

    fn emit(&self, _event_name: &str, _payload: Value) -> Result<(), ChannelError> {
        Err(ChannelError::Disconnected)
    }
}

/// Outcome of a guarded push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Dropped,
}

/// Checks channel liveness before every push and diagnoses drops.
///
/// Dropped events are never queued or retried; the subscriber can recover the
/// same information from a later transition or the query accessor.
#[derive(Clone)]
pub struct GuardedChannel {
    channel: Arc<dyn EventChannel>,
    sink: Arc<dyn DiagnosticSink>,
}

impl GuardedChannel {
    pub fn new(channel: Arc<dyn EventChannel>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { channel, sink }
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    pub fn push(&self, event: &AppStateEvent) -> Delivery {
        let name = event.name();

        if !self.channel.is_connected() {
            self.drop_event(name, DropReason::Disconnected);
            return Delivery::Dropped;
        }

        match self.channel.emit(name, event.payload()) {
            Ok(()) => {
                log::trace!("delivered {}", name);
                Delivery::Delivered
            }
            Err(ChannelError::Disconnected) => {
                self.drop_event(name, DropReason::Disconnected);
                Delivery::Dropped
            }
            Err(ChannelError::Transport(detail)) => {
                self.drop_event(name, DropReason::Transport(detail));
                Delivery::Dropped
            }
        }
    }

    fn drop_event(&self, name: &str, reason: DropReason) {
        self.sink.record(&DroppedEvent {
            event_name: name.to_string(),
            reason,
        });
    }
}
