//! Foreground/background state machine.

use parking_lot::Mutex;

use super::channel::GuardedChannel;
use super::state::{AppLifecycleState, AppStateChangeEvent, AppStateEvent};

/// Owns the current [`AppLifecycleState`] and emits `appStateDidChange` on every
/// resume or pause.
///
/// Transitions are not de-duplicated: two resumes in a row emit twice.
///
/// Expects a single caller: the host delivers resume/pause sequentially from one
/// thread. The state lock is released before the push, so concurrent transitions
/// could emit events in a different order than the final state reflects.
pub struct LifecycleTracker {
    state: Mutex<AppLifecycleState>,
    channel: GuardedChannel,
}

impl LifecycleTracker {
    pub fn new(initial: AppLifecycleState, channel: GuardedChannel) -> Self {
        Self {
            state: Mutex::new(initial),
            channel,
        }
    }

    pub fn on_resume(&self) {
        self.transition(AppLifecycleState::Active);
    }

    pub fn on_pause(&self) {
        self.transition(AppLifecycleState::Background);
    }

    /// Teardown. Leaves the state untouched and emits nothing: the subscriber may
    /// already be going away concurrently.
    pub fn on_destroy(&self) {
        log::debug!("host destroy: app state left at {}", self.current_state());
    }

    pub fn current_state(&self) -> AppLifecycleState {
        *self.state.lock()
    }

    fn transition(&self, next: AppLifecycleState) {
        // The lock is released before the push so a channel may query state.
        *self.state.lock() = next;
        log::debug!("app state -> {}", next);
        self.channel
            .push(&AppStateEvent::DidChange(AppStateChangeEvent::new(next)));
    }
}
