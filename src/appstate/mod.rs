//! App lifecycle and focus relay.
//!
//! [`AppStateModule`] samples the host lifecycle phase once at construction,
//! tracks foreground/background transitions, forwards focus changes, and pushes
//! both to the subscriber through a liveness-guarded [`EventChannel`].
//!
//! | Name                  | Kind     | Payload                              |
//! |-----------------------|----------|--------------------------------------|
//! | `initialAppState`     | constant | `"active"` or `"background"`         |
//! | `getCurrentAppState`  | query    | `{ "app_state": ... }`               |
//! | `appStateDidChange`   | event    | `{ "app_state": ... }`               |
//! | `appStateFocusChange` | event    | boolean                              |

pub mod channel;
pub mod diagnostics;
pub mod focus;
pub mod lifecycle;
pub mod query;
pub mod state;

use std::sync::Arc;

pub use channel::{ChannelError, Delivery, EventChannel, GuardedChannel, NullChannel};
pub use diagnostics::{
    DiagnosticSink, ModeSink, SoftReport, SoftReportSink, VerboseLogSink, sink_for_mode,
};
pub use focus::FocusRelay;
pub use lifecycle::LifecycleTracker;
pub use query::{INITIAL_STATE, QueryApi, QueryError};
pub use state::{
    APP_STATE_DID_CHANGE, APP_STATE_FOCUS_CHANGE, AppLifecycleState, AppStateChangeEvent,
    AppStateEvent, AppStateSnapshot, FocusEvent,
};

use crate::host::{HostContext, LifecycleEventListener, WindowFocusChangeListener};

/// Module name exposed to the subscriber.
pub const NAME: &str = "AppState";

pub struct AppStateModule {
    tracker: Arc<LifecycleTracker>,
    focus: FocusRelay,
    query: QueryApi,
}

impl AppStateModule {
    /// Build the module from injected collaborators.
    ///
    /// The host phase is sampled exactly once, here.
    pub fn new(
        host: &dyn HostContext,
        channel: Arc<dyn EventChannel>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let initial = AppLifecycleState::from_phase(host.lifecycle_phase());
        let guarded = GuardedChannel::new(channel, sink);
        let tracker = Arc::new(LifecycleTracker::new(initial, guarded.clone()));

        log::info!("{} module created, initial state {}", NAME, initial);

        Self {
            focus: FocusRelay::new(guarded),
            query: QueryApi::new(Arc::clone(&tracker), initial),
            tracker,
        }
    }

    pub fn name(&self) -> &'static str {
        NAME
    }

    pub fn tracker(&self) -> &LifecycleTracker {
        &self.tracker
    }

    pub fn focus(&self) -> &FocusRelay {
        &self.focus
    }

    pub fn query(&self) -> &QueryApi {
        &self.query
    }
}

impl LifecycleEventListener for AppStateModule {
    fn on_host_resume(&self) {
        self.tracker.on_resume();
    }

    fn on_host_pause(&self) {
        self.tracker.on_pause();
    }

    fn on_host_destroy(&self) {
        self.tracker.on_destroy();
    }
}

impl WindowFocusChangeListener for AppStateModule {
    fn on_window_focus_change(&self, has_focus: bool) {
        self.focus.on_window_focus_change(has_focus);
    }
}
