//! App state values and the events built from them.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::LifecyclePhase;

pub const APP_STATE_ACTIVE: &str = "active";
pub const APP_STATE_BACKGROUND: &str = "background";

/// Event name for lifecycle transitions.
pub const APP_STATE_DID_CHANGE: &str = "appStateDidChange";
/// Event name for window focus changes.
pub const APP_STATE_FOCUS_CHANGE: &str = "appStateFocusChange";

/// Foreground/background state of the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppLifecycleState {
    Active,
    Background,
}

impl AppLifecycleState {
    /// Seed state for a sampled host phase: only `Resumed` counts as active.
    pub fn from_phase(phase: LifecyclePhase) -> Self {
        match phase {
            LifecyclePhase::Resumed => AppLifecycleState::Active,
            LifecyclePhase::BeforeCreate | LifecyclePhase::BeforeResume => {
                AppLifecycleState::Background
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AppLifecycleState::Active => APP_STATE_ACTIVE,
            AppLifecycleState::Background => APP_STATE_BACKGROUND,
        }
    }
}

impl std::fmt::Display for AppLifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{ "app_state": ... }` payload, shared by change events and query replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStateChangeEvent {
    pub app_state: AppLifecycleState,
}

/// Snapshot returned by the query accessor. Same wire shape as the change event.
pub type AppStateSnapshot = AppStateChangeEvent;

impl AppStateChangeEvent {
    pub fn new(app_state: AppLifecycleState) -> Self {
        Self { app_state }
    }

    pub fn to_value(self) -> Value {
        json!({ "app_state": self.app_state.as_str() })
    }
}

/// Focus payload; serializes as a bare boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusEvent {
    pub has_focus: bool,
}

/// An outbound event, built fresh for each emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStateEvent {
    DidChange(AppStateChangeEvent),
    FocusChange(FocusEvent),
}

impl AppStateEvent {
    /// Wire name of the event.
    pub const fn name(&self) -> &'static str {
        match self {
            AppStateEvent::DidChange(_) => APP_STATE_DID_CHANGE,
            AppStateEvent::FocusChange(_) => APP_STATE_FOCUS_CHANGE,
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            AppStateEvent::DidChange(event) => event.to_value(),
            AppStateEvent::FocusChange(event) => Value::Bool(event.has_focus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_seeding() {
        assert_eq!(
            AppLifecycleState::from_phase(LifecyclePhase::Resumed),
            AppLifecycleState::Active
        );
        assert_eq!(
            AppLifecycleState::from_phase(LifecyclePhase::BeforeResume),
            AppLifecycleState::Background
        );
        assert_eq!(
            AppLifecycleState::from_phase(LifecyclePhase::BeforeCreate),
            AppLifecycleState::Background
        );
    }

    #[test]
    fn test_payload_matches_serde_shape() {
        let event = AppStateChangeEvent::new(AppLifecycleState::Background);
        let via_serde = serde_json::to_value(event).expect("serialize");
        assert_eq!(event.to_value(), via_serde);

        let focus = FocusEvent { has_focus: true };
        assert_eq!(
            serde_json::to_value(focus).expect("serialize"),
            AppStateEvent::FocusChange(focus).payload()
        );
    }
}
