//! Integration tests for `appStateFocusChange` forwarding.

mod common;

use serde_json::Value;

use appstate_relay::appstate::{APP_STATE_FOCUS_CHANGE, AppLifecycleState};
use appstate_relay::config::LifecyclePhase;
use appstate_relay::host::WindowFocusChangeListener;

use common::module_with_phase;

#[test]
fn test_focus_gained_emits_true() {
    let (module, channel, _) = module_with_phase(LifecyclePhase::Resumed);

    module.on_window_focus_change(true);

    assert_eq!(
        channel.events(),
        vec![(APP_STATE_FOCUS_CHANGE.to_string(), Value::Bool(true))]
    );
}

#[test]
fn test_focus_lost_emits_false() {
    let (module, channel, _) = module_with_phase(LifecyclePhase::Resumed);

    module.on_window_focus_change(false);

    assert_eq!(
        channel.events(),
        vec![(APP_STATE_FOCUS_CHANGE.to_string(), Value::Bool(false))]
    );
}

#[test]
fn test_focus_leaves_lifecycle_state_alone() {
    for phase in [LifecyclePhase::Resumed, LifecyclePhase::BeforeResume] {
        let (module, channel, _) = module_with_phase(phase);
        let before = module.tracker().current_state();

        module.on_window_focus_change(false);
        module.on_window_focus_change(true);

        assert_eq!(module.tracker().current_state(), before);
        assert!(
            channel
                .events()
                .iter()
                .all(|(name, _)| name == APP_STATE_FOCUS_CHANGE),
            "focus changes must not emit appStateDidChange"
        );
    }
}

#[test]
fn test_focus_while_background() {
    let (module, channel, _) = module_with_phase(LifecyclePhase::BeforeCreate);

    module.focus().on_window_focus_change(true);

    assert_eq!(module.tracker().current_state(), AppLifecycleState::Background);
    assert_eq!(channel.events().len(), 1);
}
