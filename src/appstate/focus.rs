use super::channel::GuardedChannel;
use super::state::{AppStateEvent, FocusEvent};

/// Forwards window focus changes as `appStateFocusChange`.
pub struct FocusRelay {
    channel: GuardedChannel,
}

impl FocusRelay {
    pub fn new(channel: GuardedChannel) -> Self {
        Self { channel }
    }

    pub fn on_window_focus_change(&self, has_focus: bool) {
        log::debug!("window focus -> {}", has_focus);
        self.channel
            .push(&AppStateEvent::FocusChange(FocusEvent { has_focus }));
    }
}
