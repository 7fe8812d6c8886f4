//! Host-side seams: the lifecycle phase source, the listener traits the host
//! calls into, and the textual notification format read by the relay binary.

use std::str::FromStr;

use thiserror::Error;

use crate::config::LifecyclePhase;

/// Host context injected at construction.
pub trait HostContext {
    /// The host's current lifecycle phase.
    fn lifecycle_phase(&self) -> LifecyclePhase;
}

impl HostContext for LifecyclePhase {
    fn lifecycle_phase(&self) -> LifecyclePhase {
        *self
    }
}

/// Host lifecycle callbacks, delivered sequentially on the host's primary thread.
pub trait LifecycleEventListener {
    fn on_host_resume(&self);
    fn on_host_pause(&self);
    fn on_host_destroy(&self);
}

/// Host window focus callback.
pub trait WindowFocusChangeListener {
    fn on_window_focus_change(&self, has_focus: bool);
}

/// One host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostNotification {
    Resume,
    Pause,
    Destroy,
    FocusChanged(bool),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotificationParseError {
    #[error("unknown host notification '{0}'")]
    Unknown(String),
    #[error("focus notification needs a value (true/false/on/off/1/0)")]
    MissingFocusValue,
    #[error("invalid focus value '{0}'")]
    InvalidFocusValue(String),
    #[error("unexpected trailing input after '{0}'")]
    TrailingInput(String),
}

impl HostNotification {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, NotificationParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }

    /// Deliver this notification to a listener.
    pub fn dispatch<L>(self, listener: &L)
    where
        L: LifecycleEventListener + WindowFocusChangeListener + ?Sized,
    {
        match self {
            HostNotification::Resume => listener.on_host_resume(),
            HostNotification::Pause => listener.on_host_pause(),
            HostNotification::Destroy => listener.on_host_destroy(),
            HostNotification::FocusChanged(has_focus) => {
                listener.on_window_focus_change(has_focus)
            }
        }
    }
}

impl FromStr for HostNotification {
    type Err = NotificationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();

        let notification = match verb.as_str() {
            "resume" => HostNotification::Resume,
            "pause" => HostNotification::Pause,
            "destroy" => HostNotification::Destroy,
            "focus" => {
                let value = words
                    .next()
                    .ok_or(NotificationParseError::MissingFocusValue)?;
                HostNotification::FocusChanged(parse_focus_value(value)?)
            }
            _ => return Err(NotificationParseError::Unknown(s.trim().to_string())),
        };

        if words.next().is_some() {
            return Err(NotificationParseError::TrailingInput(verb));
        }
        Ok(notification)
    }
}

fn parse_focus_value(value: &str) -> Result<bool, NotificationParseError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(NotificationParseError::InvalidFocusValue(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lifecycle_words() {
        assert_eq!("resume".parse::<HostNotification>(), Ok(HostNotification::Resume));
        assert_eq!("  PAUSE ".parse::<HostNotification>(), Ok(HostNotification::Pause));
        assert_eq!(
            "destroy".parse::<HostNotification>(),
            Ok(HostNotification::Destroy)
        );
    }

    #[test]
    fn test_parse_focus_values() {
        assert_eq!(
            "focus true".parse::<HostNotification>(),
            Ok(HostNotification::FocusChanged(true))
        );
        assert_eq!(
            "focus off".parse::<HostNotification>(),
            Ok(HostNotification::FocusChanged(false))
        );
        assert_eq!(
            "focus".parse::<HostNotification>(),
            Err(NotificationParseError::MissingFocusValue)
        );
        assert_eq!(
            "focus maybe".parse::<HostNotification>(),
            Err(NotificationParseError::InvalidFocusValue("maybe".to_string()))
        );
    }

    #[test]
    fn test_parse_line_skips_blank_and_comments() {
        assert_eq!(HostNotification::parse_line("   "), Ok(None));
        assert_eq!(HostNotification::parse_line("# resume"), Ok(None));
        assert!(matches!(
            HostNotification::parse_line("resume now"),
            Err(NotificationParseError::TrailingInput(_))
        ));
        assert!(matches!(
            HostNotification::parse_line("suspend"),
            Err(NotificationParseError::Unknown(_))
        ));
    }
}
