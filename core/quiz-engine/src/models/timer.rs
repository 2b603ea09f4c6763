use serde::{Deserialize, Serialize};

/// Notifications produced by the countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimerEvent {
    Tick { remaining_seconds: u32 },
    LowTimeWarning { remaining_seconds: u32 },
    Expired,
    PauseChanged { paused: bool },
}

impl TimerEvent {
    pub fn event_name(&self) -> &'static str {
        match self {
            TimerEvent::Tick { .. } => "timer-tick",
            TimerEvent::LowTimeWarning { .. } => "low-time-warning",
            TimerEvent::Expired => "time-expired",
            TimerEvent::PauseChanged { .. } => "pause-changed",
        }
    }
}
