use std::time::{Duration, Instant};

use crate::monitor::{Frame, ScreenInfo};

/// Parameters needed to flash a single screen.
#[derive(Clone, Debug, PartialEq)]
pub struct FlashConfig {
    /// Full frame of the target screen; the window covers exactly this.
    pub frame: Frame,
    /// How long the window stays up before the process exits.
    pub duration: Duration,
}

impl FlashConfig {
    pub fn for_screen(screen: &ScreenInfo, duration: Duration) -> Self {
        Self {
            frame: screen.frame,
            duration,
        }
    }
}

/// Lifecycle of the flash window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashPhase {
    NotShown,
    /// The window is up and must close once `deadline` passes.
    Shown { deadline: Instant },
    /// Window dropped, event loop exiting.
    Closed,
}

impl FlashPhase {
    pub fn shown_at(now: Instant, duration: Duration) -> Self {
        FlashPhase::Shown {
            deadline: now + duration,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self {
            FlashPhase::Shown { deadline } => Some(*deadline),
            _ => None,
        }
    }

    /// Whether the close timer has fired.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline().is_some_and(|deadline| now >= deadline)
    }
}
