//! Gesture tracking that gates the confirm action.
//!
//! A spinner widget that is still coasting after a drag would commit a value
//! the user never settled on. The guard marks the session as mid-gesture from
//! the first touch until the widget commits a value, and the confirm action
//! stays disabled in between.

/// Tracks whether a widget gesture is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionGuard {
    live: bool,
    never_disable: bool,
    interacting: bool,
}

impl InteractionGuard {
    /// A guard that follows touch activity.
    ///
    /// `never_disable` keeps the confirm action enabled regardless, for hosts
    /// whose widgets report reliably enough that the guard only gets in the
    /// way.
    pub fn live(never_disable: bool) -> Self {
        Self {
            live: true,
            never_disable,
            interacting: false,
        }
    }

    /// A guard that never reports an open gesture.
    ///
    /// Self-contained dialog widgets commit atomically, so there is no
    /// in-between state to protect against.
    pub fn idle() -> Self {
        Self {
            live: false,
            never_disable: false,
            interacting: false,
        }
    }

    /// A touch landed on the widget.
    pub fn touch_began(&mut self) {
        if self.live {
            self.interacting = true;
        }
    }

    /// The widget committed a value; the gesture is over.
    pub fn value_committed(&mut self) {
        self.interacting = false;
    }

    /// Whether a gesture is currently open.
    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    /// Whether the confirm action may fire right now.
    pub fn confirm_enabled(&self) -> bool {
        self.never_disable || !self.interacting
    }
}
