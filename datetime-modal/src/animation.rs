//! Timing helpers for the overlay's enter and exit animations.

use std::time::{Duration, Instant};

/// Easing function for animation progress.
pub(crate) fn easing(progress: f32) -> f32 {
    // Cubic ease-in-out
    let t = progress.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// One bounded animation run: a start instant plus a fixed duration.
///
/// Reversals are expressed by starting a new run whose start instant is
/// back-dated so the eased curve picks up exactly where the interrupted run
/// left off. Sampling never jumps, even when the direction flips mid-flight.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Transition {
    start: Instant,
    duration: Duration,
}

impl Transition {
    /// Starts a fresh run at `now`.
    pub(crate) fn begin(now: Instant, duration: Duration) -> Self {
        Self {
            start: now,
            duration,
        }
    }

    /// Starts a run that mirrors the progress of `previous`.
    ///
    /// If the previous run had `elapsed` behind it, the new run starts with
    /// `duration - elapsed` already behind it, so the visible fraction is
    /// continuous across the flip.
    pub(crate) fn begin_reversed(now: Instant, duration: Duration, previous: &Transition) -> Self {
        let elapsed = now
            .saturating_duration_since(previous.start)
            .min(duration);
        let head_start = duration - elapsed;
        Self {
            start: now.checked_sub(head_start).unwrap_or(now),
            duration,
        }
    }

    /// Linear progress in `[0, 1]`; `1.0` once the run has completed.
    pub(crate) fn linear_progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            1.0
        } else {
            elapsed.as_secs_f32() / self.duration.as_secs_f32()
        }
    }

    /// Eased progress in `[0, 1]`.
    pub(crate) fn eased_progress(&self, now: Instant) -> f32 {
        easing(self.linear_progress(now))
    }

    /// Whether the run has played out its full duration.
    pub(crate) fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}
