//! Visibility lifecycle for the modal overlay.
//!
//! ## Usage
//!
//! The controller reconciles the caller's desired visibility against the
//! enter and exit animations. Drive it by calling
//! [`set_desired_visible`](VisibilityController::set_desired_visible) whenever
//! the desire changes and [`frame`](VisibilityController::frame) once per
//! frame; sample [`visible_fraction`](VisibilityController::visible_fraction)
//! for drawing.
//!
//! The close notification is edge-triggered: [`VisibilityEvent::Closed`] is
//! produced exactly once per open-to-close cycle, strictly after the exit
//! animation has finished.

use std::{sync::Arc, time::Duration};

use smallvec::SmallVec;
use tracing::debug;

use crate::{animation::Transition, clock::Clock};

/// Where the overlay currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Fully gone. No session exists.
    Hidden,
    /// Enter animation running. The session is already live.
    Showing,
    /// At rest, fully visible.
    Shown,
    /// Exit animation running. The session resolves when it finishes.
    Hiding,
}

/// Lifecycle edges reported by [`VisibilityController::frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// The enter animation finished; the overlay is at rest.
    Opened,
    /// The exit animation finished; the overlay is gone.
    Closed,
}

/// Reconciles desired visibility with the animation timeline.
pub struct VisibilityController {
    state: Visibility,
    desired: bool,
    transition: Option<Transition>,
    duration: Duration,
    clock: Arc<dyn Clock>,
    mounted: bool,
}

impl VisibilityController {
    /// Creates a controller at rest in [`Visibility::Hidden`].
    pub fn new(duration: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Visibility::Hidden,
            desired: false,
            transition: None,
            duration,
            clock,
            mounted: true,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> Visibility {
        self.state
    }

    /// Whether a session should be live (`Showing` or `Shown`).
    pub fn is_open(&self) -> bool {
        matches!(self.state, Visibility::Showing | Visibility::Shown)
    }

    /// Whether an enter or exit transition is still unresolved.
    ///
    /// Stays true after the duration has elapsed until the
    /// [`frame`](Self::frame) pump that reports the terminal edge, so a host
    /// that only pumps while animating cannot strand the final
    /// [`Opened`](VisibilityEvent::Opened) or
    /// [`Closed`](VisibilityEvent::Closed) event.
    pub fn is_animating(&self) -> bool {
        self.mounted && self.transition.is_some()
    }

    /// Whether the controller still delivers lifecycle events.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// How visible the overlay is right now, eased, in `[0, 1]`.
    pub fn visible_fraction(&self) -> f32 {
        let now = self.clock.now();
        match self.state {
            Visibility::Hidden => 0.0,
            Visibility::Shown => 1.0,
            Visibility::Showing => self.transition.as_ref().map_or(1.0, |t| t.eased_progress(now)),
            Visibility::Hiding => self
                .transition
                .as_ref()
                .map_or(0.0, |t| 1.0 - t.eased_progress(now)),
        }
    }

    /// Updates the caller's desired visibility.
    ///
    /// Showing while already visible is absorbed. Hiding mid-enter reverses
    /// the animation in place; the visible fraction is continuous across the
    /// flip. Showing while the exit is still running queues a fresh cycle
    /// that starts once the close completes.
    pub fn set_desired_visible(&mut self, visible: bool) {
        if !self.mounted {
            return;
        }
        self.desired = visible;
        match (self.state, visible) {
            (Visibility::Hidden, true) => {
                self.state = Visibility::Showing;
                self.transition = Some(Transition::begin(self.clock.now(), self.duration));
                debug!("overlay Hidden -> Showing");
            }
            (Visibility::Showing | Visibility::Shown, true) => {
                debug!("show request absorbed; overlay already visible");
            }
            (Visibility::Showing, false) => {
                let now = self.clock.now();
                self.transition = Some(match self.transition.take() {
                    Some(enter) => Transition::begin_reversed(now, self.duration, &enter),
                    None => Transition::begin(now, self.duration),
                });
                self.state = Visibility::Hiding;
                debug!("overlay Showing -> Hiding (enter reversed in place)");
            }
            (Visibility::Shown, false) => {
                self.state = Visibility::Hiding;
                self.transition = Some(Transition::begin(self.clock.now(), self.duration));
                debug!("overlay Shown -> Hiding");
            }
            (Visibility::Hiding, true) => {
                debug!("show request queued until the running close completes");
            }
            (Visibility::Hiding | Visibility::Hidden, false) => {}
        }
    }

    /// Advances the lifecycle and reports any edges crossed.
    pub fn frame(&mut self) -> SmallVec<[VisibilityEvent; 2]> {
        let mut events = SmallVec::new();
        if !self.mounted {
            return events;
        }
        let now = self.clock.now();
        let finished = self.transition.as_ref().is_some_and(|t| t.is_complete(now));
        if !finished {
            return events;
        }
        self.transition = None;
        match self.state {
            Visibility::Showing => {
                self.state = Visibility::Shown;
                debug!("overlay Showing -> Shown");
                events.push(VisibilityEvent::Opened);
            }
            Visibility::Hiding => {
                self.state = Visibility::Hidden;
                debug!("overlay Hiding -> Hidden");
                events.push(VisibilityEvent::Closed);
                if self.desired {
                    // A show request arrived while closing; begin the queued
                    // fresh cycle now that the old one has fully resolved.
                    self.state = Visibility::Showing;
                    self.transition = Some(Transition::begin(now, self.duration));
                    debug!("overlay Hidden -> Showing (queued show)");
                }
            }
            Visibility::Hidden | Visibility::Shown => {}
        }
        events
    }

    /// Stops delivering lifecycle events.
    ///
    /// A completion that lands after the surrounding component has been torn
    /// down must not fire callbacks into freed host state.
    pub fn unmount(&mut self) {
        self.mounted = false;
        debug!("overlay unmounted; suppressing further lifecycle events");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const D: Duration = Duration::from_millis(300);

    fn controller(duration: Duration) -> (VisibilityController, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (
            VisibilityController::new(duration, clock.clone()),
            clock,
        )
    }

    #[test]
    fn full_cycle_reports_each_edge_once() {
        let (mut overlay, clock) = controller(D);
        overlay.set_desired_visible(true);
        assert_eq!(overlay.state(), Visibility::Showing);
        assert!(overlay.frame().is_empty());

        clock.advance(D);
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Opened]);
        assert_eq!(overlay.state(), Visibility::Shown);
        assert!(overlay.frame().is_empty());

        overlay.set_desired_visible(false);
        clock.advance(D);
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Closed]);
        assert_eq!(overlay.state(), Visibility::Hidden);

        // Extra pumps after the cycle stay silent.
        clock.advance(D);
        assert!(overlay.frame().is_empty());
    }

    #[test]
    fn rapid_toggle_never_rests_and_never_flashes() {
        let (mut overlay, clock) = controller(D);
        overlay.set_desired_visible(true);
        clock.advance(D / 3);
        assert!(overlay.frame().is_empty());

        let before = overlay.visible_fraction();
        overlay.set_desired_visible(false);
        let after = overlay.visible_fraction();
        assert_eq!(overlay.state(), Visibility::Hiding);
        assert!((before - after).abs() < 1e-6);

        // The reversed exit only has the covered third left to play.
        clock.advance(D / 3);
        clock.advance(Duration::from_millis(1));
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Closed]);
        assert_eq!(overlay.state(), Visibility::Hidden);
    }

    #[test]
    fn reshow_while_visible_is_absorbed() {
        let (mut overlay, clock) = controller(D);
        overlay.set_desired_visible(true);
        clock.advance(D / 2);
        let mid = overlay.visible_fraction();
        overlay.set_desired_visible(true);
        assert_eq!(overlay.visible_fraction(), mid);
        assert!(overlay.frame().is_empty());
        assert_eq!(overlay.state(), Visibility::Showing);
    }

    #[test]
    fn show_during_close_queues_a_fresh_cycle() {
        let (mut overlay, clock) = controller(D);
        overlay.set_desired_visible(true);
        clock.advance(D);
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Opened]);

        overlay.set_desired_visible(false);
        clock.advance(D / 2);
        overlay.set_desired_visible(true);
        assert_eq!(overlay.state(), Visibility::Hiding);

        clock.advance(D / 2);
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Closed]);
        assert_eq!(overlay.state(), Visibility::Showing);

        clock.advance(D);
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Opened]);
    }

    #[test]
    fn zero_duration_completes_on_the_next_pump() {
        let (mut overlay, _clock) = controller(Duration::ZERO);
        overlay.set_desired_visible(true);
        assert_eq!(overlay.state(), Visibility::Showing);
        assert!(overlay.is_animating());
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Opened]);
        assert_eq!(overlay.visible_fraction(), 1.0);
        assert!(!overlay.is_animating());

        overlay.set_desired_visible(false);
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Closed]);
        assert_eq!(overlay.visible_fraction(), 0.0);
    }

    #[test]
    fn unmount_suppresses_pending_completions() {
        let (mut overlay, clock) = controller(D);
        overlay.set_desired_visible(true);
        clock.advance(D);
        assert_eq!(overlay.frame().as_slice(), [VisibilityEvent::Opened]);

        overlay.set_desired_visible(false);
        overlay.unmount();
        clock.advance(D);
        assert!(overlay.frame().is_empty());
        assert!(!overlay.is_mounted());
    }

    #[test]
    fn fraction_tracks_the_eased_timeline() {
        let (mut overlay, clock) = controller(D);
        assert_eq!(overlay.visible_fraction(), 0.0);
        overlay.set_desired_visible(true);
        assert_eq!(overlay.visible_fraction(), 0.0);
        clock.advance(D / 2);
        assert!((overlay.visible_fraction() - 0.5).abs() < 1e-3);
        clock.advance(D / 2);
        overlay.frame();
        assert_eq!(overlay.visible_fraction(), 1.0);
        assert!(!overlay.is_animating());
    }

    #[test]
    fn pumping_only_while_animating_lands_both_edges() {
        let (mut overlay, clock) = controller(D);
        let mut events = Vec::new();

        overlay.set_desired_visible(true);
        while overlay.is_animating() {
            clock.advance(D / 4);
            events.extend(overlay.frame());
        }
        assert_eq!(events.as_slice(), [VisibilityEvent::Opened]);

        overlay.set_desired_visible(false);
        clock.advance(D);
        // Played out but not yet pumped: the closing edge is still owed.
        assert!(overlay.is_animating());
        events.extend(overlay.frame());
        assert!(!overlay.is_animating());
        assert_eq!(
            events.as_slice(),
            [VisibilityEvent::Opened, VisibilityEvent::Closed]
        );
    }
}
