//! datetime-modal is a headless core for the classic mobile pattern: a button
//! opens a modal date/time picker, the user confirms or cancels, and the
//! caller receives exactly one resolution.
//!
//! The crate owns the behavior and none of the pixels. It runs the overlay
//! lifecycle (enter/exit animations, backdrop fade, slide-in offset), the
//! editing session (working value, multi-step date-then-time flows, bounds),
//! and the decision logic (confirm, cancel, dismiss, mid-gesture guarding).
//! Platform bindings stay outside, behind two seams:
//!
//! - [`WidgetHost`] presents the actual native widget for each step and
//!   reports the user's activity back as [`WidgetEvent`]s.
//! - [`Clock`] supplies time, so animations land deterministically in tests.
//!
//! The host drives the component frame by frame: forward input as it happens,
//! pump [`ModalDateTimePicker::frame`] once per rendered frame, and sample
//! the presentation values to draw the backdrop and content.
//!
//! # Usage
//!
//! ```
//! use std::{sync::Arc, time::Duration};
//!
//! use datetime_modal::{
//!     CalendarDate, ClockTime, ManualClock, ModalDateTimePicker, ModalPickerArgs, PickerMode,
//!     StepPrompt, Timestamp, WidgetError, WidgetEvent, WidgetHost,
//! };
//!
//! // A host that accepts every prompt; a real one would open a native widget.
//! struct Headless;
//!
//! impl WidgetHost for Headless {
//!     fn present(&self, _prompt: &StepPrompt) -> Result<(), WidgetError> {
//!         Ok(())
//!     }
//! }
//!
//! let midnight = |y, m, d| {
//!     let date = CalendarDate::new(y, m, d).expect("valid date");
//!     Timestamp::new(date, ClockTime::MIDNIGHT)
//! };
//!
//! let args = ModalPickerArgs::new(midnight(2024, 6, 1), Arc::new(Headless))
//!     .mode(PickerMode::DateOnly)
//!     .on_confirm(|value| println!("picked {value}"));
//!
//! let clock = Arc::new(ManualClock::new());
//! let mut picker = ModalDateTimePicker::with_clock(args, clock.clone());
//!
//! picker.set_desired_visible(true);
//! clock.advance(Duration::from_millis(300));
//! picker.frame(); // enter animation lands; the widget is interactive
//!
//! picker.widget_event(WidgetEvent::Changed(midnight(2024, 6, 15)));
//! picker.confirm(); // prints "picked 2024-06-15T00:00:00", starts the exit
//! assert!(!picker.is_open());
//!
//! clock.advance(Duration::from_millis(300));
//! picker.frame(); // exit animation lands; on_hide would fire here
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

mod animation;
pub mod callback;
pub mod clock;
pub mod interaction;
pub mod modal;
pub mod sequencer;
pub mod session;
pub mod timestamp;
pub mod visibility;
pub mod widget;

pub use crate::{
    callback::{Callback, CallbackWith},
    clock::{Clock, ManualClock, SystemClock},
    interaction::InteractionGuard,
    modal::{ModalDateTimePicker, ModalPickerArgs},
    sequencer::{Advance, PickerMode, StepId, StepSequencer},
    session::{CloseOutcome, PickerRequest, PickerSession, SessionReply},
    timestamp::{CalendarDate, ClockTime, Timestamp},
    visibility::{Visibility, VisibilityController, VisibilityEvent},
    widget::{
        PromptKind, StepPrompt, WidgetDisplay, WidgetError, WidgetEvent, WidgetFlow, WidgetHost,
        WidgetOptions,
    },
};
