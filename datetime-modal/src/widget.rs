//! The native picker widget seam.
//!
//! ## Usage
//!
//! The picker core never draws a calendar or a clock face itself. It asks a
//! [`WidgetHost`] to present one native widget per step via a [`StepPrompt`],
//! and the host feeds the user's activity back as [`WidgetEvent`]s. A test can
//! stand in a recording host; a platform shell forwards to whatever widget the
//! OS provides.

use derive_setters::Setters;
use thiserror::Error;

use crate::timestamp::Timestamp;

/// How the platform presents picker widgets during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetFlow {
    /// One persistent widget lives inside the overlay for the whole session
    /// and the user resolves it through explicit confirm / cancel controls.
    #[default]
    Spinner,
    /// Each step opens a self-contained native dialog that commits or
    /// dismisses on its own; picking the final step's value confirms the
    /// session without a separate confirm control.
    StepDialogs,
}

/// Presentation style hint, handed to the widget host unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetDisplay {
    /// Let the platform pick its default presentation.
    #[default]
    Default,
    /// Wheel presentation.
    Spinner,
    /// Calendar grid presentation.
    Calendar,
    /// Clock face presentation.
    Clock,
    /// Collapsed field that expands on tap.
    Compact,
    /// Expanded in-place presentation.
    Inline,
}

/// Cosmetic and locale configuration forwarded to the native widget.
///
/// The core never interprets these fields; invalid combinations are the
/// platform widget's problem to reject.
#[derive(Debug, Clone, PartialEq, Eq, Setters)]
pub struct WidgetOptions {
    /// Force a 24-hour or 12-hour clock; `None` follows the device setting.
    #[setters(strip_option)]
    pub is_24_hour: Option<bool>,
    /// Step between selectable minutes.
    pub minute_interval: u8,
    /// Presentation style hint.
    pub display: WidgetDisplay,
    /// Locale tag for month and weekday names.
    #[setters(strip_option, into)]
    pub locale: Option<String>,
    /// Fixed display offset from UTC, in minutes.
    #[setters(strip_option)]
    pub timezone_offset_minutes: Option<i32>,
    /// Keep the confirm action enabled even while a drag gesture is open.
    pub never_disable_confirm: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            is_24_hour: None,
            minute_interval: 1,
            display: WidgetDisplay::Default,
            locale: None,
            timezone_offset_minutes: None,
            never_disable_confirm: false,
        }
    }
}

/// The widget shape a prompt asks the host to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// A calendar date widget.
    Date,
    /// A time-of-day widget.
    Time,
    /// A single widget that edits the full timestamp.
    DateTime,
}

/// Everything the host needs to present the widget for the active step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPrompt {
    /// Which widget shape to present.
    pub kind: PromptKind,
    /// The value the widget starts from.
    pub value: Timestamp,
    /// Inclusive lower bound, enforced live by the widget.
    pub min_value: Option<Timestamp>,
    /// Inclusive upper bound, enforced live by the widget.
    pub max_value: Option<Timestamp>,
    /// Pass-through configuration.
    pub options: WidgetOptions,
}

/// Activity reported back by the presented widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The user moved the widget to a new value.
    Changed(Timestamp),
    /// The user backed out of the widget without picking.
    Dismissed,
}

/// Failure to present a native widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The platform has no widget to offer right now.
    #[error("native widget unavailable: {reason}")]
    Unavailable {
        /// Platform-provided explanation.
        reason: String,
    },
    /// The platform refused the presentation request.
    #[error("native widget rejected the prompt: {reason}")]
    Rejected {
        /// Platform-provided explanation.
        reason: String,
    },
}

/// Platform collaborator that presents native picker widgets.
pub trait WidgetHost: Send + Sync {
    /// Present (or re-present) the widget described by `prompt`.
    ///
    /// Called once per step in [`WidgetFlow::StepDialogs`], once per session
    /// in [`WidgetFlow::Spinner`], and again whenever the prefill value is
    /// resynced while the widget is untouched.
    fn present(&self, prompt: &StepPrompt) -> Result<(), WidgetError>;

    /// Tear down whatever this host is currently presenting.
    ///
    /// Called when the session resolves so a dangling native dialog does not
    /// outlive the overlay. Hosts with nothing to tear down can ignore it.
    fn withdraw(&self) {}
}
