//! One editing session between the overlay opening and closing.
//!
//! ## Usage
//!
//! A [`PickerSession`] is created when the overlay starts to appear and
//! dropped once it has fully gone. It owns the working value the user is
//! editing, the confirm latch, and the gesture guard; the overlay around it
//! turns its replies into callbacks and step prompts.
//!
//! Cancelling never leaks edits: the working value dies with the session and
//! the next session starts from the request's initial value again.

use tracing::debug;

use crate::{
    interaction::InteractionGuard,
    sequencer::{Advance, PickerMode, StepId, StepSequencer},
    timestamp::Timestamp,
    widget::{PromptKind, WidgetEvent, WidgetFlow},
};

/// The value request a session works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerRequest {
    /// Where editing starts.
    pub initial_value: Timestamp,
    /// What to collect.
    pub mode: PickerMode,
    /// Inclusive lower bound on the final value.
    pub min_value: Option<Timestamp>,
    /// Inclusive upper bound on the final value.
    pub max_value: Option<Timestamp>,
}

/// How a session resolved, delivered with the hide notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseOutcome {
    /// Whether the session resolved through the confirm action.
    pub confirmed: bool,
    /// The committed value; present only when `confirmed` is true.
    pub value: Option<Timestamp>,
}

impl CloseOutcome {
    /// The outcome of a session that ended without committing.
    pub fn unconfirmed() -> Self {
        Self {
            confirmed: false,
            value: None,
        }
    }
}

/// What the surrounding overlay must do after handing an event to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionReply {
    /// The working value changed; the session continues on the same step.
    Updated,
    /// The session moved on; present the widget for this step.
    NextStep(StepId),
    /// The session resolved with a committed value.
    Confirmed(Timestamp),
    /// The session resolved without committing.
    Cancelled,
    /// The event did not apply and was dropped.
    Ignored,
}

/// The state of one open picker.
pub struct PickerSession {
    request: PickerRequest,
    flow: WidgetFlow,
    sequencer: StepSequencer,
    guard: InteractionGuard,
    working_value: Timestamp,
    did_confirm: bool,
    touched: bool,
}

impl PickerSession {
    /// Starts a session for `request`.
    pub fn new(request: PickerRequest, flow: WidgetFlow, never_disable_confirm: bool) -> Self {
        let guard = match flow {
            WidgetFlow::Spinner => InteractionGuard::live(never_disable_confirm),
            WidgetFlow::StepDialogs => InteractionGuard::idle(),
        };
        Self {
            request,
            flow,
            sequencer: StepSequencer::new(
                request.mode,
                request.initial_value,
                request.min_value,
                request.max_value,
            ),
            guard,
            working_value: request.initial_value,
            did_confirm: false,
            touched: false,
        }
    }

    /// The active step.
    pub fn step(&self) -> StepId {
        self.sequencer.step()
    }

    /// The widget shape to present right now, if any.
    ///
    /// A persistent widget serves the whole request with one shape; dialog
    /// steps switch shapes as the sequencer moves.
    pub fn prompt_kind(&self) -> Option<PromptKind> {
        match self.flow {
            WidgetFlow::Spinner => Some(match self.request.mode {
                PickerMode::DateOnly => PromptKind::Date,
                PickerMode::TimeOnly => PromptKind::Time,
                PickerMode::Combined => PromptKind::DateTime,
            }),
            WidgetFlow::StepDialogs => match self.sequencer.step() {
                StepId::AwaitingDate => Some(PromptKind::Date),
                StepId::AwaitingTime => Some(PromptKind::Time),
                StepId::Done => None,
            },
        }
    }

    /// Whether the confirm action may fire right now.
    pub fn confirm_enabled(&self) -> bool {
        self.guard.confirm_enabled()
    }

    /// How the session resolved. Meaningful once the overlay has closed.
    pub fn outcome(&self) -> CloseOutcome {
        CloseOutcome {
            confirmed: self.did_confirm,
            value: self.did_confirm.then_some(self.working_value),
        }
    }

    pub(crate) fn working_value(&self) -> Timestamp {
        self.working_value
    }

    pub(crate) fn prefill(&self) -> Timestamp {
        match self.flow {
            WidgetFlow::Spinner => self.working_value,
            WidgetFlow::StepDialogs => self.sequencer.prefill(),
        }
    }

    /// A touch landed on the widget.
    pub fn touch_began(&mut self) {
        self.touched = true;
        self.guard.touch_began();
    }

    /// Handles activity reported by the presented widget.
    pub fn widget_event(&mut self, event: WidgetEvent) -> SessionReply {
        match event {
            WidgetEvent::Dismissed => {
                self.did_confirm = false;
                SessionReply::Cancelled
            }
            WidgetEvent::Changed(value) => {
                self.touched = true;
                self.guard.value_committed();
                match self.flow {
                    WidgetFlow::Spinner => {
                        self.working_value = value;
                        SessionReply::Updated
                    }
                    WidgetFlow::StepDialogs => match self.sequencer.advance(value) {
                        Advance::NextStep(step) => {
                            self.working_value = self.sequencer.prefill();
                            SessionReply::NextStep(step)
                        }
                        Advance::Done(merged) => {
                            // The final dialog commits the whole request.
                            self.working_value = merged;
                            self.did_confirm = true;
                            SessionReply::Confirmed(merged)
                        }
                        Advance::Ignored => SessionReply::Ignored,
                    },
                }
            }
        }
    }

    /// Resolves the session through the confirm action.
    ///
    /// Returns `None` while a gesture is open; the caller should leave the
    /// session running and let the user settle first.
    pub fn confirm(&mut self) -> Option<Timestamp> {
        if !self.guard.confirm_enabled() {
            debug!("confirm ignored while a widget gesture is open");
            return None;
        }
        let value = self.sequencer.complete(self.working_value);
        self.working_value = value;
        self.did_confirm = true;
        Some(value)
    }

    /// Resolves the session without committing.
    pub fn cancel(&mut self) {
        self.did_confirm = false;
    }

    /// Replaces the initial value, if the user has not touched anything yet.
    ///
    /// Returns whether the session was reseeded. Once the user has interacted
    /// the session keeps their edits and the new value only seeds the next
    /// session.
    pub fn resync_initial(&mut self, value: Timestamp) -> bool {
        if self.touched {
            debug!("initial value changed after interaction; keeping the user's edits");
            return false;
        }
        self.request.initial_value = value;
        self.working_value = value;
        self.sequencer = StepSequencer::new(
            self.request.mode,
            value,
            self.request.min_value,
            self.request.max_value,
        );
        true
    }
}
