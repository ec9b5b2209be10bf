//! Step machine for multi-step picker flows.
//!
//! A combined date-and-time request is served by two single-purpose widgets
//! in a row. The sequencer tracks which piece is still missing, carries the
//! date picked in step one across to step two, and merges the pieces into one
//! final value. Bounds are enforced only on that final value; intermediate
//! picks may wander outside them because the remaining step can still pull
//! the result back in.

use tracing::debug;

use crate::timestamp::{CalendarDate, Timestamp};

/// What a picker session collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerMode {
    /// A calendar date; the time of day is kept from the initial value.
    #[default]
    DateOnly,
    /// A time of day; the date is kept from the initial value.
    TimeOnly,
    /// A date step followed by a time step.
    Combined,
}

/// Which piece of the requested value is still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    /// The date widget is up next (or showing).
    AwaitingDate,
    /// The time widget is up next (or showing).
    AwaitingTime,
    /// Every piece has been collected.
    Done,
}

/// Result of feeding a picked value to the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Another step remains; present its widget next.
    NextStep(StepId),
    /// All pieces are in; this is the final, bounds-checked value.
    Done(Timestamp),
    /// The value did not match the active step and was dropped.
    Ignored,
}

/// Collects per-step picks into one final timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequencer {
    mode: PickerMode,
    step: StepId,
    initial_value: Timestamp,
    min_value: Option<Timestamp>,
    max_value: Option<Timestamp>,
    carried_date: Option<CalendarDate>,
}

impl StepSequencer {
    /// Starts a sequence at the first step `mode` requires.
    pub fn new(
        mode: PickerMode,
        initial_value: Timestamp,
        min_value: Option<Timestamp>,
        max_value: Option<Timestamp>,
    ) -> Self {
        let step = match mode {
            PickerMode::TimeOnly => StepId::AwaitingTime,
            PickerMode::DateOnly | PickerMode::Combined => StepId::AwaitingDate,
        };
        Self {
            mode,
            step,
            initial_value,
            min_value,
            max_value,
            carried_date: None,
        }
    }

    /// The active step.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// The configured mode.
    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    /// The value the active step's widget should start from.
    ///
    /// The time step of a combined sequence shows the date picked in step one
    /// with the hour and minute of the initial value, so the user edits from
    /// familiar ground instead of midnight.
    pub fn prefill(&self) -> Timestamp {
        match self.step {
            StepId::AwaitingTime => Timestamp::merge(
                self.carried_date.unwrap_or_else(|| self.initial_value.date()),
                self.initial_value.time(),
            ),
            StepId::AwaitingDate | StepId::Done => self.initial_value,
        }
    }

    /// Feeds the value reported by the active step's widget.
    pub fn advance(&mut self, picked: Timestamp) -> Advance {
        match (self.step, self.mode) {
            (StepId::AwaitingDate, PickerMode::Combined) => {
                self.carried_date = Some(picked.date());
                self.step = StepId::AwaitingTime;
                Advance::NextStep(StepId::AwaitingTime)
            }
            (StepId::AwaitingDate, PickerMode::DateOnly) => Advance::Done(
                self.finish(Timestamp::merge(picked.date(), self.initial_value.time())),
            ),
            (StepId::AwaitingTime, PickerMode::Combined) => {
                let date = self
                    .carried_date
                    .unwrap_or_else(|| self.initial_value.date());
                Advance::Done(self.finish(Timestamp::merge(date, picked.time())))
            }
            (StepId::AwaitingTime, PickerMode::TimeOnly) => Advance::Done(
                self.finish(Timestamp::merge(self.initial_value.date(), picked.time())),
            ),
            (step, mode) => {
                debug!("dropping picked value for inactive step {step:?} in mode {mode:?}");
                Advance::Ignored
            }
        }
    }

    /// Resolves the sequence directly with a full working value.
    ///
    /// Persistent-widget sessions skip the per-step dance; the explicit
    /// confirm action lands here so the final bounds check still applies.
    pub fn complete(&mut self, value: Timestamp) -> Timestamp {
        self.finish(value)
    }

    fn finish(&mut self, merged: Timestamp) -> Timestamp {
        let value = merged.clamp_to(self.min_value, self.max_value);
        if value != merged {
            debug!("final value {merged} fell outside bounds; clamped to {value}");
        }
        self.step = StepId::Done;
        value
    }
}
