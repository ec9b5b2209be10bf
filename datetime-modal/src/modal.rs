//! The composed modal date/time picker.
//!
//! ## Usage
//!
//! Construct [`ModalPickerArgs`] with an initial value and a [`WidgetHost`],
//! chain setters for mode, flow, bounds and callbacks, and hand the args to
//! [`ModalDateTimePicker`]. The host then drives the component: forward
//! desired visibility and input events as they happen, pump
//! [`frame`](ModalDateTimePicker::frame) once per rendered frame, and sample
//! [`backdrop_alpha`](ModalDateTimePicker::backdrop_alpha) /
//! [`content_offset`](ModalDateTimePicker::content_offset) to draw the
//! overlay. A complete driving loop is shown in the crate-level docs.

use std::{sync::Arc, time::Duration};

use derive_setters::Setters;
use tracing::{debug, warn};

use crate::{
    callback::{Callback, CallbackWith},
    clock::{Clock, SystemClock},
    sequencer::PickerMode,
    session::{CloseOutcome, PickerRequest, PickerSession, SessionReply},
    timestamp::Timestamp,
    visibility::{Visibility, VisibilityController, VisibilityEvent},
    widget::{StepPrompt, WidgetEvent, WidgetFlow, WidgetHost, WidgetOptions},
};

/// Default enter/exit duration for the persistent-widget flow.
const ANIM_TIME: Duration = Duration::from_millis(300);
/// Backdrop opacity at rest.
const BACKDROP_ALPHA: f32 = 0.4;

/// Arguments for [`ModalDateTimePicker`].
#[derive(Clone, Setters)]
pub struct ModalPickerArgs {
    /// The value editing starts from.
    pub initial_value: Timestamp,
    /// What the picker collects.
    pub mode: PickerMode,
    /// How the platform presents picker widgets.
    pub flow: WidgetFlow,
    /// Inclusive lower bound on the committed value.
    #[setters(strip_option)]
    pub min_value: Option<Timestamp>,
    /// Inclusive upper bound on the committed value.
    #[setters(strip_option)]
    pub max_value: Option<Timestamp>,
    /// Pass-through configuration for the native widget.
    pub options: WidgetOptions,
    /// Label for the host-drawn confirm control.
    #[setters(into)]
    pub confirm_label: String,
    /// Label for the host-drawn cancel control.
    #[setters(into)]
    pub cancel_label: String,
    /// Overrides the flow's default enter/exit duration.
    #[setters(strip_option)]
    pub animation_duration: Option<Duration>,
    /// Platform collaborator that presents native widgets.
    #[setters(skip)]
    pub widget_host: Arc<dyn WidgetHost>,
    /// Fires the moment the user commits a value.
    #[setters(skip)]
    pub on_confirm: CallbackWith<Timestamp>,
    /// Fires the moment the user backs out.
    #[setters(skip)]
    pub on_cancel: Callback,
    /// Fires on every widget change with the new working value.
    #[setters(skip)]
    pub on_change: Option<CallbackWith<Timestamp>>,
    /// Fires when the enter animation completes.
    #[setters(skip)]
    pub on_opened: Option<Callback>,
    /// Fires when the exit animation completes, with the session's outcome.
    #[setters(skip)]
    pub on_hide: Option<CallbackWith<CloseOutcome>>,
}

impl ModalPickerArgs {
    /// Creates args with the required initial value and widget host.
    ///
    /// Everything else starts from defaults: date-only mode, the persistent
    /// spinner flow, no bounds, "Confirm" / "Cancel" labels and no-op
    /// callbacks.
    pub fn new(initial_value: Timestamp, widget_host: Arc<dyn WidgetHost>) -> Self {
        Self {
            initial_value,
            mode: PickerMode::default(),
            flow: WidgetFlow::default(),
            min_value: None,
            max_value: None,
            options: WidgetOptions::default(),
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
            animation_duration: None,
            widget_host,
            on_confirm: CallbackWith::new(|_| {}),
            on_cancel: Callback::default(),
            on_change: None,
            on_opened: None,
            on_hide: None,
        }
    }

    /// Sets the confirm handler.
    pub fn on_confirm<F>(mut self, on_confirm: F) -> Self
    where
        F: Fn(Timestamp) + Send + Sync + 'static,
    {
        self.on_confirm = CallbackWith::new(on_confirm);
        self
    }

    /// Sets the confirm handler from an existing shared handle.
    pub fn on_confirm_shared(mut self, on_confirm: impl Into<CallbackWith<Timestamp>>) -> Self {
        self.on_confirm = on_confirm.into();
        self
    }

    /// Sets the cancel handler.
    pub fn on_cancel<F>(mut self, on_cancel: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_cancel = Callback::new(on_cancel);
        self
    }

    /// Sets the cancel handler from an existing shared handle.
    pub fn on_cancel_shared(mut self, on_cancel: impl Into<Callback>) -> Self {
        self.on_cancel = on_cancel.into();
        self
    }

    /// Sets the change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(Timestamp) + Send + Sync + 'static,
    {
        self.on_change = Some(CallbackWith::new(on_change));
        self
    }

    /// Sets the change handler from an existing shared handle.
    pub fn on_change_shared(mut self, on_change: impl Into<CallbackWith<Timestamp>>) -> Self {
        self.on_change = Some(on_change.into());
        self
    }

    /// Sets the opened handler.
    pub fn on_opened<F>(mut self, on_opened: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_opened = Some(Callback::new(on_opened));
        self
    }

    /// Sets the opened handler from an existing shared handle.
    pub fn on_opened_shared(mut self, on_opened: impl Into<Callback>) -> Self {
        self.on_opened = Some(on_opened.into());
        self
    }

    /// Sets the hide handler.
    pub fn on_hide<F>(mut self, on_hide: F) -> Self
    where
        F: Fn(CloseOutcome) + Send + Sync + 'static,
    {
        self.on_hide = Some(CallbackWith::new(on_hide));
        self
    }

    /// Sets the hide handler from an existing shared handle.
    pub fn on_hide_shared(mut self, on_hide: impl Into<CallbackWith<CloseOutcome>>) -> Self {
        self.on_hide = Some(on_hide.into());
        self
    }
}

impl PartialEq for ModalPickerArgs {
    fn eq(&self, other: &Self) -> bool {
        self.initial_value == other.initial_value
            && self.mode == other.mode
            && self.flow == other.flow
            && self.min_value == other.min_value
            && self.max_value == other.max_value
            && self.options == other.options
            && self.confirm_label == other.confirm_label
            && self.cancel_label == other.cancel_label
            && self.animation_duration == other.animation_duration
            && Arc::ptr_eq(&self.widget_host, &other.widget_host)
            && self.on_confirm == other.on_confirm
            && self.on_cancel == other.on_cancel
            && self.on_change == other.on_change
            && self.on_opened == other.on_opened
            && self.on_hide == other.on_hide
    }
}

/// A modal date/time picker driven frame by frame by its host.
///
/// The component owns no rendering. The host forwards input (desired
/// visibility, widget events, touches, button and backdrop presses), pumps
/// [`frame`](Self::frame) once per rendered frame, and samples the
/// presentation values to draw the backdrop and content. Decision callbacks
/// fire from inside those calls; none are deferred to other threads.
pub struct ModalDateTimePicker {
    args: ModalPickerArgs,
    visibility: VisibilityController,
    session: Option<PickerSession>,
    viewport: (f32, f32),
}

impl ModalDateTimePicker {
    /// Creates a picker running on the real clock.
    pub fn new(args: ModalPickerArgs) -> Self {
        Self::with_clock(args, Arc::new(SystemClock))
    }

    /// Creates a picker sampling time from `clock`.
    ///
    /// Tests share a [`ManualClock`](crate::clock::ManualClock) with the
    /// picker and advance it explicitly to land animation completions.
    pub fn with_clock(args: ModalPickerArgs, clock: Arc<dyn Clock>) -> Self {
        let duration = args.animation_duration.unwrap_or(match args.flow {
            // Self-contained dialogs carry their own platform transitions;
            // the overlay around them snaps.
            WidgetFlow::StepDialogs => Duration::ZERO,
            WidgetFlow::Spinner => ANIM_TIME,
        });
        Self {
            visibility: VisibilityController::new(duration, clock),
            session: None,
            viewport: (0.0, 0.0),
            args,
        }
    }

    /// Updates the caller's desired visibility.
    ///
    /// Turning visible starts a session and presents the first widget.
    /// Turning hidden starts the exit animation; the session resolves as
    /// unconfirmed when it finishes. Repeated requests for the current state
    /// are absorbed.
    pub fn set_desired_visible(&mut self, visible: bool) {
        if !self.visibility.is_mounted() {
            return;
        }
        if visible {
            self.visibility.set_desired_visible(true);
            self.sync_session();
        } else if self.visibility.is_open() {
            self.begin_close();
        } else {
            self.visibility.set_desired_visible(false);
        }
    }

    /// Replaces the initial value.
    ///
    /// An open session is reseeded (and its widget re-presented) only while
    /// the user has not interacted yet; afterwards the value seeds the next
    /// session instead of clobbering the user's edits.
    pub fn set_initial_value(&mut self, value: Timestamp) {
        self.args.initial_value = value;
        if !self.visibility.is_open() {
            return;
        }
        let reseeded = self
            .session
            .as_mut()
            .is_some_and(|session| session.resync_initial(value));
        if reseeded {
            self.present_active_step();
        }
    }

    /// Updates the viewport the overlay is drawn into, in pixels.
    ///
    /// Safe to call mid-animation; rotation reflows the backdrop without
    /// touching the lifecycle.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    /// Advances animations and fires any lifecycle callbacks that came due.
    pub fn frame(&mut self) {
        for event in self.visibility.frame() {
            match event {
                VisibilityEvent::Opened => {
                    if let Some(on_opened) = &self.args.on_opened {
                        on_opened.call();
                    }
                }
                VisibilityEvent::Closed => {
                    let outcome = self
                        .session
                        .take()
                        .map_or_else(CloseOutcome::unconfirmed, |session| session.outcome());
                    if let Some(on_hide) = &self.args.on_hide {
                        on_hide.call(outcome);
                    }
                }
            }
        }
        self.sync_session();
    }

    /// Forwards activity reported by the presented native widget.
    pub fn widget_event(&mut self, event: WidgetEvent) {
        if !self.visibility.is_mounted() || !self.visibility.is_open() {
            debug!("widget event arrived while the overlay was closed; dropped");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.widget_event(event) {
            SessionReply::Updated => {
                let value = session.working_value();
                if let Some(on_change) = &self.args.on_change {
                    on_change.call(value);
                }
            }
            SessionReply::NextStep(_) => {
                let value = session.working_value();
                if let Some(on_change) = &self.args.on_change {
                    on_change.call(value);
                }
                self.present_active_step();
            }
            SessionReply::Confirmed(value) => {
                self.args.on_confirm.call(value);
                self.begin_close();
            }
            SessionReply::Cancelled => {
                self.args.on_cancel.call();
                self.begin_close();
            }
            SessionReply::Ignored => {}
        }
    }

    /// A touch landed on the widget area.
    pub fn touch_began(&mut self) {
        if !self.visibility.is_mounted() || !self.visibility.is_open() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.touch_began();
        }
    }

    /// The host-drawn confirm control was pressed.
    ///
    /// Ignored while a widget gesture is still open, so a value the user
    /// never settled on cannot be committed.
    pub fn confirm(&mut self) {
        if !self.visibility.is_mounted() || !self.visibility.is_open() {
            debug!("confirm ignored; overlay not open");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(value) = session.confirm() {
            self.args.on_confirm.call(value);
            self.begin_close();
        }
    }

    /// The host-drawn cancel control was pressed.
    pub fn cancel(&mut self) {
        if !self.visibility.is_mounted() || !self.visibility.is_open() || self.session.is_none() {
            return;
        }
        self.resolve_cancel();
    }

    /// The backdrop behind the content was pressed. Same as cancelling.
    pub fn backdrop_pressed(&mut self) {
        self.cancel();
    }

    /// Stops delivering callbacks; the surrounding component is going away.
    pub fn unmount(&mut self) {
        self.visibility.unmount();
    }

    /// The current lifecycle state.
    pub fn visibility(&self) -> Visibility {
        self.visibility.state()
    }

    /// Whether a session is live (the overlay is showing or shown).
    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// Whether an enter or exit transition is still unresolved.
    ///
    /// Holds true until the [`frame`](Self::frame) pump that reports the
    /// terminal edge, so a host that only pumps while animating cannot
    /// strand `on_opened` or `on_hide`.
    pub fn is_animating(&self) -> bool {
        self.visibility.is_animating()
    }

    /// Backdrop opacity for this frame, `0.0` to [`BACKDROP_ALPHA`].
    pub fn backdrop_alpha(&self) -> f32 {
        BACKDROP_ALPHA * self.visibility.visible_fraction()
    }

    /// Backdrop extents: a square of twice the viewport's larger dimension,
    /// so rotation mid-session never exposes uncovered screen.
    pub fn backdrop_size(&self) -> (f32, f32) {
        let side = 2.0 * self.viewport.0.max(self.viewport.1);
        (side, side)
    }

    /// Vertical content offset for this frame: viewport height (off-screen)
    /// down to `0.0` (at rest).
    pub fn content_offset(&self) -> f32 {
        self.viewport.1 * (1.0 - self.visibility.visible_fraction())
    }

    /// Whether the host should render the confirm control enabled.
    pub fn confirm_enabled(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.confirm_enabled())
    }

    /// Label for the host-drawn confirm control.
    pub fn confirm_label(&self) -> &str {
        &self.args.confirm_label
    }

    /// Label for the host-drawn cancel control.
    pub fn cancel_label(&self) -> &str {
        &self.args.cancel_label
    }

    /// Starts a session if the overlay is open and none is live.
    fn sync_session(&mut self) {
        if !self.visibility.is_open() || self.session.is_some() {
            return;
        }
        let request = PickerRequest {
            initial_value: self.args.initial_value,
            mode: self.args.mode,
            min_value: self.args.min_value,
            max_value: self.args.max_value,
        };
        debug!("session started: {:?} via {:?}", request.mode, self.args.flow);
        self.session = Some(PickerSession::new(
            request,
            self.args.flow,
            self.args.options.never_disable_confirm,
        ));
        self.present_active_step();
    }

    /// Asks the host to present the widget for the active step.
    ///
    /// A host that cannot present resolves the session as an immediate
    /// cancel; the caller learns about it through the ordinary cancel and
    /// hide callbacks instead of a half-open overlay with no widget in it.
    fn present_active_step(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(kind) = session.prompt_kind() else {
            return;
        };
        let prompt = StepPrompt {
            kind,
            value: session.prefill(),
            min_value: self.args.min_value,
            max_value: self.args.max_value,
            options: self.args.options.clone(),
        };
        if let Err(error) = self.args.widget_host.present(&prompt) {
            warn!("native widget failed to present: {error}");
            self.resolve_cancel();
        }
    }

    fn resolve_cancel(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        self.args.on_cancel.call();
        self.begin_close();
    }

    fn begin_close(&mut self) {
        self.args.widget_host.withdraw();
        self.visibility.set_desired_visible(false);
    }
}
