use crate::inset::{InsetTracker, InsetUpdate, NoSectionHeaders, SectionHeaders};
use crate::metrics::ShapeMetrics;
use crate::params::GeometryParameters;
use teardrop_graphics::{EdgeInsets, Orientation};

/// Discrete interaction state of one control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Armed; the indicator is not pulled into view.
    #[default]
    Idle,
    /// Armed and stretching.
    ArmedCanTrigger,
    /// Disarmed until the indicator scrolls out of view.
    ArmedCannotTrigger,
    /// The trigger edge was crossed by the last sample.
    Triggered,
    /// Pinned open while the host refreshes.
    Refreshing,
    /// The end-of-refresh plan is in flight.
    Dismissing,
}

impl InteractionState {
    pub fn can_trigger(self) -> bool {
        matches!(
            self,
            InteractionState::Idle | InteractionState::ArmedCanTrigger
        )
    }

    pub fn is_refreshing(self) -> bool {
        matches!(
            self,
            InteractionState::Triggered | InteractionState::Refreshing
        )
    }
}

/// Read-only view of the scroll surface for one evaluation.
#[derive(Clone, Copy)]
pub struct ScrollContext<'a> {
    pub is_dragging: bool,
    pub is_tracking: bool,
    pub original_inset: EdgeInsets,
    pub headers: &'a dyn SectionHeaders,
}

impl<'a> ScrollContext<'a> {
    pub fn new(headers: &'a dyn SectionHeaders) -> Self {
        Self {
            is_dragging: false,
            is_tracking: false,
            original_inset: EdgeInsets::default(),
            headers,
        }
    }

    pub fn with_dragging(mut self, is_dragging: bool) -> Self {
        self.is_dragging = is_dragging;
        self
    }

    pub fn with_tracking(mut self, is_tracking: bool) -> Self {
        self.is_tracking = is_tracking;
        self
    }

    pub fn with_original_inset(mut self, original_inset: EdgeInsets) -> Self {
        self.original_inset = original_inset;
        self
    }
}

impl Default for ScrollContext<'static> {
    fn default() -> Self {
        ScrollContext::new(&NoSectionHeaders)
    }
}

impl std::fmt::Debug for ScrollContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollContext")
            .field("is_dragging", &self.is_dragging)
            .field("is_tracking", &self.is_tracking)
            .field("original_inset", &self.original_inset)
            .finish_non_exhaustive()
    }
}

/// What the host should do with one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// Draw the shape for these parameters.
    Drawable(GeometryParameters),
    /// Clear the indicator layers.
    Suppressed,
    /// The pull reached the trigger edge; start the refresh.
    TriggerFired(GeometryParameters),
    /// Keep the indicator pinned relative to `offset`.
    Pinned { offset: f32 },
    /// Nothing to do.
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// Inset to write back to the surface, if any.
    pub inset: Option<EdgeInsets>,
}

impl Evaluation {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            inset: None,
        }
    }
}

/// Decides per sample whether the indicator is drawn, pinned, or fires.
///
/// Rules are checked in a fixed order: pinned states first, then the arming
/// rules, then the overscroll bounce tie-break, and finally the trigger edge.
#[derive(Clone, Debug)]
pub struct InteractionStateMachine {
    metrics: ShapeMetrics,
    orientation: Orientation,
    state: InteractionState,
    last_offset: f32,
    inset: InsetTracker,
}

impl InteractionStateMachine {
    pub fn new(metrics: ShapeMetrics, orientation: Orientation) -> Self {
        Self {
            metrics,
            orientation,
            state: InteractionState::Idle,
            last_offset: 0.0,
            inset: InsetTracker::default(),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.is_refreshing()
    }

    pub fn last_offset(&self) -> f32 {
        self.last_offset
    }

    pub fn inset_tracker(&self) -> &InsetTracker {
        &self.inset
    }

    pub fn metrics(&self) -> &ShapeMetrics {
        &self.metrics
    }

    pub fn evaluate(&mut self, offset: f32, context: &ScrollContext<'_>) -> Evaluation {
        if !offset.is_finite() {
            log::warn!("dropping non-finite scroll offset {offset}");
            return Evaluation::new(Outcome::Suppressed);
        }

        let evaluation = if self.state.is_refreshing() {
            self.pin(offset, context)
        } else {
            self.stretch(offset, context)
        };
        log::trace!(
            "offset {offset} -> {:?} ({:?})",
            evaluation.outcome,
            self.state
        );
        evaluation
    }

    /// Forces the pinned state without a pull. Returns the opened inset to
    /// write, or `None` if a refresh is already running.
    pub fn begin_refreshing(&mut self, original_inset: EdgeInsets) -> Option<EdgeInsets> {
        if self.state.is_refreshing() {
            log::debug!("begin_refreshing ignored: already refreshing");
            return None;
        }
        self.transition(InteractionState::Refreshing);
        Some(self.extended_inset(original_inset, self.metrics.opened_extent))
    }

    /// Leaves the pinned state. Returns `false` when nothing was refreshing.
    pub fn end_refreshing(&mut self) -> bool {
        if !self.state.is_refreshing() {
            log::debug!("end_refreshing ignored in {:?}", self.state);
            return false;
        }
        self.transition(InteractionState::Dismissing);
        true
    }

    /// The end-of-refresh plan completed.
    pub fn finish_dismissal(&mut self) {
        if self.state == InteractionState::Dismissing {
            self.transition(InteractionState::ArmedCannotTrigger);
        }
    }

    fn pin(&mut self, offset: f32, context: &ScrollContext<'_>) -> Evaluation {
        if self.state == InteractionState::Triggered {
            self.transition(InteractionState::Refreshing);
        }
        if offset == 0.0 {
            return Evaluation::new(Outcome::Unchanged);
        }

        let update = self.inset.update(
            offset,
            self.metrics.opened_extent,
            context.is_dragging,
            context.headers,
        );
        let inset = update.map(|update| match update {
            InsetUpdate::Extend(amount) => self.extended_inset(context.original_inset, amount),
            InsetUpdate::Restore => context.original_inset,
        });
        Evaluation {
            outcome: Outcome::Pinned { offset },
            inset,
        }
    }

    fn stretch(&mut self, offset: f32, context: &ScrollContext<'_>) -> Evaluation {
        let mut draw = true;
        if self.state.can_trigger() {
            if offset >= 0.0 {
                self.transition(InteractionState::Idle);
                draw = false;
            }
        } else if offset >= 0.0 {
            // Scrolled out of view: arm again.
            self.inset.reset();
            self.transition(InteractionState::Idle);
        } else {
            draw = false;
        }

        if offset > 0.0 && self.last_offset > offset && !context.is_tracking {
            // Momentum bounce rather than a pull.
            self.transition(InteractionState::ArmedCannotTrigger);
            draw = false;
        }
        self.last_offset = offset;

        if !draw {
            return Evaluation::new(Outcome::Suppressed);
        }

        let params = GeometryParameters::from_offset(offset, &self.metrics);
        if !params.is_relaxed() && params.is_saturated() {
            self.transition(InteractionState::Triggered);
            return Evaluation::new(Outcome::TriggerFired(params));
        }
        if offset < 0.0 {
            self.transition(InteractionState::ArmedCanTrigger);
        }
        Evaluation::new(Outcome::Drawable(params))
    }

    fn extended_inset(&self, original: EdgeInsets, amount: f32) -> EdgeInsets {
        let leading = self.orientation.leading_inset(original);
        self.orientation.with_leading_inset(original, leading + amount)
    }

    fn transition(&mut self, next: InteractionState) {
        if self.state != next {
            log::debug!("refresh state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
#[path = "tests/state_machine_tests.rs"]
mod tests;
