//! Binds the engine to one scroll surface.
//!
//! The control subscribes to the surface's [`SampleSource`], feeds every
//! offset sample through the [`InteractionStateMachine`] and turns the
//! outcome into renderer, activity and inset writes. Engine state lives in a
//! `RefCell` that is never borrowed while a collaborator is called, so a
//! collaborator may call back into the control synchronously.

use crate::config::RefreshConfig;
use crate::dismissal::DismissalAnimationPlan;
use crate::error::ConfigError;
use crate::guard::ReentrancyGuard;
use crate::metrics::ShapeMetrics;
use crate::shape::{IndicatorBounds, PathSet, ShapeGeometryBuilder};
use crate::state_machine::{
    Evaluation, InteractionState, InteractionStateMachine, Outcome, ScrollContext,
};
use crate::surface::{
    ActivityIndicator, IndicatorRenderer, SampleListener, SampleSource, ScrollSample,
    ScrollSurface, SubscriptionId, SurfaceHeaders,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use teardrop_graphics::{Color, EdgeInsets, Orientation, Point, Rect, Size};

/// Invoked once per pull that reaches the trigger edge.
pub type RefreshCallback = Box<dyn FnMut(&RefreshHandle)>;

/// Strip the indicator occupies, just before the content's leading edge.
pub fn indicator_frame(
    orientation: Orientation,
    metrics: &ShapeMetrics,
    viewport: Size,
    inset: EdgeInsets,
) -> Rect {
    let total = metrics.total_extent;
    match orientation {
        Orientation::Vertical => Rect::new(0.0, -(total + inset.top), viewport.width, total),
        Orientation::Horizontal => Rect::new(-(total + inset.left), 0.0, total, viewport.height),
    }
}

struct Engine {
    machine: InteractionStateMachine,
    builder: ShapeGeometryBuilder,
    dismissal_pending: bool,
}

enum Effect {
    Nothing,
    Clear,
    Draw(PathSet),
    Trigger(DismissalAnimationPlan),
    Pin {
        translation: Point,
        activity_center: Point,
        inset: Option<EdgeInsets>,
    },
}

impl Engine {
    fn new(config: &RefreshConfig, viewport: Size) -> Self {
        Self {
            machine: InteractionStateMachine::new(config.metrics, config.orientation),
            builder: builder_for(config, viewport),
            dismissal_pending: false,
        }
    }

    fn effect(&self, offset: f32, evaluation: Evaluation, config: &RefreshConfig) -> Effect {
        match evaluation.outcome {
            Outcome::Drawable(params) => Effect::Draw(self.builder.build(offset, &params)),
            Outcome::Suppressed => Effect::Clear,
            Outcome::TriggerFired(params) => {
                let head = self.builder.head_center(offset, &params);
                let closed = self.builder.closed_body(head);
                Effect::Trigger(DismissalAnimationPlan::on_trigger(closed, &config.timing))
            }
            Outcome::Pinned { offset } => {
                let metrics = &config.metrics;
                let orientation = config.orientation;
                let translation = orientation.point(
                    0.0,
                    metrics.max_distance + offset + metrics.opened_extent,
                );
                let total = metrics.total_extent;
                let opened = metrics.opened_extent;
                let activity_main =
                    (offset + total + (opened / 2.0).floor()).min(total - opened / 2.0);
                Effect::Pin {
                    translation,
                    activity_center: orientation
                        .point(self.builder.bounds().cross_center(), activity_main),
                    inset: evaluation.inset,
                }
            }
            Outcome::Unchanged => Effect::Nothing,
        }
    }
}

fn builder_for(config: &RefreshConfig, viewport: Size) -> ShapeGeometryBuilder {
    let bounds = IndicatorBounds::for_viewport(viewport, config.orientation, &config.metrics);
    ShapeGeometryBuilder::new(config.metrics, bounds, config.orientation)
}

struct ControlShared {
    this: Weak<ControlShared>,
    surface: Rc<dyn ScrollSurface>,
    renderer: Rc<dyn IndicatorRenderer>,
    activity: Rc<dyn ActivityIndicator>,
    config: RefreshConfig,
    engine: RefCell<Engine>,
    // Mirrors of engine state, readable while the engine is borrowed.
    state: Cell<InteractionState>,
    frame: Cell<Rect>,
    original_inset: Cell<EdgeInsets>,
    guard: ReentrancyGuard,
    enabled: Cell<bool>,
    tint: Cell<Color>,
    detached: Cell<bool>,
    on_refresh: RefCell<Option<RefreshCallback>>,
}

impl ControlShared {
    fn handle(&self) -> RefreshHandle {
        RefreshHandle {
            shared: self.this.clone(),
        }
    }

    /// Reports use after [`RefreshControl::detach`]: fatal in debug builds,
    /// otherwise logged and ignored.
    fn is_torn_down(&self, what: &dyn std::fmt::Debug) -> bool {
        if !self.detached.get() {
            return false;
        }
        if cfg!(debug_assertions) {
            panic!("{what:?} delivered to a detached refresh control");
        }
        log::warn!("ignoring {what:?} delivered after detach");
        true
    }

    fn offset_changed(&self, content_offset: Point) {
        let orientation = self.config.orientation;
        let leading = orientation.leading_inset(self.original_inset.get());
        self.evaluate(orientation.main(content_offset) + leading);
    }

    fn inset_changed(&self, inset: EdgeInsets) {
        let viewport = self.surface.viewport_size();
        match self.engine.try_borrow_mut() {
            Ok(mut engine) => engine.builder = builder_for(&self.config, viewport),
            Err(_) => {
                log::warn!("dropping re-entrant inset sample {inset:?}");
                return;
            }
        }
        let frame = indicator_frame(self.config.orientation, &self.config.metrics, viewport, inset);
        self.original_inset.set(inset);
        self.frame.set(frame);
        log::debug!("original inset now {inset:?}, frame {frame:?}");
        self.renderer.set_frame(frame);
    }

    fn evaluate(&self, offset: f32) -> Outcome {
        if self.is_torn_down(&offset) || !self.enabled.get() {
            return Outcome::Suppressed;
        }
        if !offset.is_finite() {
            log::warn!("dropping non-finite scroll offset {offset}");
            return Outcome::Suppressed;
        }

        let headers = SurfaceHeaders(&*self.surface);
        let context = ScrollContext {
            is_dragging: self.surface.is_dragging(),
            is_tracking: self.surface.is_tracking(),
            original_inset: self.original_inset.get(),
            headers: &headers,
        };
        let (outcome, effect) = {
            let Ok(mut engine) = self.engine.try_borrow_mut() else {
                log::warn!("dropping re-entrant evaluation of offset {offset}");
                return Outcome::Suppressed;
            };
            let evaluation = engine.machine.evaluate(offset, &context);
            if matches!(evaluation.outcome, Outcome::TriggerFired(_)) {
                // A new refresh outlives any end plan still in flight.
                engine.dismissal_pending = false;
            }
            self.state.set(engine.machine.state());
            (
                evaluation.outcome,
                engine.effect(offset, evaluation, &self.config),
            )
        };
        self.apply(effect);
        outcome
    }

    fn apply(&self, effect: Effect) {
        match effect {
            Effect::Nothing => {}
            Effect::Clear => self.renderer.clear_paths(),
            Effect::Draw(paths) => self.renderer.set_paths(&paths),
            Effect::Trigger(plan) => {
                log::debug!("refresh triggered");
                self.activity.set_scale(self.config.timing.activity_initial_scale);
                self.renderer.run(&plan);
                self.notify_refresh();
            }
            Effect::Pin {
                translation,
                activity_center,
                inset,
            } => {
                self.renderer.set_body_translation(translation);
                self.activity.set_center(activity_center);
                if let Some(inset) = inset {
                    self.guard.suppress(|| self.surface.set_content_inset(inset));
                }
            }
        }
    }

    fn notify_refresh(&self) {
        let callback = self.on_refresh.borrow_mut().take();
        let Some(mut callback) = callback else {
            return;
        };
        callback(&self.handle());
        if self.detached.get() {
            return;
        }
        let mut slot = self.on_refresh.borrow_mut();
        if slot.is_none() {
            *slot = Some(callback);
        }
    }

    fn begin_refreshing(&self) {
        if self.detached.get() {
            log::debug!("begin_refreshing on a detached control");
            return;
        }
        let opened = {
            let mut engine = self.engine.borrow_mut();
            let opened = engine.machine.begin_refreshing(self.original_inset.get());
            if opened.is_some() {
                engine.dismissal_pending = false;
            }
            self.state.set(engine.machine.state());
            opened
        };
        let Some(opened) = opened else {
            return;
        };

        self.renderer.run(&DismissalAnimationPlan::on_begin_refreshing());
        self.activity.set_alpha(1.0);
        self.activity.set_scale(1.0);

        let offset = self.surface.content_offset();
        self.guard.suppress(|| {
            self.surface.set_content_inset(opened);
            self.surface.set_content_offset(offset);
        });
    }

    fn end_refreshing(&self) -> bool {
        if self.detached.get() {
            log::debug!("end_refreshing on a detached control");
            return false;
        }
        {
            let mut engine = self.engine.borrow_mut();
            if !engine.machine.end_refreshing() {
                return false;
            }
            engine.dismissal_pending = true;
            self.state.set(engine.machine.state());
        }

        let original = self.original_inset.get();
        self.guard.suppress_insets(|| self.surface.set_content_inset(original));
        self.renderer.run(&DismissalAnimationPlan::on_end_refreshing(&self.config.timing));
        true
    }

    fn finish_dismissal(&self) {
        {
            let mut engine = self.engine.borrow_mut();
            if !engine.dismissal_pending {
                log::debug!("finish_dismissal without a pending dismissal");
                return;
            }
            engine.dismissal_pending = false;
            if engine.machine.is_refreshing() {
                log::debug!("stale finish_dismissal ignored while refreshing");
                return;
            }
            engine.machine.finish_dismissal();
            self.state.set(engine.machine.state());
        }

        let original = self.original_inset.get();
        self.renderer.remove_all_animations();
        self.renderer.clear_paths();
        self.renderer.set_body_translation(Point::ZERO);
        self.guard.suppress_insets(|| self.surface.set_content_inset(original));
    }
}

impl SampleListener for ControlShared {
    fn on_sample(&self, sample: ScrollSample) {
        if self.is_torn_down(&sample) || !self.guard.admits(&sample) {
            return;
        }
        match sample {
            ScrollSample::ContentInset(inset) => self.inset_changed(inset),
            ScrollSample::ContentOffset(offset) => {
                if self.enabled.get() {
                    self.offset_changed(offset);
                }
            }
        }
    }
}

/// Weak handle for callbacks and animation drivers. Every call is a no-op
/// once the control is gone.
#[derive(Clone)]
pub struct RefreshHandle {
    shared: Weak<ControlShared>,
}

impl RefreshHandle {
    pub fn is_attached(&self) -> bool {
        self.shared.upgrade().is_some_and(|shared| !shared.detached.get())
    }

    pub fn is_refreshing(&self) -> bool {
        self.shared.upgrade().is_some_and(|shared| shared.state.get().is_refreshing())
    }

    pub fn begin_refreshing(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.begin_refreshing();
        }
    }

    pub fn end_refreshing(&self) -> bool {
        self.shared.upgrade().is_some_and(|shared| shared.end_refreshing())
    }

    pub fn finish_dismissal(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.finish_dismissal();
        }
    }

    /// Runs `inspect` against the control's re-entrancy flags.
    pub fn with_guard<R>(&self, inspect: impl FnOnce(&ReentrancyGuard) -> R) -> Option<R> {
        self.shared.upgrade().map(|shared| inspect(&shared.guard))
    }
}

impl std::fmt::Debug for RefreshHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// A pull-to-refresh indicator attached to one scroll surface.
pub struct RefreshControl {
    shared: Rc<ControlShared>,
    source: Rc<dyn SampleSource>,
    subscription: Option<SubscriptionId>,
}

impl RefreshControl {
    pub fn attach(
        surface: Rc<dyn ScrollSurface>,
        source: Rc<dyn SampleSource>,
        renderer: Rc<dyn IndicatorRenderer>,
        activity: Rc<dyn ActivityIndicator>,
        config: RefreshConfig,
    ) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let viewport = surface.viewport_size();
        let inset = surface.content_inset();
        let engine = Engine::new(&config, viewport);
        let frame = indicator_frame(config.orientation, &config.metrics, viewport, inset);
        let activity_center = config.orientation.point(
            engine.builder.bounds().cross_center(),
            (config.metrics.total_extent / 2.0).floor(),
        );

        let shared = Rc::new_cyclic(|this| ControlShared {
            this: this.clone(),
            surface,
            renderer,
            activity,
            config,
            engine: RefCell::new(engine),
            state: Cell::new(InteractionState::default()),
            frame: Cell::new(frame),
            original_inset: Cell::new(inset),
            guard: ReentrancyGuard::new(),
            enabled: Cell::new(true),
            tint: Cell::new(config.style.tint),
            detached: Cell::new(false),
            on_refresh: RefCell::new(None),
        });

        shared.renderer.apply_style(&config.style);
        shared.renderer.set_frame(frame);
        shared.activity.set_center(activity_center);
        shared.activity.set_alpha(0.0);
        shared.activity.set_scale(config.timing.activity_initial_scale);
        shared.activity.start_animating();

        let listener: Rc<dyn SampleListener> = shared.clone();
        let subscription = source.subscribe(listener);
        log::debug!(
            "refresh control attached ({:?}, frame {frame:?})",
            config.orientation
        );

        Ok(Self {
            shared,
            source,
            subscription: Some(subscription),
        })
    }

    /// Registers the refresh callback, replacing any previous one.
    pub fn on_refresh(&self, callback: impl FnMut(&RefreshHandle) + 'static) {
        *self.shared.on_refresh.borrow_mut() = Some(Box::new(callback));
    }

    pub fn handle(&self) -> RefreshHandle {
        self.shared.handle()
    }

    /// Evaluates `offset` as if the surface had reported it and applies the
    /// result.
    pub fn evaluate(&self, offset: f32) -> Outcome {
        self.shared.evaluate(offset)
    }

    pub fn begin_refreshing(&self) {
        self.shared.begin_refreshing();
    }

    /// Returns `false` when no refresh was running.
    pub fn end_refreshing(&self) -> bool {
        self.shared.end_refreshing()
    }

    /// Called by the animation driver once the end-of-refresh plan finished.
    pub fn finish_dismissal(&self) {
        self.shared.finish_dismissal();
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.shared.enabled.set(enabled);
        self.shared.renderer.set_body_hidden(!enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.get()
    }

    /// Changes the body fill; the arrow and highlight keep their colours.
    pub fn set_tint_color(&self, tint: Color) {
        self.shared.tint.set(tint);
        self.shared.renderer.set_body_fill(tint);
    }

    pub fn tint_color(&self) -> Color {
        self.shared.tint.get()
    }

    pub fn is_refreshing(&self) -> bool {
        self.shared.state.get().is_refreshing()
    }

    pub fn state(&self) -> InteractionState {
        self.shared.state.get()
    }

    pub fn guard(&self) -> &ReentrancyGuard {
        &self.shared.guard
    }

    pub fn frame(&self) -> Rect {
        self.shared.frame.get()
    }

    pub fn original_inset(&self) -> EdgeInsets {
        self.shared.original_inset.get()
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.shared.config
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stops sample delivery. Runs on drop as well.
    pub fn detach(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        self.source.unsubscribe(subscription);
        self.shared.detached.set(true);
        if let Ok(mut slot) = self.shared.on_refresh.try_borrow_mut() {
            slot.take();
        }
        log::debug!("refresh control detached");
    }
}

impl Drop for RefreshControl {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for RefreshControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshControl")
            .field("state", &self.state())
            .field("enabled", &self.is_enabled())
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_frame_sits_above_the_content() {
        let frame = indicator_frame(
            Orientation::Vertical,
            &ShapeMetrics::default(),
            Size::new(320.0, 480.0),
            EdgeInsets::from_components(0.0, 20.0, 0.0, 0.0),
        );
        assert_eq!(frame, Rect::new(0.0, -420.0, 320.0, 400.0));
    }

    #[test]
    fn horizontal_frame_sits_left_of_the_content() {
        let frame = indicator_frame(
            Orientation::Horizontal,
            &ShapeMetrics::default(),
            Size::new(320.0, 480.0),
            EdgeInsets::from_components(10.0, 20.0, 0.0, 0.0),
        );
        assert_eq!(frame, Rect::new(-410.0, 0.0, 400.0, 480.0));
    }
}
