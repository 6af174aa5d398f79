//! Renderer and activity indicator that record every call.

use std::cell::{Cell, RefCell};
use teardrop_foundation::{
    ActivityIndicator, DismissalAnimationPlan, IndicatorRenderer, IndicatorStyle, PathSet,
    PlanKind,
};
use teardrop_graphics::{Color, Point, Rect};

#[derive(Clone, Debug, PartialEq)]
pub enum RenderEvent {
    Style(IndicatorStyle),
    Frame(Rect),
    Paths(PathSet),
    ClearPaths,
    BodyTranslation(Point),
    BodyHidden(bool),
    BodyFill(Color),
    Run(DismissalAnimationPlan),
    RemoveAllAnimations,
}

#[derive(Default)]
pub struct RecordingRenderer {
    events: RefCell<Vec<RenderEvent>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<RenderEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn last_paths(&self) -> Option<PathSet> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            RenderEvent::Paths(paths) => Some(paths.clone()),
            _ => None,
        })
    }

    pub fn path_updates(&self) -> usize {
        self.count(|event| matches!(event, RenderEvent::Paths(_)))
    }

    pub fn clears(&self) -> usize {
        self.count(|event| matches!(event, RenderEvent::ClearPaths))
    }

    pub fn plans(&self) -> Vec<DismissalAnimationPlan> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Run(plan) => Some(plan.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn plan_kinds(&self) -> Vec<PlanKind> {
        self.plans().iter().map(DismissalAnimationPlan::kind).collect()
    }

    pub fn last_frame(&self) -> Option<Rect> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            RenderEvent::Frame(frame) => Some(*frame),
            _ => None,
        })
    }

    pub fn last_translation(&self) -> Option<Point> {
        self.events.borrow().iter().rev().find_map(|event| match event {
            RenderEvent::BodyTranslation(translation) => Some(*translation),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&RenderEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|event| predicate(event)).count()
    }

    fn record(&self, event: RenderEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl IndicatorRenderer for RecordingRenderer {
    fn apply_style(&self, style: &IndicatorStyle) {
        self.record(RenderEvent::Style(*style));
    }

    fn set_frame(&self, frame: Rect) {
        self.record(RenderEvent::Frame(frame));
    }

    fn set_paths(&self, paths: &PathSet) {
        self.record(RenderEvent::Paths(paths.clone()));
    }

    fn clear_paths(&self) {
        self.record(RenderEvent::ClearPaths);
    }

    fn set_body_translation(&self, translation: Point) {
        self.record(RenderEvent::BodyTranslation(translation));
    }

    fn set_body_hidden(&self, hidden: bool) {
        self.record(RenderEvent::BodyHidden(hidden));
    }

    fn set_body_fill(&self, color: Color) {
        self.record(RenderEvent::BodyFill(color));
    }

    fn run(&self, plan: &DismissalAnimationPlan) {
        self.record(RenderEvent::Run(plan.clone()));
    }

    fn remove_all_animations(&self) {
        self.record(RenderEvent::RemoveAllAnimations);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActivityEvent {
    Center(Point),
    Alpha(f32),
    Scale(f32),
    StartAnimating,
}

#[derive(Default)]
pub struct RecordingActivity {
    events: RefCell<Vec<ActivityEvent>>,
    center: Cell<Point>,
    alpha: Cell<f32>,
    scale: Cell<f32>,
    animating: Cell<bool>,
}

impl RecordingActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ActivityEvent> {
        self.events.borrow().clone()
    }

    pub fn center(&self) -> Point {
        self.center.get()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha.get()
    }

    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    pub fn is_animating(&self) -> bool {
        self.animating.get()
    }
}

impl ActivityIndicator for RecordingActivity {
    fn set_center(&self, center: Point) {
        self.center.set(center);
        self.events.borrow_mut().push(ActivityEvent::Center(center));
    }

    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
        self.events.borrow_mut().push(ActivityEvent::Alpha(alpha));
    }

    fn set_scale(&self, scale: f32) {
        self.scale.set(scale);
        self.events.borrow_mut().push(ActivityEvent::Scale(scale));
    }

    fn start_animating(&self) {
        self.animating.set(true);
        self.events.borrow_mut().push(ActivityEvent::StartAnimating);
    }
}
