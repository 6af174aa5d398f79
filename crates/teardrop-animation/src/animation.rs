//! Easing curves, timing specs, and declarative transition plans.

use smallvec::SmallVec;
use teardrop_graphics::{Color, EdgeInsets, Point};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

impl Lerp for Color {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Color(
            self.0.lerp(&target.0, fraction),
            self.1.lerp(&target.1, fraction),
            self.2.lerp(&target.2, fraction),
            self.3.lerp(&target.3, fraction),
        )
    }
}

impl Lerp for EdgeInsets {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        EdgeInsets::from_components(
            self.left.lerp(&target.left, fraction),
            self.top.lerp(&target.top, fraction),
            self.right.lerp(&target.right, fraction),
            self.bottom.lerp(&target.bottom, fraction),
        )
    }
}

/// Easing functions applied to the linear progress of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Ease in using cubic curve.
    EaseIn,
    /// Ease out using cubic curve.
    EaseOut,
    /// Ease in and out using cubic curve.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric `t` of the requested x, clamped to [0, 1].
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        // Binary subdivision fallback.
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let delta = sample_curve(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Animation specification combining duration, delay, and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting animation in milliseconds.
    pub delay_millis: u64,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// Jump straight to the target on the first frame.
    pub fn instant() -> Self {
        Self::linear(0)
    }

    /// Add a delay before the animation starts.
    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Time at which the animation reaches its target.
    pub fn end_millis(&self) -> u64 {
        self.delay_millis + self.duration_millis
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::EaseInOut)
    }
}

/// One animated property change: animate `target` with `spec`.
///
/// `fill_forwards` keeps the final value applied after the transition ends
/// instead of snapping back to the model value.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    pub target: T,
    pub spec: AnimationSpec,
    pub fill_forwards: bool,
}

impl<T> Transition<T> {
    pub fn new(target: T, spec: AnimationSpec) -> Self {
        Self {
            target,
            spec,
            fill_forwards: false,
        }
    }

    pub fn fill_forwards(mut self) -> Self {
        self.fill_forwards = true;
        self
    }
}

/// Ordered group of transitions that start together at plan time zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlan<T> {
    transitions: SmallVec<[Transition<T>; 8]>,
}

impl<T> Default for AnimationPlan<T> {
    fn default() -> Self {
        Self {
            transitions: SmallVec::new(),
        }
    }
}

impl<T> AnimationPlan<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transition: Transition<T>) -> &mut Self {
        self.transitions.push(transition);
        self
    }

    pub fn with(mut self, transition: Transition<T>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn transitions(&self) -> &[Transition<T>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Time at which the last transition reaches its target.
    pub fn total_duration_millis(&self) -> u64 {
        self.transitions
            .iter()
            .map(|transition| transition.spec.end_millis())
            .max()
            .unwrap_or(0)
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&Transition<T>> {
        self.transitions
            .iter()
            .find(|transition| predicate(&transition.target))
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
