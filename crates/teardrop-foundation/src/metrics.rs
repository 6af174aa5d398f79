//! Shape constants for the teardrop indicator.
//!
//! Every stretchable dimension is a `Min`/`Max` pair interpolated by the
//! stretch percentage: `1.0` is the relaxed shape, `0.0` is the trigger point.
//! Values are in logical pixels.

use teardrop_graphics::lerp;

/// Main-axis extent of the strip the indicator lives in.
pub const TOTAL_VIEW_EXTENT: f32 = 400.0;
/// Inset added to the scroll surface while a refresh is in progress.
pub const OPENED_VIEW_EXTENT: f32 = 44.0;

pub const MIN_TOP_PADDING: f32 = 9.0;
pub const MAX_TOP_PADDING: f32 = 5.0;
pub const MIN_TOP_RADIUS: f32 = 12.5;
pub const MAX_TOP_RADIUS: f32 = 16.0;
pub const MIN_BOTTOM_RADIUS: f32 = 3.0;
pub const MAX_BOTTOM_RADIUS: f32 = 16.0;
pub const MIN_BOTTOM_PADDING: f32 = 4.0;
pub const MAX_BOTTOM_PADDING: f32 = 6.0;
pub const MIN_ARROW_SIZE: f32 = 2.0;
pub const MAX_ARROW_SIZE: f32 = 3.0;
pub const MIN_ARROW_RADIUS: f32 = 5.0;
pub const MAX_ARROW_RADIUS: f32 = 7.0;

/// How far past the relaxed shape the head can be pulled before triggering.
pub const MAX_DISTANCE: f32 = 53.0;

/// Offset between the two arcs of the glossy highlight.
pub const HIGHLIGHT_SHIFT: f32 = 1.25;
/// Percentage used to size the lens the body collapses into on trigger.
pub const CLOSED_RADIUS_FRACTION: f32 = 0.2;

/// Bézier control points sit at these fractions of the head-to-tail span.
pub const CONTROL_POINT_NEAR: f32 = 0.1;
pub const CONTROL_POINT_FAR: f32 = 0.9;
/// Main-axis depth of both control points, as a fraction of the span.
pub const CONTROL_POINT_DEPTH: f32 = 0.2;

/// Clamps a stretch percentage into `[0, 1]`. NaN reads as relaxed.
#[inline]
pub fn clamp_percentage(percentage: f32) -> f32 {
    if percentage.is_nan() {
        1.0
    } else {
        percentage.clamp(0.0, 1.0)
    }
}

/// A dimension interpolated between its trigger-point and relaxed values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    /// Value at percentage `0.0`.
    pub min: f32,
    /// Value at percentage `1.0`.
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Interpolated value; `percentage` is clamped first.
    #[inline]
    pub fn at(&self, percentage: f32) -> f32 {
        lerp(self.min, self.max, clamp_percentage(percentage))
    }

    pub fn contains(&self, value: f32) -> bool {
        let (low, high) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        value >= low && value <= high
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeMetrics {
    pub top_padding: Span,
    pub top_radius: Span,
    pub bottom_radius: Span,
    pub bottom_padding: Span,
    pub arrow_size: Span,
    pub arrow_radius: Span,
    pub max_distance: f32,
    pub total_extent: f32,
    pub opened_extent: f32,
    pub highlight_shift: f32,
    pub closed_radius_fraction: f32,
}

impl Default for ShapeMetrics {
    fn default() -> Self {
        Self {
            top_padding: Span::new(MIN_TOP_PADDING, MAX_TOP_PADDING),
            top_radius: Span::new(MIN_TOP_RADIUS, MAX_TOP_RADIUS),
            bottom_radius: Span::new(MIN_BOTTOM_RADIUS, MAX_BOTTOM_RADIUS),
            bottom_padding: Span::new(MIN_BOTTOM_PADDING, MAX_BOTTOM_PADDING),
            arrow_size: Span::new(MIN_ARROW_SIZE, MAX_ARROW_SIZE),
            arrow_radius: Span::new(MIN_ARROW_RADIUS, MAX_ARROW_RADIUS),
            max_distance: MAX_DISTANCE,
            total_extent: TOTAL_VIEW_EXTENT,
            opened_extent: OPENED_VIEW_EXTENT,
            highlight_shift: HIGHLIGHT_SHIFT,
            closed_radius_fraction: CLOSED_RADIUS_FRACTION,
        }
    }
}

impl ShapeMetrics {
    /// Pull length absorbed by the relaxed shape before it starts stretching.
    pub fn rest_extent(&self) -> f32 {
        self.top_radius.max + self.bottom_radius.max + self.top_padding.max + self.bottom_padding.max
    }

    /// Offset at which the stretch saturates and a refresh fires.
    pub fn trigger_offset(&self) -> f32 {
        -(self.rest_extent() + self.max_distance)
    }

    /// Radius of the lens the body collapses into on trigger.
    pub fn closed_radius(&self) -> f32 {
        self.bottom_radius.at(self.closed_radius_fraction)
    }
}
