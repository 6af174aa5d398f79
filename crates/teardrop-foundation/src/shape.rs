//! Teardrop outline, arrow glyph, and highlight construction.
//!
//! Geometry is written once in axis space (`x` across the pull, `y` along it)
//! and mapped into the configured [`Orientation`] by [`PathBuilder`].

use crate::metrics::{ShapeMetrics, CONTROL_POINT_DEPTH, CONTROL_POINT_FAR, CONTROL_POINT_NEAR};
use crate::params::GeometryParameters;
use std::f32::consts::PI;
use teardrop_graphics::{lerp, FillRule, Orientation, PathBuilder, PathDescriptor, Point, Size};

/// Axis-space size of the strip the indicator is drawn in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorBounds {
    pub cross_extent: f32,
    pub main_extent: f32,
}

impl IndicatorBounds {
    pub fn new(cross_extent: f32, main_extent: f32) -> Self {
        Self {
            cross_extent,
            main_extent,
        }
    }

    pub fn for_viewport(viewport: Size, orientation: Orientation, metrics: &ShapeMetrics) -> Self {
        Self::new(orientation.cross_extent(viewport), metrics.total_extent)
    }

    /// Pixel-aligned centre line of the strip.
    pub fn cross_center(&self) -> f32 {
        (self.cross_extent / 2.0).floor()
    }
}

/// Centres of the two circles of the body, in axis space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchors {
    /// Follows the finger.
    pub head: Point,
    /// Stays near the far edge of the strip.
    pub tail: Point,
}

/// The three layers painted for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSet {
    pub body: PathDescriptor,
    pub arrow: PathDescriptor,
    pub highlight: PathDescriptor,
}

impl PathSet {
    pub fn transposed(&self) -> Self {
        Self {
            body: self.body.transposed(),
            arrow: self.arrow.transposed(),
            highlight: self.highlight.transposed(),
        }
    }
}

/// Stateless builder: every call produces fresh paths from its inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeGeometryBuilder {
    metrics: ShapeMetrics,
    bounds: IndicatorBounds,
    orientation: Orientation,
}

impl ShapeGeometryBuilder {
    pub fn new(metrics: ShapeMetrics, bounds: IndicatorBounds, orientation: Orientation) -> Self {
        Self {
            metrics,
            bounds,
            orientation,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn bounds(&self) -> IndicatorBounds {
        self.bounds
    }

    pub fn anchors(&self, offset: f32, params: &GeometryParameters) -> Anchors {
        let cross = self.bounds.cross_center();
        let mut tail = Point::new(
            cross,
            self.bounds.main_extent - params.bottom_padding - params.bottom_radius,
        );
        if params.is_relaxed() {
            return Anchors {
                head: Point::new(cross, tail.y),
                tail,
            };
        }

        let head = Point::new(
            cross,
            self.bounds.main_extent + offset + params.top_padding + params.top_radius,
        );
        if params.is_saturated() {
            // Past the trigger edge the tail is dragged along with the head.
            tail.y -= params.shift.abs() - self.metrics.max_distance;
        }
        Anchors { head, tail }
    }

    /// Head centre in view space.
    pub fn head_center(&self, offset: f32, params: &GeometryParameters) -> Point {
        self.orientation.map_point(self.anchors(offset, params).head)
    }

    pub fn build(&self, offset: f32, params: &GeometryParameters) -> PathSet {
        let anchors = self.anchors(offset, params);
        PathSet {
            body: self.body(&anchors, params),
            arrow: self.arrow(anchors.head, params),
            highlight: self.highlight(anchors.head, params),
        }
    }

    fn body(&self, anchors: &Anchors, params: &GeometryParameters) -> PathDescriptor {
        let Anchors { head, tail } = *anchors;
        let top_radius = params.top_radius;
        let bottom_radius = params.bottom_radius;
        let control_y = lerp(head.y, tail.y, CONTROL_POINT_DEPTH);

        let mut path = PathBuilder::new(self.orientation);
        path.arc(head, top_radius, 0.0, PI, true);

        let left_head = head.x - top_radius;
        let left_tail = tail.x - bottom_radius;
        path.cubic_to(
            Point::new(lerp(left_head, left_tail, CONTROL_POINT_NEAR), control_y),
            Point::new(lerp(left_head, left_tail, CONTROL_POINT_FAR), control_y),
            Point::new(left_tail, tail.y),
        );

        path.arc(tail, bottom_radius, PI, 0.0, true);

        let right_head = head.x + top_radius;
        let right_tail = tail.x + bottom_radius;
        path.cubic_to(
            Point::new(lerp(right_head, right_tail, CONTROL_POINT_FAR), control_y),
            Point::new(lerp(right_head, right_tail, CONTROL_POINT_NEAR), control_y),
            Point::new(right_head, head.y),
        );
        path.close();
        path.build()
    }

    /// Crescent with a chevron tip; the even-odd fill keeps it hollow.
    fn arrow(&self, head: Point, params: &GeometryParameters) -> PathDescriptor {
        let size = params.arrow_size;
        let outer = params.arrow_radius + size / 2.0;
        let inner = params.arrow_radius - size / 2.0;
        let quarter_to = 3.0 * PI / 2.0;

        let mut path = PathBuilder::new(self.orientation).with_fill_rule(FillRule::EvenOdd);
        path.arc(head, outer, 0.0, quarter_to, false)
            .line_to(Point::new(head.x, head.y - outer - size))
            .line_to(Point::new(head.x + 2.0 * size, head.y - outer + size / 2.0))
            .line_to(Point::new(head.x, head.y - outer + 2.0 * size))
            .line_to(Point::new(head.x, head.y - outer + size))
            .arc(head, inner, quarter_to, 0.0, true)
            .close();
        path.build()
    }

    fn highlight(&self, head: Point, params: &GeometryParameters) -> PathDescriptor {
        let mut path = PathBuilder::new(self.orientation).with_fill_rule(FillRule::NonZero);
        path.arc(head, params.top_radius, 0.0, PI, true).arc(
            head.translate(0.0, self.metrics.highlight_shift),
            params.top_radius,
            PI,
            0.0,
            false,
        );
        path.build()
    }

    /// The small lens the body morphs into once a refresh fires. `head` is in
    /// view space, as returned by [`ShapeGeometryBuilder::head_center`].
    pub fn closed_body(&self, head: Point) -> PathDescriptor {
        let head = self.orientation.map_point(head);
        let radius = self.metrics.closed_radius();
        let left = Point::new(head.x - radius, head.y);
        let right = Point::new(head.x + radius, head.y);

        let mut path = PathBuilder::new(self.orientation);
        path.arc(head, radius, 0.0, PI, true)
            .cubic_to(left, left, left)
            .arc(head, radius, PI, 0.0, true)
            .cubic_to(right, right, right)
            .close();
        path.build()
    }
}

#[cfg(test)]
#[path = "tests/shape_tests.rs"]
mod tests;
