use crate::geometry::{EdgeInsets, Point, Size};
use std::f32::consts::FRAC_PI_2;

/// Direction in which the indicator is pulled out of the content edge.
///
/// All indicator geometry is written once in *axis space*: `main` runs along
/// the pull direction and `cross` across it. `Vertical` maps axis space to
/// view space unchanged (`x = cross`, `y = main`); `Horizontal` swaps the two
/// coordinates and mirrors arc angles accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Pulled down from above the content (main axis is `y`).
    #[default]
    Vertical,

    /// Pulled in from the leading side of the content (main axis is `x`).
    Horizontal,
}

impl Orientation {
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }

    /// Builds a view-space point from axis-space coordinates.
    #[inline]
    pub fn point(self, cross: f32, main: f32) -> Point {
        match self {
            Orientation::Vertical => Point::new(cross, main),
            Orientation::Horizontal => Point::new(main, cross),
        }
    }

    /// Maps a point written in vertical (axis) space into this orientation.
    #[inline]
    pub fn map_point(self, point: Point) -> Point {
        match self {
            Orientation::Vertical => point,
            Orientation::Horizontal => point.transpose(),
        }
    }

    /// Maps an arc angle written in vertical space into this orientation.
    ///
    /// Transposing the plane reflects every angle about the diagonal, so the
    /// angle becomes `90° - angle`.
    #[inline]
    pub fn map_angle(self, angle: f32) -> f32 {
        match self {
            Orientation::Vertical => angle,
            Orientation::Horizontal => FRAC_PI_2 - angle,
        }
    }

    /// The reflection in [`Orientation::map_angle`] reverses sweep direction.
    #[inline]
    pub fn map_clockwise(self, clockwise: bool) -> bool {
        match self {
            Orientation::Vertical => clockwise,
            Orientation::Horizontal => !clockwise,
        }
    }

    #[inline]
    pub fn main(self, point: Point) -> f32 {
        match self {
            Orientation::Vertical => point.y,
            Orientation::Horizontal => point.x,
        }
    }

    #[inline]
    pub fn cross(self, point: Point) -> f32 {
        match self {
            Orientation::Vertical => point.x,
            Orientation::Horizontal => point.y,
        }
    }

    #[inline]
    pub fn cross_extent(self, size: Size) -> f32 {
        match self {
            Orientation::Vertical => size.width,
            Orientation::Horizontal => size.height,
        }
    }

    /// Inset on the edge the indicator is pulled from.
    #[inline]
    pub fn leading_inset(self, insets: EdgeInsets) -> f32 {
        match self {
            Orientation::Vertical => insets.top,
            Orientation::Horizontal => insets.left,
        }
    }

    pub fn with_leading_inset(self, insets: EdgeInsets, value: f32) -> EdgeInsets {
        match self {
            Orientation::Vertical => insets.with_top(value),
            Orientation::Horizontal => insets.with_left(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_is_identity() {
        let p = Point::new(3.0, 7.0);
        assert_eq!(Orientation::Vertical.map_point(p), p);
        assert_eq!(Orientation::Vertical.map_angle(1.0), 1.0);
        assert!(Orientation::Vertical.map_clockwise(true));
    }

    #[test]
    fn horizontal_swaps_axes() {
        let orientation = Orientation::Horizontal;
        assert_eq!(orientation.point(10.0, 20.0), Point::new(20.0, 10.0));
        assert_eq!(orientation.main(Point::new(4.0, 9.0)), 4.0);
        assert_eq!(orientation.cross(Point::new(4.0, 9.0)), 9.0);
        assert_eq!(orientation.cross_extent(Size::new(320.0, 480.0)), 480.0);
    }

    #[test]
    fn mirrored_angle_keeps_arc_points_transposed() {
        let center = Point::new(5.0, 11.0);
        let radius = 4.0;
        for step in 0..8 {
            let angle = step as f32 * 0.7;
            let vertical = center.translate(radius * angle.cos(), radius * angle.sin());
            let mapped_center = Orientation::Horizontal.map_point(center);
            let mapped_angle = Orientation::Horizontal.map_angle(angle);
            let horizontal = mapped_center.translate(
                radius * mapped_angle.cos(),
                radius * mapped_angle.sin(),
            );
            assert!((horizontal.x - vertical.y).abs() < 1e-4);
            assert!((horizontal.y - vertical.x).abs() < 1e-4);
        }
    }

    #[test]
    fn leading_inset_follows_orientation() {
        let insets = EdgeInsets::from_components(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Orientation::Vertical.leading_inset(insets), 2.0);
        assert_eq!(Orientation::Horizontal.leading_inset(insets), 1.0);
        assert_eq!(
            Orientation::Horizontal.with_leading_inset(insets, 44.0).left,
            44.0
        );
    }
}
