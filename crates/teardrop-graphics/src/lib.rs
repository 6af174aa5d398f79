//! Pure math/data for drawing the teardrop refresh indicator
//!
//! This crate contains geometry primitives, color definitions, the
//! orientation transform, and the path descriptors that a renderer paints.

mod axis;
mod color;
mod geometry;
mod path;

pub use axis::*;
pub use color::*;
pub use geometry::*;
pub use path::*;

pub mod prelude {
    pub use crate::axis::Orientation;
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Point, Rect, Size};
    pub use crate::path::{FillRule, PathBuilder, PathCommand, PathDescriptor};
}
