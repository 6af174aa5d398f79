//! Testing utilities for the teardrop refresh control

pub mod assertions;
pub mod recording;
pub mod surface;

pub use assertions::*;
pub use recording::*;
pub use surface::*;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::assertions::{assert_approx_eq, assert_path_approx_eq, assert_point_approx_eq};
    pub use crate::recording::{ActivityEvent, RecordingActivity, RecordingRenderer, RenderEvent};
    pub use crate::surface::FakeScrollSurface;
}
