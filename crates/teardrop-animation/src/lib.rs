//! Animation vocabulary for the teardrop refresh indicator
//!
//! The engine never runs a clock. It describes what should animate as an
//! [`AnimationPlan`] and leaves playback to the host's animation driver.
//! [`Timeline`] lets a driver (or a test) sample a plan at any elapsed time.

mod animation;
mod timeline;

pub use animation::*;
pub use timeline::*;
