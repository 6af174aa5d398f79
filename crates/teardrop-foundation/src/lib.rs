//! Geometry and interaction engine for the teardrop pull-to-refresh control
//!
//! The host forwards every scroll position sample to a [`RefreshControl`].
//! The [`InteractionStateMachine`] decides whether the frame is drawable,
//! suppressed, pinned, or fires a refresh; drawable frames are turned into
//! paths by the [`ShapeGeometryBuilder`], and the trigger edge produces a
//! [`DismissalAnimationPlan`] for the host's animation driver.

mod config;
mod control;
mod dismissal;
mod error;
mod guard;
mod inset;
mod metrics;
mod params;
mod shape;
mod state_machine;
mod surface;

pub use config::*;
pub use control::*;
pub use dismissal::*;
pub use error::*;
pub use guard::*;
pub use inset::*;
pub use metrics::*;
pub use params::*;
pub use shape::*;
pub use state_machine::*;
pub use surface::*;

pub mod prelude {
    pub use crate::config::RefreshConfig;
    pub use crate::control::{RefreshControl, RefreshHandle};
    pub use crate::dismissal::{DismissalAnimationPlan, LayerProperty, LayerValue, PlanKind};
    pub use crate::shape::{PathSet, ShapeGeometryBuilder};
    pub use crate::state_machine::{InteractionState, InteractionStateMachine, Outcome};
    pub use crate::surface::{
        ActivityIndicator, IndicatorRenderer, SampleListener, SampleSource, ScrollSample,
        ScrollSurface,
    };
}
