//! Host collaborators: the scroll surface, its sample stream, the indicator
//! layers and the activity view.
//!
//! All methods take `&self`. Hosts are expected to use interior mutability,
//! since the control holds shared handles and may be re-entered from a
//! surface write.

use crate::config::IndicatorStyle;
use crate::dismissal::DismissalAnimationPlan;
use crate::inset::SectionHeaders;
use crate::shape::PathSet;
use std::rc::Rc;
use teardrop_graphics::{Color, EdgeInsets, Point, Rect, Size};

pub trait ScrollSurface {
    fn content_offset(&self) -> Point;
    fn set_content_offset(&self, offset: Point);
    fn content_inset(&self) -> EdgeInsets;
    fn set_content_inset(&self, inset: EdgeInsets);
    fn viewport_size(&self) -> Size;
    /// The user's finger moved the content.
    fn is_dragging(&self) -> bool;
    /// The user's finger is down, moving or not.
    fn is_tracking(&self) -> bool;

    fn section_count(&self) -> usize {
        0
    }

    fn section_header_extent(&self, _section: usize) -> f32 {
        0.0
    }
}

/// Probes a surface for any non-empty section header.
pub struct SurfaceHeaders<'a>(pub &'a dyn ScrollSurface);

impl SectionHeaders for SurfaceHeaders<'_> {
    fn has_section_headers(&self) -> bool {
        (0..self.0.section_count()).any(|section| self.0.section_header_extent(section) > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollSample {
    ContentOffset(Point),
    ContentInset(EdgeInsets),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

pub trait SampleListener {
    fn on_sample(&self, sample: ScrollSample);
}

/// Synchronous change notifications for one scroll surface.
pub trait SampleSource {
    fn subscribe(&self, listener: Rc<dyn SampleListener>) -> SubscriptionId;
    /// After this returns no sample may reach the listener.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// The three indicator layers plus the host's animation driver.
pub trait IndicatorRenderer {
    fn apply_style(&self, style: &IndicatorStyle);
    fn set_frame(&self, frame: Rect);
    fn set_paths(&self, paths: &PathSet);
    /// Removes every path and the body shadow.
    fn clear_paths(&self);
    fn set_body_translation(&self, translation: Point);
    fn set_body_hidden(&self, hidden: bool);
    fn set_body_fill(&self, color: Color);
    /// Plays `plan`; for an end-of-refresh plan the driver calls
    /// `finish_dismissal` on the control once it completes.
    fn run(&self, plan: &DismissalAnimationPlan);
    fn remove_all_animations(&self);
}

/// Spinner shown while refreshing.
pub trait ActivityIndicator {
    fn set_center(&self, center: Point);
    fn set_alpha(&self, alpha: f32);
    fn set_scale(&self, scale: f32);
    fn start_animating(&self);
}
