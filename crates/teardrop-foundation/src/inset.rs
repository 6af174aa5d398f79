//! Inset bookkeeping while the indicator is pinned open.

/// Answers whether the scroll surface shows non-empty section headers.
///
/// Surfaces without sections simply answer `false`, which selects the
/// instant inset jump.
pub trait SectionHeaders {
    fn has_section_headers(&self) -> bool;
}

impl<F: Fn() -> bool> SectionHeaders for F {
    fn has_section_headers(&self) -> bool {
        self()
    }
}

/// For surfaces that cannot report section headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSectionHeaders;

impl SectionHeaders for NoSectionHeaders {
    fn has_section_headers(&self) -> bool {
        false
    }
}

/// Requested change to the leading inset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InsetUpdate {
    /// Original leading inset plus this amount.
    Extend(f32),
    /// Back to the original inset.
    Restore,
}

/// Hysteresis for the leading inset.
///
/// Without section headers the inset jumps straight to the opened extent.
/// With headers it follows the offset so the headers do not shift abruptly.
///
/// Invariant: `has_section_headers` is only meaningful while
/// `did_set_inset` is true; it is re-probed on the first settle after every
/// re-arm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsetTracker {
    did_set_inset: bool,
    has_section_headers: bool,
}

impl InsetTracker {
    pub fn did_set_inset(&self) -> bool {
        self.did_set_inset
    }

    pub fn has_section_headers(&self) -> bool {
        self.has_section_headers
    }

    /// Forget the previous probe; runs when the control re-arms.
    pub fn reset(&mut self) {
        self.did_set_inset = false;
    }

    pub fn update(
        &mut self,
        offset: f32,
        opened_extent: f32,
        is_dragging: bool,
        headers: &dyn SectionHeaders,
    ) -> Option<InsetUpdate> {
        if offset >= 0.0 {
            return self.has_section_headers.then_some(InsetUpdate::Restore);
        }
        if offset < -opened_extent {
            return None;
        }

        if !is_dragging {
            if !self.did_set_inset {
                self.did_set_inset = true;
                self.has_section_headers = headers.has_section_headers();
                log::debug!(
                    "inset settled, section headers: {}",
                    self.has_section_headers
                );
            }
            if self.has_section_headers {
                Some(InsetUpdate::Extend((-offset).min(opened_extent)))
            } else {
                Some(InsetUpdate::Extend(opened_extent))
            }
        } else if self.did_set_inset && self.has_section_headers {
            Some(InsetUpdate::Extend(-offset))
        } else {
            None
        }
    }
}
