//! Scripted scroll surface that is also its own sample source.
//!
//! Every write, whether from the test or from the control, notifies the
//! subscribed listeners synchronously.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use teardrop_foundation::{
    SampleListener, SampleSource, ScrollSample, ScrollSurface, SubscriptionId,
};
use teardrop_graphics::{EdgeInsets, Orientation, Point, Size};

type InsetHook = Box<dyn FnMut(EdgeInsets)>;

#[derive(Default)]
struct SurfaceState {
    offset: Point,
    inset: EdgeInsets,
    resting_inset: EdgeInsets,
    viewport: Size,
    dragging: bool,
    tracking: bool,
    section_headers: Vec<f32>,
    inset_writes: Vec<EdgeInsets>,
    offset_writes: Vec<Point>,
}

pub struct FakeScrollSurface {
    state: RefCell<SurfaceState>,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn SampleListener>)>>,
    retired: RefCell<Vec<Rc<dyn SampleListener>>>,
    next_id: Cell<u64>,
    inset_hook: RefCell<Option<InsetHook>>,
}

impl FakeScrollSurface {
    pub fn new(viewport: Size) -> Self {
        Self {
            state: RefCell::new(SurfaceState {
                viewport,
                ..SurfaceState::default()
            }),
            listeners: RefCell::new(Vec::new()),
            retired: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            inset_hook: RefCell::new(None),
        }
    }

    pub fn with_inset(self, inset: EdgeInsets) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.inset = inset;
            state.resting_inset = inset;
        }
        self
    }

    /// An inset change made by the host rather than the control; it becomes
    /// the baseline for [`FakeScrollSurface::pull_to`].
    pub fn change_inset_externally(&self, inset: EdgeInsets) {
        self.state.borrow_mut().resting_inset = inset;
        self.set_content_inset(inset);
    }

    /// Header extent per section; any positive entry counts as a header.
    pub fn with_section_headers(self, extents: Vec<f32>) -> Self {
        self.state.borrow_mut().section_headers = extents;
        self
    }

    pub fn into_rc(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// Scrolls so that a control attached at the resting inset derives
    /// exactly `offset`, and notifies.
    pub fn pull_to(&self, orientation: Orientation, offset: f32) {
        let inset = self.state.borrow().resting_inset;
        let main = offset - orientation.leading_inset(inset);
        self.scroll_to(orientation.point(0.0, main));
    }

    /// Moves the content without recording a write, as a user gesture would.
    pub fn scroll_to(&self, offset: Point) {
        self.state.borrow_mut().offset = offset;
        self.deliver(ScrollSample::ContentOffset(offset));
    }

    /// Finger down.
    pub fn begin_drag(&self) {
        let mut state = self.state.borrow_mut();
        state.dragging = true;
        state.tracking = true;
    }

    /// Finger up; the content may keep moving by momentum.
    pub fn end_drag(&self) {
        let mut state = self.state.borrow_mut();
        state.dragging = false;
        state.tracking = false;
    }

    pub fn set_dragging(&self, dragging: bool) {
        self.state.borrow_mut().dragging = dragging;
    }

    pub fn set_tracking(&self, tracking: bool) {
        self.state.borrow_mut().tracking = tracking;
    }

    /// Runs `hook` before listeners hear about each inset write.
    pub fn on_inset_write(&self, hook: impl FnMut(EdgeInsets) + 'static) {
        *self.inset_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn inset_writes(&self) -> Vec<EdgeInsets> {
        self.state.borrow().inset_writes.clone()
    }

    pub fn last_inset_write(&self) -> Option<EdgeInsets> {
        self.state.borrow().inset_writes.last().copied()
    }

    pub fn offset_writes(&self) -> Vec<Point> {
        self.state.borrow().offset_writes.clone()
    }

    pub fn clear_writes(&self) {
        let mut state = self.state.borrow_mut();
        state.inset_writes.clear();
        state.offset_writes.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Delivers `sample` to listeners that already unsubscribed, simulating a
    /// notification that raced a teardown.
    pub fn deliver_stale(&self, sample: ScrollSample) {
        let retired: Vec<_> = self.retired.borrow().clone();
        for listener in retired {
            listener.on_sample(sample);
        }
    }

    fn deliver(&self, sample: ScrollSample) {
        let listeners: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener.on_sample(sample);
        }
    }
}

impl ScrollSurface for FakeScrollSurface {
    fn content_offset(&self) -> Point {
        self.state.borrow().offset
    }

    fn set_content_offset(&self, offset: Point) {
        {
            let mut state = self.state.borrow_mut();
            state.offset = offset;
            state.offset_writes.push(offset);
        }
        self.deliver(ScrollSample::ContentOffset(offset));
    }

    fn content_inset(&self) -> EdgeInsets {
        self.state.borrow().inset
    }

    fn set_content_inset(&self, inset: EdgeInsets) {
        {
            let mut state = self.state.borrow_mut();
            state.inset = inset;
            state.inset_writes.push(inset);
        }
        let hook = self.inset_hook.borrow_mut().take();
        if let Some(mut hook) = hook {
            hook(inset);
            let mut slot = self.inset_hook.borrow_mut();
            if slot.is_none() {
                *slot = Some(hook);
            }
        }
        self.deliver(ScrollSample::ContentInset(inset));
    }

    fn viewport_size(&self) -> Size {
        self.state.borrow().viewport
    }

    fn is_dragging(&self) -> bool {
        self.state.borrow().dragging
    }

    fn is_tracking(&self) -> bool {
        self.state.borrow().tracking
    }

    fn section_count(&self) -> usize {
        self.state.borrow().section_headers.len()
    }

    fn section_header_extent(&self, section: usize) -> f32 {
        self.state
            .borrow()
            .section_headers
            .get(section)
            .copied()
            .unwrap_or(0.0)
    }
}

impl SampleSource for FakeScrollSurface {
    fn subscribe(&self, listener: Rc<dyn SampleListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|(existing, _)| *existing == id) {
            let (_, listener) = listeners.remove(index);
            self.retired.borrow_mut().push(listener);
        } else {
            log::warn!("unsubscribe of unknown {id:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(Cell<usize>);

    impl SampleListener for Counter {
        fn on_sample(&self, _sample: ScrollSample) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn writes_notify_subscribers() {
        let surface = FakeScrollSurface::new(Size::new(320.0, 480.0));
        let counter = Rc::new(Counter(Cell::new(0)));
        let id = surface.subscribe(counter.clone());

        surface.set_content_inset(EdgeInsets::uniform(2.0));
        surface.scroll_to(Point::new(0.0, -5.0));
        assert_eq!(counter.0.get(), 2);
        assert_eq!(surface.inset_writes().len(), 1);
        assert!(surface.offset_writes().is_empty());

        surface.unsubscribe(id);
        surface.scroll_to(Point::ZERO);
        assert_eq!(counter.0.get(), 2);
        assert_eq!(surface.listener_count(), 0);

        surface.deliver_stale(ScrollSample::ContentOffset(Point::ZERO));
        assert_eq!(counter.0.get(), 3);
    }

    #[test]
    fn pull_to_accounts_for_the_leading_inset() {
        let surface = FakeScrollSurface::new(Size::new(320.0, 480.0))
            .with_inset(EdgeInsets::from_components(0.0, 20.0, 0.0, 0.0));
        surface.pull_to(Orientation::Vertical, -30.0);
        assert_eq!(surface.content_offset(), Point::new(0.0, -50.0));
    }

    #[test]
    fn missing_sections_report_no_extent() {
        let surface = FakeScrollSurface::new(Size::ZERO).with_section_headers(vec![0.0, 18.0]);
        assert_eq!(surface.section_count(), 2);
        assert_eq!(surface.section_header_extent(1), 18.0);
        assert_eq!(surface.section_header_extent(5), 0.0);
    }
}
