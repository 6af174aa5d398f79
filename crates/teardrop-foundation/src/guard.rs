use crate::surface::ScrollSample;
use std::cell::Cell;

/// Flags that bracket every write the control makes to its own surface so
/// the resulting notifications are not evaluated again.
///
/// Invariant: both flags are `false` whenever no self-induced write is in
/// progress.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    ignoring_inset_writes: Cell<bool>,
    ignoring_offset_notifications: Cell<bool>,
    swallowed: Cell<u64>,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ignoring_inset_writes(&self) -> bool {
        self.ignoring_inset_writes.get()
    }

    pub fn is_ignoring_offset_notifications(&self) -> bool {
        self.ignoring_offset_notifications.get()
    }

    /// Samples dropped because they were caused by the control itself.
    pub fn swallowed_samples(&self) -> u64 {
        self.swallowed.get()
    }

    /// Runs `write` with both offset and inset notifications ignored.
    pub fn suppress<R>(&self, write: impl FnOnce() -> R) -> R {
        let insets = self.ignoring_inset_writes.replace(true);
        let offsets = self.ignoring_offset_notifications.replace(true);
        let result = write();
        self.ignoring_inset_writes.set(insets);
        self.ignoring_offset_notifications.set(offsets);
        result
    }

    /// Runs `write` with inset notifications ignored; offset changes it
    /// causes are still evaluated.
    pub fn suppress_insets<R>(&self, write: impl FnOnce() -> R) -> R {
        let insets = self.ignoring_inset_writes.replace(true);
        let result = write();
        self.ignoring_inset_writes.set(insets);
        result
    }

    /// Whether `sample` should reach the state machine. Counts the ones that
    /// do not.
    pub fn admits(&self, sample: &ScrollSample) -> bool {
        let ignored = match sample {
            ScrollSample::ContentOffset(_) => self.ignoring_offset_notifications.get(),
            ScrollSample::ContentInset(_) => self.ignoring_inset_writes.get(),
        };
        if ignored {
            self.swallowed.set(self.swallowed.get() + 1);
            log::trace!("ignoring self-induced {sample:?}");
        }
        !ignored
    }
}
