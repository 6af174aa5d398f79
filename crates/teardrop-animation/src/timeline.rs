//! Clock-free playback position for an [`AnimationPlan`].

use crate::animation::{AnimationPlan, AnimationSpec, Lerp};

/// Where a transition stands at a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Still inside the start delay.
    Pending,
    /// Running; carries the eased progress in `[0, 1)`.
    Running(f32),
    /// Reached its target.
    Finished,
}

/// Elapsed-time cursor over a plan. The host advances it from its own frame
/// clock; nothing here reads the system time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    elapsed_millis: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(elapsed_millis: u64) -> Self {
        Self { elapsed_millis }
    }

    pub fn elapsed_millis(&self) -> u64 {
        self.elapsed_millis
    }

    pub fn advance(&mut self, delta_millis: u64) {
        self.elapsed_millis = self.elapsed_millis.saturating_add(delta_millis);
    }

    pub fn phase(&self, spec: &AnimationSpec) -> Phase {
        if self.elapsed_millis < spec.delay_millis {
            return Phase::Pending;
        }
        let running = self.elapsed_millis - spec.delay_millis;
        if running >= spec.duration_millis {
            return Phase::Finished;
        }
        let linear = running as f32 / spec.duration_millis.max(1) as f32;
        Phase::Running(spec.easing.transform(linear))
    }

    /// Eased progress: 0 while pending, 1 once finished.
    pub fn progress(&self, spec: &AnimationSpec) -> f32 {
        match self.phase(spec) {
            Phase::Pending => 0.0,
            Phase::Running(progress) => progress,
            Phase::Finished => 1.0,
        }
    }

    pub fn sample<V: Lerp>(&self, from: &V, to: &V, spec: &AnimationSpec) -> V {
        from.lerp(to, self.progress(spec))
    }

    pub fn is_complete<T>(&self, plan: &AnimationPlan<T>) -> bool {
        self.elapsed_millis >= plan.total_duration_millis()
    }
}
