//! Declarative animation plans for the trigger edge and refresh start/end.
//!
//! Plans only describe targets and timing. The host's animation driver plays
//! them and reports back through
//! [`RefreshControl::finish_dismissal`](crate::RefreshControl::finish_dismissal)
//! when an end-of-refresh plan completes.

use crate::config::DismissalTiming;
use teardrop_animation::{AnimationPlan, AnimationSpec, Easing, Transition};
use teardrop_graphics::PathDescriptor;

/// Animatable properties of the indicator layers and the activity view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerProperty {
    BodyPath,
    BodyShadowPath,
    BodyOpacity,
    ArrowOpacity,
    HighlightOpacity,
    ActivityAlpha,
    ActivityScale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerValue {
    Path(PathDescriptor),
    Scalar(f32),
}

impl LayerValue {
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            LayerValue::Scalar(value) => Some(*value),
            LayerValue::Path(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathDescriptor> {
        match self {
            LayerValue::Path(path) => Some(path),
            LayerValue::Scalar(_) => None,
        }
    }
}

/// Animate `property` to `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerChange {
    pub property: LayerProperty,
    pub value: LayerValue,
}

impl LayerChange {
    pub fn path(property: LayerProperty, path: PathDescriptor) -> Self {
        Self {
            property,
            value: LayerValue::Path(path),
        }
    }

    pub fn scalar(property: LayerProperty, value: f32) -> Self {
        Self {
            property,
            value: LayerValue::Scalar(value),
        }
    }
}

pub type LayerPlan = AnimationPlan<LayerChange>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    /// The pull reached the trigger edge.
    Trigger,
    /// The host started a refresh programmatically.
    BeginRefreshing,
    /// The host finished the refresh.
    EndRefreshing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DismissalAnimationPlan {
    kind: PlanKind,
    plan: LayerPlan,
}

impl DismissalAnimationPlan {
    /// Body and shadow collapse into `closed_path` while every layer fades
    /// out; the activity indicator scales in once the morph is done.
    pub fn on_trigger(closed_path: PathDescriptor, timing: &DismissalTiming) -> Self {
        let morph = AnimationSpec::linear(timing.morph_millis);
        let fade = AnimationSpec::linear(timing.fade_millis);
        let scale_in = AnimationSpec::linear(timing.activity_scale_in_millis)
            .with_delay(timing.activity_delay_millis);

        let plan = LayerPlan::new()
            .with(
                Transition::new(
                    LayerChange::path(LayerProperty::BodyPath, closed_path.clone()),
                    morph,
                )
                .fill_forwards(),
            )
            .with(
                Transition::new(
                    LayerChange::path(LayerProperty::BodyShadowPath, closed_path),
                    morph,
                )
                .fill_forwards(),
            )
            .with(
                Transition::new(
                    LayerChange::scalar(LayerProperty::BodyOpacity, 0.0),
                    fade.with_delay(timing.body_fade_delay_millis),
                )
                .fill_forwards(),
            )
            .with(
                Transition::new(LayerChange::scalar(LayerProperty::ArrowOpacity, 0.0), fade)
                    .fill_forwards(),
            )
            .with(
                Transition::new(
                    LayerChange::scalar(LayerProperty::HighlightOpacity, 0.0),
                    fade,
                )
                .fill_forwards(),
            )
            .with(Transition::new(
                LayerChange::scalar(LayerProperty::ActivityAlpha, 1.0),
                scale_in,
            ))
            .with(Transition::new(
                LayerChange::scalar(LayerProperty::ActivityScale, 1.0),
                scale_in,
            ));

        Self {
            kind: PlanKind::Trigger,
            plan,
        }
    }

    /// Hides the indicator layers at once; the activity indicator is shown
    /// directly by the control.
    pub fn on_begin_refreshing() -> Self {
        let instant = AnimationSpec::instant();
        let plan = [
            LayerProperty::BodyOpacity,
            LayerProperty::ArrowOpacity,
            LayerProperty::HighlightOpacity,
        ]
        .into_iter()
        .fold(LayerPlan::new(), |plan, property| {
            plan.with(Transition::new(LayerChange::scalar(property, 0.0), instant).fill_forwards())
        });

        Self {
            kind: PlanKind::BeginRefreshing,
            plan,
        }
    }

    /// Activity indicator fades and shrinks while the inset closes.
    pub fn on_end_refreshing(timing: &DismissalTiming) -> Self {
        let spec = AnimationSpec::tween(timing.end_refreshing_millis, Easing::EaseInOut);
        let plan = LayerPlan::new()
            .with(Transition::new(
                LayerChange::scalar(LayerProperty::ActivityAlpha, 0.0),
                spec,
            ))
            .with(Transition::new(
                LayerChange::scalar(LayerProperty::ActivityScale, timing.activity_initial_scale),
                spec,
            ));

        Self {
            kind: PlanKind::EndRefreshing,
            plan,
        }
    }

    pub fn kind(&self) -> PlanKind {
        self.kind
    }

    pub fn plan(&self) -> &LayerPlan {
        &self.plan
    }

    pub fn total_duration_millis(&self) -> u64 {
        self.plan.total_duration_millis()
    }

    pub fn transition(&self, property: LayerProperty) -> Option<&Transition<LayerChange>> {
        self.plan.find(|change| change.property == property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teardrop_graphics::{Orientation, PathBuilder, Point};

    fn lens() -> PathDescriptor {
        let mut path = PathBuilder::new(Orientation::Vertical);
        path.arc(Point::new(160.0, 300.0), 5.6, 0.0, std::f32::consts::PI, true)
            .close();
        path.build()
    }

    #[test]
    fn trigger_plan_morphs_then_fades_the_body() {
        let plan = DismissalAnimationPlan::on_trigger(lens(), &DismissalTiming::default());
        assert_eq!(plan.kind(), PlanKind::Trigger);

        let morph = plan.transition(LayerProperty::BodyPath).expect("morph");
        assert_eq!(morph.spec.duration_millis, 150);
        assert!(morph.fill_forwards);
        assert_eq!(morph.target.value.as_path(), Some(&lens()));

        let shadow = plan.transition(LayerProperty::BodyShadowPath).expect("shadow");
        assert_eq!(shadow.spec, morph.spec);

        let body_fade = plan.transition(LayerProperty::BodyOpacity).expect("body fade");
        assert_eq!(body_fade.spec.duration_millis, 100);
        assert_eq!(body_fade.spec.delay_millis, 150);
        assert_eq!(body_fade.target.value.as_scalar(), Some(0.0));
    }

    #[test]
    fn trigger_plan_fades_arrow_and_highlight_immediately() {
        let plan = DismissalAnimationPlan::on_trigger(lens(), &DismissalTiming::default());
        for property in [LayerProperty::ArrowOpacity, LayerProperty::HighlightOpacity] {
            let fade = plan.transition(property).expect("fade");
            assert_eq!(fade.spec.delay_millis, 0);
            assert_eq!(fade.spec.duration_millis, 100);
            assert!(fade.fill_forwards);
        }
    }

    #[test]
    fn trigger_plan_scales_activity_in_after_the_morph() {
        let plan = DismissalAnimationPlan::on_trigger(lens(), &DismissalTiming::default());
        let scale = plan.transition(LayerProperty::ActivityScale).expect("scale");
        assert_eq!(scale.spec.duration_millis, 200);
        assert_eq!(scale.spec.delay_millis, 150);
        assert_eq!(scale.target.value.as_scalar(), Some(1.0));
        assert_eq!(plan.total_duration_millis(), 350);
    }

    #[test]
    fn begin_refreshing_plan_hides_layers_instantly() {
        let plan = DismissalAnimationPlan::on_begin_refreshing();
        assert_eq!(plan.kind(), PlanKind::BeginRefreshing);
        assert_eq!(plan.plan().len(), 3);
        assert_eq!(plan.total_duration_millis(), 0);
        assert!(plan.transition(LayerProperty::BodyPath).is_none());
    }

    #[test]
    fn end_refreshing_plan_shrinks_activity() {
        let plan = DismissalAnimationPlan::on_end_refreshing(&DismissalTiming::default());
        assert_eq!(plan.kind(), PlanKind::EndRefreshing);
        assert_eq!(plan.total_duration_millis(), 400);
        let scale = plan.transition(LayerProperty::ActivityScale).expect("scale");
        assert_eq!(scale.target.value.as_scalar(), Some(0.1));
    }
}
