use super::*;
use crate::{Phase, Timeline};
use teardrop_graphics::{EdgeInsets, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Property {
    Opacity,
    Scale,
}

fn fade_then_scale() -> AnimationPlan<Property> {
    AnimationPlan::new()
        .with(Transition::new(Property::Opacity, AnimationSpec::linear(100)).fill_forwards())
        .with(Transition::new(
            Property::Scale,
            AnimationSpec::linear(200).with_delay(150),
        ))
}

#[test]
fn easing_curves_pin_their_endpoints() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ] {
        assert_eq!(easing.transform(0.0), 0.0, "{easing:?} at 0");
        assert_eq!(easing.transform(1.0), 1.0, "{easing:?} at 1");
    }
}

#[test]
fn easing_curves_are_monotonic() {
    for easing in [Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
        let mut previous = 0.0;
        for step in 0..=50 {
            let value = easing.transform(step as f32 / 50.0);
            assert!(
                value + 1e-4 >= previous,
                "{easing:?} decreased at step {step}: {previous} -> {value}"
            );
            previous = value;
        }
    }
}

#[test]
fn ease_in_starts_slower_than_linear() {
    assert!(Easing::EaseIn.transform(0.25) < 0.25);
    assert!(Easing::EaseOut.transform(0.25) > 0.25);
}

#[test]
fn plan_duration_includes_delays() {
    let plan = fade_then_scale();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.total_duration_millis(), 350);
    assert!(plan.transitions()[0].fill_forwards);
    assert!(!plan.transitions()[1].fill_forwards);
}

#[test]
fn empty_plan_is_immediately_complete() {
    let plan: AnimationPlan<Property> = AnimationPlan::new();
    assert!(plan.is_empty());
    assert!(Timeline::new().is_complete(&plan));
}

#[test]
fn timeline_reports_pending_running_finished() {
    let plan = fade_then_scale();
    let scale = plan
        .find(|property| *property == Property::Scale)
        .expect("scale transition");

    assert_eq!(Timeline::at(100).phase(&scale.spec), Phase::Pending);
    assert_eq!(Timeline::at(250).phase(&scale.spec), Phase::Running(0.5));
    assert_eq!(Timeline::at(350).phase(&scale.spec), Phase::Finished);
}

#[test]
fn timeline_advances_until_plan_completes() {
    let plan = fade_then_scale();
    let mut timeline = Timeline::new();
    let mut frames = 0;
    while !timeline.is_complete(&plan) {
        timeline.advance(16);
        frames += 1;
    }
    assert_eq!(frames, 22);
    assert_eq!(timeline.elapsed_millis(), 352);
}

#[test]
fn instant_spec_finishes_on_first_sample() {
    let spec = AnimationSpec::instant();
    assert_eq!(Timeline::new().phase(&spec), Phase::Finished);
    assert_eq!(Timeline::new().progress(&spec), 1.0);
}

#[test]
fn sampling_interpolates_values() {
    let spec = AnimationSpec::linear(400);
    let timeline = Timeline::at(100);

    let opacity = timeline.sample(&1.0f32, &0.0, &spec);
    assert!((opacity - 0.75).abs() < 1e-6);

    let point = timeline.sample(&Point::ZERO, &Point::new(40.0, 80.0), &spec);
    assert_eq!(point, Point::new(10.0, 20.0));

    let insets = timeline.sample(
        &EdgeInsets::from_components(0.0, 44.0, 0.0, 0.0),
        &EdgeInsets::default(),
        &spec,
    );
    assert_eq!(insets.top, 33.0);
}
