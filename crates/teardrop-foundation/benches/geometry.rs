use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use teardrop_foundation::{
    GeometryParameters, IndicatorBounds, InteractionStateMachine, Outcome, ScrollContext,
    ShapeGeometryBuilder, ShapeMetrics,
};
use teardrop_graphics::{Orientation, Size};

const VIEWPORT: Size = Size {
    width: 1080.0,
    height: 1920.0,
};
const OFFSET_SAMPLES: &[f32] = &[-10.0, -60.0, -95.0];

fn builder(orientation: Orientation) -> ShapeGeometryBuilder {
    let metrics = ShapeMetrics::default();
    let bounds = IndicatorBounds::for_viewport(VIEWPORT, orientation, &metrics);
    ShapeGeometryBuilder::new(metrics, bounds, orientation)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape_build");
    for orientation in [Orientation::Vertical, Orientation::Horizontal] {
        let builder = builder(orientation);
        for &offset in OFFSET_SAMPLES {
            let params = GeometryParameters::from_offset(offset, &ShapeMetrics::default());
            group.bench_with_input(
                BenchmarkId::new(format!("{orientation:?}"), offset),
                &offset,
                |b, &offset| {
                    b.iter(|| black_box(builder.build(black_box(offset), &params)));
                },
            );
        }
    }
    group.finish();
}

fn bench_pull_gesture(c: &mut Criterion) {
    let offsets: Vec<f32> = (0..=120).map(|step| -(step as f32)).collect();
    c.bench_function("pull_gesture_121_samples", |b| {
        b.iter(|| {
            let mut machine =
                InteractionStateMachine::new(ShapeMetrics::default(), Orientation::Vertical);
            let builder = builder(Orientation::Vertical);
            let context = ScrollContext::default().with_tracking(true);
            for &offset in &offsets {
                let evaluation = machine.evaluate(offset, &context);
                if let Outcome::Drawable(params) = evaluation.outcome {
                    black_box(builder.build(offset, &params));
                }
            }
        });
    });
}

criterion_group!(geometry, bench_build, bench_pull_gesture);
criterion_main!(geometry);
