use super::*;
use crate::metrics::{HIGHLIGHT_SHIFT, MAX_BOTTOM_PADDING, MAX_BOTTOM_RADIUS};
use teardrop_graphics::PathCommand;

fn builder(orientation: Orientation) -> ShapeGeometryBuilder {
    ShapeGeometryBuilder::new(
        ShapeMetrics::default(),
        IndicatorBounds::new(320.0, 400.0),
        orientation,
    )
}

fn params(offset: f32) -> GeometryParameters {
    GeometryParameters::from_offset(offset, &ShapeMetrics::default())
}

fn arc_centers(path: &PathDescriptor) -> Vec<Point> {
    path.commands()
        .iter()
        .filter_map(|command| match command {
            PathCommand::Arc { center, .. } => Some(*center),
            _ => None,
        })
        .collect()
}

#[test]
fn body_is_two_arcs_joined_by_two_cubics() {
    let paths = builder(Orientation::Vertical).build(-70.0, &params(-70.0));
    assert_eq!(paths.body.arc_count(), 2);
    assert_eq!(paths.body.cubic_count(), 2);
    assert_eq!(paths.body.line_count(), 0);
    assert!(matches!(
        paths.body.commands(),
        [
            PathCommand::Arc { .. },
            PathCommand::CubicTo { .. },
            PathCommand::Arc { .. },
            PathCommand::CubicTo { .. },
            PathCommand::Close
        ]
    ));
}

#[test]
fn arrow_is_an_even_odd_crescent() {
    let paths = builder(Orientation::Vertical).build(-70.0, &params(-70.0));
    assert_eq!(paths.arrow.fill_rule(), FillRule::EvenOdd);
    assert_eq!(paths.arrow.arc_count(), 2);
    assert_eq!(paths.arrow.line_count(), 4);

    let radii: Vec<f32> = paths
        .arrow
        .commands()
        .iter()
        .filter_map(|command| match command {
            PathCommand::Arc { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect();
    let p = params(-70.0);
    assert!((radii[0] - (p.arrow_radius + p.arrow_size / 2.0)).abs() < 1e-5);
    assert!((radii[1] - (p.arrow_radius - p.arrow_size / 2.0)).abs() < 1e-5);
}

#[test]
fn highlight_is_a_nonzero_lens_shifted_along_the_pull() {
    let paths = builder(Orientation::Vertical).build(-70.0, &params(-70.0));
    assert_eq!(paths.highlight.fill_rule(), FillRule::NonZero);
    let centers = arc_centers(&paths.highlight);
    assert_eq!(centers.len(), 2);
    assert_eq!(centers[1].x, centers[0].x);
    assert!((centers[1].y - centers[0].y - HIGHLIGHT_SHIFT).abs() < 1e-5);
}

#[test]
fn relaxed_shape_puts_head_on_tail() {
    let anchors = builder(Orientation::Vertical).anchors(-10.0, &params(-10.0));
    assert_eq!(anchors.head, anchors.tail);
    assert_eq!(anchors.tail.x, 160.0);
    assert_eq!(anchors.tail.y, 400.0 - MAX_BOTTOM_PADDING - MAX_BOTTOM_RADIUS);
}

#[test]
fn head_follows_the_offset_while_tail_stays() {
    let builder = builder(Orientation::Vertical);
    let near = builder.anchors(-60.0, &params(-60.0));
    let far = builder.anchors(-80.0, &params(-80.0));

    let p = params(-60.0);
    assert!((near.head.y - (400.0 - 60.0 + p.top_padding + p.top_radius)).abs() < 1e-4);
    assert!(far.head.y < near.head.y, "head moves with the finger");

    let p_far = params(-80.0);
    assert!((far.tail.y - (400.0 - p_far.bottom_padding - p_far.bottom_radius)).abs() < 1e-4);
}

#[test]
fn saturated_pull_drags_the_tail_along() {
    let builder = builder(Orientation::Vertical);
    let at_edge = builder.anchors(-96.0, &params(-96.0));
    let beyond = builder.anchors(-106.0, &params(-106.0));
    assert!((at_edge.tail.y - beyond.tail.y - 10.0).abs() < 1e-4);
}

#[test]
fn builder_is_stateless() {
    let builder = builder(Orientation::Vertical);
    let first = builder.build(-75.0, &params(-75.0));
    let _ = builder.build(-20.0, &params(-20.0));
    let again = builder.build(-75.0, &params(-75.0));
    assert_eq!(first, again);
}

#[test]
fn horizontal_geometry_is_transposed_vertical_geometry() {
    let vertical = builder(Orientation::Vertical);
    let horizontal = builder(Orientation::Horizontal);
    for step in 0..40 {
        let offset = 5.0 - step as f32 * 3.0;
        let p = params(offset);
        assert_eq!(
            horizontal.build(offset, &p),
            vertical.build(offset, &p).transposed(),
            "offset {offset}"
        );
        assert_eq!(
            horizontal.head_center(offset, &p),
            vertical.head_center(offset, &p).transpose()
        );
    }
}

#[test]
fn closed_body_is_a_small_lens_on_the_head() {
    let builder = builder(Orientation::Vertical);
    let p = params(-96.0);
    let head = builder.head_center(-96.0, &p);
    let closed = builder.closed_body(head);

    assert_eq!(closed.arc_count(), 2);
    assert_eq!(closed.cubic_count(), 2);
    for command in closed.commands() {
        if let PathCommand::Arc { center, radius, .. } = command {
            assert_eq!(*center, head);
            assert!((radius - 5.6).abs() < 1e-5);
        }
    }
}

#[test]
fn closed_body_in_horizontal_layout_stays_on_the_head() {
    let horizontal = builder(Orientation::Horizontal);
    let vertical = builder(Orientation::Vertical);
    let p = params(-100.0);
    let head = horizontal.head_center(-100.0, &p);
    assert_eq!(
        horizontal.closed_body(head),
        vertical.closed_body(head.transpose()).transposed()
    );
}
