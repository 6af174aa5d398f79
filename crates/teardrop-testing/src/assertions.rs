//! Approximate-equality assertions for geometry output.

use teardrop_graphics::{PathCommand, PathDescriptor, Point};

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that two paths have the same primitives in the same order, with
/// every coordinate, radius and angle within `tolerance`.
pub fn assert_path_approx_eq(
    actual: &PathDescriptor,
    expected: &PathDescriptor,
    tolerance: f32,
    msg: &str,
) {
    assert_eq!(
        actual.fill_rule(),
        expected.fill_rule(),
        "{}: fill rule differs",
        msg
    );
    assert_eq!(
        actual.commands().len(),
        expected.commands().len(),
        "{}: command count differs\nactual: {:?}\nexpected: {:?}",
        msg,
        actual.commands(),
        expected.commands()
    );

    for (index, (a, e)) in actual
        .commands()
        .iter()
        .zip(expected.commands())
        .enumerate()
    {
        let msg = format!("{} - command {}", msg, index);
        match (a, e) {
            (
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                },
                PathCommand::Arc {
                    center: expected_center,
                    radius: expected_radius,
                    start_angle: expected_start,
                    end_angle: expected_end,
                    clockwise: expected_clockwise,
                },
            ) => {
                assert_point_approx_eq(*center, *expected_center, tolerance, &msg);
                assert_approx_eq(*radius, *expected_radius, tolerance, &msg);
                assert_approx_eq(*start_angle, *expected_start, tolerance, &msg);
                assert_approx_eq(*end_angle, *expected_end, tolerance, &msg);
                assert_eq!(clockwise, expected_clockwise, "{}: direction differs", msg);
            }
            (PathCommand::LineTo(point), PathCommand::LineTo(expected_point)) => {
                assert_point_approx_eq(*point, *expected_point, tolerance, &msg);
            }
            (
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                },
                PathCommand::CubicTo {
                    control1: expected_control1,
                    control2: expected_control2,
                    to: expected_to,
                },
            ) => {
                assert_point_approx_eq(*control1, *expected_control1, tolerance, &msg);
                assert_point_approx_eq(*control2, *expected_control2, tolerance, &msg);
                assert_point_approx_eq(*to, *expected_to, tolerance, &msg);
            }
            (PathCommand::Close, PathCommand::Close) => {}
            _ => panic!("{}: expected {:?}, got {:?}", msg, e, a),
        }
    }
}
