//! Vector path descriptors handed to the renderer.
//!
//! Angles are measured from the positive `x` axis toward the positive `y`
//! axis (y grows downward on screen). `clockwise` arcs sweep toward
//! decreasing angles, the way Quartz paths behave inside a flipped layer.

use crate::axis::Orientation;
use crate::geometry::Point;
use smallvec::SmallVec;
use std::f32::consts::TAU;
use std::fmt::Write;

/// How overlapping sub-regions of a path are filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    pub fn as_svg(self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Circular arc. When the path already has a current point, a straight
    /// segment joins it to the arc's start point.
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    },
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        to: Point,
    },
    Close,
}

impl PathCommand {
    fn transposed(&self) -> Self {
        let orientation = Orientation::Horizontal;
        match *self {
            PathCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                clockwise,
            } => PathCommand::Arc {
                center: orientation.map_point(center),
                radius,
                start_angle: orientation.map_angle(start_angle),
                end_angle: orientation.map_angle(end_angle),
                clockwise: orientation.map_clockwise(clockwise),
            },
            PathCommand::LineTo(point) => PathCommand::LineTo(point.transpose()),
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => PathCommand::CubicTo {
                control1: control1.transpose(),
                control2: control2.transpose(),
                to: to.transpose(),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

fn arc_point(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Ordered list of path primitives plus the fill rule they are painted with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathDescriptor {
    commands: SmallVec<[PathCommand; 8]>,
    fill_rule: FillRule,
}

impl PathDescriptor {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PathCommand::Arc { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PathCommand::LineTo(_)))
            .count()
    }

    pub fn cubic_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PathCommand::CubicTo { .. }))
            .count()
    }

    /// Same path mirrored across the main diagonal (x and y swapped).
    pub fn transposed(&self) -> Self {
        Self {
            commands: self.commands.iter().map(PathCommand::transposed).collect(),
            fill_rule: self.fill_rule,
        }
    }

    /// Converts the path into SVG path data (`d` attribute).
    pub fn to_svg_path_data(&self) -> String {
        let mut data = String::new();
        let mut current: Option<Point> = None;
        let mut subpath_start: Option<Point> = None;

        for command in &self.commands {
            match *command {
                PathCommand::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } => {
                    let start = arc_point(center, radius, start_angle);
                    let end = arc_point(center, radius, end_angle);
                    if current.is_some() {
                        let _ = write!(data, "L{} {} ", start.x, start.y);
                    } else {
                        let _ = write!(data, "M{} {} ", start.x, start.y);
                        subpath_start = Some(start);
                    }
                    let sweep = if clockwise {
                        (start_angle - end_angle).rem_euclid(TAU)
                    } else {
                        (end_angle - start_angle).rem_euclid(TAU)
                    };
                    if sweep > 0.0 {
                        let large_arc = u8::from(sweep > std::f32::consts::PI);
                        let sweep_flag = u8::from(!clockwise);
                        let _ = write!(
                            data,
                            "A{radius} {radius} 0 {large_arc} {sweep_flag} {} {} ",
                            end.x, end.y
                        );
                    }
                    current = Some(end);
                }
                PathCommand::LineTo(point) => {
                    if current.is_none() {
                        let _ = write!(data, "M{} {} ", point.x, point.y);
                        subpath_start = Some(point);
                    } else {
                        let _ = write!(data, "L{} {} ", point.x, point.y);
                    }
                    current = Some(point);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    to,
                } => {
                    if current.is_none() {
                        let _ = write!(data, "M{} {} ", control1.x, control1.y);
                        subpath_start = Some(control1);
                    }
                    let _ = write!(
                        data,
                        "C{} {} {} {} {} {} ",
                        control1.x, control1.y, control2.x, control2.y, to.x, to.y
                    );
                    current = Some(to);
                }
                PathCommand::Close => {
                    data.push_str("Z ");
                    current = subpath_start.take();
                }
            }
        }

        data.truncate(data.trim_end().len());
        data
    }
}

/// Accumulates path commands written in vertical axis space and maps them
/// into the builder's orientation as they are recorded.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    orientation: Orientation,
    commands: SmallVec<[PathCommand; 8]>,
    fill_rule: FillRule,
}

impl PathBuilder {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            commands: SmallVec::new(),
            fill_rule: FillRule::NonZero,
        }
    }

    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }

    pub fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) -> &mut Self {
        self.commands.push(PathCommand::Arc {
            center: self.orientation.map_point(center),
            radius,
            start_angle: self.orientation.map_angle(start_angle),
            end_angle: self.orientation.map_angle(end_angle),
            clockwise: self.orientation.map_clockwise(clockwise),
        });
        self
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.commands
            .push(PathCommand::LineTo(self.orientation.map_point(point)));
        self
    }

    pub fn cubic_to(&mut self, control1: Point, control2: Point, to: Point) -> &mut Self {
        self.commands.push(PathCommand::CubicTo {
            control1: self.orientation.map_point(control1),
            control2: self.orientation.map_point(control2),
            to: self.orientation.map_point(to),
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> PathDescriptor {
        PathDescriptor {
            commands: self.commands,
            fill_rule: self.fill_rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn half_disc(orientation: Orientation) -> PathDescriptor {
        let mut builder = PathBuilder::new(orientation);
        builder
            .arc(Point::new(10.0, 20.0), 5.0, 0.0, PI, true)
            .line_to(Point::new(15.0, 20.0))
            .close();
        builder.build()
    }

    #[test]
    fn builder_records_commands_in_order() {
        let path = half_disc(Orientation::Vertical);
        assert_eq!(path.arc_count(), 1);
        assert_eq!(path.line_count(), 1);
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
        assert_eq!(path.fill_rule(), FillRule::NonZero);
    }

    #[test]
    fn horizontal_builder_matches_transposed_vertical_path() {
        let vertical = half_disc(Orientation::Vertical);
        let horizontal = half_disc(Orientation::Horizontal);
        assert_eq!(horizontal, vertical.transposed());
    }

    #[test]
    fn svg_export_moves_to_arc_start_and_closes() {
        let data = half_disc(Orientation::Vertical).to_svg_path_data();
        assert!(data.starts_with("M15 20 A5 5 0 0 0 5 20"), "{data}");
        assert!(data.ends_with('Z'), "{data}");
    }

    #[test]
    fn svg_export_joins_second_arc_with_a_line() {
        let mut builder = PathBuilder::new(Orientation::Vertical).with_fill_rule(FillRule::EvenOdd);
        builder
            .arc(Point::ZERO, 2.0, 0.0, PI / 2.0, false)
            .arc(Point::ZERO, 1.0, PI / 2.0, 0.0, true);
        let path = builder.build();
        let data = path.to_svg_path_data();
        assert_eq!(data.matches('A').count(), 2);
        assert_eq!(data.matches('L').count(), 1);
        assert_eq!(path.fill_rule().as_svg(), "evenodd");
    }
}
