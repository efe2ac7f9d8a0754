//! Points and path descriptions.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// One absolute drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { c1: Point, c2: Point, to: Point },
}

impl PathCommand {
    pub fn end(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::CubicTo { to, .. } => to,
        }
    }
}

/// A sequence of drawing commands. Serializes as SVG path data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(point: Point) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(point)],
        }
    }

    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, to: Point) {
        self.commands.push(PathCommand::CubicTo { c1, c2, to });
    }

    /// Horizontal S-curve from the current point to `to`. Both control points
    /// share the x found `bias` of the way along; the first keeps the start y,
    /// the second takes the end y.
    pub fn s_curve_to(&mut self, to: Point, bias: f64) {
        let Some(from) = self.end() else {
            self.move_to(to);
            return;
        };
        let cx = from.x + (to.x - from.x) * bias;
        self.cubic_to(Point::new(cx, from.y), Point::new(cx, to.y), to);
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[cfg(test)]
    pub fn start(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::end)
    }

    pub fn end(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::end)
    }

    #[cfg(test)]
    pub fn curve_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
            .count()
    }

    /// Approximate the path by a polyline, `steps` samples per curve.
    /// Each `MoveTo` starts a new polyline.
    pub fn flatten(&self, steps: usize) -> Vec<Vec<Point>> {
        let steps = steps.max(1);
        let mut lines: Vec<Vec<Point>> = Vec::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => lines.push(vec![p]),
                PathCommand::LineTo(p) => match lines.last_mut() {
                    Some(line) => line.push(p),
                    None => lines.push(vec![p]),
                },
                PathCommand::CubicTo { c1, c2, to } => {
                    let Some(line) = lines.last_mut() else {
                        lines.push(vec![to]);
                        continue;
                    };
                    let Some(&from) = line.last() else {
                        line.push(to);
                        continue;
                    };
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        line.push(cubic_point(from, c1, c2, to, t));
                    }
                }
            }
        }
        lines
    }
}

/// de Casteljau evaluation of a cubic Bézier at `t`
fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let a = p0.lerp(p1, t);
    let b = p1.lerp(p2, t);
    let c = p2.lerp(p3, t);
    let d = a.lerp(b, t);
    let e = b.lerp(c, t);
    d.lerp(e, t)
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match command {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y)?,
                PathCommand::CubicTo { c1, c2, to } => write!(
                    f,
                    "C {} {}, {} {}, {} {}",
                    c1.x, c1.y, c2.x, c2.y, to.x, to.y
                )?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_path_data() {
        let mut path = Path::starting_at(Point::new(10.0, 20.0));
        path.s_curve_to(Point::new(30.0, 40.0), 0.5);
        path.line_to(Point::new(50.5, 40.0));
        assert_eq!(path.to_string(), "M 10 20 C 20 20, 20 40, 30 40 L 50.5 40");
    }

    #[test]
    fn test_s_curve_bias() {
        let mut path = Path::starting_at(Point::new(100.0, 0.0));
        path.s_curve_to(Point::new(200.0, 50.0), 0.4);
        match path.commands()[1] {
            PathCommand::CubicTo { c1, c2, to } => {
                assert_eq!(c1, Point::new(140.0, 0.0));
                assert_eq!(c2, Point::new(140.0, 50.0));
                assert_eq!(to, Point::new(200.0, 50.0));
            }
            other => panic!("expected a curve, got {:?}", other),
        }
    }

    #[test]
    fn test_s_curve_on_empty_path_moves() {
        let mut path = Path::new();
        path.s_curve_to(Point::new(5.0, 5.0), 0.5);
        assert_eq!(path.commands(), &[PathCommand::MoveTo(Point::new(5.0, 5.0))]);
    }

    #[test]
    fn test_flatten_hits_endpoints() {
        let mut path = Path::starting_at(Point::new(0.0, 0.0));
        path.s_curve_to(Point::new(100.0, 60.0), 0.5);
        let lines = path.flatten(8);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 9);
        assert_eq!(lines[0][0], Point::new(0.0, 0.0));
        assert_eq!(lines[0][8], Point::new(100.0, 60.0));
        // Symmetric S-curve passes through the midpoint
        assert!(lines[0][4].distance(Point::new(50.0, 30.0)) < 1e-9);
    }

    #[test]
    fn test_serializes_as_path_data() {
        let path = Path::starting_at(Point::new(1.0, 2.0));
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"M 1 2\"");
    }
}
