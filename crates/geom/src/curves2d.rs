//! A stream of drawing commands describing curves made of lines, béziers and arcs.

use crate::curve::{origin, CurveSegment, CurveSource, CurveVisitor};
use crate::math::{Angle, Point, Vector};
use crate::{Arc, ArcFlags, CubicBezierSegment, LineSegment, QuadraticBezierSegment, SvgArc};

/// A drawing command.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CurveCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadraticTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    /// An elliptical arc using the SVG parametrization.
    ArcTo { radii: Vector, x_rotation: Angle, flags: ArcFlags, to: Point },
    Close,
}

/// A sequence of subpaths described with drawing commands.
///
/// Drawing commands that are not preceded by a `MoveTo` start a subpath at the
/// current position, which is the origin at the beginning of the stream and the
/// first point of the previous subpath after a `Close`.
///
/// # Example
///
/// ```
/// use vstroke_geom::Curves2d;
/// use vstroke_geom::math::point;
///
/// let mut curves = Curves2d::new();
/// curves.move_to(point(0.0, 0.0));
/// curves.line_to(point(10.0, 0.0));
/// curves.quadratic_bezier_to(point(10.0, 10.0), point(0.0, 10.0));
/// curves.close();
///
/// assert_eq!(curves.commands().len(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Curves2d {
    commands: Vec<CurveCommand>,
}

impl Curves2d {
    pub fn new() -> Self {
        Curves2d { commands: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Curves2d {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// A closed polygon, or an open polyline.
    pub fn from_polyline(points: &[Point], closed: bool) -> Self {
        let mut curves = Curves2d::with_capacity(points.len() + 1);
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            curves.move_to(*first);
            for p in iter {
                curves.line_to(*p);
            }
            if closed {
                curves.close();
            }
        }

        curves
    }

    #[inline]
    pub fn commands(&self) -> &[CurveCommand] {
        &self.commands
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn move_to(&mut self, to: Point) {
        self.commands.push(CurveCommand::MoveTo(to));
    }

    pub fn line_to(&mut self, to: Point) {
        self.commands.push(CurveCommand::LineTo(to));
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.commands.push(CurveCommand::QuadraticTo { ctrl, to });
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.commands.push(CurveCommand::CubicTo { ctrl1, ctrl2, to });
    }

    pub fn arc_to(&mut self, radii: Vector, x_rotation: Angle, flags: ArcFlags, to: Point) {
        self.commands.push(CurveCommand::ArcTo {
            radii,
            x_rotation,
            flags,
            to,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(CurveCommand::Close);
    }
}

impl CurveSource for Curves2d {
    fn visit<V: CurveVisitor>(&self, visitor: &mut V) {
        let mut current = origin();
        let mut first = origin();
        let mut in_subpath = false;

        for cmd in &self.commands {
            let to = match *cmd {
                CurveCommand::MoveTo(to) => {
                    if in_subpath {
                        visitor.end(false);
                    }
                    visitor.begin(to);
                    in_subpath = true;
                    current = to;
                    first = to;
                    continue;
                }
                CurveCommand::Close => {
                    if in_subpath {
                        if current != first {
                            visitor.segment(&CurveSegment::Line(LineSegment { from: current, to: first }));
                        }
                        visitor.end(true);
                        in_subpath = false;
                    }
                    current = first;
                    continue;
                }
                CurveCommand::LineTo(to)
                | CurveCommand::QuadraticTo { to, .. }
                | CurveCommand::CubicTo { to, .. }
                | CurveCommand::ArcTo { to, .. } => to,
            };

            if !in_subpath {
                visitor.begin(current);
                first = current;
                in_subpath = true;
            }

            let segment = match *cmd {
                CurveCommand::QuadraticTo { ctrl, to } => CurveSegment::Quadratic(QuadraticBezierSegment {
                    from: current,
                    ctrl,
                    to,
                }),
                CurveCommand::CubicTo { ctrl1, ctrl2, to } => CurveSegment::Cubic(CubicBezierSegment {
                    from: current,
                    ctrl1,
                    ctrl2,
                    to,
                }),
                CurveCommand::ArcTo {
                    radii,
                    x_rotation,
                    flags,
                    to,
                } => arc_segment(SvgArc {
                    from: current,
                    to,
                    radii,
                    x_rotation,
                    flags,
                }),
                _ => CurveSegment::Line(LineSegment { from: current, to }),
            };

            visitor.segment(&segment);
            current = to;
        }

        if in_subpath {
            visitor.end(false);
        }
    }
}

// Degenerate SVG arcs are straight lines.
fn arc_segment(arc: SvgArc<f64>) -> CurveSegment {
    if arc.radii.x == 0.0 || arc.radii.y == 0.0 || arc.from == arc.to {
        return CurveSegment::Line(LineSegment {
            from: arc.from,
            to: arc.to,
        });
    }

    CurveSegment::Arc(Arc::from_svg_arc(&arc))
}

#[cfg(test)]
use crate::math::{point, vector};

#[cfg(test)]
#[derive(Debug, PartialEq)]
enum Event {
    Begin(Point),
    Line(Point, Point),
    Quadratic,
    Cubic,
    Arc(Point, Point),
    End(bool),
}

#[cfg(test)]
#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

#[cfg(test)]
impl CurveVisitor for Recorder {
    fn begin(&mut self, at: Point) {
        self.events.push(Event::Begin(at));
    }
    fn segment(&mut self, segment: &CurveSegment) {
        self.events.push(match segment {
            CurveSegment::Line(l) => Event::Line(l.from, l.to),
            CurveSegment::Quadratic(_) => Event::Quadratic,
            CurveSegment::Cubic(_) => Event::Cubic,
            CurveSegment::Arc(_) => Event::Arc(segment.from(), segment.to()),
            CurveSegment::Spline(_) => unimplemented!(),
        });
    }
    fn end(&mut self, close: bool) {
        self.events.push(Event::End(close));
    }
}

#[test]
fn visit_subpaths() {
    let mut curves = Curves2d::new();
    curves.move_to(point(0.0, 0.0));
    curves.line_to(point(1.0, 0.0));
    curves.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
    curves.close();
    curves.move_to(point(5.0, 5.0));
    curves.cubic_bezier_to(point(6.0, 5.0), point(6.0, 6.0), point(5.0, 6.0));
    curves.move_to(point(9.0, 9.0));

    let mut rec = Recorder::default();
    curves.visit(&mut rec);

    assert_eq!(
        rec.events,
        vec![
            Event::Begin(point(0.0, 0.0)),
            Event::Line(point(0.0, 0.0), point(1.0, 0.0)),
            Event::Quadratic,
            Event::Line(point(2.0, 1.0), point(0.0, 0.0)),
            Event::End(true),
            Event::Begin(point(5.0, 5.0)),
            Event::Cubic,
            Event::End(false),
            Event::Begin(point(9.0, 9.0)),
            Event::End(false),
        ]
    );
}

#[test]
fn close_without_closing_segment() {
    let curves = Curves2d::from_polyline(&[point(0.0, 0.0), point(1.0, 0.0), point(0.0, 0.0)], true);

    let mut rec = Recorder::default();
    curves.visit(&mut rec);

    assert_eq!(
        rec.events,
        vec![
            Event::Begin(point(0.0, 0.0)),
            Event::Line(point(0.0, 0.0), point(1.0, 0.0)),
            Event::Line(point(1.0, 0.0), point(0.0, 0.0)),
            Event::End(true),
        ]
    );
}

#[test]
fn implicit_subpath_after_close() {
    let mut curves = Curves2d::new();
    curves.line_to(point(1.0, 0.0));
    curves.line_to(point(1.0, 1.0));
    curves.close();
    curves.line_to(point(-1.0, 0.0));

    let mut rec = Recorder::default();
    curves.visit(&mut rec);

    assert_eq!(rec.events[0], Event::Begin(point(0.0, 0.0)));
    assert_eq!(rec.events[4], Event::End(true));
    assert_eq!(rec.events[5], Event::Begin(point(0.0, 0.0)));
    assert_eq!(rec.events[6], Event::Line(point(0.0, 0.0), point(-1.0, 0.0)));
}

#[test]
fn svg_arcs() {
    let mut curves = Curves2d::new();
    curves.move_to(point(0.0, 0.0));
    curves.arc_to(
        vector(1.0, 1.0),
        Angle::radians(0.0),
        ArcFlags { large_arc: false, sweep: true },
        point(2.0, 0.0),
    );
    // Zero radii: a line.
    curves.arc_to(
        vector(0.0, 1.0),
        Angle::radians(0.0),
        ArcFlags { large_arc: false, sweep: false },
        point(3.0, 0.0),
    );

    let mut rec = Recorder::default();
    curves.visit(&mut rec);

    match rec.events[1] {
        Event::Arc(from, to) => {
            assert!((from - point(0.0, 0.0)).length() < 1e-9);
            assert!((to - point(2.0, 0.0)).length() < 1e-9);
        }
        ref other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(rec.events[2], Event::Line(point(2.0, 0.0), point(3.0, 0.0)));
}
