//! A closed set of curve segment types and the visitor used to traverse them.

use crate::math::{point, vector, Point, Vector};
use crate::sample::StrokeSample;
use crate::segment::{SegmentEnd, SplineSegment};
use crate::utils::{compute_offset_line_tangents, cubic_second_derivative, try_normalize};
use crate::{Arc, CubicBezierSegment, LineSegment, QuadraticBezierSegment};

/// Position and derivatives of a curve at a given parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CurvePoint {
    pub position: Point,
    pub derivative: Vector,
    pub second_derivative: Vector,
}

impl CurvePoint {
    /// The unit tangent at this point.
    ///
    /// Falls back to the direction of the second derivative where the curve is
    /// stationary, then to the direction of `chord`, then to `(1, 0)`.
    pub fn unit_tangent(&self, chord: Vector) -> Vector {
        try_normalize(self.derivative)
            .or_else(|| try_normalize(self.second_derivative))
            .or_else(|| try_normalize(chord))
            .unwrap_or(vector(1.0, 0.0))
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.derivative.length()
    }
}

/// One segment of a curve, as handed to a [`CurveVisitor`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CurveSegment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    Arc(Arc<f64>),
    Spline(SplineSegment),
}

impl CurveSegment {
    /// Start of the segment.
    pub fn from(&self) -> Point {
        match self {
            CurveSegment::Line(s) => s.from,
            CurveSegment::Quadratic(s) => s.from,
            CurveSegment::Cubic(s) => s.from,
            CurveSegment::Arc(s) => arc_eval(s, 0.0).position,
            CurveSegment::Spline(s) => s.from(),
        }
    }

    /// End of the segment.
    pub fn to(&self) -> Point {
        match self {
            CurveSegment::Line(s) => s.to,
            CurveSegment::Quadratic(s) => s.to,
            CurveSegment::Cubic(s) => s.to,
            CurveSegment::Arc(s) => arc_eval(s, 1.0).position,
            CurveSegment::Spline(s) => s.to(),
        }
    }

    /// Position and derivatives with respect to `u` (expecting `u` between 0 and 1).
    pub fn eval(&self, u: f64) -> CurvePoint {
        match self {
            CurveSegment::Line(s) => CurvePoint {
                position: s.sample(u),
                derivative: s.to_vector(),
                second_derivative: vector(0.0, 0.0),
            },
            CurveSegment::Quadratic(s) => CurvePoint {
                position: s.sample(u),
                derivative: s.derivative(u),
                second_derivative: (s.from.to_vector() - s.ctrl.to_vector() * 2.0 + s.to.to_vector()) * 2.0,
            },
            CurveSegment::Cubic(s) => CurvePoint {
                position: s.sample(u),
                derivative: s.derivative(u),
                second_derivative: cubic_second_derivative(s, u),
            },
            CurveSegment::Arc(s) => arc_eval(s, u),
            CurveSegment::Spline(s) => s.eval(u),
        }
    }

    /// The half-width carried by the segment itself, if any.
    ///
    /// Only spline segments have their own width channel. Other segments are
    /// stroked with the half-width of the stroke options.
    pub fn half_width_at(&self, u: f64) -> Option<f64> {
        match self {
            CurveSegment::Spline(s) => Some(s.half_width(u)),
            _ => None,
        }
    }

    /// Half-width derivative with respect to `u`. Zero for segments without a
    /// width channel.
    pub fn half_width_derivative_at(&self, u: f64) -> f64 {
        match self {
            CurveSegment::Spline(s) => s.half_width_derivative(u),
            _ => 0.0,
        }
    }

    /// Samples the segment for stroking.
    ///
    /// `half_width` is used unless the segment has its own width channel.
    pub fn stroke_sample(&self, u: f64, half_width: f64, segment_index: usize) -> StrokeSample {
        if let CurveSegment::Spline(s) = self {
            let mut sample = s.stroke_sample(u);
            sample.segment_index = segment_index;
            return sample;
        }

        let p = self.eval(u);
        let tangent = p.unit_tangent(self.to() - self.from());

        StrokeSample::new(p.position, tangent, half_width, p.speed(), segment_index, u)
    }

    /// The unit tangents of the two offset lines at one end of the segment, the
    /// side of the normal first.
    ///
    /// `half_width` is used unless the segment has its own width channel.
    pub fn offset_line_tangents(&self, end: SegmentEnd, half_width: f64) -> [Vector; 2] {
        if let CurveSegment::Spline(s) = self {
            return s.offset_line_tangents(end);
        }

        let p = self.eval(end.parameter());
        if p.speed() == 0.0 {
            let t = p.unit_tangent(self.to() - self.from());
            return [t, t];
        }

        compute_offset_line_tangents(p.derivative, p.second_derivative, half_width, 0.0)
    }

    /// Returns true if all points of the segment are at the same position.
    pub fn is_zero_length(&self) -> bool {
        match self {
            CurveSegment::Line(s) => s.from == s.to,
            CurveSegment::Quadratic(s) => s.from == s.ctrl && s.ctrl == s.to,
            CurveSegment::Cubic(s) => s.from == s.ctrl1 && s.ctrl1 == s.ctrl2 && s.ctrl2 == s.to,
            CurveSegment::Arc(s) => {
                s.sweep_angle.radians == 0.0 || (s.radii.x == 0.0 && s.radii.y == 0.0)
            }
            CurveSegment::Spline(s) => s.is_zero_length(),
        }
    }
}

fn arc_eval(arc: &Arc<f64>, u: f64) -> CurvePoint {
    let sweep = arc.sweep_angle.radians;
    let (sin, cos) = (arc.start_angle.radians + sweep * u).sin_cos();
    let (rot_sin, rot_cos) = arc.x_rotation.radians.sin_cos();
    let rotate = |x: f64, y: f64| vector(x * rot_cos - y * rot_sin, x * rot_sin + y * rot_cos);

    let rx = arc.radii.x;
    let ry = arc.radii.y;
    let radial = rotate(rx * cos, ry * sin);

    CurvePoint {
        position: arc.center + radial,
        derivative: rotate(-rx * sin, ry * cos) * sweep,
        second_derivative: -radial * (sweep * sweep),
    }
}

/// Receives the segments of a curve, one subpath at a time.
///
/// Every `begin` is matched by an `end`. Closed subpaths are already terminated
/// by a segment going back to their first point when `end` is called with
/// `close` set to true.
pub trait CurveVisitor {
    fn begin(&mut self, at: Point);
    fn segment(&mut self, segment: &CurveSegment);
    fn end(&mut self, close: bool);
}

/// Something that can be traversed by a [`CurveVisitor`].
pub trait CurveSource {
    fn visit<V: CurveVisitor>(&self, visitor: &mut V);
}

/// The origin, used when a curve starts without an explicit position.
#[inline]
pub(crate) fn origin() -> Point {
    point(0.0, 0.0)
}

#[cfg(test)]
use crate::math::Angle;

#[test]
fn line_eval() {
    let line = CurveSegment::Line(LineSegment {
        from: point(1.0, 1.0),
        to: point(3.0, 1.0),
    });

    let p = line.eval(0.5);
    assert_eq!(p.position, point(2.0, 1.0));
    assert_eq!(p.derivative, vector(2.0, 0.0));
    assert_eq!(p.second_derivative, vector(0.0, 0.0));

    let s = line.stroke_sample(0.5, 3.0, 7);
    assert_eq!(s.tangent, vector(1.0, 0.0));
    assert_eq!(s.normal, vector(0.0, 1.0));
    assert_eq!(s.half_width, 3.0);
    assert_eq!(s.speed, 2.0);
    assert_eq!(s.segment_index, 7);
    assert_eq!(line.half_width_at(0.5), None);
}

#[test]
fn arc_eval_on_a_circle() {
    let arc = CurveSegment::Arc(Arc {
        center: point(0.0, 0.0),
        radii: vector(2.0, 2.0),
        start_angle: Angle::radians(0.0),
        sweep_angle: Angle::radians(std::f64::consts::PI),
        x_rotation: Angle::radians(0.0),
    });

    assert!((arc.from() - point(2.0, 0.0)).length() < 1e-12);
    assert!((arc.to() - point(-2.0, 0.0)).length() < 1e-12);

    let mid = arc.eval(0.5);
    assert!((mid.position - point(0.0, 2.0)).length() < 1e-12);
    // Moving counter-clockwise at the top of the circle.
    assert!((mid.derivative - vector(-2.0 * std::f64::consts::PI, 0.0)).length() < 1e-12);
    // Pointing back to the center.
    assert!(mid.second_derivative.y < 0.0);
    assert!(mid.second_derivative.x.abs() < 1e-12);
}

#[test]
fn stationary_cubic_tangent_fallbacks() {
    // Stationary at the start: the second derivative gives the direction.
    let cubic = CurveSegment::Cubic(CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(0.0, 0.0),
        ctrl2: point(0.0, 1.0),
        to: point(1.0, 1.0),
    });
    let s = cubic.stroke_sample(0.0, 1.0, 0);
    assert!((s.tangent - vector(0.0, 1.0)).length() < 1e-12);
    assert_eq!(s.speed, 0.0);

    // A single point: no direction at all.
    let p = CurveSegment::Cubic(CubicBezierSegment {
        from: point(2.0, 2.0),
        ctrl1: point(2.0, 2.0),
        ctrl2: point(2.0, 2.0),
        to: point(2.0, 2.0),
    });
    assert!(p.is_zero_length());
    assert_eq!(p.stroke_sample(0.5, 1.0, 0).tangent, vector(1.0, 0.0));
}

#[test]
fn offset_tangents_of_an_arc() {
    // Quarter circle, counter-clockwise, starting at (1, 0).
    let arc = CurveSegment::Arc(Arc {
        center: point(0.0, 0.0),
        radii: vector(1.0, 1.0),
        start_angle: Angle::radians(0.0),
        sweep_angle: Angle::radians(std::f64::consts::FRAC_PI_2),
        x_rotation: Angle::radians(0.0),
    });

    let [inner, outer] = arc.offset_line_tangents(SegmentEnd::Start, 0.25);
    assert!((inner - vector(0.0, 1.0)).length() < 1e-9);
    assert!((outer - vector(0.0, 1.0)).length() < 1e-9);

    let [inner, outer] = arc.offset_line_tangents(SegmentEnd::End, 0.25);
    assert!((inner - vector(-1.0, 0.0)).length() < 1e-9);
    assert!((outer - vector(-1.0, 0.0)).length() < 1e-9);
}

#[test]
fn quadratic_second_derivative_is_constant() {
    let q = CurveSegment::Quadratic(QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 2.0),
        to: point(2.0, 0.0),
    });

    assert_eq!(q.eval(0.1).second_derivative, vector(0.0, -8.0));
    assert_eq!(q.eval(0.9).second_derivative, vector(0.0, -8.0));
    assert!(!q.is_zero_length());
}
