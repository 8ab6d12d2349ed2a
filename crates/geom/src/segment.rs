//! Evaluation of a single segment of a spline stroke.

use crate::basis::SegmentType;
use crate::curve::CurvePoint;
use crate::halfwidth::WidthBezier;
use crate::math::{Point, Vector};
use crate::sample::StrokeSample;
use crate::utils::{compute_offset_line_tangents, cubic_second_derivative};
use crate::CubicBezierSegment;

/// One of the two endpoints of a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SegmentEnd {
    Start,
    End,
}

impl SegmentEnd {
    #[inline]
    pub fn parameter(self) -> f64 {
        match self {
            SegmentEnd::Start => 0.0,
            SegmentEnd::End => 1.0,
        }
    }
}

/// The centerline and half-width curves of the segment between two consecutive
/// knots.
///
/// Segments are cheap values computed on demand by
/// [`SplineStroke::segment`](crate::SplineStroke::segment). Every query is a
/// pure function of the parameter `u` in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SplineSegment {
    pub index: usize,
    pub segment_type: SegmentType,
    pub centerline: CubicBezierSegment<f64>,
    pub half_width: WidthBezier,
}

impl SplineSegment {
    #[inline]
    pub fn from(&self) -> Point {
        self.centerline.from
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.centerline.to
    }

    #[inline]
    pub fn position(&self, u: f64) -> Point {
        self.centerline.sample(u)
    }

    pub fn eval(&self, u: f64) -> CurvePoint {
        CurvePoint {
            position: self.centerline.sample(u),
            derivative: self.centerline.derivative(u),
            second_derivative: cubic_second_derivative(&self.centerline, u),
        }
    }

    #[inline]
    pub fn half_width(&self, u: f64) -> f64 {
        self.half_width.sample(u)
    }

    #[inline]
    pub fn half_width_derivative(&self, u: f64) -> f64 {
        self.half_width.derivative(u)
    }

    /// The unit tangent of the centerline at `u`.
    pub fn tangent(&self, u: f64) -> Vector {
        self.eval(u).unit_tangent(self.to() - self.from())
    }

    pub fn stroke_sample(&self, u: f64) -> StrokeSample {
        let p = self.eval(u);
        let tangent = p.unit_tangent(self.to() - self.from());

        StrokeSample::new(p.position, tangent, self.half_width(u), p.speed(), self.index, u)
    }

    /// The unit tangents of the two offset lines at one end of the segment.
    ///
    /// The first tangent belongs to the offset line on the side of the normal, the
    /// second one to the opposite side. Where the centerline is stationary, the
    /// fallback tangent of [`stroke_sample`](Self::stroke_sample) is used for both.
    pub fn offset_line_tangents(&self, end: SegmentEnd) -> [Vector; 2] {
        let u = end.parameter();
        let p = self.eval(u);
        if p.speed() == 0.0 {
            let t = p.unit_tangent(self.to() - self.from());
            return [t, t];
        }

        compute_offset_line_tangents(
            p.derivative,
            p.second_derivative,
            self.half_width(u),
            self.half_width_derivative(u),
        )
    }

    /// Returns true if the whole segment is a single point (a corner segment).
    pub fn is_zero_length(&self) -> bool {
        let c = &self.centerline;
        c.from == c.ctrl1 && c.ctrl1 == c.ctrl2 && c.ctrl2 == c.to
    }
}

#[cfg(test)]
use crate::basis::{compute_centerline_bezier, SplineBasis};
#[cfg(test)]
use crate::halfwidth::compute_halfwidth_bezier;
#[cfg(test)]
use crate::math::{point, vector};

#[cfg(test)]
fn test_segment(basis: SplineBasis, p: [Point; 4], w: [f64; 4]) -> SplineSegment {
    let chords = [
        (p[1] - p[0]).length(),
        (p[2] - p[1]).length(),
        (p[3] - p[2]).length(),
    ];
    let (centerline, segment_type) = compute_centerline_bezier(basis, &p, &chords);
    SplineSegment {
        index: 0,
        segment_type,
        centerline,
        half_width: compute_halfwidth_bezier(&w, &centerline, &chords, segment_type),
    }
}

#[test]
fn endpoints_are_exact() {
    let p = [point(0.1, 0.3), point(1.7, 2.9), point(4.3, 3.1), point(6.0, -1.0)];
    for basis in [SplineBasis::UniformCatmullRom, SplineBasis::CentripetalCatmullRom, SplineBasis::Yuksel] {
        let s = test_segment(basis, p, [1.0; 4]);
        assert_eq!(s.position(0.0), p[1]);
        assert_eq!(s.position(1.0), p[2]);
        assert_eq!(s.stroke_sample(0.0).position, p[1]);
        assert_eq!(s.stroke_sample(1.0).position, p[2]);
    }
}

#[test]
fn corner_segment_is_zero_length() {
    let p = [point(0.0, 0.0), point(1.0, 1.0), point(1.0, 1.0), point(2.0, 0.0)];
    let s = test_segment(SplineBasis::CentripetalCatmullRom, p, [1.0, 2.0, 2.0, 1.0]);

    assert_eq!(s.segment_type, SegmentType::Corner);
    assert!(s.is_zero_length());

    let sample = s.stroke_sample(0.5);
    assert_eq!(sample.position, point(1.0, 1.0));
    assert_eq!(sample.tangent, vector(1.0, 0.0));
    assert_eq!(sample.speed, 0.0);
    assert_eq!(s.offset_line_tangents(SegmentEnd::Start), [vector(1.0, 0.0); 2]);
}

#[test]
fn constant_width_offset_tangents_follow_the_centerline() {
    let p = [point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0), point(3.0, 0.0)];
    let s = test_segment(SplineBasis::UniformCatmullRom, p, [0.5; 4]);

    let [left, right] = s.offset_line_tangents(SegmentEnd::End);
    assert!((left - vector(1.0, 0.0)).length() < 1e-12);
    assert!((right - vector(1.0, 0.0)).length() < 1e-12);
}

#[test]
fn growing_width_spreads_the_offset_lines() {
    let p = [point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0), point(3.0, 0.0)];
    let s = test_segment(SplineBasis::UniformCatmullRom, p, [1.0, 1.5, 2.0, 2.5]);

    let [left, right] = s.offset_line_tangents(SegmentEnd::Start);
    assert!(left.y > 0.0);
    assert!(right.y < 0.0);
    assert!((left.y + right.y).abs() < 1e-12);
}

#[test]
fn stroke_sample_frame() {
    let p = [point(0.0, 0.0), point(0.0, 1.0), point(0.0, 2.0), point(0.0, 3.0)];
    let s = test_segment(SplineBasis::CentripetalCatmullRom, p, [1.0, 1.0, 3.0, 3.0]);

    let sample = s.stroke_sample(0.5);
    assert!((sample.tangent - vector(0.0, 1.0)).length() < 1e-12);
    assert!((sample.normal - vector(-1.0, 0.0)).length() < 1e-12);
    assert!((sample.half_width - 2.0).abs() < 1e-12);
    assert!(sample.speed > 0.0);
}
