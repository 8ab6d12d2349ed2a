//! The half-width channel of spline strokes.

use crate::basis::SegmentType;
use crate::CubicBezierSegment;

/// A one-dimensional cubic bézier curve, used to interpolate half-widths along a
/// segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct WidthBezier {
    pub from: f64,
    pub ctrl1: f64,
    pub ctrl2: f64,
    pub to: f64,
}

impl WidthBezier {
    /// A flat curve.
    #[inline]
    pub fn constant(half_width: f64) -> Self {
        WidthBezier {
            from: half_width,
            ctrl1: half_width,
            ctrl2: half_width,
            to: half_width,
        }
    }

    /// A curve interpolating linearly between two values.
    #[inline]
    pub fn linear(from: f64, to: f64) -> Self {
        WidthBezier {
            from,
            ctrl1: from + (to - from) / 3.0,
            ctrl2: from + (to - from) * 2.0 / 3.0,
            to,
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f64) -> f64 {
        let one_t = 1.0 - t;
        let t2 = t * t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 * one_t
            + self.ctrl1 * 3.0 * one_t2 * t
            + self.ctrl2 * 3.0 * one_t * t2
            + self.to * t2 * t
    }

    /// Sample the derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f64) -> f64 {
        let one_t = 1.0 - t;

        3.0 * ((self.ctrl1 - self.from) * one_t * one_t
            + (self.ctrl2 - self.ctrl1) * 2.0 * one_t * t
            + (self.to - self.ctrl2) * t * t)
    }

    pub fn is_constant(&self) -> bool {
        self.from == self.ctrl1 && self.ctrl1 == self.ctrl2 && self.ctrl2 == self.to
    }
}

/// Computes the half-width curve of the segment between the knots 1 and 2 of a
/// window of four knots.
///
/// At each knot the derivative of the half-width with respect to arc length
/// (`dw/ds`) is the chord-weighted difference of the neighboring half-widths, so it
/// takes the same value on both sides of the knot. It is converted to `dw/du`
/// using the speed of the centerline at the segment's endpoints: for a cubic
/// bézier, `|P'(0)| / 3` is the distance between the first two control points.
///
/// `chord_lengths` are the real chord lengths of the window (zero next to a
/// corner), and `centerline` the curve returned by
/// [`compute_centerline_bezier`](crate::basis::compute_centerline_bezier).
pub fn compute_halfwidth_bezier(
    half_widths: &[f64; 4],
    centerline: &CubicBezierSegment<f64>,
    chord_lengths: &[f64; 3],
    segment_type: SegmentType,
) -> WidthBezier {
    let [w0, w1, w2, w3] = *half_widths;
    let [d01, d12, d23] = *chord_lengths;

    match segment_type {
        SegmentType::Corner => WidthBezier {
            from: w1,
            ctrl1: w1,
            ctrl2: w2,
            to: w2,
        },
        SegmentType::BetweenCorners => WidthBezier::linear(w1, w2),
        _ => {
            let dwds1 = if segment_type.starts_at_corner() {
                (w2 - w1) / d12
            } else {
                (w2 - w0) / (d01 + d12)
            };
            let dwds2 = if segment_type.ends_at_corner() {
                (w2 - w1) / d12
            } else {
                (w3 - w1) / (d12 + d23)
            };

            let ds1 = (centerline.ctrl1 - centerline.from).length();
            let ds2 = (centerline.to - centerline.ctrl2).length();

            WidthBezier {
                from: w1,
                ctrl1: w1 + dwds1 * ds1,
                ctrl2: w2 - dwds2 * ds2,
                to: w2,
            }
        }
    }
}

#[cfg(test)]
use crate::basis::{compute_centerline_bezier, SplineBasis};
#[cfg(test)]
use crate::math::{point, Point};

#[cfg(test)]
fn window_chords(p: &[Point; 4]) -> [f64; 3] {
    [
        (p[1] - p[0]).length(),
        (p[2] - p[1]).length(),
        (p[3] - p[2]).length(),
    ]
}

#[test]
fn constant_and_linear_curves() {
    let c = WidthBezier::constant(2.0);
    assert!(c.is_constant());
    assert_eq!(c.sample(0.3), 2.0);
    assert_eq!(c.derivative(0.7), 0.0);

    let l = WidthBezier::linear(1.0, 4.0);
    assert!((l.sample(0.5) - 2.5).abs() < 1e-12);
    assert!((l.derivative(0.2) - 3.0).abs() < 1e-12);
}

#[test]
fn linearly_growing_widths_stay_linear() {
    let p = [point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0), point(3.0, 0.0)];
    let chords = window_chords(&p);
    let (curve, ty) = compute_centerline_bezier(SplineBasis::UniformCatmullRom, &p, &chords);
    let w = compute_halfwidth_bezier(&[1.0, 2.0, 3.0, 4.0], &curve, &chords, ty);

    assert!((w.sample(0.5) - 2.5).abs() < 1e-12);
    assert!((w.derivative(0.0) - 1.0).abs() < 1e-12);
    assert!((w.derivative(1.0) - 1.0).abs() < 1e-12);
}

#[test]
fn width_arclength_derivative_is_continuous_at_knots() {
    let knots = [
        point(0.0, 0.0),
        point(2.0, 1.0),
        point(5.0, 5.0),
        point(6.0, 2.0),
        point(9.0, 0.0),
    ];
    let widths = [1.0, 3.0, 2.0, 5.0, 1.0];

    let a = [knots[0], knots[1], knots[2], knots[3]];
    let b = [knots[1], knots[2], knots[3], knots[4]];
    let (ca, ta) = compute_centerline_bezier(SplineBasis::CentripetalCatmullRom, &a, &window_chords(&a));
    let (cb, tb) = compute_centerline_bezier(SplineBasis::CentripetalCatmullRom, &b, &window_chords(&b));
    let wa = compute_halfwidth_bezier(&[widths[0], widths[1], widths[2], widths[3]], &ca, &window_chords(&a), ta);
    let wb = compute_halfwidth_bezier(&[widths[1], widths[2], widths[3], widths[4]], &cb, &window_chords(&b), tb);

    let dwds_before = wa.derivative(1.0) / ca.derivative(1.0).length();
    let dwds_after = wb.derivative(0.0) / cb.derivative(0.0).length();
    assert!((dwds_before - dwds_after).abs() < 1e-9);
}

#[test]
fn corner_widths_are_stationary() {
    let p = [point(0.0, 0.0), point(1.0, 1.0), point(1.0, 1.0), point(2.0, 0.0)];
    let chords = window_chords(&p);
    let (curve, ty) = compute_centerline_bezier(SplineBasis::Yuksel, &p, &chords);
    let w = compute_halfwidth_bezier(&[1.0, 2.0, 3.0, 4.0], &curve, &chords, ty);

    assert_eq!(w, WidthBezier { from: 2.0, ctrl1: 2.0, ctrl2: 3.0, to: 3.0 });
}
