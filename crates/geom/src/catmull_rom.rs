//! Catmull-Rom segments expressed as cubic béziers.
//!
//! A Catmull-Rom segment from `p1` to `p2` is the Hermite curve whose tangents at
//! `p1` and `p2` are derived from the neighboring knots `p0` and `p3`. Converting
//! the Hermite form to the bézier form places the interior control points a third
//! of the tangent away from the endpoints.

use crate::math::Point;
use crate::CubicBezierSegment;

/// Uniform parametrization: the tangent at a knot is half the vector between
/// its two neighbors.
pub(crate) fn uniform_to_bezier(p: &[Point; 4]) -> CubicBezierSegment<f64> {
    let [p0, p1, p2, p3] = *p;

    CubicBezierSegment {
        from: p1,
        ctrl1: p1 + (p2 - p0) / 6.0,
        ctrl2: p2 - (p3 - p1) / 6.0,
        to: p2,
    }
}

/// Centripetal parametrization: knot intervals are the square roots of the chord
/// lengths.
///
/// The tangents are the Barry-Goldman derivatives of the non-uniform spline,
/// rescaled from the global parameter to the `[0, 1]` parameter of the segment,
/// so that tangent directions agree on both sides of each knot.
///
/// All three chord lengths must be positive.
pub(crate) fn centripetal_to_bezier(p: &[Point; 4], chord_lengths: &[f64; 3]) -> CubicBezierSegment<f64> {
    let [p0, p1, p2, p3] = *p;
    let d01 = chord_lengths[0].sqrt();
    let d12 = chord_lengths[1].sqrt();
    let d23 = chord_lengths[2].sqrt();

    let m1 = ((p1 - p0) / d01 - (p2 - p0) / (d01 + d12)) * d12 + (p2 - p1);
    let m2 = ((p3 - p2) / d23 - (p3 - p1) / (d12 + d23)) * d12 + (p2 - p1);

    CubicBezierSegment {
        from: p1,
        ctrl1: p1 + m1 / 3.0,
        ctrl2: p2 - m2 / 3.0,
        to: p2,
    }
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn chords(p: &[Point; 4]) -> [f64; 3] {
    [
        (p[1] - p[0]).length(),
        (p[2] - p[1]).length(),
        (p[3] - p[2]).length(),
    ]
}

#[test]
fn uniform_collinear_knots_give_a_uniform_line() {
    let p = [point(0.0, 0.0), point(3.0, 0.0), point(6.0, 0.0), point(9.0, 0.0)];
    let curve = uniform_to_bezier(&p);

    assert_eq!(curve.ctrl1, point(4.0, 0.0));
    assert_eq!(curve.ctrl2, point(5.0, 0.0));
}

#[test]
fn centripetal_matches_uniform_on_evenly_spaced_knots() {
    let p = [point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)];
    let uniform = uniform_to_bezier(&p);
    let centripetal = centripetal_to_bezier(&p, &chords(&p));

    assert!((uniform.ctrl1 - centripetal.ctrl1).length() < 1e-12);
    assert!((uniform.ctrl2 - centripetal.ctrl2).length() < 1e-12);
}

#[test]
fn centripetal_tangents_agree_across_a_knot() {
    let knots = [
        point(0.0, 0.0),
        point(1.0, 3.0),
        point(5.0, 4.0),
        point(6.0, 0.0),
        point(9.0, 1.0),
    ];
    let a = [knots[0], knots[1], knots[2], knots[3]];
    let b = [knots[1], knots[2], knots[3], knots[4]];
    let first = centripetal_to_bezier(&a, &chords(&a));
    let second = centripetal_to_bezier(&b, &chords(&b));

    let incoming = (first.to - first.ctrl2).normalize();
    let outgoing = (second.ctrl1 - second.from).normalize();
    assert!((incoming - outgoing).length() < 1e-12);
}
