//! Yuksel splines approximated with one cubic bézier per segment.
//!
//! Every knot `p1` with neighbors `p0` and `p2` gets a quadratic bézier `F` going
//! from `p0` to `p2` and passing through `p1` at the parameter `t` where `F` has
//! its curvature extremum. The segment between two knots then leaves the first
//! knot along the quadratic of the first knot and arrives at the second knot along
//! the quadratic of the second knot. Since a knot's quadratic is shared by both
//! segments around it, tangent directions are continuous at every knot.
//!
//! See "A Class of C² Interpolating Splines", Cem Yuksel, ACM TOG 2020.

use crate::math::{Point, Vector};
use crate::CubicBezierSegment;
use lyon_geom::utils::cubic_polynomial_roots;

/// The parameter used when no curvature extremum can be found.
const FALLBACK_T: f64 = 0.5;

/// The quadratic bézier interpolating the middle knot of a triple.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct KnotQuadratic {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
    /// Parameter at which the quadratic passes through the middle knot.
    pub t: f64,
}

impl KnotQuadratic {
    pub fn new(p0: Point, p1: Point, p2: Point) -> Self {
        let t = solve_knot_parameter(p0, p1, p2);
        let one_t = 1.0 - t;
        let ctrl = (p1.to_vector() - p0.to_vector() * (one_t * one_t) - p2.to_vector() * (t * t))
            / (2.0 * t * one_t);

        KnotQuadratic {
            from: p0,
            ctrl: ctrl.to_point(),
            to: p2,
            t,
        }
    }

    pub fn derivative(&self, t: f64) -> Vector {
        ((self.ctrl - self.from) * (1.0 - t) + (self.to - self.ctrl) * t) * 2.0
    }
}

/// Finds the parameter `t` at which the quadratic going from `p0` to `p2` through
/// `p1` has maximum curvature at `p1`.
///
/// `t` is the root in `(0, 1)` of
/// `|p2-p0|² t³ + 3 (p2-p0)·(p0-p1) t² + (3p0 - 2p1 - p2)·(p0-p1) t - |p0-p1|²`.
/// Falls back to `0.5` when `p0 == p2` or when no such root exists.
pub(crate) fn solve_knot_parameter(p0: Point, p1: Point, p2: Point) -> f64 {
    let v02 = p2 - p0;
    let v10 = p0 - p1;

    let a = v02.square_length();
    if a == 0.0 {
        return FALLBACK_T;
    }

    let b = 3.0 * v02.dot(v10);
    let c = (p0.to_vector() * 3.0 - p1.to_vector() * 2.0 - p2.to_vector()).dot(v10);
    let d = -v10.square_length();

    // All coefficients scale with the square of the knot distances. The root
    // finder uses absolute tolerances, so solve the monic form.
    cubic_polynomial_roots(1.0, b / a, c / a, d / a)
        .into_iter()
        .find(|t| *t > 0.0 && *t < 1.0)
        .unwrap_or(FALLBACK_T)
}

pub(crate) fn to_bezier(p: &[Point; 4]) -> CubicBezierSegment<f64> {
    let [p0, p1, p2, p3] = *p;
    let q1 = KnotQuadratic::new(p0, p1, p2);
    let q2 = KnotQuadratic::new(p1, p2, p3);

    // Sub-curves of the quadratics restricted to [t1, 1] and [0, t2], elevated
    // to cubics.
    CubicBezierSegment {
        from: p1,
        ctrl1: p1 + q1.derivative(q1.t) * ((1.0 - q1.t) / 3.0),
        ctrl2: p2 - q2.derivative(q2.t) * (q2.t / 3.0),
        to: p2,
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[test]
fn symmetric_triple_peaks_in_the_middle() {
    let t = solve_knot_parameter(point(-1.0, 0.0), point(0.0, 1.0), point(1.0, 0.0));
    assert!((t - 0.5).abs() < 1e-9);

    let q = KnotQuadratic::new(point(-1.0, 0.0), point(0.0, 1.0), point(1.0, 0.0));
    assert!((q.ctrl - point(0.0, 2.0)).length() < 1e-9);
}

#[test]
fn degenerate_triples_fall_back_to_half() {
    // p0 == p2
    assert_eq!(solve_knot_parameter(point(1.0, 1.0), point(5.0, 2.0), point(1.0, 1.0)), 0.5);
    // p0 == p1: the cubic degenerates to t³ = 0.
    assert_eq!(solve_knot_parameter(point(0.0, 0.0), point(0.0, 0.0), point(1.0, 0.0)), 0.5);
}

#[test]
fn quadratic_passes_through_the_knot() {
    let (p0, p1, p2) = (point(0.0, 0.0), point(1.0, 2.0), point(5.0, 1.0));
    let q = KnotQuadratic::new(p0, p1, p2);
    assert!(q.t > 0.0 && q.t < 1.0);

    let t = q.t;
    let at_t = p0.to_vector() * ((1.0 - t) * (1.0 - t))
        + q.ctrl.to_vector() * (2.0 * t * (1.0 - t))
        + p2.to_vector() * (t * t);
    assert!((at_t.to_point() - p1).length() < 1e-9);

    // Curvature extremum: the derivative is orthogonal to the second derivative.
    let second = (p0.to_vector() - q.ctrl.to_vector() * 2.0 + p2.to_vector()) * 2.0;
    assert!(q.derivative(t).dot(second).abs() < 1e-6);
}

#[test]
fn knot_parameter_is_scale_invariant() {
    let knots = [point(0.0, 0.0), point(1.0, 2.0), point(5.0, 1.0)];
    let expected = solve_knot_parameter(knots[0], knots[1], knots[2]);
    assert!(expected > 0.0 && expected < 0.5);

    for scale in [1e-6, 1e-5, 1e-3, 1e4] {
        let [p0, p1, p2] = knots.map(|p| (p.to_vector() * scale).to_point());
        let t = solve_knot_parameter(p0, p1, p2);
        assert!((t - expected).abs() < 1e-9, "scale {}: {} vs {}", scale, t, expected);
    }

    let offset = vector(100.0, -50.0);
    let [p0, p1, p2] = knots.map(|p| p + offset);
    assert!((solve_knot_parameter(p0, p1, p2) - expected).abs() < 1e-9);
}

#[test]
fn collinear_knots_give_a_uniform_line() {
    let curve = to_bezier(&[point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0), point(3.0, 0.0)]);
    assert!((curve.ctrl1 - point(4.0 / 3.0, 0.0)).length() < 1e-9);
    assert!((curve.ctrl2 - point(5.0 / 3.0, 0.0)).length() < 1e-9);
}

#[test]
fn tangents_agree_across_a_knot() {
    let knots = [
        point(0.0, 0.0),
        point(1.0, 3.0),
        point(5.0, 4.0),
        point(6.0, 0.0),
        point(9.0, 1.0),
    ];
    let first = to_bezier(&[knots[0], knots[1], knots[2], knots[3]]);
    let second = to_bezier(&[knots[1], knots[2], knots[3], knots[4]]);

    let incoming = (first.to - first.ctrl2).normalize();
    let outgoing = (second.ctrl1 - second.from).normalize();
    assert!((incoming - outgoing).length() < 1e-9);
}
