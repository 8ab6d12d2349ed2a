//! Small vector helpers shared by the segment bases and the evaluator.

use crate::math::{vector, Point, Vector};
use crate::CubicBezierSegment;

/// Rotates `v` by 90 degrees counter-clockwise (in a y-up frame).
#[inline]
pub fn orthogonal(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// Normalizes `v`, or returns `None` if it has no direction.
#[inline]
pub fn try_normalize(v: Vector) -> Option<Vector> {
    let len = v.length();
    if len > 0.0 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

/// Second derivative of a cubic bézier curve at `t`.
pub fn cubic_second_derivative(curve: &CubicBezierSegment<f64>, t: f64) -> Vector {
    let a = curve.from.to_vector() - curve.ctrl1.to_vector() * 2.0 + curve.ctrl2.to_vector();
    let b = curve.ctrl1.to_vector() - curve.ctrl2.to_vector() * 2.0 + curve.to.to_vector();

    (a * (1.0 - t) + b * t) * 6.0
}

/// Mirrors `p` across the perpendicular bisector of the segment `[a, b]`.
///
/// `a` and `b` must be distinct.
pub fn reflect_across_bisector(p: Point, a: Point, b: Point) -> Point {
    let mid = a.lerp(b, 0.5);
    let axis = (b - a) / (b - a).length();
    let v = p - mid;

    mid + (v - axis * (2.0 * v.dot(axis)))
}

/// Computes the unit tangents of the two offset curves `p ± w·n` at a point.
///
/// `dp` and `ddp` are the first and second derivatives of the centerline, `w` and `dw`
/// the half-width and its derivative with respect to the same parameter.
///
/// The returned array contains the tangent of the offset curve on the side of the
/// normal first (`p + w·n`), then the tangent of the opposite side (`p - w·n`).
/// If the centerline derivative vanishes, both tangents fall back to `(1, 0)`.
pub fn compute_offset_line_tangents(dp: Vector, ddp: Vector, w: f64, dw: f64) -> [Vector; 2] {
    let speed = dp.length();
    if speed == 0.0 || !speed.is_finite() {
        return [vector(1.0, 0.0); 2];
    }

    let n = orthogonal(dp) / speed;
    // dn/du = dp * det(ddp, dp) / |dp|³
    let dn = dp * (ddp.cross(dp) / (speed * speed * speed));

    let offset = dn * w + n * dw;
    let left = dp + offset;
    let right = dp - offset;

    let tangent = dp / speed;
    [
        try_normalize(left).unwrap_or(tangent),
        try_normalize(right).unwrap_or(tangent),
    ]
}

#[cfg(test)]
use crate::math::point;

#[test]
fn reflection_swaps_the_segment_endpoints() {
    let a = point(0.0, 0.0);
    let b = point(10.0, 0.0);

    assert_eq!(reflect_across_bisector(b, a, b), a);
    assert_eq!(reflect_across_bisector(point(10.0, 10.0), a, b), point(0.0, 10.0));
}

#[test]
fn offset_tangents_of_a_straight_constant_width_line() {
    let tangents = compute_offset_line_tangents(vector(2.0, 0.0), vector(0.0, 0.0), 1.0, 0.0);
    assert_eq!(tangents, [vector(1.0, 0.0), vector(1.0, 0.0)]);
}

#[test]
fn offset_tangents_follow_the_width_derivative() {
    // Width grows by 1 per unit along a horizontal line: the side along the
    // normal goes up, the other side goes down, both at 45 degrees.
    let [left, right] = compute_offset_line_tangents(vector(1.0, 0.0), vector(0.0, 0.0), 1.0, 1.0);
    let s = std::f64::consts::FRAC_1_SQRT_2;

    assert!((left - vector(s, s)).length() < 1e-12);
    assert!((right - vector(s, -s)).length() < 1e-12);
}

#[test]
fn offset_tangents_on_a_circle() {
    // Unit circle at angle 0, counter-clockwise: dp = (0, 1), ddp = (-1, 0).
    // The inner offset (along the normal) at half-width 0.5 moves at half speed
    // but keeps the direction of the centerline.
    let [inner, outer] = compute_offset_line_tangents(vector(0.0, 1.0), vector(-1.0, 0.0), 0.5, 0.0);

    assert!((inner - vector(0.0, 1.0)).length() < 1e-12);
    assert!((outer - vector(0.0, 1.0)).length() < 1e-12);
}

#[test]
fn second_derivative_of_a_parabola() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 2.0),
        ctrl2: point(2.0, 2.0),
        to: point(3.0, 0.0),
    };

    // x is linear so its second derivative is zero everywhere.
    let d2 = cubic_second_derivative(&curve, 0.3);
    assert!(d2.x.abs() < 1e-12);
    assert_eq!(d2.y, -12.0);
}
