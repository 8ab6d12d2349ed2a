//! Distance from a point to a sampled curve.

use crate::math::{vector, Point, Vector};

/// The result of [`distance_to_curve`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DistanceToCurve {
    /// Distance between the query point and the closest point of the curve.
    pub distance: f64,
    /// Signed angle in radians from the tangent of the curve at the closest point
    /// to the direction of the query point. Positive when the point is on the
    /// side of the normal (to the left of the curve in a y-up frame).
    ///
    /// Zero when the point is on the curve.
    pub angle_from_tangent: f64,
    /// Index of the polyline segment (between the samples `i` and `i + 1`) that
    /// contains the closest point.
    pub segment_index: usize,
    /// Position of the closest point along that segment, between 0 and 1.
    pub segment_parameter: f64,
}

/// Computes the distance from `point` to the polyline going through `samples`.
///
/// Returns `None` if there are no samples. A single sample is treated as a point
/// with the tangent `(1, 0)`. When several segments are at the same distance, the
/// first one wins.
pub fn distance_to_curve(samples: &[Point], point: Point) -> Option<DistanceToCurve> {
    let first = *samples.first()?;

    if samples.len() == 1 {
        return Some(result(point, first, vector(1.0, 0.0), 0, 0.0));
    }

    let mut best: Option<(f64, usize, f64)> = None;
    for (i, pair) in samples.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let t = closest_parameter(a, b, point);
        let d2 = (a.lerp(b, t) - point).square_length();
        if best.map_or(true, |(best_d2, _, _)| d2 < best_d2) {
            best = Some((d2, i, t));
        }
    }

    let (_, index, t) = best?;
    let (a, b) = (samples[index], samples[index + 1]);
    let tangent = tangent_of(samples, index);

    Some(result(point, a.lerp(b, t), tangent, index, t))
}

fn closest_parameter(a: Point, b: Point, p: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.square_length();
    if len2 == 0.0 {
        return 0.0;
    }

    ((p - a).dot(ab) / len2).max(0.0).min(1.0)
}

// The direction of a polyline segment, looking at the neighbors if it has no length.
fn tangent_of(samples: &[Point], index: usize) -> Vector {
    let own = samples[index + 1] - samples[index];
    if own.square_length() > 0.0 {
        return own.normalize();
    }

    samples
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .find(|v| v.square_length() > 0.0)
        .map(|v| v.normalize())
        .unwrap_or(vector(1.0, 0.0))
}

fn result(point: Point, closest: Point, tangent: Vector, segment_index: usize, segment_parameter: f64) -> DistanceToCurve {
    let to_point = point - closest;
    let distance = to_point.length();
    let angle_from_tangent = if distance == 0.0 {
        0.0
    } else {
        tangent.cross(to_point).atan2(tangent.dot(to_point))
    };

    DistanceToCurve {
        distance,
        angle_from_tangent,
        segment_index,
        segment_parameter,
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn distance_to_a_polyline() {
    let samples = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];

    assert_eq!(distance_to_curve(&[], point(0.0, 0.0)), None);

    let d = distance_to_curve(&samples, point(5.0, 3.0)).unwrap();
    assert_eq!(d.distance, 3.0);
    assert_eq!(d.segment_index, 0);
    assert_eq!(d.segment_parameter, 0.5);
    assert!((d.angle_from_tangent - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    let d = distance_to_curve(&samples, point(12.0, 5.0)).unwrap();
    assert_eq!(d.distance, 2.0);
    assert_eq!(d.segment_index, 1);
    assert!((d.angle_from_tangent + std::f64::consts::FRAC_PI_2).abs() < 1e-12);

    let d = distance_to_curve(&samples, point(-3.0, 0.0)).unwrap();
    assert_eq!(d.distance, 3.0);
    assert_eq!(d.segment_parameter, 0.0);
    assert!((d.angle_from_tangent.abs() - std::f64::consts::PI).abs() < 1e-12);
}

#[test]
fn point_on_the_curve() {
    let d = distance_to_curve(&[point(0.0, 0.0), point(4.0, 0.0)], point(1.0, 0.0)).unwrap();
    assert_eq!(d.distance, 0.0);
    assert_eq!(d.angle_from_tangent, 0.0);
    assert_eq!(d.segment_parameter, 0.25);
}

#[test]
fn single_sample() {
    let d = distance_to_curve(&[point(1.0, 1.0)], point(1.0, 3.0)).unwrap();
    assert_eq!(d.distance, 2.0);
    assert!((d.angle_from_tangent - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}
