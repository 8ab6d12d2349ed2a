//! Determine whether a point is inside a set of sampled contours.

use crate::geom::LineSegment;
use crate::math::Point;
use crate::winding::WindingRule;

/// Returns whether the point is inside the contours.
///
/// Each contour is a polygon, implicitly closed.
pub fn hit_test_contours<Iter, Contour>(point: Point, contours: Iter, winding_rule: WindingRule) -> bool
where
    Iter: IntoIterator<Item = Contour>,
    Contour: AsRef<[Point]>,
{
    winding_rule.is_in(winding_number_at_position(point, contours))
}

/// Computes the winding number of a given position with respect to the contours.
pub fn winding_number_at_position<Iter, Contour>(point: Point, contours: Iter) -> i32
where
    Iter: IntoIterator<Item = Contour>,
    Contour: AsRef<[Point]>,
{
    contours
        .into_iter()
        .map(|contour| contour_winding_number(point, contour.as_ref()))
        .sum()
}

/// Computes the winding number of a given position with respect to a single
/// polygon, implicitly closed.
pub fn contour_winding_number(point: Point, polygon: &[Point]) -> i32 {
    // Accumulate the winding of all edges intersecting the horizontal line passing
    // through the point which are left of it.
    let mut winding = 0;

    let (first, last) = match (polygon.first(), polygon.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0,
    };

    for pair in polygon.windows(2) {
        test_segment(point, &LineSegment { from: pair[0], to: pair[1] }, &mut winding);
    }
    test_segment(point, &LineSegment { from: last, to: first }, &mut winding);

    winding
}

fn test_segment(point: Point, segment: &LineSegment<f64>, winding: &mut i32) {
    let y0 = segment.from.y;
    let y1 = segment.to.y;
    let min_y = f64::min(y0, y1);
    let max_y = f64::max(y0, y1);

    if min_y > point.y || max_y <= point.y || f64::min(segment.from.x, segment.to.x) > point.x {
        return;
    }

    if y0 == y1 {
        return;
    }

    let d = y1 - y0;

    let t = (point.y - y0) / d;
    let x = segment.sample(t).x;

    if x > point.x {
        return;
    }

    // Edges going down in y count negatively so that counter-clockwise contours
    // (in a y-up frame) have a positive winding number.
    *winding += if d > 0.0 { -1 } else { 1 };
}

#[cfg(test)]
use crate::math::point;

#[test]
fn nested_squares() {
    let outer = vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)];
    let inner = vec![point(0.25, 0.25), point(0.75, 0.25), point(0.75, 0.75), point(0.2, 0.75)];
    let contours = [outer, inner];

    assert!(!hit_test_contours(point(-1.0, 0.5), &contours, WindingRule::Odd));
    assert!(!hit_test_contours(point(2.0, 0.5), &contours, WindingRule::Odd));
    assert!(!hit_test_contours(point(2.0, 0.0), &contours, WindingRule::Odd));
    assert!(!hit_test_contours(point(0.5, -1.0), &contours, WindingRule::Odd));
    assert!(!hit_test_contours(point(0.5, 2.0), &contours, WindingRule::Odd));

    assert!(!hit_test_contours(point(0.5, 0.5), &contours, WindingRule::Odd));
    assert!(hit_test_contours(point(0.5, 0.5), &contours, WindingRule::NonZero));
    assert!(hit_test_contours(point(0.5, 0.5), &contours, WindingRule::Positive));
    assert!(!hit_test_contours(point(0.5, 0.5), &contours, WindingRule::Negative));
    assert!(hit_test_contours(point(0.2, 0.5), &contours, WindingRule::Odd));
    assert!(hit_test_contours(point(0.8, 0.5), &contours, WindingRule::Odd));
}

#[test]
fn orientation_gives_the_sign() {
    let mut square = vec![point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)];
    assert_eq!(contour_winding_number(point(0.5, 0.5), &square), 1);

    square.reverse();
    assert_eq!(contour_winding_number(point(0.5, 0.5), &square), -1);
    assert_eq!(contour_winding_number(point(0.5, 0.5), &[]), 0);
}
