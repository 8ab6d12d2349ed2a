//! Bounding rectangle computation for sampled curves.

use crate::geom::StrokeSample;
use crate::math::{point, Box2D, Point};

/// Computes the smallest axis-aligned rectangle that contains the points.
pub fn bounding_box<Iter>(points: Iter) -> Box2D
where
    Iter: IntoIterator<Item = Point>,
{
    let mut min = point(f64::MAX, f64::MAX);
    let mut max = point(f64::MIN, f64::MIN);
    for p in points {
        min = Point::min(min, p);
        max = Point::max(max, p);
    }

    // Return an empty rectangle by default if there was no point.
    if min == point(f64::MAX, f64::MAX) {
        return Box2D::zero();
    }

    Box2D { min, max }
}

/// Computes the smallest axis-aligned rectangle that contains both offset lines of
/// the samples.
pub fn stroke_bounding_box(samples: &[StrokeSample]) -> Box2D {
    bounding_box(
        samples
            .iter()
            .flat_map(|s| [s.left_point(), s.right_point()]),
    )
}

#[test]
fn empty_box() {
    assert_eq!(bounding_box(std::iter::empty()), Box2D::zero());
    assert_eq!(stroke_bounding_box(&[]), Box2D::zero());
}

#[test]
fn point_boxes() {
    let b = bounding_box([point(1.0, 5.0), point(-2.0, 3.0), point(0.0, 7.0)]);
    assert_eq!(b.min, point(-2.0, 3.0));
    assert_eq!(b.max, point(1.0, 7.0));

    let s = crate::geom::sample::zero_length_stroke_sample(point(0.0, 0.0), 2.0);
    let b = stroke_bounding_box(&[s]);
    assert_eq!(b.min, point(0.0, -2.0));
    assert_eq!(b.max, point(0.0, 2.0));
}
