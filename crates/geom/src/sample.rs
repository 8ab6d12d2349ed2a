use crate::math::{vector, Point, Vector};
use crate::utils::orthogonal;

/// A point of a stroke's centerline along with the local frame and half-width.
///
/// `tangent` and `normal` always have unit length, with `normal` being the
/// tangent rotated by 90 degrees counter-clockwise. `speed` is the length of the
/// derivative of the centerline with respect to `u`, so that quantities derived
/// from the raw derivative can be re-normalized without measuring it again.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StrokeSample {
    pub position: Point,
    pub tangent: Vector,
    pub normal: Vector,
    pub half_width: f64,
    pub speed: f64,
    pub segment_index: usize,
    pub u: f64,
}

impl StrokeSample {
    /// Builds a sample from a unit tangent.
    #[inline]
    pub fn new(position: Point, tangent: Vector, half_width: f64, speed: f64, segment_index: usize, u: f64) -> Self {
        StrokeSample {
            position,
            tangent,
            normal: orthogonal(tangent),
            half_width,
            speed,
            segment_index,
            u,
        }
    }

    /// Position of the offset line on the side of the normal.
    #[inline]
    pub fn left_point(&self) -> Point {
        self.position + self.normal * self.half_width
    }

    /// Position of the offset line on the opposite side of the normal.
    #[inline]
    pub fn right_point(&self) -> Point {
        self.position - self.normal * self.half_width
    }
}

/// The sample used for curves that have no length at all (no knots, a single knot
/// or only coincident knots).
///
/// The tangent is arbitrarily `(1, 0)` so that caps can still be oriented.
pub fn zero_length_stroke_sample(position: Point, half_width: f64) -> StrokeSample {
    StrokeSample::new(position, vector(1.0, 0.0), half_width, 0.0, 0, 0.0)
}

#[test]
fn zero_length_sample_frame() {
    use crate::math::point;

    let s = zero_length_stroke_sample(point(3.0, 4.0), 2.0);
    assert_eq!(s.tangent, vector(1.0, 0.0));
    assert_eq!(s.normal, vector(0.0, 1.0));
    assert_eq!(s.speed, 0.0);
    assert_eq!(s.left_point(), point(3.0, 6.0));
    assert_eq!(s.right_point(), point(3.0, 2.0));
}
