//! Winding rules and orientation of polygons.

use crate::area::signed_area;
use crate::math::Point;

/// Decides which regions of a set of overlapping contours are inside the shape,
/// given the winding number of the region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum WindingRule {
    /// Odd winding numbers are inside (also known as even-odd).
    Odd,
    /// Non-zero winding numbers are inside.
    NonZero,
    /// Strictly positive winding numbers are inside.
    Positive,
    /// Strictly negative winding numbers are inside.
    Negative,
}

impl WindingRule {
    pub const DEFAULT: Self = WindingRule::NonZero;

    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            WindingRule::Odd => winding_number % 2 != 0,
            WindingRule::NonZero => winding_number != 0,
            WindingRule::Positive => winding_number > 0,
            WindingRule::Negative => winding_number < 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

impl Default for WindingRule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The two possible orientations of a closed contour.
///
/// Positive winding corresponds to the positive orientation in trigonometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Winding {
    Positive,
    Negative,
}

/// Computes the orientation of a closed polygon.
///
/// The polygon is expected to have a non-null area and no self-intersections,
/// otherwise the result is unspecified.
///
/// Returns `None` if the polygon has no area.
pub fn compute_winding(polygon: &[Point]) -> Option<Winding> {
    let area = signed_area(polygon);
    if area > 0.0 {
        Some(Winding::Positive)
    } else if area < 0.0 {
        Some(Winding::Negative)
    } else {
        None
    }
}

#[test]
fn winding_rules() {
    for w in -3..=3 {
        assert_eq!(WindingRule::Odd.is_in(w), w % 2 != 0);
        assert_eq!(WindingRule::NonZero.is_in(w), w != 0);
        assert_eq!(WindingRule::Positive.is_in(w), w > 0);
        assert_eq!(WindingRule::Negative.is_in(w), w < 0);
    }
    assert!(WindingRule::Odd.is_in(-1));
}

#[test]
fn polygon_orientation() {
    use crate::math::point;

    let ccw = [point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(0.0, 1.0)];
    let mut cw = ccw;
    cw.reverse();

    assert_eq!(compute_winding(&ccw), Some(Winding::Positive));
    assert_eq!(compute_winding(&cw), Some(Winding::Negative));
    assert_eq!(compute_winding(&ccw[..2]), None);
}
