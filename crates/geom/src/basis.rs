//! Conversion of a window of four knots into the cubic bézier centerline of the
//! segment between the two middle knots.
//!
//! Two families of splines are supported and can be swapped freely, since they
//! only differ in where they place the two interior control points:
//!
//! - Catmull-Rom, with uniform or centripetal parametrization,
//! - Yuksel's C² interpolating splines, approximated with one cubic per segment.
//!
//! Zero-length chords are handled identically for all bases: they mark *corner*
//! knots through which the curve passes with a sharp turn.

use crate::math::Point;
use crate::utils::reflect_across_bisector;
use crate::{catmull_rom, yuksel, CubicBezierSegment};

/// The interpolation scheme used to compute the centerline of a spline stroke.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SplineBasis {
    /// Catmull-Rom with uniform parametrization.
    ///
    /// Tends to overshoot and form cusps when knots are unevenly spaced.
    UniformCatmullRom,
    /// Catmull-Rom with centripetal parametrization (chord lengths to the power 0.5).
    CentripetalCatmullRom,
    /// Yuksel spline: each knot is the curvature extremum of the quadratic
    /// interpolating it and its two neighbors.
    Yuksel,
}

impl SplineBasis {
    pub const DEFAULT: Self = SplineBasis::CentripetalCatmullRom;
}

impl Default for SplineBasis {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a segment relates to the zero-length chords around it.
///
/// With knots `k0, k1, k2, k3` and the segment going from `k1` to `k2`:
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SegmentType {
    /// All three chords have a length.
    None,
    /// `k1 == k2`: the segment itself has no length.
    Corner,
    /// `k0 == k1`: the segment starts at a corner.
    AfterCorner,
    /// `k2 == k3`: the segment ends at a corner.
    BeforeCorner,
    /// `k0 == k1` and `k2 == k3`: the segment is a straight line.
    BetweenCorners,
}

impl SegmentType {
    /// Classifies a segment from the lengths of the chords `k0k1`, `k1k2` and `k2k3`.
    ///
    /// Chord lengths are non-negative so the corner tests compare against zero
    /// exactly: the same stored chord length always yields the same answer.
    pub fn classify(chord_lengths: &[f64; 3]) -> Self {
        let [d01, d12, d23] = *chord_lengths;
        if d12 == 0.0 {
            return SegmentType::Corner;
        }

        match (d01 == 0.0, d23 == 0.0) {
            (true, true) => SegmentType::BetweenCorners,
            (true, false) => SegmentType::AfterCorner,
            (false, true) => SegmentType::BeforeCorner,
            (false, false) => SegmentType::None,
        }
    }

    #[inline]
    pub fn starts_at_corner(self) -> bool {
        matches!(self, SegmentType::AfterCorner | SegmentType::BetweenCorners)
    }

    #[inline]
    pub fn ends_at_corner(self) -> bool {
        matches!(self, SegmentType::BeforeCorner | SegmentType::BetweenCorners)
    }
}

/// Computes the centerline of the segment between `positions[1]` and `positions[2]`.
///
/// `chord_lengths` are the distances between consecutive positions of the window.
pub fn compute_centerline_bezier(
    basis: SplineBasis,
    positions: &[Point; 4],
    chord_lengths: &[f64; 3],
) -> (CubicBezierSegment<f64>, SegmentType) {
    let segment_type = SegmentType::classify(chord_lengths);
    let p1 = positions[1];
    let p2 = positions[2];

    let curve = match segment_type {
        SegmentType::Corner => CubicBezierSegment {
            from: p1,
            ctrl1: p1,
            ctrl2: p2,
            to: p2,
        },
        // Both neighbors are corners: the Catmull-Rom formulas would divide by zero,
        // and a straight line is the only sensible interpolation anyway.
        SegmentType::BetweenCorners => CubicBezierSegment {
            from: p1,
            ctrl1: p1.lerp(p2, 1.0 / 3.0),
            ctrl2: p1.lerp(p2, 2.0 / 3.0),
            to: p2,
        },
        _ => {
            let (positions, chord_lengths) = resolve_corners(segment_type, positions, chord_lengths);
            match basis {
                SplineBasis::UniformCatmullRom => catmull_rom::uniform_to_bezier(&positions),
                SplineBasis::CentripetalCatmullRom => {
                    catmull_rom::centripetal_to_bezier(&positions, &chord_lengths)
                }
                SplineBasis::Yuksel => yuksel::to_bezier(&positions),
            }
        }
    };

    (curve, segment_type)
}

/// Replaces the knot hidden behind a zero-length chord with an imaginary one.
///
/// Duplicating the corner knot would flatten the tangent at the corner and create
/// a visible inflection near the joint. Instead the real knot on the other side
/// of the segment is mirrored across the perpendicular bisector of the middle
/// chord, which makes the segment locally symmetric.
pub(crate) fn resolve_corners(
    segment_type: SegmentType,
    positions: &[Point; 4],
    chord_lengths: &[f64; 3],
) -> ([Point; 4], [f64; 3]) {
    let mut positions = *positions;
    let mut chord_lengths = *chord_lengths;
    let [_, p1, p2, _] = positions;

    match segment_type {
        SegmentType::AfterCorner => {
            positions[0] = reflect_across_bisector(positions[3], p1, p2);
            chord_lengths[0] = chord_lengths[2];
        }
        SegmentType::BeforeCorner => {
            positions[3] = reflect_across_bisector(positions[0], p1, p2);
            chord_lengths[2] = chord_lengths[0];
        }
        _ => {}
    }

    (positions, chord_lengths)
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
fn classification() {
    assert_eq!(SegmentType::classify(&[1.0, 1.0, 1.0]), SegmentType::None);
    assert_eq!(SegmentType::classify(&[1.0, 0.0, 1.0]), SegmentType::Corner);
    assert_eq!(SegmentType::classify(&[0.0, 0.0, 0.0]), SegmentType::Corner);
    assert_eq!(SegmentType::classify(&[0.0, 1.0, 1.0]), SegmentType::AfterCorner);
    assert_eq!(SegmentType::classify(&[1.0, 1.0, 0.0]), SegmentType::BeforeCorner);
    assert_eq!(SegmentType::classify(&[0.0, 1.0, 0.0]), SegmentType::BetweenCorners);
    // No tolerance is applied.
    assert_eq!(SegmentType::classify(&[1e-300, 1.0, 1.0]), SegmentType::None);
}

#[test]
fn corner_segment_is_stationary() {
    let p = [point(0.0, 0.0), point(1.0, 1.0), point(1.0, 1.0), point(2.0, 0.0)];
    for basis in [SplineBasis::UniformCatmullRom, SplineBasis::CentripetalCatmullRom, SplineBasis::Yuksel] {
        let (curve, ty) = compute_centerline_bezier(basis, &p, &chords(&p));
        assert_eq!(ty, SegmentType::Corner);
        assert_eq!(curve.from, point(1.0, 1.0));
        assert_eq!(curve.to, point(1.0, 1.0));
    }
}

#[test]
fn between_corners_is_a_line() {
    let p = [point(0.0, 0.0), point(0.0, 0.0), point(3.0, 3.0), point(3.0, 3.0)];
    for basis in [SplineBasis::UniformCatmullRom, SplineBasis::CentripetalCatmullRom, SplineBasis::Yuksel] {
        let (curve, ty) = compute_centerline_bezier(basis, &p, &chords(&p));
        assert_eq!(ty, SegmentType::BetweenCorners);
        assert_eq!(curve.from, point(0.0, 0.0));
        assert_eq!(curve.to, point(3.0, 3.0));
        assert!((curve.ctrl1 - point(1.0, 1.0)).length() < 1e-12);
        assert!((curve.ctrl2 - point(2.0, 2.0)).length() < 1e-12);
    }
}

#[test]
fn after_corner_mirrors_the_next_knot() {
    let p = [point(0.0, 0.0), point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
    let (resolved, resolved_chords) = resolve_corners(SegmentType::AfterCorner, &p, &chords(&p));

    assert_eq!(resolved[0], point(0.0, 10.0));
    assert_eq!(resolved_chords, [10.0, 10.0, 10.0]);
}

#[test]
fn before_corner_mirrors_the_previous_knot() {
    let p = [point(0.0, 10.0), point(0.0, 0.0), point(10.0, 0.0), point(10.0, 0.0)];
    let (resolved, resolved_chords) = resolve_corners(SegmentType::BeforeCorner, &p, &chords(&p));

    assert_eq!(resolved[3], point(10.0, 10.0));
    assert_eq!(resolved_chords, [10.0, 10.0, 10.0]);
}

#[test]
fn curves_interpolate_the_middle_knots() {
    let p = [point(0.0, 0.0), point(1.0, 2.0), point(4.0, 3.0), point(6.0, -1.0)];
    for basis in [SplineBasis::UniformCatmullRom, SplineBasis::CentripetalCatmullRom, SplineBasis::Yuksel] {
        let (curve, ty) = compute_centerline_bezier(basis, &p, &chords(&p));
        assert_eq!(ty, SegmentType::None);
        assert_eq!(curve.from, p[1]);
        assert_eq!(curve.to, p[2]);
    }
}
