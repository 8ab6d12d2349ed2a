//! The knot model of spline strokes.

use crate::basis::{compute_centerline_bezier, SplineBasis};
use crate::curve::{CurveSegment, CurveSource, CurveVisitor};
use crate::halfwidth::{compute_halfwidth_bezier, WidthBezier};
use crate::math::Point;
use crate::sample::{zero_length_stroke_sample, StrokeSample};
use crate::sampling::{sample_adaptive, SampleStart, SamplingParameters};
use crate::segment::SplineSegment;

/// The half-widths of the knots of a spline stroke.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum HalfWidths {
    /// The same half-width for all knots.
    Constant(f64),
    /// One half-width per knot.
    PerKnot(Vec<f64>),
}

impl HalfWidths {
    #[inline]
    pub fn get(&self, knot: usize) -> f64 {
        match self {
            HalfWidths::Constant(w) => *w,
            HalfWidths::PerKnot(w) => w[knot],
        }
    }

    fn per_knot(&mut self, num_knots: usize) -> &mut Vec<f64> {
        if let HalfWidths::Constant(w) = *self {
            *self = HalfWidths::PerKnot(vec![w; num_knots]);
        }
        match self {
            HalfWidths::PerKnot(w) => w,
            HalfWidths::Constant(_) => unreachable!(),
        }
    }
}

/// The four knots that define the segment between the two middle ones.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct KnotWindow {
    pub indices: [usize; 4],
    pub positions: [Point; 4],
    pub half_widths: [f64; 4],
    /// Distances between consecutive knots of the window. Zero between two
    /// occurrences of the same clamped knot.
    pub chord_lengths: [f64; 3],
}

/// A stroke authored as a sequence of knots, each with a position and a half-width.
///
/// Open strokes have one segment less than they have knots. Closed strokes have
/// one segment per knot, the last one going back to the first knot.
///
/// The first and last knots of an open stroke behave like corners: the segment
/// windows are clamped there, which repeats the end knot and produces a zero-length
/// chord.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SplineStroke {
    positions: Vec<Point>,
    half_widths: HalfWidths,
    closed: bool,
    basis: SplineBasis,
    // Distance from each knot to the next one, including the closing chord from
    // the last knot to the first one even if the stroke is open.
    chord_lengths: Vec<f64>,
    chord_lengths_dirty: bool,
}

impl SplineStroke {
    /// Creates a stroke with one half-width per knot.
    ///
    /// Panics if the number of half-widths doesn't match the number of positions.
    pub fn new(positions: Vec<Point>, half_widths: Vec<f64>, closed: bool) -> Self {
        assert_eq!(positions.len(), half_widths.len());
        Self::with_half_widths(positions, HalfWidths::PerKnot(half_widths), closed)
    }

    pub fn with_constant_half_width(positions: Vec<Point>, half_width: f64, closed: bool) -> Self {
        Self::with_half_widths(positions, HalfWidths::Constant(half_width), closed)
    }

    fn with_half_widths(positions: Vec<Point>, half_widths: HalfWidths, closed: bool) -> Self {
        let mut stroke = SplineStroke {
            positions,
            half_widths,
            closed,
            basis: SplineBasis::DEFAULT,
            chord_lengths: Vec::new(),
            chord_lengths_dirty: true,
        };
        stroke.update_chord_lengths();

        stroke
    }

    pub fn with_basis(mut self, basis: SplineBasis) -> Self {
        self.basis = basis;
        self
    }

    pub fn set_basis(&mut self, basis: SplineBasis) {
        self.basis = basis;
    }

    #[inline]
    pub fn basis(&self) -> SplineBasis {
        self.basis
    }

    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    #[inline]
    pub fn half_widths(&self) -> &HalfWidths {
        &self.half_widths
    }

    #[inline]
    pub fn chord_lengths(&self) -> &[f64] {
        &self.chord_lengths
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn num_knots(&self) -> usize {
        self.positions.len()
    }

    pub fn num_segments(&self) -> usize {
        let n = self.positions.len();
        if self.closed {
            n
        } else {
            n.saturating_sub(1)
        }
    }

    /// Returns true if the stroke has no knots or if all of its knots are at the
    /// same position.
    pub fn is_zero_length(&self) -> bool {
        self.chord_lengths.iter().all(|d| *d == 0.0)
    }

    pub fn set_positions(&mut self, positions: Vec<Point>) {
        if let HalfWidths::PerKnot(w) = &self.half_widths {
            assert_eq!(w.len(), positions.len());
        }
        self.positions = positions;
        self.invalidate();
    }

    pub fn set_position(&mut self, knot: usize, position: Point) {
        self.positions[knot] = position;
        self.invalidate();
    }

    /// Panics if the number of per-knot half-widths doesn't match the number of knots.
    pub fn set_half_widths(&mut self, half_widths: HalfWidths) {
        if let HalfWidths::PerKnot(w) = &half_widths {
            assert_eq!(w.len(), self.positions.len());
        }
        self.half_widths = half_widths;
        self.invalidate();
    }

    pub fn set_half_width(&mut self, knot: usize, half_width: f64) {
        assert!(knot < self.positions.len());
        let n = self.positions.len();
        self.half_widths.per_knot(n)[knot] = half_width;
        self.invalidate();
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
        self.invalidate();
    }

    pub fn push_knot(&mut self, position: Point, half_width: f64) {
        let n = self.positions.len();
        self.insert_knot(n, position, half_width);
    }

    /// Inserts a knot before the knot at `index`.
    pub fn insert_knot(&mut self, index: usize, position: Point, half_width: f64) {
        let n = self.positions.len();
        let uniform = matches!(self.half_widths, HalfWidths::Constant(w) if w == half_width);
        if !uniform {
            self.half_widths.per_knot(n).insert(index, half_width);
        }
        self.positions.insert(index, position);
        self.invalidate();
    }

    /// Removes a knot and returns its position and half-width.
    pub fn remove_knot(&mut self, index: usize) -> (Point, f64) {
        let position = self.positions.remove(index);
        let half_width = match &mut self.half_widths {
            HalfWidths::Constant(w) => *w,
            HalfWidths::PerKnot(w) => w.remove(index),
        };
        self.invalidate();

        (position, half_width)
    }

    /// Called after every modification.
    fn invalidate(&mut self) {
        self.chord_lengths_dirty = true;
        self.update_chord_lengths();
    }

    fn update_chord_lengths(&mut self) {
        if !self.chord_lengths_dirty {
            return;
        }

        let n = self.positions.len();
        self.chord_lengths.clear();
        self.chord_lengths
            .extend((0..n).map(|i| (self.positions[(i + 1) % n] - self.positions[i]).length()));
        self.chord_lengths_dirty = false;
    }

    /// The indices of the four knots that define a segment.
    ///
    /// Panics if `segment` is not a valid segment index.
    pub fn segment_knot_indices(&self, segment: usize) -> [usize; 4] {
        assert!(segment < self.num_segments());
        let n = self.positions.len();

        if self.closed {
            [(segment + n - 1) % n, segment, (segment + 1) % n, (segment + 2) % n]
        } else {
            let last = n - 1;
            [
                segment.saturating_sub(1),
                segment,
                segment + 1,
                (segment + 2).min(last),
            ]
        }
    }

    /// Panics if `segment` is not a valid segment index.
    pub fn knot_window(&self, segment: usize) -> KnotWindow {
        debug_assert!(!self.chord_lengths_dirty);
        let indices = self.segment_knot_indices(segment);

        // Consecutive window indices are either equal (clamped) or neighbors.
        let chord = |a: usize, b: usize| if a == b { 0.0 } else { self.chord_lengths[a] };

        KnotWindow {
            indices,
            positions: indices.map(|i| self.positions[i]),
            half_widths: indices.map(|i| self.half_widths.get(i)),
            chord_lengths: [
                chord(indices[0], indices[1]),
                chord(indices[1], indices[2]),
                chord(indices[2], indices[3]),
            ],
        }
    }

    /// Computes the curves of a segment.
    ///
    /// Panics if `index` is not a valid segment index.
    pub fn segment(&self, index: usize) -> SplineSegment {
        let window = self.knot_window(index);
        let (centerline, segment_type) =
            compute_centerline_bezier(self.basis, &window.positions, &window.chord_lengths);

        let half_width = match self.half_widths {
            HalfWidths::Constant(w) => WidthBezier::constant(w),
            HalfWidths::PerKnot(_) => compute_halfwidth_bezier(
                &window.half_widths,
                &centerline,
                &window.chord_lengths,
                segment_type,
            ),
        };

        SplineSegment {
            index,
            segment_type,
            centerline,
            half_width,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = SplineSegment> + '_ {
        (0..self.num_segments()).map(move |i| self.segment(i))
    }

    /// The sample used to represent the stroke when it has no segment, or when
    /// all of its segments are zero-length.
    ///
    /// Positioned at the first knot (or at the origin if there is none).
    pub fn zero_length_stroke_sample(&self) -> StrokeSample {
        match self.positions.first() {
            Some(p) => zero_length_stroke_sample(*p, self.half_widths.get(0)),
            None => {
                let w = match self.half_widths {
                    HalfWidths::Constant(w) => w,
                    HalfWidths::PerKnot(_) => 0.0,
                };
                zero_length_stroke_sample(crate::curve::origin(), w)
            }
        }
    }

    /// Adaptively samples the centerline of the whole stroke and appends the
    /// samples to `output`.
    ///
    /// Knots shared between consecutive segments are emitted once. Zero-length
    /// segments are skipped. A stroke with knots but no length produces its
    /// [zero-length sample](Self::zero_length_stroke_sample).
    pub fn sample_centerline(&self, params: &SamplingParameters, output: &mut Vec<StrokeSample>) {
        if self.positions.is_empty() {
            return;
        }

        let first = output.len();
        for segment in self.segments() {
            if segment.is_zero_length() {
                continue;
            }

            let start = if output.len() == first {
                SampleStart::Include
            } else {
                SampleStart::Skip
            };

            sample_adaptive(
                params,
                |u| segment.stroke_sample(u),
                |a, m, b| params.should_keep(a.position, m.position, b.position),
                start,
                output,
            );
        }

        if output.len() == first {
            output.push(self.zero_length_stroke_sample());
        }
    }
}

impl CurveSource for SplineStroke {
    fn visit<V: CurveVisitor>(&self, visitor: &mut V) {
        let first = match self.positions.first() {
            Some(p) => *p,
            None => return,
        };

        visitor.begin(first);
        for segment in self.segments() {
            visitor.segment(&CurveSegment::Spline(segment));
        }
        visitor.end(self.closed);
    }
}

#[cfg(test)]
use crate::basis::SegmentType;
#[cfg(test)]
use crate::math::point;

#[test]
fn segment_counts() {
    let p = vec![point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)];

    assert_eq!(SplineStroke::with_constant_half_width(vec![], 1.0, false).num_segments(), 0);
    assert_eq!(SplineStroke::with_constant_half_width(vec![], 1.0, true).num_segments(), 0);
    assert_eq!(SplineStroke::with_constant_half_width(vec![point(1.0, 1.0)], 1.0, false).num_segments(), 0);
    assert_eq!(SplineStroke::with_constant_half_width(vec![point(1.0, 1.0)], 1.0, true).num_segments(), 1);
    assert_eq!(SplineStroke::with_constant_half_width(p.clone(), 1.0, false).num_segments(), 2);
    assert_eq!(SplineStroke::with_constant_half_width(p, 1.0, true).num_segments(), 3);
}

#[test]
fn knot_windows() {
    let p = vec![point(0.0, 0.0), point(3.0, 0.0), point(3.0, 4.0), point(0.0, 4.0)];
    let open = SplineStroke::new(p.clone(), vec![1.0, 2.0, 3.0, 4.0], false);

    assert_eq!(open.chord_lengths(), &[3.0, 4.0, 3.0, 4.0]);
    assert_eq!(open.segment_knot_indices(0), [0, 0, 1, 2]);
    assert_eq!(open.segment_knot_indices(1), [0, 1, 2, 3]);
    assert_eq!(open.segment_knot_indices(2), [1, 2, 3, 3]);

    let w = open.knot_window(0);
    assert_eq!(w.chord_lengths, [0.0, 3.0, 4.0]);
    assert_eq!(w.half_widths, [1.0, 1.0, 2.0, 3.0]);
    assert_eq!(open.segment(0).segment_type, SegmentType::AfterCorner);
    assert_eq!(open.segment(1).segment_type, SegmentType::None);
    assert_eq!(open.segment(2).segment_type, SegmentType::BeforeCorner);

    let closed = SplineStroke::new(p, vec![1.0, 2.0, 3.0, 4.0], true);
    assert_eq!(closed.segment_knot_indices(0), [3, 0, 1, 2]);
    assert_eq!(closed.segment_knot_indices(3), [2, 3, 0, 1]);
    assert_eq!(closed.knot_window(3).chord_lengths, [3.0, 4.0, 3.0]);
    assert_eq!(closed.segment(3).segment_type, SegmentType::None);
}

#[test]
fn two_knots_make_a_straight_line() {
    let s = SplineStroke::with_constant_half_width(vec![point(0.0, 0.0), point(3.0, 3.0)], 1.0, false);
    let seg = s.segment(0);

    assert_eq!(seg.segment_type, SegmentType::BetweenCorners);
    assert!((seg.position(0.5) - point(1.5, 1.5)).length() < 1e-12);
}

#[test]
#[should_panic]
fn segment_index_out_of_range() {
    let s = SplineStroke::with_constant_half_width(vec![point(0.0, 0.0), point(3.0, 3.0)], 1.0, false);
    s.segment(1);
}

#[test]
#[should_panic]
fn half_width_count_mismatch() {
    SplineStroke::new(vec![point(0.0, 0.0), point(3.0, 3.0)], vec![1.0], false);
}

#[test]
fn mutators_update_chord_lengths() {
    let mut s = SplineStroke::with_constant_half_width(vec![point(0.0, 0.0), point(3.0, 4.0)], 1.0, false);
    assert_eq!(s.chord_lengths(), &[5.0, 5.0]);

    s.set_position(1, point(0.0, 2.0));
    assert_eq!(s.chord_lengths(), &[2.0, 2.0]);

    s.push_knot(point(0.0, 3.0), 1.0);
    assert_eq!(s.chord_lengths(), &[2.0, 1.0, 3.0]);
    assert_eq!(s.half_widths(), &HalfWidths::Constant(1.0));

    s.insert_knot(0, point(0.0, -1.0), 2.0);
    assert_eq!(s.chord_lengths(), &[1.0, 2.0, 1.0, 4.0]);
    assert_eq!(s.half_widths(), &HalfWidths::PerKnot(vec![2.0, 1.0, 1.0, 1.0]));

    assert_eq!(s.remove_knot(1), (point(0.0, 0.0), 1.0));
    assert_eq!(s.chord_lengths(), &[3.0, 1.0, 4.0]);

    s.set_half_width(2, 5.0);
    assert_eq!(s.chord_lengths(), &[3.0, 1.0, 4.0]);
    assert_eq!(s.half_widths(), &HalfWidths::PerKnot(vec![2.0, 1.0, 5.0]));

    s.set_positions(vec![point(0.0, 0.0), point(0.0, 0.0), point(0.0, 0.0)]);
    assert!(s.is_zero_length());
}

#[test]
fn corners_are_exact() {
    let p = vec![
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(20.0, 10.0),
    ];
    for basis in [SplineBasis::UniformCatmullRom, SplineBasis::CentripetalCatmullRom, SplineBasis::Yuksel] {
        let s = SplineStroke::with_constant_half_width(p.clone(), 1.0, false).with_basis(basis);
        assert_eq!(s.segment(1).segment_type, SegmentType::Corner);
        assert_eq!(s.segment(0).position(1.0), point(10.0, 0.0));
        assert_eq!(s.segment(2).position(0.0), point(10.0, 0.0));
    }
}

#[test]
fn centerline_sampling() {
    let s = SplineStroke::with_constant_half_width(
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
        1.0,
        false,
    );

    let mut samples = Vec::new();
    s.sample_centerline(&SamplingParameters::DEFAULT, &mut samples);

    assert_eq!(samples[0].position, point(0.0, 0.0));
    assert_eq!(samples.last().map(|s| s.position), Some(point(10.0, 10.0)));
    // The shared knot is emitted once.
    let at_knot = samples.iter().filter(|s| s.position == point(10.0, 0.0)).count();
    assert_eq!(at_knot, 1);
    for pair in samples.windows(2) {
        assert!(pair[0].position != pair[1].position);
    }
}

#[test]
fn degenerate_strokes_sample_a_single_point() {
    let mut samples = Vec::new();
    SplineStroke::with_constant_half_width(vec![], 1.0, false)
        .sample_centerline(&SamplingParameters::DEFAULT, &mut samples);
    assert!(samples.is_empty());

    SplineStroke::with_constant_half_width(vec![point(2.0, 3.0)], 1.0, false)
        .sample_centerline(&SamplingParameters::DEFAULT, &mut samples);
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].position, point(2.0, 3.0));

    samples.clear();
    SplineStroke::with_constant_half_width(vec![point(2.0, 3.0), point(2.0, 3.0)], 1.0, true)
        .sample_centerline(&SamplingParameters::DEFAULT, &mut samples);
    assert_eq!(samples.len(), 1);
}
