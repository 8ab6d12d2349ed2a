use core::f64::consts::PI;
use core::ops::Range;

use lyon_tessellation as tess;

use crate::error::{TessellationResult, UnsupportedParameter};
use crate::geom::sampling::{sample_adaptive, sample_positions};
use crate::geom::{Arc, CurveSegment, CurveSource, CurveVisitor, SegmentEnd, StrokeSample};
use crate::math::{vector, Angle, Point, Vector};
use crate::tessellator::{coincident, tessellate_contours};
use crate::{LineCap, SampleStart, SamplingParameters, StrokeOptions, WindingRule};

/// Where the samples of a segment live in the offset lines of its subpath, along
/// with the tangents of the offset lines at both ends of the segment.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeSegmentInfo {
    /// Index of the segment in its curve.
    pub index: usize,
    /// Range of the segment's samples in [`StrokeSubpath::left`], including the
    /// first sample even if it is shared with the previous segment.
    pub left: Range<usize>,
    /// Same as `left`, for [`StrokeSubpath::right`].
    pub right: Range<usize>,
    /// Unit tangents of the left and right offset lines at the start of the segment.
    pub start_tangents: [Vector; 2],
    /// Unit tangents of the left and right offset lines at the end of the segment.
    pub end_tangents: [Vector; 2],
}

/// The sampled offset lines of a subpath.
///
/// The left offset line is on the side of the normal (the centerline's tangent
/// rotated counter-clockwise), the right one on the opposite side. Both go in the
/// direction of the curve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeSubpath {
    pub left: Vec<Point>,
    pub right: Vec<Point>,
    pub segments: Vec<StrokeSegmentInfo>,
    pub closed: bool,
    first_sample: Option<StrokeSample>,
    last_sample: Option<StrokeSample>,
}

impl StrokeSubpath {
    /// The centerline sample at the start of the first non-degenerate segment.
    pub fn first_sample(&self) -> Option<&StrokeSample> {
        self.first_sample.as_ref()
    }

    /// The centerline sample at the end of the last non-degenerate segment.
    pub fn last_sample(&self) -> Option<&StrokeSample> {
        self.last_sample.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// A [`CurveVisitor`] that samples the offset lines of a curve and builds the
/// polygons covered by its stroke.
///
/// Open subpaths produce one contour: the left offset line, the end cap, the right
/// offset line backward and the start cap. Closed subpaths produce two contours
/// without caps: the left loop and the reversed right loop. The contours are meant
/// to be filled with the non-zero winding rule.
pub struct StrokeVisitor<'l> {
    options: &'l StrokeOptions,
    current: StrokeSubpath,
    segment_index: usize,
    subpaths: Vec<StrokeSubpath>,
    contours: Vec<Vec<Point>>,
}

impl<'l> StrokeVisitor<'l> {
    pub fn new(options: &'l StrokeOptions) -> Self {
        StrokeVisitor {
            options,
            current: StrokeSubpath::default(),
            segment_index: 0,
            subpaths: Vec::new(),
            contours: Vec::new(),
        }
    }

    /// The subpaths visited so far, except the empty ones.
    pub fn subpaths(&self) -> &[StrokeSubpath] {
        &self.subpaths
    }

    /// The polygons to fill.
    pub fn contours(&self) -> &[Vec<Point>] {
        &self.contours
    }

    pub fn into_contours(self) -> Vec<Vec<Point>> {
        self.contours
    }

    fn push_contour(&mut self, mut contour: Vec<Point>) {
        if contour.len() > 1 && coincident(contour[0], contour[contour.len() - 1]) {
            contour.pop();
        }
        if contour.len() < 3 {
            log::debug!("Dropping a stroke contour with {} points", contour.len());
            return;
        }
        self.contours.push(contour);
    }
}

impl<'l> CurveVisitor for StrokeVisitor<'l> {
    fn begin(&mut self, _at: Point) {
        self.current = StrokeSubpath::default();
        self.segment_index = 0;
    }

    fn segment(&mut self, segment: &CurveSegment) {
        let index = self.segment_index;
        self.segment_index += 1;

        if segment.is_zero_length() {
            log::trace!("Skipping zero-length segment {}", index);
            return;
        }

        let options = self.options;
        let half_width = options.half_width;
        let sub = &mut self.current;

        let start = segment.stroke_sample(0.0, half_width, index);
        let end = segment.stroke_sample(1.0, half_width, index);

        let left_start = sub.left.len();
        let right_start = sub.right.len();
        let left_shared = sub.left.last().map_or(false, |p| coincident(*p, start.left_point()));
        let right_shared = sub.right.last().map_or(false, |p| coincident(*p, start.right_point()));

        if let CurveSegment::Line(_) = segment {
            if !left_shared {
                sub.left.push(start.left_point());
            }
            sub.left.push(end.left_point());
            if !right_shared {
                sub.right.push(start.right_point());
            }
            sub.right.push(end.right_point());
        } else {
            let sample_start = |shared: bool| {
                if shared {
                    SampleStart::Skip
                } else {
                    SampleStart::Include
                }
            };
            sample_positions(
                &options.sampling,
                |u| segment.stroke_sample(u, half_width, index).left_point(),
                sample_start(left_shared),
                &mut sub.left,
            );
            sample_positions(
                &options.sampling,
                |u| segment.stroke_sample(u, half_width, index).right_point(),
                sample_start(right_shared),
                &mut sub.right,
            );
        }

        sub.segments.push(StrokeSegmentInfo {
            index,
            left: (if left_shared { left_start - 1 } else { left_start })..sub.left.len(),
            right: (if right_shared { right_start - 1 } else { right_start })..sub.right.len(),
            start_tangents: segment.offset_line_tangents(SegmentEnd::Start, half_width),
            end_tangents: segment.offset_line_tangents(SegmentEnd::End, half_width),
        });

        if sub.first_sample.is_none() {
            sub.first_sample = Some(start);
        }
        sub.last_sample = Some(end);
    }

    fn end(&mut self, close: bool) {
        let mut sub = core::mem::take(&mut self.current);
        sub.closed = close;

        if sub.is_empty() {
            log::debug!("Skipping a stroke subpath without samples");
            return;
        }

        if close {
            self.push_contour(sub.left.clone());
            self.push_contour(sub.right.iter().rev().copied().collect());
        } else {
            let mut contour = Vec::with_capacity(sub.left.len() + sub.right.len() + 8);
            contour.extend_from_slice(&sub.left);

            if let (Some(s), Some(l), Some(r)) = (sub.last_sample, sub.left.last(), sub.right.last()) {
                add_cap(self.options.end_cap, *l, *r, s.tangent, &self.options.sampling, &mut contour);
            }

            contour.extend(sub.right.iter().rev());

            if let (Some(s), Some(l), Some(r)) = (sub.first_sample, sub.left.first(), sub.right.first()) {
                add_cap(self.options.start_cap, *r, *l, -s.tangent, &self.options.sampling, &mut contour);
            }

            self.push_contour(contour);
        }

        self.subpaths.push(sub);
    }
}

/// Appends the points of a cap going from `from` to `to` around the point
/// `direction` points to, excluding both endpoints.
fn add_cap(
    cap: LineCap,
    from: Point,
    to: Point,
    direction: Vector,
    sampling: &SamplingParameters,
    output: &mut Vec<Point>,
) {
    let radius = (to - from).length() * 0.5;
    if radius == 0.0 {
        return;
    }

    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let offset = direction * radius;
            output.push(from + offset);
            output.push(to + offset);
        }
        LineCap::Round => {
            let center = from.lerp(to, 0.5);
            let v = from - center;
            // Turn towards `direction`.
            let sweep = if direction.cross(v) >= 0.0 { -PI } else { PI };
            let arc = CurveSegment::Arc(Arc {
                center,
                radii: vector(radius, radius),
                start_angle: Angle::radians(v.y.atan2(v.x)),
                sweep_angle: Angle::radians(sweep),
                x_rotation: Angle::radians(0.0),
            });

            let mut points = Vec::new();
            sample_positions(sampling, |u| arc.eval(u).position, SampleStart::Include, &mut points);

            // The endpoints duplicate the ends of the offset lines. With only two
            // samples there is nothing in between and the cap degenerates to a
            // butt cap.
            if points.len() > 2 {
                output.extend_from_slice(&points[1..points.len() - 1]);
            }
        }
    }
}

/// Stroke tessellator for curves of variable width.
///
/// ## Examples
///
/// ```
/// use vstroke_tessellation::{StrokeOptions, StrokeTessellator, LineCap};
/// use vstroke_tessellation::geom::Curves2d;
/// use vstroke_tessellation::math::point;
///
/// let mut curves = Curves2d::new();
/// curves.move_to(point(0.0, 0.0));
/// curves.quadratic_bezier_to(point(50.0, 100.0), point(100.0, 0.0));
///
/// let mut vertices = Vec::new();
/// StrokeTessellator::new().tessellate(
///     &curves,
///     &StrokeOptions::half_width(5.0).with_line_cap(LineCap::Square),
///     &mut vertices,
/// ).unwrap();
///
/// assert!(!vertices.is_empty());
/// ```
pub struct StrokeTessellator {
    fill: tess::FillTessellator,
}

impl StrokeTessellator {
    pub fn new() -> Self {
        StrokeTessellator {
            fill: tess::FillTessellator::new(),
        }
    }

    /// Strokes a curve and appends the triangles to `output`.
    ///
    /// `output` is left untouched if the tessellation fails.
    pub fn tessellate<Source: CurveSource>(
        &mut self,
        source: &Source,
        options: &StrokeOptions,
        output: &mut Vec<f32>,
    ) -> TessellationResult {
        if options.half_width.is_nan() {
            return Err(UnsupportedParameter::HalfWidthIsNaN.into());
        }

        let mut visitor = StrokeVisitor::new(options);
        source.visit(&mut visitor);

        let contours = visitor.into_contours();
        log::trace!("Stroke: {} contours", contours.len());

        tessellate_contours(&mut self.fill, &contours, WindingRule::NonZero, output)
    }
}

impl Default for StrokeTessellator {
    fn default() -> Self {
        Self::new()
    }
}

/// Samples the centerline of a curve for stroking, without building contours.
///
/// Appends one sample per point of the centerline, using the same keep predicate
/// as the stroke tessellator applied to the centerline positions.
pub fn sample_stroke_centerline<Source: CurveSource>(
    source: &Source,
    options: &StrokeOptions,
    output: &mut Vec<StrokeSample>,
) {
    struct Sampler<'a> {
        options: &'a StrokeOptions,
        output: &'a mut Vec<StrokeSample>,
        segment_index: usize,
        subpath_start: usize,
    }

    impl<'a> CurveVisitor for Sampler<'a> {
        fn begin(&mut self, _at: Point) {
            self.segment_index = 0;
            self.subpath_start = self.output.len();
        }

        fn segment(&mut self, segment: &CurveSegment) {
            let index = self.segment_index;
            self.segment_index += 1;
            if segment.is_zero_length() {
                return;
            }

            let start = if self.output.len() > self.subpath_start {
                SampleStart::Skip
            } else {
                SampleStart::Include
            };
            let params = &self.options.sampling;
            let half_width = self.options.half_width;
            sample_adaptive(
                params,
                |u| segment.stroke_sample(u, half_width, index),
                |a, m, b| params.should_keep(a.position, m.position, b.position),
                start,
                self.output,
            );
        }

        fn end(&mut self, _close: bool) {}
    }

    source.visit(&mut Sampler {
        options,
        output,
        segment_index: 0,
        subpath_start: 0,
    });
}

#[cfg(test)]
use crate::algorithms::area::{signed_area, triangles_area};
#[cfg(test)]
use crate::geom::{Curves2d, SplineStroke};
#[cfg(test)]
use crate::SamplingQuality;
#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn stroke_area<S: CurveSource>(source: &S, options: &StrokeOptions) -> f64 {
    let mut out = Vec::new();
    StrokeTessellator::new().tessellate(source, options, &mut out).unwrap();
    assert_eq!(out.len() % 6, 0);
    triangles_area(&out)
}

#[test]
fn straight_line_caps() {
    let mut curves = Curves2d::new();
    curves.move_to(point(0.0, 0.0));
    curves.line_to(point(10.0, 0.0));

    let butt = stroke_area(&curves, &StrokeOptions::half_width(1.0));
    let square = stroke_area(&curves, &StrokeOptions::half_width(1.0).with_line_cap(LineCap::Square));
    let round = stroke_area(
        &curves,
        &StrokeOptions::half_width(1.0)
            .with_line_cap(LineCap::Round)
            .with_sampling(SamplingParameters::with_quality(SamplingQuality::High)),
    );

    assert!((butt - 20.0).abs() < 1e-3);
    assert!((square - 24.0).abs() < 1e-3);
    // Slightly less than a full disc because of the sampling.
    assert!(round > 20.0 + PI * 0.9 && round < 20.0 + PI);
}

#[test]
fn line_contour_layout() {
    let mut curves = Curves2d::new();
    curves.move_to(point(0.0, 0.0));
    curves.line_to(point(10.0, 0.0));
    curves.line_to(point(10.0, 10.0));

    let options = StrokeOptions::half_width(1.0);
    let mut visitor = StrokeVisitor::new(&options);
    curves.visit(&mut visitor);

    let sub = &visitor.subpaths()[0];
    assert_eq!(sub.left, vec![point(0.0, 1.0), point(10.0, 1.0), point(9.0, 0.0), point(9.0, 10.0)]);
    assert_eq!(sub.right, vec![point(0.0, -1.0), point(10.0, -1.0), point(11.0, 0.0), point(11.0, 10.0)]);
    assert_eq!(sub.segments.len(), 2);
    assert_eq!(sub.segments[1].left, 2..4);
    for t in &sub.segments[1].start_tangents {
        assert!((*t - vector(0.0, 1.0)).length() < 1e-9);
    }

    assert_eq!(visitor.contours().len(), 1);
    assert_eq!(visitor.contours()[0].len(), 8);
}

#[test]
fn closed_ring_is_an_annulus() {
    let radius = 50.0;
    let w = 5.0;
    let n = 16;
    let knots: Vec<Point> = (0..n)
        .map(|i| {
            let a = i as f64 * 2.0 * PI / n as f64;
            point(radius * a.cos(), radius * a.sin())
        })
        .collect();
    let ring = SplineStroke::with_constant_half_width(knots, w, true);
    let options = StrokeOptions::DEFAULT.with_sampling(SamplingParameters::DEFAULT.with_max_angle(0.01));

    let mut visitor = StrokeVisitor::new(&options);
    ring.visit(&mut visitor);
    let contours = visitor.contours();
    assert_eq!(contours.len(), 2);
    // Counter-clockwise ring: the left loop is the inner one.
    assert!(signed_area(&contours[0]) > 0.0);
    assert!(signed_area(&contours[1]) < 0.0);
    assert!(signed_area(&contours[0]).abs() < signed_area(&contours[1]).abs());

    let expected = PI * ((radius + w).powi(2) - (radius - w).powi(2));
    let area = stroke_area(&ring, &options);
    assert!((area - expected).abs() / expected < 0.01);
}

#[test]
fn three_knots() {
    let spline = SplineStroke::with_constant_half_width(
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
        1.0,
        false,
    );

    let options = StrokeOptions::DEFAULT;
    let mut visitor = StrokeVisitor::new(&options);
    spline.visit(&mut visitor);

    let sub = &visitor.subpaths()[0];
    assert_eq!(sub.segments.len(), 2);
    // Offset by the half-width on both sides of the first knot.
    assert!((sub.left[0].to_vector().length() - 1.0).abs() < 1e-9);
    assert!((sub.right[0].to_vector().length() - 1.0).abs() < 1e-9);
    assert!((sub.left[0] - sub.right[0]).length() > 2.0 - 1e-9);
    // The segments share the offset points at the middle knot.
    assert_eq!(sub.segments[0].left.end - 1, sub.segments[1].left.start);
    assert_eq!(sub.segments[0].right.end - 1, sub.segments[1].right.start);
    for side in [&sub.left, &sub.right] {
        for pair in side.windows(2) {
            assert!(pair[0] != pair[1]);
        }
    }

    let mut out = Vec::new();
    StrokeTessellator::new().tessellate(&spline, &options, &mut out).unwrap();
    assert!(!out.is_empty());
}

#[test]
fn degenerate_strokes() {
    let options = StrokeOptions::DEFAULT.with_line_cap(LineCap::Round);
    let mut out = Vec::new();
    let mut tessellator = StrokeTessellator::new();

    tessellator
        .tessellate(&SplineStroke::with_constant_half_width(vec![], 1.0, false), &options, &mut out)
        .unwrap();
    tessellator
        .tessellate(&SplineStroke::with_constant_half_width(vec![point(1.0, 1.0)], 1.0, false), &options, &mut out)
        .unwrap();
    tessellator
        .tessellate(
            &SplineStroke::with_constant_half_width(vec![point(1.0, 1.0), point(1.0, 1.0)], 1.0, true),
            &options,
            &mut out,
        )
        .unwrap();

    assert!(out.is_empty());
}

#[test]
fn nan_half_width() {
    let mut curves = Curves2d::new();
    curves.move_to(point(0.0, 0.0));
    curves.line_to(point(10.0, 0.0));

    let mut out = vec![1.0];
    let result = StrokeTessellator::new().tessellate(&curves, &StrokeOptions::half_width(f64::NAN), &mut out);
    assert_eq!(result, Err(UnsupportedParameter::HalfWidthIsNaN.into()));
    assert_eq!(out, vec![1.0]);

    let spline = SplineStroke::new(vec![point(0.0, 0.0), point(10.0, 0.0)], vec![1.0, f64::NAN], false);
    let result = StrokeTessellator::new().tessellate(&spline, &StrokeOptions::DEFAULT, &mut out);
    assert_eq!(result, Err(UnsupportedParameter::PositionIsNaN.into()));
    assert_eq!(out, vec![1.0]);
}

#[test]
fn round_cap_with_two_samples_is_a_butt_cap() {
    let mut out = Vec::new();
    let sampling = SamplingParameters::DEFAULT.with_max_samples(2);
    add_cap(LineCap::Round, point(0.0, 1.0), point(0.0, -1.0), vector(1.0, 0.0), &sampling, &mut out);
    assert!(out.is_empty());

    add_cap(LineCap::Round, point(0.0, 1.0), point(0.0, -1.0), vector(1.0, 0.0), &SamplingParameters::DEFAULT, &mut out);
    assert!(!out.is_empty());
    for p in &out {
        assert!(p.x > 0.0);
        assert!((p.to_vector().length() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn centerline_samples() {
    let mut curves = Curves2d::new();
    curves.move_to(point(0.0, 0.0));
    curves.line_to(point(10.0, 0.0));
    curves.line_to(point(10.0, 10.0));

    let mut samples = Vec::new();
    sample_stroke_centerline(&curves, &StrokeOptions::DEFAULT, &mut samples);

    assert_eq!(samples.first().map(|s| s.position), Some(point(0.0, 0.0)));
    assert_eq!(samples.last().map(|s| s.position), Some(point(10.0, 10.0)));
    assert_eq!(samples.iter().filter(|s| s.position == point(10.0, 0.0)).count(), 1);
}
