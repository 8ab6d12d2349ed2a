use lyon_tessellation as tess;

use crate::error::TessellationResult;
use crate::geom::sampling::sample_positions;
use crate::geom::{CurveSegment, CurveSource, CurveVisitor};
use crate::math::Point;
use crate::tessellator::{coincident, tessellate_contours};
use crate::{FillOptions, SampleStart, SamplingParameters};

/// A [`CurveVisitor`] that samples the centerline of the closed subpaths of a
/// curve into polygons.
///
/// Open subpaths have no interior and are ignored.
pub struct FillVisitor<'l> {
    sampling: &'l SamplingParameters,
    current: Vec<Point>,
    contours: Vec<Vec<Point>>,
}

impl<'l> FillVisitor<'l> {
    pub fn new(sampling: &'l SamplingParameters) -> Self {
        FillVisitor {
            sampling,
            current: Vec::new(),
            contours: Vec::new(),
        }
    }

    pub fn contours(&self) -> &[Vec<Point>] {
        &self.contours
    }

    pub fn into_contours(self) -> Vec<Vec<Point>> {
        self.contours
    }
}

impl<'l> CurveVisitor for FillVisitor<'l> {
    fn begin(&mut self, _at: Point) {
        self.current.clear();
    }

    fn segment(&mut self, segment: &CurveSegment) {
        if segment.is_zero_length() {
            return;
        }

        let shared = self
            .current
            .last()
            .map_or(false, |p| coincident(*p, segment.from()));

        if let CurveSegment::Line(line) = segment {
            if !shared {
                self.current.push(line.from);
            }
            self.current.push(line.to);
            return;
        }

        let start = if shared { SampleStart::Skip } else { SampleStart::Include };
        sample_positions(self.sampling, |u| segment.eval(u).position, start, &mut self.current);
    }

    fn end(&mut self, close: bool) {
        let mut contour = core::mem::take(&mut self.current);
        if !close {
            if !contour.is_empty() {
                log::debug!("Ignoring an open subpath with {} points", contour.len());
            }
            return;
        }

        if contour.len() > 1 && coincident(contour[0], contour[contour.len() - 1]) {
            contour.pop();
        }

        if contour.len() < 3 {
            log::debug!("Ignoring a closed subpath with {} points", contour.len());
            return;
        }

        self.contours.push(contour);
    }
}

/// Fill tessellator for the closed subpaths of a curve.
///
/// The interior is delimited by the centerline. Stroke widths play no role.
///
/// ## Examples
///
/// ```
/// use vstroke_tessellation::{FillOptions, FillTessellator};
/// use vstroke_tessellation::geom::SplineStroke;
/// use vstroke_tessellation::math::point;
///
/// let blob = SplineStroke::with_constant_half_width(
///     vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)],
///     1.0,
///     true,
/// );
///
/// let mut vertices = Vec::new();
/// FillTessellator::new().tessellate(&blob, &FillOptions::DEFAULT, &mut vertices).unwrap();
///
/// assert!(!vertices.is_empty());
/// ```
pub struct FillTessellator {
    fill: tess::FillTessellator,
}

impl FillTessellator {
    pub fn new() -> Self {
        FillTessellator {
            fill: tess::FillTessellator::new(),
        }
    }

    /// Fills a curve and appends the triangles to `output`.
    ///
    /// `output` is left untouched if the tessellation fails.
    pub fn tessellate<Source: CurveSource>(
        &mut self,
        source: &Source,
        options: &FillOptions,
        output: &mut Vec<f32>,
    ) -> TessellationResult {
        let mut visitor = FillVisitor::new(&options.sampling);
        source.visit(&mut visitor);

        let contours = visitor.into_contours();
        log::trace!("Fill: {} contours", contours.len());

        tessellate_contours(&mut self.fill, &contours, options.winding_rule, output)
    }
}

impl Default for FillTessellator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
use crate::algorithms::area::triangles_area;
#[cfg(test)]
use crate::geom::{ArcFlags, Curves2d, SplineStroke};
#[cfg(test)]
use crate::math::{point, vector, Angle};
#[cfg(test)]
use crate::WindingRule;

#[cfg(test)]
fn fill_area<S: CurveSource>(source: &S, options: &FillOptions) -> f64 {
    let mut out = Vec::new();
    FillTessellator::new().tessellate(source, options, &mut out).unwrap();
    assert_eq!(out.len() % 6, 0);
    triangles_area(&out)
}

#[test]
fn open_spline_has_no_fill() {
    let spline = SplineStroke::with_constant_half_width(
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
        1.0,
        false,
    );

    let mut out = Vec::new();
    FillTessellator::new().tessellate(&spline, &FillOptions::DEFAULT, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn overlapping_squares() {
    let mut curves = Curves2d::new();
    for &(x, y) in &[(0.0, 0.0), (5.0, 0.0)] {
        curves.move_to(point(x, y));
        curves.line_to(point(x + 10.0, y));
        curves.line_to(point(x + 10.0, y + 10.0));
        curves.line_to(point(x, y + 10.0));
        curves.close();
    }

    let mut visitor = FillVisitor::new(&SamplingParameters::DEFAULT);
    curves.visit(&mut visitor);
    assert_eq!(visitor.contours().len(), 2);
    assert_eq!(visitor.contours()[0].len(), 4);

    assert!((fill_area(&curves, &FillOptions::non_zero()) - 150.0).abs() < 1e-3);
    assert!((fill_area(&curves, &FillOptions::odd()) - 100.0).abs() < 1e-3);
    assert!((fill_area(&curves, &FillOptions::DEFAULT.with_winding_rule(WindingRule::Positive)) - 150.0).abs() < 1e-3);
    assert!(fill_area(&curves, &FillOptions::DEFAULT.with_winding_rule(WindingRule::Negative)) < 1e-3);
}

#[test]
fn circle_from_arcs() {
    let flags = ArcFlags {
        large_arc: false,
        sweep: true,
    };
    let mut curves = Curves2d::new();
    curves.move_to(point(10.0, 0.0));
    curves.arc_to(vector(10.0, 10.0), Angle::radians(0.0), flags, point(-10.0, 0.0));
    curves.arc_to(vector(10.0, 10.0), Angle::radians(0.0), flags, point(10.0, 0.0));
    curves.close();

    let expected = std::f64::consts::PI * 100.0;
    let area = fill_area(&curves, &FillOptions::DEFAULT);
    assert!(area < expected);
    assert!((area - expected).abs() / expected < 0.01);
}

#[test]
fn closed_spline_fill() {
    let blob = SplineStroke::with_constant_half_width(
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)],
        1.0,
        true,
    );

    let area = fill_area(&blob, &FillOptions::DEFAULT);
    // The spline goes through the corners of the square and bulges out in between.
    assert!(area > 100.0);
    assert!(area < std::f64::consts::PI * 50.0);
}

#[test]
fn open_curves_are_ignored() {
    let mut curves = Curves2d::new();
    curves.move_to(point(0.0, 0.0));
    curves.line_to(point(10.0, 0.0));
    curves.line_to(point(10.0, 10.0));

    let mut visitor = FillVisitor::new(&SamplingParameters::DEFAULT);
    curves.visit(&mut visitor);
    assert!(visitor.contours().is_empty());
}
