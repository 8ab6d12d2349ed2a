use vstroke::geom::{SplineBasis, SplineStroke};
use vstroke::math::{point, Point};

pub static BASES: [SplineBasis; 3] = [
    SplineBasis::UniformCatmullRom,
    SplineBasis::CentripetalCatmullRom,
    SplineBasis::Yuksel,
];

/// An open stroke going back and forth around the x axis, with varying widths.
pub fn wavy_stroke(num_knots: usize, basis: SplineBasis) -> SplineStroke {
    let positions = (0..num_knots)
        .map(|i| {
            let i = i as f64;
            point(i * 10.0, (i * 0.9).sin() * 5.0)
        })
        .collect();
    let half_widths = (0..num_knots)
        .map(|i| 1.0 + (i as f64).cos() * 0.5)
        .collect();

    SplineStroke::new(positions, half_widths, false).with_basis(basis)
}

/// Knots evenly distributed on a counter-clockwise circle.
pub fn circle_knots(num_knots: usize, radius: f64) -> Vec<Point> {
    (0..num_knots)
        .map(|i| {
            let a = i as f64 * 2.0 * std::f64::consts::PI / num_knots as f64;
            point(radius * a.cos(), radius * a.sin())
        })
        .collect()
}

/// A closed ring of constant half-width.
pub fn ring(num_knots: usize, radius: f64, half_width: f64, basis: SplineBasis) -> SplineStroke {
    SplineStroke::with_constant_half_width(circle_knots(num_knots, radius), half_width, true).with_basis(basis)
}

#[cfg(test)]
use vstroke::algorithms::area::triangles_area;
#[cfg(test)]
use vstroke::algorithms::hit_test::hit_test_contours;
#[cfg(test)]
use vstroke::algorithms::{SampledCurve, WindingRule};
#[cfg(test)]
use vstroke::geom::{CurveSource, SamplingParameters, SamplingQuality, SegmentType, StrokeSample};
#[cfg(test)]
use vstroke::math::vector;
#[cfg(test)]
use vstroke::tessellation::{FillOptions, FillTessellator, LineCap, StrokeOptions, StrokeTessellator, StrokeVisitor};

#[test]
fn segment_continuity() {
    for basis in BASES {
        let spline = wavy_stroke(8, basis);
        assert_eq!(spline.num_segments(), 7);

        for i in 0..spline.num_segments() - 1 {
            let a = spline.segment(i);
            let b = spline.segment(i + 1);

            assert_eq!(a.to(), b.from());
            assert_eq!(a.position(1.0), spline.positions()[i + 1]);
            assert_eq!(a.half_width(1.0), b.half_width(0.0));

            let ta = a.tangent(1.0);
            let tb = b.tangent(0.0);
            assert!((ta - tb).length() < 1e-6, "{:?}: {:?} {:?} at knot {}", basis, ta, tb, i + 1);
        }
    }
}

#[test]
fn corner_exactness() {
    let corner = point(10.0, 0.0);
    for basis in BASES {
        let spline = SplineStroke::with_constant_half_width(
            vec![point(0.0, 0.0), corner, corner, point(10.0, 10.0)],
            1.0,
            false,
        )
        .with_basis(basis);

        assert_eq!(spline.num_segments(), 3);
        assert_eq!(spline.segment(1).segment_type, SegmentType::Corner);
        assert!(spline.segment(1).is_zero_length());

        assert_eq!(spline.segment(0).to(), corner);
        assert_eq!(spline.segment(2).from(), corner);

        // A sharp turn, no smoothing across the duplicated knot.
        assert!((spline.segment(0).tangent(1.0) - vector(1.0, 0.0)).length() < 1e-9);
        assert!((spline.segment(2).tangent(0.0) - vector(0.0, 1.0)).length() < 1e-9);

        let mut samples = Vec::new();
        spline.sample_centerline(&SamplingParameters::DEFAULT, &mut samples);
        assert_eq!(samples.iter().filter(|s| s.position == corner).count(), 1);
    }
}

#[test]
fn sampler_ordering_and_budget() {
    let params = SamplingParameters::DEFAULT.with_max_samples(9).with_max_angle(0.001);
    for basis in BASES {
        let spline = wavy_stroke(6, basis);
        let mut samples: Vec<StrokeSample> = Vec::new();
        spline.sample_centerline(&params, &mut samples);

        for pair in samples.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.segment_index <= b.segment_index);
            if a.segment_index == b.segment_index {
                assert!(a.u < b.u);
            }
        }

        for segment in 0..spline.num_segments() {
            let count = samples.iter().filter(|s| s.segment_index == segment).count();
            assert!(count >= 2);
            assert!(count <= 9);
        }
    }
}

#[test]
fn sampling_is_idempotent() {
    let spline = wavy_stroke(10, SplineBasis::Yuksel);
    let params = SamplingParameters::with_quality(SamplingQuality::High);

    let mut first = Vec::new();
    let mut second = Vec::new();
    spline.sample_centerline(&params, &mut first);
    spline.sample_centerline(&params, &mut second);

    assert_eq!(first, second);
}

#[test]
fn sampling_quality() {
    let ring = ring(8, 100.0, 1.0, SplineBasis::DEFAULT);
    let count = |quality| SampledCurve::from_spline(&ring, &SamplingParameters::with_quality(quality)).samples().len();

    let low = count(SamplingQuality::Low);
    let medium = count(SamplingQuality::Medium);
    let high = count(SamplingQuality::High);
    assert!(low <= medium);
    assert!(medium <= high);
    assert!(low < high);
}

#[test]
fn closed_ring() {
    let radius = 50.0;
    let w = 4.0;
    let options = StrokeOptions::DEFAULT.with_sampling(SamplingParameters::DEFAULT.with_max_angle(0.01));

    for basis in BASES {
        let ring = ring(24, radius, w, basis);

        let mut visitor = StrokeVisitor::new(&options);
        ring.visit(&mut visitor);
        assert_eq!(visitor.contours().len(), 2);
        assert!(hit_test_contours(point(radius, 0.0), visitor.contours(), WindingRule::NonZero));
        assert!(!hit_test_contours(point(0.0, 0.0), visitor.contours(), WindingRule::NonZero));
        assert!(!hit_test_contours(point(radius + 2.0 * w, 0.0), visitor.contours(), WindingRule::NonZero));

        let mut vertices = Vec::new();
        StrokeTessellator::new().tessellate(&ring, &options, &mut vertices).unwrap();
        assert!(!vertices.is_empty());

        let expected = std::f64::consts::PI * ((radius + w).powi(2) - (radius - w).powi(2));
        let area = triangles_area(&vertices);
        assert!((area - expected).abs() / expected < 0.01, "{:?}: {} vs {}", basis, area, expected);
    }
}

#[test]
fn degenerate_input() {
    let options = StrokeOptions::DEFAULT.with_line_cap(LineCap::Round);
    let inputs = [
        SplineStroke::with_constant_half_width(vec![], 1.0, false),
        SplineStroke::with_constant_half_width(vec![], 1.0, true),
        SplineStroke::with_constant_half_width(vec![point(3.0, 4.0)], 1.0, false),
        SplineStroke::with_constant_half_width(vec![point(3.0, 4.0)], 1.0, true),
        SplineStroke::with_constant_half_width(vec![point(3.0, 4.0); 3], 1.0, false),
    ];

    for spline in &inputs {
        let mut vertices = Vec::new();
        StrokeTessellator::new().tessellate(spline, &options, &mut vertices).unwrap();
        FillTessellator::new().tessellate(spline, &FillOptions::DEFAULT, &mut vertices).unwrap();
        assert!(vertices.is_empty());

        let sampled = SampledCurve::from_spline(spline, &SamplingParameters::DEFAULT);
        if spline.num_knots() == 0 {
            assert!(sampled.is_empty());
            assert!(sampled.distance_to(point(0.0, 0.0)).is_none());
        } else {
            assert_eq!(sampled.samples().len(), 1);
            assert_eq!(sampled.samples()[0].position, point(3.0, 4.0));
            assert_eq!(sampled.samples()[0].tangent, vector(1.0, 0.0));
            assert_eq!(sampled.distance_to(point(3.0, 6.0)).map(|d| d.distance), Some(2.0));
        }
    }
}

#[test]
fn three_knot_scenario() {
    let spline = SplineStroke::with_constant_half_width(
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
        1.0,
        false,
    )
    .with_basis(SplineBasis::CentripetalCatmullRom);

    let sampling = SamplingParameters::DEFAULT
        .with_min_distance(1.0)
        .with_max_angle(0.05)
        .with_max_samples(64);
    let options = StrokeOptions::DEFAULT.with_sampling(sampling);

    let mut visitor = StrokeVisitor::new(&options);
    spline.visit(&mut visitor);

    assert_eq!(visitor.subpaths().len(), 1);
    let sub = &visitor.subpaths()[0];
    assert_eq!(sub.segments.len(), 2);
    assert_eq!(sub.segments[0].left.start, 0);
    assert_eq!(sub.segments[1].left.end, sub.left.len());
    assert_eq!(sub.segments[1].right.end, sub.right.len());

    for side in [&sub.left, &sub.right] {
        for pair in side.windows(2) {
            assert!((pair[1] - pair[0]).length() > 1e-6);
        }
    }

    // The open ends are mirrored around the middle knot, where the stroke turns
    // smoothly from the first chord to the second one.
    let middle = spline.segment(0).tangent(1.0);
    assert!((middle - vector(1.0, 1.0) / 2f64.sqrt()).length() < 1e-9);
    assert!(sub.first_sample().unwrap().tangent.x > 0.0);
    assert!(sub.last_sample().unwrap().tangent.y > 0.0);

    let mut vertices = Vec::new();
    StrokeTessellator::new().tessellate(&spline, &options, &mut vertices).unwrap();
    assert!(!vertices.is_empty());
    assert_eq!(vertices.len() % 6, 0);

    let mut fill = Vec::new();
    FillTessellator::new()
        .tessellate(&spline, &FillOptions::DEFAULT.with_sampling(sampling), &mut fill)
        .unwrap();
    assert!(fill.is_empty());
}

#[test]
fn variable_width_area() {
    // A straight stroke whose width grows linearly covers a trapezoid.
    let spline = SplineStroke::new(
        vec![point(0.0, 0.0), point(50.0, 0.0), point(100.0, 0.0)],
        vec![1.0, 2.0, 3.0],
        false,
    );

    let mut vertices = Vec::new();
    StrokeTessellator::new().tessellate(&spline, &StrokeOptions::DEFAULT, &mut vertices).unwrap();

    let expected = 100.0 * (2.0 + 6.0) * 0.5;
    assert!((triangles_area(&vertices) - expected).abs() < 1e-2);
}

#[test]
fn bases_are_scale_invariant() {
    let knots = [
        point(0.0, 0.0),
        point(1.0, 2.0),
        point(5.0, 1.0),
        point(6.0, 4.0),
        point(2.0, 5.0),
        point(2.5, 5.5),
    ];
    let params = [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];

    for basis in BASES {
        let reference = SplineStroke::with_constant_half_width(knots.to_vec(), 1.0, false).with_basis(basis);

        for scale in [1e-6, 1.0, 1e4] {
            let scaled = SplineStroke::with_constant_half_width(
                knots.iter().map(|p| (p.to_vector() * scale).to_point()).collect(),
                scale,
                false,
            )
            .with_basis(basis);

            for i in 0..reference.num_segments() {
                let (a, b) = (reference.segment(i), scaled.segment(i));
                for &u in &params {
                    let p = (b.position(u).to_vector() / scale).to_point();
                    assert!(
                        (p - a.position(u)).length() < 1e-9,
                        "{:?} at scale {}: segment {} u {}: {:?} vs {:?}",
                        basis, scale, i, u, p, a.position(u),
                    );
                    assert!((b.half_width(u) / scale - a.half_width(u)).abs() < 1e-9);
                    assert!((b.tangent(u) - a.tangent(u)).length() < 1e-9);
                }
            }
        }

        let offset = vector(-300.0, 120.0);
        let translated = SplineStroke::with_constant_half_width(knots.iter().map(|p| *p + offset).collect(), 1.0, false)
            .with_basis(basis);
        for i in 0..reference.num_segments() {
            for &u in &params {
                let p = translated.segment(i).position(u) - offset;
                assert!((p - reference.segment(i).position(u)).length() < 1e-9, "{:?} translated", basis);
            }
        }
    }
}

#[test]
fn default_sampling_evaluates_quarters() {
    for basis in BASES {
        let spline = SplineStroke::with_constant_half_width(vec![point(0.0, 0.0), point(100.0, 0.0)], 1.0, false)
            .with_basis(basis);
        assert_eq!(spline.num_segments(), 1);

        let mut samples = Vec::new();
        spline.sample_centerline(&SamplingParameters::DEFAULT, &mut samples);

        let u: Vec<f64> = samples.iter().map(|s| s.u).collect();
        assert_eq!(u, vec![0.0, 0.25, 0.5, 0.75, 1.0], "{:?}", basis);
        for s in &samples {
            assert!(s.position.y.abs() < 1e-9);
        }
    }
}
