use crate::aabb::bounding_box;
use crate::distance::{distance_to_curve, DistanceToCurve};
use crate::geom::{SamplingParameters, SplineStroke, StrokeSample};
use crate::hit_test::contour_winding_number;
use crate::math::{Box2D, Point};

/// The centerline samples of a curve along with their bounding box.
///
/// This is the representation handed to code that reasons about the topology of
/// a drawing: it only needs the sample positions, the bounding box to cull
/// queries quickly and the distance to the curve.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledCurve {
    samples: Vec<StrokeSample>,
    positions: Vec<Point>,
    bounding_box: Box2D,
}

impl SampledCurve {
    pub fn new(samples: Vec<StrokeSample>) -> Self {
        let positions: Vec<Point> = samples.iter().map(|s| s.position).collect();
        let bounding_box = bounding_box(positions.iter().copied());

        SampledCurve {
            samples,
            positions,
            bounding_box,
        }
    }

    /// Samples the centerline of a spline stroke.
    pub fn from_spline(spline: &SplineStroke, params: &SamplingParameters) -> Self {
        let mut samples = Vec::new();
        spline.sample_centerline(params, &mut samples);

        Self::new(samples)
    }

    #[inline]
    pub fn samples(&self) -> &[StrokeSample] {
        &self.samples
    }

    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    #[inline]
    pub fn bounding_box(&self) -> &Box2D {
        &self.bounding_box
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn distance_to(&self, point: Point) -> Option<DistanceToCurve> {
        distance_to_curve(&self.positions, point)
    }

    /// Winding number of `point` with respect to the samples, considered as a
    /// closed polygon.
    pub fn winding_number(&self, point: Point) -> i32 {
        if !self.bounding_box.contains(point) {
            return 0;
        }

        contour_winding_number(point, &self.positions)
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn sampled_spline() {
    let spline = SplineStroke::with_constant_half_width(
        vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)],
        1.0,
        true,
    );
    let curve = SampledCurve::from_spline(&spline, &SamplingParameters::DEFAULT);

    assert!(!curve.is_empty());
    assert_eq!(curve.samples().len(), curve.positions().len());
    assert!(curve.bounding_box().contains(point(5.0, 5.0)));
    assert_eq!(curve.winding_number(point(5.0, 5.0)), 1);
    assert_eq!(curve.winding_number(point(50.0, 5.0)), 0);

    let hit = curve.distance_to(point(5.0, 5.0)).unwrap();
    assert!(hit.distance > 4.0);
}

#[test]
fn empty_curve() {
    let curve = SampledCurve::new(Vec::new());
    assert!(curve.is_empty());
    assert_eq!(*curve.bounding_box(), Box2D::zero());
    assert_eq!(curve.distance_to(point(1.0, 1.0)), None);
    assert_eq!(curve.winding_number(point(0.0, 0.0)), 0);
}
