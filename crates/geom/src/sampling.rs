//! Adaptive sampling of parametric curves.
//!
//! A curve is described by an evaluation function over `[0, 1]`. Sampling starts
//! with both endpoints and repeatedly bisects the intervals for which a *keep*
//! predicate decides that the midpoint carries information, until the predicate
//! is satisfied everywhere or the sample budget of the curve is exhausted.
//!
//! Refinement proceeds level by level: all intervals of a given depth are
//! considered before any interval of the next depth, so that when the budget runs
//! out the samples are spread along the whole curve rather than piled up at its
//! start.
//!
//! The predicate only looks at three points, so it can be fooled: a symmetric
//! cubic with an inflection point in its middle has its midpoint exactly on the
//! chord. A minimum sample count forces the first few levels of bisection to
//! reduce the odds of stopping too early: with the default of three, the curve
//! is always evaluated at `u = 0.25`, `0.5` and `0.75`. This is an accepted
//! approximation.

use crate::math::Point;

/// Parameters of the adaptive sampler.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct SamplingParameters {
    /// Maximum angle in radians between two consecutive sub-chords before the
    /// interval is subdivided.
    ///
    /// Default value: `SamplingParameters::DEFAULT_MAX_ANGLE`.
    pub max_angle: f64,

    /// Sub-chords shorter than this distance are not subdivided further.
    ///
    /// Default value: `SamplingParameters::DEFAULT_MIN_DISTANCE`.
    pub min_distance: f64,

    /// Minimum number of samples strictly between the endpoints of a segment.
    ///
    /// Whole bisection levels are forced until at least this many interior
    /// samples exist, so the value is rounded up to the next `2^k - 1`.
    ///
    /// Default value: `SamplingParameters::DEFAULT_MIN_SAMPLES`.
    pub min_samples: u32,

    /// Maximum number of samples per segment, including both endpoints.
    ///
    /// Takes precedence over `min_samples`.
    ///
    /// Default value: `SamplingParameters::DEFAULT_MAX_SAMPLES`.
    pub max_samples: u32,
}

impl SamplingParameters {
    pub const DEFAULT_MAX_ANGLE: f64 = 0.05;
    pub const DEFAULT_MIN_DISTANCE: f64 = 1.0;
    pub const DEFAULT_MIN_SAMPLES: u32 = 3;
    pub const DEFAULT_MAX_SAMPLES: u32 = 64;

    pub const DEFAULT: Self = SamplingParameters {
        max_angle: Self::DEFAULT_MAX_ANGLE,
        min_distance: Self::DEFAULT_MIN_DISTANCE,
        min_samples: Self::DEFAULT_MIN_SAMPLES,
        max_samples: Self::DEFAULT_MAX_SAMPLES,
    };

    #[inline]
    pub const fn with_max_angle(mut self, max_angle: f64) -> Self {
        self.max_angle = max_angle;
        self
    }

    #[inline]
    pub const fn with_min_distance(mut self, min_distance: f64) -> Self {
        self.min_distance = min_distance;
        self
    }

    #[inline]
    pub const fn with_min_samples(mut self, min_samples: u32) -> Self {
        self.min_samples = min_samples;
        self
    }

    #[inline]
    pub const fn with_max_samples(mut self, max_samples: u32) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub const fn with_quality(quality: SamplingQuality) -> Self {
        match quality {
            SamplingQuality::Low => SamplingParameters {
                max_angle: 0.2,
                min_distance: 2.0,
                min_samples: 3,
                max_samples: 16,
            },
            SamplingQuality::Medium => Self::DEFAULT,
            SamplingQuality::High => SamplingParameters {
                max_angle: 0.01,
                min_distance: 0.25,
                min_samples: 5,
                max_samples: 256,
            },
        }
    }

    /// The effective bounds of one segment: the minimum number of interior
    /// samples and the maximum number of samples including both endpoints.
    pub fn sample_count_bounds(&self) -> (usize, usize) {
        let max = (self.max_samples as usize).max(2);
        let min = (self.min_samples as usize).min(max - 2);

        (min, max)
    }

    /// The default keep predicate: returns true if `mid` must be kept between `from`
    /// and `to`, in which case both sub-intervals get refined further.
    ///
    /// The midpoint is dropped when both sub-chords are shorter than `min_distance`,
    /// when one of them has no length, or when they turn by less than `max_angle`.
    pub fn should_keep(&self, from: Point, mid: Point, to: Point) -> bool {
        let v0 = mid - from;
        let v1 = to - mid;
        let l0 = v0.length();
        let l1 = v1.length();

        if l0 < self.min_distance && l1 < self.min_distance {
            return false;
        }

        if l0 == 0.0 || l1 == 0.0 {
            return false;
        }

        let angle = v0.cross(v1).atan2(v0.dot(v1)).abs();

        angle >= self.max_angle
    }
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<SamplingQuality> for SamplingParameters {
    fn from(quality: SamplingQuality) -> Self {
        Self::with_quality(quality)
    }
}

/// Sampling presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SamplingQuality {
    Low,
    Medium,
    High,
}

impl Default for SamplingQuality {
    fn default() -> Self {
        SamplingQuality::Medium
    }
}

/// Whether the sample at `u = 0` is emitted.
///
/// When sampling consecutive segments of a curve, the start of a segment is the
/// end of the previous one, so callers skip it to avoid duplicates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SampleStart {
    Include,
    Skip,
}

struct Node<T> {
    u: f64,
    value: T,
    // Whether the interval between this node and the next one gets bisected at the
    // next level.
    refine: bool,
}

/// Samples `evaluate` over `[0, 1]` and appends the samples to `output` in strictly
/// increasing order of `u`.
///
/// `keep(from, mid, to)` decides whether the midpoint of an interval is kept.
/// Every interval of a level is bisected unconditionally while there are fewer
/// than `min_samples` interior samples. At most `max_samples` samples are
/// produced (one less if the first one is skipped). Nothing that was already in `output` is modified.
pub fn sample_adaptive<T, Eval, Keep>(
    params: &SamplingParameters,
    mut evaluate: Eval,
    mut keep: Keep,
    start: SampleStart,
    output: &mut Vec<T>,
) where
    Eval: FnMut(f64) -> T,
    Keep: FnMut(&T, &T, &T) -> bool,
{
    let (min_interior, max_samples) = params.sample_count_bounds();

    let mut nodes = vec![
        Node { u: 0.0, value: evaluate(0.0), refine: true },
        Node { u: 1.0, value: evaluate(1.0), refine: false },
    ];
    let mut budget = max_samples - 2;

    while budget > 0 && nodes.iter().any(|node| node.refine) {
        let forced = nodes.len() - 2 < min_interior;
        let mut next_level = Vec::with_capacity(nodes.len() * 2);
        let mut iter = nodes.into_iter().peekable();

        while let Some(mut node) = iter.next() {
            let mut split = None;
            if node.refine && budget > 0 {
                if let Some(end) = iter.peek() {
                    let u = (node.u + end.u) * 0.5;
                    if u > node.u && u < end.u {
                        let value = evaluate(u);
                        let kept = forced || keep(&node.value, &value, &end.value);
                        if kept {
                            budget -= 1;
                            split = Some(Node { u, value, refine: true });
                        }
                    }
                }
            }

            node.refine = split.is_some();
            next_level.push(node);
            if let Some(mid) = split {
                next_level.push(mid);
            }
        }

        nodes = next_level;
    }

    let skip = match start {
        SampleStart::Include => 0,
        SampleStart::Skip => 1,
    };
    output.extend(nodes.into_iter().skip(skip).map(|node| node.value));
}

/// Samples the positions of a curve with the default keep predicate.
pub fn sample_positions<Eval>(
    params: &SamplingParameters,
    evaluate: Eval,
    start: SampleStart,
    output: &mut Vec<Point>,
) where
    Eval: FnMut(f64) -> Point,
{
    sample_adaptive(
        params,
        evaluate,
        |a, m, b| params.should_keep(*a, *m, *b),
        start,
        output,
    );
}

#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::CubicBezierSegment;

#[test]
fn straight_lines_get_the_minimum() {
    let mut out = Vec::new();
    sample_positions(
        &SamplingParameters::DEFAULT,
        |u| point(u * 100.0, 0.0),
        SampleStart::Include,
        &mut out,
    );

    assert_eq!(
        out,
        vec![point(0.0, 0.0), point(25.0, 0.0), point(50.0, 0.0), point(75.0, 0.0), point(100.0, 0.0)]
    );
}

#[test]
fn parameters_are_strictly_increasing_and_bounded() {
    let params = SamplingParameters::DEFAULT.with_max_samples(20).with_max_angle(0.001).with_min_distance(0.0);
    let mut out = Vec::new();
    sample_adaptive(
        &params,
        |u| (u, point((u * 20.0).cos() * 50.0, (u * 20.0).sin() * 50.0)),
        |a, m, b| params.should_keep(a.1, m.1, b.1),
        SampleStart::Include,
        &mut out,
    );

    assert_eq!(out.len(), 20);
    assert_eq!(out.first().map(|s| s.0), Some(0.0));
    assert_eq!(out.last().map(|s| s.0), Some(1.0));
    for pair in out.windows(2) {
        assert!(pair[0].0 < pair[1].0);
    }
}

#[test]
fn max_samples_wins_over_min_samples() {
    let params = SamplingParameters::DEFAULT.with_min_samples(10).with_max_samples(4);
    let mut out = Vec::new();
    sample_positions(&params, |u| point(u, 0.0), SampleStart::Include, &mut out);
    assert_eq!(out.len(), 4);

    let params = SamplingParameters::DEFAULT.with_min_samples(0).with_max_samples(0);
    out.clear();
    sample_positions(&params, |u| point(u, 0.0), SampleStart::Include, &mut out);
    assert_eq!(out, vec![point(0.0, 0.0), point(1.0, 0.0)]);
}

#[test]
fn minimum_is_spread_level_by_level() {
    let mut out = Vec::new();
    sample_adaptive(&SamplingParameters::DEFAULT, |u| u, |_, _, _| false, SampleStart::Include, &mut out);
    assert_eq!(out, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

    // Rounded up to a whole level.
    out.clear();
    let params = SamplingParameters::DEFAULT.with_min_samples(4);
    sample_adaptive(&params, |u| u, |_, _, _| false, SampleStart::Include, &mut out);
    assert_eq!(out, vec![0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0]);

    out.clear();
    let params = SamplingParameters::DEFAULT.with_min_samples(1);
    sample_adaptive(&params, |u| u, |_, _, _| false, SampleStart::Include, &mut out);
    assert_eq!(out, vec![0.0, 0.5, 1.0]);

    out.clear();
    let params = SamplingParameters::DEFAULT.with_min_samples(0);
    sample_adaptive(&params, |u| u, |_, _, _| false, SampleStart::Include, &mut out);
    assert_eq!(out, vec![0.0, 1.0]);
}

#[test]
fn budget_cuts_the_forced_levels() {
    let params = SamplingParameters::DEFAULT.with_min_samples(7).with_max_samples(6);
    let mut evaluated = Vec::new();
    let mut out = Vec::new();
    sample_adaptive(
        &params,
        |u| {
            evaluated.push(u);
            u
        },
        |_, _, _| false,
        SampleStart::Include,
        &mut out,
    );

    assert_eq!(params.sample_count_bounds(), (4, 6));
    // The third level is cut after its first interval.
    assert_eq!(out, vec![0.0, 0.125, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(evaluated.len(), 6);
}

#[test]
fn skipping_the_start() {
    let mut out = vec![point(-1.0, -1.0)];
    sample_positions(
        &SamplingParameters::DEFAULT,
        |u| point(u * 10.0, 0.0),
        SampleStart::Skip,
        &mut out,
    );

    // Existing content is preserved.
    assert_eq!(
        out,
        vec![point(-1.0, -1.0), point(2.5, 0.0), point(5.0, 0.0), point(7.5, 0.0), point(10.0, 0.0)]
    );
}

#[test]
fn sampling_is_deterministic() {
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(100.0, 200.0),
        ctrl2: point(200.0, -150.0),
        to: point(300.0, 10.0),
    };

    let mut a = Vec::new();
    let mut b = Vec::new();
    sample_positions(&SamplingParameters::DEFAULT, |u| curve.sample(u), SampleStart::Include, &mut a);
    sample_positions(&SamplingParameters::DEFAULT, |u| curve.sample(u), SampleStart::Include, &mut b);

    assert!(a.len() > 3);
    assert_eq!(a, b);
}

#[test]
fn symmetric_inflection_is_refined() {
    // Inflection point in the middle: the midpoint is on the chord, but the
    // forced levels expose the curvature of both halves.
    let curve = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(100.0, 100.0),
        ctrl2: point(0.0, 100.0),
        to: point(100.0, 200.0),
    };
    let mid = curve.sample(0.5);
    assert!((mid - point(50.0, 100.0)).length() < 1e-9);

    let mut out = Vec::new();
    sample_positions(&SamplingParameters::DEFAULT, |u| curve.sample(u), SampleStart::Include, &mut out);
    assert!(out.len() > 5);
}

#[test]
fn short_curves_are_not_refined() {
    let params = SamplingParameters::DEFAULT.with_min_distance(10.0);
    let mut out = Vec::new();
    sample_positions(
        &params,
        |u| point((u * 3.0).cos(), (u * 3.0).sin()),
        SampleStart::Include,
        &mut out,
    );

    // Only the forced levels.
    assert_eq!(out.len(), 5);
}

#[test]
fn quality_presets() {
    assert_eq!(SamplingParameters::from(SamplingQuality::Medium), SamplingParameters::DEFAULT);
    let low = SamplingParameters::with_quality(SamplingQuality::Low);
    let high = SamplingParameters::with_quality(SamplingQuality::High);
    assert!(low.max_samples < high.max_samples);
    assert!(low.max_angle > high.max_angle);
}
