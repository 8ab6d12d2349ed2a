#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]

//! Tessellation of variable-width strokes and fills.
//!
//! This crate is reexported in [vstroke](https://docs.rs/vstroke/).
//!
//! ## Overview
//!
//! The most interesting types of this crate are:
//!
//! * [StrokeTessellator](struct.StrokeTessellator.html) - Turns the offset lines of
//!   a curve into triangles.
//! * [FillTessellator](struct.FillTessellator.html) - Turns the centerline of the
//!   closed subpaths of a curve into triangles.
//! * [StrokeVisitor](struct.StrokeVisitor.html) and [FillVisitor](struct.FillVisitor.html),
//!   which walk a [`CurveSource`](vstroke_geom::CurveSource) and build the polygons
//!   handed to the tessellators.
//!
//! Both tessellators accept any curve source: [spline strokes](vstroke_geom::SplineStroke)
//! or [command streams](vstroke_geom::Curves2d) of lines, béziers and arcs.
//!
//! ## The tessellation pipeline
//!
//! Curves are adaptively sampled segment by segment, which produces closed
//! polygons (the *contours*). The contours are then triangulated by the
//! [lyon_tessellation](https://docs.rs/lyon_tessellation/) fill tessellator.
//!
//! Strokes are always filled with the non-zero winding rule: an open subpath
//! becomes a single contour going forward along one offset line and backward along
//! the other, with caps in between. A closed subpath becomes two loops of opposite
//! orientations, so that a closed ring tessellates into an annulus.
//!
//! ## Output
//!
//! The tessellators append triangles to a flat `Vec<f32>`, two floats per vertex
//! and three vertices per triangle, ready to be uploaded as a vertex buffer and
//! drawn without indices.
//!
//! ## Examples
//!
//! ```
//! use vstroke_tessellation::{StrokeOptions, StrokeTessellator, LineCap};
//! use vstroke_tessellation::geom::SplineStroke;
//! use vstroke_tessellation::math::point;
//!
//! let spline = SplineStroke::with_constant_half_width(
//!     vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
//!     1.0,
//!     false,
//! );
//!
//! let mut vertices: Vec<f32> = Vec::new();
//! let mut tessellator = StrokeTessellator::new();
//! tessellator.tessellate(
//!     &spline,
//!     &StrokeOptions::DEFAULT.with_line_cap(LineCap::Round),
//!     &mut vertices,
//! ).unwrap();
//!
//! assert!(!vertices.is_empty());
//! assert_eq!(vertices.len() % 6, 0);
//! ```

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub extern crate vstroke_algorithms as algorithms;
pub extern crate vstroke_geom as geom;

mod error;
mod fill;
mod stroke;
mod tessellator;

pub use crate::geom::math;

#[doc(inline)]
pub use crate::error::*;

#[doc(inline)]
pub use crate::fill::*;

#[doc(inline)]
pub use crate::stroke::*;

pub use crate::algorithms::WindingRule;
pub use crate::geom::{SampleStart, SamplingParameters, SamplingQuality};

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke for each sub-path does not extend beyond its two endpoints.
    Butt,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a rectangle with the same width as the stroke.
    Square,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a half circle with a diameter equal to the stroke width.
    Round,
}

/// Parameters for the stroke tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeOptions {
    /// What cap to use at the start of each open sub-path.
    ///
    /// Default value: `LineCap::Butt`.
    pub start_cap: LineCap,

    /// What cap to use at the end of each open sub-path.
    ///
    /// Default value: `LineCap::Butt`.
    pub end_cap: LineCap,

    /// Half of the line width, for the segments that don't carry their own
    /// half-width (everything except spline segments).
    ///
    /// Default value: `StrokeOptions::DEFAULT_HALF_WIDTH`.
    pub half_width: f64,

    /// Sampling of the offset lines and of the round caps.
    ///
    /// Default value: `SamplingParameters::DEFAULT`.
    pub sampling: SamplingParameters,
}

impl StrokeOptions {
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    pub const DEFAULT_HALF_WIDTH: f64 = 0.5;

    pub const DEFAULT: Self = StrokeOptions {
        start_cap: Self::DEFAULT_LINE_CAP,
        end_cap: Self::DEFAULT_LINE_CAP,
        half_width: Self::DEFAULT_HALF_WIDTH,
        sampling: SamplingParameters::DEFAULT,
    };

    #[inline]
    pub fn half_width(half_width: f64) -> Self {
        Self::DEFAULT.with_half_width(half_width)
    }

    #[inline]
    pub const fn with_half_width(mut self, half_width: f64) -> Self {
        self.half_width = half_width;
        self
    }

    #[inline]
    pub const fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.start_cap = cap;
        self.end_cap = cap;
        self
    }

    #[inline]
    pub const fn with_start_cap(mut self, cap: LineCap) -> Self {
        self.start_cap = cap;
        self
    }

    #[inline]
    pub const fn with_end_cap(mut self, cap: LineCap) -> Self {
        self.end_cap = cap;
        self
    }

    #[inline]
    pub const fn with_sampling(mut self, sampling: SamplingParameters) -> Self {
        self.sampling = sampling;
        self
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters for the fill tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FillOptions {
    /// The winding rule deciding which regions of the closed subpaths are filled.
    ///
    /// Default value: `WindingRule::NonZero`.
    pub winding_rule: WindingRule,

    /// Sampling of the centerline.
    ///
    /// Default value: `SamplingParameters::DEFAULT`.
    pub sampling: SamplingParameters,
}

impl FillOptions {
    pub const DEFAULT_WINDING_RULE: WindingRule = WindingRule::NonZero;

    pub const DEFAULT: Self = FillOptions {
        winding_rule: Self::DEFAULT_WINDING_RULE,
        sampling: SamplingParameters::DEFAULT,
    };

    #[inline]
    pub fn odd() -> Self {
        Self::DEFAULT.with_winding_rule(WindingRule::Odd)
    }

    #[inline]
    pub fn non_zero() -> Self {
        Self::DEFAULT.with_winding_rule(WindingRule::NonZero)
    }

    #[inline]
    pub const fn with_winding_rule(mut self, winding_rule: WindingRule) -> Self {
        self.winding_rule = winding_rule;
        self
    }

    #[inline]
    pub const fn with_sampling(mut self, sampling: SamplingParameters) -> Self {
        self.sampling = sampling;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn options_builders() {
    let stroke = StrokeOptions::half_width(2.0).with_start_cap(LineCap::Round);
    assert_eq!(stroke.half_width, 2.0);
    assert_eq!(stroke.start_cap, LineCap::Round);
    assert_eq!(stroke.end_cap, LineCap::Butt);
    assert_eq!(StrokeOptions::default(), StrokeOptions::DEFAULT);

    let fill = FillOptions::odd().with_sampling(SamplingParameters::with_quality(SamplingQuality::High));
    assert_eq!(fill.winding_rule, WindingRule::Odd);
    assert_eq!(fill.sampling.max_samples, 256);
    assert_eq!(FillOptions::default().winding_rule, WindingRule::NonZero);
}
