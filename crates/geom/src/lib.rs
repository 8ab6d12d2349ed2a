#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

//! Geometry of variable-width spline strokes.
//!
//! This crate is reexported in [vstroke](https://docs.rs/vstroke/).
//!
//! # Overview
//!
//! A stroke is authored as a sequence of *knots*: positions with a half-width each.
//! This crate turns knots into continuous geometry:
//!
//! - [`SplineStroke`] stores the knots and their derived chord lengths,
//! - a [`SplineBasis`] (uniform or centripetal Catmull-Rom, or Yuksel) converts each
//!   window of four knots into a cubic bézier centerline,
//! - the half-width gets its own one-dimensional cubic bézier ([`WidthBezier`]),
//! - [`SplineSegment`] evaluates positions, derivatives and half-widths at any
//!   parameter `u` in `[0, 1]`,
//! - [`sample_adaptive`](sampling::sample_adaptive) turns any such evaluator into
//!   a finite sequence of samples, denser where the curve turns.
//!
//! Plain curves (lines, quadratic and cubic béziers, elliptical arcs) can be described
//! with the [`Curves2d`] command stream. Both curve sources are traversed through the
//! same [`CurveVisitor`] interface, one [`CurveSegment`] at a time.
//!
//! # Example
//!
//! ```
//! use vstroke_geom::math::point;
//! use vstroke_geom::{SplineBasis, SplineStroke, StrokeSample, SamplingParameters};
//!
//! let spline = SplineStroke::with_constant_half_width(
//!     vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)],
//!     1.0,
//!     false,
//! ).with_basis(SplineBasis::CentripetalCatmullRom);
//!
//! assert_eq!(spline.num_segments(), 2);
//!
//! let mut samples: Vec<StrokeSample> = Vec::new();
//! spline.sample_centerline(&SamplingParameters::DEFAULT, &mut samples);
//! assert_eq!(samples.first().unwrap().position, point(0.0, 0.0));
//! assert_eq!(samples.last().unwrap().position, point(10.0, 10.0));
//! ```

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

// Reexport dependencies.
pub use lyon_geom;
pub use lyon_geom::euclid;

pub mod basis;
mod catmull_rom;
pub mod curve;
pub mod curves2d;
pub mod halfwidth;
pub mod sample;
pub mod sampling;
pub mod segment;
pub mod spline;
pub mod utils;
mod yuksel;

#[doc(inline)]
pub use crate::basis::{SegmentType, SplineBasis};
#[doc(inline)]
pub use crate::curve::{CurvePoint, CurveSegment, CurveSource, CurveVisitor};
#[doc(inline)]
pub use crate::curves2d::{CurveCommand, Curves2d};
#[doc(inline)]
pub use crate::halfwidth::WidthBezier;
#[doc(inline)]
pub use crate::sample::StrokeSample;
#[doc(inline)]
pub use crate::sampling::{SampleStart, SamplingParameters, SamplingQuality};
#[doc(inline)]
pub use crate::segment::{SegmentEnd, SplineSegment};
#[doc(inline)]
pub use crate::spline::{HalfWidths, KnotWindow, SplineStroke};

pub use lyon_geom::{Arc, ArcFlags, CubicBezierSegment, LineSegment, QuadraticBezierSegment, SvgArc};

/// Double precision aliases of the euclid types used throughout the stroke engine.
pub mod math {
    pub type Point = lyon_geom::Point<f64>;
    pub type Vector = lyon_geom::Vector<f64>;
    pub type Box2D = lyon_geom::Box2D<f64>;
    pub type Angle = lyon_geom::Angle<f64>;

    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }
}
