#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Queries on sampled strokes.
//!
//! This crate is reexported in [vstroke](https://docs.rs/vstroke/).
//!
//! The tessellators turn curves into triangles, but editing tools also need to
//! reason about the sampled curves themselves: picking the curve closest to the
//! cursor, culling with bounding boxes, or computing which regions of a set of
//! contours are filled.
//!
//! # Example
//!
//! ```
//! use vstroke_algorithms::SampledCurve;
//! use vstroke_algorithms::geom::{SplineStroke, SamplingParameters};
//! use vstroke_algorithms::math::point;
//!
//! let spline = SplineStroke::with_constant_half_width(
//!     vec![point(0.0, 0.0), point(10.0, 0.0)],
//!     1.0,
//!     false,
//! );
//! let curve = SampledCurve::from_spline(&spline, &SamplingParameters::DEFAULT);
//!
//! let hit = curve.distance_to(point(5.0, 2.0)).unwrap();
//! assert!((hit.distance - 2.0).abs() < 1e-9);
//! ```

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub extern crate vstroke_geom as geom;

pub mod aabb;
pub mod area;
pub mod distance;
pub mod hit_test;
pub mod sampled;
pub mod winding;

pub use crate::geom::math;

#[doc(inline)]
pub use crate::distance::{distance_to_curve, DistanceToCurve};
#[doc(inline)]
pub use crate::sampled::SampledCurve;
#[doc(inline)]
pub use crate::winding::{Winding, WindingRule};
