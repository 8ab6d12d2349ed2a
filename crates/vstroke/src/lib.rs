#![deny(bare_trait_objects)]

//! Variable-width spline strokes in Rust.
//!
//! # Crates
//!
//! This meta-crate (`vstroke`) reexports the following sub-crates for convenience:
//!
//! * **vstroke_geom** - Knots, spline bases, half-width curves, adaptive sampling
//!   and the curve visitor shared by everything else.
//! * **vstroke_algorithms** - Winding numbers, hit testing, distance queries and
//!   bounding boxes on sampled curves.
//! * **vstroke_tessellation** - Stroke and fill tessellation into flat triangle lists.
//!
//! Each `vstroke_<name>` crate is reexported as a `<name>` module in `vstroke`. For example:
//!
//! ```ignore
//! use vstroke_tessellation::StrokeTessellator;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! use vstroke::tessellation::StrokeTessellator;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Stroking a spline
//!
//! ```
//! use vstroke::geom::{SplineBasis, SplineStroke};
//! use vstroke::math::point;
//! use vstroke::tessellation::{LineCap, StrokeOptions, StrokeTessellator};
//!
//! // One half-width per knot.
//! let spline = SplineStroke::new(
//!     vec![point(0.0, 0.0), point(40.0, 10.0), point(80.0, 0.0), point(120.0, 30.0)],
//!     vec![1.0, 4.0, 2.0, 0.5],
//!     false,
//! ).with_basis(SplineBasis::Yuksel);
//!
//! // Two floats per vertex, three vertices per triangle.
//! let mut vertices: Vec<f32> = Vec::new();
//! StrokeTessellator::new().tessellate(
//!     &spline,
//!     &StrokeOptions::DEFAULT.with_line_cap(LineCap::Round),
//!     &mut vertices,
//! ).unwrap();
//!
//! println!(" -- {} triangles", vertices.len() / 6);
//! ```
//!
//! ## Picking
//!
//! ```
//! use vstroke::algorithms::{SampledCurve, WindingRule};
//! use vstroke::geom::{SamplingParameters, SplineStroke};
//! use vstroke::math::point;
//!
//! let ring = SplineStroke::with_constant_half_width(
//!     vec![point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), point(0.0, 10.0)],
//!     1.0,
//!     true,
//! );
//!
//! let sampled = SampledCurve::from_spline(&ring, &SamplingParameters::DEFAULT);
//! assert!(WindingRule::NonZero.is_in(sampled.winding_number(point(5.0, 5.0))));
//!
//! // The spline bulges out between the knots.
//! let hit = sampled.distance_to(point(5.0, -5.0)).unwrap();
//! assert!(hit.distance > 3.0 && hit.distance < 5.0);
//! ```

pub extern crate vstroke_algorithms;
pub extern crate vstroke_tessellation;

pub use vstroke_algorithms as algorithms;
pub use vstroke_tessellation as tessellation;
pub use tessellation::geom;

pub use geom::math;
