//! Triangulation of sampled contours with lyon's fill tessellator.

use lyon_tessellation as tess;
use lyon_tessellation::geometry_builder::Positions;
use lyon_tessellation::{BuffersBuilder, VertexBuffers};

use crate::algorithms::hit_test::winding_number_at_position;
use crate::error::{TessellationResult, UnsupportedParameter};
use crate::math::{point, Point};
use crate::WindingRule;

/// Triangulates closed polygons and appends the triangles to `output`.
///
/// `output` is only modified if the tessellation succeeds.
pub(crate) fn tessellate_contours(
    tessellator: &mut tess::FillTessellator,
    contours: &[Vec<Point>],
    winding_rule: WindingRule,
    output: &mut Vec<f32>,
) -> TessellationResult {
    let has_nan = contours
        .iter()
        .flatten()
        .any(|p| p.x.is_nan() || p.y.is_nan());
    if has_nan {
        return Err(UnsupportedParameter::PositionIsNaN.into());
    }

    let mut builder = tess::path::Path::builder();
    let mut num_contours = 0;
    for contour in contours {
        if contour.len() < 3 {
            continue;
        }
        builder.begin(to_f32(contour[0]));
        for p in &contour[1..] {
            builder.line_to(to_f32(*p));
        }
        builder.end(true);
        num_contours += 1;
    }

    if num_contours == 0 {
        return Ok(());
    }

    let path = builder.build();

    let fill_rule = match winding_rule {
        WindingRule::Odd => tess::FillRule::EvenOdd,
        // The output triangles never cross an input edge, so the winding number
        // at a triangle's centroid holds for the whole triangle. Positive and
        // negative regions are separated after the fact.
        WindingRule::NonZero | WindingRule::Positive | WindingRule::Negative => tess::FillRule::NonZero,
    };

    let mut buffers: VertexBuffers<tess::math::Point, u32> = VertexBuffers::new();
    let result = tessellator.tessellate_path(
        &path,
        &tess::FillOptions::default().with_fill_rule(fill_rule),
        &mut BuffersBuilder::new(&mut buffers, Positions),
    );

    if let Err(e) = result {
        log::warn!("Failed to tessellate {} contours: {}", num_contours, e);
        return Err(e.into());
    }

    let filter_by_sign = matches!(winding_rule, WindingRule::Positive | WindingRule::Negative);
    let first = output.len();
    output.reserve(buffers.indices.len() * 2);
    for tri in buffers.indices.chunks_exact(3) {
        let a = buffers.vertices[tri[0] as usize];
        let b = buffers.vertices[tri[1] as usize];
        let c = buffers.vertices[tri[2] as usize];

        if filter_by_sign {
            let centroid = point(
                (a.x as f64 + b.x as f64 + c.x as f64) / 3.0,
                (a.y as f64 + b.y as f64 + c.y as f64) / 3.0,
            );
            if !winding_rule.is_in(winding_number_at_position(centroid, contours)) {
                continue;
            }
        }

        output.extend_from_slice(&[a.x, a.y, b.x, b.y, c.x, c.y]);
    }

    log::trace!(
        "Tessellated {} contours into {} triangles",
        num_contours,
        (output.len() - first) / 6
    );

    Ok(())
}

/// Returns true if two points are equal up to rounding errors.
#[inline]
pub(crate) fn coincident(a: Point, b: Point) -> bool {
    (a - b).square_length() <= 1e-18 * (1.0 + a.to_vector().square_length())
}

#[inline]
fn to_f32(p: Point) -> tess::math::Point {
    tess::math::point(p.x as f32, p.y as f32)
}

#[cfg(test)]
use crate::algorithms::area::{triangles_area, triangles_signed_area};
#[cfg(test)]
use crate::error::TessellationError;

#[cfg(test)]
fn square(x: f64, y: f64, size: f64, positive: bool) -> Vec<Point> {
    let mut p = vec![
        point(x, y),
        point(x + size, y),
        point(x + size, y + size),
        point(x, y + size),
    ];
    if !positive {
        p.reverse();
    }
    p
}

#[test]
fn nested_squares_winding_rules() {
    let mut tessellator = tess::FillTessellator::new();
    let same = vec![square(0.0, 0.0, 10.0, true), square(2.0, 2.0, 6.0, true)];
    let opposite = vec![square(0.0, 0.0, 10.0, true), square(2.0, 2.0, 6.0, false)];

    let mut area = |contours: &[Vec<Point>], rule: WindingRule| {
        let mut out = Vec::new();
        tessellate_contours(&mut tessellator, contours, rule, &mut out).unwrap();
        triangles_area(&out)
    };

    assert!((area(&same, WindingRule::NonZero) - 100.0).abs() < 1e-3);
    assert!((area(&same, WindingRule::Odd) - 64.0).abs() < 1e-3);
    assert!((area(&same, WindingRule::Positive) - 100.0).abs() < 1e-3);
    assert!(area(&same, WindingRule::Negative) < 1e-3);

    assert!((area(&opposite, WindingRule::NonZero) - 64.0).abs() < 1e-3);
    assert!((area(&opposite, WindingRule::Positive) - 64.0).abs() < 1e-3);
    assert!(area(&opposite, WindingRule::Negative) < 1e-3);

    let reversed = vec![square(0.0, 0.0, 10.0, false)];
    assert!((area(&reversed, WindingRule::Negative) - 100.0).abs() < 1e-3);
    assert!(area(&reversed, WindingRule::Positive) < 1e-3);
}

#[test]
fn output_is_appended() {
    let mut tessellator = tess::FillTessellator::new();
    let mut out = vec![42.0];
    tessellate_contours(&mut tessellator, &[square(0.0, 0.0, 1.0, true)], WindingRule::NonZero, &mut out).unwrap();

    assert_eq!(out[0], 42.0);
    assert_eq!((out.len() - 1) % 6, 0);
    assert!((triangles_signed_area(&out[1..]).abs() - 1.0).abs() < 1e-6);
}

#[test]
fn degenerate_contours() {
    let mut tessellator = tess::FillTessellator::new();
    let mut out = Vec::new();
    tessellate_contours(&mut tessellator, &[], WindingRule::NonZero, &mut out).unwrap();
    tessellate_contours(
        &mut tessellator,
        &[vec![point(0.0, 0.0), point(1.0, 1.0)]],
        WindingRule::NonZero,
        &mut out,
    )
    .unwrap();
    assert!(out.is_empty());
}

#[test]
fn nan_positions_are_rejected() {
    let mut tessellator = tess::FillTessellator::new();
    let mut out = vec![1.0, 2.0];
    let mut contour = square(0.0, 0.0, 1.0, true);
    contour[2].x = f64::NAN;

    let result = tessellate_contours(&mut tessellator, &[contour], WindingRule::NonZero, &mut out);
    assert_eq!(
        result,
        Err(TessellationError::UnsupportedParameter(UnsupportedParameter::PositionIsNaN))
    );
    assert_eq!(out, vec![1.0, 2.0]);
}
