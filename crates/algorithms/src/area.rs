//! Area of polygons and triangle lists.

use crate::math::Point;

/// Computes the signed area of a polygon, implicitly closed.
///
/// Positive for polygons with a positive orientation.
pub fn signed_area(polygon: &[Point]) -> f64 {
    let first = match polygon.first() {
        Some(p) => *p,
        None => return 0.0,
    };

    let mut double_area = 0.0;
    for pair in polygon.windows(2) {
        let v0 = pair[0] - first;
        let v1 = pair[1] - first;
        double_area += v0.cross(v1);
    }

    double_area * 0.5
}

/// Computes the signed area of a flat list of triangles, as produced by the
/// tessellators: `[x0, y0, x1, y1, x2, y2, ...]`.
///
/// Trailing values that don't form a complete triangle are ignored.
pub fn triangles_signed_area(vertices: &[f32]) -> f64 {
    let mut double_area = 0.0;
    for tri in vertices.chunks_exact(6) {
        let [ax, ay, bx, by, cx, cy] = [tri[0], tri[1], tri[2], tri[3], tri[4], tri[5]].map(f64::from);
        double_area += (bx - ax) * (cy - ay) - (by - ay) * (cx - ax);
    }

    double_area * 0.5
}

/// Computes the area covered by a flat list of triangles, regardless of their
/// orientation.
pub fn triangles_area(vertices: &[f32]) -> f64 {
    vertices
        .chunks_exact(6)
        .map(|tri| triangles_signed_area(tri).abs())
        .sum()
}

#[test]
fn square_area() {
    use crate::math::point;

    let square = [point(0.0, 0.0), point(2.0, 0.0), point(2.0, 2.0), point(0.0, 2.0)];
    assert_eq!(signed_area(&square), 4.0);

    let mut reversed = square;
    reversed.reverse();
    assert_eq!(signed_area(&reversed), -4.0);
    assert_eq!(signed_area(&[]), 0.0);
}

#[test]
fn triangle_list_area() {
    let tris = [
        0.0, 0.0, 2.0, 0.0, 2.0, 2.0, // positive
        0.0, 0.0, 0.0, 2.0, 2.0, 2.0, // negative
    ];

    assert_eq!(triangles_signed_area(&tris), 0.0);
    assert_eq!(triangles_area(&tris), 4.0);
    assert_eq!(triangles_area(&tris[..8]), 2.0);
}
