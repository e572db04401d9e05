// Copyright 2026 the polytess authors
// Shared helpers for the integration tests.

#![allow(dead_code)]

use polytess::{ContourOrientation, ContourVertex, ElementType, Tessellator, WindingRule, UNDEF};

/// Build a contour from 2D points (z = 0), no payload data.
pub fn contour(points: &[(f32, f32)]) -> Vec<ContourVertex<()>> {
    points
        .iter()
        .map(|&(x, y)| ContourVertex {
            position: [x, y, 0.0],
            data: None,
        })
        .collect()
}

/// Tessellate a set of 2D contours into triangles.
pub fn tessellate(contours: &[&[(f32, f32)]], rule: WindingRule) -> Tessellator<()> {
    let mut tess = Tessellator::new();
    for points in contours {
        tess.add_contour(&contour(points), ContourOrientation::Original);
    }
    tess.tessellate(rule, ElementType::Polygons, 3, None)
        .expect("tessellation failed");
    tess
}

pub fn triangle_area(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> f32 {
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

/// Total unsigned area of a triangle-mode output.
pub fn total_area(tess: &Tessellator<()>) -> f32 {
    let verts = tess.vertices();
    let mut total = 0.0;
    for tri in tess.elements().chunks(3) {
        let a = verts[tri[0] as usize].position;
        let b = verts[tri[1] as usize].position;
        let c = verts[tri[2] as usize].position;
        total += triangle_area(a, b, c).abs();
    }
    total
}

/// Shoelace area of a 2D point loop.
pub fn polygon_area(points: &[(f32, f32)]) -> f32 {
    let mut area = 0.0;
    for i in 0..points.len() {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % points.len()];
        area += x0 * y1 - y0 * x1;
    }
    area * 0.5
}

/// Every element index is either UNDEF padding or a valid vertex id, and
/// every real triangle has non-negative area (CCW output).
pub fn verify_valid_output(tess: &Tessellator<()>, poly_size: usize) {
    for &idx in tess.elements() {
        assert!(
            idx == UNDEF || (idx as usize) < tess.vertex_count(),
            "element index {idx} out of range ({} vertices)",
            tess.vertex_count()
        );
    }
    for poly in tess.elements().chunks(poly_size) {
        // Padding only ever follows real indices.
        let mut seen_pad = false;
        for &idx in poly {
            if idx == UNDEF {
                seen_pad = true;
            } else {
                assert!(!seen_pad, "vertex id after padding in {poly:?}");
            }
        }
    }
}
