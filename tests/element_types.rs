// Copyright 2026 the polytess authors
// The three output modes: plain polygons, connected polygons with
// neighbor ids, and boundary contours.

mod helpers;

use polytess::{ContourOrientation, ElementType, Tessellator, WindingRule, UNDEF};

const SQUARE: &[(f32, f32)] = &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

fn tessellate_as(
    contours: &[&[(f32, f32)]],
    element_type: ElementType,
    poly_size: usize,
) -> Tessellator<()> {
    let mut tess = Tessellator::new();
    for points in contours {
        tess.add_contour(&helpers::contour(points), ContourOrientation::Original);
    }
    tess.tessellate(WindingRule::EvenOdd, element_type, poly_size, None)
        .expect("tessellation failed");
    tess
}

// ── ConnectedPolygons ──────────────────────────────────────────────────

#[test]
fn connected_triangles_reference_each_other() {
    let tess = tessellate_as(&[SQUARE], ElementType::ConnectedPolygons, 3);
    assert_eq!(tess.element_count(), 2);
    // Per element: 3 vertex ids then 3 neighbor ids.
    assert_eq!(tess.elements().len(), 2 * 6);

    let elems = tess.elements();
    let neighbors = |f: usize| &elems[f * 6 + 3..f * 6 + 6];

    // The two triangles share the splitting diagonal: each must name the
    // other exactly once, with UNDEF on its two boundary edges.
    for f in 0..2 {
        let other = (1 - f) as u32;
        let n = neighbors(f);
        assert_eq!(
            n.iter().filter(|&&x| x == other).count(),
            1,
            "face {f} neighbors: {n:?}"
        );
        assert_eq!(
            n.iter().filter(|&&x| x == UNDEF).count(),
            2,
            "face {f} neighbors: {n:?}"
        );
    }
}

#[test]
fn neighbor_slots_align_with_edges() {
    // The neighbor id in slot i belongs to the edge from vertex i to
    // vertex i+1: the shared edge's endpoints must appear in both faces.
    let tess = tessellate_as(&[SQUARE], ElementType::ConnectedPolygons, 3);
    let elems = tess.elements();
    for f in 0..tess.element_count() {
        let verts = &elems[f * 6..f * 6 + 3];
        let neighbors = &elems[f * 6 + 3..f * 6 + 6];
        for i in 0..3 {
            if neighbors[i] == UNDEF {
                continue;
            }
            let a = verts[i];
            let b = verts[(i + 1) % 3];
            let g = neighbors[i] as usize;
            let other = &elems[g * 6..g * 6 + 3];
            assert!(
                other.contains(&a) && other.contains(&b),
                "face {f} edge {a}-{b} not found in neighbor {g}"
            );
        }
    }
}

// ── Polygons with poly_size > 3 ────────────────────────────────────────

#[test]
fn quad_output_merges_the_square_back_together() {
    let tess = tessellate_as(&[SQUARE], ElementType::Polygons, 4);
    // The two triangles merge into one convex quad.
    assert_eq!(tess.element_count(), 1);
    let elems = tess.elements();
    assert_eq!(elems.len(), 4);
    assert!(elems.iter().all(|&i| i != UNDEF));
    helpers::verify_valid_output(&tess, 4);
}

#[test]
fn poly_size_padding_uses_undef() {
    let triangle: &[(f32, f32)] = &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
    let tess = tessellate_as(&[triangle], ElementType::Polygons, 6);
    assert_eq!(tess.element_count(), 1);
    let elems = tess.elements();
    assert_eq!(elems.len(), 6);
    assert!(elems[..3].iter().all(|&i| i != UNDEF));
    assert!(elems[3..].iter().all(|&i| i == UNDEF));
}

#[test]
fn merging_never_exceeds_the_requested_size() {
    // An L-shape triangulates into several triangles; with poly_size 4
    // every output face must still have at most 4 vertices.
    let l_shape: &[(f32, f32)] = &[
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ];
    let tess = tessellate_as(&[l_shape], ElementType::Polygons, 4);
    assert!(tess.element_count() >= 1);
    for poly in tess.elements().chunks(4) {
        let used = poly.iter().filter(|&&i| i != UNDEF).count();
        assert!((3..=4).contains(&used), "polygon with {used} vertices");
    }
    helpers::verify_valid_output(&tess, 4);
}

// ── BoundaryContours ───────────────────────────────────────────────────

#[test]
fn convex_polygon_boundary_is_one_contour_in_cyclic_order() {
    let pentagon: &[(f32, f32)] = &[(0.0, 0.0), (4.0, 0.0), (5.0, 2.0), (2.0, 4.0), (-1.0, 2.0)];
    let tess = tessellate_as(&[pentagon], ElementType::BoundaryContours, 3);

    assert_eq!(tess.element_count(), 1);
    let elems = tess.elements();
    assert_eq!(elems, &[0, 5][..]);
    assert_eq!(tess.vertex_count(), 5);

    // All original vertices, in original cyclic order up to rotation.
    let out: Vec<(f32, f32)> = tess
        .vertices()
        .iter()
        .map(|v| (v.position[0], v.position[1]))
        .collect();
    let offset = pentagon
        .iter()
        .position(|&p| p == out[0])
        .expect("output vertex not in input");
    for i in 0..5 {
        assert_eq!(out[i], pentagon[(offset + i) % 5], "rotation mismatch at {i}");
    }
}

#[test]
fn hole_yields_two_boundary_contours() {
    let outer: &[(f32, f32)] = &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    let inner_cw: &[(f32, f32)] = &[(1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)];
    let tess = tessellate_as(&[outer, inner_cw], ElementType::BoundaryContours, 3);

    assert_eq!(tess.element_count(), 2);
    let elems = tess.elements();
    // Two (start, count) runs covering all eight vertices.
    assert_eq!(elems.len(), 4);
    assert_eq!(elems[0], 0);
    assert_eq!(elems[1] + elems[3], 8);
    assert_eq!(elems[2], elems[1]);
}

#[test]
fn boundary_of_a_triangulated_shape_has_no_diagonals() {
    // Non-convex shape: boundary output must return just the outline,
    // with none of the diagonals triangulation would add.
    let l_shape: &[(f32, f32)] = &[
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (1.0, 2.0),
        (0.0, 2.0),
    ];
    let tess = tessellate_as(&[l_shape], ElementType::BoundaryContours, 3);
    assert_eq!(tess.element_count(), 1);
    assert_eq!(tess.vertex_count(), 6);
}
