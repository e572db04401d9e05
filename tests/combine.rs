// Copyright 2026 the polytess authors
// Payload data interpolation at synthesized intersection vertices.

mod helpers;

use polytess::{ContourOrientation, ContourVertex, ElementType, Tessellator, WindingRule};

/// A pentagram: five input vertices, five self-intersections.
const STAR: &[(f32, f32)] = &[
    (0.0, 3.0),
    (-1.763, -2.427),
    (2.853, 0.927),
    (-2.853, 0.927),
    (1.763, -2.427),
];

fn star_with_data() -> Vec<ContourVertex<f32>> {
    STAR.iter()
        .enumerate()
        .map(|(i, &(x, y))| ContourVertex {
            position: [x, y, 0.0],
            data: Some(i as f32 * 10.0),
        })
        .collect()
}

#[test]
fn combine_interpolates_data_at_intersections() {
    let mut tess = Tessellator::new();
    tess.add_contour(&star_with_data(), ContourOrientation::Original);

    let mut calls = 0usize;
    let mut combine = |_pos: [f32; 3], data: [Option<f32>; 4], weights: [f32; 4]| {
        calls += 1;
        let sum: f32 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4, "weights must sum to 1, got {sum}");
        data.iter()
            .zip(weights.iter())
            .map(|(d, w)| d.unwrap_or(0.0) * w)
            .sum()
    };
    tess.tessellate(
        WindingRule::NonZero,
        ElementType::Polygons,
        3,
        Some(&mut combine),
    )
    .unwrap();

    assert!(calls >= 5, "expected a combine call per crossing, got {calls}");
    // Five original vertices plus five synthesized crossings.
    assert_eq!(tess.vertex_count(), 10);
    // Every output vertex carries data: originals their own, crossings
    // the interpolated value.
    for v in tess.vertices() {
        let d = v.data.expect("output vertex lost its data");
        assert!((0.0..=40.0).contains(&d), "interpolated value out of range: {d}");
    }
}

#[test]
fn intersection_position_is_interpolated_from_the_edges() {
    let mut tess = Tessellator::new();
    tess.add_contour(&star_with_data(), ContourOrientation::Original);
    let mut combine = |pos: [f32; 3], data: [Option<f32>; 4], weights: [f32; 4]| {
        // The position handed to the callback is the synthesized vertex.
        assert!(pos[0].abs() < 3.0 && pos[1].abs() < 3.0);
        assert!((pos[2]).abs() < 1e-6);
        data.iter()
            .zip(weights.iter())
            .map(|(d, w)| d.unwrap_or(0.0) * w)
            .sum()
    };
    tess.tessellate(
        WindingRule::EvenOdd,
        ElementType::Polygons,
        3,
        Some(&mut combine),
    )
    .unwrap();

    // The crossings land strictly inside the star's bounding box and are
    // shared by the wing triangles.
    assert_eq!(tess.vertex_count(), 10);
}

#[test]
fn missing_callback_drops_data_but_still_tessellates() {
    let mut tess = Tessellator::new();
    tess.add_contour(&star_with_data(), ContourOrientation::Original);
    tess.tessellate(WindingRule::NonZero, ElementType::Polygons, 3, None)
        .unwrap();

    assert_eq!(tess.vertex_count(), 10);
    let with_data = tess.vertices().iter().filter(|v| v.data.is_some()).count();
    let without = tess.vertices().iter().filter(|v| v.data.is_none()).count();
    assert_eq!(with_data, 5, "original vertices keep their data");
    assert_eq!(without, 5, "synthesized vertices carry none");
}

#[test]
fn coincident_vertices_merge_their_data() {
    // Two triangles sharing one corner, each with data at the shared
    // point; the merge combines them with equal weights.
    let a: Vec<ContourVertex<f32>> = vec![
        ContourVertex { position: [0.0, 0.0, 0.0], data: Some(2.0) },
        ContourVertex { position: [2.0, 0.0, 0.0], data: Some(0.0) },
        ContourVertex { position: [0.0, 2.0, 0.0], data: Some(0.0) },
    ];
    let b: Vec<ContourVertex<f32>> = vec![
        ContourVertex { position: [0.0, 0.0, 0.0], data: Some(4.0) },
        ContourVertex { position: [-2.0, 0.0, 0.0], data: Some(0.0) },
        ContourVertex { position: [0.0, -2.0, 0.0], data: Some(0.0) },
    ];
    let mut tess = Tessellator::new();
    tess.add_contour(&a, ContourOrientation::CounterClockwise);
    tess.add_contour(&b, ContourOrientation::CounterClockwise);

    let mut combine = |_pos: [f32; 3], data: [Option<f32>; 4], weights: [f32; 4]| {
        data.iter()
            .zip(weights.iter())
            .map(|(d, w)| d.unwrap_or(0.0) * w)
            .sum()
    };
    tess.tessellate(
        WindingRule::EvenOdd,
        ElementType::Polygons,
        3,
        Some(&mut combine),
    )
    .unwrap();

    // Five distinct positions; the shared corner's data is the mean of 2
    // and 4.
    assert_eq!(tess.vertex_count(), 5);
    let origin = tess
        .vertices()
        .iter()
        .find(|v| v.position == [0.0, 0.0, 0.0])
        .expect("shared vertex missing");
    assert_eq!(origin.data, Some(3.0));
}
