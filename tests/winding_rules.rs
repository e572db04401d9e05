// Copyright 2026 the polytess authors
// Winding rule classification across nested and overlapping contours.

mod helpers;

use polytess::WindingRule;

const OUTER: &[(f32, f32)] = &[(-3.0, -3.0), (3.0, -3.0), (3.0, 3.0), (-3.0, 3.0)];
const INNER: &[(f32, f32)] = &[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
/// INNER with the vertex order reversed (clockwise).
const INNER_CW: &[(f32, f32)] = &[(-1.0, 1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)];

#[test]
fn simple_square_under_every_rule() {
    // A single CCW square is inside under every rule except Negative.
    for (rule, expect_area) in [
        (WindingRule::EvenOdd, 36.0),
        (WindingRule::NonZero, 36.0),
        (WindingRule::Positive, 36.0),
        (WindingRule::Negative, 0.0),
        (WindingRule::AbsGeqTwo, 0.0),
    ] {
        let tess = helpers::tessellate(&[OUTER], rule);
        let area = helpers::total_area(&tess);
        assert!(
            (area - expect_area).abs() < 0.01,
            "{rule:?}: expected area {expect_area}, got {area}"
        );
    }
}

#[test]
fn opposite_winding_hole_is_cut_out_by_nonzero_and_evenodd() {
    for rule in [WindingRule::EvenOdd, WindingRule::NonZero] {
        let tess = helpers::tessellate(&[OUTER, INNER_CW], rule);
        let area = helpers::total_area(&tess);
        assert!(
            (area - 32.0).abs() < 0.01,
            "{rule:?}: hole should be cut out, got area {area}"
        );
    }
}

#[test]
fn same_winding_hole_depends_on_the_rule() {
    // Nested squares wound the same way: the inner region has winding 2.
    // NonZero fills it (area 36); EvenOdd cancels it (area 32).
    let tess = helpers::tessellate(&[OUTER, INNER], WindingRule::NonZero);
    let area = helpers::total_area(&tess);
    assert!((area - 36.0).abs() < 0.01, "NonZero: got area {area}");

    let tess = helpers::tessellate(&[OUTER, INNER], WindingRule::EvenOdd);
    let area = helpers::total_area(&tess);
    assert!((area - 32.0).abs() < 0.01, "EvenOdd: got area {area}");
}

#[test]
fn abs_geq_two_keeps_only_the_doubly_wound_region() {
    let tess = helpers::tessellate(&[OUTER, INNER], WindingRule::AbsGeqTwo);
    let area = helpers::total_area(&tess);
    assert!(
        (area - 4.0).abs() < 0.01,
        "AbsGeqTwo should keep only the inner square, got area {area}"
    );
}

#[test]
fn overlapping_squares_under_abs_geq_two() {
    let a: &[(f32, f32)] = &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    let b: &[(f32, f32)] = &[(2.0, 0.0), (6.0, 0.0), (6.0, 4.0), (2.0, 4.0)];
    let tess = helpers::tessellate(&[a, b], WindingRule::AbsGeqTwo);
    let area = helpers::total_area(&tess);
    // Only the 2x4 overlap reaches winding 2.
    assert!((area - 8.0).abs() < 0.01, "overlap area wrong: {area}");
}

#[test]
fn negative_rule_fills_clockwise_contours() {
    // With a computed normal the projection flips a net-clockwise input
    // to counter-clockwise, so pin the normal to observe negative winding.
    use polytess::{ContourOrientation, ElementType, Tessellator};

    let mut tess = Tessellator::new();
    tess.set_normal([0.0, 0.0, 1.0]);
    tess.add_contour(&helpers::contour(INNER_CW), ContourOrientation::Original);
    tess.tessellate(WindingRule::Negative, ElementType::Polygons, 3, None)
        .unwrap();
    let area = helpers::total_area(&tess);
    assert!((area - 4.0).abs() < 0.01, "Negative: got area {area}");

    let mut tess = Tessellator::new();
    tess.set_normal([0.0, 0.0, 1.0]);
    tess.add_contour(&helpers::contour(INNER_CW), ContourOrientation::Original);
    tess.tessellate(WindingRule::Positive, ElementType::Polygons, 3, None)
        .unwrap();
    assert_eq!(tess.element_count(), 0);
}

#[test]
fn pentagram_center_differs_between_rules() {
    // A five-pointed star drawn as one self-intersecting contour: the
    // center pentagon has winding 2.
    let star: &[(f32, f32)] = &[
        (0.0, 3.0),
        (-1.763, -2.427),
        (2.853, 0.927),
        (-2.853, 0.927),
        (1.763, -2.427),
    ];
    let even_odd = helpers::total_area(&helpers::tessellate(&[star], WindingRule::EvenOdd));
    let non_zero = helpers::total_area(&helpers::tessellate(&[star], WindingRule::NonZero));
    let abs_two = helpers::total_area(&helpers::tessellate(&[star], WindingRule::AbsGeqTwo));

    assert!(even_odd > 0.0);
    // NonZero fills the center pentagon on top of the five points.
    assert!(
        non_zero > even_odd + 0.1,
        "NonZero ({non_zero}) should exceed EvenOdd ({even_odd})"
    );
    // AbsGeqTwo keeps only the center pentagon.
    assert!(
        (abs_two - (non_zero - even_odd)).abs() < 0.05,
        "AbsGeqTwo ({abs_two}) should equal the center area ({})",
        non_zero - even_odd
    );
}
