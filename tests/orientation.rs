// Copyright 2026 the polytess authors
// Contour orientation forcing by signed area.

mod helpers;

use polytess::{ContourOrientation, ElementType, Tessellator, WindingRule};

const CCW_SQUARE: &[(f32, f32)] = &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
const CW_SQUARE: &[(f32, f32)] = &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];

fn run(points: &[(f32, f32)], orientation: ContourOrientation) -> Tessellator<()> {
    let mut tess = Tessellator::new();
    tess.add_contour(&helpers::contour(points), orientation);
    tess.tessellate(WindingRule::EvenOdd, ElementType::Polygons, 3, None)
        .unwrap();
    tess
}

fn output_signature(tess: &Tessellator<()>) -> (Vec<[f32; 3]>, Vec<u32>) {
    (
        tess.vertices().iter().map(|v| v.position).collect(),
        tess.elements().to_vec(),
    )
}

#[test]
fn forcing_makes_cw_and_ccw_input_identical() {
    // A clockwise square forced counter-clockwise must tessellate exactly
    // like the counter-clockwise square under the same forcing.
    let forced_cw = run(CW_SQUARE, ContourOrientation::CounterClockwise);
    let direct = run(CCW_SQUARE, ContourOrientation::CounterClockwise);
    assert_eq!(output_signature(&forced_cw), output_signature(&direct));
}

#[test]
fn original_keeps_the_supplied_order() {
    // Without forcing, a CW hole cancels a CCW outer under NonZero; with
    // both forced CCW it does not.
    let outer: &[(f32, f32)] = &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    let hole_cw: &[(f32, f32)] = &[(1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)];

    let mut tess = Tessellator::new();
    tess.add_contour(&helpers::contour(outer), ContourOrientation::Original);
    tess.add_contour(&helpers::contour(hole_cw), ContourOrientation::Original);
    tess.tessellate(WindingRule::NonZero, ElementType::Polygons, 3, None)
        .unwrap();
    let with_hole = helpers::total_area(&tess);
    assert!((with_hole - 12.0).abs() < 0.01, "hole not cut: {with_hole}");

    let mut tess = Tessellator::new();
    tess.add_contour(&helpers::contour(outer), ContourOrientation::CounterClockwise);
    tess.add_contour(&helpers::contour(hole_cw), ContourOrientation::CounterClockwise);
    tess.tessellate(WindingRule::NonZero, ElementType::Polygons, 3, None)
        .unwrap();
    let filled = helpers::total_area(&tess);
    assert!((filled - 16.0).abs() < 0.01, "hole should fill: {filled}");
}

#[test]
fn forcing_the_direction_a_contour_already_has_is_a_no_op() {
    let forced = run(CCW_SQUARE, ContourOrientation::CounterClockwise);
    let original = run(CCW_SQUARE, ContourOrientation::Original);
    assert_eq!(output_signature(&forced), output_signature(&original));
}

#[test]
fn clockwise_forcing_mirrors_counter_clockwise() {
    let a = run(CCW_SQUARE, ContourOrientation::Clockwise);
    let b = run(CW_SQUARE, ContourOrientation::Clockwise);
    assert_eq!(output_signature(&a), output_signature(&b));
}
