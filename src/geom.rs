// Copyright 2026 the polytess authors
// License: MIT
//
// Pure predicates over projected sweep-plane coordinates. Points are
// (s, t) pairs: s is the sweep axis, t the transverse axis. The
// formulations are the numerically stable ones from the SGI tessellator;
// in particular edge_eval interpolates from the nearer endpoint so the
// result is exact when the edge is vertical.

/// Coordinate scalar used throughout the crate.
pub type Real = f32;

/// Lexicographic order on the sweep plane: s first, then t.
#[inline]
pub fn vert_leq(u: (Real, Real), v: (Real, Real)) -> bool {
    u.0 < v.0 || (u.0 == v.0 && u.1 <= v.1)
}

/// Exact coordinate equality.
#[inline]
pub fn vert_eq(u: (Real, Real), v: (Real, Real)) -> bool {
    u.0 == v.0 && u.1 == v.1
}

/// Lexicographic order with s and t transposed.
#[inline]
pub fn trans_leq(u: (Real, Real), v: (Real, Real)) -> bool {
    u.1 < v.1 || (u.1 == v.1 && u.0 <= v.0)
}

/// Given u, v, w with vert_leq(u, v) and vert_leq(v, w), returns the signed
/// t-distance from the line uw to v, evaluated at v's s-coordinate.
/// Zero when uw is vertical.
pub fn edge_eval(u: (Real, Real), v: (Real, Real), w: (Real, Real)) -> Real {
    let gap_l = v.0 - u.0;
    let gap_r = w.0 - v.0;
    if gap_l + gap_r > 0.0 {
        if gap_l < gap_r {
            (v.1 - u.1) + (u.1 - w.1) * (gap_l / (gap_l + gap_r))
        } else {
            (v.1 - w.1) + (w.1 - u.1) * (gap_r / (gap_l + gap_r))
        }
    } else {
        0.0
    }
}

/// Same sign as `edge_eval(u, v, w)` but cheaper: the result is not
/// normalized by the s-extent.
#[inline]
pub fn edge_sign(u: (Real, Real), v: (Real, Real), w: (Real, Real)) -> Real {
    let gap_l = v.0 - u.0;
    let gap_r = w.0 - v.0;
    if gap_l + gap_r > 0.0 {
        (v.1 - w.1) * gap_l + (v.1 - u.1) * gap_r
    } else {
        0.0
    }
}

/// `edge_eval` with s and t transposed.
pub fn trans_eval(u: (Real, Real), v: (Real, Real), w: (Real, Real)) -> Real {
    let gap_l = v.1 - u.1;
    let gap_r = w.1 - v.1;
    if gap_l + gap_r > 0.0 {
        if gap_l < gap_r {
            (v.0 - u.0) + (u.0 - w.0) * (gap_l / (gap_l + gap_r))
        } else {
            (v.0 - w.0) + (w.0 - u.0) * (gap_r / (gap_l + gap_r))
        }
    } else {
        0.0
    }
}

/// `edge_sign` with s and t transposed.
#[inline]
pub fn trans_sign(u: (Real, Real), v: (Real, Real), w: (Real, Real)) -> Real {
    let gap_l = v.1 - u.1;
    let gap_r = w.1 - v.1;
    if gap_l + gap_r > 0.0 {
        (v.0 - w.0) * gap_l + (v.0 - u.0) * gap_r
    } else {
        0.0
    }
}

/// True if u, v, w are in counter-clockwise order (includes colinear).
#[inline]
pub fn vert_ccw(u: (Real, Real), v: (Real, Real), w: (Real, Real)) -> bool {
    u.0 * (v.1 - w.1) + v.0 * (w.1 - u.1) + w.0 * (u.1 - v.1) >= 0.0
}

/// L1 distance between two sweep-plane points.
#[inline]
pub fn vert_l1_dist(u: (Real, Real), v: (Real, Real)) -> Real {
    (u.0 - v.0).abs() + (u.1 - v.1).abs()
}

/// Returns (b*x + a*y) / (a + b), or the midpoint when both weights are
/// zero. Negative weights are clamped to zero. The result always lies
/// between x and y.
#[inline]
pub fn interpolate(mut a: Real, x: Real, mut b: Real, y: Real) -> Real {
    if a < 0.0 {
        a = 0.0;
    }
    if b < 0.0 {
        b = 0.0;
    }
    if a <= b {
        if b == 0.0 {
            x / 2.0 + y / 2.0
        } else {
            x + (y - x) * (a / (a + b))
        }
    } else {
        y + (x - y) * (b / (a + b))
    }
}

/// Intersection of segments (o1, d1) and (o2, d2).
///
/// Not the fastest formulation, but a very stable one: each coordinate is
/// interpolated between the two inner endpoints under the respective
/// lexicographic order, so the result always lies inside the bounding
/// rectangle of both segments. If the segments do not actually cross, a
/// best-effort midpoint is returned.
pub fn edge_intersect(
    mut o1: (Real, Real),
    mut d1: (Real, Real),
    mut o2: (Real, Real),
    mut d2: (Real, Real),
) -> (Real, Real) {
    use core::mem::swap;

    if !vert_leq(o1, d1) {
        swap(&mut o1, &mut d1);
    }
    if !vert_leq(o2, d2) {
        swap(&mut o2, &mut d2);
    }
    if !vert_leq(o1, o2) {
        swap(&mut o1, &mut o2);
        swap(&mut d1, &mut d2);
    }

    let s;
    if !vert_leq(o2, d1) {
        // Technically no intersection; do our best.
        s = o2.0 / 2.0 + d1.0 / 2.0;
    } else if vert_leq(d1, d2) {
        let mut z1 = edge_eval(o1, o2, d1);
        let mut z2 = edge_eval(o2, d1, d2);
        if z1 + z2 < 0.0 {
            z1 = -z1;
            z2 = -z2;
        }
        s = interpolate(z1, o2.0, z2, d1.0);
    } else {
        let mut z1 = edge_sign(o1, o2, d1);
        let mut z2 = -edge_sign(o1, d2, d1);
        if z1 + z2 < 0.0 {
            z1 = -z1;
            z2 = -z2;
        }
        s = interpolate(z1, o2.0, z2, d2.0);
    }

    // Repeat under the transposed order for the t-coordinate.
    if !trans_leq(o1, d1) {
        swap(&mut o1, &mut d1);
    }
    if !trans_leq(o2, d2) {
        swap(&mut o2, &mut d2);
    }
    if !trans_leq(o1, o2) {
        swap(&mut o1, &mut o2);
        swap(&mut d1, &mut d2);
    }

    let t;
    if !trans_leq(o2, d1) {
        t = o2.1 / 2.0 + d1.1 / 2.0;
    } else if trans_leq(d1, d2) {
        let mut z1 = trans_eval(o1, o2, d1);
        let mut z2 = trans_eval(o2, d1, d2);
        if z1 + z2 < 0.0 {
            z1 = -z1;
            z2 = -z2;
        }
        t = interpolate(z1, o2.1, z2, d1.1);
    } else {
        let mut z1 = trans_sign(o1, o2, d1);
        let mut z2 = -trans_sign(o1, d2, d1);
        if z1 + z2 < 0.0 {
            z1 = -z1;
            z2 = -z2;
        }
        t = interpolate(z1, o2.1, z2, d2.1);
    }

    (s, t)
}
