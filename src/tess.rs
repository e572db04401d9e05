// Copyright 2026 the polytess authors
// License: MIT
//
// Public tessellator API: contour ingestion with orientation forcing,
// projection onto the sweep plane, and the pipeline driver tying the
// sweep, the monotonizer and the output assembler together.

use log::debug;

use crate::error::TessError;
use crate::geom::Real;
use crate::mesh::{sym, Mesh, F_HEAD, INVALID, V_HEAD};
use crate::sweep::Sweep;

/// Decides which regions of the planar subdivision are filled, as a
/// function of their accumulated winding number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum WindingRule {
    /// Inside iff the winding number is odd.
    EvenOdd,
    /// Inside iff the winding number is non-zero.
    NonZero,
    /// Inside iff the winding number is positive.
    Positive,
    /// Inside iff the winding number is negative.
    Negative,
    /// Inside iff the winding number is at least two in magnitude.
    AbsGeqTwo,
}

impl WindingRule {
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            WindingRule::EvenOdd => winding & 1 != 0,
            WindingRule::NonZero => winding != 0,
            WindingRule::Positive => winding > 0,
            WindingRule::Negative => winding < 0,
            WindingRule::AbsGeqTwo => winding >= 2 || winding <= -2,
        }
    }
}

/// Shape of the output buffers produced by [`Tessellator::tessellate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementType {
    /// Polygons of up to `poly_size` vertex ids each, padded with [`UNDEF`].
    Polygons,
    /// Like `Polygons`, with `poly_size` neighbor face ids per element
    /// appended after the vertex ids.
    ConnectedPolygons,
    /// Boundary loops of the filled region as (start, count) runs.
    BoundaryContours,
}

/// How [`Tessellator::add_contour`] treats the supplied vertex order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub enum ContourOrientation {
    /// Keep the order as given.
    Original,
    /// Reverse the contour if its signed area is positive.
    Clockwise,
    /// Reverse the contour if its signed area is negative.
    CounterClockwise,
}

/// One input or output vertex: a 3D position and an optional caller
/// payload carried through the pipeline.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize, serde::Deserialize))]
pub struct ContourVertex<D> {
    pub position: [Real; 3],
    pub data: Option<D>,
}

/// Merges payload data where contours intersect or coincide: given the
/// new position, up to four contributing payloads, and their normalized
/// interpolation weights (summing to 1), returns the merged payload.
pub type CombineCallback<'f, D> = dyn FnMut([Real; 3], [Option<D>; 4], [Real; 4]) -> D + 'f;

/// Reserved id meaning "no vertex" / "no neighbor" in element buffers.
pub const UNDEF: u32 = u32::MAX;

/// Coordinates are kept below 2^23 so the f32 sweep predicates stay
/// within exact integer range.
const MAX_COORD: Real = (1u32 << 23) as Real;

#[inline]
fn coord_ok(c: Real) -> bool {
    (-MAX_COORD..=MAX_COORD).contains(&c) && !c.is_nan()
}

/// Converts closed contours into a filled planar subdivision.
///
/// Contours are accumulated with [`add_contour`](Self::add_contour);
/// [`tessellate`](Self::tessellate) then runs the pipeline once, leaving
/// its result in [`vertices`](Self::vertices) and
/// [`elements`](Self::elements) and consuming the accumulated contours.
///
/// ```
/// use polytess::{ContourOrientation, ContourVertex, ElementType, Tessellator, WindingRule};
///
/// let square: Vec<ContourVertex<()>> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
///     .iter()
///     .map(|&(x, y)| ContourVertex { position: [x, y, 0.0], data: None })
///     .collect();
///
/// let mut tess = Tessellator::new();
/// tess.add_contour(&square, ContourOrientation::Original);
/// tess.tessellate(WindingRule::EvenOdd, ElementType::Polygons, 3, None).unwrap();
///
/// assert_eq!(tess.vertex_count(), 4);
/// assert_eq!(tess.element_count(), 2);
/// ```
pub struct Tessellator<D = ()> {
    pub(crate) mesh: Option<Mesh<D>>,
    pending: Option<TessError>,
    normal: [Real; 3],
    bmin: [Real; 2],
    bmax: [Real; 2],
    pub(crate) vertices: Vec<ContourVertex<D>>,
    pub(crate) elements: Vec<u32>,
    pub(crate) element_count: usize,
}

impl<D: Clone> Tessellator<D> {
    pub fn new() -> Self {
        Tessellator {
            mesh: None,
            pending: None,
            normal: [0.0; 3],
            bmin: [0.0; 2],
            bmax: [0.0; 2],
            vertices: Vec::new(),
            elements: Vec::new(),
            element_count: 0,
        }
    }

    /// Supply the polygon normal instead of having it computed from the
    /// contours. The sweep plane is the plane perpendicular to it.
    pub fn set_normal(&mut self, normal: [Real; 3]) {
        self.normal = normal;
    }

    /// Append one closed contour. The winding of a counter-clockwise
    /// contour adds +1 to the region it encloses; `orientation` can force
    /// a direction by reversing the vertex order when the contour's signed
    /// area disagrees with it.
    pub fn add_contour(&mut self, vertices: &[ContourVertex<D>], orientation: ContourOrientation) {
        if self.pending.is_some() {
            return;
        }
        if self.mesh.is_none() {
            self.mesh = Some(Mesh::new());
        }
        for v in vertices {
            if v.position.iter().any(|&c| !coord_ok(c)) {
                self.pending = Some(TessError::InvalidCoordinate);
                return;
            }
        }

        // Positive shoelace area means the vertices wind counter-clockwise;
        // reverse when that disagrees with the requested orientation.
        let reverse = if orientation == ContourOrientation::Original {
            false
        } else {
            let area = signed_area(vertices);
            (orientation == ContourOrientation::Clockwise && area > 0.0)
                || (orientation == ContourOrientation::CounterClockwise && area < 0.0)
        };

        let mesh = self.mesh.as_mut().unwrap();
        let mut e = INVALID;
        for i in 0..vertices.len() {
            if e == INVALID {
                e = mesh.make_edge();
                mesh.splice(e, sym(e));
            } else {
                // Grow the loop: the new vertex becomes e's origin.
                mesh.split_edge(e);
                e = mesh.edges[e as usize].lnext;
            }
            let idx = if reverse { vertices.len() - 1 - i } else { i };
            let org = mesh.edges[e as usize].org;
            mesh.verts[org as usize].coords = vertices[idx].position;
            mesh.verts[org as usize].data = vertices[idx].data.clone();
            mesh.edges[e as usize].winding = 1;
            mesh.edges[sym(e) as usize].winding = -1;
        }
    }

    /// Run the pipeline over the accumulated contours. On success the
    /// output buffers hold the result described by `element_type`; the
    /// contours are consumed either way, so a second call without new
    /// contours yields empty output.
    pub fn tessellate(
        &mut self,
        winding_rule: WindingRule,
        element_type: ElementType,
        poly_size: usize,
        combine: Option<&mut CombineCallback<'_, D>>,
    ) -> Result<(), TessError> {
        self.vertices.clear();
        self.elements.clear();
        self.element_count = 0;

        if let Some(err) = self.pending.take() {
            self.mesh = None;
            return Err(err);
        }
        if self.mesh.is_none() {
            return Ok(());
        }
        let poly_size = poly_size.max(3);
        debug!("tessellate: rule {winding_rule:?}, {element_type:?}, poly size {poly_size}");

        self.project_polygon();

        {
            let (bmin, bmax) = (self.bmin, self.bmax);
            let mesh = self.mesh.as_mut().unwrap();
            let mut sweep = Sweep::new(mesh, winding_rule, combine);
            sweep.run(bmin, bmax);
        }

        {
            let mesh = self.mesh.as_mut().unwrap();
            if element_type == ElementType::BoundaryContours {
                // Only edges separating inside from outside matter now.
                mesh.set_winding_number(1, true);
            } else {
                mesh.tessellate_interior();
            }
            #[cfg(debug_assertions)]
            mesh.check();
        }

        if element_type == ElementType::BoundaryContours {
            self.output_contours();
        } else {
            self.output_polymesh(element_type, poly_size);
        }

        self.mesh = None;
        Ok(())
    }

    /// Output vertices: positions with their (possibly combined) payloads.
    pub fn vertices(&self) -> &[ContourVertex<D>] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Output element buffer; layout depends on the element type passed
    /// to [`tessellate`](Self::tessellate).
    pub fn elements(&self) -> &[u32] {
        &self.elements
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    // ───────────────────────── projection ─────────────────────────

    /// Project every vertex onto the plane of the polygon normal
    /// (computing one if the caller didn't supply it) and cache the
    /// projected bounding box.
    fn project_polygon(&mut self) {
        let mut norm = self.normal;
        let computed = norm == [0.0; 3];
        if computed {
            norm = compute_normal(self.mesh.as_ref().unwrap());
        }

        let i = long_axis(&norm);
        let mut s_unit = [0.0; 3];
        let mut t_unit = [0.0; 3];
        s_unit[(i + 1) % 3] = 1.0;
        t_unit[(i + 2) % 3] = if norm[i] > 0.0 { 1.0 } else { -1.0 };

        let mesh = self.mesh.as_mut().unwrap();
        let mut v = mesh.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            let c = mesh.verts[v as usize].coords;
            mesh.verts[v as usize].s = dot(&c, &s_unit);
            mesh.verts[v as usize].t = dot(&c, &t_unit);
            v = mesh.verts[v as usize].next;
        }
        if computed {
            // A computed normal may point either way; orient so the net
            // contour area is non-negative.
            check_orientation(mesh);
        }

        let mut first = true;
        let mut v = mesh.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            let (s, t) = mesh.st(v);
            if first {
                self.bmin = [s, t];
                self.bmax = [s, t];
                first = false;
            } else {
                self.bmin[0] = self.bmin[0].min(s);
                self.bmin[1] = self.bmin[1].min(t);
                self.bmax[0] = self.bmax[0].max(s);
                self.bmax[1] = self.bmax[1].max(t);
            }
            v = mesh.verts[v as usize].next;
        }
        if first {
            self.bmin = [0.0; 2];
            self.bmax = [0.0; 2];
        }
    }
}

impl<D: Clone> Default for Tessellator<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn signed_area<D>(vertices: &[ContourVertex<D>]) -> Real {
    let mut area = 0.0;
    for i in 0..vertices.len() {
        let p0 = vertices[i].position;
        let p1 = vertices[(i + 1) % vertices.len()].position;
        area += p0[0] * p1[1];
        area -= p0[1] * p1[0];
    }
    area * 0.5
}

fn dot(u: &[Real; 3], v: &[Real; 3]) -> Real {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

fn long_axis(v: &[Real; 3]) -> usize {
    let mut i = 0;
    if v[1].abs() > v[0].abs() {
        i = 1;
    }
    if v[2].abs() > v[i].abs() {
        i = 2;
    }
    i
}

fn short_axis(v: &[Real; 3]) -> usize {
    let mut i = 0;
    if v[1].abs() < v[0].abs() {
        i = 1;
    }
    if v[2].abs() < v[i].abs() {
        i = 2;
    }
    i
}

/// Best-fit normal from the contour extremes: take the two vertices
/// furthest apart on the widest axis, then the third vertex forming the
/// largest triangle with them. Falls back to an arbitrary axis when the
/// input is degenerate (coincident or colinear points).
fn compute_normal<D>(mesh: &Mesh<D>) -> [Real; 3] {
    let first_v = mesh.verts[V_HEAD as usize].next;
    if first_v == V_HEAD {
        return [0.0, 0.0, 1.0];
    }

    let mut min_val = mesh.verts[first_v as usize].coords;
    let mut max_val = min_val;
    let mut min_vert = [first_v; 3];
    let mut max_vert = [first_v; 3];

    let mut v = first_v;
    while v != V_HEAD {
        let c = mesh.verts[v as usize].coords;
        for i in 0..3 {
            if c[i] < min_val[i] {
                min_val[i] = c[i];
                min_vert[i] = v;
            }
            if c[i] > max_val[i] {
                max_val[i] = c[i];
                max_vert[i] = v;
            }
        }
        v = mesh.verts[v as usize].next;
    }

    let mut i = 0;
    if max_val[1] - min_val[1] > max_val[0] - min_val[0] {
        i = 1;
    }
    if max_val[2] - min_val[2] > max_val[i] - min_val[i] {
        i = 2;
    }
    if min_val[i] >= max_val[i] {
        // All points coincide; any normal will do.
        return [0.0, 0.0, 1.0];
    }

    let v1 = min_vert[i];
    let v2 = max_vert[i];
    let c1 = mesh.verts[v1 as usize].coords;
    let c2 = mesh.verts[v2 as usize].coords;
    let d1 = [c1[0] - c2[0], c1[1] - c2[1], c1[2] - c2[2]];

    let mut norm = [0.0; 3];
    let mut max_len2 = 0.0f32;
    let mut v = first_v;
    while v != V_HEAD {
        let c = mesh.verts[v as usize].coords;
        let d2 = [c[0] - c2[0], c[1] - c2[1], c[2] - c2[2]];
        let tn = [
            d1[1] * d2[2] - d1[2] * d2[1],
            d1[2] * d2[0] - d1[0] * d2[2],
            d1[0] * d2[1] - d1[1] * d2[0],
        ];
        let tl2 = tn[0] * tn[0] + tn[1] * tn[1] + tn[2] * tn[2];
        if tl2 > max_len2 {
            max_len2 = tl2;
            norm = tn;
        }
        v = mesh.verts[v as usize].next;
    }

    if max_len2 <= 0.0 {
        // Colinear input; pick the axis least aligned with the line.
        norm = [0.0; 3];
        norm[short_axis(&d1)] = 1.0;
    }
    norm
}

/// Sum the signed areas of the original contours (edges still carrying
/// positive winding); if negative, flip the t axis so the filled side of
/// a CCW contour comes out on the expected side.
fn check_orientation<D>(mesh: &mut Mesh<D>) {
    let mut area = 0.0f32;
    let mut f = mesh.faces[F_HEAD as usize].next;
    while f != F_HEAD {
        let e_start = mesh.faces[f as usize].an_edge;
        if e_start != INVALID && mesh.edges[e_start as usize].winding > 0 {
            let mut e = e_start;
            loop {
                let (os, ot) = mesh.st(mesh.edges[e as usize].org);
                let (ds, dt) = mesh.st(mesh.dst(e));
                area += (os - ds) * (ot + dt);
                e = mesh.edges[e as usize].lnext;
                if e == e_start {
                    break;
                }
            }
        }
        f = mesh.faces[f as usize].next;
    }
    if area < 0.0 {
        let mut v = mesh.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            mesh.verts[v as usize].t = -mesh.verts[v as usize].t;
            v = mesh.verts[v as usize].next;
        }
    }
}
