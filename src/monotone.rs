// Copyright 2026 the polytess authors
// License: MIT
//
// Fan triangulation of monotone regions. The sweep guarantees that every
// interior face it produces is monotone: any line perpendicular to the
// sweep axis meets the face interior in at most one interval.

use crate::geom::{edge_sign, vert_leq};
use crate::mesh::{sym, FaceIdx, Mesh, F_HEAD};

impl<D> Mesh<D> {
    /// Triangulate one monotone, CCW-oriented face by inserting diagonals.
    ///
    /// The boundary is split at the rightmost vertex into an upper and a
    /// lower chain, both walked right to left. At each step the chain that
    /// is further behind is advanced, fanning greedily from the frontier
    /// vertex for as long as the orientation test allows; the invariant is
    /// that the untriangulated remainder consists of one single-edge chain
    /// and one concave chain. A final fan from the shared leftmost vertex
    /// finishes the region. No vertices are created.
    ///
    /// The face must have at least three edges and actually be monotone;
    /// both are sweep invariants, violated only by internal bugs.
    pub(crate) fn tessellate_mono_region(&mut self, face: FaceIdx) {
        let mut up = self.faces[face as usize].an_edge;
        assert!(
            self.edges[up as usize].lnext != up
                && self.edges[self.edges[up as usize].lnext as usize].lnext != up,
            "monotone region with fewer than 3 edges"
        );

        // Find the edge whose origin is the rightmost vertex. The sweep
        // leaves an_edge close to it, so these loops are short.
        while vert_leq(self.st(self.dst(up)), self.st(self.edges[up as usize].org)) {
            up = self.lprev(up);
        }
        while vert_leq(self.st(self.edges[up as usize].org), self.st(self.dst(up))) {
            up = self.edges[up as usize].lnext;
        }

        let mut lo = self.lprev(up);

        while self.edges[up as usize].lnext != lo {
            if vert_leq(self.st(self.dst(up)), self.st(self.edges[lo as usize].org)) {
                // up's destination is left of lo's origin: triangles can be
                // fanned from lo's origin. The edge_goes_left test keeps us
                // progressing even through colinear runs.
                while self.edges[lo as usize].lnext != up {
                    let lo_lnext = self.edges[lo as usize].lnext;
                    if !self.edge_goes_left(lo_lnext)
                        && edge_sign(
                            self.st(self.edges[lo as usize].org),
                            self.st(self.dst(lo)),
                            self.st(self.dst(lo_lnext)),
                        ) > 0.0
                    {
                        break;
                    }
                    lo = sym(self.connect(lo_lnext, lo));
                }
                lo = self.lprev(lo);
            } else {
                // Symmetric: fan CCW triangles from up's destination.
                while self.edges[lo as usize].lnext != up {
                    let up_lprev = self.lprev(up);
                    if !self.edge_goes_right(up_lprev)
                        && edge_sign(
                            self.st(self.dst(up)),
                            self.st(self.edges[up as usize].org),
                            self.st(self.edges[up_lprev as usize].org),
                        ) < 0.0
                    {
                        break;
                    }
                    up = sym(self.connect(up, up_lprev));
                }
                up = self.edges[up as usize].lnext;
            }
        }

        // Both chains have met at the leftmost vertex; fan out the rest.
        assert!(self.edges[lo as usize].lnext != up);
        while self.edges[self.edges[lo as usize].lnext as usize].lnext != up {
            let lo_lnext = self.edges[lo as usize].lnext;
            lo = sym(self.connect(lo_lnext, lo));
        }
    }

    /// Triangulate every face marked inside.
    pub(crate) fn tessellate_interior(&mut self) {
        let mut f = self.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            // Triangulation appends faces; remember the successor first.
            let next = self.faces[f as usize].next;
            if self.faces[f as usize].inside {
                self.tessellate_mono_region(f);
            }
            f = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::mesh::{Mesh, F_HEAD, INVALID};

    /// Build a single closed contour in the mesh with projected coords and
    /// mark its left face inside, the way the sweep would leave a convex
    /// monotone region.
    fn monotone_loop(points: &[(f32, f32)]) -> (Mesh<()>, u32) {
        let mut mesh = Mesh::<()>::new();
        let mut e = INVALID;
        for &(s, t) in points {
            if e == INVALID {
                e = mesh.make_edge();
                mesh.splice(e, crate::mesh::sym(e));
            } else {
                mesh.split_edge(e);
                e = mesh.edges[e as usize].lnext;
            }
            let org = mesh.edges[e as usize].org;
            mesh.verts[org as usize].s = s;
            mesh.verts[org as usize].t = t;
        }
        // Pick the orientation whose loop is CCW in (s, t).
        let f = if signed_area(&mesh, mesh.edges[e as usize].lface) > 0.0 {
            mesh.edges[e as usize].lface
        } else {
            mesh.rface(e)
        };
        mesh.faces[f as usize].inside = true;
        (mesh, f)
    }

    fn signed_area(mesh: &Mesh<()>, f: u32) -> f32 {
        let start = mesh.faces[f as usize].an_edge;
        let mut e = start;
        let mut area = 0.0;
        loop {
            let (s0, t0) = mesh.st(mesh.edges[e as usize].org);
            let (s1, t1) = mesh.st(mesh.dst(e));
            area += s0 * t1 - t0 * s1;
            e = mesh.edges[e as usize].lnext;
            if e == start {
                break;
            }
        }
        area / 2.0
    }

    fn inside_triangles(mesh: &Mesh<()>) -> usize {
        let mut n = 0;
        let mut f = mesh.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            if mesh.faces[f as usize].inside {
                assert_eq!(mesh.count_face_verts(f), 3, "non-triangle after fan");
                n += 1;
            }
            f = mesh.faces[f as usize].next;
        }
        n
    }

    #[test]
    fn triangle_is_left_alone() {
        let (mut mesh, f) = monotone_loop(&[(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)]);
        mesh.tessellate_mono_region(f);
        assert_eq!(inside_triangles(&mesh), 1);
    }

    #[test]
    fn convex_polygon_fans_into_n_minus_2_triangles() {
        let (mut mesh, f) = monotone_loop(&[
            (0.0, 0.0),
            (2.0, -1.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 3.0),
            (0.0, 2.0),
        ]);
        mesh.tessellate_mono_region(f);
        assert_eq!(inside_triangles(&mesh), 4);
        mesh.check();
    }

    #[test]
    fn nonconvex_monotone_region_triangulates() {
        // Monotone in s but with a reflex vertex on the lower chain.
        let (mut mesh, f) = monotone_loop(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 0.3),
            (3.0, 1.2),
            (4.0, 0.0),
            (4.0, 3.0),
            (0.0, 3.0),
        ]);
        mesh.tessellate_mono_region(f);
        assert_eq!(inside_triangles(&mesh), 5);
        mesh.check();
    }

    #[test]
    fn tessellate_interior_skips_outside_faces() {
        let (mut mesh, _f) = monotone_loop(&[(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (0.0, 2.0)]);
        mesh.tessellate_interior();
        assert_eq!(inside_triangles(&mesh), 2);
        // The exterior face was not subdivided.
        let mut outside = 0;
        let mut f = mesh.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            if !mesh.faces[f as usize].inside {
                outside += 1;
            }
            f = mesh.faces[f as usize].next;
        }
        assert_eq!(outside, 1);
    }
}
