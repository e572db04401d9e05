// Copyright 2026 the polytess authors
// License: MIT
//
// Flattening of the finished mesh into output buffers. Ids are assigned
// densely from 0 in mesh-list traversal order, which is deterministic for
// a given input; only vertices and faces referenced by interior faces are
// numbered, so the output arrays have no gaps.

use log::debug;

use crate::mesh::{F_HEAD, INVALID, V_HEAD};
use crate::tess::{ContourVertex, ElementType, Tessellator, UNDEF};

impl<D: Clone> Tessellator<D> {
    /// Emit interior faces as polygons of up to `poly_size` vertices.
    ///
    /// Element layout per face: `poly_size` vertex ids padded with UNDEF;
    /// for `ConnectedPolygons`, `poly_size` neighbor face ids follow (UNDEF
    /// where the edge borders the exterior).
    pub(crate) fn output_polymesh(&mut self, element_type: ElementType, poly_size: usize) {
        let mesh = self.mesh.as_mut().unwrap();

        // Triangles came out of the monotonizer; coalesce them first if
        // larger polygons were requested.
        if poly_size > 3 {
            mesh.merge_convex_faces(poly_size);
        }

        let mut v = mesh.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            mesh.verts[v as usize].out_id = UNDEF;
            v = mesh.verts[v as usize].next;
        }

        let mut vertex_count = 0u32;
        let mut face_count = 0u32;
        let mut f = mesh.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            mesh.faces[f as usize].out_id = UNDEF;
            if mesh.faces[f as usize].inside {
                let e_start = mesh.faces[f as usize].an_edge;
                let mut e = e_start;
                let mut face_verts = 0;
                loop {
                    let org = mesh.edges[e as usize].org;
                    if mesh.verts[org as usize].out_id == UNDEF {
                        mesh.verts[org as usize].out_id = vertex_count;
                        vertex_count += 1;
                    }
                    face_verts += 1;
                    e = mesh.edges[e as usize].lnext;
                    if e == e_start {
                        break;
                    }
                }
                debug_assert!(face_verts <= poly_size);
                mesh.faces[f as usize].out_id = face_count;
                face_count += 1;
            }
            f = mesh.faces[f as usize].next;
        }

        self.element_count = face_count as usize;
        let stride = if element_type == ElementType::ConnectedPolygons {
            poly_size * 2
        } else {
            poly_size
        };
        self.elements = vec![UNDEF; face_count as usize * stride];
        self.vertices = vec![
            ContourVertex {
                position: [0.0; 3],
                data: None
            };
            vertex_count as usize
        ];

        let mesh = self.mesh.as_ref().unwrap();
        let mut v = mesh.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            let id = mesh.verts[v as usize].out_id;
            if id != UNDEF {
                self.vertices[id as usize] = ContourVertex {
                    position: mesh.verts[v as usize].coords,
                    data: mesh.verts[v as usize].data.clone(),
                };
            }
            v = mesh.verts[v as usize].next;
        }

        let mut out = 0usize;
        let mut f = mesh.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            if !mesh.faces[f as usize].inside {
                f = mesh.faces[f as usize].next;
                continue;
            }
            let e_start = mesh.faces[f as usize].an_edge;
            let mut e = e_start;
            let mut face_verts = 0;
            loop {
                let org = mesh.edges[e as usize].org;
                self.elements[out] = mesh.verts[org as usize].out_id;
                out += 1;
                face_verts += 1;
                e = mesh.edges[e as usize].lnext;
                if e == e_start {
                    break;
                }
            }
            out += poly_size - face_verts; // padding stays UNDEF

            if element_type == ElementType::ConnectedPolygons {
                let mut e = e_start;
                loop {
                    let rf = mesh.rface(e);
                    self.elements[out] = if rf != INVALID && mesh.faces[rf as usize].inside {
                        mesh.faces[rf as usize].out_id
                    } else {
                        UNDEF
                    };
                    out += 1;
                    e = mesh.edges[e as usize].lnext;
                    if e == e_start {
                        break;
                    }
                }
                out += poly_size - face_verts;
            }
            f = mesh.faces[f as usize].next;
        }

        debug!(
            "output: {} vertices, {} elements",
            self.vertices.len(),
            self.element_count
        );
    }

    /// Emit the boundary of the filled region: each interior face's loop
    /// becomes a contiguous run of vertices, described by a (start, count)
    /// pair in the element array. The caller has already reduced the mesh
    /// to boundary edges.
    pub(crate) fn output_contours(&mut self) {
        let mesh = self.mesh.as_ref().unwrap();

        let mut total_verts = 0usize;
        let mut total_contours = 0usize;
        let mut f = mesh.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            if mesh.faces[f as usize].inside {
                total_verts += mesh.count_face_verts(f);
                total_contours += 1;
            }
            f = mesh.faces[f as usize].next;
        }

        self.element_count = total_contours;
        self.elements = Vec::with_capacity(total_contours * 2);
        self.vertices = Vec::with_capacity(total_verts);

        let mut start = 0u32;
        let mut f = mesh.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            if !mesh.faces[f as usize].inside {
                f = mesh.faces[f as usize].next;
                continue;
            }
            let e_start = mesh.faces[f as usize].an_edge;
            let mut e = e_start;
            let mut count = 0u32;
            loop {
                let org = mesh.edges[e as usize].org;
                self.vertices.push(ContourVertex {
                    position: mesh.verts[org as usize].coords,
                    data: mesh.verts[org as usize].data.clone(),
                });
                count += 1;
                e = mesh.edges[e as usize].lnext;
                if e == e_start {
                    break;
                }
            }
            self.elements.push(start);
            self.elements.push(count);
            start += count;
            f = mesh.faces[f as usize].next;
        }

        debug!(
            "output: {} boundary contours, {} vertices",
            self.element_count,
            self.vertices.len()
        );
    }
}
