// Copyright 2026 the polytess authors
// License: MIT
//
// Arena-allocated half-edge mesh. Every pointer of the classic
// quad-edge-style structure is a u32 index into one of three Vecs, with
// INVALID standing in for null. Half-edges are allocated in pairs at
// consecutive indices so that sym(e) == e ^ 1; the even-indexed half is
// the canonical one. Index 0 of each arena is a sentinel list head, so
// the global vertex/face/edge lists are circular with a fixed anchor.
//
// Removal unlinks records but never reuses arena slots; a mesh lives for
// a single tessellation, so slots stay cheap and indices stay stable.

use crate::geom::{vert_ccw, vert_leq, Real};

pub const INVALID: u32 = u32::MAX;

/// Index into `Mesh::verts`.
pub type VertIdx = u32;
/// Index into `Mesh::faces`.
pub type FaceIdx = u32;
/// Index into `Mesh::edges`.
pub type EdgeIdx = u32;

/// The other half of an edge pair.
#[inline(always)]
pub fn sym(e: EdgeIdx) -> EdgeIdx {
    e ^ 1
}

#[derive(Clone, Debug)]
pub struct Vertex<D> {
    pub next: VertIdx,
    pub prev: VertIdx,
    pub an_edge: EdgeIdx,
    /// Input-space position.
    pub coords: [Real; 3],
    /// Projected sweep-plane coordinates.
    pub s: Real,
    pub t: Real,
    /// Caller payload; `None` for synthesized vertices without combined data.
    pub data: Option<D>,
    /// Event-queue handle while the vertex awaits processing.
    pub event_handle: i32,
    /// Dense output id, or `INVALID` until assigned.
    pub out_id: u32,
}

impl<D> Default for Vertex<D> {
    fn default() -> Self {
        Vertex {
            next: INVALID,
            prev: INVALID,
            an_edge: INVALID,
            coords: [0.0; 3],
            s: 0.0,
            t: 0.0,
            data: None,
            event_handle: crate::queue::NO_HANDLE,
            out_id: INVALID,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Face {
    pub next: FaceIdx,
    pub prev: FaceIdx,
    pub an_edge: EdgeIdx,
    /// Dense output id, or `INVALID` until assigned.
    pub out_id: u32,
    /// Region classification under the active winding rule.
    pub inside: bool,
}

impl Default for Face {
    fn default() -> Self {
        Face {
            next: INVALID,
            prev: INVALID,
            an_edge: INVALID,
            out_id: INVALID,
            inside: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Next edge in the global list; even halves link to even halves.
    pub next: EdgeIdx,
    /// Next edge CCW around the origin vertex.
    pub onext: EdgeIdx,
    /// Next edge CCW around the left face.
    pub lnext: EdgeIdx,
    pub org: VertIdx,
    pub lface: FaceIdx,
    /// Active region currently keyed by this edge, if any.
    pub region: u32,
    /// Winding delta crossing from the right face to the left face.
    pub winding: i32,
}

impl Default for HalfEdge {
    fn default() -> Self {
        HalfEdge {
            next: INVALID,
            onext: INVALID,
            lnext: INVALID,
            org: INVALID,
            lface: INVALID,
            region: INVALID,
            winding: 0,
        }
    }
}

pub const V_HEAD: VertIdx = 0;
pub const F_HEAD: FaceIdx = 0;
pub const E_HEAD: EdgeIdx = 0;

pub struct Mesh<D> {
    pub verts: Vec<Vertex<D>>,
    pub faces: Vec<Face>,
    pub edges: Vec<HalfEdge>,
}

impl<D> Mesh<D> {
    pub fn new() -> Self {
        let mut m = Mesh {
            verts: Vec::new(),
            faces: Vec::new(),
            edges: Vec::new(),
        };

        let mut v_head = Vertex::default();
        v_head.next = V_HEAD;
        v_head.prev = V_HEAD;
        m.verts.push(v_head);

        let mut f_head = Face::default();
        f_head.next = F_HEAD;
        f_head.prev = F_HEAD;
        m.faces.push(f_head);

        let mut e_head = HalfEdge::default();
        e_head.next = E_HEAD;
        let mut e_head_sym = HalfEdge::default();
        e_head_sym.next = sym(E_HEAD);
        m.edges.push(e_head);
        m.edges.push(e_head_sym);

        m
    }

    // ───────────────────────── navigation ─────────────────────────

    /// Left face of the symmetric half, i.e. the face to the right of e.
    #[inline]
    pub fn rface(&self, e: EdgeIdx) -> FaceIdx {
        self.edges[sym(e) as usize].lface
    }

    /// Destination vertex of e.
    #[inline]
    pub fn dst(&self, e: EdgeIdx) -> VertIdx {
        self.edges[sym(e) as usize].org
    }

    /// Previous edge CCW around the origin: Sym->Lnext.
    #[inline]
    pub fn oprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[sym(e) as usize].lnext
    }

    /// Previous edge CCW around the left face: Onext->Sym.
    #[inline]
    pub fn lprev(&self, e: EdgeIdx) -> EdgeIdx {
        sym(self.edges[e as usize].onext)
    }

    /// Previous edge CCW around the right face: Sym->Onext.
    #[inline]
    pub fn rprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.edges[sym(e) as usize].onext
    }

    /// Next edge CCW around the destination: (Sym->Onext)->Sym.
    #[inline]
    pub fn dnext(&self, e: EdgeIdx) -> EdgeIdx {
        sym(self.edges[sym(e) as usize].onext)
    }

    /// Projected coordinates of a vertex as a pair, for the geom predicates.
    #[inline]
    pub fn st(&self, v: VertIdx) -> (Real, Real) {
        let v = &self.verts[v as usize];
        (v.s, v.t)
    }

    #[inline]
    pub fn edge_goes_left(&self, e: EdgeIdx) -> bool {
        vert_leq(self.st(self.dst(e)), self.st(self.edges[e as usize].org))
    }

    #[inline]
    pub fn edge_goes_right(&self, e: EdgeIdx) -> bool {
        vert_leq(self.st(self.edges[e as usize].org), self.st(self.dst(e)))
    }

    // ───────────────────────── allocation ─────────────────────────

    /// Allocate a half-edge pair and link it into the global edge list
    /// before `e_next`. Returns the even (canonical) half. The pair is a
    /// self-loop: onext and lnext point within the pair, org/lface unset.
    fn make_edge_pair(&mut self, e_next: EdgeIdx) -> EdgeIdx {
        let e_next = e_next & !1; // canonical half
        let e_new = self.edges.len() as EdgeIdx;
        let e_sym = sym(e_new);

        // The prev link of the global list is stored in Sym->next.
        let e_prev = self.edges[sym(e_next) as usize].next;

        let mut e = HalfEdge::default();
        e.next = e_next;
        e.onext = e_new;
        e.lnext = e_sym;
        let mut es = HalfEdge::default();
        es.next = e_prev;
        es.onext = e_sym;
        es.lnext = e_new;
        self.edges.push(e);
        self.edges.push(es);

        self.edges[sym(e_prev) as usize].next = e_new;
        self.edges[sym(e_next) as usize].next = e_sym;

        e_new
    }

    /// Allocate a vertex before `v_next` in the global list, owning the
    /// origin ring of `e_orig`.
    fn make_vertex(&mut self, e_orig: EdgeIdx, v_next: VertIdx) -> VertIdx {
        let v_new = self.verts.len() as VertIdx;
        let v_prev = self.verts[v_next as usize].prev;

        let mut v = Vertex::default();
        v.prev = v_prev;
        v.next = v_next;
        v.an_edge = e_orig;
        self.verts.push(v);

        self.verts[v_prev as usize].next = v_new;
        self.verts[v_next as usize].prev = v_new;

        let mut e = e_orig;
        loop {
            self.edges[e as usize].org = v_new;
            e = self.edges[e as usize].onext;
            if e == e_orig {
                break;
            }
        }
        v_new
    }

    /// Allocate a face before `f_next` in the global list, owning the
    /// left loop of `e_orig`. The new face inherits `f_next`'s inside flag.
    fn make_face(&mut self, e_orig: EdgeIdx, f_next: FaceIdx) -> FaceIdx {
        let f_new = self.faces.len() as FaceIdx;
        let f_prev = self.faces[f_next as usize].prev;

        let mut f = Face::default();
        f.prev = f_prev;
        f.next = f_next;
        f.an_edge = e_orig;
        f.inside = self.faces[f_next as usize].inside;
        self.faces.push(f);

        self.faces[f_prev as usize].next = f_new;
        self.faces[f_next as usize].prev = f_new;

        let mut e = e_orig;
        loop {
            self.edges[e as usize].lface = f_new;
            e = self.edges[e as usize].lnext;
            if e == e_orig {
                break;
            }
        }
        f_new
    }

    /// Unlink a vertex, repointing its origin ring to `new_org` (which may
    /// be INVALID when the ring dies with it).
    fn kill_vertex(&mut self, v_del: VertIdx, new_org: VertIdx) {
        let e_start = self.verts[v_del as usize].an_edge;
        if e_start != INVALID {
            let mut e = e_start;
            loop {
                self.edges[e as usize].org = new_org;
                e = self.edges[e as usize].onext;
                if e == e_start {
                    break;
                }
            }
        }
        let v_prev = self.verts[v_del as usize].prev;
        let v_next = self.verts[v_del as usize].next;
        self.verts[v_prev as usize].next = v_next;
        self.verts[v_next as usize].prev = v_prev;
        self.verts[v_del as usize].next = INVALID;
        self.verts[v_del as usize].prev = INVALID;
        self.verts[v_del as usize].an_edge = INVALID;
    }

    /// Unlink a face, repointing its loop to `new_lface`.
    fn kill_face(&mut self, f_del: FaceIdx, new_lface: FaceIdx) {
        let e_start = self.faces[f_del as usize].an_edge;
        if e_start != INVALID {
            let mut e = e_start;
            loop {
                self.edges[e as usize].lface = new_lface;
                e = self.edges[e as usize].lnext;
                if e == e_start {
                    break;
                }
            }
        }
        let f_prev = self.faces[f_del as usize].prev;
        let f_next = self.faces[f_del as usize].next;
        self.faces[f_prev as usize].next = f_next;
        self.faces[f_next as usize].prev = f_prev;
        self.faces[f_del as usize].next = INVALID;
        self.faces[f_del as usize].prev = INVALID;
        self.faces[f_del as usize].an_edge = INVALID;
    }

    /// Unlink an edge pair from the global edge list.
    fn kill_edge(&mut self, e_del: EdgeIdx) {
        let e_del = e_del & !1;
        let e_next = self.edges[e_del as usize].next;
        let e_prev = self.edges[sym(e_del) as usize].next;
        self.edges[sym(e_next) as usize].next = e_prev;
        self.edges[sym(e_prev) as usize].next = e_next;
        self.edges[e_del as usize].next = INVALID;
        self.edges[sym(e_del) as usize].next = INVALID;
    }

    /// The Guibas–Stolfi splice primitive: swaps a->Onext and b->Onext and
    /// fixes the lnext links of the affected symmetric halves.
    fn raw_splice(edges: &mut [HalfEdge], a: EdgeIdx, b: EdgeIdx) {
        let a_onext = edges[a as usize].onext;
        let b_onext = edges[b as usize].onext;
        edges[sym(a_onext) as usize].lnext = b;
        edges[sym(b_onext) as usize].lnext = a;
        edges[a as usize].onext = b_onext;
        edges[b as usize].onext = a_onext;
    }

    // ───────────────────────── operations ─────────────────────────

    /// Create an isolated edge: one pair, two vertices, one face.
    pub fn make_edge(&mut self) -> EdgeIdx {
        let e = self.make_edge_pair(E_HEAD);
        let v1 = self.make_vertex(e, V_HEAD);
        let v2 = self.make_vertex(sym(e), V_HEAD);
        self.make_face(e, F_HEAD);
        self.edges[e as usize].org = v1;
        self.edges[sym(e) as usize].org = v2;
        e
    }

    /// The fundamental topology operation. If e_org and e_dst have
    /// distinct origins, the origins are merged (e_dst's dies); if they
    /// already share one, it is split in two. Likewise for their left
    /// faces, in the opposite direction.
    pub fn splice(&mut self, e_org: EdgeIdx, e_dst: EdgeIdx) {
        if e_org == e_dst {
            return;
        }

        let org_org = self.edges[e_org as usize].org;
        let dst_org = self.edges[e_dst as usize].org;
        let org_lface = self.edges[e_org as usize].lface;
        let dst_lface = self.edges[e_dst as usize].lface;

        let joining_vertices = dst_org != org_org;
        let joining_loops = dst_lface != org_lface;

        if joining_vertices {
            self.kill_vertex(dst_org, org_org);
        }
        if joining_loops {
            self.kill_face(dst_lface, org_lface);
        }

        Self::raw_splice(&mut self.edges, e_org, e_dst);

        if !joining_vertices {
            // One origin ring became two; the new vertex owns e_dst's ring.
            self.make_vertex(e_dst, org_org);
            self.verts[org_org as usize].an_edge = e_org;
        }
        if !joining_loops {
            self.make_face(e_dst, org_lface);
            self.faces[org_lface as usize].an_edge = e_org;
        }
    }

    /// Remove an edge. Joins its two faces if they are distinct, or splits
    /// the shared face otherwise; isolated endpoints die with it.
    pub fn delete_edge(&mut self, e_del: EdgeIdx) {
        let e_del_sym = sym(e_del);

        let lface = self.edges[e_del as usize].lface;
        let rface = self.rface(e_del);
        let joining_loops = lface != rface;
        if joining_loops {
            self.kill_face(lface, rface);
        }

        if self.edges[e_del as usize].onext == e_del {
            let org = self.edges[e_del as usize].org;
            self.kill_vertex(org, INVALID);
        } else {
            let rf = self.rface(e_del);
            self.faces[rf as usize].an_edge = self.oprev(e_del);
            let org = self.edges[e_del as usize].org;
            self.verts[org as usize].an_edge = self.edges[e_del as usize].onext;

            let e_del_oprev = self.oprev(e_del);
            Self::raw_splice(&mut self.edges, e_del, e_del_oprev);
            if !joining_loops {
                let lf = self.edges[e_del as usize].lface;
                self.make_face(e_del, lf);
            }
        }

        if self.edges[e_del_sym as usize].onext == e_del_sym {
            let org = self.edges[e_del_sym as usize].org;
            self.kill_vertex(org, INVALID);
            let lf = self.edges[e_del as usize].lface;
            self.kill_face(lf, INVALID);
        } else {
            let lf = self.edges[e_del as usize].lface;
            self.faces[lf as usize].an_edge = self.oprev(e_del_sym);
            let org = self.edges[e_del_sym as usize].org;
            self.verts[org as usize].an_edge = self.edges[e_del_sym as usize].onext;
            let e_sym_oprev = self.oprev(e_del_sym);
            Self::raw_splice(&mut self.edges, e_del_sym, e_sym_oprev);
        }

        self.kill_edge(e_del);
    }

    /// Create a new edge e_new such that e_new == e_org->Lnext, with a
    /// fresh vertex as its destination. Both halves share e_org's left face.
    fn add_edge_vertex(&mut self, e_org: EdgeIdx) -> EdgeIdx {
        let e_new = self.make_edge_pair(e_org);
        let e_new_sym = sym(e_new);

        let e_org_lnext = self.edges[e_org as usize].lnext;
        Self::raw_splice(&mut self.edges, e_new, e_org_lnext);

        let e_org_dst = self.dst(e_org);
        self.edges[e_new as usize].org = e_org_dst;
        self.make_vertex(e_new_sym, e_org_dst);

        let lf = self.edges[e_org as usize].lface;
        self.edges[e_new as usize].lface = lf;
        self.edges[e_new_sym as usize].lface = lf;

        e_new
    }

    /// Split e_org into two edges joined by a new vertex, which becomes
    /// e_org's new destination. Returns the new edge, whose origin is the
    /// new vertex; it inherits e_org's winding.
    pub fn split_edge(&mut self, e_org: EdgeIdx) -> EdgeIdx {
        let temp = self.add_edge_vertex(e_org);
        let e_new = sym(temp);

        // Disconnect e_org from its destination and reconnect to the new vertex.
        let e_org_sym = sym(e_org);
        let e_org_sym_oprev = self.oprev(e_org_sym);
        Self::raw_splice(&mut self.edges, e_org_sym, e_org_sym_oprev);
        Self::raw_splice(&mut self.edges, e_org_sym, e_new);

        let e_new_org = self.edges[e_new as usize].org;
        self.edges[e_org_sym as usize].org = e_new_org;
        let e_new_dst = self.dst(e_new);
        self.verts[e_new_dst as usize].an_edge = sym(e_new);
        let rf = self.rface(e_org);
        self.edges[sym(e_new) as usize].lface = rf;
        self.edges[e_new as usize].winding = self.edges[e_org as usize].winding;
        self.edges[sym(e_new) as usize].winding = self.edges[e_org_sym as usize].winding;

        e_new
    }

    /// Connect e_org->Dst to e_dst->Org with a new edge. If the two edges
    /// were in distinct faces the faces are joined; if they shared a face
    /// it is split, the new face being on e_new's left.
    pub fn connect(&mut self, e_org: EdgeIdx, e_dst: EdgeIdx) -> EdgeIdx {
        let e_new = self.make_edge_pair(e_org);
        let e_new_sym = sym(e_new);

        let e_dst_lface = self.edges[e_dst as usize].lface;
        let e_org_lface = self.edges[e_org as usize].lface;
        let joining_loops = e_dst_lface != e_org_lface;
        if joining_loops {
            self.kill_face(e_dst_lface, e_org_lface);
        }

        let e_org_lnext = self.edges[e_org as usize].lnext;
        Self::raw_splice(&mut self.edges, e_new, e_org_lnext);
        Self::raw_splice(&mut self.edges, e_new_sym, e_dst);

        self.edges[e_new as usize].org = self.dst(e_org);
        self.edges[e_new_sym as usize].org = self.edges[e_dst as usize].org;
        self.edges[e_new as usize].lface = e_org_lface;
        self.edges[e_new_sym as usize].lface = e_org_lface;

        self.faces[e_org_lface as usize].an_edge = e_new_sym;

        if !joining_loops {
            self.make_face(e_new, e_org_lface);
        }
        e_new
    }

    /// Destroy a face outright. Its edges lose their left face; edges left
    /// with no face on either side are deleted entirely.
    pub fn zap_face(&mut self, f_zap: FaceIdx) {
        let e_start = self.faces[f_zap as usize].an_edge;
        let mut e_next = self.edges[e_start as usize].lnext;

        loop {
            let e = e_next;
            e_next = self.edges[e as usize].lnext;

            self.edges[e as usize].lface = INVALID;
            if self.rface(e) == INVALID {
                if self.edges[e as usize].onext == e {
                    let org = self.edges[e as usize].org;
                    if org != INVALID {
                        self.kill_vertex(org, INVALID);
                    }
                } else {
                    let org = self.edges[e as usize].org;
                    self.verts[org as usize].an_edge = self.edges[e as usize].onext;
                    let e_oprev = self.oprev(e);
                    Self::raw_splice(&mut self.edges, e, e_oprev);
                }
                let e_sym = sym(e);
                if self.edges[e_sym as usize].onext == e_sym {
                    let org = self.edges[e_sym as usize].org;
                    if org != INVALID {
                        self.kill_vertex(org, INVALID);
                    }
                } else {
                    let org = self.edges[e_sym as usize].org;
                    self.verts[org as usize].an_edge = self.edges[e_sym as usize].onext;
                    let e_sym_oprev = self.oprev(e_sym);
                    Self::raw_splice(&mut self.edges, e_sym, e_sym_oprev);
                }
                self.kill_edge(e);
            }

            if e == e_start {
                break;
            }
        }

        let f_prev = self.faces[f_zap as usize].prev;
        let f_next = self.faces[f_zap as usize].next;
        self.faces[f_prev as usize].next = f_next;
        self.faces[f_next as usize].prev = f_prev;
        self.faces[f_zap as usize].next = INVALID;
        self.faces[f_zap as usize].prev = INVALID;
        self.faces[f_zap as usize].an_edge = INVALID;
    }

    /// Destroy every face not marked inside.
    pub fn discard_exterior(&mut self) {
        let mut f = self.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            let next = self.faces[f as usize].next;
            if !self.faces[f as usize].inside {
                self.zap_face(f);
            }
            f = next;
        }
    }

    pub fn count_face_verts(&self, f: FaceIdx) -> usize {
        let e_start = self.faces[f as usize].an_edge;
        let mut e = e_start;
        let mut n = 0;
        loop {
            n += 1;
            e = self.edges[e as usize].lnext;
            if e == e_start {
                break;
            }
        }
        n
    }

    /// Delete interior edges whose removal leaves a convex face of at most
    /// `max_verts_per_face` vertices. Assumes the interior is triangulated.
    pub fn merge_convex_faces(&mut self, max_verts_per_face: usize) {
        let mut e = self.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            let mut e_next = self.edges[e as usize].next;

            let lface = self.edges[e as usize].lface;
            let rface = self.edges[sym(e) as usize].lface;
            if lface == INVALID
                || !self.faces[lface as usize].inside
                || rface == INVALID
                || !self.faces[rface as usize].inside
            {
                e = e_next;
                continue;
            }

            let left_nv = self.count_face_verts(lface);
            let right_nv = self.count_face_verts(rface);
            if left_nv + right_nv - 2 > max_verts_per_face {
                e = e_next;
                continue;
            }

            // The merged boundary stays convex iff both corners opened up
            // by removing e turn counter-clockwise.
            let va = self.edges[self.lprev(e) as usize].org;
            let vb = self.edges[e as usize].org;
            let vc = self.dst(self.edges[sym(e) as usize].lnext);
            let vd = self.edges[self.lprev(sym(e)) as usize].org;
            let ve = self.edges[sym(e) as usize].org;
            let vf = self.dst(self.edges[e as usize].lnext);

            if vert_ccw(self.st(va), self.st(vb), self.st(vc))
                && vert_ccw(self.st(vd), self.st(ve), self.st(vf))
            {
                if e == e_next || e == sym(e_next) {
                    e_next = self.edges[e_next as usize].next;
                }
                self.delete_edge(e);
            }
            e = e_next;
        }
    }

    /// Re-tag windings so interior regions carry `value` and exterior
    /// regions 0. Non-boundary edges (same classification on both sides)
    /// are zeroed, or deleted when `keep_only_boundary` is set.
    pub fn set_winding_number(&mut self, value: i32, keep_only_boundary: bool) {
        let mut e = self.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            let e_next = self.edges[e as usize].next;
            let lf = self.edges[e as usize].lface;
            let rf = self.rface(e);
            let lf_inside = lf != INVALID && self.faces[lf as usize].inside;
            let rf_inside = rf != INVALID && self.faces[rf as usize].inside;

            if rf_inside != lf_inside {
                let w = if lf_inside { value } else { -value };
                self.edges[e as usize].winding = w;
                self.edges[sym(e) as usize].winding = -w;
            } else if !keep_only_boundary {
                self.edges[e as usize].winding = 0;
                self.edges[sym(e) as usize].winding = 0;
            } else {
                self.delete_edge(e);
            }
            e = e_next;
        }
    }

    /// Structural consistency check, debug builds only: symmetric pairing,
    /// ring membership, and list linkage. Cost is linear in the mesh, so it
    /// runs once per tessellation rather than per operation.
    #[cfg(debug_assertions)]
    pub fn check(&self) {
        // Face loops: every edge in a face's lnext ring names that face,
        // and lnext/lprev are inverses.
        let mut f = self.faces[F_HEAD as usize].next;
        while f != F_HEAD {
            let e_start = self.faces[f as usize].an_edge;
            assert_ne!(e_start, INVALID, "face {f} has no anchor edge");
            let mut e = e_start;
            loop {
                assert_eq!(self.edges[e as usize].lface, f, "edge {e} outside its face loop");
                let ln = self.edges[e as usize].lnext;
                assert_eq!(self.lprev(ln), e, "lnext/lprev mismatch at edge {e}");
                e = ln;
                if e == e_start {
                    break;
                }
            }
            f = self.faces[f as usize].next;
        }

        // Vertex rings: every edge in an origin ring starts at that vertex.
        let mut v = self.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            let e_start = self.verts[v as usize].an_edge;
            assert_ne!(e_start, INVALID, "vertex {v} has no anchor edge");
            let mut e = e_start;
            loop {
                assert_eq!(self.edges[e as usize].org, v, "edge {e} outside its origin ring");
                e = self.edges[e as usize].onext;
                if e == e_start {
                    break;
                }
            }
            v = self.verts[v as usize].next;
        }

        // Live edges: winding deltas of a pair are negations of each other.
        let mut e = self.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            assert_eq!(
                self.edges[e as usize].winding,
                -self.edges[sym(e) as usize].winding,
                "edge pair {e} winding not antisymmetric"
            );
            assert_ne!(self.edges[e as usize].org, INVALID);
            e = self.edges[e as usize].next;
        }
    }
}

impl<D> Default for Mesh<D> {
    fn default() -> Self {
        Self::new()
    }
}
