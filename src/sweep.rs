// Copyright 2026 the polytess authors
// License: MIT
//
// The sweep engine. Events (vertices) are pulled left to right from the
// queue; the regions between edges currently crossing the sweep line live
// in the status list, ordered bottom to top. Each region accumulates a
// winding number from which its inside/outside classification follows.
// Crossing edges are cut at a synthesized vertex and re-queued, so the
// mesh the sweep leaves behind is a planar subdivision whose interior
// faces are all monotone.
//
// Two sentinel regions at t = ±(bbox + margin) bracket the real ones, so
// every event falls between two regions and the edge-ordering predicate
// never runs off the ends of the list.
//
// A "fixable" upper edge is a temporary edge connecting a right-local
// vertex to the region above it; it is replaced (or discarded) as soon as
// a real right-going edge shows up.

use log::{debug, trace, warn};

use crate::geom::{edge_eval, edge_intersect, edge_sign, vert_eq, vert_leq, vert_l1_dist, Real};
use crate::mesh::{sym, EdgeIdx, Mesh, VertIdx, E_HEAD, INVALID, V_HEAD};
use crate::queue::{EventQueue, NO_HANDLE};
use crate::status::{NodeIdx, StatusList, HEAD};
use crate::tess::{CombineCallback, WindingRule};

pub(crate) type RegionIdx = u32;

#[derive(Clone, Debug)]
pub(crate) struct ActiveRegion {
    /// Upper bounding edge, directed right to left.
    pub e_up: EdgeIdx,
    /// This region's node in the status list.
    pub node: NodeIdx,
    /// Accumulated winding number of the region below e_up.
    pub winding: i32,
    pub inside: bool,
    pub sentinel: bool,
    /// An adjacent edge changed; re-check ordering and intersections.
    pub dirty: bool,
    /// e_up is a temporary edge to be replaced by a real one.
    pub fix_upper_edge: bool,
}

impl Default for ActiveRegion {
    fn default() -> Self {
        ActiveRegion {
            e_up: INVALID,
            node: HEAD,
            winding: 0,
            inside: false,
            sentinel: false,
            dirty: false,
            fix_upper_edge: false,
        }
    }
}

/// Ordering of two active regions at the current sweep position: is r1's
/// upper edge at or below r2's where the sweep line crosses them? Edges
/// ending exactly at the event are ordered by slope.
fn region_leq<D>(
    mesh: &Mesh<D>,
    regions: &[Option<ActiveRegion>],
    event: VertIdx,
    event_st: (Real, Real),
    r1: RegionIdx,
    r2: RegionIdx,
) -> bool {
    let e1 = regions[r1 as usize].as_ref().unwrap().e_up;
    let e2 = regions[r2 as usize].as_ref().unwrap().e_up;
    let e1_dst = mesh.dst(e1);
    let e2_dst = mesh.dst(e2);
    let e1_org = mesh.edges[e1 as usize].org;
    let e2_org = mesh.edges[e2 as usize].org;

    if e1_dst == event {
        if e2_dst == event {
            if vert_leq(mesh.st(e1_org), mesh.st(e2_org)) {
                return edge_sign(mesh.st(e2_dst), mesh.st(e1_org), mesh.st(e2_org)) <= 0.0;
            }
            return edge_sign(mesh.st(e1_dst), mesh.st(e2_org), mesh.st(e1_org)) >= 0.0;
        }
        return edge_sign(mesh.st(e2_dst), event_st, mesh.st(e2_org)) <= 0.0;
    }
    if e2_dst == event {
        return edge_sign(mesh.st(e1_dst), event_st, mesh.st(e1_org)) >= 0.0;
    }

    let t1 = edge_eval(mesh.st(e1_dst), event_st, mesh.st(e1_org));
    let t2 = edge_eval(mesh.st(e2_dst), event_st, mesh.st(e2_org));
    t1 >= t2
}

fn add_winding<D>(mesh: &mut Mesh<D>, e_dst: EdgeIdx, e_src: EdgeIdx) {
    mesh.edges[e_dst as usize].winding += mesh.edges[e_src as usize].winding;
    mesh.edges[sym(e_dst) as usize].winding += mesh.edges[sym(e_src) as usize].winding;
}

/// Weights of one edge's endpoints for an intersection vertex: the edge
/// contributes half the total, split inversely to each endpoint's L1
/// distance from the intersection. Accumulates the weighted position.
fn vertex_weights<D>(
    mesh: &Mesh<D>,
    isect: (Real, Real),
    org: VertIdx,
    dst: VertIdx,
    coords: &mut [Real; 3],
) -> (Real, Real) {
    let t1 = vert_l1_dist(mesh.st(org), isect);
    let t2 = vert_l1_dist(mesh.st(dst), isect);
    let (w0, w1) = if t1 + t2 > 0.0 {
        (0.5 * t2 / (t1 + t2), 0.5 * t1 / (t1 + t2))
    } else {
        (0.25, 0.25)
    };
    let org_coords = mesh.verts[org as usize].coords;
    let dst_coords = mesh.verts[dst as usize].coords;
    for i in 0..3 {
        coords[i] += w0 * org_coords[i] + w1 * dst_coords[i];
    }
    (w0, w1)
}

pub(crate) struct Sweep<'a, 'f, D> {
    mesh: &'a mut Mesh<D>,
    status: StatusList,
    queue: EventQueue,
    regions: Vec<Option<ActiveRegion>>,
    free_regions: Vec<RegionIdx>,
    winding_rule: WindingRule,
    combine: Option<&'a mut CombineCallback<'f, D>>,
    /// Current event vertex; identity comparisons against it drive the
    /// degenerate-case handling.
    event: VertIdx,
    event_s: Real,
    event_t: Real,
    warned_missing_combine: bool,
}

impl<'a, 'f, D: Clone> Sweep<'a, 'f, D> {
    pub(crate) fn new(
        mesh: &'a mut Mesh<D>,
        winding_rule: WindingRule,
        combine: Option<&'a mut CombineCallback<'f, D>>,
    ) -> Self {
        Sweep {
            mesh,
            status: StatusList::new(),
            queue: EventQueue::new(),
            regions: Vec::new(),
            free_regions: Vec::new(),
            winding_rule,
            combine,
            event: INVALID,
            event_s: 0.0,
            event_t: 0.0,
            warned_missing_combine: false,
        }
    }

    /// Compute the planar subdivision of the projected contours and mark
    /// every face inside or outside per the winding rule. On return the
    /// queue is drained and the status list holds nothing but history.
    pub(crate) fn run(&mut self, bmin: [Real; 2], bmax: [Real; 2]) {
        self.remove_degenerate_edges();
        self.init_event_queue();
        self.init_status(bmin, bmax);

        loop {
            let v = self.queue.extract_min();
            if v == INVALID {
                break;
            }
            // Merge everything sitting at exactly this position before
            // processing, so coincident vertices act as a single event.
            loop {
                let v_next = self.queue.minimum();
                if v_next == INVALID || !vert_eq(self.mesh.st(v_next), self.mesh.st(v)) {
                    break;
                }
                let v_next = self.queue.extract_min();
                trace!("merging coincident vertices {v} and {v_next}");
                let an1 = self.mesh.verts[v as usize].an_edge;
                let an2 = self.mesh.verts[v_next as usize].an_edge;
                self.splice_merge_vertices(an1, an2);
            }
            self.sweep_event(v);
        }

        self.finish();
    }

    // ───────────────────────── setup / teardown ─────────────────────────

    /// Zero-length edges are spliced out; contours degenerated to one or
    /// two edges are removed entirely.
    fn remove_degenerate_edges(&mut self) {
        let mut e = self.mesh.edges[E_HEAD as usize].next;
        while e != E_HEAD {
            let mut e_next = self.mesh.edges[e as usize].next;
            let mut e_lnext = self.mesh.edges[e as usize].lnext;

            let org = self.mesh.edges[e as usize].org;
            if vert_eq(self.mesh.st(org), self.mesh.st(self.mesh.dst(e)))
                && self.mesh.edges[e_lnext as usize].lnext != e
            {
                self.splice_merge_vertices(e_lnext, e);
                self.mesh.delete_edge(e);
                e = e_lnext;
                e_lnext = self.mesh.edges[e as usize].lnext;
            }
            if self.mesh.edges[e_lnext as usize].lnext == e {
                if e_lnext != e {
                    if e_lnext == e_next || e_lnext == sym(e_next) {
                        e_next = self.mesh.edges[e_next as usize].next;
                    }
                    self.mesh.delete_edge(e_lnext);
                }
                if e == e_next || e == sym(e_next) {
                    e_next = self.mesh.edges[e_next as usize].next;
                }
                self.mesh.delete_edge(e);
            }
            e = e_next;
        }
    }

    fn init_event_queue(&mut self) {
        let mut count = 0usize;
        let mut v = self.mesh.verts[V_HEAD as usize].next;
        while v != V_HEAD {
            let (s, t) = self.mesh.st(v);
            let handle = self.queue.insert(s, t, v);
            self.mesh.verts[v as usize].event_handle = handle;
            v = self.mesh.verts[v as usize].next;
            count += 1;
        }
        self.queue.init();
        debug!("event queue holds {count} contour vertices");
    }

    /// Two horizontal sentinel edges bracket the real geometry, inflated
    /// well past the bounding box so no event or intersection escapes.
    fn init_status(&mut self, bmin: [Real; 2], bmax: [Real; 2]) {
        let w = (bmax[0] - bmin[0]) + 0.01;
        let h = (bmax[1] - bmin[1]) + 0.01;
        self.add_sentinel(bmin[0] - w, bmax[0] + w, bmin[1] - h);
        self.add_sentinel(bmin[0] - w, bmax[0] + w, bmax[1] + h);
    }

    fn add_sentinel(&mut self, smin: Real, smax: Real, t: Real) {
        let e = self.mesh.make_edge();
        let org = self.mesh.edges[e as usize].org;
        let dst = self.mesh.dst(e);
        self.mesh.verts[org as usize].s = smax;
        self.mesh.verts[org as usize].t = t;
        self.mesh.verts[dst as usize].s = smin;
        self.mesh.verts[dst as usize].t = t;
        // Give the ordering predicate a reference point during insertion.
        self.event = dst;
        self.event_s = smin;
        self.event_t = t;

        let reg = self.alloc_region();
        {
            let r = self.region_mut(reg);
            r.e_up = e;
            r.winding = 0;
            r.inside = false;
            r.sentinel = true;
            r.dirty = false;
            r.fix_upper_edge = false;
        }
        let node = self.insert_region(HEAD, reg);
        self.region_mut(reg).node = node;
    }

    /// Drain the status list. Only sentinels and at most one leftover
    /// fixable region may remain; anything else is a broken sweep.
    fn finish(&mut self) {
        let mut fixed = 0;
        loop {
            let node = self.status.min();
            if node == HEAD {
                break;
            }
            let reg = self.status.key(node);
            let r = self.region(reg);
            if !r.sentinel {
                debug_assert!(r.fix_upper_edge, "active region unresolved at sweep end");
                fixed += 1;
                debug_assert!(fixed == 1, "more than one leftover fixable region");
            }
            debug_assert_eq!(r.winding, 0);
            self.delete_region(reg);
        }
        let _ = fixed;
        debug!("sweep complete");
    }

    // ───────────────────────── region plumbing ─────────────────────────

    fn alloc_region(&mut self) -> RegionIdx {
        if let Some(idx) = self.free_regions.pop() {
            self.regions[idx as usize] = Some(ActiveRegion::default());
            idx
        } else {
            let idx = self.regions.len() as RegionIdx;
            self.regions.push(Some(ActiveRegion::default()));
            idx
        }
    }

    fn free_region(&mut self, reg: RegionIdx) {
        self.regions[reg as usize] = None;
        self.free_regions.push(reg);
    }

    fn region(&self, reg: RegionIdx) -> &ActiveRegion {
        self.regions[reg as usize].as_ref().unwrap()
    }

    fn region_mut(&mut self, reg: RegionIdx) -> &mut ActiveRegion {
        self.regions[reg as usize].as_mut().unwrap()
    }

    fn region_above(&self, reg: RegionIdx) -> RegionIdx {
        self.status.key(self.status.succ(self.region(reg).node))
    }

    fn region_below(&self, reg: RegionIdx) -> RegionIdx {
        self.status.key(self.status.pred(self.region(reg).node))
    }

    fn insert_region(&mut self, hint: NodeIdx, reg: RegionIdx) -> NodeIdx {
        let mesh: &Mesh<D> = &*self.mesh;
        let regions: &[Option<ActiveRegion>] = &self.regions;
        let (event, event_st) = (self.event, (self.event_s, self.event_t));
        let leq = move |a: u32, b: u32| region_leq(mesh, regions, event, event_st, a, b);
        self.status.insert_before(hint, reg, &leq)
    }

    fn search_region(&self, probe: RegionIdx) -> NodeIdx {
        let mesh: &Mesh<D> = &*self.mesh;
        let regions: &[Option<ActiveRegion>] = &self.regions;
        let (event, event_st) = (self.event, (self.event_s, self.event_t));
        let leq = move |a: u32, b: u32| region_leq(mesh, regions, event, event_st, a, b);
        self.status.search(probe, &leq)
    }

    fn delete_region(&mut self, reg: RegionIdx) {
        let (e_up, node, fixable) = {
            let r = self.region(reg);
            (r.e_up, r.node, r.fix_upper_edge)
        };
        if fixable {
            // A fixable edge exists only to bound a region; it must not
            // have accumulated real winding by the time it dies.
            debug_assert_eq!(self.mesh.edges[e_up as usize].winding, 0);
        }
        self.mesh.edges[e_up as usize].region = INVALID;
        self.status.remove(node);
        self.free_region(reg);
    }

    /// Insert a new region directly below `reg_above`, keyed by `e_new_up`.
    /// The caller is responsible for its winding.
    fn add_region_below(&mut self, reg_above: RegionIdx, e_new_up: EdgeIdx) -> RegionIdx {
        let reg_new = self.alloc_region();
        self.region_mut(reg_new).e_up = e_new_up;
        let hint = self.region(reg_above).node;
        let node = self.insert_region(hint, reg_new);
        self.region_mut(reg_new).node = node;
        self.mesh.edges[e_new_up as usize].region = reg_new;
        reg_new
    }

    fn compute_winding(&mut self, reg: RegionIdx) {
        let above = self.region_above(reg);
        let winding =
            self.region(above).winding + self.mesh.edges[self.region(reg).e_up as usize].winding;
        let inside = self.winding_rule.is_inside(winding);
        let r = self.region_mut(reg);
        r.winding = winding;
        r.inside = inside;
    }

    /// Transfer the region's classification onto its face and retire it.
    fn finish_region(&mut self, reg: RegionIdx) {
        let e = self.region(reg).e_up;
        let inside = self.region(reg).inside;
        let f = self.mesh.edges[e as usize].lface;
        self.mesh.faces[f as usize].inside = inside;
        self.mesh.faces[f as usize].an_edge = e;
        self.delete_region(reg);
    }

    /// Replace a fixable region's temporary edge with a real one.
    fn fix_upper_edge(&mut self, reg: RegionIdx, new_edge: EdgeIdx) {
        debug_assert!(self.region(reg).fix_upper_edge);
        let old = self.region(reg).e_up;
        self.mesh.delete_edge(old);
        let r = self.region_mut(reg);
        r.fix_upper_edge = false;
        r.e_up = new_edge;
        self.mesh.edges[new_edge as usize].region = reg;
    }

    /// The region above the topmost edge sharing this region's origin,
    /// fixing a temporary upper edge on the way if there is one.
    fn top_left_region(&mut self, mut reg: RegionIdx) -> RegionIdx {
        let org = self.mesh.edges[self.region(reg).e_up as usize].org;
        loop {
            reg = self.region_above(reg);
            if self.mesh.edges[self.region(reg).e_up as usize].org != org {
                break;
            }
        }
        if self.region(reg).fix_upper_edge {
            let below = self.region_below(reg);
            let a = sym(self.region(below).e_up);
            let b = self.mesh.edges[self.region(reg).e_up as usize].lnext;
            let e = self.mesh.connect(a, b);
            self.fix_upper_edge(reg, e);
            reg = self.region_above(reg);
        }
        reg
    }

    /// The region above the topmost edge sharing this region's destination.
    fn top_right_region(&self, mut reg: RegionIdx) -> RegionIdx {
        let dst = self.mesh.dst(self.region(reg).e_up);
        loop {
            reg = self.region_above(reg);
            if self.mesh.dst(self.region(reg).e_up) != dst {
                break;
            }
        }
        reg
    }

    // ───────────────────────── data combination ─────────────────────────

    /// Merge the origins of e1 and e2 into one vertex (e1's survives),
    /// combining payload data with equal weights when a callback is
    /// present; without one the surviving vertex keeps its own data.
    fn splice_merge_vertices(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let v1 = self.mesh.edges[e1 as usize].org;
        let v2 = self.mesh.edges[e2 as usize].org;
        if v1 != v2 {
            let d1 = self.mesh.verts[v1 as usize].data.clone();
            let d2 = self.mesh.verts[v2 as usize].data.clone();
            if d1.is_some() || d2.is_some() {
                if let Some(cb) = self.combine.as_mut() {
                    let pos = self.mesh.verts[v1 as usize].coords;
                    let merged = cb(pos, [d1, d2, None, None], [0.5, 0.5, 0.0, 0.0]);
                    self.mesh.verts[v1 as usize].data = Some(merged);
                }
            }
        }
        self.mesh.splice(e1, e2);
    }

    /// Position and payload for a synthesized intersection vertex,
    /// interpolated from the four endpoints of the crossing edges.
    fn get_intersect_data(
        &mut self,
        isect: VertIdx,
        org_up: VertIdx,
        dst_up: VertIdx,
        org_lo: VertIdx,
        dst_lo: VertIdx,
    ) {
        let isect_st = self.mesh.st(isect);
        let mut coords = [0.0f32; 3];
        let (w0, w1) = vertex_weights(self.mesh, isect_st, org_up, dst_up, &mut coords);
        let (w2, w3) = vertex_weights(self.mesh, isect_st, org_lo, dst_lo, &mut coords);
        let weights = [w0, w1, w2, w3];
        self.mesh.verts[isect as usize].coords = coords;

        let data = [
            self.mesh.verts[org_up as usize].data.clone(),
            self.mesh.verts[dst_up as usize].data.clone(),
            self.mesh.verts[org_lo as usize].data.clone(),
            self.mesh.verts[dst_lo as usize].data.clone(),
        ];
        let has_data = data.iter().any(|d| d.is_some());
        if !has_data {
            return;
        }
        match self.combine.as_mut() {
            Some(cb) => {
                let merged = cb(coords, data, weights);
                self.mesh.verts[isect as usize].data = Some(merged);
            }
            None => {
                if !self.warned_missing_combine {
                    warn!("contours intersect but no combine callback was supplied; vertex data dropped");
                    self.warned_missing_combine = true;
                }
            }
        }
    }

    // ───────────────────────── event processing ─────────────────────────

    fn sweep_event(&mut self, v_event: VertIdx) {
        self.event = v_event;
        let (s, t) = self.mesh.st(v_event);
        self.event_s = s;
        self.event_t = t;
        trace!("event {v_event} at ({s}, {t})");

        let an_edge = self.mesh.verts[v_event as usize].an_edge;
        if an_edge == INVALID {
            return;
        }

        // If some edge at this vertex is already active, the vertex is the
        // right endpoint of processed edges and we know where we are.
        // Otherwise every edge goes right and we must search the status
        // list for the region containing the vertex.
        let mut e = an_edge;
        while self.mesh.edges[e as usize].region == INVALID {
            e = self.mesh.edges[e as usize].onext;
            if e == an_edge {
                self.connect_left_vertex(v_event);
                return;
            }
        }

        // Close off the regions whose upper and lower edges both end here.
        let first = self.mesh.edges[e as usize].region;
        let reg_up = self.top_left_region(first);
        let reg = self.region_below(reg_up);
        let e_top_left = self.region(reg).e_up;
        let e_bottom_left = self.finish_left_regions(reg, INVALID);

        if self.mesh.edges[e_bottom_left as usize].onext == e_top_left {
            // No right-going edges; bridge ahead with a fixable edge.
            self.connect_right_vertex(reg_up, e_bottom_left);
        } else {
            let e_first = self.mesh.edges[e_bottom_left as usize].onext;
            self.add_right_edges(reg_up, e_first, e_top_left, e_top_left, true);
        }
    }

    /// Finish regions from `reg_first` down to (exclusive) `reg_last`, or
    /// until the chain of edges sharing the event's origin ends. Returns
    /// the last left-going edge encountered, with the mesh relinked so the
    /// finished edges form a contiguous onext ring.
    fn finish_left_regions(&mut self, reg_first: RegionIdx, reg_last: RegionIdx) -> EdgeIdx {
        let mut reg_prev = reg_first;
        let mut e_prev = self.region(reg_first).e_up;

        while reg_prev != reg_last {
            self.region_mut(reg_prev).fix_upper_edge = false;
            let reg = self.region_below(reg_prev);
            let mut e = self.region(reg).e_up;
            if self.mesh.edges[e as usize].org != self.mesh.edges[e_prev as usize].org {
                if !self.region(reg).fix_upper_edge {
                    self.finish_region(reg_prev);
                    break;
                }
                // The lower edge is a temporary one; swap in a real edge
                // ending at this event.
                let a = self.mesh.lprev(e_prev);
                let new_e = self.mesh.connect(a, sym(e));
                e = new_e;
                self.fix_upper_edge(reg, new_e);
            }
            if self.mesh.edges[e_prev as usize].onext != e {
                let e_oprev = self.mesh.oprev(e);
                self.mesh.splice(e_oprev, e);
                self.mesh.splice(e_prev, e);
            }
            self.finish_region(reg_prev);
            e_prev = self.region(reg).e_up;
            reg_prev = reg;
        }
        e_prev
    }

    /// Insert the right-going edges e_first..e_last (an onext chain from
    /// the event) as new active regions below `reg_up`, set their winding
    /// from the region above, and re-check the neighborhood.
    fn add_right_edges(
        &mut self,
        reg_up: RegionIdx,
        e_first: EdgeIdx,
        e_last: EdgeIdx,
        e_top_left: EdgeIdx,
        clean_up: bool,
    ) {
        let mut e = e_first;
        loop {
            debug_assert!(self.mesh.edge_goes_right(e), "left-going edge added as right edge");
            self.add_region_below(reg_up, sym(e));
            e = self.mesh.edges[e as usize].onext;
            if e == e_last {
                break;
            }
        }

        let mut e_top_left = e_top_left;
        if e_top_left == INVALID {
            let rb = self.region_below(reg_up);
            e_top_left = self.mesh.rprev(self.region(rb).e_up);
        }

        let mut reg_prev = reg_up;
        let mut e_prev = e_top_left;
        let mut first_time = true;
        loop {
            let reg = self.region_below(reg_prev);
            let e = sym(self.region(reg).e_up);
            if self.mesh.edges[e as usize].org != self.mesh.edges[e_prev as usize].org {
                break;
            }

            if self.mesh.edges[e_prev as usize].onext != e {
                // Relink e below e_prev so mesh order matches status order.
                let e_oprev = self.mesh.oprev(e);
                self.mesh.splice(e_oprev, e);
                let ep_oprev = self.mesh.oprev(e_prev);
                self.mesh.splice(ep_oprev, e);
            }

            let winding = self.region(reg_prev).winding - self.mesh.edges[e as usize].winding;
            let inside = self.winding_rule.is_inside(winding);
            {
                let r = self.region_mut(reg);
                r.winding = winding;
                r.inside = inside;
            }

            // Two right-going edges with the same slope must be merged
            // before any intersection tests see them.
            self.region_mut(reg_prev).dirty = true;
            if !first_time && self.check_for_right_splice(reg_prev) {
                add_winding(self.mesh, e, e_prev);
                self.delete_region(reg_prev);
                self.mesh.delete_edge(e_prev);
            }
            first_time = false;
            reg_prev = reg;
            e_prev = e;
        }
        self.region_mut(reg_prev).dirty = true;

        if clean_up {
            self.walk_dirty_regions(reg_prev);
        }
    }

    /// The event has no right-going edges: connect it to the rightmost
    /// processed vertex with a temporary edge the future will fix.
    fn connect_right_vertex(&mut self, mut reg_up: RegionIdx, mut e_bottom_left: EdgeIdx) {
        let mut e_top_left = self.mesh.edges[e_bottom_left as usize].onext;
        let reg_lo = self.region_below(reg_up);
        let e_up = self.region(reg_up).e_up;
        let e_lo = self.region(reg_lo).e_up;
        let mut degenerate = false;

        if self.mesh.dst(e_up) != self.mesh.dst(e_lo) {
            self.check_for_intersect(reg_up);
        }

        // The intersection check may have moved an edge origin onto the
        // event; handle those degeneracies by merging instead of bridging.
        let ev = (self.event_s, self.event_t);
        let org_up = self.mesh.edges[e_up as usize].org;
        if vert_eq(self.mesh.st(org_up), ev) {
            let e_tl_oprev = self.mesh.oprev(e_top_left);
            self.mesh.splice(e_tl_oprev, e_up);
            reg_up = self.top_left_region(reg_up);
            let rb = self.region_below(reg_up);
            e_top_left = self.region(rb).e_up;
            self.finish_left_regions(rb, reg_lo);
            degenerate = true;
        }
        let org_lo = self.mesh.edges[e_lo as usize].org;
        if vert_eq(self.mesh.st(org_lo), ev) {
            let e_lo_oprev = self.mesh.oprev(e_lo);
            self.mesh.splice(e_bottom_left, e_lo_oprev);
            e_bottom_left = self.finish_left_regions(reg_lo, INVALID);
            degenerate = true;
        }
        if degenerate {
            let e_first = self.mesh.edges[e_bottom_left as usize].onext;
            self.add_right_edges(reg_up, e_first, e_top_left, e_top_left, true);
            return;
        }

        // Bridge to whichever of the two chain frontiers is rightmost.
        let org_up = self.mesh.edges[e_up as usize].org;
        let org_lo = self.mesh.edges[e_lo as usize].org;
        let e_target = if vert_leq(self.mesh.st(org_lo), self.mesh.st(org_up)) {
            self.mesh.oprev(e_lo)
        } else {
            e_up
        };
        let e_bl_lprev = self.mesh.lprev(e_bottom_left);
        let e_new = self.mesh.connect(e_bl_lprev, e_target);
        let e_new_onext = self.mesh.edges[e_new as usize].onext;
        self.add_right_edges(reg_up, e_new, e_new_onext, e_new_onext, false);
        let fix_reg = self.mesh.edges[sym(e_new) as usize].region;
        self.region_mut(fix_reg).fix_upper_edge = true;
        self.walk_dirty_regions(reg_up);
    }

    /// The event lies exactly on the upper edge of its containing region.
    fn connect_left_degenerate(&mut self, reg_up: RegionIdx, v_event: VertIdx) {
        let e = self.region(reg_up).e_up;
        let ev = (self.event_s, self.event_t);

        if vert_eq(self.mesh.st(self.mesh.edges[e as usize].org), ev) {
            // e's origin is a not-yet-processed vertex at the same spot;
            // merge now and let it come off the queue later.
            let an = self.mesh.verts[v_event as usize].an_edge;
            self.splice_merge_vertices(e, an);
            return;
        }

        if !vert_eq(self.mesh.st(self.mesh.dst(e)), ev) {
            // The event is interior to e: split it and hang the event's
            // edges from the split point.
            self.mesh.split_edge(sym(e));
            if self.region(reg_up).fix_upper_edge {
                // The unused half of the former fixable edge goes away.
                let e_onext = self.mesh.edges[e as usize].onext;
                self.mesh.delete_edge(e_onext);
                self.region_mut(reg_up).fix_upper_edge = false;
            }
            let an = self.mesh.verts[v_event as usize].an_edge;
            self.mesh.splice(an, e);
            self.sweep_event(v_event);
            return;
        }

        // The event coincides with e's destination, an already processed
        // vertex: splice in the new right-going edges there.
        let reg_up = self.top_right_region(reg_up);
        let reg = self.region_below(reg_up);
        let mut e_top_right = sym(self.region(reg).e_up);
        let e_last = self.mesh.edges[e_top_right as usize].onext;
        let mut e_top_left = e_last;
        if self.region(reg).fix_upper_edge {
            // The processed vertex had only a fixable edge going right;
            // real right-going edges replace it now.
            debug_assert!(e_top_left != e_top_right, "fixable edge with no left edges");
            self.delete_region(reg);
            self.mesh.delete_edge(e_top_right);
            e_top_right = self.mesh.oprev(e_top_left);
        }
        let an = self.mesh.verts[v_event as usize].an_edge;
        self.mesh.splice(an, e_top_right);
        if !self.mesh.edge_goes_left(e_top_left) {
            // The processed vertex has no left-going edges at all.
            e_top_left = INVALID;
        }
        let e_first = self.mesh.edges[e_top_right as usize].onext;
        self.add_right_edges(reg_up, e_first, e_last, e_top_left, true);
    }

    /// The event's edges all go right: find the containing region, and if
    /// it is interior (or bounded by a fixable edge) connect the event to
    /// the nearest processed vertex so the region stays monotone.
    fn connect_left_vertex(&mut self, v_event: VertIdx) {
        let an_edge = self.mesh.verts[v_event as usize].an_edge;

        let probe = self.alloc_region();
        self.region_mut(probe).e_up = sym(an_edge);
        let node = self.search_region(probe);
        self.free_region(probe);
        let reg_up = self.status.key(node);
        debug_assert!(reg_up != INVALID, "event escaped the sentinel regions");
        if reg_up == INVALID {
            return;
        }
        let reg_lo = self.region_below(reg_up);
        if reg_lo == INVALID {
            return;
        }
        let e_up = self.region(reg_up).e_up;
        let e_lo = self.region(reg_lo).e_up;

        let ev = (self.event_s, self.event_t);
        if edge_sign(
            self.mesh.st(self.mesh.dst(e_up)),
            ev,
            self.mesh.st(self.mesh.edges[e_up as usize].org),
        ) == 0.0
        {
            self.connect_left_degenerate(reg_up, v_event);
            return;
        }

        // Connect to the rightmost already-processed chain endpoint.
        let reg = if vert_leq(
            self.mesh.st(self.mesh.dst(e_lo)),
            self.mesh.st(self.mesh.dst(e_up)),
        ) {
            reg_up
        } else {
            reg_lo
        };

        if self.region(reg_up).inside || self.region(reg).fix_upper_edge {
            let e_new = if reg == reg_up {
                let b = self.mesh.edges[e_up as usize].lnext;
                self.mesh.connect(sym(an_edge), b)
            } else {
                let a = self.mesh.dnext(e_lo);
                sym(self.mesh.connect(a, an_edge))
            };
            if self.region(reg).fix_upper_edge {
                self.fix_upper_edge(reg, e_new);
            } else {
                let r = self.add_region_below(reg_up, e_new);
                self.compute_winding(r);
            }
            self.sweep_event(v_event);
        } else {
            // Exterior region: nothing to connect, just activate the edges.
            self.add_right_edges(reg_up, an_edge, an_edge, INVALID, true);
        }
    }

    // ───────────────────────── neighborhood repair ─────────────────────────

    /// Restore the ordering invariant at the left (origin) ends of two
    /// adjacent region edges, splicing one into the other when an origin
    /// lies on the neighboring edge. Returns false if nothing was wrong.
    fn check_for_right_splice(&mut self, reg_up: RegionIdx) -> bool {
        let reg_lo = self.region_below(reg_up);
        let e_up = self.region(reg_up).e_up;
        let e_lo = self.region(reg_lo).e_up;
        let org_up = self.mesh.edges[e_up as usize].org;
        let org_lo = self.mesh.edges[e_lo as usize].org;
        let (ou, ol) = (self.mesh.st(org_up), self.mesh.st(org_lo));

        if vert_leq(ou, ol) {
            if edge_sign(self.mesh.st(self.mesh.dst(e_lo)), ou, ol) > 0.0 {
                return false;
            }
            if !vert_eq(ou, ol) {
                // org_up lies on e_lo: split e_lo there.
                self.mesh.split_edge(sym(e_lo));
                let e_lo_oprev = self.mesh.oprev(e_lo);
                self.mesh.splice(e_up, e_lo_oprev);
                self.region_mut(reg_up).dirty = true;
                self.region_mut(reg_lo).dirty = true;
            } else if org_up != org_lo {
                // Coincident but distinct vertices: merge them, dropping
                // org_up's pending event.
                let handle = self.mesh.verts[org_up as usize].event_handle;
                if handle != NO_HANDLE {
                    self.queue.delete(handle);
                    self.mesh.verts[org_up as usize].event_handle = NO_HANDLE;
                }
                let e_lo_oprev = self.mesh.oprev(e_lo);
                self.splice_merge_vertices(e_lo_oprev, e_up);
            }
        } else {
            if edge_sign(self.mesh.st(self.mesh.dst(e_up)), ol, ou) < 0.0 {
                return false;
            }
            // org_lo lies on e_up: split e_up there.
            let ra = self.region_above(reg_up);
            self.region_mut(ra).dirty = true;
            self.region_mut(reg_up).dirty = true;
            self.mesh.split_edge(sym(e_up));
            let e_lo_oprev = self.mesh.oprev(e_lo);
            self.mesh.splice(e_lo_oprev, e_up);
        }
        true
    }

    /// The mirror image at the right (destination) ends: splice when a
    /// destination lies on the neighboring edge. New faces produced by the
    /// splits inherit the classification of the region they fall in.
    fn check_for_left_splice(&mut self, reg_up: RegionIdx) -> bool {
        let reg_lo = self.region_below(reg_up);
        let e_up = self.region(reg_up).e_up;
        let e_lo = self.region(reg_lo).e_up;
        let dst_up = self.mesh.dst(e_up);
        let dst_lo = self.mesh.dst(e_lo);
        debug_assert!(dst_up != dst_lo);
        let (du, dl) = (self.mesh.st(dst_up), self.mesh.st(dst_lo));

        if vert_leq(du, dl) {
            if edge_sign(du, dl, self.mesh.st(self.mesh.edges[e_up as usize].org)) < 0.0 {
                return false;
            }
            // dst_lo is above e_up: split e_up and splice dst_lo in.
            let ra = self.region_above(reg_up);
            self.region_mut(ra).dirty = true;
            self.region_mut(reg_up).dirty = true;
            let e = self.mesh.split_edge(e_up);
            self.mesh.splice(sym(e_lo), e);
            let f = self.mesh.edges[e as usize].lface;
            let inside = self.region(reg_up).inside;
            self.mesh.faces[f as usize].inside = inside;
        } else {
            if edge_sign(dl, du, self.mesh.st(self.mesh.edges[e_lo as usize].org)) > 0.0 {
                return false;
            }
            // dst_up is below e_lo: split e_lo and splice dst_up in.
            self.region_mut(reg_up).dirty = true;
            self.region_mut(reg_lo).dirty = true;
            let e = self.mesh.split_edge(e_lo);
            let e_up_lnext = self.mesh.edges[e_up as usize].lnext;
            self.mesh.splice(e_up_lnext, sym(e_lo));
            let rf = self.mesh.rface(e);
            let inside = self.region(reg_up).inside;
            self.mesh.faces[rf as usize].inside = inside;
        }
        true
    }

    /// Check whether the upper and lower edges of a region cross to the
    /// right of the sweep line; if so, cut both at a synthesized vertex
    /// and queue it as a future event. Returns true only when the current
    /// event's neighborhood was rebuilt and the caller must stop walking.
    fn check_for_intersect(&mut self, mut reg_up: RegionIdx) -> bool {
        let mut reg_lo = self.region_below(reg_up);
        let e_up = self.region(reg_up).e_up;
        let e_lo = self.region(reg_lo).e_up;
        let org_up = self.mesh.edges[e_up as usize].org;
        let org_lo = self.mesh.edges[e_lo as usize].org;
        let dst_up = self.mesh.dst(e_up);
        let dst_lo = self.mesh.dst(e_lo);

        debug_assert!(dst_lo != dst_up);
        debug_assert!(!self.region(reg_up).fix_upper_edge && !self.region(reg_lo).fix_upper_edge);

        if org_up == org_lo {
            return false; // the edges share their right endpoint
        }

        let (ou, ol) = (self.mesh.st(org_up), self.mesh.st(org_lo));
        let (du, dl) = (self.mesh.st(dst_up), self.mesh.st(dst_lo));
        let ev = (self.event_s, self.event_t);

        let t_min_up = du.1.min(ou.1);
        let t_max_lo = dl.1.max(ol.1);
        if t_min_up > t_max_lo {
            return false; // t ranges do not overlap
        }

        if vert_leq(ou, ol) {
            if edge_sign(dl, ou, ol) > 0.0 {
                return false;
            }
        } else if edge_sign(du, ol, ou) < 0.0 {
            return false;
        }

        let mut isect = edge_intersect(du, ou, dl, ol);
        // Roundoff can push the intersection left of the sweep line or
        // right of the nearer origin; clamp it back into range.
        if vert_leq(isect, ev) {
            isect = ev;
        }
        let org_min = if vert_leq(ou, ol) { ou } else { ol };
        if vert_leq(org_min, isect) {
            isect = org_min;
        }

        if vert_eq(isect, ou) || vert_eq(isect, ol) {
            // Intersection at a right endpoint; a splice handles it.
            self.check_for_right_splice(reg_up);
            return false;
        }

        let bad_up = dst_up != self.event && edge_sign(du, ev, isect) >= 0.0;
        let bad_lo = dst_lo != self.event && edge_sign(dl, ev, isect) <= 0.0;
        if bad_up || bad_lo {
            // The computed point would land on the wrong side of the
            // event. Handle the near-degenerate cases explicitly rather
            // than create an inverted edge.
            if dst_lo == self.event {
                // Splice dst_lo into e_up and rebuild the neighborhood.
                self.mesh.split_edge(sym(e_up));
                self.mesh.splice(sym(e_lo), e_up);
                reg_up = self.top_left_region(reg_up);
                let rb = self.region_below(reg_up);
                let e_up2 = self.region(rb).e_up;
                self.finish_left_regions(rb, reg_lo);
                let e_oprev = self.mesh.oprev(e_up2);
                self.add_right_edges(reg_up, e_oprev, e_up2, e_up2, true);
                return true;
            }
            if dst_up == self.event {
                // Splice dst_up into e_lo and rebuild the neighborhood.
                self.mesh.split_edge(sym(e_lo));
                let e_up_lnext = self.mesh.edges[e_up as usize].lnext;
                let e_lo_oprev = self.mesh.oprev(e_lo);
                self.mesh.splice(e_up_lnext, e_lo_oprev);
                reg_lo = reg_up;
                reg_up = self.top_right_region(reg_up);
                let rb = self.region_below(reg_up);
                let e = self.mesh.rprev(self.region(rb).e_up);
                let new_lo_up = self.mesh.oprev(e_lo);
                self.region_mut(reg_lo).e_up = new_lo_up;
                let e_lo2 = self.finish_left_regions(reg_lo, INVALID);
                let e_first = self.mesh.edges[e_lo2 as usize].onext;
                let e_up_rprev = self.mesh.rprev(e_up);
                self.add_right_edges(reg_up, e_first, e_up_rprev, e, true);
                return true;
            }
            // Otherwise cut whichever edge passes the wrong side at the
            // event itself and leave the rest for later processing.
            if edge_sign(du, ev, isect) >= 0.0 {
                let ra = self.region_above(reg_up);
                self.region_mut(ra).dirty = true;
                self.region_mut(reg_up).dirty = true;
                self.mesh.split_edge(sym(e_up));
                let org = self.mesh.edges[e_up as usize].org;
                self.mesh.verts[org as usize].s = self.event_s;
                self.mesh.verts[org as usize].t = self.event_t;
            }
            if edge_sign(dl, ev, isect) <= 0.0 {
                self.region_mut(reg_up).dirty = true;
                self.region_mut(reg_lo).dirty = true;
                self.mesh.split_edge(sym(e_lo));
                let org = self.mesh.edges[e_lo as usize].org;
                self.mesh.verts[org as usize].s = self.event_s;
                self.mesh.verts[org as usize].t = self.event_t;
            }
            return false;
        }

        // General case: cut both edges, join them at a new vertex, and
        // queue it for processing.
        trace!("edges cross at ({}, {})", isect.0, isect.1);
        self.mesh.split_edge(sym(e_up));
        self.mesh.split_edge(sym(e_lo));
        let e_lo_oprev = self.mesh.oprev(e_lo);
        self.mesh.splice(e_lo_oprev, e_up);
        let v_new = self.mesh.edges[e_up as usize].org;
        self.mesh.verts[v_new as usize].s = isect.0;
        self.mesh.verts[v_new as usize].t = isect.1;
        let handle = self.mesh.verts[v_new as usize].event_handle;
        let handle = if handle == NO_HANDLE {
            self.queue.insert(isect.0, isect.1, v_new)
        } else {
            self.queue.reposition(handle, isect.0, isect.1, v_new)
        };
        self.mesh.verts[v_new as usize].event_handle = handle;
        self.get_intersect_data(v_new, org_up, dst_up, org_lo, dst_lo);

        let ra = self.region_above(reg_up);
        self.region_mut(ra).dirty = true;
        self.region_mut(reg_up).dirty = true;
        self.region_mut(reg_lo).dirty = true;
        false
    }

    /// Walk the contiguous run of dirty regions around `reg_up`, repairing
    /// ordering violations and intersections until everything is clean.
    fn walk_dirty_regions(&mut self, mut reg_up: RegionIdx) {
        let mut reg_lo = self.region_below(reg_up);

        loop {
            // Start from the lowest dirty region and work upward.
            while reg_lo != INVALID && self.region(reg_lo).dirty {
                reg_up = reg_lo;
                reg_lo = self.region_below(reg_lo);
            }
            if !self.region(reg_up).dirty {
                reg_lo = reg_up;
                reg_up = self.region_above(reg_up);
                if reg_up == INVALID || !self.region(reg_up).dirty {
                    return;
                }
            }
            self.region_mut(reg_up).dirty = false;
            if reg_lo == INVALID {
                return;
            }
            let mut e_up = self.region(reg_up).e_up;
            let mut e_lo = self.region(reg_lo).e_up;

            if self.mesh.dst(e_up) != self.mesh.dst(e_lo) {
                if self.check_for_left_splice(reg_up) {
                    // A fixable edge adjacent to the splice is obsolete;
                    // its vertex now has a real right-going edge.
                    if self.region(reg_lo).fix_upper_edge {
                        self.delete_region(reg_lo);
                        self.mesh.delete_edge(e_lo);
                        reg_lo = self.region_below(reg_up);
                        e_lo = self.region(reg_lo).e_up;
                    } else if self.region(reg_up).fix_upper_edge {
                        self.delete_region(reg_up);
                        self.mesh.delete_edge(e_up);
                        reg_up = self.region_above(reg_lo);
                        e_up = self.region(reg_up).e_up;
                    }
                }
            }

            if self.mesh.edges[e_up as usize].org != self.mesh.edges[e_lo as usize].org {
                if self.mesh.dst(e_up) != self.mesh.dst(e_lo)
                    && !self.region(reg_up).fix_upper_edge
                    && !self.region(reg_lo).fix_upper_edge
                    && (self.mesh.dst(e_up) == self.event || self.mesh.dst(e_lo) == self.event)
                {
                    if self.check_for_intersect(reg_up) {
                        // The neighborhood was rebuilt recursively.
                        return;
                    }
                } else {
                    self.check_for_right_splice(reg_up);
                }
            }

            if self.mesh.edges[e_up as usize].org == self.mesh.edges[e_lo as usize].org
                && self.mesh.dst(e_up) == self.mesh.dst(e_lo)
            {
                // A two-edge loop; fold the winding and drop one side.
                add_winding(self.mesh, e_lo, e_up);
                self.delete_region(reg_up);
                self.mesh.delete_edge(e_up);
                reg_up = self.region_above(reg_lo);
            }
        }
    }
}
