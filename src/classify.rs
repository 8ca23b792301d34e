//! Per-segment derived boundary-classification values (§4.7).
//!
//! Computed eagerly — once per segment, in a single pass after the sweep
//! loop has fully drained (see `sweep::run`) — rather than lazily memoised
//! and invalidated on every mutation of `prev`/`coincidents`, per the
//! design note in spec.md §9. The pass runs in left-event order, so a
//! segment's `prev` is always already classified by the time the segment
//! itself is classified; running it only after the sweep completes (rather
//! than inline as each segment's left event is handled) also guarantees
//! every coincidence union for the whole sweep has already happened, so a
//! coincidence winner's `rings_on_edge_of`/SLP sets see every partner that
//! ever joins its class, not just the ones that had joined by the time its
//! own left event was processed.

use std::collections::HashSet;

use crate::coincidence::CoincidenceIndex;
use crate::geometry::Geometry;
use crate::segment::{Classification, SegmentArena, SegmentId};

fn sweep_line_enters_ring(id: SegmentId, arena: &SegmentArena) -> bool {
    let ring_in = arena.get(id).ring_in;
    let mut cursor = arena.get(id).prev;
    while let Some(p) = cursor {
        let pseg = arena.get(p);
        if pseg.ring_in == ring_in {
            return !pseg.classification.sweep_line_enters_ring;
        }
        cursor = pseg.prev;
    }
    true
}

/// Computes and returns the full classification for `id`. Does not write
/// it back — the caller (the sweep driver) does that once it has also
/// decided whether `id` is coincident with its status neighbours.
pub fn classify(
    id: SegmentId,
    arena: &SegmentArena,
    coincidence: &mut CoincidenceIndex,
    geometry: &Geometry,
) -> Classification {
    let mut c = Classification::default();

    c.sweep_line_enters_ring = sweep_line_enters_ring(id, arena);

    let members: Vec<SegmentId> = coincidence.members(id).to_vec();
    let mut rings_on_edge_of: Vec<u32> = members.iter().map(|m| arena.get(*m).ring_in).collect();
    rings_on_edge_of.sort_unstable();
    rings_on_edge_of.dedup();
    c.rings_on_edge_of = rings_on_edge_of;

    for m in &members {
        let enters = if *m == id {
            c.sweep_line_enters_ring
        } else {
            sweep_line_enters_ring(*m, arena)
        };
        let ring_id = arena.get(*m).ring_in;
        if enters {
            c.rings_entering.push(ring_id);
        } else {
            c.rings_exiting.push(ring_id);
        }
    }
    c.rings_entering.sort_unstable();
    c.rings_entering.dedup();
    c.rings_exiting.sort_unstable();
    c.rings_exiting.dedup();

    let on_edge: HashSet<u32> = c.rings_on_edge_of.iter().copied().collect();

    let seg = arena.get(id);
    let prev_coincident_with_self = seg
        .prev
        .map(|p| coincidence.members(p).contains(&id) || coincidence.members(id).contains(&p))
        .unwrap_or(false);

    let mut rings_inside_of: HashSet<u32> = match seg.prev {
        None => HashSet::new(),
        Some(p) if prev_coincident_with_self => {
            arena.get(p).classification.rings_inside_of.iter().copied().collect()
        }
        Some(p) => {
            let prev_c = &arena.get(p).classification;
            let mut set: HashSet<u32> = prev_c.rings_inside_of.iter().copied().collect();
            for r in &prev_c.rings_entering {
                set.insert(*r);
            }
            for r in &prev_c.rings_exiting {
                set.remove(r);
            }
            set
        }
    };
    if !prev_coincident_with_self {
        for r in &on_edge {
            rings_inside_of.remove(r);
        }
    }

    let mut rings_inside_of_vec: Vec<u32> = rings_inside_of.iter().copied().collect();
    rings_inside_of_vec.sort_unstable();
    c.rings_inside_of = rings_inside_of_vec;

    let ring = geometry.ring_by_id(seg.ring_in);
    c.is_valid_edge_for_poly = geometry.is_valid(ring, &rings_inside_of);

    if c.is_valid_edge_for_poly {
        c.sweep_line_enters_poly = if ring.is_exterior() {
            c.sweep_line_enters_ring
        } else {
            !c.sweep_line_enters_ring
        };
        c.sweep_line_exits_poly = !c.sweep_line_enters_poly;
    }

    let mut poly_candidates: Vec<usize> = Vec::new();
    for &ring_id in &rings_inside_of {
        let r = geometry.ring_by_id(ring_id);
        if r.is_exterior() && !poly_candidates.contains(&r.poly) {
            poly_candidates.push(r.poly);
        }
    }
    c.polys_inside_of = poly_candidates
        .into_iter()
        .filter(|&poly_idx| geometry.poly_is_inside(&geometry.polys[poly_idx], &on_edge, &rings_inside_of))
        .collect();

    let mut multipolys_inside_of: Vec<usize> = c
        .polys_inside_of
        .iter()
        .map(|&poly_idx| geometry.polys[poly_idx].multipoly)
        .collect();
    multipolys_inside_of.sort_unstable();
    multipolys_inside_of.dedup();
    c.multipolys_inside_of = multipolys_inside_of.clone();

    let mut enters_side = multipolys_inside_of.clone();
    let mut exits_side = multipolys_inside_of;
    for m in &members {
        let (mp, enters_poly) = if *m == id {
            (geometry.polys[ring.poly].multipoly, c.sweep_line_enters_poly)
        } else {
            let other_seg = arena.get(*m);
            let other_ring = geometry.ring_by_id(other_seg.ring_in);
            (
                geometry.polys[other_ring.poly].multipoly,
                other_seg.classification.is_valid_edge_for_poly && other_seg.classification.sweep_line_enters_poly,
            )
        };
        if enters_poly {
            if !enters_side.contains(&mp) {
                enters_side.push(mp);
            }
        } else {
            let other_exits = if *m == id {
                c.sweep_line_exits_poly
            } else {
                let other_seg = arena.get(*m);
                other_seg.classification.is_valid_edge_for_poly && other_seg.classification.sweep_line_exits_poly
            };
            if other_exits && !exits_side.contains(&mp) {
                exits_side.push(mp);
            }
        }
    }
    enters_side.sort_unstable();
    exits_side.sort_unstable();
    c.multipolys_slp_enters = enters_side;
    c.multipolys_slp_exits = exits_side;

    c
}
