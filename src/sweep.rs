//! The sweep driver (§4.9): the main loop, intersection dispatch, and
//! coincidence detection. Ties together the event queue, the status
//! structure, the segment arena and the coincidence index.

use log::{debug, trace};

use crate::classify;
use crate::coincidence::CoincidenceIndex;
use crate::error::SweepResult;
use crate::event::{EventQueue, SweepEvent};
use crate::geometry::Geometry;
use crate::operation::Operation;
use crate::point::{Epsilon, Point};
use crate::segment::{Role, Segment, SegmentArena, SegmentId};
use crate::status::Status;

/// Runs the sweep to completion: builds the initial segments from every
/// ring in `geometry`, processes the event queue, classifies every segment
/// once every coincidence union has been applied, and returns the arena
/// (with every segment's classification cache populated) plus the ids of
/// every segment `operation` marks as in-result.
pub fn run(geometry: &Geometry, operation: &Operation, eps: Epsilon) -> SweepResult<(SegmentArena, Vec<SegmentId>)> {
    let mut arena = SegmentArena::new();
    let mut coincidence = CoincidenceIndex::new();
    let mut queue = EventQueue::new();
    let mut status = Status::new();
    // Records the order left-events were handled in. A segment's `prev` is
    // always a segment whose own left event was handled earlier (it must
    // already be active in the status structure), so classifying in this
    // order guarantees `prev` is already classified by the time a segment
    // is classified — see the deferred classification pass below.
    let mut left_order: Vec<SegmentId> = Vec::new();

    for ring in &geometry.rings {
        let pts = &ring.points;
        let n = pts.len();
        if n < 2 {
            continue;
        }
        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            if a.tolerant_eq(b, eps) {
                continue;
            }
            let seg = Segment::new(a, b, ring.id, eps)?;
            let (left, right) = (seg.left, seg.right);
            let id = arena.push(seg);
            coincidence.register(id);
            queue.push(SweepEvent::left(id, left), &arena, eps);
            queue.push(SweepEvent::right(id, right), &arena, eps);
        }
    }

    debug!("sweep initialised with {} segments", arena.len());

    while let Some(event) = queue.pop() {
        match event.role {
            Role::Left => handle_left(
                event.segment,
                &mut arena,
                &mut coincidence,
                &mut status,
                &mut queue,
                &mut left_order,
                eps,
            )?,
            Role::Right => handle_right(event.segment, &mut arena, &mut coincidence, &mut status, &mut queue, eps)?,
        }
    }

    // Classification reads a segment's full coincidence class
    // (`CoincidenceIndex::members`), which only settles once every
    // `coincidence.union` for the whole sweep has happened — unioning with
    // a status neighbour can still be pending when a segment's own left
    // event is handled, if the coincident partner arrives at a later
    // event. Classifying here, after the queue has fully drained, instead
    // of inline in `handle_left`, ensures every segment (in particular the
    // coincidence winner, which is what `is_in_result` actually reads)
    // sees its complete coincidence class.
    for &id in &left_order {
        let classification = classify::classify(id, &arena, &mut coincidence, geometry);
        arena.get_mut(id).classification = classification;
    }

    let mut in_result = Vec::new();
    for (id, _) in arena.iter() {
        if operation.is_in_result(id, &arena, &mut coincidence)? {
            in_result.push(id);
        }
    }

    debug!("sweep produced {} in-result segments out of {}", in_result.len(), arena.len());
    Ok((arena, in_result))
}

fn handle_left(
    id: SegmentId,
    arena: &mut SegmentArena,
    coincidence: &mut CoincidenceIndex,
    status: &mut Status,
    queue: &mut EventQueue,
    left_order: &mut Vec<SegmentId>,
    eps: Epsilon,
) -> SweepResult<()> {
    left_order.push(id);

    let idx = status.insert(id, arena, eps)?;
    let prev = status.predecessor_at(idx);
    let next = status.successor_at(idx);
    arena.get_mut(id).prev = prev;

    if let Some(p) = prev {
        split_pair(id, p, arena, coincidence, queue, eps)?;
    }
    if let Some(n) = next {
        split_pair(id, n, arena, coincidence, queue, eps)?;
    }

    if let Some(p) = prev {
        if arena.get(id).is_coincident_with(arena.get(p), eps) {
            trace!("segment {:?} coincident with predecessor {:?}", id, p);
            coincidence.union(id, p);
        }
    }
    if let Some(n) = next {
        if arena.get(id).is_coincident_with(arena.get(n), eps) {
            trace!("segment {:?} coincident with successor {:?}", id, n);
            coincidence.union(id, n);
        }
    }

    Ok(())
}

fn handle_right(
    id: SegmentId,
    arena: &mut SegmentArena,
    coincidence: &mut CoincidenceIndex,
    status: &mut Status,
    queue: &mut EventQueue,
    eps: Epsilon,
) -> SweepResult<()> {
    let idx = status
        .active_index(id)
        .expect("a right event's segment must be active");
    let prev = status.predecessor_at(idx);
    let next = status.successor_at(idx);
    status.remove(id, arena, eps)?;

    if let (Some(p), Some(n)) = (prev, next) {
        split_pair(p, n, arena, coincidence, queue, eps)?;
    }

    Ok(())
}

/// Computes intersections between `a` and `b` and splits whichever of
/// them a given intersection point is not already an endpoint of,
/// queueing fresh events and registering coincidence singleton classes
/// for every newly created segment (§4.9).
fn split_pair(
    a: SegmentId,
    b: SegmentId,
    arena: &mut SegmentArena,
    coincidence: &mut CoincidenceIndex,
    queue: &mut EventQueue,
    eps: Epsilon,
) -> SweepResult<()> {
    let points = Segment::get_intersections(arena.get(a), arena.get(b), eps);
    if points.is_empty() {
        return Ok(());
    }

    for side in [a, b] {
        let to_split: Vec<Point> = points
            .iter()
            .copied()
            .filter(|p| {
                let s = arena.get(side);
                !(p.tolerant_eq(s.left, eps) || p.tolerant_eq(s.right, eps))
            })
            .collect();
        if to_split.is_empty() {
            continue;
        }
        trace!("splitting segment {:?} at {} point(s)", side, to_split.len());
        let new_ids = resplit(side, to_split, arena, queue, eps)?;
        for nid in new_ids {
            coincidence.register(nid);
        }
    }
    Ok(())
}

/// Splits `id` at `points`, removing its stale right-event (its right
/// endpoint moves) and queueing fresh left/right events for every newly
/// created segment. Returns the ids of the newly created segments.
fn resplit(
    id: SegmentId,
    points: Vec<Point>,
    arena: &mut SegmentArena,
    queue: &mut EventQueue,
    eps: Epsilon,
) -> SweepResult<Vec<SegmentId>> {
    queue.remove(id, Role::Right);
    let new_ids = arena.split(id, points, eps)?;

    let new_right = arena.get(id).right;
    queue.push(SweepEvent::right(id, new_right), arena, eps);

    for nid in &new_ids {
        let l = arena.get(*nid).left;
        let r = arena.get(*nid).right;
        queue.push(SweepEvent::left(*nid, l), arena, eps);
        queue.push(SweepEvent::right(*nid, r), arena, eps);
    }
    Ok(new_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, MultiPolyKind};
    use crate::operation::{Operation, OperationType};

    fn square(x0: f64, y0: f64, s: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x0 + s, y0),
            Point::new(x0 + s, y0 + s),
            Point::new(x0, y0 + s),
        ]
    }

    #[test]
    fn sweep_on_two_disjoint_squares_produces_all_segments_in_result_for_union() {
        let eps = Epsilon::default();
        let mut geometry = Geometry::new();
        let mut next_id = 0;
        let subject = geometry.add_multipoly(MultiPolyKind::Subject, vec![vec![square(0.0, 0.0, 1.0)]], &mut next_id);
        let clipping = geometry.add_multipoly(MultiPolyKind::Clipping, vec![vec![square(10.0, 10.0, 1.0)]], &mut next_id);
        let op = Operation::new(OperationType::Union, vec![subject, clipping], None).unwrap();

        let (arena, in_result) = run(&geometry, &op, eps).unwrap();
        assert_eq!(arena.len(), 8);
        assert_eq!(in_result.len(), 8);
    }
}
