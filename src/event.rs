//! The event queue (§4.4): an ordered set of `SweepEvent`s, keyed
//! primarily by point order with a deterministic secondary key so the
//! overall order is total.

use std::cmp::Ordering;

use crate::point::{Epsilon, Point};
use crate::segment::{Role, Segment, SegmentArena, SegmentId};

/// A marker at one endpoint of a segment.
#[derive(Debug, Clone, Copy)]
pub struct SweepEvent {
    pub point: Point,
    pub segment: SegmentId,
    pub role: Role,
}

impl SweepEvent {
    pub fn left(segment: SegmentId, point: Point) -> Self {
        SweepEvent { point, segment, role: Role::Left }
    }

    pub fn right(segment: SegmentId, point: Point) -> Self {
        SweepEvent { point, segment, role: Role::Right }
    }
}

/// Total order over events: point order first; at the same point, right
/// events (closing a segment) precede left events (opening one), so a
/// closing segment leaves the status structure before a new one enters;
/// remaining ties are broken by which segment passes lower, and finally
/// by ring id for full determinism.
pub fn compare_events(a: &SweepEvent, b: &SweepEvent, arena: &SegmentArena, eps: Epsilon) -> Ordering {
    match a.point.compare(b.point, eps) {
        Ordering::Equal => {}
        ord => return ord,
    }

    if a.role != b.role {
        return if a.role == Role::Right { Ordering::Less } else { Ordering::Greater };
    }

    let sa = arena.get(a.segment);
    let sb = arena.get(b.segment);
    let far_a = other_point(sa, a.role);
    let far_b = other_point(sb, b.role);

    if sa.is_point_below(far_b) {
        return Ordering::Less;
    }
    if sa.is_point_above(far_b) {
        return Ordering::Greater;
    }
    // Colinear: fall back to the stable ring-id tie-breaker.
    sa.ring_in.cmp(&sb.ring_in).then(a.segment.0.cmp(&b.segment.0))
}

fn other_point(seg: &Segment, role: Role) -> Point {
    match role {
        Role::Left => seg.right,
        Role::Right => seg.left,
    }
}

/// An ordered set of pending events, implemented as a `Vec` kept sorted in
/// descending order so the next (leftmost) event is always the last
/// element — `Vec::pop` is O(1), insertion is an O(log n) binary search
/// plus an O(n) shift. Spec.md §4.4 only requires correctness here, not a
/// particular structure.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<SweepEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: SweepEvent, arena: &SegmentArena, eps: Epsilon) {
        let pos = self
            .events
            .binary_search_by(|probe| compare_events(probe, &event, arena, eps).reverse())
            .unwrap_or_else(|i| i);
        self.events.insert(pos, event);
    }

    pub fn pop(&mut self) -> Option<SweepEvent> {
        self.events.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Removes the still-pending event for `segment`/`role`, if any.
    /// Used when a split changes the endpoint a previously-queued event
    /// refers to (the stale entry must not be processed at its old
    /// point).
    pub fn remove(&mut self, segment: SegmentId, role: Role) {
        if let Some(pos) = self.events.iter().position(|e| e.segment == segment && e.role == role) {
            self.events.remove(pos);
        }
    }
}
