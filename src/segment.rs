//! `Segment`: an undirected geometric edge between two endpoints, plus the
//! arena that owns every segment created during one sweep (initial ones
//! and every one produced by splitting).

use std::cmp::Ordering;

use crate::error::{SweepError, SweepResult};
use crate::point::{compare_vector_angles, cross, Epsilon, Point};

/// Index into a [`SegmentArena`]. Stable for the lifetime of the arena —
/// segments are never removed, only appended (by splitting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Left,
    Right,
}

/// Per-segment derived boundary-classification values (§4.7). Computed
/// eagerly, once, in a dedicated pass after the sweep loop has fully
/// drained and every coincidence union has happened (see `crate::classify`
/// and the sweep driver) rather than lazily memoised-and-invalidated, per
/// the design note in spec.md §9: this removes the cache-invalidation
/// discipline the original algorithm needs.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub sweep_line_enters_ring: bool,
    /// Ring ids of every coincident segment (including this one).
    pub rings_on_edge_of: Vec<u32>,
    pub rings_entering: Vec<u32>,
    pub rings_exiting: Vec<u32>,
    /// Ring ids the segment is strictly inside of.
    pub rings_inside_of: Vec<u32>,
    pub is_valid_edge_for_poly: bool,
    pub sweep_line_enters_poly: bool,
    pub sweep_line_exits_poly: bool,
    /// Multipoly indices the segment is strictly inside of.
    pub polys_inside_of: Vec<usize>,
    pub multipolys_inside_of: Vec<usize>,
    pub multipolys_slp_enters: Vec<usize>,
    pub multipolys_slp_exits: Vec<usize>,
}

/// An undirected edge. `left`/`right` are canonicalised so that
/// `left.compare(right) == Less` under the event order (§3 invariant).
#[derive(Debug, Clone)]
pub struct Segment {
    pub left: Point,
    pub right: Point,
    /// The ring this segment's geometry originated from.
    pub ring_in: u32,
    /// Assigned during result stitching; `None` during the sweep proper.
    pub ring_out: Option<u32>,
    /// The segment immediately below this one in the status structure at
    /// the moment this segment became active.
    pub prev: Option<SegmentId>,
    pub classification: Classification,
}

impl Segment {
    /// Builds a canonicalised segment from two (distinct, tolerantly)
    /// points. Fails per §7 "Degenerate segment" if they are tolerantly
    /// equal.
    pub fn new(a: Point, b: Point, ring_in: u32, eps: Epsilon) -> SweepResult<Self> {
        if a.tolerant_eq(b, eps) {
            return Err(SweepError::DegenerateSegment(a));
        }
        let (left, right) = match a.compare(b, eps) {
            Ordering::Less => (a, b),
            _ => (b, a),
        };
        Ok(Segment {
            left,
            right,
            ring_in,
            ring_out: None,
            prev: None,
            classification: Classification::default(),
        })
    }

    pub fn vector(&self) -> Point {
        Point::new(self.right.x - self.left.x, self.right.y - self.left.y)
    }

    pub fn is_vertical(&self, eps: Epsilon) -> bool {
        eps.eq(self.left.x, self.right.x)
    }

    pub fn bbox(&self) -> crate::bbox::Bbox {
        crate::bbox::Bbox::from_points(self.left, self.right)
    }

    pub fn point_for(&self, role: Role) -> Point {
        match role {
            Role::Left => self.left,
            Role::Right => self.right,
        }
    }

    /// Strict: `p` above the line through `left -> right` (endpoints
    /// themselves are neither above nor below).
    pub fn is_point_above(&self, p: Point) -> bool {
        compare_vector_angles(p, self.left, self.right) == Ordering::Greater
    }

    pub fn is_point_below(&self, p: Point) -> bool {
        compare_vector_angles(p, self.left, self.right) == Ordering::Less
    }

    pub fn is_colinear(&self, p: Point) -> bool {
        compare_vector_angles(p, self.left, self.right) == Ordering::Equal
    }

    pub fn is_point_on(&self, p: Point, eps: Epsilon) -> bool {
        self.bbox().contains(p, eps) && self.is_colinear(p)
    }

    pub fn is_colinear_with(&self, other: &Segment) -> bool {
        self.is_colinear(other.left) && self.is_colinear(other.right)
    }

    pub fn is_coincident_with(&self, other: &Segment, eps: Epsilon) -> bool {
        self.left.tolerant_eq(other.left, eps) && self.right.tolerant_eq(other.right, eps)
    }

    /// `Segment::compare`, §4.3. Defines the total order the status
    /// structure keys on. Returns `SweepError::OrderingFailure` if no rule
    /// decides two distinct segments (a predicate bug or NaN input).
    pub fn compare(a: &Segment, b: &Segment, eps: Epsilon) -> SweepResult<Ordering> {
        // Note: coincident-but-distinct segments (equal endpoints, different
        // `ring_in`) are deliberately *not* shortcut to `Equal` here — they
        // fall into the colinear branch below, which tie-breaks on
        // `ring_in` per §4.3 step 3. Only a segment compared against
        // itself reaches `Ordering::Equal`, via that same branch.

        // Early reject: non-overlapping x ranges.
        if eps.lt(a.right.x, b.left.x) {
            return Ok(Ordering::Less);
        }
        if eps.lt(b.right.x, a.left.x) {
            return Ok(Ordering::Greater);
        }

        if a.is_colinear_with(b) {
            return Ok(match a.left.compare(b.left, eps) {
                Ordering::Equal => a.ring_in.cmp(&b.ring_in),
                ord => ord,
            });
        }

        if a.left.tolerant_eq(b.left, eps) {
            return Ok(if a.is_point_below(b.right) {
                Ordering::Less
            } else {
                Ordering::Greater
            });
        }

        if eps.eq(a.left.x, b.left.x) {
            return Ok(eps.compare(a.left.y, b.left.y));
        }

        // Compare at the rightmore of the two left x's: whichever passes
        // lower there is earlier.
        let (earlier, later, later_is_a) = if eps.lt(a.left.x, b.left.x) {
            (a, b, false)
        } else {
            (b, a, true)
        };
        let x_at = later.left.x;
        let y_on_earlier = y_at_x(earlier, x_at);
        let cmp = eps.compare(y_on_earlier, later.left.y);
        return Ok(match cmp {
            Ordering::Equal => return Err(SweepError::OrderingFailure),
            Ordering::Less => {
                if later_is_a {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            Ordering::Greater => {
                if later_is_a {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        });
    }

    /// `getIntersections`, §4.5. Returns 0, 1, or 2 intersection points.
    pub fn get_intersections(a: &Segment, b: &Segment, eps: Epsilon) -> Vec<Point> {
        let bbox_a = a.bbox();
        let bbox_b = b.bbox();
        let overlap = match bbox_a.overlap(&bbox_b) {
            Some(o) => o,
            None => return Vec::new(),
        };

        let mut corner_hits = Vec::new();
        for corner in overlap.corners(eps) {
            let is_endpoint_of_a = corner.tolerant_eq(a.left, eps) || corner.tolerant_eq(a.right, eps);
            let is_endpoint_of_b = corner.tolerant_eq(b.left, eps) || corner.tolerant_eq(b.right, eps);
            let on_a = a.is_point_on(corner, eps);
            let on_b = b.is_point_on(corner, eps);
            if (is_endpoint_of_a && on_b) || (is_endpoint_of_b && on_a) {
                if !corner_hits.iter().any(|p: &Point| p.tolerant_eq(corner, eps)) {
                    corner_hits.push(corner);
                }
            }
        }
        if !corner_hits.is_empty() {
            return corner_hits;
        }

        // Schneider-Eberly parameterised intersection.
        let va = a.vector();
        let vb = b.vector();
        let denom = cross(va, vb);
        if denom == 0.0 {
            return Vec::new();
        }
        let diff = Point::new(b.left.x - a.left.x, b.left.y - a.left.y);
        let s = cross(diff, vb) / denom;
        let t = cross(diff, va) / denom;

        if eps.lt(s, 0.0) || eps.lt(1.0, s) || eps.lt(t, 0.0) || eps.lt(1.0, t) {
            return Vec::new();
        }

        let p_from_a = Point::new(a.left.x + s * va.x, a.left.y + s * va.y);
        let p_from_b = Point::new(b.left.x + t * vb.x, b.left.y + t * vb.y);
        let mid = Point::new((p_from_a.x + p_from_b.x) / 2.0, (p_from_a.y + p_from_b.y) / 2.0);
        vec![mid]
    }
}

fn y_at_x(seg: &Segment, x: crate::fsize) -> crate::fsize {
    if seg.right.x == seg.left.x {
        return seg.left.y;
    }
    let t = (x - seg.left.x) / (seg.right.x - seg.left.x);
    seg.left.y + t * (seg.right.y - seg.left.y)
}

/// Owns every segment created during one sweep. Segments are appended at
/// initialisation and by splitting; never removed (§3 "Lifecycles";
/// §5 "no reclamation during the sweep").
#[derive(Debug, Clone, Default)]
pub struct SegmentArena {
    segments: Vec<Segment>,
}

impl SegmentArena {
    pub fn new() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn push(&mut self, segment: Segment) -> SegmentId {
        self.segments.push(segment);
        SegmentId(self.segments.len() - 1)
    }

    pub fn get(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    pub fn get_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.segments[id.0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments.iter().enumerate().map(|(i, s)| (SegmentId(i), s))
    }

    /// `split`, §4.6. Splits `id` at `points` (deduplicated and sorted
    /// under the event order before this is called), mutating the
    /// original segment in place (its right endpoint becomes the leftmost
    /// split point) and appending one new segment per remaining point.
    /// Fails per §7 "Split on endpoint" if a point equals an existing
    /// endpoint.
    ///
    /// Returns the ids of every newly-created segment, left to right.
    pub fn split(
        &mut self,
        id: SegmentId,
        mut points: Vec<Point>,
        eps: Epsilon,
    ) -> SweepResult<Vec<SegmentId>> {
        points.sort_by(|a, b| a.compare(*b, eps));
        points.dedup_by(|a, b| a.tolerant_eq(*b, eps));

        let mut new_ids = Vec::with_capacity(points.len());
        let mut current = id;

        for p in points {
            let (right, ring_in) = {
                let seg = self.get(current);
                if p.tolerant_eq(seg.left, eps) || p.tolerant_eq(seg.right, eps) {
                    return Err(SweepError::SplitOnEndpoint(p));
                }
                (seg.right, seg.ring_in)
            };

            let new_segment = Segment::new(p, right, ring_in, eps)?;
            let new_id = self.push(new_segment);

            {
                let seg = self.get_mut(current);
                seg.right = p;
                seg.classification = Classification::default();
            }

            new_ids.push(new_id);
            current = new_id;
        }

        Ok(new_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eps() -> Epsilon {
        Epsilon::default()
    }

    #[test]
    fn construction_rejects_degenerate_segment() {
        let p = Point::new(1.0, 1.0);
        assert!(Segment::new(p, p, 0, eps()).is_err());
    }

    #[test]
    fn construction_canonicalises_left_right() {
        let a = Point::new(5.0, 5.0);
        let b = Point::new(1.0, 1.0);
        let seg = Segment::new(a, b, 0, eps()).unwrap();
        assert_eq!(seg.left, b);
        assert_eq!(seg.right, a);
    }

    #[test]
    fn intersections_of_crossing_segments() {
        let s1 = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 0, eps()).unwrap();
        let s2 = Segment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0), 1, eps()).unwrap();
        let hits = Segment::get_intersections(&s1, &s2, eps());
        assert_eq!(hits.len(), 1);
        assert!(hits[0].tolerant_eq(Point::new(5.0, 5.0), eps()));
    }

    #[test]
    fn intersections_are_symmetric() {
        let s1 = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 0, eps()).unwrap();
        let s2 = Segment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0), 1, eps()).unwrap();
        let ab = Segment::get_intersections(&s1, &s2, eps());
        let ba = Segment::get_intersections(&s2, &s1, eps());
        assert_eq!(ab.len(), ba.len());
        for p in &ab {
            assert!(ba.iter().any(|q| p.tolerant_eq(*q, eps())));
        }
    }

    #[test]
    fn disjoint_bboxes_yield_no_intersections() {
        let s1 = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 0, eps()).unwrap();
        let s2 = Segment::new(Point::new(5.0, 5.0), Point::new(6.0, 6.0), 1, eps()).unwrap();
        assert!(Segment::get_intersections(&s1, &s2, eps()).is_empty());
    }

    #[test]
    fn split_rejects_point_at_existing_endpoint() {
        let mut arena = SegmentArena::new();
        let id = arena.push(Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0, eps()).unwrap());
        let err = arena.split(id, vec![Point::new(10.0, 0.0)], eps()).unwrap_err();
        assert_eq!(err, SweepError::SplitOnEndpoint(Point::new(10.0, 0.0)));
    }

    #[test]
    fn split_shrinks_original_and_appends_remainder() {
        let mut arena = SegmentArena::new();
        let id = arena.push(Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 0, eps()).unwrap());
        let new_ids = arena.split(id, vec![Point::new(4.0, 0.0)], eps()).unwrap();
        assert_eq!(new_ids.len(), 1);
        assert_eq!(arena.get(id).right, Point::new(4.0, 0.0));
        assert_eq!(arena.get(new_ids[0]).left, Point::new(4.0, 0.0));
        assert_eq!(arena.get(new_ids[0]).right, Point::new(10.0, 0.0));
    }

    #[test]
    fn compare_is_total_order_on_nonoverlapping_segments() {
        let s1 = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 0, eps()).unwrap();
        let s2 = Segment::new(Point::new(2.0, 0.0), Point::new(3.0, 0.0), 1, eps()).unwrap();
        assert_eq!(Segment::compare(&s1, &s2, eps()).unwrap(), Ordering::Less);
        assert_eq!(Segment::compare(&s2, &s1, eps()).unwrap(), Ordering::Greater);
    }

    #[test]
    fn compare_is_irreflexive_on_coincident_but_distinct_segments() {
        // Same endpoints, different `ring_in`: must not compare `Equal` —
        // that would make two genuinely distinct segments indistinguishable
        // in the status structure. §4.3 step 3 tie-breaks colinear
        // segments sharing a left endpoint by `ring_in`.
        let s1 = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 5, eps()).unwrap();
        let s2 = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 2, eps()).unwrap();
        assert_eq!(Segment::compare(&s1, &s2, eps()).unwrap(), Ordering::Greater);
        assert_eq!(Segment::compare(&s2, &s1, eps()).unwrap(), Ordering::Less);
    }

    #[test]
    fn compare_is_reflexive_equal_for_a_segment_against_itself() {
        let s1 = Segment::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 7, eps()).unwrap();
        assert_eq!(Segment::compare(&s1, &s1, eps()).unwrap(), Ordering::Equal);
    }
}
