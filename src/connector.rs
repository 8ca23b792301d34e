//! Stitches the sweep's in-result segments back into closed, oriented
//! output rings (§4.10 "Ring assembly"), then groups those rings into
//! polygons-with-holes by containment nesting.
//!
//! Generalises the teacher's `Connector` (which linked `Segment<'a>`
//! references sharing the sweep's input lifetime) to the owned,
//! arena-indexed segments this crate produces; the four-way endpoint
//! matching logic in [`PointChain`] is otherwise the same idea.

use crate::point::{Epsilon, Point};
use crate::point_chain::PointChain;
use crate::segment::{SegmentArena, SegmentId};

/// One output polygon: an exterior ring plus zero or more holes, each a
/// closed, non-self-intersecting loop of points (first point not
/// repeated at the end).
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPolygon {
    pub exterior: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

/// The final result of a boolean operation: zero or more disjoint
/// polygons.
pub type OutputMultiPolygon = Vec<OutputPolygon>;

/// Collects segments one at a time, merging each into whichever open
/// chain it extends (or starting a new one), until every chain that can
/// close has closed.
struct Connector {
    open: Vec<PointChain>,
    closed: Vec<PointChain>,
}

impl Connector {
    fn new() -> Self {
        Self { open: Vec::new(), closed: Vec::new() }
    }

    fn add_segment(&mut self, begin: Point, end: Point, eps: Epsilon) {
        let mut linked_at = None;
        for (j, chain) in self.open.iter_mut().enumerate() {
            if chain.link_segment(begin, end, eps) {
                linked_at = Some(j);
                break;
            }
        }

        let Some(mut j) = linked_at else {
            self.open.push(PointChain::init(begin, end));
            return;
        };

        if self.open[j].is_closed() {
            self.closed.push(self.open.remove(j));
            return;
        }

        // The chain at `j` grew but didn't close; it may now bridge to
        // another still-open chain. Keep merging until nothing more fits.
        loop {
            let mut merge_with = None;
            for i in 0..self.open.len() {
                if i == j {
                    continue;
                }
                let mut probe = self.open[j].clone();
                if probe.link_point_chain(self.open[i].clone(), eps) {
                    merge_with = Some(i);
                    break;
                }
            }
            let Some(i) = merge_with else { break };
            let other = self.open.remove(i);
            if i < j {
                j -= 1;
            }
            let merged = self.open[j].link_point_chain(other, eps);
            debug_assert!(merged);
            if self.open[j].is_closed() {
                break;
            }
        }

        if self.open[j].is_closed() {
            self.closed.push(self.open.remove(j));
        }
    }

    fn into_rings(self) -> Vec<Vec<Point>> {
        self.closed
            .into_iter()
            .map(PointChain::into_points)
            .filter(|ring| ring.len() >= 3)
            .collect()
    }
}

/// Shoelace signed area; positive ⇒ counter-clockwise.
fn signed_area(ring: &[Point]) -> crate::fsize {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

fn reverse(ring: &mut Vec<Point>) {
    ring.reverse();
}

/// Ray-casting point-in-polygon test (boundary membership is undefined,
/// which is fine here: nesting only ever tests a ring's own vertex
/// against a *different* ring).
fn point_in_ring(p: Point, ring: &[Point]) -> bool {
    let n = ring.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_at = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn ring_contains_ring(outer: &[Point], inner: &[Point]) -> bool {
    point_in_ring(inner[0], outer)
}

/// Groups closed rings into polygons by containment depth: a ring nested
/// inside an even number of other rings is an exterior (forced CCW); an
/// odd number, a hole (forced CW) of its nearest enclosing exterior.
/// Resolves spec.md §9's output-orientation Open Question in favor of
/// the common GeoJSON convention, since the spec leaves it unspecified.
fn group_into_polygons(mut rings: Vec<Vec<Point>>) -> OutputMultiPolygon {
    let n = rings.len();
    let mut contains: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in 0..n {
            if i != j && ring_contains_ring(&rings[i], &rings[j]) {
                contains[i].push(j);
            }
        }
    }
    let depth: Vec<usize> = (0..n).map(|i| contains.iter().filter(|c| c.contains(&i)).count()).collect();

    for (i, ring) in rings.iter_mut().enumerate() {
        let area = signed_area(ring);
        let is_hole = depth[i] % 2 == 1;
        if (is_hole && area < 0.0) || (!is_hole && area > 0.0) {
            // already correctly oriented
        } else {
            reverse(ring);
        }
    }

    let mut polys: Vec<OutputPolygon> = Vec::new();
    let mut exterior_index: Vec<usize> = Vec::new();
    for i in 0..n {
        if depth[i] % 2 == 0 {
            exterior_index.push(i);
            polys.push(OutputPolygon { exterior: rings[i].clone(), holes: Vec::new() });
        }
    }

    for i in 0..n {
        if depth[i] % 2 == 1 {
            // nearest enclosing exterior: the exterior among this ring's
            // containers with the greatest depth.
            let mut best: Option<usize> = None;
            let mut best_depth = -1isize;
            for &ext_i in &exterior_index {
                if contains[ext_i].contains(&i) && depth[ext_i] as isize > best_depth {
                    best_depth = depth[ext_i] as isize;
                    best = Some(ext_i);
                }
            }
            if let Some(ext_i) = best {
                let poly_idx = exterior_index.iter().position(|&x| x == ext_i).unwrap();
                polys[poly_idx].holes.push(rings[i].clone());
            }
        }
    }

    polys
}

/// Walks every in-result segment into closed rings and groups them into
/// the final output multipolygon.
pub fn assemble(arena: &SegmentArena, in_result: &[SegmentId], eps: Epsilon) -> OutputMultiPolygon {
    let mut connector = Connector::new();
    for &id in in_result {
        let seg = arena.get(id);
        connector.add_segment(seg.left, seg.right, eps);
    }
    let rings = connector.into_rings();
    group_into_polygons(rings)
}
