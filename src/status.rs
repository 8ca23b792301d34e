//! The status structure (§4.4): the set of currently active segments,
//! ordered by `Segment::compare`. Implemented as a sorted `Vec` — spec.md
//! is explicit that a balanced tree or skip list would also do; a linear
//! structure is correct and plenty fast for the modest inputs this crate
//! targets.

use crate::error::SweepResult;
use crate::point::Epsilon;
use crate::segment::{Segment, SegmentArena, SegmentId};

#[derive(Debug, Clone, Default)]
pub struct Status {
    active: Vec<SegmentId>,
}

impl Status {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    fn position_of(&self, id: SegmentId, arena: &SegmentArena, eps: Epsilon) -> SweepResult<Result<usize, usize>> {
        let target = arena.get(id);
        let mut lo = 0usize;
        let mut hi = self.active.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            let candidate = arena.get(self.active[mid]);
            match Segment::compare(candidate, target, eps)? {
                std::cmp::Ordering::Less => lo = mid + 1,
                std::cmp::Ordering::Equal => return Ok(Ok(mid)),
                std::cmp::Ordering::Greater => hi = mid,
            }
        }
        Ok(Err(lo))
    }

    /// Inserts `id` into the status, returning its index.
    pub fn insert(&mut self, id: SegmentId, arena: &SegmentArena, eps: Epsilon) -> SweepResult<usize> {
        let idx = match self.position_of(id, arena, eps)? {
            Ok(existing) => existing,
            Err(insert_at) => insert_at,
        };
        self.active.insert(idx, id);
        Ok(idx)
    }

    /// Removes `id` from the status. Returns the index it used to occupy.
    pub fn remove(&mut self, id: SegmentId, arena: &SegmentArena, eps: Epsilon) -> SweepResult<usize> {
        let idx = self
            .active
            .iter()
            .position(|&s| s == id)
            .expect("segment must be active before it can be removed");
        self.active.remove(idx);
        let _ = eps;
        let _ = arena;
        Ok(idx)
    }

    /// The current index of `id` within the status, if active.
    pub fn active_index(&self, id: SegmentId) -> Option<usize> {
        self.active.iter().position(|&s| s == id)
    }

    pub fn predecessor_at(&self, idx: usize) -> Option<SegmentId> {
        if idx == 0 {
            None
        } else {
            self.active.get(idx - 1).copied()
        }
    }

    pub fn successor_at(&self, idx: usize) -> Option<SegmentId> {
        self.active.get(idx + 1).copied()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
