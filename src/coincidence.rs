//! Coincidence equivalence classes, modelled as a union-find over segment
//! indices rather than the shared mutable list the original algorithm
//! uses for `coincidents` (per spec.md §9 "Coincidence equivalence class").

use std::collections::HashMap;

use crate::segment::{SegmentArena, SegmentId};

#[derive(Debug, Clone, Default)]
pub struct CoincidenceIndex {
    parent: Vec<usize>,
    rank: Vec<u32>,
    groups: HashMap<usize, Vec<SegmentId>>,
}

impl CoincidenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly created segment as its own singleton class.
    /// Must be called once per segment, in id order, before any `union`
    /// referencing it (splitting does *not* carry the old class over to
    /// the new piece — the sweep driver re-registers coincidence
    /// explicitly if the split partner shares the same split point).
    pub fn register(&mut self, id: SegmentId) {
        debug_assert_eq!(id.0, self.parent.len());
        self.parent.push(id.0);
        self.rank.push(0);
        self.groups.insert(id.0, vec![id]);
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merges the coincidence classes of `a` and `b`.
    pub fn union(&mut self, a: SegmentId, b: SegmentId) {
        let ra = self.find(a.0);
        let rb = self.find(b.0);
        if ra == rb {
            return;
        }
        let (small, large) = if self.rank[ra] < self.rank[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = large;
        if self.rank[ra] == self.rank[rb] {
            self.rank[large] += 1;
        }
        if let Some(members) = self.groups.remove(&small) {
            self.groups.get_mut(&large).unwrap().extend(members);
        }
    }

    /// Every segment (tolerantly) coincident with `id`, `id` itself
    /// included.
    pub fn members(&mut self, id: SegmentId) -> &[SegmentId] {
        let root = self.find(id.0);
        self.groups.get(&root).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The unique representative of `id`'s coincidence class: the member
    /// with the smallest `ring_in` id (§4.7 "winner").
    pub fn winner(&mut self, id: SegmentId, arena: &SegmentArena) -> SegmentId {
        let root = self.find(id.0);
        let members = self.groups.get(&root).expect("registered class");
        *members
            .iter()
            .min_by_key(|m| arena.get(**m).ring_in)
            .expect("a coincidence class always has at least one member")
    }

    pub fn is_winner(&mut self, id: SegmentId, arena: &SegmentArena) -> bool {
        self.winner(id, arena) == id
    }
}
