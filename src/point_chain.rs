//! A chain of points assembled by linking surviving segments end to end,
//! until it closes into a ring. Generalises the teacher's `PointChain`
//! (which linked `&Point2D` references sharing the sweep's input arrays)
//! to owned, tolerantly-compared points, since segments surviving the
//! sweep may carry freshly-computed intersection points that don't alias
//! any input vertex.

use std::collections::VecDeque;

use crate::point::{Epsilon, Point};

#[derive(Clone, Debug)]
pub(crate) struct PointChain {
    nodes: VecDeque<Point>,
    is_closed: bool,
}

impl PointChain {
    pub(crate) fn init(begin: Point, end: Point) -> Self {
        let mut deque = VecDeque::with_capacity(2);
        deque.push_back(begin);
        deque.push_back(end);
        Self { nodes: deque, is_closed: false }
    }

    /// Attempts to link one more segment `(begin, end)` onto either end of
    /// this chain. Returns whether it fit.
    pub(crate) fn link_segment(&mut self, begin: Point, end: Point, eps: Epsilon) -> bool {
        let first = *self.nodes.front().unwrap();
        let last = *self.nodes.back().unwrap();

        if begin.tolerant_eq(first, eps) {
            if end.tolerant_eq(last, eps) {
                self.is_closed = true;
            } else {
                self.nodes.push_front(end);
            }
            return true;
        }
        if end.tolerant_eq(last, eps) {
            if begin.tolerant_eq(first, eps) {
                self.is_closed = true;
            } else {
                self.nodes.push_back(begin);
            }
            return true;
        }
        if end.tolerant_eq(first, eps) {
            if begin.tolerant_eq(last, eps) {
                self.is_closed = true;
            } else {
                self.nodes.push_front(begin);
            }
            return true;
        }
        if begin.tolerant_eq(last, eps) {
            if end.tolerant_eq(first, eps) {
                self.is_closed = true;
            } else {
                self.nodes.push_back(end);
            }
            return true;
        }
        false
    }

    /// Splices another (still-open) chain onto this one, if one of its
    /// ends matches one of this chain's ends. If the splice brings this
    /// chain's own two ends together, marks it closed — mirrors
    /// `link_segment`'s closing check, since a chain-to-chain merge is just
    /// as capable of completing a ring as a single-segment link is.
    pub(crate) fn link_point_chain(&mut self, mut chain: PointChain, eps: Epsilon) -> bool {
        let chain_first = *chain.nodes.front().unwrap();
        let chain_last = *chain.nodes.back().unwrap();
        let self_first = *self.nodes.front().unwrap();
        let self_last = *self.nodes.back().unwrap();

        let linked = if chain_first.tolerant_eq(self_last, eps) {
            chain.nodes.pop_front();
            chain.nodes.into_iter().for_each(|p| self.nodes.push_back(p));
            true
        } else if chain_last.tolerant_eq(self_first, eps) {
            self.nodes.pop_front();
            chain.nodes.into_iter().rev().for_each(|p| self.nodes.push_front(p));
            true
        } else if chain_first.tolerant_eq(self_first, eps) {
            self.nodes.pop_front();
            chain.nodes.into_iter().for_each(|p| self.nodes.push_front(p));
            true
        } else if chain_last.tolerant_eq(self_last, eps) {
            self.nodes.pop_back();
            chain.nodes.into_iter().rev().for_each(|p| self.nodes.push_back(p));
            true
        } else {
            false
        };

        if linked {
            let new_first = *self.nodes.front().unwrap();
            let new_last = *self.nodes.back().unwrap();
            if new_first.tolerant_eq(new_last, eps) {
                self.is_closed = true;
            }
        }
        linked
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub(crate) fn into_points(self) -> Vec<Point> {
        let mut pts: Vec<Point> = self.nodes.into_iter().collect();
        if self.is_closed && pts.len() > 1 && pts.first() == pts.last() {
            pts.pop();
        }
        pts
    }
}
