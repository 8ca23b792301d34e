//! Bounding box utilities.

use crate::fsize;
use crate::point::{Epsilon, Point};

/// Axis-aligned bounding box, inclusive on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub(crate) top: fsize,
    pub(crate) right: fsize,
    pub(crate) bottom: fsize,
    pub(crate) left: fsize,
}

impl Bbox {
    pub fn from_points(a: Point, b: Point) -> Self {
        Bbox {
            left: a.x.min(b.x),
            right: a.x.max(b.x),
            bottom: a.y.min(b.y),
            top: a.y.max(b.y),
        }
    }

    /// Returns true if two bounding boxes overlap (touching counts).
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !((other.left > self.right)
            || (other.right < self.left)
            || (other.top < self.bottom)
            || (other.bottom > self.top))
    }

    /// Returns true if `p` lies within this bbox (tolerantly).
    pub fn contains(&self, p: Point, eps: Epsilon) -> bool {
        !eps.lt(p.x, self.left)
            && !eps.lt(self.right, p.x)
            && !eps.lt(p.y, self.bottom)
            && !eps.lt(self.top, p.y)
    }

    /// The overlap region of two bboxes, possibly collapsed to a segment or
    /// a single point. Returns `None` when they do not overlap.
    pub fn overlap(&self, other: &Self) -> Option<Bbox> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Bbox {
            left: self.left.max(other.left),
            right: self.right.min(other.right),
            bottom: self.bottom.max(other.bottom),
            top: self.top.min(other.top),
        })
    }

    /// The (deduplicated) corners of this bbox, in no particular order.
    /// A degenerate bbox (a line or a point) yields fewer than four.
    pub fn corners(&self, eps: Epsilon) -> Vec<Point> {
        let candidates = [
            Point::new(self.left, self.bottom),
            Point::new(self.right, self.bottom),
            Point::new(self.right, self.top),
            Point::new(self.left, self.top),
        ];
        let mut out: Vec<Point> = Vec::with_capacity(4);
        for c in candidates {
            if !out.iter().any(|o| o.tolerant_eq(c, eps)) {
                out.push(c);
            }
        }
        out
    }
}
