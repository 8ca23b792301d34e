//! The operation descriptor and the `isInResult` inclusion predicate
//! (§4.8, §6). Modelled as an explicit value threaded through the sweep
//! rather than a module-level singleton (spec.md §9 "Operation state").

use crate::coincidence::CoincidenceIndex;
use crate::error::{SweepError, SweepResult};
use crate::segment::{Classification, SegmentArena, SegmentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Union,
    Intersection,
    Xor,
    Difference,
}

/// `{ type, multiPolys, subject }` from §6. `multipolys` lists every
/// operand's index (as assigned by `Geometry::add_multipoly`); `subject`
/// is required for `Difference`.
#[derive(Debug, Clone)]
pub struct Operation {
    pub ty: OperationType,
    pub multipolys: Vec<usize>,
    pub subject: Option<usize>,
}

impl Operation {
    pub fn new(ty: OperationType, multipolys: Vec<usize>, subject: Option<usize>) -> SweepResult<Self> {
        if ty == OperationType::Difference && subject.is_none() {
            return Err(SweepError::UnknownOperation);
        }
        Ok(Operation { ty, multipolys, subject })
    }

    /// `isInResult`, §4.8. Not the coincidence winner ⇒ `false`.
    pub fn is_in_result(
        &self,
        id: SegmentId,
        arena: &SegmentArena,
        coincidence: &mut CoincidenceIndex,
    ) -> SweepResult<bool> {
        if !coincidence.is_winner(id, arena) {
            return Ok(false);
        }
        let c: &Classification = &arena.get(id).classification;
        if !c.is_valid_edge_for_poly {
            return Ok(false);
        }

        let enters = c.multipolys_slp_enters.len();
        let exits = c.multipolys_slp_exits.len();
        let total = self.multipolys.len();

        Ok(match self.ty {
            OperationType::Union => (enters == 0) != (exits == 0),
            OperationType::Intersection => enters.max(exits) == total,
            OperationType::Xor => (enters as isize - exits as isize).unsigned_abs() % 2 == 1,
            OperationType::Difference => {
                let subject = self.subject.expect("validated at construction");
                let enters_is_subject_only = c.multipolys_slp_enters == [subject];
                let exits_is_subject_only = c.multipolys_slp_exits == [subject];
                enters_is_subject_only != exits_is_subject_only
            }
        })
    }
}
