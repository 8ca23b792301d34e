use thiserror::Error;

/// Fatal, non-recoverable conditions the sweep can hit.
///
/// Every variant here is a programmer/invariant violation rather than a
/// user-recoverable condition (degenerate input is rejected up front by
/// the caller; tolerance-driven near-degeneracies are absorbed by the
/// epsilon predicates in [`crate::point`] instead of surfacing here).
#[derive(Debug, Error, PartialEq)]
pub enum SweepError {
    #[error("segment endpoints are tolerantly equal: {0:?}")]
    DegenerateSegment(crate::point::Point),

    #[error("split point {0:?} equals an existing segment endpoint")]
    SplitOnEndpoint(crate::point::Point),

    #[error("Segment::compare could not order two distinct segments (likely NaN input or a predicate bug)")]
    OrderingFailure,

    #[error("unknown boolean operation type")]
    UnknownOperation,

    #[error("get_other_se called with an event that does not belong to this segment")]
    ForeignEvent,
}

pub type SweepResult<T> = Result<T, SweepError>;
