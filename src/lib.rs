//! `polyclip` performs boolean set operations on planar multipolygons:
//!
//! - Union: the area covered by either operand
//! - Intersection: the area covered by both operands
//! - Xor: the area covered by exactly one operand
//! - Difference: the area of the subject not covered by the clipping operand
//!
//! The implementation is a Bentley-Ottmann plane sweep with
//! Martinez/Greiner-Hormann style boundary classification: every edge of
//! both operands is swept left to right, split at every intersection
//! with another edge, classified by which operand(s) the sweep line is
//! currently inside of at that edge, and finally kept or discarded
//! according to the requested operation before the surviving edges are
//! stitched back into closed rings.
//!
//! ```
//! use polyclip::{boolean_op, Epsilon, MultiPolyInput, OperationType, PolyInput};
//!
//! let square = |x0: f64, y0: f64, s: f64| vec![
//!     (x0, y0), (x0 + s, y0), (x0 + s, y0 + s), (x0, y0 + s),
//! ];
//!
//! let subject: MultiPolyInput = vec![PolyInput { exterior: square(0.0, 0.0, 2.0), holes: vec![] }];
//! let clipping: MultiPolyInput = vec![PolyInput { exterior: square(1.0, 1.0, 2.0), holes: vec![] }];
//!
//! let result = boolean_op(OperationType::Union, subject, clipping, Epsilon::default()).unwrap();
//! assert_eq!(result.len(), 1);
//! ```

#![allow(dead_code)]

pub type fsize = f64;

mod bbox;
mod classify;
mod coincidence;
mod connector;
mod error;
mod event;
mod geometry;
mod operation;
mod point;
mod point_chain;
mod segment;
mod status;
mod sweep;

pub use bbox::Bbox;
pub use connector::{OutputMultiPolygon, OutputPolygon};
pub use error::{SweepError, SweepResult};
pub use operation::OperationType;
pub use point::{Epsilon, Point};

use geometry::{Geometry, MultiPolyKind};
use log::info;
use operation::Operation;

/// One polygon of a [`MultiPolyInput`]: an exterior ring plus holes, each
/// given as a flat list of `(x, y)` pairs (not necessarily closed —
/// repeating the first point at the end is harmless but not required).
#[derive(Debug, Clone, Default)]
pub struct PolyInput {
    pub exterior: Vec<(fsize, fsize)>,
    pub holes: Vec<Vec<(fsize, fsize)>>,
}

/// A set of polygons making up one operand of a boolean operation.
pub type MultiPolyInput = Vec<PolyInput>;

fn to_geometry_rings(poly: PolyInput) -> Vec<Vec<point::Point>> {
    let mut rings = Vec::with_capacity(1 + poly.holes.len());
    rings.push(poly.exterior.into_iter().map(|(x, y)| point::Point::new(x, y)).collect());
    for hole in poly.holes {
        rings.push(hole.into_iter().map(|(x, y)| point::Point::new(x, y)).collect());
    }
    rings
}

/// Runs `op` between `subject` and `clipping`, returning the result as a
/// list of output polygons. `eps` controls how close two coordinates or
/// two crossing edges must be to be treated as identical; use
/// [`Epsilon::default`] unless the input is known to need a looser or
/// tighter tolerance.
///
/// For [`OperationType::Difference`], `subject` is always the minuend
/// (the result is `subject` minus `clipping`).
pub fn boolean_op(
    op: OperationType,
    subject: MultiPolyInput,
    clipping: MultiPolyInput,
    eps: Epsilon,
) -> SweepResult<OutputMultiPolygon> {
    let mut geometry = Geometry::new();
    let mut next_ring_id = 0u32;

    let subject_polys: Vec<Vec<Vec<point::Point>>> = subject.into_iter().map(to_geometry_rings).collect();
    let clipping_polys: Vec<Vec<Vec<point::Point>>> = clipping.into_iter().map(to_geometry_rings).collect();

    let subject_idx = geometry.add_multipoly(MultiPolyKind::Subject, subject_polys, &mut next_ring_id);
    let clipping_idx = geometry.add_multipoly(MultiPolyKind::Clipping, clipping_polys, &mut next_ring_id);

    let operation = Operation::new(op, vec![subject_idx, clipping_idx], Some(subject_idx))?;

    info!("running {:?} over {} ring(s)", op, geometry.rings.len());

    let (arena, in_result) = sweep::run(&geometry, &operation, eps)?;
    Ok(connector::assemble(&arena, &in_result, eps))
}
