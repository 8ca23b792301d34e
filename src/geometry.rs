//! The input geometry model: `Ring` / `Poly` / `MultiPoly` (§3, §6).
//!
//! This is the "consumed from the input model" interface the sweep reads
//! from — `ring.id`, `ring.is_exterior`, parent links, and the
//! `is_valid`/`is_inside` predicates. Coercing raw coordinate arrays into
//! this shape, and walking surviving segments back out of it, are the
//! external concerns spec.md places out of the core's scope; this module
//! only owns the shape itself plus the predicates the core classification
//! logic (`crate::classify`) needs to consult.

use std::collections::HashSet;

use crate::point::Point;

/// Whether a ring is a polygon's outer boundary or one of its holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingRole {
    Exterior,
    Interior,
}

/// Whether a multipolygon is the subject or the clipping operand of an
/// operation. Only meaningful for `DIFFERENCE` (§4.8), but tracked on every
/// multipolygon since the sweep doesn't otherwise know which operand a
/// segment originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiPolyKind {
    Subject,
    Clipping,
}

/// A closed, directed ring of points. Has a stable, monotonically
/// increasing `id` used as a deterministic tie-breaker throughout the
/// sweep (§3 invariants; §9 "deterministic ordering").
#[derive(Debug, Clone)]
pub struct Ring {
    pub id: u32,
    pub role: RingRole,
    pub points: Vec<Point>,
    /// Index into `Geometry::polys`.
    pub poly: usize,
}

impl Ring {
    pub fn is_exterior(&self) -> bool {
        matches!(self.role, RingRole::Exterior)
    }
}

/// One outer ring plus zero or more holes.
#[derive(Debug, Clone)]
pub struct Poly {
    /// Index into `Geometry::rings`.
    pub exterior: usize,
    /// Indices into `Geometry::rings`.
    pub holes: Vec<usize>,
    /// Index into `Geometry::multipolys`.
    pub multipoly: usize,
}

/// A set of polys, tagged subject or clipping.
#[derive(Debug, Clone)]
pub struct MultiPoly {
    pub kind: MultiPolyKind,
    /// Indices into `Geometry::polys`.
    pub polys: Vec<usize>,
}

/// Owns every ring/poly/multipoly participating in one sweep (both
/// operands). Built once from input and immutable thereafter (§3
/// "Lifecycles").
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub rings: Vec<Ring>,
    pub polys: Vec<Poly>,
    pub multipolys: Vec<MultiPoly>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one multipolygon (as raw rings-per-poly, exterior first) and
    /// returns its index into `multipolys`.
    ///
    /// `polys` is a list of polygons; each polygon is a list of rings
    /// (exterior first, then holes), each ring a list of (not necessarily
    /// closed, not necessarily simple) points.
    pub fn add_multipoly(
        &mut self,
        kind: MultiPolyKind,
        polys: Vec<Vec<Vec<Point>>>,
        next_ring_id: &mut u32,
    ) -> usize {
        let multipoly_idx = self.multipolys.len();
        let mut poly_indices = Vec::with_capacity(polys.len());

        for rings in polys {
            let poly_idx = self.polys.len();
            let mut rings_iter = rings.into_iter();
            let exterior_points = match rings_iter.next() {
                Some(p) => p,
                None => continue,
            };

            let exterior_idx = self.rings.len();
            self.rings.push(Ring {
                id: *next_ring_id,
                role: RingRole::Exterior,
                points: exterior_points,
                poly: poly_idx,
            });
            *next_ring_id += 1;

            let mut hole_indices = Vec::new();
            for hole_points in rings_iter {
                let hole_idx = self.rings.len();
                self.rings.push(Ring {
                    id: *next_ring_id,
                    role: RingRole::Interior,
                    points: hole_points,
                    poly: poly_idx,
                });
                *next_ring_id += 1;
                hole_indices.push(hole_idx);
            }

            self.polys.push(Poly {
                exterior: exterior_idx,
                holes: hole_indices,
                multipoly: multipoly_idx,
            });
            poly_indices.push(poly_idx);
        }

        self.multipolys.push(MultiPoly {
            kind,
            polys: poly_indices,
        });
        multipoly_idx
    }

    pub fn ring_by_id(&self, id: u32) -> &Ring {
        self.rings
            .iter()
            .find(|r| r.id == id)
            .expect("ring id always refers to a ring created by this Geometry")
    }

    /// Is `ring` still a valid boundary, given the set of ring ids the
    /// sweep currently considers this segment strictly inside of?
    ///
    /// An exterior ring is folded away (invalid) only when it sits
    /// strictly inside another exterior ring belonging to a *different*
    /// poly of the *same* multipolygon — i.e. a duplicate/nested exterior
    /// within one operand. A hole is valid only when it lies inside its
    /// own poly's exterior.
    pub fn is_valid(&self, ring: &Ring, rings_inside_of: &HashSet<u32>) -> bool {
        match ring.role {
            RingRole::Exterior => {
                let mp = &self.multipolys[self.polys[ring.poly].multipoly];
                !mp.polys.iter().any(|&other_poly_idx| {
                    if other_poly_idx == ring.poly {
                        return false;
                    }
                    let other_ext = &self.rings[self.polys[other_poly_idx].exterior];
                    rings_inside_of.contains(&other_ext.id)
                })
            }
            RingRole::Interior => {
                let exterior = &self.rings[self.polys[ring.poly].exterior];
                rings_inside_of.contains(&exterior.id)
            }
        }
    }

    /// Is a segment whose on-edge rings are `rings_on_edge_of` strictly
    /// inside `poly`, given it is strictly inside the ring ids in
    /// `rings_inside_of`? Excludes the case where the segment runs along
    /// one of the poly's own ring edges (that's handled via coincidence,
    /// not via "inside").
    pub fn poly_is_inside(
        &self,
        poly: &Poly,
        rings_on_edge_of: &HashSet<u32>,
        rings_inside_of: &HashSet<u32>,
    ) -> bool {
        let exterior_id = self.rings[poly.exterior].id;
        if rings_on_edge_of.contains(&exterior_id) {
            return false;
        }
        if !rings_inside_of.contains(&exterior_id) {
            return false;
        }
        for &hole_idx in &poly.holes {
            let hole_id = self.rings[hole_idx].id;
            if rings_on_edge_of.contains(&hole_id) || rings_inside_of.contains(&hole_id) {
                return false;
            }
        }
        true
    }
}
