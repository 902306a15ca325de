//! One-to-one tolerance matching of a pattern against its own image
//!
//! A transform is accepted when every primitive whose image stays inside the
//! sampled extent is paired with a distinct primitive within epsilon, and every
//! primitive whose preimage lies inside the extent has been paired. Images that
//! land within epsilon past either end are paired when a partner exists and are
//! otherwise ignored. Pairing is greedy nearest-neighbour over a window sorted by
//! reference position.

use bitvec::bitvec;
use bitvec::slice::BitSlice;

use crate::algorithm::deadline::Deadline;
use crate::io::error::Result;
use crate::spatial::strip::{StripExtent, StripIsometry, StripShape};

/// Shapes of one pattern sorted for window queries along the axis
#[derive(Debug, Clone)]
pub struct StripIndex {
    shapes: Vec<StripShape>,
    /// (reference `u`, shape index), sorted by `u`
    order: Vec<(f64, usize)>,
    extent: StripExtent,
}

impl StripIndex {
    /// Index a non-empty set of shapes
    pub fn new(shapes: Vec<StripShape>) -> Option<Self> {
        let extent = StripExtent::of(&shapes)?;
        let mut order: Vec<(f64, usize)> = shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| (shape.reference().u, i))
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Some(Self {
            shapes,
            order,
            extent,
        })
    }

    /// Shapes in input order
    pub fn shapes(&self) -> &[StripShape] {
        &self.shapes
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Always false for an index built by [`StripIndex::new`]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Span occupied by the shapes
    pub const fn extent(&self) -> &StripExtent {
        &self.extent
    }

    /// Indices of shapes whose reference `u` lies within `epsilon` of `u`
    pub fn window(&self, u: f64, epsilon: f64) -> impl Iterator<Item = usize> + '_ {
        let lo = self.order.partition_point(|&(key, _)| key < u - epsilon);
        let hi = self.order.partition_point(|&(key, _)| key <= u + epsilon);
        self.order
            .get(lo..hi.max(lo))
            .unwrap_or(&[])
            .iter()
            .map(|&(_, index)| index)
    }

    /// Smallest positive matching distance between two shapes of the same kind
    ///
    /// Returns `None` when no two distinct shapes share a kind.
    pub fn min_spacing(&self) -> Option<f64> {
        let mut best = f64::INFINITY;
        for (position, &(u, index)) in self.order.iter().enumerate() {
            let Some(shape) = self.shapes.get(index) else {
                continue;
            };
            // Matching distance is never below the gap between reference positions
            for &(other_u, other) in self.order.get(position + 1..).unwrap_or(&[]) {
                if other_u - u >= best {
                    break;
                }
                if let Some(distance) = self.shapes.get(other).map(|o| shape.distance(o))
                    && distance > 0.0
                    && distance < best
                {
                    best = distance;
                }
            }
        }
        best.is_finite().then_some(best)
    }

    /// Closest shape of the same kind within `epsilon` that is not yet used
    pub fn nearest_unused(
        &self,
        target: &StripShape,
        used: &BitSlice,
        epsilon: f64,
    ) -> Option<(usize, f64)> {
        self.window(target.reference().u, epsilon)
            .filter(|&index| used.get(index).is_some_and(|bit| !*bit))
            .filter_map(|index| {
                let shape = self.shapes.get(index)?;
                let distance = shape.distance(target);
                (distance <= epsilon).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
    }
}

/// Result of a successful match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// (shape, partner) index pairs, one per paired shape
    pub pairs: Vec<(usize, usize)>,
    /// Largest pairing distance
    pub residual: f64,
}

impl MatchOutcome {
    /// Number of primitives paired with a partner
    pub fn matched(&self) -> usize {
        self.pairs.len()
    }
}

/// Tests isometries against one indexed pattern
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    index: &'a StripIndex,
    epsilon: f64,
    min_overlap: f64,
    deadline: &'a Deadline,
}

impl<'a> Matcher<'a> {
    /// Create a matcher
    pub const fn new(
        index: &'a StripIndex,
        epsilon: f64,
        min_overlap: f64,
        deadline: &'a Deadline,
    ) -> Self {
        Self {
            index,
            epsilon,
            min_overlap,
            deadline,
        }
    }

    /// Matching tolerance
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Check whether the pattern is invariant under `isometry`
    ///
    /// Returns `Ok(None)` when a primitive whose image lies inside the sampled
    /// extent has no partner, when a primitive whose preimage lies inside is left
    /// unpaired, or when too few primitives are paired.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` when the time budget runs out between comparisons.
    pub fn test(&self, isometry: &StripIsometry) -> Result<Option<MatchOutcome>> {
        let n = self.index.len();
        let extent = self.index.extent();
        let mut used = bitvec![0; n];
        let mut pairs = Vec::new();
        let mut residual = 0.0f64;
        let mut past_ends = Vec::new();

        for (source, shape) in self.index.shapes().iter().enumerate() {
            self.deadline.check("symmetry matching")?;

            let image = shape.transformed(isometry);
            if !extent.covers(&image, 0.0) {
                if extent.covers(&image, self.epsilon) {
                    past_ends.push((source, image));
                }
                continue;
            }
            let Some((partner, distance)) =
                self.index.nearest_unused(&image, &used, self.epsilon)
            else {
                return Ok(None);
            };
            used.set(partner, true);
            pairs.push((source, partner));
            residual = residual.max(distance);
        }

        // Partners for images just past the ends are optional
        for (source, image) in past_ends {
            if let Some((partner, distance)) =
                self.index.nearest_unused(&image, &used, self.epsilon)
            {
                used.set(partner, true);
                pairs.push((source, partner));
                residual = residual.max(distance);
            }
        }

        let inverse = isometry.inverse();
        for (shape, paired) in self.index.shapes().iter().zip(used.iter()) {
            if !*paired && extent.covers(&shape.transformed(&inverse), 0.0) {
                return Ok(None);
            }
        }

        let required = (self.min_overlap * n as f64).ceil().max(1.0) as usize;
        if pairs.len() < required {
            return Ok(None);
        }

        Ok(Some(MatchOutcome { pairs, residual }))
    }
}
