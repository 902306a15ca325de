//! Immutable pattern produced by ingestion
//!
//! A [`PatternSet`] owns the accepted primitives in input order together with the
//! metadata every later stage needs: the bounding box and the inferred strip axis.

use ndarray::Array2;

use crate::math::principal::fit_principal_axis;
use crate::spatial::primitive::{Point, Primitive};
use crate::spatial::strip::StripFrame;

/// Axis-aligned bounding box in input coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Lower-left corner
    pub min: Point,
    /// Upper-right corner
    pub max: Point,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for no points
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |bbox, p| {
            Some(match bbox {
                None => Self { min: p, max: p },
                Some(b) => Self {
                    min: Point::new(b.min.x.min(p.x), b.min.y.min(p.y)),
                    max: Point::new(b.max.x.max(p.x), b.max.y.max(p.y)),
                },
            })
        })
    }

    /// Horizontal size
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical size
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Length of the diagonal
    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }

    /// Box grown to include another box
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

/// Input row that did not describe a primitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// One-based row number within the CSV records
    pub row: usize,
    /// Why the row was skipped
    pub reason: String,
}

/// Ordered primitives plus derived bounding box and strip axis
#[derive(Debug, Clone)]
pub struct PatternSet {
    primitives: Vec<Primitive>,
    bounds: BoundingBox,
    axis: StripFrame,
    rejections: Vec<RowRejection>,
}

impl PatternSet {
    /// Build a pattern, deriving the bounding box and the repeat axis
    ///
    /// Returns `None` when `primitives` is empty: a pattern always has at least
    /// one primitive.
    pub fn new(primitives: Vec<Primitive>, rejections: Vec<RowRejection>) -> Option<Self> {
        let bounds =
            BoundingBox::enclosing(primitives.iter().flat_map(|p| p.shape.endpoints()))?;

        let flat: Vec<f64> = primitives
            .iter()
            .flat_map(|p| {
                let reference = p.shape.reference();
                [reference.x, reference.y]
            })
            .collect();
        let positions = Array2::from_shape_vec((primitives.len(), 2), flat).ok()?;
        let fit = fit_principal_axis(&positions)?;

        let [cx, cy] = fit.centroid;
        let axis = StripFrame::new(Point::new(cx, cy), fit.direction);

        Some(Self {
            primitives,
            bounds,
            axis,
            rejections,
        })
    }

    /// Primitives in input order
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of primitives
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Bounding box of every endpoint
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Inferred repeat axis through the centroid
    pub const fn axis(&self) -> &StripFrame {
        &self.axis
    }

    /// Rows skipped during ingestion
    pub fn rejections(&self) -> &[RowRejection] {
        &self.rejections
    }
}
