//! Detected symmetry transformations and their parameters

use std::fmt;

use crate::spatial::strip::{StripIsometry, StripPoint};

/// The five transformation kinds a frieze can admit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymmetryKind {
    /// Shift along the strip by the period
    Translation,
    /// Mirror across the strip's central line
    HorizontalReflection,
    /// Mirror across a line perpendicular to the strip
    VerticalReflection,
    /// Rotation by 180 degrees about a point on the central line
    HalfTurn,
    /// Mirror across the central line combined with a shift
    GlideReflection,
}

impl SymmetryKind {
    /// All kinds in signature order
    pub const ALL: [Self; 5] = [
        Self::Translation,
        Self::HorizontalReflection,
        Self::VerticalReflection,
        Self::HalfTurn,
        Self::GlideReflection,
    ];

    /// Human readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::HorizontalReflection => "horizontal reflection",
            Self::VerticalReflection => "vertical reflection",
            Self::HalfTurn => "half-turn rotation",
            Self::GlideReflection => "glide reflection",
        }
    }

    /// One-letter code used in signatures
    pub const fn letter(self) -> char {
        match self {
            Self::Translation => 'T',
            Self::HorizontalReflection => 'H',
            Self::VerticalReflection => 'V',
            Self::HalfTurn => 'R',
            Self::GlideReflection => 'G',
        }
    }
}

impl fmt::Display for SymmetryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A symmetry together with the parameter that pins it down, in strip coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symmetry {
    /// Translation by one period
    Translation {
        /// Smallest repeat distance
        period: f64,
    },
    /// Reflection across `v = axis_offset`
    HorizontalReflection {
        /// `v` of the central line
        axis_offset: f64,
    },
    /// Reflection across `u = offset`, repeated every half period
    VerticalReflection {
        /// `u` of one mirror line
        offset: f64,
    },
    /// Half-turn about `center`, repeated every half period along the central line
    HalfTurn {
        /// One rotation center
        center: StripPoint,
    },
    /// Glide along `v = axis_offset` by `shift`
    GlideReflection {
        /// `v` of the glide line
        axis_offset: f64,
        /// Shift along the strip, reduced into `[0, period)`
        shift: f64,
    },
}

impl Symmetry {
    /// Kind of the symmetry
    pub const fn kind(&self) -> SymmetryKind {
        match self {
            Self::Translation { .. } => SymmetryKind::Translation,
            Self::HorizontalReflection { .. } => SymmetryKind::HorizontalReflection,
            Self::VerticalReflection { .. } => SymmetryKind::VerticalReflection,
            Self::HalfTurn { .. } => SymmetryKind::HalfTurn,
            Self::GlideReflection { .. } => SymmetryKind::GlideReflection,
        }
    }

    /// Isometry realising the symmetry
    pub const fn isometry(&self) -> StripIsometry {
        match *self {
            Self::Translation { period } => StripIsometry::Translate { shift: period },
            Self::HorizontalReflection { axis_offset } => {
                StripIsometry::ReflectAcrossAxis {
                    offset: axis_offset,
                }
            }
            Self::VerticalReflection { offset } => StripIsometry::ReflectAcrossNormal { offset },
            Self::HalfTurn { center } => StripIsometry::HalfTurn { center },
            Self::GlideReflection { axis_offset, shift } => StripIsometry::Glide {
                offset: axis_offset,
                shift,
            },
        }
    }
}

/// How a candidate came to be accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The pattern was tested against the transform directly
    Tested,
    /// The transform is the composition of two accepted candidates
    Derived,
}

/// One accepted symmetry with its matching quality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryCandidate {
    /// The transformation
    pub symmetry: Symmetry,
    /// Largest distance between a transformed primitive and its match
    pub residual: f64,
    /// Tolerance the candidate was accepted under
    pub epsilon: f64,
    /// Tested directly or derived by composition
    pub provenance: Provenance,
}

impl SymmetryCandidate {
    /// Candidate found by direct testing
    pub const fn tested(symmetry: Symmetry, residual: f64, epsilon: f64) -> Self {
        Self {
            symmetry,
            residual,
            epsilon,
            provenance: Provenance::Tested,
        }
    }

    /// Candidate implied by composing two others
    pub const fn derived(symmetry: Symmetry, residual: f64, epsilon: f64) -> Self {
        Self {
            symmetry,
            residual,
            epsilon,
            provenance: Provenance::Derived,
        }
    }

    /// Kind of the underlying symmetry
    pub const fn kind(&self) -> SymmetryKind {
        self.symmetry.kind()
    }

    /// Confidence in `[0, 1]`: one for an exact match, zero at the tolerance limit
    pub fn confidence(&self) -> f64 {
        if self.epsilon <= 0.0 {
            return if self.residual <= 0.0 { 1.0 } else { 0.0 };
        }
        (1.0 - self.residual / self.epsilon).clamp(0.0, 1.0)
    }
}

impl fmt::Display for SymmetryCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symmetry {
            Symmetry::Translation { period } => write!(f, "translation by {period:.3}")?,
            Symmetry::HorizontalReflection { axis_offset } => {
                write!(f, "horizontal reflection at v={axis_offset:.3}")?;
            }
            Symmetry::VerticalReflection { offset } => {
                write!(f, "vertical reflection at u={offset:.3}")?;
            }
            Symmetry::HalfTurn { center } => {
                write!(f, "half-turn about ({:.3}, {:.3})", center.u, center.v)?;
            }
            Symmetry::GlideReflection { axis_offset, shift } => {
                write!(f, "glide at v={axis_offset:.3} by {shift:.3}")?;
            }
        }
        if self.provenance == Provenance::Derived {
            f.write_str(" (derived)")?;
        }
        Ok(())
    }
}
