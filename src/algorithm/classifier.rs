//! Mapping from detected symmetries to one of the seven frieze groups

use std::fmt;

use tracing::{info, warn};

use crate::algorithm::detector::Detection;
use crate::algorithm::symmetry::{Provenance, Symmetry, SymmetryCandidate, SymmetryKind};
use crate::io::error::{FriezeError, Result};
use crate::math::tolerance::within;
use crate::spatial::strip::{StripExtent, StripFrame};

/// Which of the five transformation kinds were accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SymmetrySignature {
    /// Translation by the period
    pub translation: bool,
    /// Reflection across the central line
    pub horizontal: bool,
    /// Reflection across a perpendicular line
    pub vertical: bool,
    /// Half-turn about a point on the central line
    pub half_turn: bool,
    /// Glide reflection along the central line
    pub glide: bool,
}

impl SymmetrySignature {
    /// Build a signature from flags in `T, H, V, R, G` order
    pub const fn new(
        translation: bool,
        horizontal: bool,
        vertical: bool,
        half_turn: bool,
        glide: bool,
    ) -> Self {
        Self {
            translation,
            horizontal,
            vertical,
            half_turn,
            glide,
        }
    }

    /// Signature of a set of accepted candidates
    pub fn from_candidates<'a>(candidates: impl IntoIterator<Item = &'a SymmetryCandidate>) -> Self {
        candidates
            .into_iter()
            .fold(Self::default(), |mut signature, candidate| {
                match candidate.kind() {
                    SymmetryKind::Translation => signature.translation = true,
                    SymmetryKind::HorizontalReflection => signature.horizontal = true,
                    SymmetryKind::VerticalReflection => signature.vertical = true,
                    SymmetryKind::HalfTurn => signature.half_turn = true,
                    SymmetryKind::GlideReflection => signature.glide = true,
                }
                signature
            })
    }

    /// Whether the given kind is present
    pub const fn contains(&self, kind: SymmetryKind) -> bool {
        match kind {
            SymmetryKind::Translation => self.translation,
            SymmetryKind::HorizontalReflection => self.horizontal,
            SymmetryKind::VerticalReflection => self.vertical,
            SymmetryKind::HalfTurn => self.half_turn,
            SymmetryKind::GlideReflection => self.glide,
        }
    }
}

impl fmt::Display for SymmetrySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for kind in SymmetryKind::ALL {
            if self.contains(kind) {
                write!(f, "{}", kind.letter())?;
            }
        }
        f.write_str("}")
    }
}

/// The seven frieze groups in IUC notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FriezeGroup {
    /// Translations only
    P1,
    /// Glide reflection
    P11g,
    /// Vertical reflections
    P1m1,
    /// Horizontal reflection
    P11m,
    /// Half-turns
    P2,
    /// Vertical reflections, half-turns and a glide
    P2mg,
    /// Every frieze symmetry
    P2mm,
}

// Exact signature of each group; anything else is ambiguous
const GROUP_TABLE: [(FriezeGroup, SymmetrySignature); 7] = [
    (FriezeGroup::P1, SymmetrySignature::new(true, false, false, false, false)),
    (FriezeGroup::P11g, SymmetrySignature::new(true, false, false, false, true)),
    (FriezeGroup::P1m1, SymmetrySignature::new(true, false, true, false, false)),
    (FriezeGroup::P11m, SymmetrySignature::new(true, true, false, false, false)),
    (FriezeGroup::P2, SymmetrySignature::new(true, false, false, true, false)),
    (FriezeGroup::P2mg, SymmetrySignature::new(true, false, true, true, true)),
    (FriezeGroup::P2mm, SymmetrySignature::new(true, true, true, true, true)),
];

impl FriezeGroup {
    /// All groups in table order
    pub const ALL: [Self; 7] = [
        Self::P1,
        Self::P11g,
        Self::P1m1,
        Self::P11m,
        Self::P2,
        Self::P2mg,
        Self::P2mm,
    ];

    /// IUC name such as `p2mg`
    pub const fn name(self) -> &'static str {
        match self {
            Self::P1 => "p1",
            Self::P11g => "p11g",
            Self::P1m1 => "p1m1",
            Self::P11m => "p11m",
            Self::P2 => "p2",
            Self::P2mg => "p2mg",
            Self::P2mm => "p2mm",
        }
    }

    /// Conway's descriptive nickname
    pub const fn conway_name(self) -> &'static str {
        match self {
            Self::P1 => "hop",
            Self::P11g => "step",
            Self::P1m1 => "sidle",
            Self::P11m => "jump",
            Self::P2 => "spinning hop",
            Self::P2mg => "spinning sidle",
            Self::P2mm => "spinning jump",
        }
    }

    /// Symmetries the group requires
    pub fn signature(self) -> SymmetrySignature {
        GROUP_TABLE
            .iter()
            .find(|(group, _)| *group == self)
            .map(|&(_, signature)| signature)
            .unwrap_or_default()
    }

    /// Group with exactly this signature
    pub fn from_signature(signature: SymmetrySignature) -> Option<Self> {
        GROUP_TABLE
            .iter()
            .find(|(_, candidate)| *candidate == signature)
            .map(|&(group, _)| group)
    }
}

impl fmt::Display for FriezeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified pattern together with the evidence for its group
#[derive(Debug, Clone)]
pub struct FriezeClassification {
    group: FriezeGroup,
    period: f64,
    frame: StripFrame,
    extent: StripExtent,
    epsilon: f64,
    candidates: Vec<SymmetryCandidate>,
}

impl FriezeClassification {
    /// The frieze group
    pub const fn group(&self) -> FriezeGroup {
        self.group
    }

    /// Smallest translation period
    pub const fn period(&self) -> f64 {
        self.period
    }

    /// Strip frame of the candidates
    pub const fn frame(&self) -> &StripFrame {
        &self.frame
    }

    /// Span of the pattern in the frame
    pub const fn extent(&self) -> &StripExtent {
        &self.extent
    }

    /// Resolved matching tolerance
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Accepted symmetries, translation first
    pub fn candidates(&self) -> &[SymmetryCandidate] {
        &self.candidates
    }

    /// First candidate of the given kind
    pub fn find(&self, kind: SymmetryKind) -> Option<&SymmetryCandidate> {
        self.candidates.iter().find(|c| c.kind() == kind)
    }

    /// Signature of the accepted candidates
    pub fn signature(&self) -> SymmetrySignature {
        SymmetrySignature::from_candidates(&self.candidates)
    }
}

/// Assign a frieze group to a detection
///
/// # Errors
///
/// Returns `AmbiguousSymmetry` when:
/// - the accepted kinds match none of the seven group signatures
/// - a horizontal reflection coexists with a directly tested glide by half a
///   period, which would make half the period a translation
pub fn classify(detection: Detection) -> Result<FriezeClassification> {
    let signature = SymmetrySignature::from_candidates(&detection.candidates);

    let half_period_glide = detection.candidates.iter().any(|candidate| {
        candidate.provenance == Provenance::Tested
            && matches!(
                candidate.symmetry,
                Symmetry::GlideReflection { shift, .. }
                    if within(shift, 0.5 * detection.period, detection.epsilon)
            )
    });
    if signature.horizontal && half_period_glide {
        warn!(%signature, "horizontal reflection contradicts half-period glide");
        return Err(FriezeError::AmbiguousSymmetry {
            signature,
            reason: "a horizontal reflection together with a half-period glide implies a half-period translation".to_owned(),
        });
    }

    let Some(group) = FriezeGroup::from_signature(signature) else {
        warn!(%signature, "symmetry signature matches no frieze group");
        return Err(FriezeError::AmbiguousSymmetry {
            signature,
            reason: "no frieze group has exactly this set of symmetries".to_owned(),
        });
    };

    info!(
        group = group.name(),
        nickname = group.conway_name(),
        period = detection.period,
        "classified pattern"
    );

    Ok(FriezeClassification {
        group,
        period: detection.period,
        frame: detection.frame,
        extent: detection.extent,
        epsilon: detection.epsilon,
        candidates: detection.candidates,
    })
}
