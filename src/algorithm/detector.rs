//! Tolerance-based search for the symmetries of a pattern
//!
//! The detector first looks for the shortest translation. Candidates are the world
//! displacements between primitives of one kind, each tested in a strip frame
//! aligned with it; the principal axis only orders them, and the perpendicular
//! axis is tried when it yields none. In the frame of the accepted translation the
//! four point symmetries are tested independently against the central line and
//! candidate positions derived from the primitives themselves. Finally,
//! symmetries implied by composing two accepted ones are added so the candidate
//! set is closed.

use std::time::Duration;

use tracing::{debug, info};

use crate::algorithm::deadline::Deadline;
use crate::algorithm::matching::{Matcher, StripIndex};
use crate::algorithm::symmetry::{Symmetry, SymmetryCandidate, SymmetryKind};
use crate::io::configuration::{DEFAULT_MIN_OVERLAP, MAX_REPEAT_SLOPE};
use crate::io::error::{FriezeError, Result};
use crate::math::principal::canonical_direction;
use crate::math::tolerance::{Tolerance, sorted_unique, within, wrap};
use crate::spatial::pattern::PatternSet;
use crate::spatial::primitive::Point;
use crate::spatial::strip::{StripExtent, StripFrame, StripIsometry, StripPoint, StripShape};

/// Symmetry search settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Matching distance threshold
    pub tolerance: Tolerance,
    /// Share of primitives a transform must map inside the sampled extent
    pub min_overlap: f64,
    /// Wall-clock limit for the whole search
    pub time_budget: Option<Duration>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            min_overlap: DEFAULT_MIN_OVERLAP,
            time_budget: None,
        }
    }
}

/// Everything the detector found, in the frame it was found in
#[derive(Debug, Clone)]
pub struct Detection {
    /// Strip frame the candidates are expressed in
    pub frame: StripFrame,
    /// Resolved matching tolerance
    pub epsilon: f64,
    /// Smallest translation period
    pub period: f64,
    /// Span of the pattern in the frame
    pub extent: StripExtent,
    /// Accepted symmetries, sorted by kind, translation first
    pub candidates: Vec<SymmetryCandidate>,
}

impl Detection {
    /// First candidate of the given kind
    pub fn find(&self, kind: SymmetryKind) -> Option<&SymmetryCandidate> {
        self.candidates.iter().find(|c| c.kind() == kind)
    }
}

/// Detect the symmetries of a pattern
///
/// # Errors
///
/// See [`SymmetryDetector::detect`].
pub fn detect(pattern: &PatternSet, config: &DetectorConfig) -> Result<Detection> {
    SymmetryDetector::new(*config).detect(pattern)
}

/// Searches a pattern for frieze symmetries
#[derive(Debug, Clone, Default)]
pub struct SymmetryDetector {
    config: DetectorConfig,
}

impl SymmetryDetector {
    /// Create a detector
    pub const fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Run the search
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no translation maps the pattern onto itself along the principal or the
    ///   perpendicular axis (`NoPeriodicityFound`)
    /// - the time budget runs out (`Interrupted`)
    pub fn detect(&self, pattern: &PatternSet) -> Result<Detection> {
        let deadline = Deadline::start(self.config.time_budget);
        let fitted = index_in(pattern, pattern.axis())?;
        let epsilon = self
            .config
            .tolerance
            .resolve(pattern.bounds().diagonal(), fitted.min_spacing());
        let across = pattern.axis().perpendicular();
        let searches = [(*pattern.axis(), fitted), (across, index_in(pattern, &across)?)];

        for (axis, index) in &searches {
            let Some(repeat) = self.find_translation(pattern, index, epsilon, &deadline)? else {
                debug!(direction = ?axis.direction, "no period along axis");
                continue;
            };
            let matcher = Matcher::new(&repeat.index, epsilon, self.config.min_overlap, &deadline);
            return detect_in_frame(
                repeat.frame,
                &matcher,
                &repeat.index,
                repeat.period,
                repeat.residual,
            );
        }

        Err(FriezeError::NoPeriodicityFound {
            primitives: pattern.len(),
            axes_tried: searches.len(),
        })
    }

    // Candidates are the displacements from the anchor, the shape that ends first
    // along `index`, to each other shape of its kind lying roughly along the axis.
    // They are tried shortest first, each in a frame aligned with it.
    fn find_translation(
        &self,
        pattern: &PatternSet,
        index: &StripIndex,
        epsilon: f64,
        deadline: &Deadline,
    ) -> Result<Option<RepeatAxis>> {
        let shapes = index.shapes();
        let Some((anchor_index, anchor)) = shapes
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.u_range().1.total_cmp(&b.u_range().1))
        else {
            return Ok(None);
        };
        let Some(origin) = reference_of(pattern, anchor_index) else {
            return Ok(None);
        };
        let start = anchor.reference();

        let mut offsets: Vec<(f64, f64, usize)> = shapes
            .iter()
            .enumerate()
            .filter(|&(i, shape)| i != anchor_index && shape.kind() == anchor.kind())
            .map(|(i, shape)| {
                let reference = shape.reference();
                (reference.u - start.u, reference.v - start.v, i)
            })
            .filter(|&(du, dv, _)| du > epsilon && dv.abs() <= MAX_REPEAT_SLOPE * du)
            .collect();
        offsets.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.2.cmp(&b.2)));
        offsets.dedup_by(|next, kept| {
            within(next.0, kept.0, epsilon) && within(next.1, kept.1, epsilon)
        });

        let mut last_built = None;
        for (_, _, target) in offsets {
            deadline.check("translation search")?;
            let Some(end) = reference_of(pattern, target) else {
                continue;
            };
            let displacement = [end.x - origin.x, end.y - origin.y];
            if let Some(repeat) =
                self.test_repeat(pattern, origin, displacement, epsilon, deadline, &mut last_built)?
            {
                return Ok(Some(repeat));
            }
        }
        Ok(None)
    }

    // Test the translation by `displacement` in a frame aligned with it, then refit
    // the frame to the mean displacement of the matched pairs. `last_built` keeps
    // the most recent index so collinear candidates share it.
    fn test_repeat(
        &self,
        pattern: &PatternSet,
        origin: Point,
        displacement: [f64; 2],
        epsilon: f64,
        deadline: &Deadline,
        last_built: &mut Option<(StripFrame, StripIndex)>,
    ) -> Result<Option<RepeatAxis>> {
        let [dx, dy] = displacement;
        let period = dx.hypot(dy);
        let frame = StripFrame::new(origin, canonical_direction(displacement));
        let index = match last_built.take() {
            Some((built, index)) if built == frame => index,
            _ => index_in(pattern, &frame)?,
        };

        let matcher = Matcher::new(&index, epsilon, self.config.min_overlap, deadline);
        let Some(outcome) = matcher.test(&StripIsometry::Translate { shift: period })? else {
            *last_built = Some((frame, index));
            return Ok(None);
        };

        if let Some((aligned, length)) = align_to_pairs(pattern, origin, &outcome.pairs) {
            let aligned_index = index_in(pattern, &aligned)?;
            let aligned_matcher =
                Matcher::new(&aligned_index, epsilon, self.config.min_overlap, deadline);
            let translation = StripIsometry::Translate { shift: length };
            if let Some(refined) = aligned_matcher.test(&translation)? {
                debug!(direction = ?aligned.direction, period = length, "axis aligned to translation");
                return Ok(Some(RepeatAxis {
                    frame: aligned,
                    index: aligned_index,
                    period: length,
                    residual: refined.residual,
                }));
            }
        }

        Ok(Some(RepeatAxis {
            frame,
            index,
            period,
            residual: outcome.residual,
        }))
    }
}

// A period with the frame aligned to it
struct RepeatAxis {
    frame: StripFrame,
    index: StripIndex,
    period: f64,
    residual: f64,
}

fn index_in(pattern: &PatternSet, frame: &StripFrame) -> Result<StripIndex> {
    let shapes = pattern
        .primitives()
        .iter()
        .map(|p| frame.shape_to_strip(&p.shape))
        .collect();
    StripIndex::new(shapes).ok_or(FriezeError::EmptyInput)
}

fn reference_of(pattern: &PatternSet, index: usize) -> Option<Point> {
    pattern.primitives().get(index).map(|p| p.shape.reference())
}

// Frame along the mean world displacement of the translation pairs, and its length
fn align_to_pairs(
    pattern: &PatternSet,
    origin: Point,
    pairs: &[(usize, usize)],
) -> Option<(StripFrame, f64)> {
    let (sum_x, sum_y, count) = pairs
        .iter()
        .filter_map(|&(source, target)| {
            let from = reference_of(pattern, source)?;
            let to = reference_of(pattern, target)?;
            Some((to.x - from.x, to.y - from.y))
        })
        .fold((0.0, 0.0, 0usize), |(sx, sy, n), (dx, dy)| (sx + dx, sy + dy, n + 1));
    if count == 0 {
        return None;
    }

    let (mean_x, mean_y) = (sum_x / count as f64, sum_y / count as f64);
    let length = mean_x.hypot(mean_y);
    (length > 0.0 && length.is_finite())
        .then(|| (StripFrame::new(origin, canonical_direction([mean_x, mean_y])), length))
}

fn detect_in_frame(
    frame: StripFrame,
    matcher: &Matcher<'_>,
    index: &StripIndex,
    period: f64,
    translation_residual: f64,
) -> Result<Detection> {
    let epsilon = matcher.epsilon();
    let extent = *index.extent();
    let translation = SymmetryCandidate::tested(
        Symmetry::Translation { period },
        translation_residual,
        epsilon,
    );
    debug!(period, epsilon, "translation accepted");

    let mut candidates = vec![translation];

    if extent.width() <= epsilon {
        debug!(width = extent.width(), "degenerate strip, skipping point symmetries");
    } else {
        let midline = extent.midline();

        let horizontal = Symmetry::HorizontalReflection {
            axis_offset: midline,
        };
        if let Some(outcome) = matcher.test(&horizontal.isometry())? {
            candidates.push(SymmetryCandidate::tested(horizontal, outcome.residual, epsilon));
        }

        let vertical = vertical_mirror_offsets(index, period, epsilon)
            .into_iter()
            .map(|offset| Symmetry::VerticalReflection { offset });
        if let Some(candidate) = best_of(matcher, vertical)? {
            candidates.push(candidate);
        }

        let turns = half_turn_centers(index, period, midline, epsilon)
            .into_iter()
            .map(|u| Symmetry::HalfTurn {
                center: StripPoint::new(u, midline),
            });
        if let Some(candidate) = best_of(matcher, turns)? {
            candidates.push(candidate);
        }

        let glide = Symmetry::GlideReflection {
            axis_offset: midline,
            shift: 0.5 * period,
        };
        if let Some(outcome) = matcher.test(&glide.isometry())? {
            candidates.push(SymmetryCandidate::tested(glide, outcome.residual, epsilon));
        }
    }

    close_under_composition(&mut candidates, period, epsilon);
    candidates.sort_by_key(SymmetryCandidate::kind);

    for candidate in &candidates {
        debug!(%candidate, residual = candidate.residual, "symmetry accepted");
    }
    info!(period, accepted = candidates.len(), "symmetry detection complete");

    Ok(Detection {
        frame,
        epsilon,
        period,
        extent,
        candidates,
    })
}

fn central_anchor(index: &StripIndex) -> Option<&StripShape> {
    let center = index.extent().center_u();
    index.shapes().iter().min_by(|a, b| {
        (a.reference().u - center)
            .abs()
            .total_cmp(&(b.reference().u - center).abs())
    })
}

// Reference positions of shapes of the anchor's kind lying at `level` across the axis
fn same_level<'a>(
    index: &'a StripIndex,
    anchor: &'a StripShape,
    level: f64,
    epsilon: f64,
) -> impl Iterator<Item = StripPoint> + 'a {
    index
        .shapes()
        .iter()
        .filter(move |shape| shape.kind() == anchor.kind())
        .map(StripShape::reference)
        .filter(move |reference| within(reference.v, level, epsilon))
}

// Mirror lines recur every half period, so one lies within a quarter period of the
// central anchor; pairing it with shapes up to a period away covers every case.
fn vertical_mirror_offsets(index: &StripIndex, period: f64, epsilon: f64) -> Vec<f64> {
    let Some(anchor) = central_anchor(index) else {
        return Vec::new();
    };
    let origin = anchor.reference();
    let offsets = same_level(index, anchor, origin.v, epsilon)
        .filter(|reference| (reference.u - origin.u).abs() <= period + epsilon)
        .map(|reference| 0.5 * (origin.u + reference.u))
        .collect();
    sorted_unique(offsets, epsilon)
}

fn half_turn_centers(index: &StripIndex, period: f64, midline: f64, epsilon: f64) -> Vec<f64> {
    let Some(anchor) = central_anchor(index) else {
        return Vec::new();
    };
    let origin = anchor.reference();
    let mirrored_level = 2.0f64.mul_add(midline, -origin.v);
    let centers = same_level(index, anchor, mirrored_level, epsilon)
        .filter(|reference| (reference.u - origin.u).abs() <= period + epsilon)
        .map(|reference| 0.5 * (origin.u + reference.u))
        .collect();
    sorted_unique(centers, epsilon)
}

fn best_of(
    matcher: &Matcher<'_>,
    symmetries: impl Iterator<Item = Symmetry>,
) -> Result<Option<SymmetryCandidate>> {
    let mut best: Option<SymmetryCandidate> = None;
    for symmetry in symmetries {
        if let Some(outcome) = matcher.test(&symmetry.isometry())?
            && best.is_none_or(|b| outcome.residual < b.residual)
        {
            best = Some(SymmetryCandidate::tested(
                symmetry,
                outcome.residual,
                matcher.epsilon(),
            ));
        }
    }
    Ok(best)
}

/// Add the symmetries implied by composing pairs of accepted candidates
///
/// Composition rules, with `m` the central line, `c` mirror or center positions and
/// `s` the glide shift:
///
/// - reflection across `v = m` then across `u = c` is the half-turn about `(c, m)`
/// - the half-turn about `(c_r, m)` then reflection across `u = c_v` is the glide
///   by `2(c_v - c_r)`
/// - the glide by `s` then the half-turn about `(c, m)` is reflection across
///   `u = c - s/2`
/// - the glide by `s` then reflection across `u = c` is the half-turn about
///   `(c - s/2, m)`
/// - the half-turn about `(c, m)` then reflection across `v = m` is reflection
///   across `u = c`
///
/// A derived candidate's residual is the sum of its two factors' residuals.
pub fn close_under_composition(candidates: &mut Vec<SymmetryCandidate>, period: f64, epsilon: f64) {
    loop {
        let find = |kind: SymmetryKind| candidates.iter().find(|c| c.kind() == kind).copied();
        let horizontal = find(SymmetryKind::HorizontalReflection);
        let vertical = find(SymmetryKind::VerticalReflection);
        let turn = find(SymmetryKind::HalfTurn);
        let glide = find(SymmetryKind::GlideReflection);

        let derived = match (horizontal, vertical, turn, glide) {
            (Some(h), Some(v), None, _) => {
                let (Symmetry::HorizontalReflection { axis_offset }, Symmetry::VerticalReflection { offset }) =
                    (h.symmetry, v.symmetry)
                else {
                    break;
                };
                Some((
                    Symmetry::HalfTurn {
                        center: StripPoint::new(offset, axis_offset),
                    },
                    h.residual + v.residual,
                ))
            }
            (_, Some(v), Some(r), None) => {
                let (Symmetry::VerticalReflection { offset }, Symmetry::HalfTurn { center }) =
                    (v.symmetry, r.symmetry)
                else {
                    break;
                };
                Some((
                    Symmetry::GlideReflection {
                        axis_offset: center.v,
                        shift: wrap(2.0 * (offset - center.u), period, epsilon),
                    },
                    v.residual + r.residual,
                ))
            }
            (_, None, Some(r), Some(g)) => {
                let (Symmetry::HalfTurn { center }, Symmetry::GlideReflection { shift, .. }) =
                    (r.symmetry, g.symmetry)
                else {
                    break;
                };
                Some((
                    Symmetry::VerticalReflection {
                        offset: center.u - 0.5 * shift,
                    },
                    r.residual + g.residual,
                ))
            }
            (_, Some(v), None, Some(g)) => {
                let (Symmetry::VerticalReflection { offset }, Symmetry::GlideReflection { axis_offset, shift }) =
                    (v.symmetry, g.symmetry)
                else {
                    break;
                };
                Some((
                    Symmetry::HalfTurn {
                        center: StripPoint::new(offset - 0.5 * shift, axis_offset),
                    },
                    v.residual + g.residual,
                ))
            }
            (Some(h), None, Some(r), _) => {
                let Symmetry::HalfTurn { center } = r.symmetry else {
                    break;
                };
                Some((
                    Symmetry::VerticalReflection { offset: center.u },
                    h.residual + r.residual,
                ))
            }
            _ => None,
        };

        let Some((symmetry, residual)) = derived else {
            break;
        };
        debug!(kind = %symmetry.kind(), "symmetry implied by composition");
        candidates.push(SymmetryCandidate::derived(symmetry, residual, epsilon));
    }
}
