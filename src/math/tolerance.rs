//! Distance tolerance used by every geometric comparison
//!
//! All equality tests in the engine are of the form `distance <= epsilon`. The
//! epsilon is resolved once per pattern from a [`Tolerance`] so digitization noise
//! can be absorbed while synthetic data can run with an exact (zero) tolerance.
//! A relative tolerance is capped by the closest spacing between primitives, so it
//! stops growing once the sample is longer than a few periods.

use num_traits::Float;

use crate::io::configuration::{DEFAULT_TOLERANCE_FRACTION, SPACING_TOLERANCE_FRACTION};

/// How the matching distance threshold is derived
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Fraction of the pattern's bounding-box diagonal, at most
    /// [`SPACING_TOLERANCE_FRACTION`] of the closest same-kind spacing
    Relative(f64),
    /// Fixed distance in input units
    Absolute(f64),
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::Relative(DEFAULT_TOLERANCE_FRACTION)
    }
}

impl Tolerance {
    /// Raw configured value (fraction or distance)
    pub const fn value(self) -> f64 {
        match self {
            Self::Relative(value) | Self::Absolute(value) => value,
        }
    }

    /// Resolve to a distance for a pattern
    ///
    /// `spacing` is the smallest distance between two primitives of the same kind,
    /// or `None` when no two exist.
    pub fn resolve(self, diagonal: f64, spacing: Option<f64>) -> f64 {
        match self {
            Self::Relative(fraction) => {
                let scaled = fraction * diagonal;
                spacing.map_or(scaled, |gap| scaled.min(SPACING_TOLERANCE_FRACTION * gap))
            }
            Self::Absolute(distance) => distance,
        }
    }
}

/// Test whether two values differ by at most `epsilon`
pub fn within<T: Float>(a: T, b: T, epsilon: T) -> bool {
    (a - b).abs() <= epsilon
}

/// Sort values and merge runs that lie within `epsilon` of the run's first value
///
/// Each merged run is represented by its first (smallest) member, so the result is
/// strictly increasing with gaps larger than `epsilon`. Non-finite values are dropped.
pub fn sorted_unique<T: Float>(mut values: Vec<T>, epsilon: T) -> Vec<T> {
    values.retain(|value| value.is_finite());
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut unique: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        match unique.last() {
            Some(&representative) if within(value, representative, epsilon) => {}
            _ => unique.push(value),
        }
    }
    unique
}

/// Reduce `value` into `[0, modulus)`, snapping results within `epsilon` of the
/// modulus back to zero
pub fn wrap<T: Float>(value: T, modulus: T, epsilon: T) -> T {
    if modulus <= T::zero() {
        return value;
    }
    let reduced = value - (value / modulus).floor() * modulus;
    if within(reduced, modulus, epsilon) {
        T::zero()
    } else {
        reduced
    }
}
