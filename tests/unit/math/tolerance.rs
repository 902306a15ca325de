//! Tests for tolerance resolution and float comparison helpers

#[cfg(test)]
mod tests {
    use frieze::io::configuration::{DEFAULT_TOLERANCE_FRACTION, SPACING_TOLERANCE_FRACTION};
    use frieze::math::tolerance::{Tolerance, sorted_unique, within, wrap};

    // Tests relative tolerance scales with the diagonal
    // Verified by returning the fraction unscaled
    #[test]
    fn test_resolve_relative() {
        let tolerance = Tolerance::Relative(0.01);
        assert!((tolerance.resolve(200.0, None) - 2.0).abs() < 1e-12);
        assert!((tolerance.resolve(200.0, Some(100.0)) - 2.0).abs() < 1e-12);
    }

    // Tests relative tolerance stops growing at a fraction of the closest spacing
    // Verified by ignoring the spacing
    #[test]
    fn test_resolve_relative_capped_by_spacing() {
        let tolerance = Tolerance::Relative(0.01);
        let capped = SPACING_TOLERANCE_FRACTION * 2.0;
        assert!((tolerance.resolve(120.0, Some(2.0)) - capped).abs() < 1e-12);
        assert!((tolerance.resolve(1200.0, Some(2.0)) - capped).abs() < 1e-12);
    }

    // Tests absolute tolerance ignores the diagonal and the spacing
    // Verified by scaling absolute values
    #[test]
    fn test_resolve_absolute() {
        let tolerance = Tolerance::Absolute(0.5);
        assert!((tolerance.resolve(1000.0, None) - 0.5).abs() < 1e-12);
        assert!((tolerance.resolve(1000.0, Some(0.1)) - 0.5).abs() < 1e-12);
        assert!((tolerance.value() - 0.5).abs() < 1e-12);
    }

    // Tests default tolerance uses the configured fraction
    // Verified by changing the default variant
    #[test]
    fn test_default_tolerance() {
        assert_eq!(
            Tolerance::default(),
            Tolerance::Relative(DEFAULT_TOLERANCE_FRACTION)
        );
    }

    // Tests inclusive comparison at the boundary
    // Verified by using strict inequality
    #[test]
    fn test_within_inclusive() {
        assert!(within(1.0, 1.5, 0.5));
        assert!(within(1.5, 1.0, 0.5));
        assert!(!within(1.0, 1.6, 0.5));
        assert!(within(3.0, 3.0, 0.0));
    }

    // Tests merging of close values keeps the first of each run
    // Verified by keeping the last value of each run
    #[test]
    fn test_sorted_unique_merges_runs() {
        let values = vec![10.05, 4.0, 9.98, 4.02, 20.0, f64::NAN];
        let unique = sorted_unique(values, 0.1);
        assert_eq!(unique, vec![4.0, 9.98, 20.0]);
    }

    // Tests empty input yields empty output
    // Verified by seeding the result with zero
    #[test]
    fn test_sorted_unique_empty() {
        assert!(sorted_unique(Vec::<f64>::new(), 0.1).is_empty());
    }

    // Tests reduction into the half-open period range
    // Verified by using truncation instead of floor
    #[test]
    fn test_wrap_into_range() {
        assert!((wrap(-2.5_f64, 10.0, 1e-9) - 7.5).abs() < 1e-12);
        assert!((wrap(25.0_f64, 10.0, 1e-9) - 5.0).abs() < 1e-12);
        assert!(wrap(-10.0_f64, 10.0, 1e-9).abs() < 1e-12);
    }

    // Tests values just below the modulus snap to zero
    // Verified by removing the snapping branch
    #[test]
    fn test_wrap_snaps_near_modulus() {
        assert!(wrap(9.99_f64, 10.0, 0.05).abs() < 1e-12);
        assert!(wrap(-0.01_f64, 10.0, 0.05).abs() < 1e-12);
    }
}
