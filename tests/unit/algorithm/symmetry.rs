//! Tests for symmetry kinds, isometries and candidate reporting

#[cfg(test)]
mod tests {
    use frieze::algorithm::symmetry::{Provenance, Symmetry, SymmetryCandidate, SymmetryKind};
    use frieze::spatial::strip::{StripIsometry, StripPoint};

    // Tests kinds sort in signature order
    // Verified by reordering the enum variants
    #[test]
    fn test_kind_order() {
        let mut kinds = vec![
            SymmetryKind::GlideReflection,
            SymmetryKind::Translation,
            SymmetryKind::HalfTurn,
            SymmetryKind::VerticalReflection,
            SymmetryKind::HorizontalReflection,
        ];
        kinds.sort();
        assert_eq!(kinds, SymmetryKind::ALL.to_vec());
        assert_eq!(SymmetryKind::HalfTurn.to_string(), "half-turn rotation");
        let letters: String = SymmetryKind::ALL.into_iter().map(SymmetryKind::letter).collect();
        assert_eq!(letters, "THVRG");
    }

    // Tests each symmetry realises the matching strip isometry
    // Verified by swapping the two reflections
    #[test]
    fn test_isometry_mapping() {
        let center = StripPoint::new(2.0, 0.5);
        let cases = [
            (
                Symmetry::Translation { period: 10.0 },
                StripIsometry::Translate { shift: 10.0 },
            ),
            (
                Symmetry::HorizontalReflection { axis_offset: 0.5 },
                StripIsometry::ReflectAcrossAxis { offset: 0.5 },
            ),
            (
                Symmetry::VerticalReflection { offset: 3.0 },
                StripIsometry::ReflectAcrossNormal { offset: 3.0 },
            ),
            (Symmetry::HalfTurn { center }, StripIsometry::HalfTurn { center }),
            (
                Symmetry::GlideReflection {
                    axis_offset: 0.5,
                    shift: 5.0,
                },
                StripIsometry::Glide {
                    offset: 0.5,
                    shift: 5.0,
                },
            ),
        ];
        for ((symmetry, isometry), kind) in cases.iter().zip(SymmetryKind::ALL) {
            assert_eq!(symmetry.isometry(), *isometry);
            assert_eq!(symmetry.kind(), kind);
        }
    }

    // Tests confidence falls linearly from one to zero at the tolerance
    // Verified by dropping the clamp
    #[test]
    fn test_confidence() {
        let symmetry = Symmetry::Translation { period: 10.0 };
        assert!((SymmetryCandidate::tested(symmetry, 0.0, 0.1).confidence() - 1.0).abs() < 1e-12);
        assert!((SymmetryCandidate::tested(symmetry, 0.05, 0.1).confidence() - 0.5).abs() < 1e-12);
        assert!(SymmetryCandidate::derived(symmetry, 0.3, 0.1).confidence().abs() < 1e-12);

        // exact matching
        assert!((SymmetryCandidate::tested(symmetry, 0.0, 0.0).confidence() - 1.0).abs() < 1e-12);
    }

    // Tests provenance and the human readable form
    // Verified by omitting the derived marker
    #[test]
    fn test_candidate_display() {
        let tested = SymmetryCandidate::tested(Symmetry::VerticalReflection { offset: 2.5 }, 0.0, 0.1);
        assert_eq!(tested.provenance, Provenance::Tested);
        assert_eq!(tested.kind(), SymmetryKind::VerticalReflection);
        assert_eq!(tested.to_string(), "vertical reflection at u=2.500");

        let derived = SymmetryCandidate::derived(
            Symmetry::GlideReflection {
                axis_offset: 0.0,
                shift: 5.0,
            },
            0.02,
            0.1,
        );
        assert_eq!(derived.provenance, Provenance::Derived);
        assert_eq!(derived.to_string(), "glide at v=0.000 by 5.000 (derived)");
    }
}
