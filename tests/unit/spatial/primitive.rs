//! Tests for points, shapes and their matching distance

#[cfg(test)]
mod tests {
    use frieze::spatial::primitive::{Point, Primitive, Shape, ShapeKind};

    // Tests Euclidean distance and midpoint
    // Verified by using Manhattan distance
    #[test]
    fn test_point_distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        assert_eq!(a.midpoint(b), Point::new(1.5, 2.0));
        assert_eq!(b.to_string(), "(3, 4)");
    }

    // Tests segment distance ignores endpoint order
    // Verified by comparing only the straight pairing
    #[test]
    fn test_segment_distance_is_undirected() {
        let forward = Shape::Segment(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let backward = Shape::Segment(Point::new(1.0, 0.0), Point::new(0.0, 0.0));
        assert!(forward.distance(&backward).abs() < 1e-12);
    }

    // Tests segment distance is decided by the worse endpoint
    // Verified by averaging endpoint distances
    #[test]
    fn test_segment_distance_worst_endpoint() {
        let a = Shape::Segment(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        let b = Shape::Segment(Point::new(0.0, 0.1), Point::new(2.0, 0.5));
        assert!((a.distance(&b) - 0.5).abs() < 1e-12);
    }

    // Tests shapes of different kinds never match
    // Verified by comparing reference points across kinds
    #[test]
    fn test_mixed_kinds_never_match() {
        let point = Shape::Point(Point::new(1.0, 0.0));
        let segment = Shape::Segment(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        assert!(point.distance(&segment).is_infinite());
        assert_eq!(point.kind(), ShapeKind::Point);
        assert_eq!(segment.kind(), ShapeKind::Segment);
    }

    // Tests reference positions and endpoint iteration
    // Verified by returning the first endpoint as segment reference
    #[test]
    fn test_reference_and_endpoints() {
        let segment = Shape::Segment(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        assert_eq!(segment.reference(), Point::new(2.0, 1.0));
        assert_eq!(segment.endpoints().count(), 2);

        let point = Shape::Point(Point::new(-1.0, 5.0));
        assert_eq!(point.reference(), Point::new(-1.0, 5.0));
        assert_eq!(point.endpoints().collect::<Vec<_>>(), vec![Point::new(-1.0, 5.0)]);

        let primitive = Primitive::new(7, point);
        assert_eq!(primitive.index, 7);
    }
}
