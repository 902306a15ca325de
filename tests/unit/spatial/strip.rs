//! Tests for strip coordinates, extents and the frieze isometries

#[cfg(test)]
mod tests {
    use frieze::spatial::primitive::{Point, Shape};
    use frieze::spatial::strip::{StripExtent, StripFrame, StripIsometry, StripPoint, StripShape};

    fn close(a: StripPoint, b: StripPoint) -> bool {
        (a.u - b.u).abs() < 1e-9 && (a.v - b.v).abs() < 1e-9
    }

    // Tests world and strip conversions are inverse
    // Verified by using the wrong sign on the normal
    #[test]
    fn test_frame_round_trip() {
        let frame = StripFrame::new(Point::new(2.0, -1.0), [3.0, 4.0]);
        let world = Point::new(7.5, 3.25);
        let back = frame.to_world(frame.to_strip(world));
        assert!(world.distance(back) < 1e-9);
    }

    // Tests the normal is a quarter turn counter-clockwise
    // Verified by returning the clockwise normal
    #[test]
    fn test_frame_normal() {
        let frame = StripFrame::new(Point::default(), [1.0, 0.0]);
        assert_eq!(frame.normal(), [-0.0, 1.0]);
        let strip = frame.to_strip(Point::new(3.0, 2.0));
        assert!(close(strip, StripPoint::new(3.0, 2.0)));
    }

    // Tests a zero direction becomes the x-axis
    // Verified by dividing by zero length
    #[test]
    fn test_frame_zero_direction() {
        let frame = StripFrame::new(Point::default(), [0.0, 0.0]);
        assert_eq!(frame.direction, [1.0, 0.0]);
    }

    // Tests the perpendicular frame is canonical
    // Verified by returning the raw normal
    #[test]
    fn test_perpendicular_frame() {
        let frame = StripFrame::new(Point::default(), [1.0, 0.0]);
        let perpendicular = frame.perpendicular();
        assert!((perpendicular.direction[0]).abs() < 1e-12);
        assert!((perpendicular.direction[1] - 1.0).abs() < 1e-12);
    }

    // Tests each isometry formula
    // Verified by swapping the reflection formulas
    #[test]
    fn test_isometry_formulas() {
        let p = StripPoint::new(3.0, 1.0);
        let cases = [
            (StripIsometry::Translate { shift: 10.0 }, StripPoint::new(13.0, 1.0)),
            (StripIsometry::ReflectAcrossAxis { offset: 0.5 }, StripPoint::new(3.0, 0.0)),
            (StripIsometry::ReflectAcrossNormal { offset: 5.0 }, StripPoint::new(7.0, 1.0)),
            (
                StripIsometry::HalfTurn {
                    center: StripPoint::new(5.0, 0.0),
                },
                StripPoint::new(7.0, -1.0),
            ),
            (
                StripIsometry::Glide {
                    offset: 0.0,
                    shift: 5.0,
                },
                StripPoint::new(8.0, -1.0),
            ),
        ];
        for (isometry, expected) in cases {
            assert!(close(isometry.apply(p), expected), "{isometry:?}");
        }
    }

    // Tests inverses undo every isometry
    // Verified by leaving glide shifts unnegated
    #[test]
    fn test_isometry_inverse() {
        let p = StripPoint::new(-2.0, 4.5);
        let isometries = [
            StripIsometry::Translate { shift: 3.0 },
            StripIsometry::ReflectAcrossAxis { offset: 1.0 },
            StripIsometry::ReflectAcrossNormal { offset: -1.0 },
            StripIsometry::HalfTurn {
                center: StripPoint::new(1.0, 1.0),
            },
            StripIsometry::Glide {
                offset: 2.0,
                shift: 7.0,
            },
        ];
        for isometry in isometries {
            assert!(close(isometry.inverse().apply(isometry.apply(p)), p), "{isometry:?}");
        }
    }

    // Tests shapes convert and transform endpoint by endpoint
    // Verified by transforming only the first endpoint
    #[test]
    fn test_shape_transform() {
        let frame = StripFrame::new(Point::default(), [1.0, 0.0]);
        let shape = frame.shape_to_strip(&Shape::Segment(Point::new(0.0, 0.0), Point::new(2.0, 1.0)));
        let moved = shape.transformed(&StripIsometry::Translate { shift: 1.0 });
        assert_eq!(moved.u_range(), (1.0, 3.0));
        assert_eq!(moved.v_range(), (0.0, 1.0));
        assert!(close(moved.reference(), StripPoint::new(2.0, 0.5)));
    }

    // Tests extent bounds, midline and coverage
    // Verified by checking coverage with the reference point only
    #[test]
    fn test_extent() {
        let shapes = [
            StripShape::Point(StripPoint::new(0.0, -1.0)),
            StripShape::Segment(StripPoint::new(4.0, 0.0), StripPoint::new(10.0, 3.0)),
        ];
        let extent = StripExtent::of(&shapes).expect("Failed to build extent");
        assert!((extent.length() - 10.0).abs() < 1e-12);
        assert!((extent.width() - 4.0).abs() < 1e-12);
        assert!((extent.midline() - 1.0).abs() < 1e-12);
        assert!((extent.center_u() - 5.0).abs() < 1e-12);

        let straddling = StripShape::Segment(StripPoint::new(8.0, 0.0), StripPoint::new(11.0, 0.0));
        assert!(!extent.covers(&straddling, 0.5));
        assert!(extent.covers(&straddling, 1.0));
        assert!(StripExtent::of(&[]).is_none());
    }
}
