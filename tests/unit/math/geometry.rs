//! Tests for bearings and distances on grid coordinates

#[cfg(test)]
mod tests {
    use inertia::math::geometry::{angular_distance, bearing_degrees, euclidean_distance};
    use inertia::spatial::Position;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // Tests bearings on the four axes with rows growing downward
    // Verified by dropping the row negation
    #[test]
    fn test_bearing_axes() {
        let origin = Position::new(5, 5);

        assert!(approx(bearing_degrees(origin, Position::new(5, 9)), 0.0));
        assert!(approx(bearing_degrees(origin, Position::new(1, 5)), 90.0));
        assert!(approx(bearing_degrees(origin, Position::new(5, 0)), 180.0));
        assert!(approx(bearing_degrees(origin, Position::new(8, 5)), 270.0));
        assert!(approx(bearing_degrees(origin, Position::new(6, 6)), 315.0));
        assert!(approx(bearing_degrees(origin, origin), 0.0));
    }

    // Tests the circular distance between bearings
    // Verified by returning the raw difference
    #[test]
    fn test_angular_distance_wraps() {
        assert!(approx(angular_distance(350.0, 10.0), 20.0));
        assert!(approx(angular_distance(10.0, 350.0), 20.0));
        assert!(approx(angular_distance(0.0, 180.0), 180.0));
        assert!(approx(angular_distance(90.0, 90.0), 0.0));
        assert!(approx(angular_distance(315.0, 45.0), 90.0));
    }

    // Tests straight-line distance
    #[test]
    fn test_euclidean_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);

        assert!(approx(euclidean_distance(a, b), 5.0));
        assert!(approx(euclidean_distance(b, a), 5.0));
        assert!(approx(euclidean_distance(a, a), 0.0));
    }
}
