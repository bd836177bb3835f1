//! Tests for dense position sets

#[cfg(test)]
mod tests {
    use inertia::algorithm::bitset::PositionSet;
    use inertia::spatial::{Grid, Position};

    // Tests insert reports whether membership changed
    // Verified by returning the previous bit from insert
    #[test]
    fn test_insert_reports_changes() {
        let mut set = PositionSet::new(3, 3);
        assert!(set.is_empty());

        assert!(set.insert(Position::new(1, 2)));
        assert!(!set.insert(Position::new(1, 2)));
        assert!(set.contains(Position::new(1, 2)));
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }

    // Tests that positions outside the grid are never members
    // Verified by indexing with the linear index alone
    #[test]
    fn test_out_of_range_positions_ignored() {
        let mut set = PositionSet::new(2, 3);

        // (0, 4) would alias (1, 1) without the column check
        assert!(!set.insert(Position::new(0, 4)));
        assert!(!set.contains(Position::new(1, 1)));
        assert!(!set.contains(Position::new(7, 0)));
        assert!(set.is_empty());
    }

    // Tests ascending iteration and the smallest member
    // Verified by iterating the bits in reverse
    #[test]
    fn test_iteration_is_row_major() {
        let grid = Grid::new(3, 4).expect("valid dimensions");
        let mut set = PositionSet::for_grid(&grid);
        set.extend([Position::new(2, 0), Position::new(0, 3), Position::new(1, 1)]);

        assert_eq!(
            set.to_vec(),
            vec![Position::new(0, 3), Position::new(1, 1), Position::new(2, 0)]
        );
        assert_eq!(set.first(), Some(Position::new(0, 3)));
        assert_eq!(PositionSet::for_grid(&grid).first(), None);
    }

    // Tests subset checks
    // Verified by comparing lengths in is_subset
    #[test]
    fn test_is_subset() {
        let mut a = PositionSet::new(3, 3);
        let mut b = PositionSet::new(3, 3);
        a.extend([Position::new(0, 0), Position::new(1, 1)]);
        b.extend([Position::new(1, 1), Position::new(2, 2), Position::new(0, 1)]);

        assert!(!a.is_subset(&b));
        assert!(!b.is_subset(&a));

        b.insert(Position::new(0, 0));
        assert!(a.is_subset(&b));
        assert!(PositionSet::new(3, 3).is_subset(&a));
    }

    // Tests the debug rendering
    #[test]
    fn test_display() {
        let mut set = PositionSet::new(2, 2);
        set.insert(Position::new(1, 0));
        set.insert(Position::new(0, 1));

        assert_eq!(set.to_string(), "PositionSet(2 positions: [(0, 1), (1, 0)])");
    }
}
