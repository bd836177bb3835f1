//! Tests for the live game context

#[cfg(test)]
mod tests {
    use inertia::game::level::Level;
    use inertia::game::movement::move_ball;
    use inertia::game::state::{GameState, SavedGame};
    use inertia::spatial::{CellType, Direction, Grid, Position};
    use std::collections::BTreeSet;

    fn grid(text: &str) -> Grid {
        text.parse().expect("valid grid text")
    }

    fn trap_level() -> Level {
        Level::new(
            grid("x####\n..o*.\n.###.\n.###.\n*###."),
            Position::new(1, 2),
            BTreeSet::from([Position::new(4, 0)]),
            vec![Position::new(4, 0)],
        )
        .expect("valid level")
    }

    // Tests fresh state derived from the level
    // Verified by including stuck-area gems in the hint candidates
    #[test]
    fn test_new_state() {
        let state = GameState::new(trap_level());

        assert_eq!(state.ball(), Position::new(1, 2));
        assert_eq!(state.gems(), &[Position::new(1, 3), Position::new(4, 0)]);
        assert_eq!(state.remaining_gems(), 2);
        assert!(!state.is_completed());
        assert_eq!(state.hint_candidates(), &BTreeSet::from([Position::new(1, 3)]));
        assert!(!state.can_enter_stuck_area());
        assert_eq!(state.stuck_area(), &BTreeSet::from([Position::new(4, 0)]));
    }

    // Tests the stuck area opening once only its gems remain
    // Verified by checking hint candidates instead of remaining gems
    #[test]
    fn test_can_enter_stuck_area_after_outside_gems() {
        let mut state = GameState::new(trap_level());
        assert_eq!(state.hint_target(), Some(Position::new(1, 3)));

        move_ball(&mut state, Direction::Right).expect("move");
        assert!(state.can_enter_stuck_area());
        assert!(state.hint_candidates().is_empty());
        assert_eq!(state.hint_target(), Some(Position::new(4, 0)));

        let request = state.hint_request(Position::new(4, 0));
        assert!(request.can_enter_stuck_area);
        assert_eq!(request.ball, Position::new(1, 4));
    }

    // Tests nearest-gem targeting with ties broken by position
    // Verified by picking the farthest gem
    #[test]
    fn test_hint_target_nearest_with_ties() {
        let level = Level::new(
            grid("*...*\n.....\n..o..\n.....\n....*"),
            Position::new(2, 2),
            BTreeSet::new(),
            vec![],
        )
        .expect("valid level");
        let state = GameState::new(level);

        // All three gems are equally far, the smallest position wins
        assert_eq!(state.hint_target(), Some(Position::new(0, 0)));

        let closer = Level::new(
            grid("*....\n.....\n..o..\n...*.\n....."),
            Position::new(2, 2),
            BTreeSet::new(),
            vec![],
        )
        .expect("valid level");
        assert_eq!(GameState::new(closer).hint_target(), Some(Position::new(3, 3)));
    }

    // Tests settling on a collected gem
    #[test]
    fn test_announce_ball_position_clears_waiting() {
        let level = Level::new(grid("o.*"), Position::new(0, 0), BTreeSet::new(), vec![])
            .expect("valid level");
        let mut state = GameState::new(level);

        assert!(!state.announce_ball_position().expect("announce"));
        move_ball(&mut state, Direction::Right).expect("move");
        assert_eq!(state.grid().get(Position::new(0, 2)), Some(CellType::Waiting));
        assert!(state.announce_ball_position().expect("announce"));
        assert_eq!(state.grid().get(Position::new(0, 2)), Some(CellType::Clear));
        assert!(!state.announce_ball_position().expect("announce"));
    }

    // Tests detection of a ball surrounded by mines
    #[test]
    fn test_explodes_with_any_move() {
        let ball = Position::new(1, 1);
        let surrounded = Level::new(grid("xxx\nxox\nxxx"), ball, BTreeSet::new(), vec![])
            .expect("valid level");
        assert!(GameState::new(surrounded).explodes_with_any_move());

        let gap = Level::new(grid("xxx\nxo.\nxxx"), ball, BTreeSet::new(), vec![])
            .expect("valid level");
        assert!(!GameState::new(gap).explodes_with_any_move());
    }

    // Tests save, resume and restart
    // Verified by resuming from the level grid instead of the saved cells
    #[test]
    fn test_save_resume_restart() {
        let mut state = GameState::new(trap_level());
        move_ball(&mut state, Direction::Right).expect("move");
        let saved = state.save();

        let mut resumed = GameState::from_saved(saved.clone()).expect("resume");
        assert_eq!(resumed.ball(), Position::new(1, 4));
        assert_eq!(resumed.remaining_gems(), 1);
        assert_eq!(resumed.grid(), &saved.cells);

        resumed.restart();
        assert_eq!(resumed.ball(), Position::new(1, 2));
        assert_eq!(resumed.remaining_gems(), 2);
        assert_eq!(resumed.grid(), resumed.initial_grid());
    }

    // Tests rejection of inconsistent snapshots
    #[test]
    fn test_from_saved_rejects_mismatch() {
        let level = trap_level();
        let wrong_size = SavedGame {
            level: level.clone(),
            ball: Position::new(0, 0),
            cells: grid("..\n.."),
        };
        assert!(GameState::from_saved(wrong_size).is_err());

        let outside_ball = SavedGame {
            level: level.clone(),
            ball: Position::new(9, 9),
            cells: level.grid().clone(),
        };
        assert!(GameState::from_saved(outside_ball).is_err());
    }
}
