//! Tests for level and saved-game persistence

#[cfg(test)]
mod tests {
    use inertia::GameError;
    use inertia::algorithm::generator::RandomSelector;
    use inertia::game::level::Level;
    use inertia::game::movement::move_ball;
    use inertia::game::state::GameState;
    use inertia::io::level_file::{
        LevelWriter, decode_level, decode_saved_game, encode_level, encode_saved_game,
        load_random_level, load_saved_game, read_levels, save_game, split_records,
    };
    use inertia::spatial::{Direction, Grid, Position};
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    const TRAP_RECORD: &str = "5 5 1 2 1 4 0 1 4 0 \
        5 2 2 2 2 0 0 3 4 0 0 2 2 2 0 0 2 2 2 0 4 2 2 2 0 # ";

    fn trap_level() -> Level {
        let grid: Grid = "x####\n..o*.\n.###.\n.###.\n*###."
            .parse()
            .expect("valid grid text");
        Level::new(
            grid,
            Position::new(1, 2),
            BTreeSet::from([Position::new(4, 0)]),
            vec![Position::new(4, 0)],
        )
        .expect("valid level")
    }

    fn tiny_level() -> Level {
        let grid: Grid = "o*".parse().expect("valid grid text");
        Level::new(grid, Position::new(0, 0), BTreeSet::new(), vec![]).expect("valid level")
    }

    // Tests the exact token layout of a record
    // Verified by writing cells column-major
    #[test]
    fn test_encode_level_layout() {
        assert_eq!(encode_level(&tiny_level()), "1 2 0 0 0 0 3 4 # ");
        assert_eq!(encode_level(&trap_level()), TRAP_RECORD);
    }

    // Tests decoding the written layout
    #[test]
    fn test_decode_level() {
        let record = TRAP_RECORD.trim_end().trim_end_matches('#');
        assert_eq!(decode_level(record).expect("valid record"), trap_level());

        let spread = "1\n2   0 0\t0 0 3 4";
        assert_eq!(decode_level(spread).expect("valid record"), tiny_level());
    }

    // Tests rejection of malformed records
    // Verified by ignoring trailing tokens
    #[test]
    fn test_decode_level_rejects_malformed() {
        let cases = [
            "1 2 0 0 0 0 3",        // missing cell
            "1 2 0 0 0 0 3 4 4",    // trailing token
            "1 2 0 5 0 0 3 4",      // ball outside the grid
            "1 2 0 0 0 0 3 9",      // unknown cell code
            "1 2 0 0 1 0 7 0 3 4",  // stuck position outside the grid
            "1 2 0 0 9 0 0 0 3 4",  // stuck count larger than the grid
            "1 two 0 0 0 0 3 4",    // not a number
        ];
        for record in cases {
            assert!(
                matches!(decode_level(record), Err(GameError::MalformedRecord { .. })),
                "{record}"
            );
        }
        assert!(matches!(
            decode_level("0 2 0 0 0 0"),
            Err(GameError::InvalidParameter { .. })
        ));
    }

    // Tests splitting file content into records
    #[test]
    fn test_split_records() {
        let records: Vec<&str> = split_records("a b # c #  # \n").collect();
        assert_eq!(records, vec!["a b", "c"]);
        assert_eq!(split_records("").count(), 0);
    }

    // Tests streaming levels into a file and reading them back
    // Verified by skipping the flush in finish
    #[test]
    fn test_writer_and_read_levels() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("levels.lvl");

        let mut writer = LevelWriter::create(&path).expect("create");
        writer.write(&tiny_level()).expect("write");
        writer.write(&trap_level()).expect("write");
        assert_eq!(writer.written(), 2);
        assert_eq!(writer.finish().expect("finish"), 2);

        let levels = read_levels(&path).expect("read");
        assert_eq!(levels, vec![tiny_level(), trap_level()]);
    }

    // Tests uniform selection of a stored level and empty files
    #[test]
    fn test_load_random_level() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("levels.lvl");
        fs::write(&path, format!("{}{}", encode_level(&tiny_level()), TRAP_RECORD))
            .expect("write levels");

        let mut random = RandomSelector::new(5);
        for _ in 0..10 {
            let level = load_random_level(&path, &mut random)
                .expect("read")
                .expect("records available");
            assert!(level == tiny_level() || level == trap_level());
        }

        let empty = dir.path().join("empty.lvl");
        fs::write(&empty, "  ").expect("write empty file");
        assert_eq!(load_random_level(&empty, &mut random).expect("read"), None);

        let missing = dir.path().join("missing.lvl");
        assert!(matches!(
            load_random_level(&missing, &mut random),
            Err(GameError::FileSystem { .. })
        ));
    }

    // Tests the saved-game layout and its round trip through a file
    // Verified by saving the initial cells instead of the live ones
    #[test]
    fn test_saved_game_round_trip() {
        let mut state = GameState::new(tiny_level());
        move_ball(&mut state, Direction::Right).expect("move");
        let saved = state.save();

        let encoded = encode_saved_game(&saved);
        assert_eq!(encoded, "1 2 0 0 0 0 3 4 # 0 1 3 1 # ");
        assert_eq!(decode_saved_game(&encoded).expect("decode"), saved);

        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("game.sav");
        save_game(&path, &saved).expect("save");
        let loaded = load_saved_game(&path).expect("load");
        assert_eq!(loaded, saved);
        assert_eq!(GameState::from_saved(loaded).expect("resume").remaining_gems(), 0);
    }

    // Tests that saved games need exactly two records
    #[test]
    fn test_saved_game_rejects_record_count() {
        assert!(decode_saved_game("1 2 0 0 0 0 3 4 # ").is_err());
        assert!(decode_saved_game("1 2 0 0 0 0 3 4 # 0 1 3 1 # 0 0 # ").is_err());
        assert!(decode_saved_game("1 2 0 0 0 0 3 4 # 0 2 3 1 # ").is_err());
    }
}
