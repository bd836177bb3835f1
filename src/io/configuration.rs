//! Generation constants and runtime configuration defaults

use std::time::Duration;

// Fractions of the grid area; each count is floor(rows * cols * ratio)
/// Share of cells turned into walls
pub const WALLS_RATIO: f64 = 0.2;
/// Share of cells turned into mines
pub const MINES_RATIO: f64 = 0.2;
/// Share of cells holding gems
pub const GEMS_RATIO: f64 = 0.2;
/// Share of cells turned into stop cells
pub const STOPS_RATIO: f64 = 0.2;

/// Deadline for the stop-pattern search of a single interactive game
pub const SINGLE_GAME_DEADLINE: Duration = Duration::from_millis(300);

// Bulk deadline grows exponentially with rows: BASE * GROWTH^rows milliseconds
/// Base of the bulk stop-pattern deadline in milliseconds
pub const BULK_DEADLINE_BASE_MS: f64 = 1.8;
/// Per-row growth factor of the bulk stop-pattern deadline
pub const BULK_DEADLINE_GROWTH: f64 = 1.7;

/// Bulk generation keeps at most `total / PATTERNS_PER_LAYOUT_DIVISOR` patterns per layout
pub const PATTERNS_PER_LAYOUT_DIVISOR: usize = 100;

// Prevents bulk generation from spinning forever on unsolvable dimensions
/// Layouts tried per requested game before bulk generation gives up
pub const LAYOUT_ATTEMPTS_PER_GAME: usize = 50;

/// Maximum frontier size before the hint search restarts
pub const HINT_MAX_BRANCHES: usize = 500_000;
/// Hint search restarts before reporting that no hint is available
pub const HINT_MAX_RETRIES: usize = 20;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 256;

/// Default number of grid rows
pub const DEFAULT_ROWS: usize = 8;
/// Default number of grid columns
pub const DEFAULT_COLS: usize = 8;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of games produced by bulk generation
pub const DEFAULT_BULK_TOTAL: usize = 100;

// Persisted file layout
/// Separator between level records and between index entries
pub const RECORD_SEPARATOR: char = '#';
/// Separator between the dimension key and the path of an index entry
pub const INDEX_KEY_SEPARATOR: char = ':';
/// Default file name of the dimension index
pub const INDEX_FILE_NAME: &str = "levels.idx";
/// Extension of generated level files
pub const LEVEL_FILE_EXTENSION: &str = "lvl";

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Number of stop cells for a grid of the given dimensions
pub fn stops_count(rows: usize, cols: usize) -> usize {
    ratio_count(rows, cols, STOPS_RATIO)
}

/// Number of cells covered by `ratio` of a grid of the given dimensions
pub fn ratio_count(rows: usize, cols: usize, ratio: f64) -> usize {
    ((rows * cols) as f64 * ratio).floor() as usize
}

/// Stop-pattern deadline for bulk generation of grids with `rows` rows
pub fn bulk_deadline(rows: usize) -> Duration {
    let exponent = i32::try_from(rows).unwrap_or(i32::MAX);
    let millis = BULK_DEADLINE_BASE_MS * BULK_DEADLINE_GROWTH.powi(exponent);
    Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
}

/// Number of patterns kept from one layout in a bulk run of `total` games
pub fn patterns_per_layout(total: usize) -> usize {
    (total / PATTERNS_PER_LAYOUT_DIVISOR).max(1)
}
