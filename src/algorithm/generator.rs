//! Level generation pipeline
//!
//! A layout is built in four passes: the ball lands on a uniformly random cell
//! (which becomes a stop cell), walls then mines are planted without
//! disconnecting the floor, and gems are spread over the remaining clear
//! cells. The stop-pattern search then turns a subset of the clear cells into
//! stop cells and validates the result.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::obstacles::place_obstacles;
use crate::algorithm::stops::{
    AcceptedPattern, find_valid_stop_pattern, search_stop_patterns, shuffled_selection,
};
use crate::game::level::Level;
use crate::io::configuration::{
    GEMS_RATIO, LAYOUT_ATTEMPTS_PER_GAME, MINES_RATIO, SINGLE_GAME_DEADLINE, WALLS_RATIO,
    bulk_deadline, patterns_per_layout, ratio_count, stops_count,
};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{CellType, Grid, Position};

/// Seeded random source for reproducible generation
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform position on a `rows x cols` grid
    pub fn position(&mut self, rows: usize, cols: usize) -> Position {
        Position::new(self.rng.random_range(0..rows), self.rng.random_range(0..cols))
    }

    /// Uniform index below `len`, `None` when `len` is zero
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Underlying generator for shuffles
    pub const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Parameters of a generation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Seed of the random source
    pub seed: u64,
}

/// A laid-out grid waiting for its stop pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Cells with ball, walls, mines and gems placed
    pub grid: Grid,
    /// Ball start, already marked as a stop cell
    pub ball: Position,
    /// Gem positions, row-major
    pub gems: Vec<Position>,
}

impl Layout {
    /// Build the level produced by an accepted stop pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not fit this layout's grid
    pub fn into_level(self, pattern: AcceptedPattern) -> Result<Level> {
        let mut grid = self.grid;
        pattern.apply(&mut grid)?;
        Level::new(grid, self.ball, pattern.stuck_area, pattern.stuck_area_gems)
    }
}

/// Generates solvable levels of fixed dimensions
pub struct LevelGenerator {
    config: GeneratorConfig,
    random: RandomSelector,
}

impl LevelGenerator {
    /// Create a generator
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the dimensions are not a valid grid size
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        Grid::new(config.rows, config.cols)?;
        Ok(Self {
            config,
            random: RandomSelector::new(config.seed),
        })
    }

    /// Generation parameters
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Place ball, walls, mines and gems on a fresh grid
    ///
    /// # Errors
    ///
    /// Returns an error only if grid invariants are broken
    pub fn generate_layout(&mut self) -> Result<Layout> {
        let GeneratorConfig { rows, cols, .. } = self.config;
        let mut grid = Grid::new(rows, cols)?;

        let ball = self.random.position(rows, cols);
        grid.set(ball, CellType::Stop)?;

        place_obstacles(
            &mut grid,
            ball,
            ratio_count(rows, cols, WALLS_RATIO),
            CellType::Wall,
            self.random.rng(),
        )?;
        place_obstacles(
            &mut grid,
            ball,
            ratio_count(rows, cols, MINES_RATIO),
            CellType::Mine,
            self.random.rng(),
        )?;

        let mut clear = grid.positions_of(CellType::Clear);
        clear.shuffle(self.random.rng());
        let mut gems: Vec<Position> = clear
            .into_iter()
            .take(ratio_count(rows, cols, GEMS_RATIO))
            .collect();
        for &gem in &gems {
            grid.set(gem, CellType::Gem)?;
        }
        gems.sort_unstable();

        Ok(Layout { grid, ball, gems })
    }

    /// Generate one level for an interactive game
    ///
    /// Returns `Ok(None)` when no stop pattern validated before `deadline`;
    /// callers fall back to a stored level.
    ///
    /// # Errors
    ///
    /// Returns an error only if grid invariants are broken
    pub fn generate_level(&mut self, deadline: Duration) -> Result<Option<Level>> {
        let layout = self.generate_layout()?;
        match find_valid_stop_pattern(&layout.grid, layout.ball, &layout.gems, deadline) {
            Some(pattern) => layout.into_level(pattern).map(Some),
            None => {
                log::info!(
                    "No stop pattern found for a {}x{} layout within {deadline:?}",
                    self.config.rows,
                    self.config.cols
                );
                Ok(None)
            }
        }
    }

    /// Generate one level under the default interactive deadline
    ///
    /// # Errors
    ///
    /// Returns an error only if grid invariants are broken
    pub fn generate_single(&mut self) -> Result<Option<Level>> {
        self.generate_level(SINGLE_GAME_DEADLINE)
    }

    /// Generate `total` levels for offline storage
    ///
    /// Each layout contributes up to `max(1, total / 100)` patterns found from
    /// a shuffled seed under a deadline that grows with the row count.
    /// `on_level` sees every level as it is produced, in order. Gives up after
    /// `total * LAYOUT_ATTEMPTS_PER_GAME` layouts, so fewer than `total`
    /// levels may be returned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero total, or the first error
    /// returned by `on_level`
    pub fn generate_batch<F>(&mut self, total: usize, mut on_level: F) -> Result<Vec<Level>>
    where
        F: FnMut(&Level) -> Result<()>,
    {
        if total == 0 {
            return Err(invalid_parameter(
                "total",
                &total,
                &"must generate at least one game",
            ));
        }

        let GeneratorConfig { rows, cols, .. } = self.config;
        let per_layout = patterns_per_layout(total);
        let max_layouts = total.saturating_mul(LAYOUT_ATTEMPTS_PER_GAME);
        let deadline = bulk_deadline(rows);
        let mut levels = Vec::with_capacity(total);
        let mut layouts = 0;

        while levels.len() < total && layouts < max_layouts {
            layouts += 1;
            let layout = self.generate_layout()?;
            let available = layout.grid.count_of(CellType::Clear);
            let selection =
                shuffled_selection(available, stops_count(rows, cols), self.random.rng());
            let limit = per_layout.min(total - levels.len());
            let token = CancellationToken::with_timeout(deadline);

            let patterns = search_stop_patterns(
                &layout.grid,
                layout.ball,
                &layout.gems,
                selection,
                limit,
                &token,
            );
            log::debug!("Layout {layouts} yielded {} patterns", patterns.len());

            for pattern in patterns {
                let level = layout.clone().into_level(pattern)?;
                on_level(&level)?;
                levels.push(level);
            }
        }

        if levels.len() < total {
            log::warn!(
                "Generated {}/{total} {rows}x{cols} games before giving up after {layouts} layouts",
                levels.len()
            );
        } else {
            log::info!("Generated {total} {rows}x{cols} games from {layouts} layouts");
        }

        Ok(levels)
    }
}
