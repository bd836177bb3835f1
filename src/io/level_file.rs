//! Level and saved-game persistence
//!
//! A level file holds `#`-separated records. Each record is a whitespace
//! separated token stream:
//!
//! ```text
//! rows cols ballRow ballCol
//! stuckAreaCount (row col)*
//! stuckAreaGemsCount (row col)*
//! cellCode{rows*cols}
//! ```
//!
//! Cells are row-major [`CellType::code`] values. Every token is followed by a
//! space and every record by `"# "`.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

use crate::algorithm::generator::RandomSelector;
use crate::game::level::Level;
use crate::game::state::SavedGame;
use crate::io::configuration::RECORD_SEPARATOR;
use crate::io::error::{Result, WithContext, malformed_record};
use crate::spatial::{CellType, Grid, Position};

/// Serialize a level as one record, separator included
pub fn encode_level(level: &Level) -> String {
    let mut record = String::new();
    let (rows, cols) = level.dimensions();
    let ball = level.ball();
    push_tokens(&mut record, &[rows, cols, ball.row, ball.col]);

    push_positions(
        &mut record,
        level.stuck_area().iter().copied(),
        level.stuck_area().len(),
    );
    push_positions(
        &mut record,
        level.stuck_area_gems().iter().copied(),
        level.stuck_area_gems().len(),
    );
    push_cells(&mut record, level.grid());

    record.push(RECORD_SEPARATOR);
    record.push(' ');
    record
}

/// Parse one record, without its separator
///
/// # Errors
///
/// Returns `MalformedRecord` for missing, extra or out-of-range tokens
pub fn decode_level(record: &str) -> Result<Level> {
    let mut tokens = Tokens::new(record);
    let level = tokens.level()?;
    tokens.finish()?;
    Ok(level)
}

/// Split file content into non-empty records
pub fn split_records(content: &str) -> impl Iterator<Item = &str> {
    content
        .split(RECORD_SEPARATOR)
        .map(str::trim)
        .filter(|record| !record.is_empty())
}

/// Read every level stored in `path`
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `MalformedRecord` for
/// the first record that does not decode
pub fn read_levels(path: &Path) -> Result<Vec<Level>> {
    let content = fs::read_to_string(path).with_file(path, "read levels")?;
    split_records(&content).map(decode_level).collect()
}

/// Load a uniformly chosen level from `path`
///
/// Returns `Ok(None)` for a file without records.
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `MalformedRecord` if
/// the chosen record does not decode
pub fn load_random_level(path: &Path, random: &mut RandomSelector) -> Result<Option<Level>> {
    let content = fs::read_to_string(path).with_file(path, "read levels")?;
    let records: Vec<&str> = split_records(&content).collect();
    let Some(choice) = random.index(records.len()) else {
        return Ok(None);
    };
    log::debug!(
        "Loading record {choice} of {} from {}",
        records.len(),
        path.display()
    );
    records.get(choice).copied().map(decode_level).transpose()
}

/// Streams generated levels into a file
pub struct LevelWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    written: usize,
}

impl LevelWriter {
    /// Create or truncate `path`
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the file cannot be created
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).with_file(&path, "create level file")?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
            written: 0,
        })
    }

    /// Append one level record
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the write fails
    pub fn write(&mut self, level: &Level) -> Result<()> {
        self.writer
            .write_all(encode_level(level).as_bytes())
            .with_file(&self.path, "write level")?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered records and return the record count
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the flush fails
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush().with_file(&self.path, "flush level file")?;
        Ok(self.written)
    }
}

/// Serialize a game in progress: the level record, then the live ball and cells
pub fn encode_saved_game(saved: &SavedGame) -> String {
    let mut content = encode_level(&saved.level);
    push_tokens(&mut content, &[saved.ball.row, saved.ball.col]);
    push_cells(&mut content, &saved.cells);
    content.push(RECORD_SEPARATOR);
    content.push(' ');
    content
}

/// Parse a saved game written by [`encode_saved_game`]
///
/// # Errors
///
/// Returns `MalformedRecord` if either record is missing or does not decode
pub fn decode_saved_game(content: &str) -> Result<SavedGame> {
    let mut records = split_records(content);
    let (Some(level_record), Some(live_record), None) =
        (records.next(), records.next(), records.next())
    else {
        return Err(malformed_record(
            content,
            &"expected a level record followed by a live state record",
        ));
    };

    let level = decode_level(level_record)?;
    let (rows, cols) = level.dimensions();
    let mut tokens = Tokens::new(live_record);
    let ball = tokens.position(rows, cols, "ball")?;
    let cells = tokens.grid(rows, cols)?;
    tokens.finish()?;

    Ok(SavedGame { level, ball, cells })
}

/// Write a saved game to `path`
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn save_game(path: &Path, saved: &SavedGame) -> Result<()> {
    fs::write(path, encode_saved_game(saved)).with_file(path, "write saved game")
}

/// Read a saved game from `path`
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `MalformedRecord` if it
/// does not decode
pub fn load_saved_game(path: &Path) -> Result<SavedGame> {
    let content = fs::read_to_string(path).with_file(path, "read saved game")?;
    decode_saved_game(&content)
}

fn push_tokens(out: &mut String, tokens: &[usize]) {
    for token in tokens {
        let _ = write!(out, "{token} ");
    }
}

fn push_positions(out: &mut String, positions: impl Iterator<Item = Position>, count: usize) {
    push_tokens(out, &[count]);
    for position in positions {
        push_tokens(out, &[position.row, position.col]);
    }
}

fn push_cells(out: &mut String, grid: &Grid) {
    for cell in grid.cells() {
        let _ = write!(out, "{} ", cell.code());
    }
}

struct Tokens<'a> {
    record: &'a str,
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(record: &'a str) -> Self {
        Self {
            record,
            inner: record.split_whitespace(),
        }
    }

    fn next_usize(&mut self, what: &str) -> Result<usize> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| malformed_record(self.record, &format!("missing {what}")))?;
        token.parse().map_err(|_parse_error| {
            malformed_record(self.record, &format!("{what} '{token}' is not a count"))
        })
    }

    fn position(&mut self, rows: usize, cols: usize, what: &str) -> Result<Position> {
        let row = self.next_usize(what)?;
        let col = self.next_usize(what)?;
        if row >= rows || col >= cols {
            return Err(malformed_record(
                self.record,
                &format!("{what} ({row}, {col}) lies outside the {rows}x{cols} grid"),
            ));
        }
        Ok(Position::new(row, col))
    }

    fn positions(&mut self, rows: usize, cols: usize, what: &str) -> Result<Vec<Position>> {
        let count = self.next_usize(what)?;
        if count > rows * cols {
            return Err(malformed_record(
                self.record,
                &format!("{count} {what} positions exceed the grid size"),
            ));
        }
        (0..count)
            .map(|_| self.position(rows, cols, what))
            .collect()
    }

    fn grid(&mut self, rows: usize, cols: usize) -> Result<Grid> {
        let mut cells = Vec::with_capacity(rows * cols);
        for _ in 0..rows * cols {
            let token = self
                .inner
                .next()
                .ok_or_else(|| malformed_record(self.record, &"missing cell codes"))?;
            let cell = token
                .parse::<i8>()
                .ok()
                .and_then(CellType::from_code)
                .ok_or_else(|| {
                    malformed_record(self.record, &format!("unknown cell code '{token}'"))
                })?;
            cells.push(cell);
        }
        Grid::from_cells(rows, cols, cells)
    }

    fn level(&mut self) -> Result<Level> {
        let rows = self.next_usize("rows")?;
        let cols = self.next_usize("cols")?;
        // Rejects zero or oversized dimensions
        Grid::new(rows, cols)?;
        let ball = self.position(rows, cols, "ball")?;
        let stuck_area: BTreeSet<Position> =
            self.positions(rows, cols, "stuck area")?.into_iter().collect();
        let stuck_area_gems = self.positions(rows, cols, "stuck area gem")?;
        let grid = self.grid(rows, cols)?;
        Level::new(grid, ball, stuck_area, stuck_area_gems)
    }

    fn finish(mut self) -> Result<()> {
        match self.inner.next() {
            Some(extra) => Err(malformed_record(
                self.record,
                &format!("unexpected trailing token '{extra}'"),
            )),
            None => Ok(()),
        }
    }
}
