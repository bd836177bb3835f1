//! Rectangular cell matrix the ball slides across
//!
//! The grid keeps its dimensions for life. All access goes through
//! bounds-checked accessors; a position outside the grid is either `None`
//! (probing, e.g. the next step of a slide) or an `OutOfBounds` error
//! (mutation, which only ever targets positions taken from the grid itself).

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{GameError, Result, invalid_parameter, malformed_record, out_of_bounds};
use crate::spatial::{CellType, Direction, Position};

/// Cell matrix of a level, indexed by `(row, col)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<CellType>,
}

impl Grid {
    /// Create a grid of `Clear` cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or exceeds
    /// [`MAX_GRID_DIMENSION`]
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        validate_dimensions(rows, cols)?;
        Ok(Self {
            cells: Array2::from_elem((rows, cols), CellType::Clear),
        })
    }

    /// Create a grid from row-major cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for bad dimensions or a cell count that does
    /// not match them
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<CellType>) -> Result<Self> {
        validate_dimensions(rows, cols)?;
        let provided = cells.len();
        let cells = Array2::from_shape_vec((rows, cols), cells).map_err(|_shape_error| {
            invalid_parameter(
                "cells",
                &provided,
                &format!("expected {} cells for a {rows}x{cols} grid", rows * cols),
            )
        })?;
        Ok(Self { cells })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, grids have at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if a position lies inside the grid
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows() && position.col < self.cols()
    }

    /// Cell at `position`, `None` outside the grid
    pub fn get(&self, position: Position) -> Option<CellType> {
        self.cells.get((position.row, position.col)).copied()
    }

    /// Cell at `position`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn cell(&self, position: Position) -> Result<CellType> {
        self.get(position)
            .ok_or_else(|| out_of_bounds(position, self.dimensions()))
    }

    /// Overwrite the cell at `position`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid
    pub fn set(&mut self, position: Position, cell: CellType) -> Result<()> {
        let dimensions = self.dimensions();
        let slot = self
            .cells
            .get_mut((position.row, position.col))
            .ok_or_else(|| out_of_bounds(position, dimensions))?;
        *slot = cell;
        Ok(())
    }

    /// Adjacent position one step in `direction`, `None` past the edge
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.offset();
        let row = position.row.checked_add_signed(dr)?;
        let col = position.col.checked_add_signed(dc)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let cols = self.cols();
        (0..self.len()).map(move |index| Position::from_linear_index(index, cols))
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellType> + '_ {
        self.cells.iter().copied()
    }

    /// Positions holding `kind`, in row-major order
    pub fn positions_of(&self, kind: CellType) -> Vec<Position> {
        self.cells
            .indexed_iter()
            .filter(|&(_, &cell)| cell == kind)
            .map(|((row, col), _)| Position::new(row, col))
            .collect()
    }

    /// Number of cells holding `kind`
    pub fn count_of(&self, kind: CellType) -> usize {
        self.cells.iter().filter(|&&cell| cell == kind).count()
    }
}

fn validate_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || rows > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            "rows",
            &rows,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    if cols == 0 || cols > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            "cols",
            &cols,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the [`Display`](fmt::Display) rendering: one line per row, one
/// symbol per cell. Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());

        let mut cells = Vec::with_capacity(rows * cols);
        for line in &lines {
            if line.chars().count() != cols {
                return Err(malformed_record(line, &format!("expected {cols} cells")));
            }
            for symbol in line.chars() {
                let cell = CellType::from_symbol(symbol).ok_or_else(|| {
                    malformed_record(line, &format!("unknown cell symbol '{symbol}'"))
                })?;
                cells.push(cell);
            }
        }

        Self::from_cells(rows, cols, cells)
    }
}
