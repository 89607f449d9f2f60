use crate::error::GridError;

use super::state::{Bounds, Position};

/// What occupies a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Snake,
    Food,
}

/// Fixed-size board of cell states, stored row-major.
///
/// The grid is a projection: snake and food keep their own coordinates and
/// write through to it once per tick. It never validates game-level
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![CellState::Empty; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.cols, self.rows)
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        self.bounds().contains(pos)
    }

    fn index(&self, col: i32, row: i32) -> Result<usize, GridError> {
        if !self.contains(Position::new(col, row)) {
            return Err(GridError::OutOfBounds {
                col,
                row,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(row as usize * self.cols + col as usize)
    }

    pub fn get(&self, col: i32, row: i32) -> Result<CellState, GridError> {
        let idx = self.index(col, row)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, col: i32, row: i32, state: CellState) -> Result<(), GridError> {
        let idx = self.index(col, row)?;
        self.cells[idx] = state;
        Ok(())
    }

    pub fn get_at(&self, pos: Position) -> Result<CellState, GridError> {
        self.get(pos.col, pos.row)
    }

    pub fn set_at(&mut self, pos: Position, state: CellState) -> Result<(), GridError> {
        self.set(pos.col, pos.row, state)
    }

    /// All cells with their states, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(idx, state)| {
            let pos = Position::new((idx % cols) as i32, (idx / cols) as i32);
            (pos, *state)
        })
    }

    /// Lazily yields every cell currently tagged empty. Reads the live
    /// cell array, so the result always reflects the latest writes.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(|(_, state)| *state == CellState::Empty)
            .map(|(pos, _)| pos)
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }
}
