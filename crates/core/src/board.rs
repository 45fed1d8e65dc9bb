//! Board module - manages the grid of settled cells
//!
//! The board is a `columns x rows` grid (10x20 by default) where each cell is
//! empty or holds the kind of the piece that settled there.
//! Uses a flat row-major vector so row shifts are a single `copy_within`.
//! Coordinates: (x, y) where x grows to the right and y grows downwards.

use thiserror::Error;

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Board access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfRange { x: i32, y: i32 },
}

/// What row 0 holds after [`Board::clear_row`] shifts everything down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopRowPolicy {
    /// Row 0 becomes empty.
    #[default]
    Reset,
    /// Row 0 keeps its pre-shift content, so it also appears in row 1.
    /// A full row 0 is still emptied, otherwise it would clear forever.
    KeepStale,
}

impl TopRowPolicy {
    /// Parse from `reset` / `stale` (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reset" | "empty" => Some(TopRowPolicy::Reset),
            "stale" | "keep" | "keep-stale" => Some(TopRowPolicy::KeepStale),
            _ => None,
        }
    }
}

/// The settled-cell grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    top_row: TopRowPolicy,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8, top_row: TopRowPolicy) -> Self {
        Self {
            width,
            height,
            top_row,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Result<usize, BoardError> {
        if self.is_out_of_bounds(x, y) {
            return Err(BoardError::OutOfRange {
                x: x as i32,
                y: y as i32,
            });
        }
        Ok((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn top_row_policy(&self) -> TopRowPolicy {
        self.top_row
    }

    /// Get cell at position (x, y)
    pub fn get(&self, x: i8, y: i8) -> Result<Cell, BoardError> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> Result<(), BoardError> {
        let idx = self.index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Ok(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * self.width as usize;
        let end = start + self.width as usize;
        &mut self.cells[start..end]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        if y < 0 || y >= self.height as i8 {
            return false;
        }
        self.row(y as usize).iter().all(|cell| cell.is_some())
    }

    /// Remove row `y` by shifting every row above it down by one.
    ///
    /// Row 0 is then reset or left stale according to the board's
    /// [`TopRowPolicy`].
    pub fn clear_row(&mut self, y: i8) -> Result<(), BoardError> {
        if y < 0 || y >= self.height as i8 {
            return Err(BoardError::OutOfRange { x: 0, y: y as i32 });
        }

        let width = self.width as usize;
        let y = y as usize;

        // copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells.copy_within(src_start..src_start + width, dst_start);
        }

        let reset_top = match self.top_row {
            TopRowPolicy::Reset => true,
            TopRowPolicy::KeepStale => self.is_row_full(0),
        };
        if reset_top {
            self.row_mut(0).fill(None);
        }

        Ok(())
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write color indices (0 = empty) row-major into `out`.
    ///
    /// `out` is resized to `width * height`, reusing its allocation.
    pub fn write_color_indices(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.cells
                .iter()
                .map(|cell| cell.map(|kind| kind.color_index()).unwrap_or(0)),
        );
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT, TopRowPolicy::default())
    }
}
