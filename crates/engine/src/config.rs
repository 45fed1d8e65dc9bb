//! Engine configuration.

use thiserror::Error;

use crate::core::TopRowPolicy;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Smallest board edge; the 4-wide I piece must fit at spawn.
pub const MIN_DIMENSION: u8 = 4;
/// Widest supported board.
pub const MAX_COLUMNS: u8 = 40;
/// Tallest supported board. Coordinates are `i8`, so this leaves headroom
/// for anchors one shape below the floor.
pub const MAX_ROWS: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "board must be {min}..={max_columns} columns by {min}..={max_rows} rows, got {columns}x{rows}",
        min = MIN_DIMENSION,
        max_columns = MAX_COLUMNS,
        max_rows = MAX_ROWS
    )]
    InvalidDimensions { columns: u8, rows: u8 },
}

/// How `RotateCw` is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Rotation is discarded if the rotated piece does not fit, like moves.
    #[default]
    Validated,
    /// Rotation always applies, even into walls or settled cells.
    Unchecked,
}

impl RotationMode {
    /// Parse from `validated` / `unchecked` (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "validated" | "checked" => Some(RotationMode::Validated),
            "unchecked" | "free" => Some(RotationMode::Unchecked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub columns: u8,
    pub rows: u8,
    pub top_row: TopRowPolicy,
    pub rotation: RotationMode,
}

impl EngineConfig {
    pub fn with_dimensions(mut self, columns: u8, rows: u8) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_top_row(mut self, top_row: TopRowPolicy) -> Self {
        self.top_row = top_row;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationMode) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let columns_ok = (MIN_DIMENSION..=MAX_COLUMNS).contains(&self.columns);
        let rows_ok = (MIN_DIMENSION..=MAX_ROWS).contains(&self.rows);
        if columns_ok && rows_ok {
            Ok(())
        } else {
            Err(ConfigError::InvalidDimensions {
                columns: self.columns,
                rows: self.rows,
            })
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            top_row: TopRowPolicy::Reset,
            rotation: RotationMode::Validated,
        }
    }
}
