//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so the engine,
//! the key mapper and the terminal view can all share them.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Driver frame interval (~60 FPS) |
//! | `GRAVITY_FRAMES` | 40 | Frames between gravity steps (~0.667s per row) |
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_type_id(2).unwrap();
//! assert_eq!(kind, PieceKind::O);
//! assert_eq!(kind.color_index(), 3);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed driver frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Frames between two gravity steps at the default cadence.
pub const GRAVITY_FRAMES: u32 = 40;

/// Largest shape edge; shapes are at most 4x4.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Upper bound on cells a single piece can occupy.
pub const MAX_PIECE_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// The seven piece kinds, in catalog order.
///
/// The discriminant is the type identifier (0-6). Display color indices are
/// the identifier plus one, so 0 can mean "empty" in encoded grids:
/// - **S**: 1, green
/// - **Z**: 2, red
/// - **O**: 3, yellow
/// - **T**: 4, magenta
/// - **I**: 5, cyan
/// - **J**: 6, white
/// - **L**: 7, blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    S = 0,
    Z = 1,
    O = 2,
    T = 3,
    I = 4,
    J = 5,
    L = 6,
}

impl PieceKind {
    /// Every kind, indexed by type identifier.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::S,
        PieceKind::Z,
        PieceKind::O,
        PieceKind::T,
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Type identifier in `0..=6`.
    pub fn type_id(self) -> u8 {
        self as u8
    }

    /// Display color index in `1..=7`.
    pub fn color_index(self) -> u8 {
        self.type_id() + 1
    }

    /// Look up a kind by type identifier.
    pub fn from_type_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }
}

/// Commands a driver feeds into the engine once per frame.
///
/// Quitting is not a command: it only ends the driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    /// No input this frame
    #[default]
    None,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Drop piece until it locks
    HardDrop,
}

/// What happened during one engine call.
///
/// Used by drivers for animation or sound hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The active piece became settled cells.
    pub locked: bool,
    /// Rows removed by the line-clear scan that followed the lock.
    pub lines_cleared: u32,
    /// The engine is (now) in its terminal state.
    pub game_over: bool,
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: settled cell from the given piece kind
pub type Cell = Option<PieceKind>;

/// One occupied cell of the active piece, in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceCell {
    pub x: i8,
    pub y: i8,
    pub kind: PieceKind,
}
