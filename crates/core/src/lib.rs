//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the building blocks of the falling-block engine. It has
//! **zero dependencies** on terminals or I/O:
//!
//! - **Deterministic**: randomness is injected through [`PieceRng`]
//! - **Immutable pieces**: moves and rotations return new [`ActivePiece`] values
//! - **Allocation-free hot paths**: shapes are fixed 4x4 arrays
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven canonical shapes and clockwise rotation
//! - [`piece`]: the falling piece and its anchor
//! - [`board`]: settled-cell grid and row clearing
//! - [`rng`]: seedable random sources
//! - [`snapshot`]: detached render state
//!
//! # Example
//!
//! ```
//! use term_tetris_core::{ActivePiece, Board, ScriptedRng};
//! use term_tetris_core::types::PieceKind;
//!
//! let board = Board::default();
//! let mut rng = ScriptedRng::new(vec![PieceKind::O.type_id() as u32]);
//! let piece = ActivePiece::spawn(board.width(), &mut rng);
//!
//! assert_eq!(piece.kind, PieceKind::O);
//! assert_eq!((piece.x, piece.y), (4, 0));
//! assert!(piece.cells().all(|(x, y)| !board.is_occupied(x, y)));
//! ```

pub mod board;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use term_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, TopRowPolicy};
pub use piece::ActivePiece;
pub use rng::{PieceRng, ScriptedRng, SimpleRng};
pub use shapes::{canonical, random_shape, rotate_cw, Shape};
pub use snapshot::GameSnapshot;
