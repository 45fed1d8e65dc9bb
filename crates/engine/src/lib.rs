//! Game engine crate.
//!
//! Owns the board and the falling piece and applies driver commands to them.
//!
//! # Example
//!
//! ```
//! use term_tetris_engine::{Engine, EngineConfig};
//! use term_tetris_engine::core::ScriptedRng;
//! use term_tetris_engine::types::{Command, PieceKind};
//!
//! let rng = ScriptedRng::new(vec![PieceKind::O.type_id() as u32]);
//! let mut engine = Engine::new(EngineConfig::default(), rng).unwrap();
//!
//! let outcome = engine.tick(Command::HardDrop);
//! assert!(outcome.locked);
//! assert_eq!(engine.cell_at(4, 19), Ok(Some(PieceKind::O)));
//! ```

pub mod config;
pub mod game;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use config::{ConfigError, EngineConfig, RotationMode};
pub use game::{Engine, EngineState};
