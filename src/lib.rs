//! Terminal falling-block game (workspace facade crate).
//!
//! Re-exports the workspace crates as `term_tetris::{core,engine,input,term,types}`
//! and hosts the frame-loop helpers used by the binary.

pub mod driver;

pub use term_tetris_core as core;
pub use term_tetris_engine as engine;
pub use term_tetris_input as input;
pub use term_tetris_term as term;
pub use term_tetris_types as types;
