//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. One key press
//! yields at most one command; terminal auto-repeat is passed through as
//! further presses.

pub mod map;

pub use term_tetris_types as types;

pub use map::{handle_key_event, should_quit};
