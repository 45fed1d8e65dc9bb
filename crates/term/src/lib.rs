//! Terminal "game renderer" module.
//!
//! Renders a [`core::GameSnapshot`] into a framebuffer of styled characters
//! and flushes it to the terminal through crossterm.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: pure snapshot-to-framebuffer layout
//! - [`renderer`]: terminal setup/teardown and full/diff redraws

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use term_tetris_core as core;
pub use term_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_style, BoardOrigin, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
