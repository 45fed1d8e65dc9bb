//! Render snapshot - everything a view needs, detached from the engine.

use arrayvec::ArrayVec;

use crate::types::{PieceCell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_PIECE_CELLS};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub columns: u8,
    pub rows: u8,
    /// Color index per cell (0 = empty), row-major.
    pub board: Vec<u8>,
    pub active: ArrayVec<PieceCell, MAX_PIECE_CELLS>,
    pub active_kind: Option<PieceKind>,
    pub game_over: bool,
    pub pieces_spawned: u32,
    pub lines_cleared: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board.clear();
        self.board.resize(self.columns as usize * self.rows as usize, 0);
        self.active.clear();
        self.active_kind = None;
        self.game_over = false;
        self.pieces_spawned = 0;
        self.lines_cleared = 0;
    }

    /// Color index of a settled cell; 0 for empty or out-of-range.
    pub fn board_cell(&self, x: u8, y: u8) -> u8 {
        if x >= self.columns || y >= self.rows {
            return 0;
        }
        self.board
            .get(y as usize * self.columns as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            columns: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            board: Vec::new(),
            active: ArrayVec::new(),
            active_kind: None,
            game_over: false,
            pieces_spawned: 0,
            lines_cleared: 0,
        };
        s.clear();
        s
    }
}
