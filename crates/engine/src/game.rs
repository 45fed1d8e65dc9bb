//! Game engine - ties the board, the active piece and the RNG together
//!
//! The engine is a small state machine:
//!
//! ```text
//! Spawning --fits--> Falling --blocked gravity--> Locking --> Clearing --> Spawning
//!     \--collides--> GameOver
//! ```
//!
//! `Spawning`, `Locking` and `Clearing` are transient: every public call runs
//! them to completion, so between calls the engine is `Falling` or `GameOver`.
//! The engine keeps no clock. Drivers call [`Engine::tick`] once per frame and
//! [`Engine::gravity_step`] on their own cadence.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::config::{ConfigError, EngineConfig, RotationMode};
use crate::core::{ActivePiece, Board, BoardError, GameSnapshot, PieceRng, SimpleRng};
use crate::types::{Cell, Command, PieceCell, TickOutcome, MAX_PIECE_CELLS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

/// The falling-block engine.
#[derive(Debug, Clone)]
pub struct Engine<R = SimpleRng> {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    state: EngineState,
    rng: R,
    pieces_spawned: u32,
    lines_cleared: u32,
}

impl Engine<SimpleRng> {
    /// Standard 10x20 game driven by [`SimpleRng`].
    pub fn with_seed(seed: u32) -> Self {
        let config = EngineConfig::default();
        let mut engine = Self::build(config, SimpleRng::new(seed));
        engine.settle(&mut TickOutcome::default());
        engine
    }
}

impl<R: PieceRng> Engine<R> {
    /// Create an engine and spawn its first piece.
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self::build(config, rng);
        engine.settle(&mut TickOutcome::default());
        Ok(engine)
    }

    fn build(config: EngineConfig, rng: R) -> Self {
        debug!(
            columns = config.columns,
            rows = config.rows,
            top_row = ?config.top_row,
            rotation = ?config.rotation,
            "engine created"
        );
        Self {
            config,
            board: Board::new(config.columns, config.rows, config.top_row),
            active: None,
            state: EngineState::Spawning,
            rng,
            pieces_spawned: 0,
            lines_cleared: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == EngineState::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up scenarios.
    ///
    /// The active piece is not re-validated against the edited board.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Replace the active piece, e.g. to stage a known piece in tests.
    ///
    /// Returns false (and changes nothing) if the piece does not fit or the
    /// game is over.
    pub fn set_active(&mut self, piece: ActivePiece) -> bool {
        if self.state != EngineState::Falling || !self.is_valid_placement(&piece) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Number of pieces that have entered play, including the current one.
    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Rows removed since the engine was created.
    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// `(columns, rows)`
    pub fn dimensions(&self) -> (u8, u8) {
        (self.board.width(), self.board.height())
    }

    /// Settled cell at `(x, y)`.
    pub fn cell_at(&self, x: i8, y: i8) -> Result<Cell, BoardError> {
        self.board.get(x, y)
    }

    /// Cells of the falling piece, recomputed on every call.
    ///
    /// Cells above row 0 are included; renderers clip them.
    pub fn active_piece_cells(&self) -> ArrayVec<PieceCell, MAX_PIECE_CELLS> {
        let mut out = ArrayVec::new();
        if let Some(piece) = &self.active {
            out.extend(piece.cells().map(|(x, y)| PieceCell {
                x,
                y,
                kind: piece.kind,
            }));
        }
        out
    }

    /// Apply one frame's command.
    pub fn tick(&mut self, command: Command) -> TickOutcome {
        if self.state != EngineState::Falling {
            return self.idle_outcome();
        }

        match command {
            Command::None => {}
            Command::MoveLeft => {
                self.try_transform(|p| p.with_anchor(-1, 0));
            }
            Command::MoveRight => {
                self.try_transform(|p| p.with_anchor(1, 0));
            }
            Command::RotateCw => match self.config.rotation {
                RotationMode::Validated => {
                    self.try_transform(|p| p.with_rotated_shape());
                }
                RotationMode::Unchecked => {
                    self.active = self.active.map(|p| p.with_rotated_shape());
                }
            },
            Command::HardDrop => return self.hard_drop(),
        }

        self.idle_outcome()
    }

    /// Move the piece down one row, or lock it where it is.
    pub fn gravity_step(&mut self) -> TickOutcome {
        if self.state != EngineState::Falling {
            return self.idle_outcome();
        }

        if self.try_transform(|p| p.with_anchor(0, 1)) {
            return TickOutcome::default();
        }

        let mut outcome = TickOutcome::default();
        self.state = EngineState::Locking;
        self.settle(&mut outcome);
        outcome
    }

    /// Apply gravity steps until the piece locks.
    fn hard_drop(&mut self) -> TickOutcome {
        loop {
            let outcome = self.gravity_step();
            if outcome.locked || self.state != EngineState::Falling {
                return outcome;
            }
        }
    }

    /// Whether `piece` fits: inside the side walls and floor, and not
    /// overlapping settled cells. Rows above the board are not checked.
    pub fn is_valid_placement(&self, piece: &ActivePiece) -> bool {
        let columns = self.board.width() as i8;
        let rows = self.board.height() as i8;

        piece.cells().all(|(x, y)| {
            if x < 0 || x >= columns || y >= rows {
                return false;
            }
            if y < 0 {
                return true;
            }
            matches!(self.board.get(x, y), Ok(None))
        })
    }

    /// Clear every full row, bottom to top. Returns the number removed.
    ///
    /// After a clear the same row index is examined again, because the row
    /// above has just moved into it.
    pub fn check_rows_complete(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.board.height() as i8 - 1;

        while y >= 0 {
            if self.board.is_row_full(y) {
                if self.board.clear_row(y).is_err() {
                    break;
                }
                cleared += 1;
                continue;
            }
            y -= 1;
        }

        cleared
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.board.width();
        out.rows = self.board.height();
        self.board.write_color_indices(&mut out.board);
        out.active = self.active_piece_cells();
        out.active_kind = self.active.map(|p| p.kind);
        out.game_over = self.is_game_over();
        out.pieces_spawned = self.pieces_spawned;
        out.lines_cleared = self.lines_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the active piece with `f(piece)` if the result fits.
    fn try_transform(&mut self, f: impl FnOnce(&ActivePiece) -> ActivePiece) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let candidate = f(&active);
        if !self.is_valid_placement(&candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    fn idle_outcome(&self) -> TickOutcome {
        TickOutcome {
            game_over: self.is_game_over(),
            ..TickOutcome::default()
        }
    }

    /// Run transient states until the engine is `Falling` or `GameOver`.
    fn settle(&mut self, outcome: &mut TickOutcome) {
        loop {
            match self.state {
                EngineState::Locking => {
                    self.lock_active();
                    outcome.locked = true;
                    self.state = EngineState::Clearing;
                }
                EngineState::Clearing => {
                    let cleared = self.check_rows_complete();
                    if cleared > 0 {
                        debug!(cleared, "rows cleared");
                    }
                    self.lines_cleared += cleared;
                    outcome.lines_cleared += cleared;
                    self.state = EngineState::Spawning;
                }
                EngineState::Spawning => {
                    let piece = ActivePiece::spawn(self.board.width(), &mut self.rng);
                    if self.is_valid_placement(&piece) {
                        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
                        debug!(kind = ?piece.kind, x = piece.x, "piece spawned");
                        self.active = Some(piece);
                        self.state = EngineState::Falling;
                    } else {
                        info!(
                            kind = ?piece.kind,
                            pieces = self.pieces_spawned,
                            lines = self.lines_cleared,
                            "spawn blocked, game over"
                        );
                        self.active = None;
                        self.state = EngineState::GameOver;
                        outcome.game_over = true;
                    }
                }
                EngineState::Falling | EngineState::GameOver => return,
            }
        }
    }

    /// Merge the active piece into the board at its current anchor.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        for (x, y) in piece.cells() {
            if let Err(err) = self.board.set(x, y, Some(piece.kind)) {
                // Only reachable for cells above the top row.
                trace!(%err, "cell dropped on lock");
            }
        }
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, "piece locked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScriptedRng, TopRowPolicy};
    use crate::types::PieceKind;

    fn engine_with(kinds: &[PieceKind]) -> Engine<ScriptedRng> {
        let script: Vec<u32> = kinds.iter().map(|k| k.type_id() as u32).collect();
        Engine::new(EngineConfig::default(), ScriptedRng::new(script)).unwrap()
    }

    #[test]
    fn test_new_engine_is_falling() {
        let engine = engine_with(&[PieceKind::T]);
        assert_eq!(engine.state(), EngineState::Falling);
        assert_eq!(engine.pieces_spawned(), 1);
        assert_eq!(engine.active().unwrap().kind, PieceKind::T);
        assert!(engine.board().is_empty());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = EngineConfig::default().with_dimensions(2, 20);
        assert!(Engine::new(config, SimpleRng::new(1)).is_err());
    }

    #[test]
    fn test_with_seed_is_deterministic() {
        let mut a = Engine::with_seed(42);
        let mut b = Engine::with_seed(42);
        for _ in 0..20 {
            a.tick(Command::HardDrop);
            b.tick(Command::HardDrop);
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.active(), b.active());
    }

    #[test]
    fn test_move_rejected_at_wall() {
        let mut engine = engine_with(&[PieceKind::O]);
        for _ in 0..10 {
            engine.tick(Command::MoveLeft);
        }
        assert_eq!(engine.active().unwrap().x, 0);
        engine.tick(Command::MoveLeft);
        assert_eq!(engine.active().unwrap().x, 0);
    }

    #[test]
    fn test_gravity_moves_down_then_locks() {
        let mut engine = engine_with(&[PieceKind::O, PieceKind::T]);
        for y in 1..=18 {
            let outcome = engine.gravity_step();
            assert!(!outcome.locked);
            assert_eq!(engine.active().unwrap().y, y);
        }
        let outcome = engine.gravity_step();
        assert!(outcome.locked);
        assert_eq!(outcome.lines_cleared, 0);
        assert_eq!(engine.cell_at(4, 19), Ok(Some(PieceKind::O)));
        assert_eq!(engine.active().unwrap().kind, PieceKind::T);
        assert_eq!(engine.active().unwrap().y, 0);
    }

    #[test]
    fn test_validated_rotation_is_rejected_into_wall() {
        let mut engine = engine_with(&[PieceKind::I]);
        // Vertical I occupies local column 2.
        engine.tick(Command::RotateCw);
        for _ in 0..10 {
            engine.tick(Command::MoveRight);
        }
        let before = *engine.active().unwrap();
        assert_eq!(before.x, 7); // column 9 is the rightmost cell
        engine.tick(Command::RotateCw);
        assert_eq!(*engine.active().unwrap(), before);
    }

    #[test]
    fn test_unchecked_rotation_applies_anyway() {
        let config = EngineConfig::default().with_rotation(RotationMode::Unchecked);
        let mut engine =
            Engine::new(config, ScriptedRng::new(vec![PieceKind::I.type_id() as u32])).unwrap();
        engine.tick(Command::RotateCw);
        for _ in 0..10 {
            engine.tick(Command::MoveRight);
        }
        engine.tick(Command::RotateCw);
        let piece = *engine.active().unwrap();
        assert_eq!(piece.x, 7);
        // Horizontal again, on local row 2: columns 7..=10.
        assert!(piece.is_occupied(10, 2));
        assert!(!engine.is_valid_placement(&piece));
    }

    #[test]
    fn test_check_rows_complete_counts_stack() {
        let mut engine = engine_with(&[PieceKind::T]);
        for y in 16..20 {
            for x in 0..10 {
                engine.board_mut().set(x, y, Some(PieceKind::I)).unwrap();
            }
        }
        engine.board_mut().set(0, 15, Some(PieceKind::J)).unwrap();
        assert_eq!(engine.check_rows_complete(), 4);
        assert_eq!(engine.cell_at(0, 19), Ok(Some(PieceKind::J)));
        assert_eq!(engine.board().occupied_count(), 1);
    }

    #[test]
    fn test_stale_policy_terminates_with_full_top_row() {
        let config = EngineConfig::default()
            .with_dimensions(4, 6)
            .with_top_row(TopRowPolicy::KeepStale);
        let mut engine = Engine::new(config, ScriptedRng::new(vec![2])).unwrap();
        for y in [0, 5] {
            for x in 0..4 {
                engine.board_mut().set(x, y, Some(PieceKind::S)).unwrap();
            }
        }
        // Row 5 clears, row 0 slides to row 1 and is emptied, then the scan
        // reaches row 1 and clears it too.
        assert_eq!(engine.check_rows_complete(), 2);
        assert!(engine.board().is_empty());
    }

    #[test]
    fn test_spawn_into_blocked_top_is_game_over() {
        let mut engine = engine_with(&[PieceKind::O]);
        for x in 0..10 {
            if x != 9 {
                engine.board_mut().set(x, 2, Some(PieceKind::Z)).unwrap();
            }
        }
        let outcome = engine.tick(Command::HardDrop);
        assert!(outcome.locked);
        assert!(outcome.game_over);
        assert_eq!(engine.state(), EngineState::GameOver);
        assert!(engine.active().is_none());
        assert!(engine.active_piece_cells().is_empty());

        let frozen = engine.board().clone();
        for cmd in [Command::MoveLeft, Command::RotateCw, Command::HardDrop] {
            let outcome = engine.tick(cmd);
            assert!(outcome.game_over);
            assert!(!outcome.locked);
        }
        assert!(engine.gravity_step().game_over);
        assert_eq!(engine.board(), &frozen);
    }

    #[test]
    fn test_set_active_rejects_overlap() {
        let mut engine = engine_with(&[PieceKind::T]);
        engine.board_mut().set(0, 19, Some(PieceKind::L)).unwrap();
        let blocked = ActivePiece::new(PieceKind::O, 10).with_anchor(-4, 18);
        assert!(!engine.set_active(blocked));
        let free = ActivePiece::new(PieceKind::O, 10).with_anchor(0, 18);
        assert!(engine.set_active(free));
        assert_eq!(engine.active().unwrap().kind, PieceKind::O);
    }

    #[test]
    fn test_snapshot_matches_engine() {
        let mut engine = engine_with(&[PieceKind::O, PieceKind::S]);
        engine.tick(Command::HardDrop);
        let snap = engine.snapshot();
        assert_eq!((snap.columns, snap.rows), (10, 20));
        assert_eq!(snap.board_cell(4, 19), PieceKind::O.color_index());
        assert_eq!(snap.active_kind, Some(PieceKind::S));
        assert_eq!(snap.active.len(), 4);
        assert_eq!(snap.pieces_spawned, 2);
        assert!(!snap.game_over);
    }
}
