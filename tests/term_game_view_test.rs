use term_tetris::core::{GameSnapshot, ScriptedRng};
use term_tetris::engine::{Engine, EngineConfig};
use term_tetris::term::{encode_diff_into, BoardOrigin, GameView, Viewport};
use term_tetris::types::{Command, PieceCell, PieceKind};

fn ch(fb: &term_tetris::term::FrameBuffer, x: u16, y: u16) -> char {
    fb.get(x, y).unwrap().ch
}

#[test]
fn term_view_draws_walls_beside_every_row() {
    let snap = GameSnapshot::default();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, vp);

    let origin = view.origin(&snap, vp);
    assert_eq!(origin, BoardOrigin { x: 30, y: 2 });

    for y in 2..22 {
        assert_eq!(ch(&fb, 26, y), '╟');
        assert_eq!(ch(&fb, 27, y), '╳');
        assert_eq!(ch(&fb, 28, y), '╢');
        assert_eq!(ch(&fb, 50, y), '╟');
        assert_eq!(ch(&fb, 52, y), '╢');
    }
    assert_eq!(ch(&fb, 26, 22), '╚');
    assert_eq!(ch(&fb, 26, 1), '╔');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board[19 * 10] = PieceKind::Z.color_index();

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));

    assert_eq!(ch(&fb, 30, 21), '█');
    assert_eq!(ch(&fb, 31, 21), '▋');
    assert_eq!(ch(&fb, 32, 21), ' ');
}

#[test]
fn term_view_colors_active_piece() {
    let engine = Engine::new(
        EngineConfig::default(),
        ScriptedRng::new(vec![PieceKind::O.type_id() as u32]),
    )
    .unwrap();
    let snap = engine.snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));

    // O spawns at columns 4..=5, screen x = 30 + 2 * column.
    let cell = fb.get(38, 2).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!(
        Some(cell.style),
        term_tetris::term::color_style(PieceKind::O.color_index())
    );
    assert_eq!(ch(&fb, 40, 3), '█');
}

#[test]
fn term_view_clips_cells_above_board() {
    let mut snap = GameSnapshot::default();
    snap.active.push(PieceCell {
        x: 0,
        y: -1,
        kind: PieceKind::I,
    });

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));

    // Row above the board holds the top wall, untouched by the piece.
    assert_eq!(ch(&fb, 30, 1), '═');
}

#[test]
fn term_view_shows_legend_when_wide_enough() {
    let snap = GameSnapshot::default();

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));
    assert!(fb.row_string(16).contains("│ W │─ drop"));

    let fb = GameView::new()
        .with_legend(false)
        .render(&snap, Viewport::new(80, 24));
    assert!(!fb.row_string(16).contains('W'));
}

#[test]
fn term_view_game_over_banner() {
    let mut snap = GameSnapshot::default();
    snap.game_over = true;

    let fb = GameView::default().render(&snap, Viewport::new(80, 24));

    assert!(fb.row_string(12).contains("GAME OVER"));
    assert!(fb.row_string(13).contains("q to quit"));
}

#[test]
fn term_view_tiny_viewport_does_not_panic() {
    let snap = GameSnapshot::default();
    let fb = GameView::default().render(&snap, Viewport::new(10, 5));
    assert_eq!((fb.width(), fb.height()), (10, 5));
}

#[test]
fn term_view_diff_after_move_is_small() {
    let mut engine = Engine::new(EngineConfig::default(), ScriptedRng::new(vec![3])).unwrap();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let before = view.render(&engine.snapshot(), vp);
    engine.tick(Command::MoveLeft);
    let after = view.render(&engine.snapshot(), vp);

    let mut out = Vec::new();
    encode_diff_into(&before, &after, &mut out).unwrap();
    assert!(!out.is_empty());

    let mut same = Vec::new();
    encode_diff_into(&after, &after, &mut same).unwrap();
    assert!(same.len() < out.len());
}
