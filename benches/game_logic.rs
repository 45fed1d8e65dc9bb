use criterion::{black_box, criterion_group, criterion_main, Criterion};
use term_tetris::core::{canonical, rotate_cw, ActivePiece, Board, GameSnapshot};
use term_tetris::engine::Engine;
use term_tetris::term::{FrameBuffer, GameView, Viewport};
use term_tetris::types::{Command, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut engine = Engine::with_seed(12345);

    c.bench_function("tick_move", |b| {
        b.iter(|| {
            engine.tick(black_box(Command::MoveLeft));
            engine.tick(black_box(Command::MoveRight));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            for y in 16..20 {
                for x in 0..10 {
                    let _ = board.set(x, y, Some(PieceKind::I));
                }
            }
            for _ in 0..4 {
                let _ = board.clear_row(19);
            }
            board
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop_until_game_over", |b| {
        b.iter(|| {
            let mut engine = Engine::with_seed(black_box(7));
            while !engine.is_game_over() {
                engine.tick(Command::HardDrop);
            }
            engine.pieces_spawned()
        })
    });
}

fn bench_valid_placement(c: &mut Criterion) {
    let engine = Engine::with_seed(12345);
    let piece = ActivePiece::new(PieceKind::T, 10).with_anchor(0, 10);

    c.bench_function("is_valid_placement", |b| {
        b.iter(|| engine.is_valid_placement(black_box(&piece)))
    });
}

fn bench_rotate(c: &mut Criterion) {
    let shape = canonical(PieceKind::I);

    c.bench_function("rotate_cw", |b| b.iter(|| rotate_cw(black_box(&shape))));
}

fn bench_render(c: &mut Criterion) {
    let engine = Engine::with_seed(12345);
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 24);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_valid_placement,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
