use criterion::{black_box, criterion_group, criterion_main, Criterion};
use srs_tetris::core::line_clear::{collapse, detect};
use srs_tetris::core::{rotate, Board, GameSnapshot, GameState, Randomizer, Tetromino};
use srs_tetris::types::{Direction, GameConfig, GameMode, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(GameMode::Zen);

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if !state.tick(black_box(16)) {
                state.start(GameMode::Zen);
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut rows = vec![".........."; 20];
    rows.extend(["##########"; 4]);
    let board = Board::from_ascii(&rows);

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let full = detect(black_box(&board));
            collapse(&board, &full)
        })
    });
}

fn bench_randomizer(c: &mut Criterion) {
    let mut randomizer = Randomizer::new(12345);

    c.bench_function("bag_draw", |b| b.iter(|| randomizer.next()));
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(GameMode::Zen);
    let mut right = true;

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            let direction = if right { Direction::Right } else { Direction::Left };
            if !state.move_piece(direction) {
                right = !right;
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::from_config(&GameConfig::default());
    let piece = Tetromino::spawn(PieceKind::T, &GameConfig::default());

    c.bench_function("srs_rotate", |b| {
        b.iter(|| rotate(black_box(&piece), true, &board))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(GameMode::Classic);
    let mut snapshot = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| state.snapshot_into(black_box(&mut snapshot)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_randomizer,
    bench_move,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
