//! Benchmarks for the movement core.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ludo::game::{resolve, Board};
use ludo::TurnEngine;

fn bench_resolve(c: &mut Criterion) {
    let board = Board::from_records("L 4 14 L 9 31 S 17 7 S 54 34 E").expect("valid board");
    c.bench_function("resolve_plain", |b| {
        b.iter(|| resolve(&board, black_box(10), black_box(5), |_| false));
    });

    let loop_board = Board::from_records("L 3 7 S 7 3 E").expect("valid board");
    c.bench_function("resolve_cycle_guard", |b| {
        b.iter(|| resolve(&loop_board, black_box(1), black_box(2), |_| false));
    });
}

fn bench_full_game(c: &mut Criterion) {
    let board = Board::from_records("L 4 14 L 9 31 L 40 59 S 17 7 S 54 34 S 93 73 E")
        .expect("valid board");
    c.bench_function("full_game_4_players", |b| {
        b.iter(|| {
            let mut engine =
                TurnEngine::new(board.clone(), 4, black_box(42)).expect("valid player count");
            while engine.advance().is_some() {}
            engine.turns_played()
        });
    });
}

fn bench_board_parse(c: &mut Criterion) {
    let text = "L 4 14 L 9 31 L 20 38 L 28 84 S 17 7 S 54 34 S 62 19 S 87 24 E";
    c.bench_function("board_parse", |b| {
        b.iter(|| Board::from_records(black_box(text)).expect("valid board"));
    });
}

criterion_group!(benches, bench_resolve, bench_full_game, bench_board_parse);
criterion_main!(benches);
