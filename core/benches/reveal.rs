use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use sweeper_core::{Board, GameConfig};

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let tiers = [
        ("classic", GameConfig::CLASSIC),
        ("expert", GameConfig::new_unchecked((16, 30), 99)),
        ("dense", GameConfig::new_unchecked((64, 64), 3500)),
    ];

    for (name, config) in tiers {
        group.bench_function(name, |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                Board::seeded(black_box(config), seed)
            })
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    // no mines, a single reveal opens every cell
    let empty = Board::with_mines(255, 255, &[]).expect("empty board is valid");
    group.bench_function("empty_255x255", |b| {
        b.iter_batched(
            || empty.clone(),
            |mut board| board.reveal(black_box((127, 127))),
            BatchSize::LargeInput,
        )
    });

    let expert = Board::seeded(GameConfig::new_unchecked((16, 30), 99), 7).expect("valid config");
    group.bench_function("expert_sweep", |b| {
        b.iter_batched(
            || expert.clone(),
            |mut board| {
                for coords in board.iter_coords() {
                    if !board.is_mine(coords).unwrap_or(true) {
                        let _ = board.reveal(coords);
                    }
                }
                board
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, generate, flood_fill);
criterion_main!(benches);
