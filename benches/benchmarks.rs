use criterion::{Criterion, criterion_group, criterion_main};
use lantern_chess::game::Game;
use lantern_chess::pieces::PieceType;
use lantern_chess::square::Square;
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use std::hint::black_box;

// Random playouts have no draw rules to stop them, so cap the game length.
const MAX_PLIES: usize = 300;

fn all_legal_moves(game: &Game) -> Vec<(Square, Square)> {
    game.board()
        .pieces(game.turn())
        .into_iter()
        .flat_map(|(from, _)| game.legal_moves(from).into_iter().map(move |to| (from, to)))
        .collect()
}

fn play_random_move(game: &mut Game, rng: &mut StdRng) -> bool {
    let moves = all_legal_moves(game);
    let Some(&(from, to)) = moves.choose(rng) else {
        return false;
    };
    game.apply_move(from, to)
        .expect("enumerated legal move should apply");
    if game.pending_promotion().is_some() {
        game.choose_promotion(PieceType::Queen)
            .expect("queen promotion should succeed");
    }
    true
}

/// Play ~20 random moves on a fresh game to create a realistic mid-game
/// position. Uses a fixed seed for reproducibility across benchmark runs.
fn setup_midgame() -> Game {
    let mut game = Game::new();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        if game.status().is_terminal() || !play_random_move(&mut game, &mut rng) {
            break;
        }
    }
    game
}

// ---------------------------------------------------------------------------
// Microbenchmarks
// ---------------------------------------------------------------------------

fn bench_legal_moves(c: &mut Criterion) {
    let game = setup_midgame();
    c.bench_function("legal_moves", |b| {
        b.iter(|| black_box(all_legal_moves(&game)))
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let game = setup_midgame();
    let moves = all_legal_moves(&game);
    let &(from, to) = moves.first().expect("mid-game position should have moves");
    c.bench_function("apply_move", |b| {
        b.iter_batched(
            || game.clone(),
            |mut g| {
                black_box(g.apply_move(from, to)).expect("move should apply");
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_status(c: &mut Criterion) {
    let game = setup_midgame();
    c.bench_function("status", |b| b.iter(|| black_box(game.status())));
}

// ---------------------------------------------------------------------------
// Integration benchmarks
// ---------------------------------------------------------------------------

fn bench_random_playout(c: &mut Criterion) {
    c.bench_function("random_playout", |b| {
        b.iter(|| {
            let mut game = Game::new();
            let mut rng = StdRng::seed_from_u64(123);
            for _ in 0..MAX_PLIES {
                if game.status().is_terminal() || !play_random_move(&mut game, &mut rng) {
                    break;
                }
            }
            black_box(game.status())
        })
    });
}

criterion_group!(
    benches,
    bench_legal_moves,
    bench_apply_move,
    bench_status,
    bench_random_playout,
);
criterion_main!(benches);
