use criterion::{black_box, criterion_group, criterion_main, Criterion};

use memory_match::core::{CardId, GameConfig, GameRng};
use memory_match::deck::Deck;
use memory_match::session::GameSession;

fn bench_deal(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut rng = GameRng::new(42);

    c.bench_function("deal_default_board", |b| {
        b.iter(|| Deck::shuffled(black_box(&config.symbols), &mut rng))
    });
}

fn bench_full_game(c: &mut Criterion) {
    c.bench_function("play_default_board", |b| {
        b.iter(|| {
            let mut game = GameSession::new(GameConfig::default(), 7, ()).unwrap();
            for i in 0..8u32 {
                game.select(CardId(i)).unwrap();
                game.select(CardId(i + 8)).unwrap();
            }
            black_box(game.is_game_over())
        })
    });
}

criterion_group!(benches, bench_deal, bench_full_game);
criterion_main!(benches);
