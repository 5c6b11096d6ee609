//! Property tests over random play.

use std::time::Duration;

use proptest::prelude::*;

use memory_match::controller::{Selection, TurnPhase};
use memory_match::core::{CardId, CardState, GameConfig, GameRng, Symbol};
use memory_match::deck::Deck;
use memory_match::session::GameSession;

#[derive(Clone, Debug)]
enum Op {
    Select(u32),
    Advance(u64),
    Reset,
}

fn op_strategy(card_count: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (0..card_count + 1).prop_map(Op::Select),
        3 => (0u64..1500).prop_map(Op::Advance),
        1 => Just(Op::Reset),
    ]
}

fn symbols(n: usize) -> Vec<Symbol> {
    (0..n).map(|i| Symbol::new(format!("s{}", i))).collect()
}

proptest! {
    #[test]
    fn prop_build_has_two_per_symbol(n in 1usize..24) {
        let deck = Deck::build(&symbols(n)).unwrap();
        prop_assert_eq!(deck.len(), 2 * n);
        for symbol in symbols(n) {
            prop_assert_eq!(deck.cards().filter(|c| c.symbol == symbol).count(), 2);
        }
    }

    #[test]
    fn prop_shuffle_is_permutation(n in 1usize..24, seed in any::<u64>()) {
        let set = symbols(n);
        let mut deck = Deck::build(&set).unwrap();
        deck.shuffle(&mut GameRng::new(seed));

        let mut ids: Vec<CardId> = deck.ids().collect();
        ids.sort();
        let expected: Vec<CardId> = (0..(2 * n) as u32).map(CardId).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn prop_session_invariants(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(8), 1..200),
    ) {
        let config = GameConfig::new().with_symbols(["a", "b", "c", "d"]);
        let mut game = GameSession::with_event_log(config, seed).unwrap();
        let mut finished_games = 0usize;
        let mut last_moves = 0u32;

        for op in ops {
            let moves_before = game.scoreboard().moves();
            let matched_before: Vec<CardId> = game
                .deck()
                .cards()
                .filter(|c| c.state == CardState::Matched)
                .map(|c| c.id)
                .collect();

            match op {
                Op::Select(raw) => {
                    let selection = game.select(CardId(raw)).unwrap();
                    if selection.is_rejected() || matches!(selection, Selection::Flipped(_)) {
                        prop_assert_eq!(game.scoreboard().moves(), moves_before);
                    } else {
                        prop_assert_eq!(game.scoreboard().moves(), moves_before + 1);
                    }
                    if let Selection::Matched { game_over: true, .. } = selection {
                        finished_games += 1;
                    }
                    for id in &matched_before {
                        prop_assert_eq!(game.deck().state(*id), Some(CardState::Matched));
                    }
                }
                Op::Advance(ms) => {
                    game.advance(Duration::from_millis(ms)).unwrap();
                    prop_assert_eq!(game.scoreboard().moves(), moves_before);
                    for id in &matched_before {
                        prop_assert_eq!(game.deck().state(*id), Some(CardState::Matched));
                    }
                }
                Op::Reset => {
                    game.reset().unwrap();
                    last_moves = 0;
                }
            }

            let moves = game.scoreboard().moves();
            prop_assert!(moves >= last_moves);
            last_moves = moves;

            let matches = game.scoreboard().matches();
            prop_assert_eq!(matches as usize, game.deck().matched_pairs());
            prop_assert!(matches as usize <= game.deck().pair_count());

            let showing: Vec<CardId> = game
                .deck()
                .cards()
                .filter(|c| c.state == CardState::Showing)
                .map(|c| c.id)
                .collect();
            match game.phase() {
                TurnPhase::Idle | TurnPhase::GameOver => prop_assert!(showing.is_empty()),
                TurnPhase::OneFlipped { pending } => prop_assert_eq!(showing, vec![pending]),
                TurnPhase::Resolving { first, second } => {
                    prop_assert_eq!(showing.len(), 2);
                    prop_assert!(showing.contains(&first) && showing.contains(&second));
                    prop_assert!(game.is_revealing());
                }
            }

            prop_assert_eq!(game.is_game_over(), game.deck().is_complete());
            prop_assert_eq!(game.observer().game_over_count(), finished_games);
        }
    }
}
