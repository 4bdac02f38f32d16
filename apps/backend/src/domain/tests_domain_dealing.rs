use std::collections::HashSet;

use crate::domain::cards::{shuffled_deck_with_seed, DECK_SIZE};
use crate::domain::piles::{Direction, Pile};
use crate::domain::rules::hand_size;
use crate::domain::state::Status;
use crate::domain::test_state_helpers::{lobby, started};
use crate::errors::domain::DomainError;

#[test]
fn start_deals_disjoint_hands_for_every_table_size() {
    for n in 1..=5 {
        let state = started(n, 42 + n as u64);
        let size = hand_size(n).unwrap();

        assert_eq!(state.status, Status::Playing);
        assert_eq!(state.hands.len(), n);
        assert!(state.hands.iter().all(|h| h.len() == size), "n={n}");

        let mut seen = HashSet::new();
        for card in state.hands.iter().flatten().chain(state.deck.iter()) {
            assert!(seen.insert(card.value()), "duplicate {card} for n={n}");
        }
        assert_eq!(seen.len(), DECK_SIZE);
    }
}

#[test]
fn start_opens_fresh_piles_with_player_zero() {
    let state = started(3, 9);
    assert_eq!(state.current_player, 0);
    assert_eq!(state.played_this_turn, 0);
    assert_eq!(state.game_result, None);
    assert_eq!(
        state.piles,
        vec![
            Pile::new(0, Direction::Ascending),
            Pile::new(1, Direction::Ascending),
            Pile::new(2, Direction::Descending),
            Pile::new(3, Direction::Descending),
        ]
    );
}

#[test]
fn hands_come_off_the_front_of_the_deck() {
    let deck = shuffled_deck_with_seed(5);
    let mut state = lobby(2);
    state.start(deck.clone()).unwrap();

    assert_eq!(state.hands[0], deck[0..7]);
    assert_eq!(state.hands[1], deck[7..14]);
    assert_eq!(state.deck, deck[14..]);
}

#[test]
fn start_rejects_short_deck() {
    let mut deck = shuffled_deck_with_seed(5);
    deck.pop();
    let mut state = lobby(2);
    assert!(matches!(
        state.start(deck),
        Err(DomainError::InvariantViolation(_))
    ));
    assert_eq!(state.status, Status::Lobby);
}

#[test]
fn same_seed_deals_same_game() {
    assert_eq!(started(4, 77), started(4, 77));
    assert_ne!(started(4, 77), started(4, 78));
}
