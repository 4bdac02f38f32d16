//! Builders for hand-crafted game states in domain tests.

use crate::domain::cards::{full_deck, shuffled_deck_with_seed, Card};
use crate::domain::piles::initial_piles;
use crate::domain::rules::ASCENDING_START;
use crate::domain::state::{GameState, Status};

pub fn cards(values: &[u8]) -> Vec<Card> {
    values.iter().map(|&v| Card::new(v).unwrap()).collect()
}

pub fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{i}")).collect()
}

/// Lobby with `n` seated players.
pub fn lobby(n: usize) -> GameState {
    let mut state = GameState::lobby("p0").unwrap();
    for i in 1..n {
        state.join(&format!("p{i}")).unwrap();
    }
    state
}

/// Lobby with `n` players started from a seeded deck.
pub fn started(n: usize, seed: u64) -> GameState {
    let mut state = lobby(n);
    state.start(shuffled_deck_with_seed(seed)).unwrap();
    state
}

/// A playing state with explicit hands, deck and pile tops.
///
/// Every card not mentioned is buried in pile 0's history so the card
/// conservation invariant still holds.
pub fn crafted(hands: &[&[u8]], deck: &[u8], tops: [u8; 4]) -> GameState {
    let mut piles = initial_piles();
    for (pile, top) in piles.iter_mut().zip(tops) {
        pile.top = top;
    }

    let hands: Vec<Vec<Card>> = hands.iter().map(|h| cards(h)).collect();
    let deck = cards(deck);

    let used: Vec<u8> = hands
        .iter()
        .flatten()
        .chain(deck.iter())
        .map(|c| c.value())
        .chain(tops.iter().copied())
        .collect();
    let buried: Vec<u8> = full_deck()
        .into_iter()
        .map(|c| c.value())
        .filter(|v| !used.contains(v))
        .collect();
    piles[0].history = std::iter::once(ASCENDING_START).chain(buried).collect();

    let state = GameState {
        status: Status::Playing,
        players: names(hands.len()),
        hands,
        deck,
        piles,
        current_player: 0,
        played_this_turn: 0,
        game_result: None,
    };
    state
        .check_invariants()
        .expect("crafted state must conserve cards");
    state
}
