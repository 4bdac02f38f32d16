// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::cards::{Card, MAX_CARD, MIN_CARD};
use crate::domain::piles::{Direction, Pile};
use crate::domain::rules::{ASCENDING_START, DESCENDING_START, MAX_PLAYERS, MIN_PLAYERS};

/// Shared config: enough cases to hit the jump boundaries, fast enough for CI.
pub fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

/// Generate a random Card
pub fn card() -> impl Strategy<Value = Card> {
    (MIN_CARD..=MAX_CARD).prop_map(|v| Card::new(v).unwrap())
}

pub fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Ascending), Just(Direction::Descending)]
}

/// A pile with any reachable top, sentinels included.
pub fn pile() -> impl Strategy<Value = Pile> {
    (direction(), ASCENDING_START..=DESCENDING_START).prop_map(|(direction, top)| Pile {
        id: 0,
        direction,
        top,
        history: Vec::new(),
    })
}

/// Four piles laid out like a live game (0,1 ascending; 2,3 descending).
pub fn piles() -> impl Strategy<Value = Vec<Pile>> {
    proptest::array::uniform4(ASCENDING_START..=DESCENDING_START).prop_map(|tops| {
        tops.iter()
            .enumerate()
            .map(|(id, &top)| Pile {
                id,
                direction: if id < 2 {
                    Direction::Ascending
                } else {
                    Direction::Descending
                },
                top,
                history: Vec::new(),
            })
            .collect()
    })
}

/// Up to 8 distinct cards.
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence((MIN_CARD..=MAX_CARD).collect::<Vec<u8>>(), 0..=8)
        .prop_map(|values| values.into_iter().map(|v| Card::new(v).unwrap()).collect())
}

pub fn player_count() -> impl Strategy<Value = usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}

pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}
