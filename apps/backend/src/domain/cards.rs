//! Card domain: the 98 numbered cards and deck shuffling.

use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

pub const MIN_CARD: u8 = 2;
pub const MAX_CARD: u8 = 99;
pub const DECK_SIZE: usize = (MAX_CARD - MIN_CARD + 1) as usize;

/// A numbered card in `2..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (MIN_CARD..=MAX_CARD).contains(&value) {
            Ok(Card(value))
        } else {
            Err(DomainError::InvalidCard(value))
        }
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Card {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Card::new(value)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All 98 cards in ascending order.
pub fn full_deck() -> Vec<Card> {
    (MIN_CARD..=MAX_CARD).map(Card).collect()
}

/// Shuffle the full deck with the given RNG (Fisher-Yates via `SliceRandom`).
pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = full_deck();
    deck.shuffle(rng);
    deck
}

/// Uniformly random permutation of the 98 cards from the thread RNG.
pub fn build_shuffled_deck() -> Vec<Card> {
    shuffled_deck(&mut rand::rng())
}

/// Deterministic shuffle for a given seed.
pub fn shuffled_deck_with_seed(seed: u64) -> Vec<Card> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    shuffled_deck(&mut rng)
}
