//! The four discard piles and placement legality.

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::rules::{ASCENDING_START, DESCENDING_START, JUMP, PILE_COUNT};

pub type PileId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    pub id: PileId,
    #[serde(rename = "dir")]
    pub direction: Direction,
    /// Current top; a sentinel (1 or 100) until the first card lands.
    pub top: u8,
    /// Previous tops, oldest first. Display/undo only.
    pub history: Vec<u8>,
}

impl Pile {
    pub fn new(id: PileId, direction: Direction) -> Self {
        let top = match direction {
            Direction::Ascending => ASCENDING_START,
            Direction::Descending => DESCENDING_START,
        };
        Self {
            id,
            direction,
            top,
            history: Vec::new(),
        }
    }

    /// Put `card` on top. Callers check legality first.
    pub fn place(&mut self, card: Card) {
        self.history.push(self.top);
        self.top = card.value();
    }

    /// Cards that have left circulation onto this pile (sentinels excluded).
    pub fn played_cards(&self) -> impl Iterator<Item = u8> + '_ {
        self.history
            .iter()
            .copied()
            .chain(std::iter::once(self.top))
            .filter(|v| *v != ASCENDING_START && *v != DESCENDING_START)
    }
}

/// Piles 0 and 1 ascend from 1; piles 2 and 3 descend from 100.
pub fn initial_piles() -> Vec<Pile> {
    (0..PILE_COUNT)
        .map(|id| {
            let direction = if id < PILE_COUNT / 2 {
                Direction::Ascending
            } else {
                Direction::Descending
            };
            Pile::new(id, direction)
        })
        .collect()
}

/// Whether `pile` accepts `card`.
///
/// Ascending: strictly greater than the top, or exactly `top - 10`.
/// Descending: strictly less than the top, or exactly `top + 10`.
pub fn is_legal(card: Card, pile: &Pile) -> bool {
    let card = i16::from(card.value());
    let top = i16::from(pile.top);
    let jump = i16::from(JUMP);
    match pile.direction {
        Direction::Ascending => card > top || card == top - jump,
        Direction::Descending => card < top || card == top + jump,
    }
}

/// True iff some card in `hand` can go on some pile.
pub fn has_any_legal_move(hand: &[Card], piles: &[Pile]) -> bool {
    hand.iter()
        .any(|&card| piles.iter().any(|pile| is_legal(card, pile)))
}

/// Ids of the piles that accept `card`.
pub fn legal_piles(card: Card, piles: &[Pile]) -> Vec<PileId> {
    piles
        .iter()
        .filter(|pile| is_legal(card, pile))
        .map(|pile| pile.id)
        .collect()
}
