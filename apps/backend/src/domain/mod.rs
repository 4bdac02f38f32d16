//! Domain layer: pure game logic types and helpers.

pub mod cards;
pub mod checkpoint;
pub mod dealing;
pub mod game_transition;
pub mod piles;
pub mod player_view;
pub mod rules;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_domain_dealing;
#[cfg(test)]
mod tests_game_flow;
#[cfg(test)]
mod tests_props_consistency;

// Re-exports for ergonomics
pub use cards::{build_shuffled_deck, shuffled_deck_with_seed, Card};
pub use checkpoint::TurnCheckpoint;
pub use dealing::deal;
pub use piles::{has_any_legal_move, is_legal, Direction, Pile, PileId};
pub use player_view::PlayerView;
pub use rules::hand_size;
pub use state::{GameResult, GameState, PlayOutcome, PlayerIndex, Status, TurnOutcome};
