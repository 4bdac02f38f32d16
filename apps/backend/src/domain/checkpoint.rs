//! Turn-start checkpoint backing single-level undo.
//!
//! A checkpoint is a full copy of the game as it stood before the first play
//! of a turn. It belongs to the turn holder, is never published, and stops
//! applying once that turn is over.

use crate::domain::state::{GameState, PlayerIndex, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnCheckpoint {
    owner: PlayerIndex,
    state: GameState,
}

impl TurnCheckpoint {
    /// Capture `state` for its current turn holder.
    pub fn capture(state: &GameState) -> Self {
        Self {
            owner: state.current_player,
            state: state.clone(),
        }
    }

    pub fn owner(&self) -> PlayerIndex {
        self.owner
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Whether this checkpoint still describes the start of `current`'s turn.
    ///
    /// The same player must hold the turn, at least one card must have been
    /// played since, and no refill may have happened in between (a refill
    /// means the turn ended and came back around).
    pub fn applies_to(&self, current: &GameState) -> bool {
        current.status == Status::Playing
            && self.state.status == Status::Playing
            && current.current_player == self.owner
            && current.players == self.state.players
            && current.played_this_turn > 0
            && current.deck.len() == self.state.deck.len()
    }
}
