//! Per-player projection of the shared game.
//!
//! Everything a client renders is derived here from the published state:
//! the viewer's own hand with the piles each card may go on, the sizes of
//! the other hands, the turn banner inputs and the result.

use serde::Serialize;

use crate::domain::cards::Card;
use crate::domain::piles::{legal_piles, Pile, PileId};
use crate::domain::state::{GameResult, GameState, PlayerIndex, Status};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandCardView {
    pub card: Card,
    /// Empty when the card has nowhere to go right now.
    pub legal_piles: Vec<PileId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub status: Status,
    pub game_result: Option<GameResult>,
    pub players: Vec<String>,
    pub viewer: PlayerIndex,
    pub hand: Vec<HandCardView>,
    /// Card counts for every seat, the viewer included.
    pub hand_sizes: Vec<usize>,
    pub piles: Vec<Pile>,
    pub current_player: PlayerIndex,
    pub is_my_turn: bool,
    pub played_this_turn: u32,
    pub min_required: u32,
    pub deck_size: usize,
    pub cards_remaining: usize,
    /// Set by the coordinator when a turn-start checkpoint is held for the viewer.
    pub can_undo: bool,
}

impl PlayerView {
    pub fn for_player(state: &GameState, viewer: PlayerIndex) -> Result<Self, DomainError> {
        state.require_player(viewer)?;

        let hand = state
            .hands
            .get(viewer)
            .map(|cards| {
                cards
                    .iter()
                    .map(|&card| HandCardView {
                        card,
                        legal_piles: legal_piles(card, &state.piles),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let hand_sizes = (0..state.players.len())
            .map(|i| state.hands.get(i).map_or(0, Vec::len))
            .collect();

        Ok(Self {
            status: state.status,
            game_result: state.game_result,
            players: state.players.clone(),
            viewer,
            hand,
            hand_sizes,
            piles: state.piles.clone(),
            current_player: state.current_player,
            is_my_turn: state.status == Status::Playing && state.current_player == viewer,
            played_this_turn: state.played_this_turn,
            min_required: state.min_plays_required(),
            deck_size: state.deck.len(),
            cards_remaining: state.cards_remaining(),
            can_undo: false,
        })
    }

    pub fn with_undo_available(mut self, available: bool) -> Self {
        self.can_undo = available && self.is_my_turn;
        self
    }
}
