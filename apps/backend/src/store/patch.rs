use crate::domain::cards::Card;
use crate::domain::{GameResult, GameState, Pile, PlayerIndex, Status};

/// Partial update of a stored `GameState`.
///
/// `None` leaves a field as stored. `game_result` is doubly optional so a
/// patch can clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GamePatch {
    pub status: Option<Status>,
    pub players: Option<Vec<String>>,
    pub hands: Option<Vec<Vec<Card>>>,
    pub deck: Option<Vec<Card>>,
    pub piles: Option<Vec<Pile>>,
    pub current_player: Option<PlayerIndex>,
    pub played_this_turn: Option<u32>,
    pub game_result: Option<Option<GameResult>>,
}

impl GamePatch {
    /// Replace every field.
    pub fn full(state: &GameState) -> Self {
        Self {
            status: Some(state.status),
            players: Some(state.players.clone()),
            hands: Some(state.hands.clone()),
            deck: Some(state.deck.clone()),
            piles: Some(state.piles.clone()),
            current_player: Some(state.current_player),
            played_this_turn: Some(state.played_this_turn),
            game_result: Some(state.game_result),
        }
    }

    /// Only the fields that differ between `before` and `after`.
    pub fn diff(before: &GameState, after: &GameState) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }

        Self {
            status: changed(&before.status, &after.status),
            players: changed(&before.players, &after.players),
            hands: changed(&before.hands, &after.hands),
            deck: changed(&before.deck, &after.deck),
            piles: changed(&before.piles, &after.piles),
            current_player: changed(&before.current_player, &after.current_player),
            played_this_turn: changed(&before.played_this_turn, &after.played_this_turn),
            game_result: changed(&before.game_result, &after.game_result),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, state: &mut GameState) {
        if let Some(status) = self.status {
            state.status = status;
        }
        if let Some(players) = self.players {
            state.players = players;
        }
        if let Some(hands) = self.hands {
            state.hands = hands;
        }
        if let Some(deck) = self.deck {
            state.deck = deck;
        }
        if let Some(piles) = self.piles {
            state.piles = piles;
        }
        if let Some(current_player) = self.current_player {
            state.current_player = current_player;
        }
        if let Some(played) = self.played_this_turn {
            state.played_this_turn = played;
        }
        if let Some(result) = self.game_result {
            state.game_result = result;
        }
    }
}
