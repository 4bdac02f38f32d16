use crate::domain::state::{GameState, PlayerIndex, Status};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Explicit: a name was appended to the lobby roster.
    PlayerJoined { player: PlayerIndex },

    /// Edge-triggered: Lobby -> Playing.
    GameStarted,

    /// Edge-triggered: the turn passed to a specific player.
    TurnBecame { player: PlayerIndex },

    /// Edge-triggered: Playing -> Won.
    GameWon,

    /// Edge-triggered: Playing -> Lost.
    GameLost,
}

/// Derive transitions from before/after snapshots of the shared document.
pub fn derive_game_transitions(before: &GameState, after: &GameState) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Lobby roster growth
    if after.status == Status::Lobby {
        for player in before.players.len()..after.players.len() {
            transitions.push(GameTransition::PlayerJoined { player });
        }
    }

    // 2. Game start
    if before.status == Status::Lobby && after.status != Status::Lobby {
        transitions.push(GameTransition::GameStarted);
    }

    // 3. Turn change (an undo never moves the turn, so this is only end-turn)
    if after.status != Status::Lobby
        && before.status != Status::Lobby
        && before.current_player != after.current_player
    {
        transitions.push(GameTransition::TurnBecame {
            player: after.current_player,
        });
    }

    // 4. Terminal edges
    if before.status != Status::Won && after.status == Status::Won {
        transitions.push(GameTransition::GameWon);
    }
    if before.status != Status::Lost && after.status == Status::Lost {
        transitions.push(GameTransition::GameLost);
    }

    transitions
}
