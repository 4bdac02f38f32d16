use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, DECK_SIZE, MAX_CARD, MIN_CARD};
use crate::domain::checkpoint::TurnCheckpoint;
use crate::domain::dealing::deal;
use crate::domain::piles::{has_any_legal_move, initial_piles, is_legal, Pile, PileId};
use crate::domain::rules::{
    hand_size, min_plays_required, player_count_range, MAX_NAME_LEN, MAX_PLAYERS, PILE_COUNT,
};
use crate::errors::domain::DomainError;

pub type PlayerIndex = usize;

/// Room/game progression. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Lobby,
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Won | Status::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    Won,
    Lost,
}

/// Result of a successful `play_card`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Placed { card: Card, pile: PileId },
    /// Deck and every hand are empty after this play.
    Won { card: Card, pile: PileId },
}

/// Result of a successful `end_turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Advanced { next: PlayerIndex, drawn: usize },
    /// The next player has no legal placement for any card.
    Deadlocked { next: PlayerIndex, drawn: usize },
}

/// The shared game document, in the shape every client observes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub status: Status,
    /// Seated names; the index is the player's identity.
    pub players: Vec<String>,
    pub hands: Vec<Vec<Card>>,
    /// Undealt cards; draws come off the front.
    pub deck: Vec<Card>,
    /// Empty in the lobby, the four piles afterwards.
    pub piles: Vec<Pile>,
    pub current_player: PlayerIndex,
    pub played_this_turn: u32,
    pub game_result: Option<GameResult>,
}

impl GameState {
    /// Fresh lobby with the host seated at index 0.
    pub fn lobby(host: &str) -> Result<Self, DomainError> {
        Ok(Self {
            status: Status::Lobby,
            players: vec![validate_name(host)?],
            hands: Vec::new(),
            deck: Vec::new(),
            piles: Vec::new(),
            current_player: 0,
            played_this_turn: 0,
            game_result: None,
        })
    }

    /// Seat a new player; returns their index.
    pub fn join(&mut self, name: &str) -> Result<PlayerIndex, DomainError> {
        if self.status != Status::Lobby {
            return Err(DomainError::AlreadyStarted);
        }
        let name = validate_name(name)?;
        if self.players.len() >= MAX_PLAYERS {
            return Err(DomainError::InvalidPlayerCount(self.players.len() + 1));
        }
        self.players.push(name);
        Ok(self.players.len() - 1)
    }

    /// Deal `deck` to the seated players and open play with player 0.
    ///
    /// `deck` must be a full 98-card deck, already shuffled by the caller.
    pub fn start(&mut self, deck: Vec<Card>) -> Result<(), DomainError> {
        if self.status != Status::Lobby {
            return Err(DomainError::AlreadyStarted);
        }
        let n = self.players.len();
        if !player_count_range().contains(&n) {
            return Err(DomainError::InvalidPlayerCount(n));
        }
        if deck.len() != DECK_SIZE {
            return Err(DomainError::InvariantViolation(format!(
                "start needs a full deck, got {} cards",
                deck.len()
            )));
        }

        let (hands, deck) = deal(deck, n)?;
        self.hands = hands;
        self.deck = deck;
        self.piles = initial_piles();
        self.current_player = 0;
        self.played_this_turn = 0;
        self.game_result = None;
        self.status = Status::Playing;
        Ok(())
    }

    /// Place the card at `card_index` of `player`'s hand onto `pile`.
    pub fn play_card(
        &mut self,
        player: PlayerIndex,
        card_index: usize,
        pile: PileId,
    ) -> Result<PlayOutcome, DomainError> {
        self.require_playing()?;
        self.require_turn(player)?;

        let hand = &self.hands[player];
        let card = *hand
            .get(card_index)
            .ok_or(DomainError::CardIndexOutOfRange {
                index: card_index,
                hand_len: hand.len(),
            })?;
        let target = self.piles.get(pile).ok_or(DomainError::UnknownPile(pile))?;
        if !is_legal(card, target) {
            return Err(DomainError::IllegalMove {
                card: card.value(),
                pile,
                top: target.top,
            });
        }

        self.hands[player].remove(card_index);
        self.piles[pile].place(card);
        self.played_this_turn += 1;

        if self.deck.is_empty() && self.hands.iter().all(Vec::is_empty) {
            self.status = Status::Won;
            self.game_result = Some(GameResult::Won);
            return Ok(PlayOutcome::Won { card, pile });
        }
        Ok(PlayOutcome::Placed { card, pile })
    }

    /// Close `player`'s turn: refill, pass the turn, then check the next
    /// player for deadlock.
    pub fn end_turn(&mut self, player: PlayerIndex) -> Result<TurnOutcome, DomainError> {
        self.require_playing()?;
        self.require_turn(player)?;

        let required = self.min_plays_required();
        if self.played_this_turn < required {
            return Err(DomainError::BelowMinimumPlays {
                played: self.played_this_turn,
                required,
            });
        }

        let drawn = (self.played_this_turn as usize).min(self.deck.len());
        let refill: Vec<Card> = self.deck.drain(..drawn).collect();
        self.hands[player].extend(refill);

        let next = (player + 1) % self.players.len();
        self.current_player = next;
        self.played_this_turn = 0;

        if !has_any_legal_move(&self.hands[next], &self.piles) {
            self.status = Status::Lost;
            self.game_result = Some(GameResult::Lost);
            return Ok(TurnOutcome::Deadlocked { next, drawn });
        }
        Ok(TurnOutcome::Advanced { next, drawn })
    }

    /// Roll the whole state back to the turn-start checkpoint.
    ///
    /// The checkpoint must have been taken during `player`'s current turn.
    pub fn undo(
        &mut self,
        player: PlayerIndex,
        checkpoint: Option<TurnCheckpoint>,
    ) -> Result<(), DomainError> {
        self.require_playing()?;
        self.require_turn(player)?;

        let checkpoint = checkpoint
            .filter(|c| c.applies_to(self))
            .ok_or(DomainError::NoSnapshotAvailable)?;
        *self = checkpoint.into_state();
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn min_plays_required(&self) -> u32 {
        min_plays_required(self.players.len(), self.deck.is_empty())
    }

    /// Deck plus every hand.
    pub fn cards_remaining(&self) -> usize {
        self.deck.len() + self.hands.iter().map(Vec::len).sum::<usize>()
    }

    pub fn require_playing(&self) -> Result<(), DomainError> {
        if self.status != Status::Playing {
            return Err(DomainError::GameNotInProgress(self.status));
        }
        Ok(())
    }

    pub fn require_player(&self, player: PlayerIndex) -> Result<(), DomainError> {
        if player >= self.players.len() {
            return Err(DomainError::UnknownPlayer(player));
        }
        Ok(())
    }

    pub fn require_turn(&self, player: PlayerIndex) -> Result<(), DomainError> {
        self.require_player(player)?;
        if player != self.current_player {
            return Err(DomainError::NotYourTurn {
                player,
                current: self.current_player,
            });
        }
        Ok(())
    }

    pub fn require_host(&self, player: PlayerIndex) -> Result<(), DomainError> {
        self.require_player(player)?;
        if player != 0 {
            return Err(DomainError::NotHost(player));
        }
        Ok(())
    }

    /// Verify every structural invariant of the shared document.
    ///
    /// Lobby documents only need a valid roster; dealt games must conserve
    /// all 98 cards across deck, hands and piles.
    pub fn check_invariants(&self) -> Result<(), DomainError> {
        let violation = |msg: String| Err(DomainError::InvariantViolation(msg));

        let n = self.players.len();
        if !player_count_range().contains(&n) {
            return violation(format!("{n} players seated"));
        }
        if self.current_player >= n {
            return violation(format!(
                "current player {} out of range for {n} players",
                self.current_player
            ));
        }
        let result_matches = match self.status {
            Status::Lobby | Status::Playing => self.game_result.is_none(),
            Status::Won => self.game_result == Some(GameResult::Won),
            Status::Lost => self.game_result == Some(GameResult::Lost),
        };
        if !result_matches {
            return violation(format!(
                "status {:?} disagrees with result {:?}",
                self.status, self.game_result
            ));
        }

        if self.status == Status::Lobby {
            if !self.hands.is_empty() || !self.deck.is_empty() || !self.piles.is_empty() {
                return violation("lobby already holds cards".to_string());
            }
            return Ok(());
        }

        if self.hands.len() != n {
            return violation(format!("{} hands for {n} players", self.hands.len()));
        }
        if self.piles.len() != PILE_COUNT
            || self.piles.iter().enumerate().any(|(i, p)| p.id != i)
        {
            return violation("piles must be ids 0..4".to_string());
        }

        let mut seen = [false; MAX_CARD as usize + 1];
        let in_circulation = self
            .deck
            .iter()
            .chain(self.hands.iter().flatten())
            .map(|c| c.value());
        let on_piles = self.piles.iter().flat_map(Pile::played_cards);
        for value in in_circulation.chain(on_piles) {
            if !(MIN_CARD..=MAX_CARD).contains(&value) {
                return violation(format!("card {value} outside the deck"));
            }
            let slot = &mut seen[value as usize];
            if *slot {
                return violation(format!("card {value} appears twice"));
            }
            *slot = true;
        }
        if let Some(missing) = (MIN_CARD..=MAX_CARD).find(|v| !seen[*v as usize]) {
            return violation(format!("card {missing} is missing"));
        }

        if self.status == Status::Won && self.cards_remaining() != 0 {
            return violation("won with cards left".to_string());
        }
        Ok(())
    }

    /// Hand size a table of this size was dealt.
    pub fn dealt_hand_size(&self) -> Option<usize> {
        hand_size(self.players.len())
    }
}

fn validate_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidPlayerName("name is empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidPlayerName(format!(
            "name longer than {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}
