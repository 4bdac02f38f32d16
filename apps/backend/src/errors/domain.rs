//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and store-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! Every variant is a local validation failure: the operation that produced
//! it left the game state untouched and nothing was published.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::state::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A mutation was attempted by someone other than the turn holder.
    NotYourTurn { player: usize, current: usize },
    /// The pile does not accept the card.
    IllegalMove { card: u8, pile: usize, top: u8 },
    /// Ending the turn before the minimum number of plays.
    BelowMinimumPlays { played: u32, required: u32 },
    /// Starting (or joining) with a player count outside 1..=5.
    InvalidPlayerCount(usize),
    /// Start or join after the lobby has closed.
    AlreadyStarted,
    /// Undo with no turn-start checkpoint to restore.
    NoSnapshotAvailable,
    /// Play, undo or end-turn outside of the `playing` status.
    GameNotInProgress(Status),
    CardIndexOutOfRange { index: usize, hand_len: usize },
    UnknownPile(usize),
    UnknownPlayer(usize),
    InvalidPlayerName(String),
    /// Only the room host (player 0) may start the game.
    NotHost(usize),
    /// A value outside 2..=99 used as a card.
    InvalidCard(u8),
    /// A state that breaks a game invariant (card conservation, turn bounds, ...).
    InvariantViolation(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NotYourTurn { player, current } => {
                write!(f, "not your turn: player {player} acted, player {current} holds the turn")
            }
            DomainError::IllegalMove { card, pile, top } => {
                write!(f, "illegal move: pile {pile} (top {top}) does not accept {card}")
            }
            DomainError::BelowMinimumPlays { played, required } => {
                write!(f, "below minimum plays: played {played}, need at least {required}")
            }
            DomainError::InvalidPlayerCount(n) => {
                write!(f, "invalid player count: {n} (allowed 1..=5)")
            }
            DomainError::AlreadyStarted => write!(f, "game already started"),
            DomainError::NoSnapshotAvailable => write!(f, "nothing to undo this turn"),
            DomainError::GameNotInProgress(status) => {
                write!(f, "game not in progress (status {status:?})")
            }
            DomainError::CardIndexOutOfRange { index, hand_len } => {
                write!(f, "card index {index} out of range for hand of {hand_len}")
            }
            DomainError::UnknownPile(id) => write!(f, "unknown pile {id}"),
            DomainError::UnknownPlayer(idx) => write!(f, "unknown player {idx}"),
            DomainError::InvalidPlayerName(reason) => write!(f, "invalid player name: {reason}"),
            DomainError::NotHost(idx) => write!(f, "player {idx} is not the host"),
            DomainError::InvalidCard(v) => write!(f, "invalid card value {v}"),
            DomainError::InvariantViolation(s) => write!(f, "invariant violated: {s}"),
        }
    }
}

impl Error for DomainError {}
