//! Error codes for the game backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the game backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn and move validation
    /// Mutation attempted by a player who does not hold the turn
    NotYourTurn,
    /// Pile does not accept the card
    IllegalMove,
    /// Turn ended before the minimum number of plays
    BelowMinimumPlays,
    /// Player count outside 1..=5
    InvalidPlayerCount,
    /// Start or join after the lobby closed
    AlreadyStarted,
    /// Undo with nothing to revert
    NoSnapshotAvailable,
    /// Game is in the lobby or already finished
    GameNotInProgress,
    /// Card index does not address a card in hand
    CardIndexOutOfRange,
    /// Pile id outside 0..4
    UnknownPile,
    /// Player index not seated in the room
    UnknownPlayer,
    /// Player name empty or too long
    InvalidPlayerName,
    /// Only the host may start the room
    NotHost,
    /// Card value outside 2..=99
    InvalidCard,

    // Request validation
    /// Malformed room code
    InvalidRoomCode,
    /// Invalid or missing HTTP header
    InvalidHeader,
    /// General bad request error
    BadRequest,

    // Resource not found
    /// Room document does not exist
    RoomNotFound,

    // Conflicts
    /// Room code already in use
    RoomCodeConflict,
    /// Optimistic lock conflict
    OptimisticLock,

    // System errors
    /// Internal server error
    InternalError,
    /// Configuration error
    ConfigError,
    /// Stored state breaks a game invariant
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::BelowMinimumPlays => "BELOW_MINIMUM_PLAYS",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::AlreadyStarted => "ALREADY_STARTED",
            Self::NoSnapshotAvailable => "NO_SNAPSHOT_AVAILABLE",
            Self::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            Self::CardIndexOutOfRange => "CARD_INDEX_OUT_OF_RANGE",
            Self::UnknownPile => "UNKNOWN_PILE",
            Self::UnknownPlayer => "UNKNOWN_PLAYER",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::NotHost => "NOT_HOST",
            Self::InvalidCard => "INVALID_CARD",

            Self::InvalidRoomCode => "INVALID_ROOM_CODE",
            Self::InvalidHeader => "INVALID_HEADER",
            Self::BadRequest => "BAD_REQUEST",

            Self::RoomNotFound => "ROOM_NOT_FOUND",

            Self::RoomCodeConflict => "ROOM_CODE_CONFLICT",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",

            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
