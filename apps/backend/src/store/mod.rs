//! Shared-document store for room state.
//!
//! Every room is one `GameDocument` keyed by its room code. Writes merge a
//! `GamePatch` into the stored state and bump the document version; every
//! committed document is pushed to subscribers, the writer included.

pub mod memory;
pub mod patch;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::GameState;
use crate::utils::room_code::RoomCode;
use crate::AppError;

pub use memory::MemoryStore;
pub use patch::GamePatch;

/// A stored room: the game state plus its write counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameDocument {
    pub version: u64,
    pub state: GameState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePrecondition {
    /// Overwrite whatever is stored.
    None,
    /// Only write if the stored version still equals this one.
    IfVersion(u64),
}

/// How the coordinator guards its writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Unconditional writes; a racing write silently wins.
    LastWriteWins,
    /// Every write is conditional on the version that was read.
    #[default]
    Versioned,
}

impl WritePolicy {
    pub fn precondition(self, read_version: u64) -> WritePrecondition {
        match self {
            WritePolicy::LastWriteWins => WritePrecondition::None,
            WritePolicy::Versioned => WritePrecondition::IfVersion(read_version),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WritePolicy::LastWriteWins => "last_write_wins",
            WritePolicy::Versioned => "versioned",
        }
    }
}

impl FromStr for WritePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_write_wins" | "lww" => Ok(WritePolicy::LastWriteWins),
            "versioned" => Ok(WritePolicy::Versioned),
            other => Err(AppError::config(format!(
                "unknown write policy '{other}' (expected last_write_wins or versioned)"
            ))),
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("room {0} not found")]
    NotFound(RoomCode),
    #[error("room {0} already exists")]
    AlreadyExists(RoomCode),
    #[error("room {key} was modified: expected version {expected}, found {actual}")]
    VersionConflict {
        key: RoomCode,
        expected: u64,
        actual: u64,
    },
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a new document at version 1. Fails if `key` is taken.
    async fn create(&self, key: &RoomCode, state: GameState) -> Result<GameDocument, StoreError>;

    async fn read(&self, key: &RoomCode) -> Result<GameDocument, StoreError>;

    /// Merge `patch` into the stored state and return the committed document.
    async fn update(
        &self,
        key: &RoomCode,
        patch: GamePatch,
        precondition: WritePrecondition,
    ) -> Result<GameDocument, StoreError>;

    /// Watch a document. The subscription starts at the current revision.
    async fn subscribe(&self, key: &RoomCode) -> Result<Subscription, StoreError>;
}

/// Change feed for one document.
///
/// Revisions committed in quick succession may coalesce; the latest one is
/// always delivered.
pub struct Subscription {
    rx: watch::Receiver<GameDocument>,
}

impl Subscription {
    pub(crate) fn new(rx: watch::Receiver<GameDocument>) -> Self {
        Self { rx }
    }

    pub fn current(&self) -> GameDocument {
        self.rx.borrow().clone()
    }

    /// Wait for the next committed revision. `None` once the store drops the room.
    pub async fn next_change(&mut self) -> Option<GameDocument> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until the document is newer than `version`.
    pub async fn wait_past(&mut self, version: u64) -> Option<GameDocument> {
        let doc = self.rx.wait_for(|doc| doc.version > version).await.ok()?;
        Some(doc.clone())
    }
}
