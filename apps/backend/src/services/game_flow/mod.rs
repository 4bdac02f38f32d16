//! Game flow coordinator - bridges pure domain logic with the shared document store.
//!
//! Every mutation reads the room, validates and applies the intent on a copy,
//! checks the result, writes it back under the configured write policy and
//! reports the transitions it caused. The coordinator also owns the per-room
//! turn-start checkpoints that back undo; those are never published.

mod lobby;
mod mutation;
mod player_actions;

use std::sync::Arc;

use dashmap::DashMap;

use crate::domain::{GameState, PlayerIndex, PlayerView, TurnCheckpoint};
use crate::error::AppError;
use crate::store::{DocumentStore, GameDocument, Subscription, WritePolicy};
use crate::utils::room_code::RoomCode;

pub use mutation::GameFlowMutationResult;

pub struct GameFlowService {
    store: Arc<dyn DocumentStore>,
    policy: WritePolicy,
    checkpoints: DashMap<RoomCode, TurnCheckpoint>,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn DocumentStore>, policy: WritePolicy) -> Self {
        Self {
            store,
            policy,
            checkpoints: DashMap::new(),
        }
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Read a room and verify it is consistent.
    pub async fn document(&self, code: &RoomCode) -> Result<GameDocument, AppError> {
        let doc = self.store.read(code).await?;
        doc.state.check_invariants()?;
        Ok(doc)
    }

    /// Current view of `code` for `viewer`, with the version it was read at.
    pub async fn view(
        &self,
        code: &RoomCode,
        viewer: PlayerIndex,
    ) -> Result<(u64, PlayerView), AppError> {
        let doc = self.document(code).await?;
        let view = self.view_of(code, &doc.state, viewer)?;
        Ok((doc.version, view))
    }

    pub fn view_of(
        &self,
        code: &RoomCode,
        state: &GameState,
        viewer: PlayerIndex,
    ) -> Result<PlayerView, AppError> {
        let view = PlayerView::for_player(state, viewer)?;
        Ok(view.with_undo_available(self.can_undo(code, state, viewer)))
    }

    pub async fn subscribe(&self, code: &RoomCode) -> Result<Subscription, AppError> {
        Ok(self.store.subscribe(code).await?)
    }

    /// Whether `viewer` holds a checkpoint that undo would restore.
    pub fn can_undo(&self, code: &RoomCode, state: &GameState, viewer: PlayerIndex) -> bool {
        self.checkpoints
            .get(code)
            .is_some_and(|c| c.owner() == viewer && c.applies_to(state))
    }

    fn checkpoint(&self, code: &RoomCode) -> Option<TurnCheckpoint> {
        self.checkpoints.get(code).map(|c| c.value().clone())
    }
}
