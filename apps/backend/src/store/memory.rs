//! In-process document store.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::watch;
use tracing::debug;

use super::{DocumentStore, GameDocument, GamePatch, StoreError, Subscription, WritePrecondition};
use crate::domain::GameState;
use crate::utils::room_code::RoomCode;

/// Documents live in watch channels so every commit doubles as a notification.
#[derive(Default)]
pub struct MemoryStore {
    docs: DashMap<RoomCode, watch::Sender<GameDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    // The shard write lock is held from the read through the send, so the
    // version check and the merge are one atomic step.
    fn commit(
        &self,
        key: &RoomCode,
        patch: GamePatch,
        precondition: WritePrecondition,
    ) -> Result<GameDocument, StoreError> {
        let sender = self
            .docs
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;

        let current = sender.borrow().clone();
        if let WritePrecondition::IfVersion(expected) = precondition {
            if current.version != expected {
                return Err(StoreError::VersionConflict {
                    key: key.clone(),
                    expected,
                    actual: current.version,
                });
            }
        }

        let mut state = current.state;
        patch.apply(&mut state);
        let doc = GameDocument {
            version: current.version + 1,
            state,
        };
        sender.send_replace(doc.clone());
        debug!(room = %key, version = doc.version, "document committed");
        Ok(doc)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, key: &RoomCode, state: GameState) -> Result<GameDocument, StoreError> {
        match self.docs.entry(key.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(key.clone())),
            Entry::Vacant(slot) => {
                let doc = GameDocument { version: 1, state };
                let (tx, _rx) = watch::channel(doc.clone());
                slot.insert(tx);
                debug!(room = %key, "document created");
                Ok(doc)
            }
        }
    }

    async fn read(&self, key: &RoomCode) -> Result<GameDocument, StoreError> {
        self.docs
            .get(key)
            .map(|sender| sender.borrow().clone())
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }

    async fn update(
        &self,
        key: &RoomCode,
        patch: GamePatch,
        precondition: WritePrecondition,
    ) -> Result<GameDocument, StoreError> {
        self.commit(key, patch, precondition)
    }

    async fn subscribe(&self, key: &RoomCode) -> Result<Subscription, StoreError> {
        self.docs
            .get(key)
            .map(|sender| Subscription::new(sender.subscribe()))
            .ok_or_else(|| StoreError::NotFound(key.clone()))
    }
}
