use tracing::{debug, info};

use crate::domain::game_transition::{derive_game_transitions, GameTransition};
use crate::domain::GameState;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::services::game_flow::GameFlowService;
use crate::store::{GameDocument, GamePatch};
use crate::utils::room_code::RoomCode;

#[derive(Debug)]
pub struct GameFlowMutationResult<T> {
    pub document: GameDocument,
    pub old_version: u64,
    pub transitions: Vec<GameTransition>,
    pub outcome: T,
}

impl<T> GameFlowMutationResult<T> {
    pub fn final_version(&self) -> u64 {
        self.document.version
    }
}

/// How a mutation is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WriteShape {
    /// Only the fields the mutation changed.
    Diff,
    /// Every field, replacing the stored state wholesale.
    Full,
}

impl GameFlowService {
    pub(super) async fn run_mutation<T, F>(
        &self,
        code: &RoomCode,
        expected_version: Option<u64>,
        shape: WriteShape,
        mutation: F,
    ) -> Result<GameFlowMutationResult<T>, AppError>
    where
        F: FnOnce(&mut GameState) -> Result<T, DomainError>,
    {
        let before = self.document(code).await?;
        let old_version = before.version;

        if let Some(expected) = expected_version {
            if expected != old_version {
                return Err(AppError::conflict(
                    ErrorCode::OptimisticLock,
                    format!(
                        "Room version mismatch: expected {expected}, but room has version {old_version}"
                    ),
                ));
            }
        }

        let mut after = before.state.clone();
        let outcome = mutation(&mut after)?;
        after.check_invariants()?;

        let patch = match shape {
            WriteShape::Diff => GamePatch::diff(&before.state, &after),
            WriteShape::Full => GamePatch::full(&after),
        };
        let precondition = self.policy.precondition(old_version);
        let document = self.store.update(code, patch, precondition).await?;
        debug!(
            room = %code,
            old_version,
            version = document.version,
            policy = %self.policy,
            "room written"
        );

        let transitions = derive_game_transitions(&before.state, &document.state);
        for transition in &transitions {
            info!(room = %code, version = document.version, ?transition, "game transition");
        }

        Ok(GameFlowMutationResult {
            document,
            old_version,
            transitions,
            outcome,
        })
    }
}
