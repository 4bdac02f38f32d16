use tracing::info;

use super::mutation::{GameFlowMutationResult, WriteShape};
use super::GameFlowService;
use crate::domain::{build_shuffled_deck, GameState, PlayerIndex};
use crate::error::AppError;
use crate::store::GameDocument;
use crate::utils::room_code::RoomCode;

impl GameFlowService {
    /// Open a new room with `host` seated at index 0.
    ///
    /// A generated code that is already taken fails with a conflict; the
    /// caller may simply try again.
    pub async fn create_room(&self, host: &str) -> Result<(RoomCode, GameDocument), AppError> {
        let state = GameState::lobby(host)?;
        let code = RoomCode::generate();
        let document = self.store.create(&code, state).await?;
        info!(room = %code, host = %document.state.players[0], "room created");
        Ok((code, document))
    }

    pub async fn join_room(
        &self,
        code: &RoomCode,
        name: &str,
        expected_version: Option<u64>,
    ) -> Result<GameFlowMutationResult<PlayerIndex>, AppError> {
        self.run_mutation(code, expected_version, WriteShape::Diff, |state| {
            state.join(name)
        })
        .await
    }

    /// Deal a freshly shuffled deck. Host only.
    pub async fn start_game(
        &self,
        code: &RoomCode,
        player: PlayerIndex,
        expected_version: Option<u64>,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        let result = self
            .run_mutation(code, expected_version, WriteShape::Full, |state| {
                state.require_host(player)?;
                state.start(build_shuffled_deck())
            })
            .await?;
        self.checkpoints.remove(code);
        Ok(result)
    }
}
