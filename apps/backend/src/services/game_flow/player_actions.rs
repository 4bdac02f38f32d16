use tracing::debug;

use super::mutation::{GameFlowMutationResult, WriteShape};
use super::GameFlowService;
use crate::domain::{PileId, PlayOutcome, PlayerIndex, TurnCheckpoint, TurnOutcome};
use crate::error::AppError;
use crate::utils::room_code::RoomCode;

impl GameFlowService {
    /// Place a card from `player`'s hand on `pile`.
    ///
    /// The first play of a turn records the turn-start checkpoint; later plays
    /// in the same turn keep it.
    pub async fn play_card(
        &self,
        code: &RoomCode,
        player: PlayerIndex,
        card_index: usize,
        pile: PileId,
        expected_version: Option<u64>,
    ) -> Result<GameFlowMutationResult<PlayOutcome>, AppError> {
        debug!(room = %code, player, card_index, pile, "Playing card");

        let existing = self.checkpoint(code);
        let mut checkpoint = None;
        let result = self
            .run_mutation(code, expected_version, WriteShape::Diff, |state| {
                checkpoint = Some(
                    existing
                        .filter(|c| c.applies_to(state))
                        .unwrap_or_else(|| TurnCheckpoint::capture(state)),
                );
                state.play_card(player, card_index, pile)
            })
            .await?;

        match checkpoint {
            Some(checkpoint) if !result.document.state.is_terminal() => {
                self.checkpoints.insert(code.clone(), checkpoint);
            }
            _ => {
                self.checkpoints.remove(code);
            }
        }
        Ok(result)
    }

    /// Finish `player`'s turn: refill their hand and pass the turn on.
    pub async fn end_turn(
        &self,
        code: &RoomCode,
        player: PlayerIndex,
        expected_version: Option<u64>,
    ) -> Result<GameFlowMutationResult<TurnOutcome>, AppError> {
        debug!(room = %code, player, "Ending turn");

        let result = self
            .run_mutation(code, expected_version, WriteShape::Diff, |state| {
                state.end_turn(player)
            })
            .await?;
        self.checkpoints.remove(code);
        Ok(result)
    }

    /// Revert every play `player` made this turn.
    pub async fn undo(
        &self,
        code: &RoomCode,
        player: PlayerIndex,
        expected_version: Option<u64>,
    ) -> Result<GameFlowMutationResult<()>, AppError> {
        debug!(room = %code, player, "Undoing turn");

        let checkpoint = self.checkpoint(code);
        let result = self
            .run_mutation(code, expected_version, WriteShape::Full, |state| {
                state.undo(player, checkpoint)
            })
            .await?;
        self.checkpoints.remove(code);
        Ok(result)
    }
}
