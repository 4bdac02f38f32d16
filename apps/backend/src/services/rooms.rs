//! Per-room actors.
//!
//! Every mutating intent for a room goes through that room's mailbox and is
//! applied by a single task, one at a time. Reads and subscriptions go to the
//! coordinator directly. An actor retires once its game is won or lost, and
//! finished rooms never get a new one.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::domain::{PileId, PlayerIndex, PlayerView};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::services::game_flow::GameFlowService;
use crate::utils::room_code::RoomCode;

const ROOM_MAILBOX_CAPACITY: usize = 64;

/// A mutation requested by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomIntent {
    Join {
        name: String,
    },
    Start {
        player: PlayerIndex,
    },
    Play {
        player: PlayerIndex,
        card_index: usize,
        pile: PileId,
    },
    EndTurn {
        player: PlayerIndex,
    },
    Undo {
        player: PlayerIndex,
    },
}

impl RoomIntent {
    fn name(&self) -> &'static str {
        match self {
            RoomIntent::Join { .. } => "join",
            RoomIntent::Start { .. } => "start",
            RoomIntent::Play { .. } => "play",
            RoomIntent::EndTurn { .. } => "end_turn",
            RoomIntent::Undo { .. } => "undo",
        }
    }
}

/// What the acting client gets back: the committed version and its own view.
#[derive(Debug, Clone)]
pub struct IntentOutcome {
    pub version: u64,
    pub player: PlayerIndex,
    pub view: PlayerView,
}

struct RoomMessage {
    intent: RoomIntent,
    expected_version: Option<u64>,
    response: oneshot::Sender<Result<IntentOutcome, AppError>>,
}

/// Mailbox for one room's actor.
#[derive(Clone)]
struct RoomMailbox {
    sender: mpsc::Sender<RoomMessage>,
}

type Mailboxes = Arc<DashMap<RoomCode, RoomMailbox>>;

pub struct RoomHub {
    flow: Arc<GameFlowService>,
    rooms: Mailboxes,
}

impl RoomHub {
    pub fn new(flow: Arc<GameFlowService>) -> Self {
        Self {
            flow,
            rooms: Arc::new(DashMap::new()),
        }
    }

    pub fn flow(&self) -> &Arc<GameFlowService> {
        &self.flow
    }

    /// Number of rooms with a running actor.
    pub fn active_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Open a room; the host's view comes back at index 0.
    pub async fn create_room(&self, host: &str) -> Result<(RoomCode, IntentOutcome), AppError> {
        let (code, document) = self.flow.create_room(host).await?;
        let view = self.flow.view_of(&code, &document.state, 0)?;
        Ok((
            code,
            IntentOutcome {
                version: document.version,
                player: 0,
                view,
            },
        ))
    }

    /// Queue `intent` on the room's actor and wait for its result.
    pub async fn submit(
        &self,
        code: &RoomCode,
        intent: RoomIntent,
        expected_version: Option<u64>,
    ) -> Result<IntentOutcome, AppError> {
        let (response, rx) = oneshot::channel();
        let mut message = RoomMessage {
            intent,
            expected_version,
            response,
        };

        // A send only fails when the actor retired between lookup and send;
        // the second lookup then sees the finished game.
        for _ in 0..2 {
            let mailbox = self.mailbox(code).await?;
            match mailbox.sender.send(message).await {
                Ok(()) => {
                    return rx
                        .await
                        .map_err(|_| AppError::internal("Room actor dropped the request"))?;
                }
                Err(mpsc::error::SendError(returned)) => {
                    debug!(room = %code, "room mailbox closed; looking up again");
                    message = returned;
                }
            }
        }
        warn!(room = %code, "room mailbox keeps closing; intent dropped");
        Err(AppError::internal("Room actor is not running"))
    }

    async fn mailbox(&self, code: &RoomCode) -> Result<RoomMailbox, AppError> {
        if let Some(mailbox) = self.rooms.get(code) {
            return Ok(mailbox.clone());
        }
        // Unknown and finished rooms never get an actor.
        let document = self.flow.document(code).await?;
        if document.state.is_terminal() {
            return Err(DomainError::GameNotInProgress(document.state.status).into());
        }

        let mailbox = self
            .rooms
            .entry(code.clone())
            .or_insert_with(|| spawn_room(self.flow.clone(), self.rooms.clone(), code.clone()))
            .clone();
        Ok(mailbox)
    }
}

fn spawn_room(flow: Arc<GameFlowService>, rooms: Mailboxes, code: RoomCode) -> RoomMailbox {
    let (sender, receiver) = mpsc::channel(ROOM_MAILBOX_CAPACITY);
    tokio::spawn(room_worker(flow, rooms, code, receiver));
    RoomMailbox { sender }
}

async fn room_worker(
    flow: Arc<GameFlowService>,
    rooms: Mailboxes,
    code: RoomCode,
    mut receiver: mpsc::Receiver<RoomMessage>,
) {
    debug!(room = %code, "room actor started");
    while let Some(message) = receiver.recv().await {
        let intent_name = message.intent.name();
        let result = apply_intent(&flow, &code, message.intent, message.expected_version).await;
        match &result {
            Ok(outcome) if outcome.view.status.is_terminal() => {
                // Unregister before replying. Queued intents still drain and
                // fail against the finished game.
                rooms.remove(&code);
                receiver.close();
                info!(room = %code, status = ?outcome.view.status, "room actor retiring");
            }
            Ok(_) => {}
            Err(err) => {
                debug!(room = %code, intent = intent_name, code = %err.code(), "intent rejected");
            }
        }
        if message.response.send(result).is_err() {
            debug!(room = %code, intent = intent_name, "requester went away before the reply");
        }
    }
    debug!(room = %code, "room actor stopped");
}

async fn apply_intent(
    flow: &GameFlowService,
    code: &RoomCode,
    intent: RoomIntent,
    expected_version: Option<u64>,
) -> Result<IntentOutcome, AppError> {
    let (player, document) = match intent {
        RoomIntent::Join { name } => {
            let result = flow.join_room(code, &name, expected_version).await?;
            (result.outcome, result.document)
        }
        RoomIntent::Start { player } => {
            let result = flow.start_game(code, player, expected_version).await?;
            (player, result.document)
        }
        RoomIntent::Play {
            player,
            card_index,
            pile,
        } => {
            let result = flow
                .play_card(code, player, card_index, pile, expected_version)
                .await?;
            (player, result.document)
        }
        RoomIntent::EndTurn { player } => {
            let result = flow.end_turn(code, player, expected_version).await?;
            (player, result.document)
        }
        RoomIntent::Undo { player } => {
            let result = flow.undo(code, player, expected_version).await?;
            (player, result.document)
        }
    };

    let view = flow.view_of(code, &document.state, player)?;
    Ok(IntentOutcome {
        version: document.version,
        player,
        view,
    })
}
