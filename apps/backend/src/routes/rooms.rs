//! Room HTTP routes.
//!
//! Mutations are handed to the room's actor; reads and long-polls go to the
//! coordinator. Every room response carries the room ETag, and mutations
//! honour `If-Match`.

use actix_web::http::header::ETAG;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{PileId, PlayerIndex, PlayerView};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{IfMatchVersion, RoomCodePath, ValidatedJson};
use crate::http::etag::{if_none_match_hits, room_etag};
use crate::services::rooms::{IntentOutcome, RoomIntent};
use crate::state::app_state::AppState;
use crate::utils::room_code::RoomCode;

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayerRequest {
    pub player: PlayerIndex,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    pub player: PlayerIndex,
    pub card_index: usize,
    pub pile: PileId,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub player: PlayerIndex,
}

#[derive(Debug, Deserialize)]
pub struct ChangesQuery {
    pub player: PlayerIndex,
    /// Last version the client has seen; absent means "anything".
    pub after: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeatResponse {
    code: RoomCode,
    player_index: PlayerIndex,
    version: u64,
}

#[derive(Debug, Serialize)]
struct RoomViewResponse {
    version: u64,
    #[serde(flatten)]
    view: PlayerView,
}

fn seat_response(status: StatusCode, code: RoomCode, outcome: &IntentOutcome) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((ETAG, room_etag(&code, outcome.version)))
        .json(SeatResponse {
            code,
            player_index: outcome.player,
            version: outcome.version,
        })
}

fn view_response(code: &RoomCode, version: u64, view: PlayerView) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((ETAG, room_etag(code, version)))
        .json(RoomViewResponse { version, view })
}

/// POST /api/rooms
///
/// Opens a room with the caller as host (player 0).
async fn create_room(
    app_state: web::Data<AppState>,
    body: ValidatedJson<NameRequest>,
) -> Result<HttpResponse, AppError> {
    let (code, outcome) = app_state.hub.create_room(&body.name).await?;
    Ok(seat_response(StatusCode::CREATED, code, &outcome))
}

/// POST /api/rooms/{code}/join
async fn join_room(
    app_state: web::Data<AppState>,
    RoomCodePath(code): RoomCodePath,
    IfMatchVersion(expected): IfMatchVersion,
    body: ValidatedJson<NameRequest>,
) -> Result<HttpResponse, AppError> {
    let intent = RoomIntent::Join {
        name: body.into_inner().name,
    };
    let outcome = app_state.hub.submit(&code, intent, expected).await?;
    info!(room = %code, player = outcome.player, "player joined");
    Ok(seat_response(StatusCode::OK, code, &outcome))
}

async fn submit_for_view(
    app_state: &AppState,
    code: RoomCode,
    intent: RoomIntent,
    expected: Option<u64>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state.hub.submit(&code, intent, expected).await?;
    Ok(view_response(&code, outcome.version, outcome.view))
}

/// POST /api/rooms/{code}/start
async fn start_game(
    app_state: web::Data<AppState>,
    RoomCodePath(code): RoomCodePath,
    IfMatchVersion(expected): IfMatchVersion,
    body: ValidatedJson<PlayerRequest>,
) -> Result<HttpResponse, AppError> {
    let intent = RoomIntent::Start {
        player: body.player,
    };
    submit_for_view(&app_state, code, intent, expected).await
}

/// POST /api/rooms/{code}/play
async fn play_card(
    app_state: web::Data<AppState>,
    RoomCodePath(code): RoomCodePath,
    IfMatchVersion(expected): IfMatchVersion,
    body: ValidatedJson<PlayRequest>,
) -> Result<HttpResponse, AppError> {
    let intent = RoomIntent::Play {
        player: body.player,
        card_index: body.card_index,
        pile: body.pile,
    };
    submit_for_view(&app_state, code, intent, expected).await
}

/// POST /api/rooms/{code}/end-turn
async fn end_turn(
    app_state: web::Data<AppState>,
    RoomCodePath(code): RoomCodePath,
    IfMatchVersion(expected): IfMatchVersion,
    body: ValidatedJson<PlayerRequest>,
) -> Result<HttpResponse, AppError> {
    let intent = RoomIntent::EndTurn {
        player: body.player,
    };
    submit_for_view(&app_state, code, intent, expected).await
}

/// POST /api/rooms/{code}/undo
async fn undo(
    app_state: web::Data<AppState>,
    RoomCodePath(code): RoomCodePath,
    IfMatchVersion(expected): IfMatchVersion,
    body: ValidatedJson<PlayerRequest>,
) -> Result<HttpResponse, AppError> {
    let intent = RoomIntent::Undo {
        player: body.player,
    };
    submit_for_view(&app_state, code, intent, expected).await
}

/// GET /api/rooms/{code}?player=i
///
/// Supports `If-None-Match`: a matching ETag yields `304 Not Modified`.
async fn get_room(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
    RoomCodePath(code): RoomCodePath,
    query: web::Query<ViewQuery>,
) -> Result<HttpResponse, AppError> {
    let (version, view) = app_state.flow().view(&code, query.player).await?;
    let etag = room_etag(&code, version);

    if if_none_match_hits(http_req.headers(), &etag) {
        return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag))
            .finish());
    }
    Ok(view_response(&code, version, view))
}

/// GET /api/rooms/{code}/changes?player=i&after=v
///
/// Long-poll: answers as soon as the room is newer than `after`, or with
/// `204 No Content` once the configured wait runs out.
async fn room_changes(
    app_state: web::Data<AppState>,
    RoomCodePath(code): RoomCodePath,
    query: web::Query<ChangesQuery>,
) -> Result<HttpResponse, AppError> {
    let flow = app_state.flow();
    let mut subscription = flow.subscribe(&code).await?;
    subscription.current().state.require_player(query.player)?;

    let after = query.after.unwrap_or(0);
    let waited = tokio::time::timeout(app_state.config.long_poll, subscription.wait_past(after)).await;

    match waited {
        Ok(Some(doc)) => {
            doc.state.check_invariants()?;
            let view = flow.view_of(&code, &doc.state, query.player)?;
            Ok(view_response(&code, doc.version, view))
        }
        Ok(None) => Err(AppError::not_found(
            ErrorCode::RoomNotFound,
            format!("room {code} was closed"),
        )),
        Err(_) => Ok(HttpResponse::NoContent().finish()),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_room)))
        .service(web::resource("/{code}").route(web::get().to(get_room)))
        .service(web::resource("/{code}/changes").route(web::get().to(room_changes)))
        .service(web::resource("/{code}/join").route(web::post().to(join_room)))
        .service(web::resource("/{code}/start").route(web::post().to(start_game)))
        .service(web::resource("/{code}/play").route(web::post().to(play_card)))
        .service(web::resource("/{code}/end-turn").route(web::post().to(end_turn)))
        .service(web::resource("/{code}/undo").route(web::post().to(undo)));
}
