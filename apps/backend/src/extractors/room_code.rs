use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::room_code::RoomCode;

/// Room code from the `{code}` path segment, normalised to uppercase.
///
/// Only the format is checked here; whether the room exists is the
/// coordinator's concern.
#[derive(Debug, Clone)]
pub struct RoomCodePath(pub RoomCode);

impl FromRequest for RoomCodePath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("code")
            .ok_or_else(|| AppError::bad_request(ErrorCode::InvalidRoomCode, "Missing room code"))
            .and_then(|raw| raw.parse::<RoomCode>())
            .map(RoomCodePath);
        ready(result)
    }
}
