use actix_web::dev::Payload;
use actix_web::http::header::IF_MATCH;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::etag::parse_room_etag;
use crate::utils::room_code::RoomCode;

/// Version a client expects to modify, from `If-Match`.
///
/// `None` when the header is absent or `*`. An ETag naming a different room
/// than the `{code}` path segment can never match and is a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfMatchVersion(pub Option<u64>);

impl FromRequest for IfMatchVersion {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_if_match(req).map(IfMatchVersion))
    }
}

fn parse_if_match(req: &HttpRequest) -> Result<Option<u64>, AppError> {
    let Some(value) = req.headers().get(IF_MATCH) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidHeader, "If-Match is not valid ASCII")
    })?;
    if value.trim() == "*" {
        return Ok(None);
    }
    let (tagged, version) = parse_room_etag(value)?;

    // A malformed path code is reported by `RoomCodePath`.
    let path_code = req
        .match_info()
        .get("code")
        .and_then(|raw| raw.parse::<RoomCode>().ok());
    if let Some(path_code) = path_code {
        if path_code != tagged {
            return Err(AppError::conflict(
                ErrorCode::OptimisticLock,
                format!("If-Match names room {tagged}, not {path_code}"),
            ));
        }
    }
    Ok(Some(version))
}
