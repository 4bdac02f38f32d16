//! ETag helpers for room documents.
//!
//! A room's ETag is derived from its code and store version, so `If-Match`
//! doubles as an optimistic lock and `If-None-Match` as a cache check.

use actix_web::http::header::{HeaderMap, IF_NONE_MATCH};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::room_code::RoomCode;

/// ETag for a room at `version`: `"room-{code}-v{version}"`, quotes included.
///
/// # Example
/// ```
/// # use thegame::http::etag::room_etag;
/// let code = "AB12".parse().unwrap();
/// assert_eq!(room_etag(&code, 5), r#""room-AB12-v5""#);
/// ```
pub fn room_etag(code: &RoomCode, version: u64) -> String {
    format!(r#""room-{code}-v{version}""#)
}

/// Parse the room code and version out of a room ETag.
///
/// Weak validators (`W/` prefix) and missing quotes are tolerated.
///
/// # Errors
/// Returns `AppError::bad_request` with `ErrorCode::InvalidHeader` if the
/// value is not `room-{code}-v{version}`, the code is not a room code or the
/// version is not a number.
pub fn parse_room_etag(s: &str) -> Result<(RoomCode, u64), AppError> {
    let s = s.trim();
    let s = s.strip_prefix("W/").unwrap_or(s).trim_matches('"');
    let malformed = || {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!(
                "Invalid ETag format: expected \"room-{{code}}-v{{version}}\", got: \"{s}\""
            ),
        )
    };

    let body = s.strip_prefix("room-").ok_or_else(malformed)?;
    let (code, version_str) = body.rsplit_once("-v").ok_or_else(malformed)?;
    let code = code.parse::<RoomCode>().map_err(|_| malformed())?;
    let version = version_str.parse::<u64>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: version must be a number, got: \"{version_str}\""),
        )
    })?;
    Ok((code, version))
}

/// Whether the request's `If-None-Match` covers `etag` (RFC 9110, `*` included).
pub fn if_none_match_hits(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get(IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|client| {
            client.trim() == "*" || client.split(',').map(str::trim).any(|tag| tag == etag)
        })
}
