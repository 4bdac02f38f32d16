use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::{DomainError, ErrorCode};
use crate::store::StoreError;
use crate::trace_ctx;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation {
        code: ErrorCode,
        detail: String,
        status: StatusCode,
    },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { status, .. } => *status,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: String, status: StatusCode) -> Self {
        Self::Validation {
            code,
            detail,
            status,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::InternalError,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        let detail = e.to_string();
        match e {
            DomainError::NotYourTurn { .. } => AppError::conflict(ErrorCode::NotYourTurn, detail),
            DomainError::AlreadyStarted => AppError::conflict(ErrorCode::AlreadyStarted, detail),
            DomainError::NoSnapshotAvailable => {
                AppError::conflict(ErrorCode::NoSnapshotAvailable, detail)
            }
            DomainError::GameNotInProgress(_) => {
                AppError::conflict(ErrorCode::GameNotInProgress, detail)
            }
            DomainError::IllegalMove { .. } => AppError::invalid(
                ErrorCode::IllegalMove,
                detail,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            DomainError::BelowMinimumPlays { .. } => AppError::invalid(
                ErrorCode::BelowMinimumPlays,
                detail,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            DomainError::InvalidPlayerCount(_) => AppError::invalid(
                ErrorCode::InvalidPlayerCount,
                detail,
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            DomainError::NotHost(_) => {
                AppError::invalid(ErrorCode::NotHost, detail, StatusCode::FORBIDDEN)
            }
            DomainError::CardIndexOutOfRange { .. } => {
                AppError::bad_request(ErrorCode::CardIndexOutOfRange, detail)
            }
            DomainError::UnknownPile(_) => AppError::bad_request(ErrorCode::UnknownPile, detail),
            DomainError::UnknownPlayer(_) => {
                AppError::bad_request(ErrorCode::UnknownPlayer, detail)
            }
            DomainError::InvalidPlayerName(_) => {
                AppError::bad_request(ErrorCode::InvalidPlayerName, detail)
            }
            DomainError::InvalidCard(_) => AppError::bad_request(ErrorCode::InvalidCard, detail),
            DomainError::InvariantViolation(_) => AppError::Internal {
                code: ErrorCode::DataCorruption,
                detail,
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        let detail = e.to_string();
        match e {
            StoreError::NotFound(_) => AppError::not_found(ErrorCode::RoomNotFound, detail),
            StoreError::AlreadyExists(_) => AppError::conflict(ErrorCode::RoomCodeConflict, detail),
            StoreError::VersionConflict { .. } => {
                AppError::conflict(ErrorCode::OptimisticLock, detail)
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://thegame.app/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail,
            code: code.to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
