// Unit tests for error mapping - pure domain logic without HTTP or store dependencies
use crate::domain::Status;
use crate::errors::domain::DomainError;
use crate::store::StoreError;
use crate::utils::room_code::RoomCode;
use crate::{AppError, ErrorCode};

fn code() -> RoomCode {
    "ABCD".parse().unwrap()
}

#[test]
fn maps_turn_and_lifecycle_conflicts_to_409() {
    let cases = [
        (
            DomainError::NotYourTurn {
                player: 1,
                current: 0,
            },
            "NOT_YOUR_TURN",
        ),
        (DomainError::AlreadyStarted, "ALREADY_STARTED"),
        (DomainError::NoSnapshotAvailable, "NO_SNAPSHOT_AVAILABLE"),
        (
            DomainError::GameNotInProgress(Status::Won),
            "GAME_NOT_IN_PROGRESS",
        ),
    ];
    for (de, expected) in cases {
        let app: AppError = de.into();
        assert_eq!(app.code().as_str(), expected);
        assert_eq!(app.status().as_u16(), 409);
    }
}

#[test]
fn maps_rule_violations_to_422() {
    let illegal = DomainError::IllegalMove {
        card: 30,
        pile: 0,
        top: 45,
    };
    let app: AppError = illegal.into();
    assert_eq!(app.code(), ErrorCode::IllegalMove);
    assert_eq!(app.status().as_u16(), 422);

    let below = DomainError::BelowMinimumPlays {
        played: 1,
        required: 2,
    };
    let app: AppError = below.into();
    assert_eq!(app.code(), ErrorCode::BelowMinimumPlays);
    assert_eq!(app.status().as_u16(), 422);

    let app: AppError = DomainError::InvalidPlayerCount(6).into();
    assert_eq!(app.code(), ErrorCode::InvalidPlayerCount);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_malformed_intents_to_400() {
    let app: AppError = DomainError::UnknownPile(9).into();
    assert_eq!(app.code().as_str(), "UNKNOWN_PILE");
    assert_eq!(app.status().as_u16(), 400);

    let app: AppError = DomainError::CardIndexOutOfRange {
        index: 9,
        hand_len: 2,
    }
    .into();
    assert_eq!(app.code().as_str(), "CARD_INDEX_OUT_OF_RANGE");
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn non_host_start_is_forbidden() {
    let app: AppError = DomainError::NotHost(2).into();
    assert_eq!(app.code(), ErrorCode::NotHost);
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn invariant_violation_is_data_corruption() {
    let app: AppError = DomainError::InvariantViolation("card 7 appears twice".into()).into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn maps_store_errors() {
    let app: AppError = StoreError::NotFound(code()).into();
    assert_eq!(app.code().as_str(), "ROOM_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = StoreError::AlreadyExists(code()).into();
    assert_eq!(app.code().as_str(), "ROOM_CODE_CONFLICT");
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError = StoreError::VersionConflict {
        key: code(),
        expected: 3,
        actual: 4,
    }
    .into();
    assert_eq!(app.code(), ErrorCode::OptimisticLock);
    assert_eq!(app.status().as_u16(), 409);
    assert!(matches!(app, AppError::Conflict { .. }));
}
