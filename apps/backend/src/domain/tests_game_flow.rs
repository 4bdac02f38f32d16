use crate::domain::cards::{shuffled_deck_with_seed, Card};
use crate::domain::checkpoint::TurnCheckpoint;
use crate::domain::state::{GameResult, GameState, PlayOutcome, Status, TurnOutcome};
use crate::domain::test_state_helpers::{cards, crafted, lobby, started};
use crate::errors::domain::DomainError;

const FRESH: [u8; 4] = [1, 1, 100, 100];

#[test]
fn two_player_turn_plays_draws_and_advances() {
    let mut state = crafted(
        &[&[45, 55, 60, 61, 62, 63, 64], &[20, 21, 22, 23, 24, 25, 26]],
        &[80, 81, 82],
        FRESH,
    );

    assert_eq!(
        state.play_card(0, 0, 0).unwrap(),
        PlayOutcome::Placed {
            card: Card::new(45).unwrap(),
            pile: 0
        }
    );
    assert_eq!(state.piles[0].top, 45);

    // 55 goes on the untouched pile 1
    state.play_card(0, 0, 1).unwrap();
    assert_eq!(state.piles[1].top, 55);
    assert_eq!(state.played_this_turn, 2);
    assert_eq!(state.min_plays_required(), 2);

    let outcome = state.end_turn(0).unwrap();
    assert_eq!(outcome, TurnOutcome::Advanced { next: 1, drawn: 2 });
    assert_eq!(state.current_player, 1);
    assert_eq!(state.played_this_turn, 0);
    assert_eq!(state.hands[0], cards(&[60, 61, 62, 63, 64, 80, 81]));
    assert_eq!(state.deck, cards(&[82]));
    state.check_invariants().unwrap();
}

#[test]
fn illegal_placement_leaves_state_untouched() {
    let mut state = crafted(&[&[36, 50], &[20]], &[80], [45, 1, 100, 100]);
    let before = state.clone();
    assert_eq!(
        state.play_card(0, 0, 0).unwrap_err(),
        DomainError::IllegalMove {
            card: 36,
            pile: 0,
            top: 45
        }
    );
    assert_eq!(state, before);
}

#[test]
fn backwards_jump_of_exactly_ten_is_allowed() {
    let mut state = crafted(&[&[35, 60], &[20]], &[80], [45, 1, 100, 100]);
    state.play_card(0, 1, 2).unwrap();
    // 60 on descending pile 2 (top 100), then 35 jumps back on pile 0 (top 45)
    state.play_card(0, 0, 0).unwrap();
    assert_eq!(state.piles[0].top, 35);
    assert_eq!(state.piles[0].history.last(), Some(&45));
}

#[test]
fn bad_indices_are_rejected() {
    let mut state = crafted(&[&[45], &[20]], &[80], FRESH);
    assert_eq!(
        state.play_card(0, 3, 0).unwrap_err(),
        DomainError::CardIndexOutOfRange {
            index: 3,
            hand_len: 1
        }
    );
    assert_eq!(
        state.play_card(0, 0, 4).unwrap_err(),
        DomainError::UnknownPile(4)
    );
    assert_eq!(
        state.play_card(7, 0, 0).unwrap_err(),
        DomainError::UnknownPlayer(7)
    );
}

#[test]
fn minimum_plays_depend_on_deck() {
    let mut state = crafted(&[&[45, 46], &[20, 21]], &[80], FRESH);
    state.play_card(0, 0, 0).unwrap();
    assert_eq!(
        state.end_turn(0).unwrap_err(),
        DomainError::BelowMinimumPlays {
            played: 1,
            required: 2
        }
    );

    let mut empty_deck = crafted(&[&[45, 46], &[20, 21]], &[], FRESH);
    empty_deck.play_card(0, 0, 0).unwrap();
    assert_eq!(
        empty_deck.end_turn(0).unwrap(),
        TurnOutcome::Advanced { next: 1, drawn: 0 }
    );
}

#[test]
fn solo_needs_one_play_and_keeps_the_turn() {
    let mut state = started(1, 3);
    assert_eq!(state.hands[0].len(), 8);
    assert_eq!(state.min_plays_required(), 1);
    state.play_card(0, 0, 0).unwrap();
    match state.end_turn(0).unwrap() {
        TurnOutcome::Advanced { next, drawn } => {
            assert_eq!(next, 0);
            assert_eq!(drawn, 1);
        }
        TurnOutcome::Deadlocked { .. } => panic!("fresh piles cannot deadlock"),
    }
    assert_eq!(state.hands[0].len(), 8);
}

#[test]
fn only_the_current_player_may_act() {
    let mut state = started(2, 1);
    let err = state.play_card(1, 0, 0).unwrap_err();
    assert_eq!(err, DomainError::NotYourTurn { player: 1, current: 0 });
    assert_eq!(
        state.end_turn(1).unwrap_err(),
        DomainError::NotYourTurn { player: 1, current: 0 }
    );
}

#[test]
fn last_card_wins_the_game() {
    let mut state = crafted(&[&[50], &[]], &[], FRESH);
    let outcome = state.play_card(0, 0, 0).unwrap();
    assert!(matches!(outcome, PlayOutcome::Won { .. }));
    assert_eq!(state.status, Status::Won);
    assert_eq!(state.game_result, Some(GameResult::Won));
    state.check_invariants().unwrap();

    assert_eq!(
        state.end_turn(0).unwrap_err(),
        DomainError::GameNotInProgress(Status::Won)
    );
}

#[test]
fn stuck_next_player_loses_without_acting() {
    // Player 1 holds only cards between the tops that no pile accepts.
    let mut state = crafted(&[&[90, 91], &[40, 41]], &[], [80, 81, 20, 21]);
    state.play_card(0, 0, 0).unwrap();
    let outcome = state.end_turn(0).unwrap();
    assert_eq!(outcome, TurnOutcome::Deadlocked { next: 1, drawn: 0 });
    assert_eq!(state.status, Status::Lost);
    assert_eq!(state.game_result, Some(GameResult::Lost));
    assert_eq!(state.current_player, 1);
    state.check_invariants().unwrap();

    assert_eq!(
        state.play_card(1, 0, 0).unwrap_err(),
        DomainError::GameNotInProgress(Status::Lost)
    );
}

#[test]
fn empty_next_hand_counts_as_deadlock() {
    let mut state = crafted(&[&[90, 91], &[]], &[], [80, 81, 20, 21]);
    state.play_card(0, 0, 0).unwrap();
    assert!(matches!(
        state.end_turn(0).unwrap(),
        TurnOutcome::Deadlocked { next: 1, .. }
    ));
}

#[test]
fn undo_restores_turn_start_exactly_once() {
    let mut state = crafted(&[&[45, 55, 60], &[20, 21]], &[80, 81], FRESH);
    let turn_start = state.clone();
    let checkpoint = TurnCheckpoint::capture(&state);

    state.play_card(0, 0, 0).unwrap();
    state.play_card(0, 0, 1).unwrap();
    state.undo(0, Some(checkpoint)).unwrap();
    assert_eq!(state, turn_start);

    // The checkpoint was consumed.
    assert_eq!(
        state.undo(0, None).unwrap_err(),
        DomainError::NoSnapshotAvailable
    );
}

#[test]
fn stale_checkpoint_is_refused() {
    let mut state = crafted(&[&[45, 55], &[60, 61]], &[80, 81, 82], FRESH);
    let old = TurnCheckpoint::capture(&state);

    state.play_card(0, 0, 0).unwrap();
    state.play_card(0, 0, 1).unwrap();
    state.end_turn(0).unwrap();
    state.play_card(1, 0, 2).unwrap();

    assert_eq!(
        state.undo(1, Some(old)).unwrap_err(),
        DomainError::NoSnapshotAvailable
    );
}

#[test]
fn undo_before_any_play_has_nothing_to_restore() {
    let mut state = started(2, 4);
    let checkpoint = TurnCheckpoint::capture(&state);
    assert_eq!(
        state.undo(0, Some(checkpoint)).unwrap_err(),
        DomainError::NoSnapshotAvailable
    );
}

#[test]
fn lobby_rules() {
    let mut state = lobby(5);
    assert_eq!(
        state.join("late").unwrap_err(),
        DomainError::InvalidPlayerCount(6)
    );

    assert!(matches!(
        GameState::lobby("   "),
        Err(DomainError::InvalidPlayerName(_))
    ));
    assert!(matches!(
        state.join("a-very-long-name"),
        Err(DomainError::InvalidPlayerName(_))
    ));

    state.start(shuffled_deck_with_seed(8)).unwrap();
    assert_eq!(
        state.start(shuffled_deck_with_seed(8)).unwrap_err(),
        DomainError::AlreadyStarted
    );
    assert_eq!(state.join("x").unwrap_err(), DomainError::AlreadyStarted);
}

#[test]
fn names_are_trimmed_and_host_is_seat_zero() {
    let mut state = GameState::lobby("  Ada ").unwrap();
    assert_eq!(state.join(" Bo").unwrap(), 1);
    assert_eq!(state.players, vec!["Ada".to_string(), "Bo".to_string()]);
    assert!(state.require_host(0).is_ok());
    assert_eq!(state.require_host(1).unwrap_err(), DomainError::NotHost(1));
}
