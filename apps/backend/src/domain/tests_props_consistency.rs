/// Property-based tests for whole-game consistency
use proptest::prelude::*;

use crate::domain::piles::legal_piles;
use crate::domain::rules::hand_size;
use crate::domain::state::{GameState, PlayOutcome, Status, TurnOutcome};
use crate::domain::test_gens;
use crate::domain::test_state_helpers::started;

/// Drive a game with a greedy policy picked by `choices`; check invariants after every step.
fn play_out(state: &mut GameState, choices: &[u8]) -> Result<(), TestCaseError> {
    for &choice in choices {
        if state.is_terminal() {
            break;
        }
        let player = state.current_player;
        let required = state.min_plays_required();

        let options: Vec<(usize, usize)> = state.hands[player]
            .iter()
            .enumerate()
            .flat_map(|(i, &c)| legal_piles(c, &state.piles).into_iter().map(move |p| (i, p)))
            .collect();

        let wants_to_stop = choice % 3 == 0 && state.played_this_turn >= required;
        if options.is_empty() || wants_to_stop {
            if state.played_this_turn < required {
                // Stuck mid-turn; the table cannot continue.
                break;
            }
            let before_deck = state.deck.len();
            let played = state.played_this_turn as usize;
            let outcome = state.end_turn(player).map_err(|e| TestCaseError::fail(e.to_string()))?;
            let drawn = match outcome {
                TurnOutcome::Advanced { drawn, .. } | TurnOutcome::Deadlocked { drawn, .. } => drawn,
            };
            prop_assert_eq!(drawn, played.min(before_deck));
            prop_assert_eq!(state.played_this_turn, 0);
        } else {
            let (card_index, pile) = options[choice as usize % options.len()];
            let outcome = state
                .play_card(player, card_index, pile)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            if let PlayOutcome::Won { .. } = outcome {
                prop_assert_eq!(state.status, Status::Won);
            }
        }

        state
            .check_invariants()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(test_gens::proptest_config())]

    /// Property: Dealing conserves the deck for every table size.
    #[test]
    fn prop_start_deals_full_hands(n in test_gens::player_count(), seed in test_gens::seed()) {
        let state = started(n, seed);
        let size = hand_size(n).unwrap();
        prop_assert!(state.hands.iter().all(|h| h.len() == size));
        prop_assert_eq!(state.deck.len() + n * size, 98);
        prop_assert_eq!(state.cards_remaining(), 98);
        prop_assert_eq!(state.dealt_hand_size(), Some(size));
        prop_assert!(state.check_invariants().is_ok());
    }

    /// Property: Any sequence of legal actions keeps the document consistent.
    #[test]
    fn prop_legal_play_preserves_invariants(
        n in test_gens::player_count(),
        seed in test_gens::seed(),
        choices in proptest::collection::vec(any::<u8>(), 0..200),
    ) {
        let mut state = started(n, seed);
        play_out(&mut state, &choices)?;
    }

    /// Property: Cards remaining never increases.
    #[test]
    fn prop_cards_remaining_is_monotone(
        seed in test_gens::seed(),
        choices in proptest::collection::vec(any::<u8>(), 1..60),
    ) {
        let mut state = started(2, seed);
        let mut last = state.cards_remaining();
        for chunk in choices.chunks(4) {
            play_out(&mut state, chunk)?;
            let now = state.cards_remaining();
            prop_assert!(now <= last);
            last = now;
        }
    }
}
