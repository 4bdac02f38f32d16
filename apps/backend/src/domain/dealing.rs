//! Dealing hands off the front of a shuffled deck.

use crate::domain::cards::Card;
use crate::domain::rules::hand_size;
use crate::errors::domain::DomainError;

/// Deal `hand_size(player_count)` cards per player, in player order, from the
/// front of `deck`.
///
/// Returns the hands and the undealt remainder (order preserved). Hands keep
/// the order in which cards were dealt; the original client shows them that way.
pub fn deal(
    mut deck: Vec<Card>,
    player_count: usize,
) -> Result<(Vec<Vec<Card>>, Vec<Card>), DomainError> {
    let hs = hand_size(player_count).ok_or(DomainError::InvalidPlayerCount(player_count))?;

    let needed = player_count * hs;
    if deck.len() < needed {
        return Err(DomainError::InvariantViolation(format!(
            "deck of {} cannot deal {player_count} hands of {hs}",
            deck.len()
        )));
    }

    let remaining = deck.split_off(needed);
    let hands = deck.chunks(hs).map(<[Card]>::to_vec).collect();
    Ok((hands, remaining))
}
