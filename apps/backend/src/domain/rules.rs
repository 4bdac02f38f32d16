use std::ops::RangeInclusive;

pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 5;
pub const PILE_COUNT: usize = 4;

/// Sentinel top of a fresh ascending pile (below the card range).
pub const ASCENDING_START: u8 = 1;
/// Sentinel top of a fresh descending pile (above the card range).
pub const DESCENDING_START: u8 = 100;
/// Distance of the jump-back exception.
pub const JUMP: u8 = 10;

pub const MAX_NAME_LEN: usize = 12;

pub fn player_count_range() -> RangeInclusive<usize> {
    MIN_PLAYERS..=MAX_PLAYERS
}

/// Cards dealt to each player for a given table size.
pub fn hand_size(player_count: usize) -> Option<usize> {
    match player_count {
        1 => Some(8),
        2 => Some(7),
        3..=5 => Some(6),
        _ => None,
    }
}

/// Plays required before a turn may end.
///
/// Solo games and games with an exhausted deck only need one card per turn.
pub fn min_plays_required(player_count: usize, deck_empty: bool) -> u32 {
    if player_count == 1 || deck_empty {
        1
    } else {
        2
    }
}
