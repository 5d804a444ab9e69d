//! Round-level participation of a single player.

use std::num::NonZeroUsize;

use crate::models::{MatchRecord, PlayerId};

/// Marker for a round the player was on any field.
pub const PLAYED: u8 = 1;

/// Marker for a round the player sat out.
pub const BREAK: u8 = 0;

/// Per-round played/break sequence for `player`.
///
/// Consecutive groups of `num_fields` records form one round; a short
/// trailing group still counts as a round.
pub fn played_rounds(
    matchups: &[MatchRecord],
    player: &PlayerId,
    num_fields: NonZeroUsize,
) -> Vec<u8> {
    matchups
        .chunks(num_fields.get())
        .map(|round| {
            if round.iter().any(|record| record.contains(player)) {
                PLAYED
            } else {
                BREAK
            }
        })
        .collect()
}
