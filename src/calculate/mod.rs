//! Fairness scoring engine.
//!
//! Turns a chronological schedule of match records into:
//! - Per-player participation statistics (breaks, streaks, partners, coverage)
//! - Twelve global fairness indices
//! - A single weighted loss for comparing candidate schedules

pub mod audit;
pub mod global;
pub mod participation;
pub mod player;
pub mod sequences;

use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Evaluation, GlobalStatistics, MatchRecord, PlayerId, PlayerStatistics, Weights};

pub use audit::{audit_schedule, max_unique_matchups, ScheduleAudit};
pub use global::calculate_global_stats;
pub use participation::played_rounds;
pub use player::calculate_player_stats;
pub use sequences::{count_consecutive_repetitions, population_stdev, run_lengths};

/// Pools at least this large compute player statistics on the rayon pool.
pub const PARALLEL_PLAYER_THRESHOLD: usize = 32;

/// Errors that reject a scoring request before any computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("Invalid field count: {0} (must be at least 1)")]
    InvalidFieldCount(usize),
}

/// Every distinct player appearing anywhere in the schedule, sorted.
pub fn observed_players(matchups: &[MatchRecord]) -> BTreeSet<PlayerId> {
    matchups
        .iter()
        .flat_map(|record| record.all_player_uids.iter().cloned())
        .collect()
}

/// Weighted sum over indices that have a weight; other weights are ignored.
/// Terms are added in index order.
pub fn weighted_loss(global: &GlobalStatistics, weights: &Weights) -> f64 {
    global
        .iter()
        .filter_map(|(index, value)| weights.get(index.name()).map(|weight| weight * value))
        .sum()
}

/// Score a schedule, keeping the per-player statistics.
pub fn evaluate(
    matchups: &[MatchRecord],
    num_players: usize,
    weights: &Weights,
    num_fields: usize,
) -> Result<Evaluation, ScoreError> {
    let fields = NonZeroUsize::new(num_fields).ok_or(ScoreError::InvalidFieldCount(num_fields))?;

    let players = observed_players(matchups);
    if players.len() > num_players {
        warn!(
            "Schedule has {} distinct players but pool size is {}; coverage counts will be negative",
            players.len(),
            num_players
        );
    }

    let compute = |player: &PlayerId| {
        (
            player.clone(),
            calculate_player_stats(matchups, player, num_players, fields),
        )
    };

    let player_stats: BTreeMap<PlayerId, PlayerStatistics> =
        if players.len() >= PARALLEL_PLAYER_THRESHOLD {
            players.par_iter().map(compute).collect()
        } else {
            players.iter().map(compute).collect()
        };

    let global = calculate_global_stats(&player_stats, num_players);
    let loss = weighted_loss(&global, weights);

    debug!(
        "Scored {} matchups ({} players, {} fields): loss {}",
        matchups.len(),
        player_stats.len(),
        num_fields,
        loss
    );

    Ok(Evaluation {
        players: player_stats,
        global,
        loss,
    })
}

/// Score a schedule: global fairness indices and the weighted loss.
pub fn score(
    matchups: &[MatchRecord],
    num_players: usize,
    weights: &Weights,
    num_fields: usize,
) -> Result<(GlobalStatistics, f64), ScoreError> {
    let evaluation = evaluate(matchups, num_players, weights, num_fields)?;
    Ok((evaluation.global, evaluation.loss))
}
