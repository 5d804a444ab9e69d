//! Reduction of per-player statistics into the global fairness indices.

use std::collections::BTreeMap;

use crate::models::{FairnessIndex, GlobalStatistics, PlayerId, PlayerStatistics};

use super::sequences::population_stdev;

type PlayerStatsMap = BTreeMap<PlayerId, PlayerStatistics>;

fn stdev_of<F>(players: &PlayerStatsMap, value: F) -> f64
where
    F: Fn(&PlayerStatistics) -> f64,
{
    let values: Vec<f64> = players.values().map(value).collect();
    population_stdev(&values)
}

fn sum_of<F>(players: &PlayerStatsMap, value: F) -> f64
where
    F: Fn(&PlayerStatistics) -> f64,
{
    players.values().map(value).sum()
}

/// Pool members with no statistics record at all. Negative if the pool is
/// understated.
pub fn not_playing_players_index(players: &PlayerStatsMap, num_players: usize) -> f64 {
    (num_players as i64 - players.len() as i64) as f64
}

pub fn played_matches_index(players: &PlayerStatsMap) -> f64 {
    stdev_of(players, |s| s.num_played_matches as f64)
}

/// Sum of squared break lengths, ignoring single-round breaks.
pub fn break_shortness_index(players: &PlayerStatsMap) -> f64 {
    players
        .values()
        .flat_map(|s| s.break_lengths.iter())
        .filter(|&&len| len > 1)
        .map(|&len| (len * len) as f64)
        .sum()
}

pub fn matchup_session_length_between_breaks_index(players: &PlayerStatsMap) -> f64 {
    stdev_of(players, |s| s.second_session_length)
}

pub fn teammate_variety_index(players: &PlayerStatsMap) -> f64 {
    sum_of(players, |s| s.teammate_hist_stdev)
}

pub fn enemy_team_variety_index(players: &PlayerStatsMap) -> f64 {
    sum_of(players, |s| s.enemy_teams_hist_stdev)
}

pub fn teammate_succession_index(players: &PlayerStatsMap) -> f64 {
    sum_of(players, |s| s.consecutive_teammates_total as f64)
}

pub fn enemy_team_succession_index(players: &PlayerStatsMap) -> f64 {
    sum_of(players, |s| s.consecutive_enemies_total as f64)
}

pub fn player_engagement_fairness_index(players: &PlayerStatsMap) -> f64 {
    stdev_of(players, |s| {
        s.num_unique_people_not_played_with_or_against as f64
    })
}

pub fn not_played_with_or_against_players_index(players: &PlayerStatsMap) -> f64 {
    sum_of(players, |s| {
        s.num_unique_people_not_played_with_or_against as f64
    })
}

pub fn not_played_with_players_index(players: &PlayerStatsMap) -> f64 {
    sum_of(players, |s| s.num_unique_people_not_played_with as f64)
}

pub fn not_played_against_players_index(players: &PlayerStatsMap) -> f64 {
    sum_of(players, |s| s.num_unique_people_not_played_against as f64)
}

/// Compute all twelve indices.
pub fn calculate_global_stats(players: &PlayerStatsMap, num_players: usize) -> GlobalStatistics {
    let mut global = GlobalStatistics::new();

    for index in FairnessIndex::ALL {
        let value = match index {
            FairnessIndex::NotPlayingPlayersIndex => {
                not_playing_players_index(players, num_players)
            }
            FairnessIndex::PlayedMatchesIndex => played_matches_index(players),
            FairnessIndex::BreakShortnessIndex => break_shortness_index(players),
            FairnessIndex::MatchupSessionLengthBetweenBreaksIndex => {
                matchup_session_length_between_breaks_index(players)
            }
            FairnessIndex::TeammateVarietyIndex => teammate_variety_index(players),
            FairnessIndex::EnemyTeamVarietyIndex => enemy_team_variety_index(players),
            FairnessIndex::TeammateSuccessionIndex => teammate_succession_index(players),
            FairnessIndex::EnemyTeamSuccessionIndex => enemy_team_succession_index(players),
            FairnessIndex::PlayerEngagementFairnessIndex => {
                player_engagement_fairness_index(players)
            }
            FairnessIndex::NotPlayedWithOrAgainstPlayersIndex => {
                not_played_with_or_against_players_index(players)
            }
            FairnessIndex::NotPlayedWithPlayersIndex => not_played_with_players_index(players),
            FairnessIndex::NotPlayedAgainstPlayersIndex => {
                not_played_against_players_index(players)
            }
        };
        global.insert(index, value);
    }

    global
}
