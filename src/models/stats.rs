//! Derived statistics models.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{PlayerId, TeamId};

/// Second-session length reported for players with fewer than two play streaks.
pub const SECOND_SESSION_SENTINEL: f64 = 10.0;

/// Read-only participation snapshot for one player.
///
/// Histograms are hash maps with no ordering guarantee; every consumer
/// (sum, stdev) is permutation-invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    /// Rounds in which the player was on any field
    pub num_played_matches: usize,

    /// Lengths of consecutive break runs, in order
    pub break_lengths: Vec<usize>,

    pub break_lengths_avg: f64,

    pub break_lengths_stdev: f64,

    /// Break length -> number of breaks of that length
    pub break_lengths_hist: HashMap<usize, usize>,

    /// Lengths of consecutive play streaks, in order
    pub matchup_lengths_played_between_breaks: Vec<usize>,

    /// Second play streak length, or [`SECOND_SESSION_SENTINEL`]
    pub second_session_length: f64,

    /// Teammate -> number of matches together
    pub teammate_hist: HashMap<PlayerId, usize>,

    pub teammate_hist_stdev: f64,

    /// Opposing team -> number of matches against it
    pub enemy_teams_hist: HashMap<TeamId, usize>,

    pub enemy_teams_hist_stdev: f64,

    /// Teammate -> repeated back-to-back pairings
    pub consecutive_teammates_hist: HashMap<PlayerId, usize>,

    /// Opposing team -> repeated back-to-back pairings
    pub consecutive_enemies_hist: HashMap<TeamId, usize>,

    pub consecutive_teammates_total: usize,

    pub consecutive_enemies_total: usize,

    /// Pool members never met as teammate or opponent (may be negative)
    pub num_unique_people_not_played_with_or_against: i64,

    /// Pool members never partnered with (may be negative)
    pub num_unique_people_not_played_with: i64,

    /// Pool members never faced (may be negative)
    pub num_unique_people_not_played_against: i64,
}

/// The twelve global fairness indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessIndex {
    NotPlayingPlayersIndex,
    PlayedMatchesIndex,
    BreakShortnessIndex,
    MatchupSessionLengthBetweenBreaksIndex,
    TeammateVarietyIndex,
    EnemyTeamVarietyIndex,
    TeammateSuccessionIndex,
    EnemyTeamSuccessionIndex,
    PlayerEngagementFairnessIndex,
    NotPlayedWithOrAgainstPlayersIndex,
    NotPlayedWithPlayersIndex,
    NotPlayedAgainstPlayersIndex,
}

impl FairnessIndex {
    pub const ALL: [FairnessIndex; 12] = [
        FairnessIndex::NotPlayingPlayersIndex,
        FairnessIndex::PlayedMatchesIndex,
        FairnessIndex::BreakShortnessIndex,
        FairnessIndex::MatchupSessionLengthBetweenBreaksIndex,
        FairnessIndex::TeammateVarietyIndex,
        FairnessIndex::EnemyTeamVarietyIndex,
        FairnessIndex::TeammateSuccessionIndex,
        FairnessIndex::EnemyTeamSuccessionIndex,
        FairnessIndex::PlayerEngagementFairnessIndex,
        FairnessIndex::NotPlayedWithOrAgainstPlayersIndex,
        FairnessIndex::NotPlayedWithPlayersIndex,
        FairnessIndex::NotPlayedAgainstPlayersIndex,
    ];

    /// Stable external name, also used as the weight key.
    pub fn name(&self) -> &'static str {
        match self {
            FairnessIndex::NotPlayingPlayersIndex => "not_playing_players_index",
            FairnessIndex::PlayedMatchesIndex => "played_matches_index",
            FairnessIndex::BreakShortnessIndex => "break_shortness_index",
            FairnessIndex::MatchupSessionLengthBetweenBreaksIndex => {
                "matchup_session_length_between_breaks_index"
            }
            FairnessIndex::TeammateVarietyIndex => "teammate_variety_index",
            FairnessIndex::EnemyTeamVarietyIndex => "enemy_team_variety_index",
            FairnessIndex::TeammateSuccessionIndex => "teammate_succession_index",
            FairnessIndex::EnemyTeamSuccessionIndex => "enemy_team_succession_index",
            FairnessIndex::PlayerEngagementFairnessIndex => "player_engagement_fairness_index",
            FairnessIndex::NotPlayedWithOrAgainstPlayersIndex => {
                "not_played_with_or_against_players_index"
            }
            FairnessIndex::NotPlayedWithPlayersIndex => "not_played_with_players_index",
            FairnessIndex::NotPlayedAgainstPlayersIndex => "not_played_against_players_index",
        }
    }
}

impl fmt::Display for FairnessIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FairnessIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FairnessIndex::ALL
            .iter()
            .copied()
            .find(|index| index.name() == s)
            .ok_or_else(|| format!("unknown fairness index: {}", s))
    }
}

/// Index name -> value, produced once per scoring call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalStatistics(BTreeMap<FairnessIndex, f64>);

impl GlobalStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: FairnessIndex, value: f64) {
        self.0.insert(index, value);
    }

    pub fn value(&self, index: FairnessIndex) -> Option<f64> {
        self.0.get(&index).copied()
    }

    /// Look up an index by its external name.
    pub fn get(&self, name: &str) -> Option<f64> {
        name.parse().ok().and_then(|index| self.value(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FairnessIndex, f64)> + '_ {
        self.0.iter().map(|(index, value)| (*index, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of scoring one schedule, including the per-player snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub players: BTreeMap<PlayerId, PlayerStatistics>,
    pub global: GlobalStatistics,
    pub loss: f64,
}
