//! Per-index loss weights.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::FairnessIndex;

/// Index name -> multiplier. Keys that name no fairness index are kept but
/// never contribute to the loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(HashMap<String, f64>);

impl Weights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default weighting for schedule search. Leaving someone out entirely
    /// dominates, followed by uneven match counts and then pool coverage.
    pub fn recommended() -> Self {
        [
            (FairnessIndex::NotPlayingPlayersIndex, 100_000_000.0),
            (FairnessIndex::PlayedMatchesIndex, 100_000.0),
            (FairnessIndex::NotPlayedWithOrAgainstPlayersIndex, 10_000.0),
            (FairnessIndex::MatchupSessionLengthBetweenBreaksIndex, 100.0),
            (FairnessIndex::PlayerEngagementFairnessIndex, 10.0),
            (FairnessIndex::TeammateSuccessionIndex, 100.0),
            (FairnessIndex::EnemyTeamSuccessionIndex, 10.0),
            (FairnessIndex::TeammateVarietyIndex, 100.0),
            (FairnessIndex::EnemyTeamVarietyIndex, 10.0),
            (FairnessIndex::BreakShortnessIndex, 10.0),
            (FairnessIndex::NotPlayedWithPlayersIndex, 100.0),
            (FairnessIndex::NotPlayedAgainstPlayersIndex, 10.0),
        ]
        .into_iter()
        .map(|(index, weight)| (index.name().to_string(), weight))
        .collect()
    }

    pub fn set(&mut self, name: impl Into<String>, weight: f64) {
        self.0.insert(name.into(), weight);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    /// Weight keys that do not name a fairness index.
    pub fn unknown_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .0
            .keys()
            .map(String::as_str)
            .filter(|name| name.parse::<FairnessIndex>().is_err())
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Weights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
