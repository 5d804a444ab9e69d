//! Structural schedule checks: duplicate pairings and games per player.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{MatchRecord, PlayerId};

/// Summary of a schedule's structural fairness.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleAudit {
    pub total_matchups: usize,

    /// Matchup key -> occurrences, only for keys seen more than once
    pub duplicates: BTreeMap<String, usize>,

    /// Records each player appears in
    pub games_per_player: BTreeMap<PlayerId, usize>,

    pub min_games: usize,

    pub max_games: usize,

    /// Distinct two-versus-two pairings possible for the pool
    pub max_unique_matchups: u64,
}

impl ScheduleAudit {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    /// Every player appears equally often.
    pub fn is_fair(&self) -> bool {
        self.min_games == self.max_games
    }
}

/// Number of distinct 2-vs-2 matchups for `n` players: n(n-1)(n-2)(n-3)/8.
pub fn max_unique_matchups(n: usize) -> u64 {
    if n < 4 {
        return 0;
    }
    let n = n as u64;
    n * (n - 1) * (n - 2) * (n - 3) / 8
}

/// Audit `records` for a pool of `num_players`.
pub fn audit_schedule(records: &[MatchRecord], num_players: usize) -> ScheduleAudit {
    let mut matchup_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut games_per_player: BTreeMap<PlayerId, usize> = BTreeMap::new();

    for record in records {
        if let Some(key) = record.matchup_key() {
            *matchup_counts.entry(key).or_insert(0) += 1;
        }
        for player in &record.all_player_uids {
            *games_per_player.entry(player.clone()).or_insert(0) += 1;
        }
    }

    let duplicates = matchup_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .collect();

    let min_games = games_per_player.values().copied().min().unwrap_or(0);
    let max_games = games_per_player.values().copied().max().unwrap_or(0);

    ScheduleAudit {
        total_matchups: records.len(),
        duplicates,
        games_per_player,
        min_games,
        max_games,
        max_unique_matchups: max_unique_matchups(num_players),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Matchup;

    fn schedule(pairs: &[[&str; 4]]) -> Vec<MatchRecord> {
        pairs
            .iter()
            .map(|p| Matchup::from_names(p[0], p[1], p[2], p[3]).to_record())
            .collect()
    }

    #[test]
    fn test_max_unique_matchups() {
        assert_eq!(max_unique_matchups(3), 0);
        assert_eq!(max_unique_matchups(4), 3);
        assert_eq!(max_unique_matchups(5), 15);
        assert_eq!(max_unique_matchups(8), 210);
    }

    #[test]
    fn test_detects_duplicates_regardless_of_side() {
        let records = schedule(&[
            ["A", "B", "C", "D"],
            ["A", "C", "B", "D"],
            ["D", "C", "B", "A"],
        ]);
        let audit = audit_schedule(&records, 4);

        assert!(audit.has_duplicates());
        assert_eq!(audit.duplicates.get("A & B vs. C & D"), Some(&2));
        assert_eq!(audit.duplicates.len(), 1);
    }

    #[test]
    fn test_games_per_player() {
        let records = schedule(&[["A", "B", "C", "D"], ["A", "B", "C", "E"]]);
        let audit = audit_schedule(&records, 5);

        assert_eq!(audit.games_per_player.get(&PlayerId::from("A")), Some(&2));
        assert_eq!(audit.games_per_player.get(&PlayerId::from("E")), Some(&1));
        assert_eq!(audit.min_games, 1);
        assert_eq!(audit.max_games, 2);
        assert!(!audit.is_fair());
        assert!(!audit.has_duplicates());
    }

    #[test]
    fn test_fair_schedule() {
        let records = schedule(&[
            ["A", "B", "C", "D"],
            ["A", "C", "B", "D"],
            ["A", "D", "B", "C"],
        ]);
        let audit = audit_schedule(&records, 4);
        assert!(audit.is_fair());
        assert!(!audit.has_duplicates());
        assert_eq!(audit.total_matchups, 3);
        assert_eq!(audit.max_unique_matchups, 3);
    }

    #[test]
    fn test_empty_schedule() {
        let audit = audit_schedule(&[], 0);
        assert_eq!(audit.min_games, 0);
        assert_eq!(audit.max_games, 0);
        assert!(audit.is_fair());
    }
}
