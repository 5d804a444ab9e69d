//! Exportable scoring reports.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Evaluation, GlobalStatistics, MatchRecord, PlayerId, PlayerStatistics, ScheduleId};

/// Full result of scoring one schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Content fingerprint of the scored schedule
    pub schedule_id: ScheduleId,

    /// When this report was computed
    pub computed_at: DateTime<Utc>,

    pub num_players: usize,

    pub num_fields: usize,

    /// Number of match records in the schedule
    pub num_matchups: usize,

    pub loss: f64,

    pub global: GlobalStatistics,

    pub players: BTreeMap<PlayerId, PlayerStatistics>,
}

impl ScoreReport {
    pub fn new(
        records: &[MatchRecord],
        num_players: usize,
        num_fields: usize,
        evaluation: Evaluation,
    ) -> Self {
        Self {
            schedule_id: schedule_fingerprint(records),
            computed_at: Utc::now(),
            num_players,
            num_fields,
            num_matchups: records.len(),
            loss: evaluation.loss,
            global: evaluation.global,
            players: evaluation.players,
        }
    }

    /// One line per player, for JSONL export.
    pub fn player_lines(&self) -> Vec<PlayerReport> {
        self.players
            .iter()
            .map(|(player, stats)| PlayerReport {
                schedule_id: self.schedule_id.clone(),
                player: player.clone(),
                stats: stats.clone(),
            })
            .collect()
    }
}

/// A single player's statistics, tagged with the schedule they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReport {
    pub schedule_id: ScheduleId,
    pub player: PlayerId,
    pub stats: PlayerStatistics,
}

/// Fingerprint a schedule from the full content of its records, in order.
///
/// Every record contributes its sorted participants and each of its mappings
/// sorted by player, each section preceded by its entry count. Two schedules
/// share a fingerprint only if they score identically; the listing order of
/// players inside a record does not matter.
pub fn schedule_fingerprint(records: &[MatchRecord]) -> ScheduleId {
    let mut fields = Vec::new();
    for record in records {
        push_canonical_record(record, &mut fields);
    }
    ScheduleId::generate(&fields)
}

fn push_canonical_record(record: &MatchRecord, fields: &mut Vec<String>) {
    let mut players: Vec<&str> = record.all_player_uids.iter().map(PlayerId::as_str).collect();
    players.sort_unstable();
    fields.push(players.len().to_string());
    fields.extend(players.into_iter().map(str::to_string));

    for mapping in [&record.player_to_teammate, &record.player_to_enemy_team] {
        let sorted: BTreeMap<&str, &str> = mapping
            .iter()
            .map(|(player, other)| (player.as_str(), other.as_str()))
            .collect();
        fields.push(sorted.len().to_string());
        for (player, other) in sorted {
            fields.push(player.to_string());
            fields.push(other.to_string());
        }
    }

    let enemies: BTreeMap<&str, &Vec<PlayerId>> = record
        .player_to_enemy_players
        .iter()
        .map(|(player, list)| (player.as_str(), list))
        .collect();
    fields.push(enemies.len().to_string());
    for (player, list) in enemies {
        let mut names: Vec<&str> = list.iter().map(PlayerId::as_str).collect();
        names.sort_unstable();
        fields.push(player.to_string());
        fields.push(names.len().to_string());
        fields.extend(names.into_iter().map(str::to_string));
    }
}
