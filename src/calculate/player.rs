//! Per-player statistics assembly.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use crate::models::{MatchRecord, PlayerId, PlayerStatistics, TeamId, SECOND_SESSION_SENTINEL};

use super::participation::{played_rounds, BREAK, PLAYED};
use super::sequences::{
    count_consecutive_repetitions, counts_stdev, histogram, mean, population_stdev, run_lengths,
};

/// Who a player met, in chronological order of the matches they played.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encounters {
    /// Teammate per match (matches without a teammate mapping are skipped)
    pub teammates: Vec<PlayerId>,
    /// Opposing team per match (matches without a mapping are skipped)
    pub enemy_teams: Vec<TeamId>,
    /// Every opposing player, flattened
    pub enemy_players: Vec<PlayerId>,
}

/// Collect `player`'s teammates and opponents across the schedule.
pub fn collect_encounters(matchups: &[MatchRecord], player: &PlayerId) -> Encounters {
    let mut encounters = Encounters::default();

    for record in matchups.iter().filter(|r| r.contains(player)) {
        if let Some(teammate) = record.teammate(player) {
            encounters.teammates.push(teammate.clone());
        }
        if let Some(enemy_team) = record.enemy_team(player) {
            encounters.enemy_teams.push(enemy_team.clone());
        }
        encounters
            .enemy_players
            .extend(record.enemy_players(player).iter().cloned());
    }

    encounters
}

/// Pool members not covered by `seen`, excluding the player themselves.
/// Negative when `num_players` understates the observed pool.
pub fn uncovered_count(num_players: usize, seen: usize) -> i64 {
    num_players as i64 - 1 - seen as i64
}

/// Second play streak if there are at least two, otherwise the sentinel.
pub fn second_session_length(play_streaks: &[usize]) -> f64 {
    play_streaks
        .get(1)
        .map(|&len| len as f64)
        .unwrap_or(SECOND_SESSION_SENTINEL)
}

/// Build the statistics snapshot for one player.
pub fn calculate_player_stats(
    matchups: &[MatchRecord],
    player: &PlayerId,
    num_players: usize,
    num_fields: NonZeroUsize,
) -> PlayerStatistics {
    let rounds = played_rounds(matchups, player, num_fields);
    let break_lengths = run_lengths(&rounds, BREAK);
    let play_streaks = run_lengths(&rounds, PLAYED);

    let break_values: Vec<f64> = break_lengths.iter().map(|&len| len as f64).collect();

    let encounters = collect_encounters(matchups, player);

    let teammate_hist = histogram(encounters.teammates.iter().cloned());
    let enemy_teams_hist = histogram(encounters.enemy_teams.iter().cloned());
    let consecutive_teammates_hist = count_consecutive_repetitions(&encounters.teammates);
    let consecutive_enemies_hist = count_consecutive_repetitions(&encounters.enemy_teams);

    let played_with: HashSet<&PlayerId> = encounters.teammates.iter().collect();
    let played_against: HashSet<&PlayerId> = encounters.enemy_players.iter().collect();
    let played_with_or_against = played_with.union(&played_against).count();

    PlayerStatistics {
        num_played_matches: rounds.iter().filter(|&&r| r == PLAYED).count(),
        break_lengths_avg: mean(&break_values),
        break_lengths_stdev: population_stdev(&break_values),
        break_lengths_hist: histogram(break_lengths.iter().copied()),
        break_lengths,
        second_session_length: second_session_length(&play_streaks),
        matchup_lengths_played_between_breaks: play_streaks,
        teammate_hist_stdev: counts_stdev(teammate_hist.values().copied()),
        teammate_hist,
        enemy_teams_hist_stdev: counts_stdev(enemy_teams_hist.values().copied()),
        enemy_teams_hist,
        consecutive_teammates_total: consecutive_teammates_hist.values().sum(),
        consecutive_enemies_total: consecutive_enemies_hist.values().sum(),
        consecutive_teammates_hist,
        consecutive_enemies_hist,
        num_unique_people_not_played_with_or_against: uncovered_count(
            num_players,
            played_with_or_against,
        ),
        num_unique_people_not_played_with: uncovered_count(num_players, played_with.len()),
        num_unique_people_not_played_against: uncovered_count(num_players, played_against.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Matchup;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn fields(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn schedule(pairs: &[[&str; 4]]) -> Vec<MatchRecord> {
        pairs
            .iter()
            .map(|p| Matchup::from_names(p[0], p[1], p[2], p[3]).to_record())
            .collect()
    }

    #[test]
    fn test_collect_encounters_in_order() {
        let matchups = schedule(&[
            ["A", "B", "C", "D"],
            ["E", "F", "G", "H"],
            ["C", "A", "B", "E"],
        ]);
        let enc = collect_encounters(&matchups, &"A".into());

        assert_eq!(enc.teammates, vec![PlayerId::from("B"), PlayerId::from("C")]);
        assert_eq!(
            enc.enemy_teams,
            vec![TeamId::from("C & D"), TeamId::from("B & E")]
        );
        assert_eq!(
            enc.enemy_players,
            ["C", "D", "B", "E"].iter().map(|&p| PlayerId::from(p)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_collect_encounters_skips_missing_mappings() {
        let bare = MatchRecord {
            all_player_uids: vec!["A".into(), "B".into()],
            ..Default::default()
        };
        let matchups = vec![bare, Matchup::from_names("A", "C", "B", "D").to_record()];
        let enc = collect_encounters(&matchups, &"A".into());

        assert_eq!(enc.teammates, vec![PlayerId::from("C")]);
        assert_eq!(enc.enemy_teams, vec![TeamId::from("B & D")]);
        assert_eq!(enc.enemy_players.len(), 2);
    }

    #[test]
    fn test_mapping_for_non_participant_ignored() {
        // A mapping entry alone does not make someone a participant.
        let mut record = MatchRecord {
            all_player_uids: vec!["B".into()],
            ..Default::default()
        };
        record.player_to_teammate.insert("A".into(), "B".into());
        let enc = collect_encounters(&[record], &"A".into());
        assert!(enc.teammates.is_empty());
    }

    #[test]
    fn test_uncovered_count() {
        assert_eq!(uncovered_count(5, 2), 2);
        assert_eq!(uncovered_count(5, 4), 0);
        assert_eq!(uncovered_count(3, 4), -2);
    }

    #[test]
    fn test_second_session_sentinel() {
        assert_eq!(second_session_length(&[]), SECOND_SESSION_SENTINEL);
        assert_eq!(second_session_length(&[7]), 10.0);
        assert_eq!(second_session_length(&[1, 3, 2]), 3.0);
    }

    #[test]
    fn test_single_streak_gets_sentinel() {
        let matchups = schedule(&[
            ["A", "B", "C", "D"],
            ["A", "C", "B", "D"],
            ["A", "D", "B", "C"],
        ]);
        let stats = calculate_player_stats(&matchups, &"A".into(), 4, fields(1));
        assert_eq!(stats.matchup_lengths_played_between_breaks, vec![3]);
        assert_eq!(stats.second_session_length, 10.0);
        assert!(stats.break_lengths.is_empty());
        assert_eq!(stats.break_lengths_avg, 0.0);
        assert_eq!(stats.break_lengths_stdev, 0.0);
    }

    #[test]
    fn test_breaks_and_streaks() {
        let matchups = schedule(&[
            ["A", "B", "C", "D"],
            ["E", "F", "G", "H"],
            ["E", "F", "G", "H"],
            ["A", "E", "C", "G"],
            ["A", "F", "D", "H"],
            ["E", "F", "G", "H"],
        ]);
        let stats = calculate_player_stats(&matchups, &"A".into(), 8, fields(1));

        assert_eq!(stats.num_played_matches, 3);
        assert_eq!(stats.break_lengths, vec![2, 1]);
        assert!((stats.break_lengths_avg - 1.5).abs() < 1e-12);
        assert!((stats.break_lengths_stdev - 0.5).abs() < 1e-12);
        assert_eq!(stats.break_lengths_hist, HashMap::from([(2, 1), (1, 1)]));
        assert_eq!(stats.matchup_lengths_played_between_breaks, vec![1, 2]);
        assert_eq!(stats.second_session_length, 2.0);
    }

    #[test]
    fn test_teammate_histogram_and_repetition() {
        let matchups = schedule(&[
            ["A", "B", "C", "D"],
            ["A", "B", "C", "E"],
            ["A", "B", "D", "E"],
            ["A", "C", "B", "D"],
        ]);
        let stats = calculate_player_stats(&matchups, &"A".into(), 5, fields(1));

        assert_eq!(
            stats.teammate_hist,
            HashMap::from([(PlayerId::from("B"), 3), (PlayerId::from("C"), 1)])
        );
        // Counts 3 and 1 around mean 2
        assert!((stats.teammate_hist_stdev - 1.0).abs() < 1e-12);

        // B-B-B then C: the run of three is flushed, C trails and is dropped
        assert_eq!(
            stats.consecutive_teammates_hist,
            HashMap::from([(PlayerId::from("B"), 2)])
        );
        assert_eq!(stats.consecutive_teammates_total, 2);

        // Enemy teams are all different: zero repetition
        assert_eq!(stats.enemy_teams_hist.len(), 4);
        assert_eq!(stats.enemy_teams_hist_stdev, 0.0);
        assert_eq!(stats.consecutive_enemies_total, 0);
    }

    #[test]
    fn test_repeated_enemy_team_counted() {
        // C & D twice in a row, then E & F: one repetition flushed.
        let matchups = schedule(&[
            ["A", "B", "C", "D"],
            ["A", "B", "C", "D"],
            ["A", "B", "E", "F"],
        ]);
        let stats = calculate_player_stats(&matchups, &"A".into(), 6, fields(1));

        assert_eq!(
            stats.enemy_teams_hist,
            HashMap::from([(TeamId::from("C & D"), 2), (TeamId::from("E & F"), 1)])
        );
        assert!((stats.enemy_teams_hist_stdev - 0.5).abs() < 1e-12);
        assert_eq!(
            stats.consecutive_enemies_hist,
            HashMap::from([(TeamId::from("C & D"), 1)])
        );
        assert_eq!(stats.consecutive_enemies_total, 1);

        // B is A's teammate throughout and the run never closes.
        assert_eq!(stats.consecutive_teammates_total, 0);

        // C faces A & B twice with nothing after: trailing run dropped.
        let c = calculate_player_stats(&matchups, &"C".into(), 6, fields(1));
        assert_eq!(c.consecutive_enemies_total, 0);
    }

    #[test]
    fn test_trailing_teammate_run_not_counted() {
        let matchups = schedule(&[
            ["A", "C", "D", "E"],
            ["A", "B", "C", "D"],
            ["A", "B", "C", "E"],
            ["A", "B", "D", "E"],
        ]);
        let stats = calculate_player_stats(&matchups, &"A".into(), 5, fields(1));
        assert_eq!(stats.consecutive_teammates_total, 0);
        assert_eq!(
            stats.consecutive_teammates_hist,
            HashMap::from([(PlayerId::from("C"), 0)])
        );
    }

    #[test]
    fn test_coverage_counts() {
        // Hand-built records: two distinct teammates, one distinct opponent.
        let mut first = MatchRecord {
            all_player_uids: vec!["A".into(), "B".into(), "X".into()],
            ..Default::default()
        };
        first.player_to_teammate.insert("A".into(), "B".into());
        first
            .player_to_enemy_players
            .insert("A".into(), vec!["X".into()]);

        let mut second = MatchRecord {
            all_player_uids: vec!["A".into(), "C".into(), "X".into()],
            ..Default::default()
        };
        second.player_to_teammate.insert("A".into(), "C".into());
        second
            .player_to_enemy_players
            .insert("A".into(), vec!["X".into()]);

        let stats = calculate_player_stats(&[first, second], &"A".into(), 5, fields(1));
        assert_eq!(stats.num_unique_people_not_played_with, 2);
        assert_eq!(stats.num_unique_people_not_played_against, 3);
        assert_eq!(stats.num_unique_people_not_played_with_or_against, 1);
    }

    #[test]
    fn test_coverage_goes_negative_when_pool_understated() {
        let matchups = schedule(&[["A", "B", "C", "D"]]);
        let stats = calculate_player_stats(&matchups, &"A".into(), 2, fields(1));
        assert_eq!(stats.num_unique_people_not_played_with, 0);
        assert_eq!(stats.num_unique_people_not_played_against, -1);
        assert_eq!(stats.num_unique_people_not_played_with_or_against, -2);
    }

    #[test]
    fn test_absent_player() {
        let matchups = schedule(&[["A", "B", "C", "D"]]);
        let stats = calculate_player_stats(&matchups, &"Z".into(), 5, fields(1));
        assert_eq!(stats.num_played_matches, 0);
        assert_eq!(stats.break_lengths, vec![1]);
        assert!(stats.teammate_hist.is_empty());
        assert_eq!(stats.teammate_hist_stdev, 0.0);
        assert_eq!(stats.num_unique_people_not_played_with_or_against, 4);
    }
}
