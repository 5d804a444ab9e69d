//! Matchup models: who plays with and against whom on one field.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{PlayerId, TeamId};

/// Two players sharing a side of the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team {
    pub players: [PlayerId; 2],
}

impl Team {
    pub fn new(player_1: PlayerId, player_2: PlayerId) -> Self {
        Self {
            players: [player_1, player_2],
        }
    }

    /// Order-independent team identifier, e.g. "A & B".
    pub fn id(&self) -> TeamId {
        let mut names = [self.players[0].as_str(), self.players[1].as_str()];
        names.sort_unstable();
        TeamId::from(format!("{} & {}", names[0], names[1]))
    }
}

/// A two-versus-two pairing on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub team_a: Team,
    pub team_b: Team,
}

impl Matchup {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Self { team_a, team_b }
    }

    /// Build a matchup from four player names: (1, 2) vs. (3, 4).
    pub fn from_names(player_1: &str, player_2: &str, player_3: &str, player_4: &str) -> Self {
        Self::new(
            Team::new(player_1.into(), player_2.into()),
            Team::new(player_3.into(), player_4.into()),
        )
    }

    /// Order-independent matchup identifier, e.g. "A & B vs. C & D".
    pub fn id(&self) -> String {
        let mut teams = [self.team_a.id(), self.team_b.id()];
        teams.sort();
        format!("{} vs. {}", teams[0], teams[1])
    }

    /// All four players, team A first.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.players.iter().chain(self.team_b.players.iter())
    }

    /// True when no player is listed twice.
    pub fn has_distinct_players(&self) -> bool {
        let mut seen = HashSet::new();
        self.players().all(|p| seen.insert(p))
    }

    /// Derive the full per-player record for this pairing.
    pub fn to_record(&self) -> MatchRecord {
        let mut record = MatchRecord::default();

        for (own, enemy) in [(&self.team_a, &self.team_b), (&self.team_b, &self.team_a)] {
            let enemy_id = enemy.id();
            for (i, player) in own.players.iter().enumerate() {
                record.all_player_uids.push(player.clone());
                record
                    .player_to_teammate
                    .insert(player.clone(), own.players[1 - i].clone());
                record
                    .player_to_enemy_team
                    .insert(player.clone(), enemy_id.clone());
                record
                    .player_to_enemy_players
                    .insert(player.clone(), enemy.players.to_vec());
            }
        }

        record
    }
}

/// One field's pairing within a round, in the flattened per-player form the
/// scoring engine consumes.
///
/// The teammate mapping is expected to be symmetric; records built through
/// [`Matchup::to_record`] always are, hand-built ones are not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Participants, each listed at most once
    pub all_player_uids: Vec<PlayerId>,

    /// Participant -> teammate
    #[serde(default)]
    pub player_to_teammate: HashMap<PlayerId, PlayerId>,

    /// Participant -> opposing team identifier
    #[serde(default)]
    pub player_to_enemy_team: HashMap<PlayerId, TeamId>,

    /// Participant -> opposing players
    #[serde(default)]
    pub player_to_enemy_players: HashMap<PlayerId, Vec<PlayerId>>,
}

impl MatchRecord {
    /// Did `player` take part in this record?
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.all_player_uids.contains(player)
    }

    pub fn teammate(&self, player: &PlayerId) -> Option<&PlayerId> {
        self.player_to_teammate.get(player)
    }

    pub fn enemy_team(&self, player: &PlayerId) -> Option<&TeamId> {
        self.player_to_enemy_team.get(player)
    }

    /// Opposing players of `player`; empty when the mapping has no entry.
    pub fn enemy_players(&self, player: &PlayerId) -> &[PlayerId] {
        self.player_to_enemy_players
            .get(player)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Order-independent key built from the opposing-team identifiers, used to
    /// spot the same pairing appearing twice. `None` if no team mapping exists.
    pub fn matchup_key(&self) -> Option<String> {
        let mut teams: Vec<&str> = self
            .player_to_enemy_team
            .values()
            .map(TeamId::as_str)
            .collect();
        if teams.is_empty() {
            return None;
        }
        teams.sort_unstable();
        teams.dedup();
        Some(teams.join(" vs. "))
    }
}

impl From<&Matchup> for MatchRecord {
    fn from(matchup: &Matchup) -> Self {
        matchup.to_record()
    }
}
