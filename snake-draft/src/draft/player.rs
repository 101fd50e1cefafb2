// Draftable players and the shared pool they are drafted from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::roster::{PositionNeeds, RosterTemplate, TeamRoster};
use super::DraftError;
use crate::standings;

/// Projected batting line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingLine {
    pub ab: f64,
    pub r: f64,
    pub hr: f64,
    pub rbi: f64,
    pub sb: f64,
    pub h: f64,
}

/// Projected pitching line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchingLine {
    pub ip: f64,
    pub er: f64,
    pub bb: f64,
    /// Hits allowed (the `H.P` catalog column).
    pub hits_allowed: f64,
    pub w: f64,
    pub so: f64,
    pub sv: f64,
}

/// Where and when a drafted player landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Seat of the drafting team (1-based).
    pub team: u32,
    /// Roster slot label, or `"-"` when no slot could be resolved.
    pub slot: String,
    pub round: u32,
    pub pick_in_round: u32,
}

/// A single draftable player.
///
/// A player is available exactly when it carries no [`Assignment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique overall rank. Lower is better.
    pub rank: u32,
    pub name: String,
    /// Eligible position tokens in catalog order (e.g. `["2B", "SS"]`).
    pub positions: Vec<String>,
    pub batting: Option<BattingLine>,
    pub pitching: Option<PitchingLine>,
    assignment: Option<Assignment>,
}

impl Player {
    /// Build an undrafted player.
    ///
    /// Rejects a zero rank, an empty position list, and a player with neither
    /// a batting nor a pitching line.
    pub fn new(
        rank: u32,
        name: impl Into<String>,
        positions: Vec<String>,
        batting: Option<BattingLine>,
        pitching: Option<PitchingLine>,
    ) -> Result<Self, DraftError> {
        let name = name.into();
        if rank == 0 {
            return Err(invalid_player(&name, "rank must be a positive integer"));
        }
        if positions.is_empty() {
            return Err(invalid_player(&name, "at least one eligible position is required"));
        }
        if batting.is_none() && pitching.is_none() {
            return Err(invalid_player(&name, "a batting or pitching projection is required"));
        }
        Ok(Player {
            rank,
            name,
            positions,
            batting,
            pitching,
            assignment: None,
        })
    }

    pub fn is_available(&self) -> bool {
        self.assignment.is_none()
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Seat of the team that drafted this player, if any.
    pub fn team(&self) -> Option<u32> {
        self.assignment.as_ref().map(|a| a.team)
    }

    /// Whether the player is eligible at the given position token.
    pub fn plays(&self, token: &str) -> bool {
        self.positions.iter().any(|p| p == token)
    }

    /// Positions joined for display, e.g. `"2B, SS"`.
    pub fn positions_display(&self) -> String {
        self.positions.join(", ")
    }

    pub fn avg(&self) -> Option<f64> {
        self.batting.and_then(|b| standings::batting_average(b.h, b.ab))
    }

    pub fn era(&self) -> Option<f64> {
        self.pitching
            .and_then(|p| standings::earned_run_average(p.er, p.ip))
    }

    pub fn whip(&self) -> Option<f64> {
        self.pitching
            .and_then(|p| standings::walks_hits_per_inning(p.bb, p.hits_allowed, p.ip))
    }
}

fn invalid_player(name: &str, message: &str) -> DraftError {
    DraftError::InvalidConfig {
        field: format!("player `{name}`"),
        message: message.to_string(),
    }
}

/// Every player in the draft, indexed by rank.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    /// Sorted ascending by rank.
    players: Vec<Player>,
    by_rank: HashMap<u32, usize>,
}

impl PlayerPool {
    /// Build a pool. Ranks must be unique.
    pub fn new(mut players: Vec<Player>) -> Result<Self, DraftError> {
        players.sort_by_key(|p| p.rank);
        let mut by_rank = HashMap::with_capacity(players.len());
        for (idx, player) in players.iter().enumerate() {
            if by_rank.insert(player.rank, idx).is_some() {
                return Err(DraftError::InvalidConfig {
                    field: "players".into(),
                    message: format!("duplicate rank {}", player.rank),
                });
            }
        }
        Ok(PlayerPool { players, by_rank })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, rank: u32) -> Option<&Player> {
        self.by_rank.get(&rank).map(|&idx| &self.players[idx])
    }

    /// All players, drafted or not.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Players not yet drafted. Callers must not rely on the iteration order.
    pub fn available_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_available())
    }

    pub fn available_count(&self) -> usize {
        self.available_players().count()
    }

    /// Players drafted by the given seat.
    pub fn team_players(&self, team: u32) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team() == Some(team))
    }

    /// Available players that fit at least one of the team's open needs.
    ///
    /// An open UT or BE slot lifts the restriction entirely.
    pub fn position_need_filter(
        &self,
        roster: &TeamRoster,
        template: &RosterTemplate,
    ) -> Vec<&Player> {
        let needs = PositionNeeds::for_roster(roster, template);
        self.available_players()
            .filter(|p| needs.accepts(&p.positions))
            .collect()
    }

    /// Mark a player as drafted.
    ///
    /// Fails with [`DraftError::InvalidState`] if the player was already
    /// assigned; the existing assignment is left untouched.
    pub fn assign(&mut self, rank: u32, assignment: Assignment) -> Result<(), DraftError> {
        let idx = *self
            .by_rank
            .get(&rank)
            .ok_or(DraftError::UnknownPlayer { rank })?;
        let player = &mut self.players[idx];
        if let Some(existing) = &player.assignment {
            return Err(DraftError::InvalidState(format!(
                "player {} (rank {}) is already assigned to team {}",
                player.name, rank, existing.team
            )));
        }
        player.assignment = Some(assignment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hitter(rank: u32, positions: &[&str]) -> Player {
        Player::new(
            rank,
            format!("Hitter {rank}"),
            positions.iter().map(|s| s.to_string()).collect(),
            Some(BattingLine {
                ab: 500.0,
                h: 140.0,
                ..Default::default()
            }),
            None,
        )
        .unwrap()
    }

    fn assignment(team: u32) -> Assignment {
        Assignment {
            team,
            slot: "UT1".into(),
            round: 1,
            pick_in_round: team,
        }
    }

    #[test]
    fn new_player_is_available() {
        let p = hitter(1, &["SS"]);
        assert!(p.is_available());
        assert!(p.assignment().is_none());
        assert_eq!(p.team(), None);
    }

    #[test]
    fn new_player_rejects_missing_projections() {
        let err = Player::new(3, "Nobody", vec!["C".into()], None, None).unwrap_err();
        assert!(matches!(err, DraftError::InvalidConfig { .. }));
    }

    #[test]
    fn new_player_rejects_empty_positions() {
        let err = Player::new(3, "Nobody", vec![], Some(BattingLine::default()), None);
        assert!(err.is_err());
    }

    #[test]
    fn new_player_rejects_rank_zero() {
        let err = Player::new(0, "Nobody", vec!["C".into()], Some(BattingLine::default()), None);
        assert!(err.is_err());
    }

    #[test]
    fn pool_rejects_duplicate_ranks() {
        let err = PlayerPool::new(vec![hitter(1, &["C"]), hitter(1, &["SS"])]).unwrap_err();
        assert!(matches!(err, DraftError::InvalidConfig { .. }));
    }

    #[test]
    fn assign_flips_availability() {
        let mut pool = PlayerPool::new(vec![hitter(2, &["C"]), hitter(1, &["SS"])]).unwrap();
        assert_eq!(pool.available_count(), 2);

        pool.assign(2, assignment(3)).unwrap();
        let p = pool.get(2).unwrap();
        assert!(!p.is_available());
        assert_eq!(p.team(), Some(3));
        assert_eq!(p.assignment().unwrap().slot, "UT1");
        assert_eq!(pool.available_count(), 1);
        assert_eq!(pool.team_players(3).count(), 1);
    }

    #[test]
    fn reassign_fails_and_keeps_first_assignment() {
        let mut pool = PlayerPool::new(vec![hitter(1, &["SS"])]).unwrap();
        pool.assign(1, assignment(1)).unwrap();

        let err = pool.assign(1, assignment(2)).unwrap_err();
        assert!(matches!(err, DraftError::InvalidState(_)));
        let p = pool.get(1).unwrap();
        assert_eq!(p.team(), Some(1));
        assert!(!p.is_available());
    }

    #[test]
    fn assign_unknown_rank() {
        let mut pool = PlayerPool::new(vec![hitter(1, &["SS"])]).unwrap();
        assert_eq!(
            pool.assign(9, assignment(1)),
            Err(DraftError::UnknownPlayer { rank: 9 })
        );
    }

    #[test]
    fn player_rate_stats() {
        let p = hitter(1, &["SS"]);
        assert_eq!(p.avg(), Some(0.28));
        assert_eq!(p.era(), None);

        let pitcher = Player::new(
            5,
            "Ace",
            vec!["P".into()],
            None,
            Some(PitchingLine {
                ip: 200.0,
                er: 60.0,
                bb: 50.0,
                hits_allowed: 170.0,
                ..Default::default()
            }),
        )
        .unwrap();
        assert_eq!(pitcher.era(), Some(2.7));
        assert_eq!(pitcher.whip(), Some(1.1));
        assert_eq!(pitcher.avg(), None);
    }

    #[test]
    fn positions_display_joins_tokens() {
        assert_eq!(hitter(1, &["2B", "SS"]).positions_display(), "2B, SS");
    }
}
