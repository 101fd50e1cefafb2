// The draft state machine.
//
// Owns the player pool, one roster per seat, and the pick history. Every
// computer-controlled turn between two human turns is drafted synchronously
// inside `record_human_pick`.

use rand::Rng;
use tracing::{debug, info, warn};

use super::auto_pick::AutoPicker;
use super::pick::{team_label, DraftPick};
use super::player::{Assignment, Player, PlayerPool};
use super::roster::{self, PositionNeeds, RosterSlot, RosterTemplate, TeamRoster, UNASSIGNED_SLOT};
use super::state::{DraftPhase, DraftSettings, DraftState};
use super::turn;
use super::DraftError;

/// One row of a team's roster board: a slot and whoever fills it.
#[derive(Debug, Clone, Copy)]
pub struct RosterEntry<'a> {
    pub slot: &'a RosterSlot,
    pub player: Option<&'a Player>,
}

/// A single, isolated snake draft.
///
/// Randomness comes only from `rng`, so a seeded generator replays the same
/// draft.
#[derive(Debug)]
pub struct DraftEngine<R> {
    state: DraftState,
    template: RosterTemplate,
    pool: PlayerPool,
    /// Indexed by seat - 1.
    rosters: Vec<TeamRoster>,
    picks: Vec<DraftPick>,
    picker: AutoPicker,
    rng: R,
}

impl<R: Rng> DraftEngine<R> {
    /// Create a draft in the `Configuring` phase. Nothing is validated until
    /// [`DraftEngine::begin`].
    pub fn new(settings: DraftSettings, template: RosterTemplate, pool: PlayerPool, rng: R) -> Self {
        let rosters = (0..settings.num_teams)
            .map(|_| TeamRoster::new(&template))
            .collect();
        DraftEngine {
            state: DraftState::new(settings, template.len()),
            template,
            pool,
            rosters,
            picks: Vec::new(),
            picker: AutoPicker::new(),
            rng,
        }
    }

    /// Validate the configuration, auto-draft every pick ahead of the human's
    /// first turn, and move to `InProgress`.
    pub fn begin(&mut self) -> Result<(), DraftError> {
        self.expect_phase(DraftPhase::Configuring)?;
        self.validate()?;

        info!(
            "Draft starting: {} teams, {} slots per team, human at seat {}, {} players in pool",
            self.state.num_teams,
            self.template.len(),
            self.state.human_position,
            self.pool.len()
        );
        if (self.pool.len() as u64) < self.state.total_picks as u64 {
            warn!(
                "Player pool ({}) is smaller than the {} picks needed to fill every roster",
                self.pool.len(),
                self.state.total_picks
            );
        }

        self.state.phase = DraftPhase::InProgress;
        let first_human_pick = self.state.human_position;
        if let Err(e) = self.run_auto_picks(1, first_human_pick) {
            self.abort();
            return Err(e);
        }
        self.state.current_pick = first_human_pick;
        Ok(())
    }

    fn validate(&self) -> Result<(), DraftError> {
        let n = self.state.num_teams;
        if n < 2 {
            return Err(DraftError::InvalidConfig {
                field: "num_teams".into(),
                message: format!("at least 2 teams are required, got {n}"),
            });
        }
        if self.template.is_empty() {
            return Err(DraftError::InvalidConfig {
                field: "roster".into(),
                message: "roster template has no slots".into(),
            });
        }
        let seat = self.state.human_position;
        if !(1..=n).contains(&seat) {
            return Err(DraftError::InvalidConfig {
                field: "human_position".into(),
                message: format!("must be between 1 and {n}, got {seat}"),
            });
        }
        Ok(())
    }

    /// Draft the human's player at the current pick, then auto-draft up to the
    /// human's next turn (or the end of the draft).
    ///
    /// Returns every pick made by this call, the human's first. A rejected
    /// selection leaves the draft untouched.
    pub fn record_human_pick(&mut self, rank: u32) -> Result<&[DraftPick], DraftError> {
        self.expect_phase(DraftPhase::InProgress)?;

        let player = self
            .pool
            .get(rank)
            .ok_or(DraftError::UnknownPlayer { rank })?;
        if !player.is_available() {
            return Err(DraftError::AlreadyDrafted { rank });
        }
        let roster = self.human_roster().ok_or_else(|| {
            DraftError::InvalidState(format!(
                "human seat {} has no roster",
                self.state.human_position
            ))
        })?;
        let needs = PositionNeeds::for_roster(roster, &self.template);
        if !needs.accepts(&player.positions) {
            return Err(DraftError::PositionNotNeeded { rank });
        }

        let pick_number = self.state.current_pick;
        let human = self.state.human_position;
        debug_assert_eq!(turn::team_on_clock(pick_number, self.state.num_teams), human);

        let start = self.picks.len();
        self.commit(pick_number, human, rank, true)?;
        if let Some(pick) = self.picks.last() {
            info!(
                "Pick {} (round {}.{}): {} drafts {} into {}",
                pick.pick_number,
                pick.round,
                pick.pick_in_round,
                pick.team_label,
                pick.player_name,
                pick.slot
            );
        }

        let stop = self.state.next_human_pick(pick_number);
        if let Err(e) = self.run_auto_picks(pick_number + 1, stop) {
            self.abort();
            return Err(e);
        }
        self.state.current_pick = stop;

        if self.state.is_complete() {
            self.state.phase = DraftPhase::Completed;
            info!("Draft complete after {} picks", self.picks.len());
        }
        Ok(&self.picks[start..])
    }

    /// Auto-draft picks `from..to` for whichever seats are on the clock.
    ///
    /// Does not move the pick cursor.
    fn run_auto_picks(&mut self, from: u32, to: u32) -> Result<(), DraftError> {
        let n = self.state.num_teams;
        for pick_number in from..to {
            let seat = turn::team_on_clock(pick_number, n);
            let rank = {
                let roster = &self.rosters[seat_index(seat)];
                let candidates = self.pool.position_need_filter(roster, &self.template);
                match self.picker.pick(&candidates, &mut self.rng) {
                    Some(player) => player.rank,
                    None => {
                        warn!(
                            "Pick {}: seat {} has no eligible players left",
                            pick_number, seat
                        );
                        return Err(DraftError::PoolExhausted { pick: pick_number });
                    }
                }
            };
            self.commit(pick_number, seat, rank, false)?;
            if let Some(pick) = self.picks.last() {
                debug!(
                    "Auto pick {}: {} takes #{} {} ({})",
                    pick.pick_number, pick.team_label, pick.rank, pick.player_name, pick.slot
                );
            }
        }
        Ok(())
    }

    /// Assign a player to a seat at a pick number and record the pick.
    fn commit(
        &mut self,
        pick_number: u32,
        seat: u32,
        rank: u32,
        by_human: bool,
    ) -> Result<(), DraftError> {
        let (round, pick_in_round) = turn::round_and_pick(pick_number, self.state.num_teams);
        let idx = seat_index(seat);

        let player = self
            .pool
            .get(rank)
            .ok_or(DraftError::UnknownPlayer { rank })?;
        let slot = match roster::choose_slot(&player.positions, &self.template, &self.rosters[idx])
        {
            Some(label) => label.to_string(),
            None => {
                warn!(
                    "Pick {}: no open slot fits {} ({}), recording as unassigned",
                    pick_number,
                    player.name,
                    player.positions_display()
                );
                UNASSIGNED_SLOT.to_string()
            }
        };
        let player_name = player.name.clone();
        let positions = player.positions.clone();

        if !player.is_available() {
            return Err(DraftError::AlreadyDrafted { rank });
        }
        // Roster first, so a refused fill leaves the pool untouched.
        if slot != UNASSIGNED_SLOT && !self.rosters[idx].fill(&self.template, &slot, rank) {
            warn!(
                "Pick {}: slot {} on seat {} could not take {}",
                pick_number, slot, seat, player_name
            );
            return Err(DraftError::InvalidState(format!(
                "slot {slot} on seat {seat} is not open"
            )));
        }
        self.pool.assign(
            rank,
            Assignment {
                team: seat,
                slot: slot.clone(),
                round,
                pick_in_round,
            },
        )?;

        self.picks.push(DraftPick {
            pick_number,
            team: seat,
            team_label: team_label(seat, self.state.human_position),
            rank,
            player_name,
            positions,
            round,
            pick_in_round,
            slot,
            by_human,
        });
        Ok(())
    }

    fn abort(&mut self) {
        self.state.phase = DraftPhase::Aborted;
        self.state.current_pick = self.picks.len() as u32 + 1;
        warn!("Draft aborted at pick {}", self.state.current_pick);
    }

    fn expect_phase(&self, expected: DraftPhase) -> Result<(), DraftError> {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(DraftError::WrongPhase {
                expected,
                actual: self.state.phase,
            })
        }
    }
}

impl<R> DraftEngine<R> {
    pub fn phase(&self) -> DraftPhase {
        self.state.phase
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    pub fn settings(&self) -> DraftSettings {
        DraftSettings {
            num_teams: self.state.num_teams,
            human_position: self.state.human_position,
        }
    }

    pub fn current_pick(&self) -> u32 {
        self.state.current_pick
    }

    pub fn total_picks(&self) -> u32 {
        self.state.total_picks
    }

    /// Whether the cursor has passed the final pick.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Round of the current pick.
    pub fn current_round(&self) -> u32 {
        self.state.round_and_pick().0
    }

    /// Seat on the clock at the current pick.
    pub fn team_on_clock_now(&self) -> u32 {
        self.state.team_on_clock()
    }

    pub fn template(&self) -> &RosterTemplate {
        &self.template
    }

    pub fn pool(&self) -> &PlayerPool {
        &self.pool
    }

    /// Every pick so far, in pick order.
    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    /// The last `limit` picks, newest first.
    pub fn recent_picks(&self, limit: usize) -> impl Iterator<Item = &DraftPick> {
        self.picks.iter().rev().take(limit)
    }

    /// Seats 1..=num_teams.
    pub fn seats(&self) -> impl Iterator<Item = u32> {
        1..=self.state.num_teams
    }

    pub fn team_label(&self, seat: u32) -> String {
        team_label(seat, self.state.human_position)
    }

    pub fn roster(&self, seat: u32) -> Option<&TeamRoster> {
        self.rosters.get(seat.checked_sub(1)? as usize)
    }

    /// `None` while the configured seat is outside `1..=num_teams`.
    fn human_roster(&self) -> Option<&TeamRoster> {
        self.roster(self.state.human_position)
    }

    /// Players the human may draft right now, best rank first. Empty when the
    /// human seat does not exist.
    pub fn human_options(&self) -> Vec<&Player> {
        let Some(roster) = self.human_roster() else {
            return Vec::new();
        };
        let mut options = self.pool.position_need_filter(roster, &self.template);
        options.sort_by_key(|p| p.rank);
        options
    }

    /// A seat's roster in slot order, with each slot's occupant.
    pub fn roster_entries(&self, seat: u32) -> Option<Vec<RosterEntry<'_>>> {
        let roster = self.roster(seat)?;
        Some(
            self.template
                .slots()
                .iter()
                .enumerate()
                .map(|(idx, slot)| RosterEntry {
                    slot,
                    player: roster.player_at(idx).and_then(|rank| self.pool.get(rank)),
                })
                .collect(),
        )
    }
}

fn seat_index(seat: u32) -> usize {
    (seat - 1) as usize
}
