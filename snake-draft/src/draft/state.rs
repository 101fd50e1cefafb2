// Draft state: seats, pick cursor, lifecycle phase.

use serde::{Deserialize, Serialize};

use super::turn;

/// Lifecycle of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftPhase {
    /// Built but not started; configuration may still be rejected.
    Configuring,
    /// Picks are being recorded.
    InProgress,
    /// Every slot on every team has been drafted.
    Completed,
    /// An auto pick ran out of eligible players. Committed picks remain.
    Aborted,
}

/// Number of teams and the human's seat in the turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSettings {
    pub num_teams: u32,
    /// The human's fixed seat, 1..=num_teams.
    pub human_position: u32,
}

/// The pick cursor and phase of a single draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftState {
    pub num_teams: u32,
    pub human_position: u32,
    /// Next pick to be made (1-based). Only ever moves forward.
    pub current_pick: u32,
    /// Picks in the whole draft: `num_teams * slots per team`.
    pub total_picks: u32,
    pub phase: DraftPhase,
}

impl DraftState {
    pub fn new(settings: DraftSettings, slots_per_team: usize) -> Self {
        DraftState {
            num_teams: settings.num_teams,
            human_position: settings.human_position,
            current_pick: 1,
            total_picks: settings.num_teams * slots_per_team as u32,
            phase: DraftPhase::Configuring,
        }
    }

    /// Whether the cursor has run past the final pick.
    pub fn is_complete(&self) -> bool {
        self.current_pick > self.total_picks
    }

    /// Seat on the clock at the current pick.
    pub fn team_on_clock(&self) -> u32 {
        turn::team_on_clock(self.current_pick, self.num_teams)
    }

    /// Round and pick-in-round of the current pick.
    pub fn round_and_pick(&self) -> (u32, u32) {
        turn::round_and_pick(self.current_pick, self.num_teams)
    }

    /// First pick after `after` at which the human is on the clock, or
    /// `total_picks + 1` if the human has no turns left.
    pub fn next_human_pick(&self, after: u32) -> u32 {
        let mut pick = after + 1;
        while pick <= self.total_picks
            && !turn::is_seat_turn(pick, self.human_position, self.num_teams)
        {
            pick += 1;
        }
        pick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(num_teams: u32, human_position: u32, slots: usize) -> DraftState {
        DraftState::new(
            DraftSettings {
                num_teams,
                human_position,
            },
            slots,
        )
    }

    #[test]
    fn new_state_starts_at_pick_one() {
        let s = state(10, 5, 23);
        assert_eq!(s.current_pick, 1);
        assert_eq!(s.total_picks, 230);
        assert_eq!(s.phase, DraftPhase::Configuring);
        assert!(!s.is_complete());
    }

    #[test]
    fn next_human_pick_middle_seat() {
        let s = state(10, 5, 23);
        assert_eq!(s.next_human_pick(5), 16);
        assert_eq!(s.next_human_pick(16), 25);
        assert_eq!(s.next_human_pick(25), 36);
    }

    #[test]
    fn next_human_pick_end_seats_turn_back_to_back() {
        let last = state(10, 10, 23);
        assert_eq!(last.next_human_pick(10), 11);
        assert_eq!(last.next_human_pick(11), 30);

        let first = state(10, 1, 23);
        assert_eq!(first.next_human_pick(1), 20);
        assert_eq!(first.next_human_pick(20), 21);
    }

    #[test]
    fn next_human_pick_past_end() {
        let s = state(4, 2, 2);
        // Seat 2 picks at 2 and 7; after 7 nothing remains of the 8 picks.
        assert_eq!(s.next_human_pick(2), 7);
        assert_eq!(s.next_human_pick(7), 9);
    }

    #[test]
    fn complete_once_cursor_exceeds_total() {
        let mut s = state(2, 1, 1);
        s.current_pick = 2;
        assert!(!s.is_complete());
        s.current_pick = 3;
        assert!(s.is_complete());
    }
}
