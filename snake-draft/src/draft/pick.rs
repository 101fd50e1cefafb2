// Individual pick representation.

use serde::{Deserialize, Serialize};

/// Display label for the human seat.
pub const HUMAN_TEAM_LABEL: &str = "My-Team";

/// Display label for a seat: the human seat is "My-Team", every other seat
/// is a letter by seat number (seat 1 = "A").
pub fn team_label(seat: u32, human_seat: u32) -> String {
    if seat == human_seat {
        return HUMAN_TEAM_LABEL.to_string();
    }
    match char::from_u32('A' as u32 + seat.saturating_sub(1)) {
        Some(c) if c.is_ascii_uppercase() => c.to_string(),
        _ => format!("T{seat}"),
    }
}

/// A single completed draft pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    /// Absolute pick number (1-indexed).
    pub pick_number: u32,
    /// Seat of the drafting team (1-indexed).
    pub team: u32,
    /// Display label of the drafting team.
    pub team_label: String,
    /// Rank of the drafted player.
    pub rank: u32,
    pub player_name: String,
    /// Eligible positions as listed in the catalog.
    pub positions: Vec<String>,
    pub round: u32,
    pub pick_in_round: u32,
    /// Assigned roster slot, or "-" when none fit.
    pub slot: String,
    /// Whether the human seat made this pick.
    pub by_human: bool,
}
