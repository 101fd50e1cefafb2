// Roster construction, position needs, and slot assignment.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Utility slot class: accepts any position.
pub const UTILITY: &str = "UT";
/// Bench slot class: accepts any position.
pub const BENCH: &str = "BE";
/// Middle infield: 2B or SS.
pub const MIDDLE_INFIELD: &str = "MI";
/// Corner infield: 1B or 3B.
pub const CORNER_INFIELD: &str = "CI";
/// Generic pitcher slot class.
pub const PITCHER: &str = "P";
/// Recorded in place of a slot label when no open slot fits the player.
pub const UNASSIGNED_SLOT: &str = "-";

const MIDDLE_INFIELD_POSITIONS: [&str; 2] = ["2B", "SS"];
const CORNER_INFIELD_POSITIONS: [&str; 2] = ["1B", "3B"];
const PITCHER_POSITIONS: [&str; 2] = ["SP", "RP"];

/// Slot counts per position category, from `[roster]` in league.toml.
///
/// 1B, 2B, 3B and SS always get exactly one dedicated slot each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterCounts {
    pub catchers: usize,
    pub outfielders: usize,
    pub corner_infielders: usize,
    pub middle_infielders: usize,
    pub pitchers: usize,
    pub utility: usize,
    pub bench: usize,
}

impl Default for RosterCounts {
    fn default() -> Self {
        RosterCounts {
            catchers: 1,
            outfielders: 3,
            corner_infielders: 1,
            middle_infielders: 1,
            pitchers: 9,
            utility: 2,
            bench: 2,
        }
    }
}

/// A single labelled slot in the roster template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    /// Unique label, e.g. "C1", "2B", "OF3", "BE2".
    pub label: String,
    /// Fill priority; lower fills first when several slots qualify.
    pub num: usize,
}

impl RosterSlot {
    /// The position class this slot holds: the label minus any numeric suffix.
    pub fn position_class(&self) -> &str {
        slot_class(&self.label)
    }

    /// Whether the slot accepts any position (UT or BE).
    pub fn is_universal(&self) -> bool {
        matches!(self.position_class(), UTILITY | BENCH)
    }
}

/// Strip the trailing fill-order digits from a slot label ("OF2" -> "OF").
pub fn slot_class(label: &str) -> &str {
    label.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// The ordered slot list every team in a draft must fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTemplate {
    slots: Vec<RosterSlot>,
}

impl RosterTemplate {
    /// Build the standard template from slot counts.
    ///
    /// Order: catchers, 1B, 2B, 3B, SS, outfielders, middle infielders,
    /// corner infielders, pitchers, utility, bench.
    pub fn from_counts(counts: &RosterCounts) -> Self {
        let mut labels: Vec<String> = Vec::new();
        push_numbered(&mut labels, "C", counts.catchers);
        labels.extend(["1B", "2B", "3B", "SS"].iter().map(|s| s.to_string()));
        push_numbered(&mut labels, "OF", counts.outfielders);
        push_numbered(&mut labels, MIDDLE_INFIELD, counts.middle_infielders);
        push_numbered(&mut labels, CORNER_INFIELD, counts.corner_infielders);
        push_numbered(&mut labels, PITCHER, counts.pitchers);
        push_numbered(&mut labels, UTILITY, counts.utility);
        push_numbered(&mut labels, BENCH, counts.bench);
        Self::from_labels(labels)
    }

    /// Build a template from labels in fill-priority order.
    ///
    /// Duplicate labels after the first are dropped.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let slots = labels
            .into_iter()
            .map(Into::<String>::into)
            .filter(|label| seen.insert(label.clone()))
            .enumerate()
            .map(|(num, label)| RosterSlot { label, num })
            .collect();
        RosterTemplate { slots }
    }

    pub fn slots(&self) -> &[RosterSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the slot with the given label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.label == label)
    }
}

fn push_numbered(labels: &mut Vec<String>, prefix: &str, count: usize) {
    labels.extend((1..=count).map(|i| format!("{prefix}{i}")));
}

/// One team's fill state over the shared template.
///
/// Entries are aligned with `RosterTemplate::slots()` and hold the rank of
/// the player occupying each slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoster {
    filled: Vec<Option<u32>>,
}

impl TeamRoster {
    /// An empty roster for the given template.
    pub fn new(template: &RosterTemplate) -> Self {
        TeamRoster {
            filled: vec![None; template.len()],
        }
    }

    /// Rank of the player in the slot at `idx`, if filled.
    pub fn player_at(&self, idx: usize) -> Option<u32> {
        self.filled.get(idx).copied().flatten()
    }

    /// Rank of the player in the slot with the given label.
    pub fn player_in(&self, template: &RosterTemplate, label: &str) -> Option<u32> {
        template.index_of(label).and_then(|idx| self.player_at(idx))
    }

    /// Put a player into a slot. Returns `false` if the label is unknown or
    /// the slot is already occupied.
    pub fn fill(&mut self, template: &RosterTemplate, label: &str, rank: u32) -> bool {
        match template.index_of(label) {
            Some(idx) if self.filled[idx].is_none() => {
                self.filled[idx] = Some(rank);
                true
            }
            _ => false,
        }
    }

    /// Open slots in ascending fill priority.
    pub fn open_slots<'a>(
        &'a self,
        template: &'a RosterTemplate,
    ) -> impl Iterator<Item = &'a RosterSlot> + 'a {
        template
            .slots()
            .iter()
            .zip(&self.filled)
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(slot, _)| slot)
    }

    pub fn filled_count(&self) -> usize {
        self.filled.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.filled.iter().all(Option::is_some)
    }
}

/// Position tokens a team can still use, derived from its open slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionNeeds {
    /// An open UT or BE slot: any player fits.
    pub any: bool,
    /// Open slot classes plus the concrete positions they admit.
    pub positions: BTreeSet<String>,
}

impl PositionNeeds {
    pub fn for_roster(roster: &TeamRoster, template: &RosterTemplate) -> Self {
        let mut needs = PositionNeeds::default();
        for slot in roster.open_slots(template) {
            let class = slot.position_class();
            match class {
                UTILITY | BENCH => needs.any = true,
                MIDDLE_INFIELD => needs.extend(&MIDDLE_INFIELD_POSITIONS),
                CORNER_INFIELD => needs.extend(&CORNER_INFIELD_POSITIONS),
                PITCHER => needs.extend(&PITCHER_POSITIONS),
                _ => {}
            }
            needs.positions.insert(class.to_string());
        }
        needs
    }

    fn extend(&mut self, tokens: &[&str]) {
        self.positions.extend(tokens.iter().map(|t| t.to_string()));
    }

    /// Whether a player with these eligible positions fills a need.
    pub fn accepts(&self, positions: &[String]) -> bool {
        self.any || positions.iter().any(|p| self.positions.contains(p))
    }

    /// No open slots at all.
    pub fn is_empty(&self) -> bool {
        !self.any && self.positions.is_empty()
    }
}

/// Slot classes to try for a player, in priority order: own positions,
/// then MI, CI and P alternates the player qualifies for, then UT and BE.
pub fn candidate_tokens(positions: &[String]) -> Vec<&str> {
    let mut tokens: Vec<&str> = positions.iter().map(String::as_str).collect();
    if eligible_at_any(positions, &MIDDLE_INFIELD_POSITIONS) {
        tokens.push(MIDDLE_INFIELD);
    }
    if eligible_at_any(positions, &CORNER_INFIELD_POSITIONS) {
        tokens.push(CORNER_INFIELD);
    }
    if eligible_at_any(positions, &PITCHER_POSITIONS) && !tokens.contains(&PITCHER) {
        tokens.push(PITCHER);
    }
    tokens.push(UTILITY);
    tokens.push(BENCH);
    tokens
}

fn eligible_at_any(positions: &[String], group: &[&str]) -> bool {
    positions.iter().any(|p| group.contains(&p.as_str()))
}

/// Pick the best open slot for a player.
///
/// For each candidate token in priority order, returns the lowest-`num` open
/// slot whose label contains the token, so a catcher with "C1" taken lands in
/// an open "CI1" before "UT1". `None` means no open slot fits; the caller
/// records [`UNASSIGNED_SLOT`].
pub fn choose_slot<'t>(
    positions: &[String],
    template: &'t RosterTemplate,
    roster: &TeamRoster,
) -> Option<&'t str> {
    for token in candidate_tokens(positions) {
        let found = template
            .slots()
            .iter()
            .enumerate()
            .find(|(idx, slot)| roster.player_at(*idx).is_none() && slot.label.contains(token));
        if let Some((_, slot)) = found {
            return Some(slot.label.as_str());
        }
    }
    None
}
