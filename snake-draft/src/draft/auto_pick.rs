// Computer-controlled pick selection.
//
// Mostly best-available, with an occasional reach down the board.

use rand::Rng;

use super::player::Player;

/// How many of the 50 table entries point at each offset from the
/// best-ranked candidate. Offset 0 takes half the mass.
pub const OFFSET_WEIGHTS: [(usize, usize); 10] = [
    (0, 25),
    (1, 9),
    (2, 5),
    (3, 3),
    (4, 2),
    (5, 2),
    (6, 1),
    (7, 1),
    (8, 1),
    (9, 1),
];

/// Number of entries in the expanded draw table.
pub const TABLE_SIZE: usize = 50;

/// Rank-weighted random player selection.
#[derive(Debug, Clone)]
pub struct AutoPicker {
    table: Vec<usize>,
}

impl Default for AutoPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoPicker {
    pub fn new() -> Self {
        let table = OFFSET_WEIGHTS
            .iter()
            .flat_map(|&(offset, count)| std::iter::repeat(offset).take(count))
            .collect();
        AutoPicker { table }
    }

    /// Draw an offset into the rank-sorted candidate list.
    ///
    /// Every table entry is reachable, so offset 9 has a 1-in-50 chance. The
    /// upstream simulator drew from `0..49` and could never land on the last
    /// entry, which capped its reaches at offset 8.
    pub fn draw_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.table[rng.gen_range(0..self.table.len())]
    }

    /// Choose one of `candidates`.
    ///
    /// Candidates are ordered by rank before the draw. When fewer remain than
    /// the drawn offset reaches, the worst-ranked candidate is taken. Returns
    /// `None` only for an empty candidate list.
    pub fn pick<'a, R: Rng + ?Sized>(
        &self,
        candidates: &[&'a Player],
        rng: &mut R,
    ) -> Option<&'a Player> {
        if candidates.is_empty() {
            return None;
        }
        let mut ordered = candidates.to_vec();
        ordered.sort_by_key(|p| p.rank);
        let offset = self.draw_offset(rng).min(ordered.len() - 1);
        Some(ordered[offset])
    }
}
