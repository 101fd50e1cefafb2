// Snake-draft turn order.
//
// Teams are seats 1..=num_teams. Odd rounds run 1..=n, even rounds run n..=1,
// so the order repeats every 2n picks.

/// The seat on the clock for a 1-based pick number.
///
/// Total for any `pick_number >= 1` and `num_teams >= 1`.
pub fn team_on_clock(pick_number: u32, num_teams: u32) -> u32 {
    let period = 2 * num_teams;
    let m = (pick_number - 1) % period;
    if m < num_teams {
        m + 1
    } else {
        period - m
    }
}

/// Round and pick-within-round (both 1-based) for a pick number.
pub fn round_and_pick(pick_number: u32, num_teams: u32) -> (u32, u32) {
    let round = (pick_number - 1) / num_teams + 1;
    let pick_in_round = (pick_number - 1) % num_teams + 1;
    (round, pick_in_round)
}

/// The two residues of `pick mod 2n` at which `seat` is on the clock:
/// one on the ascending leg, one on the descending leg.
///
/// For the last seat the two residues are consecutive (back-to-back picks
/// at the turn), and for seat 1 the descending residue is 0.
pub fn seat_residues(seat: u32, num_teams: u32) -> [u32; 2] {
    let period = 2 * num_teams;
    [seat % period, (period + 1 - seat) % period]
}

/// Whether `pick_number` lands on one of `seat`'s turns.
pub fn is_seat_turn(pick_number: u32, seat: u32, num_teams: u32) -> bool {
    seat_residues(seat, num_teams).contains(&(pick_number % (2 * num_teams)))
}
