// Projected standings: per-team stat totals, rate stats, and category ranks.

use serde::Serialize;

use crate::draft::engine::DraftEngine;
use crate::draft::player::Player;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// H / AB to 3 places. `None` without at-bats.
pub fn batting_average(h: f64, ab: f64) -> Option<f64> {
    (ab > 0.0).then(|| round_to(h / ab, 3))
}

/// 9 * ER / IP to 2 places. `None` without innings.
pub fn earned_run_average(er: f64, ip: f64) -> Option<f64> {
    (ip > 0.0).then(|| round_to(9.0 * er / ip, 2))
}

/// (BB + H) / IP to 2 places. `None` without innings.
pub fn walks_hits_per_inning(bb: f64, hits_allowed: f64, ip: f64) -> Option<f64> {
    (ip > 0.0).then(|| round_to((bb + hits_allowed) / ip, 2))
}

/// Summed projections for one team.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTotals {
    pub seat: u32,
    pub label: String,
    pub ab: f64,
    pub h: f64,
    pub r: f64,
    pub hr: f64,
    pub rbi: f64,
    pub sb: f64,
    pub ip: f64,
    pub er: f64,
    pub w: f64,
    pub so: f64,
    pub sv: f64,
    pub hits_allowed: f64,
    pub bb: f64,
}

impl TeamTotals {
    pub fn from_players<'a>(
        seat: u32,
        label: impl Into<String>,
        players: impl IntoIterator<Item = &'a Player>,
    ) -> Self {
        let mut t = TeamTotals {
            seat,
            label: label.into(),
            ..Default::default()
        };
        for p in players {
            if let Some(b) = p.batting {
                t.ab += b.ab;
                t.h += b.h;
                t.r += b.r;
                t.hr += b.hr;
                t.rbi += b.rbi;
                t.sb += b.sb;
            }
            if let Some(pi) = p.pitching {
                t.ip += pi.ip;
                t.er += pi.er;
                t.w += pi.w;
                t.so += pi.so;
                t.sv += pi.sv;
                t.hits_allowed += pi.hits_allowed;
                t.bb += pi.bb;
            }
        }
        t
    }

    pub fn avg(&self) -> Option<f64> {
        batting_average(self.h, self.ab)
    }

    pub fn era(&self) -> Option<f64> {
        earned_run_average(self.er, self.ip)
    }

    pub fn whip(&self) -> Option<f64> {
        walks_hits_per_inning(self.bb, self.hits_allowed, self.ip)
    }
}

/// A scored roto category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    R,
    HR,
    RBI,
    SB,
    AVG,
    W,
    SO,
    SV,
    ERA,
    WHIP,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::R,
        Category::HR,
        Category::RBI,
        Category::SB,
        Category::AVG,
        Category::W,
        Category::SO,
        Category::SV,
        Category::ERA,
        Category::WHIP,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::R => "R",
            Category::HR => "HR",
            Category::RBI => "RBI",
            Category::SB => "SB",
            Category::AVG => "AVG",
            Category::W => "W",
            Category::SO => "SO",
            Category::SV => "SV",
            Category::ERA => "ERA",
            Category::WHIP => "WHIP",
        }
    }

    /// ERA and WHIP rank lowest-first; everything else highest-first.
    pub fn higher_is_better(self) -> bool {
        !matches!(self, Category::ERA | Category::WHIP)
    }

    pub fn value(self, t: &TeamTotals) -> Option<f64> {
        match self {
            Category::R => Some(t.r),
            Category::HR => Some(t.hr),
            Category::RBI => Some(t.rbi),
            Category::SB => Some(t.sb),
            Category::AVG => t.avg(),
            Category::W => Some(t.w),
            Category::SO => Some(t.so),
            Category::SV => Some(t.sv),
            Category::ERA => t.era(),
            Category::WHIP => t.whip(),
        }
    }
}

/// One team's line in the projected standings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsRow {
    pub totals: TeamTotals,
    /// Category ranks in [`Category::ALL`] order; `None` when the team has no
    /// value for the category.
    pub ranks: Vec<(Category, Option<f64>)>,
    /// Sum of category ranks. Lower is better.
    pub score: f64,
}

impl StandingsRow {
    pub fn rank(&self, category: Category) -> Option<f64> {
        self.ranks
            .iter()
            .find(|(c, _)| *c == category)
            .and_then(|(_, r)| *r)
    }

    /// Display cells in [`Category::ALL`] order for the given view.
    pub fn cells(&self, view: StandingsView) -> Vec<String> {
        Category::ALL
            .iter()
            .map(|&c| match view {
                StandingsView::Stats => format_stat(c, c.value(&self.totals)),
                StandingsView::Ranks => match self.rank(c) {
                    Some(r) => format!("{r:.1}"),
                    None => "-".to_string(),
                },
            })
            .collect()
    }
}

/// What the standings table shows per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandingsView {
    /// Projected totals and rate stats.
    #[default]
    Stats,
    /// Roto ranks that add up to the score.
    Ranks,
}

/// Rate stats keep their rounding precision, counting stats print whole.
pub fn format_stat(category: Category, value: Option<f64>) -> String {
    match (category, value) {
        (_, None) => "-".to_string(),
        (Category::AVG, Some(v)) => format!("{v:.3}"),
        (Category::ERA | Category::WHIP, Some(v)) => format!("{v:.2}"),
        (_, Some(v)) => format!("{v:.0}"),
    }
}

/// Totals for every seat in the draft, in seat order.
pub fn team_totals<R>(engine: &DraftEngine<R>) -> Vec<TeamTotals> {
    engine
        .seats()
        .map(|seat| {
            TeamTotals::from_players(seat, engine.team_label(seat), engine.pool().team_players(seat))
        })
        .collect()
}

/// Rank every category across teams and sort by total score.
pub fn rank_standings(totals: &[TeamTotals]) -> Vec<StandingsRow> {
    let per_category: Vec<Vec<Option<f64>>> = Category::ALL
        .iter()
        .map(|&c| {
            let values: Vec<Option<f64>> = totals.iter().map(|t| c.value(t)).collect();
            average_ranks(&values, c.higher_is_better())
        })
        .collect();

    let mut rows: Vec<StandingsRow> = totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let ranks: Vec<(Category, Option<f64>)> = Category::ALL
                .iter()
                .zip(&per_category)
                .map(|(&c, col)| (c, col[i]))
                .collect();
            let score: f64 = ranks.iter().filter_map(|(_, r)| *r).sum();
            StandingsRow {
                totals: t.clone(),
                ranks,
                score,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.score
            .total_cmp(&b.score)
            .then(a.totals.seat.cmp(&b.totals.seat))
    });
    rows
}

/// Projected standings for an engine's current rosters.
pub fn project<R>(engine: &DraftEngine<R>) -> Vec<StandingsRow> {
    rank_standings(&team_totals(engine))
}

/// 1-based ranks with ties sharing the mean of the positions they span.
/// Missing values get no rank.
fn average_ranks(values: &[Option<f64>], descending: bool) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    present.sort_by(|a, b| {
        if descending {
            b.1.total_cmp(&a.1)
        } else {
            a.1.total_cmp(&b.1)
        }
    });

    let mut ranks = vec![None; values.len()];
    let mut start = 0;
    while start < present.len() {
        let mut end = start + 1;
        while end < present.len() && present[end].1 == present[start].1 {
            end += 1;
        }
        // Positions start+1 ..= end share their mean.
        let shared = (start + 1 + end) as f64 / 2.0;
        for &(idx, _) in &present[start..end] {
            ranks[idx] = Some(shared);
        }
        start = end;
    }
    ranks
}
