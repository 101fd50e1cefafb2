// Integration tests for the snake draft.
//
// These exercise the library end-to-end through its public API: config
// loading, the CSV catalog, full drafts driven through the engine, and the
// projected standings computed from the finished rosters.

use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use snake_draft::catalog;
use snake_draft::config;
use snake_draft::draft::engine::DraftEngine;
use snake_draft::draft::pick::DraftPick;
use snake_draft::draft::player::{BattingLine, PitchingLine, Player, PlayerPool};
use snake_draft::draft::roster::{RosterCounts, RosterTemplate, TeamRoster};
use snake_draft::draft::state::{DraftPhase, DraftSettings};
use snake_draft::draft::turn;
use snake_draft::draft::DraftError;
use snake_draft::standings::{self, Category};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture_pool() -> PlayerPool {
    let players = catalog::load_players(&Path::new(FIXTURES).join("players.csv"))
        .expect("fixture catalog should load");
    PlayerPool::new(players).expect("fixture ranks are unique")
}

fn ten_team_engine(seed: u64) -> DraftEngine<ChaCha8Rng> {
    DraftEngine::new(
        DraftSettings {
            num_teams: 10,
            human_position: 5,
        },
        RosterTemplate::from_counts(&RosterCounts::default()),
        fixture_pool(),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

/// Drive the human seat with best-available picks until the draft ends.
fn run_best_available(engine: &mut DraftEngine<ChaCha8Rng>) {
    engine.begin().expect("draft should begin");
    while engine.phase() == DraftPhase::InProgress {
        assert!(!engine.is_complete(), "complete before pick {}", engine.current_pick());
        assert!(engine.current_pick() <= engine.total_picks());
        let rank = engine.human_options()[0].rank;
        engine
            .record_human_pick(rank)
            .expect("best available pick should be accepted");
    }
}

fn hitter(rank: u32, position: &str) -> Player {
    Player::new(
        rank,
        format!("Hitter {rank}"),
        vec![position.to_string()],
        Some(BattingLine {
            ab: 500.0,
            h: 140.0,
            r: 70.0,
            hr: 20.0,
            rbi: 75.0,
            sb: 5.0,
        }),
        None,
    )
    .unwrap()
}

fn pitcher(rank: u32, position: &str) -> Player {
    Player::new(
        rank,
        format!("Pitcher {rank}"),
        vec![position.to_string()],
        None,
        Some(PitchingLine {
            ip: 150.0,
            er: 55.0,
            bb: 40.0,
            hits_allowed: 130.0,
            w: 10.0,
            so: 160.0,
            sv: 0.0,
        }),
    )
    .unwrap()
}

fn temp_base(name: &str) -> PathBuf {
    let tmp = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&tmp);
    fs::create_dir_all(tmp.join("defaults")).unwrap();
    fs::create_dir_all(tmp.join("data")).unwrap();
    tmp
}

// ===========================================================================
// Full drafts
// ===========================================================================

#[test]
fn ten_team_draft_fills_every_slot() {
    let mut engine = ten_team_engine(2024);
    run_best_available(&mut engine);

    assert_eq!(engine.phase(), DraftPhase::Completed);
    assert_eq!(engine.total_picks(), 230);
    assert!(engine.current_pick() > 230);
    assert_eq!(engine.picks().len(), 230);

    for seat in engine.seats() {
        let roster = engine.roster(seat).unwrap();
        assert!(roster.is_full(), "seat {seat} roster is not full");
        assert_eq!(engine.pool().team_players(seat).count(), 23);
    }
    assert!(engine.picks().iter().all(|p| p.slot != "-"));
    assert_eq!(engine.pool().available_count(), engine.pool().len() - 230);
}

#[test]
fn every_seat_roster_lists_its_own_picks() {
    let mut engine = ten_team_engine(31);
    run_best_available(&mut engine);

    for seat in engine.seats() {
        let entries = engine.roster_entries(seat).unwrap();
        assert_eq!(entries.len(), 23);
        let mut listed: Vec<u32> = entries
            .iter()
            .map(|e| e.player.expect("full roster").rank)
            .collect();
        let mut picked: Vec<u32> = engine
            .picks()
            .iter()
            .filter(|p| p.team == seat)
            .map(|p| p.rank)
            .collect();
        listed.sort_unstable();
        picked.sort_unstable();
        assert_eq!(listed, picked, "seat {seat}");
    }
}

#[test]
fn picks_follow_snake_order() {
    let mut engine = ten_team_engine(5);
    run_best_available(&mut engine);

    for (i, pick) in engine.picks().iter().enumerate() {
        let number = i as u32 + 1;
        assert_eq!(pick.pick_number, number);
        assert_eq!(pick.team, turn::team_on_clock(number, 10));
        assert_eq!((pick.round, pick.pick_in_round), turn::round_and_pick(number, 10));
        assert_eq!(pick.by_human, pick.team == 5);
    }

    let human_picks: Vec<u32> = engine
        .picks()
        .iter()
        .filter(|p| p.by_human)
        .map(|p| p.pick_number)
        .collect();
    assert_eq!(human_picks.len(), 23);
    assert_eq!(&human_picks[..4], &[5, 16, 25, 36]);
    assert!(engine.picks().iter().all(|p| !p.by_human || p.team_label == "My-Team"));
}

#[test]
fn same_seed_replays_the_same_draft() {
    let mut a = ten_team_engine(77);
    let mut b = ten_team_engine(77);
    run_best_available(&mut a);
    run_best_available(&mut b);
    assert_eq!(a.picks(), b.picks());

    let mut c = ten_team_engine(78);
    run_best_available(&mut c);
    let ranks = |picks: &[DraftPick]| picks.iter().map(|p| p.rank).collect::<Vec<_>>();
    assert_ne!(ranks(a.picks()), ranks(c.picks()));
}

#[test]
fn human_first_seat_has_no_leading_auto_picks() {
    let mut engine = DraftEngine::new(
        DraftSettings {
            num_teams: 4,
            human_position: 1,
        },
        RosterTemplate::from_counts(&RosterCounts::default()),
        fixture_pool(),
        ChaCha8Rng::seed_from_u64(1),
    );
    engine.begin().unwrap();
    assert!(engine.picks().is_empty());
    assert_eq!(engine.current_pick(), 1);

    // Seat 1 picks at 1 and 8 in a four-team snake.
    let made = engine.record_human_pick(1).unwrap().len();
    assert_eq!(made, 7);
    assert_eq!(engine.current_pick(), 8);
    assert_eq!(engine.team_on_clock_now(), 1);
}

// ===========================================================================
// Need filtering at the engine boundary
// ===========================================================================

#[test]
fn bench_only_roster_accepts_everyone() {
    let template = RosterTemplate::from_labels(["C1", "BE1"]);
    let pool = PlayerPool::new(vec![
        hitter(1, "C"),
        hitter(2, "OF"),
        pitcher(3, "SP"),
    ])
    .unwrap();
    let mut roster = TeamRoster::new(&template);
    assert!(roster.fill(&template, "C1", 1));

    let mut ranks: Vec<u32> = pool
        .position_need_filter(&roster, &template)
        .iter()
        .map(|p| p.rank)
        .collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn filled_positions_are_refused() {
    let players = vec![
        hitter(1, "C"),
        hitter(2, "C"),
        hitter(3, "C"),
        pitcher(4, "RP"),
        pitcher(5, "SP"),
        hitter(6, "C"),
        pitcher(7, "SP"),
    ];
    let mut engine = DraftEngine::new(
        DraftSettings {
            num_teams: 2,
            human_position: 1,
        },
        RosterTemplate::from_labels(["C1", "P1"]),
        PlayerPool::new(players).unwrap(),
        ChaCha8Rng::seed_from_u64(3),
    );
    engine.begin().unwrap();
    engine.record_human_pick(1).unwrap();

    // Only pitchers remain useful to the human.
    assert!(engine.human_options().iter().all(|p| p.plays("SP") || p.plays("RP")));

    let catcher = engine
        .pool()
        .available_players()
        .find(|p| p.plays("C"))
        .map(|p| p.rank);
    if let Some(rank) = catcher {
        let before = engine.picks().len();
        assert_eq!(
            engine.record_human_pick(rank),
            Err(DraftError::PositionNotNeeded { rank })
        );
        assert_eq!(engine.picks().len(), before);
    }

    let pitcher_rank = engine.human_options()[0].rank;
    engine.record_human_pick(pitcher_rank).unwrap();
    assert_eq!(engine.phase(), DraftPhase::Completed);
    let human_slots: Vec<&str> = engine
        .picks()
        .iter()
        .filter(|p| p.by_human)
        .map(|p| p.slot.as_str())
        .collect();
    assert_eq!(human_slots, vec!["C1", "P1"]);
}

#[test]
fn exhausted_pool_aborts_and_keeps_picks() {
    let mut engine = DraftEngine::new(
        DraftSettings {
            num_teams: 3,
            human_position: 1,
        },
        RosterTemplate::from_labels(["C1"]),
        PlayerPool::new(vec![hitter(1, "C"), hitter(2, "C")]).unwrap(),
        ChaCha8Rng::seed_from_u64(9),
    );
    engine.begin().unwrap();

    // Seat 2 takes the last catcher; seat 3 has nothing left at pick 3.
    let err = engine.record_human_pick(1).unwrap_err();
    assert_eq!(err, DraftError::PoolExhausted { pick: 3 });
    assert_eq!(engine.phase(), DraftPhase::Aborted);
    assert_eq!(engine.picks().len(), 2);
    assert_eq!(engine.picks()[1].rank, 2);
    assert_eq!(engine.pool().available_count(), 0);

    assert!(matches!(
        engine.record_human_pick(2),
        Err(DraftError::WrongPhase { .. })
    ));
}

// ===========================================================================
// Config + catalog + standings
// ===========================================================================

#[test]
fn default_config_drives_a_full_draft() {
    let tmp = temp_base("snake_integration_pipeline");
    fs::copy("defaults/league.toml", tmp.join("defaults/league.toml")).unwrap();
    fs::copy(
        Path::new(FIXTURES).join("players.csv"),
        tmp.join("data/players.csv"),
    )
    .unwrap();

    let config = config::load_config(&tmp)
        .unwrap()
        .with_overrides(None, Some(10), Some(11))
        .unwrap();
    let players = catalog::load_players(&tmp.join(&config.data_paths.players)).unwrap();
    let mut engine = DraftEngine::new(
        config.settings(),
        config.template(),
        PlayerPool::new(players).unwrap(),
        ChaCha8Rng::seed_from_u64(config.draft.seed.unwrap()),
    );
    run_best_available(&mut engine);
    assert_eq!(engine.phase(), DraftPhase::Completed);

    // Seat 10 picks back-to-back at the turn.
    let seat10: Vec<u32> = engine
        .picks()
        .iter()
        .filter(|p| p.team == 10)
        .map(|p| p.pick_number)
        .take(3)
        .collect();
    assert_eq!(seat10, vec![10, 11, 30]);

    let table = standings::project(&engine);
    assert_eq!(table.len(), 10);
    assert!(table.windows(2).all(|w| w[0].score <= w[1].score));

    // Every team has hitters and pitchers, so each category hands out
    // ranks 1..=10 exactly once in total.
    let total: f64 = table.iter().map(|r| r.score).sum();
    assert!((total - 550.0).abs() < 1e-9, "total score {total}");
    for c in Category::ALL {
        let sum: f64 = table.iter().filter_map(|r| r.rank(c)).sum();
        assert!((sum - 55.0).abs() < 1e-9, "{} ranks sum to {sum}", c.label());
    }

    let human = table.iter().find(|r| r.totals.seat == 10).unwrap();
    assert_eq!(human.totals.label, "My-Team");
    assert!(human.totals.ab > 0.0 && human.totals.ip > 0.0);

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn shipped_catalog_loads() {
    let players = catalog::load_players(Path::new("data/players.csv")).unwrap();
    let pool = PlayerPool::new(players).unwrap();
    assert!(pool.len() >= 230);
    assert!(pool.players().any(|p| p.plays("C")));
    assert!(pool.players().any(|p| p.pitching.is_some()));
    assert!(pool.players().all(|p| p.is_available()));
}
