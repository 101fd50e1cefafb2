// Snake draft entry point.
//
// Startup sequence:
// 1. Parse arguments, initialize tracing (log to file, not terminal)
// 2. Load config, apply command-line overrides
// 3. Load the player catalog
// 4. Build and begin the draft
// 5. Prompt for each human pick until the draft ends
// 6. Print the final roster and projected standings

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use snake_draft::catalog;
use snake_draft::config;
use snake_draft::draft::engine::DraftEngine;
use snake_draft::draft::pick::DraftPick;
use snake_draft::draft::player::PlayerPool;
use snake_draft::draft::state::DraftPhase;
use snake_draft::draft::DraftError;
use snake_draft::standings::{self, Category, StandingsRow, StandingsView};

/// Options shown to the human per turn.
const OPTIONS_SHOWN: usize = 15;

#[derive(Debug, Parser)]
#[command(name = "snakedraft", about = "Snake fantasy baseball draft against computer teams")]
struct Args {
    /// Directory containing defaults/, config/ and data/.
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// RNG seed for the computer teams' picks.
    #[arg(long, env = "SNAKEDRAFT_SEED")]
    seed: Option<u64>,

    /// Number of teams (overrides league.toml).
    #[arg(long)]
    teams: Option<u32>,

    /// Your seat in the first round (overrides league.toml).
    #[arg(long)]
    position: Option<u32>,

    /// Take the best-ranked eligible player on every turn without prompting.
    #[arg(long)]
    auto: bool,

    /// Write the pick history and standings to this JSON file.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Show each category's roto rank in the standings instead of the stat.
    #[arg(long)]
    ranks: bool,

    /// Print every team's final roster, not just yours.
    #[arg(long)]
    rosters: bool,
}

#[derive(Serialize)]
struct DraftExport<'a> {
    seed: u64,
    phase: DraftPhase,
    picks: &'a [DraftPick],
    standings: &'a [StandingsRow],
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 1. Initialize tracing
    init_tracing(&args.base_dir)?;
    info!("Snake draft starting up");

    // 2. Load config
    let config = config::load_config(&args.base_dir)
        .context("failed to load configuration")?
        .with_overrides(args.teams, args.position, args.seed)
        .context("invalid command-line override")?;
    info!(
        "Config loaded: {} teams, human at seat {}",
        config.draft.num_teams, config.draft.human_position
    );

    // 3. Load the catalog
    let players_path = args.base_dir.join(&config.data_paths.players);
    let players = catalog::load_players(&players_path).context("failed to load player catalog")?;
    let pool = PlayerPool::new(players).context("failed to build player pool")?;

    // 4. Build and begin the draft
    let seed = config.draft.seed.unwrap_or_else(rand::random);
    info!("Auto-pick seed {}", seed);
    let mut engine = DraftEngine::new(
        config.settings(),
        config.template(),
        pool,
        ChaCha8Rng::seed_from_u64(seed),
    );
    engine.begin().context("failed to start draft")?;

    // 5. Human turns
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while engine.phase() == DraftPhase::InProgress {
        print_board(&engine);
        let rank = if args.auto {
            match engine.human_options().first() {
                Some(p) => p.rank,
                None => bail!("no eligible player left for pick {}", engine.current_pick()),
            }
        } else {
            match prompt_rank(&mut lines)? {
                Some(rank) => rank,
                None => {
                    println!("Draft abandoned at pick {}.", engine.current_pick());
                    break;
                }
            }
        };

        match engine.record_human_pick(rank) {
            Ok(_) => {}
            Err(
                e @ (DraftError::UnknownPlayer { .. }
                | DraftError::AlreadyDrafted { .. }
                | DraftError::PositionNotNeeded { .. }),
            ) if !args.auto => println!("{e}; choose again."),
            Err(DraftError::PoolExhausted { pick }) => {
                println!("The player pool ran out at pick {pick}; draft stopped.");
            }
            Err(e) => return Err(e).context("failed to record pick"),
        }
    }

    // 6. Results
    if args.rosters {
        for seat in engine.seats() {
            print_roster(&engine, seat);
        }
    } else {
        print_roster(&engine, engine.settings().human_position);
    }
    let table = standings::project(&engine);
    let view = if args.ranks {
        StandingsView::Ranks
    } else {
        StandingsView::Stats
    };
    print_standings(&table, view);

    if let Some(path) = &args.export {
        write_export(path, seed, &engine, &table)?;
        println!("Exported draft to {}", path.display());
    }

    info!("Snake draft finished in phase {:?}", engine.phase());
    Ok(())
}

/// Read ranks until one parses. `None` on end of input or "q".
fn prompt_rank<B: BufRead>(lines: &mut io::Lines<B>) -> anyhow::Result<Option<u32>> {
    loop {
        print!("Your pick (rank, q to quit): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("failed to read from stdin")?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match input.parse::<u32>() {
            Ok(rank) => return Ok(Some(rank)),
            Err(_) => println!("'{input}' is not a player rank."),
        }
    }
}

fn print_board<R>(engine: &DraftEngine<R>) {
    let n = engine.settings().num_teams as usize;
    let (round, pick_in_round) = engine.state().round_and_pick();
    println!();
    println!(
        "=== Pick {} of {} (round {}, pick {}) ===",
        engine.current_pick(),
        engine.total_picks(),
        round,
        pick_in_round
    );

    let recent: Vec<&DraftPick> = engine.recent_picks(3 * n).collect();
    if !recent.is_empty() {
        println!("Recent picks:");
        for p in recent {
            println!(
                "  {:>4}  {:<8} {:<24} {:<10} {}",
                p.pick_number,
                p.team_label,
                p.player_name,
                p.positions.join(","),
                p.slot
            );
        }
    }

    println!("Available:");
    for p in engine.human_options().into_iter().take(OPTIONS_SHOWN) {
        println!("  {:>4}  {:<24} {}", p.rank, p.name, p.positions_display());
    }
}

fn print_roster<R>(engine: &DraftEngine<R>, seat: u32) {
    let Some(entries) = engine.roster_entries(seat) else {
        return;
    };
    println!();
    println!("=== {} roster ===", engine.team_label(seat));
    for entry in entries {
        let (name, positions) = match entry.player {
            Some(p) => (p.name.as_str(), p.positions_display()),
            None => ("(empty)", String::new()),
        };
        println!("  {:<5} {:<24} {}", entry.slot.label, name, positions);
    }
}

fn print_standings(table: &[StandingsRow], view: StandingsView) {
    println!();
    match view {
        StandingsView::Stats => println!("=== Projected standings ==="),
        StandingsView::Ranks => println!("=== Projected standings (category ranks) ==="),
    }
    print!("  {:<8}", "Team");
    for c in Category::ALL {
        print!(" {:>7}", c.label());
    }
    println!(" {:>7}", "Score");

    for row in table {
        print!("  {:<8}", row.totals.label);
        for cell in row.cells(view) {
            print!(" {:>7}", cell);
        }
        println!(" {:>7.1}", row.score);
    }
}

fn write_export<R>(
    path: &Path,
    seed: u64,
    engine: &DraftEngine<R>,
    table: &[StandingsRow],
) -> anyhow::Result<()> {
    let export = DraftExport {
        seed,
        phase: engine.phase(),
        picks: engine.picks(),
        standings: table,
    };
    let json = serde_json::to_string_pretty(&export).context("failed to serialize draft")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Initialize tracing to log to a file (the terminal is used for the board).
fn init_tracing(base_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("snake-draft.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("snake_draft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
