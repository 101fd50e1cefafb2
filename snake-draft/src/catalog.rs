// Player catalog loading.
//
// Reads a ranked CSV with one row per player: `Rank`, `Player` (or `Name`),
// `Position(s)`, batting columns `AB,R,HR,RBI,SB,H` and pitching columns
// `IP,ER,W,SO,SV,H.P,BB`. Blank stat cells mean the projection is absent.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::draft::player::{BattingLine, PitchingLine, Player};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Catalog CSV row. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawPlayerRow {
    Rank: u32,
    #[serde(alias = "Name")]
    Player: String,
    #[serde(rename = "Position(s)", alias = "Positions")]
    Positions: String,
    #[serde(default)]
    AB: Option<f64>,
    #[serde(default)]
    R: Option<f64>,
    #[serde(default)]
    HR: Option<f64>,
    #[serde(default)]
    RBI: Option<f64>,
    #[serde(default)]
    SB: Option<f64>,
    #[serde(default)]
    H: Option<f64>,
    #[serde(default)]
    IP: Option<f64>,
    #[serde(default)]
    ER: Option<f64>,
    #[serde(default)]
    W: Option<f64>,
    #[serde(default, alias = "K")]
    SO: Option<f64>,
    #[serde(default)]
    SV: Option<f64>,
    /// Hits allowed.
    #[serde(default, rename = "H.P")]
    HP: Option<f64>,
    #[serde(default)]
    BB: Option<f64>,
}

impl RawPlayerRow {
    fn batting(&self) -> Option<BattingLine> {
        let ab = self.AB?;
        Some(BattingLine {
            ab,
            r: self.R.unwrap_or(0.0),
            hr: self.HR.unwrap_or(0.0),
            rbi: self.RBI.unwrap_or(0.0),
            sb: self.SB.unwrap_or(0.0),
            h: self.H.unwrap_or(0.0),
        })
    }

    fn pitching(&self) -> Option<PitchingLine> {
        let ip = self.IP?;
        Some(PitchingLine {
            ip,
            er: self.ER.unwrap_or(0.0),
            bb: self.BB.unwrap_or(0.0),
            hits_allowed: self.HP.unwrap_or(0.0),
            w: self.W.unwrap_or(0.0),
            so: self.SO.unwrap_or(0.0),
            sv: self.SV.unwrap_or(0.0),
        })
    }

    fn stats(&self) -> [Option<f64>; 13] {
        [
            self.AB, self.R, self.HR, self.RBI, self.SB, self.H, self.IP, self.ER, self.W,
            self.SO, self.SV, self.HP, self.BB,
        ]
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split an eligibility string like "2B, SS" (or "2B/SS") into tokens.
pub fn parse_positions(s: &str) -> Vec<String> {
    s.split(|c| c == ',' || c == '/')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_uppercase)
        .collect()
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Load players from any reader. Rows that fail to parse or validate are
/// skipped with a warning; only header-level CSV failures are errors.
pub fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    reader.headers()?;

    let mut seen_ranks = HashSet::new();
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
                continue;
            }
        };
        let name = raw.Player.trim().to_string();
        if raw.stats().iter().flatten().any(|v| !v.is_finite()) {
            warn!("skipping player '{}': non-finite projection value", name);
            continue;
        }
        if !seen_ranks.insert(raw.Rank) {
            warn!("skipping player '{}': duplicate rank {}", name, raw.Rank);
            continue;
        }
        let positions = parse_positions(&raw.Positions);
        match Player::new(raw.Rank, name.clone(), positions, raw.batting(), raw.pitching()) {
            Ok(player) => players.push(player),
            Err(e) => {
                seen_ranks.remove(&raw.Rank);
                warn!("skipping player '{}': {}", name, e);
            }
        }
    }
    Ok(players)
}

/// Load the player catalog from a CSV file.
pub fn load_players(path: &Path) -> Result<Vec<Player>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_players_from_reader(file).map_err(|e| CatalogError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    if players.is_empty() {
        return Err(CatalogError::Validation(format!(
            "{} produced zero valid player rows",
            path.display()
        )));
    }
    info!("Loaded {} players from {}", players.len(), path.display());
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
