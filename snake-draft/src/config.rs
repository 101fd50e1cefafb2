// Configuration loading and parsing (league.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::draft::roster::{RosterCounts, RosterTemplate};
use crate::draft::state::DraftSettings;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub draft: DraftSection,
    #[serde(default)]
    pub roster: RosterCounts,
    #[serde(default)]
    pub data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftSection {
    pub num_teams: u32,
    pub human_position: u32,
    /// Fixed RNG seed for reproducible auto picks.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            players: "data/players.csv".into(),
        }
    }
}

impl Config {
    pub fn settings(&self) -> DraftSettings {
        DraftSettings {
            num_teams: self.draft.num_teams,
            human_position: self.draft.human_position,
        }
    }

    pub fn template(&self) -> RosterTemplate {
        RosterTemplate::from_counts(&self.roster)
    }

    /// Apply command-line overrides and re-run validation.
    pub fn with_overrides(
        mut self,
        num_teams: Option<u32>,
        human_position: Option<u32>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(n) = num_teams {
            self.draft.num_teams = n;
        }
        if let Some(p) = human_position {
            self.draft.human_position = p;
        }
        if seed.is_some() {
            self.draft.seed = seed;
        }
        validate(&self)?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/league.toml` relative to `base_dir`.
///
/// Does not copy defaults; see [`load_config`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let text = read_file(&league_path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: league_path.clone(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Seed `config/` from `defaults/`, copying only files that are missing.
///
/// Returns the paths written. A base directory with neither directory is an
/// error; one with only `config/` is left alone.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        return if config_dir.is_dir() {
            Ok(Vec::new())
        } else {
            Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "no defaults/ or config/ under {}; pass --base-dir pointing at the league directory",
                    base_dir.display()
                ),
            })
        };
    }

    let copy_failed = |what: String, e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("{what}: {e}"),
    };

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_failed(format!("cannot create {}", config_dir.display()), e))?;
    let listing = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_failed(format!("cannot list {}", defaults_dir.display()), e))?;

    let mut written = Vec::new();
    for item in listing {
        let source = item
            .map_err(|e| copy_failed("cannot read defaults listing".into(), e))?
            .path();
        let Some(name) = source.file_name().filter(|_| source.is_file()) else {
            continue;
        };
        let target = config_dir.join(name);
        if copy_if_missing(&source, &target)
            .map_err(|e| copy_failed(format!("cannot copy {}", source.display()), e))?
        {
            written.push(target);
        }
    }
    Ok(written)
}

/// Copy `source` to `target` unless `target` already exists.
fn copy_if_missing(source: &Path, target: &Path) -> std::io::Result<bool> {
    use std::io::Write;

    let mut out = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e),
    };
    out.write_all(&std::fs::read(source)?)?;
    Ok(true)
}

/// Copy missing defaults into `base_dir/config/`, then load from there.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound { path: path.into() })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn check_range<T>(field: &str, value: T, range: std::ops::RangeInclusive<T>) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            field: field.into(),
            message: format!(
                "must be between {} and {} inclusive, got {value}",
                range.start(),
                range.end()
            ),
        })
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let d = &config.draft;
    check_range("draft.num_teams", d.num_teams, 2..=24)?;
    check_range("draft.human_position", d.human_position, 1..=d.num_teams)?;

    let r = &config.roster;
    let roster_fields: &[(&str, usize, std::ops::RangeInclusive<usize>)] = &[
        ("roster.catchers", r.catchers, 1..=3),
        ("roster.outfielders", r.outfielders, 3..=7),
        ("roster.corner_infielders", r.corner_infielders, 0..=5),
        ("roster.middle_infielders", r.middle_infielders, 0..=5),
        ("roster.pitchers", r.pitchers, 5..=15),
        ("roster.utility", r.utility, 0..=20),
        ("roster.bench", r.bench, 0..=20),
    ];
    for (name, val, range) in roster_fields {
        check_range(name, *val, range.clone())?;
    }

    if config.data_paths.players.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.players".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
