//! External configuration loader.
//!
//! Reads `config.toml` from the executable's directory (or CWD).
//! Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    /// Fixed shuffle seed. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimingConfig {
    /// Pause between the "uneven boxes" message and the board reset.
    pub retry_delay: Duration,
    /// Pause between finishing the last level and starting a new run.
    pub run_reset_delay: Duration,
    /// How often the front end advances the game clock while idle.
    pub tick: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoringConfig {
    pub points_per_level: u32,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    scoring: TomlScoring,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_retry_delay")]
    retry_delay_ms: u64,
    #[serde(default = "default_run_reset_delay")]
    run_reset_delay_ms: u64,
    #[serde(default = "default_tick")]
    tick_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlScoring {
    #[serde(default = "default_points_per_level")]
    points_per_level: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

// ── Defaults ──

fn default_retry_delay() -> u64 { 1500 }
fn default_run_reset_delay() -> u64 { 2000 }
fn default_tick() -> u64 { 50 }
fn default_points_per_level() -> u32 { 10 }
fn default_log_filter() -> String { "warn".into() }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            retry_delay_ms: default_retry_delay(),
            run_reset_delay_ms: default_run_reset_delay(),
            tick_ms: default_tick(),
        }
    }
}

impl Default for TomlScoring {
    fn default() -> Self {
        TomlScoring { points_per_level: default_points_per_level() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { seed: None, log_filter: default_log_filter() }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(cfg: TomlConfig) -> Self {
        GameConfig {
            timing: TimingConfig {
                retry_delay: Duration::from_millis(cfg.timing.retry_delay_ms),
                run_reset_delay: Duration::from_millis(cfg.timing.run_reset_delay_ms),
                // A zero tick would spin the front end loop.
                tick: Duration::from_millis(cfg.timing.tick_ms.max(1)),
            },
            scoring: ScoringConfig {
                points_per_level: cfg.scoring.points_per_level,
            },
            seed: cfg.general.seed,
            log_filter: cfg.general.log_filter,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/chocobox`.
    /// Missing file, unreadable file or bad TOML fall back to defaults.
    pub fn load() -> Self {
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(cfg) => {
                    tracing::debug!(path = %path.display(), "loaded config");
                    return cfg;
                }
                Err(e @ ConfigError::Parse(_)) => {
                    tracing::warn!("{e}; using default settings");
                    return Self::default();
                }
                Err(e) => tracing::warn!("{e}"),
            }
        }
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: TomlConfig = toml::from_str(text)?;
        Ok(cfg.into())
    }
}

/// Candidate directories to search: exe dir + CWD + XDG data dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/chocobox");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.timing.retry_delay, Duration::from_millis(1500));
        assert_eq!(cfg.timing.run_reset_delay, Duration::from_millis(2000));
        assert_eq!(cfg.scoring.points_per_level, 10);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.log_filter, "warn");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[timing]\nretry_delay_ms = 10\n\n[general]\nseed = 7\n",
        )
        .unwrap();
        assert_eq!(cfg.timing.retry_delay, Duration::from_millis(10));
        assert_eq!(cfg.timing.run_reset_delay, Duration::from_millis(2000));
        assert_eq!(cfg.scoring.points_per_level, 10);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn zero_tick_is_raised_to_one_ms() {
        let cfg = GameConfig::from_toml_str("[timing]\ntick_ms = 0\n").unwrap();
        assert_eq!(cfg.timing.tick, Duration::from_millis(1));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("[scoring]\npoints_per_level = \"many\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_path(Path::new("/definitely/not/here/config.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
