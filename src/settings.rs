//! Runtime settings read from `BLOCKFALL_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};
use log::LevelFilter;

use crate::core::{FallConfig, GameConfig};

#[derive(Debug, Clone)]
pub struct Settings {
    pub game: GameConfig,
    /// Diagnostic log file. Logging is off when unset.
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// JSON-lines file receiving every session event.
    pub event_log: Option<PathBuf>,
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            log_path: None,
            log_level: LevelFilter::Info,
            event_log: None,
            mute: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let defaults = FallConfig::default();
        let fall = FallConfig {
            initial_ms: parse_or(&var, "BLOCKFALL_INITIAL_FALL_MS", defaults.initial_ms)?,
            min_ms: parse_or(&var, "BLOCKFALL_MIN_FALL_MS", defaults.min_ms)?,
            reduction_ms: parse_or(&var, "BLOCKFALL_FALL_REDUCTION_MS", defaults.reduction_ms)?,
            step_ms: parse_or(&var, "BLOCKFALL_SPEEDUP_STEP_MS", defaults.step_ms)?,
        };

        let seed = match var("BLOCKFALL_SEED") {
            Some(s) => parse_var("BLOCKFALL_SEED", &s)?,
            None => clock_seed(),
        };

        let game = GameConfig {
            fall,
            seed,
            ..GameConfig::default()
        };
        game.validate().context("invalid game settings")?;

        let log_level = match var("BLOCKFALL_LOG_LEVEL") {
            Some(s) => LevelFilter::from_str(&s)
                .map_err(|_| anyhow!("BLOCKFALL_LOG_LEVEL: unknown level {s:?}"))?,
            None => LevelFilter::Info,
        };

        let mute = match var("BLOCKFALL_MUTE").as_deref() {
            None => false,
            Some("1") => true,
            Some(s) if s.eq_ignore_ascii_case("true") => true,
            Some("0") => false,
            Some(s) if s.eq_ignore_ascii_case("false") => false,
            Some(s) => bail!("BLOCKFALL_MUTE: expected 1/0/true/false, got {s:?}"),
        };

        Ok(Self {
            game,
            log_path: var("BLOCKFALL_LOG_PATH").map(PathBuf::from),
            log_level,
            event_log: var("BLOCKFALL_EVENT_LOG").map(PathBuf::from),
            mute,
        })
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("{key}: cannot parse {raw:?}"))
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => parse_var(key, &raw),
        None => Ok(default),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
