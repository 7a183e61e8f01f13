use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use log::warn;
use serde::Deserialize;

/// Default location of the configuration file, relative to the working directory
pub const CONFIG_PATH: &str = "config.toml";

/// Service configuration, read from `config.toml`
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    /// Upstream PokeAPI settings
    pub pokeapi: PokeApiConfig,
    /// Battle engine settings
    pub battle: BattleConfig,
}

/// Settings for talking to the upstream PokeAPI
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PokeApiConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
    /// Total attempts per request, including the first one
    pub max_attempts: u32,
    /// Backoff step, multiplied by the attempt number
    pub backoff_ms: u64,
    /// Fixed delay before every request
    pub throttle_ms: u64,
    /// How many ids are grouped into one sequential chunk
    pub batch_size: usize,
    /// How many move references are resolved per Pokemon
    pub max_moves: usize,
    /// Largest window a single list request may ask for
    pub max_limit: u32,
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pokeapi.co/api/v2".to_string(),
            max_attempts: 3,
            backoff_ms: 1000,
            throttle_ms: 100,
            batch_size: 10,
            max_moves: 4,
            max_limit: 1025,
        }
    }
}

impl PokeApiConfig {
    pub fn backoff_step(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

/// Settings for battle sessions
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BattleConfig {
    /// HP pool both combatants start with, regardless of their hp stat
    pub starting_hp: u32,
    /// How long the opponent "thinks" before replying
    pub ai_delay_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            starting_hp: 100,
            ai_delay_ms: 1000,
        }
    }
}

impl BattleConfig {
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

impl Config {
    /// Reads and parses a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parses configuration from a toml string
    pub fn parse(raw: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(raw)?;
        anyhow::ensure!(cfg.pokeapi.batch_size > 0, "pokeapi.batch_size must be positive");
        anyhow::ensure!(cfg.pokeapi.max_limit > 0, "pokeapi.max_limit must be positive");
        anyhow::ensure!(cfg.battle.starting_hp > 0, "battle.starting_hp must be positive");
        Ok(cfg)
    }

    /// Loads `config.toml`, falling back to defaults when the file does not exist.
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default() -> Result<Self> {
        if !Path::new(CONFIG_PATH).exists() {
            warn!("{} not found, using default configuration", CONFIG_PATH);
            return Ok(Self::default());
        }
        Self::load(CONFIG_PATH)
    }
}
