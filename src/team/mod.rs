/// Team HTTP endpoints module
pub mod endpoints;

use anyhow::{Result, anyhow, ensure};
use serde::{Deserialize, Serialize};

use crate::pokemon::Pokemon;

/// A team never holds more Pokemon than this
pub const MAX_TEAM_SIZE: usize = 6;

/// A roster of up to six Pokemon, kept in memory only
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Team {
    /// The Pokemon on the team, in slot order
    members: Vec<Pokemon>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[Pokemon] {
        &self.members
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_TEAM_SIZE
    }

    /// Appends a Pokemon to the next free slot
    pub fn add(&mut self, pokemon: Pokemon) -> Result<()> {
        ensure!(!self.is_full(), "A team can hold at most {} Pokemon", MAX_TEAM_SIZE);
        self.members.push(pokemon);
        Ok(())
    }

    /// Removes the Pokemon in `slot`, later members move up one slot
    pub fn remove(&mut self, slot: usize) -> Result<Pokemon> {
        if slot >= self.members.len() {
            return Err(anyhow!("Team slot {} is empty", slot));
        }
        Ok(self.members.remove(slot))
    }
}
