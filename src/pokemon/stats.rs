use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

/// Represents the six base stats of a Pokemon
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct PokemonStats {
    /// The hit points of the Pokemon
    pub hp: u32,

    /// Used by physical moves when attacking
    pub attack: u32,

    /// Used by physical moves when defending
    pub defense: u32,

    /// Used by special moves when attacking
    #[serde(rename = "specialAttack")]
    pub special_attack: u32,

    /// Used by special moves when defending
    #[serde(rename = "specialDefense")]
    pub special_defense: u32,

    pub speed: u32,
}

impl PokemonStats {
    /// Builds stats from the upstream positional ordering:
    /// hp, attack, defense, special attack, special defense, speed
    pub fn from_base_stats(base: &[u32]) -> Result<Self> {
        ensure!(
            base.len() >= 6,
            "Expected 6 base stats, got {}",
            base.len()
        );

        Ok(Self {
            hp: base[0],
            attack: base[1],
            defense: base[2],
            special_attack: base[3],
            special_defense: base[4],
            speed: base[5],
        })
    }
}
