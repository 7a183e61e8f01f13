use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ptype::PokemonType;

/// Decides which attack/defense stat pair a move uses
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for DamageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageCategory::Physical => f.write_str("Physical"),
            DamageCategory::Special => f.write_str("Special"),
            DamageCategory::Status => f.write_str("Status"),
        }
    }
}

impl FromStr for DamageCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Physical" => Ok(DamageCategory::Physical),
            "Special" => Ok(DamageCategory::Special),
            "Status" => Ok(DamageCategory::Status),
            _ => Err(anyhow::anyhow!("Unknown damage category: {}", s)),
        }
    }
}

/// A move a Pokemon can use in battle
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    /// Upstream move id, 0 for the placeholder
    pub id: u32,

    pub name: String,

    #[serde(rename = "type")]
    pub move_type: PokemonType,

    /// 0 means the move does no direct damage
    pub power: u32,

    /// Hit chance in percent
    pub accuracy: u32,

    pub pp: u32,

    pub category: DamageCategory,

    /// The upstream effect text, may be empty
    pub description: String,
}

impl Move {
    /// Stands in for a move whose data could not be retrieved
    pub fn unknown() -> Self {
        Self {
            id: 0,
            name: "Unknown Move".to_string(),
            move_type: PokemonType::Normal,
            power: 0,
            accuracy: 100,
            pp: 0,
            category: DamageCategory::Physical,
            description: "Move data unavailable".to_string(),
        }
    }
}
