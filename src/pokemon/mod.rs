/// Pokemon Type module
pub mod ptype;

/// Pokemon Stats (hp, etc) module
pub mod stats;

/// Pokemon moves and damage categories
pub mod moves;

/// HTTP endpoints for listing Pokemon
pub mod endpoints;

use serde::{Deserialize, Serialize};

use moves::Move;
use ptype::PokemonType;
use stats::PokemonStats;

/// Represents a Pokemon with its types, stats and up to four moves
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Pokemon {
    /// National Pokedex number, as used by the upstream API
    pub id: u32,

    /// The capitalized name of the Pokemon
    pub name: String,

    /// One or two types, primary first
    pub types: Vec<PokemonType>,

    /// The base stats of the Pokemon
    pub stats: PokemonStats,

    /// At most four moves
    pub moves: Vec<Move>,

    /// Front sprite URL, if the upstream has one
    pub sprite: Option<String>,
}

impl Pokemon {
    /// Pokedex filter: case-insensitive name search plus an optional type
    pub fn matches(&self, search: Option<&str>, ptype: Option<PokemonType>) -> bool {
        let matches_search = match search {
            Some(term) => self.name.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        };
        let matches_type = match ptype {
            Some(t) => self.types.contains(&t),
            None => true,
        };

        matches_search && matches_type
    }
}

/// Uppercases the first character and leaves the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The id window `(start_id, limit)` fetched for a game generation
pub fn generation_window(generation: u8) -> Option<(u32, u32)> {
    match generation {
        1 => Some((1, 151)),
        2 => Some((152, 100)),
        3 => Some((252, 135)),
        _ => None,
    }
}
