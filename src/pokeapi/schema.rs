//! Only the fields the pipeline reads are declared; serde ignores the rest.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct NamedApiResource {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiResource {
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawPokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<RawTypeSlot>,
    pub stats: Vec<RawStat>,
    #[serde(default)]
    pub moves: Vec<RawMoveSlot>,
    #[serde(default)]
    pub sprites: Option<RawSprites>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub ptype: NamedApiResource,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawStat {
    pub base_stat: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawMoveSlot {
    #[serde(rename = "move")]
    pub move_ref: ApiResource,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawSprites {
    pub front_default: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawMove {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: NamedApiResource,
    pub power: Option<u32>,
    pub accuracy: Option<u32>,
    pub pp: Option<u32>,
    pub damage_class: NamedApiResource,
    #[serde(default)]
    pub effect_entries: Vec<RawEffectEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawEffectEntry {
    pub effect: String,
}
