mod pokeapi;

use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use anyhow::{Result, anyhow};
use futures::{FutureExt, future::BoxFuture};

use crate::battle::damage::BattleRng;
use crate::pokeapi::PokeApi;
use crate::pokemon::{
    Pokemon,
    moves::{DamageCategory, Move},
    ptype::PokemonType,
    stats::PokemonStats,
};

pub const BASE_URL: &str = "http://pokeapi.test/api/v2";

pub fn pokemon_url(id: u32) -> String {
    format!("{}/pokemon/{}", BASE_URL, id)
}

pub fn move_url(id: u32) -> String {
    format!("{}/move/{}/", BASE_URL, id)
}

/// Upstream stand-in. Each url answers with its scripted responses in order,
/// repeating the last one forever; unknown urls answer 404.
#[derive(Default)]
pub struct FakePokeApi {
    responses: Mutex<HashMap<String, VecDeque<Result<String, u16>>>>,
    calls: Mutex<Vec<String>>,
}

impl FakePokeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.script(url, vec![Ok(body.into())])
    }

    pub fn fail(self, url: impl Into<String>, status: u16) -> Self {
        self.script(url, vec![Err(status)])
    }

    pub fn script(self, url: impl Into<String>, responses: Vec<Result<String, u16>>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.into(), responses.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == url).count()
    }

    fn answer(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());

        let mut responses = self.responses.lock().unwrap();
        let queue = match responses.get_mut(url) {
            Some(queue) => queue,
            None => return Err(anyhow!("HTTP error! status: 404")),
        };
        let response = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };

        response.map_err(|status| anyhow!("HTTP error! status: {}", status))
    }
}

impl PokeApi for FakePokeApi {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String>> {
        let response = self.answer(url);
        async move { response }.boxed()
    }
}

/// Upstream body for `/pokemon/{id}`
pub fn pokemon_json(id: u32, name: &str, types: &[&str], move_urls: &[String]) -> String {
    let base_stats = [45, 49, 65, 60, 70, 80];
    serde_json::json!({
        "id": id,
        "name": name,
        "types": types
            .iter()
            .enumerate()
            .map(|(i, t)| serde_json::json!({ "slot": i + 1, "type": { "name": t, "url": "" } }))
            .collect::<Vec<_>>(),
        "stats": base_stats
            .iter()
            .map(|s| serde_json::json!({ "base_stat": s, "effort": 0, "stat": { "name": "x" } }))
            .collect::<Vec<_>>(),
        "moves": move_urls
            .iter()
            .map(|url| serde_json::json!({ "move": { "name": "m", "url": url } }))
            .collect::<Vec<_>>(),
        "sprites": { "front_default": format!("https://sprites.test/{}.png", id) },
    })
    .to_string()
}

/// Upstream body for a move
pub fn move_json(id: u32, name: &str, move_type: &str, power: Option<u32>, class: &str) -> String {
    serde_json::json!({
        "id": id,
        "name": name,
        "type": { "name": move_type },
        "power": power,
        "accuracy": 95,
        "pp": 35,
        "damage_class": { "name": class },
        "effect_entries": [{ "effect": "Inflicts regular damage." }],
    })
    .to_string()
}

/// A roll that always returns the same values.
/// `max()` is the largest value below 1.0, since rolls never reach 1.0.
pub struct FixedRoll {
    pub roll: f64,
    pub index: usize,
}

impl FixedRoll {
    pub fn max() -> Self {
        Self {
            roll: 1.0 - f64::EPSILON,
            index: 0,
        }
    }

    pub fn min() -> Self {
        Self { roll: 0.85, index: 0 }
    }
}

impl BattleRng for FixedRoll {
    fn damage_roll(&mut self) -> f64 {
        self.roll
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.index % len
    }
}

pub fn test_move(name: &str, power: u32, category: DamageCategory) -> Move {
    Move {
        id: 1,
        name: name.to_string(),
        move_type: PokemonType::Normal,
        power,
        accuracy: 100,
        pp: 35,
        category,
        description: String::new(),
    }
}

pub fn tackle() -> Move {
    test_move("Tackle", 40, DamageCategory::Physical)
}

pub fn growl() -> Move {
    test_move("Growl", 0, DamageCategory::Status)
}

/// A Pokemon with 50 in every battle stat
pub fn test_pokemon(id: u32, name: &str, moves: Vec<Move>) -> Pokemon {
    Pokemon {
        id,
        name: name.to_string(),
        types: vec![PokemonType::Normal],
        stats: PokemonStats {
            hp: 60,
            attack: 50,
            defense: 50,
            special_attack: 50,
            special_defense: 50,
            speed: 50,
        },
        moves,
        sprite: None,
    }
}
