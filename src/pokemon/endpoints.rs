use log::info;
use rocket::State;

use super::{generation_window, ptype::PokemonType};
use crate::{
    json::{JsonResult, JsonStatus},
    pokeapi::fetch_pokemon_list,
    state::AppState,
};

/// Endpoint for fetching an arbitrary window of Pokemon ids
#[get("/pokemons?<start>&<limit>")]
pub async fn get_pokemons(start: i64, limit: i64, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/pokemons?start={}&limit={}", start, limit);

    let pokemons = fetch_pokemon_list(&*state.api, &state.config.pokeapi, start, limit)
        .await
        .map_err(JsonStatus::from_anyhow)?;

    Ok(JsonStatus::data_owned(pokemons))
}

/// Endpoint for the Pokedex: one generation, optionally filtered by name and type
#[get("/pokemons/generation/<generation>?<search>&<ptype>")]
pub async fn get_generation(
    generation: u8,
    search: Option<String>,
    ptype: Option<String>,
    state: &State<AppState>,
) -> JsonResult {
    info!("Request to /api/pokemons/generation/{}", generation);

    let (start, limit) = generation_window(generation)
        .ok_or_else(|| JsonStatus::error(format!("Unknown generation {}", generation)))?;

    let ptype = match ptype {
        Some(name) => Some(
            name.parse::<PokemonType>()
                .map_err(JsonStatus::from_anyhow)?,
        ),
        None => None,
    };

    let pokemons = fetch_pokemon_list(
        &*state.api,
        &state.config.pokeapi,
        start as i64,
        limit as i64,
    )
    .await
    .map_err(JsonStatus::from_anyhow)?;

    let search = search.as_deref().filter(|s| !s.is_empty());
    let filtered: Vec<_> = pokemons
        .into_iter()
        .filter(|p| p.matches(search, ptype))
        .collect();

    Ok(JsonStatus::data_owned(filtered))
}
