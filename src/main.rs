use std::{str::FromStr, sync::Arc};

mod battle;
mod config;
mod json;
mod pokeapi;
mod pokemon;
mod state;
mod team;

#[cfg(test)]
mod tests;

use crate::json::JsonResult;
use config::Config;
use json::JsonStatus;
use log::info;
use pokeapi::{HttpPokeApi, PokeApi};
use rocket::{Build, Rocket};
use rocket_cors::{AllowedMethods, AllowedOrigins, CorsOptions};
use state::AppState;

#[macro_use]
extern crate rocket;

fn make_cors() -> CorsOptions {
    let allowed_methods: AllowedMethods = ["Get", "Post", "Delete"]
        .iter()
        .filter_map(|s| FromStr::from_str(s).ok())
        .collect();

    CorsOptions::default()
        // for the browser frontend
        .allowed_origins(AllowedOrigins::all())
        .allowed_methods(allowed_methods)
        .allow_credentials(true)
}

/// Builds the service around a given upstream client, so tests can swap it out
fn build_rocket(config: Config, api: Arc<dyn PokeApi>) -> Rocket<Build> {
    let cors = make_cors().to_cors().expect("Error creating CORS fairing");

    rocket::build()
        .attach(cors)
        .manage(AppState::new(config, api))
        .mount(
            "/api",
            routes![
                index,
                pokemon::endpoints::get_pokemons,
                pokemon::endpoints::get_generation,
                battle::endpoints::create_battle,
                battle::endpoints::get_battle,
                battle::endpoints::select_player,
                battle::endpoints::select_opponent,
                battle::endpoints::submit_move,
                battle::endpoints::delete_battle,
                team::endpoints::create_team,
                team::endpoints::get_team,
                team::endpoints::add_member,
                team::endpoints::remove_member,
            ],
        )
}

#[launch]
fn rocket() -> _ {
    let _ = env_logger::try_init();

    let config = Config::load_or_default().expect("Error loading config.toml");
    info!("Using PokeAPI at {}", config.pokeapi.base_url);

    build_rocket(config, Arc::new(HttpPokeApi::new()))
}

#[get("/")]
pub async fn index() -> JsonResult {
    info!("Request to /api");
    Ok(JsonStatus::ok::<String>(None))
}
