use log::info;
use rocket::{State, serde::json::Json};

use crate::{
    json::{JsonResult, JsonStatus},
    pokemon::Pokemon,
    state::AppState,
    team::Team,
};

/// Endpoint for creating a new, empty team
#[post("/teams")]
pub async fn create_team(state: &State<AppState>) -> JsonResult {
    info!("Request to /api/teams");

    let id = state.teams.insert(Team::new()).await;
    Ok(JsonStatus::data_owned(serde_json::json!({ "id": id })))
}

/// Endpoint for listing the Pokemon on a team
#[get("/teams/<id>")]
pub async fn get_team(id: u64, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/teams/{}", id);

    let team = state
        .teams
        .get(id)
        .await
        .ok_or_else(|| JsonStatus::error("Team not found"))?;
    let team = team.lock().await;

    Ok(JsonStatus::data_owned(team.members().to_vec()))
}

/// Endpoint for adding a Pokemon to a team
#[post("/teams/<id>/members", data = "<pokemon>")]
pub async fn add_member(id: u64, pokemon: Json<Pokemon>, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/teams/{}/members", id);

    let team = state
        .teams
        .get(id)
        .await
        .ok_or_else(|| JsonStatus::error("Team not found"))?;
    let mut team = team.lock().await;
    team.add(pokemon.into_inner())
        .map_err(JsonStatus::from_anyhow)?;

    Ok(JsonStatus::data_owned(team.members().to_vec()))
}

/// Endpoint for removing the Pokemon in a team slot
#[delete("/teams/<id>/members/<slot>")]
pub async fn remove_member(id: u64, slot: usize, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/teams/{}/members/{}", id, slot);

    let team = state
        .teams
        .get(id)
        .await
        .ok_or_else(|| JsonStatus::error("Team not found"))?;
    let mut team = team.lock().await;
    team.remove(slot).map_err(JsonStatus::from_anyhow)?;

    Ok(JsonStatus::data_owned(team.members().to_vec()))
}
