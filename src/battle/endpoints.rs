use std::sync::Arc;

use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};
use rocket::{State, serde::json::Json};
use serde::Serialize;
use tokio::sync::Mutex;

use super::{
    BattleEvent, BattleSession, Phase, Side,
    damage::RandomRoll,
    session::resolve_opponent_turn,
};
use crate::{
    json::{JsonResult, JsonStatus},
    pokemon::{Pokemon, moves::Move},
    state::AppState,
};

/// What a client sees of a battle
#[derive(Serialize)]
pub struct BattleView {
    id: u64,
    player: Option<String>,
    opponent: Option<String>,
    player_hp: u32,
    opponent_hp: u32,
    phase: Phase,
    turn_owner: Option<Side>,
    finished: bool,
    winner: Option<Side>,
    legal_moves: Vec<Move>,
    events: Vec<BattleEvent>,
    log: Vec<String>,
}

impl BattleView {
    fn new(id: u64, session: &BattleSession) -> Self {
        Self {
            id,
            player: session.player().map(|p| p.name.clone()),
            opponent: session.opponent().map(|p| p.name.clone()),
            player_hp: session.player_hp(),
            opponent_hp: session.opponent_hp(),
            phase: session.phase(),
            turn_owner: session.turn_owner(),
            finished: session.is_finished(),
            winner: session.winner(),
            legal_moves: session.legal_moves().into_owned(),
            events: session.log().to_vec(),
            log: session.narration(),
        }
    }
}

async fn find_battle(state: &AppState, id: u64) -> Result<Arc<Mutex<BattleSession>>, JsonStatus> {
    state
        .battles
        .get(id)
        .await
        .ok_or_else(|| JsonStatus::error("Battle not found"))
}

/// Endpoint for starting a new battle session
#[post("/battles")]
pub async fn create_battle(state: &State<AppState>) -> JsonResult {
    info!("Request to /api/battles");

    let session = BattleSession::new(state.config.battle.starting_hp);
    let id = state.battles.insert(session).await;

    Ok(JsonStatus::data_owned(serde_json::json!({ "id": id })))
}

/// Endpoint for reading the current state of a battle
#[get("/battles/<id>")]
pub async fn get_battle(id: u64, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/battles/{}", id);

    let battle = find_battle(state, id).await?;
    let session = battle.lock().await;

    Ok(JsonStatus::data_owned(BattleView::new(id, &session)))
}

/// Endpoint for choosing the player's Pokemon
#[post("/battles/<id>/player", data = "<pokemon>")]
pub async fn select_player(id: u64, pokemon: Json<Pokemon>, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/battles/{}/player", id);

    let battle = find_battle(state, id).await?;
    let mut session = battle.lock().await;
    session.select_player(pokemon.into_inner())?;

    Ok(JsonStatus::data_owned(BattleView::new(id, &session)))
}

/// Endpoint for choosing the opponent's Pokemon
#[post("/battles/<id>/opponent", data = "<pokemon>")]
pub async fn select_opponent(id: u64, pokemon: Json<Pokemon>, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/battles/{}/opponent", id);

    let battle = find_battle(state, id).await?;
    let mut session = battle.lock().await;
    session.select_opponent(pokemon.into_inner())?;

    Ok(JsonStatus::data_owned(BattleView::new(id, &session)))
}

/// Endpoint for submitting the player's move.
/// Unless the opponent fainted, its reply is resolved in the background after the AI delay.
#[post("/battles/<id>/moves/<move_index>")]
pub async fn submit_move(id: u64, move_index: usize, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/battles/{}/moves/{}", id, move_index);

    let battle = find_battle(state, id).await?;

    let view = {
        let mut session = battle.lock().await;
        let mut rng = RandomRoll(StdRng::from_entropy());
        session.apply_player_move(move_index, &mut rng)?;
        BattleView::new(id, &session)
    };

    if view.phase == Phase::ResolvingAi {
        let delay = state.config.battle.ai_delay();
        tokio::spawn(async move {
            let mut rng = RandomRoll(StdRng::from_entropy());
            if let Err(e) = resolve_opponent_turn(&battle, delay, &mut rng).await {
                warn!("Opponent turn in battle {} failed: {}", id, e);
            }
        });
    }

    Ok(JsonStatus::data_owned(view))
}

/// Endpoint for discarding a battle
#[delete("/battles/<id>")]
pub async fn delete_battle(id: u64, state: &State<AppState>) -> JsonResult {
    info!("Request to /api/battles/{}", id);

    state
        .battles
        .remove(id)
        .await
        .ok_or_else(|| JsonStatus::error("Battle not found"))?;

    Ok(JsonStatus::ok(None::<String>))
}
