use std::time::Duration;

use tokio::time::Instant;

use super::{BASE_URL, FakePokeApi, move_json, move_url, pokemon_json, pokemon_url};
use crate::config::PokeApiConfig;
use crate::pokeapi::{fetch_pokemon_list, fetch_pokemon_moves, schema::ApiResource};
use crate::pokemon::{
    moves::{DamageCategory, Move},
    ptype::PokemonType,
};

fn settings() -> PokeApiConfig {
    PokeApiConfig {
        base_url: BASE_URL.to_string(),
        ..PokeApiConfig::default()
    }
}

fn with_pokemon(api: FakePokeApi, id: u32, name: &str) -> FakePokeApi {
    api.respond(pokemon_url(id), pokemon_json(id, name, &["grass"], &[]))
}

#[tokio::test(start_paused = true)]
async fn test_fetches_window_in_order() {
    let api = FakePokeApi::new()
        .respond(
            pokemon_url(1),
            pokemon_json(1, "bulbasaur", &["grass", "poison"], &[move_url(33)]),
        )
        .respond(move_url(33), move_json(33, "tackle", "normal", Some(40), "physical"));
    let api = with_pokemon(api, 2, "ivysaur");
    let api = with_pokemon(api, 3, "venusaur");

    let pokemons = fetch_pokemon_list(&api, &settings(), 1, 3).await.unwrap();

    let ids: Vec<u32> = pokemons.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let bulbasaur = &pokemons[0];
    assert_eq!(bulbasaur.name, "Bulbasaur");
    assert_eq!(bulbasaur.types, vec![PokemonType::Grass, PokemonType::Poison]);
    assert_eq!(bulbasaur.stats.hp, 45);
    assert_eq!(bulbasaur.stats.attack, 49);
    assert_eq!(bulbasaur.stats.defense, 65);
    assert_eq!(bulbasaur.stats.special_attack, 60);
    assert_eq!(bulbasaur.stats.special_defense, 70);
    assert_eq!(bulbasaur.stats.speed, 80);
    assert_eq!(
        bulbasaur.sprite.as_deref(),
        Some("https://sprites.test/1.png")
    );

    assert_eq!(bulbasaur.moves.len(), 1);
    let tackle = &bulbasaur.moves[0];
    assert_eq!(tackle.id, 33);
    assert_eq!(tackle.name, "Tackle");
    assert_eq!(tackle.move_type, PokemonType::Normal);
    assert_eq!(tackle.power, 40);
    assert_eq!(tackle.accuracy, 95);
    assert_eq!(tackle.pp, 35);
    assert_eq!(tackle.category, DamageCategory::Physical);
    assert_eq!(tackle.description, "Inflicts regular damage.");
}

#[tokio::test(start_paused = true)]
async fn test_skips_pokemon_that_keeps_failing() {
    let api = with_pokemon(FakePokeApi::new(), 1, "bulbasaur").fail(pokemon_url(2), 500);
    let api = with_pokemon(api, 3, "venusaur");

    let pokemons = fetch_pokemon_list(&api, &settings(), 1, 3).await.unwrap();

    let ids: Vec<u32> = pokemons.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(api.calls_to(&pokemon_url(2)), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retries_with_linear_backoff() {
    let body = pokemon_json(7, "squirtle", &["water"], &[]);
    let api = FakePokeApi::new().script(pokemon_url(7), vec![Err(503), Err(503), Ok(body)]);

    let started = Instant::now();
    let pokemons = fetch_pokemon_list(&api, &settings(), 7, 1).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(pokemons.len(), 1);
    assert_eq!(pokemons[0].name, "Squirtle");
    assert_eq!(api.calls_to(&pokemon_url(7)), 3);
    // 100ms throttle, then 1s and 2s of backoff
    assert!(elapsed >= Duration::from_millis(3100), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(3200), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_throttles_every_request() {
    let api = FakePokeApi::new()
        .respond(
            pokemon_url(1),
            pokemon_json(1, "bulbasaur", &["grass"], &[move_url(1), move_url(2)]),
        )
        .respond(move_url(1), move_json(1, "pound", "normal", Some(40), "physical"))
        .respond(move_url(2), move_json(2, "karate-chop", "fighting", Some(50), "physical"));

    let started = Instant::now();
    fetch_pokemon_list(&api, &settings(), 1, 1).await.unwrap();

    // one Pokemon request and two move requests, 100ms apart
    assert!(started.elapsed() >= Duration::from_millis(300));
    assert_eq!(api.calls(), vec![pokemon_url(1), move_url(1), move_url(2)]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_move_is_replaced_in_place() {
    let api = FakePokeApi::new()
        .respond(
            pokemon_url(25),
            pokemon_json(
                25,
                "pikachu",
                &["electric"],
                &[move_url(1), move_url(2), move_url(3)],
            ),
        )
        .respond(move_url(1), move_json(1, "pound", "normal", Some(40), "physical"))
        .fail(move_url(2), 500)
        .respond(move_url(3), move_json(3, "thunder-shock", "electric", Some(40), "special"));

    let pokemons = fetch_pokemon_list(&api, &settings(), 25, 1).await.unwrap();

    assert_eq!(pokemons.len(), 1);
    let moves = &pokemons[0].moves;
    assert_eq!(moves.len(), 3);
    assert_eq!(moves[0].name, "Pound");
    assert_eq!(moves[1], Move::unknown());
    assert_eq!(moves[2].name, "Thunder-shock");
    assert_eq!(moves[2].category, DamageCategory::Special);
    assert_eq!(api.calls_to(&move_url(2)), 3);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_move_is_replaced() {
    let api = FakePokeApi::new()
        .respond(
            pokemon_url(1),
            pokemon_json(1, "bulbasaur", &["grass"], &[move_url(1)]),
        )
        .respond(move_url(1), r#"{"id": 1, "name": "pound"}"#);

    let pokemons = fetch_pokemon_list(&api, &settings(), 1, 1).await.unwrap();

    assert_eq!(pokemons[0].moves, vec![Move::unknown()]);
    // data-shape failures are not retried
    assert_eq!(api.calls_to(&move_url(1)), 1);
}

#[tokio::test(start_paused = true)]
async fn test_only_first_four_moves_are_fetched() {
    let urls: Vec<String> = (1..=6).map(move_url).collect();
    let mut api = FakePokeApi::new().respond(
        pokemon_url(1),
        pokemon_json(1, "bulbasaur", &["grass"], &urls),
    );
    for id in 1..=6 {
        api = api.respond(move_url(id), move_json(id, "pound", "normal", Some(40), "physical"));
    }

    let pokemons = fetch_pokemon_list(&api, &settings(), 1, 1).await.unwrap();

    assert_eq!(pokemons[0].moves.len(), 4);
    assert_eq!(api.calls_to(&move_url(5)), 0);
    assert_eq!(api.calls_to(&move_url(6)), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_move_fields_get_defaults() {
    let body = serde_json::json!({
        "id": 45,
        "name": "growl",
        "type": { "name": "normal" },
        "power": null,
        "accuracy": null,
        "pp": 40,
        "damage_class": { "name": "status" },
        "effect_entries": [],
    })
    .to_string();
    let api = FakePokeApi::new().respond(move_url(45), body);
    let refs = vec![ApiResource { url: move_url(45) }];

    let moves = fetch_pokemon_moves(&api, &settings(), &refs).await;

    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].name, "Growl");
    assert_eq!(moves[0].power, 0);
    assert_eq!(moves[0].accuracy, 100);
    assert_eq!(moves[0].pp, 40);
    assert_eq!(moves[0].category, DamageCategory::Status);
    assert_eq!(moves[0].description, "");
}

#[tokio::test(start_paused = true)]
async fn test_malformed_pokemon_is_skipped() {
    let api = FakePokeApi::new()
        .respond(pokemon_url(1), r#"{"id": 1, "name": "bulbasaur", "types": [], "stats": []}"#);
    let api = with_pokemon(api, 2, "ivysaur");

    let pokemons = fetch_pokemon_list(&api, &settings(), 1, 2).await.unwrap();

    let ids: Vec<u32> = pokemons.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_type_skips_pokemon() {
    let api = FakePokeApi::new().respond(
        pokemon_url(1),
        pokemon_json(1, "missingno", &["bird"], &[]),
    );

    let pokemons = fetch_pokemon_list(&api, &settings(), 1, 1).await.unwrap();

    assert!(pokemons.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_everything_failing_yields_empty_list() {
    let api = FakePokeApi::new();

    let pokemons = fetch_pokemon_list(&api, &settings(), 1, 25).await.unwrap();

    assert!(pokemons.is_empty());
    assert_eq!(api.calls().len(), 25 * 3);
}

#[tokio::test(start_paused = true)]
async fn test_results_stay_within_window_and_ordered() {
    let mut api = FakePokeApi::new();
    for id in [10, 11, 13, 17, 19, 21, 40] {
        api = with_pokemon(api, id, "pokemon");
    }

    let pokemons = fetch_pokemon_list(&api, &settings(), 11, 10).await.unwrap();

    let ids: Vec<u32> = pokemons.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![11, 13, 17, 19]);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    // 10 and 40 are outside the window and never requested
    assert_eq!(api.calls_to(&pokemon_url(10)), 0);
    assert_eq!(api.calls_to(&pokemon_url(40)), 0);
}

#[tokio::test]
async fn test_rejects_invalid_range_without_requests() {
    let api = FakePokeApi::new();

    assert!(fetch_pokemon_list(&api, &settings(), 0, 10).await.is_err());
    assert!(fetch_pokemon_list(&api, &settings(), -5, 10).await.is_err());
    assert!(fetch_pokemon_list(&api, &settings(), 1, 0).await.is_err());
    assert!(fetch_pokemon_list(&api, &settings(), 1, -1).await.is_err());
    assert!(
        fetch_pokemon_list(&api, &settings(), u32::MAX as i64, 2)
            .await
            .is_err()
    );

    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_rejects_oversized_window_without_requests() {
    let api = FakePokeApi::new();

    let result = fetch_pokemon_list(&api, &settings(), 1, 4_000_000_000).await;
    assert!(format!("{:#}", result.unwrap_err()).contains("at most 1025"));

    let narrow = PokeApiConfig {
        max_limit: 5,
        ..settings()
    };
    assert!(fetch_pokemon_list(&api, &narrow, 1, 6).await.is_err());

    assert!(api.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_last_chunk_may_be_short() {
    let mut api = FakePokeApi::new();
    for id in 1..=7 {
        api = with_pokemon(api, id, "pokemon");
    }
    let settings = PokeApiConfig {
        batch_size: 3,
        max_limit: 7,
        ..settings()
    };

    let pokemons = fetch_pokemon_list(&api, &settings, 1, 7).await.unwrap();

    let ids: Vec<u32> = pokemons.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(api.calls().len(), 7);
}
