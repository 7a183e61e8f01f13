use std::ops::RangeInclusive;

use anyhow::{Context, Result, ensure};
use log::{debug, info};

use super::{
    PokeApi,
    retry::{self, linear_backoff},
    schema::{ApiResource, RawMove, RawPokemon},
};
use crate::{
    config::PokeApiConfig,
    pokemon::{
        Pokemon, capitalize,
        moves::{DamageCategory, Move},
        ptype::PokemonType,
        stats::PokemonStats,
    },
};

/// Fetches Pokemon `start_id ..= start_id + limit - 1`.
///
/// Ids are grouped into chunks of `batch_size` and everything, chunks, ids and
/// moves alike, is fetched one request at a time. A Pokemon that cannot be
/// fetched or parsed is left out, so the result may be partial or empty.
/// The only error is an invalid range, which is reported before any request.
pub async fn fetch_pokemon_list(
    api: &dyn PokeApi,
    settings: &PokeApiConfig,
    start_id: i64,
    limit: i64,
) -> Result<Vec<Pokemon>> {
    let ids = id_range(start_id, limit, settings.max_limit)?;
    info!(
        "Fetching {} Pokemon starting at #{} in chunks of {}",
        limit, start_id, settings.batch_size
    );

    let chunk_len = u32::try_from(settings.batch_size).unwrap_or(u32::MAX).max(1);
    let last = *ids.end();
    let mut chunk_start = *ids.start();
    let mut results = Vec::new();
    loop {
        let chunk_end = chunk_start.saturating_add(chunk_len - 1).min(last);
        results.extend(fetch_pokemon_batch(api, settings, chunk_start..=chunk_end).await);
        if chunk_end == last {
            break;
        }
        chunk_start = chunk_end + 1;
    }

    info!("Fetched {}/{} Pokemon", results.len(), limit);
    Ok(results)
}

fn id_range(start_id: i64, limit: i64, max_limit: u32) -> Result<RangeInclusive<u32>> {
    ensure!(start_id >= 1, "start_id must be at least 1, got {}", start_id);
    ensure!(limit >= 1, "limit must be positive, got {}", limit);
    ensure!(
        limit <= max_limit as i64,
        "limit must be at most {}, got {}",
        max_limit,
        limit
    );

    let last = start_id
        .checked_add(limit - 1)
        .filter(|last| *last <= u32::MAX as i64)
        .ok_or_else(|| anyhow::anyhow!("Id range {} + {} is out of bounds", start_id, limit))?;

    Ok(start_id as u32..=last as u32)
}

async fn fetch_pokemon_batch(
    api: &dyn PokeApi,
    settings: &PokeApiConfig,
    ids: RangeInclusive<u32>,
) -> Vec<Pokemon> {
    debug!("Fetching batch {:?}", ids);
    retry::collect_or_skip(ids, settings.throttle(), |id| fetch_pokemon(api, settings, id)).await
}

async fn fetch_pokemon(api: &dyn PokeApi, settings: &PokeApiConfig, id: u32) -> Result<Pokemon> {
    let url = format!("{}/pokemon/{}", settings.base_url, id);
    let body = get_with_retry(api, settings, &url).await?;

    let raw: RawPokemon = serde_json::from_str(&body)
        .with_context(|| format!("Malformed data for Pokemon #{}", id))?;

    let types = raw
        .types
        .iter()
        .map(|slot| capitalize(&slot.ptype.name).parse::<PokemonType>())
        .collect::<Result<Vec<_>>>()?;
    ensure!(!types.is_empty(), "Pokemon #{} has no types", id);

    let base_stats: Vec<u32> = raw.stats.iter().map(|s| s.base_stat).collect();
    let stats = PokemonStats::from_base_stats(&base_stats)?;

    let move_refs = &raw.moves[..raw.moves.len().min(settings.max_moves)];
    let move_refs: Vec<ApiResource> = move_refs.iter().map(|m| m.move_ref.clone()).collect();
    let moves = fetch_pokemon_moves(api, settings, &move_refs).await;

    Ok(Pokemon {
        id: raw.id,
        name: capitalize(&raw.name),
        types,
        stats,
        moves,
        sprite: raw.sprites.and_then(|s| s.front_default),
    })
}

/// Resolves move references in order. A move that cannot be fetched or parsed
/// is replaced by [`Move::unknown`], so the output is as long as the input.
pub async fn fetch_pokemon_moves(
    api: &dyn PokeApi,
    settings: &PokeApiConfig,
    move_refs: &[ApiResource],
) -> Vec<Move> {
    let urls: Vec<String> = move_refs.iter().map(|r| r.url.clone()).collect();
    retry::collect_or_substitute(
        urls,
        settings.throttle(),
        |url: String| async move { fetch_move(api, settings, &url).await },
        Move::unknown,
    )
    .await
}

async fn fetch_move(api: &dyn PokeApi, settings: &PokeApiConfig, url: &str) -> Result<Move> {
    let body = get_with_retry(api, settings, url).await?;
    let raw: RawMove =
        serde_json::from_str(&body).with_context(|| format!("Malformed move data at {}", url))?;

    Ok(Move {
        id: raw.id,
        name: capitalize(&raw.name),
        move_type: capitalize(&raw.move_type.name).parse::<PokemonType>()?,
        power: raw.power.unwrap_or(0),
        accuracy: raw.accuracy.unwrap_or(100),
        pp: raw.pp.unwrap_or(0),
        category: capitalize(&raw.damage_class.name).parse::<DamageCategory>()?,
        description: raw
            .effect_entries
            .into_iter()
            .next()
            .map(|e| e.effect)
            .unwrap_or_default(),
    })
}

async fn get_with_retry(api: &dyn PokeApi, settings: &PokeApiConfig, url: &str) -> Result<String> {
    retry::attempt(
        || api.get(url),
        settings.max_attempts,
        linear_backoff(settings.backoff_step()),
    )
    .await
}
