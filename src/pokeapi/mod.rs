/// HTTP client for the upstream REST API
pub mod client;

/// Upstream JSON shapes
pub mod schema;

/// Retry with backoff and best-effort collection
pub mod retry;

/// Paginated, throttled fetching of Pokemon and their moves
pub mod pipeline;

use anyhow::Result;
use futures::future::BoxFuture;

pub use client::HttpPokeApi;
pub use pipeline::{fetch_pokemon_list, fetch_pokemon_moves};

/// Anything that can answer a GET request with a response body.
/// Implementations must report non-success statuses as errors so they get retried.
pub trait PokeApi: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String>>;
}
