use anyhow::{Context, Result, anyhow};
use futures::{FutureExt, future::BoxFuture};
use log::debug;

use super::PokeApi;

/// PokeAPI client over plain HTTP
pub struct HttpPokeApi {
    http_client: reqwest::Client,
}

impl HttpPokeApi {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP error! status: {} ({})", status, url));
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}

impl Default for HttpPokeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PokeApi for HttpPokeApi {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String>> {
        self.get_text(url).boxed()
    }
}
