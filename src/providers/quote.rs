//! Live quote API client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::providers::{PriceProvider, ProviderError};

/// Prices fetched from a remote quote endpoint, one request per symbol.
#[derive(Clone)]
pub struct QuoteProvider {
    /// The underlying HTTP client.
    http_client: Client,
    /// Quote endpoint; `symbol` and `token` are added as query parameters.
    base_url: Url,
    /// API access token.
    api_token: String,
    /// Symbols to report, in submission order.
    symbols: Vec<String>,
}

impl QuoteProvider {
    pub fn new(base_url: Url, api_token: String, symbols: Vec<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
            api_token,
            symbols,
        }
    }

    /// Fetch the current-price field (`c`) for `symbol`.
    ///
    /// The field is returned as-is; a missing field comes back as `null`.
    pub async fn fetch_price(&self, symbol: &str) -> Result<Value, ProviderError> {
        tracing::debug!(url = %self.base_url, symbol, "fetching quote");

        let response = self
            .http_client
            .get(self.base_url.clone())
            .query(&[("symbol", symbol), ("token", self.api_token.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        Ok(body.get("c").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl PriceProvider for QuoteProvider {
    fn name(&self) -> &'static str {
        "quote"
    }

    fn symbols(&self) -> Vec<String> {
        self.symbols.clone()
    }

    async fn price(&self, symbol: &str) -> Result<String, ProviderError> {
        let value = self.fetch_price(symbol).await?;
        Ok(match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

impl std::fmt::Debug for QuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteProvider")
            .field("base_url", &self.base_url.as_str())
            .field("symbols", &self.symbols)
            .finish()
    }
}
