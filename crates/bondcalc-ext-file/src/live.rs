//! Live treasury yields over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use bondcalc_core::TreasurySymbol;
use bondcalc_traits::error::TraitError;
use bondcalc_traits::market_data::*;

/// Connection settings for a live quote endpoint.
#[derive(Debug, Clone)]
pub struct LiveFeed {
    /// Endpoint queried as `GET {url}?symbol=US10Y&token={api_key}`.
    pub url: String,
    /// Sent as the `token` query parameter when present.
    pub api_key: Option<String>,
    /// Give up and fall back after this long.
    pub timeout: Duration,
}

impl LiveFeed {
    /// Feed at `url` with a 3 second timeout and no key.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: Duration::from_secs(3),
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Sets the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Quote body: `{"yield": 0.0425}`, decimal.
#[derive(Debug, Deserialize)]
struct LiveQuote {
    #[serde(rename = "yield")]
    yield_value: Option<f64>,
}

/// Request/response yield source backed by a JSON endpoint.
pub struct HttpYieldSource {
    url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpYieldSource {
    /// Create a source for `feed`.
    pub fn new(feed: &LiveFeed) -> Result<Self, TraitError> {
        let client = reqwest::Client::builder()
            .timeout(feed.timeout)
            .build()
            .map_err(|e| TraitError::Internal(e.to_string()))?;
        Ok(Self::with_client(feed, client))
    }

    /// Create a source for `feed` over a prepared client.
    pub fn with_client(feed: &LiveFeed, client: reqwest::Client) -> Self {
        Self {
            url: feed.url.clone(),
            api_key: feed.api_key.clone(),
            client,
        }
    }

    /// Endpoint being queried.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl YieldSource for HttpYieldSource {
    fn source_type(&self) -> SourceType {
        SourceType::Snapshot
    }

    async fn get_yield(&self, symbol: &TreasurySymbol) -> Result<YieldQuote, TraitError> {
        let code = symbol.code();
        let mut request = self.client.get(&self.url).query(&[("symbol", code)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("token", key.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TraitError::Timeout
            } else {
                TraitError::SourceNotAvailable(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(TraitError::SourceNotAvailable(format!(
                "{} responded with status {}",
                self.url,
                response.status()
            )));
        }

        let body: LiveQuote = response
            .json()
            .await
            .map_err(|e| TraitError::ParseError(e.to_string()))?;

        match body.yield_value {
            Some(y) if y.is_finite() => {
                tracing::debug!(%symbol, yield_value = y, "live quote");
                Ok(YieldQuote::new(*symbol, y, "live"))
            }
            Some(y) => Err(TraitError::ParseError(format!("non-finite yield {y} for {symbol}"))),
            None => Err(TraitError::NotFound(format!("no live yield for {symbol}"))),
        }
    }
}
