//! Finnhub real-time quote upstream.

use async_trait::async_trait;
use serde::Deserialize;
use sniper_core::{DataError, Quote, QuoteProvider};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire format of `GET /quote`. Field names follow the upstream API.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price.
    c: f64,
    /// Day high.
    #[serde(default)]
    h: f64,
    /// Day low.
    #[serde(default)]
    l: f64,
    /// Day open.
    #[serde(default)]
    o: f64,
    /// Previous close.
    #[serde(default)]
    pc: f64,
    /// Percent change, absent for unknown symbols.
    #[serde(default)]
    dp: Option<f64>,
    /// Unix timestamp in seconds.
    #[serde(default)]
    t: i64,
}

/// Quote client for the Finnhub REST API.
pub struct FinnhubQuoteProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FinnhubQuoteProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DataError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DataError::Internal(e.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl QuoteProvider for FinnhubQuoteProvider {
    async fn quote(&self, symbol: &str) -> Result<Option<Quote>, DataError> {
        let symbol = symbol.to_uppercase();
        let response = self
            .client
            .get(format!("{}/quote", self.base_url))
            .query(&[("symbol", symbol.as_str()), ("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| DataError::Http(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "quote request for {symbol} returned {}",
                response.status()
            )));
        }

        let body: QuoteResponse = response
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        // Unknown symbols come back as an all-zero quote.
        if body.c <= 0.0 {
            return Ok(None);
        }

        let change_percent = body.dp.unwrap_or_else(|| {
            if body.pc > 0.0 {
                (body.c - body.pc) / body.pc * 100.0
            } else {
                0.0
            }
        });

        Ok(Some(Quote {
            symbol,
            price: body.c,
            open: body.o,
            day_high: body.h,
            day_low: body.l,
            previous_close: body.pc,
            change_percent,
            timestamp: body.t * 1000,
        }))
    }

    fn name(&self) -> &str {
        "finnhub"
    }
}
