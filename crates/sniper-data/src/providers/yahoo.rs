//! Yahoo Finance chart-API history upstream.

use async_trait::async_trait;
use serde::Deserialize;
use sniper_core::{Bar, BarInterval, BarSeries, DataError, HistoryProvider};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

/// OHLCV arrays, with nulls where the upstream has gaps.
#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// History client for the Yahoo Finance v8 chart API. No API key required.
pub struct YahooHistoryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooHistoryProvider {
    pub fn new() -> Result<Self, DataError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            // The chart endpoint rejects requests without a browser-ish agent
            .user_agent("Mozilla/5.0 (compatible; market-data-client)")
            .build()
            .map_err(|e| DataError::Internal(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// Smallest documented chart-API range token covering the lookback. The
/// endpoint only accepts the fixed set 1d/5d/1mo/3mo/6mo/1y/2y/5y/10y, not
/// arbitrary day counts.
fn range_for(lookback_days: u32, interval: BarInterval) -> &'static str {
    match interval {
        BarInterval::Minute5 => {
            if lookback_days <= 1 {
                "1d"
            } else {
                "5d"
            }
        }
        BarInterval::Daily => match lookback_days {
            0..=1 => "1d",
            2..=5 => "5d",
            6..=30 => "1mo",
            31..=90 => "3mo",
            91..=180 => "6mo",
            181..=365 => "1y",
            366..=730 => "2y",
            731..=1825 => "5y",
            _ => "10y",
        },
    }
}

#[async_trait]
impl HistoryProvider for YahooHistoryProvider {
    async fn history(
        &self,
        symbol: &str,
        lookback_days: u32,
        interval: BarInterval,
        include_extended: bool,
    ) -> Result<Option<BarSeries>, DataError> {
        let symbol = symbol.to_uppercase();
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let range = range_for(lookback_days, interval);
        let interval_str = interval.to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("range", range),
                ("interval", interval_str.as_str()),
                ("includePrePost", if include_extended { "true" } else { "false" }),
            ])
            .send()
            .await
            .map_err(|e| DataError::Http(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol));
        }
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "chart request for {symbol} returned {}",
                response.status()
            )));
        }

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        if let Some(error) = body.chart.error {
            return Err(DataError::Parse(error.to_string()));
        }

        let Some(result) = body.chart.result.and_then(|mut r| {
            if r.is_empty() {
                None
            } else {
                Some(r.remove(0))
            }
        }) else {
            return Ok(None);
        };

        let Some(timestamps) = result.timestamp else {
            return Ok(None);
        };
        let Some(quote) = result.indicators.quote.into_iter().next() else {
            return Ok(None);
        };

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            // Gap bars carry nulls; a bar is only usable with a close
            let Some(close) = quote.close.get(i).copied().flatten() else {
                continue;
            };
            bars.push(Bar::new(
                ts * 1000,
                quote.open.get(i).copied().flatten().unwrap_or(close),
                quote.high.get(i).copied().flatten().unwrap_or(close),
                quote.low.get(i).copied().flatten().unwrap_or(close),
                close,
                quote.volume.get(i).copied().flatten().unwrap_or(0.0),
            ));
        }

        if bars.is_empty() {
            return Ok(None);
        }
        Ok(Some(BarSeries::from_bars(symbol, bars)))
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_strings() {
        assert_eq!(range_for(30, BarInterval::Daily), "1mo");
        assert_eq!(range_for(90, BarInterval::Daily), "3mo");
        assert_eq!(range_for(5, BarInterval::Daily), "5d");
        assert_eq!(range_for(1, BarInterval::Minute5), "1d");
        assert_eq!(range_for(3, BarInterval::Minute5), "5d");
    }

    #[test]
    fn test_long_lookbacks_map_to_year_ranges() {
        // The default one-year lookback must land on a token the endpoint
        // accepts, not a raw month count like "12mo".
        assert_eq!(range_for(365, BarInterval::Daily), "1y");
        assert_eq!(range_for(400, BarInterval::Daily), "2y");
        assert_eq!(range_for(730, BarInterval::Daily), "2y");
        assert_eq!(range_for(1000, BarInterval::Daily), "5y");
        assert_eq!(range_for(3000, BarInterval::Daily), "10y");
    }

    #[test]
    fn test_chart_response_parses_with_gaps() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1700000000, 1700086400, 1700172800],
                    "indicators": {
                        "quote": [{
                            "open": [99.0, null, 101.0],
                            "high": [100.5, null, 102.5],
                            "low": [98.5, null, 100.0],
                            "close": [100.0, null, 102.0],
                            "volume": [1000000, null, 1200000]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let body: ChartResponse = serde_json::from_str(json).unwrap();
        let result = &body.chart.result.as_ref().unwrap()[0];
        assert_eq!(result.timestamp.as_ref().unwrap().len(), 3);
        assert_eq!(result.indicators.quote[0].close[1], None);
    }

    #[test]
    fn test_chart_error_parses() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#;
        let body: ChartResponse = serde_json::from_str(json).unwrap();
        assert!(body.chart.result.is_none());
        assert!(body.chart.error.is_some());
    }
}
