//! Market data gateway: the single entry point the rest of the engine uses
//! to obtain snapshots.
//!
//! Lookup order is cache, then the rate-limited quote upstream, then the
//! history upstream. The quote path yields a degraded snapshot (price only,
//! neutral indicators); the history path yields the full indicator set.
//! Upstream faults are logged and absorbed; the caller only ever sees
//! `Option<MarketSnapshot>`.

use chrono::{Datelike, TimeZone, Timelike, Utc, Weekday};
use sniper_core::{
    BarInterval, BarSeries, Clock, DataError, HistoryProvider, MarketSnapshot, QuoteProvider,
    Session, SystemClock, Trend,
};
use sniper_indicators::SnapshotBuilder;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::SnapshotCache;
use crate::limiter::RateLimiter;

/// Daily bars fetched for the full-snapshot path.
const DAILY_LOOKBACK_DAYS: u32 = 30;

/// Gateway tuning knobs.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub cache_ttl: Duration,
    /// Quote upstream budget: `rate_limit` requests per `rate_period`.
    pub rate_limit: u32,
    pub rate_period: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            cache_ttl: crate::cache::DEFAULT_TTL,
            rate_limit: 60,
            rate_period: Duration::from_secs(60),
        }
    }
}

/// Cached, rate-limited access to the configured upstreams.
pub struct MarketDataGateway {
    quote_provider: Arc<dyn QuoteProvider>,
    history_provider: Arc<dyn HistoryProvider>,
    cache: SnapshotCache,
    limiter: RateLimiter,
}

impl MarketDataGateway {
    pub fn new(
        quote_provider: Arc<dyn QuoteProvider>,
        history_provider: Arc<dyn HistoryProvider>,
    ) -> Self {
        Self::with_config(quote_provider, history_provider, GatewayConfig::default())
    }

    pub fn with_config(
        quote_provider: Arc<dyn QuoteProvider>,
        history_provider: Arc<dyn HistoryProvider>,
        config: GatewayConfig,
    ) -> Self {
        Self::with_config_and_clock(quote_provider, history_provider, config, Arc::new(SystemClock))
    }

    /// Full constructor with an injected clock, for deterministic tests.
    pub fn with_config_and_clock(
        quote_provider: Arc<dyn QuoteProvider>,
        history_provider: Arc<dyn HistoryProvider>,
        config: GatewayConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            quote_provider,
            history_provider,
            cache: SnapshotCache::with_clock(config.cache_ttl, clock.clone()),
            limiter: RateLimiter::with_clock(config.rate_limit, config.rate_period, clock),
        }
    }

    /// Obtain a snapshot for the symbol, or None when every upstream fails.
    pub async fn snapshot(&self, symbol: &str, use_cache: bool) -> Option<MarketSnapshot> {
        let symbol = symbol.to_uppercase();

        if use_cache {
            if let Some(hit) = self.cache.get(&symbol) {
                debug!(%symbol, "snapshot cache hit");
                return Some(hit);
            }
        }

        if let Some(snapshot) = self.quote_snapshot(&symbol).await {
            self.cache.insert(snapshot.clone());
            return Some(snapshot);
        }

        if let Some(snapshot) = self.history_snapshot(&symbol).await {
            self.cache.insert(snapshot.clone());
            return Some(snapshot);
        }

        warn!(%symbol, "no upstream produced a snapshot");
        None
    }

    /// Daily bars for replay. Unmetered: history upstreams carry their own
    /// generous limits.
    pub async fn daily_history(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> Result<Option<BarSeries>, DataError> {
        self.history_provider
            .history(&symbol.to_uppercase(), lookback_days, BarInterval::Daily, false)
            .await
    }

    async fn quote_snapshot(&self, symbol: &str) -> Option<MarketSnapshot> {
        if !self.limiter.try_acquire() {
            warn!(
                %symbol,
                provider = self.quote_provider.name(),
                "quote budget exhausted, falling back to history"
            );
            return None;
        }

        match self.quote_provider.quote(symbol).await {
            Ok(Some(quote)) if quote.is_usable() => {
                let mut snapshot = MarketSnapshot::degraded(symbol, quote.price);
                snapshot.day_high = quote.day_high;
                snapshot.day_low = quote.day_low;
                snapshot.change_percent = quote.change_percent;
                snapshot.timestamp = quote.timestamp;
                snapshot.session = session_for(quote.timestamp);
                snapshot.data_source = self.quote_provider.name().to_string();
                Some(snapshot)
            }
            Ok(_) => {
                warn!(%symbol, provider = self.quote_provider.name(), "no usable quote");
                None
            }
            Err(error) => {
                warn!(
                    %symbol,
                    provider = self.quote_provider.name(),
                    %error,
                    "quote fetch failed"
                );
                None
            }
        }
    }

    async fn history_snapshot(&self, symbol: &str) -> Option<MarketSnapshot> {
        let series = match self
            .history_provider
            .history(symbol, DAILY_LOOKBACK_DAYS, BarInterval::Daily, false)
            .await
        {
            Ok(Some(series)) if !series.is_empty() => series,
            Ok(_) => {
                warn!(%symbol, provider = self.history_provider.name(), "no history available");
                return None;
            }
            Err(error) => {
                warn!(
                    %symbol,
                    provider = self.history_provider.name(),
                    %error,
                    "history fetch failed"
                );
                return None;
            }
        };

        let builder = SnapshotBuilder::new(self.history_provider.name());
        let mut snapshot = builder.build_latest(&series)?;

        // Refresh the stale daily close with the newest intraday print when
        // one is available; indicators stay on the daily timeframe.
        match self.history_provider.latest_intraday(symbol).await {
            Ok(Some(bar)) if bar.close > 0.0 => {
                let daily_close = snapshot.price;
                snapshot.price = bar.close;
                if daily_close > 0.0 {
                    snapshot.change_percent = (bar.close - daily_close) / daily_close * 100.0;
                }
                snapshot.timestamp = bar.timestamp;
                snapshot.session = session_for(bar.timestamp);
                snapshot.trend = Trend::classify(bar.close, snapshot.ema_9, snapshot.ema_21);
            }
            Ok(_) => {}
            Err(error) => {
                warn!(%symbol, %error, "intraday refresh failed, keeping daily close");
            }
        }

        Some(snapshot)
    }
}

/// Classify a timestamp against the regular US cash session, 13:30-20:00 UTC.
/// DST shifts the true boundary by an hour; close enough for labeling.
fn session_for(timestamp_ms: i64) -> Session {
    let Some(datetime) = Utc.timestamp_millis_opt(timestamp_ms).single() else {
        return Session::Regular;
    };
    if matches!(datetime.weekday(), Weekday::Sat | Weekday::Sun) {
        return Session::Extended;
    }
    let minutes = datetime.hour() * 60 + datetime.minute();
    if (810..1200).contains(&minutes) {
        Session::Regular
    } else {
        Session::Extended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sniper_core::{Bar, ManualClock, Quote};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeQuoteProvider {
        price: f64,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeQuoteProvider {
        fn new(price: f64) -> Arc<Self> {
            Arc::new(Self {
                price,
                fail: false,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                price: 0.0,
                fail: true,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl QuoteProvider for FakeQuoteProvider {
        async fn quote(&self, symbol: &str) -> Result<Option<Quote>, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DataError::Http("boom".into()));
            }
            Ok(Some(Quote {
                symbol: symbol.to_string(),
                price: self.price,
                open: self.price,
                day_high: self.price + 1.0,
                day_low: self.price - 1.0,
                previous_close: self.price,
                change_percent: 0.0,
                timestamp: 1_700_000_000_000,
            }))
        }

        fn name(&self) -> &str {
            "fake-quote"
        }
    }

    struct FakeHistoryProvider {
        daily_closes: Vec<f64>,
        intraday_close: Option<(f64, i64)>,
        calls: AtomicUsize,
    }

    impl FakeHistoryProvider {
        fn new(daily_closes: Vec<f64>) -> Arc<Self> {
            Arc::new(Self {
                daily_closes,
                intraday_close: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn with_intraday(daily_closes: Vec<f64>, close: f64, timestamp: i64) -> Arc<Self> {
            Arc::new(Self {
                daily_closes,
                intraday_close: Some((close, timestamp)),
                calls: AtomicUsize::new(0),
            })
        }

        fn empty() -> Arc<Self> {
            Self::new(Vec::new())
        }
    }

    #[async_trait]
    impl HistoryProvider for FakeHistoryProvider {
        async fn history(
            &self,
            _symbol: &str,
            _lookback_days: u32,
            interval: BarInterval,
            _include_extended: bool,
        ) -> Result<Option<BarSeries>, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let closes: Vec<f64> = match interval {
                BarInterval::Daily => self.daily_closes.clone(),
                BarInterval::Minute5 => match self.intraday_close {
                    Some((close, _)) => vec![close],
                    None => Vec::new(),
                },
            };
            if closes.is_empty() {
                return Ok(None);
            }
            let base_ts = match (interval, self.intraday_close) {
                (BarInterval::Minute5, Some((_, ts))) => ts,
                _ => 0,
            };
            Ok(Some(
                closes
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| {
                        Bar::new(base_ts + i as i64 * 86_400_000, c, c + 1.0, c - 1.0, c, 1000.0)
                    })
                    .collect(),
            ))
        }

        fn name(&self) -> &str {
            "fake-history"
        }
    }

    fn gateway_with_clock(
        quote: Arc<FakeQuoteProvider>,
        history: Arc<FakeHistoryProvider>,
        rate_limit: u32,
    ) -> MarketDataGateway {
        MarketDataGateway::with_config_and_clock(
            quote,
            history,
            GatewayConfig {
                rate_limit,
                ..GatewayConfig::default()
            },
            Arc::new(ManualClock::new()),
        )
    }

    #[tokio::test]
    async fn test_cache_coalesces_repeat_requests() {
        let quote = FakeQuoteProvider::new(150.0);
        let gateway = gateway_with_clock(quote.clone(), FakeHistoryProvider::empty(), 60);

        let first = gateway.snapshot("AAPL", true).await.unwrap();
        let second = gateway.snapshot("aapl", true).await.unwrap();

        assert_eq!(first.price, second.price);
        assert_eq!(quote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_bypass_refetches() {
        let quote = FakeQuoteProvider::new(150.0);
        let gateway = gateway_with_clock(quote.clone(), FakeHistoryProvider::empty(), 60);

        gateway.snapshot("AAPL", true).await.unwrap();
        gateway.snapshot("AAPL", false).await.unwrap();

        assert_eq!(quote.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_quote_failure_falls_back_to_history() {
        let history = FakeHistoryProvider::new(vec![100.0; 30]);
        let gateway = gateway_with_clock(FakeQuoteProvider::failing(), history, 60);

        let snapshot = gateway.snapshot("AAPL", false).await.unwrap();
        assert_eq!(snapshot.data_source, "fake-history");
        // Full snapshot: channel levels derived from history
        assert!(snapshot.resistance > 0.0);
    }

    #[tokio::test]
    async fn test_exhausted_budget_skips_quote_upstream() {
        let quote = FakeQuoteProvider::new(150.0);
        let history = FakeHistoryProvider::new(vec![100.0; 30]);
        let gateway = gateway_with_clock(quote.clone(), history, 1);

        let first = gateway.snapshot("AAPL", false).await.unwrap();
        assert_eq!(first.data_source, "fake-quote");

        let second = gateway.snapshot("AAPL", false).await.unwrap();
        assert_eq!(second.data_source, "fake-history");
        assert_eq!(quote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_upstreams_failed_yields_none() {
        let gateway = gateway_with_clock(
            FakeQuoteProvider::failing(),
            FakeHistoryProvider::empty(),
            60,
        );
        assert!(gateway.snapshot("AAPL", false).await.is_none());
    }

    #[tokio::test]
    async fn test_intraday_print_overrides_daily_close() {
        // 2023-11-04 12:13:20 UTC, a Saturday
        let saturday_ms = 1_699_100_000_000;
        let history = FakeHistoryProvider::with_intraday(vec![100.0; 30], 105.0, saturday_ms);
        let gateway = gateway_with_clock(FakeQuoteProvider::failing(), history, 60);

        let snapshot = gateway.snapshot("AAPL", false).await.unwrap();
        assert_eq!(snapshot.price, 105.0);
        assert_eq!(snapshot.session, Session::Extended);
        assert!((snapshot.change_percent - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_session_classification() {
        // 2023-11-14 15:00 UTC, a Tuesday inside regular hours
        assert_eq!(session_for(1_699_974_000_000), Session::Regular);
        // 2023-11-14 22:00 UTC, after hours
        assert_eq!(session_for(1_699_999_200_000), Session::Extended);
    }
}
