//! Per-symbol market snapshot: the single input every strategy agent sees.

use serde::{Deserialize, Serialize};

/// Qualitative trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl Trend {
    /// Classify the trend from price vs. short and medium EMAs.
    ///
    /// Price above both EMAs with EMA9 above EMA21 is the strong bull case;
    /// the mirror is the strong bear case; price above EMA9 alone still counts
    /// as bullish, everything else as bearish.
    pub fn classify(price: f64, ema_9: f64, ema_21: f64) -> Self {
        if price > ema_9 && ema_9 > ema_21 {
            Trend::Bullish
        } else if price < ema_9 && ema_9 < ema_21 {
            Trend::Bearish
        } else if price > ema_9 {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, Trend::Bullish)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, Trend::Bearish)
    }
}

/// Trading session the latest price was observed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Session {
    Regular,
    /// Pre-market or after-hours.
    Extended,
}

/// Immutable per-(symbol, timestamp) view of the market with the full derived
/// indicator set. Produced by the data gateway or the snapshot builder; one
/// instance is shared by every agent in an evaluation round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub price: f64,
    /// Short EMA (5-period), when enough history exists.
    pub ema_5: Option<f64>,
    pub ema_9: f64,
    pub ema_21: f64,
    /// Long EMA (50-period), absent on short histories.
    pub ema_50: Option<f64>,
    /// RSI(14), 0-100, neutral 50 when underived.
    pub rsi: f64,
    /// Current volume over 20-bar average volume.
    pub volume_ratio: f64,
    /// 20-bar low.
    pub support: f64,
    /// 20-bar high.
    pub resistance: f64,
    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    pub donchian_upper_20: f64,
    pub donchian_lower_20: f64,
    pub donchian_upper_40: f64,
    pub donchian_lower_40: f64,
    pub atr: f64,
    pub high_52w: f64,
    pub low_52w: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub change_percent: f64,
    pub trend: Trend,
    pub session: Session,
    /// Which upstream produced this snapshot.
    pub data_source: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
}

impl MarketSnapshot {
    /// A snapshot is only evaluable with a positive price; agents short-circuit
    /// to HOLD with zero confidence otherwise.
    pub fn is_evaluable(&self) -> bool {
        self.price > 0.0
    }

    /// Neutral placeholder snapshot for a bare price, used when only a
    /// real-time quote (no history) is available.
    pub fn degraded(symbol: &str, price: f64) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            price,
            ema_5: None,
            ema_9: price,
            ema_21: price,
            ema_50: None,
            rsi: 50.0,
            volume_ratio: 1.0,
            support: 0.0,
            resistance: 0.0,
            bb_upper: 0.0,
            bb_middle: 0.0,
            bb_lower: 0.0,
            donchian_upper_20: 0.0,
            donchian_lower_20: 0.0,
            donchian_upper_40: 0.0,
            donchian_lower_40: 0.0,
            atr: 0.0,
            high_52w: 0.0,
            low_52w: 0.0,
            day_high: price,
            day_low: price,
            change_percent: 0.0,
            trend: Trend::Neutral,
            session: Session::Regular,
            data_source: String::new(),
            timestamp: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_classification() {
        assert_eq!(Trend::classify(100.0, 98.0, 95.0), Trend::Bullish);
        assert_eq!(Trend::classify(90.0, 95.0, 98.0), Trend::Bearish);
        // Price above EMA9 but EMA9 below EMA21: weak bull
        assert_eq!(Trend::classify(100.0, 98.0, 99.0), Trend::Bullish);
        // Price below EMA9 with EMA9 above EMA21: weak bear
        assert_eq!(Trend::classify(97.0, 98.0, 96.0), Trend::Bearish);
    }

    #[test]
    fn test_evaluable() {
        let mut snapshot = MarketSnapshot::degraded("aapl", 100.0);
        assert_eq!(snapshot.symbol, "AAPL");
        assert!(snapshot.is_evaluable());

        snapshot.price = 0.0;
        assert!(!snapshot.is_evaluable());
    }
}
