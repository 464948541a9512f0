//! Market data layer: upstream providers, token-bucket rate limiting, a
//! short-TTL snapshot cache and the gateway that ties them together.

pub mod cache;
pub mod gateway;
pub mod limiter;
pub mod providers;

pub use cache::SnapshotCache;
pub use gateway::{GatewayConfig, MarketDataGateway};
pub use limiter::RateLimiter;
pub use providers::{CsvHistoryProvider, FinnhubQuoteProvider, YahooHistoryProvider};
