//! Upstream provider implementations.

mod csv_source;
mod finnhub;
mod yahoo;

pub use csv_source::CsvHistoryProvider;
pub use finnhub::FinnhubQuoteProvider;
pub use yahoo::YahooHistoryProvider;
