//! Core trait definitions.

mod clock;
mod provider;

pub use clock::{Clock, ManualClock, SystemClock};
pub use provider::{BarInterval, HistoryProvider, Quote, QuoteProvider};
