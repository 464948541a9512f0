//! Consensus orchestration: runs every registered strategy against one
//! snapshot and aggregates the signals into a single advisory verdict.

pub mod orchestrator;

pub use orchestrator::{ConsensusResult, Orchestrator};
