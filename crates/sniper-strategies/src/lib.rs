//! Strategy agents: rule families that turn a market snapshot into an
//! advisory trading signal, and the registry that holds the loaded strategy
//! definitions in a stable evaluation order.

pub mod agent;
pub mod families;
pub mod registry;

pub use agent::StrategyAgent;
pub use registry::StrategyRegistry;
