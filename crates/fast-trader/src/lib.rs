//! Signal-to-trade negotiation engine.
//!
//! Drives the three-step protocol (authorize → proposal → purchase) against
//! the trading service, one independent execution per requested duration:
//! - `negotiator`: obtains a priced proposal for a contract spec
//! - `purchase`: buys a proposed contract and releases the session
//! - `orchestrator`: fans a signal out across durations and collects the
//!   ordered terminal outcomes

pub mod error;
pub mod negotiator;
pub mod orchestrator;
pub mod purchase;

pub use error::{TradeError, TradeResult};
pub use negotiator::{propose, Proposal};
pub use orchestrator::TradeOrchestrator;
pub use purchase::purchase;
