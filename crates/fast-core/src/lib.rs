//! Core domain types for the FAST signal-to-trade service.
//!
//! This crate provides the fundamental types used throughout the system:
//! - `TradeSignal`: a validated inbound trading instruction
//! - `ContractSpec`: one duration's contract specification
//! - `TradeOutcome`: the terminal result of one duration's negotiation
//! - `ValidationError`: inbound request rejection, raised before any
//!   network call

pub mod contract;
pub mod error;
pub mod outcome;
pub mod signal;

pub use contract::{ContractKind, ContractSpec, DurationUnit, TradeDefaults};
pub use error::{Result, ValidationError};
pub use outcome::{NegotiationStep, PurchaseReceipt, TradeOutcome, TradeStatus};
pub use signal::{Direction, SignalRequest, TradeSignal};
