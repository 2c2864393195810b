//! Core registry models.
//!
//! These are read-only to this crate: chains, deployed contracts, tokens and the
//! closed set of bridge protocols.

mod bridge;
mod chain;
mod contract;
mod token;

pub use bridge::{bridge_name, BridgeType};
pub use chain::{Chain, ChainRpc, ChainType};
pub use contract::{ContractType, SmartContract};
pub use token::Token;
