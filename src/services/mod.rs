//! Core services.
//!
//! - `abi`: typed view calls and the static contract interfaces
//! - `audit`: contract configuration audit
//! - `blockchain`: RPC transport, clients, pool and transaction executor
//! - `bridge`: adapter status and admin writes
//! - `payload`: outbound payment transactions
//! - `revert`: revert data decoding
//! - `route`: route health verdicts and auto-fix

pub mod abi;
pub mod audit;
pub mod blockchain;
pub mod bridge;
pub mod payload;
pub mod revert;
pub mod route;
