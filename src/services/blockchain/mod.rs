//! Blockchain client interfaces and implementations.
//!
//! - JSON-RPC HTTP transport
//! - EVM client (`eth_call`, `eth_chainId`)
//! - Client pool keyed by RPC URL
//! - Transaction executor holding the configured signer

mod client;
mod error;
mod executor;
mod pool;
mod transports;

pub use client::{EvmClient, EvmClientTrait};
pub use error::BlockChainError;
pub use executor::{AlloyTransactionExecutor, TransactionExecutor};
pub use pool::{ClientPool, ClientPoolTrait, ClientStorage};
pub use transports::{BlockchainTransport, HttpTransportClient};
