//! EVM client over a JSON-RPC transport.

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
	services::blockchain::{
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::codec::{decode_hex, encode_hex},
};

/// Read-only access to an EVM node
#[async_trait]
pub trait EvmClientTrait: Send + Sync {
	/// Executes `eth_call` against the latest block and returns the raw return data
	async fn call_view(&self, to: Address, calldata: Bytes) -> Result<Bytes, BlockChainError>;

	/// Chain id reported by the node
	async fn chain_id(&self) -> Result<u64, BlockChainError>;
}

/// Client implementation for EVM compatible chains
#[derive(Clone, Debug)]
pub struct EvmClient<T: BlockchainTransport> {
	transport: T,
}

impl<T: BlockchainTransport> EvmClient<T> {
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

impl EvmClient<HttpTransportClient> {
	pub fn new(url: &str, timeout: std::time::Duration) -> Result<Self, BlockChainError> {
		Ok(Self::new_with_transport(HttpTransportClient::new(url, timeout)?))
	}
}

fn hex_result(value: &Value, method: &str) -> Result<Vec<u8>, BlockChainError> {
	let raw = value.as_str().ok_or_else(|| {
		BlockChainError::request_error(format!("{} returned a non-string result", method))
	})?;
	decode_hex(raw).map_err(|e| BlockChainError::request_error(format!("{}: {}", method, e)))
}

#[async_trait]
impl<T: BlockchainTransport> EvmClientTrait for EvmClient<T> {
	async fn call_view(&self, to: Address, calldata: Bytes) -> Result<Bytes, BlockChainError> {
		let params = json!([
			{
				"to": to.to_string(),
				"data": encode_hex(&calldata),
			},
			"latest"
		]);

		let result = self
			.transport
			.send_raw_request("eth_call", Some(params))
			.await?;
		Ok(Bytes::from(hex_result(&result, "eth_call")?))
	}

	async fn chain_id(&self) -> Result<u64, BlockChainError> {
		let result = self
			.transport
			.send_raw_request::<Value>("eth_chainId", None)
			.await?;
		let raw = result.as_str().ok_or_else(|| {
			BlockChainError::request_error("eth_chainId returned a non-string result")
		})?;
		u64::from_str_radix(raw.trim_start_matches("0x"), 16)
			.map_err(|e| BlockChainError::request_error(format!("Invalid chain id {}: {}", raw, e)))
	}
}
