//! Transaction submission.
//!
//! Services never sign on their own; every write goes through a
//! [`TransactionExecutor`] injected at construction.

use alloy::{
	network::{EthereumWallet, TransactionBuilder},
	primitives::{Address, Bytes, U256},
	providers::{Provider, ProviderBuilder},
	rpc::types::TransactionRequest,
	signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use std::str::FromStr;

use crate::services::blockchain::BlockChainError;

/// Submits signed transactions
#[async_trait]
pub trait TransactionExecutor: Send + Sync {
	/// Signs and broadcasts a call, returning the `0x`-prefixed transaction hash.
	///
	/// Returns once the node accepted the transaction; inclusion is not awaited.
	async fn send_transaction(
		&self,
		rpc_url: &str,
		to: Address,
		calldata: Bytes,
		value: U256,
	) -> Result<String, BlockChainError>;
}

/// Executor backed by a local private key and an alloy provider
#[derive(Clone, Default)]
pub struct AlloyTransactionExecutor {
	signer: Option<PrivateKeySigner>,
}

impl AlloyTransactionExecutor {
	/// Executor that rejects every submission, for read-only deployments
	pub fn without_signer() -> Self {
		Self { signer: None }
	}

	pub fn from_private_key(private_key: &str) -> Result<Self, BlockChainError> {
		let signer = PrivateKeySigner::from_str(private_key.trim())
			.map_err(|e| BlockChainError::internal_error(format!("Invalid signer key: {}", e)))?;
		Ok(Self {
			signer: Some(signer),
		})
	}

	pub fn signer_address(&self) -> Option<Address> {
		self.signer.as_ref().map(|signer| signer.address())
	}
}

#[async_trait]
impl TransactionExecutor for AlloyTransactionExecutor {
	async fn send_transaction(
		&self,
		rpc_url: &str,
		to: Address,
		calldata: Bytes,
		value: U256,
	) -> Result<String, BlockChainError> {
		let signer = self
			.signer
			.clone()
			.ok_or_else(|| BlockChainError::transaction_error("No signer configured"))?;
		let url = rpc_url
			.parse()
			.map_err(|e| BlockChainError::connection_error(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

		let provider = ProviderBuilder::new()
			.wallet(EthereumWallet::from(signer))
			.connect_http(url);

		let request = TransactionRequest::default()
			.with_to(to)
			.with_input(calldata)
			.with_value(value);

		let pending = provider.send_transaction(request).await.map_err(|e| {
			match e.as_error_resp().and_then(|payload| payload.as_revert_data()) {
				Some(data) => BlockChainError::reverted(e.to_string(), Some(data.to_vec())),
				None => BlockChainError::transaction_error(e.to_string()),
			}
		})?;

		let tx_hash = format!("{:#x}", pending.tx_hash());
		tracing::info!(tx_hash = %tx_hash, to = %to, "Transaction submitted");
		Ok(tx_hash)
	}
}
