//! Bridge service error types.

use log::error;
use thiserror::Error;

use crate::{
	repositories::RepositoryError,
	services::{abi::AbiCallError, blockchain::BlockChainError, bridge::TxStepOutcome},
	utils::CodecError,
};

#[derive(Debug, Error, Clone)]
pub enum BridgeError {
	/// Bad chain id, missing field or malformed hex. Nothing was sent
	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("Not found: {0}")]
	NotFound(String),

	/// The active contract of a type is missing on a chain
	#[error("Contract not found: {0}")]
	ContractNotFound(String),

	#[error("Unsupported chain: {0}")]
	UnsupportedChain(String),

	/// Transport, timeout or revert. Never retried
	#[error("Upstream error: {0}")]
	Upstream(BlockChainError),

	/// Decode or type mismatch against a known interface
	#[error("ABI error: {0}")]
	Abi(AbiCallError),

	/// Some writes of a multi-transaction operation were submitted before one failed
	#[error("Partial failure after {} transaction(s): {message}", completed.len())]
	PartialFailure {
		completed: Vec<TxStepOutcome>,
		message: String,
	},

	#[error("Internal error: {0}")]
	Internal(String),
}

impl BridgeError {
	pub fn invalid_input(msg: impl Into<String>) -> Self {
		let error = Self::InvalidInput(msg.into());
		error!("{}", error);
		error
	}

	pub fn not_found(msg: impl Into<String>) -> Self {
		let error = Self::NotFound(msg.into());
		error!("{}", error);
		error
	}

	pub fn contract_not_found(msg: impl Into<String>) -> Self {
		let error = Self::ContractNotFound(msg.into());
		error!("{}", error);
		error
	}

	pub fn unsupported_chain(msg: impl Into<String>) -> Self {
		let error = Self::UnsupportedChain(msg.into());
		error!("{}", error);
		error
	}

	pub fn partial_failure(completed: Vec<TxStepOutcome>, msg: impl Into<String>) -> Self {
		let error = Self::PartialFailure {
			completed,
			message: msg.into(),
		};
		error!("{}", error);
		error
	}

	pub fn internal(msg: impl Into<String>) -> Self {
		let error = Self::Internal(msg.into());
		error!("{}", error);
		error
	}

	/// Transaction hashes submitted before the failure
	pub fn completed_steps(&self) -> &[TxStepOutcome] {
		match self {
			Self::PartialFailure { completed, .. } => completed,
			_ => &[],
		}
	}

	/// Raw revert payload carried by an upstream revert
	pub fn revert_data(&self) -> Option<&[u8]> {
		match self {
			Self::Upstream(err) => err.revert_data(),
			Self::Abi(err) => err.revert_data(),
			_ => None,
		}
	}
}

impl From<AbiCallError> for BridgeError {
	fn from(err: AbiCallError) -> Self {
		match err {
			AbiCallError::Rpc(rpc) => Self::Upstream(rpc),
			other => Self::Abi(other),
		}
	}
}

impl From<BlockChainError> for BridgeError {
	fn from(err: BlockChainError) -> Self {
		Self::Upstream(err)
	}
}

impl From<RepositoryError> for BridgeError {
	fn from(err: RepositoryError) -> Self {
		match err {
			RepositoryError::ValidationError(msg) => Self::InvalidInput(msg),
			RepositoryError::NotFoundError(msg) => Self::NotFound(msg),
			RepositoryError::LoadError(msg) | RepositoryError::InternalError(msg) => {
				Self::Internal(msg)
			}
		}
	}
}

impl From<CodecError> for BridgeError {
	fn from(err: CodecError) -> Self {
		Self::InvalidInput(err.to_string())
	}
}
