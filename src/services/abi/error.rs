//! ABI call error types.

use log::error;
use thiserror::Error;

use crate::services::blockchain::BlockChainError;

#[derive(Debug, Error, Clone)]
pub enum AbiCallError {
	/// The ABI JSON or fragment could not be parsed
	#[error("ABI parse error: {0}")]
	AbiParse(String),

	/// Unknown method, wrong arity or argument type mismatch
	#[error("ABI pack error: {0}")]
	Pack(String),

	/// Return data was empty, short or malformed
	#[error("ABI decode error: {0}")]
	Decode(String),

	/// The decoded value does not have the requested type
	#[error("ABI type mismatch: expected {expected}, got {actual}")]
	TypeMismatch { expected: String, actual: String },

	/// The call itself failed
	#[error(transparent)]
	Rpc(#[from] BlockChainError),
}

impl AbiCallError {
	pub fn abi_parse(msg: impl Into<String>) -> Self {
		let error = Self::AbiParse(msg.into());
		error!("{}", error);
		error
	}

	pub fn pack(msg: impl Into<String>) -> Self {
		let error = Self::Pack(msg.into());
		error!("{}", error);
		error
	}

	pub fn decode(msg: impl Into<String>) -> Self {
		let error = Self::Decode(msg.into());
		error!("{}", error);
		error
	}

	pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
		let error = Self::TypeMismatch {
			expected: expected.into(),
			actual: actual.into(),
		};
		error!("{}", error);
		error
	}

	/// The transport error, when the call failed below the ABI layer
	pub fn as_rpc(&self) -> Option<&BlockChainError> {
		match self {
			Self::Rpc(err) => Some(err),
			_ => None,
		}
	}

	/// Raw revert payload of a reverted call
	pub fn revert_data(&self) -> Option<&[u8]> {
		self.as_rpc().and_then(BlockChainError::revert_data)
	}

	pub fn is_revert(&self) -> bool {
		self.as_rpc().is_some_and(BlockChainError::is_revert)
	}
}
