//! Blockchain error types and handling.

use log::error;
use thiserror::Error;

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug, Error, Clone)]
pub enum BlockChainError {
	/// The node could not be reached or timed out
	#[error("Connection error: {0}")]
	ConnectionError(String),

	/// Malformed request, HTTP failure or JSON-RPC error without revert data
	#[error("Request error: {0}")]
	RequestError(String),

	/// The call reverted. `data` holds the raw revert payload when the node returned one
	#[error("Execution reverted: {message}")]
	Reverted {
		message: String,
		data: Option<Vec<u8>>,
	},

	/// Transaction could not be built, signed or submitted
	#[error("Transaction error: {0}")]
	TransactionError(String),

	#[error("Internal error: {0}")]
	InternalError(String),

	#[error("Client pool error: {0}")]
	ClientPoolError(String),
}

impl BlockChainError {
	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new revert error.
	///
	/// Reverts are expected while probing routes, so they are logged at debug level.
	pub fn reverted(msg: impl Into<String>, data: Option<Vec<u8>>) -> Self {
		let error = Self::Reverted {
			message: msg.into(),
			data,
		};
		log::debug!("{}", error);
		error
	}

	/// Creates a new transaction error with logging
	pub fn transaction_error(msg: impl Into<String>) -> Self {
		let error = Self::TransactionError(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error);
		error
	}

	/// Creates a new client pool error with logging
	pub fn client_pool_error(msg: impl Into<String>) -> Self {
		let error = Self::ClientPoolError(msg.into());
		error!("{}", error);
		error
	}

	/// Raw revert payload, if this is a revert that carried one
	pub fn revert_data(&self) -> Option<&[u8]> {
		match self {
			Self::Reverted {
				data: Some(data), ..
			} => Some(data.as_slice()),
			_ => None,
		}
	}

	pub fn is_revert(&self) -> bool {
		matches!(self, Self::Reverted { .. })
	}
}

impl From<reqwest::Error> for BlockChainError {
	fn from(err: reqwest::Error) -> Self {
		if err.is_timeout() || err.is_connect() {
			Self::connection_error(err.to_string())
		} else {
			Self::request_error(err.to_string())
		}
	}
}
