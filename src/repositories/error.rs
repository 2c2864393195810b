//! Error types for repository operations.

use log::error;
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum RepositoryError {
	/// Input or stored data failed validation
	#[error("Validation error: {0}")]
	ValidationError(String),

	/// Configuration files could not be loaded
	#[error("Load error: {0}")]
	LoadError(String),

	/// Lookup returned nothing
	#[error("Not found: {0}")]
	NotFoundError(String),

	#[error("Internal error: {0}")]
	InternalError(String),
}

impl RepositoryError {
	/// Create a new validation error and log it
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error);
		error
	}

	/// Create a new load error and log it
	pub fn load_error(msg: impl Into<String>) -> Self {
		let error = Self::LoadError(msg.into());
		error!("{}", error);
		error
	}

	/// Create a new not-found error and log it
	pub fn not_found(msg: impl Into<String>) -> Self {
		let error = Self::NotFoundError(msg.into());
		error!("{}", error);
		error
	}

	/// Create a new internal error and log it
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error);
		error
	}
}

impl From<std::io::Error> for RepositoryError {
	fn from(err: std::io::Error) -> Self {
		Self::load_error(err.to_string())
	}
}
