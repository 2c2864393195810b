//! Errors raised while reading registry files and runtime settings.

use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
	/// A file parsed but holds values the registry cannot use, or an environment
	/// variable is out of range
	#[error("Validation error: {0}")]
	ValidationError(String),

	/// A registry file is not well-formed JSON for its entity
	#[error("Parse error: {0}")]
	ParseError(String),

	/// A registry directory or file could not be read
	#[error("File error: {0}")]
	FileError(String),
}

impl ConfigError {
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error);
		error
	}

	pub fn parse_error(msg: impl Into<String>) -> Self {
		let error = Self::ParseError(msg.into());
		error!("{}", error);
		error
	}

	pub fn file_error(msg: impl Into<String>) -> Self {
		let error = Self::FileError(msg.into());
		error!("{}", error);
		error
	}
}

impl From<std::io::Error> for ConfigError {
	fn from(err: std::io::Error) -> Self {
		Self::file_error(err.to_string())
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		Self::parse_error(format!("line {} column {}: {}", err.line(), err.column(), err))
	}
}
