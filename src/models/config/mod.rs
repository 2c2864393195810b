//! Configuration loading.
//!
//! Registry entities (chains, contracts, tokens) are read from one JSON file per
//! entity under a directory per kind. Runtime settings come from the environment.

use std::path::Path;

mod app_config;
mod chain_config;
mod contract_config;
mod error;
mod token_config;

pub use app_config::{AppConfig, FeeConfig};
pub use error::ConfigError;

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
	/// Directory used when no path is given
	fn default_dir() -> &'static str;

	fn validate(&self) -> Result<(), String>;

	/// Loads every JSON file of the directory, keyed by file stem.
	///
	/// Any invalid file fails the whole load so a broken registry is never used
	/// partially.
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let dir = path.unwrap_or(Path::new(Self::default_dir()));
		if !dir.exists() {
			return Err(ConfigError::file_error(format!(
				"{} directory not found",
				dir.display()
			)));
		}

		let mut pairs = Vec::new();
		for entry in std::fs::read_dir(dir)? {
			let path = entry?.path();
			if !Self::is_json_file(&path) {
				continue;
			}

			let name = path
				.file_stem()
				.and_then(|s| s.to_str())
				.unwrap_or("unknown")
				.to_string();

			let item = Self::load_from_path(&path).map_err(|e| {
				ConfigError::validation_error(format!("{}: {}", path.display(), e))
			})?;
			pairs.push((name, item));
		}

		Ok(T::from_iter(pairs))
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: Self = serde_json::from_reader(file)?;

		if let Err(validation_error) = config.validate() {
			return Err(ConfigError::validation_error(validation_error));
		}

		Ok(config)
	}

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
