use crate::models::{ConfigLoader, SmartContract};

impl ConfigLoader for SmartContract {
	fn default_dir() -> &'static str {
		"config/contracts"
	}

	/// Only shape is validated here. Missing addresses, start blocks and ABI gaps are
	/// reported by the audit engine instead of blocking the load.
	fn validate(&self) -> Result<(), String> {
		if !self.abi.trim().is_empty() && serde_json::from_str::<serde_json::Value>(&self.abi).is_err()
		{
			return Err(format!("abi of contract {} is not valid JSON", self.id));
		}
		Ok(())
	}
}
