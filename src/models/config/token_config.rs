use crate::models::{ConfigLoader, Token};

const MAX_DECIMALS: u8 = 36;

impl ConfigLoader for Token {
	fn default_dir() -> &'static str {
		"config/tokens"
	}

	fn validate(&self) -> Result<(), String> {
		if self.symbol.trim().is_empty() {
			return Err("Token symbol must not be empty".to_string());
		}
		if self.decimals > MAX_DECIMALS {
			return Err(format!("Token decimals must be at most {}", MAX_DECIMALS));
		}
		if !self.is_native && self.contract_address.trim().is_empty() {
			return Err(format!(
				"Non-native token {} requires a contract address",
				self.symbol
			));
		}
		Ok(())
	}
}
