use crate::{
	models::{Chain, ChainType, ConfigLoader},
	utils::codec::parse_caip2,
};

fn is_http_url(url: &str) -> bool {
	url.starts_with("http://") || url.starts_with("https://")
}

impl ConfigLoader for Chain {
	fn default_dir() -> &'static str {
		"config/chains"
	}

	fn validate(&self) -> Result<(), String> {
		if self.name.trim().is_empty() {
			return Err("Chain name must not be empty".to_string());
		}

		if self.chain_id.trim().is_empty() {
			return Err("chain_id must not be empty".to_string());
		}

		if self.chain_type == ChainType::EVM && self.chain_id.parse::<u64>().is_err() {
			return Err(format!(
				"EVM chain_id must be numeric, got {}",
				self.chain_id
			));
		}

		// The derived identifier must itself be valid CAIP-2
		parse_caip2(&self.caip2()).map_err(|e| e.to_string())?;

		if let Some(url) = &self.rpc_url {
			if !url.is_empty() && !is_http_url(url) {
				return Err("rpc_url must start with http:// or https://".to_string());
			}
		}

		if !self.rpc_urls.iter().all(|rpc| is_http_url(&rpc.url)) {
			return Err("All RPC URLs must start with http:// or https://".to_string());
		}

		Ok(())
	}
}
