use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A token supported on one chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
	pub id: Uuid,
	pub chain_uuid: Uuid,
	pub symbol: String,
	/// Empty for the chain's native asset
	#[serde(default)]
	pub contract_address: String,
	pub decimals: u8,
	#[serde(default)]
	pub is_native: bool,
}
