use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::BridgeType;

/// Kinds of deployed contracts tracked by the registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContractType {
	Gateway,
	Router,
	Vault,
	TokenRegistry,
	TokenSwapper,
	AdapterHyperbridge,
	#[serde(rename = "AdapterCCIP")]
	AdapterCcip,
	AdapterLayerZero,
	Pool,
}

impl ContractType {
	/// Adapter contract type serving the given bridge protocol
	pub fn adapter_for(bridge_type: BridgeType) -> Self {
		match bridge_type {
			BridgeType::Hyperbridge => ContractType::AdapterHyperbridge,
			BridgeType::Ccip => ContractType::AdapterCcip,
			BridgeType::LayerZero => ContractType::AdapterLayerZero,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ContractType::Gateway => "Gateway",
			ContractType::Router => "Router",
			ContractType::Vault => "Vault",
			ContractType::TokenRegistry => "TokenRegistry",
			ContractType::TokenSwapper => "TokenSwapper",
			ContractType::AdapterHyperbridge => "AdapterHyperbridge",
			ContractType::AdapterCcip => "AdapterCCIP",
			ContractType::AdapterLayerZero => "AdapterLayerZero",
			ContractType::Pool => "Pool",
		}
	}
}

impl fmt::Display for ContractType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A deployed contract on one chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmartContract {
	pub id: Uuid,
	pub chain_uuid: Uuid,
	#[serde(default)]
	pub name: String,
	pub contract_type: ContractType,
	pub contract_address: String,
	/// Raw ABI JSON as recorded at deployment time
	#[serde(default)]
	pub abi: String,
	#[serde(default = "default_true")]
	pub is_active: bool,
	#[serde(default)]
	pub start_block: u64,
	#[serde(default)]
	pub token0_address: Option<String>,
	#[serde(default)]
	pub token1_address: Option<String>,
}

fn default_true() -> bool {
	true
}
