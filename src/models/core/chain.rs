use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported chain families.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChainType {
	/// Ethereum Virtual Machine based chains
	EVM,
	/// Solana Virtual Machine based chains
	SVM,
	/// Substrate based chains
	Substrate,
}

impl ChainType {
	/// CAIP-2 namespace used for chains of this type
	pub fn caip2_namespace(&self) -> &'static str {
		match self {
			ChainType::EVM => "eip155",
			ChainType::SVM => "solana",
			ChainType::Substrate => "polkadot",
		}
	}

	/// Maps a CAIP-2 namespace back to a chain type
	pub fn from_caip2_namespace(namespace: &str) -> Option<Self> {
		match namespace {
			"eip155" => Some(ChainType::EVM),
			"solana" => Some(ChainType::SVM),
			"polkadot" => Some(ChainType::Substrate),
			_ => None,
		}
	}
}

/// One RPC endpoint of a chain.
///
/// Endpoints are ordered by ascending `priority`; only active endpoints are used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainRpc {
	pub url: String,
	#[serde(default)]
	pub priority: u32,
	#[serde(default = "default_true")]
	pub is_active: bool,
}

fn default_true() -> bool {
	true
}

/// A chain known to the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chain {
	pub id: Uuid,
	/// Native chain id (`8453` for Base, genesis reference for Solana clusters)
	pub chain_id: String,
	pub name: String,
	pub chain_type: ChainType,
	#[serde(default)]
	pub rpc_url: Option<String>,
	#[serde(default)]
	pub rpc_urls: Vec<ChainRpc>,
	#[serde(default = "default_true")]
	pub is_active: bool,
}

impl Chain {
	/// CAIP-2 identifier derived from the chain type and native chain id.
	pub fn caip2(&self) -> String {
		format!("{}:{}", self.chain_type.caip2_namespace(), self.chain_id)
	}

	/// Returns the RPC URL this core should talk to.
	///
	/// The single `rpc_url` wins when set; otherwise the active list entry with the
	/// lowest priority is used.
	pub fn resolve_rpc_url(&self) -> Option<String> {
		if let Some(url) = self.rpc_url.as_ref().filter(|url| !url.trim().is_empty()) {
			return Some(url.clone());
		}

		self.rpc_urls
			.iter()
			.filter(|rpc| rpc.is_active && !rpc.url.trim().is_empty())
			.min_by_key(|rpc| rpc.priority)
			.map(|rpc| rpc.url.clone())
	}

	pub fn is_evm(&self) -> bool {
		self.chain_type == ChainType::EVM
	}
}
