use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::models::{bridge_name, BridgeType};

/// Registration of one bridge type's adapter on the Router.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdapterRegistration {
	pub bridge_type: BridgeType,
	pub has_adapter: bool,
	pub address: Address,
}

impl AdapterRegistration {
	pub fn empty(bridge_type: BridgeType) -> Self {
		Self {
			bridge_type,
			has_adapter: false,
			address: Address::ZERO,
		}
	}

	pub fn is_registered(&self) -> bool {
		self.has_adapter && !self.address.is_zero()
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HyperbridgeConfig {
	pub configured: bool,
	pub state_machine_id: Bytes,
	pub destination_contract: Bytes,
}

impl HyperbridgeConfig {
	/// Configuration of an adapter that predates `isChainConfigured`: configured
	/// when both destination parameters are set.
	pub fn inferred(state_machine_id: Bytes, destination_contract: Bytes) -> Self {
		Self {
			configured: !state_machine_id.is_empty() && !destination_contract.is_empty(),
			state_machine_id,
			destination_contract,
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CcipConfig {
	pub chain_selector: u64,
	pub destination_adapter: Bytes,
}

impl CcipConfig {
	pub fn is_configured(&self) -> bool {
		self.chain_selector != 0 && !self.destination_adapter.is_empty()
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayerZeroConfig {
	pub configured: bool,
	pub dst_eid: u32,
	pub peer: B256,
	pub options: Bytes,
}

impl LayerZeroConfig {
	pub fn is_configured(&self) -> bool {
		self.configured && !self.peer.is_zero()
	}
}

/// Live snapshot of the bridge adapters serving one (source, destination) pair.
///
/// Never cached: every instance is the result of a fresh read-through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnchainAdapterStatus {
	pub source_chain_id: String,
	pub dest_chain_id: String,
	pub gateway_address: Address,
	pub router_address: Address,
	pub default_bridge_type: u8,
	pub default_bridge_name: String,
	pub default_has_adapter: bool,
	pub default_adapter_address: Address,
	pub adapters: Vec<AdapterRegistration>,
	pub hyperbridge: HyperbridgeConfig,
	pub ccip: CcipConfig,
	pub layerzero: LayerZeroConfig,
}

impl OnchainAdapterStatus {
	/// Builds a snapshot, deriving the default-type registration from `adapters`.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		source_chain_id: String,
		dest_chain_id: String,
		gateway_address: Address,
		router_address: Address,
		default_bridge_type: u8,
		adapters: Vec<AdapterRegistration>,
		hyperbridge: HyperbridgeConfig,
		ccip: CcipConfig,
		layerzero: LayerZeroConfig,
	) -> Self {
		let default_registration = BridgeType::from_code(default_bridge_type).and_then(|bt| {
			adapters
				.iter()
				.find(|adapter| adapter.bridge_type == bt)
				.cloned()
		});
		let (default_has_adapter, default_adapter_address) = default_registration
			.map(|adapter| (adapter.has_adapter, adapter.address))
			.unwrap_or((false, Address::ZERO));

		Self {
			source_chain_id,
			dest_chain_id,
			gateway_address,
			router_address,
			default_bridge_type,
			default_bridge_name: bridge_name(default_bridge_type).to_string(),
			default_has_adapter,
			default_adapter_address,
			adapters,
			hyperbridge,
			ccip,
			layerzero,
		}
	}

	pub fn default_type(&self) -> Option<BridgeType> {
		BridgeType::from_code(self.default_bridge_type)
	}

	pub fn adapter(&self, bridge_type: BridgeType) -> AdapterRegistration {
		self.adapters
			.iter()
			.find(|adapter| adapter.bridge_type == bridge_type)
			.cloned()
			.unwrap_or_else(|| AdapterRegistration::empty(bridge_type))
	}

	/// Whether the default-type adapter is registered with a non-zero address
	pub fn default_adapter_registered(&self) -> bool {
		self.default_has_adapter && !self.default_adapter_address.is_zero()
	}

	/// Whether the destination parameters of `bridge_type` are set on its adapter
	pub fn is_route_configured(&self, bridge_type: BridgeType) -> bool {
		match bridge_type {
			BridgeType::Hyperbridge => self.hyperbridge.configured,
			BridgeType::Ccip => self.ccip.is_configured(),
			BridgeType::LayerZero => self.layerzero.is_configured(),
		}
	}
}
