//! Static ABI registry.
//!
//! The interfaces spoken to Gateway, Router, Vault, the three bridge adapters and
//! ERC20 tokens, parsed once from human-readable fragments.

use alloy::json_abi::JsonAbi;
use lazy_static::lazy_static;
use std::sync::Arc;

use crate::{
	models::{BridgeType, ContractType},
	services::abi::AbiCallError,
};

const GATEWAY: &[&str] = &[
	"function createPayment(bytes destChainId, bytes receiver, address sourceToken, address destToken, uint256 amount) payable returns (bytes32)",
	"function createPaymentRequest(bytes destChainId, bytes receiver, address token, uint256 amount, uint256 expiresAt) returns (bytes32)",
	"function payRequest(bytes32 requestId) payable",
	"function setDefaultBridgeType(string destChainId, uint8 bridgeType)",
	"function defaultBridgeTypes(string destChainId) view returns (uint8)",
	"function vault() view returns (address)",
	"function quoteTotalAmount(address token, uint256 amount) view returns (uint256)",
];

const ROUTER: &[&str] = &[
	"function registerAdapter(string destChainId, uint8 bridgeType, address adapter)",
	"function hasAdapter(string destChainId, uint8 bridgeType) view returns (bool)",
	"function getAdapter(string destChainId, uint8 bridgeType) view returns (address)",
	"function quotePaymentFee(string destChainId, uint8 bridgeType, uint256 amount) view returns (uint256)",
	"function quotePaymentFeeSafe(string destChainId, uint8 bridgeType, uint256 amount) view returns (bool ok, uint256 fee, string reason)",
];

const VAULT: &[&str] = &[
	"function isAuthorizedSpender(address spender) view returns (bool)",
	"function setAuthorizedSpender(address spender, bool authorized)",
];

const ADAPTER_HYPERBRIDGE: &[&str] = &[
	"function isChainConfigured(string destChainId) view returns (bool)",
	"function stateMachineIds(string destChainId) view returns (bytes)",
	"function destinationContracts(string destChainId) view returns (bytes)",
	"function setStateMachineId(string destChainId, bytes stateMachineId)",
	"function setDestinationContract(string destChainId, bytes destinationContract)",
	"function vault() view returns (address)",
];

const ADAPTER_CCIP: &[&str] = &[
	"function chainSelectors(string destChainId) view returns (uint64)",
	"function destinationAdapters(string destChainId) view returns (bytes)",
	"function setChainSelector(string destChainId, uint64 selector)",
	"function setDestinationAdapter(string destChainId, bytes adapter)",
	"function vault() view returns (address)",
];

const ADAPTER_LAYERZERO: &[&str] = &[
	"function isRouteConfigured(string destChainId) view returns (bool)",
	"function dstEids(string destChainId) view returns (uint32)",
	"function peers(uint32 eid) view returns (bytes32)",
	"function enforcedOptions(uint32 eid) view returns (bytes)",
	"function setRoute(string destChainId, uint32 dstEid, bytes32 peer)",
	"function setEnforcedOptions(uint32 dstEid, bytes options)",
];

const ERC20: &[&str] = &[
	"function approve(address spender, uint256 amount) returns (bool)",
	"function allowance(address owner, address spender) view returns (uint256)",
	"function decimals() view returns (uint8)",
];

/// Parsed contract interfaces, immutable once built
#[derive(Debug, Clone)]
pub struct AbiRegistry {
	pub gateway: JsonAbi,
	pub router: JsonAbi,
	pub vault: JsonAbi,
	pub hyperbridge: JsonAbi,
	pub ccip: JsonAbi,
	pub layerzero: JsonAbi,
	pub erc20: JsonAbi,
}

fn parse_fragments(name: &str, fragments: &[&str]) -> Result<JsonAbi, AbiCallError> {
	JsonAbi::parse(fragments.iter().copied())
		.map_err(|e| AbiCallError::abi_parse(format!("{} ABI: {}", name, e)))
}

lazy_static! {
	static ref DEFAULT_REGISTRY: Result<Arc<AbiRegistry>, AbiCallError> =
		AbiRegistry::build().map(Arc::new);
}

impl AbiRegistry {
	/// Parses the built-in fragments
	pub fn build() -> Result<Self, AbiCallError> {
		Ok(Self {
			gateway: parse_fragments("Gateway", GATEWAY)?,
			router: parse_fragments("Router", ROUTER)?,
			vault: parse_fragments("Vault", VAULT)?,
			hyperbridge: parse_fragments("AdapterHyperbridge", ADAPTER_HYPERBRIDGE)?,
			ccip: parse_fragments("AdapterCCIP", ADAPTER_CCIP)?,
			layerzero: parse_fragments("AdapterLayerZero", ADAPTER_LAYERZERO)?,
			erc20: parse_fragments("ERC20", ERC20)?,
		})
	}

	/// Shared registry built on first use
	pub fn default_registry() -> Result<Arc<AbiRegistry>, AbiCallError> {
		DEFAULT_REGISTRY.clone()
	}

	/// Interface of the adapter serving `bridge_type`
	pub fn adapter(&self, bridge_type: BridgeType) -> &JsonAbi {
		match bridge_type {
			BridgeType::Hyperbridge => &self.hyperbridge,
			BridgeType::Ccip => &self.ccip,
			BridgeType::LayerZero => &self.layerzero,
		}
	}

	/// Interface for a registry contract type, when this crate speaks to it
	pub fn for_contract(&self, contract_type: ContractType) -> Option<&JsonAbi> {
		match contract_type {
			ContractType::Gateway => Some(&self.gateway),
			ContractType::Router => Some(&self.router),
			ContractType::Vault => Some(&self.vault),
			ContractType::AdapterHyperbridge => Some(&self.hyperbridge),
			ContractType::AdapterCcip => Some(&self.ccip),
			ContractType::AdapterLayerZero => Some(&self.layerzero),
			ContractType::TokenRegistry | ContractType::TokenSwapper | ContractType::Pool => None,
		}
	}
}
