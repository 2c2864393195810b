//! Route context resolution shared by the read and write paths.

use alloy::primitives::Address;

use crate::{
	models::{Chain, ContractType, SmartContract},
	repositories::RegistryService,
	services::bridge::BridgeError,
	utils::codec::parse_evm_address,
};

/// A resolved (source, destination) pair on an EVM source chain
#[derive(Debug, Clone)]
pub struct RouteContext {
	pub source: Chain,
	pub dest: Chain,
	pub rpc_url: String,
}

impl RouteContext {
	/// Destination identifier as passed to contracts
	pub fn dest_caip2(&self) -> String {
		self.dest.caip2()
	}

	pub fn source_caip2(&self) -> String {
		self.source.caip2()
	}
}

/// An active contract together with its parsed address
#[derive(Debug, Clone)]
pub struct ResolvedContract {
	pub contract: SmartContract,
	pub address: Address,
}

/// Resolves both chains, requires an EVM source and a usable RPC URL
pub fn resolve_route(
	registry: &RegistryService,
	source_id: &str,
	dest_id: &str,
) -> Result<RouteContext, BridgeError> {
	let source = registry.resolve_chain(source_id)?;
	let dest = registry.resolve_chain(dest_id)?;
	let rpc_url = require_evm_rpc(&source)?;
	Ok(RouteContext {
		source,
		dest,
		rpc_url,
	})
}

/// RPC URL of an EVM chain
pub fn require_evm_rpc(chain: &Chain) -> Result<String, BridgeError> {
	if !chain.is_evm() {
		return Err(BridgeError::unsupported_chain(format!(
			"{} is not an EVM chain",
			chain.caip2()
		)));
	}
	chain
		.resolve_rpc_url()
		.ok_or_else(|| BridgeError::not_found(format!("no active RPC URL for {}", chain.caip2())))
}

/// Active contract of `contract_type` on `chain` with a valid address
pub fn require_contract(
	registry: &RegistryService,
	chain: &Chain,
	contract_type: ContractType,
) -> Result<ResolvedContract, BridgeError> {
	let contract = registry.active_contract(chain, contract_type).ok_or_else(|| {
		BridgeError::contract_not_found(format!(
			"no active {} on {}",
			contract_type,
			chain.caip2()
		))
	})?;

	if contract.contract_address.trim().is_empty() {
		return Err(BridgeError::contract_not_found(format!(
			"{} on {} has no address",
			contract_type,
			chain.caip2()
		)));
	}

	let address = parse_evm_address(&contract.contract_address)?;
	Ok(ResolvedContract { contract, address })
}
