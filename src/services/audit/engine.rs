//! Contract configuration audit.
//!
//! Static checks run against every active contract of the source chain. With a
//! destination, the on-chain sequence follows: core contracts, default bridge type,
//! adapter registration, destination configuration. The first failing RPC or
//! decode truncates the rest of that destination's checks into one ERROR item.

use alloy::primitives::{Address, Bytes, B256};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
	models::{
		BridgeType, CcipConfig, Chain, CheckStatus, ContractConfigCheckItem,
		ContractConfigCheckResult, ContractType, HyperbridgeConfig, LayerZeroConfig,
		SmartContract,
	},
	repositories::RegistryService,
	services::{
		abi::{call_view_abi, parse_abi, AbiCallError, AbiRegistry},
		audit::manifest::{missing_functions, required_functions},
		blockchain::{ClientPoolTrait, EvmClientTrait},
		bridge::{bridge_arg, dest_arg, eid_arg, require_evm_rpc, BridgeError},
	},
	utils::codec::parse_evm_address,
};

pub const CONTRACT_ADDRESS_MISSING: &str = "CONTRACT_ADDRESS_MISSING";
pub const START_BLOCK_MISSING: &str = "START_BLOCK_MISSING";
pub const POOL_TOKENS_MISSING: &str = "POOL_TOKENS_MISSING";
pub const ABI_INVALID: &str = "ABI_INVALID";
pub const ABI_MISSING_FUNCTIONS: &str = "ABI_MISSING_FUNCTIONS";
pub const ABI_COMPLETE: &str = "ABI_COMPLETE";
pub const GATEWAY_MISSING: &str = "GATEWAY_MISSING";
pub const ROUTER_MISSING: &str = "ROUTER_MISSING";
pub const CORE_CONTRACTS_PRESENT: &str = "CORE_CONTRACTS_PRESENT";
pub const DEFAULT_BRIDGE_TYPE: &str = "DEFAULT_BRIDGE_TYPE";
pub const ADAPTER_NOT_REGISTERED: &str = "ADAPTER_NOT_REGISTERED";
pub const ADAPTER_REGISTERED: &str = "ADAPTER_REGISTERED";
pub const HYPERBRIDGE_CONFIGURED: &str = "HYPERBRIDGE_CONFIGURED";
pub const HYPERBRIDGE_NOT_CONFIGURED: &str = "HYPERBRIDGE_NOT_CONFIGURED";
pub const CCIP_CONFIGURED: &str = "CCIP_CONFIGURED";
pub const CCIP_NOT_CONFIGURED: &str = "CCIP_NOT_CONFIGURED";
pub const LAYERZERO_CONFIGURED: &str = "LAYERZERO_CONFIGURED";
pub const LAYERZERO_NOT_CONFIGURED: &str = "LAYERZERO_NOT_CONFIGURED";
pub const UNKNOWN_BRIDGE_TYPE: &str = "UNKNOWN_BRIDGE_TYPE";
pub const ONCHAIN_CHECK_FAILED: &str = "ONCHAIN_CHECK_FAILED";
pub const ONCHAIN_CHECK_SKIPPED: &str = "ONCHAIN_CHECK_SKIPPED";

/// A failed step of the on-chain sequence
struct OnchainFailure {
	step: &'static str,
	message: String,
}

impl OnchainFailure {
	fn new(step: &'static str, err: impl std::fmt::Display) -> Self {
		Self {
			step,
			message: err.to_string(),
		}
	}
}

/// Audits registry contracts statically and against live chain state
pub struct ConfigAuditEngine {
	registry: RegistryService,
	pool: Arc<dyn ClientPoolTrait>,
	abis: Arc<AbiRegistry>,
}

/// Structural and ABI-completeness checks of one contract
pub fn static_checks(contract: &SmartContract) -> Vec<ContractConfigCheckItem> {
	let mut items = Vec::new();
	let item = |code: &str, status: CheckStatus, message: String| {
		ContractConfigCheckItem::new(code, status, message).with_contract(contract)
	};

	if contract.contract_address.trim().is_empty() {
		items.push(item(
			CONTRACT_ADDRESS_MISSING,
			CheckStatus::Error,
			format!("{} has no contract address", contract.contract_type),
		));
	}

	if contract.start_block == 0 {
		items.push(item(
			START_BLOCK_MISSING,
			CheckStatus::Warn,
			format!("{} has no start block", contract.contract_type),
		));
	}

	if contract.contract_type == ContractType::Pool {
		let missing = |token: &Option<String>| token.as_deref().map_or(true, |t| t.trim().is_empty());
		if missing(&contract.token0_address) || missing(&contract.token1_address) {
			items.push(item(
				POOL_TOKENS_MISSING,
				CheckStatus::Error,
				"pool requires both token0 and token1 addresses".to_string(),
			));
		}
	}

	if required_functions(contract.contract_type).is_empty() {
		return items;
	}

	let abi = if contract.abi.trim().is_empty() {
		Err(AbiCallError::abi_parse("ABI is empty"))
	} else {
		parse_abi(&contract.abi)
	};
	match abi {
		Err(err) => items.push(item(
			ABI_INVALID,
			CheckStatus::Error,
			format!("{} ABI is not usable: {}", contract.contract_type, err),
		)),
		Ok(abi) => {
			let missing = missing_functions(contract.contract_type, &abi);
			if missing.is_empty() {
				items.push(item(
					ABI_COMPLETE,
					CheckStatus::Ok,
					format!("{} ABI exposes all required functions", contract.contract_type),
				));
			} else {
				items.push(item(
					ABI_MISSING_FUNCTIONS,
					CheckStatus::Error,
					format!(
						"{} ABI is missing: {}",
						contract.contract_type,
						missing.join(", ")
					),
				));
			}
		}
	}

	items
}

fn skipped_item(source: &Chain, dest: &Chain) -> ContractConfigCheckItem {
	ContractConfigCheckItem::warn(
		ONCHAIN_CHECK_SKIPPED,
		format!(
			"on-chain checks skipped: {} is not an EVM chain",
			source.caip2()
		),
	)
	.with_destination(dest.caip2())
}

impl ConfigAuditEngine {
	pub fn new(
		registry: RegistryService,
		pool: Arc<dyn ClientPoolTrait>,
		abis: Arc<AbiRegistry>,
	) -> Self {
		Self {
			registry,
			pool,
			abis,
		}
	}

	/// Audits every active contract of `source_id`, plus the route to `dest_id` when given
	#[instrument(skip_all, fields(source = %source_id, dest = ?dest_id))]
	pub async fn check(
		&self,
		source_id: &str,
		dest_id: Option<&str>,
	) -> Result<ContractConfigCheckResult, BridgeError> {
		let source = self.registry.resolve_chain(source_id)?;
		let dest = match dest_id {
			Some(id) => Some(self.registry.resolve_chain(id)?),
			None => None,
		};

		let mut items: Vec<ContractConfigCheckItem> = self
			.registry
			.chain_contracts(&source)
			.iter()
			.flat_map(static_checks)
			.collect();

		if let Some(dest) = &dest {
			if source.is_evm() {
				items.extend(self.onchain_checks(&source, dest).await);
			} else {
				items.push(skipped_item(&source, dest));
			}
		}

		Ok(ContractConfigCheckResult::new(
			source.caip2(),
			dest.map(|chain| chain.caip2()),
			None,
			items,
		))
	}

	/// Audits one contract, then runs the on-chain sequence from its chain to every
	/// other active chain
	#[instrument(skip_all, fields(contract_id = %contract_id))]
	pub async fn check_by_contract_id(
		&self,
		contract_id: &str,
	) -> Result<ContractConfigCheckResult, BridgeError> {
		let id = Uuid::parse_str(contract_id.trim())
			.map_err(|e| BridgeError::invalid_input(format!("invalid contract id: {}", e)))?;
		let contract = self
			.registry
			.contract(&id)
			.ok_or_else(|| BridgeError::not_found(format!("contract {}", id)))?;
		let source = self.registry.chain_by_id(&contract.chain_uuid).ok_or_else(|| {
			BridgeError::not_found(format!("chain {} of contract {}", contract.chain_uuid, id))
		})?;

		let mut items = static_checks(&contract);
		let destinations = self
			.registry
			.active_chains()
			.into_iter()
			.filter(|chain| chain.id != source.id);

		for dest in destinations {
			if source.is_evm() {
				items.extend(self.onchain_checks(&source, &dest).await);
			} else {
				items.push(skipped_item(&source, &dest));
			}
		}

		Ok(ContractConfigCheckResult::new(
			source.caip2(),
			None,
			Some(id),
			items,
		))
	}

	async fn onchain_checks(&self, source: &Chain, dest: &Chain) -> Vec<ContractConfigCheckItem> {
		let dest_caip2 = dest.caip2();
		let mut items = Vec::new();

		if let Err(failure) = self.run_onchain(source, &dest_caip2, &mut items).await {
			warn!(dest = %dest_caip2, step = failure.step, error = %failure.message, "On-chain check failed");
			items.push(ContractConfigCheckItem::error(
				ONCHAIN_CHECK_FAILED,
				format!("{} failed: {}", failure.step, failure.message),
			));
		}

		items
			.into_iter()
			.map(|item| item.with_destination(dest_caip2.clone()))
			.collect()
	}

	async fn run_onchain(
		&self,
		source: &Chain,
		dest: &str,
		items: &mut Vec<ContractConfigCheckItem>,
	) -> Result<(), OnchainFailure> {
		let gateway = self.registry.active_contract(source, ContractType::Gateway);
		let router = self.registry.active_contract(source, ContractType::Router);
		let (gateway, router) = match (gateway, router) {
			(Some(gateway), Some(router)) => (gateway, router),
			(gateway, router) => {
				if gateway.is_none() {
					items.push(ContractConfigCheckItem::error(
						GATEWAY_MISSING,
						format!("no active Gateway on {}", source.caip2()),
					));
				}
				if router.is_none() {
					items.push(ContractConfigCheckItem::error(
						ROUTER_MISSING,
						format!("no active Router on {}", source.caip2()),
					));
				}
				return Ok(());
			}
		};
		items.push(
			ContractConfigCheckItem::ok(CORE_CONTRACTS_PRESENT, "Gateway and Router are active")
				.with_contract(&gateway),
		);

		let gateway_address = parse_evm_address(&gateway.contract_address)
			.map_err(|e| OnchainFailure::new("gateway address", e))?;
		let router_address = parse_evm_address(&router.contract_address)
			.map_err(|e| OnchainFailure::new("router address", e))?;
		let rpc_url = require_evm_rpc(source).map_err(|e| OnchainFailure::new("rpc", e))?;
		let client = self
			.pool
			.get_evm_client(&rpc_url)
			.await
			.map_err(|e| OnchainFailure::new("rpc", e))?;
		let client = client.as_ref();

		debug!(dest, "Reading default bridge type");
		let code: u8 = call_view_abi(
			client,
			gateway_address,
			&self.abis.gateway,
			"defaultBridgeTypes",
			&[dest_arg(dest)],
		)
		.await
		.map_err(|e| OnchainFailure::new("defaultBridgeTypes", e))?;

		let bridge_type = match BridgeType::from_code(code) {
			Some(bridge_type) => bridge_type,
			None => {
				items.push(ContractConfigCheckItem::error(
					UNKNOWN_BRIDGE_TYPE,
					format!("default bridge type {} is not a known bridge", code),
				));
				return Ok(());
			}
		};
		items.push(ContractConfigCheckItem::ok(
			DEFAULT_BRIDGE_TYPE,
			format!("default bridge type is {} ({})", bridge_type, code),
		));

		let args = [dest_arg(dest), bridge_arg(bridge_type)];
		let has_adapter: bool =
			call_view_abi(client, router_address, &self.abis.router, "hasAdapter", &args)
				.await
				.map_err(|e| OnchainFailure::new("hasAdapter", e))?;
		let adapter: Address =
			call_view_abi(client, router_address, &self.abis.router, "getAdapter", &args)
				.await
				.map_err(|e| OnchainFailure::new("getAdapter", e))?;

		if !has_adapter || adapter.is_zero() {
			items.push(
				ContractConfigCheckItem::error(
					ADAPTER_NOT_REGISTERED,
					format!("no {} adapter registered for {}", bridge_type, dest),
				)
				.with_contract(&router),
			);
			return Ok(());
		}
		items.push(
			ContractConfigCheckItem::ok(
				ADAPTER_REGISTERED,
				format!("{} adapter {} registered", bridge_type, adapter),
			)
			.with_contract(&router),
		);

		let (configured, ok_code, missing_code) = match bridge_type {
			BridgeType::Hyperbridge => (
				self.hyperbridge_configured(client, adapter, dest).await?,
				HYPERBRIDGE_CONFIGURED,
				HYPERBRIDGE_NOT_CONFIGURED,
			),
			BridgeType::Ccip => (
				self.ccip_configured(client, adapter, dest).await?,
				CCIP_CONFIGURED,
				CCIP_NOT_CONFIGURED,
			),
			BridgeType::LayerZero => (
				self.layerzero_configured(client, adapter, dest).await?,
				LAYERZERO_CONFIGURED,
				LAYERZERO_NOT_CONFIGURED,
			),
		};

		if configured {
			items.push(ContractConfigCheckItem::ok(
				ok_code,
				format!("{} adapter is configured for {}", bridge_type, dest),
			));
		} else {
			items.push(ContractConfigCheckItem::error(
				missing_code,
				format!("{} adapter is not configured for {}", bridge_type, dest),
			));
		}
		Ok(())
	}

	async fn hyperbridge_configured(
		&self,
		client: &dyn EvmClientTrait,
		adapter: Address,
		dest: &str,
	) -> Result<bool, OnchainFailure> {
		let abi = &self.abis.hyperbridge;
		let args = [dest_arg(dest)];

		match call_view_abi::<bool>(client, adapter, abi, "isChainConfigured", &args).await {
			Ok(configured) => return Ok(configured),
			// older adapters lack isChainConfigured
			Err(err) if err.is_revert() || matches!(err, AbiCallError::Decode(_)) => {
				debug!(error = %err, "Falling back to stored Hyperbridge ids");
			}
			Err(err) => return Err(OnchainFailure::new("isChainConfigured", err)),
		}

		let state_machine_id: Bytes = call_view_abi(client, adapter, abi, "stateMachineIds", &args)
			.await
			.map_err(|e| OnchainFailure::new("stateMachineIds", e))?;
		let destination_contract: Bytes =
			call_view_abi(client, adapter, abi, "destinationContracts", &args)
				.await
				.map_err(|e| OnchainFailure::new("destinationContracts", e))?;

		Ok(HyperbridgeConfig::inferred(state_machine_id, destination_contract).configured)
	}

	async fn ccip_configured(
		&self,
		client: &dyn EvmClientTrait,
		adapter: Address,
		dest: &str,
	) -> Result<bool, OnchainFailure> {
		let abi = &self.abis.ccip;
		let args = [dest_arg(dest)];
		let config = CcipConfig {
			chain_selector: call_view_abi(client, adapter, abi, "chainSelectors", &args)
				.await
				.map_err(|e| OnchainFailure::new("chainSelectors", e))?,
			destination_adapter: call_view_abi(client, adapter, abi, "destinationAdapters", &args)
				.await
				.map_err(|e| OnchainFailure::new("destinationAdapters", e))?,
		};
		Ok(config.is_configured())
	}

	async fn layerzero_configured(
		&self,
		client: &dyn EvmClientTrait,
		adapter: Address,
		dest: &str,
	) -> Result<bool, OnchainFailure> {
		let abi = &self.abis.layerzero;
		let args = [dest_arg(dest)];
		let configured: bool = call_view_abi(client, adapter, abi, "isRouteConfigured", &args)
			.await
			.map_err(|e| OnchainFailure::new("isRouteConfigured", e))?;
		let dst_eid: u32 = call_view_abi(client, adapter, abi, "dstEids", &args)
			.await
			.map_err(|e| OnchainFailure::new("dstEids", e))?;
		let peer: B256 = if dst_eid == 0 {
			B256::ZERO
		} else {
			call_view_abi(client, adapter, abi, "peers", &[eid_arg(dst_eid)])
				.await
				.map_err(|e| OnchainFailure::new("peers", e))?
		};

		let config = LayerZeroConfig {
			configured,
			dst_eid,
			peer,
			..Default::default()
		};
		Ok(config.is_configured())
	}
}
