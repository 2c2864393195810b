//! Bridge adapter status resolver.
//!
//! Reads the live registration and destination configuration of every bridge
//! adapter for a (source, destination) pair. Only the Gateway's default-type read
//! is fatal; adapter reads fall back to zero values.

use alloy::{
	dyn_abi::DynSolValue,
	json_abi::JsonAbi,
	primitives::{Address, Bytes, B256, U256},
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
	models::{
		AdapterRegistration, BridgeType, CcipConfig, ContractType, HyperbridgeConfig,
		LayerZeroConfig, OnchainAdapterStatus,
	},
	repositories::RegistryService,
	services::{
		abi::{call_view_abi, AbiRegistry, ViewOutput},
		blockchain::{ClientPoolTrait, EvmClientTrait},
		bridge::{
			admin::{AdminOpsService, TxStepOutcome},
			context::{require_contract, resolve_route},
			BridgeError,
		},
	},
	utils::codec::{decode_hex, decode_non_empty_hex, parse_evm_address},
};

/// Read-through view of adapter state plus validated admin writes
#[derive(Clone)]
pub struct BridgeStatusResolver {
	registry: RegistryService,
	pool: Arc<dyn ClientPoolTrait>,
	abis: Arc<AbiRegistry>,
	admin: Arc<AdminOpsService>,
}

/// Reads a view value, logging and substituting the zero value on failure
async fn soft_read<T: ViewOutput + Default>(
	client: &dyn EvmClientTrait,
	address: Address,
	abi: &JsonAbi,
	method: &str,
	args: &[DynSolValue],
) -> T {
	match call_view_abi::<T>(client, address, abi, method, args).await {
		Ok(value) => value,
		Err(err) => {
			warn!(method, address = %address, error = %err, "Adapter read failed, using zero value");
			T::default()
		}
	}
}

pub(crate) fn dest_arg(dest_caip2: &str) -> DynSolValue {
	DynSolValue::String(dest_caip2.to_string())
}

pub(crate) fn bridge_arg(bridge_type: BridgeType) -> DynSolValue {
	DynSolValue::Uint(U256::from(bridge_type.code()), 8)
}

pub(crate) fn eid_arg(eid: u32) -> DynSolValue {
	DynSolValue::Uint(U256::from(eid), 32)
}

impl BridgeStatusResolver {
	pub fn new(
		registry: RegistryService,
		pool: Arc<dyn ClientPoolTrait>,
		abis: Arc<AbiRegistry>,
		admin: Arc<AdminOpsService>,
	) -> Self {
		Self {
			registry,
			pool,
			abis,
			admin,
		}
	}

	pub fn registry(&self) -> &RegistryService {
		&self.registry
	}

	/// Fresh snapshot of every adapter serving `source -> dest`
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id))]
	pub async fn get_status(
		&self,
		source_id: &str,
		dest_id: &str,
	) -> Result<OnchainAdapterStatus, BridgeError> {
		let ctx = resolve_route(&self.registry, source_id, dest_id)?;
		let gateway = require_contract(&self.registry, &ctx.source, ContractType::Gateway)?;
		let router = require_contract(&self.registry, &ctx.source, ContractType::Router)?;
		let client = self.pool.get_evm_client(&ctx.rpc_url).await?;
		let client = client.as_ref();
		let dest = ctx.dest_caip2();

		debug!(gateway = %gateway.address, "Reading default bridge type");
		let default_bridge_type: u8 = call_view_abi(
			client,
			gateway.address,
			&self.abis.gateway,
			"defaultBridgeTypes",
			&[dest_arg(&dest)],
		)
		.await?;

		let mut adapters = Vec::with_capacity(BridgeType::ALL.len());
		for bridge_type in BridgeType::ALL {
			let args = [dest_arg(&dest), bridge_arg(bridge_type)];
			let has_adapter: bool =
				soft_read(client, router.address, &self.abis.router, "hasAdapter", &args).await;
			let address: Address =
				soft_read(client, router.address, &self.abis.router, "getAdapter", &args).await;
			adapters.push(AdapterRegistration {
				bridge_type,
				has_adapter,
				address,
			});
		}

		let adapter_address = |bridge_type: BridgeType| {
			adapters
				.iter()
				.find(|adapter| adapter.bridge_type == bridge_type)
				.map(|adapter| adapter.address)
				.filter(|address| !address.is_zero())
		};

		let hyperbridge = match adapter_address(BridgeType::Hyperbridge) {
			Some(address) => self.read_hyperbridge(client, address, &dest).await,
			None => HyperbridgeConfig::default(),
		};
		let ccip = match adapter_address(BridgeType::Ccip) {
			Some(address) => self.read_ccip(client, address, &dest).await,
			None => CcipConfig::default(),
		};
		let layerzero = match adapter_address(BridgeType::LayerZero) {
			Some(address) => self.read_layerzero(client, address, &dest).await,
			None => LayerZeroConfig::default(),
		};

		Ok(OnchainAdapterStatus::new(
			ctx.source_caip2(),
			dest,
			gateway.address,
			router.address,
			default_bridge_type,
			adapters,
			hyperbridge,
			ccip,
			layerzero,
		))
	}

	async fn read_hyperbridge(
		&self,
		client: &dyn EvmClientTrait,
		address: Address,
		dest: &str,
	) -> HyperbridgeConfig {
		let abi = &self.abis.hyperbridge;
		let args = [dest_arg(dest)];
		let state_machine_id: Bytes = soft_read(client, address, abi, "stateMachineIds", &args).await;
		let destination_contract: Bytes =
			soft_read(client, address, abi, "destinationContracts", &args).await;

		match call_view_abi::<bool>(client, address, abi, "isChainConfigured", &args).await {
			Ok(configured) => HyperbridgeConfig {
				configured,
				state_machine_id,
				destination_contract,
			},
			Err(err) => {
				debug!(error = %err, "isChainConfigured unavailable, inferring from stored ids");
				HyperbridgeConfig::inferred(state_machine_id, destination_contract)
			}
		}
	}

	async fn read_ccip(&self, client: &dyn EvmClientTrait, address: Address, dest: &str) -> CcipConfig {
		let abi = &self.abis.ccip;
		let args = [dest_arg(dest)];
		CcipConfig {
			chain_selector: soft_read(client, address, abi, "chainSelectors", &args).await,
			destination_adapter: soft_read(client, address, abi, "destinationAdapters", &args).await,
		}
	}

	async fn read_layerzero(
		&self,
		client: &dyn EvmClientTrait,
		address: Address,
		dest: &str,
	) -> LayerZeroConfig {
		let abi = &self.abis.layerzero;
		let args = [dest_arg(dest)];
		let configured: bool = soft_read(client, address, abi, "isRouteConfigured", &args).await;
		let dst_eid: u32 = soft_read(client, address, abi, "dstEids", &args).await;

		// peers and options are keyed by endpoint id
		let (peer, options) = if dst_eid == 0 {
			(B256::ZERO, Bytes::new())
		} else {
			let eid = [eid_arg(dst_eid)];
			(
				soft_read(client, address, abi, "peers", &eid).await,
				soft_read(client, address, abi, "enforcedOptions", &eid).await,
			)
		};

		LayerZeroConfig {
			configured,
			dst_eid,
			peer,
			options,
		}
	}

	/// Registers `adapter` (a 20-byte hex address) for `bridge_type` on the Router
	pub async fn register_adapter(
		&self,
		source_id: &str,
		dest_id: &str,
		bridge_type: BridgeType,
		adapter: &str,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		let adapter = parse_evm_address(adapter)?;
		self.admin
			.register_adapter(source_id, dest_id, bridge_type, adapter)
			.await
	}

	pub async fn set_default_bridge_type(
		&self,
		source_id: &str,
		dest_id: &str,
		bridge_type: BridgeType,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		self.admin
			.set_default_bridge_type(source_id, dest_id, bridge_type)
			.await
	}

	pub async fn set_hyperbridge_config(
		&self,
		source_id: &str,
		dest_id: &str,
		state_machine_id: &str,
		destination_contract: &str,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		let state_machine_id = decode_non_empty_hex(state_machine_id, "state machine id")?;
		let destination_contract =
			decode_non_empty_hex(destination_contract, "destination contract")?;
		self.admin
			.set_hyperbridge_config(
				source_id,
				dest_id,
				Bytes::from(state_machine_id),
				Bytes::from(destination_contract),
			)
			.await
	}

	pub async fn set_ccip_config(
		&self,
		source_id: &str,
		dest_id: &str,
		chain_selector: u64,
		destination_adapter: &str,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		let destination_adapter = decode_non_empty_hex(destination_adapter, "destination adapter")?;
		self.admin
			.set_ccip_config(
				source_id,
				dest_id,
				chain_selector,
				Bytes::from(destination_adapter),
			)
			.await
	}

	/// `peer` must be a 32-byte hex value; empty `options` sends a single transaction
	pub async fn set_layerzero_config(
		&self,
		source_id: &str,
		dest_id: &str,
		dst_eid: u32,
		peer: &str,
		options: Option<&str>,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		let peer_bytes = decode_non_empty_hex(peer, "peer")?;
		if peer_bytes.len() != 32 {
			return Err(BridgeError::invalid_input(format!(
				"peer must be 32 bytes, got {}",
				peer_bytes.len()
			)));
		}
		let options = match options {
			Some(raw) => Some(Bytes::from(decode_hex(raw)?)),
			None => None,
		};
		self.admin
			.set_layerzero_config(
				source_id,
				dest_id,
				dst_eid,
				B256::from_slice(&peer_bytes),
				options,
			)
			.await
	}
}
