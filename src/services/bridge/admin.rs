//! Admin write operations.
//!
//! Every operation re-resolves its chains and target contract, encodes calldata
//! through the ABI registry and hands it to the injected executor. Multi-step
//! operations submit sequentially and are not atomic.

use alloy::{
	dyn_abi::DynSolValue,
	json_abi::JsonAbi,
	primitives::{Address, Bytes, B256, U256},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use crate::{
	models::{BridgeType, ContractType},
	repositories::RegistryService,
	services::{
		abi::{encode_call, AbiRegistry},
		blockchain::TransactionExecutor,
		bridge::{
			context::{require_contract, resolve_route, RouteContext},
			BridgeError,
		},
	},
};

/// A submitted write
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxStepOutcome {
	pub method: String,
	pub tx_hash: String,
}

struct PreparedCall {
	method: &'static str,
	calldata: Bytes,
}

/// Write-path service. Holds no signer of its own.
pub struct AdminOpsService {
	registry: RegistryService,
	abis: Arc<AbiRegistry>,
	executor: Arc<dyn TransactionExecutor>,
}

fn uint8(value: u8) -> DynSolValue {
	DynSolValue::Uint(U256::from(value), 8)
}

fn string(value: String) -> DynSolValue {
	DynSolValue::String(value)
}

fn bytes(value: &Bytes) -> DynSolValue {
	DynSolValue::Bytes(value.to_vec())
}

impl AdminOpsService {
	pub fn new(
		registry: RegistryService,
		abis: Arc<AbiRegistry>,
		executor: Arc<dyn TransactionExecutor>,
	) -> Self {
		Self {
			registry,
			abis,
			executor,
		}
	}

	/// Router.registerAdapter(dest, type, adapter)
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id, bridge_type = %bridge_type))]
	pub async fn register_adapter(
		&self,
		source_id: &str,
		dest_id: &str,
		bridge_type: BridgeType,
		adapter: Address,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		if adapter.is_zero() {
			return Err(BridgeError::invalid_input("adapter address must not be zero"));
		}
		let ctx = resolve_route(&self.registry, source_id, dest_id)?;
		let router = require_contract(&self.registry, &ctx.source, ContractType::Router)?;

		let calls = vec![self.prepare(
			&self.abis.router,
			"registerAdapter",
			vec![
				string(ctx.dest_caip2()),
				uint8(bridge_type.code()),
				DynSolValue::Address(adapter),
			],
		)?];
		self.submit(&ctx, router.address, calls).await
	}

	/// Gateway.setDefaultBridgeType(dest, type)
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id, bridge_type = %bridge_type))]
	pub async fn set_default_bridge_type(
		&self,
		source_id: &str,
		dest_id: &str,
		bridge_type: BridgeType,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		let ctx = resolve_route(&self.registry, source_id, dest_id)?;
		let gateway = require_contract(&self.registry, &ctx.source, ContractType::Gateway)?;

		let calls = vec![self.prepare(
			&self.abis.gateway,
			"setDefaultBridgeType",
			vec![string(ctx.dest_caip2()), uint8(bridge_type.code())],
		)?];
		self.submit(&ctx, gateway.address, calls).await
	}

	/// setStateMachineId then setDestinationContract on the Hyperbridge adapter
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id))]
	pub async fn set_hyperbridge_config(
		&self,
		source_id: &str,
		dest_id: &str,
		state_machine_id: Bytes,
		destination_contract: Bytes,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		if state_machine_id.is_empty() || destination_contract.is_empty() {
			return Err(BridgeError::invalid_input(
				"state machine id and destination contract are required",
			));
		}
		let ctx = resolve_route(&self.registry, source_id, dest_id)?;
		let adapter =
			require_contract(&self.registry, &ctx.source, ContractType::AdapterHyperbridge)?;
		let abi = &self.abis.hyperbridge;

		let calls = vec![
			self.prepare(
				abi,
				"setStateMachineId",
				vec![string(ctx.dest_caip2()), bytes(&state_machine_id)],
			)?,
			self.prepare(
				abi,
				"setDestinationContract",
				vec![string(ctx.dest_caip2()), bytes(&destination_contract)],
			)?,
		];
		self.submit(&ctx, adapter.address, calls).await
	}

	/// setChainSelector then setDestinationAdapter on the CCIP adapter
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id, chain_selector = chain_selector))]
	pub async fn set_ccip_config(
		&self,
		source_id: &str,
		dest_id: &str,
		chain_selector: u64,
		destination_adapter: Bytes,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		if chain_selector == 0 {
			return Err(BridgeError::invalid_input("chain selector must not be zero"));
		}
		if destination_adapter.is_empty() {
			return Err(BridgeError::invalid_input("destination adapter is required"));
		}
		let ctx = resolve_route(&self.registry, source_id, dest_id)?;
		let adapter = require_contract(&self.registry, &ctx.source, ContractType::AdapterCcip)?;
		let abi = &self.abis.ccip;

		let calls = vec![
			self.prepare(
				abi,
				"setChainSelector",
				vec![
					string(ctx.dest_caip2()),
					DynSolValue::Uint(U256::from(chain_selector), 64),
				],
			)?,
			self.prepare(
				abi,
				"setDestinationAdapter",
				vec![string(ctx.dest_caip2()), bytes(&destination_adapter)],
			)?,
		];
		self.submit(&ctx, adapter.address, calls).await
	}

	/// setRoute, then setEnforcedOptions when options are given
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id, dst_eid = dst_eid))]
	pub async fn set_layerzero_config(
		&self,
		source_id: &str,
		dest_id: &str,
		dst_eid: u32,
		peer: B256,
		options: Option<Bytes>,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		if dst_eid == 0 {
			return Err(BridgeError::invalid_input("destination eid must not be zero"));
		}
		if peer.is_zero() {
			return Err(BridgeError::invalid_input("peer must not be zero"));
		}
		let ctx = resolve_route(&self.registry, source_id, dest_id)?;
		let adapter =
			require_contract(&self.registry, &ctx.source, ContractType::AdapterLayerZero)?;
		let abi = &self.abis.layerzero;

		let mut calls = vec![self.prepare(
			abi,
			"setRoute",
			vec![
				string(ctx.dest_caip2()),
				DynSolValue::Uint(U256::from(dst_eid), 32),
				DynSolValue::FixedBytes(peer, 32),
			],
		)?];
		if let Some(options) = options.filter(|options| !options.is_empty()) {
			calls.push(self.prepare(
				abi,
				"setEnforcedOptions",
				vec![DynSolValue::Uint(U256::from(dst_eid), 32), bytes(&options)],
			)?);
		}
		self.submit(&ctx, adapter.address, calls).await
	}

	fn prepare(
		&self,
		abi: &JsonAbi,
		method: &'static str,
		args: Vec<DynSolValue>,
	) -> Result<PreparedCall, BridgeError> {
		Ok(PreparedCall {
			method,
			calldata: encode_call(abi, method, &args)?,
		})
	}

	/// Submits prepared calls in order, stopping at the first failure
	async fn submit(
		&self,
		ctx: &RouteContext,
		target: Address,
		calls: Vec<PreparedCall>,
	) -> Result<Vec<TxStepOutcome>, BridgeError> {
		let mut completed = Vec::with_capacity(calls.len());

		for call in calls {
			tracing::info!(
				method = call.method,
				target = %target,
				source = %ctx.source_caip2(),
				dest = %ctx.dest_caip2(),
				"Submitting admin transaction"
			);

			match self
				.executor
				.send_transaction(&ctx.rpc_url, target, call.calldata, U256::ZERO)
				.await
			{
				Ok(tx_hash) => completed.push(TxStepOutcome {
					method: call.method.to_string(),
					tx_hash,
				}),
				Err(err) if completed.is_empty() => return Err(err.into()),
				Err(err) => {
					return Err(BridgeError::partial_failure(
						completed,
						format!("{} failed: {}", call.method, err),
					))
				}
			}
		}

		Ok(completed)
	}
}
