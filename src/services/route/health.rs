//! Fee-quote health probing.
//!
//! A route is only usable when the Router can quote a bridge fee for it. The
//! default probe asks `quotePaymentFeeSafe` first and falls back to the reverting
//! `quotePaymentFee` when the safe variant is unavailable or gives no reason.

use alloy::{
	dyn_abi::DynSolValue,
	primitives::{Address, U256},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
	models::{BridgeType, Chain, ContractType, RouteErrorDecoded},
	repositories::RegistryService,
	services::{
		abi::{call_view_abi, call_view_raw, parse_abi, AbiCallError, AbiRegistry},
		blockchain::{ClientPoolTrait, EvmClientTrait},
		bridge::{bridge_arg, dest_arg, require_contract, require_evm_rpc, ResolvedContract},
		revert::RevertDecoder,
	},
};

const SAFE_QUOTE: &str = "quotePaymentFeeSafe";
const RAW_QUOTE: &str = "quotePaymentFee";

/// Outcome of a fee-quote probe
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeeQuoteHealth {
	pub healthy: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fee: Option<U256>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub decoded_error: Option<RouteErrorDecoded>,
}

impl FeeQuoteHealth {
	pub fn healthy(fee: U256) -> Self {
		Self {
			healthy: true,
			fee: Some(fee),
			..Default::default()
		}
	}

	pub fn unhealthy(reason: impl Into<String>) -> Self {
		Self {
			healthy: false,
			reason: Some(reason.into()),
			..Default::default()
		}
	}

	fn with_decoded(mut self, decoded: RouteErrorDecoded) -> Self {
		self.decoded_error = Some(decoded);
		self
	}
}

/// Strategy deciding whether a bridge type can quote fees for a route
#[async_trait]
pub trait FeeQuoteHealthProbe: Send + Sync {
	async fn probe(&self, source: &Chain, dest: &Chain, bridge_type: BridgeType) -> FeeQuoteHealth;
}

/// Probe that queries the source chain's Router
pub struct RouterFeeQuoteProbe {
	registry: RegistryService,
	pool: Arc<dyn ClientPoolTrait>,
	abis: Arc<AbiRegistry>,
	decoder: RevertDecoder,
	probe_amount: U256,
}

enum SafeQuote {
	Done(FeeQuoteHealth),
	Fallback(String),
}

impl RouterFeeQuoteProbe {
	pub fn new(
		registry: RegistryService,
		pool: Arc<dyn ClientPoolTrait>,
		abis: Arc<AbiRegistry>,
		decoder: RevertDecoder,
		probe_amount: U256,
	) -> Self {
		Self {
			registry,
			pool,
			abis,
			decoder,
			probe_amount,
		}
	}

	/// Gateway and adapter share a Vault that authorizes the adapter as spender
	async fn check_adapter_runtime(
		&self,
		client: &dyn EvmClientTrait,
		source: &Chain,
		router: &ResolvedContract,
		dest: &str,
		bridge_type: BridgeType,
	) -> Result<(), String> {
		let gateway = require_contract(&self.registry, source, ContractType::Gateway)
			.map_err(|e| e.to_string())?;
		let adapter: Address = call_view_abi(
			client,
			router.address,
			&self.abis.router,
			"getAdapter",
			&[dest_arg(dest), bridge_arg(bridge_type)],
		)
		.await
		.map_err(|e| format!("getAdapter failed: {}", e))?;
		if adapter.is_zero() {
			return Err(format!("no {} adapter registered", bridge_type));
		}

		let gateway_vault: Address =
			call_view_abi(client, gateway.address, &self.abis.gateway, "vault", &[])
				.await
				.map_err(|e| format!("Gateway vault() failed: {}", e))?;
		let adapter_vault: Address =
			call_view_abi(client, adapter, self.abis.adapter(bridge_type), "vault", &[])
				.await
				.map_err(|e| format!("{} adapter vault() failed: {}", bridge_type, e))?;
		if gateway_vault != adapter_vault {
			return Err(format!(
				"{} adapter vault {} does not match Gateway vault {}",
				bridge_type, adapter_vault, gateway_vault
			));
		}

		let authorized: bool = call_view_abi(
			client,
			gateway_vault,
			&self.abis.vault,
			"isAuthorizedSpender",
			&[DynSolValue::Address(adapter)],
		)
		.await
		.map_err(|e| format!("isAuthorizedSpender failed: {}", e))?;
		if !authorized {
			return Err(format!(
				"{} adapter {} is not an authorized spender of vault {}",
				bridge_type, adapter, gateway_vault
			));
		}
		Ok(())
	}

	/// Whether the Router's stored ABI, when present, declares the safe quote
	fn stored_abi_has_safe_quote(router: &ResolvedContract) -> bool {
		if router.contract.abi.trim().is_empty() {
			return true;
		}
		match parse_abi(&router.contract.abi) {
			Ok(abi) => abi.function(SAFE_QUOTE).is_some(),
			Err(_) => true,
		}
	}

	async fn safe_quote(
		&self,
		client: &dyn EvmClientTrait,
		router: Address,
		args: &[DynSolValue],
	) -> SafeQuote {
		let values = match call_view_raw(client, router, &self.abis.router, SAFE_QUOTE, args).await {
			Ok(values) => values,
			Err(err) if err.is_revert() || matches!(err, AbiCallError::Decode(_)) => {
				return SafeQuote::Fallback(format!("safe quote unavailable: {}", err));
			}
			Err(err) => {
				return SafeQuote::Done(FeeQuoteHealth::unhealthy(format!(
					"fee quote request failed: {}",
					err
				)))
			}
		};

		let ok = values.first().and_then(DynSolValue::as_bool);
		let fee = values.get(1).and_then(DynSolValue::as_uint).map(|(fee, _)| fee);
		let reason = values
			.get(2)
			.and_then(DynSolValue::as_str)
			.map(str::trim)
			.filter(|reason| !reason.is_empty());

		match (ok, fee, reason) {
			(Some(true), Some(fee), _) => SafeQuote::Done(FeeQuoteHealth::healthy(fee)),
			(Some(false), _, Some(reason)) => SafeQuote::Done(FeeQuoteHealth::unhealthy(reason)),
			_ => SafeQuote::Fallback("safe quote returned no reason".to_string()),
		}
	}

	async fn raw_quote(
		&self,
		client: &dyn EvmClientTrait,
		router: Address,
		args: &[DynSolValue],
	) -> FeeQuoteHealth {
		match call_view_abi::<U256>(client, router, &self.abis.router, RAW_QUOTE, args).await {
			Ok(fee) => FeeQuoteHealth::healthy(fee),
			Err(err) => match err.revert_data() {
				Some(data) => {
					let decoded = self.decoder.decode(data);
					let reason = decoded
						.message
						.clone()
						.unwrap_or_else(|| err.to_string());
					FeeQuoteHealth::unhealthy(reason).with_decoded(decoded)
				}
				None => FeeQuoteHealth::unhealthy(format!("fee quote failed: {}", err)),
			},
		}
	}
}

#[async_trait]
impl FeeQuoteHealthProbe for RouterFeeQuoteProbe {
	#[instrument(skip_all, fields(source = %source.caip2(), dest = %dest.caip2(), bridge_type = %bridge_type))]
	async fn probe(&self, source: &Chain, dest: &Chain, bridge_type: BridgeType) -> FeeQuoteHealth {
		let router = match require_contract(&self.registry, source, ContractType::Router) {
			Ok(router) => router,
			Err(err) => return FeeQuoteHealth::unhealthy(err.to_string()),
		};
		let rpc_url = match require_evm_rpc(source) {
			Ok(url) => url,
			Err(err) => return FeeQuoteHealth::unhealthy(err.to_string()),
		};
		let client = match self.pool.get_evm_client(&rpc_url).await {
			Ok(client) => client,
			Err(err) => return FeeQuoteHealth::unhealthy(err.to_string()),
		};
		let client = client.as_ref();
		let dest = dest.caip2();

		if bridge_type != BridgeType::LayerZero {
			if let Err(reason) = self
				.check_adapter_runtime(client, source, &router, &dest, bridge_type)
				.await
			{
				debug!(%reason, "Adapter runtime not ready");
				return FeeQuoteHealth::unhealthy(reason);
			}
		}

		let args = [
			dest_arg(&dest),
			bridge_arg(bridge_type),
			DynSolValue::Uint(self.probe_amount, 256),
		];

		if Self::stored_abi_has_safe_quote(&router) {
			match self.safe_quote(client, router.address, &args).await {
				SafeQuote::Done(health) => return health,
				SafeQuote::Fallback(why) => {
					warn!(reason = %why, "Falling back to raw fee quote");
				}
			}
		} else {
			debug!("Router ABI has no safe quote, using raw fee quote");
		}

		self.raw_quote(client, router.address, &args).await
	}
}
