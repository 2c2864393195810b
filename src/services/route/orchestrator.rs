//! Route health verdicts built on the status resolver and a fee-quote probe.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
	models::{
		bridge_name, not_configured_code, BridgePreflight, BridgeType, Chain, OverviewResult,
		Pagination, PreflightResult, RouteIssue, RouteState, RouteStatus, ADAPTER_NOT_REGISTERED,
		FEE_QUOTE_FAILED,
	},
	services::{
		bridge::{BridgeError, BridgeStatusResolver},
		route::health::FeeQuoteHealthProbe,
	},
};

/// Composes adapter status and fee-quote health into READY/ERROR verdicts
#[derive(Clone)]
pub struct RouteHealthOrchestrator {
	pub(super) resolver: Arc<BridgeStatusResolver>,
	probe: Arc<dyn FeeQuoteHealthProbe>,
}

impl RouteHealthOrchestrator {
	pub fn new(resolver: Arc<BridgeStatusResolver>, probe: Arc<dyn FeeQuoteHealthProbe>) -> Self {
		Self { resolver, probe }
	}

	pub(super) fn resolve_pair(&self, source_id: &str, dest_id: &str) -> Result<(Chain, Chain), BridgeError> {
		let registry = self.resolver.registry();
		Ok((registry.resolve_chain(source_id)?, registry.resolve_chain(dest_id)?))
	}

	/// Evaluates one route against its current default bridge type
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id))]
	pub async fn recheck_route(&self, source_id: &str, dest_id: &str) -> Result<RouteStatus, BridgeError> {
		let status = self.resolver.get_status(source_id, dest_id).await?;
		let (source, dest) = self.resolve_pair(source_id, dest_id)?;
		let default_type = status.default_type();
		let adapter_registered = status.default_adapter_registered();
		let mut issues = Vec::new();

		if !adapter_registered {
			issues.push(RouteIssue::new(
				ADAPTER_NOT_REGISTERED,
				format!(
					"no adapter registered for default bridge type {} ({})",
					status.default_bridge_name, status.default_bridge_type
				),
			));
		}

		if let Some(bridge_type) = default_type {
			if !status.is_route_configured(bridge_type) {
				issues.push(RouteIssue::new(
					not_configured_code(bridge_type),
					format!("{} adapter is not configured for {}", bridge_type, status.dest_chain_id),
				));
			}
		}

		let mut fee_quote_healthy = None;
		let mut fee_quote_reason = None;
		if let (true, Some(bridge_type)) = (adapter_registered, default_type) {
			let health = self.probe.probe(&source, &dest, bridge_type).await;
			if !health.healthy {
				let reason = health
					.reason
					.clone()
					.unwrap_or_else(|| "fee quote failed".to_string());
				issues.push(RouteIssue::new(FEE_QUOTE_FAILED, reason.clone()));
				fee_quote_reason = Some(reason);
			}
			fee_quote_healthy = Some(health.healthy);
		}

		let state = if issues.is_empty() {
			RouteState::Ready
		} else {
			RouteState::Error
		};

		Ok(RouteStatus {
			source_chain_id: status.source_chain_id.clone(),
			dest_chain_id: status.dest_chain_id.clone(),
			status: state,
			default_bridge_type: Some(status.default_bridge_type),
			default_bridge_name: Some(status.default_bridge_name.clone()),
			adapter_registered,
			adapter_address: adapter_registered.then(|| status.default_adapter_address.to_string()),
			hyperbridge_configured: status.is_route_configured(BridgeType::Hyperbridge),
			ccip_configured: status.is_route_configured(BridgeType::Ccip),
			layerzero_configured: status.is_route_configured(BridgeType::LayerZero),
			fee_quote_healthy,
			fee_quote_reason,
			issues,
			checked_at: Utc::now(),
		})
	}

	/// Verdicts for every (source, destination) pair, one page at a time.
	///
	/// Without a source filter all active EVM chains are sources; without a
	/// destination filter all active chains are destinations. Self-pairs are never
	/// listed and a failing pair becomes a `RECHECK_FAILED` row.
	#[instrument(skip_all, fields(source = ?source_filter, dest = ?dest_filter))]
	pub async fn overview(
		&self,
		source_filter: Option<&str>,
		dest_filter: Option<&str>,
		pagination: Pagination,
	) -> Result<OverviewResult, BridgeError> {
		let registry = self.resolver.registry();
		let sources = match source_filter {
			Some(id) => vec![registry.resolve_chain(id)?],
			None => registry
				.active_chains()
				.into_iter()
				.filter(Chain::is_evm)
				.collect(),
		};
		let dests = match dest_filter {
			Some(id) => vec![registry.resolve_chain(id)?],
			None => registry.active_chains(),
		};

		let mut pairs: Vec<(String, String)> = sources
			.iter()
			.flat_map(|source| {
				dests
					.iter()
					.filter(move |dest| dest.id != source.id && dest.caip2() != source.caip2())
					.map(move |dest| (source.caip2(), dest.caip2()))
			})
			.collect();
		pairs.sort();
		pairs.dedup();

		let (start, end) = pagination.window(pairs.len());
		let mut routes = Vec::with_capacity(end - start);
		for (source, dest) in &pairs[start..end] {
			let row = match self.recheck_route(source, dest).await {
				Ok(row) => row,
				Err(err) => RouteStatus::failed(source.clone(), dest.clone(), err.to_string()),
			};
			routes.push(row);
		}

		info!(total = pairs.len(), returned = routes.len(), "Route overview evaluated");
		Ok(OverviewResult {
			routes,
			total: pairs.len(),
			offset: start,
			limit: pagination.limit,
		})
	}

	/// Readiness of every bridge type for one route
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id))]
	pub async fn preflight(&self, source_id: &str, dest_id: &str) -> Result<PreflightResult, BridgeError> {
		let status = self.resolver.get_status(source_id, dest_id).await?;
		let (source, dest) = self.resolve_pair(source_id, dest_id)?;

		let mut bridges = Vec::with_capacity(BridgeType::ALL.len());
		for bridge_type in BridgeType::ALL {
			let adapter_registered = status.adapter(bridge_type).is_registered();
			let route_configured = status.is_route_configured(bridge_type);
			let health = if adapter_registered && route_configured {
				Some(self.probe.probe(&source, &dest, bridge_type).await)
			} else {
				None
			};
			let fee_quote_healthy = health.as_ref().is_some_and(|health| health.healthy);

			let (error_code, error_message) = if !adapter_registered {
				(
					Some(ADAPTER_NOT_REGISTERED),
					Some(format!("no {} adapter registered", bridge_type)),
				)
			} else if !route_configured {
				(
					Some(not_configured_code(bridge_type)),
					Some(format!("{} adapter is not configured", bridge_type)),
				)
			} else if !fee_quote_healthy {
				(
					Some(FEE_QUOTE_FAILED),
					health.as_ref().and_then(|health| health.reason.clone()),
				)
			} else {
				(None, None)
			};

			bridges.push(BridgePreflight {
				bridge_type,
				bridge_name: bridge_type.name().to_string(),
				adapter_registered,
				route_configured,
				fee_quote_healthy,
				ready: adapter_registered && route_configured && fee_quote_healthy,
				error_code: error_code.map(str::to_string),
				error_message,
				decoded_error: health.and_then(|health| health.decoded_error),
			});
		}

		let policy_executable = status
			.default_type()
			.and_then(|default| bridges.iter().find(|row| row.bridge_type == default))
			.is_some_and(|row| row.ready);

		Ok(PreflightResult {
			source_chain_id: status.source_chain_id.clone(),
			dest_chain_id: status.dest_chain_id.clone(),
			default_bridge_type: status.default_bridge_type,
			default_bridge_name: bridge_name(status.default_bridge_type).to_string(),
			policy_executable,
			bridges,
			checked_at: Utc::now(),
		})
	}
}
