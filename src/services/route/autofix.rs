//! Step-logged remediation of a route.
//!
//! Steps run in order and stop at the first failure. Every step that already
//! matches the live state is skipped, so re-running is safe.

use tracing::{info, instrument};

use crate::{
	models::{
		AutoFixResult, AutoFixStep, BridgeType, Chain, ContractType, OnchainAdapterStatus,
		StepStatus,
	},
	services::{
		bridge::{BridgeError, TxStepOutcome},
		route::orchestrator::RouteHealthOrchestrator,
	},
	utils::codec::{address_to_padded_bytes_hex, derive_evm_state_machine_hex, encode_hex},
};

const REGISTER_ADAPTER: &str = "registerAdapter";
const SET_DEFAULT_BRIDGE: &str = "setDefaultBridge";
const SET_HYPERBRIDGE_CONFIG: &str = "setHyperbridgeConfig";
const SET_CCIP_CONFIG: &str = "setCcipConfig";
const SET_LAYERZERO_CONFIG: &str = "setLayerZeroConfig";

fn tx_hashes(outcomes: &[TxStepOutcome]) -> Vec<String> {
	outcomes.iter().map(|outcome| outcome.tx_hash.clone()).collect()
}

/// Maps a write result onto a step
fn write_step(step: &str, message: String, result: Result<Vec<TxStepOutcome>, BridgeError>) -> AutoFixStep {
	match result {
		Ok(outcomes) => AutoFixStep::success(step, message, tx_hashes(&outcomes)),
		Err(err) => AutoFixStep::failed(step, err.to_string(), tx_hashes(err.completed_steps())),
	}
}

impl RouteHealthOrchestrator {
	/// Registers, selects and configures `bridge_type` (or the current default) for
	/// `source -> dest`.
	///
	/// Step failures are reported in the result; only resolving the route or
	/// reading its initial status can fail the call.
	#[instrument(skip_all, fields(source = %source_id, dest = %dest_id, bridge_type = ?bridge_type))]
	pub async fn auto_fix(
		&self,
		source_id: &str,
		dest_id: &str,
		bridge_type: Option<BridgeType>,
	) -> Result<AutoFixResult, BridgeError> {
		let status = self.resolver.get_status(source_id, dest_id).await?;
		let (source, dest) = self.resolve_pair(source_id, dest_id)?;
		let target = match bridge_type.or_else(|| status.default_type()) {
			Some(target) => target,
			None => {
				return Err(BridgeError::invalid_input(format!(
					"default bridge type {} is unknown, pass a bridge type explicitly",
					status.default_bridge_type
				)))
			}
		};

		let mut result = AutoFixResult {
			source_chain_id: status.source_chain_id.clone(),
			dest_chain_id: status.dest_chain_id.clone(),
			bridge_type: target,
			steps: Vec::new(),
		};

		let steps = [
			REGISTER_ADAPTER,
			SET_DEFAULT_BRIDGE,
			match target {
				BridgeType::Hyperbridge => SET_HYPERBRIDGE_CONFIG,
				BridgeType::Ccip => SET_CCIP_CONFIG,
				BridgeType::LayerZero => SET_LAYERZERO_CONFIG,
			},
		];

		for step in steps {
			let outcome = match step {
				REGISTER_ADAPTER => self.register_step(&source, &dest, &status, target).await,
				SET_DEFAULT_BRIDGE => self.default_bridge_step(&source, &dest, &status, target).await,
				SET_HYPERBRIDGE_CONFIG => self.hyperbridge_step(&source, &dest, &status).await,
				SET_CCIP_CONFIG => {
					if status.ccip.is_configured() {
						AutoFixStep::skipped(step, "CCIP route already configured")
					} else {
						AutoFixStep::skipped(
							step,
							"manual configuration required: CCIP chain selectors are not derivable",
						)
					}
				}
				_ => AutoFixStep::skipped(step, "manual configuration required for LayerZero"),
			};

			info!(step = %outcome.step, status = ?outcome.status, message = %outcome.message, "AutoFix step");
			let failed = outcome.status == StepStatus::Failed;
			result.steps.push(outcome);
			if failed {
				break;
			}
		}

		Ok(result)
	}

	async fn register_step(
		&self,
		source: &Chain,
		dest: &Chain,
		status: &OnchainAdapterStatus,
		target: BridgeType,
	) -> AutoFixStep {
		let registration = status.adapter(target);
		if registration.is_registered() {
			return AutoFixStep::skipped(
				REGISTER_ADAPTER,
				format!("{} adapter already registered at {}", target, registration.address),
			);
		}

		let contract_type = ContractType::adapter_for(target);
		let adapter = match self.resolver.registry().active_contract(source, contract_type) {
			Some(contract) if !contract.contract_address.trim().is_empty() => contract,
			_ => {
				return AutoFixStep::failed(
					REGISTER_ADAPTER,
					format!("no active {} on {}", contract_type, source.caip2()),
					vec![],
				)
			}
		};

		let result = self
			.resolver
			.register_adapter(&source.caip2(), &dest.caip2(), target, &adapter.contract_address)
			.await;
		write_step(
			REGISTER_ADAPTER,
			format!("registered {} adapter {}", target, adapter.contract_address),
			result,
		)
	}

	async fn default_bridge_step(
		&self,
		source: &Chain,
		dest: &Chain,
		status: &OnchainAdapterStatus,
		target: BridgeType,
	) -> AutoFixStep {
		if status.default_bridge_type == target.code() {
			return AutoFixStep::skipped(
				SET_DEFAULT_BRIDGE,
				format!("default bridge type already {}", target),
			);
		}

		let result = self
			.resolver
			.set_default_bridge_type(&source.caip2(), &dest.caip2(), target)
			.await;
		write_step(
			SET_DEFAULT_BRIDGE,
			format!(
				"default bridge type changed from {} to {}",
				status.default_bridge_name, target
			),
			result,
		)
	}

	async fn hyperbridge_step(
		&self,
		source: &Chain,
		dest: &Chain,
		status: &OnchainAdapterStatus,
	) -> AutoFixStep {
		let state_machine_id = derive_evm_state_machine_hex(&dest.caip2());
		if state_machine_id.is_empty() {
			return AutoFixStep::skipped(
				SET_HYPERBRIDGE_CONFIG,
				format!(
					"manual configuration required: no state machine id derivable for {}",
					dest.caip2()
				),
			);
		}

		let remote = self
			.resolver
			.registry()
			.active_contract(dest, ContractType::AdapterHyperbridge);
		let destination_contract = match remote
			.as_ref()
			.map(|contract| address_to_padded_bytes_hex(&contract.contract_address))
		{
			Some(Ok(padded)) => padded,
			Some(Err(err)) => {
				return AutoFixStep::failed(
					SET_HYPERBRIDGE_CONFIG,
					format!("destination adapter address is invalid: {}", err),
					vec![],
				)
			}
			None => {
				return AutoFixStep::failed(
					SET_HYPERBRIDGE_CONFIG,
					format!("no active {} on {}", ContractType::AdapterHyperbridge, dest.caip2()),
					vec![],
				)
			}
		};

		let live = &status.hyperbridge;
		if live.configured
			&& encode_hex(&live.state_machine_id).eq_ignore_ascii_case(&state_machine_id)
			&& encode_hex(&live.destination_contract).eq_ignore_ascii_case(&destination_contract)
		{
			return AutoFixStep::skipped(SET_HYPERBRIDGE_CONFIG, "Hyperbridge route already configured");
		}

		let result = self
			.resolver
			.set_hyperbridge_config(
				&source.caip2(),
				&dest.caip2(),
				&state_machine_id,
				&destination_contract,
			)
			.await;
		write_step(
			SET_HYPERBRIDGE_CONFIG,
			format!(
				"state machine {} and destination {} set",
				state_machine_id, destination_contract
			),
			result,
		)
	}
}
