use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BridgeType, RouteErrorDecoded};

pub const ADAPTER_NOT_REGISTERED: &str = "ADAPTER_NOT_REGISTERED";
pub const HYPERBRIDGE_NOT_CONFIGURED: &str = "HYPERBRIDGE_NOT_CONFIGURED";
pub const CCIP_NOT_CONFIGURED: &str = "CCIP_NOT_CONFIGURED";
pub const LAYERZERO_NOT_CONFIGURED: &str = "LAYERZERO_NOT_CONFIGURED";
pub const FEE_QUOTE_FAILED: &str = "FEE_QUOTE_FAILED";
pub const RECHECK_FAILED: &str = "RECHECK_FAILED";

/// Issue code raised when a bridge type's destination parameters are missing.
pub fn not_configured_code(bridge_type: BridgeType) -> &'static str {
	match bridge_type {
		BridgeType::Hyperbridge => HYPERBRIDGE_NOT_CONFIGURED,
		BridgeType::Ccip => CCIP_NOT_CONFIGURED,
		BridgeType::LayerZero => LAYERZERO_NOT_CONFIGURED,
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteState {
	Ready,
	Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteIssue {
	pub code: String,
	pub message: String,
}

impl RouteIssue {
	pub fn new(code: &str, message: impl Into<String>) -> Self {
		Self {
			code: code.to_string(),
			message: message.into(),
		}
	}
}

/// Health verdict for one (source, destination) route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteStatus {
	pub source_chain_id: String,
	pub dest_chain_id: String,
	pub status: RouteState,
	pub default_bridge_type: Option<u8>,
	pub default_bridge_name: Option<String>,
	pub adapter_registered: bool,
	pub adapter_address: Option<String>,
	pub hyperbridge_configured: bool,
	pub ccip_configured: bool,
	pub layerzero_configured: bool,
	/// `None` when the probe was not run (adapter missing)
	pub fee_quote_healthy: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fee_quote_reason: Option<String>,
	pub issues: Vec<RouteIssue>,
	pub checked_at: DateTime<Utc>,
}

impl RouteStatus {
	/// Synthetic row for a route whose evaluation failed outright.
	pub fn failed(source_chain_id: String, dest_chain_id: String, message: String) -> Self {
		Self {
			source_chain_id,
			dest_chain_id,
			status: RouteState::Error,
			default_bridge_type: None,
			default_bridge_name: None,
			adapter_registered: false,
			adapter_address: None,
			hyperbridge_configured: false,
			ccip_configured: false,
			layerzero_configured: false,
			fee_quote_healthy: None,
			fee_quote_reason: None,
			issues: vec![RouteIssue::new(RECHECK_FAILED, message)],
			checked_at: Utc::now(),
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Pagination {
	pub offset: usize,
	/// Zero or negative returns everything from `offset`
	pub limit: i64,
}

impl Pagination {
	/// Returns the `[start, end)` window over `len` rows. Out-of-range offsets yield
	/// an empty page rather than an error.
	pub fn window(&self, len: usize) -> (usize, usize) {
		let start = self.offset.min(len);
		let end = if self.limit <= 0 {
			len
		} else {
			start.saturating_add(self.limit as usize).min(len)
		};
		(start, end)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverviewResult {
	pub routes: Vec<RouteStatus>,
	pub total: usize,
	pub offset: usize,
	pub limit: i64,
}

/// Readiness of one bridge type for a route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgePreflight {
	pub bridge_type: BridgeType,
	pub bridge_name: String,
	pub adapter_registered: bool,
	pub route_configured: bool,
	pub fee_quote_healthy: bool,
	pub ready: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_code: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_message: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub decoded_error: Option<RouteErrorDecoded>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreflightResult {
	pub source_chain_id: String,
	pub dest_chain_id: String,
	pub default_bridge_type: u8,
	pub default_bridge_name: String,
	pub policy_executable: bool,
	pub bridges: Vec<BridgePreflight>,
	pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
	Success,
	Skipped,
	Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoFixStep {
	pub step: String,
	pub status: StepStatus,
	pub message: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tx_hashes: Vec<String>,
}

impl AutoFixStep {
	pub fn success(step: &str, message: impl Into<String>, tx_hashes: Vec<String>) -> Self {
		Self {
			step: step.to_string(),
			status: StepStatus::Success,
			message: message.into(),
			tx_hashes,
		}
	}

	pub fn skipped(step: &str, message: impl Into<String>) -> Self {
		Self {
			step: step.to_string(),
			status: StepStatus::Skipped,
			message: message.into(),
			tx_hashes: vec![],
		}
	}

	pub fn failed(step: &str, message: impl Into<String>, tx_hashes: Vec<String>) -> Self {
		Self {
			step: step.to_string(),
			status: StepStatus::Failed,
			message: message.into(),
			tx_hashes,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoFixResult {
	pub source_chain_id: String,
	pub dest_chain_id: String,
	pub bridge_type: BridgeType,
	pub steps: Vec<AutoFixStep>,
}

impl AutoFixResult {
	pub fn has_failure(&self) -> bool {
		self.steps.iter().any(|step| step.status == StepStatus::Failed)
	}
}
