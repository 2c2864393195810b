use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::models::{ContractType, SmartContract};

/// Severity of a single audit item. Ordered so that `max` yields the overall status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
	Ok,
	Warn,
	Error,
}

impl CheckStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			CheckStatus::Ok => "OK",
			CheckStatus::Warn => "WARN",
			CheckStatus::Error => "ERROR",
		}
	}
}

/// Contract an audit item refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractRef {
	pub id: Uuid,
	pub contract_type: ContractType,
	pub address: String,
}

impl From<&SmartContract> for ContractRef {
	fn from(contract: &SmartContract) -> Self {
		Self {
			id: contract.id,
			contract_type: contract.contract_type,
			address: contract.contract_address.clone(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractConfigCheckItem {
	pub code: String,
	pub status: CheckStatus,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contract: Option<ContractRef>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub destination: Option<String>,
}

impl ContractConfigCheckItem {
	pub fn new(code: &str, status: CheckStatus, message: impl Into<String>) -> Self {
		Self {
			code: code.to_string(),
			status,
			message: message.into(),
			contract: None,
			destination: None,
		}
	}

	pub fn ok(code: &str, message: impl Into<String>) -> Self {
		Self::new(code, CheckStatus::Ok, message)
	}

	pub fn warn(code: &str, message: impl Into<String>) -> Self {
		Self::new(code, CheckStatus::Warn, message)
	}

	pub fn error(code: &str, message: impl Into<String>) -> Self {
		Self::new(code, CheckStatus::Error, message)
	}

	pub fn with_contract(mut self, contract: &SmartContract) -> Self {
		self.contract = Some(ContractRef::from(contract));
		self
	}

	pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
		self.destination = Some(destination.into());
		self
	}
}

/// Audit report for one source chain (and optionally one destination).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractConfigCheckResult {
	pub source_chain_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dest_chain_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contract_id: Option<Uuid>,
	pub overall_status: CheckStatus,
	pub summary: BTreeMap<String, usize>,
	pub items: Vec<ContractConfigCheckItem>,
	pub checked_at: DateTime<Utc>,
}

impl ContractConfigCheckResult {
	pub fn new(
		source_chain_id: String,
		dest_chain_id: Option<String>,
		contract_id: Option<Uuid>,
		items: Vec<ContractConfigCheckItem>,
	) -> Self {
		Self {
			source_chain_id,
			dest_chain_id,
			contract_id,
			overall_status: overall_status(&items),
			summary: summarize(&items),
			items,
			checked_at: Utc::now(),
		}
	}
}

/// ERROR if any item is ERROR, else WARN if any is WARN, else OK.
pub fn overall_status(items: &[ContractConfigCheckItem]) -> CheckStatus {
	items
		.iter()
		.map(|item| item.status)
		.max()
		.unwrap_or(CheckStatus::Ok)
}

/// Counts items per status; all three statuses are always present.
pub fn summarize(items: &[ContractConfigCheckItem]) -> BTreeMap<String, usize> {
	let mut summary: BTreeMap<String, usize> = [CheckStatus::Ok, CheckStatus::Warn, CheckStatus::Error]
		.iter()
		.map(|status| (status.as_str().to_string(), 0))
		.collect();
	for item in items {
		*summary.entry(item.status.as_str().to_string()).or_default() += 1;
	}
	summary
}
