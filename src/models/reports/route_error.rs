use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured view of raw EVM revert data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteErrorDecoded {
	pub raw_hex: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub selector: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<BTreeMap<String, String>>,
}
