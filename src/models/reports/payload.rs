use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::BridgeType;

/// Input for building an outbound payment transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentPayloadRequest {
	pub source_chain_id: String,
	pub dest_chain_id: String,
	/// Token being paid with on the source chain
	pub source_token_id: Uuid,
	/// Token address expected on the destination chain
	pub dest_token_address: String,
	pub receiver: String,
	/// Human-readable decimal amount (e.g. `"100.5"`)
	pub amount: String,
	/// Explicit bridge fallback order; empty means "ask the Gateway"
	#[serde(default)]
	pub bridge_policy: Vec<BridgeType>,
}

/// One contract call the payer has to sign on an EVM chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvmCall {
	pub method: String,
	pub to: String,
	pub data: String,
	/// Native value in wei, decimal string
	pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvmPayload {
	pub chain_id: String,
	pub calls: Vec<EvmCall>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bridge_type: Option<BridgeType>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bridge_fee: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub approval_amount: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SvmPayload {
	pub chain_id: String,
	pub program_id: String,
	pub instruction: String,
	/// Base58 encoded instruction data
	pub data: String,
	pub discriminator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "chain_type", rename_all = "UPPERCASE")]
pub enum TransactionPayload {
	Evm(EvmPayload),
	Svm(SvmPayload),
}
