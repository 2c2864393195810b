//! Domain models and data structures for bridge orchestration.
//!
//! - `config`: Configuration loading and validation
//! - `core`: Registry models (Chain, SmartContract, Token, BridgeType)
//! - `reports`: Derived reports returned by the services

mod config;
mod core;
mod reports;

pub use core::{
	bridge_name, BridgeType, Chain, ChainRpc, ChainType, ContractType, SmartContract, Token,
};

pub use reports::{
	not_configured_code, overall_status, summarize, AdapterRegistration, AutoFixResult,
	AutoFixStep, BridgePreflight, CcipConfig, CheckStatus, ContractConfigCheckItem,
	ContractConfigCheckResult, ContractRef, EvmCall, EvmPayload, HyperbridgeConfig,
	LayerZeroConfig, OnchainAdapterStatus, OverviewResult, Pagination, PaymentPayloadRequest,
	PreflightResult, RouteErrorDecoded, RouteIssue, RouteState, RouteStatus, StepStatus,
	SvmPayload, TransactionPayload, ADAPTER_NOT_REGISTERED, CCIP_NOT_CONFIGURED,
	FEE_QUOTE_FAILED, HYPERBRIDGE_NOT_CONFIGURED, LAYERZERO_NOT_CONFIGURED, RECHECK_FAILED,
};

pub use config::{AppConfig, ConfigError, ConfigLoader, FeeConfig};
