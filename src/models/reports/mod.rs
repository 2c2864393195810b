//! Derived reports produced by the services.
//!
//! Nothing here is persisted; every value is rebuilt from a fresh on-chain read.

mod adapter_status;
mod config_check;
mod payload;
mod route;
mod route_error;

pub use adapter_status::{
	AdapterRegistration, CcipConfig, HyperbridgeConfig, LayerZeroConfig, OnchainAdapterStatus,
};
pub use config_check::{
	overall_status, summarize, CheckStatus, ContractConfigCheckItem, ContractConfigCheckResult,
	ContractRef,
};
pub use payload::{EvmCall, EvmPayload, PaymentPayloadRequest, SvmPayload, TransactionPayload};
pub use route::{
	not_configured_code, AutoFixResult, AutoFixStep, BridgePreflight, OverviewResult, Pagination,
	PreflightResult, RouteIssue, RouteState, RouteStatus, StepStatus, ADAPTER_NOT_REGISTERED,
	CCIP_NOT_CONFIGURED, FEE_QUOTE_FAILED, HYPERBRIDGE_NOT_CONFIGURED, LAYERZERO_NOT_CONFIGURED,
	RECHECK_FAILED,
};
pub use route_error::RouteErrorDecoded;
