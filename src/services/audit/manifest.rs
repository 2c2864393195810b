//! Functions a stored contract ABI must expose, per contract type.

use alloy::json_abi::JsonAbi;

use crate::models::ContractType;

/// Required function names for `contract_type`. Empty means no ABI check applies.
pub fn required_functions(contract_type: ContractType) -> &'static [&'static str] {
	match contract_type {
		ContractType::Gateway => &[
			"createPayment",
			"createPaymentRequest",
			"setDefaultBridgeType",
			"defaultBridgeTypes",
		],
		ContractType::Router => &["registerAdapter", "hasAdapter", "getAdapter", "quotePaymentFee"],
		ContractType::Vault => &["isAuthorizedSpender", "setAuthorizedSpender"],
		ContractType::TokenRegistry => &["isTokenSupported", "setTokenSupport"],
		ContractType::TokenSwapper => &["swap", "quoteSwap"],
		ContractType::AdapterHyperbridge => &[
			"stateMachineIds",
			"destinationContracts",
			"setStateMachineId",
			"setDestinationContract",
		],
		ContractType::AdapterCcip => &[
			"chainSelectors",
			"destinationAdapters",
			"setChainSelector",
			"setDestinationAdapter",
		],
		ContractType::AdapterLayerZero => &["isRouteConfigured", "dstEids", "peers", "setRoute"],
		ContractType::Pool => &[],
	}
}

/// Required functions of `contract_type` that `abi` lacks, in table order
pub fn missing_functions(contract_type: ContractType, abi: &JsonAbi) -> Vec<&'static str> {
	required_functions(contract_type)
		.iter()
		.copied()
		.filter(|name| abi.function(name).is_none())
		.collect()
}
