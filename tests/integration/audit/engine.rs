use alloy::primitives::{Address, B256};
use std::sync::Arc;

use bridge_orchestrator::{
	models::{BridgeType, CheckStatus, ContractConfigCheckResult, ContractType, SmartContract},
	services::{audit::ConfigAuditEngine, blockchain::BlockChainError, bridge::BridgeError},
};

use crate::integration::mocks::{abis, FakeContracts, FakePool, Fixture, RouteScript};

const DEST: &str = "eip155:10";

fn codes(result: &ContractConfigCheckResult) -> Vec<&str> {
	result.items.iter().map(|item| item.code.as_str()).collect()
}

fn onchain_codes(result: &ContractConfigCheckResult) -> Vec<&str> {
	result
		.items
		.iter()
		.filter(|item| item.destination.is_some())
		.map(|item| item.code.as_str())
		.collect()
}

/// Fixture contracts carrying the full interfaces the engine expects
fn complete_contracts(fixture: &Fixture) -> Vec<SmartContract> {
	let abis = abis();
	fixture
		.contracts
		.iter()
		.cloned()
		.map(|mut contract| {
			if let Some(abi) = abis.for_contract(contract.contract_type) {
				contract.abi = serde_json::to_string(abi).unwrap();
			}
			contract
		})
		.collect()
}

fn engine(fixture: &Fixture, contracts: Vec<SmartContract>, fake: Arc<FakeContracts>) -> ConfigAuditEngine {
	ConfigAuditEngine::new(fixture.registry_with(contracts), FakePool::with(fake), abis())
}

#[tokio::test]
async fn test_fully_configured_route_is_ok() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type(1)
		.registered(BridgeType::Ccip)
		.ccip(3734403246176062136, &[0xcc; 20]);

	let result = engine(&fixture, complete_contracts(&fixture), fake)
		.check("eip155:8453", Some(DEST))
		.await
		.unwrap();

	assert_eq!(result.source_chain_id, "eip155:8453");
	assert_eq!(result.dest_chain_id.as_deref(), Some(DEST));
	assert_eq!(
		onchain_codes(&result),
		vec![
			"CORE_CONTRACTS_PRESENT",
			"DEFAULT_BRIDGE_TYPE",
			"ADAPTER_REGISTERED",
			"CCIP_CONFIGURED"
		]
	);
	assert!(result
		.items
		.iter()
		.filter(|item| item.destination.is_none())
		.all(|item| item.code == "ABI_COMPLETE"));
	assert_eq!(result.overall_status, CheckStatus::Ok);
	assert_eq!(result.summary["ERROR"], 0);
	assert_eq!(result.summary["WARN"], 0);
	assert_eq!(result.summary["OK"], result.items.len());
}

#[tokio::test]
async fn test_empty_stored_abis_are_errors() {
	let fixture = Fixture::new();
	let result = engine(&fixture, fixture.contracts.clone(), FakeContracts::new())
		.check("eip155:8453", None)
		.await
		.unwrap();

	// six Base contracts, all with an empty ABI
	assert_eq!(codes(&result), vec!["ABI_INVALID"; 6]);
	assert!(result.items.iter().all(|item| item.contract.is_some()));
	assert_eq!(result.overall_status, CheckStatus::Error);
	assert_eq!(result.summary["ERROR"], 6);
}

#[tokio::test]
async fn test_unregistered_adapter_stops_the_sequence() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type(0)
		.adapter(BridgeType::Hyperbridge, true, Address::ZERO);

	let result = engine(&fixture, complete_contracts(&fixture), fake)
		.check("eip155:8453", Some(DEST))
		.await
		.unwrap();

	assert_eq!(
		onchain_codes(&result),
		vec!["CORE_CONTRACTS_PRESENT", "DEFAULT_BRIDGE_TYPE", "ADAPTER_NOT_REGISTERED"]
	);
	assert_eq!(result.overall_status, CheckStatus::Error);
}

#[tokio::test]
async fn test_unknown_default_bridge_type() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST).default_type(7);

	let result = engine(&fixture, complete_contracts(&fixture), fake)
		.check("eip155:8453", Some(DEST))
		.await
		.unwrap();

	assert_eq!(
		onchain_codes(&result),
		vec!["CORE_CONTRACTS_PRESENT", "UNKNOWN_BRIDGE_TYPE"]
	);
	let unknown = result.items.last().unwrap();
	assert!(unknown.message.contains('7'));
}

#[tokio::test]
async fn test_hyperbridge_falls_back_to_stored_ids() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type(0)
		.registered(BridgeType::Hyperbridge)
		.hyperbridge(None, b"EVM-10", &[0x11; 32]);

	let result = engine(&fixture, complete_contracts(&fixture), fake)
		.check("eip155:8453", Some(DEST))
		.await
		.unwrap();

	assert_eq!(onchain_codes(&result).last(), Some(&"HYPERBRIDGE_CONFIGURED"));
	assert_eq!(result.overall_status, CheckStatus::Ok);
}

#[tokio::test]
async fn test_layerzero_route_not_configured() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type(2)
		.registered(BridgeType::LayerZero)
		.layerzero(true, 0, B256::ZERO, &[]);

	let result = engine(&fixture, complete_contracts(&fixture), fake)
		.check("eip155:8453", Some(DEST))
		.await
		.unwrap();

	let last = result.items.last().unwrap();
	assert_eq!(last.code, "LAYERZERO_NOT_CONFIGURED");
	assert_eq!(last.status, CheckStatus::Error);
	assert_eq!(last.destination.as_deref(), Some(DEST));
}

#[tokio::test]
async fn test_rpc_failure_truncates_into_one_item() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type_fails(BlockChainError::connection_error("connection refused"));

	let result = engine(&fixture, complete_contracts(&fixture), fake)
		.check("eip155:8453", Some(DEST))
		.await
		.unwrap();

	assert_eq!(
		onchain_codes(&result),
		vec!["CORE_CONTRACTS_PRESENT", "ONCHAIN_CHECK_FAILED"]
	);
	let failed = result.items.last().unwrap();
	assert!(failed.message.starts_with("defaultBridgeTypes failed:"));
	assert!(failed.message.contains("connection refused"));
}

#[tokio::test]
async fn test_missing_router_is_reported_without_rpc() {
	let fixture = Fixture::new();
	let contracts = fixture.contracts_without(ContractType::Router);
	let engine = ConfigAuditEngine::new(
		fixture.registry_with(contracts),
		FakePool::unreachable(),
		abis(),
	);

	let result = engine.check("eip155:8453", Some(DEST)).await.unwrap();
	assert_eq!(onchain_codes(&result), vec!["ROUTER_MISSING"]);
}

#[tokio::test]
async fn test_non_evm_source_skips_onchain_checks() {
	let fixture = Fixture::new();
	let pool = FakePool::with(FakeContracts::new());
	let engine = ConfigAuditEngine::new(fixture.registry(), pool.clone(), abis());
	let solana = fixture.solana.caip2();

	let result = engine.check(&solana, Some(DEST)).await.unwrap();

	assert_eq!(codes(&result), vec!["ABI_INVALID", "ONCHAIN_CHECK_SKIPPED"]);
	assert_eq!(result.items[1].status, CheckStatus::Warn);
	assert!(pool.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_check_by_contract_id_covers_every_other_chain() {
	let fixture = Fixture::new();
	let contracts = complete_contracts(&fixture);
	let gateway = contracts
		.iter()
		.find(|c| c.chain_uuid == fixture.base.id && c.contract_type == ContractType::Gateway)
		.unwrap()
		.clone();
	let engine = engine(&fixture, contracts, FakeContracts::new());

	let result = engine
		.check_by_contract_id(&gateway.id.to_string())
		.await
		.unwrap();

	assert_eq!(result.contract_id, Some(gateway.id));
	assert_eq!(result.dest_chain_id, None);
	assert_eq!(result.items[0].code, "ABI_COMPLETE");

	let mut destinations: Vec<_> = result
		.items
		.iter()
		.filter(|item| item.code == "ONCHAIN_CHECK_FAILED")
		.filter_map(|item| item.destination.clone())
		.collect();
	destinations.sort();
	let mut expected = vec![
		fixture.optimism.caip2(),
		fixture.solana.caip2(),
		fixture.polkadot.caip2(),
	];
	expected.sort();
	assert_eq!(destinations, expected);
}

#[tokio::test]
async fn test_check_by_contract_id_rejects_bad_ids() {
	let fixture = Fixture::new();
	let engine = engine(&fixture, fixture.contracts.clone(), FakeContracts::new());

	assert!(matches!(
		engine.check_by_contract_id("not-a-uuid").await,
		Err(BridgeError::InvalidInput(_))
	));
	assert!(matches!(
		engine
			.check_by_contract_id("00000000-0000-0000-0000-000000000000")
			.await,
		Err(BridgeError::NotFound(_))
	));
	assert!(matches!(
		engine.check("eip155:999", None).await,
		Err(BridgeError::NotFound(_))
	));
}
