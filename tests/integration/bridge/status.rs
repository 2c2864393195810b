use alloy::primitives::{b256, Address};
use std::sync::Arc;

use bridge_orchestrator::{
	models::{BridgeType, ContractType, SmartContract},
	services::{
		blockchain::BlockChainError,
		bridge::{BridgeError, BridgeStatusResolver},
	},
};

use crate::integration::mocks::{
	abis, resolver, selector, FakeContracts, FakePool, Fixture, MockTransactionExecutor,
	RouteScript, BASE_RPC,
};

const DEST: &str = "eip155:10";

fn no_writes() -> Arc<MockTransactionExecutor> {
	Arc::new(MockTransactionExecutor::new())
}

fn resolver_for(fixture: &Fixture, fake: Arc<FakeContracts>) -> Arc<BridgeStatusResolver> {
	resolver(fixture.registry(), FakePool::with(fake), no_writes())
}

fn resolver_with_registry(fixture: &Fixture, contracts: Vec<SmartContract>) -> Arc<BridgeStatusResolver> {
	resolver(
		fixture.registry_with(contracts),
		FakePool::unreachable(),
		no_writes(),
	)
}

#[tokio::test]
async fn test_status_reads_every_adapter() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	let script = RouteScript::new(&fake, fixture.deployment, DEST);
	script
		.default_type(0)
		.registered(BridgeType::Hyperbridge)
		.registered(BridgeType::Ccip)
		.hyperbridge(Some(true), &[0x45, 0x56, 0x4d], &[0xaa; 20])
		.ccip(3734403246176062136, &[0xbb; 20]);

	let pool = FakePool::with(fake.clone());
	let resolver = resolver(fixture.registry(), pool.clone(), no_writes());
	let status = resolver.get_status("eip155:8453", DEST).await.unwrap();

	assert_eq!(status.source_chain_id, "eip155:8453");
	assert_eq!(status.dest_chain_id, DEST);
	assert_eq!(status.gateway_address, fixture.deployment.gateway);
	assert_eq!(status.router_address, fixture.deployment.router);
	assert_eq!(status.default_bridge_type, 0);
	assert_eq!(status.default_bridge_name, "HYPERBRIDGE");
	assert!(status.default_adapter_registered());
	assert_eq!(status.default_adapter_address, fixture.deployment.hyperbridge);

	assert_eq!(status.adapters.len(), 3);
	assert!(status.adapter(BridgeType::Ccip).has_adapter);
	assert!(!status.adapter(BridgeType::LayerZero).has_adapter);
	assert_eq!(status.adapter(BridgeType::LayerZero).address, Address::ZERO);

	assert!(status.hyperbridge.configured);
	assert_eq!(status.hyperbridge.state_machine_id.as_ref(), &[0x45, 0x56, 0x4d]);
	assert_eq!(status.ccip.chain_selector, 3734403246176062136);
	assert!(status.is_route_configured(BridgeType::Ccip));
	assert!(!status.is_route_configured(BridgeType::LayerZero));

	// no LayerZero adapter, no LayerZero reads
	let lz = &abis().layerzero;
	assert_eq!(fake.calls_with_selector(selector(lz, "dstEids")), 0);
	assert_eq!(fake.calls_with_selector(selector(lz, "isRouteConfigured")), 0);
	assert_eq!(pool.requested.lock().unwrap().as_slice(), &[BASE_RPC.to_string()]);
}

#[tokio::test]
async fn test_status_accepts_native_chain_ids() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST).default_type(1);

	let resolver = resolver(fixture.registry(), FakePool::with(fake), no_writes());
	let status = resolver.get_status("8453", "10").await.unwrap();

	assert_eq!(status.source_chain_id, "eip155:8453");
	assert_eq!(status.dest_chain_id, DEST);
	assert_eq!(status.default_bridge_name, "CCIP");
	assert!(!status.default_adapter_registered());
}

#[tokio::test]
async fn test_hyperbridge_configured_is_inferred_when_unavailable() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type(0)
		.registered(BridgeType::Hyperbridge)
		.hyperbridge(None, &[0x01], &[0x02]);

	let status = resolver_for(&fixture, fake)
		.get_status("eip155:8453", DEST)
		.await
		.unwrap();
	assert!(status.hyperbridge.configured);

	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type(0)
		.registered(BridgeType::Hyperbridge)
		.hyperbridge(None, &[0x01], &[]);

	let status = resolver_for(&fixture, fake)
		.get_status("eip155:8453", DEST)
		.await
		.unwrap();
	assert!(!status.hyperbridge.configured);
}

#[tokio::test]
async fn test_layerzero_peer_and_options_follow_the_eid() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	let peer = b256!("0x000000000000000000000000000000000000000000000000000000000000beef");
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type(2)
		.registered(BridgeType::LayerZero)
		.layerzero(true, 30111, peer, &[0x00, 0x03]);

	let status = resolver_for(&fixture, fake)
		.get_status("eip155:8453", DEST)
		.await
		.unwrap();

	assert!(status.layerzero.configured);
	assert_eq!(status.layerzero.dst_eid, 30111);
	assert_eq!(status.layerzero.peer, peer);
	assert_eq!(status.layerzero.options.as_ref(), &[0x00, 0x03]);
}

#[tokio::test]
async fn test_failing_adapter_reads_fall_back_to_zero() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	// registered, but every adapter getter reverts
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type(1)
		.registered(BridgeType::Ccip);

	let status = resolver_for(&fixture, fake)
		.get_status("eip155:8453", DEST)
		.await
		.unwrap();

	assert!(status.default_adapter_registered());
	assert_eq!(status.ccip.chain_selector, 0);
	assert!(status.ccip.destination_adapter.is_empty());
	assert!(!status.is_route_configured(BridgeType::Ccip));
}

#[tokio::test]
async fn test_default_type_failure_is_fatal() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.default_type_fails(BlockChainError::connection_error("timed out"));

	let result = resolver_for(&fixture, fake)
		.get_status("eip155:8453", DEST)
		.await;

	assert!(matches!(
		result,
		Err(BridgeError::Upstream(BlockChainError::ConnectionError(_)))
	));
}

#[tokio::test]
async fn test_unreachable_rpc_is_upstream_error() {
	let fixture = Fixture::new();
	let resolver = resolver(fixture.registry(), FakePool::unreachable(), no_writes());

	let result = resolver.get_status("eip155:8453", DEST).await;
	assert!(matches!(result, Err(BridgeError::Upstream(_))));
}

#[tokio::test]
async fn test_status_rejects_unusable_routes_before_any_rpc() {
	let fixture = Fixture::new();
	let pool = FakePool::with(FakeContracts::new());
	let resolver = resolver(fixture.registry(), pool.clone(), no_writes());

	let solana = fixture.solana.caip2();
	assert!(matches!(
		resolver.get_status(&solana, DEST).await,
		Err(BridgeError::UnsupportedChain(_))
	));
	assert!(matches!(
		resolver.get_status("eip155:1", DEST).await,
		Err(BridgeError::NotFound(_))
	));
	assert!(matches!(
		resolver.get_status("cosmos:hub", DEST).await,
		Err(BridgeError::InvalidInput(_))
	));
	assert!(matches!(
		resolver.get_status("", DEST).await,
		Err(BridgeError::InvalidInput(_))
	));

	let without_router =
		resolver_with_registry(&fixture, fixture.contracts_without(ContractType::Router));
	assert!(matches!(
		without_router.get_status("eip155:8453", DEST).await,
		Err(BridgeError::ContractNotFound(_))
	));

	assert!(pool.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_reaches_non_evm_destinations() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	let solana = fixture.solana.caip2();
	RouteScript::new(&fake, fixture.deployment, &solana)
		.default_type(0)
		.registered(BridgeType::Hyperbridge);

	let status = resolver_for(&fixture, fake.clone())
		.get_status("eip155:8453", &solana)
		.await
		.unwrap();
	assert_eq!(status.dest_chain_id, solana);
	assert!(status.default_adapter_registered());
	assert!(fake.total_calls() > 0);
}
