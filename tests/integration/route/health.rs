use alloy::{
	dyn_abi::DynSolValue,
	primitives::{Address, B256, U256},
};
use std::sync::Arc;

use bridge_orchestrator::{
	models::{BridgeType, ContractType, SmartContract},
	services::{
		route::{FeeQuoteHealthProbe, RouterFeeQuoteProbe},
		revert::RevertDecoder,
	},
};

use crate::integration::mocks::{
	abis, calldata, output, selector, string, FakeContracts, FakePool, Fixture, RouteScript,
};

const DEST: &str = "eip155:10";

fn amount() -> U256 {
	U256::from(1_000_000u64)
}

fn probe_with(fixture: &Fixture, contracts: Vec<SmartContract>, fake: Arc<FakeContracts>) -> RouterFeeQuoteProbe {
	RouterFeeQuoteProbe::new(
		fixture.registry_with(contracts),
		FakePool::with(fake),
		abis(),
		RevertDecoder::default(),
		amount(),
	)
}

fn probe(fixture: &Fixture, fake: Arc<FakeContracts>) -> RouterFeeQuoteProbe {
	probe_with(fixture, fixture.contracts.clone(), fake)
}

fn error_string(reason: &str) -> Vec<u8> {
	let mut data = vec![0x08, 0xc3, 0x79, 0xa0];
	data.extend_from_slice(&output(vec![string(reason)]));
	data
}

#[tokio::test]
async fn test_safe_quote_success_is_healthy() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.registered(BridgeType::Hyperbridge)
		.runtime_ready(BridgeType::Hyperbridge, true)
		.safe_quote(BridgeType::Hyperbridge, amount(), true, U256::from(1234u64), "");

	let health = probe(&fixture, fake.clone())
		.probe(&fixture.base, &fixture.optimism, BridgeType::Hyperbridge)
		.await;

	assert!(health.healthy);
	assert_eq!(health.fee, Some(U256::from(1234u64)));
	assert_eq!(health.reason, None);
	assert_eq!(fake.calls_with_selector(selector(&abis().router, "quotePaymentFee")), 0);
}

#[tokio::test]
async fn test_safe_quote_reason_is_reported() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.registered(BridgeType::Ccip)
		.runtime_ready(BridgeType::Ccip, true)
		.safe_quote(BridgeType::Ccip, amount(), false, U256::ZERO, "  lane paused ");

	let health = probe(&fixture, fake.clone())
		.probe(&fixture.base, &fixture.optimism, BridgeType::Ccip)
		.await;

	assert!(!health.healthy);
	assert_eq!(health.reason.as_deref(), Some("lane paused"));
	assert_eq!(fake.calls_with_selector(selector(&abis().router, "quotePaymentFee")), 0);
}

#[tokio::test]
async fn test_falls_back_to_raw_quote_when_safe_quote_reverts() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.registered(BridgeType::Hyperbridge)
		.runtime_ready(BridgeType::Hyperbridge, true)
		.raw_quote(BridgeType::Hyperbridge, amount(), U256::from(99u64));

	let health = probe(&fixture, fake)
		.probe(&fixture.base, &fixture.optimism, BridgeType::Hyperbridge)
		.await;

	assert!(health.healthy);
	assert_eq!(health.fee, Some(U256::from(99u64)));
}

#[tokio::test]
async fn test_falls_back_when_safe_quote_gives_no_reason() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.registered(BridgeType::Hyperbridge)
		.runtime_ready(BridgeType::Hyperbridge, true)
		.safe_quote(BridgeType::Hyperbridge, amount(), false, U256::ZERO, "")
		.raw_quote_reverts(BridgeType::Hyperbridge, amount(), error_string("no route to eip155:10"));

	let health = probe(&fixture, fake)
		.probe(&fixture.base, &fixture.optimism, BridgeType::Hyperbridge)
		.await;

	assert!(!health.healthy);
	assert_eq!(health.reason.as_deref(), Some("no route to eip155:10"));
	let decoded = health.decoded_error.unwrap();
	assert_eq!(decoded.name.as_deref(), Some("Error"));
	assert_eq!(decoded.selector.as_deref(), Some("0x08c379a0"));
}

#[tokio::test]
async fn test_unauthorized_adapter_is_unhealthy_before_quoting() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.registered(BridgeType::Hyperbridge)
		.runtime_ready(BridgeType::Hyperbridge, false);

	let health = probe(&fixture, fake.clone())
		.probe(&fixture.base, &fixture.optimism, BridgeType::Hyperbridge)
		.await;

	assert!(!health.healthy);
	assert!(health.reason.unwrap().contains("not an authorized spender"));
	let router = abis().router.clone();
	assert_eq!(fake.calls_with_selector(selector(&router, "quotePaymentFeeSafe")), 0);
	assert_eq!(fake.calls_with_selector(selector(&router, "quotePaymentFee")), 0);
}

#[tokio::test]
async fn test_mismatched_vaults_are_unhealthy() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	let script = RouteScript::new(&fake, fixture.deployment, DEST);
	script
		.registered(BridgeType::Ccip)
		.runtime_ready(BridgeType::Ccip, true);
	// the adapter points at a different vault
	fake.respond(
		fixture.deployment.ccip,
		calldata(&script.abis.ccip, "vault", &[]),
		output(vec![DynSolValue::Address(Address::repeat_byte(0x77))]),
	);

	let health = probe(&fixture, fake)
		.probe(&fixture.base, &fixture.optimism, BridgeType::Ccip)
		.await;

	assert!(!health.healthy);
	assert!(health.reason.unwrap().contains("does not match Gateway vault"));
}

#[tokio::test]
async fn test_layerzero_skips_the_vault_checks() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.layerzero(true, 30111, B256::repeat_byte(0x01), &[])
		.safe_quote(BridgeType::LayerZero, amount(), true, U256::from(7u64), "");

	let health = probe(&fixture, fake.clone())
		.probe(&fixture.base, &fixture.optimism, BridgeType::LayerZero)
		.await;

	assert!(health.healthy);
	assert_eq!(fake.calls_with_selector(selector(&abis().gateway, "vault")), 0);
}

#[tokio::test]
async fn test_router_abi_without_safe_quote_uses_raw_quote() {
	let fixture = Fixture::new();
	let fake = FakeContracts::new();
	RouteScript::new(&fake, fixture.deployment, DEST)
		.registered(BridgeType::Hyperbridge)
		.runtime_ready(BridgeType::Hyperbridge, true)
		.safe_quote(BridgeType::Hyperbridge, amount(), true, U256::from(1u64), "")
		.raw_quote(BridgeType::Hyperbridge, amount(), U256::from(2u64));

	let contracts = fixture
		.contracts
		.iter()
		.cloned()
		.map(|mut contract| {
			if contract.contract_type == ContractType::Router {
				contract.abi = r#"[{"type":"function","name":"quotePaymentFee","inputs":[{"name":"destChainId","type":"string"},{"name":"bridgeType","type":"uint8"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"}]"#.to_string();
			}
			contract
		})
		.collect();

	let health = probe_with(&fixture, contracts, fake.clone())
		.probe(&fixture.base, &fixture.optimism, BridgeType::Hyperbridge)
		.await;

	assert_eq!(health.fee, Some(U256::from(2u64)));
	assert_eq!(fake.calls_with_selector(selector(&abis().router, "quotePaymentFeeSafe")), 0);
}

#[tokio::test]
async fn test_unreachable_rpc_is_unhealthy() {
	let fixture = Fixture::new();
	let probe = RouterFeeQuoteProbe::new(
		fixture.registry(),
		FakePool::unreachable(),
		abis(),
		RevertDecoder::default(),
		amount(),
	);

	let health = probe
		.probe(&fixture.base, &fixture.optimism, BridgeType::Ccip)
		.await;
	assert!(!health.healthy);
	assert!(health.reason.unwrap().contains("unreachable"));
}
