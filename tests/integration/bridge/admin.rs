use alloy::dyn_abi::DynSolValue;
use std::sync::Arc;

use bridge_orchestrator::{
	models::{BridgeType, ContractType},
	services::{
		blockchain::BlockChainError,
		bridge::{BridgeError, BridgeStatusResolver},
	},
};

use crate::integration::mocks::{
	abis, bridge, calldata, resolver, selector, string, FakePool, Fixture,
	MockTransactionExecutor, BASE_RPC,
};

const DEST: &str = "eip155:10";
const PEER: &str = "0x000000000000000000000000000000000000000000000000000000000000beef";

fn admin(fixture: &Fixture, executor: MockTransactionExecutor) -> Arc<BridgeStatusResolver> {
	resolver(fixture.registry(), FakePool::unreachable(), Arc::new(executor))
}

fn rejecting() -> MockTransactionExecutor {
	let mut executor = MockTransactionExecutor::new();
	executor.expect_send_transaction().times(0);
	executor
}

fn resolver_without(fixture: &Fixture, contract_type: ContractType) -> Arc<BridgeStatusResolver> {
	resolver(
		fixture.registry_with(fixture.contracts_without(contract_type)),
		FakePool::unreachable(),
		Arc::new(rejecting()),
	)
}

#[tokio::test]
async fn test_register_adapter_submits_to_router() {
	let fixture = Fixture::new();
	let router = fixture.deployment.router;
	let adapter = fixture.deployment.ccip;
	let expected = calldata(
		&abis().router,
		"registerAdapter",
		&[
			string(DEST),
			bridge(BridgeType::Ccip),
			DynSolValue::Address(adapter),
		],
	);

	let mut executor = MockTransactionExecutor::new();
	executor
		.expect_send_transaction()
		.withf(move |rpc_url, to, data, value| {
			rpc_url.to_string() == BASE_RPC && *to == router && *data == expected && value.is_zero()
		})
		.times(1)
		.returning(|_, _, _, _| Ok("0xabc1".to_string()));

	let steps = admin(&fixture, executor)
		.register_adapter("8453", "10", BridgeType::Ccip, &adapter.to_string())
		.await
		.unwrap();

	assert_eq!(steps.len(), 1);
	assert_eq!(steps[0].method, "registerAdapter");
	assert_eq!(steps[0].tx_hash, "0xabc1");
}

#[tokio::test]
async fn test_register_adapter_rejects_bad_addresses() {
	let fixture = Fixture::new();
	let resolver = admin(&fixture, rejecting());

	for bad in ["", "0x1234", "not-an-address", "0x0000000000000000000000000000000000000000"] {
		let result = resolver
			.register_adapter("eip155:8453", DEST, BridgeType::Hyperbridge, bad)
			.await;
		assert!(
			matches!(result, Err(BridgeError::InvalidInput(_))),
			"{} should be rejected",
			bad
		);
	}
}

#[tokio::test]
async fn test_set_default_bridge_type_targets_gateway() {
	let fixture = Fixture::new();
	let gateway = fixture.deployment.gateway;
	let expected = calldata(
		&abis().gateway,
		"setDefaultBridgeType",
		&[string(DEST), bridge(BridgeType::LayerZero)],
	);

	let mut executor = MockTransactionExecutor::new();
	executor
		.expect_send_transaction()
		.withf(move |_, to, data, _| *to == gateway && *data == expected)
		.times(1)
		.returning(|_, _, _, _| Ok("0xd1".to_string()));

	let steps = admin(&fixture, executor)
		.set_default_bridge_type("eip155:8453", DEST, BridgeType::LayerZero)
		.await
		.unwrap();
	assert_eq!(steps[0].method, "setDefaultBridgeType");
}

#[tokio::test]
async fn test_hyperbridge_config_sends_two_transactions_in_order() {
	let fixture = Fixture::new();
	let hyperbridge = fixture.deployment.hyperbridge;
	let mut executor = MockTransactionExecutor::new();
	let mut seq = mockall::Sequence::new();
	let abi = abis();
	let first = selector(&abi.hyperbridge, "setStateMachineId");
	let second = selector(&abi.hyperbridge, "setDestinationContract");

	executor
		.expect_send_transaction()
		.withf(move |_, to, data, _| *to == hyperbridge && data[..4] == first)
		.times(1)
		.in_sequence(&mut seq)
		.returning(|_, _, _, _| Ok("0x01".to_string()));
	executor
		.expect_send_transaction()
		.withf(move |_, to, data, _| *to == hyperbridge && data[..4] == second)
		.times(1)
		.in_sequence(&mut seq)
		.returning(|_, _, _, _| Ok("0x02".to_string()));

	let steps = admin(&fixture, executor)
		.set_hyperbridge_config("eip155:8453", DEST, "0x45564d2d3130", "0xaabb")
		.await
		.unwrap();

	let hashes: Vec<_> = steps.iter().map(|step| step.tx_hash.as_str()).collect();
	assert_eq!(hashes, vec!["0x01", "0x02"]);
}

#[tokio::test]
async fn test_second_write_failure_reports_completed_steps() {
	let fixture = Fixture::new();
	let abi = abis();
	let first = selector(&abi.ccip, "setChainSelector");

	let mut executor = MockTransactionExecutor::new();
	executor
		.expect_send_transaction()
		.times(2)
		.returning(move |_, _, data, _| {
			if data[..4] == first {
				Ok("0xaaa".to_string())
			} else {
				Err(BlockChainError::transaction_error("nonce too low"))
			}
		});

	let err = admin(&fixture, executor)
		.set_ccip_config("eip155:8453", DEST, 3734403246176062136, "0xbeef")
		.await
		.unwrap_err();

	match err {
		BridgeError::PartialFailure { completed, message } => {
			assert_eq!(completed.len(), 1);
			assert_eq!(completed[0].method, "setChainSelector");
			assert_eq!(completed[0].tx_hash, "0xaaa");
			assert!(message.contains("setDestinationAdapter"));
		}
		other => panic!("expected partial failure, got {:?}", other),
	}
}

#[tokio::test]
async fn test_first_write_failure_is_plain_upstream_error() {
	let fixture = Fixture::new();
	let mut executor = MockTransactionExecutor::new();
	executor
		.expect_send_transaction()
		.times(1)
		.returning(|_, _, _, _| Err(BlockChainError::transaction_error("insufficient funds")));

	let err = admin(&fixture, executor)
		.set_hyperbridge_config("eip155:8453", DEST, "0x01", "0x02")
		.await
		.unwrap_err();

	assert!(matches!(err, BridgeError::Upstream(_)));
	assert!(err.completed_steps().is_empty());
}

#[tokio::test]
async fn test_layerzero_options_add_a_second_transaction() {
	let fixture = Fixture::new();
	let mut executor = MockTransactionExecutor::new();
	executor
		.expect_send_transaction()
		.times(3)
		.returning(|_, _, _, _| Ok("0xfe".to_string()));
	let resolver = admin(&fixture, executor);

	let steps = resolver
		.set_layerzero_config("eip155:8453", DEST, 30111, PEER, None)
		.await
		.unwrap();
	assert_eq!(steps.len(), 1);
	assert_eq!(steps[0].method, "setRoute");

	let steps = resolver
		.set_layerzero_config("eip155:8453", DEST, 30111, PEER, Some("0x00030100"))
		.await
		.unwrap();
	let methods: Vec<_> = steps.iter().map(|step| step.method.as_str()).collect();
	assert_eq!(methods, vec!["setRoute", "setEnforcedOptions"]);
}

#[tokio::test]
async fn test_invalid_write_inputs_send_nothing() {
	let fixture = Fixture::new();
	let resolver = admin(&fixture, rejecting());

	let checks = vec![
		resolver
			.set_hyperbridge_config("eip155:8453", DEST, "", "0x01")
			.await,
		resolver
			.set_hyperbridge_config("eip155:8453", DEST, "0x01", "zz")
			.await,
		resolver
			.set_ccip_config("eip155:8453", DEST, 0, "0x01")
			.await,
		resolver
			.set_ccip_config("eip155:8453", DEST, 1, "0x")
			.await,
		resolver
			.set_layerzero_config("eip155:8453", DEST, 0, PEER, None)
			.await,
		resolver
			.set_layerzero_config("eip155:8453", DEST, 30111, "0xbeef", None)
			.await,
		resolver
			.set_layerzero_config("eip155:8453", DEST, 30111, PEER, Some("0xz"))
			.await,
	];

	for result in checks {
		assert!(matches!(result, Err(BridgeError::InvalidInput(_))), "{:?}", result);
	}

	let zero_peer = format!("0x{}", "00".repeat(32));
	assert!(matches!(
		resolver
			.set_layerzero_config("eip155:8453", DEST, 30111, &zero_peer, None)
			.await,
		Err(BridgeError::InvalidInput(_))
	));
}

#[tokio::test]
async fn test_writes_need_an_evm_source_and_target_contract() {
	let fixture = Fixture::new();
	let resolver = admin(&fixture, rejecting());
	let solana = fixture.solana.caip2();

	assert!(matches!(
		resolver
			.set_default_bridge_type(&solana, DEST, BridgeType::Hyperbridge)
			.await,
		Err(BridgeError::UnsupportedChain(_))
	));

	let without_ccip = resolver_without(&fixture, ContractType::AdapterCcip);
	assert!(matches!(
		without_ccip
			.set_ccip_config("eip155:8453", DEST, 1, "0x01")
			.await,
		Err(BridgeError::ContractNotFound(_))
	));
}
