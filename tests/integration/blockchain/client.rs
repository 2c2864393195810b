use alloy::primitives::{address, Bytes};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

use bridge_orchestrator::services::blockchain::{
	BlockChainError, BlockchainTransport, ClientPool, ClientPoolTrait, EvmClient, EvmClientTrait,
	HttpTransportClient,
};

fn transport(url: &str) -> HttpTransportClient {
	HttpTransportClient::new(url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_transport_sends_json_rpc_envelope() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::Json(json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": "eth_blockNumber",
			"params": []
		})))
		.with_status(200)
		.with_body(json!({"jsonrpc": "2.0", "id": 1, "result": "0x10"}).to_string())
		.create_async()
		.await;

	let transport = transport(&server.url());
	let result = transport
		.send_raw_request::<serde_json::Value>("eth_blockNumber", None)
		.await
		.unwrap();

	assert_eq!(result, json!("0x10"));
	assert_eq!(transport.url(), server.url());
	mock.assert_async().await;
}

#[tokio::test]
async fn test_transport_maps_http_and_rpc_failures() {
	let mut server = Server::new_async().await;
	let transport = transport(&server.url());

	let unavailable = server
		.mock("POST", "/")
		.with_status(503)
		.create_async()
		.await;
	let result = transport
		.send_raw_request::<serde_json::Value>("eth_chainId", None)
		.await;
	assert!(matches!(result, Err(BlockChainError::RequestError(ref msg)) if msg.contains("503")));
	unavailable.remove_async().await;

	let unknown_method = server
		.mock("POST", "/")
		.with_status(200)
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"error": {"code": -32601, "message": "the method foo does not exist"}
			})
			.to_string(),
		)
		.create_async()
		.await;
	let result = transport
		.send_raw_request::<serde_json::Value>("foo", None)
		.await;
	assert!(matches!(result, Err(BlockChainError::RequestError(ref msg)) if msg.contains("-32601")));
	unknown_method.remove_async().await;

	server
		.mock("POST", "/")
		.with_status(200)
		.with_body(json!({"jsonrpc": "2.0", "id": 1}).to_string())
		.create_async()
		.await;
	let result = transport
		.send_raw_request::<serde_json::Value>("eth_chainId", None)
		.await;
	assert!(matches!(result, Err(BlockChainError::RequestError(ref msg)) if msg.contains("result")));
}

#[tokio::test]
async fn test_unreachable_node_is_a_connection_error() {
	// nothing listens on the discard port
	let transport = transport("http://127.0.0.1:9");
	let result = transport
		.send_raw_request::<serde_json::Value>("eth_chainId", None)
		.await;
	assert!(matches!(result, Err(BlockChainError::ConnectionError(_))));
}

#[tokio::test]
async fn test_call_view_returns_raw_output() {
	let mut server = Server::new_async().await;
	let to = address!("0x00000000000000000000000000000000000000a1");
	let mock = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({
			"method": "eth_call",
			"params": [{"to": to.to_string(), "data": "0x12345678"}, "latest"]
		})))
		.with_status(200)
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"result": "0x0000000000000000000000000000000000000000000000000000000000000001"
			})
			.to_string(),
		)
		.create_async()
		.await;

	let client = EvmClient::new_with_transport(transport(&server.url()));
	let output = client
		.call_view(to, Bytes::from(vec![0x12, 0x34, 0x56, 0x78]))
		.await
		.unwrap();

	assert_eq!(output.len(), 32);
	assert_eq!(output[31], 1);
	mock.assert_async().await;
}

#[tokio::test]
async fn test_call_view_surfaces_revert_data() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/")
		.with_status(200)
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"error": {"code": 3, "message": "execution reverted", "data": "0xdeadbeef"}
			})
			.to_string(),
		)
		.create_async()
		.await;

	let client = EvmClient::new_with_transport(transport(&server.url()));
	let err = client
		.call_view(address!("0x00000000000000000000000000000000000000a1"), Bytes::new())
		.await
		.unwrap_err();

	assert!(matches!(err, BlockChainError::Reverted { .. }));
	assert_eq!(err.revert_data(), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
}

#[tokio::test]
async fn test_chain_id_parses_hex_quantity() {
	let mut server = Server::new_async().await;
	server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "eth_chainId"})))
		.with_status(200)
		.with_body(json!({"jsonrpc": "2.0", "id": 1, "result": "0x2105"}).to_string())
		.create_async()
		.await;

	let client = EvmClient::new(&server.url(), Duration::from_secs(5)).unwrap();
	assert_eq!(client.chain_id().await.unwrap(), 8453);
}

#[tokio::test]
async fn test_pool_clients_reach_their_node() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(200)
		.with_body(json!({"jsonrpc": "2.0", "id": 1, "result": "0xa"}).to_string())
		.expect(2)
		.create_async()
		.await;

	let pool = ClientPool::new(Duration::from_secs(5));
	let first = pool.get_evm_client(&server.url()).await.unwrap();
	let second = pool.get_evm_client(&server.url()).await.unwrap();

	assert_eq!(first.chain_id().await.unwrap(), 10);
	assert_eq!(second.chain_id().await.unwrap(), 10);
	assert_eq!(pool.client_count().await, 1);
	mock.assert_async().await;
}
