//! HTTP transport implementation for JSON-RPC nodes.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::services::blockchain::{transports::BlockchainTransport, BlockChainError};

/// JSON-RPC error code geth and most clients use for reverted calls
const EXECUTION_REVERTED_CODE: i64 = 3;

/// JSON-RPC over HTTP with a request timeout and no retries.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	client: Client,
	url: String,
}

impl HttpTransportClient {
	/// Creates a transport for `url`. No request is sent until the first call.
	pub fn new(url: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		let parsed = Url::parse(url)
			.map_err(|e| BlockChainError::connection_error(format!("Invalid RPC URL {}: {}", url, e)))?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(BlockChainError::connection_error(format!(
				"Unsupported RPC URL scheme {}",
				parsed.scheme()
			)));
		}

		let client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(timeout)
			.connect_timeout(timeout)
			.build()
			.map_err(|e| BlockChainError::internal_error(format!("Failed to create HTTP client: {}", e)))?;

		Ok(Self {
			client,
			url: url.to_string(),
		})
	}
}

/// Extracts hex revert data from a JSON-RPC error `data` member.
///
/// Nodes return either the hex string directly or an object wrapping it.
fn extract_revert_data(data: Option<&Value>) -> Option<Vec<u8>> {
	let raw = match data? {
		Value::String(s) => s.as_str(),
		Value::Object(map) => map.get("data")?.as_str()?,
		_ => return None,
	};
	let stripped = raw.strip_prefix("0x")?;
	hex::decode(stripped).ok()
}

/// Maps a JSON-RPC `error` member to a [`BlockChainError`]
fn map_rpc_error(error: &Value) -> BlockChainError {
	let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
	let message = error
		.get("message")
		.and_then(Value::as_str)
		.unwrap_or("unknown JSON-RPC error")
		.to_string();
	let data = extract_revert_data(error.get("data"));

	if code == EXECUTION_REVERTED_CODE || data.is_some() || message.contains("revert") {
		BlockChainError::reverted(message, data)
	} else {
		BlockChainError::request_error(format!("JSON-RPC error {}: {}", code, message))
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	fn url(&self) -> &str {
		&self.url
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let request = self.customize_request(method, params);
		tracing::trace!(method, url = %self.url, "Sending JSON-RPC request");

		let response = self.client.post(&self.url).json(&request).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(BlockChainError::request_error(format!(
				"HTTP {} from {}",
				status, self.url
			)));
		}

		let body: Value = response.json().await.map_err(|e| {
			BlockChainError::request_error(format!("Invalid JSON-RPC response: {}", e))
		})?;

		if let Some(error) = body.get("error") {
			return Err(map_rpc_error(error));
		}

		body.get("result")
			.cloned()
			.ok_or_else(|| BlockChainError::request_error("Missing 'result' field"))
	}
}
