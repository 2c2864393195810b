//! Network transport implementations for blockchain clients.
//!
//! A single JSON-RPC over HTTP transport is provided. Requests are never retried;
//! failures surface to the caller as [`BlockChainError`].

mod http;

pub use http::HttpTransportClient;

use serde::Serialize;
use serde_json::{json, Value};

use crate::services::blockchain::BlockChainError;

/// Base trait for all blockchain transport clients
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// URL requests are sent to
	fn url(&self) -> &str;

	/// Sends a JSON-RPC request and returns the `result` member of the response
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone + Serialize;

	/// Builds the JSON-RPC 2.0 envelope for a request
	fn customize_request<P>(&self, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.map(|p| p.into()).unwrap_or_else(|| json!([]))
		})
	}
}
