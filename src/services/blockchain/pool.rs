//! Client pool for EVM clients.
//!
//! Clients are cached per RPC URL and created lazily on first use. Lookups take a
//! read lock; only creating a missing client takes the write lock.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;

use crate::services::blockchain::{BlockChainError, EvmClient, EvmClientTrait};

/// Source of EVM clients, keyed by RPC URL
#[async_trait]
pub trait ClientPoolTrait: Send + Sync {
	async fn get_evm_client(&self, rpc_url: &str) -> Result<Arc<dyn EvmClientTrait>, BlockChainError>;
}

/// Thread-safe client storage indexed by RPC URL
pub struct ClientStorage<T: ?Sized> {
	clients: RwLock<HashMap<String, Arc<T>>>,
}

impl<T: ?Sized> ClientStorage<T> {
	pub fn new() -> Self {
		Self {
			clients: RwLock::new(HashMap::new()),
		}
	}

	pub async fn len(&self) -> usize {
		self.clients.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.len().await == 0
	}
}

impl<T: ?Sized> Default for ClientStorage<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Pool of HTTP-backed EVM clients
pub struct ClientPool {
	storage: ClientStorage<dyn EvmClientTrait>,
	timeout: Duration,
}

impl ClientPool {
	pub fn new(timeout: Duration) -> Self {
		Self {
			storage: ClientStorage::new(),
			timeout,
		}
	}

	/// Number of cached clients
	pub async fn client_count(&self) -> usize {
		self.storage.len().await
	}
}

#[async_trait]
impl ClientPoolTrait for ClientPool {
	async fn get_evm_client(&self, rpc_url: &str) -> Result<Arc<dyn EvmClientTrait>, BlockChainError> {
		// Fast path
		if let Some(client) = self.storage.clients.read().await.get(rpc_url) {
			return Ok(client.clone());
		}

		// Slow path; another task may have created the client meanwhile
		let mut clients = self.storage.clients.write().await;
		if let Some(client) = clients.get(rpc_url) {
			return Ok(client.clone());
		}

		let client: Arc<dyn EvmClientTrait> = Arc::new(
			EvmClient::new(rpc_url, self.timeout)
				.map_err(|e| BlockChainError::client_pool_error(e.to_string()))?,
		);
		clients.insert(rpc_url.to_string(), client.clone());
		Ok(client)
	}
}

impl Default for ClientPool {
	fn default() -> Self {
		Self::new(Duration::from_secs(30))
	}
}
