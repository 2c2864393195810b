//! Chain repository.

use std::{collections::HashMap, path::Path};
use uuid::Uuid;

use crate::{
	models::{Chain, ConfigLoader},
	repositories::error::RepositoryError,
};

/// In-memory chain registry keyed by chain UUID
pub struct ChainRepository {
	pub chains: HashMap<Uuid, Chain>,
}

impl ChainRepository {
	/// Loads every chain file from `path` (or the default directory)
	pub fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		let chains: Vec<(String, Chain)> = Chain::load_all(path)
			.map_err(|e| RepositoryError::load_error(format!("Failed to load chains: {}", e)))?;
		Self::from_chains(chains.into_iter().map(|(_, chain)| chain))
	}

	/// Builds the repository from already-loaded chains, rejecting duplicate ids
	pub fn from_chains(chains: impl IntoIterator<Item = Chain>) -> Result<Self, RepositoryError> {
		let mut by_id = HashMap::new();
		let mut caip2_ids = HashMap::new();
		for chain in chains {
			if let Some(other) = caip2_ids.insert(chain.caip2(), chain.id) {
				return Err(RepositoryError::validation_error(format!(
					"Chains {} and {} share the identifier {}",
					other,
					chain.id,
					chain.caip2()
				)));
			}
			if by_id.insert(chain.id, chain.clone()).is_some() {
				return Err(RepositoryError::validation_error(format!(
					"Duplicate chain id {}",
					chain.id
				)));
			}
		}
		Ok(Self { chains: by_id })
	}
}

/// Read access to chains
pub trait ChainRepositoryTrait: Send + Sync {
	fn get_by_id(&self, id: &Uuid) -> Option<Chain>;

	fn get_by_caip2(&self, caip2: &str) -> Option<Chain>;

	/// Chains whose native chain id equals `chain_id`, across chain types
	fn get_by_chain_id(&self, chain_id: &str) -> Vec<Chain>;

	fn get_all(&self) -> Vec<Chain>;
}

impl ChainRepositoryTrait for ChainRepository {
	fn get_by_id(&self, id: &Uuid) -> Option<Chain> {
		self.chains.get(id).cloned()
	}

	fn get_by_caip2(&self, caip2: &str) -> Option<Chain> {
		self.chains
			.values()
			.find(|chain| chain.caip2() == caip2)
			.cloned()
	}

	fn get_by_chain_id(&self, chain_id: &str) -> Vec<Chain> {
		let mut matches: Vec<Chain> = self
			.chains
			.values()
			.filter(|chain| chain.chain_id == chain_id)
			.cloned()
			.collect();
		matches.sort_by_key(|chain| chain.caip2());
		matches
	}

	fn get_all(&self) -> Vec<Chain> {
		let mut chains: Vec<Chain> = self.chains.values().cloned().collect();
		chains.sort_by_key(|chain| chain.caip2());
		chains
	}
}
