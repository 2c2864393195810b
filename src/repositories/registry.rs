//! Registry service combining the chain, contract and token repositories.

use std::{path::Path, sync::Arc};
use uuid::Uuid;

use crate::{
	models::{Chain, ChainType, ContractType, SmartContract, Token},
	repositories::{
		chain::{ChainRepository, ChainRepositoryTrait},
		contract::{ContractRepository, ContractRepositoryTrait},
		error::RepositoryError,
		token::{TokenRepository, TokenRepositoryTrait},
	},
	utils::codec::parse_caip2,
};

/// Read-only view over the registry used by every service.
///
/// Cheap to clone; the repositories are shared.
#[derive(Clone)]
pub struct RegistryService {
	chains: Arc<dyn ChainRepositoryTrait>,
	contracts: Arc<dyn ContractRepositoryTrait>,
	tokens: Arc<dyn TokenRepositoryTrait>,
}

impl RegistryService {
	pub fn new(
		chains: Arc<dyn ChainRepositoryTrait>,
		contracts: Arc<dyn ContractRepositoryTrait>,
		tokens: Arc<dyn TokenRepositoryTrait>,
	) -> Self {
		Self {
			chains,
			contracts,
			tokens,
		}
	}

	/// Loads all three repositories from `<config_dir>/{chains,contracts,tokens}`
	pub fn new_with_path(config_dir: &Path) -> Result<Self, RepositoryError> {
		let chains = ChainRepository::new(Some(&config_dir.join("chains")))?;
		let contracts = ContractRepository::new(Some(&config_dir.join("contracts")))?;
		let tokens = TokenRepository::new(Some(&config_dir.join("tokens")))?;
		Ok(Self::new(
			Arc::new(chains),
			Arc::new(contracts),
			Arc::new(tokens),
		))
	}

	/// Resolves a chain identifier.
	///
	/// Accepts a CAIP-2 id (`eip155:8453`), a registry UUID or a native chain id
	/// (`8453`). A native id shared by several chain types resolves to the EVM chain
	/// first, then to the lowest CAIP-2 id.
	pub fn resolve_chain(&self, id: &str) -> Result<Chain, RepositoryError> {
		let id = id.trim();
		if id.is_empty() {
			return Err(RepositoryError::validation_error("chain id must not be empty"));
		}

		if id.contains(':') {
			let caip2 = parse_caip2(id)
				.map_err(|e| RepositoryError::validation_error(format!("{}: {}", id, e)))?;
			if ChainType::from_caip2_namespace(&caip2.namespace).is_none() {
				return Err(RepositoryError::validation_error(format!(
					"unsupported CAIP-2 namespace {}",
					caip2.namespace
				)));
			}
			return self
				.chains
				.get_by_caip2(id)
				.ok_or_else(|| RepositoryError::not_found(format!("chain {}", id)));
		}

		if let Ok(uuid) = Uuid::parse_str(id) {
			if let Some(chain) = self.chains.get_by_id(&uuid) {
				return Ok(chain);
			}
		}

		let mut candidates = self.chains.get_by_chain_id(id);
		if let Some(position) = candidates.iter().position(Chain::is_evm) {
			return Ok(candidates.swap_remove(position));
		}
		candidates
			.into_iter()
			.next()
			.ok_or_else(|| RepositoryError::not_found(format!("chain {}", id)))
	}

	pub fn chain_by_id(&self, id: &Uuid) -> Option<Chain> {
		self.chains.get_by_id(id)
	}

	/// Active chains ordered by CAIP-2 id
	pub fn active_chains(&self) -> Vec<Chain> {
		self.chains
			.get_all()
			.into_iter()
			.filter(|chain| chain.is_active)
			.collect()
	}

	pub fn active_contract(&self, chain: &Chain, contract_type: ContractType) -> Option<SmartContract> {
		self.contracts.get_active(&chain.id, contract_type)
	}

	pub fn chain_contracts(&self, chain: &Chain) -> Vec<SmartContract> {
		self.contracts.get_by_chain(&chain.id)
	}

	pub fn contract(&self, id: &Uuid) -> Option<SmartContract> {
		self.contracts.get_by_id(id)
	}

	pub fn token(&self, id: &Uuid) -> Option<Token> {
		self.tokens.get_by_id(id)
	}
}
