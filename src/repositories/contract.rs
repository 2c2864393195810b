//! Smart contract repository.

use std::{collections::HashMap, path::Path};
use uuid::Uuid;

use crate::{
	models::{ConfigLoader, ContractType, SmartContract},
	repositories::error::RepositoryError,
};

pub struct ContractRepository {
	/// Contracts in load order, which decides "first match wins" lookups
	contracts: Vec<SmartContract>,
	index: HashMap<Uuid, usize>,
}

impl ContractRepository {
	pub fn new(path: Option<&Path>) -> Result<Self, RepositoryError> {
		let mut loaded: Vec<(String, SmartContract)> = SmartContract::load_all(path).map_err(|e| {
			RepositoryError::load_error(format!("Failed to load contracts: {}", e))
		})?;
		// read_dir order is platform dependent
		loaded.sort_by(|a, b| a.0.cmp(&b.0));
		Self::from_contracts(loaded.into_iter().map(|(_, contract)| contract))
	}

	pub fn from_contracts(
		contracts: impl IntoIterator<Item = SmartContract>,
	) -> Result<Self, RepositoryError> {
		let contracts: Vec<SmartContract> = contracts.into_iter().collect();
		let mut index = HashMap::with_capacity(contracts.len());
		for (position, contract) in contracts.iter().enumerate() {
			if index.insert(contract.id, position).is_some() {
				return Err(RepositoryError::validation_error(format!(
					"Duplicate contract id {}",
					contract.id
				)));
			}
		}
		Ok(Self { contracts, index })
	}
}

/// Read access to deployed contracts
pub trait ContractRepositoryTrait: Send + Sync {
	fn get_by_id(&self, id: &Uuid) -> Option<SmartContract>;

	/// First active contract of `contract_type` on the chain
	fn get_active(&self, chain_uuid: &Uuid, contract_type: ContractType) -> Option<SmartContract>;

	/// Every active contract on the chain
	fn get_by_chain(&self, chain_uuid: &Uuid) -> Vec<SmartContract>;
}

impl ContractRepositoryTrait for ContractRepository {
	fn get_by_id(&self, id: &Uuid) -> Option<SmartContract> {
		self.index
			.get(id)
			.and_then(|position| self.contracts.get(*position))
			.cloned()
	}

	fn get_active(&self, chain_uuid: &Uuid, contract_type: ContractType) -> Option<SmartContract> {
		self.contracts
			.iter()
			.find(|c| c.is_active && c.chain_uuid == *chain_uuid && c.contract_type == contract_type)
			.cloned()
	}

	fn get_by_chain(&self, chain_uuid: &Uuid) -> Vec<SmartContract> {
		self.contracts
			.iter()
			.filter(|c| c.is_active && c.chain_uuid == *chain_uuid)
			.cloned()
			.collect()
	}
}
