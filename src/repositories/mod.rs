//! Read-only registry repositories.
//!
//! Chains, contracts and tokens are loaded once from JSON configuration and served
//! from memory. Services go through [`RegistryService`].

mod chain;
mod contract;
mod error;
mod registry;
mod token;

pub use chain::{ChainRepository, ChainRepositoryTrait};
pub use contract::{ContractRepository, ContractRepositoryTrait};
pub use error::RepositoryError;
pub use registry::RegistryService;
pub use token::{TokenRepository, TokenRepositoryTrait};
