//! Bootstrap module for initializing services.
//!
//! Builds the registry from the configuration directory and wires every service
//! around one client pool, one ABI registry and one transaction executor.
//!
//! # Services
//! - `BridgeStatusResolver`: adapter status and validated admin writes
//! - `RouteHealthOrchestrator`: recheck, overview, preflight and auto-fix
//! - `ConfigAuditEngine`: contract configuration audit
//! - `PayloadBuilder`: outbound payment payloads
//! - `RevertDecoder`: revert data decoding

use std::{error::Error, sync::Arc};
use tracing::{info, warn};

use crate::{
	models::AppConfig,
	repositories::RegistryService,
	services::{
		abi::{parse_abi, AbiRegistry},
		audit::ConfigAuditEngine,
		blockchain::{AlloyTransactionExecutor, ClientPool, ClientPoolTrait, TransactionExecutor},
		bridge::{AdminOpsService, BridgeStatusResolver},
		payload::{PayloadBuilder, RandomSource, ThreadRandomSource},
		revert::RevertDecoder,
		route::{FeeQuoteHealthProbe, RouteHealthOrchestrator, RouterFeeQuoteProbe},
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Every service the binary exposes
pub struct Services {
	pub registry: RegistryService,
	pub resolver: Arc<BridgeStatusResolver>,
	pub orchestrator: RouteHealthOrchestrator,
	pub audit: ConfigAuditEngine,
	pub payload: PayloadBuilder,
	pub decoder: RevertDecoder,
}

/// Collaborators that can be swapped out, mostly for tests
#[derive(Default)]
pub struct ServiceOverrides {
	pub pool: Option<Arc<dyn ClientPoolTrait>>,
	pub executor: Option<Arc<dyn TransactionExecutor>>,
	pub probe: Option<Arc<dyn FeeQuoteHealthProbe>>,
	pub random: Option<Arc<dyn RandomSource>>,
}

/// Builds the transaction executor from the configured signer key
pub fn create_executor(config: &AppConfig) -> Result<Arc<dyn TransactionExecutor>> {
	match &config.signer_private_key {
		Some(key) => {
			let executor = AlloyTransactionExecutor::from_private_key(key)?;
			if let Some(address) = executor.signer_address() {
				info!(signer = %address, "Transaction signer configured");
			}
			Ok(Arc::new(executor))
		}
		None => {
			warn!("SIGNER_PRIVATE_KEY not set, admin writes will be rejected");
			Ok(Arc::new(AlloyTransactionExecutor::without_signer()))
		}
	}
}

/// Revert decoder that also knows the custom errors of every stored contract ABI
pub fn create_revert_decoder(registry: &RegistryService, abis: &AbiRegistry) -> RevertDecoder {
	let mut known = vec![
		abis.gateway.clone(),
		abis.router.clone(),
		abis.hyperbridge.clone(),
		abis.ccip.clone(),
		abis.layerzero.clone(),
	];
	for chain in registry.active_chains() {
		for contract in registry.chain_contracts(&chain) {
			if contract.abi.trim().is_empty() {
				continue;
			}
			match parse_abi(&contract.abi) {
				Ok(abi) => known.push(abi),
				Err(e) => warn!(contract = %contract.id, error = %e, "Skipping unparsable stored ABI"),
			}
		}
	}
	RevertDecoder::new(&known)
}

/// Loads the registry from `config.config_dir` and initializes every service
pub fn initialize_services(config: &AppConfig) -> Result<Services> {
	let registry = RegistryService::new_with_path(&config.config_dir)?;
	info!(
		config_dir = %config.config_dir.display(),
		chains = registry.active_chains().len(),
		"Registry loaded"
	);
	initialize_services_with(config, registry, ServiceOverrides::default())
}

/// Initializes every service around an existing registry
pub fn initialize_services_with(
	config: &AppConfig,
	registry: RegistryService,
	overrides: ServiceOverrides,
) -> Result<Services> {
	let abis = AbiRegistry::default_registry()?;
	let pool: Arc<dyn ClientPoolTrait> = match overrides.pool {
		Some(pool) => pool,
		None => Arc::new(ClientPool::new(config.rpc_timeout)),
	};
	let executor = match overrides.executor {
		Some(executor) => executor,
		None => create_executor(config)?,
	};
	let decoder = create_revert_decoder(&registry, &abis);

	let admin = Arc::new(AdminOpsService::new(
		registry.clone(),
		abis.clone(),
		executor,
	));
	let resolver = Arc::new(BridgeStatusResolver::new(
		registry.clone(),
		pool.clone(),
		abis.clone(),
		admin,
	));
	let probe: Arc<dyn FeeQuoteHealthProbe> = match overrides.probe {
		Some(probe) => probe,
		None => Arc::new(RouterFeeQuoteProbe::new(
			registry.clone(),
			pool.clone(),
			abis.clone(),
			decoder.clone(),
			config.probe_amount,
		)),
	};
	let random: Arc<dyn RandomSource> = match overrides.random {
		Some(random) => random,
		None => Arc::new(ThreadRandomSource),
	};

	Ok(Services {
		orchestrator: RouteHealthOrchestrator::new(resolver.clone(), probe),
		audit: ConfigAuditEngine::new(registry.clone(), pool.clone(), abis.clone()),
		payload: PayloadBuilder::new(registry.clone(), pool, abis, config.fee, random),
		resolver,
		decoder,
		registry,
	})
}
