use alloy::primitives::U256;
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use zeroize::Zeroizing;

use crate::models::ConfigError;

const DEFAULT_CONFIG_DIR: &str = "config";
const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PROBE_AMOUNT: u64 = 1_000_000;

/// Local fee schedule used when the Gateway cannot quote the total amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeeConfig {
	/// Flat fee in the token's smallest unit
	pub fixed_fee: U256,
	/// Percentage fee in basis points
	pub fee_rate_bps: u32,
}

impl FeeConfig {
	/// `amount + max(fixed_fee, amount * fee_rate_bps / 10000)`
	pub fn total_with_fee(&self, amount: U256) -> U256 {
		let percentage = amount.saturating_mul(U256::from(self.fee_rate_bps)) / U256::from(10_000u64);
		amount.saturating_add(percentage.max(self.fixed_fee))
	}
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
	pub config_dir: PathBuf,
	pub rpc_timeout: Duration,
	pub signer_private_key: Option<Zeroizing<String>>,
	pub fee: FeeConfig,
	/// Amount used when probing fee-quote health
	pub probe_amount: U256,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
			rpc_timeout: Duration::from_secs(DEFAULT_RPC_TIMEOUT_SECS),
			signer_private_key: None,
			fee: FeeConfig::default(),
			probe_amount: U256::from(DEFAULT_PROBE_AMOUNT),
		}
	}
}

impl AppConfig {
	/// Reads settings from the process environment.
	///
	/// Unset variables take their defaults; set but unparsable variables are rejected.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Same as [`AppConfig::from_env`] with an explicit variable source.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let defaults = Self::default();
		let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

		let config_dir = get("CONFIG_DIR")
			.map(PathBuf::from)
			.unwrap_or(defaults.config_dir);

		let rpc_timeout = match get("RPC_TIMEOUT_SECS") {
			Some(raw) => {
				let secs = parse_var::<u64>("RPC_TIMEOUT_SECS", &raw)?;
				if secs == 0 {
					return Err(ConfigError::validation_error(
						"RPC_TIMEOUT_SECS must be greater than zero",
					));
				}
				Duration::from_secs(secs)
			}
			None => defaults.rpc_timeout,
		};

		let signer_private_key = get("SIGNER_PRIVATE_KEY").map(Zeroizing::new);

		let fixed_fee = match get("FEE_FIXED_BASE") {
			Some(raw) => parse_var::<U256>("FEE_FIXED_BASE", &raw)?,
			None => U256::ZERO,
		};

		let fee_rate_bps = match get("FEE_RATE_BPS") {
			Some(raw) => {
				let bps = parse_var::<u32>("FEE_RATE_BPS", &raw)?;
				if bps > 10_000 {
					return Err(ConfigError::validation_error(
						"FEE_RATE_BPS must not exceed 10000",
					));
				}
				bps
			}
			None => 0,
		};

		let probe_amount = match get("FEE_QUOTE_PROBE_AMOUNT") {
			Some(raw) => parse_var::<U256>("FEE_QUOTE_PROBE_AMOUNT", &raw)?,
			None => defaults.probe_amount,
		};

		Ok(Self {
			config_dir,
			rpc_timeout,
			signer_private_key,
			fee: FeeConfig {
				fixed_fee,
				fee_rate_bps,
			},
			probe_amount,
		})
	}

	pub fn chains_dir(&self) -> PathBuf {
		self.config_dir.join("chains")
	}

	pub fn contracts_dir(&self) -> PathBuf {
		self.config_dir.join("contracts")
	}

	pub fn tokens_dir(&self) -> PathBuf {
		self.config_dir.join("tokens")
	}
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
	raw.trim()
		.parse::<T>()
		.map_err(|_| ConfigError::validation_error(format!("{} has an invalid value", key)))
}
