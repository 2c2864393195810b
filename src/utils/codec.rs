//! Chain and address codecs.
//!
//! Hex and base58 encoding, bytes32 padding, CAIP-2 parsing, decimal amount
//! conversion and Anchor instruction discriminators.

use alloy::primitives::{Address, U256};
use lazy_static::lazy_static;
use log::error;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};
use thiserror::Error;

lazy_static! {
	static ref CAIP2_NAMESPACE: Regex = Regex::new(r"^[-a-z0-9]{3,8}$").unwrap();
	static ref CAIP2_REFERENCE: Regex = Regex::new(r"^[-_a-zA-Z0-9]{1,32}$").unwrap();
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("Invalid amount format: {0}")]
	InvalidAmountFormat(String),
}

impl CodecError {
	pub fn invalid_input(msg: impl Into<String>) -> Self {
		let error = Self::InvalidInput(msg.into());
		error!("{}", error);
		error
	}

	pub fn invalid_amount(msg: impl Into<String>) -> Self {
		let error = Self::InvalidAmountFormat(msg.into());
		error!("{}", error);
		error
	}
}

/// A parsed CAIP-2 chain identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Caip2 {
	pub namespace: String,
	pub reference: String,
}

impl fmt::Display for Caip2 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.namespace, self.reference)
	}
}

/// Parses `<namespace>:<reference>`
pub fn parse_caip2(value: &str) -> Result<Caip2, CodecError> {
	let (namespace, reference) = value
		.split_once(':')
		.ok_or_else(|| CodecError::invalid_input(format!("{} is not a CAIP-2 id", value)))?;

	if !CAIP2_NAMESPACE.is_match(namespace) {
		return Err(CodecError::invalid_input(format!(
			"invalid CAIP-2 namespace {:?}",
			namespace
		)));
	}
	if !CAIP2_REFERENCE.is_match(reference) {
		return Err(CodecError::invalid_input(format!(
			"invalid CAIP-2 reference {:?}",
			reference
		)));
	}

	Ok(Caip2 {
		namespace: namespace.to_string(),
		reference: reference.to_string(),
	})
}

/// `0x`-prefixed lowercase hex
pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
	format!("0x{}", hex::encode(bytes))
}

/// Decodes hex with or without the `0x` prefix. `""` and `"0x"` decode to no bytes.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, CodecError> {
	let trimmed = value.trim();
	let stripped = trimmed
		.strip_prefix("0x")
		.or_else(|| trimmed.strip_prefix("0X"))
		.unwrap_or(trimmed);
	hex::decode(stripped).map_err(|e| CodecError::invalid_input(format!("invalid hex {:?}: {}", value, e)))
}

/// Decodes hex that must carry at least one byte
pub fn decode_non_empty_hex(value: &str, field: &str) -> Result<Vec<u8>, CodecError> {
	let bytes = decode_hex(value)?;
	if bytes.is_empty() {
		return Err(CodecError::invalid_input(format!("{} must not be empty", field)));
	}
	Ok(bytes)
}

pub fn encode_base58(bytes: impl AsRef<[u8]>) -> String {
	bs58::encode(bytes).into_string()
}

/// Parses a 20-byte EVM address
pub fn parse_evm_address(value: &str) -> Result<Address, CodecError> {
	Address::from_str(value.trim())
		.map_err(|e| CodecError::invalid_input(format!("invalid address {:?}: {}", value, e)))
}

/// Left-pads a hex address (up to 32 bytes) into a `0x`-prefixed bytes32.
///
/// The result is always 66 characters long.
pub fn address_to_padded_bytes_hex(address: &str) -> Result<String, CodecError> {
	let bytes = decode_non_empty_hex(address, "address")?;
	if bytes.len() > 32 {
		return Err(CodecError::invalid_input(format!(
			"address {:?} is longer than 32 bytes",
			address
		)));
	}
	let mut padded = [0u8; 32];
	padded[32 - bytes.len()..].copy_from_slice(&bytes);
	Ok(encode_hex(padded))
}

/// Converts a decimal amount string into the token's smallest unit.
///
/// `"100.5"` with 6 decimals becomes `"100500000"`. More fractional digits than
/// `decimals` is rejected rather than truncated.
pub fn convert_to_smallest_unit(amount: &str, decimals: u8) -> Result<String, CodecError> {
	parse_units(amount, decimals).map(|value| value.to_string())
}

/// Same as [`convert_to_smallest_unit`] returning the numeric value
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, CodecError> {
	let amount = amount.trim();
	let mut parts = amount.split('.');
	let integer = parts.next().unwrap_or_default();
	let fraction = parts.next().unwrap_or_default();
	if parts.next().is_some() {
		return Err(CodecError::invalid_amount(format!(
			"{:?} has more than one decimal point",
			amount
		)));
	}

	if integer.is_empty() && fraction.is_empty() {
		return Err(CodecError::invalid_amount(format!("{:?} has no digits", amount)));
	}

	let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
	if !all_digits(integer) || !all_digits(fraction) {
		return Err(CodecError::invalid_amount(format!(
			"{:?} is not a decimal number",
			amount
		)));
	}

	if fraction.len() > decimals as usize {
		return Err(CodecError::invalid_amount(format!(
			"{:?} has more than {} fractional digits",
			amount, decimals
		)));
	}

	let digits = format!(
		"{}{}{}",
		integer,
		fraction,
		"0".repeat(decimals as usize - fraction.len())
	);
	U256::from_str_radix(&digits, 10)
		.map_err(|_| CodecError::invalid_amount(format!("{:?} does not fit in 256 bits", amount)))
}

/// Parses a base-10 integer, clamping overflow to `u64::MAX`.
///
/// Negative or unparsable input yields `0`.
pub fn decimal_string_to_u64(value: &str) -> u64 {
	let value = value.trim();
	if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
		return 0;
	}
	value.parse::<u64>().unwrap_or(u64::MAX)
}

/// Hyperbridge state machine id of an EVM chain: hex of `"EVM-<chain id>"`.
///
/// Returns an empty string for anything that is not an `eip155` CAIP-2 id.
pub fn derive_evm_state_machine_hex(caip2: &str) -> String {
	let Some(reference) = caip2.strip_prefix("eip155:") else {
		return String::new();
	};
	let digits: String = reference.chars().filter(char::is_ascii_digit).collect();
	if digits.is_empty() {
		return String::new();
	}
	encode_hex(format!("EVM-{}", digits))
}

/// First 8 bytes of `sha256("global:" + name)`
pub fn anchor_discriminator(name: &str) -> [u8; 8] {
	let digest = Sha256::digest(format!("global:{}", name).as_bytes());
	let mut discriminator = [0u8; 8];
	discriminator.copy_from_slice(&digest[..8]);
	discriminator
}
