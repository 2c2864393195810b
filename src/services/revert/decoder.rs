//! Revert data classification.

use alloy::{
	dyn_abi::{DynSolType, DynSolValue, Specifier},
	json_abi::{Error as AbiError, JsonAbi},
	primitives::U256,
};
use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap};

use crate::{
	models::{bridge_name, RouteErrorDecoded},
	utils::codec::encode_hex,
};

const NO_ERROR_MESSAGE: &str = "no route error recorded";
const EXECUTION_REVERTED: &str = "execution_reverted";

/// Errors this core knows how to explain
const KNOWN_ERRORS: &[&str] = &[
	"error Error(string reason)",
	"error Panic(uint256 code)",
	"error AdapterNotRegistered(string destChainId, uint8 bridgeType)",
	"error RouteNotConfigured(string destChainId)",
	"error UnsupportedBridgeType(uint8 bridgeType)",
	"error InsufficientNativeFee(uint256 required, uint256 provided)",
	"error ChainNotSupported(string destChainId)",
	"error InvalidAmount(uint256 amount)",
	"error UnauthorizedSpender(address spender)",
	"error QuoteUnavailable(string reason)",
];

lazy_static! {
	static ref KNOWN_ERROR_TABLE: HashMap<[u8; 4], AbiError> = KNOWN_ERRORS
		.iter()
		.filter_map(|fragment| AbiError::parse(fragment).ok())
		.map(|error| (error.selector().0, error))
		.collect();
}

/// Solidity meaning of a `Panic(uint256)` code
pub fn panic_reason(code: U256) -> &'static str {
	match code.saturating_to::<u64>() {
		0x00 => "generic compiler panic",
		0x01 => "assertion failed",
		0x11 => "arithmetic overflow or underflow",
		0x12 => "division or modulo by zero",
		0x21 => "invalid enum conversion",
		0x22 => "incorrectly encoded storage byte array",
		0x31 => "pop on empty array",
		0x32 => "array index out of bounds",
		0x41 => "out of memory",
		0x51 => "call to zero-initialized function pointer",
		_ => "unknown panic code",
	}
}

fn value_to_string(value: &DynSolValue) -> String {
	match value {
		DynSolValue::String(s) => s.clone(),
		DynSolValue::Bool(b) => b.to_string(),
		DynSolValue::Uint(v, _) => v.to_string(),
		DynSolValue::Int(v, _) => v.to_string(),
		DynSolValue::Address(a) => a.to_checksum(None),
		DynSolValue::Bytes(b) => encode_hex(b),
		DynSolValue::FixedBytes(word, size) => encode_hex(&word[..*size]),
		other => format!("{:?}", other),
	}
}

/// Human message for a decoded error, keyed by error name
fn describe(name: &str, details: &BTreeMap<String, String>) -> String {
	let get = |key: &str| details.get(key).map(String::as_str).unwrap_or_default();
	let bridge = |key: &str| {
		let code = get(key);
		format!("{} ({})", code, bridge_name(code.parse().unwrap_or(u8::MAX)))
	};

	match name {
		"Error" => get("reason").to_string(),
		"Panic" => format!("panic {}: {}", get("code"), get("meaning")),
		"AdapterNotRegistered" => format!(
			"no adapter registered for {} with bridge type {}",
			get("destChainId"),
			bridge("bridgeType")
		),
		"RouteNotConfigured" => format!("route to {} is not configured", get("destChainId")),
		"UnsupportedBridgeType" => format!("bridge type {} is not supported", bridge("bridgeType")),
		"InsufficientNativeFee" => format!(
			"insufficient native fee: required {}, provided {}",
			get("required"),
			get("provided")
		),
		"ChainNotSupported" => format!("destination chain {} is not supported", get("destChainId")),
		"InvalidAmount" => format!("invalid amount {}", get("amount")),
		"UnauthorizedSpender" => format!("{} is not an authorized vault spender", get("spender")),
		"QuoteUnavailable" => format!("fee quote unavailable: {}", get("reason")),
		other => {
			let args: Vec<String> = details.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
			format!("{}({})", other, args.join(", "))
		}
	}
}

/// Decodes `payload` against the error's parameters into a name -> value map
fn decode_params(error: &AbiError, payload: &[u8]) -> Option<BTreeMap<String, String>> {
	let types = error
		.inputs
		.iter()
		.map(|param| param.resolve())
		.collect::<Result<Vec<DynSolType>, _>>()
		.ok()?;

	let decoded = DynSolType::Tuple(types).abi_decode_params(payload).ok()?;
	let values = match decoded {
		DynSolValue::Tuple(values) => values,
		single => vec![single],
	};
	if values.len() != error.inputs.len() {
		return None;
	}

	Some(
		error
			.inputs
			.iter()
			.enumerate()
			.zip(values.iter())
			.map(|((index, param), value)| {
				let key = if param.name.is_empty() {
					format!("arg{}", index)
				} else {
					param.name.clone()
				};
				(key, value_to_string(value))
			})
			.collect(),
	)
}

/// Classifies raw EVM revert data.
///
/// Decoding never fails: anything unrecognised still yields a report carrying the
/// raw hex and whatever could be identified.
#[derive(Debug, Clone, Default)]
pub struct RevertDecoder {
	extra_errors: HashMap<[u8; 4], AbiError>,
}

impl RevertDecoder {
	/// Decoder that also resolves custom errors declared in `extra_abis`
	pub fn new(extra_abis: &[JsonAbi]) -> Self {
		let extra_errors = extra_abis
			.iter()
			.flat_map(|abi| abi.errors())
			.map(|error| (error.selector().0, error.clone()))
			.collect();
		Self { extra_errors }
	}

	pub fn decode(&self, data: &[u8]) -> RouteErrorDecoded {
		let raw_hex = encode_hex(data);

		if data.is_empty() {
			return RouteErrorDecoded {
				raw_hex,
				message: Some(NO_ERROR_MESSAGE.to_string()),
				..Default::default()
			};
		}

		if data.len() < 4 {
			return RouteErrorDecoded {
				raw_hex,
				message: Some(EXECUTION_REVERTED.to_string()),
				..Default::default()
			};
		}

		let mut selector = [0u8; 4];
		selector.copy_from_slice(&data[..4]);
		let selector_hex = encode_hex(selector);
		let payload = &data[4..];

		let Some(error) = KNOWN_ERROR_TABLE
			.get(&selector)
			.or_else(|| self.extra_errors.get(&selector))
		else {
			return RouteErrorDecoded {
				raw_hex,
				message: Some(format!(
					"{}: unrecognized error selector {}",
					EXECUTION_REVERTED, selector_hex
				)),
				selector: Some(selector_hex),
				..Default::default()
			};
		};

		match decode_params(error, payload) {
			Some(mut details) => {
				if error.name == "Panic" {
					let code = details
						.get("code")
						.and_then(|c| c.parse::<U256>().ok())
						.unwrap_or(U256::MAX);
					details.insert("code".to_string(), format!("{:#x}", code));
					details.insert("meaning".to_string(), panic_reason(code).to_string());
				}
				RouteErrorDecoded {
					raw_hex,
					selector: Some(selector_hex),
					name: Some(error.name.clone()),
					message: Some(describe(&error.name, &details)),
					details: Some(details),
				}
			}
			None => RouteErrorDecoded {
				raw_hex,
				selector: Some(selector_hex),
				name: Some(error.name.clone()),
				message: Some(format!("malformed {} payload", error.name)),
				details: None,
			},
		}
	}
}
