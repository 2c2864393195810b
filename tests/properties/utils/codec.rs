use alloy::primitives::U256;
use proptest::{prelude::*, test_runner::Config};

use bridge_orchestrator::utils::codec::{
	address_to_padded_bytes_hex, decimal_string_to_u64, derive_evm_state_machine_hex,
	encode_hex, parse_caip2, parse_units,
};

use crate::properties::strategies::{amount_strategy, caip2_parts_strategy};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_parse_units_scales_by_decimals((integer, fraction, decimals) in amount_strategy()) {
		let amount = if fraction.is_empty() {
			integer.to_string()
		} else {
			format!("{}.{}", integer, fraction)
		};

		let scale = U256::from(10u64).pow(U256::from(decimals));
		let fraction_value = if fraction.is_empty() {
			U256::ZERO
		} else {
			U256::from_str_radix(&fraction, 10).unwrap()
				* U256::from(10u64).pow(U256::from(decimals as usize - fraction.len()))
		};
		let expected = U256::from(integer) * scale + fraction_value;

		prop_assert_eq!(parse_units(&amount, decimals).unwrap(), expected);
	}

	#[test]
	fn test_parse_units_rejects_excess_precision(
		integer in any::<u32>(),
		decimals in 0u8..18,
		extra in "[0-9]{1,4}",
	) {
		let fraction = format!("{}{}", "1".repeat(decimals as usize), extra);
		let amount = format!("{}.{}", integer, fraction);
		prop_assert!(parse_units(&amount, decimals).is_err());
	}

	#[test]
	fn test_parse_units_never_panics(amount in ".{0,40}", decimals in any::<u8>()) {
		let _ = parse_units(&amount, decimals);
	}

	#[test]
	fn test_caip2_accepts_well_formed_ids((namespace, reference) in caip2_parts_strategy()) {
		let id = format!("{}:{}", namespace, reference);
		let parsed = parse_caip2(&id).unwrap();
		prop_assert_eq!(&parsed.namespace, &namespace);
		prop_assert_eq!(&parsed.reference, &reference);
		prop_assert_eq!(parsed.to_string(), id);
	}

	#[test]
	fn test_caip2_requires_a_separator(value in "[a-zA-Z0-9_-]{0,40}") {
		prop_assert!(parse_caip2(&value).is_err());
	}

	#[test]
	fn test_state_machine_id_of_evm_chains(chain_id in any::<u64>()) {
		prop_assert_eq!(
			derive_evm_state_machine_hex(&format!("eip155:{}", chain_id)),
			encode_hex(format!("EVM-{}", chain_id))
		);
		prop_assert_eq!(derive_evm_state_machine_hex(&format!("solana:{}", chain_id)), "");
	}

	#[test]
	fn test_decimal_string_to_u64(value in any::<u64>(), garbage in "[a-zA-Z_.-]{1,8}") {
		prop_assert_eq!(decimal_string_to_u64(&value.to_string()), value);
		prop_assert_eq!(decimal_string_to_u64(&format!("{}{}", value, garbage)), 0);
		prop_assert_eq!(decimal_string_to_u64(&format!("{}99999999999", u64::MAX)), u64::MAX);
	}

	#[test]
	fn test_padded_address_keeps_trailing_bytes(bytes in prop::collection::vec(any::<u8>(), 1..=32)) {
		let padded = address_to_padded_bytes_hex(&encode_hex(&bytes)).unwrap();
		prop_assert_eq!(padded.len(), 66);
		let tail = hex::encode(&bytes);
		prop_assert!(padded.ends_with(&tail));
		prop_assert!(padded[2..66 - tail.len()].chars().all(|c| c == '0'));
	}
}
