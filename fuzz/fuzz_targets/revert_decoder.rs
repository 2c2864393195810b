#![no_main]

use bridge_orchestrator::services::revert::RevertDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let decoded = RevertDecoder::default().decode(data);
	assert!(decoded.raw_hex.starts_with("0x"));
});
