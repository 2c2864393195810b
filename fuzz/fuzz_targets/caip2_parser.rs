#![no_main]

use bridge_orchestrator::utils::codec::{parse_caip2, parse_units};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	if let Ok(input) = std::str::from_utf8(data) {
		if let Ok(caip2) = parse_caip2(input) {
			assert_eq!(caip2.to_string(), input);
		}
		let _ = parse_units(input, 18);
	}
});
