use proptest::{prelude::*, test_runner::Config};

use crate::properties::strategies::pagination_strategy;

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_window_stays_in_bounds(page in pagination_strategy(), len in 0usize..64) {
		let (start, end) = page.window(len);
		prop_assert!(start <= end);
		prop_assert!(end <= len);
		prop_assert_eq!(start, page.offset.min(len));
	}

	#[test]
	fn test_window_size_follows_limit(page in pagination_strategy(), len in 0usize..64) {
		let (start, end) = page.window(len);
		if page.limit <= 0 {
			prop_assert_eq!(end, len);
		} else {
			prop_assert_eq!(end - start, (page.limit as usize).min(len - start));
		}
	}
}
