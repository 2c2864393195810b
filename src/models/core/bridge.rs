use serde::{Deserialize, Serialize};
use std::fmt;

/// Bridge protocols a Gateway can route a destination through.
///
/// The discriminant is the on-chain code and the declaration order is the
/// iteration and fallback order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum BridgeType {
	Hyperbridge = 0,
	Ccip = 1,
	LayerZero = 2,
}

impl BridgeType {
	pub const ALL: [BridgeType; 3] = [
		BridgeType::Hyperbridge,
		BridgeType::Ccip,
		BridgeType::LayerZero,
	];

	pub fn code(&self) -> u8 {
		*self as u8
	}

	pub fn from_code(code: u8) -> Option<Self> {
		match code {
			0 => Some(BridgeType::Hyperbridge),
			1 => Some(BridgeType::Ccip),
			2 => Some(BridgeType::LayerZero),
			_ => None,
		}
	}

	pub fn name(&self) -> &'static str {
		bridge_name(self.code())
	}
}

impl fmt::Display for BridgeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl std::str::FromStr for BridgeType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if let Ok(code) = s.parse::<u8>() {
			return BridgeType::from_code(code).ok_or_else(|| format!("unknown bridge type {}", s));
		}
		match s.to_ascii_uppercase().as_str() {
			"HYPERBRIDGE" => Ok(BridgeType::Hyperbridge),
			"CCIP" => Ok(BridgeType::Ccip),
			"LAYERZERO" => Ok(BridgeType::LayerZero),
			_ => Err(format!("unknown bridge type {}", s)),
		}
	}
}

/// Display name of an on-chain bridge code.
pub fn bridge_name(code: u8) -> &'static str {
	match code {
		0 => "HYPERBRIDGE",
		1 => "CCIP",
		2 => "LAYERZERO",
		_ => "UNKNOWN",
	}
}
