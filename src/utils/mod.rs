//! Utility modules for common functionality.
//!
//! - codec: hex, base58, CAIP-2 and amount conversions
//! - logging: Logging utilities

pub mod codec;
pub mod logging;

pub use codec::CodecError;
