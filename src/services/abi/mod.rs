//! ABI call layer.
//!
//! Typed view calls over any [`EvmClientTrait`](crate::services::blockchain::EvmClientTrait)
//! plus the static registry of contract interfaces.

mod call;
mod error;
mod registry;

pub use call::{
	call_view, call_view_abi, call_view_raw, encode_call, parse_abi, resolve_function, ViewOutput,
};
pub use error::AbiCallError;
pub use registry::AbiRegistry;
