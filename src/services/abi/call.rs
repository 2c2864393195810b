//! Typed read-only contract calls.
//!
//! Each call packs arguments against an ABI, issues a single `eth_call` and
//! decodes the first return value into the requested Rust type. Nothing is retried.

use alloy::{
	dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt},
	json_abi::{Function, JsonAbi},
	primitives::{Address, Bytes, B256, U256},
};

use crate::services::{abi::AbiCallError, blockchain::EvmClientTrait};

/// Rust types a view call can return
pub trait ViewOutput: Sized {
	/// Solidity type name used in mismatch errors
	const SOL_TYPE: &'static str;

	fn from_sol_value(value: &DynSolValue) -> Option<Self>;
}

fn uint_of_width(value: &DynSolValue, width: usize) -> Option<U256> {
	value
		.as_uint()
		.filter(|(_, bits)| *bits == width)
		.map(|(v, _)| v)
}

impl ViewOutput for bool {
	const SOL_TYPE: &'static str = "bool";

	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		value.as_bool()
	}
}

impl ViewOutput for u8 {
	const SOL_TYPE: &'static str = "uint8";

	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		uint_of_width(value, 8).map(|v| v.to::<u8>())
	}
}

impl ViewOutput for u32 {
	const SOL_TYPE: &'static str = "uint32";

	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		uint_of_width(value, 32).map(|v| v.to::<u32>())
	}
}

impl ViewOutput for u64 {
	const SOL_TYPE: &'static str = "uint64";

	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		uint_of_width(value, 64).map(|v| v.to::<u64>())
	}
}

impl ViewOutput for U256 {
	const SOL_TYPE: &'static str = "uint256";

	/// Any unsigned width above 64 bits widens losslessly
	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		value.as_uint().filter(|(_, bits)| *bits > 64).map(|(v, _)| v)
	}
}

impl ViewOutput for Address {
	const SOL_TYPE: &'static str = "address";

	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		value.as_address()
	}
}

impl ViewOutput for Bytes {
	const SOL_TYPE: &'static str = "bytes";

	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		value.as_bytes().map(Bytes::copy_from_slice)
	}
}

impl ViewOutput for B256 {
	const SOL_TYPE: &'static str = "bytes32";

	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		value
			.as_fixed_bytes()
			.filter(|(_, size)| *size == 32)
			.map(|(bytes, _)| B256::from_slice(bytes))
	}
}

impl ViewOutput for String {
	const SOL_TYPE: &'static str = "string";

	fn from_sol_value(value: &DynSolValue) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

/// Parses a raw JSON ABI as stored alongside a deployed contract
pub fn parse_abi(raw_abi: &str) -> Result<JsonAbi, AbiCallError> {
	serde_json::from_str(raw_abi).map_err(|e| AbiCallError::abi_parse(e.to_string()))
}

/// Finds the overload of `method` taking `arity` arguments
pub fn resolve_function<'a>(
	abi: &'a JsonAbi,
	method: &str,
	arity: usize,
) -> Result<&'a Function, AbiCallError> {
	let overloads = abi
		.function(method)
		.ok_or_else(|| AbiCallError::pack(format!("method {} not found in ABI", method)))?;
	overloads
		.iter()
		.find(|function| function.inputs.len() == arity)
		.ok_or_else(|| {
			AbiCallError::pack(format!(
				"method {} does not take {} argument(s)",
				method, arity
			))
		})
}

/// Encodes selector + arguments for `method`
pub fn encode_call(abi: &JsonAbi, method: &str, args: &[DynSolValue]) -> Result<Bytes, AbiCallError> {
	let function = resolve_function(abi, method, args.len())?;
	function
		.abi_encode_input(args)
		.map(Bytes::from)
		.map_err(|e| AbiCallError::pack(format!("{}: {}", method, e)))
}

/// Calls `method` and returns every decoded output value
pub async fn call_view_raw(
	client: &dyn EvmClientTrait,
	address: Address,
	abi: &JsonAbi,
	method: &str,
	args: &[DynSolValue],
) -> Result<Vec<DynSolValue>, AbiCallError> {
	let function = resolve_function(abi, method, args.len())?;
	let calldata = function
		.abi_encode_input(args)
		.map_err(|e| AbiCallError::pack(format!("{}: {}", method, e)))?;

	tracing::debug!(method, address = %address, "eth_call");
	let data = client.call_view(address, Bytes::from(calldata)).await?;

	if data.is_empty() && !function.outputs.is_empty() {
		return Err(AbiCallError::decode(format!(
			"{} returned no data from {}",
			method, address
		)));
	}

	function
		.abi_decode_output(&data)
		.map_err(|e| AbiCallError::decode(format!("{}: {}", method, e)))
}

/// Calls `method` on an already-parsed ABI and returns its first output as `T`
pub async fn call_view_abi<T: ViewOutput>(
	client: &dyn EvmClientTrait,
	address: Address,
	abi: &JsonAbi,
	method: &str,
	args: &[DynSolValue],
) -> Result<T, AbiCallError> {
	let values = call_view_raw(client, address, abi, method, args).await?;
	let first = values
		.first()
		.ok_or_else(|| AbiCallError::decode(format!("{} has no outputs", method)))?;

	T::from_sol_value(first).ok_or_else(|| {
		let actual = first
			.as_type()
			.map(|ty| ty.to_string())
			.unwrap_or_else(|| "unknown".to_string());
		AbiCallError::type_mismatch(T::SOL_TYPE, actual)
	})
}

/// Calls `method` using a raw JSON ABI
pub async fn call_view<T: ViewOutput>(
	client: &dyn EvmClientTrait,
	address: Address,
	raw_abi: &str,
	method: &str,
	args: &[DynSolValue],
) -> Result<T, AbiCallError> {
	let abi = parse_abi(raw_abi)?;
	call_view_abi(client, address, &abi, method, args).await
}
