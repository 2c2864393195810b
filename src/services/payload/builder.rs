//! Outbound payment transaction payloads.
//!
//! EVM sources get an ordered list of calls to sign (ERC20 approval first when
//! needed). Solana sources get an Anchor `create_payment` instruction.

use alloy::{
	dyn_abi::DynSolValue,
	primitives::{Address, U256},
};
use borsh::BorshSerialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::{
	models::{
		BridgeType, Chain, ChainType, ContractType, EvmCall, EvmPayload, FeeConfig,
		PaymentPayloadRequest, SvmPayload, Token, TransactionPayload,
	},
	repositories::RegistryService,
	services::{
		abi::{call_view_abi, encode_call, AbiRegistry},
		blockchain::{BlockChainError, ClientPoolTrait, EvmClientTrait},
		bridge::{bridge_arg, dest_arg, require_contract, require_evm_rpc, BridgeError, ResolvedContract},
		payload::random::RandomSource,
	},
	utils::codec::{anchor_discriminator, decode_hex, encode_base58, encode_hex, parse_evm_address, parse_units},
};

const CREATE_PAYMENT_INSTRUCTION: &str = "create_payment";

/// Arguments of the Anchor `create_payment` instruction
#[derive(Debug, Clone, PartialEq, BorshSerialize)]
pub struct CreatePaymentArgs {
	pub dest_chain_id: String,
	pub receiver: String,
	pub amount: u64,
	pub nonce: u64,
}

impl CreatePaymentArgs {
	/// Discriminator followed by the borsh-encoded arguments
	pub fn instruction_data(&self) -> Result<Vec<u8>, BridgeError> {
		let mut data = anchor_discriminator(CREATE_PAYMENT_INSTRUCTION).to_vec();
		let args = borsh::to_vec(self)
			.map_err(|e| BridgeError::internal(format!("failed to encode instruction: {}", e)))?;
		data.extend_from_slice(&args);
		Ok(data)
	}
}

/// Builds payment payloads for the payer to sign
pub struct PayloadBuilder {
	registry: RegistryService,
	pool: Arc<dyn ClientPoolTrait>,
	abis: Arc<AbiRegistry>,
	fee: FeeConfig,
	random: Arc<dyn RandomSource>,
}

/// Receiver bytes as passed to `createPayment`: hex when `0x`-prefixed, UTF-8 otherwise
fn receiver_bytes(receiver: &str) -> Result<Vec<u8>, BridgeError> {
	let receiver = receiver.trim();
	if receiver.is_empty() {
		return Err(BridgeError::invalid_input("receiver is required"));
	}
	if receiver.starts_with("0x") || receiver.starts_with("0X") {
		return Ok(decode_hex(receiver)?);
	}
	Ok(receiver.as_bytes().to_vec())
}

fn token_address(token: &Token) -> Result<Address, BridgeError> {
	if token.is_native {
		return Ok(Address::ZERO);
	}
	Ok(parse_evm_address(&token.contract_address)?)
}

/// Explicit policy order, else the default type first, else all types in code order
fn fallback_order(policy: &[BridgeType], default: Option<BridgeType>) -> Vec<BridgeType> {
	let mut order: Vec<BridgeType> = Vec::with_capacity(BridgeType::ALL.len());
	let preferred = if policy.is_empty() {
		default.into_iter().collect::<Vec<_>>()
	} else {
		policy.to_vec()
	};
	for bridge_type in preferred {
		if !order.contains(&bridge_type) {
			order.push(bridge_type);
		}
	}
	if policy.is_empty() {
		order.extend(BridgeType::ALL.iter().filter(|bt| Some(**bt) != default));
	}
	order
}

impl PayloadBuilder {
	pub fn new(
		registry: RegistryService,
		pool: Arc<dyn ClientPoolTrait>,
		abis: Arc<AbiRegistry>,
		fee: FeeConfig,
		random: Arc<dyn RandomSource>,
	) -> Self {
		Self {
			registry,
			pool,
			abis,
			fee,
			random,
		}
	}

	/// Builds the payload for `request`. Chain types without a payload format
	/// yield `None`.
	#[instrument(skip_all, fields(source = %request.source_chain_id, dest = %request.dest_chain_id))]
	pub async fn build(
		&self,
		request: &PaymentPayloadRequest,
	) -> Result<Option<TransactionPayload>, BridgeError> {
		let source = self.registry.resolve_chain(&request.source_chain_id)?;
		let dest = self.registry.resolve_chain(&request.dest_chain_id)?;
		let token = self
			.registry
			.token(&request.source_token_id)
			.ok_or_else(|| BridgeError::not_found(format!("token {}", request.source_token_id)))?;
		if token.chain_uuid != source.id {
			return Err(BridgeError::invalid_input(format!(
				"token {} is not on {}",
				token.symbol,
				source.caip2()
			)));
		}
		let amount = parse_units(&request.amount, token.decimals)?;
		if amount.is_zero() {
			return Err(BridgeError::invalid_input("amount must be greater than zero"));
		}

		match source.chain_type {
			ChainType::EVM => self
				.build_evm(request, &source, &dest, &token, amount)
				.await
				.map(|payload| Some(TransactionPayload::Evm(payload))),
			ChainType::SVM => self
				.build_svm(request, &source, &dest, amount)
				.map(|payload| Some(TransactionPayload::Svm(payload))),
			ChainType::Substrate => {
				debug!("No payload format for substrate sources");
				Ok(None)
			}
		}
	}

	async fn build_evm(
		&self,
		request: &PaymentPayloadRequest,
		source: &Chain,
		dest: &Chain,
		token: &Token,
		amount: U256,
	) -> Result<EvmPayload, BridgeError> {
		let gateway = require_contract(&self.registry, source, ContractType::Gateway)?;
		let rpc_url = require_evm_rpc(source)?;
		let client = self.pool.get_evm_client(&rpc_url).await?;
		let client = client.as_ref();

		let source_token = token_address(token)?;
		let dest_token = match request.dest_token_address.trim() {
			"" => Address::ZERO,
			raw => parse_evm_address(raw)?,
		};
		let receiver = receiver_bytes(&request.receiver)?;
		let dest_caip2 = dest.caip2();

		let (bridge_type, bridge_fee) = if source.id == dest.id {
			(None, U256::ZERO)
		} else {
			let router = require_contract(&self.registry, source, ContractType::Router)?;
			let (bridge_type, fee) = self
				.quote_bridge_fee(client, &gateway, &router, &dest_caip2, amount, &request.bridge_policy)
				.await?;
			(Some(bridge_type), fee)
		};

		let mut calls = Vec::with_capacity(2);
		let mut approval_amount = None;
		if !token.is_native {
			let approval = self
				.approval_amount(client, &gateway, source_token, amount)
				.await;
			let data = encode_call(
				&self.abis.erc20,
				"approve",
				&[
					DynSolValue::Address(gateway.address),
					DynSolValue::Uint(approval, 256),
				],
			)?;
			calls.push(EvmCall {
				method: "approve".to_string(),
				to: source_token.to_string(),
				data: encode_hex(&data),
				value: "0".to_string(),
			});
			approval_amount = Some(approval.to_string());
		}

		let data = encode_call(
			&self.abis.gateway,
			"createPayment",
			&[
				DynSolValue::Bytes(dest_caip2.clone().into_bytes()),
				DynSolValue::Bytes(receiver),
				DynSolValue::Address(source_token),
				DynSolValue::Address(dest_token),
				DynSolValue::Uint(amount, 256),
			],
		)?;
		let value = if token.is_native {
			bridge_fee.saturating_add(amount)
		} else {
			bridge_fee
		};
		calls.push(EvmCall {
			method: "createPayment".to_string(),
			to: gateway.address.to_string(),
			data: encode_hex(&data),
			value: value.to_string(),
		});

		Ok(EvmPayload {
			chain_id: source.caip2(),
			calls,
			bridge_type,
			bridge_fee: bridge_type.map(|_| bridge_fee.to_string()),
			approval_amount,
		})
	}

	/// Gateway's `quoteTotalAmount`, or the local fee schedule when the quote fails
	async fn approval_amount(
		&self,
		client: &dyn EvmClientTrait,
		gateway: &ResolvedContract,
		token: Address,
		amount: U256,
	) -> U256 {
		let quoted: Result<U256, _> = call_view_abi(
			client,
			gateway.address,
			&self.abis.gateway,
			"quoteTotalAmount",
			&[DynSolValue::Address(token), DynSolValue::Uint(amount, 256)],
		)
		.await;
		match quoted {
			Ok(total) => total,
			Err(err) => {
				warn!(error = %err, "quoteTotalAmount failed, using local fee schedule");
				self.fee.total_with_fee(amount)
			}
		}
	}

	/// First bridge type in fallback order with a non-zero fee quote
	async fn quote_bridge_fee(
		&self,
		client: &dyn EvmClientTrait,
		gateway: &ResolvedContract,
		router: &ResolvedContract,
		dest: &str,
		amount: U256,
		policy: &[BridgeType],
	) -> Result<(BridgeType, U256), BridgeError> {
		let default = if policy.is_empty() {
			match call_view_abi::<u8>(
				client,
				gateway.address,
				&self.abis.gateway,
				"defaultBridgeTypes",
				&[dest_arg(dest)],
			)
			.await
			{
				Ok(code) => BridgeType::from_code(code),
				Err(err) => {
					warn!(error = %err, "Default bridge type unavailable, trying all bridges");
					None
				}
			}
		} else {
			None
		};

		let mut failures = Vec::new();
		for bridge_type in fallback_order(policy, default) {
			let quote: Result<U256, _> = call_view_abi(
				client,
				router.address,
				&self.abis.router,
				"quotePaymentFee",
				&[
					dest_arg(dest),
					bridge_arg(bridge_type),
					DynSolValue::Uint(amount, 256),
				],
			)
			.await;
			match quote {
				Ok(fee) if !fee.is_zero() => {
					debug!(%bridge_type, fee = %fee, "Bridge fee quoted");
					return Ok((bridge_type, fee));
				}
				Ok(_) => failures.push(format!("{}: zero quote", bridge_type)),
				Err(err) => failures.push(format!("{}: {}", bridge_type, err)),
			}
		}

		Err(BridgeError::Upstream(BlockChainError::request_error(format!(
			"no bridge could quote a fee to {} ({})",
			dest,
			failures.join("; ")
		))))
	}

	fn build_svm(
		&self,
		request: &PaymentPayloadRequest,
		source: &Chain,
		dest: &Chain,
		amount: U256,
	) -> Result<SvmPayload, BridgeError> {
		let program = self
			.registry
			.active_contract(source, ContractType::Gateway)
			.filter(|contract| !contract.contract_address.trim().is_empty())
			.ok_or_else(|| {
				BridgeError::contract_not_found(format!("no active Gateway program on {}", source.caip2()))
			})?;
		if request.receiver.trim().is_empty() {
			return Err(BridgeError::invalid_input("receiver is required"));
		}
		let amount: u64 = amount
			.try_into()
			.map_err(|_| BridgeError::invalid_input("amount does not fit in u64"))?;

		let args = CreatePaymentArgs {
			dest_chain_id: dest.caip2(),
			receiver: request.receiver.trim().to_string(),
			amount,
			nonce: self.random.next_u64(),
		};

		Ok(SvmPayload {
			chain_id: source.caip2(),
			program_id: program.contract_address.clone(),
			instruction: CREATE_PAYMENT_INSTRUCTION.to_string(),
			data: encode_base58(args.instruction_data()?),
			discriminator: encode_hex(anchor_discriminator(CREATE_PAYMENT_INSTRUCTION)),
		})
	}
}
