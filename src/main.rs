//! Bridge orchestrator command line entry point.
//!
//! Every subcommand loads the registry from the configuration directory, runs one
//! service operation and prints its report as JSON on stdout. Logs go to stderr.
//!
//! # Flow
//! 1. Loads `.env` and reads [`AppConfig`] from the environment
//! 2. Initializes logging and the services
//! 3. Dispatches the subcommand and prints the result

use bridge_orchestrator::{
	bootstrap::{initialize_services, Result, Services},
	models::{AppConfig, BridgeType, Pagination, PaymentPayloadRequest},
	utils::{codec::decode_hex, logging::setup_logging},
};

use clap::{Arg, ArgMatches, Command};
use dotenvy::dotenv;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};
use uuid::Uuid;

fn route_args(command: Command) -> Command {
	command
		.arg(
			Arg::new("source")
				.long("source")
				.help("Source chain (CAIP-2, UUID or native chain id)")
				.value_name("CHAIN")
				.required(true),
		)
		.arg(
			Arg::new("dest")
				.long("dest")
				.help("Destination chain (CAIP-2, UUID or native chain id)")
				.value_name("CHAIN")
				.required(true),
		)
}

fn bridge_type_arg(required: bool) -> Arg {
	Arg::new("bridge-type")
		.long("bridge-type")
		.help("Bridge type (HYPERBRIDGE, CCIP, LAYERZERO or 0-2)")
		.value_name("TYPE")
		.value_parser(clap::builder::ValueParser::new(|s: &str| s.parse::<BridgeType>()))
		.required(required)
}

fn cli() -> Command {
	Command::new("bridge-orchestrator")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Inspects, audits and remediates cross-chain bridge adapter configuration and \
			 builds payment payloads.",
		)
		.subcommand_required(true)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL")
				.global(true),
		)
		.arg(
			Arg::new("config-dir")
				.long("config-dir")
				.help("Directory holding chains/, contracts/ and tokens/ (default: config)")
				.value_name("PATH")
				.global(true),
		)
		.subcommand(route_args(
			Command::new("status").about("Live adapter registration and configuration of a route"),
		))
		.subcommand(
			Command::new("overview")
				.about("Health of every route")
				.arg(Arg::new("source").long("source").value_name("CHAIN"))
				.arg(Arg::new("dest").long("dest").value_name("CHAIN"))
				.arg(
					Arg::new("offset")
						.long("offset")
						.value_name("N")
						.value_parser(clap::value_parser!(usize))
						.default_value("0"),
				)
				.arg(
					Arg::new("limit")
						.long("limit")
						.help("Page size; zero or negative returns everything")
						.value_name("N")
						.value_parser(clap::value_parser!(i64))
						.allow_negative_numbers(true)
						.default_value("0"),
				),
		)
		.subcommand(route_args(
			Command::new("recheck").about("Health of one route against its default bridge"),
		))
		.subcommand(route_args(
			Command::new("preflight").about("Readiness of every bridge type for one route"),
		))
		.subcommand(route_args(
			Command::new("autofix")
				.about("Registers, selects and configures a bridge for a route")
				.arg(bridge_type_arg(false)),
		))
		.subcommand(
			Command::new("check")
				.about("Audits the contracts of a chain, optionally against one destination")
				.arg(
					Arg::new("source")
						.long("source")
						.value_name("CHAIN")
						.required(true),
				)
				.arg(Arg::new("dest").long("dest").value_name("CHAIN")),
		)
		.subcommand(
			Command::new("check-contract")
				.about("Audits one contract against every other active chain")
				.arg(Arg::new("id").long("id").value_name("UUID").required(true)),
		)
		.subcommand(
			Command::new("decode-revert")
				.about("Decodes raw revert data")
				.arg(Arg::new("data").long("data").value_name("HEX").required(true)),
		)
		.subcommand(route_args(
			Command::new("build-payload")
				.about("Builds the payment transaction payload")
				.arg(
					Arg::new("token")
						.long("token")
						.help("Source token UUID")
						.value_name("UUID")
						.value_parser(clap::value_parser!(Uuid))
						.required(true),
				)
				.arg(
					Arg::new("dest-token")
						.long("dest-token")
						.value_name("ADDRESS")
						.default_value(""),
				)
				.arg(Arg::new("receiver").long("receiver").value_name("ADDRESS").required(true))
				.arg(Arg::new("amount").long("amount").value_name("DECIMAL").required(true))
				.arg(
					Arg::new("bridge-policy")
						.long("bridge-policy")
						.help("Comma separated bridge fallback order")
						.value_name("TYPES")
						.value_delimiter(',')
						.value_parser(clap::builder::ValueParser::new(|s: &str| {
							s.parse::<BridgeType>()
						})),
				),
		))
		.subcommand(route_args(
			Command::new("register-adapter")
				.about("Registers a bridge adapter on the source Router")
				.arg(bridge_type_arg(true))
				.arg(Arg::new("adapter").long("adapter").value_name("ADDRESS").required(true)),
		))
		.subcommand(route_args(
			Command::new("set-default-bridge")
				.about("Sets the default bridge type on the source Gateway")
				.arg(bridge_type_arg(true)),
		))
		.subcommand(route_args(
			Command::new("set-hyperbridge-config")
				.about("Sets the Hyperbridge state machine id and destination contract")
				.arg(
					Arg::new("state-machine-id")
						.long("state-machine-id")
						.value_name("HEX")
						.required(true),
				)
				.arg(
					Arg::new("destination-contract")
						.long("destination-contract")
						.value_name("HEX")
						.required(true),
				),
		))
		.subcommand(route_args(
			Command::new("set-ccip-config")
				.about("Sets the CCIP chain selector and destination adapter")
				.arg(
					Arg::new("chain-selector")
						.long("chain-selector")
						.value_name("U64")
						.value_parser(clap::value_parser!(u64))
						.required(true),
				)
				.arg(
					Arg::new("destination-adapter")
						.long("destination-adapter")
						.value_name("HEX")
						.required(true),
				),
		))
		.subcommand(route_args(
			Command::new("set-layerzero-config")
				.about("Sets the LayerZero endpoint id, peer and enforced options")
				.arg(
					Arg::new("dst-eid")
						.long("dst-eid")
						.value_name("U32")
						.value_parser(clap::value_parser!(u32))
						.required(true),
				)
				.arg(Arg::new("peer").long("peer").value_name("BYTES32").required(true))
				.arg(Arg::new("options").long("options").value_name("HEX")),
		))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn string_arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
	matches
		.get_one::<String>(name)
		.map(String::as_str)
		.ok_or_else(|| format!("missing --{}", name).into())
}

fn optional_arg<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
	matches.get_one::<String>(name).map(String::as_str)
}

async fn run(services: &Services, name: &str, args: &ArgMatches) -> Result<()> {
	match name {
		"status" => {
			let status = services
				.resolver
				.get_status(string_arg(args, "source")?, string_arg(args, "dest")?)
				.await?;
			print_json(&status)
		}
		"overview" => {
			let pagination = Pagination {
				offset: args.get_one::<usize>("offset").copied().unwrap_or_default(),
				limit: args.get_one::<i64>("limit").copied().unwrap_or_default(),
			};
			let overview = services
				.orchestrator
				.overview(optional_arg(args, "source"), optional_arg(args, "dest"), pagination)
				.await?;
			print_json(&overview)
		}
		"recheck" => {
			let route = services
				.orchestrator
				.recheck_route(string_arg(args, "source")?, string_arg(args, "dest")?)
				.await?;
			print_json(&route)
		}
		"preflight" => {
			let preflight = services
				.orchestrator
				.preflight(string_arg(args, "source")?, string_arg(args, "dest")?)
				.await?;
			print_json(&preflight)
		}
		"autofix" => {
			let result = services
				.orchestrator
				.auto_fix(
					string_arg(args, "source")?,
					string_arg(args, "dest")?,
					args.get_one::<BridgeType>("bridge-type").copied(),
				)
				.await?;
			print_json(&result)
		}
		"check" => {
			let report = services
				.audit
				.check(string_arg(args, "source")?, optional_arg(args, "dest"))
				.await?;
			print_json(&report)
		}
		"check-contract" => {
			let report = services
				.audit
				.check_by_contract_id(string_arg(args, "id")?)
				.await?;
			print_json(&report)
		}
		"decode-revert" => {
			let data = decode_hex(string_arg(args, "data")?)?;
			print_json(&services.decoder.decode(&data))
		}
		"build-payload" => {
			let request = PaymentPayloadRequest {
				source_chain_id: string_arg(args, "source")?.to_string(),
				dest_chain_id: string_arg(args, "dest")?.to_string(),
				source_token_id: args
					.get_one::<Uuid>("token")
					.copied()
					.ok_or("missing --token")?,
				dest_token_address: string_arg(args, "dest-token")?.to_string(),
				receiver: string_arg(args, "receiver")?.to_string(),
				amount: string_arg(args, "amount")?.to_string(),
				bridge_policy: args
					.get_many::<BridgeType>("bridge-policy")
					.map(|types| types.copied().collect())
					.unwrap_or_default(),
			};
			let payload = services.payload.build(&request).await?;
			print_json(&payload)
		}
		"register-adapter" => {
			let steps = services
				.resolver
				.register_adapter(
					string_arg(args, "source")?,
					string_arg(args, "dest")?,
					*args
						.get_one::<BridgeType>("bridge-type")
						.ok_or("missing --bridge-type")?,
					string_arg(args, "adapter")?,
				)
				.await?;
			print_json(&steps)
		}
		"set-default-bridge" => {
			let steps = services
				.resolver
				.set_default_bridge_type(
					string_arg(args, "source")?,
					string_arg(args, "dest")?,
					*args
						.get_one::<BridgeType>("bridge-type")
						.ok_or("missing --bridge-type")?,
				)
				.await?;
			print_json(&steps)
		}
		"set-hyperbridge-config" => {
			let steps = services
				.resolver
				.set_hyperbridge_config(
					string_arg(args, "source")?,
					string_arg(args, "dest")?,
					string_arg(args, "state-machine-id")?,
					string_arg(args, "destination-contract")?,
				)
				.await?;
			print_json(&steps)
		}
		"set-ccip-config" => {
			let steps = services
				.resolver
				.set_ccip_config(
					string_arg(args, "source")?,
					string_arg(args, "dest")?,
					*args
						.get_one::<u64>("chain-selector")
						.ok_or("missing --chain-selector")?,
					string_arg(args, "destination-adapter")?,
				)
				.await?;
			print_json(&steps)
		}
		"set-layerzero-config" => {
			let steps = services
				.resolver
				.set_layerzero_config(
					string_arg(args, "source")?,
					string_arg(args, "dest")?,
					*args.get_one::<u32>("dst-eid").ok_or("missing --dst-eid")?,
					string_arg(args, "peer")?,
					optional_arg(args, "options"),
				)
				.await?;
			print_json(&steps)
		}
		other => Err(format!("unknown subcommand {}", other).into()),
	}
}

/// Main entry point for the bridge orchestrator.
///
/// # Errors
/// Returns an error if configuration, service initialization or the requested
/// operation fails.
#[tokio::main]
async fn main() -> Result<()> {
	let matches = cli().get_matches();

	// Load environment variables from .env file
	dotenv().ok();

	let (name, args) = matches
		.subcommand()
		.ok_or("a subcommand is required")?;

	setup_logging(optional_arg(args, "log-level"))?;

	let mut config = AppConfig::from_env()?;
	if let Some(dir) = optional_arg(args, "config-dir") {
		config.config_dir = PathBuf::from(dir);
	}

	let services = initialize_services(&config)?;
	info!(command = name, "Running");

	if let Err(e) = run(&services, name, args).await {
		error!(command = name, error = %e, "Command failed");
		return Err(e);
	}
	Ok(())
}
