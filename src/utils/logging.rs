//! Logging setup.
//!
//! Events go through a `tracing_subscriber` registry with an [`EnvFilter`]. The level
//! comes from an explicit override (the `--log-level` flag), then `RUST_LOG`, then `info`.
//! Output is the compact formatter on stderr so JSON reports on stdout stay parseable.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

type LoggingResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

const DEFAULT_LEVEL: &str = "info";

fn build_filter(level: Option<&str>) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
	match level {
		Some(level) => EnvFilter::try_new(level),
		None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))),
	}
}

/// Installs the global subscriber writing to stderr
pub fn setup_logging(level: Option<&str>) -> LoggingResult {
	setup_logging_with_writer(level, std::io::stderr)
}

/// Installs the global subscriber writing to `writer`
pub fn setup_logging_with_writer<W>(level: Option<&str>, writer: W) -> LoggingResult
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	let filter = build_filter(level)?;

	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(false)
						.compact(),
				),
		)
		.try_init()?;
	Ok(())
}
