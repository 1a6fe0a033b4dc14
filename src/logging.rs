use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "bookshelf=info,tower_http=info";

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging(format: LogFormat) -> Result<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
	let registry = tracing_subscriber::registry().with(filter);

	match format {
		LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
		LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
	}
	.context("failed to install tracing subscriber")
}
