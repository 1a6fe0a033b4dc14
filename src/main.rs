use bookshelf::{init_logging, serve, CliArgs, ServerConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// a missing .env is fine
	dotenvy::dotenv().ok();

	let config = ServerConfig::from_args(CliArgs::parse());
	init_logging(config.log_format)?;

	serve(config).await
}
