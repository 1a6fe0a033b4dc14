use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "127.0.0.1:9000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
	Pretty,
	Json,
}

impl std::fmt::Display for LogFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LogFormat::Pretty => write!(f, "pretty"),
			LogFormat::Json => write!(f, "json"),
		}
	}
}

#[derive(Debug, Clone, Parser)]
#[command(name = "bookshelf", version, about = "In-memory bookshelf catalog over HTTP")]
pub struct CliArgs {
	/// Address the HTTP listener binds to
	#[arg(long, env = "BOOKSHELF_BIND", default_value = DEFAULT_BIND)]
	pub bind: SocketAddr,

	/// Log output format
	#[arg(long, env = "BOOKSHELF_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
	pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub bind: SocketAddr,
	pub log_format: LogFormat,
}

impl ServerConfig {
	pub fn from_args(args: CliArgs) -> Self {
		let CliArgs { bind, log_format } = args;
		Self { bind, log_format }
	}
}
