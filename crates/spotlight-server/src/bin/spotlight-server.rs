//! Spotlight server
//!
//! Serves the built site and the form API.
//!
//! ```bash
//! spotlight-server --config Spotlight.toml
//! spotlight-server --addr 0.0.0.0:8080 --static-dir dist/public -v
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use spotlight_conf::Settings;
use spotlight_server::{ShutdownCoordinator, serve_with_shutdown, site_handler};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spotlight-server")]
#[command(about = "Serve the Spotlight site and its form API", long_about = None)]
#[command(version)]
struct Cli {
	/// Settings file (defaults to ./Spotlight.toml when present)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Address to listen on (overrides server.addr)
	#[arg(long, value_name = "ADDR")]
	addr: Option<SocketAddr>,

	/// Directory of the built site (overrides server.static_dir)
	#[arg(long, value_name = "DIR")]
	static_dir: Option<PathBuf>,

	/// Seconds to wait for the server to stop on Ctrl-C
	#[arg(long, default_value_t = 10)]
	shutdown_timeout: u64,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,
}

fn init_tracing(default_level: &str, verbosity: u8) {
	let level = match verbosity {
		0 => default_level,
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer())
		.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
	if let Some(addr) = cli.addr {
		settings.server.addr = addr;
	}
	if let Some(static_dir) = cli.static_dir {
		settings.server.static_dir = static_dir;
	}
	init_tracing(&settings.logging.level, cli.verbosity);

	tracing::info!(
		static_dir = %settings.server.static_dir.display(),
		spa_fallback = settings.server.spa_fallback,
		"starting server"
	);

	let coordinator = ShutdownCoordinator::new(Duration::from_secs(cli.shutdown_timeout));
	serve_with_shutdown(settings.server.addr, site_handler(&settings), coordinator)
		.await
		.with_context(|| format!("server on {} failed", settings.server.addr))?;

	tracing::info!("server stopped");
	Ok(())
}
