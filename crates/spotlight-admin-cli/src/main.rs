//! Spotlight Admin CLI
//!
//! ## Usage
//!
//! ```bash
//! spotlight-admin build-routes --dir dist/public
//! spotlight-admin fix-asset-paths --dir dist/public
//! spotlight-admin prepare-deploy --dir dist/public --cname readysetstartupuk.com
//! spotlight-admin routes
//! ```

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use spotlight_admin::{build_routes, fix_asset_paths, prepare_deploy, route_table};
use spotlight_conf::Settings;
use spotlight_site::SitePage;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spotlight-admin")]
#[command(about = "Spotlight site build and deploy utility", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Settings file (defaults to ./Spotlight.toml when present)
	#[arg(short, long, global = true, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Write per-route entry documents and the 404.html fallback
	BuildRoutes {
		/// Build output directory
		#[arg(long, value_name = "DIR", default_value = "dist/public")]
		dir: PathBuf,
	},

	/// Rewrite asset references from the legacy deployment prefix
	FixAssetPaths {
		/// Build output directory
		#[arg(long, value_name = "DIR", default_value = "dist/public")]
		dir: PathBuf,

		/// Legacy prefix (overrides site.legacy_asset_prefix)
		#[arg(long, value_name = "PREFIX")]
		prefix: Option<String>,
	},

	/// Write CNAME and .nojekyll for the static host
	PrepareDeploy {
		/// Build output directory
		#[arg(long, value_name = "DIR", default_value = "dist/public")]
		dir: PathBuf,

		/// Custom domain (overrides site.cname)
		#[arg(long, value_name = "DOMAIN")]
		cname: Option<String>,
	},

	/// Print the route table
	Routes,
}

fn init_tracing(verbosity: u8) {
	let level = match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn report(label: &str, root: &Path, written: &[PathBuf]) {
	for path in written {
		let shown = path.strip_prefix(root).unwrap_or(path);
		println!("{} {}", label.green(), shown.display());
	}
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
	let config = settings.site.router_config();

	match cli.command {
		Commands::BuildRoutes { dir } => {
			let written = build_routes(&dir, &config)?;
			report("Created", &dir, &written);
			println!("{}", "Route HTML generation complete!".bold());
		}
		Commands::FixAssetPaths { dir, prefix } => {
			let Some(prefix) = prefix.or(settings.site.legacy_asset_prefix) else {
				anyhow::bail!("no legacy prefix given (set site.legacy_asset_prefix or pass --prefix)");
			};
			let changed = fix_asset_paths(&dir, &prefix, &config.base_path)?;
			report("Updated", &dir, &changed);
			println!("{} file(s) updated", changed.len().to_string().green());
		}
		Commands::PrepareDeploy { dir, cname } => {
			let cname = cname.or(settings.site.cname);
			let written = prepare_deploy(&dir, cname.as_deref())?;
			report("Created", &dir, &written);
			println!("{}", "Deployment preparation complete!".bold());
		}
		Commands::Routes => {
			println!(
				"{} mode, base path {}",
				config.mode.to_string().cyan(),
				config.base_path.to_string().cyan()
			);
			for entry in route_table(&config) {
				println!("  {:<10} {:<12} {}", entry.name, entry.pattern, entry.href.bold());
			}
			println!(
				"  {:<10} {:<12} {}",
				SitePage::NotFound.name(),
				"*",
				"(fallback)".dimmed()
			);
		}
	}
	Ok(())
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	if let Err(e) = run(cli) {
		eprintln!("{}: {:#}", "Error".red(), e);
		process::exit(1);
	}
}
