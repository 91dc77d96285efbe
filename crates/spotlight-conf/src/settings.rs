//! Site, server and logging settings.
//!
//! Settings are assembled from [`sources`] in priority order:
//!
//! 1. built-in defaults
//! 2. a TOML file (`Spotlight.toml` unless another path is given)
//! 3. `SPOTLIGHT_<SECTION>__<KEY>` environment variables
//!
//! ```toml
//! [site]
//! mode = "hash"
//! base_path = "/show"
//! cname = "readysetstartupuk.com"
//!
//! [server]
//! addr = "127.0.0.1:5000"
//! static_dir = "dist/public"
//! application_deadline = "2025-09-30T23:59:59Z"
//!
//! [logging]
//! level = "info"
//! ```

pub mod sources;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spotlight_router::{BasePath, RouterConfig, RoutingMode};

use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource, merge_value};

/// Default settings file name, looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "Spotlight.toml";

/// Prefix of settings environment variables.
pub const ENV_PREFIX: &str = "SPOTLIGHT_";

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},

	#[error("invalid settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("invalid value for '{key}': {message}")]
	Invalid { key: &'static str, message: String },
}

/// `[site]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
	/// `path` or `hash`.
	pub mode: RoutingMode,
	/// Deployment prefix, empty for a custom domain.
	pub base_path: BasePath,
	/// Host prefix stripped by the redirect shim. Defaults to `base_path`.
	pub strip_prefix: Option<BasePath>,
	/// Asset prefix from an earlier deployment, rewritten to `base_path`.
	pub legacy_asset_prefix: Option<String>,
	/// Custom domain written to `CNAME`.
	pub cname: Option<String>,
}

impl Default for SiteSettings {
	fn default() -> Self {
		Self {
			mode: RoutingMode::Path,
			base_path: BasePath::root(),
			strip_prefix: None,
			legacy_asset_prefix: None,
			cname: None,
		}
	}
}

impl SiteSettings {
	/// Router configuration for these settings.
	pub fn router_config(&self) -> RouterConfig {
		RouterConfig::new(self.mode).with_base_path(self.base_path.clone())
	}
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
	pub addr: SocketAddr,
	/// Directory of the built site.
	pub static_dir: PathBuf,
	/// Serve `index.html` for extension-less paths that match no file.
	pub spa_fallback: bool,
	/// Application deadline. The countdown endpoint serves a fixed value
	/// when unset.
	pub application_deadline: Option<DateTime<Utc>>,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
			static_dir: PathBuf::from("dist/public"),
			spa_fallback: true,
			application_deadline: None,
		}
	}
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Default filter directive, overridden by `RUST_LOG`.
	pub level: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
		}
	}
}

/// All settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub site: SiteSettings,
	pub server: ServerSettings,
	pub logging: LoggingSettings,
}

impl Settings {
	/// Starts an empty builder.
	pub fn builder() -> SettingsBuilder {
		SettingsBuilder::new()
	}

	/// Loads defaults, the TOML file and the environment.
	///
	/// With `path` set the file must exist; otherwise `Spotlight.toml` is
	/// read when present.
	pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
		let file = match path {
			Some(path) => TomlFileSource::new(path).required(true),
			None => TomlFileSource::new(DEFAULT_SETTINGS_FILE),
		};
		Self::builder()
			.add_source(defaults_source()?)
			.add_source(file)
			.add_source(EnvSource::new(ENV_PREFIX))
			.build()
	}

	/// Checks values serde cannot.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if let Some(cname) = &self.site.cname
			&& (cname.trim().is_empty() || cname.contains(['/', ':', ' ']))
		{
			return Err(SettingsError::Invalid {
				key: "site.cname",
				message: format!("'{}' is not a bare domain name", cname),
			});
		}
		if self.logging.level.trim().is_empty() {
			return Err(SettingsError::Invalid {
				key: "logging.level",
				message: "must not be empty".to_string(),
			});
		}
		Ok(())
	}
}

fn defaults_source() -> Result<DefaultSource, SettingsError> {
	DefaultSource::from_serializable(&Settings::default()).map_err(|error| SettingsError::Source {
		source_name: "Default values".to_string(),
		error,
	})
}

/// Builder merging configuration sources by priority.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a source.
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merges all sources, deserializes and validates.
	pub fn build(mut self) -> Result<Settings, SettingsError> {
		// Stable sort keeps insertion order for equal priorities
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Value::Object(serde_json::Map::new());
		for source in &self.sources {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(source = %source.description(), keys = values.len(), "loaded settings source");
			merge_value(&mut merged, Value::Object(values.into_iter().collect()));
		}

		let settings: Settings = serde_json::from_value(merged)?;
		settings.validate()?;
		Ok(settings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = Settings::builder().build().unwrap();
		assert_eq!(settings, Settings::default());
		assert_eq!(settings.server.addr.port(), 5000);
		assert!(settings.server.spa_fallback);
		assert_eq!(settings.site.mode, RoutingMode::Path);
	}

	#[rstest]
	fn test_router_config_from_site() {
		let site = SiteSettings {
			mode: RoutingMode::Hash,
			base_path: BasePath::new("show"),
			..SiteSettings::default()
		};
		let config = site.router_config();
		assert_eq!(config.mode, RoutingMode::Hash);
		assert_eq!(config.base_path.as_str(), "/show");
	}

	#[rstest]
	#[case("readysetstartupuk.com", true)]
	#[case("https://readysetstartupuk.com", false)]
	#[case("example.com/path", false)]
	#[case("  ", false)]
	fn test_cname_validation(#[case] cname: &str, #[case] valid: bool) {
		let mut settings = Settings::default();
		settings.site.cname = Some(cname.to_string());
		assert_eq!(settings.validate().is_ok(), valid);
	}

	#[rstest]
	fn test_deadline_parses_rfc3339() {
		let settings: Settings = serde_json::from_value(serde_json::json!({
			"server": {"application_deadline": "2025-09-30T23:59:59Z"}
		}))
		.unwrap();
		assert_eq!(
			settings.server.application_deadline.unwrap().to_rfc3339(),
			"2025-09-30T23:59:59+00:00"
		);
	}

	#[rstest]
	fn test_invalid_mode_is_rejected() {
		let result: Result<Settings, _> = serde_json::from_value(serde_json::json!({
			"site": {"mode": "fragment"}
		}));
		assert!(result.is_err());
	}
}
