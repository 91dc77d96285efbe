//! Reconciling host URLs with the router's canonical scheme.
//!
//! A static host knows nothing about client-side routes. When it serves its
//! fallback document for an unknown path, the page runs [`RedirectShim::apply`]
//! which maps the host URL to a [`Location`] and rewrites the address bar:
//!
//! - hash mode: `/show/judges` becomes `<origin>/#/judges`
//! - path mode: `/judges.html` becomes `<origin>/?path=/judges`, which
//!   [`RedirectShim::restore`] turns back into `/judges` once the entry
//!   document has loaded. `/index.html` goes straight to the entry URL.
//!
//! URLs that are already canonical, the root, and static assets are left
//! alone, so running the shim again after a redirect never loops.

use url::Url;
use url::form_urlencoded;

use crate::config::{BasePath, RouterConfig, RoutingMode};
use crate::error::RouterError;
use crate::history::{History, hash_of};
use crate::location::Location;

/// Query parameter carrying the location in the path-mode variant.
pub const PATH_PARAM: &str = "path";

const ASSET_EXTENSIONS: &[&str] = &[
	"png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "ico", "css", "js", "mjs", "map", "json",
	"wasm", "woff", "woff2", "ttf", "otf", "mp4", "webm", "mp3", "pdf", "txt", "xml",
];

/// What the shim decided for a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShimOutcome {
	/// The URL is already usable; boot the router at this location.
	Stay(Location),
	/// A static asset. Never redirected.
	Passthrough,
	/// Replace the address with `target` and let the entry document boot.
	Redirect {
		/// Absolute URL to load.
		target: String,
		/// The location the target encodes.
		location: Location,
	},
}

/// Maps host URLs onto the router's URL scheme.
#[derive(Debug, Clone)]
pub struct RedirectShim {
	config: RouterConfig,
	strip_prefix: BasePath,
	entry: String,
	asset_prefixes: Vec<String>,
}

impl RedirectShim {
	/// Creates a shim for the given routing configuration.
	///
	/// By default the host prefix to strip is the base path, the entry
	/// document lives at the base path root and `/assets/` is the only asset
	/// prefix.
	pub fn new(config: RouterConfig) -> Self {
		let entry = config.base_path.join(&Location::root());
		Self {
			strip_prefix: config.base_path.clone(),
			config,
			entry,
			asset_prefixes: vec!["/assets/".to_string()],
		}
	}

	/// Sets the host-specific prefix removed before mapping a pathname.
	pub fn strip_prefix(mut self, prefix: impl Into<BasePath>) -> Self {
		self.strip_prefix = prefix.into();
		self
	}

	/// Sets the path of the SPA entry document.
	pub fn entry(mut self, entry: impl AsRef<str>) -> Self {
		self.entry = Location::new(entry).into_string();
		self
	}

	/// Adds a pathname prefix that identifies static assets.
	pub fn asset_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.asset_prefixes.push(prefix.into());
		self
	}

	/// Returns the routing configuration.
	pub fn config(&self) -> &RouterConfig {
		&self.config
	}

	fn is_asset(&self, path: &str) -> bool {
		let stripped = self.strip_prefix.strip(path).unwrap_or(path);
		if self
			.asset_prefixes
			.iter()
			.any(|prefix| path.starts_with(prefix.as_str()) || stripped.starts_with(prefix.as_str()))
		{
			return true;
		}

		let last = path.rsplit('/').next().unwrap_or_default();
		match last.rsplit_once('.') {
			Some((_, ext)) => ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
			None => false,
		}
	}

	/// Derives the location a percent-encoded host pathname stands for.
	fn host_location(&self, path: &str) -> Location {
		let rest = self.strip_prefix.strip(path).unwrap_or(path);
		let rest = rest
			.strip_suffix("/index.html")
			.or_else(|| rest.strip_suffix(".html"))
			.unwrap_or(rest);
		let rest = if rest.len() > 1 {
			rest.trim_end_matches('/')
		} else {
			rest
		};
		Location::from_encoded(rest)
	}

	/// Decides what to do with `url`. Pure.
	pub fn resolve(&self, url: &Url) -> ShimOutcome {
		let path = url.path();
		if self.is_asset(path) {
			return ShimOutcome::Passthrough;
		}

		match self.config.mode {
			RoutingMode::Hash => {
				let hash = hash_of(url);
				if !hash.is_empty() {
					return ShimOutcome::Stay(Location::from_fragment(&hash));
				}
				let location = self.host_location(path);
				if location.is_root() {
					return ShimOutcome::Stay(location);
				}
				let query = url.query().map(|q| format!("?{}", q)).unwrap_or_default();
				ShimOutcome::Redirect {
					target: format!(
						"{}{}{}#{}",
						url.origin().ascii_serialization(),
						self.entry,
						query,
						location
					),
					location,
				}
			}
			RoutingMode::Path => {
				if let Some(location) = path_param(url) {
					return ShimOutcome::Stay(location);
				}
				let location = self.host_location(path);
				// Stay only where the store will read the same location back
				if self.config.base_path.strip(path).map(Location::from_encoded).as_ref()
					== Some(&location)
				{
					return ShimOutcome::Stay(location);
				}
				let origin = url.origin().ascii_serialization();
				if location.is_root() {
					let query = url.query().map(|q| format!("?{}", q)).unwrap_or_default();
					return ShimOutcome::Redirect {
						target: format!("{}{}{}", origin, self.entry, query),
						location,
					};
				}
				let query = form_urlencoded::Serializer::new(String::new())
					.append_pair(PATH_PARAM, location.as_str())
					.finish();
				ShimOutcome::Redirect {
					target: format!("{}{}?{}", origin, self.entry, query),
					location,
				}
			}
		}
	}

	/// Resolves the history's current URL and performs any redirect.
	pub fn apply(&self, history: &dyn History) -> Result<ShimOutcome, RouterError> {
		let url = history.current_url()?;
		let outcome = self.resolve(&url);
		if let ShimOutcome::Redirect { target, location } = &outcome {
			tracing::info!(from = %url, to = %target, %location, "redirecting into the app");
			history.location_replace(target)?;
		}
		Ok(outcome)
	}

	/// Recovers a location carried in the `path` query parameter.
	///
	/// The parameter is removed from the current entry with `replace_state`
	/// and the recovered location is pushed, so going back lands on the entry
	/// document. Returns `None` when there is nothing to restore.
	pub fn restore(&self, history: &dyn History) -> Result<Option<Location>, RouterError> {
		let mut url = history.current_url()?;
		let Some(location) = path_param(&url) else {
			return Ok(None);
		};

		let remaining: Vec<(String, String)> = url
			.query_pairs()
			.filter(|(key, _)| key != PATH_PARAM)
			.map(|(key, value)| (key.into_owned(), value.into_owned()))
			.collect();
		if remaining.is_empty() {
			url.set_query(None);
		} else {
			url.query_pairs_mut().clear().extend_pairs(remaining);
		}
		history.replace_state(url.as_str())?;

		let target = match self.config.mode {
			RoutingMode::Path => self.config.base_path.join(&location),
			RoutingMode::Hash => format!("{}#{}", self.entry, location),
		};
		history.push_state(&target)?;
		tracing::debug!(%location, "restored location from query");
		Ok(Some(location))
	}
}

fn path_param(url: &Url) -> Option<Location> {
	url.query_pairs()
		.find(|(key, _)| key == PATH_PARAM)
		.map(|(_, value)| Location::new(value))
}
