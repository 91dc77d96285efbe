//! Routing mode and deployment base path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::location::Location;

/// How the location is encoded in the browser URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
	/// Locations are literal pathnames (`/judges`). The host must serve the
	/// entry document for every route.
	#[default]
	Path,
	/// Locations live in the fragment (`#/judges`). The host only ever sees
	/// the entry document path.
	Hash,
}

impl RoutingMode {
	/// Returns the lowercase name used in configuration files.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Path => "path",
			Self::Hash => "hash",
		}
	}
}

impl fmt::Display for RoutingMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for RoutingMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"path" | "history" => Ok(Self::Path),
			"hash" => Ok(Self::Hash),
			other => Err(format!("unknown routing mode '{}' (expected 'path' or 'hash')", other)),
		}
	}
}

/// The URL prefix a site is served under.
///
/// An empty base path means the site lives at the domain root (custom
/// domain). A project sub-path deployment uses something like `/show`.
/// The stored value has a leading slash and no trailing slash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
	/// Creates a normalized base path.
	///
	/// # Example
	///
	/// ```
	/// use spotlight_router::BasePath;
	///
	/// assert_eq!(BasePath::new("show/").as_str(), "/show");
	/// assert!(BasePath::new("/").is_root());
	/// ```
	pub fn new(path: impl AsRef<str>) -> Self {
		let trimmed = path.as_ref().trim().trim_matches('/');
		if trimmed.is_empty() {
			Self::root()
		} else {
			Self(format!("/{}", trimmed))
		}
	}

	/// The domain-root base path.
	pub fn root() -> Self {
		Self(String::new())
	}

	/// Returns whether the site is served from the domain root.
	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the prefix, empty at the root.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Removes the prefix from a host pathname.
	///
	/// Returns `None` when the pathname lies outside the prefix.
	pub fn strip<'a>(&self, pathname: &'a str) -> Option<&'a str> {
		if self.is_root() {
			return Some(pathname);
		}
		let rest = pathname.strip_prefix(self.0.as_str())?;
		if rest.is_empty() {
			Some("/")
		} else if rest.starts_with('/') {
			Some(rest)
		} else {
			// `/showcase` must not match the `/show` prefix
			None
		}
	}

	/// Prefixes a location with the base path.
	pub fn join(&self, location: &Location) -> String {
		format!("{}{}", self.0, location)
	}

	/// Resolves an asset reference against the base path.
	///
	/// Absolute URLs pass through. A `legacy_prefix` left over from an earlier
	/// deployment (for example `/ReadySetStartup/`) is replaced by the current
	/// base path, and the base path is never applied twice.
	pub fn asset_url(&self, path: &str, legacy_prefix: Option<&str>) -> String {
		if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
			return path.to_string();
		}

		let mut clean = path;
		if let Some(legacy) = legacy_prefix.map(|p| p.trim_end_matches('/'))
			&& !legacy.is_empty()
			&& let Some(rest) = clean.strip_prefix(legacy)
			&& (rest.is_empty() || rest.starts_with('/'))
		{
			clean = rest;
		}

		let location = Location::new(clean);
		if self.strip(location.as_str()).is_some() && !self.is_root() {
			return location.into_string();
		}
		self.join(&location)
	}
}

impl fmt::Display for BasePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_root() {
			f.write_str("/")
		} else {
			f.write_str(&self.0)
		}
	}
}

impl From<&str> for BasePath {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

impl Serialize for BasePath {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for BasePath {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Ok(Self::new(raw))
	}
}

/// Startup configuration shared by the store, navigator and links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
	/// Path- or hash-based routing.
	pub mode: RoutingMode,
	/// Deployment prefix.
	pub base_path: BasePath,
}

impl RouterConfig {
	/// Creates a configuration for the given mode at the domain root.
	pub fn new(mode: RoutingMode) -> Self {
		Self {
			mode,
			base_path: BasePath::root(),
		}
	}

	/// Sets the base path.
	pub fn with_base_path(mut self, base_path: impl Into<BasePath>) -> Self {
		self.base_path = base_path.into();
		self
	}

	/// Address of `location` as written in links for this mode.
	pub fn href(&self, location: &Location) -> String {
		match self.mode {
			RoutingMode::Path => self.base_path.join(location),
			RoutingMode::Hash => format!("{}#{}", self.base_path.join(&Location::root()), location),
		}
	}
}
