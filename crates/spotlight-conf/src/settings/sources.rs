//! Configuration sources for layered settings
//!
//! Sources are merged in priority order (environment variables > TOML file >
//! defaults). Each source yields a map of top-level sections to JSON values.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Environment variable configuration source
///
/// `SPOTLIGHT_SERVER__ADDR=0.0.0.0:8080` becomes `server.addr`. A double
/// underscore separates nesting levels; keys are lowercased.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Creates a source reading variables that start with `prefix`.
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	/// Converts a raw value: `true`/`false` become booleans, anything else
	/// stays a string and is interpreted by the settings types.
	fn parse_value(raw: &str) -> Value {
		match raw.trim().to_ascii_lowercase().as_str() {
			"true" => Value::Bool(true),
			"false" => Value::Bool(false),
			_ => Value::String(raw.to_string()),
		}
	}

	fn load_from<I>(&self, vars: I) -> IndexMap<String, Value>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let mut config = IndexMap::new();

		for (key, value) in vars {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let path: Vec<String> = clean_key
				.split("__")
				.map(|part| part.to_lowercase())
				.collect();
			let Some((section, rest)) = path.split_first().filter(|_| !path.iter().any(String::is_empty))
			else {
				tracing::warn!(variable = %key, "ignoring malformed settings variable");
				continue;
			};
			let entry = config
				.entry(section.clone())
				.or_insert_with(|| Value::Object(Map::new()));
			insert_path(entry, rest, Self::parse_value(&value));
		}

		config
	}
}

fn insert_path(target: &mut Value, path: &[String], value: Value) {
	let Some((head, tail)) = path.split_first() else {
		*target = value;
		return;
	};
	if !target.is_object() {
		*target = Value::Object(Map::new());
	}
	if let Value::Object(map) = target {
		let child = map.entry(head.clone()).or_insert(Value::Null);
		insert_path(child, tail, value);
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.load_from(std::env::vars()))
	}

	fn priority(&self) -> u8 {
		100 // Highest priority
	}

	fn description(&self) -> String {
		format!("Environment variables ({}*)", self.prefix)
	}
}

/// TOML file configuration source
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	/// Creates an optional source. A missing file yields no values.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			required: false,
		}
	}

	/// Makes a missing file an error.
	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Returns the file path.
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.required && !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
			path: self.path.clone(),
			source,
		})?;
		let toml_value: toml::Value = toml::from_str(&content)?;

		// Convert TOML value to JSON value
		let json_value = serde_json::to_value(&toml_value)?;
		let map = json_value
			.as_object()
			.ok_or_else(|| SourceError::Parse("Expected table at root".to_string()))?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50 // Medium priority
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Creates a source from any serializable value whose JSON form is an
	/// object.
	pub fn from_serializable<T: Serialize>(defaults: &T) -> Result<Self, SourceError> {
		let value = serde_json::to_value(defaults)?;
		let Value::Object(map) = value else {
			return Err(SourceError::Parse(
				"defaults must serialize to an object".to_string(),
			));
		};
		Ok(Self {
			values: map.into_iter().collect(),
		})
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0 // Lowest priority
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// Merges `overlay` into `base`. Objects merge key by key; any other value
/// replaces what was there.
pub fn merge_value(base: &mut Value, overlay: Value) {
	match (base, overlay) {
		(Value::Object(base), Value::Object(overlay)) => {
			for (key, value) in overlay {
				match base.get_mut(&key) {
					Some(existing) => merge_value(existing, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		(base, overlay) => *base = overlay,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;
	use std::io::Write;

	fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[rstest]
	fn test_env_source_nests_sections() {
		let source = EnvSource::new("SPOTLIGHT_");
		let config = source.load_from(vars(&[
			("SPOTLIGHT_SITE__MODE", "hash"),
			("SPOTLIGHT_SERVER__SPA_FALLBACK", "FALSE"),
			("OTHER_SITE__MODE", "path"),
		]));

		assert_eq!(config.len(), 2);
		assert_eq!(config["site"], json!({"mode": "hash"}));
		assert_eq!(config["server"], json!({"spa_fallback": false}));
	}

	#[rstest]
	fn test_env_source_skips_malformed_keys() {
		let source = EnvSource::new("SPOTLIGHT_");
		let config = source.load_from(vars(&[("SPOTLIGHT_SITE____MODE", "hash")]));
		assert!(config.is_empty());
	}

	#[rstest]
	fn test_toml_source_reads_tables() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[site]\nmode = \"hash\"\nbase_path = \"/show\"").unwrap();

		let config = TomlFileSource::new(file.path()).load().unwrap();
		assert_eq!(config["site"], json!({"mode": "hash", "base_path": "/show"}));
	}

	#[rstest]
	fn test_toml_source_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Spotlight.toml");

		assert!(TomlFileSource::new(&path).load().unwrap().is_empty());
		assert!(matches!(
			TomlFileSource::new(&path).required(true).load(),
			Err(SourceError::Io { .. })
		));
	}

	#[rstest]
	fn test_toml_source_rejects_invalid_syntax() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[site\nmode = ").unwrap();
		assert!(matches!(
			TomlFileSource::new(file.path()).load(),
			Err(SourceError::Toml(_))
		));
	}

	#[rstest]
	fn test_merge_value_is_deep() {
		let mut base = json!({"site": {"mode": "path", "base_path": ""}, "logging": {"level": "info"}});
		merge_value(&mut base, json!({"site": {"mode": "hash"}}));
		assert_eq!(
			base,
			json!({"site": {"mode": "hash", "base_path": ""}, "logging": {"level": "info"}})
		);
	}

	#[rstest]
	fn test_priorities_are_ordered() {
		let defaults = DefaultSource::from_serializable(&json!({})).unwrap();
		assert!(defaults.priority() < TomlFileSource::new("x.toml").priority());
		assert!(TomlFileSource::new("x.toml").priority() < EnvSource::new("SPOTLIGHT_").priority());
	}
}
