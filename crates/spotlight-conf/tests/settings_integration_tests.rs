//! Integration tests for layered settings
//!
//! Environment variables are process-wide, so every test that sets them runs
//! under `#[serial]`.

use std::env;
use std::fs;

use rstest::rstest;
use serial_test::serial;
use spotlight_conf::{Settings, SettingsError};
use spotlight_router::RoutingMode;
use tempfile::TempDir;

/// Sets variables for the duration of a test and removes them on drop.
struct EnvGuard {
	keys: Vec<&'static str>,
}

impl EnvGuard {
	fn set(pairs: &[(&'static str, &str)]) -> Self {
		for (key, value) in pairs {
			// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
			// Callers run under #[serial] to ensure exclusive access.
			unsafe {
				env::set_var(key, value);
			}
		}
		Self {
			keys: pairs.iter().map(|(key, _)| *key).collect(),
		}
	}
}

impl Drop for EnvGuard {
	fn drop(&mut self) {
		for key in &self.keys {
			// SAFETY: See EnvGuard::set.
			unsafe {
				env::remove_var(key);
			}
		}
	}
}

fn write_settings(dir: &TempDir, content: &str) -> std::path::PathBuf {
	let path = dir.path().join("Spotlight.toml");
	fs::write(&path, content).unwrap();
	path
}

#[rstest]
#[serial]
fn test_file_overrides_defaults() {
	let dir = TempDir::new().unwrap();
	let path = write_settings(
		&dir,
		r#"
[site]
mode = "hash"
base_path = "/show/"
cname = "readysetstartupuk.com"

[server]
addr = "0.0.0.0:8080"
"#,
	);

	let settings = Settings::load(Some(&path)).unwrap();

	assert_eq!(settings.site.mode, RoutingMode::Hash);
	assert_eq!(settings.site.base_path.as_str(), "/show");
	assert_eq!(settings.site.cname.as_deref(), Some("readysetstartupuk.com"));
	assert_eq!(settings.server.addr.port(), 8080);
	// Untouched keys keep their defaults
	assert!(settings.server.spa_fallback);
	assert_eq!(settings.logging.level, "info");
}

#[rstest]
#[serial]
fn test_environment_overrides_file() {
	let dir = TempDir::new().unwrap();
	let path = write_settings(&dir, "[site]\nmode = \"hash\"\n");
	let _env = EnvGuard::set(&[
		("SPOTLIGHT_SITE__MODE", "path"),
		("SPOTLIGHT_SERVER__SPA_FALLBACK", "false"),
		("SPOTLIGHT_LOGGING__LEVEL", "debug"),
	]);

	let settings = Settings::load(Some(&path)).unwrap();

	assert_eq!(settings.site.mode, RoutingMode::Path);
	assert!(!settings.server.spa_fallback);
	assert_eq!(settings.logging.level, "debug");
}

#[rstest]
#[serial]
fn test_missing_explicit_file_is_an_error() {
	let dir = TempDir::new().unwrap();
	let result = Settings::load(Some(&dir.path().join("absent.toml")));
	assert!(matches!(result, Err(SettingsError::Source { .. })));
}

#[rstest]
#[serial]
fn test_invalid_environment_value() {
	let _env = EnvGuard::set(&[("SPOTLIGHT_SITE__MODE", "fragment")]);
	let result = Settings::load(None);
	assert!(matches!(result, Err(SettingsError::Deserialize(_))));
}

#[rstest]
#[serial]
fn test_invalid_cname_in_file() {
	let dir = TempDir::new().unwrap();
	let path = write_settings(&dir, "[site]\ncname = \"https://example.com\"\n");
	let result = Settings::load(Some(&path));
	assert!(matches!(
		result,
		Err(SettingsError::Invalid {
			key: "site.cname",
			..
		})
	));
}
