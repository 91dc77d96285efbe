//! Configuration for the Spotlight site, its server and build tools.
//!
//! See [`settings`] for the file format and layering rules.

pub mod settings;

pub use settings::sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
pub use settings::{
	DEFAULT_SETTINGS_FILE, ENV_PREFIX, LoggingSettings, ServerSettings, Settings, SettingsBuilder,
	SettingsError, SiteSettings,
};
