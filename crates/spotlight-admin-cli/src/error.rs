use std::path::PathBuf;

/// Errors raised while preparing the static output.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	#[error("output directory {0} does not exist (build the site first)")]
	MissingDirectory(PathBuf),

	#[error("entry document {0} not found")]
	MissingEntry(PathBuf),

	#[error("entry document {0} has no <head> element")]
	MalformedDocument(PathBuf),

	#[error("I/O error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid asset prefix '{prefix}': {source}")]
	AssetPrefix {
		prefix: String,
		#[source]
		source: regex::Error,
	},
}

pub type Result<T> = std::result::Result<T, BuildError>;

/// Attaches the path to an I/O error.
pub(crate) fn io_error(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> BuildError {
	let path = path.into();
	move |source| BuildError::Io { path, source }
}
