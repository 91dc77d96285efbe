//! Error types for the form backend.

/// Errors raised while serving requests.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("HTTP connection error: {0}")]
	Hyper(#[from] hyper::Error),

	#[error("Failed to build response: {0}")]
	Http(#[from] http::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
