//! Error types for client-side routing.

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// A route pattern could not be compiled.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The rejected pattern string.
		pattern: String,
		/// Why it was rejected.
		reason: String,
	},
	/// Reverse lookup of an unknown route name.
	#[error("Invalid route name: {0}")]
	InvalidRouteName(String),
	/// Missing parameter for reverse URL.
	#[error("Missing parameter: {0}")]
	MissingParameter(String),
	/// A URL could not be parsed or joined.
	#[error("Invalid URL: {0}")]
	InvalidUrl(String),
	/// The history backend rejected a navigation.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// A browser API (window, history, location) is not reachable.
	#[error("Browser API unavailable: {0}")]
	Unavailable(String),
}

impl From<url::ParseError> for RouterError {
	fn from(err: url::ParseError) -> Self {
		Self::InvalidUrl(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_router_error_display() {
		assert_eq!(
			RouterError::InvalidRouteName("judges".to_string()).to_string(),
			"Invalid route name: judges"
		);
		assert_eq!(
			RouterError::InvalidPattern {
				pattern: "*".to_string(),
				reason: "must start with '/'".to_string(),
			}
			.to_string(),
			"Invalid route pattern '*': must start with '/'"
		);
	}

	#[rstest]
	fn test_url_parse_error_converts() {
		let err: RouterError = url::Url::parse("not a url").unwrap_err().into();
		assert!(matches!(err, RouterError::InvalidUrl(_)));
	}
}
