//! Segment-based route patterns.
//!
//! A pattern such as `/cast/:slug` is split on `/`. A location matches when
//! it has the same number of segments and every non-parameter segment is
//! equal (case-sensitive). Parameter segments start with `:` and match any
//! value. There is no catch-all syntax; fallbacks are declared on the
//! [`Switch`](crate::Switch) instead.

use std::collections::HashMap;
use std::fmt;

use crate::error::RouterError;
use crate::location::Location;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of segments in a pattern.
const MAX_PATTERN_SEGMENTS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param(String),
}

/// Parameters captured by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
	/// Named parameters.
	pub params: HashMap<String, String>,
	/// Parameter values in the order they appear in the pattern.
	pub values: Vec<String>,
}

impl PathParams {
	/// Returns the value captured for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Returns whether nothing was captured.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	pattern: String,
	segments: Vec<Segment>,
}

impl RoutePattern {
	/// Compiles a pattern.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the pattern does not start
	/// with `/`, exceeds 1024 bytes or 32 segments, or contains a `:`
	/// segment without a name.
	///
	/// # Example
	///
	/// ```
	/// use spotlight_router::{Location, RoutePattern};
	///
	/// let pattern = RoutePattern::new("/clips/:id").unwrap();
	/// let params = pattern.matches(&Location::new("/clips/7")).unwrap();
	/// assert_eq!(params.get("id"), Some("7"));
	/// ```
	pub fn new(pattern: &str) -> Result<Self, RouterError> {
		let invalid = |reason: String| RouterError::InvalidPattern {
			pattern: pattern.to_string(),
			reason,
		};

		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(invalid(format!(
				"length {} exceeds maximum allowed length of {} bytes",
				pattern.len(),
				MAX_PATTERN_LENGTH
			)));
		}
		if !pattern.starts_with('/') {
			return Err(invalid("must start with '/'".to_string()));
		}

		let raw: Vec<&str> = pattern.split('/').collect();
		if raw.len() > MAX_PATTERN_SEGMENTS {
			return Err(invalid(format!(
				"{} segments exceed the maximum of {}",
				raw.len(),
				MAX_PATTERN_SEGMENTS
			)));
		}

		let segments = raw
			.into_iter()
			.map(|segment| match segment.strip_prefix(':') {
				Some("") => Err(invalid("parameter segment without a name".to_string())),
				Some(name) => Ok(Segment::Param(name.to_string())),
				None => Ok(Segment::Literal(segment.to_string())),
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			pattern: pattern.to_string(),
			segments,
		})
	}

	/// Returns the original pattern string.
	pub fn as_str(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|segment| match segment {
			Segment::Param(name) => Some(name.as_str()),
			Segment::Literal(_) => None,
		})
	}

	/// Returns whether the pattern has no parameters.
	pub fn is_exact(&self) -> bool {
		self.param_names().next().is_none()
	}

	/// Matches a location, returning the captured parameters.
	pub fn matches(&self, location: &Location) -> Option<PathParams> {
		let mut actual = location.segments();
		let mut params = PathParams::default();

		for segment in &self.segments {
			let value = actual.next()?;
			match segment {
				Segment::Literal(expected) if expected != value => return None,
				Segment::Literal(_) => {}
				Segment::Param(name) => {
					params.params.insert(name.clone(), value.to_string());
					params.values.push(value.to_string());
				}
			}
		}

		// Segment counts must be equal
		if actual.next().is_some() {
			return None;
		}
		Some(params)
	}

	/// Builds a concrete path by substituting named parameters.
	///
	/// Returns `None` if a parameter is missing.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let segments = self
			.segments
			.iter()
			.map(|segment| match segment {
				Segment::Literal(text) => Some(text.as_str()),
				Segment::Param(name) => params.get(name).map(String::as_str),
			})
			.collect::<Option<Vec<_>>>()?;
		Some(segments.join("/"))
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for RoutePattern {}

impl fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.pattern)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn matches(pattern: &str, location: &str) -> bool {
		RoutePattern::new(pattern)
			.unwrap()
			.matches(&Location::new(location))
			.is_some()
	}

	#[rstest]
	#[case("/", "/", true)]
	#[case("/judges", "/judges", true)]
	#[case("/judges", "/Judges", false)]
	#[case("/judges", "/judges/", false)]
	#[case("/judges/", "/judges", false)]
	#[case("/judges", "/mentors", false)]
	#[case("/", "/judges", false)]
	#[case("/clips/:id", "/clips/42", true)]
	#[case("/clips/:id", "/clips", false)]
	#[case("/clips/:id", "/clips/42/extra", false)]
	#[case("/clips/:id", "/videos/42", false)]
	#[case("/:section/:id", "/cast/ying", true)]
	fn test_segment_matching(#[case] pattern: &str, #[case] location: &str, #[case] expected: bool) {
		assert_eq!(matches(pattern, location), expected);
	}

	#[rstest]
	fn test_params_captured_in_order() {
		let pattern = RoutePattern::new("/seasons/:season/episodes/:episode").unwrap();
		let params = pattern
			.matches(&Location::new("/seasons/2/episodes/5"))
			.unwrap();

		assert_eq!(params.get("season"), Some("2"));
		assert_eq!(params.get("episode"), Some("5"));
		assert_eq!(params.values, vec!["2".to_string(), "5".to_string()]);
	}

	#[rstest]
	fn test_exact_pattern() {
		let pattern = RoutePattern::new("/apply").unwrap();
		assert!(pattern.is_exact());
		assert!(pattern.matches(&Location::new("/apply")).unwrap().is_empty());
		assert!(!RoutePattern::new("/clips/:id").unwrap().is_exact());
	}

	#[rstest]
	#[case("*")]
	#[case("judges")]
	#[case("")]
	fn test_pattern_requires_leading_slash(#[case] raw: &str) {
		assert!(matches!(
			RoutePattern::new(raw),
			Err(RouterError::InvalidPattern { .. })
		));
	}

	#[rstest]
	fn test_pattern_rejects_unnamed_param() {
		let err = RoutePattern::new("/clips/:").unwrap_err();
		assert!(err.to_string().contains("without a name"));
	}

	#[rstest]
	fn test_pattern_rejects_excessive_length() {
		let long_pattern = "/".to_string() + &"a".repeat(1025);
		let err = RoutePattern::new(&long_pattern).unwrap_err();
		assert!(err.to_string().contains("exceeds maximum allowed length"));
	}

	#[rstest]
	fn test_pattern_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..35).map(|_| "seg").collect();
		let pattern = format!("/{}", segments.join("/"));
		let err = RoutePattern::new(&pattern).unwrap_err();
		assert!(err.to_string().contains("exceed the maximum"));
	}

	#[rstest]
	fn test_reverse() {
		let pattern = RoutePattern::new("/clips/:id").unwrap();
		let mut params = HashMap::new();
		params.insert("id".to_string(), "42".to_string());

		assert_eq!(pattern.reverse(&params), Some("/clips/42".to_string()));
		assert_eq!(pattern.reverse(&HashMap::new()), None);
		assert_eq!(
			RoutePattern::new("/").unwrap().reverse(&HashMap::new()),
			Some("/".to_string())
		);
	}

	#[rstest]
	fn test_param_names() {
		let pattern = RoutePattern::new("/a/:x/b/:y").unwrap();
		assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["x", "y"]);
	}

	#[rstest]
	fn test_pattern_display_and_equality() {
		let p1 = RoutePattern::new("/clips/:id").unwrap();
		let p2 = RoutePattern::new("/clips/:id").unwrap();
		assert_eq!(p1, p2);
		assert_eq!(format!("{}", p1), "/clips/:id");
	}
}
