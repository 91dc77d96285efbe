//! The logical path the application believes it is displaying.

use std::fmt;

use percent_encoding::percent_decode_str;

/// A normalized SPA location such as `/seasons`.
///
/// A `Location` always begins with `/`. Construction never fails: an empty
/// input becomes the root and a missing leading slash is added. A query or
/// fragment is not part of a location and is cut off. No other
/// normalization is applied, so `/cast` and `/cast/` are distinct locations.
///
/// Locations hold decoded text. Use [`Location::from_encoded`] for values
/// read from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(String);

impl Location {
	/// Creates a location from a raw path, enforcing the leading slash.
	///
	/// # Example
	///
	/// ```
	/// use spotlight_router::Location;
	///
	/// assert_eq!(Location::new("seasons").as_str(), "/seasons");
	/// assert_eq!(Location::new("").as_str(), "/");
	/// assert_eq!(Location::new("/judges?tab=1").as_str(), "/judges");
	/// ```
	pub fn new(path: impl AsRef<str>) -> Self {
		Self::normalized(without_query(path.as_ref()))
	}

	/// Creates a location from a percent-encoded URL pathname or fragment.
	///
	/// Invalid UTF-8 sequences decode to U+FFFD.
	pub fn from_encoded(raw: &str) -> Self {
		Self::normalized(&percent_decode_str(without_query(raw)).decode_utf8_lossy())
	}

	/// Builds a location from a URL fragment, with or without the leading `#`.
	///
	/// `""`, `"#"` and `"#/"` all map to the root.
	pub fn from_fragment(fragment: &str) -> Self {
		Self::from_encoded(fragment.strip_prefix('#').unwrap_or(fragment))
	}

	fn normalized(path: &str) -> Self {
		let path = path.trim();
		if path.is_empty() {
			Self::root()
		} else if path.starts_with('/') {
			Self(path.to_string())
		} else {
			Self(format!("/{}", path))
		}
	}

	/// The home location `/`.
	pub fn root() -> Self {
		Self("/".to_string())
	}

	/// Returns the path as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns whether this is the home location.
	pub fn is_root(&self) -> bool {
		self.0 == "/"
	}

	/// Splits the location on `/`, keeping the empty leading segment.
	///
	/// `/judges` yields `["", "judges"]` and `/` yields `["", ""]`, so a
	/// trailing slash always counts as an extra segment.
	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.0.split('/')
	}

	/// Consumes the location and returns the owned path.
	pub fn into_string(self) -> String {
		self.0
	}
}

fn without_query(path: &str) -> &str {
	path.find(['?', '#']).map_or(path, |end| &path[..end])
}

impl Default for Location {
	fn default() -> Self {
		Self::root()
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Location {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Location {
	fn from(path: &str) -> Self {
		Self::new(path)
	}
}

impl From<String> for Location {
	fn from(path: String) -> Self {
		Self::new(path)
	}
}

impl PartialEq<str> for Location {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for Location {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/seasons", "/seasons")]
	#[case("seasons", "/seasons")]
	#[case("", "/")]
	#[case("   ", "/")]
	#[case("/", "/")]
	#[case("/cast/", "/cast/")]
	#[case("/judges?tab=1", "/judges")]
	#[case("/judges#bio", "/judges")]
	#[case("?ref=tv", "/")]
	fn test_location_normalization(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(Location::new(raw).as_str(), expected);
	}

	#[rstest]
	#[case("#/judges", "/judges")]
	#[case("#judges", "/judges")]
	#[case("/judges", "/judges")]
	#[case("#", "/")]
	#[case("", "/")]
	#[case("#/a%20b", "/a b")]
	#[case("#/judges?tab=1", "/judges")]
	fn test_location_from_fragment(#[case] fragment: &str, #[case] expected: &str) {
		assert_eq!(Location::from_fragment(fragment), expected);
	}

	#[rstest]
	#[case("/assets/TOM%20BLOMFIELD", "/assets/TOM BLOMFIELD")]
	#[case("/caf%C3%A9", "/café")]
	#[case("/a%3Fb", "/a?b")]
	#[case("/bad%FF", "/bad\u{FFFD}")]
	#[case("/clips?id=7", "/clips")]
	fn test_location_from_encoded(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(Location::from_encoded(raw), expected);
	}

	#[rstest]
	fn test_location_segments_keep_trailing_slash() {
		assert_eq!(Location::new("/judges").segments().count(), 2);
		assert_eq!(Location::new("/judges/").segments().count(), 3);
		assert_eq!(Location::root().segments().collect::<Vec<_>>(), vec!["", ""]);
	}

	#[rstest]
	fn test_location_is_root() {
		assert!(Location::default().is_root());
		assert!(!Location::new("/apply").is_root());
	}
}
