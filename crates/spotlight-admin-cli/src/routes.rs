//! Per-route entry documents for static hosting.
//!
//! A static host only finds files. Copying the entry document to
//! `<route>/index.html` lets deep links load the app directly, and
//! `404.html` catches every other address so the redirect shim can run.

use std::fs;
use std::path::{Path, PathBuf};

use spotlight_router::{Location, RouterConfig, RoutingMode};
use spotlight_site::SitePage;

use crate::error::{BuildError, Result, io_error};

pub const ENTRY_DOCUMENT: &str = "index.html";
pub const NOT_FOUND_DOCUMENT: &str = "404.html";

/// Name of the meta tag the browser build reads its routing mode from.
pub const MODE_META_NAME: &str = "spotlight-routing";

/// One row of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
	pub name: &'static str,
	pub pattern: &'static str,
	pub href: String,
}

/// Route table with the link address of each page under `config`.
pub fn route_table(config: &RouterConfig) -> Vec<RouteEntry> {
	SitePage::ROUTED
		.iter()
		.filter_map(|page| {
			let pattern = page.path()?;
			Some(RouteEntry {
				name: page.name(),
				pattern,
				href: config.href(&Location::new(pattern)),
			})
		})
		.collect()
}

/// Adds the `<base>` and routing meta tags the browser build needs.
///
/// Tags already present are left alone. Returns `None` when the document
/// has no `<head>` element.
pub fn prepare_entry(document: &str, config: &RouterConfig) -> Option<String> {
	let mut tags = String::new();
	if !config.base_path.is_root() && !document.contains("<base") {
		tags.push_str(&format!(
			"\n    <base href=\"{}\">",
			config.base_path.join(&Location::root())
		));
	}
	if config.mode == RoutingMode::Hash && !document.contains(MODE_META_NAME) {
		tags.push_str(&format!(
			"\n    <meta name=\"{}\" content=\"{}\">",
			MODE_META_NAME, config.mode
		));
	}

	let head_start = document.find("<head")?;
	let head_end = head_start + document[head_start..].find('>')? + 1;
	let mut prepared = String::with_capacity(document.len() + tags.len());
	prepared.push_str(&document[..head_end]);
	prepared.push_str(&tags);
	prepared.push_str(&document[head_end..]);
	Some(prepared)
}

fn write(path: PathBuf, contents: &str, written: &mut Vec<PathBuf>) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).map_err(io_error(parent))?;
	}
	fs::write(&path, contents).map_err(io_error(&path))?;
	tracing::info!(path = %path.display(), "wrote entry document");
	written.push(path);
	Ok(())
}

/// Writes `<route>/index.html` for every routed page and `404.html`.
///
/// Returns the files written, the updated entry document first when it
/// changed.
pub fn build_routes(dir: &Path, config: &RouterConfig) -> Result<Vec<PathBuf>> {
	if !dir.is_dir() {
		return Err(BuildError::MissingDirectory(dir.to_path_buf()));
	}
	let entry_path = dir.join(ENTRY_DOCUMENT);
	if !entry_path.is_file() {
		return Err(BuildError::MissingEntry(entry_path));
	}

	let original = fs::read_to_string(&entry_path).map_err(io_error(&entry_path))?;
	let entry = prepare_entry(&original, config)
		.ok_or_else(|| BuildError::MalformedDocument(entry_path.clone()))?;

	let mut written = Vec::new();
	if entry != original {
		write(entry_path, &entry, &mut written)?;
	}
	for page in SitePage::ROUTED {
		let Some(path) = page.path().filter(|path| *path != "/") else {
			continue;
		};
		let route_dir = dir.join(path.trim_start_matches('/'));
		write(route_dir.join(ENTRY_DOCUMENT), &entry, &mut written)?;
	}
	write(dir.join(NOT_FOUND_DOCUMENT), &entry, &mut written)?;

	Ok(written)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use spotlight_router::BasePath;

	const DOCUMENT: &str = "<!DOCTYPE html>\n<html>\n  <head>\n    <title>Ready Set StartUP UK</title>\n  </head>\n</html>\n";

	#[rstest]
	fn test_route_table_hash_mode() {
		let config = RouterConfig::new(RoutingMode::Hash).with_base_path("/show");
		let table = route_table(&config);

		assert_eq!(table.len(), SitePage::ROUTED.len());
		assert_eq!(table[0].pattern, "/");
		let judges = table.iter().find(|entry| entry.name == "judges").unwrap();
		assert_eq!(judges.href, "/show/#/judges");
	}

	#[rstest]
	fn test_prepare_entry_is_untouched_at_root_in_path_mode() {
		let config = RouterConfig::new(RoutingMode::Path);
		assert_eq!(prepare_entry(DOCUMENT, &config).unwrap(), DOCUMENT);
	}

	#[rstest]
	fn test_prepare_entry_injects_tags() {
		let config =
			RouterConfig::new(RoutingMode::Hash).with_base_path(BasePath::new("/show"));
		let prepared = prepare_entry(DOCUMENT, &config).unwrap();

		assert!(prepared.contains("<head>\n    <base href=\"/show/\">"));
		assert!(prepared.contains("<meta name=\"spotlight-routing\" content=\"hash\">"));
		// Running twice adds nothing
		assert_eq!(prepare_entry(&prepared, &config).unwrap(), prepared);
	}

	#[rstest]
	fn test_prepare_entry_without_head() {
		let config = RouterConfig::new(RoutingMode::Hash);
		assert!(prepare_entry("<html></html>", &config).is_none());
	}
}
