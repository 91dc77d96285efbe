//! Rewrites asset references left over from an earlier deployment prefix.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use spotlight_router::BasePath;
use walkdir::WalkDir;

use crate::error::{BuildError, Result, io_error};

/// File types that can reference assets.
const REWRITTEN_EXTENSIONS: &[&str] = &["html", "css", "js"];

/// Matches `<legacy>/assets/<file>` up to a quote, parenthesis or whitespace.
fn legacy_pattern(legacy_prefix: &str) -> Result<Regex> {
	let prefix = format!("/{}/", legacy_prefix.trim_matches('/'));
	Regex::new(&format!(r#"{}(assets/[^"'()\s]+)"#, regex::escape(&prefix))).map_err(|source| {
		BuildError::AssetPrefix {
			prefix: legacy_prefix.to_string(),
			source,
		}
	})
}

/// Rewrites legacy asset references in `content`. Returns `None` when
/// nothing matched.
pub fn rewrite_content(content: &str, pattern: &Regex, base_path: &BasePath) -> Option<String> {
	if !pattern.is_match(content) {
		return None;
	}
	let rewritten = pattern.replace_all(content, |captures: &Captures<'_>| {
		base_path.asset_url(&format!("/{}", &captures[1]), None)
	});
	Some(rewritten.into_owned())
}

/// Rewrites every `.html`, `.css` and `.js` file below `dir`. Returns the
/// files changed.
pub fn fix_asset_paths(dir: &Path, legacy_prefix: &str, base_path: &BasePath) -> Result<Vec<PathBuf>> {
	if !dir.is_dir() {
		return Err(BuildError::MissingDirectory(dir.to_path_buf()));
	}
	let pattern = legacy_pattern(legacy_prefix)?;

	let mut changed = Vec::new();
	for entry in WalkDir::new(dir).into_iter().filter_map(|entry| entry.ok()) {
		let path = entry.path();
		let rewritable = path
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| REWRITTEN_EXTENSIONS.contains(&ext));
		if !entry.file_type().is_file() || !rewritable {
			continue;
		}

		let content = fs::read_to_string(path).map_err(io_error(path))?;
		if let Some(rewritten) = rewrite_content(&content, &pattern, base_path) {
			fs::write(path, rewritten).map_err(io_error(path))?;
			tracing::info!(path = %path.display(), "rewrote asset paths");
			changed.push(path.to_path_buf());
		}
	}
	Ok(changed)
}
