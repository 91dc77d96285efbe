//! Static host files written next to the build output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result, io_error};

pub const CNAME_FILE: &str = "CNAME";
/// Disables the host's Jekyll processing so underscore-prefixed assets are served.
pub const NOJEKYLL_FILE: &str = ".nojekyll";

/// Writes `CNAME` when a custom domain is given, and an empty `.nojekyll`.
pub fn prepare_deploy(dir: &Path, cname: Option<&str>) -> Result<Vec<PathBuf>> {
	if !dir.is_dir() {
		return Err(BuildError::MissingDirectory(dir.to_path_buf()));
	}

	let mut written = Vec::new();
	if let Some(domain) = cname.map(str::trim).filter(|domain| !domain.is_empty()) {
		let path = dir.join(CNAME_FILE);
		fs::write(&path, domain).map_err(io_error(&path))?;
		tracing::info!(domain, "wrote CNAME");
		written.push(path);
	}

	let path = dir.join(NOJEKYLL_FILE);
	fs::write(&path, "").map_err(io_error(&path))?;
	written.push(path);

	Ok(written)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	#[rstest]
	fn test_writes_cname_and_nojekyll() {
		let dir = TempDir::new().unwrap();
		let written = prepare_deploy(dir.path(), Some("readysetstartupuk.com")).unwrap();

		assert_eq!(written.len(), 2);
		assert_eq!(
			fs::read_to_string(dir.path().join(CNAME_FILE)).unwrap(),
			"readysetstartupuk.com"
		);
		assert_eq!(fs::read(dir.path().join(NOJEKYLL_FILE)).unwrap(), b"");
	}

	#[rstest]
	#[case(None)]
	#[case(Some("  "))]
	fn test_without_domain(#[case] cname: Option<&str>) {
		let dir = TempDir::new().unwrap();
		let written = prepare_deploy(dir.path(), cname).unwrap();

		assert_eq!(written, vec![dir.path().join(NOJEKYLL_FILE)]);
		assert!(!dir.path().join(CNAME_FILE).exists());
	}

	#[rstest]
	fn test_missing_directory() {
		let dir = TempDir::new().unwrap();
		let result = prepare_deploy(&dir.path().join("dist"), None);
		assert!(matches!(result, Err(BuildError::MissingDirectory(_))));
	}
}
