//! Static hosting for the built site.
//!
//! Lookup order for a request path:
//!
//! 1. the file itself, or `index.html` inside a directory
//! 2. the entry `index.html` for extension-less paths when the SPA fallback
//!    is enabled (the host rewrite rule used for path-based routing)
//! 3. `404.html` with status 404 when present, else a plain 404

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use hyper::{Method, StatusCode};
use percent_encoding::percent_decode_str;

use crate::error::Result;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

const INDEX_FILE: &str = "index.html";
const NOT_FOUND_FILE: &str = "404.html";

/// Serves files below a root directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
	root: PathBuf,
	spa_fallback: bool,
}

impl StaticFiles {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			spa_fallback: true,
		}
	}

	pub fn spa_fallback(mut self, enabled: bool) -> Self {
		self.spa_fallback = enabled;
		self
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Maps a URL path onto the root, rejecting anything that could escape it.
	///
	/// The path is percent-decoded first, so `%2e%2e` and `%2F` are checked
	/// as the separators they decode to. Paths that do not decode to UTF-8
	/// resolve to nothing.
	fn resolve(&self, url_path: &str) -> Option<PathBuf> {
		let decoded = percent_decode_str(url_path).decode_utf8().ok()?;
		if decoded.contains(['\\', '\0']) {
			return None;
		}
		let relative = Path::new(decoded.trim_start_matches('/'));
		let mut resolved = self.root.clone();
		for component in relative.components() {
			match component {
				Component::Normal(part) => resolved.push(part),
				Component::CurDir => {}
				_ => return None,
			}
		}
		Some(resolved)
	}

	async fn read_file(path: &Path) -> Option<Vec<u8>> {
		let metadata = tokio::fs::metadata(path).await.ok()?;
		if !metadata.is_file() {
			return None;
		}
		tokio::fs::read(path).await.ok()
	}

	async fn find(&self, url_path: &str) -> Option<(PathBuf, Vec<u8>)> {
		let path = self.resolve(url_path)?;
		let is_dir = tokio::fs::metadata(&path)
			.await
			.is_ok_and(|metadata| metadata.is_dir());
		let candidate = if url_path.ends_with('/') || is_dir {
			path.join(INDEX_FILE)
		} else {
			path
		};
		let contents = Self::read_file(&candidate).await?;
		Some((candidate, contents))
	}

	fn file_response(status: StatusCode, path: &Path, contents: Vec<u8>, head: bool) -> Response {
		let content_type = mime_guess::from_path(path).first_or_octet_stream();
		let response = Response::new(status)
			.with_content_type(content_type.as_ref())
			.with_header("content-length", &contents.len().to_string());
		if head {
			response
		} else {
			response.with_body(contents)
		}
	}
}

/// Whether the last segment of `url_path` lacks a file extension.
fn is_route_like(url_path: &str) -> bool {
	let last = url_path.rsplit('/').next().unwrap_or_default();
	!last.contains('.')
}

#[async_trait]
impl Handler for StaticFiles {
	async fn handle(&self, request: Request) -> Result<Response> {
		let head = request.method == Method::HEAD;
		if request.method != Method::GET && !head {
			return Ok(Response::method_not_allowed("GET, HEAD"));
		}
		let url_path = request.path();

		if let Some((path, contents)) = self.find(url_path).await {
			return Ok(Self::file_response(StatusCode::OK, &path, contents, head));
		}

		if self.spa_fallback && is_route_like(url_path) {
			let index = self.root.join(INDEX_FILE);
			if let Some(contents) = Self::read_file(&index).await {
				tracing::debug!(path = %url_path, "serving entry document for client-side route");
				return Ok(Self::file_response(StatusCode::OK, &index, contents, head));
			}
		}

		let not_found = self.root.join(NOT_FOUND_FILE);
		if let Some(contents) = Self::read_file(&not_found).await {
			return Ok(Self::file_response(StatusCode::NOT_FOUND, &not_found, contents, head));
		}
		Ok(Response::not_found()
			.with_content_type("text/plain; charset=utf-8")
			.with_body("Not Found"))
	}
}
