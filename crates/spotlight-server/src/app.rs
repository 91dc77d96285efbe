//! Request dispatch between the API and the static site.

use std::sync::Arc;

use async_trait::async_trait;
use spotlight_conf::Settings;

use crate::api::{API_PREFIX, ApiHandler};
use crate::error::Result;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;
use crate::static_files::StaticFiles;
use crate::storage::{MemoryStorage, Storage};

/// Routes `/api/` requests to the API and everything else to the static
/// files, when a site directory is configured.
pub struct SiteHandler {
	api: ApiHandler,
	files: Option<StaticFiles>,
}

impl SiteHandler {
	pub fn new(api: ApiHandler) -> Self {
		Self { api, files: None }
	}

	pub fn with_static_files(mut self, files: StaticFiles) -> Self {
		self.files = Some(files);
		self
	}

	/// Builds the handler described by the `[server]` settings.
	pub fn from_settings(settings: &Settings, storage: Arc<dyn Storage>) -> Self {
		let server = &settings.server;
		let api = ApiHandler::new(storage).with_deadline(server.application_deadline);
		let handler = Self::new(api);
		if server.static_dir.is_dir() {
			handler.with_static_files(
				StaticFiles::new(&server.static_dir).spa_fallback(server.spa_fallback),
			)
		} else {
			tracing::warn!(
				dir = %server.static_dir.display(),
				"static directory not found, serving the API only"
			);
			handler
		}
	}

	pub fn api(&self) -> &ApiHandler {
		&self.api
	}
}

#[async_trait]
impl Handler for SiteHandler {
	async fn handle(&self, request: Request) -> Result<Response> {
		if request.path().starts_with(API_PREFIX) {
			return self.api.handle(request).await;
		}
		match &self.files {
			Some(files) => files.handle(request).await,
			None => Ok(Response::not_found().with_body("Not Found")),
		}
	}
}

/// Handler with in-memory storage for `settings`.
pub fn site_handler(settings: &Settings) -> Arc<dyn Handler> {
	Arc::new(SiteHandler::from_settings(
		settings,
		Arc::new(MemoryStorage::new()),
	))
}
