//! Form backend and static host for the Spotlight site.
//!
//! The server answers the JSON endpoints used by the application form,
//! the newsletter signup and the deadline countdown, and serves the built
//! site with the same fallback rules as the static host.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use spotlight_conf::Settings;
//! use spotlight_server::{ShutdownCoordinator, serve_with_shutdown, site_handler};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::load(None)?;
//! let coordinator = ShutdownCoordinator::new(Duration::from_secs(10));
//! serve_with_shutdown(settings.server.addr, site_handler(&settings), coordinator).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod error;
pub mod handler;
pub mod http;
pub mod request;
pub mod response;
pub mod shutdown;
pub mod static_files;
pub mod storage;

pub use api::ApiHandler;
pub use app::{SiteHandler, site_handler};
pub use error::{Result, ServerError};
pub use handler::Handler;
pub use http::{DEFAULT_MAX_BODY_SIZE, HttpServer, serve_with_shutdown};
pub use request::Request;
pub use response::Response;
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
pub use static_files::StaticFiles;
pub use storage::{MemoryStorage, Storage};
