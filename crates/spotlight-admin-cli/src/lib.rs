//! Build and deploy tooling for the Spotlight site.
//!
//! Prepares the built site for a static host: per-route entry documents,
//! the `404.html` fallback, deploy marker files and asset path rewrites.

pub mod assets;
pub mod deploy;
pub mod error;
pub mod routes;

pub use assets::fix_asset_paths;
pub use deploy::prepare_deploy;
pub use error::{BuildError, Result};
pub use routes::{RouteEntry, build_routes, prepare_entry, route_table};
