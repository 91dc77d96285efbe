//! # Spotlight
//!
//! The promotional site for Ready Set StartUP UK, a TV show about early-stage
//! founders. The site is a set of static pages mounted by a client-side
//! router, deployable at a domain root or under a sub-path on a static host.
//!
//! ## Crates
//!
//! - [`router`] - location store, navigator, route matching and the
//!   static-host redirect shim, in path or hash mode
//! - [`site`] - page table, shared API schema and the browser entry point
//! - [`conf`] - layered settings (`conf` feature)
//! - [`server`] - form backend and static host (`server` feature)
//! - [`admin`] - static output preparation (`admin` feature)
//!
//! ## Feature Flags
//!
//! - `conf` (default) - settings loading
//! - `server` - the form backend
//! - `admin` - build and deploy tooling
//! - `full` - everything
//!
//! ## Quick Example
//!
//! ```rust
//! use std::rc::Rc;
//! use spotlight::prelude::*;
//!
//! let history = Rc::new(MemoryHistory::new("https://example.com/#/judges").unwrap());
//! let config = RouterConfig::new(RoutingMode::Hash);
//! let router = Router::with_history(config, history, site_switch()).unwrap();
//!
//! assert_eq!(router.render_current(), Some(SitePage::Judges));
//! router.navigate("/apply").unwrap();
//! assert_eq!(router.render_current(), Some(SitePage::Apply));
//! ```

pub use spotlight_router as router;
pub use spotlight_site as site;

#[cfg(all(feature = "conf", not(target_arch = "wasm32")))]
pub use spotlight_conf as conf;

#[cfg(all(feature = "server", not(target_arch = "wasm32")))]
pub use spotlight_server as server;

#[cfg(all(feature = "admin", not(target_arch = "wasm32")))]
pub use spotlight_admin as admin;

/// Commonly used types.
pub mod prelude {
	pub use spotlight_router::{
		BasePath, History, Link, Location, LocationStore, MemoryHistory, NavigationEvent,
		Navigator, RedirectShim, Route, RouteMatch, RoutePattern, Router, RouterConfig,
		RouterError, RoutingMode, ShimOutcome, Switch,
	};
	pub use spotlight_site::{Boot, SITE_NAME, SiteOptions, SitePage, boot, site_switch};

	#[cfg(all(feature = "conf", not(target_arch = "wasm32")))]
	pub use spotlight_conf::Settings;
}
