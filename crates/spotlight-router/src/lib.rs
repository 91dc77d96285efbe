//! Client-side routing for single-page sites on static hosts.
//!
//! One router covers both URL schemes a static host can support:
//!
//! - [`RoutingMode::Path`]: the location is the pathname (`/judges`), and the
//!   host must serve the entry document for every route.
//! - [`RoutingMode::Hash`]: the location lives in the fragment (`#/judges`),
//!   and the host only ever sees the entry document.
//!
//! The pieces:
//!
//! - [`LocationStore`] holds the single current [`Location`] and notifies
//!   subscribers when it changes.
//! - [`Navigator`] is the only writer of the store.
//! - [`Switch`] selects at most one [`Route`] per location, first match wins.
//! - [`RedirectShim`] maps URLs the host served from its fallback document
//!   onto the router's scheme.
//! - [`Router`] binds all of the above.
//!
//! Browser access goes through the [`History`] trait. [`MemoryHistory`]
//! implements it in memory; `BrowserHistory` (on `wasm32`) drives
//! `window.history` and `window.location`.

pub mod config;
pub mod error;
pub mod history;
pub mod link;
pub mod location;
pub mod navigator;
pub mod pattern;
pub mod redirect;
pub mod router;
pub mod store;
pub mod switch;

pub use config::{BasePath, RouterConfig, RoutingMode};
pub use error::RouterError;
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{History, HistoryEvent, HistoryListener, ListenerId, MemoryHistory, hash_of};
pub use link::{Link, html_escape};
pub use location::Location;
pub use navigator::{NavigationCause, NavigationEvent, NavigationKind, Navigator};
pub use pattern::{PathParams, RoutePattern};
pub use redirect::{PATH_PARAM, RedirectShim, ShimOutcome};
pub use router::Router;
pub use store::{LocationStore, Subscription};
pub use switch::{Route, RouteMatch, Switch};
