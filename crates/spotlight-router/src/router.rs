//! The router: store, navigator and switch bound together.

use std::fmt;
use std::rc::Rc;

use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::history::History;
use crate::location::Location;
use crate::navigator::Navigator;
use crate::store::{LocationStore, Subscription};
use crate::switch::{RouteMatch, Switch};

/// A configured router for views of type `V`.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spotlight_router::{MemoryHistory, Router, RouterConfig, RoutingMode, Switch};
///
/// let history = Rc::new(MemoryHistory::new("https://example.com/").unwrap());
/// let switch = Switch::new()
/// 	.route("/", |_| "home")
/// 	.route("/seasons", |_| "seasons")
/// 	.fallback(|_| "not found");
/// let router = Router::with_history(RouterConfig::new(RoutingMode::Hash), history, switch).unwrap();
///
/// router.navigate("seasons").unwrap();
/// assert_eq!(router.render_current(), Some("seasons"));
/// ```
pub struct Router<V> {
	navigator: Navigator,
	switch: Switch<V>,
}

impl<V> fmt::Debug for Router<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("navigator", &self.navigator)
			.field("switch", &self.switch)
			.finish()
	}
}

impl<V> Router<V> {
	/// Creates a router over an existing store.
	pub fn new(store: LocationStore, switch: Switch<V>) -> Self {
		Self {
			navigator: Navigator::new(store),
			switch,
		}
	}

	/// Creates the store from `config` and `history`, then the router.
	pub fn with_history(
		config: RouterConfig,
		history: Rc<dyn History>,
		switch: Switch<V>,
	) -> Result<Self, RouterError> {
		Ok(Self::new(LocationStore::new(config, history)?, switch))
	}

	/// Returns the routing configuration.
	pub fn config(&self) -> &RouterConfig {
		self.navigator.store().config()
	}

	/// Returns the location store.
	pub fn store(&self) -> &LocationStore {
		self.navigator.store()
	}

	/// Returns the navigator.
	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}

	/// Returns the route table.
	pub fn switch(&self) -> &Switch<V> {
		&self.switch
	}

	/// Returns the current location.
	pub fn location(&self) -> Location {
		self.store().current()
	}

	/// Selects the route for the current location.
	pub fn current_match(&self) -> Option<RouteMatch> {
		self.switch.select(&self.location())
	}

	/// Renders the view for the current location.
	pub fn render_current(&self) -> Option<V> {
		self.switch.render(&self.location())
	}

	/// Pushes a new location.
	pub fn navigate(&self, path: impl AsRef<str>) -> Result<Location, RouterError> {
		self.navigator.navigate(path)
	}

	/// Replaces the current location.
	pub fn replace(&self, path: impl AsRef<str>) -> Result<Location, RouterError> {
		self.navigator.replace(path)
	}

	/// Goes back one history entry.
	pub fn back(&self) -> Result<(), RouterError> {
		self.navigator.back()
	}

	/// Returns the link `href` for `path` in the active mode.
	pub fn href(&self, path: impl AsRef<str>) -> String {
		self.navigator.href(path)
	}
}

impl<V: 'static> Router<V> {
	/// Re-renders on every location change.
	///
	/// `callback` receives the new location and its view (`None` when nothing
	/// matched and no fallback is declared).
	pub fn on_change<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&Location, Option<V>) + 'static,
	{
		let switch = self.switch.clone();
		self.store()
			.subscribe(move |location| callback(location, switch.render(location)))
	}
}

#[cfg(target_arch = "wasm32")]
impl<V> Router<V> {
	/// Creates a router bound to the browser's `window`.
	pub fn from_browser(config: RouterConfig, switch: Switch<V>) -> Result<Self, RouterError> {
		let history = Rc::new(crate::history::BrowserHistory::new()?);
		Self::with_history(config, history, switch)
	}
}
