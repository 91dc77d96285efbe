//! Changing the location without a page reload.

use crate::config::RoutingMode;
use crate::error::RouterError;
use crate::location::Location;
use crate::store::LocationStore;

/// What triggered a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCause {
	/// A click on an internal link.
	Link,
	/// Application code calling the navigator.
	Programmatic,
	/// The redirect shim restoring a location at boot.
	Redirect,
}

/// How the history is mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationKind {
	/// Adds a history entry.
	#[default]
	Push,
	/// Replaces the current history entry.
	Replace,
}

/// A request to change the location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
	/// Where to go, already normalized.
	pub target: Location,
	/// What triggered the request.
	pub cause: NavigationCause,
	/// Push or replace.
	pub kind: NavigationKind,
}

impl NavigationEvent {
	/// Creates a push event.
	pub fn new(target: impl Into<Location>, cause: NavigationCause) -> Self {
		Self {
			target: target.into(),
			cause,
			kind: NavigationKind::Push,
		}
	}

	/// A navigation triggered by a link click.
	pub fn link(target: impl Into<Location>) -> Self {
		Self::new(target, NavigationCause::Link)
	}

	/// A navigation requested by application code.
	pub fn programmatic(target: impl Into<Location>) -> Self {
		Self::new(target, NavigationCause::Programmatic)
	}

	/// A navigation issued by the redirect shim.
	pub fn redirect(target: impl Into<Location>) -> Self {
		Self::new(target, NavigationCause::Redirect)
	}

	/// Sets push or replace.
	pub fn with_kind(mut self, kind: NavigationKind) -> Self {
		self.kind = kind;
		self
	}
}

/// The only writer of the [`LocationStore`].
///
/// In path mode the navigator calls `pushState`/`replaceState` with the
/// base-path-prefixed location. In hash mode it assigns the fragment, which
/// creates the history entry itself. Either way the store is updated before
/// the call returns, so [`LocationStore::current`] reflects the target
/// immediately and matches what the URL reads back. Repeated navigations to
/// the same location are not de-duplicated in path mode.
#[derive(Debug, Clone)]
pub struct Navigator {
	store: LocationStore,
}

impl Navigator {
	/// Creates a navigator writing to `store`.
	pub fn new(store: LocationStore) -> Self {
		Self { store }
	}

	/// Returns the store this navigator writes to.
	pub fn store(&self) -> &LocationStore {
		&self.store
	}

	/// Pushes a new location.
	///
	/// `path` is normalized to start with `/`. Returns the location navigated to.
	pub fn navigate(&self, path: impl AsRef<str>) -> Result<Location, RouterError> {
		self.dispatch(NavigationEvent::programmatic(Location::new(path)))
	}

	/// Replaces the current history entry with a new location.
	pub fn replace(&self, path: impl AsRef<str>) -> Result<Location, RouterError> {
		self.dispatch(
			NavigationEvent::programmatic(Location::new(path)).with_kind(NavigationKind::Replace),
		)
	}

	/// Goes back one history entry.
	///
	/// The store picks up the previous location from the resulting
	/// `popstate`/`hashchange` event.
	pub fn back(&self) -> Result<(), RouterError> {
		tracing::debug!(from = %self.store.current(), "navigating back");
		self.store.history().back()
	}

	/// Applies a navigation event.
	///
	/// Returns the location read back from the URL after the write. It
	/// equals the target except that a query or fragment is dropped.
	pub fn dispatch(&self, event: NavigationEvent) -> Result<Location, RouterError> {
		let config = self.store.config();
		let history = self.store.history();
		let target = event.target;

		match (config.mode, event.kind) {
			(RoutingMode::Path, NavigationKind::Push) => {
				history.push_state(&config.base_path.join(&target))?
			}
			(RoutingMode::Path, NavigationKind::Replace) => {
				history.replace_state(&config.base_path.join(&target))?
			}
			(RoutingMode::Hash, NavigationKind::Push) => history.set_hash(target.as_str())?,
			(RoutingMode::Hash, NavigationKind::Replace) => {
				history.replace_state(&format!("#{}", target))?
			}
		}

		// The URL layer may encode what it was given; store what it now reads
		// so the next history event finds the store already in sync.
		let location = self.store.read_location()?;
		let changed = self.store.set(location.clone());
		tracing::debug!(
			location = %location,
			cause = ?event.cause,
			kind = ?event.kind,
			changed,
			"navigated"
		);
		Ok(location)
	}

	/// Returns the `href` an anchor should carry for `path` in the active mode.
	///
	/// # Example
	///
	/// ```
	/// use std::rc::Rc;
	/// use spotlight_router::{LocationStore, MemoryHistory, Navigator, RouterConfig, RoutingMode};
	///
	/// let history = Rc::new(MemoryHistory::new("https://example.com/").unwrap());
	/// let config = RouterConfig::new(RoutingMode::Hash).with_base_path("/show");
	/// let navigator = Navigator::new(LocationStore::new(config, history).unwrap());
	/// assert_eq!(navigator.href("judges"), "/show/#/judges");
	/// ```
	pub fn href(&self, path: impl AsRef<str>) -> String {
		self.store.config().href(&Location::new(path))
	}
}
