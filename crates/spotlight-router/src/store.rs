//! Observable store for the current location.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::{RouterConfig, RoutingMode};
use crate::error::RouterError;
use crate::history::{History, HistoryEvent, ListenerId, hash_of};
use crate::location::Location;

type Subscriber = Rc<dyn Fn(&Location)>;

struct StoreInner {
	config: RouterConfig,
	history: Rc<dyn History>,
	current: RefCell<Location>,
	subscribers: RefCell<Vec<(u64, Subscriber)>>,
	next_subscriber: Cell<u64>,
	history_listener: Cell<Option<ListenerId>>,
}

impl Drop for StoreInner {
	fn drop(&mut self) {
		if let Some(id) = self.history_listener.take() {
			self.history.unlisten(id);
		}
	}
}

/// The single, process-wide location value and its subscribers.
///
/// The store is created once at boot and passed to whatever needs the
/// location. Clones share the same state. It listens to the history backend
/// so back/forward traversal and fragment changes reach subscribers, and it
/// is the only thing the [`Navigator`](crate::Navigator) mutates.
#[derive(Clone)]
pub struct LocationStore {
	inner: Rc<StoreInner>,
}

impl fmt::Debug for LocationStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LocationStore")
			.field("mode", &self.inner.config.mode)
			.field("current", &*self.inner.current.borrow())
			.field("subscribers", &self.inner.subscribers.borrow().len())
			.finish()
	}
}

impl LocationStore {
	/// Creates the store, reading the initial location from `history`.
	///
	/// A URL that cannot be mapped to a location (a pathname outside the
	/// base path) starts the store at the root.
	pub fn new(config: RouterConfig, history: Rc<dyn History>) -> Result<Self, RouterError> {
		let initial = read_location(&config, history.as_ref())?.unwrap_or_default();
		let inner = Rc::new(StoreInner {
			config,
			history: Rc::clone(&history),
			current: RefCell::new(initial),
			subscribers: RefCell::new(Vec::new()),
			next_subscriber: Cell::new(0),
			history_listener: Cell::new(None),
		});

		let weak: Weak<StoreInner> = Rc::downgrade(&inner);
		let id = history.listen(Rc::new(move |event| {
			if let Some(inner) = weak.upgrade() {
				LocationStore { inner }.on_history_event(event);
			}
		}))?;
		inner.history_listener.set(Some(id));

		Ok(Self { inner })
	}

	/// Returns the routing configuration the store was created with.
	pub fn config(&self) -> &RouterConfig {
		&self.inner.config
	}

	/// Returns the history backend.
	pub fn history(&self) -> &Rc<dyn History> {
		&self.inner.history
	}

	/// Returns the cached current location.
	pub fn current(&self) -> Location {
		self.inner.current.borrow().clone()
	}

	/// Reads the location from the browser URL right now.
	///
	/// In path mode this is the pathname with the base path removed; in hash
	/// mode it is the fragment without `#`. Both are normalized to begin with
	/// `/`. Has no side effects.
	pub fn read_location(&self) -> Result<Location, RouterError> {
		Ok(read_location(&self.inner.config, self.inner.history.as_ref())?.unwrap_or_default())
	}

	/// Registers a callback invoked with the new location on every change.
	///
	/// The returned [`Subscription`] removes the callback when dropped or
	/// when [`Subscription::unsubscribe`] is called. Use
	/// [`Subscription::forget`] for listeners that live as long as the page.
	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&Location) + 'static,
	{
		let id = self.inner.next_subscriber.get();
		self.inner.next_subscriber.set(id + 1);
		self.inner
			.subscribers
			.borrow_mut()
			.push((id, Rc::new(callback)));
		Subscription {
			store: Rc::downgrade(&self.inner),
			id: Some(id),
		}
	}

	/// Number of live subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.inner.subscribers.borrow().len()
	}

	/// Replaces the current location, notifying subscribers if it changed.
	///
	/// Returns whether a change was recorded.
	pub(crate) fn set(&self, location: Location) -> bool {
		{
			let mut current = self.inner.current.borrow_mut();
			if *current == location {
				return false;
			}
			*current = location.clone();
		}

		let subscribers: Vec<Subscriber> = self
			.inner
			.subscribers
			.borrow()
			.iter()
			.map(|(_, subscriber)| Rc::clone(subscriber))
			.collect();
		for subscriber in subscribers {
			subscriber(&location);
		}
		true
	}

	/// Re-reads the URL and updates the store.
	pub fn sync(&self) -> Result<bool, RouterError> {
		let location = self.read_location()?;
		Ok(self.set(location))
	}

	fn on_history_event(&self, event: HistoryEvent) {
		match self.sync() {
			Ok(changed) => {
				tracing::debug!(?event, changed, location = %self.current(), "history event");
			}
			Err(err) => {
				tracing::warn!(?event, error = %err, "failed to read location after history event");
			}
		}
	}
}

/// Maps the history's URL to a location for the given configuration.
///
/// The pathname or fragment is percent-decoded.
pub(crate) fn read_location(
	config: &RouterConfig,
	history: &dyn History,
) -> Result<Option<Location>, RouterError> {
	let url = history.current_url()?;
	Ok(match config.mode {
		RoutingMode::Path => config.base_path.strip(url.path()).map(Location::from_encoded),
		RoutingMode::Hash => Some(Location::from_fragment(&hash_of(&url))),
	})
}

/// Handle returned by [`LocationStore::subscribe`].
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
	store: Weak<StoreInner>,
	id: Option<u64>,
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}

impl Subscription {
	/// Removes the callback from the store.
	pub fn unsubscribe(mut self) {
		self.detach();
	}

	/// Keeps the callback registered for the lifetime of the store.
	pub fn forget(mut self) {
		self.id = None;
	}

	fn detach(&mut self) {
		if let Some(id) = self.id.take()
			&& let Some(inner) = self.store.upgrade()
		{
			inner
				.subscribers
				.borrow_mut()
				.retain(|(existing, _)| *existing != id);
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.detach();
	}
}
