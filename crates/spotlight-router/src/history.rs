//! Session history backends.
//!
//! The router never touches `window.history` directly. It goes through the
//! [`History`] trait, which has a browser implementation on `wasm32` and an
//! in-memory implementation used natively and in tests.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use url::Url;

use crate::error::RouterError;

/// A change notification raised by the history backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
	/// Back/forward traversal (`popstate`).
	PopState,
	/// The fragment identifier changed (`hashchange`).
	HashChange,
}

/// Identifies a registered history listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Callback invoked for every history event.
pub type HistoryListener = Rc<dyn Fn(HistoryEvent)>;

/// Abstraction over the browser's session history and address bar.
///
/// URLs passed to [`push_state`](History::push_state) and
/// [`replace_state`](History::replace_state) are resolved relative to the
/// current URL, exactly like the History API: `"/judges"`, `"#/judges"` and
/// `"?path=/judges"` are all accepted.
pub trait History {
	/// Returns the full current URL.
	fn current_url(&self) -> Result<Url, RouterError>;

	/// Adds a history entry without reloading. Fires no event.
	fn push_state(&self, url: &str) -> Result<(), RouterError>;

	/// Replaces the current history entry without reloading. Fires no event.
	fn replace_state(&self, url: &str) -> Result<(), RouterError>;

	/// Assigns the fragment identifier, creating a history entry and
	/// raising [`HistoryEvent::HashChange`].
	fn set_hash(&self, fragment: &str) -> Result<(), RouterError>;

	/// Moves one entry back, raising [`HistoryEvent::PopState`].
	fn back(&self) -> Result<(), RouterError>;

	/// Replaces the whole address (`location.replace`). In a browser this
	/// loads the new document unless only the fragment changed.
	fn location_replace(&self, url: &str) -> Result<(), RouterError>;

	/// Registers an event listener.
	fn listen(&self, listener: HistoryListener) -> Result<ListenerId, RouterError>;

	/// Removes a previously registered listener. Unknown ids are ignored.
	fn unlisten(&self, id: ListenerId);
}

/// Returns the `#...` part of a URL, or an empty string.
pub fn hash_of(url: &Url) -> String {
	match url.fragment() {
		Some(fragment) if !fragment.is_empty() => format!("#{}", fragment),
		_ => String::new(),
	}
}

/// In-memory session history.
///
/// Mirrors browser semantics closely enough to exercise the router:
/// pushes truncate forward entries, `set_hash` and `back` raise events
/// synchronously, and `location_replace` is counted as a document load when
/// more than the fragment changes.
pub struct MemoryHistory {
	entries: RefCell<Vec<Url>>,
	cursor: Cell<usize>,
	listeners: RefCell<Vec<(ListenerId, HistoryListener)>>,
	next_listener: Cell<u64>,
	loads: Cell<usize>,
}

impl fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryHistory")
			.field("entries", &self.entries.borrow().len())
			.field("cursor", &self.cursor.get())
			.field("listeners", &self.listeners.borrow().len())
			.finish()
	}
}

impl MemoryHistory {
	/// Creates a history whose single entry is `url`.
	///
	/// # Example
	///
	/// ```
	/// use spotlight_router::{History, MemoryHistory};
	///
	/// let history = MemoryHistory::new("https://example.com/judges").unwrap();
	/// assert_eq!(history.current_url().unwrap().path(), "/judges");
	/// ```
	pub fn new(url: &str) -> Result<Self, RouterError> {
		let url = Url::parse(url)?;
		Ok(Self {
			entries: RefCell::new(vec![url]),
			cursor: Cell::new(0),
			listeners: RefCell::new(Vec::new()),
			next_listener: Cell::new(0),
			loads: Cell::new(1),
		})
	}

	/// Number of entries in the session history.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Returns whether the history holds no entries. Always false in practice.
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}

	/// Index of the active entry.
	pub fn position(&self) -> usize {
		self.cursor.get()
	}

	/// Number of document loads, including the initial one.
	pub fn load_count(&self) -> usize {
		self.loads.get()
	}

	/// Number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.borrow().len()
	}

	/// Moves one entry forward, raising [`HistoryEvent::PopState`].
	pub fn forward(&self) -> Result<(), RouterError> {
		let next = self.cursor.get() + 1;
		if next >= self.len() {
			return Ok(());
		}
		self.traverse(next);
		Ok(())
	}

	fn resolve(&self, url: &str) -> Result<Url, RouterError> {
		Ok(self.current_url()?.join(url)?)
	}

	fn push_entry(&self, url: Url) {
		let mut entries = self.entries.borrow_mut();
		let cursor = self.cursor.get();
		entries.truncate(cursor + 1);
		entries.push(url);
		self.cursor.set(entries.len() - 1);
	}

	fn replace_entry(&self, url: Url) {
		let mut entries = self.entries.borrow_mut();
		let cursor = self.cursor.get();
		entries[cursor] = url;
	}

	fn traverse(&self, target: usize) {
		let (before, after) = {
			let entries = self.entries.borrow();
			(entries[self.cursor.get()].clone(), entries[target].clone())
		};
		self.cursor.set(target);
		self.emit(HistoryEvent::PopState);
		if before.fragment() != after.fragment() {
			self.emit(HistoryEvent::HashChange);
		}
	}

	fn emit(&self, event: HistoryEvent) {
		// Snapshot so listeners may register or unregister while being called
		let listeners: Vec<HistoryListener> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();
		for listener in listeners {
			listener(event);
		}
	}
}

fn same_document(a: &Url, b: &Url) -> bool {
	let mut a = a.clone();
	let mut b = b.clone();
	a.set_fragment(None);
	b.set_fragment(None);
	a == b
}

impl History for MemoryHistory {
	fn current_url(&self) -> Result<Url, RouterError> {
		let entries = self.entries.borrow();
		entries
			.get(self.cursor.get())
			.cloned()
			.ok_or_else(|| RouterError::NavigationFailed("history is empty".to_string()))
	}

	fn push_state(&self, url: &str) -> Result<(), RouterError> {
		let url = self.resolve(url)?;
		self.push_entry(url);
		Ok(())
	}

	fn replace_state(&self, url: &str) -> Result<(), RouterError> {
		let url = self.resolve(url)?;
		self.replace_entry(url);
		Ok(())
	}

	fn set_hash(&self, fragment: &str) -> Result<(), RouterError> {
		let current = self.current_url()?;
		let mut url = current.clone();
		url.set_fragment(Some(fragment.strip_prefix('#').unwrap_or(fragment)));
		if url.fragment() == current.fragment() {
			// Browsers neither add an entry nor fire for an identical hash
			return Ok(());
		}
		self.push_entry(url);
		self.emit(HistoryEvent::HashChange);
		Ok(())
	}

	fn back(&self) -> Result<(), RouterError> {
		let cursor = self.cursor.get();
		if cursor == 0 {
			return Ok(());
		}
		self.traverse(cursor - 1);
		Ok(())
	}

	fn location_replace(&self, url: &str) -> Result<(), RouterError> {
		let current = self.current_url()?;
		let target = self.resolve(url)?;
		let fragment_only = same_document(&current, &target);
		let fragment_changed = current.fragment() != target.fragment();
		self.replace_entry(target);
		if !fragment_only {
			self.loads.set(self.loads.get() + 1);
		} else if fragment_changed {
			self.emit(HistoryEvent::HashChange);
		}
		Ok(())
	}

	fn listen(&self, listener: HistoryListener) -> Result<ListenerId, RouterError> {
		let id = ListenerId(self.next_listener.get());
		self.next_listener.set(id.0 + 1);
		self.listeners.borrow_mut().push((id, listener));
		Ok(id)
	}

	fn unlisten(&self, id: ListenerId) {
		self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

#[cfg(target_arch = "wasm32")]
mod browser {
	use std::cell::{Cell, RefCell};
	use std::collections::HashMap;

	use url::Url;
	use wasm_bindgen::JsCast;
	use wasm_bindgen::JsValue;
	use wasm_bindgen::closure::Closure;
	use web_sys::{Event, Window};

	use super::{History, HistoryEvent, HistoryListener, ListenerId};
	use crate::error::RouterError;

	type EventClosure = Closure<dyn FnMut(Event)>;

	fn js_error(context: &str, err: JsValue) -> RouterError {
		RouterError::NavigationFailed(format!("{}: {:?}", context, err))
	}

	/// Session history backed by `window.history` and `window.location`.
	pub struct BrowserHistory {
		window: Window,
		closures: RefCell<HashMap<u64, (EventClosure, EventClosure)>>,
		next_listener: Cell<u64>,
	}

	impl BrowserHistory {
		/// Binds to the global `window`.
		pub fn new() -> Result<Self, RouterError> {
			let window = web_sys::window()
				.ok_or_else(|| RouterError::Unavailable("no window object".to_string()))?;
			Ok(Self {
				window,
				closures: RefCell::new(HashMap::new()),
				next_listener: Cell::new(0),
			})
		}

		fn history(&self) -> Result<web_sys::History, RouterError> {
			self.window
				.history()
				.map_err(|e| js_error("window.history", e))
		}
	}

	impl History for BrowserHistory {
		fn current_url(&self) -> Result<Url, RouterError> {
			let href = self
				.window
				.location()
				.href()
				.map_err(|e| js_error("location.href", e))?;
			Ok(Url::parse(&href)?)
		}

		fn push_state(&self, url: &str) -> Result<(), RouterError> {
			self.history()?
				.push_state_with_url(&JsValue::NULL, "", Some(url))
				.map_err(|e| js_error("history.pushState", e))
		}

		fn replace_state(&self, url: &str) -> Result<(), RouterError> {
			self.history()?
				.replace_state_with_url(&JsValue::NULL, "", Some(url))
				.map_err(|e| js_error("history.replaceState", e))
		}

		fn set_hash(&self, fragment: &str) -> Result<(), RouterError> {
			self.window
				.location()
				.set_hash(fragment)
				.map_err(|e| js_error("location.hash", e))
		}

		fn back(&self) -> Result<(), RouterError> {
			self.history()?
				.back()
				.map_err(|e| js_error("history.back", e))
		}

		fn location_replace(&self, url: &str) -> Result<(), RouterError> {
			self.window
				.location()
				.replace(url)
				.map_err(|e| js_error("location.replace", e))
		}

		fn listen(&self, listener: HistoryListener) -> Result<ListenerId, RouterError> {
			let on_pop = {
				let listener = listener.clone();
				Closure::wrap(Box::new(move |_event: Event| listener(HistoryEvent::PopState))
					as Box<dyn FnMut(Event)>)
			};
			let on_hash = Closure::wrap(
				Box::new(move |_event: Event| listener(HistoryEvent::HashChange))
					as Box<dyn FnMut(Event)>,
			);

			self.window
				.add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref())
				.map_err(|e| js_error("addEventListener(popstate)", e))?;
			self.window
				.add_event_listener_with_callback("hashchange", on_hash.as_ref().unchecked_ref())
				.map_err(|e| js_error("addEventListener(hashchange)", e))?;

			let id = self.next_listener.get();
			self.next_listener.set(id + 1);
			self.closures.borrow_mut().insert(id, (on_pop, on_hash));
			Ok(ListenerId(id))
		}

		fn unlisten(&self, id: ListenerId) {
			if let Some((on_pop, on_hash)) = self.closures.borrow_mut().remove(&id.0) {
				let _ = self
					.window
					.remove_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref());
				let _ = self.window.remove_event_listener_with_callback(
					"hashchange",
					on_hash.as_ref().unchecked_ref(),
				);
			}
		}
	}
}
