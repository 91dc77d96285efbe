//! Declarative anchors that navigate without a page reload.

use std::borrow::Cow;

use crate::error::RouterError;
use crate::navigator::{NavigationEvent, NavigationKind, Navigator};

/// Escapes text for use in HTML content and attribute values.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// An anchor pointing at a location or an external URL.
///
/// Internal links carry `data-link` so the page can intercept clicks and
/// hand them to [`Link::activate`]. External links open in a new tab and are
/// never intercepted.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use spotlight_router::{Link, LocationStore, MemoryHistory, Navigator, RouterConfig};
///
/// let history = Rc::new(MemoryHistory::new("https://example.com/").unwrap());
/// let navigator = Navigator::new(LocationStore::new(RouterConfig::default(), history).unwrap());
///
/// let html = Link::new("judges", "Judges").render_html(&navigator);
/// assert_eq!(html, r#"<a href="/judges" data-link="true">Judges</a>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
	to: String,
	content: String,
	class: Option<String>,
	replace: bool,
	external: bool,
}

impl Link {
	/// Creates an internal link.
	pub fn new(to: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			content: content.into(),
			class: None,
			replace: false,
			external: false,
		}
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Sets whether this is an external link.
	pub fn external(mut self, external: bool) -> Self {
		self.external = external;
		self
	}

	/// Returns the destination as given.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns the link text.
	pub fn content(&self) -> &str {
		&self.content
	}

	/// Returns whether this is an external link.
	pub fn is_external(&self) -> bool {
		self.external
	}

	/// Returns the `href` for the active routing mode.
	pub fn href(&self, navigator: &Navigator) -> String {
		if self.external {
			self.to.clone()
		} else {
			navigator.href(&self.to)
		}
	}

	/// Renders the anchor element.
	pub fn render_html(&self, navigator: &Navigator) -> String {
		let mut html = format!("<a href=\"{}\"", html_escape(&self.href(navigator)));
		if let Some(class) = &self.class {
			html.push_str(&format!(" class=\"{}\"", html_escape(class)));
		}
		if self.external {
			html.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
		} else {
			html.push_str(" data-link=\"true\"");
			if self.replace {
				html.push_str(" data-replace=\"true\"");
			}
		}
		html.push('>');
		html.push_str(&html_escape(&self.content));
		html.push_str("</a>");
		html
	}

	/// Handles a click.
	///
	/// Returns `true` when the navigation was performed in-app and the browser
	/// default should be prevented.
	pub fn activate(&self, navigator: &Navigator) -> Result<bool, RouterError> {
		if self.external {
			return Ok(false);
		}
		let kind = if self.replace {
			NavigationKind::Replace
		} else {
			NavigationKind::Push
		};
		navigator.dispatch(NavigationEvent::link(self.to.as_str()).with_kind(kind))?;
		Ok(true)
	}
}
