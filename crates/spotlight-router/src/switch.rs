//! Route declarations and first-match selection.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::RouterError;
use crate::location::Location;
use crate::pattern::{PathParams, RoutePattern};

/// The result of selecting a route for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
	/// The location that was matched.
	pub location: Location,
	/// Captured `:param` values. Empty for fallbacks.
	pub params: PathParams,
	/// Name of the selected route, if it was declared with one.
	pub name: Option<String>,
	/// Whether the fallback was selected.
	pub is_fallback: bool,
}

type ViewFactory<V> = Arc<dyn Fn(&RouteMatch) -> V + Send + Sync>;

/// A pattern-to-view binding. A route without a pattern is a fallback.
pub struct Route<V> {
	pattern: Option<RoutePattern>,
	name: Option<String>,
	view: ViewFactory<V>,
}

impl<V> Clone for Route<V> {
	fn clone(&self) -> Self {
		Self {
			pattern: self.pattern.clone(),
			name: self.name.clone(),
			view: Arc::clone(&self.view),
		}
	}
}

impl<V> fmt::Debug for Route<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern.as_ref().map(RoutePattern::as_str))
			.field("name", &self.name)
			.finish()
	}
}

impl<V> Route<V> {
	/// Creates a route from a pattern literal.
	///
	/// # Panics
	///
	/// Panics if `pattern` is invalid. Use [`Route::try_new`] for patterns that
	/// are not known at compile time.
	pub fn new<F>(pattern: &str, view: F) -> Self
	where
		F: Fn(&RouteMatch) -> V + Send + Sync + 'static,
	{
		match Self::try_new(pattern, view) {
			Ok(route) => route,
			Err(err) => panic!("{}", err),
		}
	}

	/// Creates a route, returning an error for an invalid pattern.
	pub fn try_new<F>(pattern: &str, view: F) -> Result<Self, RouterError>
	where
		F: Fn(&RouteMatch) -> V + Send + Sync + 'static,
	{
		Ok(Self {
			pattern: Some(RoutePattern::new(pattern)?),
			name: None,
			view: Arc::new(view),
		})
	}

	/// Creates a fallback route, selected when no pattern matches.
	pub fn fallback<F>(view: F) -> Self
	where
		F: Fn(&RouteMatch) -> V + Send + Sync + 'static,
	{
		Self {
			pattern: None,
			name: None,
			view: Arc::new(view),
		}
	}

	/// Names the route for reverse lookups.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the pattern, or `None` for a fallback.
	pub fn pattern(&self) -> Option<&RoutePattern> {
		self.pattern.as_ref()
	}

	/// Returns whether this is a fallback route.
	pub fn is_fallback(&self) -> bool {
		self.pattern.is_none()
	}

	/// Builds the view for a match.
	pub fn render(&self, route_match: &RouteMatch) -> V {
		(self.view)(route_match)
	}
}

/// An ordered list of routes of which at most one renders.
///
/// Patterned routes are tried in declaration order and the first match
/// wins. If none matches, the first declared fallback is selected no matter
/// where it appears in the list. If there is no fallback, nothing renders.
///
/// # Example
///
/// ```
/// use spotlight_router::{Location, Switch};
///
/// let switch = Switch::new()
/// 	.route("/", |_| "home")
/// 	.route("/judges", |_| "judges")
/// 	.fallback(|_| "not found");
///
/// assert_eq!(switch.render(&Location::new("/judges")), Some("judges"));
/// assert_eq!(switch.render(&Location::new("/unknown")), Some("not found"));
/// ```
pub struct Switch<V> {
	routes: Vec<Route<V>>,
	named_routes: HashMap<String, usize>,
}

impl<V> Clone for Switch<V> {
	fn clone(&self) -> Self {
		Self {
			routes: self.routes.clone(),
			named_routes: self.named_routes.clone(),
		}
	}
}

impl<V> fmt::Debug for Switch<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Switch")
			.field("routes", &self.routes)
			.field("has_fallback", &self.has_fallback())
			.finish()
	}
}

impl<V> Default for Switch<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> Switch<V> {
	/// Creates an empty switch.
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			named_routes: HashMap::new(),
		}
	}

	/// Adds a route.
	///
	/// # Panics
	///
	/// Panics if `pattern` is invalid.
	pub fn route<F>(self, pattern: &str, view: F) -> Self
	where
		F: Fn(&RouteMatch) -> V + Send + Sync + 'static,
	{
		self.with(Route::new(pattern, view))
	}

	/// Adds a named route.
	///
	/// # Panics
	///
	/// Panics if `pattern` is invalid.
	pub fn named_route<F>(self, name: &str, pattern: &str, view: F) -> Self
	where
		F: Fn(&RouteMatch) -> V + Send + Sync + 'static,
	{
		self.with(Route::new(pattern, view).named(name))
	}

	/// Adds a fallback route.
	pub fn fallback<F>(self, view: F) -> Self
	where
		F: Fn(&RouteMatch) -> V + Send + Sync + 'static,
	{
		self.with(Route::fallback(view))
	}

	/// Adds a prepared route.
	pub fn with(mut self, route: Route<V>) -> Self {
		if let Some(name) = route.name() {
			// Later declarations with the same name shadow earlier ones
			self.named_routes.insert(name.to_string(), self.routes.len());
		}
		self.routes.push(route);
		self
	}

	/// Returns the declared routes in order.
	pub fn routes(&self) -> &[Route<V>] {
		&self.routes
	}

	/// Returns whether a fallback is declared.
	pub fn has_fallback(&self) -> bool {
		self.routes.iter().any(Route::is_fallback)
	}

	/// Returns whether a route with this name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named_routes.contains_key(name)
	}

	fn find(&self, location: &Location) -> Option<(&Route<V>, RouteMatch)> {
		let matched = self.routes.iter().find_map(|route| {
			let params = route.pattern.as_ref()?.matches(location)?;
			Some((route, params, false))
		});
		let (route, params, is_fallback) = matched.or_else(|| {
			self.routes
				.iter()
				.find(|route| route.is_fallback())
				.map(|route| (route, PathParams::default(), true))
		})?;

		Some((
			route,
			RouteMatch {
				location: location.clone(),
				params,
				name: route.name.clone(),
				is_fallback,
			},
		))
	}

	/// Selects the route for `location`.
	pub fn select(&self, location: &Location) -> Option<RouteMatch> {
		self.find(location).map(|(_, route_match)| route_match)
	}

	/// Renders the selected route's view, or `None` when nothing matches and
	/// no fallback is declared.
	pub fn render(&self, location: &Location) -> Option<V> {
		match self.find(location) {
			Some((route, route_match)) => Some(route.render(&route_match)),
			None => {
				tracing::warn!(%location, "no route matched and no fallback is declared");
				None
			}
		}
	}

	/// Builds a concrete path for a named route.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named_routes
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;

		let params_map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		let pattern = self.routes[*index]
			.pattern
			.as_ref()
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;

		pattern.reverse(&params_map).ok_or_else(|| {
			let missing = pattern
				.param_names()
				.find(|param| !params_map.contains_key(*param))
				.unwrap_or_default();
			RouterError::MissingParameter(missing.to_string())
		})
	}
}
