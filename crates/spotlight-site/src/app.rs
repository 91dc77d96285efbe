//! Application boot: redirect shim first, then the router.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use spotlight_router::{
	BasePath, History, Link, Location, RedirectShim, Router, RouterConfig, RouterError, RoutingMode,
	ShimOutcome,
};

use crate::routes::{SitePage, site_switch};

/// Deployment options the site boots with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOptions {
	/// Routing mode and base path.
	pub router: RouterConfig,
	/// Host prefix the redirect shim strips. Defaults to the base path.
	pub strip_prefix: Option<BasePath>,
	/// Asset prefix left over from an earlier deployment.
	pub legacy_asset_prefix: Option<String>,
}

impl SiteOptions {
	pub fn new(router: RouterConfig) -> Self {
		Self {
			router,
			..Self::default()
		}
	}

	/// Builds the redirect shim for these options.
	pub fn shim(&self) -> RedirectShim {
		let shim = RedirectShim::new(self.router.clone());
		match &self.strip_prefix {
			Some(prefix) => shim.strip_prefix(prefix.clone()),
			None => shim,
		}
	}

	/// Resolves an image or media path for the deployment.
	pub fn asset_url(&self, path: &str) -> String {
		self.router
			.base_path
			.asset_url(path, self.legacy_asset_prefix.as_deref())
	}

	/// Maps an internal link's `href` back to a location.
	///
	/// Returns `None` for anchors that do not belong to the router, such as a
	/// hash-mode `href` without a fragment or a path outside the base path.
	pub fn location_for_href(&self, href: &str) -> Option<Location> {
		match self.router.mode {
			RoutingMode::Hash => href
				.split_once('#')
				.map(|(_, fragment)| Location::from_fragment(fragment)),
			RoutingMode::Path => {
				let path = href.split(['?', '#']).next().unwrap_or_default();
				self.router.base_path.strip(path).map(Location::new)
			}
		}
	}
}

/// Result of [`boot`].
#[derive(Debug)]
pub enum Boot {
	/// The router is live.
	Ready(Router<SitePage>),
	/// The address was replaced; a new document is loading.
	Redirected {
		/// URL being loaded.
		target: String,
	},
	/// The URL names a static asset; the app does not mount.
	Skipped,
}

/// Boots the site against `history`.
///
/// A `?path=` parameter left by a fallback document is restored first. The
/// redirect shim then decides whether the current URL can be routed or must
/// be rewritten into the canonical scheme.
pub fn boot(options: &SiteOptions, history: Rc<dyn History>) -> Result<Boot, RouterError> {
	let shim = options.shim();
	if let Some(location) = shim.restore(history.as_ref())? {
		tracing::debug!(%location, "restored location from fallback document");
	}

	match shim.apply(history.as_ref())? {
		ShimOutcome::Redirect { target, .. } => Ok(Boot::Redirected { target }),
		ShimOutcome::Passthrough => Ok(Boot::Skipped),
		ShimOutcome::Stay(location) => {
			let router = Router::with_history(options.router.clone(), history, site_switch())?;
			tracing::info!(
				%location,
				mode = %options.router.mode,
				base = %options.router.base_path,
				"site booted"
			);
			Ok(Boot::Ready(router))
		}
	}
}

/// Header navigation links.
pub fn nav_links() -> Vec<Link> {
	SitePage::NAV
		.iter()
		.filter_map(|page| page.path().map(|path| Link::new(path, page.label())))
		.collect()
}

/// Renders the header navigation for the current router state.
pub fn render_nav(router: &Router<SitePage>) -> String {
	let active = router.render_current();
	nav_links()
		.into_iter()
		.zip(SitePage::NAV)
		.map(|(link, page)| {
			let link = if Some(page) == active {
				link.class("active")
			} else {
				link
			};
			link.render_html(router.navigator())
		})
		.collect::<Vec<_>>()
		.join("")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use spotlight_router::MemoryHistory;

	fn hash_options() -> SiteOptions {
		SiteOptions::new(RouterConfig::new(RoutingMode::Hash))
	}

	#[rstest]
	#[case(RoutingMode::Hash, "", "/#/judges", Some("/judges"))]
	#[case(RoutingMode::Hash, "/show", "/show/#/judges", Some("/judges"))]
	#[case(RoutingMode::Hash, "", "/judges", None)]
	#[case(RoutingMode::Path, "", "/judges", Some("/judges"))]
	#[case(RoutingMode::Path, "/show", "/show/judges?x=1", Some("/judges"))]
	#[case(RoutingMode::Path, "/show", "/elsewhere", None)]
	fn test_location_for_href(
		#[case] mode: RoutingMode,
		#[case] base: &str,
		#[case] href: &str,
		#[case] expected: Option<&str>,
	) {
		let options = SiteOptions::new(RouterConfig::new(mode).with_base_path(base));
		assert_eq!(options.location_for_href(href), expected.map(Location::new));
	}

	#[rstest]
	fn test_asset_url_strips_legacy_prefix() {
		let mut options = SiteOptions::new(RouterConfig::default().with_base_path("/show"));
		options.legacy_asset_prefix = Some("/ReadySetStartup/".to_string());
		assert_eq!(
			options.asset_url("/ReadySetStartup/assets/judges/ying.jpeg"),
			"/show/assets/judges/ying.jpeg"
		);
	}

	#[rstest]
	fn test_boot_ready_at_root() {
		let history = Rc::new(MemoryHistory::new("https://example.com/").unwrap());
		let Boot::Ready(router) = boot(&hash_options(), history).unwrap() else {
			panic!("expected the router to boot");
		};
		assert_eq!(router.render_current(), Some(SitePage::Home));
	}

	#[rstest]
	fn test_boot_redirects_host_path() {
		let history = Rc::new(MemoryHistory::new("https://example.com/mentors").unwrap());
		let boot = boot(&hash_options(), history.clone()).unwrap();
		assert!(matches!(
			boot,
			Boot::Redirected { ref target } if target == "https://example.com/#/mentors"
		));
		assert_eq!(history.load_count(), 2);
	}

	#[rstest]
	fn test_boot_skips_assets() {
		let history =
			Rc::new(MemoryHistory::new("https://example.com/assets/logo.png").unwrap());
		assert!(matches!(
			boot(&hash_options(), history).unwrap(),
			Boot::Skipped
		));
	}

	#[rstest]
	fn test_render_nav_marks_active_page() {
		let history = Rc::new(MemoryHistory::new("https://example.com/#/clips").unwrap());
		let Boot::Ready(router) = boot(&hash_options(), history).unwrap() else {
			panic!("expected the router to boot");
		};
		let html = render_nav(&router);
		assert!(html.contains(r#"<a href="/#/clips" class="active" data-link="true">Clips</a>"#));
		assert!(html.contains(r#"<a href="/#/apply" data-link="true">Apply</a>"#));
	}
}
