//! The facade exposes the member crates and a working prelude.

use std::rc::Rc;

use rstest::rstest;
use spotlight::prelude::*;

#[rstest]
#[case(RoutingMode::Path, "https://example.com/clips", SitePage::Clips)]
#[case(RoutingMode::Hash, "https://example.com/#/mentors", SitePage::Mentors)]
#[case(RoutingMode::Hash, "https://example.com/#/nope", SitePage::NotFound)]
fn test_router_from_prelude(#[case] mode: RoutingMode, #[case] url: &str, #[case] page: SitePage) {
	let history = Rc::new(MemoryHistory::new(url).unwrap());
	let router = Router::with_history(RouterConfig::new(mode), history, site_switch()).unwrap();
	assert_eq!(router.render_current(), Some(page));
}

#[rstest]
fn test_member_crates_are_reexported() {
	assert_eq!(spotlight::site::SITE_NAME, SITE_NAME);
	assert_eq!(spotlight::router::PATH_PARAM, "path");
}

#[cfg(feature = "conf")]
#[rstest]
fn test_default_settings_match_router_defaults() {
	let settings = Settings::default();
	assert_eq!(settings.site.router_config(), RouterConfig::default());
}
