//! Integration tests for the client-side router
//!
//! These tests drive the public API end to end against an in-memory history:
//! 1. First-match selection over a full route table with a fallback
//! 2. Navigation in both routing modes, including back traversal
//! 3. The redirect shim for sub-path deployments

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};
use spotlight_router::{
	History, Location, LocationStore, MemoryHistory, Navigator, RedirectShim, Router, RouterConfig,
	RoutingMode, ShimOutcome, Switch, hash_of,
};

fn site_switch() -> Switch<&'static str> {
	Switch::new()
		.route("/", |_| "home")
		.route("/seasons", |_| "seasons")
		.route("/cast", |_| "cast")
		.route("/judges", |_| "judges")
		.route("/mentors", |_| "mentors")
		.route("/clips", |_| "clips")
		.route("/resources", |_| "resources")
		.route("/apply", |_| "apply")
		.fallback(|_| "not-found")
}

#[fixture]
fn memory() -> Rc<MemoryHistory> {
	Rc::new(MemoryHistory::new("https://example.com/").unwrap())
}

#[rstest]
#[case("/judges", "judges")]
#[case("/unknown", "not-found")]
#[case("/", "home")]
#[case("/apply", "apply")]
#[case("/cast/extra", "not-found")]
fn test_route_table_selection(#[case] location: &str, #[case] expected: &str) {
	assert_eq!(site_switch().render(&Location::new(location)), Some(expected));
}

#[rstest]
fn test_hash_navigate_without_leading_slash(memory: Rc<MemoryHistory>) {
	let store = LocationStore::new(RouterConfig::new(RoutingMode::Hash), memory.clone()).unwrap();
	let navigator = Navigator::new(store.clone());

	navigator.navigate("seasons").unwrap();

	assert_eq!(hash_of(&memory.current_url().unwrap()), "#/seasons");
	assert_eq!(store.read_location().unwrap(), "/seasons");
}

#[rstest]
#[case(RoutingMode::Path)]
#[case(RoutingMode::Hash)]
fn test_back_after_navigate_restores_prior_location(
	memory: Rc<MemoryHistory>,
	#[case] mode: RoutingMode,
) {
	let router = Router::with_history(RouterConfig::new(mode), memory, site_switch()).unwrap();
	router.navigate("/mentors").unwrap();
	router.navigate("/clips").unwrap();
	assert_eq!(router.render_current(), Some("clips"));

	router.back().unwrap();

	assert_eq!(router.location(), "/mentors");
	assert_eq!(router.render_current(), Some("mentors"));
}

#[rstest]
fn test_subscribers_see_every_change_once(memory: Rc<MemoryHistory>) {
	let router =
		Router::with_history(RouterConfig::new(RoutingMode::Hash), memory, site_switch()).unwrap();
	let seen = Rc::new(RefCell::new(Vec::new()));
	let sink = Rc::clone(&seen);
	router
		.store()
		.subscribe(move |location| sink.borrow_mut().push(location.to_string()))
		.forget();

	router.navigate("/cast").unwrap();
	router.navigate("/cast").unwrap();
	router.navigate("/judges").unwrap();

	assert_eq!(*seen.borrow(), vec!["/cast", "/judges"]);
}

#[rstest]
fn test_shim_sub_path_deployment_end_to_end() {
	let history = Rc::new(MemoryHistory::new("https://example.com/show/judges").unwrap());
	let config = RouterConfig::new(RoutingMode::Hash);
	let shim = RedirectShim::new(config.clone()).strip_prefix("/show");

	let outcome = shim.apply(history.as_ref()).unwrap();
	assert_eq!(
		outcome,
		ShimOutcome::Redirect {
			target: "https://example.com/#/judges".to_string(),
			location: Location::new("/judges"),
		}
	);

	// The entry document loads and runs the shim again
	assert_eq!(
		shim.apply(history.as_ref()).unwrap(),
		ShimOutcome::Stay(Location::new("/judges"))
	);
	let router = Router::with_history(config, history.clone(), site_switch()).unwrap();
	assert_eq!(router.render_current(), Some("judges"));
	assert_eq!(history.load_count(), 2);
}

#[rstest]
fn test_shim_root_stays_home(memory: Rc<MemoryHistory>) {
	let shim = RedirectShim::new(RouterConfig::new(RoutingMode::Hash));
	assert_eq!(
		shim.apply(memory.as_ref()).unwrap(),
		ShimOutcome::Stay(Location::root())
	);
	assert_eq!(memory.load_count(), 1);
	assert_eq!(memory.current_url().unwrap().as_str(), "https://example.com/");
}

#[rstest]
fn test_path_mode_with_base_path() {
	let history = Rc::new(MemoryHistory::new("https://example.com/show/").unwrap());
	let config = RouterConfig::new(RoutingMode::Path).with_base_path("/show");
	let router = Router::with_history(config, history.clone(), site_switch()).unwrap();
	assert_eq!(router.render_current(), Some("home"));

	router.navigate("resources").unwrap();

	assert_eq!(history.current_url().unwrap().path(), "/show/resources");
	assert_eq!(router.href("/apply"), "/show/apply");
	assert_eq!(router.render_current(), Some("resources"));
}
