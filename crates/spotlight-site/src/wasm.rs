//! WASM entry point for the site

use std::rc::Rc;

use spotlight_router::{BasePath, BrowserHistory, RouterConfig, RouterError, RoutingMode};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, window};

use crate::app::{Boot, SiteOptions, boot, render_nav};
use crate::routes::SitePage;

/// `<meta name="spotlight-routing" content="hash">` selects the routing mode.
const MODE_META: &str = "meta[name=\"spotlight-routing\"]";

fn js_error(err: RouterError) -> JsValue {
	JsValue::from_str(&err.to_string())
}

/// Reads deployment options from the entry document.
///
/// The base path comes from `<base href>`, the mode from the
/// `spotlight-routing` meta tag. Both are written by `spotlight-admin
/// build-routes`.
fn options_from_document(document: &Document) -> SiteOptions {
	let mode = document
		.query_selector(MODE_META)
		.ok()
		.flatten()
		.and_then(|meta| meta.get_attribute("content"))
		.and_then(|content| content.parse::<RoutingMode>().ok())
		.unwrap_or_default();
	let base_path = document
		.query_selector("base[href]")
		.ok()
		.flatten()
		.and_then(|base| base.get_attribute("href"))
		.map(BasePath::new)
		.unwrap_or_default();

	SiteOptions::new(RouterConfig::new(mode).with_base_path(base_path))
}

fn show_page(document: &Document, page: SitePage) {
	document.set_title(&page.title());
	if let Some(body) = document.body() {
		let _ = body.set_attribute("data-page", page.name());
	}
}

/// WASM entry point
///
/// Runs the redirect shim, mounts the router and wires navigation.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
	console_error_panic_hook::set_once();

	let window = window().ok_or_else(|| JsValue::from_str("No window object"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("No document object"))?;

	let options = options_from_document(&document);
	let history = Rc::new(BrowserHistory::new().map_err(js_error)?);
	let router = match boot(&options, history).map_err(js_error)? {
		Boot::Ready(router) => Rc::new(router),
		Boot::Redirected { .. } | Boot::Skipped => return Ok(()),
	};

	let nav = document.get_element_by_id("site-nav");
	let render = {
		let document = document.clone();
		let router = Rc::clone(&router);
		move |page: Option<SitePage>| {
			show_page(&document, page.unwrap_or(SitePage::NotFound));
			// SAFETY(XSS): render_nav() HTML-escapes every href, class and label
			if let Some(nav) = &nav {
				nav.set_inner_html(&render_nav(&router));
			}
		}
	};
	render(router.render_current());

	// Re-render on every location change. The page never unloads the router.
	router.on_change(move |_, page| render(page)).forget();

	// Intercept clicks on internal links (event delegation)
	let click_router = Rc::clone(&router);
	let link_handler = Closure::wrap(Box::new(move |event: Event| {
		let Some(anchor) = event
			.target()
			.and_then(|target| target.dyn_into::<Element>().ok())
			.and_then(|element| element.closest("a[data-link]").ok().flatten())
		else {
			return;
		};
		let Some(location) = anchor
			.get_attribute("href")
			.and_then(|href| options.location_for_href(&href))
		else {
			return;
		};

		event.prevent_default();
		let result = if anchor.has_attribute("data-replace") {
			click_router.replace(location.as_str())
		} else {
			click_router.navigate(location.as_str())
		};
		if let Err(err) = result {
			tracing::warn!(error = %err, "link navigation failed");
		}
	}) as Box<dyn FnMut(_)>);

	document.add_event_listener_with_callback("click", link_handler.as_ref().unchecked_ref())?;
	link_handler.forget();

	Ok(())
}
