//! The promotional site for Ready Set StartUP UK.
//!
//! This crate declares the site's pages and route table, the JSON bodies
//! exchanged with the form backend, and the boot sequence that runs the
//! redirect shim before mounting the router. On `wasm32` it also provides
//! the browser entry point.

pub mod app;
pub mod routes;
pub mod shared;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use app::{Boot, SiteOptions, boot, nav_links, render_nav};
pub use routes::{SITE_NAME, SitePage, site_switch};
pub use shared::{
	ApiError, Application, ApplicationSubmission, Deadline, NewsletterSubscription, Subscriber,
};
