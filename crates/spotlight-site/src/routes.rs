//! The site's pages and route table.

use std::fmt;

use spotlight_router::Switch;

/// Name shown in titles and the header.
pub const SITE_NAME: &str = "Ready Set StartUP UK";

/// A page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SitePage {
	Home,
	Seasons,
	Cast,
	Judges,
	Mentors,
	Clips,
	Resources,
	Apply,
	NotFound,
}

impl SitePage {
	/// Every routable page in declaration order. `NotFound` is the fallback
	/// and has no path.
	pub const ROUTED: [SitePage; 8] = [
		SitePage::Home,
		SitePage::Seasons,
		SitePage::Cast,
		SitePage::Judges,
		SitePage::Mentors,
		SitePage::Clips,
		SitePage::Resources,
		SitePage::Apply,
	];

	/// Pages linked from the header navigation.
	pub const NAV: [SitePage; 6] = [
		SitePage::Seasons,
		SitePage::Judges,
		SitePage::Mentors,
		SitePage::Clips,
		SitePage::Resources,
		SitePage::Apply,
	];

	/// Route pattern, `None` for the fallback page.
	pub fn path(&self) -> Option<&'static str> {
		match self {
			Self::Home => Some("/"),
			Self::Seasons => Some("/seasons"),
			Self::Cast => Some("/cast"),
			Self::Judges => Some("/judges"),
			Self::Mentors => Some("/mentors"),
			Self::Clips => Some("/clips"),
			Self::Resources => Some("/resources"),
			Self::Apply => Some("/apply"),
			Self::NotFound => None,
		}
	}

	/// Route name used for reverse lookups.
	pub fn name(&self) -> &'static str {
		match self {
			Self::Home => "home",
			Self::Seasons => "seasons",
			Self::Cast => "cast",
			Self::Judges => "judges",
			Self::Mentors => "mentors",
			Self::Clips => "clips",
			Self::Resources => "resources",
			Self::Apply => "apply",
			Self::NotFound => "not-found",
		}
	}

	/// Header label.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Home => "Home",
			Self::Seasons => "Seasons",
			Self::Cast => "Cast",
			Self::Judges => "Judges",
			Self::Mentors => "Mentors",
			Self::Clips => "Clips",
			Self::Resources => "Resources",
			Self::Apply => "Apply",
			Self::NotFound => "Page Not Found",
		}
	}

	/// Document title.
	pub fn title(&self) -> String {
		match self {
			Self::Home => SITE_NAME.to_string(),
			other => format!("{} | {}", other.label(), SITE_NAME),
		}
	}
}

impl fmt::Display for SitePage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Declares the route table: every routed page in order, then the
/// not-found fallback.
pub fn site_switch() -> Switch<SitePage> {
	let switch = SitePage::ROUTED.iter().fold(Switch::new(), |switch, page| {
		let page = *page;
		match page.path() {
			Some(path) => switch.named_route(page.name(), path, move |_| page),
			None => switch,
		}
	});
	switch.fallback(|_| SitePage::NotFound)
}
