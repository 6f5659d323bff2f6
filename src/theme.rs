//! Site-wide light/dark mode.
//!
//! The active mode lives in the `data-theme` attribute on `<html>`. Everything
//! else (stylesheets, the particle background) reacts to that attribute.

use std::fmt;

use log::debug;

use crate::error::describe;
use crate::storage;

/// Attribute on the document root carrying the active mode.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Light or dark color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	/// Dark content on a light background.
	#[default]
	Light,
	/// Light content on a dark background.
	Dark,
}

impl ThemeMode {
	/// Interpret an attribute value. Only `"dark"` is dark.
	pub fn from_attribute(value: Option<&str>) -> Self {
		match value {
			Some("dark") => Self::Dark,
			_ => Self::Light,
		}
	}

	/// Parse a stored preference, rejecting anything unexpected.
	pub fn from_stored(value: &str) -> Option<Self> {
		match value {
			"light" => Some(Self::Light),
			"dark" => Some(Self::Dark),
			_ => None,
		}
	}

	/// Attribute and storage spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}
}

impl fmt::Display for ThemeMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Read the current attribute off the document root.
pub fn current() -> ThemeMode {
	let value = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.and_then(|el| el.get_attribute(THEME_ATTRIBUTE));
	ThemeMode::from_attribute(value.as_deref())
}

/// Stored preference, falling back to the system color scheme.
pub fn initial() -> ThemeMode {
	let stored = storage::get(storage::THEME_KEY).and_then(|v| ThemeMode::from_stored(&v));
	if let Some(mode) = stored {
		return mode;
	}
	let prefers_dark = web_sys::window()
		.and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
		.is_some_and(|mq| mq.matches());
	if prefers_dark {
		ThemeMode::Dark
	} else {
		ThemeMode::Light
	}
}

/// Set `data-theme` on the document root.
pub fn apply(mode: ThemeMode) {
	if let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
	{
		if let Err(e) = root.set_attribute(THEME_ATTRIBUTE, mode.as_str()) {
			debug!("site-fx: setting {THEME_ATTRIBUTE} failed: {}", describe(&e));
		}
	}
}

/// The mode a toggle should switch to, read from the document root so a
/// change made outside the app is respected.
pub fn next() -> ThemeMode {
	current().toggled()
}

/// Remember the preference for the next visit.
pub fn persist(mode: ThemeMode) {
	storage::set(storage::THEME_KEY, mode.as_str());
}
