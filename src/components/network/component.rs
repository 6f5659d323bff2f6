//! Leptos mount point for the particle background.

use leptos::prelude::*;

use super::animation;
use crate::config::FieldConfig;

/// Starts the page-wide particle background when mounted and tears it down
/// on cleanup. Renders nothing itself; the canvas is inserted at the top of
/// `<body>` so it sits behind all content.
#[component]
pub fn NetworkBackground(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		animation::start(config.clone());
	});
	on_cleanup(animation::stop);
}
