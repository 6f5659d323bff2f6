//! Site header with the full-screen navigation menu.
//!
//! Opening the menu locks page scroll. The body gets `no-scroll` plus right
//! padding equal to the scrollbar it just lost, so the layout doesn't jump.

use leptos::ev;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::theme_toggle::ThemeToggle;
use crate::config::SiteConfig;
use crate::error::describe;
use crate::theme::ThemeMode;

/// Class that stops the body from scrolling while the menu is open.
pub const NO_SCROLL_CLASS: &str = "no-scroll";

fn set_style(element: &HtmlElement, name: &str, value: &str) {
	if let Err(e) = element.style().set_property(name, value) {
		debug!("site-fx: setting {name} failed: {}", describe(&e));
	}
}

/// Width of the vertical scrollbar, measured with a hidden scrolling element.
pub fn scrollbar_width(document: &Document) -> Option<i32> {
	let body = document.body()?;
	let outer: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
	let inner = document.create_element("div").ok()?;
	set_style(&outer, "visibility", "hidden");
	set_style(&outer, "overflow", "scroll");
	set_style(&outer, "position", "absolute");
	outer.append_child(&inner).ok()?;
	body.append_child(&outer).ok()?;

	let width = inner
		.dyn_ref::<HtmlElement>()
		.map(|inner| outer.offset_width() - inner.offset_width());
	outer.remove();
	width.map(|w| w.max(0))
}

/// Remembers the body's padding while scroll is locked.
#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
	original_padding: Option<String>,
}

impl ScrollLock {
	/// Stop page scroll, padding the body by the scrollbar width it loses.
	pub fn lock(&mut self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some((document, body)) = window.document().and_then(|d| d.body().map(|b| (d, b)))
		else {
			return;
		};

		self.original_padding = window
			.get_computed_style(&body)
			.ok()
			.flatten()
			.and_then(|style| style.get_property_value("padding-right").ok());
		let width = scrollbar_width(&document).unwrap_or(0);
		debug!("site-fx: locking scroll, compensating {width}px");

		set_style(&body, "padding-right", &format!("{width}px"));
		if let Err(e) = body.class_list().add_1(NO_SCROLL_CLASS) {
			debug!("site-fx: adding {NO_SCROLL_CLASS} failed: {}", describe(&e));
		}
	}

	/// Restore scrolling and the padding remembered by [`ScrollLock::lock`].
	pub fn unlock(&mut self) {
		let Some(body) = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.body())
		else {
			return;
		};
		let padding = self.original_padding.take().unwrap_or_default();
		set_style(&body, "padding-right", &padding);
		if let Err(e) = body.class_list().remove_1(NO_SCROLL_CLASS) {
			debug!("site-fx: removing {NO_SCROLL_CLASS} failed: {}", describe(&e));
		}
	}
}

/// Header bar, menu toggle, and full-screen navigation.
///
/// The header picks up `scrolled` once the page scrolls past the configured
/// threshold, except while the menu is open.
#[component]
pub fn SiteHeader(theme: RwSignal<ThemeMode>) -> impl IntoView {
	let config = use_context::<SiteConfig>().unwrap_or_default();
	let menu_open = RwSignal::new(false);
	let scrolled = RwSignal::new(false);
	let lock = StoredValue::new(ScrollLock::default());

	Effect::new(move |prev: Option<bool>| {
		let open = menu_open.get();
		if prev.is_some_and(|was| was != open) {
			if open {
				lock.update_value(ScrollLock::lock);
			} else {
				lock.update_value(ScrollLock::unlock);
			}
		}
		open
	});

	let threshold = config.scroll_threshold;
	let scroll_handle = window_event_listener(ev::scroll, move |_| {
		if menu_open.get_untracked() {
			return;
		}
		let y = web_sys::window()
			.and_then(|w| w.scroll_y().ok())
			.unwrap_or(0.0);
		scrolled.set(y > threshold);
	});
	on_cleanup(move || {
		scroll_handle.remove();
		if menu_open.get_untracked() {
			lock.update_value(ScrollLock::unlock);
		}
	});

	let links = config
		.nav_links
		.into_iter()
		.map(|link| {
			view! {
				<li>
					<a href=link.href on:click=move |_| menu_open.set(false)>
						{link.label}
					</a>
				</li>
			}
		})
		.collect_view();

	view! {
		<header
			id="header"
			class="site-header"
			class:expanded=move || menu_open.get()
			class:scrolled=move || scrolled.get()
		>
			<a class="logo" href="#home">
				{config.site_name}
			</a>
			<div class="header-actions">
				<ThemeToggle theme=theme />
				<button
					id="menuToggle"
					class="menu-toggle"
					class:active=move || menu_open.get()
					aria-label="Toggle menu"
					aria-expanded=move || menu_open.get().to_string()
					on:click=move |_| menu_open.update(|open| *open = !*open)
				>
					<span class="menu-bar"></span>
					<span class="menu-bar"></span>
				</button>
			</div>
		</header>
		<nav id="fullNav" class="full-nav" class:active=move || menu_open.get()>
			<ul>{links}</ul>
		</nav>
	}
}
