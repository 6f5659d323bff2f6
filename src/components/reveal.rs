//! Fade sections in as they scroll into view.

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::describe;

const FADE_SELECTOR: &str = ".fade-in";
const HEADER_FADE_SELECTOR: &str = ".page-header .fade-in";
const VISIBLE_CLASS: &str = "visible";

/// Mark `.fade-in` elements `visible` the first time they enter the viewport.
/// Page header elements are revealed straight away and `<body>` gets `loaded`.
pub fn reveal_on_scroll() {
	if let Err(e) = observe() {
		warn!("site-fx: reveal on scroll unavailable: {}", describe(&e));
	}
}

fn observe() -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;

	if let Some(body) = document.body() {
		body.class_list().add_1("loaded")?;
	}

	let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
		|entries: js_sys::Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let entry: IntersectionObserverEntry = entry.unchecked_into();
				if entry.is_intersecting() {
					let target = entry.target();
					let _ = target.class_list().add_1(VISIBLE_CLASS);
					observer.unobserve(&target);
				}
			}
		},
	);
	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(0.2));
	options.set_root_margin("0px 0px -50px 0px");
	let observer =
		IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
	// Lives as long as the page.
	callback.forget();

	let targets = document.query_selector_all(FADE_SELECTOR)?;
	for i in 0..targets.length() {
		if let Some(el) = targets.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
			observer.observe(&el);
		}
	}

	let headers = document.query_selector_all(HEADER_FADE_SELECTOR)?;
	for i in 0..headers.length() {
		if let Some(el) = headers.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
			el.class_list().add_1(VISIBLE_CLASS)?;
		}
	}

	Ok(())
}
