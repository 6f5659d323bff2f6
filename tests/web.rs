#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use leptos::reactive::owner::Owner;
use site_fx::components::header::{NO_SCROLL_CLASS, ScrollLock, scrollbar_width};
use site_fx::components::network::{
	CANVAS_CLASS, CONTAINER_CLASS, Lifecycle, NetworkAnimation, Palette, particles,
};
use site_fx::components::{NotificationKind, Notifier};
use site_fx::theme::{self, ThemeMode};
use site_fx::{FieldConfig, storage};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

fn containers() -> u32 {
	document()
		.query_selector_all(&format!(".{CONTAINER_CLASS}"))
		.unwrap()
		.length()
}

async fn flush_microtasks() {
	JsFuture::from(js_sys::Promise::resolve(&JsValue::NULL))
		.await
		.unwrap();
}

async fn sleep(ms: i32) {
	let promise = js_sys::Promise::new(&mut |resolve, _| {
		web_sys::window()
			.unwrap()
			.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
			.unwrap();
	});
	JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn destroy_before_initialize_is_harmless() {
	let mut animation = NetworkAnimation::new(FieldConfig::default());
	animation.destroy();
	assert_eq!(animation.lifecycle(), Lifecycle::Destroyed);
	assert_eq!(containers(), 0);
}

#[wasm_bindgen_test]
fn initialize_attaches_surface_behind_content() {
	let mut animation = NetworkAnimation::new(FieldConfig::default());
	animation.initialize();
	assert_eq!(animation.lifecycle(), Lifecycle::Active);

	let body = document().body().unwrap();
	let first = body.first_element_child().unwrap();
	assert!(first.class_list().contains(CONTAINER_CLASS));
	assert!(first.query_selector(&format!("canvas.{CANVAS_CLASS}")).unwrap().is_some());

	let window = web_sys::window().unwrap();
	let (w, h) = (
		window.inner_width().unwrap().as_f64().unwrap(),
		window.inner_height().unwrap().as_f64().unwrap(),
	);
	assert_eq!(
		animation.particle_count(),
		particles::particle_count(w, h, &FieldConfig::default())
	);

	animation.destroy();
	assert_eq!(containers(), 0);
}

#[wasm_bindgen_test]
fn destroy_twice_is_a_no_op() {
	let mut animation = NetworkAnimation::new(FieldConfig::default());
	animation.initialize();
	animation.destroy();
	animation.destroy();
	assert_eq!(animation.lifecycle(), Lifecycle::Destroyed);
	assert_eq!(containers(), 0);
}

#[wasm_bindgen_test]
fn destroyed_animation_cannot_restart() {
	let mut animation = NetworkAnimation::new(FieldConfig::default());
	animation.initialize();
	animation.destroy();
	animation.initialize();
	assert_eq!(animation.lifecycle(), Lifecycle::Destroyed);
	assert_eq!(containers(), 0);
}

#[wasm_bindgen_test(async)]
async fn theme_attribute_switches_palette() {
	theme::apply(ThemeMode::Light);
	let mut animation = NetworkAnimation::new(FieldConfig::default());
	animation.initialize();
	assert_eq!(animation.palette(), Some(Palette::LIGHT));

	theme::apply(ThemeMode::Dark);
	flush_microtasks().await;
	assert_eq!(animation.palette(), Some(Palette::DARK));

	document()
		.document_element()
		.unwrap()
		.remove_attribute(theme::THEME_ATTRIBUTE)
		.unwrap();
	flush_microtasks().await;
	assert_eq!(animation.palette(), Some(Palette::LIGHT));

	animation.destroy();
}

#[wasm_bindgen_test]
fn global_handle_starts_and_stops() {
	site_fx::components::network::start(FieldConfig::default());
	site_fx::components::network::start(FieldConfig::default());
	assert_eq!(containers(), 1);

	site_fx::components::network::destroy_network_animation();
	assert_eq!(containers(), 0);
	site_fx::components::network::stop();
}

#[wasm_bindgen_test]
fn stored_theme_wins_over_system_preference() {
	storage::set(storage::THEME_KEY, "dark");
	assert_eq!(theme::initial(), ThemeMode::Dark);
	storage::set(storage::THEME_KEY, "light");
	assert_eq!(theme::initial(), ThemeMode::Light);
	storage::remove(storage::THEME_KEY);

	theme::apply(ThemeMode::Dark);
	assert_eq!(theme::current(), ThemeMode::Dark);
	theme::apply(ThemeMode::Light);
}

#[wasm_bindgen_test]
fn canvas_matches_viewport_at_device_resolution() {
	let mut animation = NetworkAnimation::new(FieldConfig::default());
	animation.initialize();

	let window = web_sys::window().unwrap();
	let w = window.inner_width().unwrap().as_f64().unwrap();
	let h = window.inner_height().unwrap().as_f64().unwrap();
	let dpr = window.device_pixel_ratio();

	let canvas: web_sys::HtmlCanvasElement = document()
		.query_selector(&format!("canvas.{CANVAS_CLASS}"))
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap();
	assert_eq!(canvas.width(), (w * dpr) as u32);
	assert_eq!(canvas.height(), (h * dpr) as u32);
	let style = canvas.style();
	assert_eq!(style.get_property_value("width").unwrap(), format!("{w}px"));
	assert_eq!(style.get_property_value("height").unwrap(), format!("{h}px"));

	animation.destroy();
}

#[wasm_bindgen_test]
fn scroll_lock_pads_by_scrollbar_and_restores() {
	let body = document().body().unwrap();
	body.style().set_property("padding-right", "7px").unwrap();
	let expected = format!("{}px", scrollbar_width(&document()).unwrap_or(0));

	let mut lock = ScrollLock::default();
	lock.lock();
	assert!(body.class_list().contains(NO_SCROLL_CLASS));
	assert_eq!(body.style().get_property_value("padding-right").unwrap(), expected);

	lock.unlock();
	assert!(!body.class_list().contains(NO_SCROLL_CLASS));
	assert_eq!(body.style().get_property_value("padding-right").unwrap(), "7px");

	body.style().remove_property("padding-right").unwrap();
}

#[wasm_bindgen_test(async)]
async fn newer_notification_outlives_older_timer() {
	let owner = Owner::new();
	owner.set();
	let notifier = Notifier::new(Duration::from_millis(60));

	notifier.show(NotificationKind::Error);
	sleep(30).await;
	notifier.show(NotificationKind::Success);
	// Past the first banner's timer, short of the second's.
	sleep(45).await;
	assert!(notifier.is_visible());
	assert_eq!(notifier.kind(), NotificationKind::Success);

	sleep(40).await;
	assert!(!notifier.is_visible());
}

#[wasm_bindgen_test(async)]
async fn error_banner_reverts_to_success_once_hidden() {
	let owner = Owner::new();
	owner.set();
	let notifier = Notifier::new(Duration::from_millis(20));

	notifier.show(NotificationKind::Error);
	assert!(notifier.is_visible());
	assert_eq!(notifier.kind(), NotificationKind::Error);

	sleep(60).await;
	assert!(!notifier.is_visible());
	assert_eq!(notifier.kind(), NotificationKind::Success);
}

#[wasm_bindgen_test]
fn toggle_follows_externally_set_attribute() {
	theme::apply(ThemeMode::Light);
	assert_eq!(theme::next(), ThemeMode::Dark);

	document()
		.document_element()
		.unwrap()
		.set_attribute(theme::THEME_ATTRIBUTE, "dark")
		.unwrap();
	assert_eq!(theme::next(), ThemeMode::Light);

	theme::apply(ThemeMode::Light);
}
