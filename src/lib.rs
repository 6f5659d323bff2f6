//! site-fx: interactive behaviors for a marketing site.
//!
//! This crate provides a WASM front end with a full-screen navigation menu,
//! a persisted light/dark theme, a contact form with notification banner, and
//! an animated particle background drawn on a canvas behind the page.

use std::time::Duration;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod error;
pub mod storage;
pub mod theme;

pub use components::network::{NetworkAnimation, NetworkBackground};
pub use config::{FieldConfig, SiteConfig};
pub use error::{Error, Result};

use components::{ContactForm, Notification, Notifier, SiteHeader, reveal};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("site-fx: logging initialized");
}

/// Load configuration overrides from a script element with id="site-config".
fn load_site_config() -> Option<SiteConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("site-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match SiteConfig::from_json(&json_text) {
		Ok(config) => {
			info!("site-fx: loaded site config for {}", config.site_name);
			Some(config)
		}
		Err(e) => {
			warn!("site-fx: failed to parse site config: {}", e);
			None
		}
	}
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config().unwrap_or_default();
	provide_context(config.clone());

	let theme = RwSignal::new(theme::initial());
	Effect::new(move |_| theme::apply(theme.get()));

	let notifier = Notifier::new(Duration::from_millis(config.notification_ms));
	Effect::new(move |_| reveal::reveal_on_scroll());

	let year = js_sys::Date::new_0().get_full_year();
	let site_name = config.site_name.clone();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=config.site_name.clone() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<NetworkBackground config=config.network.clone() />
		<SiteHeader theme=theme />

		<main>
			<section id="home" class="page-header">
				<h1 class="fade-in">{site_name.clone()}</h1>
				<p class="subtitle fade-in">"Design and engineering for the web."</p>
			</section>
			<section id="contact" class="contact fade-in">
				<h2>"Get in touch"</h2>
				<ContactForm notifier=notifier />
			</section>
		</main>

		<Notification notifier=notifier />

		<footer class="site-footer">
			<p>"© " <span id="currentYear">{year}</span> " " {site_name}</p>
		</footer>
	}
}
