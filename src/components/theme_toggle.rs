//! Light/dark switch.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::config::SiteConfig;
use crate::error::describe;
use crate::theme::{self, ThemeMode};

/// Play the switch click. Browsers may refuse autoplay; that's fine.
fn play_switch_sound(src: &str, volume: f64) {
	let audio = match HtmlAudioElement::new_with_src(src) {
		Ok(audio) => audio,
		Err(e) => {
			debug!("site-fx: no audio element: {}", describe(&e));
			return;
		}
	};
	audio.set_volume(volume);
	audio.set_current_time(0.0);
	match audio.play() {
		Ok(promise) => spawn_local(async move {
			if let Err(e) = JsFuture::from(promise).await {
				info!("site-fx: switch sound failed: {}", describe(&e));
			}
		}),
		Err(e) => info!("site-fx: switch sound failed: {}", describe(&e)),
	}
}

/// Button flipping the site theme. The choice is stored for the next visit
/// and announced to screen readers.
#[component]
pub fn ThemeToggle(theme: RwSignal<ThemeMode>) -> impl IntoView {
	let config = use_context::<SiteConfig>().unwrap_or_default();
	let announcement = RwSignal::new(String::new());

	let on_click = move |_: ev::MouseEvent| {
		// The root attribute may have been changed outside the app.
		let next = theme::next();
		if let Some(src) = config.switch_sound.as_deref() {
			play_switch_sound(src, config.switch_volume);
		}
		theme.set(next);
		theme::persist(next);
		announcement.set(format!("Theme changed to {next} mode"));
	};

	view! {
		<button
			id="themeToggle"
			class="theme-toggle"
			aria-label=move || format!("Switch to {} mode", theme.get().toggled())
			on:click=on_click
		>
			<span class="theme-toggle-icon" aria-hidden="true"></span>
		</button>
		<span id="themeAnnounce" class="sr-only" aria-live="polite">
			{move || announcement.get()}
		</span>
	}
}
