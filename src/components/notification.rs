//! Notification banner for contact form results.
//!
//! One banner per page, driven through a [`Notifier`] handle. A successful
//! submission leaves a flag in storage so the banner can be replayed if the
//! page reloads within a minute.

use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use log::debug;

use crate::storage::{self, MESSAGE_SENT_KEY, MESSAGE_SENT_TIME_KEY};

/// What the banner is reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
	/// The message went out.
	#[default]
	Success,
	/// Sending failed.
	Error,
}

impl NotificationKind {
	/// Banner heading.
	pub fn title(self) -> &'static str {
		match self {
			Self::Success => "Success!",
			Self::Error => "Error!",
		}
	}

	/// Banner body text.
	pub fn message(self) -> &'static str {
		match self {
			Self::Success => "Your message has been sent successfully.",
			Self::Error => "Something went wrong. Please try again.",
		}
	}

	/// Fill color of the banner icon.
	pub fn icon_color(self) -> &'static str {
		match self {
			Self::Success => "#4caf50",
			Self::Error => "#f44336",
		}
	}
}

/// Outcome of checking storage for an earlier submission.
#[derive(Debug, PartialEq, Eq)]
pub enum Replay {
	/// Recent enough: show the success banner again.
	Show,
	/// Too old or unreadable: clear the stored flag.
	Expire,
	/// Nothing stored.
	Skip,
}

/// Decide whether a stored "message sent" flag should replay the banner.
pub fn replay_decision(
	flag: Option<&str>,
	sent_at: Option<&str>,
	now_ms: f64,
	window_ms: f64,
) -> Replay {
	if flag != Some("true") {
		return Replay::Skip;
	}
	let Some(sent_at) = sent_at.filter(|s| !s.is_empty()) else {
		return Replay::Skip;
	};
	match sent_at.trim().parse::<f64>() {
		Ok(sent) if now_ms - sent < window_ms => Replay::Show,
		_ => Replay::Expire,
	}
}

/// Handle for showing and hiding the banner.
#[derive(Clone, Copy)]
pub struct Notifier {
	visible: RwSignal<bool>,
	kind: RwSignal<NotificationKind>,
	// Bumped on every show so stale hide timers do nothing.
	generation: StoredValue<u64>,
	hide_after: Duration,
}

impl Notifier {
	/// A hidden banner that hides itself `hide_after` each show.
	pub fn new(hide_after: Duration) -> Self {
		Self {
			visible: RwSignal::new(false),
			kind: RwSignal::new(NotificationKind::Success),
			generation: StoredValue::new(0),
			hide_after,
		}
	}

	/// Whether the banner is showing.
	pub fn is_visible(&self) -> bool {
		self.visible.get()
	}

	/// Content the banner shows.
	pub fn kind(&self) -> NotificationKind {
		self.kind.get()
	}

	/// Show the banner with the usual auto-hide.
	pub fn show(&self, kind: NotificationKind) {
		self.show_then(kind, || {});
	}

	/// Show the banner, hide it after the configured delay, then run `after`.
	/// An error banner reverts to the success content once hidden.
	pub fn show_then(&self, kind: NotificationKind, after: impl FnOnce() + 'static) {
		self.generation.update_value(|g| *g += 1);
		let generation = self.generation.get_value();
		self.kind.set(kind);
		self.visible.set(true);

		let this = *self;
		set_timeout(
			move || {
				if this.generation.get_value() != generation {
					return;
				}
				this.visible.set(false);
				if kind == NotificationKind::Error {
					this.kind.set(NotificationKind::Success);
				}
				after();
			},
			self.hide_after,
		);
	}

	/// Hide now and cancel any pending auto-hide.
	pub fn hide(&self) {
		self.generation.update_value(|g| *g += 1);
		self.visible.set(false);
	}

	/// Replay the success banner after a reload if a message went out recently,
	/// otherwise drop the stale flag.
	pub fn replay_stored(&self, delay: Duration, window_ms: f64) {
		let decision = replay_decision(
			storage::get(MESSAGE_SENT_KEY).as_deref(),
			storage::get(MESSAGE_SENT_TIME_KEY).as_deref(),
			js_sys::Date::now(),
			window_ms,
		);
		debug!("site-fx: stored message replay: {decision:?}");
		match decision {
			Replay::Show => {
				let this = *self;
				set_timeout(
					move || {
						this.show_then(NotificationKind::Success, || {
							storage::remove(MESSAGE_SENT_KEY)
						})
					},
					delay,
				);
			}
			Replay::Expire => {
				storage::remove(MESSAGE_SENT_KEY);
				storage::remove(MESSAGE_SENT_TIME_KEY);
			}
			Replay::Skip => {}
		}
	}
}

/// The banner itself.
#[component]
pub fn Notification(notifier: Notifier) -> impl IntoView {
	let on_close = move |_: ev::MouseEvent| {
		notifier.hide();
		storage::remove(MESSAGE_SENT_KEY);
	};

	view! {
		<div
			id="notification"
			class="notification"
			class:show=move || notifier.is_visible()
			role="status"
			aria-live="polite"
		>
			<svg
				class="notification-icon"
				viewBox="0 0 24 24"
				style=move || format!("fill: {}", notifier.kind().icon_color())
			>
				<path d="M9 16.2L4.8 12l-1.4 1.4L9 19 21 7l-1.4-1.4L9 16.2z"></path>
			</svg>
			<div class="notification-content">
				<p class="notification-title">{move || notifier.kind().title()}</p>
				<p class="notification-message">{move || notifier.kind().message()}</p>
			</div>
			<button class="notification-close" aria-label="Close notification" on:click=on_close>
				"×"
			</button>
		</div>
	}
}
