//! Contact form posting to a hosted form endpoint.

use std::time::Duration;

use gloo_net::http::Request;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};
use serde::Deserialize;
use web_sys::{FormData, HtmlFormElement};

use super::notification::{NotificationKind, Notifier};
use crate::config::SiteConfig;
use crate::error::{Error, Result, describe};
use crate::storage::{self, MESSAGE_SENT_KEY, MESSAGE_SENT_TIME_KEY};

/// What the form endpoint answers with.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SubmissionResponse {
	/// Whether the endpoint accepted the message.
	#[serde(default)]
	pub success: bool,
	/// Endpoint's explanation, mostly useful on failure.
	#[serde(default)]
	pub message: Option<String>,
}

impl SubmissionResponse {
	/// Turn an unsuccessful answer into an error.
	pub fn into_result(self, status: u16) -> Result<Self> {
		if self.success {
			Ok(self)
		} else {
			Err(Error::Rejected(
				self.message
					.unwrap_or_else(|| format!("HTTP status {status}")),
			))
		}
	}
}

/// POST the form's fields as multipart data.
pub async fn submit(endpoint: &str, form: &HtmlFormElement) -> Result<SubmissionResponse> {
	let data = FormData::new_with_form(form).map_err(|e| Error::FormData(describe(&e)))?;
	let response = Request::post(endpoint).body(data).send().await?;
	let status = response.status();
	let body: SubmissionResponse = response.json().await?;
	body.into_result(status)
}

/// Contact form with a busy spinner. Results are reported through the
/// notification banner.
#[component]
pub fn ContactForm(notifier: Notifier) -> impl IntoView {
	let config = use_context::<SiteConfig>().unwrap_or_default();
	let form_ref = NodeRef::<leptos::html::Form>::new();
	let submitting = RwSignal::new(false);

	let (replay_delay, replay_window) = (
		Duration::from_millis(config.notification_replay_delay_ms),
		config.message_replay_window_ms,
	);
	Effect::new(move |_| notifier.replay_stored(replay_delay, replay_window));

	let endpoint = config.form_endpoint;
	let on_submit = move |ev: ev::SubmitEvent| {
		ev.prevent_default();
		if submitting.get_untracked() {
			return;
		}
		let Some(form) = form_ref.get() else {
			return;
		};
		submitting.set(true);

		let endpoint = endpoint.clone();
		spawn_local(async move {
			match submit(&endpoint, &form).await {
				Ok(_) => {
					info!("site-fx: message sent");
					storage::set(MESSAGE_SENT_KEY, "true");
					storage::set(
						MESSAGE_SENT_TIME_KEY,
						&(js_sys::Date::now() as u64).to_string(),
					);
					form.reset();
					notifier.show(NotificationKind::Success);
				}
				Err(e) => {
					error!("site-fx: error submitting form: {e}");
					notifier.show(NotificationKind::Error);
				}
			}
			submitting.set(false);
		});
	};

	view! {
		<form id="contactForm" class="contact-form" node_ref=form_ref on:submit=on_submit>
			{config
				.form_access_key
				.map(|key| view! { <input type="hidden" name="access_key" value=key /> })}
			<label for="name">"Name"</label>
			<input type="text" id="name" name="name" autocomplete="name" required />
			<label for="email">"Email"</label>
			<input type="email" id="email" name="email" autocomplete="email" required />
			<label for="message">"Message"</label>
			<textarea id="message" name="message" rows="5" required></textarea>
			<button
				type="submit"
				id="submitButton"
				class="submit-button"
				disabled=move || submitting.get()
			>
				"Send message"
				<span
					class="spinner"
					aria-hidden="true"
					style:display=move || if submitting.get() { "inline-block" } else { "none" }
					style:margin-left="10px"
				>
					"⟳"
				</span>
			</button>
		</form>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn success_response_passes() {
		let body: SubmissionResponse =
			serde_json::from_str(r#"{ "success": true, "message": "Email sent" }"#).unwrap();
		assert_eq!(body.clone().into_result(200).unwrap(), body);
	}

	#[test]
	fn failure_response_carries_message() {
		let body: SubmissionResponse =
			serde_json::from_str(r#"{ "success": false, "message": "Invalid access key" }"#)
				.unwrap();
		match body.into_result(400) {
			Err(Error::Rejected(msg)) => assert_eq!(msg, "Invalid access key"),
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn missing_fields_mean_failure() {
		let body: SubmissionResponse = serde_json::from_str("{}").unwrap();
		assert!(!body.success);
		match body.into_result(500) {
			Err(Error::Rejected(msg)) => assert_eq!(msg, "HTTP status 500"),
			other => panic!("unexpected {other:?}"),
		}
	}
}
