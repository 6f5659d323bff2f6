//! Crate error type.
//!
//! Nothing here ever reaches the visitor: callers log and carry on.

use wasm_bindgen::JsValue;

/// Failures in the site behaviors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The particle background could not be set up.
	#[error("background setup failed: {0}")]
	Setup(String),
	/// A single animation frame failed to draw.
	#[error("background frame failed: {0}")]
	Frame(String),
	/// The form's fields could not be collected.
	#[error("form data unavailable: {0}")]
	FormData(String),
	/// The contact form request or its response decoding failed.
	#[error("form submission failed: {0}")]
	Submission(#[from] gloo_net::Error),
	/// The form endpoint answered but reported failure.
	#[error("form endpoint rejected the message: {0}")]
	Rejected(String),
}

impl Error {
	pub(crate) fn setup(context: &str, err: impl Into<JsValue>) -> Self {
		Self::Setup(format!("{context}: {}", describe(&err.into())))
	}

	pub(crate) fn frame(context: &str, err: impl Into<JsValue>) -> Self {
		Self::Frame(format!("{context}: {}", describe(&err.into())))
	}
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Result alias for site behaviors.
pub type Result<T, E = Error> = std::result::Result<T, E>;
