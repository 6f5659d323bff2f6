//! Best-effort access to `localStorage`.
//!
//! Storage can be missing (privacy modes, sandboxed iframes) or throw on
//! write. Every helper degrades to a no-op and logs at debug level.

use log::debug;
use web_sys::Storage;

/// Stored theme preference, `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";
/// Set to `"true"` after a successful contact form submission.
pub const MESSAGE_SENT_KEY: &str = "messageSent";
/// Milliseconds since the epoch when the message was sent.
pub const MESSAGE_SENT_TIME_KEY: &str = "messageSentTime";

fn local_storage() -> Option<Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

/// Read a value.
pub fn get(key: &str) -> Option<String> {
	local_storage()?.get_item(key).ok().flatten()
}

/// Write a value.
pub fn set(key: &str, value: &str) {
	let Some(storage) = local_storage() else {
		debug!("site-fx: no storage, dropping {key}");
		return;
	};
	if let Err(e) = storage.set_item(key, value) {
		debug!("site-fx: storing {key} failed: {e:?}");
	}
}

/// Remove a value.
pub fn remove(key: &str) {
	let Some(storage) = local_storage() else {
		return;
	};
	if let Err(e) = storage.remove_item(key) {
		debug!("site-fx: removing {key} failed: {e:?}");
	}
}
