//! Site configuration.
//!
//! Everything has a default matching the live site. A page can override any
//! subset by embedding JSON in `<script id="site-config" type="application/json">`.

use serde::Deserialize;

/// A link in the full-screen navigation.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NavLink {
	/// Text shown in the menu.
	pub label: String,
	/// Link target, usually a section anchor.
	pub href: String,
}

/// Tunables for the particle background.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Upper bound on particle count; pairwise line drawing is O(n²).
	pub max_particles: usize,
	/// Viewport area (CSS px²) per particle.
	pub area_per_particle: f64,
	/// Per-axis velocity spread, centered on zero.
	pub speed: f64,
	/// Smallest base radius.
	pub radius_min: f64,
	/// Random extra on top of `radius_min`.
	pub radius_spread: f64,
	/// Pulse phase advance per frame.
	pub pulse_step: f64,
	/// How far the radius swings around its base.
	pub pulse_amplitude: f64,
	/// Pointer distance below which particles are pushed away.
	pub repulsion_radius: f64,
	/// Largest push per frame, reached right next to the pointer.
	pub repulsion_strength: f64,
	/// Particle distance below which a connecting line is drawn.
	pub connection_radius: f64,
	/// Multiplier on the line color's alpha.
	pub line_alpha_scale: f64,
	/// Connection stroke width in CSS px.
	pub line_width: f64,
	/// CSS opacity of the whole background layer.
	pub surface_opacity: f64,
	/// Stacking order of the background layer.
	pub z_index: i32,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			max_particles: 80,
			area_per_particle: 20_000.0,
			speed: 0.3,
			radius_min: 0.5,
			radius_spread: 1.5,
			pulse_step: 0.015,
			pulse_amplitude: 0.3,
			repulsion_radius: 80.0,
			repulsion_strength: 0.3,
			connection_radius: 100.0,
			line_alpha_scale: 0.75,
			line_width: 0.5,
			surface_opacity: 0.4,
			z_index: -2,
		}
	}
}

/// Complete site configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
	/// Shown in the title, header and footer.
	pub site_name: String,
	/// Entries of the full-screen menu.
	pub nav_links: Vec<NavLink>,
	/// Contact form POST target.
	pub form_endpoint: String,
	/// Access key sent as a hidden form field, if the endpoint needs one.
	pub form_access_key: Option<String>,
	/// How long a notification stays up.
	pub notification_ms: u64,
	/// Delay before replaying a "message sent" notification after reload.
	pub notification_replay_delay_ms: u64,
	/// A stored "message sent" flag older than this is discarded.
	pub message_replay_window_ms: f64,
	/// Scroll offset past which the header gets the `scrolled` class.
	pub scroll_threshold: f64,
	/// Click played by the theme toggle; `None` keeps it silent.
	pub switch_sound: Option<String>,
	/// Volume of the switch click in `[0, 1]`.
	pub switch_volume: f64,
	/// Particle background tunables.
	pub network: FieldConfig,
}

impl Default for SiteConfig {
	fn default() -> Self {
		let link = |label: &str, href: &str| NavLink {
			label: label.to_string(),
			href: href.to_string(),
		};
		Self {
			site_name: "Studio".to_string(),
			nav_links: vec![
				link("Home", "#home"),
				link("About", "#about"),
				link("Services", "#services"),
				link("Contact", "#contact"),
			],
			form_endpoint: "https://api.web3forms.com/submit".to_string(),
			form_access_key: None,
			notification_ms: 5_000,
			notification_replay_delay_ms: 500,
			message_replay_window_ms: 60_000.0,
			scroll_threshold: 50.0,
			switch_sound: Some("sounds/switchclick.mp3".to_string()),
			switch_volume: 0.2,
			network: FieldConfig::default(),
		}
	}
}

impl SiteConfig {
	/// Parse a JSON override document; missing fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}
