//! Colors for the particle background.
//!
//! Two fixed palettes keyed by [`ThemeMode`]; no interpolation between them.

use crate::theme::ThemeMode;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Build from channels.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with a different alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba(...)` string.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Particle fill and connection stroke for one mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	/// Particle fill.
	pub particle: Color,
	/// Base connection stroke, scaled per line.
	pub line: Color,
}

impl Palette {
	/// Black on a light page.
	pub const LIGHT: Self = Self {
		particle: Color::rgba(0, 0, 0, 0.6),
		line: Color::rgba(0, 0, 0, 0.2),
	};

	/// White on a dark page.
	pub const DARK: Self = Self {
		particle: Color::rgba(255, 255, 255, 0.6),
		line: Color::rgba(255, 255, 255, 0.2),
	};

	/// Palette for a site theme.
	pub fn for_mode(mode: ThemeMode) -> Self {
		match mode {
			ThemeMode::Light => Self::LIGHT,
			ThemeMode::Dark => Self::DARK,
		}
	}

	/// Stroke color for a connection of the given strength in `[0, 1]`.
	pub fn connection(&self, opacity: f64, alpha_scale: f64) -> Color {
		self.line.with_alpha(self.line.a * alpha_scale * opacity)
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::LIGHT
	}
}
