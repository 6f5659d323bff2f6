//! Frame drawing for the particle background.
//!
//! Each particle is advanced, drawn, and connected to every later particle in
//! one pass, so connections from particle `i` see `i` at its new position and
//! later particles at their previous one.

use std::f64::consts::TAU;

use log::error;
use web_sys::CanvasRenderingContext2d;

use super::palette::{Color, Palette};
use super::particles::ParticleField;
use crate::error::{Error, Result};

/// The drawing operations a frame needs.
pub trait Surface {
	/// Wipe the area `(0, 0)` to `(width, height)`.
	fn clear(&mut self, width: f64, height: f64);
	/// Fill a circle centered on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<()>;
	/// Stroke a straight line.
	fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<()> {
		self.begin_path();
		self.arc(x, y, radius.max(0.0), 0.0, TAU)
			.map_err(|e| Error::frame("arc", e))?;
		self.set_fill_style_str(&color.to_css());
		self.fill();
		Ok(())
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}
}

/// Advance the field by one frame and draw it.
pub fn draw_frame(
	field: &mut ParticleField,
	pointer: (f64, f64),
	palette: &Palette,
	surface: &mut impl Surface,
) -> Result<()> {
	surface.clear(field.width(), field.height());

	let (alpha_scale, line_width) = (field.config().line_alpha_scale, field.config().line_width);

	for i in 0..field.particles.len() {
		let p = field.advance(i, pointer);
		let (x, y) = (p.x, p.y);
		surface.fill_circle(x, y, p.radius, palette.particle)?;

		for (j, opacity) in field.connections_from(i) {
			let other = &field.particles[j];
			surface.line(
				(x, y),
				(other.x, other.y),
				line_width,
				palette.connection(opacity, alpha_scale),
			);
		}
	}

	Ok(())
}

/// One tick of the animation loop: draw, then ask `schedule` for the next
/// frame. A failed draw is logged and the loop goes on; only a failed
/// `schedule` stops it, returning `None`.
pub fn run_frame(
	field: &mut ParticleField,
	pointer: (f64, f64),
	palette: &Palette,
	surface: &mut impl Surface,
	schedule: impl FnOnce() -> Result<i32>,
) -> Option<i32> {
	if let Err(e) = draw_frame(field, pointer, palette, surface) {
		error!("site-fx: {e}");
	}
	match schedule() {
		Ok(id) => Some(id),
		Err(e) => {
			error!("site-fx: scheduling frame failed, animation stopped: {e}");
			None
		}
	}
}
