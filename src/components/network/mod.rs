//! Animated particle background ("network" of points and lines).
//!
//! Draws drifting particles on a full-viewport canvas behind the page:
//! - Particles bounce off the viewport edges and pulse in size
//! - The pointer pushes nearby particles away
//! - Particles closer than a threshold are joined by fading lines
//! - Colors follow the `data-theme` attribute on `<html>`
//!
//! # Example
//!
//! ```ignore
//! use site_fx::components::network::NetworkBackground;
//!
//! view! { <NetworkBackground /> }
//! ```
//!
//! Outside Leptos, [`NetworkAnimation`] can be driven directly with
//! `initialize()` and `destroy()`.

mod animation;
mod component;
pub mod palette;
pub mod particles;
mod render;

pub use animation::{
	CANVAS_CLASS, CONTAINER_CLASS, Lifecycle, NetworkAnimation, Viewport,
	destroy_network_animation, start, stop,
};
pub use component::NetworkBackground;
pub use palette::{Color, Palette};
pub use particles::{Particle, ParticleField};
pub use render::{Surface, draw_frame, run_frame};
