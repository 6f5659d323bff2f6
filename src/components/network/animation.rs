//! Lifecycle of the particle background.
//!
//! [`NetworkAnimation`] owns the canvas, its container, the DOM listeners and
//! the `requestAnimationFrame` loop. States run Uninitialized → Active →
//! Destroyed and never back. Nothing here is allowed to break the page: every
//! failure is logged and swallowed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fastrand::Rng;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent,
	MutationObserver, MutationObserverInit, Window,
};

use super::palette::Palette;
use super::particles::ParticleField;
use super::render;
use crate::config::FieldConfig;
use crate::error::{Error, Result};
use crate::theme::{self, THEME_ATTRIBUTE};

/// Class of the container inserted at the top of `<body>`.
pub const CONTAINER_CLASS: &str = "network-background";
/// Class of the canvas inside the container.
pub const CANVAS_CLASS: &str = "network-canvas";

/// Where an animation is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
	/// Created, nothing attached yet.
	Uninitialized,
	/// Drawing on the page.
	Active,
	/// Torn down for good.
	Destroyed,
}

/// Viewport size in CSS pixels and the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Inner width in CSS px.
	pub width: f64,
	/// Inner height in CSS px.
	pub height: f64,
	/// Device pixels per CSS pixel.
	pub dpr: f64,
}

impl Viewport {
	fn read(window: &Window) -> Result<Self> {
		let px = |v: std::result::Result<JsValue, JsValue>, what: &str| -> Result<f64> {
			v.map_err(|e| Error::setup(what, e))?
				.as_f64()
				.ok_or_else(|| Error::Setup(format!("{what} is not a number")))
		};
		let dpr = window.device_pixel_ratio();
		Ok(Self {
			width: px(window.inner_width(), "innerWidth")?,
			height: px(window.inner_height(), "innerHeight")?,
			dpr: if dpr > 0.0 { dpr } else { 1.0 },
		})
	}
}

/// Mutable state shared between the frame loop and the event callbacks.
struct RenderState {
	ctx: CanvasRenderingContext2d,
	canvas: HtmlCanvasElement,
	field: ParticleField,
	palette: Palette,
	pointer: (f64, f64),
	rng: Rng,
}

impl RenderState {
	fn resize(&mut self, viewport: Viewport) -> Result<()> {
		self.canvas.set_width((viewport.width * viewport.dpr) as u32);
		self.canvas.set_height((viewport.height * viewport.dpr) as u32);
		let style = self.canvas.style();
		style
			.set_property("width", &format!("{}px", viewport.width))
			.and_then(|_| style.set_property("height", &format!("{}px", viewport.height)))
			.map_err(|e| Error::setup("canvas style", e))?;
		// Resizing resets the context; scale once so drawing stays in CSS pixels.
		self.ctx
			.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0)
			.map_err(|e| Error::setup("canvas transform", e))?;

		self.field
			.regenerate(viewport.width, viewport.height, &mut self.rng);
		debug!(
			"site-fx: background resized to {}x{}, {} particles",
			viewport.width,
			viewport.height,
			self.field.particles.len()
		);
		Ok(())
	}

	fn update_colors(&mut self) {
		let mode = theme::current();
		self.palette = Palette::for_mode(mode);
		debug!("site-fx: background colors updated for {mode} theme");
	}
}

type Shared = Rc<RefCell<Option<RenderState>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything attached to the page while active, kept so teardown can undo it.
struct Attachments {
	window: Window,
	container: HtmlElement,
	on_resize: Option<Closure<dyn FnMut()>>,
	on_pointer: Option<Closure<dyn FnMut(MouseEvent)>>,
	observer: Option<(MutationObserver, Closure<dyn FnMut(js_sys::Array, MutationObserver)>)>,
}

impl Attachments {
	fn detach(mut self) {
		let document = self.window.document();
		if let Some(cb) = self.on_resize.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let (Some(cb), Some(doc)) = (self.on_pointer.take(), document.as_ref()) {
			let _ =
				doc.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
		}
		if let Some((observer, _cb)) = self.observer.take() {
			observer.disconnect();
		}
		self.container.remove();
	}
}

/// Animated particle background behind the page content.
pub struct NetworkAnimation {
	config: FieldConfig,
	lifecycle: Lifecycle,
	state: Shared,
	animate: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
	running: Rc<Cell<bool>>,
	attachments: Option<Attachments>,
}

impl NetworkAnimation {
	/// An uninitialized animation.
	pub fn new(config: FieldConfig) -> Self {
		Self {
			config,
			lifecycle: Lifecycle::Uninitialized,
			state: Rc::new(RefCell::new(None)),
			animate: Rc::new(RefCell::new(None)),
			frame_id: Rc::new(Cell::new(None)),
			running: Rc::new(Cell::new(false)),
			attachments: None,
		}
	}

	/// Current state.
	pub fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}

	/// Number of particles currently animated.
	pub fn particle_count(&self) -> usize {
		self.state
			.borrow()
			.as_ref()
			.map_or(0, |s| s.field.particles.len())
	}

	/// Colors the next frame will use.
	pub fn palette(&self) -> Option<Palette> {
		self.state.borrow().as_ref().map(|s| s.palette)
	}

	/// Build the canvas and start animating. Only acts when Uninitialized;
	/// on failure the page is left without a background.
	pub fn initialize(&mut self) {
		if self.lifecycle != Lifecycle::Uninitialized {
			warn!("site-fx: background initialize ignored in {:?} state", self.lifecycle);
			return;
		}
		info!("site-fx: initializing background");
		match self.try_initialize() {
			Ok(()) => {
				self.lifecycle = Lifecycle::Active;
				info!("site-fx: background running with {} particles", self.particle_count());
			}
			Err(e) => {
				error!("site-fx: {e}");
				self.teardown();
			}
		}
	}

	/// Stop the loop and remove everything from the page. Safe to repeat.
	pub fn destroy(&mut self) {
		if self.lifecycle == Lifecycle::Destroyed {
			return;
		}
		self.teardown();
		self.lifecycle = Lifecycle::Destroyed;
		info!("site-fx: background destroyed");
	}

	fn teardown(&mut self) {
		self.running.set(false);
		if let Some(id) = self.frame_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		self.animate.borrow_mut().take();
		if let Some(attachments) = self.attachments.take() {
			attachments.detach();
		}
		self.state.borrow_mut().take();
	}

	fn try_initialize(&mut self) -> Result<()> {
		let window = web_sys::window().ok_or_else(|| Error::Setup("no window".into()))?;
		let document = window
			.document()
			.ok_or_else(|| Error::Setup("no document".into()))?;

		let (container, canvas) = self.create_surface(&document)?;
		// Record before anything else can fail so teardown removes the container.
		self.attachments = Some(Attachments {
			window: window.clone(),
			container,
			on_resize: None,
			on_pointer: None,
			observer: None,
		});

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|e| Error::setup("getContext", e))?
			.ok_or_else(|| Error::Setup("2d context unavailable".into()))?
			.dyn_into()
			.map_err(|e| Error::setup("2d context type", e))?;

		let viewport = Viewport::read(&window)?;
		let mut rng = Rng::with_seed(seed());
		let field = ParticleField::new(
			self.config.clone(),
			viewport.width,
			viewport.height,
			&mut rng,
		);
		let mut render_state = RenderState {
			ctx,
			canvas,
			field,
			palette: Palette::default(),
			pointer: (0.0, 0.0),
			rng,
		};
		render_state.resize(viewport)?;
		render_state.update_colors();
		*self.state.borrow_mut() = Some(render_state);

		self.listen(&window, &document)?;
		self.start_loop(&window)
	}

	fn create_surface(&self, document: &Document) -> Result<(HtmlElement, HtmlCanvasElement)> {
		let body = document.body().ok_or_else(|| Error::Setup("no body".into()))?;

		let container: HtmlElement = document
			.create_element("div")
			.map_err(|e| Error::setup("create container", e))?
			.dyn_into()
			.map_err(|e| Error::setup("container type", e))?;
		container.set_class_name(CONTAINER_CLASS);

		let canvas: HtmlCanvasElement = document
			.create_element("canvas")
			.map_err(|e| Error::setup("create canvas", e))?
			.dyn_into()
			.map_err(|e| Error::setup("canvas type", e))?;
		canvas.set_class_name(CANVAS_CLASS);

		let opacity = self.config.surface_opacity.to_string();
		let z_index = self.config.z_index.to_string();
		for el in [&container, canvas.unchecked_ref::<HtmlElement>()] {
			let style = el.style();
			for (name, value) in [
				("position", "fixed"),
				("top", "0"),
				("left", "0"),
				("width", "100%"),
				("height", "100%"),
				("z-index", z_index.as_str()),
				("pointer-events", "none"),
				("opacity", opacity.as_str()),
			] {
				style
					.set_property(name, value)
					.map_err(|e| Error::setup("surface style", e))?;
			}
		}

		container
			.append_child(&canvas)
			.map_err(|e| Error::setup("append canvas", e))?;
		body.insert_before(&container, body.first_child().as_ref())
			.map_err(|e| Error::setup("insert container", e))?;
		Ok((container, canvas))
	}

	fn listen(&mut self, window: &Window, document: &Document) -> Result<()> {
		let Some(attachments) = self.attachments.as_mut() else {
			return Err(Error::Setup("surface missing".into()));
		};

		let state = self.state.clone();
		let on_resize = Closure::<dyn FnMut()>::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			let result = Viewport::read(&window).and_then(|viewport| match *state.borrow_mut() {
				Some(ref mut s) => s.resize(viewport),
				None => Ok(()),
			});
			if let Err(e) = result {
				error!("site-fx: resize failed: {e}");
			}
		});
		window
			.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
			.map_err(|e| Error::setup("resize listener", e))?;
		attachments.on_resize = Some(on_resize);

		let state = self.state.clone();
		let on_pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			if let Some(ref mut s) = *state.borrow_mut() {
				s.pointer = (ev.client_x() as f64, ev.client_y() as f64);
			}
		});
		document
			.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())
			.map_err(|e| Error::setup("mousemove listener", e))?;
		attachments.on_pointer = Some(on_pointer);

		let state = self.state.clone();
		let on_theme = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
			move |_: js_sys::Array, _: MutationObserver| {
				if let Some(ref mut s) = *state.borrow_mut() {
					s.update_colors();
				}
			},
		);
		let observer = MutationObserver::new(on_theme.as_ref().unchecked_ref())
			.map_err(|e| Error::setup("MutationObserver", e))?;
		let options = MutationObserverInit::new();
		options.set_attributes(true);
		options.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str(THEME_ATTRIBUTE)));
		let root = document
			.document_element()
			.ok_or_else(|| Error::Setup("no document element".into()))?;
		observer
			.observe_with_options(&root, &options)
			.map_err(|e| Error::setup("observe theme", e))?;
		attachments.observer = Some((observer, on_theme));

		Ok(())
	}

	fn start_loop(&mut self, window: &Window) -> Result<()> {
		let (state, animate_inner) = (self.state.clone(), self.animate.clone());
		let (frame_id, running) = (self.frame_id.clone(), self.running.clone());

		*self.animate.borrow_mut() = Some(Closure::new(move || {
			frame_id.set(None);
			if !running.get() {
				return;
			}

			let schedule = || -> Result<i32> {
				let window = web_sys::window().ok_or_else(|| Error::Frame("no window".into()))?;
				match *animate_inner.borrow() {
					Some(ref cb) => window
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.map_err(|e| Error::frame("requestAnimationFrame", e)),
					None => Err(Error::Frame("frame callback missing".into())),
				}
			};
			if let Some(ref mut s) = *state.borrow_mut() {
				let RenderState {
					ctx,
					field,
					palette,
					pointer,
					..
				} = s;
				frame_id.set(render::run_frame(field, *pointer, palette, ctx, schedule));
			}
		}));

		self.running.set(true);
		let id = match *self.animate.borrow() {
			Some(ref cb) => window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.map_err(|e| Error::setup("requestAnimationFrame", e))?,
			None => return Err(Error::Setup("frame callback missing".into())),
		};
		self.frame_id.set(Some(id));
		Ok(())
	}
}

impl Drop for NetworkAnimation {
	fn drop(&mut self) {
		self.destroy();
	}
}

fn seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64
}

thread_local! {
	static ACTIVE: RefCell<Option<NetworkAnimation>> = const { RefCell::new(None) };
}

/// Start the page's background unless one is already running.
pub fn start(config: FieldConfig) {
	ACTIVE.with(|slot| {
		let mut slot = slot.borrow_mut();
		if slot
			.as_ref()
			.is_some_and(|a| a.lifecycle() == Lifecycle::Active)
		{
			debug!("site-fx: background already running");
			return;
		}
		let mut animation = NetworkAnimation::new(config);
		animation.initialize();
		if animation.lifecycle() == Lifecycle::Active {
			*slot = Some(animation);
		}
	});
}

/// Tear down the page's background, if any.
pub fn stop() {
	// Take out of the slot first so destroy runs without the slot borrowed.
	let active = ACTIVE.with(|slot| slot.borrow_mut().take());
	if let Some(mut animation) = active {
		animation.destroy();
	}
}

/// JavaScript handle for external teardown.
#[wasm_bindgen(js_name = destroyNetworkAnimation)]
pub fn destroy_network_animation() {
	stop();
}
