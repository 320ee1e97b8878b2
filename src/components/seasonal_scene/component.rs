//! Leptos component wrapping the seasonal scene canvas.
//!
//! The component creates an HTML canvas element and runs an animation loop
//! via `requestAnimationFrame`, rendering the active scene each frame.
//! Switching mode rebuilds the whole scene context: the old particle
//! population is dropped (cancelling every scheduled transition in one go)
//! and a fresh one is sampled against the current viewport.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::emitter::ParticleEmitter;
use super::render;
use super::theme::{SceneTheme, SeasonMode};

/// The active scene: theme, particle population, and clock origin.
struct SceneContext {
	theme: SceneTheme,
	emitter: Option<ParticleEmitter>,
	started_at: f64,
	width: f64,
	height: f64,
}

impl SceneContext {
	/// Build the scene for `mode` against a viewport.
	///
	/// The RNG is seeded from the wall clock here — the one place the
	/// otherwise deterministic sampling picks up real entropy. A rejected
	/// emitter config logs and leaves the scene without particles rather
	/// than failing the component.
	fn build(mode: SeasonMode, width: f64, height: f64) -> Self {
		let theme = mode.theme();
		let mut rng = SmallRng::seed_from_u64(js_sys::Date::now().to_bits());
		let emitter =
			match ParticleEmitter::build(theme.emitter.clone(), (width, height), &mut rng) {
				Ok(emitter) => Some(emitter),
				Err(e) => {
					warn!("seasonscape: scene '{}' has no particles: {e}", theme.name);
					None
				}
			};

		Self {
			theme,
			emitter,
			started_at: js_sys::Date::now(),
			width,
			height,
		}
	}

	/// Seconds of scene time since this context was built.
	fn elapsed(&self) -> f64 {
		(js_sys::Date::now() - self.started_at) / 1000.0
	}
}

/// Renders an animated seasonal background on a canvas element.
///
/// Pass the active season via the reactive `mode` signal; changing it tears
/// the current scene down and builds the next one. The component sizes
/// itself to its parent container by default; set `fullscreen = true` to
/// fill the viewport and resize automatically with the window. Explicit
/// `width`/`height` override automatic sizing.
#[component]
pub fn SeasonalSceneCanvas(
	#[prop(into)] mode: Signal<SeasonMode>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<SceneContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		// Reading the signal here makes the whole effect re-run on a mode
		// switch, which is the rebuild.
		let current_mode = mode.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		*context_init.borrow_mut() = Some(SceneContext::build(current_mode, w, h));

		if fullscreen && resize_cb_init.borrow().is_none() {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				// Spawn positions are resolved against the viewport at build
				// time, so a resize rebuilds the population too.
				*context_resize.borrow_mut() =
					Some(SceneContext::build(mode.get_untracked(), nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		// Start the frame loop once; it renders whatever context is current,
		// so rebuilds never spawn a second loop.
		if animate_init.borrow().is_none() {
			let ctx: CanvasRenderingContext2d = canvas
				.get_context("2d")
				.unwrap()
				.unwrap()
				.dyn_into()
				.unwrap();

			let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
			*animate_init.borrow_mut() = Some(Closure::new(move || {
				if let Some(ref c) = *context_anim.borrow() {
					render::render(
						&ctx,
						&c.theme,
						c.emitter.as_ref(),
						c.width,
						c.height,
						c.elapsed(),
					);
				}
				if let Some(ref cb) = *animate_inner.borrow() {
					let _ = web_sys::window()
						.unwrap()
						.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}));
			if let Some(ref cb) = *animate_init.borrow() {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="seasonal-scene-canvas"
			style="display: block;"
		/>
	}
}
