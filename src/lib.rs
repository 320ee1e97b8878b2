//! seasonscape: animated seasonal background scenes.
//!
//! This crate provides a WASM-based background component that renders a
//! seasonal illustration with a looping particle field (snowfall, drifting
//! leaves, confetti, or fire sparks) on an HTML canvas, plus a small picker
//! for switching between the four scenes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::seasonal_scene::{
	EmitterConfig, ParticleEmitter, SceneTheme, SeasonMode, SeasonalSceneCanvas,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("seasonscape: logging initialized");
}

/// Host-page options embedded in a script element with id="scene-options".
/// Expected format: JSON with { "mode": "winter" | "autumn" | "new-year" | "midsummer" }
#[derive(Debug, Default, Deserialize)]
struct SceneOptions {
	mode: Option<String>,
}

/// Load scene options from the DOM, if the host page provides any.
fn load_scene_options() -> Option<SceneOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("scene-options")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<SceneOptions>(&json_text) {
		Ok(options) => {
			info!("seasonscape: loaded host options: {options:?}");
			Some(options)
		}
		Err(e) => {
			warn!("seasonscape: failed to parse scene options: {}", e);
			None
		}
	}
}

/// Main application component.
/// Renders the seasonal backdrop fullscreen with a mode picker overlay.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	// The host page may pre-select a scene; fall back to winter.
	let initial = load_scene_options()
		.and_then(|options| options.mode)
		.and_then(|name| SeasonMode::from_name(&name))
		.unwrap_or_default();
	let mode = RwSignal::new(initial);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Seasonscape" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="seasonal-backdrop">
			<SeasonalSceneCanvas mode=mode fullscreen=true />
			<div class="mode-picker">
				{SeasonMode::all()
					.into_iter()
					.map(|m| {
						view! {
							<button
								class:active=move || mode.get() == m
								on:click=move |_| mode.set(m)
							>
								{m.label()}
							</button>
						}
					})
					.collect_view()}
			</div>
		</div>
	}
}
