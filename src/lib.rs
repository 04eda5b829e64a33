//! ambient-field: an interactive particle field drawn behind a page.
//!
//! This crate provides a WASM canvas component that renders drifting,
//! connected particles with pointer repulsion, press waves, and a hidden
//! particle that opens a popup when clicked.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	AnimationLoop, Color, DisplayMapping, EggPlacement, EggPopup, Field, FieldConfig,
	FieldSession, FrameScheduler, Palette, ParticleField, PointerState, PressOutcome, Surface,
	ThemeMode, TimeoutHost,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-field: logging initialized");
}

/// Load field configuration from a script element with id="field-config".
/// Expected format: JSON matching [`FieldConfig`], every key optional.
/// Falls back to the defaults when the element is absent or malformed.
fn load_field_config() -> FieldConfig {
	let Some(json_text) = field_config_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"ambient-field: loaded config with {} particles",
				config.particle_count
			);
			config
		}
		Err(e) => {
			warn!("ambient-field: failed to parse field config: {}", e);
			FieldConfig::default()
		}
	}
}

fn field_config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Mounts the particle field behind the page together with its popup.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();
	let (eggs_found, set_eggs_found) = signal(0u32);
	let on_egg_found = Callback::new(move |_: ()| set_eggs_found.update(|n| *n += 1));

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Ambient Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleField config=config on_egg_found=on_egg_found />
		<EggPopup trigger=eggs_found />
	}
}
