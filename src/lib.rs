//! hermit-site: scroll-driven hero and ambient canvas backgrounds.
//!
//! This crate provides the WASM-rendered pieces of a single-page portfolio:
//! a hero that scrubs through a pre-rendered image sequence as the user
//! scrolls, and decorative particle fields painted behind static content.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldStyle, ParticleFieldCanvas};
pub use components::scroll_sequence::ScrollSequence;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("hermit-site: logging initialized");
}

/// Site-wide configuration injected by the hosting page.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SiteConfig {
	/// Prefix for all asset URLs; empty serves from the site root.
	#[serde(default)]
	pub base_path: String,
}

/// Load configuration from a script element with id="site-config".
/// Expected format: JSON with { "base_path": "..." }
fn load_site_config() -> Option<SiteConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("site-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<SiteConfig>(&json_text) {
		Ok(config) => {
			info!("hermit-site: asset base path {:?}", config.base_path);
			Some(config)
		}
		Err(e) => {
			warn!("hermit-site: failed to parse site config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Reads the site configuration from the DOM and mounts the hero sequence
/// plus an ambient section; the surrounding page chrome stays static HTML.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_site_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="The Hermit" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main class="site" style="background: #050505; min-height: 100vh;">
			<section id="hero">
				<ScrollSequence base_path=config.base_path />
			</section>
			<section id="about" class="ambient-section" style="position: relative; overflow: hidden;">
				<ParticleFieldCanvas style=FieldStyle::crimson_nodes() />
				<div class="ambient-overlay" style="position: relative; z-index: 10;">
					<h2>"THE " <span class="accent">"HERMIT"</span></h2>
					<p>"Calm in chaos. Precise in execution."</p>
				</div>
			</section>
		</main>
	}
}

#[cfg(test)]
mod tests {
	use super::SiteConfig;

	#[test]
	fn config_parses_a_base_path() {
		let config: SiteConfig = serde_json::from_str(r#"{"base_path": "/portfolio"}"#).unwrap();
		assert_eq!(config.base_path, "/portfolio");
	}

	#[test]
	fn config_defaults_missing_fields() {
		let config: SiteConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config.base_path, "");
	}

	#[test]
	fn malformed_config_is_an_error_not_a_panic() {
		assert!(serde_json::from_str::<SiteConfig>("not json").is_err());
	}
}
