//! Leptos components owning the site's canvas renderers.

pub mod particle_field;
pub mod scroll_sequence;

/// Viewport width (px) below which the narrow layout applies: fewer
/// particles, shorter scroll stage.
pub(crate) const NARROW_BREAKPOINT: f64 = 768.0;
