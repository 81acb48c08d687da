//! Caption beats derived from raw scroll progress.
//!
//! Four caption blocks each own a disjoint progress window. Opacity ramps
//! in over the first [`FADE_SPAN`] of the window and out over the last,
//! and a small vertical drift runs across it. Everything here is a pure
//! function of progress; the beats hold no state of their own.

use leptos::prelude::*;

/// Width of the fade ramp at each end of a beat window, in progress units.
const FADE_SPAN: f64 = 0.05;
/// Vertical drift across a beat window, px (start → end).
const DRIFT_FROM: f64 = 20.0;
const DRIFT_TO: f64 = -20.0;

/// Progress windows of the four caption beats.
pub const BEATS: [(f64, f64); 4] = [(0.0, 0.20), (0.25, 0.45), (0.50, 0.70), (0.75, 0.95)];

/// Opacity of a beat window at `progress`: 0 outside, 1 in the middle,
/// linear ramps over the outer [`FADE_SPAN`] on each side.
pub fn beat_opacity(progress: f64, start: f64, end: f64) -> f64 {
	if progress <= start || progress >= end {
		return 0.0;
	}
	let rise = ((progress - start) / FADE_SPAN).min(1.0);
	let fall = ((end - progress) / FADE_SPAN).min(1.0);
	rise.min(fall)
}

/// Vertical drift of a beat at `progress`, linear across the window and
/// held at the endpoints outside it.
pub fn beat_drift(progress: f64, start: f64, end: f64) -> f64 {
	let t = ((progress - start) / (end - start)).clamp(0.0, 1.0);
	DRIFT_FROM + (DRIFT_TO - DRIFT_FROM) * t
}

/// Opacity of the "scroll to explore" hint, gone after the first 10% of
/// the stage.
pub fn hint_opacity(progress: f64) -> f64 {
	(1.0 - progress / 0.1).clamp(0.0, 1.0)
}

fn beat_style(progress: f64, slot: usize, placement: &str) -> String {
	let (start, end) = BEATS[slot];
	format!(
		"position: absolute; {placement} opacity: {:.3}; transform: translateY({:.1}px);",
		beat_opacity(progress, start, end),
		beat_drift(progress, start, end)
	)
}

/// Fixed caption layer scrubbed by raw scroll progress.
#[component]
pub fn TextOverlay(#[prop(into)] progress: Signal<f64>) -> impl IntoView {
	view! {
		<div
			class="beat-layer"
			style="position: fixed; inset: 0; pointer-events: none; display: flex; align-items: center; justify-content: center;"
		>
			<div class="beat" style=move || beat_style(progress.get(), 0, "text-align: center;")>
				<h2>"SILENCE OF " <span class="accent">"STEEL"</span></h2>
				<p>"A single motion. Total control."</p>
			</div>
			<div class="beat" style=move || beat_style(progress.get(), 1, "left: 8%; text-align: left;")>
				<h2>"THE " <span class="accent">"DRAW"</span></h2>
				<p>"Precision over power."</p>
			</div>
			<div class="beat" style=move || beat_style(progress.get(), 2, "right: 8%; text-align: right;")>
				<h2><span class="accent">"CONTROL"</span></h2>
				<p>"Every movement is intentional."</p>
			</div>
			<div class="beat" style=move || beat_style(progress.get(), 3, "text-align: center;")>
				<h2>"FINAL " <span class="accent">"FORM"</span></h2>
				<p>"The moment of stillness."</p>
				<button class="beat-cta" style="pointer-events: auto;">"Begin Journey"</button>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn beats_are_silent_outside_their_window() {
		for &(start, end) in &BEATS {
			assert_eq!(beat_opacity(start - 0.01, start, end), 0.0);
			assert_eq!(beat_opacity(start, start, end), 0.0);
			assert_eq!(beat_opacity(end, start, end), 0.0);
			assert_eq!(beat_opacity(end + 0.01, start, end), 0.0);
		}
	}

	#[test]
	fn beats_hold_full_opacity_mid_window() {
		for &(start, end) in &BEATS {
			let mid = (start + end) / 2.0;
			assert_eq!(beat_opacity(mid, start, end), 1.0);
		}
	}

	#[test]
	fn beats_ramp_over_the_outer_five_percent() {
		let (start, end) = BEATS[1];
		let half_in = beat_opacity(start + FADE_SPAN / 2.0, start, end);
		let half_out = beat_opacity(end - FADE_SPAN / 2.0, start, end);
		assert!((half_in - 0.5).abs() < 1e-9);
		assert!((half_out - 0.5).abs() < 1e-9);
		assert_eq!(beat_opacity(start + FADE_SPAN, start, end), 1.0);
		assert_eq!(beat_opacity(end - FADE_SPAN, start, end), 1.0);
	}

	#[test]
	fn drift_runs_start_to_end_and_clamps() {
		let (start, end) = BEATS[2];
		assert_eq!(beat_drift(start, start, end), DRIFT_FROM);
		assert_eq!(beat_drift(end, start, end), DRIFT_TO);
		assert_eq!(beat_drift((start + end) / 2.0, start, end), 0.0);
		assert_eq!(beat_drift(0.0, start, end), DRIFT_FROM);
		assert_eq!(beat_drift(1.0, start, end), DRIFT_TO);
	}

	#[test]
	fn hint_fades_over_early_scroll() {
		assert_eq!(hint_opacity(0.0), 1.0);
		assert!((hint_opacity(0.05) - 0.5).abs() < 1e-9);
		assert_eq!(hint_opacity(0.1), 0.0);
		assert_eq!(hint_opacity(0.9), 0.0);
	}
}
