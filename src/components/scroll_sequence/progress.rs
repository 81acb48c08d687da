//! Scroll progress tracking and spring smoothing.
//!
//! Raw progress is derived from the pinned container's bounding rect each
//! animation frame. A small second-order spring integrator smooths it
//! before frame selection so noisy scroll deltas do not judder the canvas.

/// Normalized scroll progress of a pinned container.
///
/// 0 when the container's top edge meets the viewport top, 1 when its
/// bottom edge meets the viewport bottom. Containers with no scrollable
/// span report 0.
pub fn track_progress(top: f64, height: f64, viewport: f64) -> f64 {
	let span = height - viewport;
	if span <= 0.0 {
		return 0.0;
	}
	(-top / span).clamp(0.0, 1.0)
}

/// Maps smoothed progress to a frame index, clamped to `0..count`.
pub fn frame_index(progress: f64, count: usize) -> usize {
	if count == 0 {
		return 0;
	}
	let last = count - 1;
	let index = (progress.clamp(0.0, 1.0) * last as f64).floor() as usize;
	index.min(last)
}

/// Damped spring smoothing a scalar signal.
///
/// Explicit semi-implicit Euler integrator, sub-stepped at 120Hz so a
/// large `dt` from a backgrounded tab cannot destabilize it. Snaps onto
/// the target once displacement and velocity both drop under `rest_delta`.
#[derive(Clone, Debug)]
pub struct Spring {
	stiffness: f64,
	damping: f64,
	rest_delta: f64,
	position: f64,
	velocity: f64,
}

/// Integrator sub-step ceiling.
const MAX_STEP: f64 = 1.0 / 120.0;

impl Spring {
	/// Spring with the hero's default tuning (gentle settle, no overshoot).
	pub fn new(initial: f64) -> Self {
		Self::with_tuning(initial, 100.0, 30.0, 0.001)
	}

	/// Spring with explicit stiffness/damping/rest-threshold tuning.
	pub fn with_tuning(initial: f64, stiffness: f64, damping: f64, rest_delta: f64) -> Self {
		Self {
			stiffness,
			damping,
			rest_delta,
			position: initial,
			velocity: 0.0,
		}
	}

	/// Current smoothed value.
	pub fn value(&self) -> f64 {
		self.position
	}

	/// True once the spring has snapped onto `target`.
	pub fn at_rest(&self, target: f64) -> bool {
		self.velocity == 0.0 && self.position == target
	}

	/// Advances the spring toward `target` by `dt` seconds and returns the
	/// new smoothed value.
	pub fn tick(&mut self, target: f64, dt: f64) -> f64 {
		let mut remaining = dt.max(0.0);
		while remaining > 0.0 {
			let step = remaining.min(MAX_STEP);
			let accel = -self.stiffness * (self.position - target) - self.damping * self.velocity;
			self.velocity += accel * step;
			self.position += self.velocity * step;
			remaining -= step;
		}
		if (self.position - target).abs() < self.rest_delta && self.velocity.abs() < self.rest_delta {
			self.position = target;
			self.velocity = 0.0;
		}
		self.position
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::scroll_sequence::frames::FRAME_COUNT;

	#[test]
	fn frame_index_clamps_to_sequence_bounds() {
		assert_eq!(frame_index(0.0, FRAME_COUNT), 0);
		assert_eq!(frame_index(1.0, FRAME_COUNT), FRAME_COUNT - 1);
		assert_eq!(frame_index(-2.0, FRAME_COUNT), 0);
		assert_eq!(frame_index(7.5, FRAME_COUNT), FRAME_COUNT - 1);
		assert_eq!(frame_index(0.5, FRAME_COUNT), (FRAME_COUNT - 1) / 2);
		assert_eq!(frame_index(0.5, 0), 0);
	}

	#[test]
	fn sweep_covers_every_frame_monotonically() {
		let steps = 10_000;
		let mut last = 0;
		let mut seen = vec![false; FRAME_COUNT];
		for s in 0..=steps {
			let index = frame_index(s as f64 / steps as f64, FRAME_COUNT);
			assert!(index >= last, "frame index regressed at step {s}");
			last = index;
			seen[index] = true;
		}
		assert!(seen.iter().all(|hit| *hit), "sweep skipped a frame");
	}

	#[test]
	fn progress_normalizes_container_offset() {
		// 400vh container in an 800px viewport: 2400px of scrollable span.
		assert_eq!(track_progress(0.0, 3200.0, 800.0), 0.0);
		assert_eq!(track_progress(-1200.0, 3200.0, 800.0), 0.5);
		assert_eq!(track_progress(-2400.0, 3200.0, 800.0), 1.0);
		// Clamped outside the pinned range.
		assert_eq!(track_progress(300.0, 3200.0, 800.0), 0.0);
		assert_eq!(track_progress(-9000.0, 3200.0, 800.0), 1.0);
	}

	#[test]
	fn progress_guards_degenerate_containers() {
		assert_eq!(track_progress(-100.0, 800.0, 800.0), 0.0);
		assert_eq!(track_progress(-100.0, 400.0, 800.0), 0.0);
		assert_eq!(track_progress(-100.0, 0.0, 0.0), 0.0);
	}

	#[test]
	fn spring_settles_on_target_without_overshoot() {
		let mut spring = Spring::new(0.0);
		let mut peak = 0.0f64;
		for _ in 0..600 {
			peak = peak.max(spring.tick(1.0, 1.0 / 60.0));
		}
		assert!(spring.at_rest(1.0), "spring still moving after 10s");
		assert!(peak <= 1.0 + 1e-9, "overdamped spring overshot to {peak}");
	}

	#[test]
	fn spring_tracks_a_moving_target() {
		let mut spring = Spring::new(0.0);
		spring.tick(1.0, 0.1);
		let mid = spring.value();
		assert!(mid > 0.0 && mid < 1.0);
		for _ in 0..120 {
			spring.tick(0.25, 1.0 / 60.0);
		}
		assert!(spring.at_rest(0.25));
	}

	#[test]
	fn spring_survives_oversized_timesteps() {
		let mut spring = Spring::new(0.0);
		for _ in 0..20 {
			let value = spring.tick(1.0, 0.5);
			assert!(value.is_finite());
			assert!((0.0..=1.0 + 1e-9).contains(&value));
		}
		assert!(spring.at_rest(1.0));
	}
}
