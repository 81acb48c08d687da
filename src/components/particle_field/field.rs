//! Particle simulation for the ambient background fields.
//!
//! Particles are plain records in a `Vec`, advanced in place each tick.
//! Seeding uses a deterministic sine-hash stream keyed by particle index
//! and a per-mount nonce, so resize reseeds look fresh without an RNG
//! dependency and the simulation stays reproducible under test.

use super::style::{EdgePolicy, FieldStyle};

/// Margin outside the canvas within which particles are still kept.
const EDGE_MARGIN: f64 = 10.0;

/// A single drifting particle.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub alpha: f64,
	/// Phase offset for the flicker oscillation.
	pub phase: f64,
	/// Per-particle flicker rate.
	pub flicker: f64,
}

/// Owns and advances one field of particles.
pub struct ParticleField {
	particles: Vec<Particle>,
	style: FieldStyle,
	width: f64,
	height: f64,
	time: f64,
}

/// Deterministic pseudo-random in `[0, 1)`.
fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

/// Linear link falloff: 1 at zero distance, 0 at the threshold and beyond.
pub fn link_strength(distance: f64, threshold: f64) -> f64 {
	if threshold <= 0.0 {
		return 0.0;
	}
	(1.0 - distance / threshold).clamp(0.0, 1.0)
}

impl ParticleField {
	/// Seeds a field sized to the given canvas box.
	pub fn new(style: FieldStyle, width: f64, height: f64, nonce: f64) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			style,
			width,
			height,
			time: 0.0,
		};
		field.reseed(width, height, nonce);
		field
	}

	/// Recreates every particle for a new canvas box. The count is derived
	/// from the style's breakpoint policy against the new width.
	pub fn reseed(&mut self, width: f64, height: f64, nonce: f64) {
		self.width = width;
		self.height = height;
		let count = self.style.count_for(width);
		let drift = self.style.drift;
		let (size_min, size_max) = self.style.size;
		let (alpha_min, alpha_max) = self.style.alpha_band;
		let (rise_min, rise_max) = self.style.rise;

		self.particles.clear();
		self.particles.reserve(count);
		for i in 0..count {
			let r = |salt: f64| pseudo_random(i as f64 * salt + nonce * 53.7 + salt);
			let vy = if rise_max > 0.0 {
				-(rise_min + r(4.1) * (rise_max - rise_min))
			} else {
				(r(4.3) - 0.5) * drift
			};
			self.particles.push(Particle {
				x: r(1.1) * width,
				y: r(2.3) * height,
				vx: (r(3.7) - 0.5) * drift,
				vy,
				size: size_min + r(5.3) * (size_max - size_min),
				alpha: alpha_min + r(6.7) * (alpha_max - alpha_min),
				phase: r(7.9) * std::f64::consts::TAU,
				flicker: 1.0 + r(9.1) * 2.0,
			});
		}
	}

	/// Advances the simulation by `dt` seconds.
	///
	/// Positions move by velocity (scaled to a 60fps reference), boundary
	/// crossings wrap or recycle on the same tick, and alpha is nudged by a
	/// per-particle oscillation then clamped back into the style's band.
	pub fn tick(&mut self, dt: f64) {
		self.time += dt;
		let frames = dt * 60.0;
		let (alpha_min, alpha_max) = self.style.alpha_band;
		let (width, height) = (self.width, self.height);

		for p in &mut self.particles {
			p.x += p.vx * frames;
			p.y += p.vy * frames;

			match self.style.edge {
				EdgePolicy::Wrap => {
					if p.y < -EDGE_MARGIN {
						p.y = height + EDGE_MARGIN;
					} else if p.y > height + EDGE_MARGIN {
						p.y = -EDGE_MARGIN;
					}
				}
				EdgePolicy::Recycle => {
					if p.y < -EDGE_MARGIN {
						p.y = height + EDGE_MARGIN;
						p.x = pseudo_random(p.phase * 31.4 + self.time) * width;
					} else if p.y > height + EDGE_MARGIN {
						p.y = -EDGE_MARGIN;
					}
				}
			}
			if p.x < -EDGE_MARGIN {
				p.x = width + EDGE_MARGIN;
			} else if p.x > width + EDGE_MARGIN {
				p.x = -EDGE_MARGIN;
			}

			p.alpha = (p.alpha + (self.time * p.flicker + p.phase).sin() * 0.01)
				.clamp(alpha_min, alpha_max);
		}
	}

	/// Pairwise links under the style's distance threshold with their
	/// strength, empty when the style disables linking. Quadratic in the
	/// particle count, which stays small by construction.
	pub fn links(&self) -> Vec<(usize, usize, f64)> {
		let Some(threshold) = self.style.link_distance else {
			return Vec::new();
		};
		let mut links = Vec::new();
		for i in 0..self.particles.len() {
			for j in (i + 1)..self.particles.len() {
				let (a, b) = (&self.particles[i], &self.particles[j]);
				let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
				let strength = link_strength(distance, threshold);
				if strength > 0.0 {
					links.push((i, j, strength));
				}
			}
		}
		links
	}

	/// Current particles.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Style this field was built with.
	pub fn style(&self) -> &FieldStyle {
		&self.style
	}

	/// Canvas box the field is simulated in.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn count_recomputes_on_reseed() {
		let mut field = ParticleField::new(FieldStyle::crimson_nodes(), 1920.0, 1080.0, 0.42);
		assert_eq!(field.particles().len(), 80);
		field.reseed(375.0, 667.0, 0.42);
		assert_eq!(field.particles().len(), 40);
		assert_eq!(field.size(), (375.0, 667.0));
	}

	#[test]
	fn seeding_is_deterministic_per_nonce() {
		let a = ParticleField::new(FieldStyle::starfield(), 800.0, 600.0, 0.5);
		let b = ParticleField::new(FieldStyle::starfield(), 800.0, 600.0, 0.5);
		for (pa, pb) in a.particles().iter().zip(b.particles()) {
			assert_eq!(pa.x, pb.x);
			assert_eq!(pa.y, pb.y);
			assert_eq!(pa.vx, pb.vx);
			assert_eq!(pa.vy, pb.vy);
		}
	}

	#[test]
	fn particles_stay_inside_the_wrap_margin() {
		let mut field = ParticleField::new(FieldStyle::starfield(), 640.0, 480.0, 0.1);
		for _ in 0..5_000 {
			field.tick(1.0 / 60.0);
		}
		for p in field.particles() {
			assert!((-EDGE_MARGIN..=640.0 + EDGE_MARGIN).contains(&p.x));
			assert!((-EDGE_MARGIN..=480.0 + EDGE_MARGIN).contains(&p.y));
		}
	}

	#[test]
	fn alpha_never_leaves_the_configured_band() {
		let style = FieldStyle::embers();
		let (min, max) = style.alpha_band;
		let mut field = ParticleField::new(style, 800.0, 600.0, 0.7);
		for _ in 0..2_000 {
			field.tick(1.0 / 60.0);
			for p in field.particles() {
				assert!(p.alpha >= min && p.alpha <= max);
			}
		}
	}

	#[test]
	fn embers_rise_and_recycle_within_bounds() {
		let mut field = ParticleField::new(FieldStyle::embers(), 300.0, 200.0, 0.3);
		for p in field.particles() {
			assert!(p.vy < 0.0, "embers must rise");
		}
		// Long enough for every ember to cross the top edge many times.
		for _ in 0..60_000 {
			field.tick(1.0 / 60.0);
		}
		for p in field.particles() {
			assert!((-EDGE_MARGIN..=300.0 + EDGE_MARGIN).contains(&p.x));
			assert!((-EDGE_MARGIN..=200.0 + EDGE_MARGIN).contains(&p.y));
		}
	}

	#[test]
	fn link_strength_decays_linearly_to_the_threshold() {
		assert_eq!(link_strength(0.0, 120.0), 1.0);
		assert!((link_strength(60.0, 120.0) - 0.5).abs() < 1e-9);
		assert_eq!(link_strength(120.0, 120.0), 0.0);
		assert_eq!(link_strength(500.0, 120.0), 0.0);
		assert_eq!(link_strength(10.0, 0.0), 0.0);
	}

	#[test]
	fn only_linking_styles_produce_links() {
		let stars = ParticleField::new(FieldStyle::starfield(), 800.0, 600.0, 0.2);
		assert!(stars.links().is_empty());
		// A tiny canvas packs every node pair inside the threshold.
		let nodes = ParticleField::new(FieldStyle::crimson_nodes(), 10.0, 10.0, 0.9);
		assert!(!nodes.links().is_empty());
		for (_, _, strength) in nodes.links() {
			assert!(strength > 0.0 && strength <= 1.0);
		}
	}
}
