//! Drifting particles with pointer repulsion and edge reflection.

use rand::Rng;

use super::config::FieldConfig;
use super::interaction::PointerState;
use super::render::Surface;
use super::theme::Palette;

/// Velocity assigned to a component that was sampled as exactly zero, so
/// no particle sits still forever.
const MIN_DRIFT: f64 = 0.05;

/// Repulsion may push a velocity component up to this multiple of the
/// configured speed.
const MAX_SPEED_FACTOR: f64 = 3.0;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub is_special: bool,
}

/// Upper bound of the legal centre range on one axis. Collapses to the
/// radius when the surface is narrower than the particle.
fn upper_bound(extent: f64, radius: f64) -> f64 {
	(extent - radius).max(radius)
}

fn nonzero(v: f64) -> f64 {
	if v == 0.0 { MIN_DRIFT } else { v }
}

/// Uniform sample from `lo..=hi`, or `lo` when the range is empty.
fn sample<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if lo < hi { rng.gen_range(lo..=hi) } else { lo }
}

impl Particle {
	/// Sample a particle that fits inside a `width` x `height` surface.
	///
	/// Never fails: an inverted radius band is reordered, a negative speed
	/// counts by magnitude, and an empty or NaN range yields its lower end.
	pub fn random<R: Rng>(rng: &mut R, config: &FieldConfig, width: f64, height: f64) -> Self {
		let (lo, hi) = (
			config.radius_min.min(config.radius_max),
			config.radius_min.max(config.radius_max),
		);
		let radius = sample(rng, lo, hi).max(0.0);
		let x = sample(rng, radius, upper_bound(width, radius));
		let y = sample(rng, radius, upper_bound(height, radius));
		let speed = config.speed.abs().max(0.0);
		let vx = nonzero(sample(rng, -speed, speed));
		let vy = nonzero(sample(rng, -speed, speed));

		Self {
			x,
			y,
			vx,
			vy,
			radius,
			is_special: false,
		}
	}

	/// Advance one tick: repulsion from a pressed pointer, integration, then
	/// reflection off the surface edges.
	pub fn update(&mut self, pointer: &PointerState, config: &FieldConfig, width: f64, height: f64) {
		if pointer.pressed {
			if let Some((px, py)) = pointer.position {
				self.repel_from(px, py, config);
			}
		}

		self.x += self.vx;
		self.y += self.vy;

		self.reflect(width, height);
	}

	fn repel_from(&mut self, px: f64, py: f64, config: &FieldConfig) {
		let (dx, dy) = (self.x - px, self.y - py);
		let dist = (dx * dx + dy * dy).sqrt();
		// A particle exactly under the pointer has no direction to flee in.
		if dist <= 0.0 || dist >= config.repulsion_radius {
			return;
		}

		let force = (1.0 - dist / config.repulsion_radius) * config.repulsion_strength;
		let cap = MAX_SPEED_FACTOR * config.speed;
		self.vx = (self.vx + dx / dist * force).clamp(-cap, cap);
		self.vy = (self.vy + dy / dist * force).clamp(-cap, cap);
	}

	/// Flip the velocity on any axis whose edge is out of bounds, then clamp
	/// the centre back into range. Runs every tick on both axes.
	fn reflect(&mut self, width: f64, height: f64) {
		let (max_x, max_y) = (upper_bound(width, self.radius), upper_bound(height, self.radius));

		if self.x - self.radius < 0.0 || self.x + self.radius > width {
			self.vx = -self.vx;
		}
		self.x = self.x.clamp(self.radius, max_x);

		if self.y - self.radius < 0.0 || self.y + self.radius > height {
			self.vy = -self.vy;
		}
		self.y = self.y.clamp(self.radius, max_y);
	}

	/// Whether `(x, y)` lies within `pad` of this particle's edge.
	pub fn contains(&self, x: f64, y: f64, pad: f64) -> bool {
		let (dx, dy) = (self.x - x, self.y - y);
		(dx * dx + dy * dy).sqrt() <= self.radius + pad
	}

	pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, palette: &Palette, egg_enabled: bool) {
		let color = if self.is_special && egg_enabled {
			palette.special
		} else {
			palette.particle
		};
		surface.fill_disc(self.x, self.y, self.radius, color);
	}
}
