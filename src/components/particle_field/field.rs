//! The particle and wave collections for one session.
//!
//! A [`Field`] is rebuilt from scratch on every [`Field::initialize`] call
//! (first mount and every resize); nothing carries over between generations
//! except the random source.

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{EggPlacement, FieldConfig};
use super::interaction::PointerState;
use super::particle::Particle;
use super::wave::{Wave, WaveFrame};

/// Particles and waves for one session, sized to the current surface.
pub struct Field {
	particles: Vec<Particle>,
	waves: Vec<Wave>,
	width: f64,
	height: f64,
	rng: SmallRng,
}

impl Field {
	/// An empty field. Call [`Field::initialize`] before the first tick.
	pub fn new(seed: u64) -> Self {
		Self {
			particles: Vec::new(),
			waves: Vec::new(),
			width: 0.0,
			height: 0.0,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Replace every particle with a fresh generation sized to the surface,
	/// pick the egg, and drop all waves.
	pub fn initialize(&mut self, width: f64, height: f64, config: &FieldConfig) {
		self.width = width;
		self.height = height;
		self.waves.clear();

		self.particles = (0..config.particle_count)
			.map(|_| Particle::random(&mut self.rng, config, width, height))
			.collect();

		if config.egg.enabled && !self.particles.is_empty() {
			let last = self.particles.len() - 1;
			let idx = match config.egg.placement {
				EggPlacement::First => 0,
				EggPlacement::Random => self.rng.gen_range(0..=last),
			};
			self.particles[idx.min(last)].is_special = true;
		}

		info!(
			"ambient-field: initialized {} particles on {}x{}",
			self.particles.len(),
			width,
			height
		);
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	pub fn waves(&self) -> &[Wave] {
		&self.waves
	}

	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Move every particle one tick.
	pub fn advance_particles(&mut self, pointer: &PointerState, config: &FieldConfig) {
		let (width, height) = (self.width, self.height);
		for p in &mut self.particles {
			p.update(pointer, config, width, height);
		}
	}

	/// Add a wave centred on `(x, y)`.
	pub fn spawn_wave(&mut self, x: f64, y: f64, config: &FieldConfig) {
		self.waves.push(Wave::new(
			x,
			y,
			config.wave_max_radius(),
			config.waves.lifetime,
			config.waves.line_width,
		));
	}

	/// Age every wave one tick, dropping expired ones, and return what the
	/// survivors look like this frame.
	pub fn advance_waves(&mut self, fade_out: bool, base_alpha: f64) -> Vec<WaveFrame> {
		let mut frames = Vec::with_capacity(self.waves.len());
		self.waves.retain_mut(|wave| match wave.advance(fade_out, base_alpha) {
			Some(frame) => {
				frames.push(frame);
				true
			}
			None => false,
		});
		frames
	}

	/// Drop every particle and wave.
	pub fn clear(&mut self) {
		self.particles.clear();
		self.waves.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::config::EggConfig;

	fn config(count: usize, placement: EggPlacement) -> FieldConfig {
		FieldConfig {
			particle_count: count,
			egg: EggConfig {
				enabled: true,
				placement,
			},
			..Default::default()
		}
	}

	fn specials(field: &Field) -> usize {
		field.particles().iter().filter(|p| p.is_special).count()
	}

	#[test]
	fn initialize_replaces_instead_of_appending() {
		let mut field = Field::new(1);
		let config = config(25, EggPlacement::Random);
		field.initialize(800.0, 600.0, &config);
		field.spawn_wave(10.0, 10.0, &config);
		field.initialize(400.0, 300.0, &config);

		assert_eq!(field.particles().len(), 25);
		assert!(field.waves().is_empty());
		assert_eq!(specials(&field), 1);
		assert_eq!(field.size(), (400.0, 300.0));
		for p in field.particles() {
			assert!(p.x <= 400.0 - p.radius && p.y <= 300.0 - p.radius);
		}
	}

	#[test]
	fn fixed_placement_marks_first() {
		let mut field = Field::new(2);
		field.initialize(200.0, 200.0, &config(5, EggPlacement::First));
		assert!(field.particles()[0].is_special);
		assert_eq!(specials(&field), 1);
	}

	#[test]
	fn random_placement_always_marks_exactly_one() {
		let mut field = Field::new(3);
		let config = config(3, EggPlacement::Random);
		for _ in 0..50 {
			field.initialize(200.0, 200.0, &config);
			assert_eq!(specials(&field), 1);
		}
	}

	#[test]
	fn no_egg_when_disabled_or_empty() {
		let mut field = Field::new(4);
		let mut disabled = config(10, EggPlacement::First);
		disabled.egg.enabled = false;
		field.initialize(200.0, 200.0, &disabled);
		assert_eq!(specials(&field), 0);

		field.initialize(200.0, 200.0, &config(0, EggPlacement::Random));
		assert!(field.particles().is_empty());
	}

	#[test]
	fn waves_are_culled_once_expired() {
		let mut field = Field::new(5);
		let mut config = config(0, EggPlacement::First);
		config.waves.lifetime = 3;
		field.initialize(200.0, 200.0, &config);
		field.spawn_wave(50.0, 50.0, &config);
		field.spawn_wave(80.0, 80.0, &config);

		assert_eq!(field.advance_waves(true, 0.5).len(), 2);
		assert_eq!(field.advance_waves(true, 0.5).len(), 2);
		assert!(field.advance_waves(true, 0.5).is_empty());
		assert!(field.waves().is_empty());
	}

	#[test]
	fn same_seed_same_field() {
		let config = config(10, EggPlacement::Random);
		let mut a = Field::new(42);
		let mut b = Field::new(42);
		a.initialize(300.0, 300.0, &config);
		b.initialize(300.0, 300.0, &config);
		assert_eq!(a.particles(), b.particles());
	}

	#[test]
	fn degenerate_config_still_initializes() {
		let mut field = Field::new(6);
		let inverted = FieldConfig {
			radius_min: 4.0,
			radius_max: 2.0,
			..config(20, EggPlacement::Random)
		};
		field.initialize(200.0, 200.0, &inverted);
		assert_eq!(field.particles().len(), 20);
		for p in field.particles() {
			assert!((2.0..=4.0).contains(&p.radius));
		}

		for speed in [-1.0, 0.0, f64::NAN] {
			let config = FieldConfig {
				speed,
				..config(20, EggPlacement::First)
			};
			field.initialize(200.0, 200.0, &config);
			assert_eq!(specials(&field), 1);
			for p in field.particles() {
				assert!(p.vx.is_finite() && p.vx != 0.0);
				assert!(p.vy.is_finite() && p.vy != 0.0);
				assert!(p.vx.abs() <= speed.abs().max(0.05));
			}
		}
	}
}
