//! Field configuration.
//!
//! Every parameter is fixed for the lifetime of a session; changing any of
//! them means building a new session. Values can be supplied as JSON (all
//! keys optional) and are sanitized before use so the simulation never sees
//! an empty radius band or a zero-length wave.

use log::warn;
use serde::Deserialize;

use super::theme::{PaletteOverrides, Palettes};

/// Where the egg lands when the field is initialized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EggPlacement {
	/// Always the first particle.
	First,
	/// A uniformly random particle.
	#[default]
	Random,
}

/// Press-spawned ring settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
	pub enabled: bool,
	/// Final radius. `None` uses the repulsion radius.
	pub max_radius: Option<f64>,
	/// Lifetime in ticks.
	pub lifetime: u32,
	/// Stroke width at spawn, shrinking linearly to zero.
	pub line_width: f64,
	/// Fade opacity with age instead of holding the base alpha.
	pub fade_out: bool,
}

impl Default for WaveConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			max_radius: None,
			lifetime: 60,
			line_width: 2.0,
			fade_out: true,
		}
	}
}

/// Hidden particle settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EggConfig {
	pub enabled: bool,
	pub placement: EggPlacement,
}

impl Default for EggConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			placement: EggPlacement::Random,
		}
	}
}

/// Palette overrides per theme.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
	pub light: PaletteOverrides,
	pub dark: PaletteOverrides,
}

impl ThemeConfig {
	pub fn palettes(&self) -> Palettes {
		Palettes::resolve(&self.light, &self.dark)
	}
}

/// Complete configuration for one particle field session.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	pub particle_count: usize,
	/// Bound on each initial velocity component. Repulsion may push a
	/// component up to three times this.
	pub speed: f64,
	pub radius_min: f64,
	pub radius_max: f64,
	/// Particles closer than this are joined by a line.
	pub max_line_distance: f64,
	/// Particles closer than this to the pointer are joined to it.
	pub pointer_radius: f64,
	pub repulsion_radius: f64,
	pub repulsion_strength: f64,
	pub waves: WaveConfig,
	pub egg: EggConfig,
	pub theme: ThemeConfig,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle_count: 80,
			speed: 0.5,
			radius_min: 1.0,
			radius_max: 3.0,
			max_line_distance: 120.0,
			pointer_radius: 150.0,
			repulsion_radius: 120.0,
			repulsion_strength: 0.6,
			waves: WaveConfig::default(),
			egg: EggConfig::default(),
			theme: ThemeConfig::default(),
		}
	}
}

/// Replace `value` with `default` unless it is finite and positive.
fn positive_or(name: &str, value: f64, default: f64) -> f64 {
	if value.is_finite() && value > 0.0 {
		value
	} else {
		warn!("ambient-field: {name} = {value} is out of range, using {default}");
		default
	}
}

impl FieldConfig {
	/// Parse a JSON document. Missing keys take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Final wave radius after applying the repulsion-radius fallback.
	pub fn wave_max_radius(&self) -> f64 {
		self.waves.max_radius.unwrap_or(self.repulsion_radius)
	}

	/// Return a copy with every out-of-range value replaced.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();

		self.speed = positive_or("speed", self.speed, defaults.speed);
		self.radius_min = positive_or("radius_min", self.radius_min, defaults.radius_min);
		self.radius_max = positive_or("radius_max", self.radius_max, defaults.radius_max);
		if self.radius_max < self.radius_min {
			warn!(
				"ambient-field: radius_max {} below radius_min {}, collapsing band",
				self.radius_max, self.radius_min
			);
			self.radius_max = self.radius_min;
		}
		self.max_line_distance = positive_or(
			"max_line_distance",
			self.max_line_distance,
			defaults.max_line_distance,
		);
		self.pointer_radius = positive_or(
			"pointer_radius",
			self.pointer_radius,
			defaults.pointer_radius,
		);
		self.repulsion_radius = positive_or(
			"repulsion_radius",
			self.repulsion_radius,
			defaults.repulsion_radius,
		);
		if !self.repulsion_strength.is_finite() || self.repulsion_strength < 0.0 {
			warn!(
				"ambient-field: repulsion_strength = {} is out of range, disabling repulsion",
				self.repulsion_strength
			);
			self.repulsion_strength = 0.0;
		}

		if let Some(r) = self.waves.max_radius {
			if !(r.is_finite() && r > 0.0) {
				warn!("ambient-field: waves.max_radius = {r} is out of range, using repulsion radius");
				self.waves.max_radius = None;
			}
		}
		if self.waves.lifetime == 0 {
			warn!("ambient-field: waves.lifetime = 0, using 1 tick");
			self.waves.lifetime = 1;
		}
		self.waves.line_width = positive_or(
			"waves.line_width",
			self.waves.line_width,
			defaults.waves.line_width,
		);

		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_json_is_the_default() {
		let config = FieldConfig::from_json("{}").unwrap();
		assert_eq!(config.particle_count, 80);
		assert_eq!(config.waves, WaveConfig::default());
		assert!(config.egg.enabled);
		assert_eq!(config.egg.placement, EggPlacement::Random);
	}

	#[test]
	fn partial_json_overrides_nested_keys() {
		let config = FieldConfig::from_json(
			r##"{
				"particle_count": 12,
				"waves": { "lifetime": 30 },
				"egg": { "placement": "first" },
				"theme": { "dark": { "special": "#ff0000" } }
			}"##,
		)
		.unwrap();
		assert_eq!(config.particle_count, 12);
		assert_eq!(config.waves.lifetime, 30);
		assert!(config.waves.enabled);
		assert!(config.egg.enabled);
		assert_eq!(config.egg.placement, EggPlacement::First);
		assert_eq!(config.theme.palettes().dark.special.r, 255);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(FieldConfig::from_json("{ particle_count: }").is_err());
	}

	#[test]
	fn wave_radius_falls_back_to_repulsion_radius() {
		let mut config = FieldConfig::default();
		assert_eq!(config.wave_max_radius(), config.repulsion_radius);
		config.waves.max_radius = Some(40.0);
		assert_eq!(config.wave_max_radius(), 40.0);
	}

	#[test]
	fn sanitize_repairs_bad_values() {
		let config = FieldConfig {
			speed: f64::NAN,
			radius_min: 4.0,
			radius_max: 2.0,
			repulsion_radius: -1.0,
			repulsion_strength: -3.0,
			waves: WaveConfig {
				lifetime: 0,
				max_radius: Some(0.0),
				..Default::default()
			},
			..Default::default()
		}
		.sanitized();

		assert_eq!(config.speed, 0.5);
		assert_eq!(config.radius_min, 4.0);
		assert_eq!(config.radius_max, 4.0);
		assert_eq!(config.repulsion_radius, 120.0);
		assert_eq!(config.repulsion_strength, 0.0);
		assert_eq!(config.waves.lifetime, 1);
		assert_eq!(config.waves.max_radius, None);
	}

	#[test]
	fn sanitize_keeps_valid_values() {
		let config = FieldConfig::default().sanitized();
		assert_eq!(config.radius_min, 1.0);
		assert_eq!(config.radius_max, 3.0);
		assert_eq!(config.repulsion_strength, 0.6);
	}
}
