//! Pointer tracking, press handling, and egg hit-testing.

use log::debug;

use super::config::FieldConfig;
use super::field::Field;

/// Extra distance around each particle that still counts as a click on it,
/// so tiny particles stay clickable.
pub const HIT_PAD: f64 = 6.0;

/// Last known pointer state in surface coordinates.
///
/// `position` is `None` until the pointer first moves over the surface and
/// again after it leaves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	pub position: Option<(f64, f64)>,
	pub pressed: bool,
}

/// What a pointer press did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
	/// The special particle was hit. No wave was spawned.
	EggFound,
	/// A wave was spawned at the press location.
	WaveSpawned,
	/// Nothing happened (waves disabled and no egg hit).
	Ignored,
}

/// Maps host display coordinates onto the simulation surface when the canvas
/// is drawn at a different size than its backing resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMapping {
	pub scale_x: f64,
	pub scale_y: f64,
}

impl Default for DisplayMapping {
	fn default() -> Self {
		Self {
			scale_x: 1.0,
			scale_y: 1.0,
		}
	}
}

impl DisplayMapping {
	/// Ratio of surface size to displayed size on each axis. A non-positive
	/// displayed size maps 1:1.
	pub fn new(surface: (f64, f64), displayed: (f64, f64)) -> Self {
		let ratio = |s: f64, d: f64| if d > 0.0 && s > 0.0 { s / d } else { 1.0 };
		Self {
			scale_x: ratio(surface.0, displayed.0),
			scale_y: ratio(surface.1, displayed.1),
		}
	}

	pub fn to_surface(&self, x: f64, y: f64) -> (f64, f64) {
		(x * self.scale_x, y * self.scale_y)
	}
}

/// Turns pointer events into pointer state, waves, and egg discoveries.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
	pointer: PointerState,
}

impl InteractionController {
	pub fn pointer(&self) -> &PointerState {
		&self.pointer
	}

	/// Handle a press at `position` (surface coordinates).
	///
	/// Every particle is checked in insertion order so the egg is found even
	/// when a plain particle overlaps it.
	pub fn on_pointer_down(
		&mut self,
		field: &mut Field,
		config: &FieldConfig,
		position: (f64, f64),
	) -> PressOutcome {
		let (x, y) = position;
		self.pointer.position = Some(position);
		self.pointer.pressed = true;

		if config.egg.enabled
			&& field
				.particles()
				.iter()
				.any(|p| p.is_special && p.contains(x, y, HIT_PAD))
		{
			debug!("ambient-field: egg found at ({x:.1}, {y:.1})");
			return PressOutcome::EggFound;
		}

		if config.waves.enabled {
			field.spawn_wave(x, y, config);
			debug!("ambient-field: wave spawned at ({x:.1}, {y:.1})");
			return PressOutcome::WaveSpawned;
		}

		PressOutcome::Ignored
	}

	pub fn on_pointer_move(&mut self, position: (f64, f64)) {
		self.pointer.position = Some(position);
	}

	/// Releases the press but keeps the position so hover lines persist.
	pub fn on_pointer_up(&mut self) {
		self.pointer.pressed = false;
	}

	/// A pointer that leaves the surface is also treated as released.
	pub fn on_pointer_leave(&mut self) {
		self.pointer = PointerState::default();
	}
}
