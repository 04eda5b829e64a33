//! Expanding rings spawned by pointer presses.

/// Waves overshooting their final radius by more than this factor are culled.
const OVERSHOOT: f64 = 1.1;

/// A ring growing linearly from its origin until its lifetime runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct Wave {
	x: f64,
	y: f64,
	radius: f64,
	max_radius: f64,
	remaining_life: u32,
	initial_life: u32,
	initial_line_width: f64,
	growth: f64,
}

/// What one wave looks like on the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveFrame {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub opacity: f64,
	pub line_width: f64,
}

impl Wave {
	/// `life` is clamped to at least one tick.
	pub fn new(x: f64, y: f64, max_radius: f64, life: u32, line_width: f64) -> Self {
		let life = life.max(1);
		Self {
			x,
			y,
			radius: 0.0,
			max_radius,
			remaining_life: life,
			initial_life: life,
			initial_line_width: line_width,
			growth: max_radius / life as f64,
		}
	}

	pub fn origin(&self) -> (f64, f64) {
		(self.x, self.y)
	}

	pub fn radius(&self) -> f64 {
		self.radius
	}

	pub fn max_radius(&self) -> f64 {
		self.max_radius
	}

	pub fn remaining_life(&self) -> u32 {
		self.remaining_life
	}

	pub fn initial_life(&self) -> u32 {
		self.initial_life
	}

	/// Grow and age by one tick.
	///
	/// Returns the frame to draw, or `None` once the wave has expired, in
	/// which case the caller drops it.
	pub fn advance(&mut self, fade_out: bool, base_alpha: f64) -> Option<WaveFrame> {
		self.radius += self.growth;
		self.remaining_life = self.remaining_life.saturating_sub(1);

		let remaining = 1.0 - self.progress();
		let opacity = if fade_out {
			remaining * base_alpha
		} else {
			base_alpha
		};
		let line_width = self.initial_line_width * remaining;

		if self.remaining_life == 0
			|| self.radius >= self.max_radius * OVERSHOOT
			|| line_width <= 0.0
			|| opacity <= 0.0
		{
			return None;
		}

		Some(WaveFrame {
			x: self.x,
			y: self.y,
			radius: self.radius,
			opacity,
			line_width,
		})
	}

	/// Fraction of the lifetime already used, in `[0, 1]`.
	fn progress(&self) -> f64 {
		1.0 - self.remaining_life as f64 / self.initial_life as f64
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn grows_linearly_and_fades() {
		let mut wave = Wave::new(10.0, 20.0, 100.0, 4, 2.0);

		let first = wave.advance(true, 0.8).unwrap();
		assert_eq!((first.x, first.y), (10.0, 20.0));
		assert!((first.radius - 25.0).abs() < 1e-12);
		assert!((first.opacity - 0.6).abs() < 1e-12);
		assert!((first.line_width - 1.5).abs() < 1e-12);

		let second = wave.advance(true, 0.8).unwrap();
		assert!((second.radius - 50.0).abs() < 1e-12);
		assert!((second.opacity - 0.4).abs() < 1e-12);
	}

	#[test]
	fn holds_opacity_without_fade() {
		let mut wave = Wave::new(0.0, 0.0, 100.0, 4, 2.0);
		wave.advance(false, 0.8);
		let frame = wave.advance(false, 0.8).unwrap();
		assert_eq!(frame.opacity, 0.8);
		assert!((frame.line_width - 1.0).abs() < 1e-12);
	}

	#[test]
	fn expires_on_last_tick_with_full_growth() {
		let mut wave = Wave::new(0.0, 0.0, 90.0, 3, 2.0);
		assert!(wave.advance(true, 1.0).is_some());
		assert!(wave.advance(true, 1.0).is_some());
		assert!(wave.advance(true, 1.0).is_none());
		assert_eq!(wave.remaining_life(), 0);
		assert!((wave.radius() - wave.max_radius()).abs() < 1e-9);
	}

	#[test]
	fn zero_base_alpha_culls_immediately() {
		let mut wave = Wave::new(0.0, 0.0, 90.0, 10, 2.0);
		assert!(wave.advance(false, 0.0).is_none());
	}

	#[test]
	fn single_tick_wave() {
		let mut wave = Wave::new(0.0, 0.0, 50.0, 0, 2.0);
		assert_eq!(wave.initial_life(), 1);
		assert!(wave.advance(true, 1.0).is_none());
	}
}
