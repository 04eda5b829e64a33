//! Frame rendering for the particle field.
//!
//! Drawing goes through the [`Surface`] trait so the same code paints the
//! browser canvas and the recording surfaces used in tests. A frame is drawn
//! in three passes for z-ordering:
//! 1. Waves (behind everything)
//! 2. Particle discs
//! 3. Particle-to-particle and particle-to-pointer lines
//!
//! The line pass compares every pair of particles, so its cost grows with
//! the square of the particle count. That is fine for the low hundreds this
//! effect is tuned for; past that the pass needs a spatial grid.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::FieldConfig;
use super::interaction::PointerState;
use super::particle::Particle;
use super::theme::{Color, Palette};
use super::wave::WaveFrame;

/// Base opacity of lines drawn from a particle to the pointer.
const POINTER_LINE_ALPHA: f64 = 0.5;

/// Stroke width of connecting lines.
const LINE_WIDTH: f64 = 1.0;

/// Minimal 2d drawing target.
pub trait Surface {
	fn clear(&mut self, width: f64, height: f64);
	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	fn stroke_ring(&mut self, x: f64, y: f64, radius: f64, color: Color, width: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn stroke_ring(&mut self, x: f64, y: f64, radius: f64, color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.stroke();
	}
}

/// Distance-weighted opacity, zero at and beyond `max_distance`.
pub fn line_opacity(distance: f64, max_distance: f64, base_alpha: f64) -> f64 {
	((1.0 - distance / max_distance) * base_alpha).max(0.0)
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (a.0 - b.0, a.1 - b.1);
	(dx * dx + dy * dy).sqrt()
}

/// Renders one complete frame.
pub fn draw_frame<S: Surface + ?Sized>(
	surface: &mut S,
	size: (f64, f64),
	particles: &[Particle],
	waves: &[WaveFrame],
	pointer: &PointerState,
	palette: &Palette,
	config: &FieldConfig,
) {
	surface.clear(size.0, size.1);
	draw_waves(surface, waves, palette);
	draw_particles(surface, particles, palette, config.egg.enabled);
	draw_lines(surface, particles, pointer, palette, config);
}

pub fn draw_waves<S: Surface + ?Sized>(surface: &mut S, waves: &[WaveFrame], palette: &Palette) {
	for w in waves {
		surface.stroke_ring(
			w.x,
			w.y,
			w.radius,
			palette.wave.with_alpha(w.opacity),
			w.line_width,
		);
	}
}

pub fn draw_particles<S: Surface + ?Sized>(
	surface: &mut S,
	particles: &[Particle],
	palette: &Palette,
	egg_enabled: bool,
) {
	for p in particles {
		p.draw(surface, palette, egg_enabled);
	}
}

/// Joins nearby particles to each other and to the pointer.
pub fn draw_lines<S: Surface + ?Sized>(
	surface: &mut S,
	particles: &[Particle],
	pointer: &PointerState,
	palette: &Palette,
	config: &FieldConfig,
) {
	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let d = distance((a.x, a.y), (b.x, b.y));
			if d >= config.max_line_distance {
				continue;
			}
			let alpha = line_opacity(d, config.max_line_distance, palette.line.a);
			if alpha > 0.0 {
				surface.stroke_line(
					(a.x, a.y),
					(b.x, b.y),
					palette.line.with_alpha(alpha),
					LINE_WIDTH,
				);
			}
		}
	}

	let Some(target) = pointer.position else {
		return;
	};
	for p in particles {
		let d = distance((p.x, p.y), target);
		if d >= config.pointer_radius {
			continue;
		}
		let alpha = line_opacity(d, config.pointer_radius, POINTER_LINE_ALPHA);
		if alpha > 0.0 {
			surface.stroke_line((p.x, p.y), target, palette.line.with_alpha(alpha), LINE_WIDTH);
		}
	}
}
