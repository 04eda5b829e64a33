//! One simulation session: field, pointer, theme, and frame loop together.
//!
//! Created once when the canvas mounts, then driven by the frame callback
//! and the pointer handlers. Each call runs to completion before the next
//! one starts, so no state is ever observed half-updated.

use log::info;

use super::config::FieldConfig;
use super::field::Field;
use super::interaction::{InteractionController, PointerState, PressOutcome};
use super::render::{self, Surface};
use super::scheduler::{AnimationLoop, FrameScheduler};
use super::theme::{Palette, Palettes, ThemeMode};

pub struct FieldSession<S: FrameScheduler> {
	config: FieldConfig,
	palettes: Palettes,
	theme: ThemeMode,
	field: Field,
	controller: InteractionController,
	frames: AnimationLoop<S>,
}

impl<S: FrameScheduler> FieldSession<S> {
	/// The config is sanitized here; the field stays empty until
	/// [`FieldSession::initialize`].
	pub fn new(config: FieldConfig, scheduler: S, seed: u64) -> Self {
		let config = config.sanitized();
		let palettes = config.theme.palettes();
		Self {
			config,
			palettes,
			theme: ThemeMode::default(),
			field: Field::new(seed),
			controller: InteractionController::default(),
			frames: AnimationLoop::new(scheduler),
		}
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn field(&self) -> &Field {
		&self.field
	}

	pub fn field_mut(&mut self) -> &mut Field {
		&mut self.field
	}

	pub fn pointer(&self) -> &PointerState {
		self.controller.pointer()
	}

	pub fn frames(&self) -> &AnimationLoop<S> {
		&self.frames
	}

	pub fn initialize(&mut self, width: f64, height: f64) {
		self.field.initialize(width, height, &self.config);
	}

	/// Takes effect on the next drawn frame.
	pub fn set_theme(&mut self, theme: ThemeMode) {
		if self.theme != theme {
			info!("ambient-field: theme -> {:?}", theme);
			self.theme = theme;
		}
	}

	pub fn theme(&self) -> ThemeMode {
		self.theme
	}

	pub fn palette(&self) -> &Palette {
		self.palettes.get(self.theme)
	}

	pub fn start(&mut self) {
		self.frames.start();
	}

	pub fn stop(&mut self) {
		self.frames.stop();
	}

	pub fn is_running(&self) -> bool {
		self.frames.is_running()
	}

	/// Advance the simulation one step and draw it.
	pub fn tick<T: Surface + ?Sized>(&mut self, surface: &mut T) {
		let palette = *self.palette();
		let pointer = *self.controller.pointer();

		self.field.advance_particles(&pointer, &self.config);
		let waves = self
			.field
			.advance_waves(self.config.waves.fade_out, palette.wave.a);

		render::draw_frame(
			surface,
			self.field.size(),
			self.field.particles(),
			&waves,
			&pointer,
			&palette,
			&self.config,
		);
	}

	/// Frame callback body: tick if the loop is running, then ask for the
	/// next frame. Returns whether a tick ran.
	pub fn frame<T: Surface + ?Sized>(&mut self, surface: &mut T) -> bool {
		if !self.frames.begin_frame() {
			return false;
		}
		self.tick(surface);
		self.frames.schedule_next();
		true
	}

	/// Stop, rebuild the field for the new surface size, and restart.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.frames.stop();
		self.initialize(width, height);
		self.frames.start();
	}

	/// Stop the loop and drop every particle and wave.
	pub fn teardown(&mut self) {
		self.frames.stop();
		self.field.clear();
		self.controller.on_pointer_leave();
		info!("ambient-field: session torn down");
	}

	pub fn pointer_down(&mut self, position: (f64, f64)) -> PressOutcome {
		self.controller
			.on_pointer_down(&mut self.field, &self.config, position)
	}

	pub fn pointer_move(&mut self, position: (f64, f64)) {
		self.controller.on_pointer_move(position);
	}

	pub fn pointer_up(&mut self) {
		self.controller.on_pointer_up();
	}

	pub fn pointer_leave(&mut self) {
		self.controller.on_pointer_leave();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::render::tests::Recorder;
	use crate::components::particle_field::scheduler::tests::CountingScheduler;

	fn session(count: usize) -> FieldSession<CountingScheduler> {
		let config = FieldConfig {
			particle_count: count,
			..Default::default()
		};
		let mut session = FieldSession::new(config, CountingScheduler::default(), 11);
		session.initialize(320.0, 240.0);
		session
	}

	#[test]
	fn frame_runs_only_while_started() {
		let mut session = session(5);
		let mut rec = Recorder::default();
		assert!(!session.frame(&mut rec));
		assert_eq!(rec.clears, 0);

		session.start();
		assert!(session.frame(&mut rec));
		assert!(session.frame(&mut rec));
		assert_eq!(rec.clears, 2);
		assert_eq!(session.frames().scheduler().requested, 3);
	}

	#[test]
	fn theme_switch_applies_on_next_tick() {
		let mut session = session(1);
		let mut rec = Recorder::default();
		session.tick(&mut rec);
		session.set_theme(ThemeMode::Dark);
		session.tick(&mut rec);

		let light = Palette::light();
		let dark = Palette::dark();
		let colors: Vec<_> = rec.discs.iter().map(|d| d.3).collect();
		assert!(colors[0] == light.particle || colors[0] == light.special);
		assert!(colors[1] == dark.particle || colors[1] == dark.special);
	}

	#[test]
	fn resize_restarts_with_fresh_field() {
		let mut session = session(7);
		session.start();
		session.pointer_down((1.0, 1.0));
		session.resize(100.0, 80.0);

		assert!(session.is_running());
		assert_eq!(session.field().size(), (100.0, 80.0));
		assert_eq!(session.field().particles().len(), 7);
		assert!(session.field().waves().is_empty());
		assert_eq!(session.frames().scheduler().cancelled, vec![1]);
	}

	#[test]
	fn teardown_stops_and_empties() {
		let mut session = session(7);
		session.start();
		session.teardown();
		assert!(!session.is_running());
		// The pending frame is cancelled, so no callback fires after unmount.
		assert_eq!(session.frames().scheduler().cancelled, vec![1]);
		assert!(session.field().particles().is_empty());
		assert_eq!(session.pointer(), &PointerState::default());
	}
}
