//! Frame scheduling.
//!
//! The simulation never reschedules itself directly; it asks a
//! [`FrameScheduler`] for the next frame. In the browser that is
//! `requestAnimationFrame`, in tests a counter driven by a plain loop.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;

/// Something that can call the frame callback again later.
pub trait FrameScheduler {
	type Handle;

	/// Ask for one more frame. `None` means the request could not be made.
	fn request_frame(&mut self) -> Option<Self::Handle>;

	fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Start/stop state for a self-rescheduling frame loop.
///
/// `start` while running and `stop` while stopped are no-ops, so at most one
/// frame request is ever outstanding.
pub struct AnimationLoop<S: FrameScheduler> {
	scheduler: S,
	pending: Option<S::Handle>,
	running: bool,
}

impl<S: FrameScheduler> AnimationLoop<S> {
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			pending: None,
			running: false,
		}
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	pub fn start(&mut self) {
		if self.running {
			return;
		}
		self.running = true;
		self.schedule_next();
	}

	pub fn stop(&mut self) {
		if !self.running {
			return;
		}
		self.running = false;
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel_frame(handle);
		}
	}

	/// Called at the top of the frame callback. The request that fired is
	/// consumed; returns whether the frame should run.
	pub fn begin_frame(&mut self) -> bool {
		self.pending = None;
		self.running
	}

	/// Request the following frame if still running and none is pending.
	pub fn schedule_next(&mut self) {
		if self.running && self.pending.is_none() {
			self.pending = self.scheduler.request_frame();
		}
	}
}

/// Browser scheduler backed by `requestAnimationFrame`.
///
/// The callback is filled in after construction because it usually needs a
/// handle to the session that owns this scheduler.
#[derive(Clone, Default)]
pub struct AnimationFrames {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl AnimationFrames {
	pub fn set_callback(&self, callback: Closure<dyn FnMut()>) {
		*self.callback.borrow_mut() = Some(callback);
	}
}

impl FrameScheduler for AnimationFrames {
	type Handle = i32;

	fn request_frame(&mut self) -> Option<i32> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => Some(handle),
			Err(e) => {
				warn!("ambient-field: requestAnimationFrame failed: {:?}", e);
				None
			}
		}
	}

	fn cancel_frame(&mut self, handle: i32) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;

	/// Hands out sequential handles and remembers cancellations.
	#[derive(Default)]
	pub(crate) struct CountingScheduler {
		pub requested: u32,
		pub cancelled: Vec<u32>,
	}

	impl FrameScheduler for CountingScheduler {
		type Handle = u32;

		fn request_frame(&mut self) -> Option<u32> {
			self.requested += 1;
			Some(self.requested)
		}

		fn cancel_frame(&mut self, handle: u32) {
			self.cancelled.push(handle);
		}
	}

	#[test]
	fn duplicate_start_requests_once() {
		let mut frames = AnimationLoop::new(CountingScheduler::default());
		frames.start();
		frames.start();
		assert!(frames.is_running());
		assert_eq!(frames.scheduler().requested, 1);
	}

	#[test]
	fn stop_cancels_pending_and_is_idempotent() {
		let mut frames = AnimationLoop::new(CountingScheduler::default());
		frames.stop();
		frames.start();
		frames.stop();
		frames.stop();
		assert!(!frames.is_running());
		assert_eq!(frames.scheduler().cancelled, vec![1]);
	}

	#[test]
	fn frame_consumes_request_and_reschedules() {
		let mut frames = AnimationLoop::new(CountingScheduler::default());
		frames.start();
		assert!(frames.begin_frame());
		frames.schedule_next();
		frames.schedule_next();
		assert_eq!(frames.scheduler().requested, 2);

		frames.stop();
		assert!(!frames.begin_frame());
		frames.schedule_next();
		assert_eq!(frames.scheduler().requested, 2);
	}
}
