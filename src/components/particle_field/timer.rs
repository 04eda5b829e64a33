//! One-shot timers with at most one pending instance.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;

/// Something that can run a callback once after a delay.
pub trait TimeoutHost {
	type Handle;

	fn set_timeout(&mut self, delay_ms: i32) -> Option<Self::Handle>;
	fn clear_timeout(&mut self, handle: Self::Handle);
}

/// A timeout that is restarted rather than stacked.
///
/// Used both for debouncing (resize) and for auto-hiding (popup).
pub struct SingleTimer<H: TimeoutHost> {
	host: H,
	pending: Option<H::Handle>,
	delay_ms: i32,
}

impl<H: TimeoutHost> SingleTimer<H> {
	pub fn new(host: H, delay_ms: i32) -> Self {
		Self {
			host,
			pending: None,
			delay_ms,
		}
	}

	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Cancel any pending timeout and start a fresh one.
	pub fn restart(&mut self) {
		self.cancel();
		self.pending = self.host.set_timeout(self.delay_ms);
	}

	pub fn cancel(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.host.clear_timeout(handle);
		}
	}

	/// Must be called from the timeout callback so the spent handle is not
	/// cleared later.
	pub fn fired(&mut self) {
		self.pending = None;
	}
}

/// Browser timeouts through `window.setTimeout`.
///
/// Like [`super::scheduler::AnimationFrames`], the callback is installed
/// after construction.
#[derive(Clone, Default)]
pub struct WindowTimeouts {
	callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl WindowTimeouts {
	pub fn set_callback(&self, callback: Closure<dyn FnMut()>) {
		*self.callback.borrow_mut() = Some(callback);
	}
}

impl TimeoutHost for WindowTimeouts {
	type Handle = i32;

	fn set_timeout(&mut self, delay_ms: i32) -> Option<i32> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				delay_ms,
			)
			.map_err(|e| warn!("ambient-field: setTimeout failed: {:?}", e))
			.ok()
	}

	fn clear_timeout(&mut self, handle: i32) {
		if let Some(window) = web_sys::window() {
			window.clear_timeout_with_handle(handle);
		}
	}
}
