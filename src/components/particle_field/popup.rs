//! The popup revealed by clicking the egg.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use leptos::__reexports::send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use super::timer::{SingleTimer, TimeoutHost, WindowTimeouts};

/// How long the popup stays up without interaction.
pub const AUTO_HIDE_MS: i32 = 5_000;

/// Popup visibility with a single auto-hide timer: showing again restarts
/// the countdown, dismissing cancels it.
pub struct AutoHide<H: TimeoutHost> {
	timer: SingleTimer<H>,
	visible: bool,
}

impl<H: TimeoutHost> AutoHide<H> {
	pub fn new(host: H, delay_ms: i32) -> Self {
		Self {
			timer: SingleTimer::new(host, delay_ms),
			visible: false,
		}
	}

	pub fn is_visible(&self) -> bool {
		self.visible
	}

	pub fn timer(&self) -> &SingleTimer<H> {
		&self.timer
	}

	pub fn show(&mut self) {
		self.visible = true;
		self.timer.restart();
	}

	pub fn dismiss(&mut self) {
		self.timer.cancel();
		self.visible = false;
	}

	/// The countdown fired.
	pub fn expire(&mut self) {
		self.timer.fired();
		self.visible = false;
	}
}

/// Expire a popup the timeout callback only holds weakly. Returns `false`
/// once the popup itself is gone.
fn expire_weak<H: TimeoutHost>(popup: &Weak<RefCell<AutoHide<H>>>) -> bool {
	match popup.upgrade() {
		Some(popup) => {
			popup.borrow_mut().expire();
			true
		}
		None => false,
	}
}

/// Popup shown each time `trigger` changes to a non-zero value.
///
/// Closes itself after `hide_after_ms`, or earlier via its close button.
#[component]
pub fn EggPopup(
	#[prop(into)] trigger: Signal<u32>,
	#[prop(default = AUTO_HIDE_MS)] hide_after_ms: i32,
) -> impl IntoView {
	let (visible, set_visible) = signal(false);
	let timeouts = WindowTimeouts::default();
	let auto_hide = Rc::new(RefCell::new(AutoHide::new(timeouts.clone(), hide_after_ms)));

	// `AutoHide` owns this callback through its timer host.
	let auto_hide_expire = Rc::downgrade(&auto_hide);
	timeouts.set_callback(Closure::new(move || {
		if expire_weak(&auto_hide_expire) {
			set_visible.set(false);
		}
	}));

	let auto_hide_cleanup = SendWrapper::new(auto_hide.clone());
	on_cleanup(move || auto_hide_cleanup.borrow_mut().dismiss());

	let auto_hide_show = auto_hide.clone();
	Effect::new(move |_| {
		if trigger.get() == 0 {
			return;
		}
		let mut popup = auto_hide_show.borrow_mut();
		popup.show();
		set_visible.set(popup.is_visible());
	});

	let on_close = move |_: MouseEvent| {
		auto_hide.borrow_mut().dismiss();
		set_visible.set(false);
	};

	view! {
		<div class="egg-popup" class:visible=move || visible.get()>
			<p>"You found the hidden particle."</p>
			<button class="egg-popup-close" on:click=on_close>
				"×"
			</button>
		</div>
	}
}
