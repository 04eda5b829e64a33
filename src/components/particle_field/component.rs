//! Leptos component mounting the particle field on a full-window canvas.
//!
//! The component sizes the canvas to the viewport, builds a
//! [`FieldSession`], and wires up mouse handlers, a debounced window resize
//! listener, and a `MutationObserver` on `<html data-theme>`. Frames are
//! driven by `requestAnimationFrame` through [`AnimationFrames`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use leptos::__reexports::send_wrapper::SendWrapper;
use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, MutationObserver,
	MutationObserverInit, Window,
};

use super::config::FieldConfig;
use super::error::SetupError;
use super::interaction::{DisplayMapping, PressOutcome};
use super::scheduler::AnimationFrames;
use super::session::FieldSession;
use super::theme::ThemeMode;
use super::timer::{SingleTimer, WindowTimeouts};

/// Window resizes are collapsed into one re-initialization after this quiet period.
const RESIZE_DEBOUNCE_MS: i32 = 200;

type SharedSession = Rc<RefCell<Option<FieldSession<AnimationFrames>>>>;

/// Browser callbacks that must outlive the mount effect.
#[derive(Default)]
struct Listeners {
	resize: Option<Closure<dyn FnMut()>>,
	resize_timer: Option<Rc<RefCell<SingleTimer<WindowTimeouts>>>>,
	theme: Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>,
	observer: Option<MutationObserver>,
}

impl Listeners {
	/// Detach everything from the page and drop the callbacks.
	fn release(&mut self) {
		if let Some(observer) = self.observer.take() {
			observer.disconnect();
		}
		self.theme = None;
		if let Some(timer) = self.resize_timer.take() {
			timer.borrow_mut().cancel();
		}
		if let Some(on_resize) = self.resize.take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
			}
		}
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

fn current_theme(document: &Document) -> ThemeMode {
	let attr = document
		.document_element()
		.and_then(|root| root.get_attribute("data-theme"));
	ThemeMode::from_attribute(attr.as_deref())
}

/// Pointer position in surface coordinates.
fn surface_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	let mapping = DisplayMapping::new(
		(canvas.width() as f64, canvas.height() as f64),
		(rect.width(), rect.height()),
	);
	mapping.to_surface(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Build the session, start the frame loop, and install listeners.
fn mount(
	canvas: &HtmlCanvasElement,
	config: FieldConfig,
	session: &SharedSession,
	listeners: &Rc<RefCell<Listeners>>,
) -> Result<(), SetupError> {
	let window = web_sys::window().ok_or(SetupError::NoWindow)?;
	let document = window.document().ok_or(SetupError::NoWindow)?;

	let (w, h) = viewport_size(&window);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let mut ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(SetupError::NoContext)?
		.dyn_into()
		.map_err(|_| SetupError::NoContext)?;

	let frames = AnimationFrames::default();
	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
	let mut new_session = FieldSession::new(config, frames.clone(), seed);
	new_session.set_theme(current_theme(&document));
	new_session.initialize(w, h);
	*session.borrow_mut() = Some(new_session);

	let session_anim = session.clone();
	frames.set_callback(Closure::new(move || {
		if let Some(ref mut s) = *session_anim.borrow_mut() {
			s.frame(&mut ctx);
		}
	}));

	if let Err(e) = watch_theme(&document, session, listeners) {
		warn!("ambient-field: theme changes will be ignored: {}", e);
	}
	watch_resize(&window, canvas, session, listeners);

	if let Some(ref mut s) = *session.borrow_mut() {
		s.start();
	}
	Ok(())
}

fn watch_theme(
	document: &Document,
	session: &SharedSession,
	listeners: &Rc<RefCell<Listeners>>,
) -> Result<(), SetupError> {
	let root = document.document_element().ok_or(SetupError::NoWindow)?;
	let (session_theme, document_theme) = (session.clone(), document.clone());
	let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
		move |_records: js_sys::Array, _observer: MutationObserver| {
			let mode = current_theme(&document_theme);
			if let Some(ref mut s) = *session_theme.borrow_mut() {
				s.set_theme(mode);
			}
		},
	);

	let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
	let options = MutationObserverInit::new();
	options.set_attributes(true);
	options.set_attribute_filter(&js_sys::Array::of1(&JsValue::from_str("data-theme")));
	observer.observe_with_options(&root, &options)?;

	let mut l = listeners.borrow_mut();
	l.theme = Some(callback);
	l.observer = Some(observer);
	Ok(())
}

fn watch_resize(
	window: &Window,
	canvas: &HtmlCanvasElement,
	session: &SharedSession,
	listeners: &Rc<RefCell<Listeners>>,
) {
	let timeouts = WindowTimeouts::default();
	let timer = Rc::new(RefCell::new(SingleTimer::new(
		timeouts.clone(),
		RESIZE_DEBOUNCE_MS,
	)));

	// The timer owns this callback through its host, so hold it weakly.
	let timer_apply: Weak<RefCell<SingleTimer<WindowTimeouts>>> = Rc::downgrade(&timer);
	let (session_apply, canvas_apply) = (session.clone(), canvas.clone());
	timeouts.set_callback(Closure::new(move || {
		let Some(timer) = timer_apply.upgrade() else {
			return;
		};
		timer.borrow_mut().fired();
		let Some(win) = web_sys::window() else {
			return;
		};
		let (nw, nh) = viewport_size(&win);
		canvas_apply.set_width(nw as u32);
		canvas_apply.set_height(nh as u32);
		if let Some(ref mut s) = *session_apply.borrow_mut() {
			s.resize(nw, nh);
		}
	}));

	let (session_resize, timer_resize) = (session.clone(), timer.clone());
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		if let Some(ref mut s) = *session_resize.borrow_mut() {
			s.stop();
		}
		timer_resize.borrow_mut().restart();
	});
	let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());

	let mut l = listeners.borrow_mut();
	l.resize = Some(on_resize);
	l.resize_timer = Some(timer);
}

/// Renders the interactive particle field on a fixed, full-window canvas.
///
/// Without an explicit `config`, defaults are used. `on_egg_found` runs each
/// time the hidden particle is clicked; with no callback the event is dropped.
#[component]
pub fn ParticleField(
	#[prop(optional)] config: Option<FieldConfig>,
	#[prop(optional)] on_egg_found: Option<Callback<()>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let session: SharedSession = Rc::new(RefCell::new(None));
	let listeners: Rc<RefCell<Listeners>> = Rc::new(RefCell::new(Listeners::default()));
	let config = config.unwrap_or_default();

	let (session_init, listeners_init) = (session.clone(), listeners.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if session_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match mount(&canvas, config.clone(), &session_init, &listeners_init) {
			Ok(()) => info!("ambient-field: mounted"),
			Err(e) => error!("ambient-field: setup aborted: {}", e),
		}
	});

	let session_md = session.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let pos = surface_position(&canvas, &ev);
		let outcome = session_md
			.borrow_mut()
			.as_mut()
			.map(|s| s.pointer_down(pos));

		if outcome == Some(PressOutcome::EggFound) {
			match on_egg_found {
				Some(ref cb) => cb.run(()),
				None => debug!("ambient-field: egg found but nobody is listening"),
			}
		}
	};

	let session_mm = session.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let pos = surface_position(&canvas, &ev);
		if let Some(ref mut s) = *session_mm.borrow_mut() {
			s.pointer_move(pos);
		}
	};

	let session_mu = session.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *session_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let (session_cleanup, listeners_cleanup) = (
		SendWrapper::new(session.clone()),
		SendWrapper::new(listeners),
	);
	on_cleanup(move || {
		// Taking the session out also breaks the frame callback's hold on it.
		if let Some(mut s) = session_cleanup.borrow_mut().take() {
			s.teardown();
		}
		listeners_cleanup.borrow_mut().release();
	});

	let session_ml = session;
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *session_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="position: fixed; inset: 0; width: 100vw; height: 100vh; display: block;"
		/>
	}
}
