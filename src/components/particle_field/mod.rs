//! Ambient particle field.
//!
//! Draws drifting particles on a full-window canvas with:
//! - Lines between nearby particles, fading with distance
//! - Lines from particles to the pointer while it hovers
//! - Repulsion while the pointer is pressed
//! - Expanding wave rings on press
//! - One hidden particle that raises an "egg found" event when clicked
//!
//! The simulation core ([`FieldSession`] and everything below it) has no DOM
//! dependency beyond the [`Surface`] and [`FrameScheduler`] traits, so it can
//! be driven headlessly.
//!
//! # Example
//!
//! ```ignore
//! use ambient_field::{EggPopup, FieldConfig, ParticleField};
//!
//! let (found, set_found) = signal(0u32);
//! view! {
//!     <ParticleField
//!         config=FieldConfig::default()
//!         on_egg_found=Callback::new(move |_| set_found.update(|n| *n += 1))
//!     />
//!     <EggPopup trigger=found />
//! }
//! ```

mod component;
pub mod config;
mod error;
pub mod field;
pub mod interaction;
pub mod particle;
mod popup;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod theme;
pub mod timer;
pub mod wave;

pub use component::ParticleField;
pub use config::{EggConfig, EggPlacement, FieldConfig, ThemeConfig, WaveConfig};
pub use error::SetupError;
pub use field::Field;
pub use interaction::{DisplayMapping, HIT_PAD, InteractionController, PointerState, PressOutcome};
pub use particle::Particle;
pub use popup::{AUTO_HIDE_MS, AutoHide, EggPopup};
pub use render::Surface;
pub use scheduler::{AnimationFrames, AnimationLoop, FrameScheduler};
pub use session::FieldSession;
pub use theme::{Color, Palette, Palettes, ThemeMode};
pub use timer::{SingleTimer, TimeoutHost, WindowTimeouts};
pub use wave::{Wave, WaveFrame};
