//! Errors raised while mounting the field onto the page.

use std::fmt;

use wasm_bindgen::JsValue;

/// Reasons the canvas could not be set up. All of them abort mounting; the
/// component logs the error and renders nothing further.
#[derive(Debug)]
pub enum SetupError {
	/// No `window` (not running in a browser).
	NoWindow,
	/// The canvas refused to hand out a 2d context.
	NoContext,
	/// A browser API call failed.
	Js(String),
}

impl fmt::Display for SetupError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SetupError::NoWindow => write!(f, "no browser window available"),
			SetupError::NoContext => write!(f, "canvas has no 2d rendering context"),
			SetupError::Js(msg) => write!(f, "browser call failed: {}", msg),
		}
	}
}

impl std::error::Error for SetupError {}

impl From<JsValue> for SetupError {
	fn from(value: JsValue) -> Self {
		SetupError::Js(format!("{:?}", value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages() {
		assert_eq!(
			SetupError::NoContext.to_string(),
			"canvas has no 2d rendering context"
		);
		assert_eq!(
			SetupError::Js("boom".into()).to_string(),
			"browser call failed: boom"
		);
	}
}
